//! A terminal front end for the travel agent.
//!
//! Without arguments it starts an interactive chat. With `--json` it reads
//! one chat request from stdin and prints the response as JSON.

#[macro_use]
extern crate tracing;

use std::io::Write as _;
use std::process::ExitCode;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufReadExt, AsyncReadExt};
use tokio::select;
use tokio::time::sleep;
use travel_agent::{AppConfig, ChatMessage, ChatRequest, TravelAgent};

const BAR_CHAR: &str = "▎";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let agent = match TravelAgent::from_config(&config) {
        Ok(agent) => agent,
        Err(err) => {
            eprintln!("failed to set up Duffel client: {err}");
            return ExitCode::FAILURE;
        }
    };

    if std::env::args().skip(1).any(|arg| arg == "--json") {
        run_once(&agent).await
    } else {
        run_interactive(&agent).await;
        ExitCode::SUCCESS
    }
}

async fn run_once(agent: &TravelAgent) -> ExitCode {
    let mut input = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut input).await {
        eprintln!("error reading input: {err}");
        return ExitCode::FAILURE;
    }
    let req: ChatRequest = match serde_json::from_str(&input) {
        Ok(req) => req,
        Err(err) => {
            eprintln!("invalid chat request: {err}");
            return ExitCode::FAILURE;
        }
    };

    let resp = match agent.chat(req).await {
        Ok(resp) => resp,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    match serde_json::to_string_pretty(&resp) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to encode response: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run_interactive(agent: &TravelAgent) {
    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .map(|style| style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"))
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    let mut lines = io::BufReader::new(io::stdin()).lines();
    let mut history: Vec<ChatMessage> = vec![];
    let mut state = None;

    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                error!("error reading input: {}", err);
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        history.push(ChatMessage::user(line));
        let chat = agent.chat(ChatRequest {
            messages: history.clone(),
            state: state.clone(),
        });
        tokio::pin!(chat);

        let progress_bar = ProgressBar::new_spinner();
        progress_bar.set_style(progress_style.clone());
        progress_bar.set_message("🤔 Thinking...");
        let result = loop {
            select! {
                result = &mut chat => break result,
                _ = sleep(Duration::from_millis(100)) => progress_bar.inc(1),
            }
        };
        // Finish the progress bar before printing anything else.
        progress_bar.finish_and_clear();

        match result {
            Ok(resp) => {
                println!(
                    "{}🤖 {}",
                    BAR_CHAR.bright_cyan(),
                    resp.reply().unwrap_or_default().bright_white()
                );
                history = resp.messages;
                state = Some(resp.state);
            }
            Err(err) => {
                // Let the user retry the same message.
                history.pop();
                println!("{}⚠️  {}", BAR_CHAR.bright_red(), err);
            }
        }
    }
}
