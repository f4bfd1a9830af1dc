use travel_agent_model::{
    ErrorKind, ModelFinishReason, ModelTurn, ToolCallRequest,
};

use crate::Error;
use crate::proto::ChatCompletion;

/// Converts a completed chat completion into a model turn.
pub fn into_turn(mut completion: ChatCompletion) -> Result<ModelTurn, Error> {
    if completion.choices.is_empty() {
        return Err(Error::new("response has no choices", ErrorKind::Other));
    }
    let choice = completion.choices.swap_remove(0);

    let finish_reason = match choice.finish_reason.as_deref() {
        Some("tool_calls") => Some(ModelFinishReason::ToolCalls),
        Some("length") => Some(ModelFinishReason::Length),
        Some("content_filter") => {
            return Err(Error::new(
                "response was blocked by the content filter",
                ErrorKind::Moderated,
            ));
        }
        Some(_) => Some(ModelFinishReason::Stop),
        None => None,
    };

    let tool_calls = choice
        .message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|call| ToolCallRequest {
            id: call.id,
            name: call.function.name,
            arguments: call.function.arguments,
        })
        .collect();

    Ok(ModelTurn {
        content: choice.message.content,
        tool_calls,
        finish_reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> ChatCompletion {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_tool_call_response() {
        let completion = parse(
            r#"{
                "id": "chatcmpl-1",
                "choices": [{
                    "index": 0,
                    "finish_reason": "tool_calls",
                    "message": {
                        "role": "assistant",
                        "content": null,
                        "tool_calls": [
                            {
                                "id": "call_a",
                                "type": "function",
                                "function": {
                                    "name": "search_flights",
                                    "arguments": "{\"slices\":[]}"
                                }
                            },
                            {
                                "id": "call_b",
                                "type": "function",
                                "function": {
                                    "name": "search_hotels",
                                    "arguments": "{\"city\":\"Rome\"}"
                                }
                            }
                        ]
                    }
                }]
            }"#,
        );
        let turn = into_turn(completion).unwrap();
        assert_eq!(turn.content, None);
        assert_eq!(turn.finish_reason, Some(ModelFinishReason::ToolCalls));
        let ids: Vec<_> =
            turn.tool_calls.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["call_a", "call_b"]);
        assert_eq!(turn.tool_calls[1].arguments, r#"{"city":"Rome"}"#);
    }

    #[test]
    fn test_text_response() {
        let completion = parse(
            r#"{
                "id": "chatcmpl-2",
                "choices": [{
                    "finish_reason": "stop",
                    "message": { "role": "assistant", "content": "Bon voyage!" }
                }]
            }"#,
        );
        let turn = into_turn(completion).unwrap();
        assert!(!turn.has_tool_calls());
        assert_eq!(turn.content.as_deref(), Some("Bon voyage!"));
        assert_eq!(turn.finish_reason, Some(ModelFinishReason::Stop));
    }

    #[test]
    fn test_invalid_responses() {
        let err = into_turn(parse(r#"{ "choices": [] }"#)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Other);

        let err = into_turn(parse(
            r#"{
                "choices": [{
                    "finish_reason": "content_filter",
                    "message": { "content": null }
                }]
            }"#,
        ))
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Moderated);
    }
}
