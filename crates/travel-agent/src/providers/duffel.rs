//! A minimal client for the Duffel flights API.

use std::error::Error as StdError;
use std::fmt::{self, Debug, Display};
use std::sync::Arc;
use std::time::Duration;

use mime::Mime;
use reqwest::{Client, IntoUrl, RequestBuilder, StatusCode, Url, header};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use travel_agent_core::action::params::{CabinClass, Passenger, Slice};

const DEFAULT_BASE_URL: &str = "https://api.duffel.com";
const DEFAULT_VERSION: &str = "v2";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(45);

/// Builder for [`DuffelConfig`].
#[derive(Clone)]
pub struct DuffelConfigBuilder {
    access_token: String,
    base_url: Option<String>,
    version: Option<String>,
    timeout: Option<Duration>,
}

impl DuffelConfigBuilder {
    /// Creates a builder with the given access token.
    #[inline]
    pub fn with_access_token<S: Into<String>>(access_token: S) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: None,
            version: None,
            timeout: None,
        }
    }

    /// Sets a custom base URL.
    #[inline]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the value of the `Duffel-Version` header.
    #[inline]
    pub fn with_version<S: Into<String>>(mut self, version: S) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the timeout of each request.
    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> DuffelConfig {
        let base_url =
            self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        DuffelConfig {
            access_token: self.access_token,
            base_url: base_url.trim_end_matches('/').to_owned(),
            version: self
                .version
                .unwrap_or_else(|| DEFAULT_VERSION.to_owned()),
            timeout: self.timeout.unwrap_or(REQUEST_TIMEOUT),
        }
    }
}

impl Debug for DuffelConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DuffelConfigBuilder")
            .field("access_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Configuration for [`DuffelClient`].
#[derive(Clone, PartialEq, Eq)]
pub struct DuffelConfig {
    access_token: String,
    base_url: String,
    version: String,
    timeout: Duration,
}

impl DuffelConfig {
    /// Returns the base URL without a trailing slash.
    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the API version sent with each request.
    #[inline]
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl Debug for DuffelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DuffelConfig")
            .field("access_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Error type for [`DuffelClient`].
#[derive(Debug)]
pub struct DuffelError {
    status: Option<StatusCode>,
    message: String,
}

impl DuffelError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// Returns the HTTP status, if the API answered at all.
    #[inline]
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for DuffelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => {
                write!(f, "Duffel API error {status}: {}", self.message)
            }
            None => write!(f, "Duffel request failed: {}", self.message),
        }
    }
}

impl StdError for DuffelError {}

impl From<reqwest::Error> for DuffelError {
    #[inline]
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Value,
}

/// Client for the Duffel flights API.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct DuffelClient {
    client: Client,
    config: Arc<DuffelConfig>,
}

impl DuffelClient {
    /// Creates a client with the given configuration.
    pub fn new(config: DuffelConfig) -> Result<Self, DuffelError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &DuffelConfig {
        &self.config
    }

    /// Creates an offer request and returns its `data` object.
    pub async fn create_offer_request(
        &self,
        slices: &[Slice],
        passengers: &[Passenger],
        cabin_class: Option<CabinClass>,
        max_connections: Option<u32>,
    ) -> Result<Value, DuffelError> {
        let payload = offer_request_payload(
            slices,
            passengers,
            cabin_class,
            max_connections,
        );
        let url = format!("{}/air/offer_requests", self.config.base_url);
        let req = self
            .request(reqwest::Method::POST, url)
            .json(&json!({ "data": payload }));
        self.send(req).await
    }

    /// Lists up to `limit` offers of an offer request.
    pub async fn list_offers(
        &self,
        offer_request_id: &str,
        limit: usize,
    ) -> Result<Vec<Value>, DuffelError> {
        let url = offers_url(&self.config.base_url, offer_request_id, limit)?;
        let req = self.request(reqwest::Method::GET, url);
        match self.send(req).await? {
            Value::Array(offers) => Ok(offers),
            _ => Ok(vec![]),
        }
    }

    /// Books a single offer and returns the created order.
    pub async fn create_order(
        &self,
        offer_id: &str,
        passengers: &[Map<String, Value>],
        payment: Option<&Map<String, Value>>,
    ) -> Result<Value, DuffelError> {
        let payload = order_payload(offer_id, passengers, payment);
        let url = format!("{}/air/orders", self.config.base_url);
        let req = self
            .request(reqwest::Method::POST, url)
            .json(&json!({ "data": payload }));
        self.send(req).await
    }

    fn request(
        &self,
        method: reqwest::Method,
        url: impl IntoUrl,
    ) -> RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&self.config.access_token)
            .header("Duffel-Version", &self.config.version)
            .header(header::ACCEPT, "application/json")
    }

    async fn send(&self, req: RequestBuilder) -> Result<Value, DuffelError> {
        let resp = req.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!("Duffel request failed with {status}");
            return Err(DuffelError {
                status: Some(status),
                message: body,
            });
        }

        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<Mime>().ok());
        if !is_json(content_type.as_ref()) {
            return Err(DuffelError::new(format!(
                "Unexpected content type: {content_type:?}"
            )));
        }

        let envelope = resp.json::<Envelope>().await?;
        Ok(envelope.data)
    }
}

#[inline]
fn is_json(content_type: Option<&Mime>) -> bool {
    content_type.is_some_and(|m| m.subtype() == mime::JSON)
}

fn offers_url(
    base_url: &str,
    offer_request_id: &str,
    limit: usize,
) -> Result<Url, DuffelError> {
    let mut url = Url::parse(&format!("{base_url}/air/offers"))
        .map_err(|err| DuffelError::new(format!("invalid base URL: {err}")))?;
    url.query_pairs_mut()
        .append_pair("offer_request_id", offer_request_id)
        .append_pair("limit", &limit.to_string());
    Ok(url)
}

fn offer_request_payload(
    slices: &[Slice],
    passengers: &[Passenger],
    cabin_class: Option<CabinClass>,
    max_connections: Option<u32>,
) -> Value {
    let mut payload = json!({
        "slices": slices,
        "passengers": passengers,
    });
    if let Some(cabin_class) = cabin_class {
        payload["cabin_class"] = json!(cabin_class);
    }
    if let Some(max_connections) = max_connections {
        payload["max_connections"] = json!(max_connections);
    }
    payload
}

fn order_payload(
    offer_id: &str,
    passengers: &[Map<String, Value>],
    payment: Option<&Map<String, Value>>,
) -> Value {
    let mut payload = json!({ "selected_offers": [offer_id] });
    if !passengers.is_empty() {
        payload["passengers"] = json!(passengers);
    }
    if let Some(payment) = payment {
        payload["payments"] = json!([payment]);
    }
    payload
}
