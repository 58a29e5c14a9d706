use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, error};

use crate::error::{AnalysisError, TransportError, UNKNOWN_SERVER_ERROR_MSG};
use crate::model::RouteResult;

const USER_AGENT: &str = concat!("satwatch_route/", env!("CARGO_PKG_VERSION"));

/// Raw HTTP answer: status plus body text.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One-shot GET. Implementations must map connection-level failures to
/// `TransportError::Connect`.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<HttpReply, TransportError>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// `timeout == None` waits for the backend indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<HttpReply, TransportError> {
        let resp = self.client.get(url).send().map_err(map_reqwest_error)?;
        let status = resp.status().as_u16();
        let body = resp.text().map_err(map_reqwest_error)?;
        Ok(HttpReply { status, body })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_connect() {
        TransportError::Connect(e.to_string())
    } else {
        TransportError::Other(e.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Turns a backend reply into a route or the error the user should see.
pub fn interpret_reply(reply: HttpReply) -> Result<RouteResult, AnalysisError> {
    if !reply.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&reply.body)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| UNKNOWN_SERVER_ERROR_MSG.to_string());
        error!(status = reply.status, %message, "backend reported an error");
        return Err(AnalysisError::Server(message));
    }

    let result: RouteResult = serde_json::from_str(&reply.body).map_err(|e| {
        error!(error = %e, "failed to decode route response");
        AnalysisError::InvalidResponse(e.to_string())
    })?;

    debug!(
        points = result.route.len(),
        hazards = result.hazards.len(),
        "decoded route response"
    );
    Ok(result)
}

/// GET `url` and interpret the reply.
pub fn fetch_route(transport: &dyn Transport, url: &str) -> Result<RouteResult, AnalysisError> {
    let reply = transport.get(url).map_err(|e| {
        error!(error = %e, %url, "route request failed");
        AnalysisError::from(e)
    })?;
    interpret_reply(reply)
}
