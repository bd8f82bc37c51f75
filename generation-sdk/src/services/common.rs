//! HTTP plumbing shared by provider clients

use std::fmt;
use std::time::Duration;

use reqwest::{header, Client, Response};

use crate::error::{mapping, ErrorContext, Result, ServiceError, RETRY_AFTER_KEY};

/// `User-Agent` sent with every provider request: `product/version (comment)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgent {
    product: String,
    version: String,
    comment: Option<String>,
}

impl UserAgent {
    pub fn new(product: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            version: version.into(),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

impl Default for UserAgent {
    fn default() -> Self {
        UserAgent::new("Polyglot-Pal", env!("CARGO_PKG_VERSION")).with_comment("generation-sdk")
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.product, self.version)?;
        match &self.comment {
            Some(comment) => write!(f, " ({})", comment),
            None => Ok(()),
        }
    }
}

/// Build the shared HTTP client: gzip, fixed `User-Agent`, whole-request timeout
pub fn build_http_client(user_agent: &UserAgent, timeout: Duration) -> Result<Client> {
    let agent = header::HeaderValue::from_str(&user_agent.to_string())
        .map_err(|e| ServiceError::configuration(format!("invalid user agent: {}", e)))?;

    Client::builder()
        .user_agent(agent)
        .timeout(timeout)
        .gzip(true)
        .build()
        .map_err(|e| ServiceError::configuration(format!("cannot build HTTP client: {}", e)))
}

/// Turn a non-success response into a `ServiceError` carrying the status,
/// provider error code and any `Retry-After` hint
pub async fn error_from_response(service_name: &str, response: Response) -> ServiceError {
    let status = response.status();
    let mut context = ErrorContext::for_service(service_name).status_code(status.as_u16());

    if let Some(wait) = response
        .headers()
        .get(header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
    {
        context.add(RETRY_AFTER_KEY, wait);
    }

    // An unreadable body still leaves the status to classify by
    let body = response.text().await.unwrap_or_default();

    mapping::map_http_error(status, &body, &mut context).with_context(context)
}
