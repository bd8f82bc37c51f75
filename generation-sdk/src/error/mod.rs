//! Error handling for the Generation SDK
//!
//! Every failed `generate` call is one `ServiceError`. The variant says what
//! kind of failure it was; optional `ErrorContext` layers say where (service,
//! HTTP status, provider error code, request id).

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

pub mod mapping;

/// Result type for Generation SDK operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Main error type for the Generation SDK
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The connection failed before a response arrived
    #[error("network error: {0}")]
    Network(String),

    /// Missing or invalid credentials (401)
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Valid credentials without access, including exhausted quota (403)
    #[error("not authorized: {0}")]
    Authorization(String),

    /// Throttled by the provider (429)
    #[error("rate limited: {0}")]
    RateLimit(String),

    /// Provider-side failure (5xx and unclassified statuses)
    #[error("provider error: {0}")]
    Provider(String),

    /// The provider rejected the request as malformed (400, 422)
    #[error("request rejected: {0}")]
    BadRequest(String),

    /// A success response whose envelope could not be decoded
    #[error("undecodable response: {0}")]
    Decode(String),

    /// The model answered but declined to produce usable output
    /// (refusal, content filter, truncation)
    #[error("generation declined: {0}")]
    Declined(String),

    /// Client-side configuration problem
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The HTTP client gave up waiting (408, 504, or a local timeout)
    #[error("timed out: {0}")]
    Timeout(String),

    #[error("unknown error: {0}")]
    Unknown(String),

    /// An error wrapped with where it happened
    #[error("{inner}")]
    WithContext {
        inner: Box<ServiceError>,
        context: ErrorContext,
    },
}

macro_rules! message_constructors {
    ($($name:ident => $variant:ident),* $(,)?) => {
        impl ServiceError {
            $(
                #[doc = concat!("Create a `", stringify!($variant), "` error")]
                pub fn $name(message: impl Into<String>) -> Self {
                    ServiceError::$variant(message.into())
                }
            )*
        }
    };
}

message_constructors! {
    network => Network,
    authentication => Authentication,
    authorization => Authorization,
    rate_limit => RateLimit,
    provider => Provider,
    bad_request => BadRequest,
    decode => Decode,
    declined => Declined,
    configuration => Configuration,
    timeout => Timeout,
    unknown => Unknown,
}

impl ServiceError {
    /// Wrap this error in a context layer
    pub fn with_context(self, context: ErrorContext) -> Self {
        ServiceError::WithContext {
            inner: Box::new(self),
            context,
        }
    }

    /// Wrap this error in a context layer holding one key/value pair
    pub fn with_context_value(self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.with_context(ErrorContext::new().with(key, value))
    }

    /// The underlying error with all context layers removed
    pub fn root(&self) -> &ServiceError {
        match self {
            ServiceError::WithContext { inner, .. } => inner.root(),
            other => other,
        }
    }

    /// Context layers, outermost first
    pub fn contexts(&self) -> impl Iterator<Item = &ErrorContext> {
        let mut current = Some(self);
        std::iter::from_fn(move || match current.take()? {
            ServiceError::WithContext { inner, context } => {
                current = Some(inner);
                Some(context)
            }
            _ => None,
        })
    }

    /// The outermost context, if any
    pub fn context(&self) -> Option<&ErrorContext> {
        self.contexts().next()
    }

    /// Provider error code from the first layer that has one
    pub fn error_code(&self) -> Option<&str> {
        self.contexts().find_map(|c| c.error_code.as_deref())
    }

    /// Name of the service that produced the error
    pub fn service_name(&self) -> Option<&str> {
        self.contexts()
            .map(|c| c.service.as_str())
            .find(|service| *service != UNKNOWN_SERVICE)
    }

    /// HTTP status from the first layer that has one
    pub fn status_code(&self) -> Option<u16> {
        self.contexts().find_map(|c| c.status_code)
    }

    /// Correlation id of the request that failed
    pub fn request_id(&self) -> Option<&str> {
        self.contexts().find_map(|c| c.request_id.as_deref())
    }

    /// Server-suggested wait before retrying (`Retry-After` in seconds)
    pub fn retry_after(&self) -> Option<Duration> {
        self.contexts()
            .find_map(|c| c.data.get(RETRY_AFTER_KEY))
            .and_then(|secs| secs.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
    }

    /// Whether repeating the same call later could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.root(),
            ServiceError::Network(_)
                | ServiceError::Timeout(_)
                | ServiceError::RateLimit(_)
                | ServiceError::Provider(_)
        )
    }
}

const UNKNOWN_SERVICE: &str = "unknown";

/// Context key holding the raw `Retry-After` header value
pub const RETRY_AFTER_KEY: &str = "retry_after";

/// Where an error happened
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Service that produced the error
    pub service: String,

    /// When the error was observed
    pub observed_at: chrono::DateTime<chrono::Utc>,

    /// HTTP status code if applicable
    pub status_code: Option<u16>,

    /// Provider-specific error code (e.g. `rate_limit_exceeded`)
    pub error_code: Option<String>,

    /// Correlation id of the generation request
    pub request_id: Option<String>,

    /// Additional context data
    pub data: HashMap<String, String>,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::for_service(UNKNOWN_SERVICE)
    }
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            observed_at: chrono::Utc::now(),
            status_code: None,
            error_code: None,
            request_id: None,
            data: HashMap::new(),
        }
    }

    pub fn status_code(mut self, code: u16) -> Self {
        self.status_code = Some(code);
        self
    }

    pub fn error_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self
    }

    pub fn request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    /// Record a key/value pair
    pub fn add(&mut self, key: impl Into<String>, value: impl fmt::Display) {
        self.data.insert(key.into(), value.to_string());
    }

    /// Builder form of `add`
    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.add(key, value);
        self
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        let error = if err.is_timeout() {
            ServiceError::timeout(err.to_string())
        } else if err.is_connect() || err.is_request() || err.is_body() {
            ServiceError::network(err.to_string())
        } else if err.is_redirect() {
            ServiceError::network(format!("too many redirects: {}", err))
        } else if err.is_decode() {
            ServiceError::decode(err.to_string())
        } else {
            ServiceError::unknown(err.to_string())
        };

        let mut context = ErrorContext::for_service("http_client");
        if let Some(status) = err.status() {
            context = context.status_code(status.as_u16());
        }
        error.with_context(context)
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::decode(err.to_string()).with_context(ErrorContext::for_service("json"))
    }
}
