// polyglot-core-rs/src/error.rs
//
// Failure taxonomy for flow execution and flow lookup.
//
// Every failure of `Pipeline::execute` is exactly one `PipelineError`.
// Callers decide presentation from `presentation()`: field errors render
// inline next to the form, everything else as one dismissible notice with a
// retry affordance.

use std::fmt;

use generation_sdk::ServiceError;
use input_validation_rs::FieldError;
use thiserror::Error;

/// Why the upstream call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpstreamCause {
    /// The call exceeded the configured timeout
    Timeout,
    /// The provider throttled the request
    RateLimited,
    /// Credentials were missing, invalid or lacked permission
    Authentication,
    /// The connection failed before a response arrived
    Transport,
    /// The provider answered with an error or declined to generate
    Provider,
}

impl fmt::Display for UpstreamCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UpstreamCause::Timeout => "request timed out",
            UpstreamCause::RateLimited => "rate limited by the provider",
            UpstreamCause::Authentication => "authentication with the provider failed",
            UpstreamCause::Transport => "could not reach the provider",
            UpstreamCause::Provider => "the provider returned an error",
        };
        f.write_str(text)
    }
}

impl From<&ServiceError> for UpstreamCause {
    fn from(err: &ServiceError) -> Self {
        match err.root() {
            ServiceError::Timeout(_) => UpstreamCause::Timeout,
            ServiceError::RateLimit(_) => UpstreamCause::RateLimited,
            ServiceError::Authentication(_) | ServiceError::Authorization(_) => {
                UpstreamCause::Authentication
            }
            ServiceError::Network(_) => UpstreamCause::Transport,
            _ => UpstreamCause::Provider,
        }
    }
}

/// Errors produced by `Pipeline::execute`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// The input record failed the flow's input schema; nothing was sent upstream
    #[error("invalid input: {}", join_field_errors(.0))]
    InvalidInput(Vec<FieldError>),

    /// The external service could not be reached or returned an error
    #[error("upstream failure: {0}")]
    UpstreamFailure(UpstreamCause),

    /// A response arrived but is not usable structured output
    #[error("invalid output: {0}")]
    InvalidOutput(String),

    /// The service answered without any content
    #[error("the generation service returned an empty response")]
    EmptyResponse,
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// How a UI should surface a `PipelineError`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorPresentation {
    /// Show each message next to the named field
    InlineFieldErrors(Vec<FieldError>),
    /// Show one dismissible notification offering "Try again"
    RetryableNotice(String),
}

impl PipelineError {
    /// Field errors for `InvalidInput`, empty otherwise
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            PipelineError::InvalidInput(errors) => errors,
            _ => &[],
        }
    }

    /// Whether a caller-level retry of the same request may succeed
    pub fn is_retryable(&self) -> bool {
        !matches!(self, PipelineError::InvalidInput(_))
    }

    /// Map this error to its user-facing presentation
    pub fn presentation(&self) -> ErrorPresentation {
        match self {
            PipelineError::InvalidInput(errors) => ErrorPresentation::InlineFieldErrors(errors.clone()),
            PipelineError::UpstreamFailure(UpstreamCause::Timeout) => ErrorPresentation::RetryableNotice(
                "The language service took too long to answer. Please try again.".to_string(),
            ),
            PipelineError::UpstreamFailure(UpstreamCause::RateLimited) => ErrorPresentation::RetryableNotice(
                "The language service is busy right now. Please wait a moment and try again.".to_string(),
            ),
            PipelineError::UpstreamFailure(UpstreamCause::Authentication) => ErrorPresentation::RetryableNotice(
                "The language service rejected our credentials. Please try again later.".to_string(),
            ),
            PipelineError::UpstreamFailure(_) => ErrorPresentation::RetryableNotice(
                "Something went wrong while contacting the language service. Please try again.".to_string(),
            ),
            PipelineError::InvalidOutput(_) => ErrorPresentation::RetryableNotice(
                "The language service sent back a response we could not read. Please try again.".to_string(),
            ),
            PipelineError::EmptyResponse => ErrorPresentation::RetryableNotice(
                "The language service had nothing to report. Please try again.".to_string(),
            ),
        }
    }
}

/// Errors produced by `FlowRegistry`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("flow already registered: {0}")]
    DuplicateFlow(String),

    #[error("flow not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use input_validation_rs::ValidationError;

    #[test]
    fn test_upstream_cause_from_service_error() {
        let timeout = ServiceError::timeout("slow").with_context_value("request_id", "r1");
        assert_eq!(UpstreamCause::from(&timeout), UpstreamCause::Timeout);
        assert_eq!(UpstreamCause::from(&ServiceError::rate_limit("429")), UpstreamCause::RateLimited);
        assert_eq!(UpstreamCause::from(&ServiceError::authorization("quota")), UpstreamCause::Authentication);
        assert_eq!(UpstreamCause::from(&ServiceError::network("refused")), UpstreamCause::Transport);
        assert_eq!(UpstreamCause::from(&ServiceError::declined("refusal")), UpstreamCause::Provider);
        assert_eq!(UpstreamCause::from(&ServiceError::provider("500")), UpstreamCause::Provider);
    }

    #[test]
    fn test_invalid_input_presents_inline() {
        let errors = vec![FieldError::new("text", ValidationError::TooShort("min 1 chars".to_string()))];
        let err = PipelineError::InvalidInput(errors.clone());

        assert!(!err.is_retryable());
        assert_eq!(err.field_errors(), errors.as_slice());
        assert_eq!(err.presentation(), ErrorPresentation::InlineFieldErrors(errors));
        assert!(err.to_string().contains("text"));
    }

    #[test]
    fn test_other_errors_present_as_notice() {
        for err in [
            PipelineError::UpstreamFailure(UpstreamCause::RateLimited),
            PipelineError::InvalidOutput("missing correctedText".to_string()),
            PipelineError::EmptyResponse,
        ] {
            assert!(err.is_retryable());
            assert!(err.field_errors().is_empty());
            assert!(matches!(err.presentation(), ErrorPresentation::RetryableNotice(_)));
        }
    }
}
