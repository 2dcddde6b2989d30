//! Error types for the gateway bridge.
//!
//! Every failure is fatal to the invocation: nothing here is recovered
//! locally, the runtime decides how to report it.

use lambda_runtime::Diagnostic;
use thiserror::Error;

/// Error currency for application handlers and response bodies.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Custom error type for the bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// No `domainName`, `X-Forwarded-Host` or `Host` to build the URL from
    #[error("Missing host: event has no domainName, X-Forwarded-Host or Host header")]
    MissingHost,
    /// Scheme, host, path and query did not form a valid URL
    #[error("Invalid request URL")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Invalid header name")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),
    #[error("Invalid header value")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),
    /// Body flagged as base64 did not decode
    #[error("Invalid base64 body")]
    InvalidBase64(#[from] base64::DecodeError),
    /// The HTTP model rejected the assembled request (e.g. method)
    #[error("Invalid request")]
    InvalidRequest(#[from] http::Error),
    /// The application handler failed
    #[error("Application handler failed")]
    Handler(#[source] BoxError),
    /// Reading the response body failed
    #[error("Failed to read response body")]
    Body(#[source] BoxError),
}

impl BridgeError {
    /// Stable name reported as the Lambda `errorType`.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::MissingHost => "MissingHost",
            Self::InvalidUrl(_) => "InvalidUrl",
            Self::InvalidHeaderName(_) | Self::InvalidHeaderValue(_) => "InvalidHeader",
            Self::InvalidBase64(_) => "InvalidBase64",
            Self::InvalidRequest(_) => "InvalidRequest",
            Self::Handler(_) => "HandlerError",
            Self::Body(_) => "BodyError",
        }
    }

    /// The message followed by every source in the chain, `: `-separated.
    #[must_use]
    pub fn chain_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

impl From<BridgeError> for Diagnostic {
    fn from(error: BridgeError) -> Self {
        Self {
            error_type: error.error_type().to_string(),
            error_message: error.chain_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_from_missing_host() {
        let diagnostic = Diagnostic::from(BridgeError::MissingHost);
        assert_eq!(diagnostic.error_type, "MissingHost");
        assert!(diagnostic.error_message.contains("X-Forwarded-Host"));
    }

    #[test]
    fn test_handler_error_keeps_source_message() {
        let error = BridgeError::Handler("loader exploded".into());
        assert_eq!(error.error_type(), "HandlerError");
        assert_eq!(error.to_string(), "Application handler failed");

        let source = std::error::Error::source(&error).unwrap();
        assert_eq!(source.to_string(), "loader exploded");
    }

    #[test]
    fn test_chain_prints_source_once() {
        let error = BridgeError::Body("connection reset".into());
        let message = error.chain_message();
        assert_eq!(message, "Failed to read response body: connection reset");
        assert_eq!(message.matches("connection reset").count(), 1);

        let rendered = format!("{:#}", anyhow::Error::from(BridgeError::Handler("boom".into())));
        assert_eq!(rendered.matches("boom").count(), 1);
    }

    #[test]
    fn test_diagnostic_carries_source_chain() {
        let diagnostic = Diagnostic::from(BridgeError::Handler("upstream timeout".into()));
        assert_eq!(diagnostic.error_type, "HandlerError");
        assert_eq!(
            diagnostic.error_message,
            "Application handler failed: upstream timeout"
        );
    }
}
