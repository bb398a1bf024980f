//! Error types for wikiquery
//!
//! Every error is either a parameter error (caller input violated a
//! precondition, detected before any request is sent) or a response error
//! (the remote call failed, or its reply lacked the expected shape).

use thiserror::Error;

/// The main error type for wikiquery
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Parameter Errors
    // ============================================================================
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Response Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("Redirect limit ({max_redirects}) exceeded while resolving '{title}'")]
    TooManyRedirects { title: String, max_redirects: u32 },
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller input is out of contract; no request was made
    Parameter,
    /// The remote call failed or returned an unusable reply
    Response,
}

impl Error {
    /// Create a parameter error
    pub fn parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidParameter { .. }
            | Error::Config { .. }
            | Error::YamlParse(_)
            | Error::Io(_) => ErrorKind::Parameter,
            Error::Http(_)
            | Error::HttpStatus { .. }
            | Error::InvalidUrl(_)
            | Error::Decode { .. }
            | Error::InvalidResponse { .. }
            | Error::TooManyRedirects { .. } => ErrorKind::Response,
        }
    }

    /// Check if this is a parameter error
    pub fn is_parameter_error(&self) -> bool {
        self.kind() == ErrorKind::Parameter
    }

    /// Check if this is a response error
    pub fn is_response_error(&self) -> bool {
        self.kind() == ErrorKind::Response
    }
}

/// Result type alias for wikiquery
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::parameter("gsradius", "must be between 10 and 10000");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'gsradius': must be between 10 and 10000"
        );

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        let err = Error::TooManyRedirects {
            title: "A".to_string(),
            max_redirects: 3,
        };
        assert_eq!(
            err.to_string(),
            "Redirect limit (3) exceeded while resolving 'A'"
        );
    }

    #[test]
    fn test_error_kind() {
        assert!(Error::parameter("x", "bad").is_parameter_error());
        assert!(Error::config("bad").is_parameter_error());

        assert!(Error::invalid_response("no pages").is_response_error());
        assert!(Error::decode("not json").is_response_error());
        assert!(Error::http_status(500, "").is_response_error());
        assert_eq!(
            Error::TooManyRedirects {
                title: "A".to_string(),
                max_redirects: 1
            }
            .kind(),
            ErrorKind::Response
        );
    }
}
