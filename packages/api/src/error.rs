//! # API errors
//!
//! Every failed request becomes an [`ApiError`]. Non-2xx responses keep the status
//! and the server's `message` exactly as sent; the variant only says which class of
//! failure it was so callers can react (e.g. send the user back to login on
//! [`ApiError::Unauthorized`]).
//!
//! [`ApiError::code`] gives a short, stable code for notification titles:
//!
//! | Code | When |
//! |------|------|
//! | `ERR_BAD_REQUEST` | 4xx response |
//! | `ERR_BAD_RESPONSE` | 5xx (or other non-2xx) response |
//! | `ERR_NETWORK` | no response received |
//! | `ERR_DECODE` | 2xx response whose body could not be parsed |

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Shown when the server sent no usable `message`.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 401 or 403: missing, invalid or expired credentials.
    #[error("{message}")]
    Unauthorized { status: u16, message: String },
    /// 404.
    #[error("{message}")]
    NotFound { message: String },
    /// 409, e.g. an email that is already taken.
    #[error("{message}")]
    Conflict { message: String },
    /// Any other non-2xx response.
    #[error("{message}")]
    Server { status: u16, message: String },
    /// The request never got a response.
    #[error("network error: {0}")]
    Network(String),
    /// A 2xx response with a body we could not parse.
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Error body sent by the server. Only `message` is used.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiError {
    /// Classify a non-2xx response from its status and raw body.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized {
                status: status.as_u16(),
                message,
            },
            StatusCode::NOT_FOUND => Self::NotFound { message },
            StatusCode::CONFLICT => Self::Conflict { message },
            _ => Self::Server {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// HTTP status, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            Self::Conflict { .. } => Some(409),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Network(_) => "ERR_NETWORK",
            Self::Decode(_) => "ERR_DECODE",
            _ => match self.status() {
                Some(s) if (400..500).contains(&s) => "ERR_BAD_REQUEST",
                _ => "ERR_BAD_RESPONSE",
            },
        }
    }

    /// The server message, or a generic text for transport failures.
    pub fn message(&self) -> &str {
        match self {
            Self::Unauthorized { message, .. }
            | Self::NotFound { message }
            | Self::Conflict { message }
            | Self::Server { message, .. } => message,
            Self::Network(_) | Self::Decode(_) => GENERIC_ERROR_MESSAGE,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_keeps_server_message() {
        let err = ApiError::from_response(
            StatusCode::UNAUTHORIZED,
            r#"{"message":"invalid credentials","statusCode":401}"#,
        );
        assert!(err.is_unauthorized());
        assert_eq!(err.message(), "invalid credentials");
        assert_eq!(err.code(), "ERR_BAD_REQUEST");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            ApiError::from_response(StatusCode::FORBIDDEN, "{}"),
            ApiError::Unauthorized { status: 403, .. }
        ));
        assert!(matches!(
            ApiError::from_response(StatusCode::NOT_FOUND, r#"{"message":"member with id [7] not found"}"#),
            ApiError::NotFound { .. }
        ));
        assert!(matches!(
            ApiError::from_response(StatusCode::CONFLICT, r#"{"message":"email already taken"}"#),
            ApiError::Conflict { .. }
        ));
        let err = ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert!(matches!(err, ApiError::Server { status: 500, .. }));
        assert_eq!(err.code(), "ERR_BAD_RESPONSE");
    }

    #[test]
    fn test_missing_message_falls_back() {
        let err = ApiError::from_response(StatusCode::BAD_REQUEST, "");
        assert_eq!(err.message(), GENERIC_ERROR_MESSAGE);

        let err = ApiError::from_response(StatusCode::BAD_REQUEST, r#"{"message":"  "}"#);
        assert_eq!(err.message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_network_error() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.code(), "ERR_NETWORK");
        assert_eq!(err.message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(err.status(), None);
    }
}
