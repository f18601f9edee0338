//! Notify error types.

use foodcart_commerce::checkout::SubmitError;

/// Error type for outbound order delivery.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("HTTP error: {status}: {description}")]
    Http { status: u16, description: String },

    #[error("API refused message: {0}")]
    Api(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Request error: {0}")]
    Request(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for NotifyError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            NotifyError::Timeout(e.to_string())
        } else if e.is_connect() {
            NotifyError::Connection(e.to_string())
        } else if e.is_decode() {
            NotifyError::Deserialization(e.to_string())
        } else {
            NotifyError::Request(e.to_string())
        }
    }
}

impl From<NotifyError> for SubmitError {
    fn from(e: NotifyError) -> Self {
        match e {
            NotifyError::Http {
                status,
                description,
            } => SubmitError::Rejected {
                status: Some(status),
                description,
            },
            NotifyError::Api(description) => SubmitError::Rejected {
                status: None,
                description,
            },
            NotifyError::Config(msg) => SubmitError::Config(msg),
            other => SubmitError::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_submit_error() {
        let err: SubmitError = NotifyError::Http {
            status: 403,
            description: "Forbidden: bot was blocked by the user".to_string(),
        }
        .into();
        assert_eq!(
            err,
            SubmitError::Rejected {
                status: Some(403),
                description: "Forbidden: bot was blocked by the user".to_string(),
            }
        );

        let err: SubmitError = NotifyError::Timeout("after 10s".to_string()).into();
        assert_eq!(err, SubmitError::Transport("Timeout: after 10s".to_string()));

        let err: SubmitError = NotifyError::Config("missing chat id".to_string()).into();
        assert_eq!(err, SubmitError::Config("missing chat id".to_string()));
    }
}
