use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server URL: {0}")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with an error body `{code, message}`.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("request canceled")]
    Canceled,
}

impl ClientError {
    pub fn is_canceled(&self) -> bool {
        matches!(self, ClientError::Canceled)
    }

    /// Message to show the user, or `None` for an aborted request, which is
    /// never reported.
    pub fn into_notification(self) -> Option<String> {
        match self {
            ClientError::Canceled => None,
            ClientError::Api { message, .. } => Some(message),
            ClientError::Transport(e) if e.is_timeout() => {
                Some("The server took too long to respond".to_string())
            }
            ClientError::Transport(_) => Some("Could not reach the server".to_string()),
            ClientError::InvalidUrl(url) => Some(format!("Invalid server URL: {url}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canceled_is_silent() {
        assert!(ClientError::Canceled.is_canceled());
        assert_eq!(ClientError::Canceled.into_notification(), None);
    }

    #[test]
    fn test_api_error_shows_server_message() {
        let err = ClientError::Api {
            status: 409,
            code: "conflict".to_string(),
            message: "Conflict: email already in use".to_string(),
        };
        assert!(!err.is_canceled());
        assert_eq!(
            err.into_notification().as_deref(),
            Some("Conflict: email already in use")
        );
    }
}
