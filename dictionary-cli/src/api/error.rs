//! Failures talking to the dictionary server

/// Error returned by every remote call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request could not be sent or no response came back
    Transport(String),
    /// The server answered with a non-success status; `body` is its explanation
    Status { status: u16, body: String },
    /// A success response carried a body we could not parse
    Decode(String),
}

impl ApiError {
    /// Text to show the user: the server's own words when it gave any
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(cause) => {
                format!("Could not reach the dictionary server: {}", cause)
            }
            ApiError::Status { status, body } => {
                let body = body.trim();
                if body.is_empty() {
                    reqwest::StatusCode::from_u16(*status)
                        .ok()
                        .and_then(|s| s.canonical_reason())
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("HTTP {}", status))
                } else {
                    body.to_string()
                }
            }
            ApiError::Decode(cause) => {
                format!("Unexpected response from the dictionary server: {}", cause)
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(cause) => write!(f, "transport error: {}", cause),
            ApiError::Status { status, body } => {
                write!(f, "server returned {}: {}", status, body.trim())
            }
            ApiError::Decode(cause) => write!(f, "invalid response body: {}", cause),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_body_is_shown_verbatim() {
        let err = ApiError::Status {
            status: 500,
            body: "table users is locked\n".to_string(),
        };
        assert_eq!(err.user_message(), "table users is locked");
    }

    #[test]
    fn test_empty_body_falls_back_to_reason() {
        let err = ApiError::Status {
            status: 405,
            body: String::new(),
        };
        assert_eq!(err.user_message(), "Method Not Allowed");
    }

    #[test]
    fn test_transport_message() {
        let err = ApiError::Transport("connection refused".to_string());
        assert!(err.user_message().contains("connection refused"));
        assert_eq!(err.to_string(), "transport error: connection refused");
    }
}
