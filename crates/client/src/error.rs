use api_types::{ErrorBody, ErrorCode};
use reqwest::StatusCode;
use thiserror::Error;

const DEFAULT_MESSAGE: &str = "unknown error";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    /// Business-rule rejection carrying the server's structured code.
    #[error("{message}")]
    Rejected { code: ErrorCode, message: String },
    /// The account exists but its email is unconfirmed. Distinct from a
    /// plain login failure.
    #[error("{message}")]
    VerificationRequired { email: String, message: String },
    #[error("{0}")]
    Server(String),
    #[error("server unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// Structured code, when the server provided one.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Rejected { code, .. } => Some(*code),
            Self::VerificationRequired { .. } => Some(ErrorCode::EmailVerificationRequired),
            _ => None,
        }
    }

    /// Message suitable for direct display on a slice.
    ///
    /// Known codes get a canned client-side phrasing; everything else
    /// falls back to whatever the server said.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { code, message } => match code {
                ErrorCode::InvalidCredentials => "Invalid username or password.".to_string(),
                ErrorCode::DuplicateUsername => "That username is already taken.".to_string(),
                ErrorCode::DuplicateEmail => "That email is already registered.".to_string(),
                ErrorCode::TokenExpired => {
                    "This link has expired. Please request a new one.".to_string()
                }
                ErrorCode::TokenAlreadyUsed => "This link has already been used.".to_string(),
                ErrorCode::AlreadyVerified => "This email is already verified.".to_string(),
                ErrorCode::DefaultCategory => {
                    "Default categories cannot be changed or deleted.".to_string()
                }
                _ => message.clone(),
            },
            Self::Transport(err) => format!("Server unreachable: {err}"),
            other => other.to_string(),
        }
    }
}

/// Maps a non-success response to a [`ClientError`].
///
/// The structured `code` in the body is the branching key; the HTTP status
/// only classifies responses that carry no code.
pub(crate) fn classify(status: StatusCode, body: Option<ErrorBody>) -> ClientError {
    let (code, message, email) = match body {
        Some(body) => (
            body.code,
            body.message.unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
            body.email,
        ),
        None => (None, DEFAULT_MESSAGE.to_string(), None),
    };

    match code {
        Some(ErrorCode::EmailVerificationRequired) => ClientError::VerificationRequired {
            email: email.unwrap_or_default(),
            message,
        },
        Some(code) if code != ErrorCode::Unknown => ClientError::Rejected { code, message },
        _ => match status.as_u16() {
            401 => ClientError::Unauthorized(message),
            403 => ClientError::Forbidden(message),
            404 => ClientError::NotFound(message),
            _ => ClientError::Server(message),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(code: Option<ErrorCode>, message: &str) -> ErrorBody {
        ErrorBody {
            code,
            message: Some(message.to_string()),
            email: None,
        }
    }

    #[test]
    fn code_wins_over_status() {
        let err = classify(
            StatusCode::UNAUTHORIZED,
            Some(body(Some(ErrorCode::InvalidCredentials), "bad creds")),
        );
        assert_eq!(err.code(), Some(ErrorCode::InvalidCredentials));
        assert_eq!(err.user_message(), "Invalid username or password.");
    }

    #[test]
    fn verification_required_carries_email() {
        let mut raw = body(
            Some(ErrorCode::EmailVerificationRequired),
            "verify your email first",
        );
        raw.email = Some("alice@example.com".to_string());
        match classify(StatusCode::FORBIDDEN, Some(raw)) {
            ClientError::VerificationRequired { email, message } => {
                assert_eq!(email, "alice@example.com");
                assert_eq!(message, "verify your email first");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn status_classifies_codeless_bodies() {
        let err = classify(StatusCode::NOT_FOUND, Some(body(None, "no such transaction")));
        assert!(matches!(err, ClientError::NotFound(_)));
        assert_eq!(err.user_message(), "no such transaction");
    }

    #[test]
    fn missing_body_gets_default_message() {
        let err = classify(StatusCode::INTERNAL_SERVER_ERROR, None);
        assert_eq!(err.user_message(), "unknown error");
    }

    #[test]
    fn unknown_code_falls_back_to_status() {
        let err = classify(
            StatusCode::UNAUTHORIZED,
            Some(body(Some(ErrorCode::Unknown), "rate limited")),
        );
        assert!(matches!(err, ClientError::Unauthorized(_)));
    }
}
