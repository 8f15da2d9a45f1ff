//! Authentication gate.
//!
//! A four-state machine: anonymous, authenticating, authenticated, and
//! verification-required. The verification-required state is distinct from
//! a plain failure: the account exists but its email is unconfirmed, and
//! the flag only clears after the user re-authenticates successfully.

use api_types::user::User;
use client::ClientError;
use thiserror::Error;

use crate::session::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthPhase {
    Anonymous,
    Authenticating,
    Authenticated,
    VerificationRequired,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("authentication required")]
    Unauthenticated,
    #[error("administrator access required")]
    AdminRequired,
}

#[derive(Debug)]
pub struct AuthGate {
    phase: AuthPhase,
    session: Option<Session>,
    /// Identifier submitted with the in-flight login attempt; becomes the
    /// unverified email when the server rejects with verification-required
    /// and names no address itself.
    pending_identifier: Option<String>,
    pub unverified_email: Option<String>,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl AuthGate {
    /// Initializes the gate from the persisted session read at startup.
    pub fn from_session(session: Option<Session>) -> Self {
        let phase = if session.is_some() {
            AuthPhase::Authenticated
        } else {
            AuthPhase::Anonymous
        };
        Self {
            phase,
            session,
            pending_identifier: None,
            unverified_email: None,
            error: None,
            message: None,
        }
    }

    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated
    }

    pub fn is_admin(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.user.is_admin())
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.token.as_str())
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|session| &session.user)
    }

    /// Route gate: any authenticated user.
    pub fn require_auth(&self) -> Result<&str, GateError> {
        self.token().ok_or(GateError::Unauthenticated)
    }

    /// Route gate: administrators only. A non-admin caller is expected to
    /// redirect to the default authenticated landing page.
    pub fn require_admin(&self) -> Result<&str, GateError> {
        let token = self.require_auth()?;
        if !self.is_admin() {
            return Err(GateError::AdminRequired);
        }
        Ok(token)
    }

    pub fn begin_login(&mut self, identifier: &str) {
        self.phase = AuthPhase::Authenticating;
        self.pending_identifier = Some(identifier.to_string());
        self.error = None;
    }

    pub fn login_succeeded(&mut self, session: Session) {
        self.phase = AuthPhase::Authenticated;
        self.session = Some(session);
        self.pending_identifier = None;
        self.unverified_email = None;
        self.error = None;
        self.message = Some("Login successful!".to_string());
    }

    /// A verification-required rejection moves to the dedicated state and
    /// retains the submitted identifier verbatim when the server did not
    /// name the address; anything else falls back to anonymous.
    pub fn login_failed(&mut self, err: &ClientError) {
        match err {
            ClientError::VerificationRequired { email, message } => {
                self.phase = AuthPhase::VerificationRequired;
                self.unverified_email = if email.is_empty() {
                    self.pending_identifier.take()
                } else {
                    Some(email.clone())
                };
                self.error = Some(message.clone());
            }
            other => {
                self.phase = AuthPhase::Anonymous;
                self.error = Some(other.user_message());
            }
        }
    }

    /// A successful resend stays in verification-required; only an actual
    /// successful login clears the flag.
    pub fn resend_succeeded(&mut self) {
        self.message = Some("Verification email sent successfully!".to_string());
        self.error = None;
    }

    pub fn logout(&mut self) {
        self.phase = AuthPhase::Anonymous;
        self.session = None;
        self.pending_identifier = None;
        self.unverified_email = None;
        self.message = None;
        self.error = None;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }
}
