//! Authentication endpoints. None of these require a bearer token.

use api_types::auth::{
    Credentials, EmailRequest, LoginResponse, MessageResponse, RegisterRequest, ResetPassword,
    VerifyEmailOutcome,
};

use crate::{Client, Result};

impl Client {
    pub async fn register(&self, payload: &RegisterRequest) -> Result<MessageResponse> {
        let res = self.post("auth/register/", None)?.json(payload).send().await?;
        Self::parse(res).await
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let res = self
            .post("auth/login/", None)?
            .json(credentials)
            .send()
            .await?;
        Self::parse(res).await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<MessageResponse> {
        let res = self
            .post("auth/forgot-password/", None)?
            .json(&EmailRequest {
                email: email.to_string(),
            })
            .send()
            .await?;
        Self::parse(res).await
    }

    pub async fn reset_password(&self, payload: &ResetPassword) -> Result<MessageResponse> {
        let res = self
            .post("auth/reset-password/", None)?
            .json(payload)
            .send()
            .await?;
        Self::parse(res).await
    }

    /// Idempotent: already-verified accounts and already-used tokens come
    /// back as distinct outcomes, not errors.
    pub async fn verify_email(&self, token: &str) -> Result<VerifyEmailOutcome> {
        let res = self
            .get("auth/verify-email/", None)?
            .query(&[("token", token)])
            .send()
            .await?;
        Self::parse(res).await
    }

    pub async fn resend_verification(&self, email: &str) -> Result<MessageResponse> {
        let res = self
            .post("auth/resend-verification/", None)?
            .json(&EmailRequest {
                email: email.to_string(),
            })
            .send()
            .await?;
        Self::parse(res).await
    }
}
