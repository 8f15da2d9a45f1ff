//! Current-user profile and dashboard endpoints.

use serde::Serialize;

use api_types::{
    auth::MessageResponse,
    stats::{DashboardStats, StatsRange},
    user::{PasswordChange, ProfileUpdate, User},
};

use crate::{Client, Result};

#[derive(Debug, Serialize)]
struct DeleteAccountRequest<'a> {
    password: &'a str,
}

impl Client {
    pub async fn profile(&self, token: &str) -> Result<User> {
        let res = self.get("user/profile/", Some(token))?.send().await?;
        Self::parse(res).await
    }

    pub async fn update_profile(&self, token: &str, payload: &ProfileUpdate) -> Result<User> {
        let res = self
            .put("user/profile/", Some(token))?
            .json(payload)
            .send()
            .await?;
        Self::parse(res).await
    }

    pub async fn change_password(
        &self,
        token: &str,
        payload: &PasswordChange,
    ) -> Result<MessageResponse> {
        let res = self
            .put("user/change-password/", Some(token))?
            .json(payload)
            .send()
            .await?;
        Self::parse(res).await
    }

    /// Deletes the account. The server cascades transactions and
    /// categories; the caller must clear the persisted session.
    pub async fn delete_account(&self, token: &str, password: &str) -> Result<MessageResponse> {
        let res = self
            .delete("user/delete-account/", Some(token))?
            .json(&DeleteAccountRequest { password })
            .send()
            .await?;
        Self::parse(res).await
    }

    pub async fn dashboard_stats(&self, token: &str, range: StatsRange) -> Result<DashboardStats> {
        let res = self
            .get("user/dashboard/", Some(token))?
            .query(&[("range", range.as_str())])
            .send()
            .await?;
        Self::parse(res).await
    }
}
