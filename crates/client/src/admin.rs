//! Admin-only endpoints. The server enforces the role; the store's admin
//! gate only decides what to render.

use uuid::Uuid;

use api_types::{
    admin::{ToggleStatusResponse, UserFilters, UserPage},
    stats::{DashboardStats, SystemStats},
    transaction::{TransactionFilters, TransactionPage},
    user::User,
};

use crate::{Client, Result};

impl Client {
    pub async fn users(&self, token: &str, filters: &UserFilters) -> Result<UserPage> {
        let res = self
            .get("admin/users/", Some(token))?
            .query(filters)
            .send()
            .await?;
        Self::parse(res).await
    }

    pub async fn user(&self, token: &str, id: Uuid) -> Result<User> {
        let res = self
            .get(&format!("admin/users/{id}/"), Some(token))?
            .send()
            .await?;
        Self::parse(res).await
    }

    pub async fn toggle_user_status(&self, token: &str, id: Uuid) -> Result<ToggleStatusResponse> {
        let res = self
            .put(&format!("admin/users/{id}/toggle-status/"), Some(token))?
            .send()
            .await?;
        Self::parse(res).await
    }

    pub async fn delete_user(&self, token: &str, id: Uuid) -> Result<()> {
        let res = self
            .delete(&format!("admin/users/{id}/"), Some(token))?
            .send()
            .await?;
        Self::parse_empty(res).await
    }

    /// Cross-user transaction listing with the same filter vocabulary as
    /// the user-facing list.
    pub async fn all_transactions(
        &self,
        token: &str,
        filters: &TransactionFilters,
    ) -> Result<TransactionPage> {
        let res = self
            .get("admin/transactions/", Some(token))?
            .query(filters)
            .send()
            .await?;
        Self::parse(res).await
    }

    pub async fn system_stats(&self, token: &str) -> Result<SystemStats> {
        let res = self.get("admin/stats/", Some(token))?.send().await?;
        Self::parse(res).await
    }

    pub async fn user_statistics(
        &self,
        token: &str,
        id: Uuid,
        filters: &TransactionFilters,
    ) -> Result<DashboardStats> {
        let res = self
            .get(&format!("admin/users/{id}/statistics/"), Some(token))?
            .query(filters)
            .send()
            .await?;
        Self::parse(res).await
    }
}
