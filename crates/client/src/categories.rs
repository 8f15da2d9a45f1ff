use uuid::Uuid;

use api_types::{
    category::{Category, CategoryUpsert},
    transaction::TransactionKind,
};

use crate::{Client, Result};

impl Client {
    /// Lists categories, optionally filtered by kind.
    pub async fn categories(
        &self,
        token: &str,
        kind: Option<TransactionKind>,
    ) -> Result<Vec<Category>> {
        let mut req = self.get("categories/", Some(token))?;
        if let Some(kind) = kind {
            req = req.query(&[("kind", kind.as_str())]);
        }
        let res = req.send().await?;
        Self::parse(res).await
    }

    pub async fn category(&self, token: &str, id: Uuid) -> Result<Category> {
        let res = self
            .get(&format!("categories/{id}/"), Some(token))?
            .send()
            .await?;
        Self::parse(res).await
    }

    pub async fn create_category(&self, token: &str, payload: &CategoryUpsert) -> Result<Category> {
        let res = self
            .post("categories/", Some(token))?
            .json(payload)
            .send()
            .await?;
        Self::parse(res).await
    }

    pub async fn update_category(
        &self,
        token: &str,
        id: Uuid,
        payload: &CategoryUpsert,
    ) -> Result<Category> {
        let res = self
            .put(&format!("categories/{id}/"), Some(token))?
            .json(payload)
            .send()
            .await?;
        Self::parse(res).await
    }

    /// Deletion never cascades: transactions keep a dangling reference and
    /// render as uncategorized.
    pub async fn delete_category(&self, token: &str, id: Uuid) -> Result<()> {
        let res = self
            .delete(&format!("categories/{id}/"), Some(token))?
            .send()
            .await?;
        Self::parse_empty(res).await
    }
}
