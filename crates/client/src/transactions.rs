//! Transaction endpoints, including the binary export.

use chrono::NaiveDate;
use uuid::Uuid;

use api_types::{
    export::ExportFormat,
    transaction::{TransactionFilters, TransactionPage, TransactionUpsert, TransactionView},
};

use crate::{Client, ClientError, Result};

/// Opaque export body plus the format the caller asked for.
///
/// The format selects the MIME type and the timestamped download filename;
/// the bytes are passed through untouched.
#[derive(Debug, Clone)]
pub struct ExportPayload {
    pub bytes: Vec<u8>,
    pub format: ExportFormat,
}

impl ExportPayload {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn filename(&self, date: NaiveDate) -> String {
        self.format.filename("transactions", date)
    }
}

impl Client {
    pub async fn transactions(
        &self,
        token: &str,
        filters: &TransactionFilters,
    ) -> Result<TransactionPage> {
        let res = self
            .get("transactions/", Some(token))?
            .query(filters)
            .send()
            .await?;
        Self::parse(res).await
    }

    pub async fn transaction(&self, token: &str, id: Uuid) -> Result<TransactionView> {
        let res = self
            .get(&format!("transactions/{id}/"), Some(token))?
            .send()
            .await?;
        Self::parse(res).await
    }

    pub async fn create_transaction(
        &self,
        token: &str,
        payload: &TransactionUpsert,
    ) -> Result<TransactionView> {
        let res = self
            .post("transactions/", Some(token))?
            .json(payload)
            .send()
            .await?;
        Self::parse(res).await
    }

    pub async fn update_transaction(
        &self,
        token: &str,
        id: Uuid,
        payload: &TransactionUpsert,
    ) -> Result<TransactionView> {
        let res = self
            .put(&format!("transactions/{id}/"), Some(token))?
            .json(payload)
            .send()
            .await?;
        Self::parse(res).await
    }

    pub async fn delete_transaction(&self, token: &str, id: Uuid) -> Result<()> {
        let res = self
            .delete(&format!("transactions/{id}/"), Some(token))?
            .send()
            .await?;
        Self::parse_empty(res).await
    }

    /// Issued with a binary response expectation; the body is never parsed
    /// as JSON on success.
    pub async fn export_transactions(
        &self,
        token: &str,
        format: ExportFormat,
        filters: &TransactionFilters,
    ) -> Result<ExportPayload> {
        let res = self
            .get("transactions/export/", Some(token))?
            .query(&[("format", format.as_str())])
            .query(filters)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(Self::error_of(res).await);
        }

        let bytes = res.bytes().await.map_err(ClientError::Transport)?;
        Ok(ExportPayload {
            bytes: bytes.to_vec(),
            format,
        })
    }
}
