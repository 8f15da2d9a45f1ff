//! HTTP service layer: one request per UI intent, responses and failures
//! normalized into plain data.
//!
//! The client is stateless; authenticated calls take the bearer token as a
//! parameter so the caller (the auth gate) stays the single owner of
//! session state.

use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use api_types::ErrorBody;

mod admin;
mod auth;
mod categories;
mod error;
mod profile;
mod transactions;

pub use error::ClientError;
pub use transactions::ExportPayload;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|err| ClientError::InvalidBaseUrl(err.to_string()))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::InvalidBaseUrl(err.to_string()))
    }

    fn get(&self, path: &str, token: Option<&str>) -> Result<RequestBuilder> {
        Ok(self.with_token(self.http.get(self.endpoint(path)?), token))
    }

    fn post(&self, path: &str, token: Option<&str>) -> Result<RequestBuilder> {
        Ok(self.with_token(self.http.post(self.endpoint(path)?), token))
    }

    fn put(&self, path: &str, token: Option<&str>) -> Result<RequestBuilder> {
        Ok(self.with_token(self.http.put(self.endpoint(path)?), token))
    }

    fn delete(&self, path: &str, token: Option<&str>) -> Result<RequestBuilder> {
        Ok(self.with_token(self.http.delete(self.endpoint(path)?), token))
    }

    fn with_token(&self, builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Unwraps a JSON body on success, or maps the error body to a
    /// [`ClientError`].
    async fn parse<T: DeserializeOwned>(res: Response) -> Result<T> {
        if res.status().is_success() {
            return res.json::<T>().await.map_err(ClientError::Transport);
        }
        Err(Self::error_of(res).await)
    }

    /// Success with no meaningful body (delete endpoints).
    async fn parse_empty(res: Response) -> Result<()> {
        if res.status().is_success() {
            return Ok(());
        }
        Err(Self::error_of(res).await)
    }

    async fn error_of(res: Response) -> ClientError {
        let status = res.status();
        let url = res.url().clone();
        let body = res.json::<ErrorBody>().await.ok();
        let err = error::classify(status, body);
        tracing::debug!(%status, %url, "request failed: {err}");
        err
    }
}
