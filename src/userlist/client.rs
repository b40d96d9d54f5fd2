//! Remote store client for the user collection. Every operation returns an
//! explicit `Result`; deciding whether to surface, retry or ignore a failure is
//! left to the caller. No retries and no backoff happen here.

use super::{
    errors::StoreError,
    types::{NewUser, User, UserPatch},
};
use crate::APP_USER_AGENT;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::{future::Future, time::Duration};
use tracing::{debug, instrument};
use url::Url;

/// Default collection endpoint of the hosted mock API.
pub const DEFAULT_API_URL: &str = "https://67fcfcac3da09811b1743d99.mockapi.io/todolist";

/// Maximum number of error body characters kept in `StoreError::Http`.
const MAX_ERROR_CHARS: usize = 200;

/// Operations against a single remote user collection.
pub trait RemoteStore {
    /// Fetch the full collection.
    fn list(&self) -> impl Future<Output = Result<Vec<User>, StoreError>> + Send;

    /// Create a record; the server assigns the id.
    fn create(&self, user: &NewUser) -> impl Future<Output = Result<User, StoreError>> + Send;

    /// Replace `name` and `city` of the record addressed by `id`.
    fn update(
        &self,
        id: &str,
        patch: &UserPatch,
    ) -> impl Future<Output = Result<User, StoreError>> + Send;

    /// Remove the record addressed by `id`.
    fn delete(&self, id: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// `RemoteStore` over HTTP+JSON.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base: Url,
}

impl HttpStore {
    /// Build a store for the collection at `base_url`.
    ///
    /// # Errors
    /// Returns `StoreError::InvalidInput` if the URL cannot be parsed or is not
    /// http(s), and `StoreError::Network` if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, StoreError> {
        let base = Url::parse(base_url.trim())
            .map_err(|err| StoreError::InvalidInput(format!("invalid API URL: {err}")))?;

        match base.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(StoreError::InvalidInput(format!(
                    "unsupported scheme {scheme}"
                )));
            }
        }

        let mut builder = Client::builder().user_agent(APP_USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| StoreError::Network(format!("failed to build client: {err}")))?;

        Ok(Self { client, base })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// URL of a single record; the id is encoded as one path segment.
    fn record_url(&self, id: &str) -> Result<Url, StoreError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(StoreError::InvalidInput("user id is required".to_string()));
        }

        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| StoreError::InvalidInput("API URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(id);

        debug!("record URL: {}", url);

        Ok(url)
    }
}

impl RemoteStore for HttpStore {
    #[instrument(skip(self), fields(url = %self.base))]
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let response = self
            .client
            .get(self.base.clone())
            .send()
            .await
            .map_err(map_request_error)?;

        handle_json_response(response).await
    }

    #[instrument(skip(self, user), fields(url = %self.base))]
    async fn create(&self, user: &NewUser) -> Result<User, StoreError> {
        let response = self
            .client
            .post(self.base.clone())
            .json(user)
            .send()
            .await
            .map_err(map_request_error)?;

        handle_json_response(response).await
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: &str, patch: &UserPatch) -> Result<User, StoreError> {
        let url = self.record_url(id)?;
        let response = self
            .client
            .put(url)
            .json(patch)
            .send()
            .await
            .map_err(map_request_error)?;

        handle_json_response(response).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let url = self.record_url(id)?;
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(map_request_error)?;

        handle_empty_response(response).await
    }
}

/// Maps transport errors into `StoreError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> StoreError {
    if err.is_timeout() {
        StoreError::Timeout("request timed out".to_string())
    } else {
        StoreError::Network(format!("unable to reach the server: {err}"))
    }
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let status = response.status();
    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| StoreError::Decode(format!("failed to decode response: {err}")))
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Http {
            status: status.as_u16(),
            message: sanitize_body(&body),
        })
    }
}

/// Accepts any success status and discards the body.
async fn handle_empty_response(response: Response) -> Result<(), StoreError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Http {
            status: status.as_u16(),
            message: sanitize_body(&body),
        })
    }
}

fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
