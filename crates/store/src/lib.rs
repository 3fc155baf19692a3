//! REST client for the hushold hosted document store
//!
//! The store exposes JSON document collections under `/api/v1/{collection}`
//! with PostgREST-style filter parameters. This crate provides a typed
//! builder client for reading and writing those collections.
//!
//! # Features
//!
//! - Query API (`fetch`, `insert`, `upsert`, `update`, `delete`)
//! - Filtering (`eq`, `gt`, `lt`, etc.)
//! - Ordering and limits
//! - Structured API error payloads

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use url::Url;

/// Error payload returned by the store API.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorDetails {
    pub code: Option<String>,
    pub message: Option<String>,
    pub details: Option<String>,
}

impl fmt::Display for ApiErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(code) = &self.code {
            parts.push(format!("Code: {}", code));
        }
        if let Some(message) = &self.message {
            parts.push(format!("Message: {}", message));
        }
        if let Some(details) = &self.details {
            parts.push(format!("Details: {}", details));
        }
        write!(f, "{}", parts.join(", "))
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("API error: {details} (Status: {status})")]
    ApiError {
        details: ApiErrorDetails,
        status: reqwest::StatusCode,
    },

    #[error("API error (unparsed): {message} (Status: {status})")]
    UnparsedApiError {
        message: String,
        status: reqwest::StatusCode,
    },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

/// Sort direction for [`CollectionClient::order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Handle on a document store: base URL, API key and a shared HTTP client.
#[derive(Debug, Clone)]
pub struct Store {
    base_url: String,
    api_key: String,
    http_client: Client,
}

impl Store {
    pub fn new(base_url: &str, api_key: &str, http_client: Client) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            http_client,
        }
    }

    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Creates a query builder for one collection.
    pub fn collection(&self, name: &str) -> CollectionClient {
        CollectionClient::new(&self.base_url, &self.api_key, name, self.http_client.clone())
    }
}

/// Builder client for one document collection.
pub struct CollectionClient {
    base_url: String,
    collection: String,
    http_client: Client,
    headers: HeaderMap,
    query_params: Vec<(String, String)>,
}

impl CollectionClient {
    pub fn new(base_url: &str, api_key: &str, collection: &str, http_client: Client) -> Self {
        let mut headers = HeaderMap::new();
        if let Ok(key) = HeaderValue::from_str(api_key) {
            headers.insert("apikey", key);
        }
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        Self {
            base_url: base_url.to_string(),
            collection: collection.to_string(),
            http_client,
            headers,
            query_params: Vec::new(),
        }
    }

    /// Adds a header to every request made by this builder.
    pub fn with_header(mut self, key: &str, value: &str) -> Result<Self, StoreError> {
        let header_value = HeaderValue::from_str(value).map_err(|_| {
            StoreError::InvalidParameters(format!("Invalid header value: {}", value))
        })?;
        let header_name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|_| StoreError::InvalidParameters(format!("Invalid header name: {}", key)))?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Restricts which fields are returned.
    pub fn select(mut self, fields: &str) -> Self {
        self.query_params
            .push(("select".to_string(), fields.to_string()));
        self
    }

    /// Equality filter.
    pub fn eq(mut self, field: &str, value: &str) -> Self {
        self.query_params
            .push((field.to_string(), format!("eq.{}", value)));
        self
    }

    /// Greater-than filter.
    pub fn gt(mut self, field: &str, value: &str) -> Self {
        self.query_params
            .push((field.to_string(), format!("gt.{}", value)));
        self
    }

    /// Greater-than-or-equal filter.
    pub fn gte(mut self, field: &str, value: &str) -> Self {
        self.query_params
            .push((field.to_string(), format!("gte.{}", value)));
        self
    }

    /// Less-than filter.
    pub fn lt(mut self, field: &str, value: &str) -> Self {
        self.query_params
            .push((field.to_string(), format!("lt.{}", value)));
        self
    }

    /// Less-than-or-equal filter.
    pub fn lte(mut self, field: &str, value: &str) -> Self {
        self.query_params
            .push((field.to_string(), format!("lte.{}", value)));
        self
    }

    /// Case-insensitive pattern filter.
    pub fn ilike(mut self, field: &str, pattern: &str) -> Self {
        self.query_params
            .push((field.to_string(), format!("ilike.{}", pattern)));
        self
    }

    /// Sort order for the result set.
    pub fn order(mut self, field: &str, order: SortOrder) -> Self {
        let direction = match order {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        };
        self.query_params
            .push(("order".to_string(), format!("{}.{}", field, direction)));
        self
    }

    /// Limits the number of returned documents.
    pub fn limit(mut self, count: i32) -> Self {
        self.query_params
            .push(("limit".to_string(), count.to_string()));
        self
    }

    /// Fetches matching documents.
    pub async fn fetch<T: for<'de> Deserialize<'de>>(&self) -> Result<Vec<T>, StoreError> {
        let url = self.build_url()?;

        let response = self
            .http_client
            .get(&url)
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(StoreError::NetworkError)?;

        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status, response).await);
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| StoreError::DeserializationError(e.to_string()))
    }

    /// Inserts one document or an array of documents.
    pub async fn insert<T: Serialize>(&self, values: T) -> Result<Value, StoreError> {
        self.write(reqwest::Method::POST, &values, None).await
    }

    /// Inserts documents, merging with existing ones on key conflict.
    pub async fn upsert<T: Serialize>(&self, values: T) -> Result<Value, StoreError> {
        self.write(
            reqwest::Method::POST,
            &values,
            Some("resolution=merge-duplicates,return=representation"),
        )
        .await
    }

    /// Patches matching documents with the given values.
    pub async fn update<T: Serialize>(&self, values: T) -> Result<Value, StoreError> {
        self.write(reqwest::Method::PATCH, &values, None).await
    }

    async fn write<T: Serialize>(
        &self,
        method: reqwest::Method,
        values: &T,
        prefer: Option<&str>,
    ) -> Result<Value, StoreError> {
        let url = self.build_url()?;

        let mut headers = self.headers.clone();
        let prefer = prefer.unwrap_or("return=representation");
        headers.insert(
            HeaderName::from_static("prefer"),
            HeaderValue::from_str(prefer)
                .map_err(|_| StoreError::InvalidParameters(format!("Invalid prefer: {prefer}")))?,
        );

        let response = self
            .http_client
            .request(method, &url)
            .headers(headers)
            .json(values)
            .send()
            .await
            .map_err(StoreError::NetworkError)?;

        read_write_response(response).await
    }

    /// Deletes matching documents. With no filters set, this empties the
    /// whole collection.
    pub async fn delete(&self) -> Result<Value, StoreError> {
        let url = self.build_url()?;

        let mut headers = self.headers.clone();
        headers.insert(
            HeaderName::from_static("prefer"),
            HeaderValue::from_static("return=representation"),
        );

        let response = self
            .http_client
            .delete(&url)
            .headers(headers)
            .send()
            .await
            .map_err(StoreError::NetworkError)?;

        read_write_response(response).await
    }

    fn build_url(&self) -> Result<String, StoreError> {
        // Tolerate a trailing slash on the configured base URL.
        let base = self.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{}/api/v1/{}", base, self.collection))?;
        for (key, value) in &self.query_params {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url.to_string())
    }
}

/// Parses a write response, tolerating empty bodies (204 No Content).
async fn read_write_response(response: reqwest::Response) -> Result<Value, StoreError> {
    let status = response.status();
    if !status.is_success() {
        return Err(api_error(status, response).await);
    }

    let body_text = response.text().await.map_err(|e| {
        StoreError::DeserializationError(format!("Failed to read response body: {}", e))
    })?;

    if body_text.trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str::<Value>(&body_text)
            .map_err(|e| StoreError::DeserializationError(e.to_string()))
    }
}

/// Turns an error response into a [`StoreError`], parsing the structured
/// payload when possible.
async fn api_error(status: reqwest::StatusCode, response: reqwest::Response) -> StoreError {
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read error response".to_string());

    match serde_json::from_str::<ApiErrorDetails>(&error_text) {
        Ok(details) => StoreError::ApiError { details, status },
        Err(_) => StoreError::UnparsedApiError {
            message: error_text,
            status,
        },
    }
}
