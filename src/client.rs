//! Access to the grant catalog API
//!
//! All network I/O goes through [`GrantStore`] so the runner can be driven
//! by an in-memory store in tests.

use reqwest::blocking::{Client, Response};
use reqwest::Url;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::types::{Grant, GrantType, ImageUpdate, NewGrant};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("failed to update image for grant {id}: {reason}")]
    Update { id: i64, reason: String },

    #[error("failed to create grant '{title}': {reason}")]
    Create { title: String, reason: String },

    #[error("invalid API base URL: {0}")]
    BaseUrl(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Read and write operations on the grant collection
pub trait GrantStore {
    fn fetch_all(&self) -> Result<Vec<Grant>, ApiError>;
    fn fetch_by_type(&self, grant_type: GrantType) -> Result<Vec<Grant>, ApiError>;
    fn search(&self, query: &str) -> Result<Vec<Grant>, ApiError>;
    fn update_image(&self, id: i64, image_url: &str) -> Result<Grant, ApiError>;
    fn create_grant(&self, grant: &NewGrant) -> Result<Grant, ApiError>;

    /// `fetch_by_type` when a type is given, `fetch_all` otherwise
    fn fetch(&self, grant_type: Option<GrantType>) -> Result<Vec<Grant>, ApiError> {
        match grant_type {
            Some(t) => self.fetch_by_type(t),
            None => self.fetch_all(),
        }
    }
}

/// HTTP implementation of [`GrantStore`]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::BaseUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::BaseUrl(base_url.to_string()));
        }
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get_grants(&self, segments: &[&str]) -> Result<Vec<Grant>, ApiError> {
        let url = self.endpoint(segments)?;
        let fail = |reason: String| ApiError::Fetch {
            url: url.to_string(),
            reason,
        };
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| fail(e.to_string()))?;
        decode(response).map_err(fail)
    }
}

/// Turn a response into `T`, or a message describing why it could not be
fn decode<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        let body = body.trim();
        return Err(if body.is_empty() {
            format!("HTTP {}", status)
        } else {
            format!("HTTP {}: {}", status, truncate(body, 200))
        });
    }
    response
        .json::<T>()
        .map_err(|e| format!("invalid response body: {}", e))
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

impl GrantStore for ApiClient {
    fn fetch_all(&self) -> Result<Vec<Grant>, ApiError> {
        self.get_grants(&["api", "grants"])
    }

    fn fetch_by_type(&self, grant_type: GrantType) -> Result<Vec<Grant>, ApiError> {
        self.get_grants(&["api", "grants", "type", grant_type.as_str()])
    }

    fn search(&self, query: &str) -> Result<Vec<Grant>, ApiError> {
        self.get_grants(&["api", "grants", "search", query])
    }

    fn update_image(&self, id: i64, image_url: &str) -> Result<Grant, ApiError> {
        let fail = |reason: String| ApiError::Update { id, reason };
        let url = self.endpoint(&["api", "admin", "grants", "update-image"])?;
        let response = self
            .client
            .post(url)
            .json(&ImageUpdate { id, image_url })
            .send()
            .map_err(|e| fail(e.to_string()))?;
        decode(response).map_err(fail)
    }

    fn create_grant(&self, grant: &NewGrant) -> Result<Grant, ApiError> {
        let fail = |reason: String| ApiError::Create {
            title: grant.title.clone(),
            reason,
        };
        let url = self.endpoint(&["api", "admin", "grants", "add"])?;
        let response = self
            .client
            .post(url)
            .json(grant)
            .send()
            .map_err(|e| fail(e.to_string()))?;
        decode(response).map_err(fail)
    }
}
