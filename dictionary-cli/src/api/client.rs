//! HTTP client for the dictionary server endpoints

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Instant;

use super::error::ApiError;
use super::models::{ColumnUpdatePayload, Domain, SchemaDelta, TableDomainLink};
use crate::config::ClientConfig;

pub const CHECK_CHANGES_PATH: &str = "/check-changes";
pub const SYNC_DB_PATH: &str = "/sync-db";
pub const UPDATE_PATH: &str = "/update";
pub const GET_DOMAINS_PATH: &str = "/get-domains";
pub const CREATE_DOMAIN_PATH: &str = "/create-domain";
pub const LINK_TABLE_DOMAIN_PATH: &str = "/link-table-with-domain";

/// Remote operations offered by the dictionary server
///
/// Workflows only see this trait so they can run against a fake in tests.
#[async_trait]
pub trait DictionaryApi: Send + Sync {
    /// Ask the server to diff the stored dictionary against the live schema
    async fn check_changes(&self) -> Result<SchemaDelta, ApiError>;

    /// Apply the live schema to the stored dictionary
    async fn sync_database(&self) -> Result<(), ApiError>;

    /// Store the descriptions of one table and its columns
    async fn update_dictionary(&self, payload: &ColumnUpdatePayload) -> Result<(), ApiError>;

    async fn get_domains(&self) -> Result<Vec<Domain>, ApiError>;

    async fn create_domain(&self, domain: &Domain) -> Result<(), ApiError>;

    async fn link_table_with_domain(&self, link: &TableDomainLink) -> Result<(), ApiError>;
}

/// `reqwest` implementation of [`DictionaryApi`]
#[derive(Debug, Clone)]
pub struct DictionaryClient {
    http: Client,
    base_url: String,
}

impl DictionaryClient {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.server_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> Result<Response, ApiError> {
        let url = self.url(path);
        log::debug!("GET {}", url);
        let start = Instant::now();
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        log::debug!("GET {} -> {} in {:?}", url, response.status(), start.elapsed());
        ensure_success(response).await
    }

    async fn post<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let url = self.url(path);
        log::debug!("POST {}", url);
        let start = Instant::now();
        let mut request = self.http.post(&url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        log::debug!("POST {} -> {} in {:?}", url, response.status(), start.elapsed());
        ensure_success(response).await
    }
}

/// Anything but `200 OK` becomes [`ApiError::Status`] carrying the body text
async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status == StatusCode::OK {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    log::warn!("Dictionary server returned {}: {}", status, body.trim());
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl DictionaryApi for DictionaryClient {
    async fn check_changes(&self) -> Result<SchemaDelta, ApiError> {
        let response = self.get(CHECK_CHANGES_PATH).await?;
        decode(response).await
    }

    async fn sync_database(&self) -> Result<(), ApiError> {
        self.post::<()>(SYNC_DB_PATH, None).await?;
        Ok(())
    }

    async fn update_dictionary(&self, payload: &ColumnUpdatePayload) -> Result<(), ApiError> {
        self.post(UPDATE_PATH, Some(payload)).await?;
        Ok(())
    }

    async fn get_domains(&self) -> Result<Vec<Domain>, ApiError> {
        let response = self.get(GET_DOMAINS_PATH).await?;
        // The server answers `null` when no domain exists yet
        let domains: Option<Vec<Domain>> = decode(response).await?;
        Ok(domains.unwrap_or_default())
    }

    async fn create_domain(&self, domain: &Domain) -> Result<(), ApiError> {
        self.post(CREATE_DOMAIN_PATH, Some(domain)).await?;
        Ok(())
    }

    async fn link_table_with_domain(&self, link: &TableDomainLink) -> Result<(), ApiError> {
        self.post(LINK_TABLE_DOMAIN_PATH, Some(link)).await?;
        Ok(())
    }
}
