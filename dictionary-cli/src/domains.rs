//! Business domains and their table links

use std::fmt;
use std::sync::Arc;

use crate::api::{ApiError, DictionaryApi, Domain, TableDomainLink};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Required fields were blank after trimming; nothing was sent
    MissingFields(Vec<&'static str>),
    Api(ApiError),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::MissingFields(fields) => {
                write!(f, "Missing fields: {}", fields.join(", "))
            }
            DomainError::Api(err) => write!(f, "{}", err.user_message()),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<ApiError> for DomainError {
    fn from(err: ApiError) -> Self {
        DomainError::Api(err)
    }
}

/// Trim both fields and reject blanks
pub fn validate_domain(name: &str, description: &str) -> Result<Domain, DomainError> {
    let domain = Domain {
        name: name.trim().to_string(),
        description: description.trim().to_string(),
    };
    let mut missing = Vec::new();
    if domain.name.is_empty() {
        missing.push("name");
    }
    if domain.description.is_empty() {
        missing.push("description");
    }
    if missing.is_empty() {
        Ok(domain)
    } else {
        Err(DomainError::MissingFields(missing))
    }
}

pub fn validate_link(table_id: &str, domain_name: &str) -> Result<TableDomainLink, DomainError> {
    let link = TableDomainLink {
        table_id: table_id.trim().to_string(),
        domain_name: domain_name.trim().to_string(),
    };
    let mut missing = Vec::new();
    if link.table_id.is_empty() {
        missing.push("table_id");
    }
    if link.domain_name.is_empty() {
        missing.push("domain_name");
    }
    if missing.is_empty() {
        Ok(link)
    } else {
        Err(DomainError::MissingFields(missing))
    }
}

pub struct DomainRegistry {
    api: Arc<dyn DictionaryApi>,
}

impl DomainRegistry {
    pub fn new(api: Arc<dyn DictionaryApi>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Domain>, DomainError> {
        let domains = self.api.get_domains().await?;
        log::debug!("Fetched {} domains", domains.len());
        Ok(domains)
    }

    pub async fn create(&self, name: &str, description: &str) -> Result<Domain, DomainError> {
        let domain = validate_domain(name, description)?;
        self.api.create_domain(&domain).await?;
        log::info!("Created domain '{}'", domain.name);
        Ok(domain)
    }

    pub async fn link(&self, table_id: &str, domain_name: &str) -> Result<TableDomainLink, DomainError> {
        let link = validate_link(table_id, domain_name)?;
        self.api.link_table_with_domain(&link).await?;
        log::info!("Linked table {} to domain '{}'", link.table_id, link.domain_name);
        Ok(link)
    }
}
