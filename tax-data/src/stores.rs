//! File-backed and in-memory reference data collaborators.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tax_core::{ConfigurationSource, IndustryCatalog, IndustryOption, SourceError, TaxConfiguration};
use tracing::debug;

use crate::envelope::{decode_configuration, decode_industries};

async fn read_body(path: &Path) -> Result<String, SourceError> {
    let body = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SourceError::Unavailable(format!("{}: {e}", path.display())))?;
    debug!(path = %path.display(), bytes = body.len(), "reference file read");
    Ok(body)
}

/// Industry catalog read from a JSON response saved on disk.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl IndustryCatalog for JsonFileCatalog {
    async fn list_industries(&self) -> Result<Vec<IndustryOption>, SourceError> {
        let body = read_body(&self.path).await?;
        decode_industries(&body)
    }
}

/// Business tax configuration read from a JSON response saved on disk.
#[derive(Debug, Clone)]
pub struct JsonFileConfiguration {
    path: PathBuf,
}

impl JsonFileConfiguration {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ConfigurationSource for JsonFileConfiguration {
    async fn business_tax_configuration(&self) -> Result<TaxConfiguration, SourceError> {
        let body = read_body(&self.path).await?;
        decode_configuration(&body)
    }
}

/// Reference data held in memory.
///
/// Serves both collaborator traits. A missing configuration is reported as
/// [`SourceError::NotFound`].
#[derive(Debug, Clone, Default)]
pub struct StaticReferenceStore {
    pub industries: Vec<IndustryOption>,
    pub configuration: Option<TaxConfiguration>,
}

impl StaticReferenceStore {
    pub fn new(
        industries: Vec<IndustryOption>,
        configuration: Option<TaxConfiguration>,
    ) -> Self {
        Self {
            industries,
            configuration,
        }
    }
}

#[async_trait]
impl IndustryCatalog for StaticReferenceStore {
    async fn list_industries(&self) -> Result<Vec<IndustryOption>, SourceError> {
        Ok(self.industries.clone())
    }
}

#[async_trait]
impl ConfigurationSource for StaticReferenceStore {
    async fn business_tax_configuration(&self) -> Result<TaxConfiguration, SourceError> {
        self.configuration
            .clone()
            .ok_or_else(|| SourceError::NotFound("business tax configuration".to_string()))
    }
}
