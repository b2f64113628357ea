//! A resolved snapshot of the reference data the business calculator needs.

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::models::{IndustryOption, TaxConfiguration};
use crate::sources::{ConfigurationSource, IndustryCatalog};

/// Message shown to users when any reference data failed to load.
pub const DATA_UNAVAILABLE_MESSAGE: &str = "Failed to load calculator data. Please try again.";

/// Industries and configuration as loaded at one point in time.
///
/// Loading never fails: a collaborator error leaves the matching field empty
/// and is recorded in [`ReferenceSnapshot::failures`], so calculations carry
/// on with their not-loaded defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSnapshot {
    industries: Vec<IndustryOption>,
    configuration: Option<TaxConfiguration>,
    failures: Vec<String>,
}

impl ReferenceSnapshot {
    pub fn new(
        industries: Vec<IndustryOption>,
        configuration: Option<TaxConfiguration>,
    ) -> Self {
        Self {
            industries,
            configuration,
            failures: Vec::new(),
        }
    }

    /// Resolves both collaborators once.
    pub async fn load(
        catalog: &dyn IndustryCatalog,
        configuration: &dyn ConfigurationSource,
    ) -> Self {
        let mut snapshot = Self::default();

        match catalog.list_industries().await {
            Ok(industries) => {
                info!(count = industries.len(), "industry catalog loaded");
                snapshot.industries = industries;
            }
            Err(error) => {
                warn!(%error, "industry catalog unavailable");
                snapshot.failures.push(error.to_string());
            }
        }

        match configuration.business_tax_configuration().await {
            Ok(config) => {
                info!(tax_rate = %config.tax_rate, "business tax configuration loaded");
                snapshot.configuration = Some(config);
            }
            Err(error) => {
                warn!(%error, "business tax configuration unavailable");
                snapshot.failures.push(error.to_string());
            }
        }

        snapshot
    }

    pub fn industries(&self) -> &[IndustryOption] {
        &self.industries
    }

    /// Looks an industry up by its id.
    pub fn industry(
        &self,
        id: &str,
    ) -> Option<&IndustryOption> {
        self.industries.iter().find(|i| i.id == id)
    }

    pub fn configuration(&self) -> Option<&TaxConfiguration> {
        self.configuration.as_ref()
    }

    /// Revenue threshold to show in prompts, falling back to the default
    /// while the configuration is missing.
    pub fn threshold(&self) -> Decimal {
        self.configuration
            .as_ref()
            .map_or(TaxConfiguration::DEFAULT_THRESHOLD, |c| c.taxable_amount_threshold)
    }

    /// Errors raised while loading, in collaborator order.
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// The user-facing availability message, if anything failed to load.
    pub fn availability_error(&self) -> Option<&'static str> {
        (!self.failures.is_empty()).then_some(DATA_UNAVAILABLE_MESSAGE)
    }
}
