//! Read-only collaborators that supply reference data to the calculators.

use async_trait::async_trait;
use thiserror::Error;

use crate::calculations::BracketAllocator;
use crate::calculations::personal::taxable_income;
use crate::models::{BandSchedule, IndustryOption, PersonalTaxPayload, TaxBand, TaxConfiguration};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Reference data not found: {0}")]
    NotFound(String),

    #[error("Reference data unavailable: {0}")]
    Unavailable(String),

    #[error("Reference data could not be decoded: {0}")]
    Decode(String),
}

/// Produces the personal income band breakdown for a payload.
#[async_trait]
pub trait BracketSource: Send + Sync {
    async fn compute_personal_bands(
        &self,
        payload: &PersonalTaxPayload,
    ) -> Result<Vec<TaxBand>, SourceError>;
}

/// Lists the industries a company can be registered under.
#[async_trait]
pub trait IndustryCatalog: Send + Sync {
    async fn list_industries(&self) -> Result<Vec<IndustryOption>, SourceError>;
}

/// Supplies the company income tax rate and revenue threshold.
#[async_trait]
pub trait ConfigurationSource: Send + Sync {
    async fn business_tax_configuration(&self) -> Result<TaxConfiguration, SourceError>;
}

/// A [`BracketSource`] that allocates locally against a [`BandSchedule`].
#[derive(Debug, Clone, Default)]
pub struct ScheduleBracketSource {
    schedule: BandSchedule,
}

impl ScheduleBracketSource {
    pub fn new(schedule: BandSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &BandSchedule {
        &self.schedule
    }
}

#[async_trait]
impl BracketSource for ScheduleBracketSource {
    async fn compute_personal_bands(
        &self,
        payload: &PersonalTaxPayload,
    ) -> Result<Vec<TaxBand>, SourceError> {
        let taxable = taxable_income(payload.income.total(), payload.deductions.total());
        Ok(BracketAllocator::new(&self.schedule).allocate(taxable))
    }
}
