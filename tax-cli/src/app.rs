//! Wires reference data into the calculators and produces printable reports.

use std::fmt;

use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use tax_core::calculations::{
    BusinessTaxCalculator, BusinessTaxInput, BusinessTaxReason, BusinessTaxResult,
    PersonalTaxResult, format_amount, format_percent,
};
use tax_core::sources::ScheduleBracketSource;
use tax_core::{
    ADVERTISED_RENT_RELIEF_CAP, BandSchedule, BracketSource, ConfigurationSource, IndustryCatalog,
    IndustryOption, PersonalTaxPayload, ProfitAnswer, ReferenceSnapshot, RevenueRange, TaxBand,
    TaxConfiguration,
};
use tax_data::{BandScheduleLoader, JsonFileCatalog, JsonFileConfiguration, StaticReferenceStore};

use crate::config::ReferenceConfig;

/// Loaded reference data plus the calculators that use it.
pub struct Estimator {
    brackets: Box<dyn BracketSource>,
    snapshot: ReferenceSnapshot,
    business: BusinessTaxCalculator,
}

impl Estimator {
    pub fn new(
        brackets: Box<dyn BracketSource>,
        snapshot: ReferenceSnapshot,
        business: BusinessTaxCalculator,
    ) -> Self {
        Self {
            brackets,
            snapshot,
            business,
        }
    }

    /// Builds the collaborators named in `reference` and loads the snapshot.
    ///
    /// A bad band schedule file is an error. Industry and configuration
    /// failures are recorded on the snapshot instead.
    pub async fn load(reference: &ReferenceConfig) -> Result<Self> {
        let schedule = match &reference.bands {
            Some(path) => BandScheduleLoader::load_file(path)
                .with_context(|| format!("loading band schedule from '{}'", path.display()))?,
            None => BandSchedule::nigeria_tax_act_2025(),
        };
        debug!(bands = schedule.bands().len(), "band schedule ready");

        let defaults = StaticReferenceStore::new(Vec::new(), Some(TaxConfiguration::default()));
        let catalog: Box<dyn IndustryCatalog> = match &reference.industries {
            Some(path) => Box::new(JsonFileCatalog::new(path)),
            None => Box::new(defaults.clone()),
        };
        let configuration: Box<dyn ConfigurationSource> = match &reference.configuration {
            Some(path) => Box::new(JsonFileConfiguration::new(path)),
            None => Box::new(defaults),
        };

        let snapshot = ReferenceSnapshot::load(catalog.as_ref(), configuration.as_ref()).await;

        Ok(Self::new(
            Box::new(ScheduleBracketSource::new(schedule)),
            snapshot,
            BusinessTaxCalculator::current(),
        ))
    }

    pub fn snapshot(&self) -> &ReferenceSnapshot {
        &self.snapshot
    }

    pub async fn personal(
        &self,
        payload: PersonalTaxPayload,
    ) -> Result<PersonalReport> {
        let bands = self
            .brackets
            .compute_personal_bands(&payload)
            .await
            .context("computing personal tax bands")?;
        let result = PersonalTaxResult::from_bands(bands, &payload.income, &payload.deductions);
        info!(annual_tax = %result.annual_tax, "personal tax estimated");

        Ok(PersonalReport {
            rent_above_advertised_cap: payload.deductions.rent_exceeds_advertised_cap(),
            result,
        })
    }

    pub fn business(
        &self,
        request: &BusinessRequest,
    ) -> Result<BusinessReport> {
        let industry = match request.industry.as_deref() {
            Some(id) => {
                let found = self.snapshot.industry(id);
                if found.is_none() && self.snapshot.availability_error().is_none() {
                    bail!("unknown industry '{id}', run `industries` to list them");
                }
                found
            }
            None => None,
        };

        let threshold = self.snapshot.threshold();
        let revenue_range = match request.revenue {
            Some(revenue) => RevenueRange::classify(revenue, threshold),
            None => request.revenue_range,
        };

        let input = BusinessTaxInput {
            industry,
            configuration: self.snapshot.configuration(),
            made_profit: request.made_profit,
            revenue_range,
            net_profit: request.net_profit,
            incorporation_year: request.incorporation_year,
        };
        let result = self.business.calculate(&input);
        info!(reason = result.reason.as_str(), annual_tax = %result.annual_tax, "business tax estimated");

        Ok(BusinessReport {
            industry: industry.map(|i| i.name.clone()),
            exemption_period_years: industry.map(|i| i.rules().exemption_period_years),
            made_profit: request.made_profit,
            threshold,
            bands: result.bands(),
            data_error: self.snapshot.availability_error(),
            result,
        })
    }

    pub fn industries(&self) -> IndustryReport<'_> {
        IndustryReport {
            industries: self.snapshot.industries(),
            data_error: self.snapshot.availability_error(),
        }
    }
}

/// Answers collected for a company income tax estimate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessRequest {
    pub industry: Option<String>,
    pub made_profit: ProfitAnswer,
    pub revenue_range: RevenueRange,
    /// When set, replaces `revenue_range` by comparing against the threshold.
    pub revenue: Option<Decimal>,
    pub net_profit: Decimal,
    pub incorporation_year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalReport {
    #[serde(flatten)]
    pub result: PersonalTaxResult,
    pub rent_above_advertised_cap: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessReport {
    pub industry: Option<String>,
    #[serde(skip)]
    pub exemption_period_years: Option<u32>,
    #[serde(skip)]
    pub made_profit: ProfitAnswer,
    pub threshold: Decimal,
    #[serde(flatten)]
    pub result: BusinessTaxResult,
    pub bands: Vec<TaxBand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_error: Option<&'static str>,
}

impl BusinessReport {
    /// One-line explanation of why no tax, or which exemption, applies.
    pub fn note(&self) -> Option<String> {
        match self.result.reason {
            BusinessTaxReason::Taxable => None,
            BusinessTaxReason::NoIncomeTax => {
                Some("This industry is exempt from Company Income Tax".to_string())
            }
            BusinessTaxReason::NoProfit if self.made_profit == ProfitAnswer::No => {
                Some("No tax applies: the business did not make a profit".to_string())
            }
            BusinessTaxReason::NoProfit => None,
            BusinessTaxReason::BelowThreshold => Some(format!(
                "No tax applies: revenue is below the {} threshold",
                format_amount(self.threshold)
            )),
            BusinessTaxReason::ExemptionApplies => Some(format!(
                "Tax exemption period applies: {} years from incorporation",
                self.exemption_period_years.unwrap_or_default()
            )),
        }
    }

    /// Effective rate as shown to users: zero unless tax is due.
    pub fn displayed_rate(&self) -> Decimal {
        if self.result.is_taxable {
            self.result.effective_rate
        } else {
            Decimal::ZERO
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndustryReport<'a> {
    pub industries: &'a [IndustryOption],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_error: Option<&'static str>,
}

fn write_row(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: impl fmt::Display,
) -> fmt::Result {
    writeln!(f, "{label:<18}{value}")
}

fn write_bands(
    f: &mut fmt::Formatter<'_>,
    bands: &[TaxBand],
    label: impl Fn(&TaxBand) -> String,
) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{:<22}{:>8}  {:>16}  {:>14}", "Band", "Rate", "Taxable", "Tax")?;
    for band in bands {
        writeln!(
            f,
            "{:<22}{:>8}  {:>16}  {:>14}",
            label(band),
            format_percent(band.rate),
            format_amount(band.taxable_amount),
            format_amount(band.tax_paid)
        )?;
    }
    Ok(())
}

impl fmt::Display for PersonalReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let r = &self.result;
        write_row(f, "Gross income", format_amount(r.gross_income))?;
        write_row(f, "Total deductions", format_amount(r.total_deductions))?;
        write_row(f, "Taxable income", format_amount(r.taxable_income))?;
        write_row(f, "Annual tax", format_amount(r.annual_tax))?;
        write_row(f, "Monthly tax", format_amount(r.monthly_tax))?;
        write_row(f, "Net income", format_amount(r.net_income))?;
        write_row(f, "Effective rate", format_percent(r.effective_rate))?;
        write_bands(f, &r.bands, |b| b.band.clone())?;

        if self.rent_above_advertised_cap {
            writeln!(f)?;
            writeln!(
                f,
                "Note: rent relief is advertised up to {}; the full rent entered was deducted.",
                format_amount(ADVERTISED_RENT_RELIEF_CAP)
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for BusinessReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if let Some(message) = self.data_error {
            writeln!(f, "{message}")?;
            writeln!(f)?;
        }

        let r = &self.result;
        write_row(f, "Industry", self.industry.as_deref().unwrap_or("-"))?;
        write_row(f, "Outcome", r.reason.as_str())?;
        write_row(f, "Tax rate", format_percent(r.tax_rate * Decimal::ONE_HUNDRED))?;
        write_row(f, "Net profit", format_amount(r.total_net_profit))?;
        write_row(f, "Annual tax", format_amount(r.annual_tax))?;
        write_row(f, "Monthly tax", format_amount(r.monthly_tax))?;
        write_row(f, "Effective rate", format_percent(self.displayed_rate()))?;
        write_bands(f, &self.bands, TaxBand::display_label)?;

        if let Some(note) = self.note() {
            writeln!(f)?;
            writeln!(f, "{note}")?;
        }
        Ok(())
    }
}

impl fmt::Display for IndustryReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if let Some(message) = self.data_error {
            writeln!(f, "{message}")?;
        }
        if self.industries.is_empty() {
            return writeln!(f, "No industries available.");
        }

        writeln!(f, "{:<24}{:<32}{}", "ID", "Name", "Company income tax")?;
        for industry in self.industries {
            let rules = industry.rules();
            let tax = if !rules.requires_income_tax {
                "exempt".to_string()
            } else if rules.has_exemption_period {
                format!("due after {} year exemption", rules.exemption_period_years)
            } else {
                "due".to_string()
            };
            writeln!(f, "{:<24}{:<32}{}", industry.id, industry.name, tax)?;
        }
        Ok(())
    }
}
