//! Company income tax calculation.
//!
//! Limited liability companies pay a flat rate on net profit, unless one of
//! the following rules applies. Rules are checked in order and the first
//! match decides the outcome:
//!
//! | Order | Condition | Reason |
//! |-------|-----------|--------|
//! | 1 | Industry or configuration not loaded | `no_profit` |
//! | 2 | Industry does not require income tax | `no_income_tax` |
//! | 3 | No profit declared | `no_profit` |
//! | 4 | Revenue not above the threshold | `below_threshold` |
//! | 5 | Still inside the industry's exemption window | `exemption_applies` |
//! | 6 | Otherwise | `taxable` |
//!
//! The exemption window includes its last year: a company incorporated
//! exactly `ExemptionPeriodYears` ago is still exempt.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::{BusinessTaxCalculator, BusinessTaxInput, BusinessTaxReason};
//! use tax_core::{IndustryOption, IndustryRules, ProfitAnswer, RevenueRange, TaxConfiguration};
//!
//! let industry = IndustryOption {
//!     id: "manufacturing".to_string(),
//!     name: "Manufacturing".to_string(),
//!     value: "manufacturing".to_string(),
//!     extra_properties: IndustryRules::default(),
//! };
//! let config = TaxConfiguration::default();
//!
//! let input = BusinessTaxInput {
//!     industry: Some(&industry),
//!     configuration: Some(&config),
//!     made_profit: ProfitAnswer::Yes,
//!     revenue_range: RevenueRange::Above,
//!     net_profit: dec!(12000000),
//!     incorporation_year: None,
//! };
//!
//! let result = BusinessTaxCalculator::new(2026).calculate(&input);
//!
//! assert_eq!(result.reason, BusinessTaxReason::Taxable);
//! assert_eq!(result.annual_tax, dec!(3000000));
//! assert_eq!(result.monthly_tax, dec!(250000));
//! ```

use chrono::{Datelike, Local};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{ONE_HUNDRED, max, monthly};
use crate::models::{
    IndustryOption, ProfitAnswer, RevenueRange, TaxBand, TaxConfiguration, rate_label,
};

/// Why a business was, or was not, charged company income tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessTaxReason {
    Taxable,
    NoProfit,
    BelowThreshold,
    NoIncomeTax,
    ExemptionApplies,
}

impl BusinessTaxReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Taxable => "taxable",
            Self::NoProfit => "no_profit",
            Self::BelowThreshold => "below_threshold",
            Self::NoIncomeTax => "no_income_tax",
            Self::ExemptionApplies => "exemption_applies",
        }
    }
}

/// Inputs for one company income tax calculation.
///
/// `industry` and `configuration` are `None` while reference data has not
/// been loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessTaxInput<'a> {
    pub industry: Option<&'a IndustryOption>,
    pub configuration: Option<&'a TaxConfiguration>,
    pub made_profit: ProfitAnswer,
    pub revenue_range: RevenueRange,
    pub net_profit: Decimal,
    pub incorporation_year: Option<i32>,
}

/// Outcome of a company income tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessTaxResult {
    pub annual_tax: Decimal,
    pub monthly_tax: Decimal,
    pub effective_rate: Decimal,
    pub total_net_profit: Decimal,
    pub is_taxable: bool,
    pub tax_rate: Decimal,
    pub reason: BusinessTaxReason,
}

impl BusinessTaxResult {
    /// Band breakdown for display.
    ///
    /// A taxable result shows an empty tax-free band followed by the flat-rate
    /// band carrying all profit; anything else shows the whole profit as
    /// tax-free.
    pub fn bands(&self) -> Vec<TaxBand> {
        let tax_free = |amount: Decimal| TaxBand {
            band: rate_label(Decimal::ZERO),
            rate: Decimal::ZERO,
            taxable_amount: amount,
            tax_paid: Decimal::ZERO,
        };

        if !self.is_taxable {
            return vec![tax_free(self.total_net_profit)];
        }

        let rate = self.tax_rate.saturating_mul(ONE_HUNDRED);
        vec![
            tax_free(Decimal::ZERO),
            TaxBand {
                band: rate_label(rate),
                rate,
                taxable_amount: self.total_net_profit,
                tax_paid: self.annual_tax,
            },
        ]
    }
}

/// Calculator for company income tax.
///
/// The current year is fixed at construction so exemption windows are
/// deterministic under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessTaxCalculator {
    current_year: i32,
}

impl BusinessTaxCalculator {
    pub fn new(current_year: i32) -> Self {
        Self { current_year }
    }

    /// A calculator for the current calendar year on the local clock.
    pub fn current() -> Self {
        Self::new(Local::now().year())
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Applies the decision rules in order. Never fails; missing reference
    /// data yields a non-taxable `no_profit` result.
    pub fn calculate(
        &self,
        input: &BusinessTaxInput<'_>,
    ) -> BusinessTaxResult {
        let tax_rate = input
            .configuration
            .map_or(TaxConfiguration::DEFAULT_TAX_RATE, |c| c.tax_rate);
        let net_profit = max(input.net_profit, Decimal::ZERO);

        let reason = self.decide(input);
        debug!(
            reason = reason.as_str(),
            industry = input.industry.map(|i| i.id.as_str()),
            "business tax decision"
        );

        let (annual_tax, is_taxable) = match reason {
            BusinessTaxReason::Taxable => (tax_rate.saturating_mul(net_profit), true),
            _ => (Decimal::ZERO, false),
        };

        BusinessTaxResult {
            annual_tax,
            monthly_tax: monthly(annual_tax),
            effective_rate: tax_rate.saturating_mul(ONE_HUNDRED),
            total_net_profit: net_profit,
            is_taxable,
            tax_rate,
            reason,
        }
    }

    fn decide(
        &self,
        input: &BusinessTaxInput<'_>,
    ) -> BusinessTaxReason {
        let (Some(industry), Some(_)) = (input.industry, input.configuration) else {
            return BusinessTaxReason::NoProfit;
        };
        let rules = industry.rules();

        if !rules.requires_income_tax {
            return BusinessTaxReason::NoIncomeTax;
        }

        if input.made_profit != ProfitAnswer::Yes {
            return BusinessTaxReason::NoProfit;
        }

        if input.revenue_range != RevenueRange::Above {
            return BusinessTaxReason::BelowThreshold;
        }

        if rules.has_exemption_period {
            if let Some(year) = input.incorporation_year {
                if self.within_exemption(year, rules.exemption_period_years) {
                    return BusinessTaxReason::ExemptionApplies;
                }
            }
        }

        BusinessTaxReason::Taxable
    }

    fn within_exemption(
        &self,
        incorporation_year: i32,
        exemption_period_years: u32,
    ) -> bool {
        let years_since_incorporation =
            i64::from(self.current_year) - i64::from(incorporation_year);
        years_since_incorporation <= i64::from(exemption_period_years)
    }
}
