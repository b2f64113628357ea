//! Personal income tax (PAYE) calculation.
//!
//! Individuals and registered business names are taxed on a progressive
//! schedule:
//!
//! | Step | Figure |
//! |------|--------|
//! | 1 | Gross income: sum of all income sources |
//! | 2 | Total deductions: sum of all reliefs |
//! | 3 | Taxable income: gross minus deductions, minimum 0 |
//! | 4 | Band breakdown of taxable income |
//! | 5 | Annual tax: sum of tax paid per band; monthly tax is a twelfth |
//! | 6 | Net income: gross minus deductions minus tax, minimum 0 |
//! | 7 | Effective rate: annual tax as a percentage of gross income |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::PersonalTaxCalculator;
//! use tax_core::{BandSchedule, DeductionInputs, IncomeInputs};
//!
//! let schedule = BandSchedule::nigeria_tax_act_2025();
//! let income = IncomeInputs {
//!     salary: dec!(5000000),
//!     ..Default::default()
//! };
//!
//! let result = PersonalTaxCalculator::new(&schedule).calculate(&income, &DeductionInputs::default());
//!
//! assert_eq!(result.annual_tax, dec!(690000));
//! assert_eq!(result.monthly_tax, dec!(57500));
//! assert_eq!(result.effective_rate, dec!(13.8));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::allocator::BracketAllocator;
use crate::calculations::common::{max, monthly, percentage_of};
use crate::models::{BandSchedule, DeductionInputs, IncomeInputs, TaxBand};

/// Outcome of a personal income tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalTaxResult {
    pub bands: Vec<TaxBand>,
    pub annual_tax: Decimal,
    pub monthly_tax: Decimal,
    pub gross_income: Decimal,
    pub total_deductions: Decimal,
    pub taxable_income: Decimal,
    pub net_income: Decimal,
    pub effective_rate: Decimal,
}

impl PersonalTaxResult {
    /// Summarizes an already computed band breakdown against the inputs.
    ///
    /// Used both for locally allocated bands and for bands returned by a
    /// remote bracket source.
    pub fn from_bands(
        bands: Vec<TaxBand>,
        income: &IncomeInputs,
        deductions: &DeductionInputs,
    ) -> Self {
        let gross_income = income.total();
        let total_deductions = deductions.total();
        let taxable_income = taxable_income(gross_income, total_deductions);

        let annual_tax = bands
            .iter()
            .fold(Decimal::ZERO, |acc, b| acc.saturating_add(b.tax_paid));
        let net_income = max(
            gross_income
                .saturating_sub(total_deductions)
                .saturating_sub(annual_tax),
            Decimal::ZERO,
        );

        Self {
            bands,
            annual_tax,
            monthly_tax: monthly(annual_tax),
            gross_income,
            total_deductions,
            taxable_income,
            net_income,
            effective_rate: percentage_of(annual_tax, gross_income),
        }
    }
}

/// Calculator for personal income tax against a local band schedule.
#[derive(Debug, Clone, Copy)]
pub struct PersonalTaxCalculator<'a> {
    allocator: BracketAllocator<'a>,
}

impl<'a> PersonalTaxCalculator<'a> {
    pub fn new(schedule: &'a BandSchedule) -> Self {
        Self {
            allocator: BracketAllocator::new(schedule),
        }
    }

    /// Computes the full result. Never fails; all-zero inputs give an
    /// all-zero result.
    pub fn calculate(
        &self,
        income: &IncomeInputs,
        deductions: &DeductionInputs,
    ) -> PersonalTaxResult {
        let taxable = taxable_income(income.total(), deductions.total());
        let bands = self.allocator.allocate(taxable);
        let result = PersonalTaxResult::from_bands(bands, income, deductions);

        debug!(
            gross = %result.gross_income,
            taxable = %result.taxable_income,
            annual_tax = %result.annual_tax,
            "personal tax calculated"
        );

        result
    }
}

/// Gross income less deductions, never below zero.
pub fn taxable_income(
    gross_income: Decimal,
    total_deductions: Decimal,
) -> Decimal {
    max(gross_income.saturating_sub(total_deductions), Decimal::ZERO)
}
