//! Progressive band allocation.
//!
//! Income fills the bands lowest-rate first. A band only receives income once
//! every band below it is full, and every band in the schedule is reported,
//! including the empty ones above the income.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::BandSchedule;
//! use tax_core::calculations::BracketAllocator;
//!
//! let schedule = BandSchedule::nigeria_tax_act_2025();
//! let bands = BracketAllocator::new(&schedule).allocate(dec!(5000000));
//!
//! assert_eq!(bands.len(), 6);
//! assert_eq!(bands[1].tax_paid, dec!(330000));
//! assert_eq!(bands[2].taxable_amount, dec!(2000000));
//! ```

use rust_decimal::Decimal;

use crate::calculations::common::{ONE_HUNDRED, max};
use crate::models::{BandSchedule, TaxBand};

/// Distributes taxable income across a [`BandSchedule`].
#[derive(Debug, Clone, Copy)]
pub struct BracketAllocator<'a> {
    schedule: &'a BandSchedule,
}

impl<'a> BracketAllocator<'a> {
    pub fn new(schedule: &'a BandSchedule) -> Self {
        Self { schedule }
    }

    /// Allocates `taxable_income` band by band.
    ///
    /// Each band takes `min(remaining, capacity)` and pays `rate / 100` of
    /// it, so tax paid never exceeds the amount allocated. Income beyond a bounded top band is left unallocated. Negative
    /// income is treated as zero. No rounding is applied.
    pub fn allocate(
        &self,
        taxable_income: Decimal,
    ) -> Vec<TaxBand> {
        let mut remaining = max(taxable_income, Decimal::ZERO);

        self.schedule
            .bands()
            .iter()
            .map(|spec| {
                let allocated = match spec.capacity {
                    Some(capacity) => remaining.min(capacity),
                    None => remaining,
                };
                remaining -= allocated;

                TaxBand {
                    band: spec.label.clone(),
                    rate: spec.rate,
                    taxable_amount: allocated,
                    tax_paid: allocated * (spec.rate / ONE_HUNDRED),
                }
            })
            .collect()
    }
}
