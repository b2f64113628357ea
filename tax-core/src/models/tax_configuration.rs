use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Company income tax parameters.
///
/// `tax_rate` is always a fraction (`0.25`); sources that publish a
/// percentage go through [`TaxConfiguration::from_published`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaxConfiguration {
    pub tax_rate: Decimal,
    pub taxable_amount_threshold: Decimal,
}

impl TaxConfiguration {
    pub const DEFAULT_TAX_RATE: Decimal = dec!(0.25);
    pub const DEFAULT_THRESHOLD: Decimal = dec!(10000000);

    /// Builds a configuration from a published rate, dividing rates above 1
    /// by 100.
    pub fn from_published(
        rate: Decimal,
        threshold: Decimal,
    ) -> Self {
        let tax_rate = if rate > Decimal::ONE {
            rate / dec!(100)
        } else {
            rate
        };

        Self {
            tax_rate,
            taxable_amount_threshold: threshold,
        }
    }
}

impl Default for TaxConfiguration {
    fn default() -> Self {
        Self {
            tax_rate: Self::DEFAULT_TAX_RATE,
            taxable_amount_threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}
