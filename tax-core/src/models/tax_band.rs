use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One slice of taxable income taxed at a single marginal rate.
///
/// `rate` is a percentage (`15` means 15%), matching the shape the upstream
/// bracket service returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBand {
    pub band: String,
    pub rate: Decimal,
    pub taxable_amount: Decimal,
    pub tax_paid: Decimal,
}

impl TaxBand {
    /// Short label used when rendering the band breakdown: `Tax-Free` for the
    /// zero-rate band, `"{rate}% Band"` otherwise.
    pub fn display_label(&self) -> String {
        rate_label(self.rate)
    }
}

pub(crate) fn rate_label(rate: Decimal) -> String {
    if rate.is_zero() {
        "Tax-Free".to_string()
    } else {
        format!("{}% Band", rate.normalize())
    }
}
