use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Answer to "did the business make a profit last financial year?".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfitAnswer {
    #[default]
    Unset,
    Yes,
    No,
}

impl ProfitAnswer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Yes => "yes",
            Self::No => "no",
        }
    }

    /// Reads the raw form value. Anything other than `yes` or `no` is unset.
    pub fn parse(s: &str) -> Self {
        match s {
            "yes" => Self::Yes,
            "no" => Self::No,
            _ => Self::Unset,
        }
    }
}

/// Where last year's revenue sits relative to the taxable threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueRange {
    #[default]
    Unset,
    Below,
    Above,
}

impl RevenueRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Below => "below",
            Self::Above => "above",
        }
    }

    /// Reads the raw form value. Anything other than `below` or `above` is unset.
    pub fn parse(s: &str) -> Self {
        match s {
            "below" => Self::Below,
            "above" => Self::Above,
            _ => Self::Unset,
        }
    }

    /// Classifies a revenue figure: only revenue strictly above `threshold`
    /// counts as [`RevenueRange::Above`].
    pub fn classify(
        revenue: Decimal,
        threshold: Decimal,
    ) -> Self {
        if revenue > threshold {
            Self::Above
        } else {
            Self::Below
        }
    }
}
