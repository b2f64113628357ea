use serde::{Deserialize, Serialize};

/// Company income tax rules attached to an industry.
///
/// Field names follow the upstream `extraProperties` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IndustryRules {
    pub requires_income_tax: bool,
    pub has_exemption_period: bool,
    pub exemption_period_years: u32,
}

impl Default for IndustryRules {
    fn default() -> Self {
        Self {
            requires_income_tax: true,
            has_exemption_period: false,
            exemption_period_years: 0,
        }
    }
}

/// An entry in the industry catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryOption {
    pub id: String,
    pub name: String,
    pub value: String,
    pub extra_properties: IndustryRules,
}

impl IndustryOption {
    pub fn rules(&self) -> &IndustryRules {
        &self.extra_properties
    }
}
