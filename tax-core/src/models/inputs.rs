use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Rent relief cap shown next to the rent field.
///
/// Not applied by [`crate::calculations::PersonalTaxCalculator`]; deductions
/// are summed as entered.
pub const ADVERTISED_RENT_RELIEF_CAP: Decimal = dec!(500000);

/// Annual income by source, in naira.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeInputs {
    #[serde(rename = "salaryIncome")]
    pub salary: Decimal,
    #[serde(rename = "businessIncome")]
    pub business: Decimal,
    #[serde(rename = "rentalIncome")]
    pub rental: Decimal,
    #[serde(rename = "investmentIncome")]
    pub investment: Decimal,
    #[serde(rename = "otherIncome")]
    pub other: Decimal,
}

impl IncomeInputs {
    /// Gross income: the sum of every source, saturating at [`Decimal::MAX`].
    pub fn total(&self) -> Decimal {
        saturating_sum([self.salary, self.business, self.rental, self.investment, self.other])
    }
}

/// Annual reliefs claimed against income, in naira.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionInputs {
    pub rent: Decimal,
    #[serde(rename = "pensionContribution")]
    pub pension: Decimal,
    #[serde(rename = "nhfContribution")]
    pub nhf: Decimal,
    #[serde(rename = "lifeInsurance")]
    pub life_insurance: Decimal,
    #[serde(rename = "nhisPremium")]
    pub nhis_premium: Decimal,
    // The upstream service spells this field "gratitude".
    #[serde(rename = "gratitude")]
    pub gratuity: Decimal,
}

impl DeductionInputs {
    pub fn total(&self) -> Decimal {
        saturating_sum([
            self.rent,
            self.pension,
            self.nhf,
            self.life_insurance,
            self.nhis_premium,
            self.gratuity,
        ])
    }

    /// True when the rent entered is above [`ADVERTISED_RENT_RELIEF_CAP`].
    pub fn rent_exceeds_advertised_cap(&self) -> bool {
        self.rent > ADVERTISED_RENT_RELIEF_CAP
    }
}

fn saturating_sum(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount))
}

/// Request body sent to a bracket source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalTaxPayload {
    pub income: IncomeInputs,
    pub deductions: DeductionInputs,
}
