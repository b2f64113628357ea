mod answers;
mod band_schedule;
mod industry;
mod inputs;
mod tax_band;
mod tax_configuration;

pub use answers::{ProfitAnswer, RevenueRange};
pub use band_schedule::{BandSchedule, BandScheduleError, BandSpec};
pub use industry::{IndustryOption, IndustryRules};
pub use inputs::{ADVERTISED_RENT_RELIEF_CAP, DeductionInputs, IncomeInputs, PersonalTaxPayload};
pub use tax_band::TaxBand;
pub use tax_configuration::TaxConfiguration;

pub(crate) use tax_band::rate_label;
