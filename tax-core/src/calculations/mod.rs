//! Tax calculations: progressive personal income tax and flat-rate company
//! income tax, plus the amount parsing and formatting shared by callers.

pub mod allocator;
pub mod amount;
pub mod business;
pub mod common;
pub mod personal;

pub use allocator::BracketAllocator;
pub use amount::{format_amount, format_percent, parse_amount, parse_whole_amount, parse_year};
pub use business::{BusinessTaxCalculator, BusinessTaxInput, BusinessTaxReason, BusinessTaxResult};
pub use personal::{PersonalTaxCalculator, PersonalTaxResult};
