//! Integration tests that run the calculators against reference data fixtures.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::calculations::{
    BusinessTaxCalculator, BusinessTaxInput, BusinessTaxReason, PersonalTaxCalculator,
    PersonalTaxResult,
};
use tax_core::sources::ScheduleBracketSource;
use tax_core::{
    BandSchedule, BracketSource, DeductionInputs, IncomeInputs, PersonalTaxPayload, ProfitAnswer,
    ReferenceSnapshot, RevenueRange,
};
use tax_data::{
    BandScheduleLoader, JsonFileCatalog, JsonFileConfiguration, decode_configuration,
    decode_industries,
};

const BANDS_CSV: &str = include_str!("../test-data/personal_bands.csv");
const INDUSTRIES_JSON: &str = include_str!("../test-data/industries.json");
const CONFIGURATION_JSON: &str = include_str!("../test-data/configuration.json");

const YEAR: i32 = 2026;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test-data")
        .join(name)
}

async fn load_snapshot() -> ReferenceSnapshot {
    let catalog = JsonFileCatalog::new(fixture("industries.json"));
    let configuration = JsonFileConfiguration::new(fixture("configuration.json"));
    ReferenceSnapshot::load(&catalog, &configuration).await
}

fn business_input<'a>(
    snapshot: &'a ReferenceSnapshot,
    industry_id: &str,
) -> BusinessTaxInput<'a> {
    BusinessTaxInput {
        industry: snapshot.industry(industry_id),
        configuration: snapshot.configuration(),
        made_profit: ProfitAnswer::Yes,
        revenue_range: RevenueRange::Above,
        net_profit: dec!(12000000),
        incorporation_year: None,
    }
}

// =============================================================================
// Reference data loading
// =============================================================================

#[test]
fn test_csv_fixture_matches_builtin_schedule() {
    let records = BandScheduleLoader::parse(BANDS_CSV.as_bytes()).expect("Failed to parse CSV");

    let schedule = BandScheduleLoader::into_schedule(records).expect("Invalid schedule");

    assert_eq!(schedule, BandSchedule::nigeria_tax_act_2025());
}

#[test]
fn test_load_schedule_from_file() {
    let schedule =
        BandScheduleLoader::load_file(&fixture("personal_bands.csv")).expect("Failed to load");

    assert_eq!(schedule.bands().len(), 6);
    assert_eq!(schedule.bands()[0].capacity, Some(dec!(800000)));
    assert_eq!(schedule.total_capacity(), None);
}

#[test]
fn test_decode_fixtures() {
    let industries = decode_industries(INDUSTRIES_JSON).expect("Failed to decode industries");
    let configuration =
        decode_configuration(CONFIGURATION_JSON).expect("Failed to decode configuration");

    assert_eq!(industries.len(), 3);
    assert_eq!(industries[1].rules().exemption_period_years, 5);
    assert!(!industries[2].rules().requires_income_tax);
    assert_eq!(configuration.tax_rate, dec!(0.25));
    assert_eq!(configuration.taxable_amount_threshold, dec!(10000000));
}

#[tokio::test]
async fn test_snapshot_loads_from_files() {
    let snapshot = load_snapshot().await;

    assert_eq!(snapshot.industries().len(), 3);
    assert_eq!(snapshot.threshold(), dec!(10000000));
    assert_eq!(snapshot.availability_error(), None);
}

#[tokio::test]
async fn test_missing_files_leave_snapshot_unavailable() {
    let catalog = JsonFileCatalog::new(fixture("missing.json"));
    let configuration = JsonFileConfiguration::new(fixture("missing.json"));

    let snapshot = ReferenceSnapshot::load(&catalog, &configuration).await;
    let result = BusinessTaxCalculator::new(YEAR).calculate(&business_input(&snapshot, "manufacturing"));

    assert_eq!(snapshot.failures().len(), 2);
    assert!(snapshot.availability_error().is_some());
    assert_eq!(result.reason, BusinessTaxReason::NoProfit);
    assert_eq!(result.annual_tax, Decimal::ZERO);
}

// =============================================================================
// Business tax scenarios
// =============================================================================

#[tokio::test]
async fn test_taxable_company() {
    let snapshot = load_snapshot().await;

    let result = BusinessTaxCalculator::new(YEAR).calculate(&business_input(&snapshot, "manufacturing"));

    assert_eq!(result.reason, BusinessTaxReason::Taxable);
    assert_eq!(result.annual_tax, dec!(3000000));
    assert_eq!(result.monthly_tax, dec!(250000));
    assert_eq!(result.effective_rate, dec!(25));
}

#[tokio::test]
async fn test_revenue_below_threshold() {
    let snapshot = load_snapshot().await;
    let input = BusinessTaxInput {
        revenue_range: RevenueRange::Below,
        ..business_input(&snapshot, "manufacturing")
    };

    let result = BusinessTaxCalculator::new(YEAR).calculate(&input);

    assert_eq!(result.reason, BusinessTaxReason::BelowThreshold);
    assert_eq!(result.annual_tax, Decimal::ZERO);
}

#[tokio::test]
async fn test_exemption_includes_final_year() {
    let snapshot = load_snapshot().await;
    let input = BusinessTaxInput {
        incorporation_year: Some(YEAR - 5),
        ..business_input(&snapshot, "agriculture")
    };

    let result = BusinessTaxCalculator::new(YEAR).calculate(&input);

    assert_eq!(result.reason, BusinessTaxReason::ExemptionApplies);
    assert!(!result.is_taxable);
}

#[tokio::test]
async fn test_exemption_expired() {
    let snapshot = load_snapshot().await;
    let input = BusinessTaxInput {
        incorporation_year: Some(YEAR - 6),
        ..business_input(&snapshot, "agriculture")
    };

    let result = BusinessTaxCalculator::new(YEAR).calculate(&input);

    assert_eq!(result.reason, BusinessTaxReason::Taxable);
    assert_eq!(result.annual_tax, dec!(3000000));
}

#[tokio::test]
async fn test_industry_without_income_tax_ignores_answers() {
    let snapshot = load_snapshot().await;
    let calculator = BusinessTaxCalculator::new(YEAR);

    for (made_profit, revenue_range) in [
        (ProfitAnswer::Yes, RevenueRange::Above),
        (ProfitAnswer::No, RevenueRange::Below),
        (ProfitAnswer::Unset, RevenueRange::Unset),
    ] {
        let input = BusinessTaxInput {
            made_profit,
            revenue_range,
            ..business_input(&snapshot, "non-profit")
        };

        assert_eq!(calculator.calculate(&input).reason, BusinessTaxReason::NoIncomeTax);
    }
}

// =============================================================================
// Personal tax scenarios
// =============================================================================

#[tokio::test]
async fn test_schedule_source_agrees_with_loaded_schedule() {
    let schedule =
        BandScheduleLoader::load_file(&fixture("personal_bands.csv")).expect("Failed to load");
    let source = ScheduleBracketSource::new(schedule.clone());
    let payload = PersonalTaxPayload {
        income: IncomeInputs {
            salary: dec!(9000000),
            business: dec!(1500000),
            rental: dec!(1000000),
            investment: dec!(300000),
            other: dec!(200000),
        },
        deductions: DeductionInputs {
            rent: dec!(500000),
            pension: dec!(800000),
            ..Default::default()
        },
    };

    let bands = source
        .compute_personal_bands(&payload)
        .await
        .expect("Failed to compute bands");
    let from_source = PersonalTaxResult::from_bands(bands, &payload.income, &payload.deductions);
    let local = PersonalTaxCalculator::new(&schedule).calculate(&payload.income, &payload.deductions);

    assert_eq!(from_source, local);
    assert_eq!(local.annual_tax, dec!(1716000));
}

#[test]
fn test_zero_income_has_no_tax() {
    let schedule = BandSchedule::nigeria_tax_act_2025();

    let result = PersonalTaxCalculator::new(&schedule)
        .calculate(&IncomeInputs::default(), &DeductionInputs::default());

    assert_eq!(result.gross_income, Decimal::ZERO);
    assert_eq!(result.effective_rate, Decimal::ZERO);
    assert_eq!(result.annual_tax, Decimal::ZERO);
}
