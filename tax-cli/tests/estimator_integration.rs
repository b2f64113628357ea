//! Loads the sample config shipped at the workspace root and runs each command
//! end-to-end against the files it points at.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_cli::app::{BusinessRequest, Estimator};
use tax_cli::config::{Config, ReferenceConfig};
use tax_core::calculations::BusinessTaxReason;
use tax_core::{DeductionInputs, IncomeInputs, PersonalTaxPayload, ProfitAnswer};

fn sample_config() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("tax-estimator.toml")
}

async fn sample_estimator() -> Estimator {
    let config = Config::load(&sample_config()).expect("sample config should load");
    Estimator::load(&config.reference)
        .await
        .expect("sample reference data should load")
}

#[tokio::test]
async fn test_sample_data_loads_cleanly() {
    let estimator = sample_estimator().await;

    assert_eq!(estimator.snapshot().availability_error(), None);
    assert_eq!(estimator.snapshot().industries().len(), 5);
    assert_eq!(estimator.snapshot().threshold(), dec!(10000000));
}

#[tokio::test]
async fn test_personal_estimate() {
    let estimator = sample_estimator().await;
    let payload = PersonalTaxPayload {
        income: IncomeInputs {
            salary: dec!(5000000),
            ..Default::default()
        },
        deductions: DeductionInputs::default(),
    };

    let report = estimator.personal(payload).await.unwrap();

    assert_eq!(report.result.annual_tax, dec!(690000));
    assert_eq!(report.result.monthly_tax, dec!(57500));
}

#[tokio::test]
async fn test_business_estimate_from_revenue_figure() {
    let estimator = sample_estimator().await;
    let request = BusinessRequest {
        industry: Some("manufacturing".to_string()),
        made_profit: ProfitAnswer::Yes,
        revenue: Some(dec!(80000000)),
        net_profit: dec!(12000000),
        ..Default::default()
    };

    let report = estimator.business(&request).unwrap();

    assert_eq!(report.result.reason, BusinessTaxReason::Taxable);
    assert_eq!(report.result.annual_tax, dec!(3000000));
}

#[tokio::test]
async fn test_exempt_industry() {
    let estimator = sample_estimator().await;
    let request = BusinessRequest {
        industry: Some("non-profit".to_string()),
        made_profit: ProfitAnswer::Yes,
        revenue: Some(dec!(80000000)),
        net_profit: dec!(12000000),
        ..Default::default()
    };

    let report = estimator.business(&request).unwrap();

    assert_eq!(report.result.reason, BusinessTaxReason::NoIncomeTax);
    assert!(report.to_string().contains("exempt from Company Income Tax"));
}

#[tokio::test]
async fn test_no_reference_paths_use_builtin_defaults() {
    let estimator = Estimator::load(&ReferenceConfig::default()).await.unwrap();

    assert!(estimator.snapshot().industries().is_empty());
    assert_eq!(estimator.snapshot().availability_error(), None);
    assert_eq!(estimator.industries().to_string(), "No industries available.\n");
}

#[tokio::test]
async fn test_bad_band_file_is_an_error() {
    let reference = ReferenceConfig {
        bands: Some(PathBuf::from("does/not/exist.csv")),
        ..Default::default()
    };

    let result = Estimator::load(&reference).await;

    assert!(result.is_err());
}
