use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use tax_cli::app::{BusinessRequest, Estimator};
use tax_cli::config::Config;
use tax_cli::logging;
use tax_core::calculations::{parse_amount, parse_whole_amount, parse_year};
use tax_core::{DeductionInputs, IncomeInputs, PersonalTaxPayload, ProfitAnswer, RevenueRange};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Nigerian tax estimator for the Nigeria Tax Act 2025.
///
/// Estimates personal income tax on a progressive band schedule and company
/// income tax on net profit. Amounts accept `₦` and thousands separators.
#[derive(Debug, Parser)]
struct Cli {
    /// TOML config file with reference data paths and logging settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Band schedule CSV, overriding the config file.
    #[arg(long, global = true)]
    bands: Option<PathBuf>,

    /// Industry catalog JSON, overriding the config file.
    #[arg(long, global = true)]
    industries: Option<PathBuf>,

    /// Company tax configuration JSON, overriding the config file.
    #[arg(long = "tax-config", global = true)]
    tax_config: Option<PathBuf>,

    /// Log filter, overriding the config file. `RUST_LOG` still wins.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Personal income tax (PAYE) for individuals and business names.
    Personal(PersonalArgs),
    /// Company income tax for limited liability companies.
    Business(BusinessArgs),
    /// List the industries a company can be registered under.
    Industries,
}

#[derive(Debug, Args)]
struct PersonalArgs {
    #[arg(long, default_value = "")]
    salary: String,
    #[arg(long, default_value = "")]
    business: String,
    #[arg(long, default_value = "")]
    rental: String,
    #[arg(long, default_value = "")]
    investment: String,
    #[arg(long, default_value = "")]
    other: String,

    /// Annual rent paid.
    #[arg(long, default_value = "")]
    rent: String,
    #[arg(long, default_value = "")]
    pension: String,
    #[arg(long, default_value = "")]
    nhf: String,
    #[arg(long, default_value = "")]
    life_insurance: String,
    #[arg(long, default_value = "")]
    nhis: String,
    #[arg(long, default_value = "")]
    gratuity: String,
}

impl PersonalArgs {
    fn payload(&self) -> PersonalTaxPayload {
        PersonalTaxPayload {
            income: IncomeInputs {
                salary: parse_whole_amount(&self.salary),
                business: parse_whole_amount(&self.business),
                rental: parse_whole_amount(&self.rental),
                investment: parse_whole_amount(&self.investment),
                other: parse_whole_amount(&self.other),
            },
            deductions: DeductionInputs {
                rent: parse_whole_amount(&self.rent),
                pension: parse_whole_amount(&self.pension),
                nhf: parse_whole_amount(&self.nhf),
                life_insurance: parse_whole_amount(&self.life_insurance),
                nhis_premium: parse_whole_amount(&self.nhis),
                gratuity: parse_whole_amount(&self.gratuity),
            },
        }
    }
}

#[derive(Debug, Args)]
struct BusinessArgs {
    /// Industry id, as listed by `industries`.
    #[arg(long)]
    industry: Option<String>,

    /// Did the business make a profit last financial year? (`yes` or `no`)
    #[arg(long, default_value = "")]
    made_profit: String,

    /// Last year's revenue relative to the threshold (`below` or `above`).
    #[arg(long, default_value = "", conflicts_with = "revenue")]
    revenue_range: String,

    /// Last year's revenue; classified against the configured threshold.
    #[arg(long)]
    revenue: Option<String>,

    #[arg(long, default_value = "")]
    net_profit: String,

    /// Year of incorporation; only its leading digits are read.
    #[arg(long, default_value = "")]
    incorporation_year: String,
}

impl BusinessArgs {
    fn request(&self) -> BusinessRequest {
        BusinessRequest {
            industry: self.industry.clone(),
            made_profit: ProfitAnswer::parse(&self.made_profit),
            revenue_range: RevenueRange::parse(&self.revenue_range),
            revenue: self.revenue.as_deref().map(parse_amount),
            net_profit: parse_amount(&self.net_profit),
            incorporation_year: parse_year(&self.incorporation_year),
        }
    }
}

fn print<T: Serialize + std::fmt::Display>(
    report: &T,
    json: bool,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if cli.bands.is_some() {
        config.reference.bands = cli.bands.clone();
    }
    if cli.industries.is_some() {
        config.reference.industries = cli.industries.clone();
    }
    if cli.tax_config.is_some() {
        config.reference.configuration = cli.tax_config.clone();
    }

    let level = cli.log_level.as_deref().or(config.logging.level.as_deref());
    logging::init_logging(level, config.logging.file.as_deref())?;
    debug!(?config, "configuration resolved");

    let estimator = Estimator::load(&config.reference)
        .await
        .context("loading reference data")?;

    match &cli.command {
        Command::Personal(args) => {
            let report = estimator.personal(args.payload()).await?;
            print(&report, cli.json)
        }
        Command::Business(args) => {
            let report = estimator.business(&args.request())?;
            print(&report, cli.json)
        }
        Command::Industries => print(&estimator.industries(), cli.json),
    }
}
