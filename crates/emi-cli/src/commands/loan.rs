use clap::Args;
use serde_json::{json, Value};
use tracing::{debug, warn};

use emi_core::loan::{self, EmiInput};
use emi_core::presentation::chart::ChartDataset;
use emi_core::presentation::DisplaySummary;

use crate::config::Settings;
use crate::input;

/// Arguments shared by every loan command
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long, alias = "amount")]
    pub principal: Option<f64>,

    /// Annual interest rate in percent (e.g. 8.5)
    #[arg(long, alias = "interest-rate")]
    pub rate: Option<f64>,

    /// Tenure in whole years
    #[arg(long, alias = "years")]
    pub tenure: Option<u32>,

    /// Amortization rows to include (default from config, normally 12)
    #[arg(long)]
    pub max_rows: Option<usize>,
}

/// Build the request from `--input`, flags or piped JSON, in that order.
/// Stdin is only read when neither a file nor `--principal` was given.
fn resolve_input(args: LoanArgs, settings: &Settings) -> Result<EmiInput, Box<dyn std::error::Error>> {
    let mut emi_input = if let Some(ref path) = args.input {
        EmiInput::from_json(&input::file::read_json_value(path)?)?
    } else if let Some(principal) = args.principal {
        let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
        let tenure = args
            .tenure
            .ok_or("--tenure is required (or provide --input)")?;

        EmiInput {
            principal,
            annual_rate_percent: rate,
            term_years: tenure,
            max_rows: None,
        }
    } else if let Some(data) = input::stdin::read_stdin()? {
        EmiInput::from_json(&data)?
    } else {
        return Err("--principal is required (or provide --input or JSON on stdin)".into());
    };

    if args.max_rows.is_some() {
        emi_input.max_rows = args.max_rows;
    }
    if emi_input.max_rows.is_none() {
        emi_input.max_rows = Some(settings.max_rows);
    }

    debug!(?emi_input, "resolved loan input");
    Ok(emi_input)
}

fn calculate(
    args: LoanArgs,
    settings: &Settings,
) -> Result<emi_core::ComputationOutput<loan::EmiOutput>, Box<dyn std::error::Error>> {
    let emi_input = resolve_input(args, settings)?;
    let output = loan::calculate_emi(&emi_input)?;
    for w in &output.warnings {
        warn!("{w}");
    }
    Ok(output)
}

pub fn run_calculate(args: LoanArgs, settings: &Settings) -> Result<Value, Box<dyn std::error::Error>> {
    let output = calculate(args, settings)?;
    Ok(serde_json::to_value(output)?)
}

pub fn run_schedule(args: LoanArgs, settings: &Settings) -> Result<Value, Box<dyn std::error::Error>> {
    let output = calculate(args, settings)?;
    Ok(serde_json::to_value(output.result.schedule)?)
}

pub fn run_summary(args: LoanArgs, settings: &Settings) -> Result<Value, Box<dyn std::error::Error>> {
    let output = calculate(args, settings)?;
    let display = DisplaySummary::from_summary(&output.result.summary);
    let chart = ChartDataset::from_breakdown(&output.result.breakdown);

    Ok(json!({
        "result": {
            "emi": display.emi,
            "total_interest": display.total_interest,
            "total_payment": display.total_payment,
            "loan_tenure": display.loan_tenure,
            "principal_slice": chart.tooltip_label(0),
            "interest_slice": chart.tooltip_label(1),
        },
        "warnings": output.warnings,
        "methodology": output.methodology,
    }))
}

pub fn run_defaults(settings: &Settings) -> Result<Value, Box<dyn std::error::Error>> {
    let params = settings.default_parameters()?;
    Ok(json!({
        "result": {
            "principal": params.principal(),
            "annual_rate_percent": params.annual_rate_percent(),
            "term_years": params.term_years(),
            "max_rows": settings.max_rows,
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn flags(principal: f64, rate: f64, tenure: u32) -> LoanArgs {
        LoanArgs {
            input: None,
            principal: Some(principal),
            rate: Some(rate),
            tenure: Some(tenure),
            max_rows: None,
        }
    }

    #[test]
    fn test_summary_from_flags() {
        let v = run_summary(flags(500_000.0, 8.5, 20), &Settings::default()).unwrap();
        assert_eq!(v["result"]["emi"], "₹ 4,339.12");
        assert_eq!(v["result"]["loan_tenure"], "240 Months");
    }

    #[test]
    fn test_schedule_uses_configured_rows() {
        let settings = Settings {
            max_rows: 6,
            ..Settings::default()
        };
        let v = run_schedule(flags(100_000.0, 10.0, 5), &settings).unwrap();
        assert_eq!(v.as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_max_rows_flag_wins_over_config() {
        let mut args = flags(100_000.0, 10.0, 5);
        args.max_rows = Some(2);
        let v = run_schedule(args, &Settings::default()).unwrap();
        assert_eq!(v.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_principal_reported() {
        let err = run_calculate(flags(-100.0, 8.5, 20), &Settings::default()).unwrap_err();
        assert!(err.to_string().contains("principal"));
    }

    #[test]
    fn test_input_file_missing_field_is_named() {
        let path = std::env::temp_dir().join(format!("emi-request-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"principal": 500000, "annual_rate_percent": 8.5}"#).unwrap();
        let args = LoanArgs {
            input: Some(path.display().to_string()),
            principal: None,
            rate: None,
            tenure: None,
            max_rows: None,
        };
        let err = run_calculate(args, &Settings::default()).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(err.to_string().contains("term_years"), "{err}");
    }

    #[test]
    fn test_defaults_command() {
        let v = run_defaults(&Settings::default()).unwrap();
        assert_eq!(v["result"]["principal"], 500_000.0);
        assert_eq!(v["result"]["term_years"], 20);
        assert_eq!(v["result"]["max_rows"], 12);
    }
}
