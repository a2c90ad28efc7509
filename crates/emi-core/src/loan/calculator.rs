use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Instant;
use tracing::debug;

use crate::error::EmiError;
use crate::loan::parameters::LoanParameters;
use crate::loan::payment::{summarise, PaymentSummary};
use crate::loan::schedule::{generate_schedule, ScheduleRow, DEFAULT_SCHEDULE_ROWS};
use crate::types::*;
use crate::EmiResult;

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// Full input for an EMI calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiInput {
    /// Amount borrowed
    pub principal: Money,
    /// Nominal annual interest rate in percent (8.5 = 8.5%)
    pub annual_rate_percent: f64,
    /// Tenure in whole years
    pub term_years: u32,
    /// Schedule rows to materialise (defaults to the first year)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rows: Option<usize>,
}

impl From<LoanParameters> for EmiInput {
    fn from(params: LoanParameters) -> Self {
        EmiInput {
            principal: params.principal(),
            annual_rate_percent: params.annual_rate_percent(),
            term_years: params.term_years(),
            max_rows: None,
        }
    }
}

impl EmiInput {
    /// Decode a JSON loan request. A missing or mistyped field is reported as
    /// `InvalidInput` naming that field rather than as a parse error.
    pub fn from_json(value: &Value) -> EmiResult<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| EmiError::invalid("input", "Loan request must be a JSON object"))?;

        let principal = number_field(obj, "principal")?;
        let annual_rate_percent = number_field(obj, "annual_rate_percent")?;
        let term_years = whole_field(obj, "term_years")?
            .ok_or_else(|| EmiError::invalid("term_years", "Field is required"))?;
        let term_years = u32::try_from(term_years)
            .map_err(|_| EmiError::invalid("term_years", "Tenure is too large"))?;
        let max_rows = whole_field(obj, "max_rows")?
            .map(usize::try_from)
            .transpose()
            .map_err(|_| EmiError::invalid("max_rows", "Row count is too large"))?;

        Ok(EmiInput {
            principal,
            annual_rate_percent,
            term_years,
            max_rows,
        })
    }

    /// Parse and decode a JSON loan request from text.
    pub fn from_json_str(json: &str) -> EmiResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json(&value)
    }
}

fn number_field(obj: &Map<String, Value>, field: &str) -> EmiResult<f64> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(EmiError::invalid(field, "Field is required")),
        Some(v) => v
            .as_f64()
            .ok_or_else(|| EmiError::invalid(field, "Must be a number")),
    }
}

/// Optional non-negative integer field.
fn whole_field(obj: &Map<String, Value>, field: &str) -> EmiResult<Option<u64>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .map(Some)
            .ok_or_else(|| EmiError::invalid(field, "Must be a whole, non-negative number")),
    }
}

/// Principal versus interest split over the life of the loan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub principal: Money,
    pub total_interest: Money,
    /// Principal as a percentage of total payments
    pub principal_share_pct: f64,
    /// Interest as a percentage of total payments
    pub interest_share_pct: f64,
}

impl PaymentBreakdown {
    pub fn new(principal: Money, total_interest: Money) -> Self {
        let total = principal + total_interest;
        let (principal_share_pct, interest_share_pct) = if total > 0.0 {
            (principal / total * 100.0, total_interest / total * 100.0)
        } else {
            (0.0, 0.0)
        };
        PaymentBreakdown {
            principal,
            total_interest,
            principal_share_pct,
            interest_share_pct,
        }
    }
}

/// Complete EMI calculation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiOutput {
    pub summary: PaymentSummary,
    pub schedule: Vec<ScheduleRow>,
    pub breakdown: PaymentBreakdown,
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Compute the EMI, the leading amortization rows and the principal/interest split.
pub fn calculate_emi(input: &EmiInput) -> EmiResult<ComputationOutput<EmiOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let params = LoanParameters::new(input.principal, input.annual_rate_percent, input.term_years)?;
    let max_rows = input.max_rows.unwrap_or(DEFAULT_SCHEDULE_ROWS);
    let rate = params.monthly_rate();

    let summary = summarise(&params)?;
    let schedule = generate_schedule(
        params.principal(),
        rate,
        summary.term_months,
        summary.periodic_payment,
        max_rows,
    )?;

    if rate == 0.0 {
        warnings.push("Zero interest rate: principal repaid in equal linear installments".into());
    }
    if let Some(row) = schedule.iter().find(|r| r.principal_component <= 0.0) {
        warnings.push(format!(
            "Period {}: installment does not reduce principal; balance is not amortising",
            row.period
        ));
    }

    let breakdown = PaymentBreakdown::new(params.principal(), summary.total_interest);

    debug!(
        principal = params.principal(),
        annual_rate_percent = params.annual_rate_percent(),
        term_months = summary.term_months,
        emi = summary.periodic_payment,
        rows = schedule.len(),
        "calculated EMI"
    );

    let output = EmiOutput {
        summary,
        schedule,
        breakdown,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment (EMI) amortization",
        &serde_json::json!({
            "principal": params.principal(),
            "annual_rate_percent": params.annual_rate_percent(),
            "monthly_rate": rate,
            "term_years": params.term_years(),
            "term_months": summary.term_months,
            "max_rows": max_rows,
        }),
        warnings,
        elapsed,
        output,
    ))
}
