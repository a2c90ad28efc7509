use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use emi_core::loan;
use emi_core::presentation::{format, ChartDataset, DisplaySummary};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    let input = loan::EmiInput::from_json_str(&input_json).map_err(to_napi_error)?;
    let output = loan::calculate_emi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compute_payment(input_json: String) -> NapiResult<String> {
    let input = loan::EmiInput::from_json_str(&input_json).map_err(to_napi_error)?;
    let params =
        loan::LoanParameters::new(input.principal, input.annual_rate_percent, input.term_years)
            .map_err(to_napi_error)?;
    let summary = loan::summarise(&params).map_err(to_napi_error)?;
    serde_json::to_string(&summary).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct ScheduleRequest {
    principal: f64,
    monthly_rate: f64,
    months: u32,
    payment: f64,
    #[serde(default = "default_rows")]
    max_rows: usize,
}

fn default_rows() -> usize {
    loan::DEFAULT_SCHEDULE_ROWS
}

#[napi]
pub fn generate_schedule(input_json: String) -> NapiResult<String> {
    let req: ScheduleRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let rows = loan::generate_schedule(
        req.principal,
        req.monthly_rate,
        req.months,
        req.payment,
        req.max_rows,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&rows).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// Headline figures, formatted table rows and chart dataset in one call.
#[napi]
pub fn render_calculation(input_json: String) -> NapiResult<String> {
    let input = loan::EmiInput::from_json_str(&input_json).map_err(to_napi_error)?;
    let output = loan::calculate_emi(&input).map_err(to_napi_error)?;
    let result = &output.result;

    let view = serde_json::json!({
        "summary": DisplaySummary::from_summary(&result.summary),
        "rows": format::display_schedule(&result.schedule),
        "chart": ChartDataset::from_breakdown(&result.breakdown),
        "warnings": output.warnings,
    });
    serde_json::to_string(&view).map_err(to_napi_error)
}

#[napi]
pub fn format_currency(value: f64) -> String {
    format::format_currency(value)
}
