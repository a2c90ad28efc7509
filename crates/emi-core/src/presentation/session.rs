//! Interactive calculator state.
//!
//! A session owns the three bound input fields, the chart adapter and the
//! most recent result. Every edit re-runs the calculation; the newest result
//! replaces the previous one, and a rejected input leaves no result behind.

use tracing::{debug, warn};

use crate::error::EmiError;
use crate::loan::{calculate_emi, EmiInput, EmiOutput, LoanParameters, DEFAULT_SCHEDULE_ROWS};
use crate::presentation::binding::{BoundValue, SliderRange, ValueChange};
use crate::presentation::chart::PaymentChart;
use crate::presentation::format::{display_schedule, DisplayRow, DisplaySummary};
use crate::EmiResult;

pub const PRINCIPAL_RANGE: SliderRange = SliderRange::new(100_000.0, 10_000_000.0, 10_000.0);
pub const RATE_RANGE: SliderRange = SliderRange::new(0.0, 20.0, 0.1);
pub const TENURE_RANGE: SliderRange = SliderRange::new(1.0, 30.0, 1.0);

/// The calculator's input fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanField {
    Principal,
    AnnualRate,
    Tenure,
}

/// A successful calculation together with its formatted views.
#[derive(Debug, Clone)]
pub struct Calculation {
    pub output: EmiOutput,
    pub warnings: Vec<String>,
    pub summary: DisplaySummary,
    pub rows: Vec<DisplayRow>,
}

#[derive(Debug)]
pub struct CalculatorSession {
    principal: BoundValue,
    rate: BoundValue,
    tenure: BoundValue,
    max_rows: usize,
    chart: PaymentChart,
    latest: Option<Calculation>,
    last_error: Option<EmiError>,
    revision: u64,
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEDULE_ROWS)
    }
}

impl CalculatorSession {
    /// Start from the default loan and calculate immediately.
    pub fn new(max_rows: usize) -> Self {
        Self::with_parameters(LoanParameters::defaults(), max_rows)
    }

    pub fn with_parameters(params: LoanParameters, max_rows: usize) -> Self {
        let mut session = CalculatorSession {
            principal: BoundValue::new("principal", params.principal(), PRINCIPAL_RANGE),
            rate: BoundValue::new(
                "annual_rate_percent",
                params.annual_rate_percent(),
                RATE_RANGE,
            ),
            tenure: BoundValue::new("term_years", params.term_years() as f64, TENURE_RANGE),
            max_rows,
            chart: PaymentChart::new(),
            latest: None,
            last_error: None,
            revision: 0,
        };
        // Validated parameters always calculate.
        let _ = session.recalculate();
        session
    }

    pub fn field(&self, field: LoanField) -> &BoundValue {
        match field {
            LoanField::Principal => &self.principal,
            LoanField::AnnualRate => &self.rate,
            LoanField::Tenure => &self.tenure,
        }
    }

    fn field_mut(&mut self, field: LoanField) -> &mut BoundValue {
        match field {
            LoanField::Principal => &mut self.principal,
            LoanField::AnnualRate => &mut self.rate,
            LoanField::Tenure => &mut self.tenure,
        }
    }

    /// Observe edits to one field, from either of its views.
    pub fn subscribe(&mut self, field: LoanField, subscriber: impl FnMut(&ValueChange) + 'static) {
        self.field_mut(field).subscribe(subscriber);
    }

    pub fn set_text(&mut self, field: LoanField, text: impl Into<String>) -> EmiResult<&Calculation> {
        self.field_mut(field).set_text(text);
        self.recalculate()
    }

    pub fn set_slider(&mut self, field: LoanField, position: f64) -> EmiResult<&Calculation> {
        self.field_mut(field).set_slider(position);
        self.recalculate()
    }

    pub fn set_max_rows(&mut self, max_rows: usize) -> EmiResult<&Calculation> {
        self.max_rows = max_rows;
        self.recalculate()
    }

    /// Restore the default loan in both views of every field and recalculate.
    pub fn reset(&mut self) -> EmiResult<&Calculation> {
        let defaults = LoanParameters::defaults();
        self.principal.reset(defaults.principal());
        self.rate.reset(defaults.annual_rate_percent());
        self.tenure.reset(defaults.term_years() as f64);
        debug!("calculator reset to defaults");
        self.recalculate()
    }

    /// Re-read the fields and run the calculation. On failure the previous
    /// result and chart are discarded.
    pub fn recalculate(&mut self) -> EmiResult<&Calculation> {
        self.revision += 1;

        match self.read_input().and_then(|input| calculate_emi(&input)) {
            Ok(out) => {
                self.chart.render(&out.result.breakdown);
                self.last_error = None;
                let calculation = Calculation {
                    summary: DisplaySummary::from_summary(&out.result.summary),
                    rows: display_schedule(&out.result.schedule),
                    warnings: out.warnings,
                    output: out.result,
                };
                Ok(&*self.latest.insert(calculation))
            }
            Err(e) => {
                warn!(revision = self.revision, error = %e, "calculation rejected");
                self.latest = None;
                self.chart.clear();
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    fn read_input(&self) -> EmiResult<EmiInput> {
        let principal = self
            .principal
            .value()
            .ok_or_else(|| EmiError::invalid("principal", "Principal must be a number"))?;
        let annual_rate_percent = self.rate.value().ok_or_else(|| {
            EmiError::invalid("annual_rate_percent", "Interest rate must be a number")
        })?;
        let years = self
            .tenure
            .value()
            .ok_or_else(|| EmiError::invalid("term_years", "Tenure must be a number"))?;
        if years.fract() != 0.0 || years < 1.0 || years > u32::MAX as f64 {
            return Err(EmiError::invalid(
                "term_years",
                "Tenure must be a whole number of years, at least 1",
            ));
        }

        Ok(EmiInput {
            principal,
            annual_rate_percent,
            term_years: years as u32,
            max_rows: Some(self.max_rows),
        })
    }

    pub fn latest(&self) -> Option<&Calculation> {
        self.latest.as_ref()
    }

    pub fn last_error(&self) -> Option<&EmiError> {
        self.last_error.as_ref()
    }

    pub fn chart(&self) -> &PaymentChart {
        &self.chart
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    /// Number of calculations attempted so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
