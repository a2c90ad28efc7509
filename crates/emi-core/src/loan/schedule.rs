use serde::{Deserialize, Serialize};

use crate::error::EmiError;
use crate::types::{Money, Rate};
use crate::EmiResult;

/// Rows materialised when the caller does not say otherwise: the first year.
pub const DEFAULT_SCHEDULE_ROWS: usize = 12;

/// A single period in the amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub period: u32,
    pub payment: Money,
    pub principal_component: Money,
    pub interest_component: Money,
    /// Outstanding balance after this payment, floored at zero.
    pub remaining_balance: Money,
}

/// Lazily amortises a balance forward one period at a time.
///
/// Holds no state beyond the running balance, so two iterators built from
/// the same inputs yield identical rows.
#[derive(Debug, Clone)]
pub struct Amortization {
    balance: Money,
    rate: Rate,
    payment: Money,
    period: u32,
    months: u32,
}

impl Amortization {
    pub fn new(principal: Money, monthly_rate: Rate, months: u32, payment: Money) -> Self {
        Amortization {
            balance: principal,
            rate: monthly_rate,
            payment,
            period: 0,
            months,
        }
    }
}

impl Iterator for Amortization {
    type Item = ScheduleRow;

    fn next(&mut self) -> Option<ScheduleRow> {
        if self.period >= self.months {
            return None;
        }
        self.period += 1;

        let interest_component = self.balance * self.rate;
        // Negative when the payment does not cover interest; left as-is.
        let principal_component = self.payment - interest_component;
        self.balance -= principal_component;

        Some(ScheduleRow {
            period: self.period,
            payment: self.payment,
            principal_component,
            interest_component,
            remaining_balance: self.balance.max(0.0),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.months - self.period) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Amortization {}

/// Build the first `min(max_rows, months)` rows of the amortization schedule.
pub fn generate_schedule(
    principal: Money,
    monthly_rate: Rate,
    months: u32,
    payment: Money,
    max_rows: usize,
) -> EmiResult<Vec<ScheduleRow>> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(EmiError::invalid(
            "principal",
            "Principal must be a positive finite number",
        ));
    }
    if !monthly_rate.is_finite() || monthly_rate < 0.0 {
        return Err(EmiError::invalid(
            "monthly_rate",
            "Monthly rate must be a non-negative finite number",
        ));
    }
    if months == 0 {
        return Err(EmiError::invalid("months", "Schedule needs at least 1 period"));
    }
    if !payment.is_finite() {
        return Err(EmiError::invalid("payment", "Payment must be a finite number"));
    }

    Ok(Amortization::new(principal, monthly_rate, months, payment)
        .take(max_rows)
        .collect())
}
