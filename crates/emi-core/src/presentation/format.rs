//! Display formatting for calculator results.
//!
//! Raw figures stay in `f64`; these helpers produce rounded `Decimal` copies
//! and strings for headline figures and table cells. Grouping follows the
//! Indian convention (last three digits, then pairs): 10,42,061.23.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::loan::{PaymentSummary, ScheduleRow};

pub const CURRENCY_SYMBOL: &str = "₹";

/// Decimal places shown for headline figures and table cells.
pub const DISPLAY_DECIMALS: u32 = 2;

/// Round `value` half away from zero to `dp` places. `None` for NaN, infinities
/// and magnitudes beyond the decimal range.
pub fn round_for_display(value: f64, dp: u32) -> Option<Decimal> {
    Decimal::from_f64_retain(value).map(|d| {
        let mut rounded = d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
        if rounded.is_zero() {
            rounded.set_sign_positive(true);
        }
        rounded
    })
}

/// Indian digit grouping with at most `max_fraction_digits` decimals.
/// Trailing fractional zeros are dropped.
pub fn format_indian(value: f64, max_fraction_digits: u32) -> String {
    let Some(rounded) = round_for_display(value, max_fraction_digits) else {
        return value.to_string();
    };
    let text = rounded.normalize().to_string();

    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (digits, None),
    };

    let mut out = String::with_capacity(text.len() + 8);
    if negative {
        out.push('-');
    }
    out.push_str(&group_indian(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_indian(int_part: &str) -> String {
    if int_part.len() <= 3 {
        return int_part.to_string();
    }

    let (head, tail) = int_part.split_at(int_part.len() - 3);
    let mut groups = Vec::with_capacity(head.len() / 2 + 1);
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Fixed two-decimal rendering without grouping, as used in schedule cells.
pub fn format_fixed(value: f64) -> String {
    match round_for_display(value, DISPLAY_DECIMALS) {
        Some(mut d) => {
            d.rescale(DISPLAY_DECIMALS);
            d.to_string()
        }
        None => format!("{value:.2}"),
    }
}

/// Headline currency figure: `₹ 4,339.12`.
pub fn format_currency(value: f64) -> String {
    format!("{CURRENCY_SYMBOL} {}", format_indian(value, DISPLAY_DECIMALS))
}

pub fn format_months(months: u32) -> String {
    format!("{months} Months")
}

// ---------------------------------------------------------------------------
// Display views
// ---------------------------------------------------------------------------

/// Formatted headline figures. Built from a summary, never written back to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplaySummary {
    pub emi: String,
    pub total_interest: String,
    pub total_payment: String,
    pub loan_tenure: String,
}

impl DisplaySummary {
    pub fn from_summary(summary: &PaymentSummary) -> Self {
        DisplaySummary {
            emi: format_currency(summary.periodic_payment),
            total_interest: format_currency(summary.total_interest),
            total_payment: format_currency(summary.total_payment),
            loan_tenure: format_months(summary.term_months),
        }
    }
}

/// One formatted amortization table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub month: u32,
    pub emi: String,
    pub principal: String,
    pub interest: String,
    pub balance: String,
}

impl DisplayRow {
    pub fn from_row(row: &ScheduleRow) -> Self {
        let cell = |v: f64| format!("{CURRENCY_SYMBOL} {}", format_fixed(v));
        DisplayRow {
            month: row.period,
            emi: cell(row.payment),
            principal: cell(row.principal_component),
            interest: cell(row.interest_component),
            balance: cell(row.remaining_balance),
        }
    }
}

pub fn display_schedule(rows: &[ScheduleRow]) -> Vec<DisplayRow> {
    rows.iter().map(DisplayRow::from_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_for_display(2.5, 0), Some(dec!(3)));
        assert_eq!(round_for_display(-2.5, 0), Some(dec!(-3)));
        assert_eq!(round_for_display(4339.116166827671, 2), Some(dec!(4339.12)));
    }

    #[test]
    fn test_round_non_finite() {
        assert_eq!(round_for_display(f64::NAN, 2), None);
        assert_eq!(round_for_display(f64::INFINITY, 2), None);
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_indian(500_000.0, 2), "5,00,000");
        assert_eq!(format_indian(1_041_387.880038641, 2), "10,41,387.88");
        assert_eq!(format_indian(123.0, 2), "123");
        assert_eq!(format_indian(1234.5, 2), "1,234.5");
        assert_eq!(format_indian(123_456_789.0, 2), "12,34,56,789");
        assert_eq!(format_indian(-98_765.4321, 2), "-98,765.43");
    }

    #[test]
    fn test_fixed_two_decimals() {
        assert_eq!(format_fixed(10_000.0), "10000.00");
        assert_eq!(format_fixed(797.4495001610039), "797.45");
        assert_eq!(format_fixed(-0.001), "0.00");
    }

    #[test]
    fn test_currency_and_months() {
        assert_eq!(format_currency(4339.116166827671), "₹ 4,339.12");
        assert_eq!(format_months(240), "240 Months");
    }
}
