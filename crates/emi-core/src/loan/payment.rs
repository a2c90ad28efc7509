use serde::{Deserialize, Serialize};

use crate::error::EmiError;
use crate::loan::parameters::LoanParameters;
use crate::types::{Money, Rate};
use crate::EmiResult;

/// Headline figures for a level-payment loan. Values are unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub periodic_payment: Money,
    pub total_interest: Money,
    pub total_payment: Money,
    pub term_months: u32,
}

/// Compute the EMI and loan totals from raw inputs.
pub fn compute_payment(
    principal: Money,
    annual_rate_percent: f64,
    term_years: u32,
) -> EmiResult<PaymentSummary> {
    let params = LoanParameters::new(principal, annual_rate_percent, term_years)?;
    summarise(&params)
}

/// Compute the EMI and loan totals for already validated parameters.
pub fn summarise(params: &LoanParameters) -> EmiResult<PaymentSummary> {
    let months = params.term_months();
    let rate = params.monthly_rate();
    let principal = params.principal();
    let payment = level_payment(principal, rate, months);

    // Linear repayment returns exactly the principal.
    let (total_payment, total_interest) = if rate == 0.0 {
        (principal, 0.0)
    } else {
        // Rounding can dip a hair below zero at rates near zero.
        let total = payment * months as f64;
        (total, (total - principal).max(0.0))
    };

    if !payment.is_finite() || !total_payment.is_finite() {
        return Err(EmiError::invalid(
            "principal",
            "Loan totals exceed the floating-point range",
        ));
    }

    Ok(PaymentSummary {
        periodic_payment: payment,
        total_interest,
        total_payment,
        term_months: months,
    })
}

/// Level payment that amortises `principal` over `months` periods at `rate`.
///
/// `P * r * (1+r)^n / ((1+r)^n - 1)`, or `P / n` when the rate is zero.
pub fn level_payment(principal: Money, rate: Rate, months: u32) -> Money {
    let n = months as f64;
    if rate == 0.0 {
        return principal / n;
    }

    // Same formula divided through by (1+r)^n, with 1 - (1+r)^-n taken via
    // ln_1p/exp_m1 so tiny rates keep their precision. Never below
    // principal * rate, and exactly that once the growth factor overflows.
    let discount = -(-n * rate.ln_1p()).exp_m1();
    if discount == 0.0 {
        // Rate below f64 resolution around 1.0
        return principal / n;
    }

    principal * rate / discount
}
