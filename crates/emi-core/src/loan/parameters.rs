use serde::{Deserialize, Serialize};

use crate::error::EmiError;
use crate::types::{Money, Rate};
use crate::EmiResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const MONTHS_PER_YEAR: u32 = 12;

/// Initial and reset-state loan amount.
pub const DEFAULT_PRINCIPAL: Money = 500_000.0;
/// Initial and reset-state nominal annual rate, in percent.
pub const DEFAULT_ANNUAL_RATE_PERCENT: f64 = 8.5;
/// Initial and reset-state tenure, in years.
pub const DEFAULT_TERM_YEARS: u32 = 20;

// ---------------------------------------------------------------------------
// LoanParameters
// ---------------------------------------------------------------------------

/// Validated inputs for a single EMI calculation.
///
/// Only obtainable through [`LoanParameters::new`] (or deserialisation, which
/// runs the same checks), so every instance satisfies `principal > 0`,
/// `annual_rate_percent >= 0` and `term_years > 0`, all finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLoanParameters")]
pub struct LoanParameters {
    principal: Money,
    annual_rate_percent: f64,
    term_years: u32,
}

#[derive(Deserialize)]
struct RawLoanParameters {
    principal: Money,
    annual_rate_percent: f64,
    term_years: u32,
}

impl TryFrom<RawLoanParameters> for LoanParameters {
    type Error = EmiError;

    fn try_from(raw: RawLoanParameters) -> Result<Self, Self::Error> {
        LoanParameters::new(raw.principal, raw.annual_rate_percent, raw.term_years)
    }
}

impl LoanParameters {
    pub fn new(principal: Money, annual_rate_percent: f64, term_years: u32) -> EmiResult<Self> {
        if !principal.is_finite() {
            return Err(EmiError::invalid(
                "principal",
                "Principal must be a finite number",
            ));
        }
        if principal <= 0.0 {
            return Err(EmiError::invalid("principal", "Principal must be positive"));
        }
        if !annual_rate_percent.is_finite() {
            return Err(EmiError::invalid(
                "annual_rate_percent",
                "Interest rate must be a finite number",
            ));
        }
        if annual_rate_percent < 0.0 {
            return Err(EmiError::invalid(
                "annual_rate_percent",
                "Interest rate cannot be negative",
            ));
        }
        if term_years == 0 {
            return Err(EmiError::invalid(
                "term_years",
                "Tenure must be at least 1 year",
            ));
        }
        if term_years.checked_mul(MONTHS_PER_YEAR).is_none() {
            return Err(EmiError::invalid(
                "term_years",
                "Tenure in months exceeds the supported range",
            ));
        }

        Ok(LoanParameters {
            principal,
            annual_rate_percent,
            term_years,
        })
    }

    /// The calculator's initial state: 5,00,000 at 8.5% over 20 years.
    ///
    /// Used for explicit resets only. Invalid input is reported, never
    /// replaced by these values.
    pub fn defaults() -> Self {
        LoanParameters {
            principal: DEFAULT_PRINCIPAL,
            annual_rate_percent: DEFAULT_ANNUAL_RATE_PERCENT,
            term_years: DEFAULT_TERM_YEARS,
        }
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn annual_rate_percent(&self) -> f64 {
        self.annual_rate_percent
    }

    pub fn term_years(&self) -> u32 {
        self.term_years
    }

    pub fn monthly_rate(&self) -> Rate {
        monthly_rate(self.annual_rate_percent)
    }

    pub fn term_months(&self) -> u32 {
        self.term_years * MONTHS_PER_YEAR
    }
}

/// Nominal annual percentage to periodic (monthly) decimal rate.
pub fn monthly_rate(annual_rate_percent: f64) -> Rate {
    annual_rate_percent / 12.0 / 100.0
}

/// Number of monthly periods in a tenure, saturating at `u32::MAX`.
pub fn term_months(term_years: u32) -> u32 {
    term_years.saturating_mul(MONTHS_PER_YEAR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_parameters() {
        let p = LoanParameters::new(500_000.0, 8.5, 20).unwrap();
        assert_eq!(p.principal(), 500_000.0);
        assert_eq!(p.term_months(), 240);
        assert!((p.monthly_rate() - 0.007_083_333).abs() < 1e-9);
    }

    #[test]
    fn test_zero_rate_allowed() {
        assert!(LoanParameters::new(1000.0, 0.0, 1).is_ok());
    }

    #[test]
    fn test_negative_principal_rejected() {
        let err = LoanParameters::new(-100.0, 8.5, 20).unwrap_err();
        assert_eq!(err.field(), Some("principal"));
    }

    #[test]
    fn test_zero_principal_rejected() {
        let err = LoanParameters::new(0.0, 8.5, 20).unwrap_err();
        assert_eq!(err.field(), Some("principal"));
    }

    #[test]
    fn test_nan_inputs_rejected() {
        assert_eq!(
            LoanParameters::new(f64::NAN, 8.5, 20).unwrap_err().field(),
            Some("principal")
        );
        assert_eq!(
            LoanParameters::new(1000.0, f64::INFINITY, 20)
                .unwrap_err()
                .field(),
            Some("annual_rate_percent")
        );
    }

    #[test]
    fn test_negative_rate_rejected() {
        let err = LoanParameters::new(1000.0, -0.5, 20).unwrap_err();
        assert_eq!(err.field(), Some("annual_rate_percent"));
    }

    #[test]
    fn test_zero_term_rejected() {
        let err = LoanParameters::new(1000.0, 8.5, 0).unwrap_err();
        assert_eq!(err.field(), Some("term_years"));
    }

    #[test]
    fn test_overflowing_term_rejected() {
        assert!(LoanParameters::new(1000.0, 8.5, u32::MAX).is_err());
    }

    #[test]
    fn test_deserialise_validates() {
        let ok: LoanParameters = serde_json::from_str(
            r#"{"principal": 1000, "annual_rate_percent": 5, "term_years": 2}"#,
        )
        .unwrap();
        assert_eq!(ok.term_months(), 24);

        let bad = serde_json::from_str::<LoanParameters>(
            r#"{"principal": -1, "annual_rate_percent": 5, "term_years": 2}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_defaults() {
        let d = LoanParameters::defaults();
        assert_eq!(d.principal(), 500_000.0);
        assert_eq!(d.annual_rate_percent(), 8.5);
        assert_eq!(d.term_years(), 20);
    }
}
