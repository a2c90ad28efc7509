//! Level-payment loan amortization.
//!
//! Turns a principal, a nominal annual rate and a tenure into the equated
//! monthly installment (EMI), loan totals and the leading rows of the
//! amortization schedule. Everything here is a pure function of its inputs.

pub mod calculator;
pub mod parameters;
pub mod payment;
pub mod schedule;

pub use calculator::{calculate_emi, EmiInput, EmiOutput, PaymentBreakdown};
pub use parameters::{monthly_rate, term_months, LoanParameters};
pub use payment::{compute_payment, level_payment, summarise, PaymentSummary};
pub use schedule::{generate_schedule, Amortization, ScheduleRow, DEFAULT_SCHEDULE_ROWS};
