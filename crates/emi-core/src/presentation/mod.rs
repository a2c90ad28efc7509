//! Presentation layer for calculator front-ends.
//!
//! Formatting, the chart adapter, paired input controls and the interactive
//! session. Calls into [`crate::loan`]; the loan module never calls back.

pub mod binding;
pub mod chart;
pub mod format;
pub mod session;

pub use binding::{BoundValue, ControlView, SliderRange, ValueChange};
pub use chart::{ChartDataset, PaymentChart};
pub use format::{format_currency, format_fixed, format_indian, DisplayRow, DisplaySummary};
pub use session::{Calculation, CalculatorSession, LoanField};
