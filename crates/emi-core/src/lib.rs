pub mod error;
pub mod loan;
pub mod types;

#[cfg(feature = "presentation")]
pub mod presentation;

pub use error::EmiError;
pub use types::*;

/// Standard result type for all EMI operations
pub type EmiResult<T> = Result<T, EmiError>;
