use thiserror::Error;

/// Failures surfaced by the core calculators and stores.
///
/// All variants are local, recoverable conditions: the caller is expected to
/// show a message and accept new input, never to crash or retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported currency: {0}")]
    InvalidCurrency(String),

    #[error("Unknown state: {0}")]
    UnknownState(String),

    #[error("Price series is empty for the requested selection")]
    EmptySeries,

    #[error("No monthly purchase data available for {0}")]
    NoMonthlyData(String),
}
