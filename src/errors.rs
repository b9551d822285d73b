//! Unified error types for the partition manager.
//!
//! Budget and lookup failures are ordinary values: every mutation that can be
//! rejected returns `Result<Sector>` and leaves the store untouched on `Err`.

use serde::Serialize;
use thiserror::Error;

/// Sector identifier, unique within a store.
pub type SectorId = u32;

/// Everything that can go wrong in the partition manager.
#[derive(Debug, Error)]
pub enum Error {
    /// A new sector would push the total past 100
    #[error("Total percentage cannot exceed 100%. Remaining: {limit}%")]
    BudgetExceeded {
        /// Budget still unallocated
        limit: f64,
    },

    /// An update would push the total past 100
    #[error("Total percentage cannot exceed 100%. Maximum for sector {id}: {limit}%")]
    SectorBudgetExceeded {
        /// Sector being updated
        id: SectorId,
        /// Largest percentage this sector may take
        limit: f64,
    },

    /// No sector carries this id
    #[error("Sector {id} not found")]
    SectorNotFound {
        /// Requested id
        id: SectorId,
    },

    /// Percentage is not a finite number in `[0, 100]`
    #[error("Percentage must be a number between 0 and 100, got {value}")]
    InvalidPercentage {
        /// Rejected value
        value: f64,
    },

    /// Configuration could not be read, parsed or applied
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// No async runtime available for deferred work
    #[error("Runtime error: {message}")]
    Runtime {
        /// What went wrong
        message: String,
    },

    /// Reading or writing failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

/// Record form of a mutation result, for collaborators that display a
/// success flag and an optional message instead of matching on `Error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationOutcome {
    /// Whether the mutation committed
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Error message on failure
    pub message: Option<String>,
}

impl<T> From<&Result<T>> for MutationOutcome {
    fn from(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Self {
                success: true,
                message: None,
            },
            Err(e) => Self {
                success: false,
                message: Some(e.to_string()),
            },
        }
    }
}
