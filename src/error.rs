//! Typed errors for structured inputs.
//!
//! The engine fails fast when a structured input violates its shape
//! contract, rather than silently defaulting. The one deliberate exception
//! is search candidates (see [`crate::matcher`]): platform search payloads
//! are uncontrolled upstream data, so missing candidate fields degrade to
//! empty strings instead of erroring.

use thiserror::Error;

/// A structured input failed shape validation.
///
/// Distinct from degenerate-but-valid inputs (empty candidate lists, empty
/// profiles, zero total minutes), which always produce well-defined
/// zero/empty results and never an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputShapeError {
    /// A platform reported negative listening minutes.
    #[error("platform {platform:?} reported negative minutes ({minutes})")]
    NegativeMinutes { platform: String, minutes: f64 },

    /// A weighted item carries a negative weight.
    #[error("item {name:?} on platform {platform:?} has negative weight ({weight})")]
    NegativeWeight {
        platform: String,
        name: String,
        weight: f64,
    },

    /// A weighted item has an empty (or whitespace-only) name.
    #[error("unnamed weighted item on platform {platform:?}")]
    EmptyName { platform: String },
}
