//! Error types for the analytics core

use thiserror::Error;

/// Caller mistakes detected by the analytics core.
///
/// Numeric edge cases (bad loads, too little data) are not errors and never
/// show up here; they resolve to safe defaults instead.
#[derive(Debug, Error, PartialEq)]
pub enum AnalyticsError {
    #[error("invalid {field} timestamp: {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("range must end after it starts, got {start} .. {end}")]
    NonPositiveWindow { start: String, end: String },

    #[error("planned sessions per week must be positive, got {planned}")]
    NonPositivePlan { planned: u32 },
}
