//! Logging utilities for storage operations

pub mod log;

// Re-export commonly used functions for convenience
pub use self::log::{log_operation_complete, log_operation_start, log_skipped_record};
