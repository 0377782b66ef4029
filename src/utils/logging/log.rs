//! Logging utilities
//!
//! This module provides standardized logging functions for file operations.

use std::path::Path;
use std::time::Duration;

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - Path of the file being operated on
pub fn log_operation_start(operation: &str, path: &Path) {
    log::debug!("{} {}", operation, path.display());
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Past-tense description of the operation
/// * `path` - Path of the file that was operated on
/// * `items` - Number of records processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(operation: &str, path: &Path, items: usize, elapsed: Option<Duration>) {
    if let Some(duration) = elapsed {
        log::info!(
            "Successfully {} {} records with {} in {:?}",
            operation,
            items,
            path.display(),
            duration
        );
    } else {
        log::info!("Successfully {} {} records with {}", operation, items, path.display());
    }
}

/// Log a skipped input record with consistent format
///
/// # Arguments
/// * `kind` - What kind of record was skipped
/// * `line` - The raw record
/// * `reason` - Why it was skipped
pub fn log_skipped_record(kind: &str, line: &str, reason: &dyn std::fmt::Display) {
    log::warn!("Skipping {kind} data line '{line}': {reason}");
}
