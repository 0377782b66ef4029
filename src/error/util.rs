//! Utility functions for error handling
//!
//! This module provides file helpers that attach the path and purpose to
//! any IO failure.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, TrackerError};

/// Read a file to string, treating a missing file as `None`
///
/// # Arguments
/// * `path` - The path to the file to read
/// * `purpose` - Why the file is being read (for error context)
pub fn read_optional_file(path: &Path, purpose: &str) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => {
            let context = match e.kind() {
                io::ErrorKind::PermissionDenied => {
                    "Permission denied - check file permissions".to_string()
                }
                io::ErrorKind::InvalidData => {
                    "File contains invalid UTF-8 data - cannot read as text".to_string()
                }
                _ => format!("Failed to read file for: {purpose}"),
            };
            Err(TrackerError::file(path, context, e))
        }
    }
}

/// Create (or truncate) a file for writing, creating missing parent directories
pub fn safe_create_file(path: &Path, purpose: &str) -> Result<fs::File> {
    ensure_parent_dir(path, purpose)?;

    fs::File::create(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                "Permission denied - check file permissions".to_string()
            }
            _ => format!("Failed to create file for: {purpose}"),
        };
        TrackerError::file(path, context, e)
    })
}

/// Make sure the directory a file will be written to exists
pub fn ensure_parent_dir(path: &Path, purpose: &str) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent).map_err(|e| {
                TrackerError::file(parent, format!("Failed to create directory for: {purpose}"), e)
            })
        }
        _ => Ok(()),
    }
}
