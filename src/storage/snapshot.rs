//! JSON snapshots of the whole registry
//!
//! Unlike the CSV files a snapshot keeps reward points and group
//! back-references.

use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::util::{read_optional_file, safe_create_file};
use crate::error::{Result, TrackerError};
use crate::models::{Group, Individual};
use crate::registry::MembershipRegistry;

/// Serializable copy of the registry contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// When the snapshot was taken
    pub exported_at: DateTime<Utc>,
    /// Individuals in id order
    pub individuals: Vec<Individual>,
    /// Groups in group id order
    pub groups: Vec<Group>,
}

impl RegistrySnapshot {
    /// Copy the registry's current contents
    #[must_use]
    pub fn capture(registry: &MembershipRegistry) -> Self {
        Self {
            exported_at: Utc::now(),
            individuals: registry.individuals().to_vec(),
            groups: registry.groups().to_vec(),
        }
    }

    /// Rebuild a registry, re-checking every membership rule
    ///
    /// Back-references are rebuilt from the group member lists; entries that
    /// break a rule are skipped with a warning.
    pub fn restore(self) -> Result<MembershipRegistry> {
        let mut registry = MembershipRegistry::new();

        for individual in self.individuals {
            if let Err(e) = registry.add_individual(individual) {
                warn!("Skipping snapshot individual: {e}");
            }
        }
        for group in self.groups {
            if let Err(e) = registry.restore_group(group) {
                warn!("Skipping snapshot group: {e}");
            }
        }

        registry.check_invariants()?;
        Ok(registry)
    }
}

/// Write a snapshot of the registry as pretty-printed JSON
pub fn write_snapshot(registry: &MembershipRegistry, path: &Path) -> Result<()> {
    let file = safe_create_file(path, "writing snapshot")?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &RegistrySnapshot::capture(registry))?;
    writer.flush()?;
    info!("Snapshot written to {}", path.display());
    Ok(())
}

/// Read a snapshot written by [`write_snapshot`]
pub fn read_snapshot(path: &Path) -> Result<RegistrySnapshot> {
    let content = read_optional_file(path, "reading snapshot")?.ok_or_else(|| {
        TrackerError::file(
            path,
            "Snapshot not found",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        )
    })?;
    Ok(serde_json::from_str(&content)?)
}
