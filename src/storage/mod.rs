//! CSV storage for individuals and groups
//!
//! Individuals are stored one per line as
//! `ID,Name,Age,DailyStepGoal,WeeklyStepCount1..7` with the step counts as
//! trailing columns. Groups are stored as
//! `GroupID,GroupName,MemberIDs,WeeklyGroupGoal` with member ids joined by
//! `;`. Malformed lines are skipped with a warning and a missing file loads
//! as empty. Points and group back-references are not part of this format;
//! back-references are rebuilt from the group member lists on load, and
//! [`snapshot`] keeps everything.

pub mod snapshot;

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use itertools::Itertools;
use log::{info, warn};

use crate::config::TrackerConfig;
use crate::error::util::{read_optional_file, safe_create_file};
use crate::error::{Result, TrackerError};
use crate::models::{DAYS_PER_WEEK, Group, Individual};
use crate::registry::MembershipRegistry;
use crate::utils::logging::{log_operation_complete, log_operation_start, log_skipped_record};

/// Header line of the individuals file
pub fn individuals_header() -> String {
    let steps = (1..=DAYS_PER_WEEK).map(|day| format!("WeeklyStepCount{day}")).join(",");
    format!("ID,Name,Age,DailyStepGoal,{steps}")
}

/// Header line of the groups file
pub const GROUPS_HEADER: &str = "GroupID,GroupName,MemberIDs,WeeklyGroupGoal";

/// Field separator within a line
const FIELD_DELIMITER: char = ',';
/// Separator between member ids within the member field
const MEMBER_DELIMITER: char = ';';

/// Reject text that would split or merge records when written out
pub fn check_storable(field: &'static str, value: &str) -> Result<()> {
    if value.contains([FIELD_DELIMITER, MEMBER_DELIMITER, '\n', '\r']) {
        return Err(TrackerError::UnstorableText {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Loads and saves the registry as a pair of CSV files
#[derive(Debug, Clone)]
pub struct CsvStorage {
    /// Path of the individuals file
    individuals_path: PathBuf,
    /// Path of the groups file
    groups_path: PathBuf,
}

impl CsvStorage {
    /// Create storage over explicit file paths
    #[must_use]
    pub fn new(individuals_path: impl Into<PathBuf>, groups_path: impl Into<PathBuf>) -> Self {
        Self {
            individuals_path: individuals_path.into(),
            groups_path: groups_path.into(),
        }
    }

    /// Create storage over the files named in the configuration
    #[must_use]
    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(config.individuals_path(), config.groups_path())
    }

    /// Path of the individuals file
    #[must_use]
    pub fn individuals_path(&self) -> &Path {
        &self.individuals_path
    }

    /// Path of the groups file
    #[must_use]
    pub fn groups_path(&self) -> &Path {
        &self.groups_path
    }

    /// Build a registry from the stored files
    ///
    /// Individuals are loaded first so that group members can be attached.
    pub fn load(&self) -> Result<MembershipRegistry> {
        let mut registry = MembershipRegistry::new();
        let start = Instant::now();
        log_operation_start("Loading individuals from", &self.individuals_path);

        match read_optional_file(&self.individuals_path, "loading individuals")? {
            None => warn!(
                "Individuals CSV file '{}' not found. Starting with empty individual data.",
                self.individuals_path.display()
            ),
            Some(content) => {
                for (line_no, line) in data_lines(&content) {
                    let added = parse_individual(&self.individuals_path, line_no, line)
                        .and_then(|individual| registry.add_individual(individual));
                    if let Err(e) = added {
                        log_skipped_record("individual", line, &e);
                    }
                }
            }
        }

        log_operation_complete("loaded", &self.individuals_path, registry.individual_count(), None);

        log_operation_start("Loading groups from", &self.groups_path);
        match read_optional_file(&self.groups_path, "loading groups")? {
            None => warn!(
                "Groups CSV file '{}' not found. Starting with empty group data.",
                self.groups_path.display()
            ),
            Some(content) => {
                for (line_no, line) in data_lines(&content) {
                    let restored = parse_group(&self.groups_path, line_no, line)
                        .and_then(|group| registry.restore_group(group).map(|_| ()));
                    if let Err(e) = restored {
                        log_skipped_record("group", line, &e);
                    }
                }
            }
        }

        log_operation_complete("loaded", &self.groups_path, registry.group_count(), Some(start.elapsed()));
        info!(
            "Loaded data. Individuals: {}, Groups: {}",
            registry.individual_count(),
            registry.group_count()
        );
        Ok(registry)
    }

    /// Write both files from the registry's ordered contents
    pub fn save(&self, registry: &MembershipRegistry) -> Result<()> {
        for individual in registry.individuals() {
            check_storable("individual name", &individual.name)?;
        }
        for group in registry.groups() {
            check_storable("group id", &group.group_id)?;
            check_storable("group name", &group.group_name)?;
        }

        log_operation_start("Saving individuals to", &self.individuals_path);
        write_lines(
            &self.individuals_path,
            "saving individuals",
            &individuals_header(),
            registry.individuals().iter().map(format_individual),
        )?;
        write_lines(
            &self.groups_path,
            "saving groups",
            GROUPS_HEADER,
            registry.groups().iter().map(format_group),
        )?;
        log_operation_complete("saved", &self.individuals_path, registry.individual_count(), None);
        log_operation_complete("saved", &self.groups_path, registry.group_count(), None);
        Ok(())
    }
}

/// Non-empty lines after the header, with one-based line numbers
fn data_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .skip(1)
        .map(|(index, line)| (index + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty())
}

/// Parse one numeric field
fn parse_field<T: std::str::FromStr>(path: &Path, line: usize, name: &str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| TrackerError::Parse {
        path: path.to_path_buf(),
        line,
        reason: format!("invalid {name} '{raw}'"),
    })
}

/// Parse one individuals line
pub fn parse_individual(path: &Path, line_no: usize, line: &str) -> Result<Individual> {
    let parts: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if parts.len() < 4 {
        return Err(TrackerError::Parse {
            path: path.to_path_buf(),
            line: line_no,
            reason: format!("expected at least 4 fields, found {}", parts.len()),
        });
    }

    let id = parse_field(path, line_no, "ID", parts[0])?;
    let age = parse_field(path, line_no, "Age", parts[2])?;
    let daily_step_goal = parse_field(path, line_no, "DailyStepGoal", parts[3])?;
    let steps = parts[4..]
        .iter()
        .map(|raw| parse_field::<u32>(path, line_no, "step count", raw))
        .collect::<Result<Vec<_>>>()?;

    Ok(Individual::new(id, parts[1], age, daily_step_goal, steps))
}

/// Parse one groups line
pub fn parse_group(path: &Path, line_no: usize, line: &str) -> Result<Group> {
    let parts: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if parts.len() < 4 {
        return Err(TrackerError::Parse {
            path: path.to_path_buf(),
            line: line_no,
            reason: format!("expected 4 fields, found {}", parts.len()),
        });
    }

    let member_ids = parts[2]
        .split(MEMBER_DELIMITER)
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| parse_field::<u32>(path, line_no, "member ID", raw))
        .collect::<Result<Vec<_>>>()?;
    let weekly_group_goal = parse_field(path, line_no, "WeeklyGroupGoal", parts[3])?;

    Ok(Group::new(parts[0], parts[1], member_ids, weekly_group_goal))
}

/// Render one individuals line
pub fn format_individual(individual: &Individual) -> String {
    let mut line = format!(
        "{},{},{},{}",
        individual.id, individual.name, individual.age, individual.daily_step_goal
    );
    for steps in &individual.weekly_step_count {
        line.push(FIELD_DELIMITER);
        line.push_str(&steps.to_string());
    }
    line
}

/// Render one groups line
pub fn format_group(group: &Group) -> String {
    format!(
        "{},{},{},{}",
        group.group_id,
        group.group_name,
        group.member_ids().iter().join(&MEMBER_DELIMITER.to_string()),
        group.weekly_group_goal
    )
}

/// Write a header and lines to a file
fn write_lines<I>(path: &Path, purpose: &str, header: &str, lines: I) -> Result<()>
where
    I: IntoIterator<Item = String>,
{
    let file = safe_create_file(path, purpose)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{header}")?;
    for line in lines {
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;
    Ok(())
}
