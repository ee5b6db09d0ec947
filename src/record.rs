use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Event format as announced on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Online,
    Offline,
}

/// One extracted hackathon. Built empty by the orchestrator, filled in by the
/// extraction stages, immutable once appended to the output collection.
/// Dates stay textual ("<day> <month> <year>", Russian month names) because
/// source pages often carry partial dates that are repaired after the fact.
#[derive(Debug, Clone, Serialize)]
pub struct HackathonRecord {
    pub name: Option<String>,
    pub description: Option<String>,
    pub registration_deadline: Option<String>,
    pub event_start: Option<String>,
    pub event_end: Option<String>,
    pub prize_amount: Option<f64>,
    pub format: Option<Format>,
    pub source_url: String,
}

impl HackathonRecord {
    pub fn new(source_url: impl Into<String>) -> Self {
        HackathonRecord {
            name: None,
            description: None,
            registration_deadline: None,
            event_start: None,
            event_end: None,
            prize_amount: None,
            format: None,
            source_url: source_url.into(),
        }
    }
}

/// Write all records as one pretty-printed JSON array. serde_json leaves
/// non-ASCII text unescaped, so Cyrillic survives as-is.
pub fn write_records(path: &Path, records: &[HackathonRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
