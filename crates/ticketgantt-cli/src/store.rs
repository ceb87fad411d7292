//! JSON workbook on disk
//!
//! `tickets.json` holds the roster, templates, holidays and tickets. Saving
//! writes a temp file and renames it over the original.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use ticketgantt_core::{MemoryStore, Template};
use tracing::{debug, info};

pub const WORKBOOK_FILE: &str = "tickets.json";

/// Loaded workbook and the path it came from
#[derive(Debug)]
pub struct Workbook {
    path: PathBuf,
    pub data: MemoryStore,
}

impl Workbook {
    /// Starter content written by `init`
    pub fn starter(assignees: &[String]) -> MemoryStore {
        let data = MemoryStore::new()
            .with_template(Template::new("Design", 0, 3))
            .with_template(Template::new("Implement", 3, 5))
            .with_template(Template::new("Review", 8, 2));
        assignees
            .iter()
            .fold(data, |data, name| data.with_assignee(name.as_str()))
    }

    /// Create a new workbook file; fails if one exists
    pub fn create(dir: &Path, data: MemoryStore) -> Result<Self> {
        let path = dir.join(WORKBOOK_FILE);
        if path.exists() {
            bail!("{} already exists", path.display());
        }
        let workbook = Self { path, data };
        workbook.save()?;
        Ok(workbook)
    }

    pub fn open(dir: &Path) -> Result<Self> {
        let path = dir.join(WORKBOOK_FILE);
        if !path.exists() {
            bail!(
                "{} not found (run `ticketgantt init` first)",
                path.display()
            );
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let data: MemoryStore = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        debug!(
            path = %path.display(),
            tickets = data.tickets.len(),
            "workbook loaded"
        );
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write to disk atomically (temp file + rename)
    pub fn save(&self) -> Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(&self.data)?;
        {
            let mut f = File::create(&tmp)
                .with_context(|| format!("failed to create {}", tmp.display()))?;
            f.write_all(data.as_bytes())?;
            f.flush()?;
        }
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        info!(path = %self.path.display(), tickets = self.data.tickets.len(), "workbook saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ticketgantt_core::Ticket;

    #[test]
    fn save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let mut workbook =
            Workbook::create(dir.path(), Workbook::starter(&["alice".to_string()])).unwrap();
        workbook
            .data
            .tickets
            .push(Ticket::parent("T-001", "Release").assignee("alice").dates(start, start));
        workbook.save().unwrap();

        let reopened = Workbook::open(dir.path()).unwrap();
        assert_eq!(reopened.data, workbook.data);
        assert!(!dir.path().join("tickets.json.tmp").exists());
    }

    #[test]
    fn create_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        Workbook::create(dir.path(), MemoryStore::new()).unwrap();
        let err = Workbook::create(dir.path(), MemoryStore::new()).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn open_missing_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let err = Workbook::open(dir.path()).unwrap_err();
        assert!(err.to_string().contains("ticketgantt init"));
    }
}
