//! Configuration loading
//!
//! Handles parsing of `ticketgantt.toml`. Every section and key is optional.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use ticketgantt_core::{ColorSettings, StatusTable};
use ticketgantt_planner::EndDatePolicy;
use ticketgantt_render::{DetailColumn, HighlightPolicy};

/// File name looked up next to the workbook
pub const CONFIG_FILE: &str = "ticketgantt.toml";

/// Written by `init`
pub const DEFAULT_CONFIG: &str = r##"# ticketgantt configuration

[planning]
# "caller": the parent end date is given on the command line
# "latest-child": the parent ends with its latest template child
end_date_policy = "caller"

[statuses]
# "four-state" or "three-state"
scheme = "four-state"

[gantt]
# "none", "description" or "memo"
detail_column = "memo"
# "overdue" or "today"
highlight = "overdue"

[colors]
parent = "#ddefe5"
overdue = "#ee7f77"
saturday = "#BBDEFB"
sunday = "#FFCDD2"
holiday = "#FFCDD2"
header_background = "#E3F2FD"
today = "#FFEB3B"

[colors.child]
notStarted = "#ee7f77"
inProgress = "#4389c5"
processed = "#5db5a5"
completed = "#a1af2f"
"##;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub planning: PlanningConfig,

    #[serde(default)]
    pub statuses: StatusConfig,

    #[serde(default)]
    pub gantt: GanttConfig,

    #[serde(default)]
    pub colors: ColorSettings,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndDateMode {
    #[default]
    Caller,
    LatestChild,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningConfig {
    #[serde(default)]
    pub end_date_policy: EndDateMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusScheme {
    #[default]
    FourState,
    ThreeState,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusConfig {
    #[serde(default)]
    pub scheme: StatusScheme,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttConfig {
    #[serde(default)]
    pub detail_column: DetailColumn,

    #[serde(default)]
    pub highlight: HighlightPolicy,
}

impl Config {
    /// Load from `path`, falling back to defaults when the file is absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.colors.validate()?;
        Ok(config)
    }

    pub fn end_date_policy(&self) -> EndDatePolicy {
        match self.planning.end_date_policy {
            EndDateMode::Caller => EndDatePolicy::CallerSupplied,
            EndDateMode::LatestChild => EndDatePolicy::LatestChild,
        }
    }

    pub fn status_table(&self) -> StatusTable {
        match self.statuses.scheme {
            StatusScheme::FourState => StatusTable::four_state(),
            StatusScheme::ThreeState => StatusTable::three_state(),
        }
    }
}
