//! Colors and color settings
//!
//! `ColorSettings` is total: every key has a default, and deserializing a
//! partial document (including a partial `child` map) fills the gaps.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::status::{TicketStatus, COMPLETED, IN_PROGRESS, NOT_STARTED, PROCESSED};
use crate::TicketError;

/// Cell background used for fixed columns and plain calendar days
pub const WHITE: &str = "#FFFFFF";

/// Hex color (`#RRGGBB`)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn white() -> Self {
        Self::new(WHITE)
    }

    /// Parse and validate a `#RRGGBB` string
    pub fn parse(hex: &str) -> Result<Self, TicketError> {
        let color = Self::new(hex.trim());
        if color.to_rgb().is_none() {
            return Err(TicketError::InvalidColor(hex.to_string()));
        }
        Ok(color)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `0xRRGGBB`, or `None` when the string is not a valid hex color
    pub fn to_rgb(&self) -> Option<u32> {
        let digits = self.0.strip_prefix('#')?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(digits, 16).ok()
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::white()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(hex: &str) -> Self {
        Self::new(hex)
    }
}

fn default_child_colors() -> BTreeMap<String, Color> {
    [
        (NOT_STARTED, "#ee7f77"),
        (IN_PROGRESS, "#4389c5"),
        (PROCESSED, "#5db5a5"),
        (COMPLETED, "#a1af2f"),
    ]
    .into_iter()
    .map(|(key, hex)| (key.to_string(), Color::new(hex)))
    .collect()
}

/// Overlay a partial child map on top of the defaults
fn merge_child_colors<'de, D>(deserializer: D) -> Result<BTreeMap<String, Color>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<String, Color>::deserialize(deserializer)?;
    let mut colors = default_child_colors();
    colors.extend(overrides);
    Ok(colors)
}

/// Semantic color keys for the Gantt layout
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSettings {
    /// In-range cells of parent rows
    pub parent: Color,
    /// In-range cells of child rows, by status key
    #[serde(deserialize_with = "merge_child_colors")]
    pub child: BTreeMap<String, Color>,
    /// End-date cell of an overdue ticket
    pub overdue: Color,
    pub saturday: Color,
    pub sunday: Color,
    pub holiday: Color,
    pub header_background: Color,
    /// Out-of-range cells on the current day (today-highlight policy only)
    pub today: Color,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            parent: Color::new("#ddefe5"),
            child: default_child_colors(),
            overdue: Color::new("#ee7f77"),
            saturday: Color::new("#BBDEFB"),
            sunday: Color::new("#FFCDD2"),
            holiday: Color::new("#FFCDD2"),
            header_background: Color::new("#E3F2FD"),
            today: Color::new("#FFEB3B"),
        }
    }
}

impl ColorSettings {
    /// Color of an in-range cell
    ///
    /// Parent rows always use the parent color. Child rows map their status;
    /// unmapped statuses use the not-started color.
    pub fn ticket_color(&self, is_parent: bool, status: &TicketStatus) -> Color {
        if is_parent {
            return self.parent.clone();
        }
        self.child
            .get(status.as_str())
            .or_else(|| self.child.get(NOT_STARTED))
            .cloned()
            .unwrap_or_else(|| Color::new("#ee7f77"))
    }

    /// Reject any color that is not `#RRGGBB`
    pub fn validate(&self) -> Result<(), TicketError> {
        let fixed = [
            &self.parent,
            &self.overdue,
            &self.saturday,
            &self.sunday,
            &self.holiday,
            &self.header_background,
            &self.today,
        ];
        for color in fixed.into_iter().chain(self.child.values()) {
            if color.to_rgb().is_none() {
                return Err(TicketError::InvalidColor(color.to_string()));
            }
        }
        Ok(())
    }
}
