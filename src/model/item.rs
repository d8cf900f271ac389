// File: src/model/item.rs
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Status {
    NotStarted,
    InProgress,
    Done,
    Canceled,
}

impl Status {
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Done | Self::Canceled)
    }
}

/// Where an item shows up: the plain list view, the visual timeline, or both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    Both,
    TimelineOnly,
}

fn default_rollover() -> bool {
    true
}

/// A calendar item as the REST layer delivers it. The core never mutates
/// these; it only reads them to compute derived order and layout. Optional
/// fields carry serde defaults so partial API payloads still deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub start: Option<NaiveTime>,
    #[serde(default)]
    pub end: Option<NaiveTime>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub is_phase: bool,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default)]
    pub is_event: bool,
    #[serde(default)]
    pub order_index: Option<u32>,
    #[serde(default = "default_rollover")]
    pub rollover: bool,
    #[serde(default)]
    pub allow_overlap: bool,
    #[serde(default)]
    pub display: DisplayMode,
}

impl CalendarItem {
    /// Phases and groups are section headers, not schedulable items.
    pub fn is_header(&self) -> bool {
        self.is_phase || self.is_group
    }
}
