// File: src/model/sort.rs
use crate::model::item::{CalendarItem, Priority, Status};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{Display, EnumString};

/// Which key drives list ordering. List rendering and the layout engine's
/// mandated pre-sort share this one contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortMode {
    Manual,
    Time,
    Priority,
    Status,
}

fn index_key(item: &CalendarItem) -> u64 {
    // Missing manual index sorts last.
    item.order_index.map(u64::from).unwrap_or(u64::MAX)
}

fn priority_rank(p: Option<Priority>) -> u8 {
    match p {
        Some(Priority::High) => 0,
        Some(Priority::Medium) => 1,
        Some(Priority::Low) => 2,
        None => 3,
    }
}

fn status_rank(s: Option<Status>) -> u8 {
    match s {
        Some(Status::NotStarted) => 0,
        Some(Status::InProgress) => 1,
        Some(Status::Done) => 2,
        Some(Status::Canceled) => 3,
        None => 4,
    }
}

fn compare_times(a: &CalendarItem, b: &CalendarItem) -> Ordering {
    match (a.start, b.start) {
        (Some(s1), Some(s2)) => s1.cmp(&s2).then_with(|| match (a.end, b.end) {
            (Some(e1), Some(e2)) => e1.cmp(&e2),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Total order over calendar items for the given mode. Missing keys rank
/// last. Whatever the mode, ties fall through to a case-insensitive title
/// compare and then the manual index, so repeated sorts of the same set are
/// reproducible.
pub fn compare(a: &CalendarItem, b: &CalendarItem, mode: SortMode) -> Ordering {
    let primary = match mode {
        SortMode::Manual => index_key(a).cmp(&index_key(b)),
        SortMode::Time => compare_times(a, b),
        SortMode::Priority => priority_rank(a.priority).cmp(&priority_rank(b.priority)),
        SortMode::Status => status_rank(a.status).cmp(&status_rank(b.status)),
    };
    primary
        .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        .then_with(|| index_key(a).cmp(&index_key(b)))
}

pub fn sort_items(items: &mut [CalendarItem], mode: SortMode) {
    items.sort_by(|a, b| compare(a, b, mode));
}
