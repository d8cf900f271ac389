// File: src/layout.rs
//! Day-timeline lane layout.
//!
//! Buckets and lane-assigns a day's timed items so that overlapping items
//! render side by side without collision while non-overlapping items keep
//! full width. Recomputed fresh on every render pass; nothing here is
//! persisted.

use crate::model::item::CalendarItem;
use crate::model::sort::{SortMode, compare};
use chrono::Timelike;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DAY_END_MINUTES: u32 = 24 * 60;

/// Tunables the host application may override from its own config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Span synthesized for items with a missing or degenerate end time.
    pub min_span_minutes: u32,
    /// Spans are capped here; minutes past midnight.
    pub day_end_minutes: u32,
    /// Hour-bucket population at which the renderer should fall back to a
    /// fixed two-column split instead of the raw lane count.
    pub dense_hour_threshold: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_span_minutes: 30,
            day_end_minutes: DAY_END_MINUTES,
            dense_hour_threshold: 3,
        }
    }
}

/// Half-open interval in minutes since midnight; `end > start` always.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedSpan {
    pub start: u32,
    pub end: u32,
}

impl TimedSpan {
    pub fn overlaps(&self, other: &TimedSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Per-item layout result: the lane within its overlap cluster, the
/// cluster's uniform column count, and the hour-bucket rendering hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanePlacement {
    pub lane: u32,
    pub cluster_columns: u32,
    pub hour_bucket_index: u32,
    pub hour_bucket_size: u32,
}

impl LanePlacement {
    /// Rendering hint layered on top of the lane computation: dense hours
    /// prefer a fixed two-column split over the raw cluster width.
    pub fn preferred_columns(&self, config: &LayoutConfig) -> u32 {
        if self.hour_bucket_size >= config.dense_hour_threshold {
            2
        } else {
            self.cluster_columns
        }
    }
}

fn span_of(item: &CalendarItem, config: &LayoutConfig) -> Option<TimedSpan> {
    let start_time = item.start?;
    let start = start_time.hour() * 60 + start_time.minute();
    let end = match item.end.map(|e| e.hour() * 60 + e.minute()) {
        Some(end) if end > start => end,
        // Missing or degenerate end: clamp to a minimum span, capped at
        // day end but never collapsing below one minute.
        _ => start
            .saturating_add(config.min_span_minutes)
            .min(config.day_end_minutes)
            .max(start + 1),
    };
    Some(TimedSpan { start, end })
}

/// Lane-assign one day's items with default config.
pub fn layout_day(items: &[CalendarItem]) -> HashMap<String, LanePlacement> {
    layout_day_with(items, &LayoutConfig::default())
}

/// Lane-assign one day's items.
///
/// Headers (phases/groups) and untimed items are skipped. The rest are
/// pre-sorted with [`compare`] in time mode plus a final id tie-break, so
/// the result is identical for any permutation of the same input set. A
/// greedy sweep then evicts expired spans and gives each item the smallest
/// free lane; items in one contiguous overlap cluster all report the same
/// column count.
pub fn layout_day_with(
    items: &[CalendarItem],
    config: &LayoutConfig,
) -> HashMap<String, LanePlacement> {
    let mut timed: Vec<(&CalendarItem, TimedSpan)> = items
        .iter()
        .filter(|i| !i.is_header())
        .filter_map(|i| span_of(i, config).map(|s| (i, s)))
        .collect();
    timed.sort_by(|(a, _), (b, _)| {
        compare(a, b, SortMode::Time).then_with(|| a.id.cmp(&b.id))
    });

    // First-fit lane sweep. `active` holds (end, lane) of spans that can
    // still conflict with the current item.
    let mut active: Vec<(u32, u32)> = Vec::new();
    let mut lanes: Vec<u32> = Vec::with_capacity(timed.len());
    let mut clusters: Vec<usize> = Vec::with_capacity(timed.len());
    let mut cluster_columns: Vec<u32> = Vec::new();
    let mut cluster = 0usize;
    let mut prev_hour: Option<u32> = None;

    for (_, span) in &timed {
        active.retain(|(end, _)| *end > span.start);

        // A new cluster needs both an empty active set and an hour change;
        // separate bursts inside one hour keep a uniform column width.
        let hour = span.start / 60;
        if active.is_empty() && prev_hour.is_some_and(|h| h != hour) {
            cluster += 1;
        }
        prev_hour = Some(hour);

        let mut lane = 0u32;
        while active.iter().any(|(_, l)| *l == lane) {
            lane += 1;
        }
        active.push((span.end, lane));

        if cluster_columns.len() <= cluster {
            cluster_columns.push(0);
        }
        cluster_columns[cluster] = cluster_columns[cluster].max(lane + 1);
        lanes.push(lane);
        clusters.push(cluster);
    }

    // Hour buckets are an independent grouping by starting hour; position
    // within the bucket follows the same sorted order.
    let mut bucket_sizes: HashMap<u32, u32> = HashMap::new();
    let mut bucket_positions: Vec<u32> = Vec::with_capacity(timed.len());
    for (_, span) in &timed {
        let count = bucket_sizes.entry(span.start / 60).or_insert(0);
        bucket_positions.push(*count);
        *count += 1;
    }

    let mut out = HashMap::with_capacity(timed.len());
    for (i, (item, span)) in timed.iter().enumerate() {
        out.insert(
            item.id.clone(),
            LanePlacement {
                lane: lanes[i],
                cluster_columns: cluster_columns[clusters[i]],
                hour_bucket_index: bucket_positions[i],
                hour_bucket_size: bucket_sizes[&(span.start / 60)],
            },
        );
    }

    debug!(
        "layout_day: {} timed item(s), {} cluster(s)",
        out.len(),
        cluster_columns.len()
    );
    out
}
