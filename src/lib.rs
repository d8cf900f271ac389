// File: src/lib.rs
//! Pure core of a personal calendar application: the quick-entry grammar
//! compiler, the multi-key item comparator, and the day-timeline lane
//! layout engine. No I/O, no shared state; the surrounding application
//! feeds `CalendarItem` records in and renders the typed results.

pub mod layout;
pub mod model;

pub use layout::{LanePlacement, LayoutConfig, TimedSpan, layout_day, layout_day_with};
pub use model::{
    CalendarItem, CreationIntent, DisplayMode, ParsedAttributes, Priority, SortMode, Status,
    compare, compile, extract_attributes, sort_items,
};
