// File: src/model/mod.rs
pub mod item;
pub mod parser;
pub mod quick_entry;
pub mod sort;

pub use item::{CalendarItem, DisplayMode, Priority, Status};
pub use parser::{ParsedAttributes, extract_attributes, parse_reminder};
pub use quick_entry::{CreationIntent, compile};
pub use sort::{SortMode, compare, sort_items};
