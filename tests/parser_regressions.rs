// Regression tests for grammar extraction edge cases.
use dayline::model::{
    CreationIntent, DisplayMode, ParsedAttributes, Priority, compile, extract_attributes,
    parse_reminder,
};

fn item_attrs(line: &str) -> ParsedAttributes {
    match compile(line) {
        Some(CreationIntent::Item(attrs)) => attrs,
        other => panic!("expected plain item for {:?}, got {:?}", line, other),
    }
}

#[test]
fn test_link_protection_shields_symbol_characters() {
    // The '-' and '&' inside the URL must not disable rollover or set
    // timeline-only, and '!h' outside the link must still extract.
    let attrs = item_attrs("Buy [milk](https://x.com/a-b&c) !h");
    assert_eq!(attrs.title, "Buy [milk](https://x.com/a-b&c)");
    assert_eq!(attrs.priority, Priority::High);
    assert!(attrs.rollover);
    assert_eq!(attrs.display, DisplayMode::Both);
}

#[test]
fn test_link_label_sigils_stay_verbatim() {
    let attrs = item_attrs("Read [spec @2pm !h](https://docs/x)");
    assert_eq!(attrs.title, "Read [spec @2pm !h](https://docs/x)");
    assert!(attrs.start.is_none());
    assert_eq!(attrs.priority, Priority::Medium);
}

#[test]
fn test_masked_link_is_not_an_inline_tag() {
    let attrs = item_attrs("Read #[docs](https://wiki/docs) tonight");
    assert!(attrs.phase.is_none(), "a masked link must not become a tag");
    assert_eq!(attrs.title, "Read #[docs](https://wiki/docs) tonight");
}

#[test]
fn test_header_sigil_sees_masked_line() {
    // Consistent masking: the link after the '#' is opaque name text, the
    // splitter never tears it apart on ']'.
    match compile("#[Roadmap](https://wiki/road-map), kickoff") {
        Some(CreationIntent::PhaseWithTask { name, task }) => {
            assert_eq!(name, "[Roadmap](https://wiki/road-map)");
            assert_eq!(task.title, "kickoff");
        }
        other => panic!("expected PhaseWithTask, got {:?}", other),
    }
}

#[test]
fn test_lone_bracket_is_plain_text() {
    let attrs = item_attrs("Fix bracket [ in parser !l");
    assert_eq!(attrs.title, "Fix bracket [ in parser");
    assert_eq!(attrs.priority, Priority::Low);
}

#[test]
fn test_malformed_time_stays_in_title() {
    let attrs = item_attrs("Standup @25:99 daily");
    assert!(attrs.start.is_none());
    assert_eq!(attrs.title, "Standup @25:99 daily");
}

#[test]
fn test_malformed_reminder_stays_in_title() {
    let attrs = item_attrs("Ship *abc build");
    assert_eq!(attrs.reminder_minutes, None);
    assert_eq!(attrs.title, "Ship *abc build");
}

#[test]
fn test_bare_star_stays_in_title() {
    let attrs = item_attrs("Note * stuff");
    assert_eq!(attrs.reminder_minutes, None);
    assert_eq!(attrs.title, "Note * stuff");
}

#[test]
fn test_per_symbol_failure_is_independent() {
    // One malformed token leaves only its own category untouched.
    let attrs = item_attrs("Draft @9am *later !h");
    assert!(attrs.start.is_some());
    assert_eq!(attrs.priority, Priority::High);
    assert_eq!(attrs.reminder_minutes, None);
    assert_eq!(attrs.title, "Draft *later");
}

#[test]
fn test_first_parsable_time_wins_later_ones_stay() {
    let attrs = item_attrs("Sync @9am then @10am maybe");
    assert!(attrs.start.is_some());
    assert_eq!(attrs.title, "Sync then @10am maybe");
}

#[test]
fn test_reminder_unit_conversion() {
    assert_eq!(parse_reminder("2h"), Some(120));
    assert_eq!(parse_reminder("1d"), Some(1440));
    assert_eq!(parse_reminder("45"), Some(45));
    assert_eq!(parse_reminder("45m"), Some(45));
    assert_eq!(parse_reminder(""), None, "empty value means no reminder");
    assert_eq!(parse_reminder("abc"), None, "garbage fails extraction");
}

#[test]
fn test_reminder_overflow_fails_extraction() {
    // Unit conversion past u32::MAX is a failed extraction like any other
    // malformed value, never a panic.
    assert_eq!(parse_reminder("80000000h"), None);
    assert_eq!(parse_reminder("4000000000d"), None);

    let attrs = item_attrs("Ping *80000000h later");
    assert_eq!(attrs.reminder_minutes, None);
    assert_eq!(attrs.title, "Ping *80000000h later");
}

#[test]
fn test_last_rollover_flag_wins() {
    assert!(item_attrs("Task - +").rollover);
    assert!(!item_attrs("Task + -").rollover);
}

#[test]
fn test_embedded_hyphen_and_plus_are_not_flags() {
    let attrs = item_attrs("Check well-known C++ build");
    assert!(attrs.rollover);
    assert_eq!(attrs.title, "Check well-known C++ build");
}

#[test]
fn test_attached_markers_are_not_consumed() {
    // Event/overlap markers are standalone tokens only.
    let attrs = item_attrs("Pay $5 invoice");
    assert!(!attrs.is_event);
    assert_eq!(attrs.title, "Pay $5 invoice");

    let attrs = item_attrs("Call mom?");
    assert!(!attrs.allow_overlap);
    assert_eq!(attrs.title, "Call mom?");

    // Same for timeline-only: '&' embedded in a word is text.
    let attrs = item_attrs("R&D review");
    assert_eq!(attrs.display, DisplayMode::Both);
    assert_eq!(attrs.title, "R&D review");
}

#[test]
fn test_no_double_extraction_of_residual_title() {
    // Extracting the residual title again must not pull out anything new.
    let first = extract_attributes("Plan trip @9am !h *30 #travel");
    let second = extract_attributes(&first.title);
    assert_eq!(second.title, first.title);
    assert!(second.start.is_none());
    assert_eq!(second.priority, Priority::Medium);
    assert_eq!(second.reminder_minutes, None);
    assert!(second.phase.is_none());
}

#[test]
fn test_whitespace_collapses_in_title() {
    let attrs = item_attrs("  Tidy   desk   !l  ");
    assert_eq!(attrs.title, "Tidy desk");
}
