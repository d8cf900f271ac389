// File: src/model/parser.rs
use crate::model::item::{DisplayMode, Priority};
use chrono::{NaiveTime, Timelike};
use log::trace;

/// Everything the quick-entry grammar can attach to a single line, plus the
/// residual title once every symbol has been stripped. An empty title means
/// the line carried nothing but symbols and must be rejected by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAttributes {
    pub title: String,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub priority: Priority,
    pub reminder_minutes: Option<u32>,
    pub is_event: bool,
    pub allow_overlap: bool,
    pub display: DisplayMode,
    pub rollover: bool,
    pub phase: Option<String>,
    pub group: Option<String>,
}

impl Default for ParsedAttributes {
    fn default() -> Self {
        Self {
            title: String::new(),
            start: None,
            end: None,
            priority: Priority::Medium,
            reminder_minutes: None,
            is_event: false,
            allow_overlap: false,
            display: DisplayMode::Both,
            rollover: true,
            phase: None,
            group: None,
        }
    }
}

/// Replace every markdown-style link `[label](url)` with an opaque
/// `__LINK_n__` placeholder so that symbol characters inside labels and
/// URLs (`-`, `&`, `!`, `@`, ...) are never picked up by the grammar.
/// The placeholders are restored verbatim after extraction.
pub(crate) fn mask_links(input: &str) -> (String, Vec<String>) {
    let mut out = String::with_capacity(input.len());
    let mut links = Vec::new();
    let mut rest = input;

    while let Some(open) = rest.find('[') {
        if let Some(close_rel) = rest[open..].find(']') {
            let close = open + close_rel;
            if rest[close + 1..].starts_with('(')
                && let Some(paren_rel) = rest[close + 2..].find(')')
            {
                let end = close + 2 + paren_rel + 1;
                out.push_str(&rest[..open]);
                out.push_str(&format!("__LINK_{}__", links.len()));
                links.push(rest[open..end].to_string());
                rest = &rest[end..];
                continue;
            }
        }
        // Lone '[' with no full link after it: pass it through.
        out.push_str(&rest[..open + 1]);
        rest = &rest[open + 1..];
    }
    out.push_str(rest);

    if !links.is_empty() {
        trace!("masked {} link(s) before symbol extraction", links.len());
    }
    (out, links)
}

pub(crate) fn restore_links(text: &str, links: &[String]) -> String {
    let mut out = text.to_string();
    for (i, link) in links.iter().enumerate() {
        out = out.replace(&format!("__LINK_{i}__"), link);
    }
    out
}

/// Parse a single clock time: `h`, `h:mm`, with optional am/pm suffix and a
/// 1- or 2-digit hour. Bare hours without a suffix are read as 24h.
pub(crate) fn parse_time_token(s: &str) -> Option<NaiveTime> {
    let lower = s.to_lowercase();

    let parse_12h = |s: &str, is_pm: bool| -> Option<NaiveTime> {
        let (h, m) = if let Some((h_str, m_str)) = s.split_once(':') {
            (h_str.parse::<u32>().ok()?, m_str.parse::<u32>().ok()?)
        } else {
            (s.parse::<u32>().ok()?, 0)
        };
        if !(1..=12).contains(&h) || m > 59 {
            return None;
        }
        let h_24 = if h == 12 {
            if is_pm { 12 } else { 0 }
        } else if is_pm {
            h + 12
        } else {
            h
        };
        NaiveTime::from_hms_opt(h_24, m, 0)
    };

    if let Some(stripped) = lower.strip_suffix("am") {
        return parse_12h(stripped, false);
    }
    if let Some(stripped) = lower.strip_suffix("pm") {
        return parse_12h(stripped, true);
    }

    if let Some((h_str, m_str)) = lower.split_once(':') {
        if h_str.is_empty() || h_str.len() > 2 {
            return None;
        }
        let h = h_str.parse::<u32>().ok()?;
        let m = m_str.parse::<u32>().ok()?;
        return NaiveTime::from_hms_opt(h, m, 0);
    }

    if !lower.is_empty() && lower.len() <= 2 {
        let h = lower.parse::<u32>().ok()?;
        return NaiveTime::from_hms_opt(h, 0, 0);
    }
    None
}

/// `<time>` or `<time>-<time>`; the end is only present when explicit.
pub(crate) fn parse_time_range(s: &str) -> Option<(NaiveTime, Option<NaiveTime>)> {
    if let Some((a, b)) = s.split_once('-') {
        let start = parse_time_token(a)?;
        let end = parse_time_token(b)?;
        return Some((start, Some(end)));
    }
    parse_time_token(s).map(|t| (t, None))
}

pub(crate) fn parse_priority(s: &str) -> Option<Priority> {
    match s.to_lowercase().as_str() {
        "h" | "high" => Some(Priority::High),
        "m" | "med" | "medium" => Some(Priority::Medium),
        "l" | "low" => Some(Priority::Low),
        _ => None,
    }
}

/// Reminder offset before start: `<integer>[m|h|d]`, unit defaulting to
/// minutes. Anything else fails extraction and the token stays in the
/// title; an empty value simply means no reminder.
pub fn parse_reminder(s: &str) -> Option<u32> {
    if s.is_empty() {
        return None;
    }
    let lower = s.to_lowercase();
    if let Some(n) = lower.strip_suffix('h') {
        return n.parse::<u32>().ok().and_then(|h| h.checked_mul(60));
    }
    if let Some(n) = lower.strip_suffix('d') {
        return n.parse::<u32>().ok().and_then(|d| d.checked_mul(1440));
    }
    let n = lower.strip_suffix('m').unwrap_or(&lower);
    n.parse::<u32>().ok()
}

fn parse_tag_name(s: &str) -> Option<String> {
    // Masked links look like valid names; they are title text, not tags.
    if s.is_empty()
        || s.contains("__LINK_")
        || !s.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return None;
    }
    Some(s.to_string())
}

/// Remove every standalone occurrence of `flag`; true if any was present.
fn take_flag(tokens: &mut Vec<String>, flag: &str) -> bool {
    let before = tokens.len();
    tokens.retain(|t| t.as_str() != flag);
    tokens.len() != before
}

/// Remove the first token that starts with `sigil` and whose remainder
/// parses. Tokens whose remainder does not parse are left untouched:
/// extraction failures are per-symbol no-ops, never line-level failures.
fn take_prefixed<T>(
    tokens: &mut Vec<String>,
    sigil: char,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    for i in 0..tokens.len() {
        if let Some(rest) = tokens[i].strip_prefix(sigil)
            && let Some(value) = parse(rest)
        {
            tokens.remove(i);
            return Some(value);
        }
    }
    None
}

/// Run the full symbol pipeline over one line of input. Links are masked
/// exactly once up front, each extraction pass removes what it matched,
/// and whatever survives becomes the title (links restored, whitespace
/// collapsed). Fixed pass order:
/// event `$`, overlap `?`, timeline-only `&`/`~`, time `@`, priority `!`,
/// reminder `*`, phase tag `#`, group tag `>`, rollover `-`/`+`.
pub fn extract_attributes(input: &str) -> ParsedAttributes {
    let (masked, links) = mask_links(input);
    let mut tokens: Vec<String> = masked.split_whitespace().map(str::to_string).collect();
    let mut attrs = ParsedAttributes::default();

    attrs.is_event = take_flag(&mut tokens, "$");
    attrs.allow_overlap = take_flag(&mut tokens, "?");

    let ampersand = take_flag(&mut tokens, "&");
    let legacy_tilde = take_flag(&mut tokens, "~");
    if ampersand || legacy_tilde {
        attrs.display = DisplayMode::TimelineOnly;
    }

    if let Some((start, end)) = take_prefixed(&mut tokens, '@', parse_time_range) {
        attrs.start = Some(start);
        attrs.end = end;
    }
    if let Some(p) = take_prefixed(&mut tokens, '!', parse_priority) {
        attrs.priority = p;
    }
    attrs.reminder_minutes = take_prefixed(&mut tokens, '*', parse_reminder);
    attrs.phase = take_prefixed(&mut tokens, '#', parse_tag_name);
    attrs.group = take_prefixed(&mut tokens, '>', parse_tag_name);

    // Rollover defaults to on, is forced off for events, and an explicit
    // standalone `-`/`+` overrides either way; the last flag wins.
    let mut explicit_rollover = None;
    tokens.retain(|t| match t.as_str() {
        "-" => {
            explicit_rollover = Some(false);
            false
        }
        "+" => {
            explicit_rollover = Some(true);
            false
        }
        _ => true,
    });
    attrs.rollover = explicit_rollover.unwrap_or(!attrs.is_event);

    attrs.title = restore_links(&tokens.join(" "), &links).trim().to_string();
    attrs
}

impl ParsedAttributes {
    /// Render attributes back to grammar text for edit-in-place. Only emits
    /// symbols re-extraction would pick up again, so a parse/render/parse
    /// cycle is stable. Phase and group names containing whitespace have no
    /// inline token form and are skipped.
    pub fn to_entry_string(&self) -> String {
        let fmt_time = |t: NaiveTime| format!("{}:{:02}", t.hour(), t.minute());

        let mut s = String::new();
        if self.is_event {
            s.push_str("$ ");
        }
        s.push_str(&self.title);
        if let Some(start) = self.start {
            s.push_str(&format!(" @{}", fmt_time(start)));
            if let Some(end) = self.end {
                s.push_str(&format!("-{}", fmt_time(end)));
            }
        }
        match self.priority {
            Priority::High => s.push_str(" !h"),
            Priority::Low => s.push_str(" !l"),
            Priority::Medium => {}
        }
        if let Some(mins) = self.reminder_minutes {
            if mins > 0 && mins % 1440 == 0 {
                s.push_str(&format!(" *{}d", mins / 1440));
            } else if mins > 0 && mins % 60 == 0 {
                s.push_str(&format!(" *{}h", mins / 60));
            } else {
                s.push_str(&format!(" *{}m", mins));
            }
        }
        if let Some(p) = &self.phase
            && !p.contains(char::is_whitespace)
        {
            s.push_str(&format!(" #{}", p));
        }
        if let Some(g) = &self.group
            && !g.contains(char::is_whitespace)
        {
            s.push_str(&format!(" >{}", g));
        }
        if self.allow_overlap {
            s.push_str(" ?");
        }
        if self.display == DisplayMode::TimelineOnly {
            s.push_str(" &");
        }
        if self.is_event && self.rollover {
            s.push_str(" +");
        } else if !self.is_event && !self.rollover {
            s.push_str(" -");
        }
        s
    }
}
