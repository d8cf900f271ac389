// File: src/model/quick_entry.rs
use crate::model::parser::{ParsedAttributes, extract_attributes, mask_links, restore_links};
use log::debug;

/// What a single quick-entry line asks the application to create. Exactly
/// one variant per line; for the `*WithTask` forms the caller must create
/// the parent header first and reference its id from the nested task.
#[derive(Debug, Clone, PartialEq)]
pub enum CreationIntent {
    Item(ParsedAttributes),
    PhaseOnly(String),
    GroupOnly(String),
    PhaseWithTask { name: String, task: ParsedAttributes },
    GroupWithTask { name: String, task: ParsedAttributes },
}

/// Compile one line of quick-entry text into a creation intent.
///
/// A leading `#` is the phase form and a leading `>` the group form, checked
/// in that order; either short-circuits all other symbol scanning. Anything
/// else runs through the full extractor. Returns `None` when nothing
/// creatable remains (empty line, or symbols with no residual title) --
/// that is expected input, not a fault, and the caller shows a validation
/// message.
///
/// Links are masked before the sigil check so `#[label](url)` treats the
/// link as opaque name text instead of splitting inside it.
pub fn compile(line: &str) -> Option<CreationIntent> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (masked, links) = mask_links(trimmed);

    if let Some(content) = masked.strip_prefix('#') {
        return compile_header(content, &links, true);
    }
    if let Some(content) = masked.strip_prefix('>') {
        return compile_header(content, &links, false);
    }

    let attrs = extract_attributes(trimmed);
    if attrs.title.is_empty() {
        debug!("quick entry rejected, no residual title: {:?}", line);
        return None;
    }
    Some(CreationIntent::Item(attrs))
}

/// Shared phase/group header logic: the name is everything up to the first
/// comma (allowing multi-word names), or else the first whitespace; any
/// remainder becomes a nested task parsed by the full extractor.
fn compile_header(content: &str, links: &[String], is_phase: bool) -> Option<CreationIntent> {
    let (name_part, remainder) = split_header(content);
    let name = restore_links(name_part.trim(), links);
    if name.is_empty() {
        debug!("quick entry rejected, empty header name");
        return None;
    }

    let header_only = || {
        if is_phase {
            CreationIntent::PhaseOnly(name.clone())
        } else {
            CreationIntent::GroupOnly(name.clone())
        }
    };

    match remainder {
        None => Some(header_only()),
        Some(rest) => {
            let task = extract_attributes(&restore_links(rest, links));
            if task.title.is_empty() {
                // Remainder was all symbols; degrade to a bare header.
                return Some(header_only());
            }
            Some(if is_phase {
                CreationIntent::PhaseWithTask { name, task }
            } else {
                CreationIntent::GroupWithTask { name, task }
            })
        }
    }
}

fn split_header(content: &str) -> (&str, Option<&str>) {
    if let Some((name, rest)) = content.split_once(',') {
        let rest = rest.trim();
        return (name, if rest.is_empty() { None } else { Some(rest) });
    }
    let content = content.trim();
    match content.split_once(char::is_whitespace) {
        Some((name, rest)) if !rest.trim().is_empty() => (name, Some(rest.trim())),
        _ => (content, None),
    }
}
