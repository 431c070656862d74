//! Splitting a document into sections and joining sections back together.
//!
//! Sections are separated by the literal [`SEPARATOR`]. Every rendered
//! section ends with a line break; sections other than code get a leading
//! line break unless their first line is already empty, so the separator
//! always sits on a line of its own.

use crate::error::{FormatError, FormatResult};
use crate::section::SectionId;
use std::collections::BTreeMap;

pub const SEPARATOR: &str = "@#$#@#$#@";

/// Raw section contents keyed by section
pub type Sections = BTreeMap<SectionId, Vec<String>>;

/// Join sections into document text, in `SectionId::ALL` order.
///
/// Sections missing from the map render as empty.
pub fn join(sections: &Sections) -> String {
    SectionId::ALL
        .iter()
        .map(|id| render_section(*id, sections.get(id).map(Vec::as_slice).unwrap_or(&[])))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

fn render_section(id: SectionId, lines: &[String]) -> String {
    if lines.is_empty() {
        return "\n".to_string();
    }

    let mut output = String::new();
    if !(lines[0].is_empty() || id == SectionId::Code) {
        output.push('\n');
    }
    for line in lines {
        output.push_str(line);
        output.push('\n');
    }
    output
}

/// Split document text into its sections.
///
/// The separator is matched literally. A part whose first line is empty has
/// that line dropped.
pub fn split(document: &str) -> FormatResult<Sections> {
    let parts: Vec<&str> = document.split(SEPARATOR).collect();
    if parts.len() != SectionId::COUNT {
        return Err(FormatError::section_count_mismatch(SectionId::COUNT, parts.len()));
    }

    Ok(SectionId::ALL
        .iter()
        .zip(parts)
        .map(|(id, part)| (*id, section_lines(part)))
        .collect())
}

fn section_lines(part: &str) -> Vec<String> {
    let mut lines = part.lines();
    let mut result = Vec::new();
    match lines.next() {
        Some(first) if !first.is_empty() => result.push(first.to_string()),
        _ => {}
    }
    result.extend(lines.map(str::to_string));
    result
}
