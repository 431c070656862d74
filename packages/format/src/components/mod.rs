//! The concrete section codecs.

pub mod code;
pub mod info;
pub mod interface;
pub mod raw;
pub mod shapes;
pub mod version;

/// Lines of `text`, keeping a trailing empty line so that reading the
/// section back with a newline join restores the text exactly
fn to_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

#[cfg(test)]
pub(crate) fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
