//! Forward migration of text written by older versions.

use crate::version::is_older_than;
use regex::{Captures, Regex};
use std::sync::OnceLock;
use tracing::debug;

/// Rewrites model code written by `from_version` into current syntax
pub trait SourceConverter: Send + Sync {
    fn convert(&self, from_version: &str, source: &str) -> String;
}

/// Leaves all code untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityConverter;

impl SourceConverter for IdentityConverter {
    fn convert(&self, _from_version: &str, source: &str) -> String {
        source.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRule {
    /// First version that uses the new name
    pub since: String,
    pub from: String,
    pub to: String,
}

/// Whole-word renames of primitives, each applied to code older than its
/// `since` version. String literals and comments are left alone.
#[derive(Debug, Clone, Default)]
pub struct RenameRules {
    rules: Vec<RenameRule>,
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#""(?:[^"\\\n]|\\.)*"|;[^\n]*|[^\s\[\]\(\)\{\}";]+"#)
            .expect("token pattern is valid")
    })
}

impl RenameRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(
        mut self,
        since: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        self.push(RenameRule {
            since: since.into(),
            from: from.into(),
            to: to.into(),
        });
        self
    }

    pub fn push(&mut self, rule: RenameRule) {
        self.rules.push(rule);
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl SourceConverter for RenameRules {
    fn convert(&self, from_version: &str, source: &str) -> String {
        let applicable: Vec<&RenameRule> = self
            .rules
            .iter()
            .filter(|rule| is_older_than(from_version, &rule.since))
            .collect();
        if applicable.is_empty() {
            return source.to_string();
        }

        debug!(from_version, rules = applicable.len(), "Converting source");
        token_pattern()
            .replace_all(source, |caps: &Captures<'_>| {
                let token = &caps[0];
                applicable
                    .iter()
                    .fold(None, |renamed: Option<&str>, rule| {
                        let current = renamed.unwrap_or(token);
                        if current.eq_ignore_ascii_case(&rule.from) {
                            Some(rule.to.as_str())
                        } else {
                            renamed
                        }
                    })
                    .unwrap_or(token)
                    .to_string()
            })
            .into_owned()
    }
}

/// Rewrites info text from the pre-markdown format
pub trait InfoConverter: Send + Sync {
    fn convert(&self, info: &str) -> String;
}

/// Turns headings underlined with dashes into markdown `##` headings
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyInfoConverter;

fn is_underline(line: &str) -> bool {
    let line = line.trim();
    line.len() >= 3 && line.chars().all(|c| c == '-')
}

impl InfoConverter for LegacyInfoConverter {
    fn convert(&self, info: &str) -> String {
        let lines: Vec<&str> = info.lines().collect();
        let mut output = Vec::with_capacity(lines.len());
        let mut i = 0;
        while i < lines.len() {
            let line = lines[i];
            let underlined = lines.get(i + 1).is_some_and(|next| is_underline(next));
            if underlined && !line.trim().is_empty() {
                output.push(format!("## {}", line.trim()));
                i += 2;
            } else {
                output.push(line.to_string());
                i += 1;
            }
        }
        output.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RenameRules {
        RenameRules::new()
            .with_rule("NetLogo 5.0", "__approximate-rgb", "approximate-rgb")
            .with_rule("NetLogo 6.0", "task", "->")
    }

    #[test]
    fn test_identity() {
        assert_eq!(IdentityConverter.convert("NetLogo 1.0", "to go end"), "to go end");
    }

    #[test]
    fn test_renames_old_code() {
        let source = "to go\n  set c __approximate-rgb 1 2 3\nend";
        assert_eq!(
            rules().convert("NetLogo 4.1", source),
            "to go\n  set c approximate-rgb 1 2 3\nend"
        );
    }

    #[test]
    fn test_only_rules_newer_than_document_apply() {
        let source = "run task [ __approximate-rgb 0 0 0 ]";
        assert_eq!(
            rules().convert("NetLogo 5.3", source),
            "run -> [ __approximate-rgb 0 0 0 ]"
        );
    }

    #[test]
    fn test_current_code_is_untouched() {
        let source = "run task [ __approximate-rgb 0 0 0 ]";
        assert_eq!(rules().convert(crate::version::CURRENT_VERSION, source), source);
    }

    #[test]
    fn test_strings_and_comments_untouched() {
        let source = "show \"task\" ; task here\nshow task";
        assert_eq!(
            rules().convert("NetLogo 5.0", source),
            "show \"task\" ; task here\nshow ->"
        );
    }

    #[test]
    fn test_partial_words_untouched() {
        assert_eq!(rules().convert("NetLogo 5.0", "my-task tasks"), "my-task tasks");
    }

    #[test]
    fn test_legacy_info_headings() {
        let info = "WHAT IS IT?\n-----------\nA model.\n\nHOW IT WORKS\n------------\nRules.";
        assert_eq!(
            LegacyInfoConverter.convert(info),
            "## WHAT IS IT?\nA model.\n\n## HOW IT WORKS\nRules."
        );
    }

    #[test]
    fn test_legacy_info_keeps_plain_text() {
        let info = "Some text\n--\nmore";
        assert_eq!(LegacyInfoConverter.convert(info), info);
    }
}
