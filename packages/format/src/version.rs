//! Version strings as written in the version section.

use std::cmp::Ordering;
use std::fmt;

/// Version written into documents created by this library
pub const CURRENT_VERSION: &str = "NetLogo 6.4.0";

/// Documents older than this store info text in the legacy heading format
pub const INFO_FORMAT_THRESHOLD: &str = "NetLogo 4.2pre2";

/// A parsed product version such as `NetLogo 6.0.4` or `NetLogo 4.2pre2`.
///
/// Missing trailing components count as zero, so `6.0` equals `6.0.0`. A 2D
/// version sorts before the 3D version with the same number.
#[derive(Debug, Clone)]
pub struct Version {
    numbers: Vec<u32>,
    prerelease: Option<Prerelease>,
    three_d: bool,
}

/// Kinds of prerelease tag, in release order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PrereleaseKind {
    Milestone,
    Beta,
    Pre,
    ReleaseCandidate,
}

#[derive(Debug, Clone)]
struct Prerelease {
    kind: PrereleaseKind,
    number: u32,
    /// Suffix as written, e.g. `-M5` or `pre2`
    written: String,
}

impl Version {
    pub fn parse(text: &str) -> Option<Self> {
        let mut rest = text.trim();
        rest = rest.strip_prefix("NetLogo").unwrap_or(rest).trim_start();

        let three_d = rest.starts_with("3D ");
        if three_d {
            rest = rest[3..].trim_start();
        }

        let numeric_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (numeric, suffix) = rest.split_at(numeric_end);

        let numbers = numeric
            .split('.')
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<u32>().ok())
            .collect::<Option<Vec<_>>>()?;
        if numbers.is_empty() {
            return None;
        }

        let prerelease = parse_prerelease(suffix.trim())?;

        Some(Self {
            numbers,
            prerelease,
            three_d,
        })
    }

    pub fn is_3d(&self) -> bool {
        self.three_d
    }

    pub fn prerelease_kind(&self) -> Option<PrereleaseKind> {
        self.prerelease.as_ref().map(|pre| pre.kind)
    }

    pub fn predates(&self, other: &Version) -> bool {
        self < other
    }
}

/// `Some(None)` for a plain release, `Some(Some(_))` for `-MN`/`betaN`/`preN`/`-RCN`
fn parse_prerelease(suffix: &str) -> Option<Option<Prerelease>> {
    if suffix.is_empty() {
        return Some(None);
    }

    let lowered = suffix.to_ascii_lowercase();
    let tag = lowered.trim_start_matches('-');
    let (kind, digits) = [
        ("m", PrereleaseKind::Milestone),
        ("beta", PrereleaseKind::Beta),
        ("pre", PrereleaseKind::Pre),
        ("rc", PrereleaseKind::ReleaseCandidate),
    ]
    .iter()
    .find_map(|(prefix, kind)| tag.strip_prefix(prefix).map(|digits| (*kind, digits)))?;

    let number = if digits.is_empty() {
        0
    } else {
        digits.parse::<u32>().ok()?
    };

    Some(Some(Prerelease {
        kind,
        number,
        written: suffix.to_string(),
    }))
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.numbers.len().max(other.numbers.len());
        for i in 0..len {
            let a = self.numbers.get(i).copied().unwrap_or(0);
            let b = other.numbers.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }

        let prerelease = match (&self.prerelease, &other.prerelease) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => (a.kind, a.number).cmp(&(b.kind, b.number)),
        };
        prerelease.then(self.three_d.cmp(&other.three_d))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NetLogo ")?;
        if self.three_d {
            f.write_str("3D ")?;
        }
        let numbers: Vec<String> = self.numbers.iter().map(u32::to_string).collect();
        f.write_str(&numbers.join("."))?;
        if let Some(pre) = &self.prerelease {
            f.write_str(&pre.written)?;
        }
        Ok(())
    }
}

/// True when `version` parses and sorts before `threshold`.
///
/// Unparseable versions are never considered older.
pub fn is_older_than(version: &str, threshold: &str) -> bool {
    match (Version::parse(version), Version::parse(threshold)) {
        (Some(v), Some(t)) => v.predates(&t),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variants() {
        assert!(Version::parse("NetLogo 6.0.4").is_some());
        assert!(Version::parse("5.0").is_some());
        assert!(Version::parse("NetLogo 4.2pre2").is_some());
        assert!(Version::parse("NetLogo 6.0-M5").is_some());
        assert!(Version::parse("NetLogo 6.1.0-RC1").is_some());
        assert!(Version::parse("NetLogo 3D 6.1").unwrap().is_3d());
        assert!(Version::parse("NetLogo").is_none());
        assert!(Version::parse("banana").is_none());
        assert!(Version::parse("NetLogo 6.0 final").is_none());
    }

    #[test]
    fn test_ordering() {
        assert!(is_older_than("NetLogo 4.1", "NetLogo 4.2pre2"));
        assert!(is_older_than("NetLogo 4.2pre1", "NetLogo 4.2pre2"));
        assert!(!is_older_than("NetLogo 4.2", "NetLogo 4.2pre2"));
        assert!(!is_older_than("NetLogo 6.4.0", "NetLogo 4.2pre2"));
        assert!(is_older_than("NetLogo 6.0-M5", "NetLogo 6.0"));
        assert!(is_older_than("NetLogo 5.3.1", "NetLogo 6.0"));
    }

    #[test]
    fn test_missing_components_are_zero() {
        let short = Version::parse("6.0").unwrap();
        let long = Version::parse("NetLogo 6.0.0").unwrap();
        assert_eq!(short.cmp(&long), Ordering::Equal);
        assert_eq!(short, long);
    }

    #[test]
    fn test_3d_is_distinct() {
        let flat = Version::parse("NetLogo 6.1").unwrap();
        let three_d = Version::parse("NetLogo 3D 6.1").unwrap();
        assert_ne!(flat, three_d);
        assert!(flat < three_d);
        assert!(three_d < Version::parse("NetLogo 6.2").unwrap());
    }

    #[test]
    fn test_prerelease_kinds_are_ranked() {
        let order = [
            "NetLogo 6.0-M5",
            "NetLogo 6.0-beta1",
            "NetLogo 6.0pre2",
            "NetLogo 6.0-RC1",
            "NetLogo 6.0",
        ];
        for pair in order.windows(2) {
            assert!(is_older_than(pair[0], pair[1]), "{} < {}", pair[0], pair[1]);
            assert!(!is_older_than(pair[1], pair[0]));
        }
        assert_eq!(
            Version::parse("NetLogo 6.1.0-RC1").unwrap().prerelease_kind(),
            Some(PrereleaseKind::ReleaseCandidate)
        );
    }

    #[test]
    fn test_unparseable_is_never_older() {
        assert!(!is_older_than("", INFO_FORMAT_THRESHOLD));
        assert!(!is_older_than("who knows", INFO_FORMAT_THRESHOLD));
    }

    #[test]
    fn test_display() {
        for text in ["NetLogo 3D 4.2pre2", "NetLogo 6.0-M5", "NetLogo 6.1.0-RC1", "NetLogo 5.0"] {
            assert_eq!(Version::parse(text).unwrap().to_string(), text);
        }
    }
}
