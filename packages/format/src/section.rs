use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const KEY_PREFIX: &str = "org.nlogo.modelsection.";

/// Identifies one section of a model document.
///
/// The declaration order is the on-disk order; `SectionId::ALL` spells it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionId {
    Code,
    Interface,
    Info,
    TurtleShapes,
    Version,
    PreviewCommands,
    SystemDynamics,
    BehaviorSpace,
    HubNetClient,
    LinkShapes,
    ModelSettings,
    DeltaTick,
}

impl SectionId {
    pub const ALL: [SectionId; 12] = [
        SectionId::Code,
        SectionId::Interface,
        SectionId::Info,
        SectionId::TurtleShapes,
        SectionId::Version,
        SectionId::PreviewCommands,
        SectionId::SystemDynamics,
        SectionId::BehaviorSpace,
        SectionId::HubNetClient,
        SectionId::LinkShapes,
        SectionId::ModelSettings,
        SectionId::DeltaTick,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn name(self) -> &'static str {
        match self {
            SectionId::Code => "code",
            SectionId::Interface => "interface",
            SectionId::Info => "info",
            SectionId::TurtleShapes => "turtleShapes",
            SectionId::Version => "version",
            SectionId::PreviewCommands => "previewCommands",
            SectionId::SystemDynamics => "systemDynamics",
            SectionId::BehaviorSpace => "behaviorSpace",
            SectionId::HubNetClient => "hubNetClient",
            SectionId::LinkShapes => "linkShapes",
            SectionId::ModelSettings => "modelSettings",
            SectionId::DeltaTick => "deltaTick",
        }
    }

    /// Fully qualified key, e.g. `org.nlogo.modelsection.code`
    pub fn key(self) -> String {
        format!("{}{}", KEY_PREFIX, self.name())
    }

    /// Position of this section in the document
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSection(pub String);

impl fmt::Display for UnknownSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown section '{}'", self.0)
    }
}

impl std::error::Error for UnknownSection {}

impl FromStr for SectionId {
    type Err = UnknownSection;

    /// Accepts both the short name and the fully qualified key
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix(KEY_PREFIX).unwrap_or(s);
        SectionId::ALL
            .iter()
            .copied()
            .find(|id| id.name() == name)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_matches_index() {
        for (i, id) in SectionId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
        assert_eq!(SectionId::COUNT, 12);
    }

    #[test]
    fn test_parse_short_and_qualified() {
        assert_eq!("code".parse::<SectionId>().unwrap(), SectionId::Code);
        assert_eq!(
            "org.nlogo.modelsection.linkShapes".parse::<SectionId>().unwrap(),
            SectionId::LinkShapes
        );
        assert!("org.nlogo.modelsection.bogus".parse::<SectionId>().is_err());
    }

    #[test]
    fn test_key() {
        assert_eq!(SectionId::TurtleShapes.key(), "org.nlogo.modelsection.turtleShapes");
    }
}
