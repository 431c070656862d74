use crate::error::CommonError;
use crate::result::CommonResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

const FILE_SCHEME: &str = "file://";

/// A resolved place a model document is read from or written to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    path: PathBuf,
}

impl Location {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse a plain path or a `file://` URI.
    ///
    /// Other schemes are rejected; remote resources are not supported.
    pub fn parse(descriptor: &str) -> CommonResult<Self> {
        if let Some(rest) = descriptor.strip_prefix(FILE_SCHEME) {
            if rest.is_empty() {
                return Err(CommonError::invalid_location(descriptor, "empty file URI"));
            }
            return Ok(Self::new(rest));
        }

        if let Some((scheme, _)) = descriptor.split_once("://") {
            return Err(CommonError::invalid_location(
                descriptor,
                format!("unsupported scheme '{}'", scheme),
            ));
        }

        if descriptor.is_empty() {
            return Err(CommonError::invalid_location(descriptor, "empty path"));
        }

        Ok(Self::new(descriptor))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Same location with `extension` appended when the path has none
    pub fn with_default_extension(&self, extension: &str) -> Self {
        if self.path.extension().is_some() {
            self.clone()
        } else {
            Self::new(self.path.with_extension(extension))
        }
    }

    pub fn to_uri(&self) -> String {
        format!("{}{}", FILE_SCHEME, self.path.display())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl From<PathBuf> for Location {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&Path> for Location {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_path() {
        let location = Location::parse("models/wolf.nlogo").unwrap();
        assert_eq!(location.path(), Path::new("models/wolf.nlogo"));
    }

    #[test]
    fn test_parse_file_uri() {
        let location = Location::parse("file:///tmp/fire.nlogo").unwrap();
        assert_eq!(location.path(), Path::new("/tmp/fire.nlogo"));
        assert_eq!(location.to_uri(), "file:///tmp/fire.nlogo");
    }

    #[test]
    fn test_parse_rejects_remote_scheme() {
        let err = Location::parse("https://example.org/fire.nlogo").unwrap_err();
        assert!(matches!(err, CommonError::InvalidLocation { .. }));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(Location::parse("").is_err());
        assert!(Location::parse("file://").is_err());
    }

    #[test]
    fn test_default_extension() {
        let bare = Location::new("models/fire");
        assert_eq!(
            bare.with_default_extension("nlogo").path(),
            Path::new("models/fire.nlogo")
        );

        let named = Location::new("models/fire.txt");
        assert_eq!(named.with_default_extension("nlogo"), named);
    }
}
