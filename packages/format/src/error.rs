use crate::section::SectionId;
use nlogo_common::CommonError;
use thiserror::Error;

pub type FormatResult<T> = Result<T, FormatError>;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] CommonError),

    #[error("Expected {expected} sections, found {found}")]
    SectionCountMismatch { expected: usize, found: usize },

    #[error("Could not read section {section}: {source}")]
    Codec {
        section: SectionId,
        #[source]
        source: Box<FormatError>,
    },

    #[error("Invalid {kind} widget: {message}")]
    InvalidWidget { kind: String, message: String },

    #[error("Invalid shape '{shape}': {message}")]
    InvalidShape { shape: String, message: String },

    #[error("Invalid literal at {pos}: {message}")]
    InvalidLiteral { pos: usize, message: String },
}

impl FormatError {
    pub fn section_count_mismatch(expected: usize, found: usize) -> Self {
        Self::SectionCountMismatch { expected, found }
    }

    pub fn codec(section: SectionId, source: FormatError) -> Self {
        Self::Codec {
            section,
            source: Box::new(source),
        }
    }

    pub fn invalid_widget(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidWidget {
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn invalid_shape(shape: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidShape {
            shape: shape.into(),
            message: message.into(),
        }
    }

    pub fn invalid_literal(pos: usize, message: impl Into<String>) -> Self {
        Self::InvalidLiteral {
            pos,
            message: message.into(),
        }
    }
}
