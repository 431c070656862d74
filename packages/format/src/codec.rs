//! Per-section codecs.
//!
//! A [`ComponentCodec`] is a record of four functions for one section.
//! Deserializing yields a [`Transformation`] instead of touching a model, so
//! the assembler decides the order in which section contents are applied.

use crate::error::{FormatError, FormatResult};
use crate::model::Model;
use crate::section::SectionId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A pending update to a model
pub type Transformation = Box<dyn FnOnce(Model) -> Model + Send>;

type SerializeFn = Box<dyn Fn(&Model) -> Vec<String> + Send + Sync>;
type DeserializeFn = Box<dyn Fn(&[String]) -> FormatResult<Transformation> + Send + Sync>;
type DefaultFn = Arc<dyn Fn(Model) -> Model + Send + Sync>;
type ValidateFn = Box<dyn Fn(&Model) -> Option<String> + Send + Sync>;

pub fn identity() -> Transformation {
    Box::new(|model: Model| model)
}

/// Apply `transformations` left to right
pub fn compose<I>(transformations: I) -> Transformation
where
    I: IntoIterator<Item = Transformation>,
    I::IntoIter: Send + 'static,
{
    let transformations = transformations.into_iter();
    Box::new(move |model: Model| transformations.fold(model, |model, t| t(model)))
}

pub struct ComponentCodec {
    section: SectionId,
    serialize: SerializeFn,
    deserialize: DeserializeFn,
    default: DefaultFn,
    validate: ValidateFn,
}

impl ComponentCodec {
    pub fn new<S, D, F>(section: SectionId, serialize: S, deserialize: D, default: F) -> Self
    where
        S: Fn(&Model) -> Vec<String> + Send + Sync + 'static,
        D: Fn(&[String]) -> FormatResult<Transformation> + Send + Sync + 'static,
        F: Fn(Model) -> Model + Send + Sync + 'static,
    {
        Self {
            section,
            serialize: Box::new(serialize),
            deserialize: Box::new(deserialize),
            default: Arc::new(default),
            validate: Box::new(|_: &Model| None),
        }
    }

    pub fn with_validation<V>(mut self, validate: V) -> Self
    where
        V: Fn(&Model) -> Option<String> + Send + Sync + 'static,
    {
        self.validate = Box::new(validate);
        self
    }

    pub fn section(&self) -> SectionId {
        self.section
    }

    pub fn serialize(&self, model: &Model) -> Vec<String> {
        (self.serialize)(model)
    }

    /// Errors are reported against this codec's section
    pub fn deserialize(&self, lines: &[String]) -> FormatResult<Transformation> {
        (self.deserialize)(lines).map_err(|e| FormatError::codec(self.section, e))
    }

    pub fn default_transformation(&self, model: Model) -> Model {
        (self.default)(model)
    }

    /// The default as a transformation, for composing with deserialized sections
    pub fn default_transformer(&self) -> Transformation {
        let default = Arc::clone(&self.default);
        Box::new(move |model: Model| default(model))
    }

    pub fn validation_errors(&self, model: &Model) -> Option<String> {
        (self.validate)(model)
    }
}

impl fmt::Debug for ComponentCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentCodec")
            .field("section", &self.section)
            .finish_non_exhaustive()
    }
}

/// A non-fatal complaint about a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub section: SectionId,
    pub message: String,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.section, self.message)
    }
}
