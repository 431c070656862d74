//! Reading and writing whole model documents.

use crate::codec::ValidationWarning;
use crate::error::FormatResult;
use crate::model::Model;
use crate::registry::{CodecRegistry, Collaborators};
use crate::separator::{self, Sections};
use nlogo_common::{IoProvider, Location};
use std::io::Write;
use std::sync::OnceLock;
use tracing::{debug, info, instrument};

/// Extension given to written documents that have none
pub const MODEL_EXTENSION: &str = "nlogo";

/// Assembles models from documents and documents from models
#[derive(Debug, Default)]
pub struct ModelFormat {
    registry: CodecRegistry,
}

impl ModelFormat {
    pub fn new(registry: CodecRegistry) -> Self {
        Self { registry }
    }

    pub fn with_collaborators(collaborators: Collaborators) -> Self {
        Self::new(CodecRegistry::new(collaborators))
    }

    /// Shared instance built from the standard collaborators
    pub fn standard() -> &'static ModelFormat {
        static STANDARD: OnceLock<ModelFormat> = OnceLock::new();
        STANDARD.get_or_init(ModelFormat::default)
    }

    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    pub fn read_model(&self, text: &str) -> FormatResult<Model> {
        let sections = separator::split(text)?;
        self.read_sections(&sections)
    }

    pub fn read_sections(&self, sections: &Sections) -> FormatResult<Model> {
        self.registry.deserialize(sections)
    }

    pub fn model_sections(&self, model: &Model) -> Sections {
        self.registry.serialize(model)
    }

    pub fn write_model(&self, model: &Model) -> String {
        separator::join(&self.model_sections(model))
    }

    /// A model made entirely of section defaults
    pub fn new_model(&self) -> FormatResult<Model> {
        self.read_sections(&Sections::new())
    }

    pub fn validation_errors(&self, model: &Model) -> Vec<ValidationWarning> {
        self.registry.validation_errors(model)
    }

    #[instrument(skip(self, io, location), fields(location = %location))]
    pub fn load_document(&self, io: &dyn IoProvider, location: &Location) -> FormatResult<Model> {
        let text = io.read_to_string(location)?;
        debug!(bytes = text.len(), "Read document");
        let model = self.read_model(&text)?;
        info!(widgets = model.widgets.len(), version = %model.version, "Loaded model");
        Ok(model)
    }

    /// Write sections to `location`, returning where they landed.
    ///
    /// Nothing is visible at the destination unless the whole text was written.
    #[instrument(skip(self, sections, io, location), fields(location = %location))]
    pub fn write_document(
        &self,
        sections: &Sections,
        io: &dyn IoProvider,
        location: &Location,
    ) -> FormatResult<Location> {
        let destination = resolve_writable(location);
        let text = separator::join(sections);

        let mut sink = io.open_for_write(&destination)?;
        sink.write_all(text.as_bytes())?;
        sink.flush()?;
        sink.commit()?;

        info!(destination = %destination, bytes = text.len(), "Wrote document");
        Ok(destination)
    }

    pub fn save_model(
        &self,
        model: &Model,
        io: &dyn IoProvider,
        location: &Location,
    ) -> FormatResult<Location> {
        self.write_document(&self.model_sections(model), io, location)
    }
}

/// Writable form of `location`: gets the model extension if it has none
pub fn resolve_writable(location: &Location) -> Location {
    location.with_default_extension(MODEL_EXTENSION)
}
