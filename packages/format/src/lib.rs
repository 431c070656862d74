pub mod codec;
pub mod components;
pub mod convert;
pub mod document;
pub mod error;
pub mod literal;
pub mod model;
pub mod registry;
pub mod section;
pub mod segmenter;
pub mod separator;
pub mod shape;
pub mod version;
pub mod widget;

pub use codec::{compose, ComponentCodec, Transformation, ValidationWarning};
pub use document::{resolve_writable, ModelFormat, MODEL_EXTENSION};
pub use error::{FormatError, FormatResult};
pub use model::Model;
pub use registry::{CodecRegistry, Collaborators};
pub use section::SectionId;
pub use separator::{Sections, SEPARATOR};
pub use version::{Version, CURRENT_VERSION};
pub use widget::{Widget, WidgetKind, WidgetReaders};

/// Read document text with the standard codecs
pub fn read_model(text: &str) -> FormatResult<Model> {
    ModelFormat::standard().read_model(text)
}

/// Write a model as document text with the standard codecs
pub fn write_model(model: &Model) -> String {
    ModelFormat::standard().write_model(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_model_round_trip() {
        let model = ModelFormat::standard().new_model().unwrap();
        let text = write_model(&model);
        assert_eq!(read_model(&text).unwrap(), model);
        assert_eq!(write_model(&read_model(&text).unwrap()), text);
    }
}
