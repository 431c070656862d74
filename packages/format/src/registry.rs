use crate::codec::{compose, ComponentCodec, ValidationWarning};
use crate::components::{code, info, interface, raw, shapes, version};
use crate::convert::{IdentityConverter, InfoConverter, LegacyInfoConverter, SourceConverter};
use crate::error::FormatResult;
use crate::model::Model;
use crate::section::SectionId;
use crate::separator::Sections;
use crate::shape::{ShapeGrammar, StandardShapeGrammar};
use crate::widget::WidgetReaders;
use std::sync::Arc;
use tracing::debug;

/// The collaborators the section codecs are built from
#[derive(Clone)]
pub struct Collaborators {
    /// Widget grammar, including the literal evaluator it interprets constants with
    pub widget_readers: WidgetReaders,
    pub shape_grammar: Arc<dyn ShapeGrammar>,
    pub source_converter: Arc<dyn SourceConverter>,
    pub info_converter: Arc<dyn InfoConverter>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            widget_readers: WidgetReaders::standard(),
            shape_grammar: Arc::new(StandardShapeGrammar),
            source_converter: Arc::new(IdentityConverter),
            info_converter: Arc::new(LegacyInfoConverter),
        }
    }
}

/// One codec per section, held in section order
#[derive(Debug)]
pub struct CodecRegistry {
    codecs: Vec<ComponentCodec>,
}

impl CodecRegistry {
    pub fn standard() -> Self {
        Self::new(Collaborators::default())
    }

    pub fn new(collaborators: Collaborators) -> Self {
        let Collaborators {
            widget_readers,
            shape_grammar,
            source_converter,
            info_converter,
        } = collaborators;

        let codecs = SectionId::ALL
            .iter()
            .map(|id| match id {
                SectionId::Code => code::codec(Arc::clone(&source_converter)),
                SectionId::Interface => {
                    interface::codec(widget_readers.clone(), Arc::clone(&source_converter))
                }
                SectionId::Info => info::codec(Arc::clone(&info_converter)),
                SectionId::TurtleShapes => shapes::turtle_shapes_codec(Arc::clone(&shape_grammar)),
                SectionId::Version => version::codec(),
                SectionId::LinkShapes => shapes::link_shapes_codec(Arc::clone(&shape_grammar)),
                other => raw::codec(*other),
            })
            .collect();

        Self { codecs }
    }

    /// Swap in a different codec for its section
    pub fn replace(&mut self, codec: ComponentCodec) {
        let index = codec.section().index();
        self.codecs[index] = codec;
    }

    pub fn get(&self, section: SectionId) -> &ComponentCodec {
        &self.codecs[section.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentCodec> {
        self.codecs.iter()
    }

    /// Every section's lines for `model`
    pub fn serialize(&self, model: &Model) -> Sections {
        self.codecs
            .iter()
            .map(|codec| (codec.section(), codec.serialize(model)))
            .collect()
    }

    /// Build a model from raw sections.
    ///
    /// The seed model already carries the document's version, so codecs that
    /// convert old content see it regardless of section order. Sections absent
    /// from `sections` get their codec's default.
    pub fn deserialize(&self, sections: &Sections) -> FormatResult<Model> {
        let seed = self.apply(SectionId::Version, sections, Model::new())?;

        let mut transformations = Vec::with_capacity(self.codecs.len());
        for codec in &self.codecs {
            match sections.get(&codec.section()) {
                Some(lines) => transformations.push(codec.deserialize(lines)?),
                None => {
                    debug!(section = %codec.section(), "Section absent, using default");
                    transformations.push(codec.default_transformer());
                }
            }
        }

        Ok(compose(transformations)(seed))
    }

    fn apply(&self, section: SectionId, sections: &Sections, model: Model) -> FormatResult<Model> {
        let codec = self.get(section);
        Ok(match sections.get(&section) {
            Some(lines) => codec.deserialize(lines)?(model),
            None => codec.default_transformation(model),
        })
    }

    pub fn validation_errors(&self, model: &Model) -> Vec<ValidationWarning> {
        self.codecs
            .iter()
            .filter_map(|codec| {
                codec.validation_errors(model).map(|message| {
                    debug!(section = %codec.section(), %message, "Validation warning");
                    ValidationWarning {
                        section: codec.section(),
                        message,
                    }
                })
            })
            .collect()
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
