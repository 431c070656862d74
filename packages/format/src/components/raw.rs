use crate::codec::{ComponentCodec, Transformation};
use crate::model::Model;
use crate::section::SectionId;

/// Carries a section's lines through unchanged via `Model::extra_sections`
pub fn codec(section: SectionId) -> ComponentCodec {
    ComponentCodec::new(
        section,
        move |model| model.extra_sections.get(&section).cloned().unwrap_or_default(),
        move |lines| {
            let lines = lines.to_vec();
            let transformation: Transformation = Box::new(move |mut model: Model| {
                if lines.is_empty() {
                    model.extra_sections.remove(&section);
                } else {
                    model.extra_sections.insert(section, lines);
                }
                model
            });
            Ok(transformation)
        },
        move |mut model| {
            model.extra_sections.remove(&section);
            model
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::lines;

    #[test]
    fn test_passthrough() {
        let codec = codec(SectionId::PreviewCommands);
        let section = lines(&["setup", "repeat 75 [ go ]"]);
        let model = codec.deserialize(&section).unwrap()(Model::new());
        assert_eq!(model.extra_sections[&SectionId::PreviewCommands], section);
        assert_eq!(codec.serialize(&model), section);
    }

    #[test]
    fn test_empty_section_leaves_no_entry() {
        let codec = codec(SectionId::BehaviorSpace);
        let model = codec.deserialize(&[]).unwrap()(Model::new());
        assert!(model.extra_sections.is_empty());
        assert!(codec.serialize(&model).is_empty());
        assert_eq!(codec.default_transformation(Model::new()), Model::new());
    }
}
