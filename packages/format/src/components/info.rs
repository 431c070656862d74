use super::to_lines;
use crate::codec::{ComponentCodec, Transformation};
use crate::convert::InfoConverter;
use crate::model::Model;
use crate::section::SectionId;
use crate::version::{is_older_than, INFO_FORMAT_THRESHOLD};
use std::sync::Arc;

const EMPTY_INFO: &str = include_str!("../../assets/empty_info.md");

/// Info text a new model starts with
pub fn empty_info() -> String {
    EMPTY_INFO.trim_end().to_string()
}

pub fn codec(converter: Arc<dyn InfoConverter>) -> ComponentCodec {
    ComponentCodec::new(
        SectionId::Info,
        |model| to_lines(&model.info),
        move |lines| {
            let text = lines.join("\n");
            let converter = Arc::clone(&converter);
            let transformation: Transformation = Box::new(move |model: Model| {
                let info = if is_older_than(&model.version, INFO_FORMAT_THRESHOLD) {
                    converter.convert(&text)
                } else {
                    text
                };
                Model { info, ..model }
            });
            Ok(transformation)
        },
        |model| Model {
            info: empty_info(),
            ..model
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::lines;
    use crate::convert::LegacyInfoConverter;

    fn read(version: &str, section: &[&str]) -> String {
        let codec = codec(Arc::new(LegacyInfoConverter));
        let model = Model {
            version: version.to_string(),
            ..Model::new()
        };
        codec.deserialize(&lines(section)).unwrap()(model).info
    }

    #[test]
    fn test_old_info_is_converted() {
        assert_eq!(
            read("NetLogo 4.1", &["WHAT IS IT?", "-----------", "A model."]),
            "## WHAT IS IT?\nA model."
        );
    }

    #[test]
    fn test_current_info_is_untouched() {
        let section = ["WHAT IS IT?", "-----------", "A model."];
        assert_eq!(read("NetLogo 6.4.0", &section), section.join("\n"));
        assert_eq!(read("NetLogo 4.2pre2", &section), section.join("\n"));
    }

    #[test]
    fn test_empty_section_is_empty_info() {
        assert_eq!(read("NetLogo 6.4.0", &[]), "");
    }

    #[test]
    fn test_round_trip() {
        let codec = codec(Arc::new(LegacyInfoConverter));
        let model = Model {
            info: "## WHAT IS IT?\n\nA model.  ".to_string(),
            version: "NetLogo 6.4.0".to_string(),
            ..Model::new()
        };
        let read = codec.deserialize(&codec.serialize(&model)).unwrap()(model.clone());
        assert_eq!(read.info, model.info);
    }

    #[test]
    fn test_default_template() {
        let codec = codec(Arc::new(LegacyInfoConverter));
        let info = codec.default_transformation(Model::new()).info;
        assert!(info.starts_with("## WHAT IS IT?"));
        assert!(!info.ends_with('\n'));
    }
}
