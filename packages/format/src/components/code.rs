use super::to_lines;
use crate::codec::{ComponentCodec, Transformation};
use crate::convert::SourceConverter;
use crate::model::Model;
use crate::section::SectionId;
use std::sync::Arc;
use tracing::debug;

/// Model code. Trailing whitespace is trimmed on write; on read the code is
/// passed through `converter` keyed by the model's version.
///
/// A single leading empty line is dropped when the document is split, so
/// code starting with a blank line loses it on the next read.
pub fn codec(converter: Arc<dyn SourceConverter>) -> ComponentCodec {
    ComponentCodec::new(
        SectionId::Code,
        |model| {
            to_lines(&model.code)
                .into_iter()
                .map(|line| line.trim_end().to_string())
                .collect()
        },
        move |lines| {
            let source = lines.join("\n");
            let converter = Arc::clone(&converter);
            debug!(lines = lines.len(), "Read code section");
            let transformation: Transformation = Box::new(move |model: Model| Model {
                code: converter.convert(&model.version, &source),
                ..model
            });
            Ok(transformation)
        },
        |model| Model {
            code: String::new(),
            ..model
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::lines;
    use crate::convert::{IdentityConverter, RenameRules};

    #[test]
    fn test_serialize_trims_trailing_whitespace() {
        let codec = codec(Arc::new(IdentityConverter));
        let model = Model {
            code: "to go  \n  fd 1\t\nend".to_string(),
            ..Model::new()
        };
        assert_eq!(codec.serialize(&model), lines(&["to go", "  fd 1", "end"]));
    }

    #[test]
    fn test_trimming_is_idempotent() {
        let codec = codec(Arc::new(IdentityConverter));
        let model = Model {
            code: "to go  \nend   ".to_string(),
            ..Model::new()
        };

        let once = codec.deserialize(&codec.serialize(&model)).unwrap()(Model::new());
        let twice = codec.deserialize(&codec.serialize(&once)).unwrap()(Model::new());
        assert_eq!(once.code, "to go\nend");
        assert_eq!(once.code, twice.code);
    }

    #[test]
    fn test_empty_section_is_empty_code() {
        let codec = codec(Arc::new(IdentityConverter));
        let model = Model {
            code: "old".to_string(),
            ..Model::new()
        };
        assert_eq!(codec.deserialize(&[]).unwrap()(model).code, "");
        assert!(codec.serialize(&Model::new()).is_empty());
    }

    #[test]
    fn test_converts_old_code() {
        let rules = RenameRules::new().with_rule("NetLogo 6.0", "task", "->");
        let codec = codec(Arc::new(rules));

        let old = Model {
            version: "NetLogo 5.3.1".to_string(),
            ..Model::new()
        };
        let current = Model {
            version: "NetLogo 6.4.0".to_string(),
            ..Model::new()
        };

        let source = lines(&["run task [ go ]"]);
        assert_eq!(codec.deserialize(&source).unwrap()(old).code, "run -> [ go ]");
        assert_eq!(codec.deserialize(&source).unwrap()(current).code, "run task [ go ]");
    }

    #[test]
    fn test_default_is_empty() {
        let codec = codec(Arc::new(IdentityConverter));
        let model = Model {
            code: "to go end".to_string(),
            ..Model::new()
        };
        assert_eq!(codec.default_transformation(model).code, "");
    }
}
