use crate::codec::{ComponentCodec, Transformation};
use crate::model::Model;
use crate::section::SectionId;
use crate::version::{Version, CURRENT_VERSION};

pub fn codec() -> ComponentCodec {
    ComponentCodec::new(
        SectionId::Version,
        |model| vec![model.version.clone()],
        |lines| {
            let version = lines.join("\n").trim().to_string();
            let transformation: Transformation =
                Box::new(move |model: Model| Model { version, ..model });
            Ok(transformation)
        },
        |model| Model {
            version: CURRENT_VERSION.to_string(),
            ..model
        },
    )
    .with_validation(|model| match Version::parse(&model.version) {
        Some(_) => None,
        None => Some(format!("unrecognized version '{}'", model.version)),
    })
}
