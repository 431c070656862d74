//! Turtle and link shape sections. Unlike code and info, an empty shape
//! section means "use the built-in shapes".

use crate::codec::{ComponentCodec, Transformation};
use crate::model::Model;
use crate::section::SectionId;
use crate::shape::{default_link_shapes, default_turtle_shapes, ShapeGrammar};
use std::sync::Arc;
use tracing::debug;

fn is_blank(lines: &[String]) -> bool {
    lines.iter().all(String::is_empty)
}

fn with_default_turtle_shapes(model: Model) -> Model {
    Model {
        turtle_shapes: default_turtle_shapes(),
        ..model
    }
}

fn with_default_link_shapes(model: Model) -> Model {
    Model {
        link_shapes: default_link_shapes(),
        ..model
    }
}

pub fn turtle_shapes_codec(grammar: Arc<dyn ShapeGrammar>) -> ComponentCodec {
    let writer = Arc::clone(&grammar);
    ComponentCodec::new(
        SectionId::TurtleShapes,
        move |model| writer.format_vector_shapes(&model.turtle_shapes),
        move |lines| {
            if is_blank(lines) {
                return Ok(Box::new(with_default_turtle_shapes) as Transformation);
            }
            let turtle_shapes = grammar.parse_vector_shapes(lines)?;
            debug!(shapes = turtle_shapes.len(), "Read turtle shapes");
            let transformation: Transformation = Box::new(move |model: Model| Model {
                turtle_shapes,
                ..model
            });
            Ok(transformation)
        },
        with_default_turtle_shapes,
    )
    .with_validation(|model| {
        if model.turtle_shapes.iter().any(|s| s.name == "default") {
            None
        } else {
            Some("no 'default' turtle shape".to_string())
        }
    })
}

pub fn link_shapes_codec(grammar: Arc<dyn ShapeGrammar>) -> ComponentCodec {
    let writer = Arc::clone(&grammar);
    ComponentCodec::new(
        SectionId::LinkShapes,
        move |model| writer.format_link_shapes(&model.link_shapes),
        move |lines| {
            if is_blank(lines) {
                return Ok(Box::new(with_default_link_shapes) as Transformation);
            }
            let link_shapes = grammar.parse_link_shapes(lines)?;
            debug!(shapes = link_shapes.len(), "Read link shapes");
            let transformation: Transformation = Box::new(move |model: Model| Model {
                link_shapes,
                ..model
            });
            Ok(transformation)
        },
        with_default_link_shapes,
    )
    .with_validation(|model| {
        if model.link_shapes.iter().any(|s| s.name == "default") {
            None
        } else {
            Some("no 'default' link shape".to_string())
        }
    })
}
