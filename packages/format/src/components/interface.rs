use super::to_lines;
use crate::codec::{ComponentCodec, Transformation};
use crate::convert::SourceConverter;
use crate::model::Model;
use crate::section::SectionId;
use crate::segmenter::{join_blocks, segment_blocks};
use crate::widget::{Widget, WidgetReaders};
use std::sync::Arc;
use tracing::debug;

/// Widgets of the interface, each written as a block followed by a blank line.
///
/// A widget whose formatted text contains a blank line does not read back
/// as a single widget.
pub fn codec(readers: WidgetReaders, converter: Arc<dyn SourceConverter>) -> ComponentCodec {
    let writer = readers.clone();
    ComponentCodec::new(
        SectionId::Interface,
        move |model| join_blocks(model.widgets.iter().map(|w| to_lines(&writer.format(w)))),
        move |lines| {
            let widgets = segment_blocks(lines)
                .iter()
                .map(|block| readers.parse(block))
                .collect::<Result<Vec<_>, _>>()?;
            debug!(widgets = widgets.len(), "Read interface section");

            let converter = Arc::clone(&converter);
            let transformation: Transformation = Box::new(move |model: Model| {
                let widgets = widgets
                    .into_iter()
                    .map(|mut widget| {
                        for fragment in widget.code_fragments_mut() {
                            *fragment = converter.convert(&model.version, fragment);
                        }
                        widget
                    })
                    .collect();
                Model { widgets, ..model }
            });
            Ok(transformation)
        },
        |model| Model {
            widgets: vec![Widget::default_view()],
            ..model
        },
    )
    .with_validation(|model| {
        if model.view().is_none() {
            Some("interface has no view widget".to_string())
        } else {
            None
        }
    })
}
