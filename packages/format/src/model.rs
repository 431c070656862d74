use crate::section::SectionId;
use crate::shape::{LinkShape, VectorShape};
use crate::widget::Widget;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// In-memory form of a model document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub code: String,
    pub info: String,
    pub version: String,
    pub widgets: Vec<Widget>,
    pub turtle_shapes: Vec<VectorShape>,
    pub link_shapes: Vec<LinkShape>,
    /// Verbatim lines of sections without a structured codec
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra_sections: BTreeMap<SectionId, Vec<String>>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// The view widget, if the interface has one
    pub fn view(&self) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.is_view())
    }
}
