//! Widget blocks of the interface section.
//!
//! A widget block starts with a discriminator line (`BUTTON`, `SLIDER`, ...)
//! followed by one field per line. Fields are kept as written so that an
//! unmodified widget formats back to exactly the lines it was read from.

use crate::error::{FormatError, FormatResult};
use crate::literal::{Literal, LiteralEvaluator, StandardLiteralEvaluator};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetKind {
    View,
    Button,
    Slider,
    Switch,
    Chooser,
    InputBox,
    Monitor,
    Plot,
    Output,
    TextBox,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 10] = [
        WidgetKind::View,
        WidgetKind::Button,
        WidgetKind::Slider,
        WidgetKind::Switch,
        WidgetKind::Chooser,
        WidgetKind::InputBox,
        WidgetKind::Monitor,
        WidgetKind::Plot,
        WidgetKind::Output,
        WidgetKind::TextBox,
    ];

    /// First line of a block of this kind
    pub fn discriminator(self) -> &'static str {
        match self {
            WidgetKind::View => "GRAPHICS-WINDOW",
            WidgetKind::Button => "BUTTON",
            WidgetKind::Slider => "SLIDER",
            WidgetKind::Switch => "SWITCH",
            WidgetKind::Chooser => "CHOOSER",
            WidgetKind::InputBox => "INPUTBOX",
            WidgetKind::Monitor => "MONITOR",
            WidgetKind::Plot => "PLOT",
            WidgetKind::Output => "OUTPUT",
            WidgetKind::TextBox => "TEXTBOX",
        }
    }

    pub fn from_discriminator(line: &str) -> Option<Self> {
        let line = line.trim();
        Self::ALL.iter().copied().find(|k| k.discriminator() == line)
    }

    /// Field indices holding model code
    pub fn code_fields(self) -> &'static [usize] {
        match self {
            WidgetKind::Button | WidgetKind::Monitor => &[5],
            WidgetKind::Slider => &[6, 7, 9],
            _ => &[],
        }
    }

    fn min_fields(self) -> usize {
        match self {
            WidgetKind::Button | WidgetKind::Monitor | WidgetKind::Switch => 6,
            WidgetKind::Slider => 10,
            WidgetKind::Chooser => 8,
            WidgetKind::InputBox => 9,
            WidgetKind::TextBox => 5,
            WidgetKind::View | WidgetKind::Plot | WidgetKind::Output => 4,
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.discriminator())
    }
}

/// One control on the interface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub kind: WidgetKind,
    /// Lines following the discriminator
    pub fields: Vec<String>,
    /// Interpreted constants: chooser choices, or a numeric input box value
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constants: Vec<Literal>,
}

impl Widget {
    pub fn new(kind: WidgetKind, fields: Vec<String>) -> Self {
        Self {
            kind,
            fields,
            constants: Vec::new(),
        }
    }

    /// The view a new model starts with
    pub fn default_view() -> Self {
        let fields = [
            "210", "10", "647", "448", "-1", "-1", "13.0", "1", "10", "1", "1", "1", "0", "1",
            "1", "1", "-16", "16", "-16", "16", "0", "0", "1", "ticks", "30.0",
        ];
        Self::new(
            WidgetKind::View,
            fields.iter().map(|f| f.to_string()).collect(),
        )
    }

    pub fn is_view(&self) -> bool {
        self.kind == WidgetKind::View
    }

    /// Left, top, right, bottom
    pub fn bounds(&self) -> Option<[i64; 4]> {
        let mut bounds = [0; 4];
        for (slot, field) in bounds.iter_mut().zip(&self.fields) {
            *slot = field.trim().parse().ok()?;
        }
        (self.fields.len() >= 4).then_some(bounds)
    }

    pub fn code_fragments(&self) -> impl Iterator<Item = &str> {
        self.kind
            .code_fields()
            .iter()
            .filter_map(|i| self.fields.get(*i))
            .map(String::as_str)
    }

    pub fn code_fragments_mut(&mut self) -> impl Iterator<Item = &mut String> {
        let indices = self.kind.code_fields();
        self.fields
            .iter_mut()
            .enumerate()
            .filter(move |(i, _)| indices.contains(i))
            .map(|(_, field)| field)
    }
}

pub type ParseFn = fn(&[String], &dyn LiteralEvaluator) -> FormatResult<Widget>;
pub type FormatFn = fn(&Widget) -> String;

/// Parse and format functions for one widget discriminator
#[derive(Clone, Copy)]
pub struct WidgetReader {
    pub parse: ParseFn,
    pub format: FormatFn,
}

impl WidgetReader {
    pub const STANDARD: WidgetReader = WidgetReader {
        parse: parse_fields,
        format: format_fields,
    };
}

/// Widget grammar: readers keyed by discriminator plus the literal evaluator
/// they interpret constants with
#[derive(Clone)]
pub struct WidgetReaders {
    readers: HashMap<String, WidgetReader>,
    evaluator: Arc<dyn LiteralEvaluator>,
}

impl WidgetReaders {
    /// An empty table; every block is rejected until readers are registered
    pub fn new(evaluator: Arc<dyn LiteralEvaluator>) -> Self {
        Self {
            readers: HashMap::new(),
            evaluator,
        }
    }

    /// Readers for every built-in widget kind
    pub fn standard() -> Self {
        Self::with_evaluator(Arc::new(StandardLiteralEvaluator))
    }

    pub fn with_evaluator(evaluator: Arc<dyn LiteralEvaluator>) -> Self {
        let mut readers = Self::new(evaluator);
        for kind in WidgetKind::ALL {
            let reader = match kind {
                WidgetKind::Chooser => WidgetReader {
                    parse: parse_chooser,
                    format: format_fields,
                },
                WidgetKind::InputBox => WidgetReader {
                    parse: parse_input_box,
                    format: format_fields,
                },
                _ => WidgetReader::STANDARD,
            };
            readers.register(kind.discriminator(), reader);
        }
        readers
    }

    pub fn register(&mut self, discriminator: impl Into<String>, reader: WidgetReader) {
        self.readers.insert(discriminator.into(), reader);
    }

    pub fn parse(&self, block: &[String]) -> FormatResult<Widget> {
        let header = block
            .first()
            .map(|line| line.trim())
            .ok_or_else(|| FormatError::invalid_widget("unknown", "empty block"))?;
        let reader = self
            .readers
            .get(header)
            .ok_or_else(|| FormatError::invalid_widget(header, "no reader for this widget"))?;
        (reader.parse)(block, self.evaluator.as_ref())
    }

    /// Format a widget as block text, without the trailing blank line
    pub fn format(&self, widget: &Widget) -> String {
        let reader = self
            .readers
            .get(widget.kind.discriminator())
            .copied()
            .unwrap_or(WidgetReader::STANDARD);
        (reader.format)(widget)
    }
}

impl Default for WidgetReaders {
    fn default() -> Self {
        Self::standard()
    }
}

/// Split a block into kind and fields, checking the field count and bounds
pub fn parse_fields(block: &[String], _evaluator: &dyn LiteralEvaluator) -> FormatResult<Widget> {
    let (header, fields) = block
        .split_first()
        .ok_or_else(|| FormatError::invalid_widget("unknown", "empty block"))?;
    let kind = WidgetKind::from_discriminator(header)
        .ok_or_else(|| FormatError::invalid_widget(header.trim(), "unknown discriminator"))?;

    if fields.len() < kind.min_fields() {
        return Err(FormatError::invalid_widget(
            kind.discriminator(),
            format!(
                "expected at least {} fields, found {}",
                kind.min_fields(),
                fields.len()
            ),
        ));
    }

    let widget = Widget::new(kind, fields.to_vec());
    if widget.bounds().is_none() {
        return Err(FormatError::invalid_widget(
            kind.discriminator(),
            "bounds must be numbers",
        ));
    }
    Ok(widget)
}

fn parse_chooser(block: &[String], evaluator: &dyn LiteralEvaluator) -> FormatResult<Widget> {
    let mut widget = parse_fields(block, evaluator)?;
    widget.constants = evaluator
        .read_literals(&widget.fields[6])
        .map_err(|e| {
            FormatError::invalid_widget(WidgetKind::Chooser.discriminator(), e.to_string())
        })?;
    Ok(widget)
}

fn parse_input_box(block: &[String], evaluator: &dyn LiteralEvaluator) -> FormatResult<Widget> {
    let mut widget = parse_fields(block, evaluator)?;
    if widget.fields[8].trim() == "Number" {
        let value = evaluator
            .read_literal(&widget.fields[5])
            .map_err(|e| {
                FormatError::invalid_widget(WidgetKind::InputBox.discriminator(), e.to_string())
            })?;
        widget.constants = vec![value];
    }
    Ok(widget)
}

pub fn format_fields(widget: &Widget) -> String {
    let mut output = String::from(widget.kind.discriminator());
    for field in &widget.fields {
        output.push('\n');
        output.push_str(field);
    }
    output
}
