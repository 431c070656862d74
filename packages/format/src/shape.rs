//! Turtle and link shape definitions.
//!
//! Both shape sections hold blank-line separated blocks. A vector shape block
//! is its name, `true`/`false` for rotatable, the editable color index, then
//! one drawing element per line. A link shape block is its name, curviness,
//! three line-style lines, then a `link direction` vector block.

use crate::error::{FormatError, FormatResult};
use crate::segmenter::{join_blocks, segment_blocks};
use serde::{Deserialize, Serialize};

const ELEMENT_KINDS: [&str; 4] = ["Line", "Circle", "Rectangle", "Polygon"];
const DIRECTION_INDICATOR: &str = "link direction";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorShape {
    pub name: String,
    pub rotatable: bool,
    pub editable_color_index: u32,
    pub elements: Vec<String>,
}

impl VectorShape {
    pub fn new(name: impl Into<String>, rotatable: bool, elements: &[&str]) -> Self {
        Self {
            name: name.into(),
            rotatable,
            editable_color_index: 0,
            elements: elements.iter().map(|e| e.to_string()).collect(),
        }
    }

    fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.name.clone(),
            self.rotatable.to_string(),
            self.editable_color_index.to_string(),
        ];
        lines.extend(self.elements.iter().cloned());
        lines
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkShape {
    pub name: String,
    /// Kept as written so that `0.0` stays `0.0`
    pub curviness: String,
    pub line_styles: Vec<String>,
    pub direction_indicator: VectorShape,
}

impl LinkShape {
    fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![self.name.clone(), self.curviness.clone()];
        lines.extend(self.line_styles.iter().cloned());
        lines.extend(self.direction_indicator.to_lines());
        lines
    }
}

/// Reads and writes the shape sections
pub trait ShapeGrammar: Send + Sync {
    fn parse_vector_shapes(&self, lines: &[String]) -> FormatResult<Vec<VectorShape>>;

    /// Section lines, each shape followed by a blank line
    fn format_vector_shapes(&self, shapes: &[VectorShape]) -> Vec<String>;

    fn parse_link_shapes(&self, lines: &[String]) -> FormatResult<Vec<LinkShape>>;

    /// Section lines, each shape followed by a blank line
    fn format_link_shapes(&self, shapes: &[LinkShape]) -> Vec<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardShapeGrammar;

impl ShapeGrammar for StandardShapeGrammar {
    fn parse_vector_shapes(&self, lines: &[String]) -> FormatResult<Vec<VectorShape>> {
        segment_blocks(lines)
            .iter()
            .map(|block| parse_vector_block(block))
            .collect()
    }

    fn format_vector_shapes(&self, shapes: &[VectorShape]) -> Vec<String> {
        join_blocks(shapes.iter().map(VectorShape::to_lines))
    }

    fn parse_link_shapes(&self, lines: &[String]) -> FormatResult<Vec<LinkShape>> {
        segment_blocks(lines)
            .iter()
            .map(|block| parse_link_block(block))
            .collect()
    }

    fn format_link_shapes(&self, shapes: &[LinkShape]) -> Vec<String> {
        join_blocks(shapes.iter().map(LinkShape::to_lines))
    }
}

fn parse_vector_block(block: &[String]) -> FormatResult<VectorShape> {
    let name = block[0].clone();
    if block.len() < 3 {
        return Err(FormatError::invalid_shape(&name, "missing rotatable flag or color index"));
    }

    let rotatable = match block[1].trim() {
        "true" => true,
        "false" => false,
        other => {
            return Err(FormatError::invalid_shape(
                &name,
                format!("expected true or false, found '{}'", other),
            ))
        }
    };

    let editable_color_index = block[2].trim().parse::<u32>().map_err(|_| {
        FormatError::invalid_shape(&name, format!("invalid color index '{}'", block[2]))
    })?;

    for element in &block[3..] {
        let kind = element.split_whitespace().next().unwrap_or("");
        if !ELEMENT_KINDS.contains(&kind) {
            return Err(FormatError::invalid_shape(
                &name,
                format!("unknown element '{}'", element),
            ));
        }
    }

    Ok(VectorShape {
        name,
        rotatable,
        editable_color_index,
        elements: block[3..].to_vec(),
    })
}

fn parse_link_block(block: &[String]) -> FormatResult<LinkShape> {
    let name = block[0].clone();
    if block.len() < 8 {
        return Err(FormatError::invalid_shape(&name, "incomplete link shape"));
    }

    if block[1].trim().parse::<f64>().is_err() {
        return Err(FormatError::invalid_shape(
            &name,
            format!("invalid curviness '{}'", block[1]),
        ));
    }

    if block[5].trim() != DIRECTION_INDICATOR {
        return Err(FormatError::invalid_shape(
            &name,
            format!("expected '{}', found '{}'", DIRECTION_INDICATOR, block[5]),
        ));
    }

    Ok(LinkShape {
        name,
        curviness: block[1].clone(),
        line_styles: block[2..5].to_vec(),
        direction_indicator: parse_vector_block(&block[5..])?,
    })
}

/// Turtle shapes a new model starts with
pub fn default_turtle_shapes() -> Vec<VectorShape> {
    vec![
        VectorShape::new(
            "default",
            true,
            &["Polygon -7500403 true true 150 5 40 250 150 205 260 250"],
        ),
        VectorShape::new("circle", false, &["Circle -7500403 true true 0 0 300"]),
        VectorShape::new("dot", false, &["Circle -7500403 true true 90 90 120"]),
        VectorShape::new("line", true, &["Line -7500403 true 150 0 150 300"]),
        VectorShape::new("square", false, &["Rectangle -7500403 true true 30 30 270 270"]),
        VectorShape::new(
            "triangle",
            false,
            &["Polygon -7500403 true true 150 30 15 255 285 255"],
        ),
    ]
}

/// Link shapes a new model starts with
pub fn default_link_shapes() -> Vec<LinkShape> {
    vec![LinkShape {
        name: "default".to_string(),
        curviness: "0.0".to_string(),
        line_styles: vec![
            "-0.2 0 0.0 1.0".to_string(),
            "0.0 1 1.0 0.0".to_string(),
            "0.2 0 0.0 1.0".to_string(),
        ],
        direction_indicator: VectorShape::new(
            DIRECTION_INDICATOR,
            true,
            &[
                "Line -7500403 true 150 150 90 180",
                "Line -7500403 true 150 150 210 180",
            ],
        ),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    const TURTLES: &str = "\
default
true
0
Polygon -7500403 true true 150 5 40 250 150 205 260 250

bug
true
0
Circle -7500403 true true 96 182 108
Circle -7500403 true true 110 127 80
";

    const LINKS: &str = "\
default
0.0
-0.2 0 0.0 1.0
0.0 1 1.0 0.0
0.2 0 0.0 1.0
link direction
true
0
Line -7500403 true 150 150 90 180
Line -7500403 true 150 150 210 180
";

    #[test]
    fn test_parse_turtle_shapes() {
        let shapes = StandardShapeGrammar.parse_vector_shapes(&lines(TURTLES)).unwrap();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[1].name, "bug");
        assert!(shapes[1].rotatable);
        assert_eq!(shapes[1].elements.len(), 2);
    }

    #[test]
    fn test_turtle_shapes_format_exactly() {
        let source = lines(TURTLES);
        let shapes = StandardShapeGrammar.parse_vector_shapes(&source).unwrap();
        let mut expected = source.clone();
        expected.push(String::new());
        assert_eq!(StandardShapeGrammar.format_vector_shapes(&shapes), expected);
    }

    #[test]
    fn test_parse_link_shapes() {
        let shapes = StandardShapeGrammar.parse_link_shapes(&lines(LINKS)).unwrap();
        assert_eq!(shapes, default_link_shapes());
    }

    #[test]
    fn test_rejects_bad_flag() {
        let err = StandardShapeGrammar
            .parse_vector_shapes(&lines("arrow\nmaybe\n0"))
            .unwrap_err();
        assert!(matches!(err, FormatError::InvalidShape { ref shape, .. } if shape == "arrow"));
    }

    #[test]
    fn test_rejects_unknown_element() {
        assert!(StandardShapeGrammar
            .parse_vector_shapes(&lines("arrow\ntrue\n0\nSpline 1 2 3"))
            .is_err());
    }

    #[test]
    fn test_rejects_incomplete_link_shape() {
        assert!(StandardShapeGrammar
            .parse_link_shapes(&lines("default\n0.0\n-0.2 0 0.0 1.0"))
            .is_err());
    }

    #[test]
    fn test_defaults_read_back() {
        let grammar = StandardShapeGrammar;
        let turtles = default_turtle_shapes();
        let text = grammar.format_vector_shapes(&turtles);
        assert_eq!(grammar.parse_vector_shapes(&text).unwrap(), turtles);
        assert!(turtles.iter().any(|s| s.name == "default"));
    }
}
