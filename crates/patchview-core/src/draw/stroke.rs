//! Stroke and line-style definitions.
//!
//! - [`StrokeDefinition`]: color, width, dash style and cap of a line
//! - [`StrokeStyle`]: line patterns (solid, dashed, dotted, custom)
//! - [`StrokeCap`]: how line endpoints are rendered
//! - [`apply_stroke!`](crate::apply_stroke!): applies a stroke to an SVG element
//!
//! # SVG Attribute Mapping
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `stroke`, `stroke-opacity` | `"black"`, `0.5` |
//! | `width` | `stroke-width` | `2.0` |
//! | `style` | `stroke-dasharray` | `"5,5"` |
//! | `cap` | `stroke-linecap` | `"butt"`, `"round"`, `"square"` |

use std::str::FromStr;

use crate::color::Color;

/// Visual pattern of a stroke.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    /// 5px dash, 5px gap
    Dashed,
    /// 2px dot, 3px gap
    Dotted,
    /// Raw SVG dasharray, e.g. "10,5,2,3"
    Custom(String),
}

impl FromStr for StrokeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            _ => Ok(Self::Custom(s.to_string())),
        }
    }
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5".to_string()),
            Self::Dotted => Some("2,3".to_string()),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }
}

/// Defines how line endpoints are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl StrokeCap {
    /// Returns the SVG stroke-linecap value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

impl FromStr for StrokeCap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "butt" => Ok(Self::Butt),
            "round" => Ok(Self::Round),
            "square" => Ok(Self::Square),
            _ => Err(format!(
                "invalid stroke cap `{s}`, valid values: butt, round, square"
            )),
        }
    }
}

/// A stroke definition for node outlines, portlets and connection lines.
///
/// # Examples
///
/// ```
/// use patchview_core::draw::{StrokeDefinition, StrokeCap};
/// use patchview_core::color::Color;
///
/// let connection = StrokeDefinition::solid(Color::default(), 2.0).with_cap(StrokeCap::Round);
/// assert_eq!(connection.width(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
    cap: StrokeCap,
}

impl StrokeDefinition {
    /// Creates a new stroke with the given color and width, solid with butt caps.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
            cap: StrokeCap::Butt,
        }
    }

    /// Creates a solid stroke.
    pub fn solid(color: Color, width: f32) -> Self {
        Self::new(color, width)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    /// Returns a copy of this stroke with a different cap.
    pub fn with_cap(mut self, cap: StrokeCap) -> Self {
        self.cap = cap;
        self
    }

    /// Returns a copy of this stroke with a different style.
    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }
}

impl Default for StrokeDefinition {
    /// Black, 1px, solid
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

/// Applies every attribute of a [`StrokeDefinition`] to an SVG element.
///
/// ```
/// use patchview_core::draw::StrokeDefinition;
/// use svg::node::element::Line;
///
/// let stroke = StrokeDefinition::default();
/// let line = patchview_core::apply_stroke!(Line::new(), &stroke);
/// assert!(line.to_string().contains("stroke-width"));
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
            .set("stroke-linecap", $stroke.cap().to_svg_value());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_default() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_string(), "black");
        assert_eq!(*stroke.style(), StrokeStyle::Solid);
        assert_eq!(stroke.cap(), StrokeCap::Butt);
    }

    #[test]
    fn test_stroke_builders() {
        let stroke = StrokeDefinition::solid(Color::default(), 2.0)
            .with_style(StrokeStyle::Dotted)
            .with_cap(StrokeCap::Square);
        assert_eq!(stroke.style().to_svg_value().as_deref(), Some("2,3"));
        assert_eq!(stroke.cap().to_svg_value(), "square");
    }

    #[test]
    fn test_stroke_style_from_str() {
        assert_eq!("dotted".parse::<StrokeStyle>().unwrap(), StrokeStyle::Dotted);
        assert_eq!(
            "4,2".parse::<StrokeStyle>().unwrap(),
            StrokeStyle::Custom("4,2".to_string())
        );
    }

    #[test]
    fn test_stroke_cap_from_str() {
        assert_eq!("round".parse::<StrokeCap>().unwrap(), StrokeCap::Round);
        assert!("pointy".parse::<StrokeCap>().is_err());
    }

    #[test]
    fn test_apply_stroke_sets_dasharray_only_when_patterned() {
        use svg::node::element::Line;

        let solid = crate::apply_stroke!(Line::new(), &StrokeDefinition::default()).to_string();
        assert!(!solid.contains("stroke-dasharray"));

        let dashed = StrokeDefinition::default().with_style(StrokeStyle::Dashed);
        let dashed = crate::apply_stroke!(Line::new(), &dashed).to_string();
        assert!(dashed.contains(r#"stroke-dasharray="5,5""#));
    }
}
