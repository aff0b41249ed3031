//! Configuration types for patch rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every field is optional and falls back to its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutOptions`] - Geometry constants of the layout engine.
//! - [`StyleConfig`] - Colors, connection stroke and font of the SVG output.
//!
//! # Example
//!
//! ```
//! # use patchview::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [layout]
//!     scale_ratio = 2.0
//!
//!     [style]
//!     background_color = "white"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.layout().scale_ratio(), 2.0);
//! assert_eq!(config.layout().padding(), 10.0);
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;

use patchview_core::{
    color::Color,
    draw::{StrokeCap, StrokeStyle},
};

/// Top-level configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutOptions,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutOptions, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout options.
    pub fn layout(&self) -> &LayoutOptions {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks both sections.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.layout.validate()?;
        self.style.validate()
    }
}

/// Geometry constants of the layout engine.
///
/// A single immutable value of this type is passed to every layout call.
/// Lengths are in canvas units; `scale_ratio` converts source positions to
/// canvas positions.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    portlet_width: f32,
    portlet_height: f32,
    min_node_width: f32,
    min_node_height: f32,
    scale_ratio: f32,
    padding: f32,
    glyph_width: f32,
    glyph_height: f32,
    text_padding: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            portlet_width: 5.0,
            portlet_height: 3.5,
            min_node_width: 25.0,
            min_node_height: 20.0,
            scale_ratio: 1.2,
            padding: 10.0,
            glyph_width: 8.0,
            glyph_height: 9.0,
            text_padding: 6.0,
        }
    }
}

impl LayoutOptions {
    pub fn portlet_width(&self) -> f32 {
        self.portlet_width
    }

    pub fn portlet_height(&self) -> f32 {
        self.portlet_height
    }

    pub fn min_node_width(&self) -> f32 {
        self.min_node_width
    }

    pub fn min_node_height(&self) -> f32 {
        self.min_node_height
    }

    /// Factor applied to declared node positions.
    pub fn scale_ratio(&self) -> f32 {
        self.scale_ratio
    }

    /// Margin kept around the bounding box of all nodes.
    pub fn padding(&self) -> f32 {
        self.padding
    }

    /// Advance of one label character.
    pub fn glyph_width(&self) -> f32 {
        self.glyph_width
    }

    pub fn glyph_height(&self) -> f32 {
        self.glyph_height
    }

    /// Horizontal space between a node's border and its label.
    pub fn text_padding(&self) -> f32 {
        self.text_padding
    }

    pub fn with_portlet_size(mut self, width: f32, height: f32) -> Self {
        self.portlet_width = width;
        self.portlet_height = height;
        self
    }

    pub fn with_min_node_size(mut self, width: f32, height: f32) -> Self {
        self.min_node_width = width;
        self.min_node_height = height;
        self
    }

    pub fn with_scale_ratio(mut self, scale_ratio: f32) -> Self {
        self.scale_ratio = scale_ratio;
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_glyph_size(mut self, width: f32, height: f32) -> Self {
        self.glyph_width = width;
        self.glyph_height = height;
        self
    }

    pub fn with_text_padding(mut self, text_padding: f32) -> Self {
        self.text_padding = text_padding;
        self
    }

    /// Checks that every option is a positive finite number.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending option.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("portlet_width", self.portlet_width),
            ("portlet_height", self.portlet_height),
            ("min_node_width", self.min_node_width),
            ("min_node_height", self.min_node_height),
            ("scale_ratio", self.scale_ratio),
            ("padding", self.padding),
            ("glyph_width", self.glyph_width),
            ("glyph_height", self.glyph_height),
            ("text_padding", self.text_padding),
        ];

        match fields
            .iter()
            .find(|(_, value)| !(value.is_finite() && *value > 0.0))
        {
            Some((name, value)) => Err(format!(
                "layout option `{name}` must be a positive number, got {value}"
            )),
            None => Ok(()),
        }
    }
}

/// Visual styling configuration for rendered patches.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Canvas background, as a color string. No background when unset.
    background_color: Option<String>,
    node_fill: String,
    stroke_color: String,
    connection_width: f32,
    /// `solid`, `dashed`, `dotted` or a raw dasharray such as `"6,2"`.
    connection_style: String,
    /// `butt`, `round` or `square`.
    connection_cap: String,
    font_family: String,
    font_size: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            node_fill: "white".to_string(),
            stroke_color: "black".to_string(),
            connection_width: 2.0,
            connection_style: "solid".to_string(),
            connection_cap: "butt".to_string(),
            font_family: "monospace".to_string(),
            font_size: 12.0,
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the fill [`Color`] of node boxes.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn node_fill(&self) -> Result<Color, String> {
        Color::new(&self.node_fill).map_err(|err| format!("Invalid node fill in config: {err}"))
    }

    /// Returns the [`Color`] of outlines, portlets and connections.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn stroke_color(&self) -> Result<Color, String> {
        Color::new(&self.stroke_color)
            .map_err(|err| format!("Invalid stroke color in config: {err}"))
    }

    pub fn connection_width(&self) -> f32 {
        self.connection_width
    }

    /// Returns the dash pattern of connection lines.
    ///
    /// # Errors
    ///
    /// Returns an error if a raw dasharray contains anything but
    /// non-negative numbers.
    pub fn connection_style(&self) -> Result<StrokeStyle, String> {
        let style: StrokeStyle = self.connection_style.parse()?;

        if let StrokeStyle::Custom(pattern) = &style {
            let valid = pattern
                .split([',', ' '])
                .filter(|part| !part.is_empty())
                .all(|part| part.parse::<f32>().is_ok_and(|v| v.is_finite() && v >= 0.0));
            if !valid {
                return Err(format!(
                    "Invalid connection style in config: `{pattern}` is neither solid, dashed, dotted nor a dasharray"
                ));
            }
        }

        Ok(style)
    }

    /// Returns the line cap of connection lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the cap name is unknown.
    pub fn connection_cap(&self) -> Result<StrokeCap, String> {
        self.connection_cap
            .parse()
            .map_err(|err| format!("Invalid connection cap in config: {err}"))
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Checks that every color parses and that sizes are positive.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.background_color()?;
        self.node_fill()?;
        self.stroke_color()?;
        self.connection_style()?;
        self.connection_cap()?;

        if !(self.connection_width.is_finite() && self.connection_width > 0.0) {
            return Err(format!(
                "style option `connection_width` must be a positive number, got {}",
                self.connection_width
            ));
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(format!(
                "style option `font_size` must be a positive number, got {}",
                self.font_size
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_layout_options_defaults() {
        let options = LayoutOptions::default();

        assert_approx_eq!(f32, options.portlet_width(), 5.0);
        assert_approx_eq!(f32, options.portlet_height(), 3.5);
        assert_approx_eq!(f32, options.min_node_width(), 25.0);
        assert_approx_eq!(f32, options.min_node_height(), 20.0);
        assert_approx_eq!(f32, options.scale_ratio(), 1.2);
        assert_approx_eq!(f32, options.padding(), 10.0);
        assert_approx_eq!(f32, options.glyph_width(), 8.0);
        assert_approx_eq!(f32, options.glyph_height(), 9.0);
        assert_approx_eq!(f32, options.text_padding(), 6.0);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_layout_options_partial_toml() {
        let options: LayoutOptions = toml::from_str("padding = 4.0\nglyph_width = 7").unwrap();

        assert_approx_eq!(f32, options.padding(), 4.0);
        assert_approx_eq!(f32, options.glyph_width(), 7.0);
        assert_approx_eq!(f32, options.scale_ratio(), 1.2);
    }

    #[test]
    fn test_layout_options_rejects_non_positive() {
        let err = LayoutOptions::default()
            .with_scale_ratio(0.0)
            .validate()
            .unwrap_err();
        assert!(err.contains("scale_ratio"));

        let err = LayoutOptions::default()
            .with_padding(f32::NAN)
            .validate()
            .unwrap_err();
        assert!(err.contains("padding"));
    }

    #[test]
    fn test_style_defaults() {
        let style = StyleConfig::default();

        assert_eq!(style.background_color(), Ok(None));
        assert_eq!(style.stroke_color().unwrap().to_string(), "black");
        assert_approx_eq!(f32, style.connection_width(), 2.0);
        assert!(style.validate().is_ok());
    }

    #[test]
    fn test_style_invalid_color() {
        let style = StyleConfig::default().with_background_color("no-such-color");
        assert!(style.background_color().is_err());
        assert!(style.validate().is_err());
    }

    #[test]
    fn test_style_connection_stroke() {
        let style: StyleConfig =
            toml::from_str("connection_style = \"dashed\"\nconnection_cap = \"round\"").unwrap();

        assert_eq!(style.connection_style(), Ok(StrokeStyle::Dashed));
        assert_eq!(style.connection_cap(), Ok(StrokeCap::Round));
        assert!(style.validate().is_ok());

        let defaults = StyleConfig::default();
        assert_eq!(defaults.connection_style(), Ok(StrokeStyle::Solid));
        assert_eq!(defaults.connection_cap(), Ok(StrokeCap::Butt));
    }

    #[test]
    fn test_style_custom_dasharray() {
        let style: StyleConfig = toml::from_str("connection_style = \"6, 2\"").unwrap();
        assert_eq!(
            style.connection_style(),
            Ok(StrokeStyle::Custom("6, 2".to_string()))
        );

        let style: StyleConfig = toml::from_str("connection_style = \"wavy\"").unwrap();
        assert!(style.connection_style().is_err());
        assert!(style.validate().is_err());
    }

    #[test]
    fn test_style_unknown_cap() {
        let style: StyleConfig = toml::from_str("connection_cap = \"pointy\"").unwrap();
        let err = style.validate().unwrap_err();
        assert!(err.contains("pointy"));
    }

    #[test]
    fn test_app_config_empty_toml_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(*config.layout(), LayoutOptions::default());
        assert!(config.validate().is_ok());
    }
}
