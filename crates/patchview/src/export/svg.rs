//! SVG export backend.
//!
//! [`SvgBuilder`] resolves the style configuration once into an [`Svg`]
//! exporter; [`Svg`] then turns any number of [`PatchLayout`]s into SVG
//! documents.

mod connection;
mod node;

use log::{debug, info};
use svg::{Document, node::element as svg_element};

use patchview_core::{
    color::Color,
    draw::{LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::Size,
};

use super::{Error, Exporter};
use crate::{
    config::{LayoutOptions, StyleConfig},
    layout::{CanvasExtent, PatchLayout},
};

/// Builder for [`Svg`] exporters.
#[derive(Debug, Default)]
pub struct SvgBuilder {
    style: StyleConfig,
    options: LayoutOptions,
}

impl SvgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the style used for colors, strokes and fonts.
    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    /// Sets the layout options the layouts were computed with.
    pub fn with_options(mut self, options: &LayoutOptions) -> Self {
        self.options = *options;
        self
    }

    /// Resolves the style into an exporter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Style`] if a configured color or connection stroke
    /// does not parse.
    pub fn build(self) -> Result<Svg, Error> {
        let background = self.style.background_color().map_err(Error::Style)?;
        let node_fill = self.style.node_fill().map_err(Error::Style)?;
        let stroke_color = self.style.stroke_color().map_err(Error::Style)?;
        let connection_style = self.style.connection_style().map_err(Error::Style)?;
        let connection_cap = self.style.connection_cap().map_err(Error::Style)?;

        Ok(Svg {
            background,
            node_fill,
            outline: StrokeDefinition::solid(stroke_color, 1.0),
            connection: StrokeDefinition::solid(stroke_color, self.style.connection_width())
                .with_style(connection_style)
                .with_cap(connection_cap),
            font_family: self.style.font_family().to_string(),
            font_size: self.style.font_size(),
            text_padding: self.options.text_padding(),
        })
    }
}

/// SVG exporter with a resolved style.
#[derive(Debug, Clone)]
pub struct Svg {
    background: Option<Color>,
    node_fill: Color,
    outline: StrokeDefinition,
    connection: StrokeDefinition,
    font_family: String,
    font_size: f32,
    text_padding: f32,
}

impl Svg {
    /// Renders a patch layout into an SVG document.
    ///
    /// The document is exactly as large as the canvas extent; drawing
    /// happens inside a group shifted by the extent's translation.
    pub fn render_patch_layout(&self, layout: &PatchLayout) -> Document {
        let extent = layout.extent();
        let size = extent.size();

        let mut output = LayeredOutput::new();
        if let Some(background) = self.render_background(extent) {
            output.merge(background);
        }
        for node in layout.nodes() {
            output.merge(self.render_node(node));
        }
        for connection in layout.connections() {
            output.merge(self.render_connection(connection));
        }

        let translate = extent.translate();
        let main_group = output.render().into_iter().fold(
            svg_element::Group::new().set(
                "transform",
                format!("translate({}, {})", translate.x(), translate.y()),
            ),
            |group, node| group.add(node),
        );

        debug!(width = size.width(), height = size.height(); "SVG document rendered");

        Self::document(size).add(main_group)
    }

    fn document(size: Size) -> Document {
        Document::new()
            .set("version", "1.1")
            .set(
                "viewBox",
                format!("0 0 {} {}", size.width(), size.height()),
            )
            .set("width", size.width())
            .set("height", size.height())
    }

    /// Background covering the whole canvas, in untranslated coordinates.
    fn render_background(&self, extent: &CanvasExtent) -> Option<LayeredOutput> {
        let color = self.background.as_ref()?;
        let top_left = extent.translate().scale(-1.0);

        let rect = svg_element::Rectangle::new()
            .set("class", "background")
            .set("x", top_left.x())
            .set("y", top_left.y())
            .set("width", extent.width())
            .set("height", extent.height())
            .set("fill", color)
            .set("fill-opacity", color.alpha());

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Background, Box::new(rect));
        Some(output)
    }
}

impl Exporter for Svg {
    fn export_patch_layout(&self, layout: &PatchLayout) -> Result<String, Error> {
        let size = layout.extent().size();
        if !(size.width().is_finite() && size.height().is_finite()) {
            return Err(Error::Render(format!(
                "canvas extent is not finite ({} x {})",
                size.width(),
                size.height()
            )));
        }

        let doc = self.render_patch_layout(layout);
        info!(
            nodes_count = layout.nodes().len(),
            connections_count = layout.connections().len();
            "Patch exported to SVG"
        );

        Ok(doc.to_string())
    }
}
