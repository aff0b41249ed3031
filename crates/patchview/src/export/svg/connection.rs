//! SVG rendering for connection lines.

use svg::node::element as svg_element;

use patchview_core::{
    apply_stroke,
    draw::{LayeredOutput, RenderLayer},
};

use super::Svg;
use crate::layout::ConnectionLayout;

impl Svg {
    pub(super) fn render_connection(&self, connection: &ConnectionLayout) -> LayeredOutput {
        let source = connection.source();
        let sink = connection.sink();

        let line = svg_element::Line::new()
            .set("class", "connection")
            .set("data-connection-index", connection.index())
            .set("x1", source.x())
            .set("y1", source.y())
            .set("x2", sink.x())
            .set("y2", sink.y());

        let mut output = LayeredOutput::new();
        output.add_to_layer(
            RenderLayer::Connection,
            Box::new(apply_stroke!(line, &self.connection)),
        );
        output
    }
}
