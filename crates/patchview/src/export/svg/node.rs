//! SVG rendering for node boxes, labels and portlets.

use svg::node::element as svg_element;

use patchview_core::{
    apply_stroke,
    draw::{LayeredOutput, RenderLayer},
    geometry::Bounds,
    patch::{NodeKind, PortKind},
};

use super::Svg;
use crate::layout::NodeLayout;

/// Depth of the notch on the right edge of a message box.
const MESSAGE_FLAG_DEPTH: f32 = 4.0;

impl Svg {
    pub(super) fn render_node(&self, node: &NodeLayout) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let bounds = node.bounds();
        let id = node.id();

        match node.kind() {
            NodeKind::Object => {
                let rect = svg_element::Rectangle::new()
                    .set("class", "box")
                    .set("data-node-id", id)
                    .set("x", bounds.min_x())
                    .set("y", bounds.min_y())
                    .set("width", bounds.width())
                    .set("height", bounds.height())
                    .set("fill", &self.node_fill);
                output.add_to_layer(RenderLayer::Node, Box::new(apply_stroke!(rect, &self.outline)));
            }
            NodeKind::Message => {
                let flag = svg_element::Polygon::new()
                    .set("class", "box")
                    .set("data-node-id", id)
                    .set("points", message_flag_points(bounds))
                    .set("fill", &self.node_fill);
                output.add_to_layer(RenderLayer::Node, Box::new(apply_stroke!(flag, &self.outline)));
            }
        }

        for kind in [PortKind::Inlet, PortKind::Outlet] {
            for portlet in node.portlets(kind) {
                let rect = svg_element::Rectangle::new()
                    .set("class", format!("{} portlet", kind.name()))
                    .set("x", portlet.min_x())
                    .set("y", portlet.min_y())
                    .set("width", portlet.width())
                    .set("height", portlet.height())
                    .set("fill", self.outline.color().to_string());
                output.add_to_layer(RenderLayer::Portlet, Box::new(rect));
            }
        }

        let text = svg_element::Text::new(node.label())
            .set("class", "proto")
            .set("x", bounds.min_x() + self.text_padding)
            .set("y", bounds.min_y() + node.text_baseline())
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size);
        output.add_to_layer(RenderLayer::Text, Box::new(text));

        output
    }
}

/// Outline of a message box: a rectangle whose right edge is notched inwards.
fn message_flag_points(bounds: Bounds) -> String {
    let (left, top) = (bounds.min_x(), bounds.min_y());
    let (right, bottom) = (bounds.max_x(), bounds.max_y());
    let notch = right - MESSAGE_FLAG_DEPTH;

    [
        (left, top),
        (right, top),
        (notch, top + MESSAGE_FLAG_DEPTH),
        (notch, bottom - MESSAGE_FLAG_DEPTH),
        (right, bottom),
        (left, bottom),
    ]
    .iter()
    .map(|(x, y)| format!("{x},{y}"))
    .collect::<Vec<_>>()
    .join(" ")
}

#[cfg(test)]
mod tests {
    use patchview_core::geometry::{Point, Size};

    use super::*;

    #[test]
    fn test_message_flag_points() {
        let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(30.0, 20.0));

        assert_eq!(
            message_flag_points(bounds),
            "0,0 30,0 26,4 26,16 30,20 0,20"
        );
    }
}
