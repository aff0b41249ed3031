//! Layer-based rendering for SVG output.
//!
//! Drawables push SVG nodes into a [`LayeredOutput`] tagged with a
//! [`RenderLayer`]; rendering emits one `<g>` per non-empty layer, bottom to
//! top.
//!
//! # Example
//!
//! ```
//! # use patchview_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Line, Rectangle};
//!
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Connection, Box::new(Line::new()));
//! output.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));
//!
//! // Node boxes render before connections regardless of insertion order
//! let svg_nodes = output.render();
//! assert_eq!(svg_nodes.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers for a patch diagram.
///
/// The `Ord` derive uses declaration order: the first variant renders first
/// (bottom), the last variant renders last (top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Canvas background
    Background,
    /// Node boxes
    Node,
    /// Inlet and outlet rectangles on node edges
    Portlet,
    /// Connection lines, drawn over the boxes they join
    Connection,
    /// Node labels
    Text,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Node => "node",
            Self::Portlet => "portlet",
            Self::Connection => "connection",
            Self::Text => "text",
        }
    }
}

/// SVG nodes grouped by rendering layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node to the specified layer.
    ///
    /// Nodes keep their insertion order within a layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Appends every node of another `LayeredOutput` to this one.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes a `<g>` element with a `data-layer`
    /// attribute. Layers are emitted in [`RenderLayer`] order.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable sort keeps insertion order inside a layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}

#[cfg(test)]
mod tests {
    use svg::node::element::{Line, Rectangle};

    use super::*;

    fn render_to_string(output: LayeredOutput) -> String {
        output.render().iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_layered_output_new() {
        let output = LayeredOutput::new();
        assert!(output.is_empty());
        assert!(output.render().is_empty());
    }

    #[test]
    fn test_layered_output_merge_same_layer() {
        let mut output1 = LayeredOutput::new();
        output1.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));

        let mut output2 = LayeredOutput::new();
        output2.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));

        output1.merge(output2);

        assert_eq!(output1.render().len(), 1);
    }

    #[test]
    fn test_layered_output_orders_layers() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Text, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Connection, Box::new(Line::new()));
        output.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));

        let svg = render_to_string(output);

        let node = svg.find(r#"data-layer="node""#).unwrap();
        let connection = svg.find(r#"data-layer="connection""#).unwrap();
        let text = svg.find(r#"data-layer="text""#).unwrap();
        assert!(node < connection);
        assert!(connection < text);
    }
}
