//! Node geometry.
//!
//! Each node kind has its own view type implementing [`LayoutableNode`];
//! [`NodeView`] picks the right one from the node's prototype. Position,
//! port placement and bounds are shared default methods, while labels and
//! box sizes are per kind.
//!
//! Portlets are spread along an edge: the first one sits flush left, the
//! last one flush right, and the rest are evenly spaced in between. A node
//! with a single port of a kind therefore has that port flush left.

use patchview_core::{
    geometry::{Bounds, Point, Size},
    patch::{Node, NodeKind, PortKind},
};

use crate::config::LayoutOptions;

/// Geometry queries every node kind answers.
pub trait LayoutableNode {
    /// The underlying patch node.
    fn node(&self) -> &Node;

    /// Text drawn inside the box.
    fn label(&self) -> String;

    /// Width of the box.
    fn width(&self, options: &LayoutOptions) -> f32;

    /// Height of the box.
    fn height(&self, options: &LayoutOptions) -> f32;

    /// Top-left corner of the box on the canvas.
    fn position(&self, options: &LayoutOptions) -> Point {
        self.node().layout().scale(options.scale_ratio())
    }

    fn size(&self, options: &LayoutOptions) -> Size {
        Size::new(self.width(options), self.height(options))
    }

    /// Box of the node on the canvas.
    fn bounds(&self, options: &LayoutOptions) -> Bounds {
        Bounds::new_from_top_left(self.position(options), self.size(options))
    }

    /// Distance from the top of the box to the label baseline.
    fn text_baseline(&self, options: &LayoutOptions) -> f32 {
        self.height(options) / 2.0 + options.glyph_height() / 2.0
    }

    /// Horizontal offset of a portlet from the node's left edge.
    ///
    /// `index` must be below the node's port count for `kind`.
    fn portlet_relative_x(&self, kind: PortKind, index: usize, options: &LayoutOptions) -> f32 {
        let count = self.node().port_count(kind);
        let width = self.width(options);
        let portlet_width = options.portlet_width();

        if index == 0 {
            0.0
        } else if count.checked_sub(1) == Some(index) {
            width - portlet_width
        } else {
            let n = count as f32;
            let gap = (width - n * portlet_width) / (n - 1.0);
            index as f32 * (portlet_width + gap)
        }
    }

    /// Vertical offset of a portlet from the node's top edge.
    ///
    /// Inlets sit on the top edge, outlets on the bottom edge.
    fn portlet_relative_y(&self, kind: PortKind, options: &LayoutOptions) -> f32 {
        match kind {
            PortKind::Inlet => 0.0,
            PortKind::Outlet => self.height(options) - options.portlet_height(),
        }
    }

    /// Top-left corner of a portlet relative to the node.
    fn portlet_relative(&self, kind: PortKind, index: usize, options: &LayoutOptions) -> Point {
        Point::new(
            self.portlet_relative_x(kind, index, options),
            self.portlet_relative_y(kind, options),
        )
    }

    /// Top-left corner of a portlet on the canvas.
    fn portlet_absolute(&self, kind: PortKind, index: usize, options: &LayoutOptions) -> Point {
        self.portlet_relative(kind, index, options)
            .add_point(self.position(options))
    }
}

/// Box width shared by every kind: wide enough for the widest port row and
/// for the label.
fn box_width(node: &Node, label: &str, options: &LayoutOptions) -> f32 {
    let max_ports = node.inlets().max(node.outlets());
    let ports_width = max_ports.saturating_sub(1) as f32 * options.min_node_width();
    let text_length =
        label.chars().count() as f32 * options.glyph_width() + 2.0 * options.text_padding();

    options.min_node_width().max(ports_width).max(text_length)
}

fn join_args(node: &Node) -> impl Iterator<Item = String> + '_ {
    node.args().iter().map(ToString::to_string)
}

/// An object box, labelled with its prototype and arguments.
#[derive(Debug, Clone, Copy)]
pub struct ObjectBox<'a> {
    node: &'a Node,
}

impl<'a> ObjectBox<'a> {
    pub fn new(node: &'a Node) -> Self {
        Self { node }
    }
}

impl LayoutableNode for ObjectBox<'_> {
    fn node(&self) -> &Node {
        self.node
    }

    fn label(&self) -> String {
        std::iter::once(self.node.proto().to_string())
            .chain(join_args(self.node))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn width(&self, options: &LayoutOptions) -> f32 {
        box_width(self.node, &self.label(), options)
    }

    fn height(&self, options: &LayoutOptions) -> f32 {
        options.min_node_height()
    }
}

/// A message box, labelled with its content only.
#[derive(Debug, Clone, Copy)]
pub struct MessageBox<'a> {
    node: &'a Node,
}

impl<'a> MessageBox<'a> {
    pub fn new(node: &'a Node) -> Self {
        Self { node }
    }
}

impl LayoutableNode for MessageBox<'_> {
    fn node(&self) -> &Node {
        self.node
    }

    fn label(&self) -> String {
        join_args(self.node).collect::<Vec<_>>().join(" ")
    }

    fn width(&self, options: &LayoutOptions) -> f32 {
        box_width(self.node, &self.label(), options)
    }

    fn height(&self, options: &LayoutOptions) -> f32 {
        options.min_node_height()
    }
}

/// A node viewed through the variant matching its [`NodeKind`].
#[derive(Debug, Clone, Copy)]
pub enum NodeView<'a> {
    Object(ObjectBox<'a>),
    Message(MessageBox<'a>),
}

impl<'a> NodeView<'a> {
    pub fn new(node: &'a Node) -> Self {
        match node.kind() {
            NodeKind::Object => Self::Object(ObjectBox::new(node)),
            NodeKind::Message => Self::Message(MessageBox::new(node)),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Object(_) => NodeKind::Object,
            Self::Message(_) => NodeKind::Message,
        }
    }

    fn inner(&self) -> &dyn LayoutableNode {
        match self {
            Self::Object(object) => object,
            Self::Message(message) => message,
        }
    }
}

impl LayoutableNode for NodeView<'_> {
    fn node(&self) -> &Node {
        self.inner().node()
    }

    fn label(&self) -> String {
        self.inner().label()
    }

    fn width(&self, options: &LayoutOptions) -> f32 {
        self.inner().width(options)
    }

    fn height(&self, options: &LayoutOptions) -> f32 {
        self.inner().height(options)
    }
}
