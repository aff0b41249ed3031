//! Whole-patch layout pass.

use log::{debug, info, warn};

use patchview_core::{
    geometry::{Bounds, Point, Size},
    patch::{NodeKind, Patch, PortKind},
};

use super::{
    CanvasExtent, ConnectionEndpoints, LayoutError, LayoutableNode, NodeView, canvas_extent,
    connection_endpoints,
};
use crate::config::LayoutOptions;

/// Resolved geometry of one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeLayout {
    id: usize,
    kind: NodeKind,
    label: String,
    bounds: Bounds,
    text_baseline: f32,
    inlets: Vec<Bounds>,
    outlets: Vec<Bounds>,
}

impl NodeLayout {
    fn new(view: &NodeView<'_>, options: &LayoutOptions) -> Self {
        let portlet_size = Size::new(options.portlet_width(), options.portlet_height());
        let portlets = |kind: PortKind| -> Vec<Bounds> {
            (0..view.node().port_count(kind))
                .map(|index| {
                    Bounds::new_from_top_left(
                        view.portlet_absolute(kind, index, options),
                        portlet_size,
                    )
                })
                .collect()
        };

        Self {
            id: view.node().id(),
            kind: view.kind(),
            label: view.label(),
            bounds: view.bounds(options),
            text_baseline: view.text_baseline(options),
            inlets: portlets(PortKind::Inlet),
            outlets: portlets(PortKind::Outlet),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Box of the node on the canvas.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Label baseline, relative to the top of the box.
    pub fn text_baseline(&self) -> f32 {
        self.text_baseline
    }

    /// Portlet rectangles of the given kind on the canvas, in port order.
    pub fn portlets(&self, kind: PortKind) -> &[Bounds] {
        match kind {
            PortKind::Inlet => &self.inlets,
            PortKind::Outlet => &self.outlets,
        }
    }
}

/// Resolved geometry of one connection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionLayout {
    index: usize,
    endpoints: ConnectionEndpoints,
}

impl ConnectionLayout {
    /// Position of the connection in the patch.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn source(&self) -> Point {
        self.endpoints.source()
    }

    pub fn sink(&self) -> Point {
        self.endpoints.sink()
    }
}

/// A connection left out of the layout because it does not resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedConnection {
    index: usize,
    error: LayoutError,
}

impl SkippedConnection {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn error(&self) -> &LayoutError {
        &self.error
    }
}

/// Geometry of a whole patch, ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchLayout {
    nodes: Vec<NodeLayout>,
    connections: Vec<ConnectionLayout>,
    skipped: Vec<SkippedConnection>,
    extent: CanvasExtent,
}

impl PatchLayout {
    pub fn nodes(&self) -> &[NodeLayout] {
        &self.nodes
    }

    pub fn connections(&self) -> &[ConnectionLayout] {
        &self.connections
    }

    /// Connections that could not be resolved, in patch order.
    pub fn skipped(&self) -> &[SkippedConnection] {
        &self.skipped
    }

    pub fn extent(&self) -> &CanvasExtent {
        &self.extent
    }
}

/// Lays out every node and connection of `patch`.
///
/// A connection that fails to resolve does not stop the pass: it is logged,
/// recorded in [`PatchLayout::skipped`], and the remaining connections are
/// laid out as usual.
///
/// Work is proportional to the total port count. Port limits are not
/// checked here; see [`Patch::check_port_limits`].
///
/// # Errors
///
/// Returns [`LayoutError::EmptyPatch`] when the patch has no nodes.
pub fn layout_patch(patch: &Patch, options: &LayoutOptions) -> Result<PatchLayout, LayoutError> {
    info!(
        nodes_count = patch.nodes().len(),
        connections_count = patch.connections().len();
        "Laying out patch"
    );

    let extent = canvas_extent(patch, options)?;

    let nodes: Vec<NodeLayout> = patch
        .nodes()
        .iter()
        .map(|node| NodeLayout::new(&NodeView::new(node), options))
        .collect();

    let mut connections = Vec::with_capacity(patch.connections().len());
    let mut skipped = Vec::new();
    for (index, connection) in patch.connections().iter().enumerate() {
        match connection_endpoints(patch, connection, options) {
            Ok(endpoints) => connections.push(ConnectionLayout { index, endpoints }),
            Err(error) => {
                warn!(index, err:% = error; "Skipping unresolved connection");
                skipped.push(SkippedConnection { index, error });
            }
        }
    }

    debug!(
        connections_count = connections.len(),
        skipped_count = skipped.len();
        "Patch layout computed"
    );

    Ok(PatchLayout {
        nodes,
        connections,
        skipped,
        extent,
    })
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use patchview_core::patch::{Connection, NodeDecl, PortRef};

    use super::*;

    fn demo_patch(extra: Vec<Connection>) -> Patch {
        let mut connections = vec![Connection::new(PortRef::new(0, 0), PortRef::new(1, 0))];
        connections.extend(extra);

        Patch::new(
            vec![
                NodeDecl::new("loadbang", vec![], Point::new(14.0, 13.0)),
                NodeDecl::new("print", vec!["bla".into()], Point::new(14.0, 64.0)),
            ],
            connections,
        )
    }

    #[test]
    fn test_layout_nodes_and_portlets() {
        let options = LayoutOptions::default();
        let layout = layout_patch(&demo_patch(vec![]), &options).unwrap();

        assert_eq!(layout.nodes().len(), 2);

        let loadbang = &layout.nodes()[0];
        assert_eq!(loadbang.id(), 0);
        assert_eq!(loadbang.kind(), NodeKind::Object);
        assert_eq!(loadbang.label(), "loadbang");
        assert!(loadbang.portlets(PortKind::Inlet).is_empty());
        assert_eq!(loadbang.portlets(PortKind::Outlet).len(), 1);

        let outlet = loadbang.portlets(PortKind::Outlet)[0];
        assert_approx_eq!(f32, outlet.min_x(), loadbang.bounds().min_x());
        assert_approx_eq!(f32, outlet.max_y(), loadbang.bounds().max_y(), epsilon = 1e-4);
        assert_approx_eq!(f32, outlet.width(), 5.0, epsilon = 1e-4);

        let print = &layout.nodes()[1];
        assert_eq!(print.label(), "print bla");
        // 9 glyphs * 8 + 2 * 6
        assert_approx_eq!(f32, print.bounds().width(), 84.0);
    }

    #[test]
    fn test_layout_connection_matches_endpoints() {
        let options = LayoutOptions::default();
        let patch = demo_patch(vec![]);
        let layout = layout_patch(&patch, &options).unwrap();

        let expected = connection_endpoints(&patch, &patch.connections()[0], &options).unwrap();
        let connection = layout.connections()[0];
        assert_eq!(connection.index(), 0);
        assert_eq!(connection.source(), expected.source());
        assert_eq!(connection.sink(), expected.sink());
        assert!(layout.skipped().is_empty());
    }

    #[test]
    fn test_layout_skips_unresolved_connection() {
        let options = LayoutOptions::default();
        let bad = Connection::new(PortRef::new(0, 0), PortRef::new(99, 0));
        let layout = layout_patch(&demo_patch(vec![bad]), &options).unwrap();

        assert_eq!(layout.connections().len(), 1);
        assert_eq!(layout.skipped().len(), 1);

        let skipped = &layout.skipped()[0];
        assert_eq!(skipped.index(), 1);
        assert!(matches!(
            skipped.error(),
            LayoutError::Reference { node: 99, .. }
        ));
    }

    #[test]
    fn test_layout_empty_patch() {
        let patch = Patch::new(vec![], vec![]);
        assert_eq!(
            layout_patch(&patch, &LayoutOptions::default()),
            Err(LayoutError::EmptyPatch)
        );
    }
}
