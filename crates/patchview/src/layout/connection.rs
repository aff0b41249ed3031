//! Connection line endpoints.

use log::trace;

use patchview_core::{
    geometry::Point,
    patch::{Connection, Patch, PortKind, PortRef},
};

use super::{LayoutError, LayoutableNode, NodeView};
use crate::config::LayoutOptions;

/// Canvas coordinates of a connection line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionEndpoints {
    source: Point,
    sink: Point,
}

impl ConnectionEndpoints {
    /// Bottom-center of the source outlet.
    pub fn source(&self) -> Point {
        self.source
    }

    /// Top-center of the sink inlet.
    pub fn sink(&self) -> Point {
        self.sink
    }
}

/// Resolves one endpoint to the top-left corner of its portlet.
fn resolve_portlet(
    patch: &Patch,
    endpoint: PortRef,
    kind: PortKind,
    options: &LayoutOptions,
) -> Result<Point, LayoutError> {
    let unresolved = || LayoutError::Reference {
        node: endpoint.node(),
        kind,
        port: endpoint.port(),
    };

    let node = patch.node(endpoint.node()).ok_or_else(unresolved)?;
    if endpoint.port() >= node.port_count(kind) {
        return Err(unresolved());
    }

    Ok(NodeView::new(node).portlet_absolute(kind, endpoint.port(), options))
}

/// Computes where the line of `connection` starts and ends.
///
/// The line leaves the source outlet at its bottom-center and enters the sink
/// inlet at its top-center.
///
/// # Errors
///
/// Returns [`LayoutError::Reference`] if either endpoint names a node that is
/// not in `patch` or a port index outside the node's port count.
pub fn connection_endpoints(
    patch: &Patch,
    connection: &Connection,
    options: &LayoutOptions,
) -> Result<ConnectionEndpoints, LayoutError> {
    let outlet = resolve_portlet(patch, connection.source(), PortKind::Outlet, options)?;
    let inlet = resolve_portlet(patch, connection.sink(), PortKind::Inlet, options)?;

    let half_portlet = options.portlet_width() / 2.0;
    let source = Point::new(
        outlet.x() + half_portlet,
        outlet.y() + options.portlet_height(),
    );
    let sink = inlet.with_x(inlet.x() + half_portlet);

    trace!(
        source:? = connection.source(),
        sink:? = connection.sink();
        "Resolved connection endpoints"
    );

    Ok(ConnectionEndpoints { source, sink })
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use patchview_core::patch::NodeDecl;

    use super::*;

    fn two_nodes(connection: Connection) -> Patch {
        Patch::new(
            vec![
                NodeDecl::new("loadbang", vec![], Point::new(10.0, 10.0)),
                NodeDecl::new("print", vec![], Point::new(10.0, 60.0)),
            ],
            vec![connection],
        )
    }

    #[test]
    fn test_endpoints_offsets_per_axis() {
        let options = LayoutOptions::default();
        let connection = Connection::new(PortRef::new(0, 0), PortRef::new(1, 0));
        let patch = two_nodes(connection);

        let endpoints = connection_endpoints(&patch, &connection, &options).unwrap();

        // Both single ports sit flush left at x = 10 * 1.2
        assert_approx_eq!(f32, endpoints.source().x(), 12.0 + 2.5, epsilon = 1e-4);
        assert_approx_eq!(f32, endpoints.sink().x(), 12.0 + 2.5, epsilon = 1e-4);

        // Source: outlet top (12 + 20 - 3.5) plus portlet height
        assert_approx_eq!(f32, endpoints.source().y(), 32.0, epsilon = 1e-4);
        // Sink: inlet top, no vertical offset
        assert_approx_eq!(f32, endpoints.sink().y(), 72.0, epsilon = 1e-4);
    }

    #[test]
    fn test_endpoints_to_last_inlet() {
        let options = LayoutOptions::default();
        let connection = Connection::new(PortRef::new(0, 0), PortRef::new(1, 1));
        let patch = Patch::new(
            vec![
                NodeDecl::new("bang", vec![], Point::new(0.0, 0.0)),
                NodeDecl::new("pack", vec![], Point::new(0.0, 100.0)).with_inlets(2),
            ],
            vec![connection],
        );

        let endpoints = connection_endpoints(&patch, &connection, &options).unwrap();

        // "pack" box: max(25, 25, 4 * 8 + 12) = 44 wide, last inlet at 44 - 5
        assert_approx_eq!(f32, endpoints.sink().x(), 39.0 + 2.5);
        assert_approx_eq!(f32, endpoints.sink().y(), 120.0, epsilon = 1e-4);
    }

    #[test]
    fn test_unknown_node_is_reference_error() {
        let options = LayoutOptions::default();
        let connection = Connection::new(PortRef::new(0, 0), PortRef::new(99, 0));
        let patch = two_nodes(connection);

        assert_eq!(
            connection_endpoints(&patch, &connection, &options),
            Err(LayoutError::Reference {
                node: 99,
                kind: PortKind::Inlet,
                port: 0
            })
        );
    }

    #[test]
    fn test_port_out_of_range_is_reference_error() {
        let options = LayoutOptions::default();
        let patch = Patch::new(
            vec![
                NodeDecl::new("a", vec![], Point::default()).with_outlets(1),
                NodeDecl::new("b", vec![], Point::default()),
            ],
            vec![],
        );
        let connection = Connection::new(PortRef::new(0, 4), PortRef::new(1, 0));

        let err = connection_endpoints(&patch, &connection, &options).unwrap_err();
        assert_eq!(
            err,
            LayoutError::Reference {
                node: 0,
                kind: PortKind::Outlet,
                port: 4
            }
        );
    }
}
