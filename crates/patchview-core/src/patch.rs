//! Patch data model.
//!
//! A [`Patch`] is the already-parsed form of a patch file: an ordered list of
//! [`Node`]s (a node's id is its index) and an ordered list of
//! [`Connection`]s from an outlet of one node to an inlet of another.
//!
//! Patches are built from [`NodeDecl`]s, which may leave their port counts
//! undeclared. Undeclared counts are derived once, at construction, from the
//! connections that touch the node; the resulting [`Patch`] is immutable.
//!
//! ```
//! use patchview_core::{
//!     geometry::Point,
//!     patch::{Connection, NodeDecl, Patch, PortRef},
//! };
//!
//! let patch = Patch::new(
//!     vec![
//!         NodeDecl::new("loadbang", vec![], Point::new(14.0, 13.0)),
//!         NodeDecl::new("print", vec!["bla".into()], Point::new(14.0, 64.0)),
//!     ],
//!     vec![Connection::new(PortRef::new(0, 0), PortRef::new(1, 0))],
//! );
//!
//! assert_eq!(patch.nodes()[0].outlets(), 1);
//! assert_eq!(patch.nodes()[1].inlets(), 1);
//! ```

use std::fmt;

use log::{debug, trace};
use serde::Deserialize;
use thiserror::Error;

use crate::geometry::Point;

/// Prototype name Pd uses for message boxes.
pub const MESSAGE_PROTO: &str = "msg";

/// Upper limit on the inlets or outlets of a single node.
///
/// Layout and rendering cost grows linearly with the port count.
pub const MAX_PORTS: usize = 1024;

/// The two kinds of connection attachment points on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortKind {
    /// Top edge, receives connections
    Inlet,
    /// Bottom edge, emits connections
    Outlet,
}

impl PortKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Inlet => "inlet",
            Self::Outlet => "outlet",
        }
    }
}

impl fmt::Display for PortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single creation argument of a node.
///
/// Pd arguments are either floats or symbols. Integral floats display
/// without a fractional part, so `440` stays `440`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Arg {
    Number(f64),
    Symbol(String),
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Symbol(symbol) => f.write_str(symbol),
        }
    }
}

impl From<&str> for Arg {
    fn from(symbol: &str) -> Self {
        Self::Symbol(symbol.to_string())
    }
}

impl From<String> for Arg {
    fn from(symbol: String) -> Self {
        Self::Symbol(symbol)
    }
}

impl From<f64> for Arg {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

/// Visual variant of a node, selected from its prototype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// An object box, labelled with its prototype and arguments
    Object,
    /// A message box, labelled with its content only
    Message,
}

/// A node as declared by the patch source, before port counts are resolved.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeDecl {
    proto: String,
    #[serde(default)]
    args: Vec<Arg>,
    layout: Point,
    #[serde(default)]
    inlets: Option<usize>,
    #[serde(default)]
    outlets: Option<usize>,
}

impl NodeDecl {
    /// Declares a node with undeclared port counts.
    ///
    /// # Arguments
    ///
    /// * `proto` - Prototype name, e.g. `"osc~"` or `"msg"`
    /// * `args` - Creation arguments in source order
    /// * `layout` - Position of the box's top-left corner, in source units
    pub fn new(proto: impl Into<String>, args: Vec<Arg>, layout: Point) -> Self {
        Self {
            proto: proto.into(),
            args,
            layout,
            inlets: None,
            outlets: None,
        }
    }

    /// Declares the number of inlets explicitly.
    pub fn with_inlets(mut self, inlets: usize) -> Self {
        self.inlets = Some(inlets);
        self
    }

    /// Declares the number of outlets explicitly.
    pub fn with_outlets(mut self, outlets: usize) -> Self {
        self.outlets = Some(outlets);
        self
    }
}

/// A node of a resolved patch.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: usize,
    proto: String,
    args: Vec<Arg>,
    layout: Point,
    inlets: usize,
    outlets: usize,
}

impl Node {
    /// Index of this node in its patch
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn proto(&self) -> &str {
        &self.proto
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Declared position in source units (unscaled)
    pub fn layout(&self) -> Point {
        self.layout
    }

    pub fn inlets(&self) -> usize {
        self.inlets
    }

    pub fn outlets(&self) -> usize {
        self.outlets
    }

    /// Number of ports of the given kind.
    pub fn port_count(&self, kind: PortKind) -> usize {
        match kind {
            PortKind::Inlet => self.inlets,
            PortKind::Outlet => self.outlets,
        }
    }

    pub fn kind(&self) -> NodeKind {
        if self.proto == MESSAGE_PROTO {
            NodeKind::Message
        } else {
            NodeKind::Object
        }
    }
}

/// One end of a connection: a node id and a port index on that node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PortRef {
    #[serde(rename = "id")]
    node: usize,
    port: usize,
}

impl PortRef {
    pub fn new(node: usize, port: usize) -> Self {
        Self { node, port }
    }

    pub fn node(self) -> usize {
        self.node
    }

    pub fn port(self) -> usize {
        self.port
    }
}

/// A directed link from an outlet (`source`) to an inlet (`sink`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Connection {
    source: PortRef,
    sink: PortRef,
}

impl Connection {
    pub fn new(source: PortRef, sink: PortRef) -> Self {
        Self { source, sink }
    }

    /// Outlet side
    pub fn source(&self) -> PortRef {
        self.source
    }

    /// Inlet side
    pub fn sink(&self) -> PortRef {
        self.sink
    }

    /// Returns the endpoint attached to ports of the given kind.
    pub fn endpoint(&self, kind: PortKind) -> PortRef {
        match kind {
            PortKind::Inlet => self.sink,
            PortKind::Outlet => self.source,
        }
    }
}

/// Problems found by [`Patch::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    #[error("connection {connection} references unknown node {node}")]
    UnknownNode { connection: usize, node: usize },

    #[error("node {node} has {count} {kind}s, more than the limit of {max}", max = MAX_PORTS)]
    TooManyPorts {
        node: usize,
        kind: PortKind,
        count: usize,
    },

    #[error(
        "connection {connection} references {kind} {port} of node {node}, which has {count} {kind}(s)"
    )]
    PortOutOfRange {
        connection: usize,
        node: usize,
        kind: PortKind,
        port: usize,
        count: usize,
    },
}

/// The raw patch document, as produced by an external patch parser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatchDocument {
    #[serde(default)]
    nodes: Vec<NodeDecl>,
    #[serde(default)]
    connections: Vec<Connection>,
}

/// A complete patch: nodes plus connections, with resolved port counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
}

impl Patch {
    /// Builds a patch, deriving every undeclared port count.
    ///
    /// For each node and port kind the derived count is one more than the
    /// highest port index any connection references, or zero when no
    /// connection touches that side. Connections to unknown nodes are kept
    /// as they are and take no part in the derivation.
    pub fn new(decls: Vec<NodeDecl>, connections: Vec<Connection>) -> Self {
        let mut guessed_inlets = vec![0usize; decls.len()];
        let mut guessed_outlets = vec![0usize; decls.len()];

        for connection in &connections {
            let source = connection.source();
            if let Some(count) = guessed_outlets.get_mut(source.node()) {
                *count = (*count).max(source.port() + 1);
            }

            let sink = connection.sink();
            if let Some(count) = guessed_inlets.get_mut(sink.node()) {
                *count = (*count).max(sink.port() + 1);
            }
        }

        let nodes: Vec<Node> = decls
            .into_iter()
            .enumerate()
            .map(|(id, decl)| {
                let inlets = decl.inlets.unwrap_or(guessed_inlets[id]);
                let outlets = decl.outlets.unwrap_or(guessed_outlets[id]);
                trace!(id, proto = decl.proto.as_str(), inlets, outlets; "Resolved node ports");

                Node {
                    id,
                    proto: decl.proto,
                    args: decl.args,
                    layout: decl.layout,
                    inlets,
                    outlets,
                }
            })
            .collect();

        debug!(
            nodes_count = nodes.len(),
            connections_count = connections.len();
            "Patch built"
        );

        Self { nodes, connections }
    }

    /// Builds a patch from a parsed patch document.
    pub fn from_document(document: PatchDocument) -> Self {
        Self::new(document.nodes, document.connections)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Looks up a node by id.
    pub fn node(&self, id: usize) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Checks that no node has more than [`MAX_PORTS`] ports of a kind,
    /// whether declared or derived.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::TooManyPorts`] for the first offending node.
    pub fn check_port_limits(&self) -> Result<(), PatchError> {
        for node in &self.nodes {
            for kind in [PortKind::Inlet, PortKind::Outlet] {
                let count = node.port_count(kind);
                if count > MAX_PORTS {
                    return Err(PatchError::TooManyPorts {
                        node: node.id(),
                        kind,
                        count,
                    });
                }
            }
        }

        Ok(())
    }

    /// Checks the port limits, then that every connection endpoint resolves
    /// to an existing node and an in-range port.
    ///
    /// # Errors
    ///
    /// Returns the first [`PatchError`] found, in connection order.
    pub fn validate(&self) -> Result<(), PatchError> {
        self.check_port_limits()?;

        for (index, connection) in self.connections.iter().enumerate() {
            for kind in [PortKind::Outlet, PortKind::Inlet] {
                let endpoint = connection.endpoint(kind);
                let node = self.node(endpoint.node()).ok_or(PatchError::UnknownNode {
                    connection: index,
                    node: endpoint.node(),
                })?;

                let count = node.port_count(kind);
                if endpoint.port() >= count {
                    return Err(PatchError::PortOutOfRange {
                        connection: index,
                        node: endpoint.node(),
                        kind,
                        port: endpoint.port(),
                        count,
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(proto: &str) -> NodeDecl {
        NodeDecl::new(proto, vec![], Point::default())
    }

    fn connect(source: (usize, usize), sink: (usize, usize)) -> Connection {
        Connection::new(PortRef::new(source.0, source.1), PortRef::new(sink.0, sink.1))
    }

    #[test]
    fn test_ports_derived_from_highest_index() {
        let patch = Patch::new(
            vec![decl("trigger"), decl("pack")],
            vec![connect((0, 0), (1, 0)), connect((0, 2), (1, 1))],
        );

        assert_eq!(patch.nodes()[0].outlets(), 3);
        assert_eq!(patch.nodes()[0].inlets(), 0);
        assert_eq!(patch.nodes()[1].inlets(), 2);
        assert_eq!(patch.nodes()[1].outlets(), 0);
    }

    #[test]
    fn test_declared_ports_are_kept() {
        let patch = Patch::new(
            vec![decl("osc~").with_inlets(2).with_outlets(1), decl("dac~")],
            vec![connect((0, 0), (1, 1))],
        );

        assert_eq!(patch.nodes()[0].inlets(), 2);
        assert_eq!(patch.nodes()[0].outlets(), 1);
        assert_eq!(patch.nodes()[1].inlets(), 2);
    }

    #[test]
    fn test_dangling_connection_is_kept_and_ignored_for_ports() {
        let patch = Patch::new(vec![decl("a"), decl("b")], vec![connect((99, 0), (1, 0))]);

        assert_eq!(patch.connections().len(), 1);
        assert_eq!(patch.nodes()[1].inlets(), 1);
    }

    #[test]
    fn test_node_ids_follow_declaration_order() {
        let patch = Patch::new(vec![decl("a"), decl("b"), decl("c")], vec![]);

        let ids: Vec<usize> = patch.nodes().iter().map(Node::id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(patch.node(1).map(Node::proto), Some("b"));
        assert!(patch.node(3).is_none());
    }

    #[test]
    fn test_node_kind() {
        let patch = Patch::new(vec![decl("msg"), decl("metro")], vec![]);

        assert_eq!(patch.nodes()[0].kind(), NodeKind::Message);
        assert_eq!(patch.nodes()[1].kind(), NodeKind::Object);
    }

    #[test]
    fn test_arg_display() {
        assert_eq!(Arg::Number(440.0).to_string(), "440");
        assert_eq!(Arg::Number(0.25).to_string(), "0.25");
        assert_eq!(Arg::Number(-3.0).to_string(), "-3");
        assert_eq!(Arg::from("bang").to_string(), "bang");
    }

    #[test]
    fn test_validate_ok() {
        let patch = Patch::new(vec![decl("a"), decl("b")], vec![connect((0, 0), (1, 0))]);
        assert_eq!(patch.validate(), Ok(()));
    }

    #[test]
    fn test_validate_unknown_node() {
        let patch = Patch::new(vec![decl("a"), decl("b")], vec![connect((0, 0), (99, 0))]);

        assert_eq!(
            patch.validate(),
            Err(PatchError::UnknownNode {
                connection: 0,
                node: 99
            })
        );
    }

    #[test]
    fn test_validate_port_out_of_range() {
        let patch = Patch::new(
            vec![decl("a").with_outlets(1), decl("b")],
            vec![connect((0, 3), (1, 0))],
        );

        let err = patch.validate().unwrap_err();
        assert_eq!(
            err,
            PatchError::PortOutOfRange {
                connection: 0,
                node: 0,
                kind: PortKind::Outlet,
                port: 3,
                count: 1,
            }
        );
        assert!(err.to_string().contains("outlet 3 of node 0"));
    }

    #[test]
    fn test_port_limit_applies_to_declared_counts() {
        let patch = Patch::new(vec![decl("a").with_outlets(3_000_000)], vec![]);

        assert_eq!(
            patch.check_port_limits(),
            Err(PatchError::TooManyPorts {
                node: 0,
                kind: PortKind::Outlet,
                count: 3_000_000,
            })
        );
        assert!(patch.validate().is_err());
    }

    #[test]
    fn test_port_limit_applies_to_derived_counts() {
        let patch = Patch::new(
            vec![decl("a"), decl("b")],
            vec![connect((0, 0), (1, MAX_PORTS))],
        );

        let err = patch.check_port_limits().unwrap_err();
        assert!(matches!(
            err,
            PatchError::TooManyPorts { node: 1, kind: PortKind::Inlet, .. }
        ));
        assert!(err.to_string().contains("1025 inlets"));
    }

    #[test]
    fn test_port_limit_is_inclusive() {
        let patch = Patch::new(vec![decl("a").with_inlets(MAX_PORTS)], vec![]);
        assert_eq!(patch.check_port_limits(), Ok(()));
    }

    #[test]
    fn test_document_deserialize() {
        let source = r#"
            [[nodes]]
            proto = "osc~"
            args = [440]
            layout = { x = 14, y = 13 }

            [[nodes]]
            proto = "print"
            args = ["bla", 2.5]
            layout = { x = 14.5, y = 64 }
            inlets = 2

            [[connections]]
            source = { id = 0, port = 0 }
            sink = { id = 1, port = 0 }
        "#;

        let document: PatchDocument = toml::from_str(source).unwrap();
        let patch = Patch::from_document(document);

        let osc = &patch.nodes()[0];
        assert_eq!(osc.args(), &[Arg::Number(440.0)]);
        assert_eq!(osc.layout(), Point::new(14.0, 13.0));
        assert_eq!(osc.outlets(), 1);

        let print = &patch.nodes()[1];
        assert_eq!(print.args(), &[Arg::from("bla"), Arg::Number(2.5)]);
        assert_eq!(print.inlets(), 2);
        assert_eq!(patch.connections()[0].sink(), PortRef::new(1, 0));
    }
}
