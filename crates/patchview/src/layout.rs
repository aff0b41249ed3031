//! Layout engine: maps a [`Patch`](patchview_core::patch::Patch) onto canvas geometry.
//!
//! Every function here is pure. The patch is read-only and the
//! [`LayoutOptions`](crate::config::LayoutOptions) are passed explicitly to
//! each call, so layouts can be computed concurrently for different patches
//! or option sets.
//!
//! - [`node`]: per-node geometry through the [`LayoutableNode`] capability
//! - [`connection`]: endpoints of connection lines
//! - [`canvas`]: bounding box of the whole patch and its normalising translation
//! - [`PatchLayout`]: everything above, computed once per render pass

mod canvas;
mod connection;
mod node;
mod patch;

pub use canvas::{CanvasExtent, canvas_extent};
pub use connection::{ConnectionEndpoints, connection_endpoints};
pub use node::{LayoutableNode, MessageBox, NodeView, ObjectBox};
pub use patch::{ConnectionLayout, NodeLayout, PatchLayout, SkippedConnection, layout_patch};

use thiserror::Error;

use patchview_core::patch::PortKind;

/// Errors raised while computing geometry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A connection endpoint names a node or port that does not exist.
    #[error("{kind} {port} of node {node} does not exist")]
    Reference {
        node: usize,
        kind: PortKind,
        port: usize,
    },

    /// The extent of a patch without nodes is undefined.
    #[error("cannot compute the canvas extent of a patch without nodes")]
    EmptyPatch,
}
