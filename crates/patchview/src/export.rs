//! Export functionality for laid-out patches.
//!
//! This module provides the [`Exporter`] trait that turns a [`PatchLayout`]
//! into an output document. It is the final stage of the pipeline:
//!
//! ```text
//! Patch document
//!     ↓ parse
//! Patch (resolved ports)
//!     ↓ layout
//! PatchLayout
//!     ↓ export (this module)
//! SVG text
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] — SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]

/// SVG export backend.
pub mod svg;

use thiserror::Error;

use crate::layout::PatchLayout;

/// Abstraction for patch export backends.
pub trait Exporter {
    /// Exports a patch layout to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the layout cannot be converted to the
    /// target format.
    fn export_patch_layout(&self, layout: &PatchLayout) -> Result<String, Error>;
}

/// Errors that can occur during patch export.
///
/// Converted into [`PatchviewError::Export`](crate::PatchviewError::Export)
/// at the crate boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// A style setting could not be turned into SVG attributes.
    #[error("Style error: {0}")]
    Style(String),

    /// A rendering or conversion failure.
    #[error("Render error: {0}")]
    Render(String),
}
