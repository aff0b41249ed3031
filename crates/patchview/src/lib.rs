//! Patchview - layout and SVG rendering for Pd-style patch diagrams.
//!
//! A patch is a set of boxes (nodes) joined by connections from an outlet on
//! the bottom edge of one box to an inlet on the top edge of another. This
//! crate takes an already-parsed patch, computes the geometry of every box,
//! portlet and connection line, and renders the result as SVG.

pub mod config;
pub mod export;
pub mod layout;

mod error;

pub use patchview_core::{color, draw, geometry, patch};

pub use error::PatchviewError;

use log::{debug, info, trace};

use config::AppConfig;
use export::{Exporter, svg::SvgBuilder};
use layout::PatchLayout;
use patch::{Patch, PatchDocument};

/// Builder for parsing, laying out and rendering patches.
///
/// # Examples
///
/// ```rust
/// use patchview::{PatchBuilder, config::AppConfig};
///
/// let source = r#"
///     [[nodes]]
///     proto = "loadbang"
///     layout = { x = 14, y = 13 }
///
///     [[nodes]]
///     proto = "print"
///     args = ["bla"]
///     layout = { x = 14, y = 64 }
///
///     [[connections]]
///     source = { id = 0, port = 0 }
///     sink = { id = 1, port = 0 }
/// "#;
///
/// let builder = PatchBuilder::new(AppConfig::default());
/// let patch = builder.parse(source).expect("Failed to parse");
/// let svg = builder.render_svg(&patch).expect("Failed to render");
/// assert!(svg.contains("print bla"));
/// ```
#[derive(Debug, Default)]
pub struct PatchBuilder {
    config: AppConfig,
    strict: bool,
}

impl PatchBuilder {
    /// Create a new patch builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            strict: false,
        }
    }

    /// In strict mode every connection must resolve.
    ///
    /// [`parse`](Self::parse) then rejects patches with dangling connections
    /// instead of leaving them to be skipped at layout time.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Parse a TOML patch document into a [`Patch`].
    ///
    /// Undeclared port counts are derived from the connections.
    ///
    /// # Errors
    ///
    /// Returns [`PatchviewError::Document`] if the document is malformed,
    /// [`PatchviewError::Patch`] if a node exceeds
    /// [`MAX_PORTS`](patch::MAX_PORTS) and, in strict mode,
    /// [`PatchviewError::Patch`] if a connection does not resolve.
    pub fn parse(&self, source: &str) -> Result<Patch, PatchviewError> {
        info!("Parsing patch document");

        let document: PatchDocument = toml::from_str(source)?;
        let patch = Patch::from_document(document);
        patch.check_port_limits()?;

        if self.strict {
            patch.validate()?;
        }

        debug!(nodes_count = patch.nodes().len(); "Patch parsed successfully");
        trace!(patch:?; "Parsed patch");

        Ok(patch)
    }

    /// Compute the geometry of a patch.
    ///
    /// # Errors
    ///
    /// Returns [`PatchviewError::Layout`] for an empty patch and, in strict
    /// mode, for the first connection that does not resolve.
    pub fn layout(&self, patch: &Patch) -> Result<PatchLayout, PatchviewError> {
        let layout = layout::layout_patch(patch, self.config.layout())?;

        if self.strict {
            if let Some(skipped) = layout.skipped().first() {
                return Err(skipped.error().clone().into());
            }
        }

        Ok(layout)
    }

    /// Render a patch to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`PatchviewError`] for layout or rendering errors.
    pub fn render_svg(&self, patch: &Patch) -> Result<String, PatchviewError> {
        let layout = self.layout(patch)?;

        let exporter = SvgBuilder::new()
            .with_style(self.config.style())
            .with_options(self.config.layout())
            .build()?;
        let svg = exporter.export_patch_layout(&layout)?;

        info!(skipped_count = layout.skipped().len(); "SVG rendered successfully");
        Ok(svg)
    }
}
