//! Canvas extent of a whole patch.

use log::debug;

use patchview_core::{
    geometry::{Bounds, Point, Size},
    patch::Patch,
};

use super::{LayoutError, LayoutableNode, NodeView};
use crate::config::LayoutOptions;

/// Drawing area needed by a patch.
///
/// `origin` is the top-left corner of the box enclosing every node. `size`
/// is that box plus `padding` on every side. Adding `translate` to a canvas
/// coordinate moves `origin` to `(padding, padding)`, so the translated
/// drawing fits in `(0, 0)..size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasExtent {
    origin: Point,
    size: Size,
    translate: Point,
}

impl CanvasExtent {
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.width()
    }

    pub fn height(&self) -> f32 {
        self.size.height()
    }

    pub fn translate(&self) -> Point {
        self.translate
    }
}

/// Computes the extent of every node box in `patch`.
///
/// # Errors
///
/// Returns [`LayoutError::EmptyPatch`] when the patch has no nodes.
pub fn canvas_extent(patch: &Patch, options: &LayoutOptions) -> Result<CanvasExtent, LayoutError> {
    let bounds = patch
        .nodes()
        .iter()
        .map(|node| NodeView::new(node).bounds(options))
        .reduce(|acc, bounds| acc.merge(&bounds))
        .ok_or(LayoutError::EmptyPatch)?;

    Ok(extent_from_bounds(bounds, options.padding()))
}

fn extent_from_bounds(bounds: Bounds, padding: f32) -> CanvasExtent {
    let origin = bounds.min_point();
    let size = Size::new(
        bounds.width() + 2.0 * padding,
        bounds.height() + 2.0 * padding,
    );
    let translate = Point::new(padding, padding).sub_point(origin);

    debug!(
        width = size.width(),
        height = size.height(),
        translate_x = translate.x(),
        translate_y = translate.y();
        "Canvas extent computed"
    );

    CanvasExtent {
        origin,
        size,
        translate,
    }
}
