//! Patchview Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Patchview layout
//! engine and its SVG exporter:
//!
//! - **Patch**: Nodes, ports and connections of a parsed patch ([`patch`] module)
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Colors**: CSS color handling ([`color::Color`])
//! - **Draw**: Strokes and render layers for SVG output ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod patch;
