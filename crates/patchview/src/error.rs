//! Error types for Patchview operations.
//!
//! This module provides the main error type [`PatchviewError`] which wraps
//! the errors of every pipeline stage.

use std::io;

use thiserror::Error;

use patchview_core::patch::PatchError;

use crate::layout::LayoutError;

/// The main error type for Patchview operations.
#[derive(Debug, Error)]
pub enum PatchviewError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid patch document: {0}")]
    Document(#[from] toml::de::Error),

    #[error("Invalid patch: {0}")]
    Patch(#[from] PatchError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for PatchviewError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
