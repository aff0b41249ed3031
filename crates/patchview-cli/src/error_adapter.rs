//! Error adapter for converting PatchviewError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan};

use patchview::{PatchviewError, layout::LayoutError, patch::PatchError};

/// Adapter rendering a [`PatchviewError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a PatchviewError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            PatchviewError::Io(_) => "patchview::io",
            PatchviewError::Document(_) => "patchview::document",
            PatchviewError::Patch(_) => "patchview::patch",
            PatchviewError::Layout(_) => "patchview::layout",
            PatchviewError::Config(_) => "patchview::config",
            PatchviewError::Export(_) => "patchview::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            PatchviewError::Patch(PatchError::UnknownNode { .. })
            | PatchviewError::Layout(LayoutError::Reference { .. }) => {
                "connections must reference existing nodes and ports; run without --strict to skip them"
            }
            PatchviewError::Patch(PatchError::TooManyPorts { .. }) => {
                "lower the declared `inlets`/`outlets` or the port indices used by connections"
            }
            PatchviewError::Patch(PatchError::PortOutOfRange { .. }) => {
                "declared `inlets`/`outlets` must cover every port a connection uses"
            }
            PatchviewError::Layout(LayoutError::EmptyPatch) => {
                "add at least one `[[nodes]]` entry to the document"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert a [`PatchviewError`] into a list of reportable errors.
///
/// Every error currently yields exactly one report.
pub fn to_reportables(err: &PatchviewError) -> Vec<ErrorAdapter<'_>> {
    vec![ErrorAdapter(err)]
}

/// Renders every report of `err` with `handler` into one string.
///
/// A report the handler fails to draw falls back to its plain message.
pub fn render_reports(err: &PatchviewError, handler: &GraphicalReportHandler) -> String {
    let mut rendered = String::new();

    for reportable in to_reportables(err) {
        let mut report = String::new();
        match handler.render_report(&mut report, &reportable) {
            Ok(()) => rendered.push_str(&report),
            Err(_) => {
                rendered.push_str(&reportable.to_string());
                rendered.push('\n');
            }
        }
    }

    rendered
}

#[cfg(test)]
mod tests {
    use miette::GraphicalTheme;

    use super::*;

    #[test]
    fn test_config_error_code() {
        let err = PatchviewError::Config("bad value".to_string());

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        assert_eq!(
            reportables[0].to_string(),
            "Configuration error: bad value"
        );
        assert_eq!(
            reportables[0].code().map(|c| c.to_string()),
            Some("patchview::config".to_string())
        );
        assert!(reportables[0].help().is_none());
    }

    #[test]
    fn test_empty_patch_has_help() {
        let err = PatchviewError::Layout(LayoutError::EmptyPatch);

        let adapter = ErrorAdapter(&err);

        assert_eq!(
            adapter.code().map(|c| c.to_string()),
            Some("patchview::layout".to_string())
        );
        assert!(adapter.help().is_some());
    }

    #[test]
    fn test_render_reports_includes_code_and_help() {
        let err = PatchviewError::Layout(LayoutError::EmptyPatch);
        let handler = GraphicalReportHandler::new_themed(GraphicalTheme::none());

        let rendered = render_reports(&err, &handler);

        assert!(rendered.contains("patchview::layout"));
        assert!(rendered.contains("without nodes"));
        assert!(rendered.contains("[[nodes]]"));
    }
}
