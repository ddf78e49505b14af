use thiserror::Error;

/// Errors raised while rendering a report document.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("PDF generation error: {0}")]
    Pdf(#[from] printpdf::Error),

    #[error("failed to finalize report: {0}")]
    Finalize(String),
}

/// Errors raised while exporting a report. Each is shown to the attendant
/// as a single failure notice.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no results to export; calculate first")]
    NotCalculated,

    #[error(transparent)]
    Render(#[from] ReportError),

    #[error("could not share report to '{location}': {source}")]
    Share {
        location: String,
        #[source]
        source: std::io::Error,
    },
}
