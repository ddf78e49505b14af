pub mod data;
pub mod error;
pub mod format;
pub mod html;
pub mod pdf;
pub mod share;

pub use data::{ReportData, ReportLine};
pub use error::{ExportError, ReportError};
pub use format::{difference_display, figure_display};
pub use html::render_html;
pub use pdf::generate_pdf;
pub use share::{
    FileShare, RenderedReport, ReportFormat, ShareService, SharedReport, export, render,
};
