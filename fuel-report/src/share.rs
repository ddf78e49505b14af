//! Handing a rendered report to a share facility.

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::data::ReportData;
use crate::error::{ExportError, ReportError};
use crate::html::render_html;
use crate::pdf::generate_pdf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Pdf,
    Html,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Html => "html",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A finished document, ready to be shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub format: ReportFormat,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Where a shared report ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedReport {
    pub location: PathBuf,
}

/// Lower-case station name with runs of other characters collapsed to `-`.
fn slug(name: &str) -> String {
    let mut slug = String::new();
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "station".to_string()
    } else {
        slug.to_string()
    }
}

/// File name for a report, e.g. `fuel-report-north-depot-20240401-083000.pdf`.
pub fn file_name(
    data: &ReportData,
    format: ReportFormat,
) -> String {
    format!(
        "fuel-report-{}-{}.{}",
        slug(&data.station_name),
        data.generated_at.format("%Y%m%d-%H%M%S"),
        format.extension()
    )
}

/// Renders `data` in the requested format.
pub fn render(
    data: &ReportData,
    format: ReportFormat,
) -> Result<RenderedReport, ReportError> {
    let bytes = match format {
        ReportFormat::Pdf => generate_pdf(data)?,
        ReportFormat::Html => render_html(data).into_bytes(),
    };
    Ok(RenderedReport {
        format,
        file_name: file_name(data, format),
        bytes,
    })
}

/// A platform facility that takes a finished report off our hands.
#[async_trait]
pub trait ShareService: Send + Sync {
    async fn share(
        &self,
        report: &RenderedReport,
    ) -> Result<SharedReport, ExportError>;
}

/// Shares reports by writing them into a directory.
#[derive(Debug, Clone)]
pub struct FileShare {
    dir: PathBuf,
}

impl FileShare {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ShareService for FileShare {
    async fn share(
        &self,
        report: &RenderedReport,
    ) -> Result<SharedReport, ExportError> {
        let location = self.dir.join(&report.file_name);
        let share_error = |source| ExportError::Share {
            location: location.display().to_string(),
            source,
        };

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(share_error)?;
        tokio::fs::write(&location, &report.bytes)
            .await
            .map_err(share_error)?;

        Ok(SharedReport { location })
    }
}

/// Renders the report and hands it to `service`. Failures are logged once and
/// returned; nothing is retried.
pub async fn export(
    data: &ReportData,
    format: ReportFormat,
    service: &dyn ShareService,
) -> Result<SharedReport, ExportError> {
    let outcome = async {
        let report = render(data, format)?;
        service.share(&report).await
    }
    .await;

    match &outcome {
        Ok(shared) => info!(location = %shared.location.display(), %format, "report shared"),
        Err(error) => error!(%error, %format, "report export failed"),
    }
    outcome
}
