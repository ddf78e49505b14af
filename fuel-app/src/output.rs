//! Command output on stdout.

use fuel_core::ResultSet;
use fuel_report::ReportData;
use serde::Serialize;

/// `--json` output: the report lines plus the raw figures.
#[derive(Debug, Serialize)]
pub struct CalculationOutput<'a> {
    pub report: &'a ReportData,
    pub results: &'a ResultSet,
}

pub fn to_json(
    report: &ReportData,
    results: &ResultSet,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&CalculationOutput { report, results })
}
