//! The data handed to a report renderer.
//!
//! Everything is pre-formatted as display strings, so renderers only lay
//! text out.

use std::fmt;

use chrono::{DateTime, Utc};
use fuel_core::{Figure, FormState, FuelType, ResultSet};
use serde::{Deserialize, Serialize};

use crate::format::{difference_display, figure_display};

/// One labelled value on the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    pub label: String,
    pub value: String,
}

impl ReportLine {
    fn new(
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportData {
    pub title: String,
    pub station_name: String,
    pub period_start: String,
    pub period_end: String,
    pub generated_at: DateTime<Utc>,

    /// The six reconciliation results, in report order.
    pub lines: Vec<ReportLine>,

    /// Informational lines: electronic sales gaps and invalid entries.
    pub notes: Vec<String>,
}

impl ReportData {
    pub const TITLE: &'static str = "Fuel Station Report";

    pub fn new(
        state: &FormState,
        results: &ResultSet,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let lines = vec![
            ReportLine::new(
                "Total Gasoline Sales",
                figure_display(results.total_gasoline_sales()),
            ),
            ReportLine::new("Total Gas Sales", figure_display(results.total_gas_sales())),
            ReportLine::new(
                "Total Gasoline Out",
                figure_display(results.total_gasoline_out()),
            ),
            ReportLine::new("Total Gas Out", figure_display(results.total_gas_out())),
            ReportLine::new(
                "Gasoline Difference",
                difference_display(results.gasoline_difference()),
            ),
            ReportLine::new(
                "Gas Difference",
                difference_display(results.gas_difference()),
            ),
        ];

        let mut notes = Vec::new();
        for fuel in FuelType::ALL {
            let result = results.fuel(fuel);
            if state.fuel(fuel).electronic_sales.trim().is_empty() {
                continue;
            }
            notes.push(format!(
                "{} meter sales minus electronic sales: {}",
                fuel.label(),
                figure_display(&result.electronic_gap)
            ));
        }
        for fuel in FuelType::ALL {
            let result = results.fuel(fuel);
            let overflowed = [&result.total_sales, &result.total_out, &result.difference.value]
                .into_iter()
                .any(Figure::is_overflow);
            if overflowed {
                notes.push(format!(
                    "{} amounts are too large to reconcile; check the entries",
                    fuel.label()
                ));
            }
        }
        for entry in results.invalid_entries() {
            notes.push(format!("Check entry: {entry}"));
        }

        Self {
            title: Self::TITLE.to_string(),
            station_name: state.station_name.trim().to_string(),
            period_start: state.control_period.start.trim().to_string(),
            period_end: state.control_period.end.trim().to_string(),
            generated_at,
            lines,
            notes,
        }
    }

    /// "start to end", or whichever side was entered.
    pub fn period_display(&self) -> Option<String> {
        match (self.period_start.is_empty(), self.period_end.is_empty()) {
            (true, true) => None,
            (false, true) => Some(format!("from {}", self.period_start)),
            (true, false) => Some(format!("until {}", self.period_end)),
            (false, false) => Some(format!("{} to {}", self.period_start, self.period_end)),
        }
    }

    pub fn generated_display(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}

impl fmt::Display for ReportData {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if !self.station_name.is_empty() {
            writeln!(f, "Station: {}", self.station_name)?;
        }
        if let Some(period) = self.period_display() {
            writeln!(f, "Control period: {period}")?;
        }
        let width = self
            .lines
            .iter()
            .map(|line| line.label.len())
            .max()
            .unwrap_or(0);
        for line in &self.lines {
            writeln!(f, "{:<width$}  {}", format!("{}:", line.label), line.value, width = width + 1)?;
        }
        for note in &self.notes {
            writeln!(f, "* {note}")?;
        }
        Ok(())
    }
}
