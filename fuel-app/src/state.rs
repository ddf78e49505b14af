//! Session state for one reconciliation.
//!
//! Holds the form store, the results of the last calculation and the status
//! line shown to the attendant.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use fuel_core::{FormState, FormStore, ResultSet, calculate};
use fuel_report::{ExportError, ReportData, ReportFormat, ShareService, SharedReport, export};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Error,
}

/// The snapshot a calculation ran against, paired with its results.
#[derive(Debug, Clone)]
pub struct Calculation {
    pub state: Arc<FormState>,
    pub results: Arc<ResultSet>,
}

#[derive(Debug, Default)]
pub struct Session {
    pub store: FormStore,
    calculation: Option<Calculation>,
    pub status_message: Option<(String, MessageType)>,
}

impl Session {
    pub fn new(store: FormStore) -> Self {
        Self {
            store,
            ..Default::default()
        }
    }

    pub fn show_message(
        &mut self,
        msg: impl Into<String>,
        msg_type: MessageType,
    ) {
        self.status_message = Some((msg.into(), msg_type));
    }

    /// The most recent calculation, if any.
    pub fn last_calculation(&self) -> Option<&Calculation> {
        self.calculation.as_ref()
    }

    /// Calculates against the current snapshot and keeps the results for
    /// export. Results from an earlier calculation are replaced.
    pub fn calculate(&mut self) -> Arc<ResultSet> {
        let state = self.store.snapshot();
        let results = Arc::new(calculate(&state));

        if results.is_valid() {
            self.show_message("Calculation complete", MessageType::Success);
        } else {
            self.show_message(
                "Some entries are not numbers; check the marked figures",
                MessageType::Error,
            );
        }
        info!(revision = self.store.revision(), valid = results.is_valid(), "calculated");

        self.calculation = Some(Calculation {
            state,
            results: Arc::clone(&results),
        });
        results
    }

    /// Report data for the last calculation.
    pub fn report_data(
        &self,
        generated_at: DateTime<Utc>,
    ) -> Result<ReportData, ExportError> {
        let calculation = self.calculation.as_ref().ok_or(ExportError::NotCalculated)?;
        Ok(ReportData::new(
            &calculation.state,
            &calculation.results,
            generated_at,
        ))
    }

    /// Renders and shares the last calculation. The outcome is also recorded
    /// as the status message.
    pub async fn export(
        &mut self,
        format: ReportFormat,
        service: &dyn ShareService,
        generated_at: DateTime<Utc>,
    ) -> Result<SharedReport, ExportError> {
        let outcome = match self.report_data(generated_at) {
            Ok(data) => export(&data, format, service).await,
            Err(e) => Err(e),
        };

        match &outcome {
            Ok(shared) => self.show_message(
                format!("Report saved to {}", shared.location.display()),
                MessageType::Success,
            ),
            Err(e) => self.show_message(format!("Export failed: {e}"), MessageType::Error),
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use fuel_core::{Field, FuelType, SequenceField};
    use fuel_report::FileShare;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 1, 8, 30, 0).unwrap()
    }

    fn filled_session() -> Session {
        let mut session = Session::default();
        let store = &mut session.store;
        store.set(Field::StationName, "North Depot");
        store.set(Field::Initial(FuelType::Gasoline), "1000");
        store.set(Field::Received(FuelType::Gasoline), "500");
        store.set(Field::TankCount(FuelType::Gasoline), "1");
        store
            .set_at(SequenceField::TankLevel(FuelType::Gasoline), 0, "1000")
            .unwrap();
        session
    }

    #[test]
    fn calculate_keeps_results_for_export() {
        let mut session = filled_session();

        let results = session.calculate();

        assert_eq!(results.gasoline_difference().value.value(), Some(dec!(500)));
        assert_eq!(
            session.status_message,
            Some(("Calculation complete".to_string(), MessageType::Success))
        );
        assert!(session.last_calculation().is_some());
    }

    #[test]
    fn later_edits_do_not_change_calculated_snapshot() {
        let mut session = filled_session();
        session.calculate();

        session.store.set(Field::StationName, "Renamed");

        let data = session.report_data(generated_at()).unwrap();
        assert_eq!(data.station_name, "North Depot");
    }

    #[test]
    fn invalid_entry_sets_error_status() {
        let mut session = filled_session();
        session.store.set(Field::Received(FuelType::Gas), "n/a");

        let results = session.calculate();

        assert!(!results.is_valid());
        assert_eq!(
            session.status_message.as_ref().map(|(_, kind)| *kind),
            Some(MessageType::Error)
        );
    }

    #[tokio::test]
    async fn export_before_calculate_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = filled_session();

        let err = session
            .export(ReportFormat::Html, &FileShare::new(dir.path()), generated_at())
            .await
            .unwrap_err();

        assert!(matches!(err, ExportError::NotCalculated));
        assert_eq!(
            session.status_message.as_ref().map(|(_, kind)| *kind),
            Some(MessageType::Error)
        );
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn export_writes_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = filled_session();
        session.calculate();

        let shared = session
            .export(ReportFormat::Html, &FileShare::new(dir.path()), generated_at())
            .await
            .unwrap();

        let html = std::fs::read_to_string(&shared.location).unwrap();
        assert!(html.contains("500.00 (shortage)"));
    }
}
