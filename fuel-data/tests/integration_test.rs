//! Integration tests that load the on-disk fixtures into a store and reconcile them.
//!
//! These complement the unit tests inside the loader modules (which use
//! inline string literals) by exercising the read-from-disk paths end-to-end.

use std::path::{Path, PathBuf};

use fuel_core::{DiscrepancyStatus, Figure, FormStore, calculate};
use fuel_data::{FormDocument, load_nozzle_readings_from_file, load_tank_levels_from_file};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn loaded_store() -> FormStore {
    let mut store = FormStore::new();
    FormDocument::load(&fixture("march.toml"))
        .expect("form fixture should parse")
        .apply(&mut store)
        .expect("form fixture should apply");
    load_tank_levels_from_file(&fixture("tanks.csv"), &mut store)
        .expect("tank fixture should load");
    load_nozzle_readings_from_file(&fixture("nozzles.csv"), &mut store)
        .expect("nozzle fixture should load");
    store
}

#[test]
fn test_fixture_counts_cover_sheets() {
    let state = loaded_store().snapshot();

    assert_eq!(state.station_name, "North Depot");
    assert_eq!(state.gasoline.tank_count, 1);
    assert_eq!(state.gas.tank_count, 2);
    assert_eq!(state.gas.nozzle_count, 2);
}

#[test]
fn test_fixture_gasoline_reconciles_to_shortage() {
    let results = calculate(&loaded_store().snapshot());

    assert_eq!(results.total_gasoline_sales(), &Figure::Value(dec!(250)));
    assert_eq!(results.total_gasoline_out(), &Figure::Value(dec!(300)));
    assert_eq!(results.gasoline_difference().value, Figure::Value(dec!(50)));
    assert_eq!(
        results.gasoline_difference().status,
        Some(DiscrepancyStatus::Shortage)
    );
    assert_eq!(results.gasoline.electronic_gap, Figure::Value(dec!(0)));
}

#[test]
fn test_fixture_gas_balances_exactly() {
    let results = calculate(&loaded_store().snapshot());

    assert_eq!(results.total_gas_sales(), &Figure::Value(dec!(50)));
    assert_eq!(results.total_gas_out(), &Figure::Value(dec!(50)));
    assert_eq!(results.gas_difference().value, Figure::Value(dec!(0)));
    assert_eq!(
        results.gas_difference().status,
        Some(DiscrepancyStatus::Surplus)
    );
}

#[test]
fn test_missing_sheet_reports_path() {
    let mut store = FormStore::new();

    let err = load_tank_levels_from_file(&fixture("missing.csv"), &mut store).unwrap_err();

    assert!(err.to_string().contains("missing.csv"));
}

#[test]
fn test_saved_document_reloads_identically() {
    let store = loaded_store();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.toml");
    let text = FormDocument::from_state(&store.snapshot()).to_toml().unwrap();
    std::fs::write(&path, text).unwrap();

    let mut reloaded = FormStore::new();
    FormDocument::load(&path)
        .unwrap()
        .apply(&mut reloaded)
        .unwrap();

    assert_eq!(reloaded.snapshot(), store.snapshot());
}
