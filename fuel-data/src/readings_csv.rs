//! CSV loaders for tank and nozzle reading sheets.
//!
//! ## Tank sheet
//!
//! | Column  | Required | Type    | Notes                          |
//! |---------|----------|---------|--------------------------------|
//! | `fuel`  | yes      | string  | `gasoline` or `gas`            |
//! | `tank`  | yes      | integer | 1-based tank number            |
//! | `level` | no       | text    | dip reading, kept as entered   |
//!
//! ```csv
//! fuel,tank,level
//! gasoline,1,1200
//! gasoline,2,850.5
//! gas,1,430
//! ```
//!
//! ## Nozzle sheet
//!
//! | Column   | Required | Type    | Notes                        |
//! |----------|----------|---------|------------------------------|
//! | `fuel`   | yes      | string  | `gasoline` or `gas`          |
//! | `nozzle` | yes      | integer | 1-based nozzle number        |
//! | `start`  | no       | text    | meter value at period start  |
//! | `end`    | no       | text    | meter value at period end    |
//!
//! ```csv
//! fuel,nozzle,start,end
//! gasoline,1,10500,10750
//! gas,1,2200,2310
//! ```
//!
//! Readings are written into a [`FormStore`] with its indexed writes. The
//! tank or nozzle count of each fuel grows to cover the highest number on the
//! sheet; counts are never lowered. Column order does not matter and header
//! names are case-sensitive.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use fuel_core::form::MAX_ENTRIES;
use fuel_core::{Field, FormError, FormStore, FuelType, SequenceField};
use serde::Deserialize;
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// Serde-compatible rows that mirror the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TankRow {
    fuel: String,
    tank: usize,
    #[serde(default)]
    level: String,
}

#[derive(Debug, Deserialize)]
struct NozzleRow {
    fuel: String,
    nozzle: usize,
    #[serde(default)]
    start: String,
    #[serde(default)]
    end: String,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading a reading sheet.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, non-integer number, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// The `fuel` cell was not a known fuel type.
    #[error("unrecognised fuel '{fuel}' on row {row}")]
    InvalidFuel { fuel: String, row: usize },

    /// A tank or nozzle number was 0 or above the form limit.
    #[error("number {number} on row {row} must be between 1 and {max}", max = MAX_ENTRIES)]
    InvalidNumber { number: usize, row: usize },

    /// The reading file could not be read.
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The store rejected a write.
    #[error(transparent)]
    Form(#[from] FormError),
}

/// Result of applying a sheet: rows written per fuel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub rows: usize,
    pub per_fuel: BTreeMap<&'static str, usize>,
}

// ---------------------------------------------------------------------------
// Row conversion
// ---------------------------------------------------------------------------

fn fuel_cell(
    fuel: &str,
    row: usize,
) -> Result<FuelType, CsvLoadError> {
    FuelType::parse(fuel).ok_or_else(|| CsvLoadError::InvalidFuel {
        fuel: fuel.to_string(),
        row,
    })
}

/// Converts a 1-based sheet number into a zero-based form index.
fn index_cell(
    number: usize,
    row: usize,
) -> Result<usize, CsvLoadError> {
    if number == 0 || number > MAX_ENTRIES {
        return Err(CsvLoadError::InvalidNumber { number, row });
    }
    Ok(number - 1)
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All) // tolerate whitespace around values
        .flexible(false) // strict column count
        .from_reader(input)
}

/// Raises counts so every written position is active.
fn grow_counts(
    store: &mut FormStore,
    highest: &BTreeMap<FuelType, usize>,
    count_field: fn(FuelType) -> Field,
    current: fn(&fuel_core::FuelEntries) -> usize,
) {
    for (&fuel, &index) in highest {
        let needed = index + 1;
        let snapshot = store.snapshot();
        if current(snapshot.fuel(fuel)) < needed {
            debug!(%fuel, needed, "growing count to cover sheet");
            store.set(count_field(fuel), needed.to_string());
        }
    }
}

// ---------------------------------------------------------------------------
// Core loaders
// ---------------------------------------------------------------------------

/// Reads a tank sheet and writes every level into `store`.
///
/// All rows are validated before the first write, so a bad sheet leaves the
/// store untouched.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] if the CSV is structurally invalid.
/// * [`CsvLoadError::InvalidFuel`] / [`CsvLoadError::InvalidNumber`] for bad cells.
pub fn load_tank_levels<R: Read>(
    input: R,
    store: &mut FormStore,
) -> Result<LoadSummary, CsvLoadError> {
    let rows = reader(input)
        .deserialize::<TankRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            let row_number = idx + 1; // 1-based for user-facing messages
            let fuel = fuel_cell(&row.fuel, row_number)?;
            let index = index_cell(row.tank, row_number)?;
            Ok((fuel, index, row.level))
        })
        .collect::<Result<Vec<_>, CsvLoadError>>()?;

    let mut summary = LoadSummary::default();
    let mut highest: BTreeMap<FuelType, usize> = BTreeMap::new();
    for (fuel, index, level) in rows {
        store.set_at(SequenceField::TankLevel(fuel), index, level)?;
        let top = highest.entry(fuel).or_default();
        *top = (*top).max(index);
        *summary.per_fuel.entry(fuel.as_str()).or_default() += 1;
        summary.rows += 1;
    }
    grow_counts(store, &highest, Field::TankCount, |entries| entries.tank_count);

    info!(rows = summary.rows, "loaded tank levels");
    Ok(summary)
}

/// Reads a nozzle sheet and writes every reading pair into `store`.
///
/// All rows are validated before the first write.
///
/// # Errors
///
/// Same as [`load_tank_levels`].
pub fn load_nozzle_readings<R: Read>(
    input: R,
    store: &mut FormStore,
) -> Result<LoadSummary, CsvLoadError> {
    let rows = reader(input)
        .deserialize::<NozzleRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            let row_number = idx + 1;
            let fuel = fuel_cell(&row.fuel, row_number)?;
            let index = index_cell(row.nozzle, row_number)?;
            Ok((fuel, index, row.start, row.end))
        })
        .collect::<Result<Vec<_>, CsvLoadError>>()?;

    let mut summary = LoadSummary::default();
    let mut highest: BTreeMap<FuelType, usize> = BTreeMap::new();
    for (fuel, index, start, end) in rows {
        store.set_at(SequenceField::NozzleStart(fuel), index, start)?;
        store.set_at(SequenceField::NozzleEnd(fuel), index, end)?;
        let top = highest.entry(fuel).or_default();
        *top = (*top).max(index);
        *summary.per_fuel.entry(fuel.as_str()).or_default() += 1;
        summary.rows += 1;
    }
    grow_counts(store, &highest, Field::NozzleCount, |entries| {
        entries.nozzle_count
    });

    info!(rows = summary.rows, "loaded nozzle readings");
    Ok(summary)
}

/// Convenience wrapper: open `path` and delegate to [`load_tank_levels`].
pub fn load_tank_levels_from_file(
    path: &Path,
    store: &mut FormStore,
) -> Result<LoadSummary, CsvLoadError> {
    let file = std::fs::File::open(path).map_err(|source| CsvLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_tank_levels(file, store)
}

/// Convenience wrapper: open `path` and delegate to [`load_nozzle_readings`].
pub fn load_nozzle_readings_from_file(
    path: &Path,
    store: &mut FormStore,
) -> Result<LoadSummary, CsvLoadError> {
    let file = std::fs::File::open(path).map_err(|source| CsvLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_nozzle_readings(file, store)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
