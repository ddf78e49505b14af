//! TOML form documents.
//!
//! A form document holds everything an attendant would type into the form.
//! Amounts may be written as TOML strings or numbers; both are stored as text.
//! Counts are optional and default to the length of their sequence.
//!
//! ```toml
//! station_name = "North Depot"
//!
//! [control_period]
//! start = "2024-03-01"
//! end = "2024-03-31"
//!
//! [gasoline]
//! initial = 1000
//! received = "500"
//! electronic_sales = 245
//! tank_levels = [700, "500"]
//! nozzle_readings = [{ start = 0, end = 250 }]
//!
//! [gas]
//! tank_count = 1
//! initial = 300
//! ```

use std::path::Path;

use fuel_core::{
    Field, FormError, FormState, FormStore, FuelEntries, FuelType, PeriodField, SequenceField,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while reading or writing a form document.
#[derive(Debug, Error)]
pub enum FormFileError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid form document: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot write form document: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Form(#[from] FormError),
}

/// An entry as written in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawEntry {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl RawEntry {
    pub fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
        }
    }
}

impl Default for RawEntry {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodDocument {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NozzleDocument {
    pub start: RawEntry,
    pub end: RawEntry,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuelDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tank_count: Option<RawEntry>,
    pub tank_levels: Vec<RawEntry>,
    pub initial: RawEntry,
    pub received: RawEntry,
    pub electronic_sales: RawEntry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nozzle_count: Option<RawEntry>,
    pub nozzle_readings: Vec<NozzleDocument>,
}

/// The whole form as a TOML document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDocument {
    pub station_name: String,
    pub control_period: PeriodDocument,
    pub gasoline: FuelDocument,
    pub gas: FuelDocument,
}

impl FormDocument {
    pub fn fuel(
        &self,
        fuel: FuelType,
    ) -> &FuelDocument {
        match fuel {
            FuelType::Gasoline => &self.gasoline,
            FuelType::Gas => &self.gas,
        }
    }

    /// Parses a document from TOML text.
    pub fn from_toml(input: &str) -> Result<Self, FormFileError> {
        Ok(toml::from_str(input)?)
    }

    /// Reads and parses a document from disk.
    pub fn load(path: &Path) -> Result<Self, FormFileError> {
        let contents = std::fs::read_to_string(path).map_err(|source| FormFileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let document = Self::from_toml(&contents)?;
        info!(path = %path.display(), "loaded form document");
        Ok(document)
    }

    /// Builds a document holding the entries of `state`.
    pub fn from_state(state: &FormState) -> Self {
        Self {
            station_name: state.station_name.clone(),
            control_period: PeriodDocument {
                start: state.control_period.start.clone(),
                end: state.control_period.end.clone(),
            },
            gasoline: FuelDocument::from_entries(&state.gasoline),
            gas: FuelDocument::from_entries(&state.gas),
        }
    }

    pub fn to_toml(&self) -> Result<String, FormFileError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes every entry of the document into `store` through its field-level
    /// operations.
    pub fn apply(
        self,
        store: &mut FormStore,
    ) -> Result<(), FormFileError> {
        if !self.station_name.is_empty() {
            store.set(Field::StationName, self.station_name);
        }
        if !self.control_period.start.is_empty() {
            store.set_nested(PeriodField::Start, self.control_period.start);
        }
        if !self.control_period.end.is_empty() {
            store.set_nested(PeriodField::End, self.control_period.end);
        }
        self.gasoline.apply(FuelType::Gasoline, store)?;
        self.gas.apply(FuelType::Gas, store)?;
        Ok(())
    }
}

impl FuelDocument {
    fn from_entries(entries: &FuelEntries) -> Self {
        Self {
            tank_count: Some(RawEntry::Integer(entries.tank_count as i64)),
            tank_levels: entries
                .tank_levels
                .iter()
                .take(entries.tank_count)
                .cloned()
                .map(RawEntry::Text)
                .collect(),
            initial: RawEntry::Text(entries.initial.clone()),
            received: RawEntry::Text(entries.received.clone()),
            electronic_sales: RawEntry::Text(entries.electronic_sales.clone()),
            nozzle_count: Some(RawEntry::Integer(entries.nozzle_count as i64)),
            nozzle_readings: entries
                .nozzle_readings
                .iter()
                .take(entries.nozzle_count)
                .map(|reading| NozzleDocument {
                    start: RawEntry::Text(reading.start.clone()),
                    end: RawEntry::Text(reading.end.clone()),
                })
                .collect(),
        }
    }

    fn apply(
        self,
        fuel: FuelType,
        store: &mut FormStore,
    ) -> Result<(), FormFileError> {
        let tank_count = self
            .tank_count
            .map(RawEntry::into_text)
            .unwrap_or_else(|| self.tank_levels.len().to_string());
        let nozzle_count = self
            .nozzle_count
            .map(RawEntry::into_text)
            .unwrap_or_else(|| self.nozzle_readings.len().to_string());
        debug!(%fuel, %tank_count, %nozzle_count, "applying fuel entries");

        store.set(Field::TankCount(fuel), tank_count);
        store.set(Field::NozzleCount(fuel), nozzle_count);
        store.set(Field::Initial(fuel), self.initial.into_text());
        store.set(Field::Received(fuel), self.received.into_text());
        store.set(Field::ElectronicSales(fuel), self.electronic_sales.into_text());

        for (index, level) in self.tank_levels.into_iter().enumerate() {
            store.set_at(SequenceField::TankLevel(fuel), index, level.into_text())?;
        }
        for (index, reading) in self.nozzle_readings.into_iter().enumerate() {
            store.set_at(SequenceField::NozzleStart(fuel), index, reading.start.into_text())?;
            store.set_at(SequenceField::NozzleEnd(fuel), index, reading.end.into_text())?;
        }
        Ok(())
    }
}

/// A blank document with one tank and one nozzle per fuel, for filling in.
pub fn template() -> FormDocument {
    let fuel = FuelDocument {
        tank_count: Some(RawEntry::Integer(1)),
        tank_levels: vec![RawEntry::default()],
        nozzle_count: Some(RawEntry::Integer(1)),
        nozzle_readings: vec![NozzleDocument::default()],
        ..Default::default()
    };
    FormDocument {
        gasoline: fuel.clone(),
        gas: fuel,
        ..Default::default()
    }
}
