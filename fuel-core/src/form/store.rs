//! Form state store.
//!
//! Every write produces a fresh [`FormState`] snapshot behind an [`Arc`].
//! Readers holding an earlier snapshot keep seeing it unchanged; they never
//! observe a half-applied edit.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{trace, warn};

use crate::models::{FormState, FuelType, NozzleReading};
use crate::utils::parse_count;

/// Upper bound on tanks and nozzles per fuel type.
pub const MAX_ENTRIES: usize = 99;

/// Errors raised by store writes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    /// A sequence write addressed a position beyond [`MAX_ENTRIES`].
    #[error("{field} position {position} is beyond the limit of {max}", position = .index + 1, max = MAX_ENTRIES)]
    IndexOutOfRange { field: SequenceField, index: usize },
}

/// Scalar fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    StationName,
    TankCount(FuelType),
    NozzleCount(FuelType),
    Initial(FuelType),
    Received(FuelType),
    ElectronicSales(FuelType),
}

impl fmt::Display for Field {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::StationName => write!(f, "station name"),
            Self::TankCount(fuel) => write!(f, "{fuel} tank count"),
            Self::NozzleCount(fuel) => write!(f, "{fuel} nozzle count"),
            Self::Initial(fuel) => write!(f, "initial {fuel}"),
            Self::Received(fuel) => write!(f, "received {fuel}"),
            Self::ElectronicSales(fuel) => write!(f, "electronic {fuel} sales"),
        }
    }
}

/// Sub-fields of the control period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodField {
    Start,
    End,
}

/// Indexed sequences of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceField {
    TankLevel(FuelType),
    NozzleStart(FuelType),
    NozzleEnd(FuelType),
}

impl fmt::Display for SequenceField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::TankLevel(fuel) => write!(f, "{fuel} tank level"),
            Self::NozzleStart(fuel) => write!(f, "{fuel} nozzle start"),
            Self::NozzleEnd(fuel) => write!(f, "{fuel} nozzle end"),
        }
    }
}

/// Holds the current form snapshot and applies field-level edits.
#[derive(Debug, Clone, Default)]
pub struct FormStore {
    state: Arc<FormState>,
    revision: u64,
}

impl FormStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: FormState) -> Self {
        Self {
            state: Arc::new(state),
            revision: 0,
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<FormState> {
        Arc::clone(&self.state)
    }

    /// Number of writes applied since the store was created.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Sets a scalar field.
    ///
    /// Amount text is stored as given. Count text that is not a non-negative
    /// integer is recorded as zero, and counts above [`MAX_ENTRIES`] are clamped.
    pub fn set(
        &mut self,
        field: Field,
        value: impl Into<String>,
    ) -> Arc<FormState> {
        let value = value.into();
        trace!(%field, %value, "set");
        match field {
            Field::StationName => self.update(|state| state.station_name = value),
            Field::TankCount(fuel) => {
                let count = count_entry(field, &value);
                self.update(|state| state.fuel_mut(fuel).tank_count = count)
            }
            Field::NozzleCount(fuel) => {
                let count = count_entry(field, &value);
                self.update(|state| state.fuel_mut(fuel).nozzle_count = count)
            }
            Field::Initial(fuel) => self.update(|state| state.fuel_mut(fuel).initial = value),
            Field::Received(fuel) => self.update(|state| state.fuel_mut(fuel).received = value),
            Field::ElectronicSales(fuel) => {
                self.update(|state| state.fuel_mut(fuel).electronic_sales = value)
            }
        }
    }

    /// Sets the start or end of the control period.
    pub fn set_nested(
        &mut self,
        field: PeriodField,
        value: impl Into<String>,
    ) -> Arc<FormState> {
        let value = value.into();
        trace!(?field, %value, "set control period");
        self.update(|state| match field {
            PeriodField::Start => state.control_period.start = value,
            PeriodField::End => state.control_period.end = value,
        })
    }

    /// Writes one position of a sequence.
    ///
    /// The sequence grows with empty entries up to `index`; other positions
    /// are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::IndexOutOfRange`] when `index` is not below [`MAX_ENTRIES`].
    pub fn set_at(
        &mut self,
        field: SequenceField,
        index: usize,
        value: impl Into<String>,
    ) -> Result<Arc<FormState>, FormError> {
        if index >= MAX_ENTRIES {
            return Err(FormError::IndexOutOfRange { field, index });
        }
        let value = value.into();
        trace!(%field, index, %value, "set at");

        Ok(self.update(|state| match field {
            SequenceField::TankLevel(fuel) => {
                let levels = &mut state.fuel_mut(fuel).tank_levels;
                if levels.len() <= index {
                    levels.resize(index + 1, String::new());
                }
                levels[index] = value;
            }
            SequenceField::NozzleStart(fuel) => {
                nozzle_slot(&mut state.fuel_mut(fuel).nozzle_readings, index).start = value;
            }
            SequenceField::NozzleEnd(fuel) => {
                nozzle_slot(&mut state.fuel_mut(fuel).nozzle_readings, index).end = value;
            }
        }))
    }

    /// Discards every entry.
    pub fn reset(&mut self) -> Arc<FormState> {
        self.update(|state| *state = FormState::default())
    }

    fn update(
        &mut self,
        edit: impl FnOnce(&mut FormState),
    ) -> Arc<FormState> {
        let mut next = FormState::clone(&self.state);
        edit(&mut next);
        self.state = Arc::new(next);
        self.revision += 1;
        self.snapshot()
    }
}

fn nozzle_slot(
    readings: &mut Vec<NozzleReading>,
    index: usize,
) -> &mut NozzleReading {
    if readings.len() <= index {
        readings.resize_with(index + 1, NozzleReading::default);
    }
    &mut readings[index]
}

fn count_entry(
    field: Field,
    value: &str,
) -> usize {
    match parse_count(value) {
        Some(count) if count > MAX_ENTRIES => {
            warn!(%field, count, max = MAX_ENTRIES, "count clamped");
            MAX_ENTRIES
        }
        Some(count) => count,
        None => {
            warn!(%field, input = %value, "count is not a whole number, using 0");
            0
        }
    }
}
