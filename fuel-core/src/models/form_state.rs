use serde::{Deserialize, Serialize};

use super::FuelType;

/// Start and end of the control period, kept as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlPeriod {
    pub start: String,
    pub end: String,
}

/// A dispenser's meter values for the control period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NozzleReading {
    pub start: String,
    pub end: String,
}

impl NozzleReading {
    pub fn new(
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Everything entered for one fuel type.
///
/// Amounts are stored as the attendant typed them; parsing happens when the
/// form is reconciled. Sequences may hold more entries than their count (a
/// count that was lowered keeps the values beyond it) or fewer (positions
/// never written). Only the first `count` positions are active, and a
/// position that was never written reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelEntries {
    pub tank_count: usize,
    pub tank_levels: Vec<String>,
    pub initial: String,
    pub received: String,
    pub electronic_sales: String,
    pub nozzle_count: usize,
    pub nozzle_readings: Vec<NozzleReading>,
}

impl FuelEntries {
    /// Tank levels for the active tanks, with their zero-based index.
    pub fn active_tank_levels(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        (0..self.tank_count).map(|index| {
            let level = self.tank_levels.get(index).map_or("", String::as_str);
            (index, level)
        })
    }

    /// Meter readings for the active nozzles, with their zero-based index.
    pub fn active_nozzle_readings(&self) -> impl Iterator<Item = (usize, &str, &str)> + '_ {
        (0..self.nozzle_count).map(|index| match self.nozzle_readings.get(index) {
            Some(reading) => (index, reading.start.as_str(), reading.end.as_str()),
            None => (index, "", ""),
        })
    }
}

/// The whole reconciliation form for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub station_name: String,
    pub control_period: ControlPeriod,
    pub gasoline: FuelEntries,
    pub gas: FuelEntries,
}

impl FormState {
    pub fn fuel(
        &self,
        fuel: FuelType,
    ) -> &FuelEntries {
        match fuel {
            FuelType::Gasoline => &self.gasoline,
            FuelType::Gas => &self.gas,
        }
    }

    pub fn fuel_mut(
        &mut self,
        fuel: FuelType,
    ) -> &mut FuelEntries {
        match fuel {
            FuelType::Gasoline => &mut self.gasoline,
            FuelType::Gas => &mut self.gas,
        }
    }
}
