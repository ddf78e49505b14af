use std::fmt;

use serde::{Deserialize, Serialize};

use super::FuelType;

/// Location of a numeric entry on the form.
///
/// Indexes are zero-based; [`fmt::Display`] renders them 1-based the way the
/// attendant sees them ("gasoline tank 2 level").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryField {
    Initial { fuel: FuelType },
    Received { fuel: FuelType },
    ElectronicSales { fuel: FuelType },
    TankLevel { fuel: FuelType, index: usize },
    NozzleStart { fuel: FuelType, index: usize },
    NozzleEnd { fuel: FuelType, index: usize },
}

impl EntryField {
    pub fn fuel(&self) -> FuelType {
        match *self {
            Self::Initial { fuel }
            | Self::Received { fuel }
            | Self::ElectronicSales { fuel }
            | Self::TankLevel { fuel, .. }
            | Self::NozzleStart { fuel, .. }
            | Self::NozzleEnd { fuel, .. } => fuel,
        }
    }
}

impl fmt::Display for EntryField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match *self {
            Self::Initial { fuel } => write!(f, "initial {fuel}"),
            Self::Received { fuel } => write!(f, "received {fuel}"),
            Self::ElectronicSales { fuel } => write!(f, "electronic {fuel} sales"),
            Self::TankLevel { fuel, index } => write!(f, "{fuel} tank {} level", index + 1),
            Self::NozzleStart { fuel, index } => write!(f, "{fuel} nozzle {} start", index + 1),
            Self::NozzleEnd { fuel, index } => write!(f, "{fuel} nozzle {} end", index + 1),
        }
    }
}
