use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FuelType;
use crate::utils::InvalidEntry;

/// A computed quantity, or the reason it could not be computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Figure {
    Value(Decimal),
    /// Malformed entries the figure depends on.
    Invalid(Vec<InvalidEntry>),
    /// The arithmetic left the representable decimal range.
    Overflow,
}

impl Figure {
    pub const ZERO: Figure = Figure::Value(Decimal::ZERO);

    pub fn value(&self) -> Option<Decimal> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Invalid(_) | Self::Overflow => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    pub fn is_overflow(&self) -> bool {
        matches!(self, Self::Overflow)
    }

    pub fn invalid_entries(&self) -> &[InvalidEntry] {
        match self {
            Self::Value(_) | Self::Overflow => &[],
            Self::Invalid(entries) => entries,
        }
    }

    /// Combines two figures with a checked operation.
    ///
    /// Invalid entries from both sides are kept and take precedence over an
    /// overflow. `op` returning `None` yields [`Figure::Overflow`].
    pub fn zip_with(
        &self,
        other: &Figure,
        op: impl FnOnce(Decimal, Decimal) -> Option<Decimal>,
    ) -> Figure {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => op(*a, *b).map_or(Self::Overflow, Self::Value),
            (Self::Invalid(_), _) | (_, Self::Invalid(_)) => {
                let mut entries = self.invalid_entries().to_vec();
                for entry in other.invalid_entries() {
                    if !entries.contains(entry) {
                        entries.push(entry.clone());
                    }
                }
                Self::Invalid(entries)
            }
            _ => Self::Overflow,
        }
    }

    pub fn plus(
        &self,
        other: &Figure,
    ) -> Figure {
        self.zip_with(other, Decimal::checked_add)
    }

    pub fn minus(
        &self,
        other: &Figure,
    ) -> Figure {
        self.zip_with(other, Decimal::checked_sub)
    }
}

impl From<Result<Decimal, InvalidEntry>> for Figure {
    fn from(result: Result<Decimal, InvalidEntry>) -> Self {
        match result {
            Ok(v) => Self::Value(v),
            Err(entry) => Self::Invalid(vec![entry]),
        }
    }
}

impl FromIterator<Figure> for Figure {
    /// Sums the figures; an empty iterator sums to zero.
    fn from_iter<I: IntoIterator<Item = Figure>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Figure::ZERO, |acc, figure| acc.plus(&figure))
    }
}

/// Qualitative label for a reconciliation difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscrepancyStatus {
    /// Inventory is missing compared to the post-sale expectation.
    Shortage,
    /// Inventory matches or exceeds the post-sale expectation.
    Surplus,
}

impl DiscrepancyStatus {
    /// Positive differences are shortages; zero and below are surpluses.
    pub fn from_difference(value: Decimal) -> Self {
        if value > Decimal::ZERO {
            Self::Shortage
        } else {
            Self::Surplus
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Shortage => "shortage",
            Self::Surplus => "surplus",
        }
    }
}

impl fmt::Display for DiscrepancyStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Signed difference between post-sale and measured inventory.
///
/// `status` is present only when `value` could be computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difference {
    pub value: Figure,
    pub status: Option<DiscrepancyStatus>,
}

impl From<Figure> for Difference {
    fn from(value: Figure) -> Self {
        let status = value.value().map(DiscrepancyStatus::from_difference);
        Self { value, status }
    }
}

/// Reconciliation outcome for one fuel type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelResult {
    pub fuel: FuelType,

    /// Sum of nozzle meter movements.
    pub total_sales: Figure,

    /// Opening plus received inventory, minus the measured tank levels.
    pub total_out: Figure,

    /// Post-sale expectation minus the measured tank levels.
    pub difference: Difference,

    /// Electronic sales as entered. Informational, not part of the difference.
    pub electronic_sales: Figure,

    /// Meter sales minus electronic sales.
    pub electronic_gap: Figure,
}

impl FuelResult {
    pub fn is_valid(&self) -> bool {
        self.total_sales.is_valid() && self.total_out.is_valid() && self.difference.value.is_valid()
    }
}

/// Results for both fuel types, recomputed wholesale on each calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    pub gasoline: FuelResult,
    pub gas: FuelResult,
}

impl ResultSet {
    pub fn fuel(
        &self,
        fuel: FuelType,
    ) -> &FuelResult {
        match fuel {
            FuelType::Gasoline => &self.gasoline,
            FuelType::Gas => &self.gas,
        }
    }

    pub fn total_gasoline_sales(&self) -> &Figure {
        &self.gasoline.total_sales
    }

    pub fn total_gas_sales(&self) -> &Figure {
        &self.gas.total_sales
    }

    pub fn total_gasoline_out(&self) -> &Figure {
        &self.gasoline.total_out
    }

    pub fn total_gas_out(&self) -> &Figure {
        &self.gas.total_out
    }

    pub fn gasoline_difference(&self) -> &Difference {
        &self.gasoline.difference
    }

    pub fn gas_difference(&self) -> &Difference {
        &self.gas.difference
    }

    pub fn is_valid(&self) -> bool {
        self.gasoline.is_valid() && self.gas.is_valid()
    }

    /// Every malformed entry behind an invalid figure, without duplicates.
    pub fn invalid_entries(&self) -> Vec<InvalidEntry> {
        let mut entries: Vec<InvalidEntry> = Vec::new();
        for result in [&self.gasoline, &self.gas] {
            let figures = [
                &result.total_sales,
                &result.total_out,
                &result.difference.value,
                &result.electronic_sales,
            ];
            for entry in figures.into_iter().flat_map(Figure::invalid_entries) {
                if !entries.contains(entry) {
                    entries.push(entry.clone());
                }
            }
        }
        entries
    }
}
