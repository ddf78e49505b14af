//! Inventory reconciliation for one control period.
//!
//! Each fuel type is reconciled independently from its own entries. A
//! malformed entry only invalidates the figures that depend on it.
//!
//! # Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Total inventory: initial + received |
//! | 2    | Total sales: Σ (end − start) over the active nozzles |
//! | 3    | Final inventory: Σ tank levels over the active tanks |
//! | 4    | Total out: step 1 − step 3 |
//! | 5    | Post-sale inventory: step 1 − step 2 |
//! | 6    | Difference: step 5 − step 3 (positive is a shortage, otherwise a surplus) |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fuel_core::calculations::calculate;
//! use fuel_core::models::{DiscrepancyStatus, Figure, FormState, NozzleReading};
//!
//! let mut state = FormState::default();
//! state.gasoline.initial = "1000".to_string();
//! state.gasoline.received = "500".to_string();
//! state.gasoline.tank_count = 1;
//! state.gasoline.tank_levels = vec!["1200".to_string()];
//! state.gasoline.nozzle_count = 1;
//! state.gasoline.nozzle_readings = vec![NozzleReading::new("0", "250")];
//!
//! let results = calculate(&state);
//!
//! assert_eq!(results.total_gasoline_sales(), &Figure::Value(dec!(250)));
//! assert_eq!(results.total_gasoline_out(), &Figure::Value(dec!(300)));
//! assert_eq!(results.gasoline_difference().value, Figure::Value(dec!(50)));
//! assert_eq!(results.gasoline_difference().status, Some(DiscrepancyStatus::Shortage));
//! ```

use tracing::{debug, warn};

use crate::calculations::common::sum_figures;
use crate::models::{
    Difference, EntryField, Figure, FormState, FuelEntries, FuelResult, FuelType, ResultSet,
};
use crate::utils::parse_amount;

/// Reconciles every fuel type on the form.
///
/// Pure: the same snapshot always yields the same [`ResultSet`].
pub fn calculate(state: &FormState) -> ResultSet {
    let results = ResultSet {
        gasoline: Reconciliation::new(FuelType::Gasoline, &state.gasoline).calculate(),
        gas: Reconciliation::new(FuelType::Gas, &state.gas).calculate(),
    };

    if !results.is_valid() {
        warn!(
            invalid_entries = results.invalid_entries().len(),
            "reconciliation has invalid entries"
        );
    }

    results
}

/// Calculator for a single fuel type.
#[derive(Debug, Clone)]
pub struct Reconciliation<'a> {
    fuel: FuelType,
    entries: &'a FuelEntries,
}

impl<'a> Reconciliation<'a> {
    pub fn new(
        fuel: FuelType,
        entries: &'a FuelEntries,
    ) -> Self {
        Self { fuel, entries }
    }

    /// Runs all reconciliation steps for this fuel.
    pub fn calculate(&self) -> FuelResult {
        let total_inventory = self.total_inventory();
        let total_sales = self.total_sales();
        let final_inventory = self.final_inventory();

        let total_out = total_inventory.minus(&final_inventory);
        let post_sale_inventory = total_inventory.minus(&total_sales);
        let difference = Difference::from(post_sale_inventory.minus(&final_inventory));

        let electronic_sales = self.electronic_sales();
        let electronic_gap = total_sales.minus(&electronic_sales);

        debug!(
            fuel = %self.fuel,
            total_sales = ?total_sales.value(),
            total_out = ?total_out.value(),
            difference = ?difference.value.value(),
            "reconciled fuel"
        );

        FuelResult {
            fuel: self.fuel,
            total_sales,
            total_out,
            difference,
            electronic_sales,
            electronic_gap,
        }
    }

    /// Opening inventory plus deliveries.
    fn total_inventory(&self) -> Figure {
        let fuel = self.fuel;
        let initial = Figure::from(parse_amount(
            EntryField::Initial { fuel },
            &self.entries.initial,
        ));
        let received = Figure::from(parse_amount(
            EntryField::Received { fuel },
            &self.entries.received,
        ));
        initial.plus(&received)
    }

    /// Sum of meter movements over the active nozzles.
    ///
    /// A reading with `end < start` contributes a negative amount.
    fn total_sales(&self) -> Figure {
        let fuel = self.fuel;
        sum_figures(
            self.entries
                .active_nozzle_readings()
                .map(|(index, start, end)| {
                    let start = Figure::from(parse_amount(
                        EntryField::NozzleStart { fuel, index },
                        start,
                    ));
                    let end = Figure::from(parse_amount(EntryField::NozzleEnd { fuel, index }, end));
                    end.minus(&start)
                }),
        )
    }

    /// Sum of the measured tank levels.
    fn final_inventory(&self) -> Figure {
        let fuel = self.fuel;
        sum_figures(self.entries.active_tank_levels().map(|(index, level)| {
            Figure::from(parse_amount(EntryField::TankLevel { fuel, index }, level))
        }))
    }

    fn electronic_sales(&self) -> Figure {
        Figure::from(parse_amount(
            EntryField::ElectronicSales { fuel: self.fuel },
            &self.entries.electronic_sales,
        ))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{DiscrepancyStatus, NozzleReading};
    use crate::utils::InvalidEntry;

    fn gasoline_form(tank_levels: &[&str]) -> FormState {
        let mut state = FormState::default();
        state.gasoline = FuelEntries {
            tank_count: tank_levels.len(),
            tank_levels: tank_levels.iter().map(|s| s.to_string()).collect(),
            initial: "1000".to_string(),
            received: "500".to_string(),
            nozzle_count: 1,
            nozzle_readings: vec![NozzleReading::new("0", "250")],
            ..Default::default()
        };
        state
    }

    // =========================================================================
    // Scenario tests
    // =========================================================================

    #[test]
    fn scenario_small_shortage() {
        let results = calculate(&gasoline_form(&["1200"]));

        assert_eq!(results.total_gasoline_sales(), &Figure::Value(dec!(250)));
        assert_eq!(results.total_gasoline_out(), &Figure::Value(dec!(300)));
        assert_eq!(
            results.gasoline_difference(),
            &Difference {
                value: Figure::Value(dec!(50)),
                status: Some(DiscrepancyStatus::Shortage),
            }
        );
    }

    #[test]
    fn scenario_negative_difference_is_surplus() {
        let results = calculate(&gasoline_form(&["1300"]));

        assert_eq!(results.total_gasoline_out(), &Figure::Value(dec!(200)));
        assert_eq!(
            results.gasoline_difference(),
            &Difference {
                value: Figure::Value(dec!(-50)),
                status: Some(DiscrepancyStatus::Surplus),
            }
        );
    }

    #[test]
    fn scenario_larger_shortage() {
        let results = calculate(&gasoline_form(&["1150"]));

        assert_eq!(
            results.gasoline_difference(),
            &Difference {
                value: Figure::Value(dec!(100)),
                status: Some(DiscrepancyStatus::Shortage),
            }
        );
    }

    #[test]
    fn zero_difference_is_surplus() {
        let results = calculate(&gasoline_form(&["1250"]));

        assert_eq!(results.gasoline_difference().value, Figure::Value(dec!(0)));
        assert_eq!(
            results.gasoline_difference().status,
            Some(DiscrepancyStatus::Surplus)
        );
    }

    #[test]
    fn tank_levels_sum_across_tanks() {
        let results = calculate(&gasoline_form(&["700", "500"]));

        assert_eq!(results.total_gasoline_out(), &Figure::Value(dec!(300)));
    }

    // =========================================================================
    // Edge cases
    // =========================================================================

    #[test]
    fn no_tanks_or_nozzles_yields_inventory_as_difference() {
        let mut state = FormState::default();
        state.gas.initial = "800".to_string();
        state.gas.received = "200".to_string();

        let results = calculate(&state);

        assert_eq!(results.total_gas_sales(), &Figure::ZERO);
        assert_eq!(results.total_gas_out(), &Figure::Value(dec!(1000)));
        assert_eq!(results.gas_difference().value, Figure::Value(dec!(1000)));
        assert_eq!(
            results.gas_difference().status,
            Some(DiscrepancyStatus::Shortage)
        );
    }

    #[test]
    fn empty_form_is_all_zero_surplus() {
        let results = calculate(&FormState::default());

        for fuel in FuelType::ALL {
            let result = results.fuel(fuel);
            assert_eq!(result.total_sales, Figure::ZERO);
            assert_eq!(result.total_out, Figure::ZERO);
            assert_eq!(result.difference.status, Some(DiscrepancyStatus::Surplus));
        }
    }

    #[test]
    fn swapped_nozzle_reading_flips_sign() {
        let mut state = gasoline_form(&["1200"]);
        state.gasoline.nozzle_readings = vec![NozzleReading::new("250", "0")];

        let results = calculate(&state);

        assert_eq!(results.total_gasoline_sales(), &Figure::Value(dec!(-250)));
    }

    #[test]
    fn unwritten_tank_position_counts_as_zero() {
        let mut state = gasoline_form(&["1200"]);
        state.gasoline.tank_count = 3;

        let results = calculate(&state);

        assert_eq!(results.total_gasoline_out(), &Figure::Value(dec!(300)));
    }

    #[test]
    fn entries_beyond_count_are_ignored() {
        let mut state = gasoline_form(&["1200", "9999"]);
        state.gasoline.tank_count = 1;

        let results = calculate(&state);

        assert_eq!(results.total_gasoline_out(), &Figure::Value(dec!(300)));
    }

    #[test]
    fn calculation_is_idempotent() {
        let state = gasoline_form(&["1200"]);

        assert_eq!(calculate(&state), calculate(&state));
    }

    // =========================================================================
    // Invalid input propagation
    // =========================================================================

    #[test]
    fn malformed_tank_level_invalidates_dependent_figures() {
        let results = calculate(&gasoline_form(&["1200", "12o0"]));
        let expected = InvalidEntry::new(
            EntryField::TankLevel {
                fuel: FuelType::Gasoline,
                index: 1,
            },
            "12o0",
        );

        assert_eq!(results.total_gasoline_sales(), &Figure::Value(dec!(250)));
        assert_eq!(
            results.total_gasoline_out(),
            &Figure::Invalid(vec![expected.clone()])
        );
        assert_eq!(
            results.gasoline_difference().value,
            Figure::Invalid(vec![expected.clone()])
        );
        assert_eq!(results.gasoline_difference().status, None);
        assert_eq!(results.invalid_entries(), vec![expected]);
    }

    #[test]
    fn malformed_gasoline_entry_leaves_gas_untouched() {
        let mut state = gasoline_form(&["1200"]);
        state.gasoline.initial = "lots".to_string();
        state.gas.initial = "300".to_string();

        let results = calculate(&state);

        assert!(!results.gasoline.is_valid());
        assert!(results.gas.is_valid());
        assert_eq!(results.gas_difference().value, Figure::Value(dec!(300)));
    }

    #[test]
    fn malformed_nozzle_reading_invalidates_sales() {
        let mut state = gasoline_form(&["1200"]);
        state.gasoline.nozzle_readings = vec![NozzleReading::new("x", "250")];

        let results = calculate(&state);

        assert_eq!(
            results.total_gasoline_sales().invalid_entries(),
            &[InvalidEntry::new(
                EntryField::NozzleStart {
                    fuel: FuelType::Gasoline,
                    index: 0,
                },
                "x",
            )]
        );
        assert!(results.total_gasoline_out().is_valid());
    }

    // =========================================================================
    // Electronic sales
    // =========================================================================

    #[test]
    fn electronic_sales_do_not_affect_difference() {
        let mut state = gasoline_form(&["1200"]);
        state.gasoline.electronic_sales = "240".to_string();

        let results = calculate(&state);

        assert_eq!(results.gasoline_difference().value, Figure::Value(dec!(50)));
        assert_eq!(results.gasoline.electronic_sales, Figure::Value(dec!(240)));
        assert_eq!(results.gasoline.electronic_gap, Figure::Value(dec!(10)));
    }

    #[test]
    fn malformed_electronic_sales_only_invalidates_gap() {
        let mut state = gasoline_form(&["1200"]);
        state.gasoline.electronic_sales = "n/a".to_string();

        let results = calculate(&state);

        assert!(results.gasoline.is_valid());
        assert!(!results.gasoline.electronic_gap.is_valid());
        assert_eq!(results.invalid_entries().len(), 1);
    }

    // =========================================================================
    // Range limits
    // =========================================================================

    #[test]
    fn inventory_beyond_decimal_range_is_overflow() {
        let mut state = gasoline_form(&["1200"]);
        state.gasoline.initial = "79228162514264337593543950335".to_string();
        state.gasoline.received = "1".to_string();
        state.gas.initial = "300".to_string();

        let results = calculate(&state);

        assert_eq!(results.total_gasoline_out(), &Figure::Overflow);
        assert_eq!(results.gasoline_difference().value, Figure::Overflow);
        assert_eq!(results.gasoline_difference().status, None);
        assert!(!results.is_valid());
        assert!(results.invalid_entries().is_empty());
        assert_eq!(results.gas_difference().value, Figure::Value(dec!(300)));
    }

    #[test]
    fn negative_tank_level_at_range_limit_is_overflow() {
        let mut state = gasoline_form(&["-1"]);
        state.gasoline.initial = "79228162514264337593543950335".to_string();
        state.gasoline.received = String::new();

        let results = calculate(&state);

        assert_eq!(results.total_gasoline_out(), &Figure::Overflow);
        assert_eq!(results.total_gasoline_sales(), &Figure::Value(dec!(250)));
    }
}
