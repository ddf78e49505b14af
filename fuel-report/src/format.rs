use fuel_core::calculations::common::round_half_up;
use fuel_core::{Difference, Figure};

/// Formats a figure for display: two decimal places, or the entries that
/// made it uncomputable.
pub fn figure_display(figure: &Figure) -> String {
    match figure {
        Figure::Value(value) => format!("{:.2}", round_half_up(*value)),
        Figure::Invalid(entries) => {
            let reasons: Vec<String> = entries
                .iter()
                .map(|entry| format!("{} '{}'", entry.field, entry.input))
                .collect();
            format!("invalid ({})", reasons.join("; "))
        }
        Figure::Overflow => "out of range".to_string(),
    }
}

/// Formats a difference with its status, e.g. `50.00 (surplus)`.
pub fn difference_display(difference: &Difference) -> String {
    match difference.status {
        Some(status) => format!("{} ({status})", figure_display(&difference.value)),
        None => figure_display(&difference.value),
    }
}

#[cfg(test)]
mod tests {
    use fuel_core::{DiscrepancyStatus, EntryField, FuelType, InvalidEntry};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn value_is_rounded_to_two_places() {
        assert_eq!(figure_display(&Figure::Value(dec!(250))), "250.00");
        assert_eq!(figure_display(&Figure::Value(dec!(12.345))), "12.35");
        assert_eq!(figure_display(&Figure::Value(dec!(-50))), "-50.00");
    }

    #[test]
    fn invalid_lists_every_entry() {
        let figure = Figure::Invalid(vec![
            InvalidEntry::new(
                EntryField::TankLevel {
                    fuel: FuelType::Gas,
                    index: 0,
                },
                "1o0",
            ),
            InvalidEntry::new(EntryField::Received { fuel: FuelType::Gas }, "?"),
        ]);

        assert_eq!(
            figure_display(&figure),
            "invalid (gas tank 1 level '1o0'; received gas '?')"
        );
    }

    #[test]
    fn difference_includes_status() {
        let difference = Difference {
            value: Figure::Value(dec!(100)),
            status: Some(DiscrepancyStatus::Shortage),
        };

        assert_eq!(difference_display(&difference), "100.00 (shortage)");
    }
}
