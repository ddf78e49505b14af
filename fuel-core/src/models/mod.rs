mod entry_field;
mod form_state;
mod fuel_type;
mod result_set;

pub use entry_field::EntryField;
pub use form_state::{ControlPeriod, FormState, FuelEntries, NozzleReading};
pub use fuel_type::FuelType;
pub use result_set::{DiscrepancyStatus, Difference, Figure, FuelResult, ResultSet};
