//! Loaders that populate a [`fuel_core::FormStore`] from files.

pub mod form_file;
pub mod readings_csv;

pub use form_file::{FormDocument, FormFileError, template};
pub use readings_csv::{
    CsvLoadError, LoadSummary, load_nozzle_readings, load_nozzle_readings_from_file,
    load_tank_levels, load_tank_levels_from_file,
};
