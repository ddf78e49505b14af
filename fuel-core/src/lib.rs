pub mod calculations;
pub mod form;
pub mod models;
pub mod utils;

pub use calculations::calculate;
pub use form::{Field, FormError, FormStore, PeriodField, SequenceField};
pub use models::*;
pub use utils::InvalidEntry;
