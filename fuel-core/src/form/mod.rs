//! Editable form state.

mod store;

pub use store::{Field, FormError, FormStore, MAX_ENTRIES, PeriodField, SequenceField};
