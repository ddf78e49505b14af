//! Reconciliation calculations.
//!
//! This module turns a [`FormState`](crate::models::FormState) snapshot into a
//! [`ResultSet`](crate::models::ResultSet).

pub mod common;
pub mod reconciliation;

pub use reconciliation::{Reconciliation, calculate};
