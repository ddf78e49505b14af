pub mod config;
pub mod edits;
pub mod inputs;
pub mod logging;
pub mod output;
pub mod state;
