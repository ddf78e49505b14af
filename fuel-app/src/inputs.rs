//! Populating a form store from the command line inputs.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fuel_core::FormStore;
use fuel_data::{FormDocument, load_nozzle_readings_from_file, load_tank_levels_from_file};
use tracing::{debug, info};

use crate::edits::Edit;

/// Where the form entries come from. Sources are applied in field order:
/// form document, tank sheet, nozzle sheet, then each `--set` in turn, so
/// later sources overwrite earlier ones.
#[derive(Debug, Clone, Default, Args)]
pub struct FormInputs {
    /// TOML form document.
    #[arg(long, value_name = "FILE")]
    pub form: Option<PathBuf>,

    /// CSV sheet of tank levels (`fuel,tank,level`).
    #[arg(long, value_name = "CSV")]
    pub tanks: Option<PathBuf>,

    /// CSV sheet of nozzle readings (`fuel,nozzle,start,end`).
    #[arg(long, value_name = "CSV")]
    pub nozzles: Option<PathBuf>,

    /// Single field edit, e.g. `gasoline.tank[2]=1200`. Repeatable.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub edits: Vec<Edit>,
}

impl FormInputs {
    pub fn load_store(&self) -> Result<FormStore> {
        let mut store = FormStore::new();

        if let Some(path) = &self.form {
            FormDocument::load(path)
                .and_then(|doc| doc.apply(&mut store))
                .with_context(|| format!("loading form '{}'", path.display()))?;
            info!(path = %path.display(), "form loaded");
        }
        if let Some(path) = &self.tanks {
            let summary = load_tank_levels_from_file(path, &mut store)
                .with_context(|| format!("loading tank levels '{}'", path.display()))?;
            debug!(?summary, "tank sheet applied");
        }
        if let Some(path) = &self.nozzles {
            let summary = load_nozzle_readings_from_file(path, &mut store)
                .with_context(|| format!("loading nozzle readings '{}'", path.display()))?;
            debug!(?summary, "nozzle sheet applied");
        }
        for edit in &self.edits {
            edit.clone()
                .apply(&mut store)
                .with_context(|| format!("applying {edit}"))?;
        }

        Ok(store)
    }
}
