mod presets;
mod screen;
mod snapshot;

use std::time::Instant;

use finsift_core::{Envelope, EnvelopeMeta};
use serde_json::Value;
use uuid::Uuid;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }
}

pub fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let started = Instant::now();

    let command_result = match &cli.command {
        Command::Screen(args) => screen::run(args)?,
        Command::Snapshot(args) => snapshot::run(args)?,
        Command::Presets => presets::run()?,
    };

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let mut meta = EnvelopeMeta::new(Uuid::new_v4().to_string(), "v1.0.0", latency_ms)?;
    for warning in command_result.warnings {
        meta.push_warning(warning);
    }

    Ok(Envelope::success(meta, command_result.data))
}

/// Read a security universe file, dropping entries that fail domain
/// validation with a warning instead of aborting the run.
pub(crate) fn load_securities(
    path: &std::path::Path,
    warnings: &mut Vec<String>,
) -> Result<Vec<finsift_core::Security>, CliError> {
    let raw = std::fs::read_to_string(path)?;
    let entries: Vec<Value> = serde_json::from_str(&raw)?;

    let mut securities = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<finsift_core::Security>(entry) {
            Ok(security) => securities.push(security),
            Err(error) => warnings.push(format!("dropped security at index {index}: {error}")),
        }
    }

    Ok(securities)
}
