use finsift_screener::Snapshot;
use serde_json::json;

use crate::cli::SnapshotArgs;
use crate::error::CliError;

use super::{load_securities, CommandResult};

pub fn run(args: &SnapshotArgs) -> Result<CommandResult, CliError> {
    let mut warnings = Vec::new();
    let securities = load_securities(&args.securities, &mut warnings)?;

    let selected: Vec<_> = securities
        .iter()
        .filter(|security| {
            args.id
                .as_deref()
                .is_none_or(|id| security.id.as_str() == id)
        })
        .collect();

    if let Some(id) = &args.id {
        if selected.is_empty() {
            warnings.push(format!("no security with id '{id}' in the universe"));
        }
    }

    let snapshots: Vec<_> = selected
        .iter()
        .map(|&security| {
            json!({
                "security_id": security.id,
                "name": security.name,
                // Below the 20-bar minimum this is null, not an error.
                "snapshot": Snapshot::derive(security),
            })
        })
        .collect();

    Ok(CommandResult::ok(json!({ "snapshots": snapshots })).with_warnings(warnings))
}
