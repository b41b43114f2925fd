use finsift_screener::preset_catalog;
use serde_json::json;

use crate::error::CliError;

use super::CommandResult;

pub fn run() -> Result<CommandResult, CliError> {
    let catalog = preset_catalog();
    let data = json!({
        "preset_count": catalog.len(),
        "presets": catalog,
    });
    Ok(CommandResult::ok(data))
}
