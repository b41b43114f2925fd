use finsift_screener::{apply_preset, preset_catalog, screen, Filter};
use serde_json::json;

use crate::cli::ScreenArgs;
use crate::error::CliError;

use super::{load_securities, CommandResult};

pub fn run(args: &ScreenArgs) -> Result<CommandResult, CliError> {
    let filters = resolve_filters(args)?;

    let mut warnings = Vec::new();
    let securities = load_securities(&args.securities, &mut warnings)?;

    let enabled_count = filters.iter().filter(|filter| filter.enabled).count();
    if enabled_count == 0 {
        warnings.push(String::from("no enabled filters; result is empty"));
    }

    let matches = screen(&securities, &filters);

    let data = json!({
        "universe_size": securities.len(),
        "enabled_filters": enabled_count,
        "match_count": matches.len(),
        "matches": matches,
    });

    Ok(CommandResult::ok(data).with_warnings(warnings))
}

fn resolve_filters(args: &ScreenArgs) -> Result<Vec<Filter>, CliError> {
    match (&args.filters, &args.preset) {
        (Some(_), Some(_)) => Err(CliError::Command(String::from(
            "--filters and --preset are mutually exclusive",
        ))),
        (None, None) => Err(CliError::Command(String::from(
            "provide either --filters or --preset",
        ))),
        (Some(path), None) => {
            let raw = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&raw)?)
        }
        (None, Some(preset_id)) => {
            let catalog = preset_catalog();
            let preset = catalog
                .iter()
                .find(|preset| preset.id == preset_id)
                .ok_or_else(|| {
                    let known: Vec<&str> = catalog.iter().map(|preset| preset.id).collect();
                    CliError::Command(format!(
                        "unknown preset '{preset_id}', expected one of: {}",
                        known.join(", ")
                    ))
                })?;
            Ok(apply_preset(preset))
        }
    }
}
