//! `sysgps resolve` — print the flags for one device.

use anyhow::Result;
use sysgps_flags::{FlagSet, RuleTable};
use sysgps_soong::CcProperties;

use crate::Format;

/// Resolve `device` against `table` and print the result.
pub fn run(table: &RuleTable, device: &str, format: Format) -> Result<()> {
    let flags = table.resolve(device);
    tracing::debug!(device, flags = flags.len(), "resolved");
    print!("{}", render(&flags, format)?);
    Ok(())
}

/// Render a flag set. Text output is empty for an empty set.
pub fn render(flags: &FlagSet, format: Format) -> Result<String> {
    let out = match format {
        Format::Text => flags.iter().map(|f| format!("{f}\n")).collect(),
        Format::Json => format!("{}\n", serde_json::to_string(flags)?),
        Format::Blueprint => format!("{}\n", CcProperties::from(flags.clone()).to_blueprint()),
    };
    Ok(out)
}
