//! `sysgps.toml` manifest parsing and rule table assembly.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use sysgps_flags::parse::{discover_rule_files, load_checked_rules_toml};
use sysgps_flags::RuleTable;

/// Environment variable the host build exports with the target device name.
pub const DEVICE_ENV: &str = "TARGET_DEVICE";

/// The top-level manifest structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SysgpsManifest {
    /// Default device selection.
    #[serde(default)]
    pub device: Option<DeviceSection>,
    /// Rule table configuration.
    #[serde(default)]
    pub rules: Option<RulesSection>,
}

/// Device section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceSection {
    /// Device name used when none is given on the command line.
    pub name: String,
}

/// Rules section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RulesSection {
    /// Whether the built-in rules come first in the table.
    #[serde(default = "default_include_builtin")]
    pub include_builtin: bool,
}

fn default_include_builtin() -> bool {
    true
}

impl SysgpsManifest {
    /// Search upward from `start_dir` for a `sysgps.toml` file, parse and return
    /// it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join("sysgps.toml");
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: SysgpsManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing sysgps.toml")
    }

    pub fn default_device(&self) -> Option<&str> {
        self.device.as_ref().map(|d| d.name.as_str())
    }

    pub fn include_builtin(&self) -> bool {
        self.rules.as_ref().map_or(true, |r| r.include_builtin)
    }
}

/// Pick the device name: explicit argument, then `TARGET_DEVICE`, then the
/// manifest default.
pub fn select_device(
    explicit: Option<&str>,
    env: Option<String>,
    manifest: Option<&SysgpsManifest>,
) -> Result<String> {
    if let Some(device) = explicit {
        return Ok(device.to_string());
    }
    if let Some(device) = env {
        return Ok(device);
    }
    if let Some(device) = manifest.and_then(SysgpsManifest::default_device) {
        return Ok(device.to_string());
    }
    bail!("no device specified: pass --device, set {DEVICE_ENV}, or add [device] to sysgps.toml")
}

/// Assemble the effective rule table: built-in rules (unless disabled), then
/// `rules/*.rules.toml` under the project directory, then each extra file in
/// order.
pub fn build_rule_table(
    project_dir: Option<&Path>,
    include_builtin: bool,
    extra_files: &[PathBuf],
) -> Result<RuleTable> {
    let mut table = if include_builtin {
        RuleTable::builtin()
    } else {
        RuleTable::new()
    };

    let mut files = Vec::new();
    if let Some(dir) = project_dir {
        for (_, path) in discover_rule_files(dir)? {
            files.push(path);
        }
    }
    files.extend(extra_files.iter().cloned());

    for path in &files {
        let extra = load_checked_rules_toml(path)
            .with_context(|| format!("loading rules from {}", path.display()))?;
        tracing::debug!(path = %path.display(), rules = extra.len(), "loaded rule file");
        table.extend(extra);
    }
    Ok(table)
}

/// Generate the default template for a new `sysgps.toml`.
#[cfg(test)]
pub fn template(device: &str) -> String {
    format!(
        r#"[device]
name = "{device}"

[rules]
include-builtin = true
"#
    )
}
