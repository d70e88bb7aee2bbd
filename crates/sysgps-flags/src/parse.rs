//! TOML parsing, serialization, validation, and discovery for rule tables.
//!
//! Rule tables beyond the built-in set are stored as `.rules.toml` files in
//! the `rules/` directory of a project. This module provides functions to
//! load, validate, serialize, and discover these files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{FlagError, Result};
use crate::rule::RuleTable;

/// A validation issue found in a rule table.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity: "error" or "warning".
    pub severity: &'static str,
    /// Index of the offending rule in the table.
    pub rule: usize,
    /// Human-readable description.
    pub message: String,
}

impl ValidationIssue {
    pub fn is_error(&self) -> bool {
        self.severity == "error"
    }
}

/// Load a rule table from a `.rules.toml` file.
pub fn load_rules_toml(path: &Path) -> Result<RuleTable> {
    if !path.exists() {
        return Err(FlagError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_rules_toml(&content)
}

/// Load a rule table and reject it if validation reports any error.
///
/// Warnings are logged and otherwise ignored.
pub fn load_checked_rules_toml(path: &Path) -> Result<RuleTable> {
    let table = load_rules_toml(path)?;
    if let Err(issues) = validate_rules(&table) {
        let mut errors = Vec::new();
        for issue in &issues {
            if issue.is_error() {
                errors.push(format!("rule {}: {}", issue.rule, issue.message));
            } else {
                tracing::warn!(path = %path.display(), rule = issue.rule, "{}", issue.message);
            }
        }
        if !errors.is_empty() {
            return Err(FlagError::Validation {
                detail: format!("{}: {}", path.display(), errors.join("; ")),
            });
        }
    }
    Ok(table)
}

/// Parse a rule table from a TOML string.
pub fn parse_rules_toml(toml_str: &str) -> Result<RuleTable> {
    let table: RuleTable = toml::from_str(toml_str)?;
    Ok(table)
}

/// Serialize a rule table to pretty TOML.
pub fn rules_to_toml(table: &RuleTable) -> Result<String> {
    let toml_str = toml::to_string_pretty(table)?;
    Ok(toml_str)
}

/// Validate a rule table for structural correctness.
///
/// Returns `Ok(())` if valid, or `Err(issues)` with a list of problems.
pub fn validate_rules(table: &RuleTable) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for (index, rule) in table.rules().iter().enumerate() {
        // 1. Device name is non-empty
        if rule.device.is_empty() {
            issues.push(ValidationIssue {
                severity: "error",
                rule: index,
                message: "device name is empty".into(),
            });
        }

        // 2. Flag is non-empty
        if rule.flag.is_empty() {
            issues.push(ValidationIssue {
                severity: "error",
                rule: index,
                message: format!("flag for device '{}' is empty", rule.device),
            });
            continue;
        }

        // 3. Flag is a single compiler argument
        if rule.flag.chars().any(char::is_whitespace) {
            issues.push(ValidationIssue {
                severity: "error",
                rule: index,
                message: format!("flag '{}' contains whitespace", rule.flag),
            });
        }

        // 4. Flag looks like an option
        if !rule.flag.starts_with('-') {
            issues.push(ValidationIssue {
                severity: "warning",
                rule: index,
                message: format!("flag '{}' does not start with '-'", rule.flag),
            });
        }

        // 5. No exact duplicates (resolution would emit the flag twice)
        if !seen.insert((&rule.device, &rule.flag)) {
            issues.push(ValidationIssue {
                severity: "warning",
                rule: index,
                message: format!(
                    "duplicate rule for device '{}' with flag '{}'",
                    rule.device, rule.flag
                ),
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Generate a template `.rules.toml` seeded from the built-in rules.
pub fn generate_template() -> Result<String> {
    rules_to_toml(&RuleTable::builtin())
}

/// Discover all `.rules.toml` files in a project's `rules/` directory.
///
/// Returns a list of (table_name, file_path) pairs sorted by name.
pub fn discover_rule_files(project_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let rules_dir = project_dir.join("rules");
    if !rules_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for entry in std::fs::read_dir(&rules_dir)? {
        let entry = entry?;
        let path = entry.path();
        if let Some(name) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_suffix(".rules.toml"))
        {
            found.push((name.to_string(), path.clone()));
        }
    }
    found.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(found)
}
