//! `sysgps rules` — rule table listing, validation, and templates.

use std::path::Path;

use anyhow::{bail, Context, Result};
use sysgps_flags::parse::{generate_template, load_rules_toml, validate_rules};
use sysgps_flags::RuleTable;

/// Print the effective rule table, one rule per line in resolution order.
pub fn list(table: &RuleTable) -> Result<()> {
    if table.is_empty() {
        println!("No rules.");
        return Ok(());
    }
    for rule in table.rules() {
        println!("  {:<25} {}", rule.device, rule.flag);
    }
    println!();
    println!("{} rule(s) for {} device(s).", table.len(), table.devices().len());
    Ok(())
}

/// Validate a rule file, printing every issue.
///
/// Fails if any issue is an error; warnings alone pass.
pub fn validate(path: &Path) -> Result<()> {
    let table =
        load_rules_toml(path).with_context(|| format!("loading {}", path.display()))?;

    match validate_rules(&table) {
        Ok(()) => {
            println!("{}: {} rule(s), valid", path.display(), table.len());
            Ok(())
        }
        Err(issues) => {
            for issue in &issues {
                println!("  {}: rule {}: {}", issue.severity, issue.rule, issue.message);
            }
            let errors = issues.iter().filter(|i| i.is_error()).count();
            if errors > 0 {
                bail!("{}: {errors} error(s)", path.display());
            }
            println!("{}: {} rule(s), valid with warnings", path.display(), table.len());
            Ok(())
        }
    }
}

/// Print a template rule file.
pub fn template() -> Result<()> {
    print!("{}", generate_template()?);
    Ok(())
}
