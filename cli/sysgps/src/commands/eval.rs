//! `sysgps eval` and `sysgps module-types` — module evaluation through the
//! module-type registry.

use std::sync::Arc;

use anyhow::{Context, Result};
use sysgps_flags::RuleTable;
use sysgps_soong::{defaults, ModuleTypes, ProductConfig};

/// Build the registry, registering every module type once.
pub fn registered_types(rules: Option<RuleTable>) -> Result<ModuleTypes> {
    let mut types = ModuleTypes::new();
    match rules {
        Some(table) => defaults::register_with_rules(&mut types, Arc::new(table))?,
        None => defaults::register(&mut types)?,
    }
    Ok(types)
}

/// Print registered module type names.
pub fn list_types(types: &ModuleTypes) -> Result<()> {
    for name in types.names() {
        println!("{name}");
    }
    Ok(())
}

/// Create `module_name` of `module_type`, load it for `device`, and print its
/// properties as a Blueprint module.
pub fn run(types: &ModuleTypes, module_type: &str, module_name: &str, device: &str) -> Result<()> {
    let mut module = types.create(module_type, module_name)?;
    module
        .load(&ProductConfig::new(device))
        .with_context(|| format!("loading module '{module_name}'"))?;

    println!("// device: {device}");
    println!("{module_type} {{");
    println!("    name: \"{}\",", module.name());
    for line in module.properties().to_blueprint().lines() {
        println!("    {line}");
    }
    println!("}}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_has_sys_gps_defaults() {
        let types = registered_types(None).unwrap();
        assert_eq!(types.names(), vec![defaults::MODULE_TYPE]);
    }

    #[test]
    fn eval_known_device() {
        let types = registered_types(Some(RuleTable::builtin())).unwrap();
        assert!(run(&types, defaults::MODULE_TYPE, "gps_defaults", "chinatsp_f202_p_8q").is_ok());
    }

    #[test]
    fn eval_unknown_module_type() {
        let types = registered_types(None).unwrap();
        assert!(run(&types, "cc_library", "x", "chinatsp_f202_p_8q").is_err());
    }
}
