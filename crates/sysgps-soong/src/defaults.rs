//! The `sys_gps_defaults` module type.
//!
//! Modules of this type get a `-D` definition naming the target device
//! appended to their `cflags` when they are loaded, so the HAL sources can
//! select the serial device and baud rate per board at compile time.

use std::sync::Arc;

use sysgps_flags::RuleTable;

use crate::context::LoadHookContext;
use crate::error::Result;
use crate::module::{DefaultsModule, LoadHook};
use crate::properties::CcProperties;
use crate::registry::{ModuleFactory, ModuleTypeRegistry};

/// Name the module type is registered under.
pub const MODULE_TYPE: &str = "sys_gps_defaults";

/// Register `sys_gps_defaults` using the built-in rule table.
pub fn register(registry: &mut dyn ModuleTypeRegistry) -> Result<()> {
    register_with_rules(registry, Arc::new(RuleTable::builtin()))
}

/// Register `sys_gps_defaults` resolving against `rules`.
pub fn register_with_rules(
    registry: &mut dyn ModuleTypeRegistry,
    rules: Arc<RuleTable>,
) -> Result<()> {
    registry.register_module_type(MODULE_TYPE, factory(rules))
}

/// Factory for `sys_gps_defaults` modules.
pub fn factory(rules: Arc<RuleTable>) -> ModuleFactory {
    Arc::new(move || {
        let mut module = DefaultsModule::new(MODULE_TYPE);
        module.add_load_hook(load_hook(Arc::clone(&rules)));
        module
    })
}

/// Load hook appending the device's flags as `cflags`.
pub fn load_hook(rules: Arc<RuleTable>) -> LoadHook {
    Arc::new(move |ctx: &mut dyn LoadHookContext| {
        let device = ctx.config().device_name().to_string();
        tracing::debug!(device = %device, "DeviceName");
        let flags = rules.resolve(&device);
        ctx.append_properties(CcProperties::from(flags));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ProductConfig;
    use crate::error::HostError;
    use crate::registry::ModuleTypes;
    use sysgps_flags::FlagRule;

    fn loaded_cflags(types: &ModuleTypes, device: &str) -> Vec<String> {
        let mut module = types.create(MODULE_TYPE, "sys_gps_defaults").unwrap();
        module.load(&ProductConfig::new(device)).unwrap();
        module.properties().cflags.clone()
    }

    #[test]
    fn s203_module_gets_definition() {
        let mut types = ModuleTypes::new();
        register(&mut types).unwrap();
        assert_eq!(
            loaded_cflags(&types, "chinatsp_s203_p_8q"),
            vec!["-DCHINATSP_S203_P_8Q=\"chinatsp_s203_p_8q\""]
        );
    }

    #[test]
    fn f202_module_gets_definition() {
        let mut types = ModuleTypes::new();
        register(&mut types).unwrap();
        assert_eq!(
            loaded_cflags(&types, "chinatsp_f202_p_8q"),
            vec!["-DCHINATSP_F202_P_8Q=\"chinatsp_f202_p_8q\""]
        );
    }

    #[test]
    fn unknown_device_leaves_cflags_empty() {
        let mut types = ModuleTypes::new();
        register(&mut types).unwrap();
        assert!(loaded_cflags(&types, "aosp_arm64").is_empty());
        assert!(loaded_cflags(&types, "").is_empty());
    }

    #[test]
    fn register_twice_fails() {
        let mut types = ModuleTypes::new();
        register(&mut types).unwrap();
        let err = register(&mut types).unwrap_err();
        assert!(matches!(err, HostError::DuplicateModuleType { .. }));
    }

    #[test]
    fn custom_rules_are_used() {
        let mut rules = RuleTable::builtin();
        rules.push(FlagRule::new("chinatsp_s203_p_8q", "-DGPS_TTY_LP2"));
        let mut types = ModuleTypes::new();
        register_with_rules(&mut types, Arc::new(rules)).unwrap();

        assert_eq!(
            loaded_cflags(&types, "chinatsp_s203_p_8q"),
            vec![
                "-DCHINATSP_S203_P_8Q=\"chinatsp_s203_p_8q\"",
                "-DGPS_TTY_LP2"
            ]
        );
    }

    #[test]
    fn factory_modules_are_independent() {
        let factory = factory(Arc::new(RuleTable::builtin()));
        let mut a = factory();
        let b = factory();
        a.load(&ProductConfig::new("chinatsp_f202_p_8q")).unwrap();
        assert_eq!(a.properties().cflags.len(), 1);
        assert!(b.properties().is_empty());
        assert!(!b.is_loaded());
    }
}
