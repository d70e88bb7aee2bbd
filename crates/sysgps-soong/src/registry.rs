//! Module-type registry.
//!
//! The host discovers module types through factories registered before any
//! module is evaluated. Registration is an explicit call; nothing registers
//! itself as a side effect of being linked in.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{HostError, Result};
use crate::module::DefaultsModule;

/// Creates a fresh, unloaded module of one type.
pub type ModuleFactory = Arc<dyn Fn() -> DefaultsModule + Send + Sync>;

/// Host-side registry of module types.
pub trait ModuleTypeRegistry {
    /// Register `factory` under `name`.
    fn register_module_type(&mut self, name: &str, factory: ModuleFactory) -> Result<()>;
}

/// An in-memory module-type registry.
#[derive(Default, Clone)]
pub struct ModuleTypes {
    factories: BTreeMap<String, ModuleFactory>,
}

impl ModuleTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered module type names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Instantiate a module of type `module_type` named `module_name`.
    pub fn create(&self, module_type: &str, module_name: &str) -> Result<DefaultsModule> {
        let factory = self
            .factories
            .get(module_type)
            .ok_or_else(|| HostError::UnknownModuleType {
                name: module_type.to_string(),
            })?;
        let mut module = factory();
        module.set_name(module_name);
        Ok(module)
    }
}

impl ModuleTypeRegistry for ModuleTypes {
    fn register_module_type(&mut self, name: &str, factory: ModuleFactory) -> Result<()> {
        if self.factories.contains_key(name) {
            return Err(HostError::DuplicateModuleType {
                name: name.to_string(),
            });
        }
        tracing::debug!(module_type = name, "registered module type");
        self.factories.insert(name.to_string(), factory);
        Ok(())
    }
}

impl std::fmt::Debug for ModuleTypes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.factories.keys()).finish()
    }
}
