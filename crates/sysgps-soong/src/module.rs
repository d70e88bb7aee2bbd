//! Defaults modules and their load hooks.

use std::sync::Arc;

use crate::context::{DeviceConfig, LoadHookContext};
use crate::error::{HostError, Result};
use crate::properties::CcProperties;

/// A callback run once when its module is loaded.
pub type LoadHook = Arc<dyn Fn(&mut dyn LoadHookContext) + Send + Sync>;

/// A defaults module: a named property bag other modules inherit from.
pub struct DefaultsModule {
    name: String,
    properties: CcProperties,
    load_hooks: Vec<LoadHook>,
    loaded: bool,
}

impl DefaultsModule {
    /// Create an empty, unloaded module.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: CcProperties::default(),
            load_hooks: Vec::new(),
            loaded: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn properties(&self) -> &CcProperties {
        &self.properties
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Register a hook to run when the module is loaded. Hooks run in the
    /// order they were added.
    pub fn add_load_hook(&mut self, hook: LoadHook) {
        self.load_hooks.push(hook);
    }

    /// Run every load hook against `config`.
    ///
    /// A module is loaded at most once.
    pub fn load(&mut self, config: &dyn DeviceConfig) -> Result<()> {
        if self.loaded {
            return Err(HostError::AlreadyLoaded {
                name: self.name.clone(),
            });
        }

        let mut ctx = ModuleLoadContext {
            config,
            properties: &mut self.properties,
        };
        let ctx: &mut dyn LoadHookContext = &mut ctx;
        for hook in &self.load_hooks {
            hook(&mut *ctx);
        }

        tracing::debug!(
            module = %self.name,
            hooks = self.load_hooks.len(),
            cflags = self.properties.cflags.len(),
            "module loaded"
        );
        self.loaded = true;
        Ok(())
    }
}

impl std::fmt::Debug for DefaultsModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultsModule")
            .field("name", &self.name)
            .field("properties", &self.properties)
            .field("load_hooks", &self.load_hooks.len())
            .field("loaded", &self.loaded)
            .finish()
    }
}

struct ModuleLoadContext<'a> {
    config: &'a dyn DeviceConfig,
    properties: &'a mut CcProperties,
}

impl LoadHookContext for ModuleLoadContext<'_> {
    fn config(&self) -> &dyn DeviceConfig {
        self.config
    }

    fn append_properties(&mut self, props: CcProperties) {
        self.properties.append(props);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ProductConfig;

    fn push_device_hook() -> LoadHook {
        Arc::new(|ctx: &mut dyn LoadHookContext| {
            let flag = format!("-DDEVICE_{}", ctx.config().device_name());
            ctx.append_properties(CcProperties { cflags: vec![flag] });
        })
    }

    #[test]
    fn hooks_run_in_order() {
        let mut module = DefaultsModule::new("m");
        module.add_load_hook(push_device_hook());
        module.add_load_hook(Arc::new(|ctx: &mut dyn LoadHookContext| {
            ctx.append_properties(CcProperties {
                cflags: vec!["-DLAST".into()],
            });
        }));

        module.load(&ProductConfig::new("board")).unwrap();
        assert!(module.is_loaded());
        assert_eq!(module.properties().cflags, vec!["-DDEVICE_board", "-DLAST"]);
    }

    #[test]
    fn load_without_hooks() {
        let mut module = DefaultsModule::new("plain");
        module.load(&ProductConfig::new("board")).unwrap();
        assert!(module.properties().is_empty());
    }

    #[test]
    fn load_twice_is_rejected() {
        let mut module = DefaultsModule::new("m");
        module.add_load_hook(push_device_hook());
        module.load(&ProductConfig::new("board")).unwrap();

        let err = module.load(&ProductConfig::new("board")).unwrap_err();
        assert!(matches!(err, HostError::AlreadyLoaded { .. }));
        assert_eq!(module.properties().cflags.len(), 1);
    }
}
