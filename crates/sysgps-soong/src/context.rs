//! Build configuration and load-hook context seams.

use crate::properties::CcProperties;

/// Read-only view of the product configuration a module is evaluated for.
pub trait DeviceConfig {
    /// Name of the target device (`TARGET_DEVICE`).
    fn device_name(&self) -> &str;
}

/// Context handed to a load hook while its module is being loaded.
pub trait LoadHookContext {
    /// Configuration of the build the module belongs to.
    fn config(&self) -> &dyn DeviceConfig;

    /// Append properties to the module being loaded.
    fn append_properties(&mut self, props: CcProperties);
}

/// A fixed product configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductConfig {
    device_name: String,
}

impl ProductConfig {
    pub fn new(device_name: impl Into<String>) -> Self {
        Self {
            device_name: device_name.into(),
        }
    }
}

impl DeviceConfig for ProductConfig {
    fn device_name(&self) -> &str {
        &self.device_name
    }
}
