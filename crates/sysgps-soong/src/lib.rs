//! Host build system integration for the `sys_gps` HAL.
//!
//! Models the plugin contract explicitly instead of through load-time side
//! effects:
//! - **Registration:** module-type factories are handed to a
//!   [`ModuleTypeRegistry`] by an explicit call at startup
//! - **Load hooks:** run once per module against a [`LoadHookContext`]
//! - **Properties:** typed [`CcProperties`] with a named `cflags` field

pub mod context;
pub mod defaults;
pub mod error;
pub mod module;
pub mod properties;
pub mod registry;

pub use context::{DeviceConfig, LoadHookContext, ProductConfig};
pub use error::{HostError, Result};
pub use module::{DefaultsModule, LoadHook};
pub use properties::CcProperties;
pub use registry::{ModuleFactory, ModuleTypeRegistry, ModuleTypes};
