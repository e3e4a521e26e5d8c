//! Host-facing entry point for the Dyno parameter registry.
//!
//! Build a [`Dyno`] once at startup, register the instances to inspect, and
//! hand [`Dyno::registry`] to whatever renders the debug screen.
//!
//! ```ignore
//! let dyno = Dyno::builder()
//!     .config(DynoConfig::load("dyno.toml")?)
//!     .indicator(MyIndicator::default())
//!     .launcher(MyLauncher::default())
//!     .initialize();
//!
//! let buttons = shared(ButtonManager::default());
//! dyno.register(&buttons);
//! ```

mod config;
mod facade;
mod generated;
mod launcher;

#[doc(hidden)]
pub use inventory;

pub use config::{ConfigError, DynoConfig};
pub use dyno_registry::{
	AccessError, EnumMapping, Expose, FieldValue, Flow, Function, Group, Inspect, ParameterRegistry,
	Record, RegistryError, Shared, StateCell, Trigger, TypeTable, Value, ValueType, shared,
};
#[cfg(feature = "derive")]
pub use dyno_registry::Labels;
pub use facade::{Dyno, DynoBuilder};
pub use generated::GeneratedRegistry;
pub use launcher::{DebugLauncher, LaunchAction, StatusIndicator};
