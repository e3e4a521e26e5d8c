//! Runtime parameter registry for in-app debug tooling.
//!
//! Host types describe their exposed fields, trigger methods, debug functions
//! and reactive containers on a [`TypeTable`] by implementing [`Inspect`].
//! Registering a live instance with a [`ParameterRegistry`] discovers those
//! members; the registry then reads, coerces and writes values, invokes
//! methods, and keeps record field overrides applied to reactive containers.
//!
//! # Modules
//!
//! - [`model`] - descriptors and dynamically typed values
//! - [`coerce`] - raw input to typed value conversion
//! - [`table`] - per-type capability tables
//! - [`directory`] - live instance slots
//! - [`record`] / [`state`] - reactive records and override reconstruction
//! - [`registry`] - the store and its operations

extern crate self as dyno_registry;

pub mod coerce;
pub mod directory;
mod discovery;
pub mod error;
pub mod feed;
pub mod model;
pub mod record;
pub mod registry;
pub mod state;
pub mod table;

#[cfg(test)]
mod test_support;

pub use coerce::{coerce, coerce_static, render, render_display};
pub use directory::{InstanceDirectory, Shared, shared};
#[cfg(feature = "derive")]
pub use dyno_macros::{Labels, Record};
pub use error::{
	AccessError, CoerceError, MemberKind, ReconstructError, RecordError, RegistryError,
};
pub use feed::Feed;
pub use model::{
	EnumMapping, FieldValue, FlowManipulationDescriptor, FunctionDescriptor, FunctionParameter,
	GroupDescriptor, ManipulableField, MemberKey, ParameterDescriptor, StaticType,
	TriggerDescriptor, Value, ValueType,
};
pub use record::{Overrides, Record, reconstruct};
pub use registry::{
	FlowSnapshot, FunctionSnapshot, GroupSnapshot, ParameterRegistry, ParameterSnapshot,
	TriggerSnapshot,
};
pub use state::StateCell;
pub use table::{DebugHandler, Expose, Flow, Function, Group, Inspect, Trigger, TypeTable};

/// Group assigned to members that do not name one.
pub const DEFAULT_GROUP: &str = "Default";
