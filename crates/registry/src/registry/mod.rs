//! Central store of discovered members and the operations on them.
//!
//! Descriptor maps live behind one lock. The lock is released before any
//! host code runs, any container is touched, or any feed is published, so a
//! host method may call back into the registry for other types.
//!
//! Concurrent writers to the same key race: last write wins and the
//! read-coerce-write-publish sequence is not atomic.

mod flow;

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxHashMap as HashMap;
use tokio::sync::watch;

use crate::coerce::{coerce, coerce_static};
use crate::directory::{Bound, InstanceDirectory, InstanceHandle, Shared};
use crate::discovery::{self, Discovered};
use crate::error::{AccessError, MemberKind, RegistryError};
use crate::feed::Feed;
use crate::model::{
	FlowManipulationDescriptor, FunctionDescriptor, GroupDescriptor, MemberKey,
	ParameterDescriptor, StaticType, TriggerDescriptor, Value, ValueType,
};
use crate::state::OverrideMap;
use crate::table::{Inspect, TableCache};

/// Groups keyed by owner type name.
pub type GroupSnapshot = IndexMap<String, GroupDescriptor>;
pub type ParameterSnapshot = IndexMap<MemberKey, ParameterDescriptor>;
pub type TriggerSnapshot = IndexMap<MemberKey, TriggerDescriptor>;
pub type FunctionSnapshot = IndexMap<MemberKey, FunctionDescriptor>;
pub type FlowSnapshot = IndexMap<MemberKey, FlowManipulationDescriptor>;

/// Staged argument values for one function, `None` for an unset enum.
type WorkingValues = IndexMap<String, Option<Value>>;

#[derive(Default)]
struct RegistryState {
	groups: GroupSnapshot,
	parameters: ParameterSnapshot,
	triggers: TriggerSnapshot,
	functions: FunctionSnapshot,
	working_values: HashMap<MemberKey, WorkingValues>,
	flows: FlowSnapshot,
	overrides: HashMap<MemberKey, OverrideMap>,
}

#[derive(Default)]
struct Feeds {
	groups: Feed<GroupSnapshot>,
	parameters: Feed<ParameterSnapshot>,
	triggers: Feed<TriggerSnapshot>,
	functions: Feed<FunctionSnapshot>,
	flows: Feed<FlowSnapshot>,
}

/// Registry of exposed members for every registered type.
#[derive(Default)]
pub struct ParameterRegistry {
	state: RwLock<RegistryState>,
	directory: InstanceDirectory,
	tables: TableCache,
	feeds: Feeds,
}

impl ParameterRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Live instances known to this registry.
	pub fn directory(&self) -> &InstanceDirectory {
		&self.directory
	}

	/// Upserts a group and publishes the groups feed.
	pub fn register_group(&self, group: GroupDescriptor) {
		let snapshot = {
			let mut state = self.state.write();
			state.groups.insert(group.owner.clone(), group);
			state.groups.clone()
		};
		self.feeds.groups.publish(snapshot);
	}

	/// Upserts a parameter and publishes the parameters feed.
	///
	/// A non-empty integer to label mapping forces the kind to
	/// [`ValueType::IntEnum`]; an empty one is dropped.
	pub fn register_parameter(&self, parameter: ParameterDescriptor) {
		let snapshot = {
			let mut state = self.state.write();
			insert_parameter(&mut state, parameter);
			state.parameters.clone()
		};
		self.feeds.parameters.publish(snapshot);
	}

	/// Upserts a trigger and publishes the triggers feed.
	pub fn register_trigger(&self, trigger: TriggerDescriptor) {
		let snapshot = {
			let mut state = self.state.write();
			state.triggers.insert(trigger.key(), trigger);
			state.triggers.clone()
		};
		self.feeds.triggers.publish(snapshot);
	}

	/// Upserts a function, reseeding its working values with the declared
	/// defaults, and publishes the functions feed.
	pub fn register_function(&self, function: FunctionDescriptor) {
		let snapshot = {
			let mut state = self.state.write();
			insert_function(&mut state, function);
			state.functions.clone()
		};
		self.feeds.functions.publish(snapshot);
	}

	/// Upserts a flow manipulation with a fresh, empty override map, and
	/// publishes the flows feed.
	///
	/// A live container for the same key is rebound to the new map, so it
	/// drops any earlier overrides.
	pub fn register_flow_manipulation(&self, flow: FlowManipulationDescriptor) {
		let owner = flow.owner.clone();
		let name = flow.name.clone();
		let (overrides, snapshot) = {
			let mut state = self.state.write();
			let overrides = insert_flow(&mut state, flow);
			(overrides, state.flows.clone())
		};
		if let Some(handle) = self.directory.resolve_handle(&owner)
			&& let Ok(holder) = handle.state_holder(&name)
		{
			holder.attach(overrides);
			if let Err(error) = holder.reapply() {
				tracing::warn!(%owner, flow = %name, %error, "rebinding container failed");
			}
		}
		self.feeds.flows.publish(snapshot);
	}

	/// Registers a live instance and discovers its members.
	///
	/// An earlier instance of the same type is replaced and returned; its
	/// containers stop receiving overrides.
	pub fn register_instance<T: Inspect>(&self, instance: &Shared<T>) -> Option<Shared<T>> {
		let table = self.tables.get_or_build::<T>();
		let found = {
			let guard = instance.read();
			discovery::scan(&table, &guard)
		};
		let handle: Arc<dyn InstanceHandle> = Arc::new(Bound::new(instance, Arc::clone(&table)));
		let previous = self.directory.insert(handle);
		if let Some(previous) = &previous {
			for holder in previous.state_holders() {
				holder.detach();
			}
		}
		self.apply(found);
		tracing::debug!(owner = table.owner(), "registered instance");
		previous?
			.upgrade()?
			.downcast::<RwLock<T>>()
			.ok()
	}

	/// Removes `instance` from the directory if it is the registered one.
	///
	/// Descriptors stay in place; operations on them fail until a new
	/// instance registers.
	pub fn unregister_instance<T: Inspect>(&self, instance: &Shared<T>) -> bool {
		let addr = Arc::as_ptr(instance) as usize;
		let Some(handle) = self.directory.remove_if_same(T::type_name(), addr) else {
			return false;
		};
		for holder in handle.state_holders() {
			holder.detach();
		}
		tracing::debug!(owner = T::type_name(), "unregistered instance");
		true
	}

	fn apply(&self, found: Discovered) {
		let mut attach = Vec::with_capacity(found.flows.len());
		let (groups, parameters, triggers, functions, flows) = {
			let mut state = self.state.write();
			if let Some(group) = found.group {
				state.groups.insert(group.owner.clone(), group);
			}
			for parameter in found.parameters {
				insert_parameter(&mut state, parameter);
			}
			for trigger in found.triggers {
				state.triggers.insert(trigger.key(), trigger);
			}
			for function in found.functions {
				insert_function(&mut state, function);
			}
			for (flow, holder) in found.flows {
				attach.push((insert_flow(&mut state, flow), holder));
			}
			(
				state.groups.clone(),
				state.parameters.clone(),
				state.triggers.clone(),
				state.functions.clone(),
				state.flows.clone(),
			)
		};
		for (overrides, holder) in attach {
			holder.attach(overrides);
			if let Err(error) = holder.reapply() {
				tracing::warn!(%error, "publishing natural value failed");
			}
		}
		self.feeds.groups.publish(groups);
		self.feeds.parameters.publish(parameters);
		self.feeds.triggers.publish(triggers);
		self.feeds.functions.publish(functions);
		self.feeds.flows.publish(flows);
	}

	/// Current value of an exposed field, `None` if it cannot be read.
	pub fn get_parameter_value(&self, owner: &str, field: &str) -> Option<Value> {
		self.try_get_parameter_value(owner, field)
			.inspect_err(|error| tracing::debug!(owner, field, %error, "parameter not readable"))
			.ok()
	}

	pub fn try_get_parameter_value(&self, owner: &str, field: &str) -> Result<Value, RegistryError> {
		let handle = self.handle(owner)?;
		handle
			.read_field(field)
			.map_err(|source| access_error(owner, field, source))
	}

	/// Coerces `value` to the field's declared type and writes it.
	///
	/// Returns false, leaving the field unchanged, when there is no live
	/// instance, no such field, or the value does not convert.
	pub fn set_parameter_value(&self, owner: &str, field: &str, value: impl Into<Value>) -> bool {
		self.try_set_parameter_value(owner, field, value)
			.inspect_err(|error| tracing::warn!(owner, field, %error, "set_parameter_value failed"))
			.is_ok()
	}

	/// Like [`Self::set_parameter_value`], returning the value written.
	pub fn try_set_parameter_value(
		&self,
		owner: &str,
		field: &str,
		value: impl Into<Value>,
	) -> Result<Value, RegistryError> {
		let raw = value.into();
		let handle = self.handle(owner)?;
		let ty = handle
			.field_type(field)
			.map_err(|source| access_error(owner, field, source))?;
		let mapping = self
			.state
			.read()
			.parameters
			.get(&MemberKey::new(owner, field))
			.and_then(|p| p.enum_mapping.clone());
		let coerced = match (&mapping, ty) {
			(Some(mapping), StaticType::Int) => coerce(&raw, ValueType::IntEnum, &[] as &[&str], Some(mapping)),
			_ => coerce_static(&raw, ty),
		}
		.map_err(|source| RegistryError::Coerce {
			key: MemberKey::new(owner, field),
			source,
		})?;
		handle
			.write_field(field, &coerced)
			.map_err(|source| access_error(owner, field, source))?;
		tracing::debug!(owner, field, value = %coerced, "parameter set");
		self.republish_parameters();
		Ok(coerced)
	}

	/// Invokes a zero-argument method on the live instance.
	///
	/// Resolution is by name only: the first declared trigger with that name
	/// wins.
	pub fn trigger_method(&self, owner: &str, method: &str) -> bool {
		self.try_trigger_method(owner, method)
			.inspect_err(|error| tracing::warn!(owner, method, %error, "trigger_method failed"))
			.is_ok()
	}

	pub fn try_trigger_method(&self, owner: &str, method: &str) -> Result<(), RegistryError> {
		let handle = self.handle(owner)?;
		handle
			.call_trigger(method)
			.map_err(|source| access_error(owner, method, source))?;
		tracing::debug!(owner, method, "trigger invoked");
		Ok(())
	}

	/// Staged value of one function argument.
	pub fn get_function_parameter_value(&self, owner: &str, method: &str, parameter: &str) -> Option<Value> {
		self.state
			.read()
			.working_values
			.get(&MemberKey::new(owner, method))?
			.get(parameter)?
			.clone()
	}

	/// Coerces `value` to the argument's declared kind and stages it for the
	/// next [`Self::trigger_function`].
	pub fn set_function_parameter_value(
		&self,
		owner: &str,
		method: &str,
		parameter: &str,
		value: impl Into<Value>,
	) -> bool {
		self.try_set_function_parameter_value(owner, method, parameter, value)
			.inspect_err(|error| {
				tracing::warn!(owner, method, parameter, %error, "set_function_parameter_value failed")
			})
			.is_ok()
	}

	pub fn try_set_function_parameter_value(
		&self,
		owner: &str,
		method: &str,
		parameter: &str,
		value: impl Into<Value>,
	) -> Result<Value, RegistryError> {
		let key = MemberKey::new(owner, method);
		let raw = value.into();
		let mut state = self.state.write();
		let Some(function) = state.functions.get(&key) else {
			drop(state);
			return Err(self.unknown(MemberKind::Function, key));
		};
		let Some(param) = function.parameter(parameter) else {
			return Err(RegistryError::UnknownArgument {
				key,
				parameter: parameter.to_string(),
			});
		};
		let coerced = coerce(&raw, param.value_type, &param.enum_values, None).map_err(|source| {
			RegistryError::Coerce {
				key: key.clone(),
				source,
			}
		})?;
		state
			.working_values
			.entry(key)
			.or_default()
			.insert(parameter.to_string(), Some(coerced.clone()));
		Ok(coerced)
	}

	/// Invokes a debug function with its staged argument values.
	///
	/// With parameter exposure disabled the function is invoked without
	/// arguments. Otherwise every declared argument is passed in order, a
	/// missing staged value falling back to the seeded default.
	pub fn trigger_function(&self, owner: &str, method: &str) -> bool {
		self.try_trigger_function(owner, method)
			.inspect_err(|error| tracing::warn!(owner, method, %error, "trigger_function failed"))
			.is_ok()
	}

	pub fn try_trigger_function(&self, owner: &str, method: &str) -> Result<(), RegistryError> {
		let key = MemberKey::new(owner, method);
		let args = {
			let state = self.state.read();
			let Some(function) = state.functions.get(&key) else {
				drop(state);
				return Err(self.unknown(MemberKind::Function, key));
			};
			let working = state.working_values.get(&key);
			let mut args = Vec::with_capacity(function.parameters.len());
			if function.expose_parameters {
				for (index, param) in function.parameters.iter().enumerate() {
					let staged = working.and_then(|w| w.get(&param.name)).cloned().flatten();
					let Some(value) = staged.or_else(|| param.default_value.clone()) else {
						return Err(RegistryError::Access {
							key,
							source: AccessError::MissingArgument { index },
						});
					};
					args.push(value);
				}
			}
			args
		};
		let handle = self.handle(owner)?;
		handle
			.call_function(method, &args)
			.map_err(|source| access_error(owner, method, source))?;
		tracing::debug!(owner, method, args = args.len(), "function invoked");
		Ok(())
	}

	pub fn get_all_groups(&self) -> GroupSnapshot {
		self.state.read().groups.clone()
	}

	pub fn get_all_parameters(&self) -> ParameterSnapshot {
		self.state.read().parameters.clone()
	}

	pub fn get_all_triggers(&self) -> TriggerSnapshot {
		self.state.read().triggers.clone()
	}

	pub fn get_all_functions(&self) -> FunctionSnapshot {
		self.state.read().functions.clone()
	}

	pub fn subscribe_groups(&self) -> watch::Receiver<Arc<GroupSnapshot>> {
		self.feeds.groups.subscribe()
	}

	pub fn subscribe_parameters(&self) -> watch::Receiver<Arc<ParameterSnapshot>> {
		self.feeds.parameters.subscribe()
	}

	pub fn subscribe_triggers(&self) -> watch::Receiver<Arc<TriggerSnapshot>> {
		self.feeds.triggers.subscribe()
	}

	pub fn subscribe_functions(&self) -> watch::Receiver<Arc<FunctionSnapshot>> {
		self.feeds.functions.subscribe()
	}

	pub fn subscribe_flow_manipulations(&self) -> watch::Receiver<Arc<FlowSnapshot>> {
		self.feeds.flows.subscribe()
	}

	/// Wipes every descriptor, staged value, override and instance, then
	/// publishes one empty snapshot per feed.
	pub fn clear(&self) {
		*self.state.write() = RegistryState::default();
		for handle in self.directory.drain() {
			for holder in handle.state_holders() {
				holder.detach();
			}
		}
		self.feeds.groups.publish(GroupSnapshot::default());
		self.feeds.parameters.publish(ParameterSnapshot::default());
		self.feeds.triggers.publish(TriggerSnapshot::default());
		self.feeds.functions.publish(FunctionSnapshot::default());
		self.feeds.flows.publish(FlowSnapshot::default());
		tracing::debug!("registry cleared");
	}

	fn republish_parameters(&self) {
		let snapshot = self.state.read().parameters.clone();
		self.feeds.parameters.publish(snapshot);
	}

	fn handle(&self, owner: &str) -> Result<Arc<dyn InstanceHandle>, RegistryError> {
		self.directory.resolve_handle(owner).ok_or_else(|| {
			if let Some(similar) = suggest(owner, self.directory.owners()) {
				tracing::info!(owner, help = %similar, "no instance registered, did you mean this owner?");
			}
			RegistryError::NoInstance(owner.to_string())
		})
	}

	/// Lookup failure for `key`, logging the closest known key of that kind.
	fn unknown(&self, kind: MemberKind, key: MemberKey) -> RegistryError {
		let known: Vec<String> = {
			let state = self.state.read();
			match kind {
				MemberKind::Parameter => state.parameters.keys().map(ToString::to_string).collect(),
				MemberKind::Trigger => state.triggers.keys().map(ToString::to_string).collect(),
				MemberKind::Function => state.functions.keys().map(ToString::to_string).collect(),
				MemberKind::Flow => state.flows.keys().map(ToString::to_string).collect(),
			}
		};
		if let Some(similar) = suggest(&key.to_string(), known) {
			tracing::info!(%key, %kind, help = %similar, "unknown member, did you mean this one?");
		}
		RegistryError::UnknownMember { kind, key }
	}
}

fn insert_parameter(state: &mut RegistryState, mut parameter: ParameterDescriptor) {
	match parameter.enum_mapping.take() {
		Some(mapping) => parameter = parameter.with_mapping(mapping),
		None if parameter.value_type == ValueType::IntEnum => {
			tracing::warn!(key = %parameter.key(), "IntEnum parameter has no mapping");
		}
		None => {}
	}
	state.parameters.insert(parameter.key(), parameter);
}

fn insert_function(state: &mut RegistryState, function: FunctionDescriptor) {
	let key = function.key();
	let seeded = function
		.parameters
		.iter()
		.map(|p| (p.name.clone(), p.default_value.clone()))
		.collect();
	state.working_values.insert(key.clone(), seeded);
	state.functions.insert(key, function);
}

/// Stores `flow` with an empty override map, returning that map.
fn insert_flow(state: &mut RegistryState, flow: FlowManipulationDescriptor) -> OverrideMap {
	let key = flow.key();
	let overrides = OverrideMap::default();
	state.overrides.insert(key.clone(), Arc::clone(&overrides));
	state.flows.insert(key, flow);
	overrides
}

fn access_error(owner: &str, member: &str, source: AccessError) -> RegistryError {
	RegistryError::Access {
		key: MemberKey::new(owner, member),
		source,
	}
}

/// Closest candidate within edit distance 3.
fn suggest(input: &str, candidates: Vec<String>) -> Option<String> {
	candidates
		.into_iter()
		.min_by_key(|c| strsim::levenshtein(input, c))
		.filter(|c| strsim::levenshtein(input, c) <= 3)
}
