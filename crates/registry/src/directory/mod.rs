//! Live instances keyed by owner type name.
//!
//! One slot per owner: registering a second instance of a type replaces the
//! first. Entries hold only weak handles, so a host that drops an instance
//! without unregistering it leaves an entry that resolves to
//! [`AccessError::Dropped`] rather than to freed memory.
//!
//! Host methods run while the instance's write lock is held. A trigger that
//! calls back into the registry for its own type will deadlock.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use rustc_hash::FxHashMap as HashMap;

use crate::error::AccessError;
use crate::model::{StaticType, Value};
use crate::state::StateHolder;
use crate::table::{Inspect, TypeTable};

/// Host-owned instance shared with the registry.
pub type Shared<T> = Arc<RwLock<T>>;

/// Wraps a value for registration.
pub fn shared<T>(value: T) -> Shared<T> {
	Arc::new(RwLock::new(value))
}

/// Type-erased access to one registered instance.
pub(crate) trait InstanceHandle: Send + Sync {
	fn owner(&self) -> &'static str;

	fn is_alive(&self) -> bool;

	/// Address of the shared allocation, for identity checks.
	fn addr(&self) -> usize;

	fn read_field(&self, name: &str) -> Result<Value, AccessError>;

	fn field_type(&self, name: &str) -> Result<StaticType, AccessError>;

	/// Writes an already coerced value.
	fn write_field(&self, name: &str, value: &Value) -> Result<(), AccessError>;

	fn call_trigger(&self, name: &str) -> Result<(), AccessError>;

	fn call_function(&self, name: &str, args: &[Value]) -> Result<(), AccessError>;

	fn state_holder(&self, name: &str) -> Result<Box<dyn StateHolder>, AccessError>;

	/// Every declared container, for detaching on removal.
	fn state_holders(&self) -> Vec<Box<dyn StateHolder>>;

	fn upgrade(&self) -> Option<Arc<dyn Any + Send + Sync>>;
}

pub(crate) struct Bound<T> {
	instance: Weak<RwLock<T>>,
	table: Arc<TypeTable<T>>,
}

impl<T: Inspect> Bound<T> {
	pub(crate) fn new(instance: &Shared<T>, table: Arc<TypeTable<T>>) -> Self {
		Self {
			instance: Arc::downgrade(instance),
			table,
		}
	}

	fn live(&self) -> Result<Shared<T>, AccessError> {
		self.instance
			.upgrade()
			.ok_or(AccessError::Dropped(self.table.owner))
	}
}

impl<T: Inspect> InstanceHandle for Bound<T> {
	fn owner(&self) -> &'static str {
		self.table.owner
	}

	fn is_alive(&self) -> bool {
		self.instance.strong_count() > 0
	}

	fn addr(&self) -> usize {
		self.instance.as_ptr() as usize
	}

	fn read_field(&self, name: &str) -> Result<Value, AccessError> {
		let entry = self.table.field(name)?;
		let instance = self.live()?;
		let guard = instance.read();
		Ok((entry.read)(&*guard))
	}

	fn field_type(&self, name: &str) -> Result<StaticType, AccessError> {
		Ok(self.table.field(name)?.ty)
	}

	fn write_field(&self, name: &str, value: &Value) -> Result<(), AccessError> {
		let entry = self.table.field(name)?;
		let instance = self.live()?;
		let mut guard = instance.write();
		(entry.write)(&mut *guard, value)
	}

	fn call_trigger(&self, name: &str) -> Result<(), AccessError> {
		let entry = self.table.trigger_entry(name)?;
		let instance = self.live()?;
		let mut guard = instance.write();
		panic::catch_unwind(AssertUnwindSafe(|| (entry.call)(&mut *guard)))
			.map_err(|payload| AccessError::Panicked(panic_message(payload.as_ref())))
	}

	fn call_function(&self, name: &str, args: &[Value]) -> Result<(), AccessError> {
		let entry = self.table.function_entry(name)?;
		let instance = self.live()?;
		let mut guard = instance.write();
		panic::catch_unwind(AssertUnwindSafe(|| (entry.call)(&mut *guard, args)))
			.map_err(|payload| AccessError::Panicked(panic_message(payload.as_ref())))?
	}

	fn state_holder(&self, name: &str) -> Result<Box<dyn StateHolder>, AccessError> {
		let entry = self.table.flow_entry(name)?;
		let instance = self.live()?;
		let guard = instance.read();
		Ok((entry.holder)(&*guard))
	}

	fn state_holders(&self) -> Vec<Box<dyn StateHolder>> {
		let Ok(instance) = self.live() else {
			return Vec::new();
		};
		let guard = instance.read();
		self.table
			.flows
			.iter()
			.map(|entry| (entry.holder)(&*guard))
			.collect()
	}

	fn upgrade(&self) -> Option<Arc<dyn Any + Send + Sync>> {
		self.instance
			.upgrade()
			.map(|instance| instance as Arc<dyn Any + Send + Sync>)
	}
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(message) = payload.downcast_ref::<&str>() {
		(*message).to_string()
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message.clone()
	} else {
		"non-string panic payload".to_string()
	}
}

/// Registered instances, at most one per owner type.
#[derive(Default)]
pub struct InstanceDirectory {
	entries: RwLock<HashMap<String, Arc<dyn InstanceHandle>>>,
}

impl InstanceDirectory {
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores `handle`, returning the entry it replaced.
	pub(crate) fn insert(&self, handle: Arc<dyn InstanceHandle>) -> Option<Arc<dyn InstanceHandle>> {
		let owner = handle.owner().to_string();
		let previous = self.entries.write().insert(owner, handle);
		if let Some(previous) = &previous {
			tracing::debug!(owner = previous.owner(), "replaced registered instance");
		}
		previous
	}

	/// Removes the entry for `owner` only if it refers to the instance at
	/// `addr`.
	pub(crate) fn remove_if_same(&self, owner: &str, addr: usize) -> Option<Arc<dyn InstanceHandle>> {
		let mut entries = self.entries.write();
		match entries.get(owner) {
			Some(current) if current.addr() == addr => entries.remove(owner),
			Some(_) => {
				tracing::debug!(owner, "unregister ignored, a newer instance is registered");
				None
			}
			None => None,
		}
	}

	pub(crate) fn resolve_handle(&self, owner: &str) -> Option<Arc<dyn InstanceHandle>> {
		self.entries.read().get(owner).cloned()
	}

	/// Live instance registered for `T`.
	pub fn resolve<T: Inspect>(&self) -> Option<Shared<T>> {
		self.resolve_handle(T::type_name())?
			.upgrade()?
			.downcast::<RwLock<T>>()
			.ok()
	}

	/// True when an entry exists for `owner`, even if its instance was dropped.
	pub fn contains(&self, owner: &str) -> bool {
		self.entries.read().contains_key(owner)
	}

	/// True when `owner` resolves to an instance that is still alive.
	pub fn is_live(&self, owner: &str) -> bool {
		self.resolve_handle(owner).is_some_and(|h| h.is_alive())
	}

	pub fn owners(&self) -> Vec<String> {
		let mut owners: Vec<String> = self.entries.read().keys().cloned().collect();
		owners.sort();
		owners
	}

	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}

	/// Removes every entry, returning them.
	pub(crate) fn drain(&self) -> Vec<Arc<dyn InstanceHandle>> {
		self.entries.write().drain().map(|(_, handle)| handle).collect()
	}
}

#[cfg(test)]
mod tests;
