//! Explicit per-type capability tables.
//!
//! A host type opts in by implementing [`Inspect`] and listing its exposed
//! fields, triggers, debug functions and reactive containers on a
//! [`TypeTable`]. Discovery reads the table instead of introspecting the
//! type, and every mutation goes through the accessors recorded here.

mod handler;
mod meta;

use std::any::{Any, TypeId};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap as HashMap;

pub use handler::DebugHandler;
pub use meta::{Expose, Flow, Function, Group, Trigger};

use crate::error::{AccessError, MemberKind};
use crate::model::{FieldValue, StaticType, Value};
use crate::record::Record;
use crate::state::{StateCell, StateHolder};

/// Type that can be registered with the registry.
pub trait Inspect: Send + Sync + Sized + 'static {
	/// Declares the members visible to the registry.
	fn describe(table: &mut TypeTable<Self>);

	/// Owner name used in every member key.
	fn type_name() -> &'static str {
		std::any::type_name::<Self>()
	}
}

type Reader<T> = Box<dyn Fn(&T) -> Value + Send + Sync>;
type Writer<T> = Box<dyn Fn(&mut T, &Value) -> Result<(), AccessError> + Send + Sync>;
type Invoker<T> = Box<dyn Fn(&mut T, &[Value]) -> Result<(), AccessError> + Send + Sync>;
type Holder<T> = Box<dyn Fn(&T) -> Box<dyn StateHolder> + Send + Sync>;

pub(crate) struct FieldEntry<T> {
	pub(crate) name: &'static str,
	pub(crate) meta: Expose,
	pub(crate) ty: StaticType,
	pub(crate) read: Reader<T>,
	pub(crate) write: Writer<T>,
}

pub(crate) struct TriggerEntry<T> {
	pub(crate) name: &'static str,
	pub(crate) meta: Trigger,
	pub(crate) call: fn(&mut T),
}

pub(crate) struct FunctionEntry<T> {
	pub(crate) name: &'static str,
	pub(crate) meta: Function,
	pub(crate) params: Vec<StaticType>,
	pub(crate) call: Invoker<T>,
}

pub(crate) struct FlowEntry<T> {
	pub(crate) name: &'static str,
	pub(crate) meta: Flow,
	pub(crate) holder: Holder<T>,
}

/// Members declared by one host type.
pub struct TypeTable<T> {
	pub(crate) owner: &'static str,
	pub(crate) group: Option<Group>,
	pub(crate) fields: Vec<FieldEntry<T>>,
	pub(crate) triggers: Vec<TriggerEntry<T>>,
	pub(crate) functions: Vec<FunctionEntry<T>>,
	pub(crate) flows: Vec<FlowEntry<T>>,
}

impl<T: Inspect> TypeTable<T> {
	/// Collects the table for `T`.
	pub fn build() -> Self {
		let mut table = Self {
			owner: T::type_name(),
			group: None,
			fields: Vec::new(),
			triggers: Vec::new(),
			functions: Vec::new(),
			flows: Vec::new(),
		};
		T::describe(&mut table);
		table
	}

	pub fn owner(&self) -> &'static str {
		self.owner
	}

	/// Owner name without its module path or generic arguments.
	pub fn simple_name(&self) -> &'static str {
		let base = self.owner.split('<').next().unwrap_or(self.owner);
		base.rsplit("::").next().unwrap_or(base)
	}

	/// Puts the type's members under a named group.
	pub fn group(&mut self, group: Group) -> &mut Self {
		self.group = Some(group);
		self
	}

	/// Exposes a readable and writable field.
	pub fn expose<F: FieldValue + 'static>(
		&mut self,
		name: &'static str,
		meta: Expose,
		get: fn(&T) -> &F,
		get_mut: fn(&mut T) -> &mut F,
	) -> &mut Self {
		let ty = F::static_type();
		self.fields.push(FieldEntry {
			name,
			meta,
			ty,
			read: Box::new(move |target: &T| get(target).to_value()),
			write: Box::new(move |target: &mut T, value: &Value| {
				let value = F::from_value(value).ok_or_else(|| AccessError::TypeMismatch {
					member: name.to_string(),
					expected: ty.value_type(),
					got: value.type_name(),
				})?;
				*get_mut(target) = value;
				Ok(())
			}),
		});
		self
	}

	/// Exposes a zero-argument method.
	pub fn trigger(&mut self, name: &'static str, meta: Trigger, call: fn(&mut T)) -> &mut Self {
		self.triggers.push(TriggerEntry { name, meta, call });
		self
	}

	/// Exposes a method invoked with staged argument values.
	pub fn function<Args, H>(&mut self, name: &'static str, meta: Function, handler: H) -> &mut Self
	where
		H: DebugHandler<T, Args>,
	{
		let params = handler.param_types();
		self.functions.push(FunctionEntry {
			name,
			meta,
			params,
			call: Box::new(move |target: &mut T, args: &[Value]| handler.call(target, args)),
		});
		self
	}

	/// Exposes a reactive container for record field overrides.
	pub fn flow<R: Record>(
		&mut self,
		name: &'static str,
		meta: Flow,
		cell: fn(&T) -> &StateCell<R>,
	) -> &mut Self {
		self.flows.push(FlowEntry {
			name,
			meta,
			holder: Box::new(move |target: &T| -> Box<dyn StateHolder> {
				Box::new(cell(target).clone())
			}),
		});
		self
	}

	pub(crate) fn field(&self, name: &str) -> Result<&FieldEntry<T>, AccessError> {
		self.fields
			.iter()
			.find(|f| f.name == name)
			.ok_or_else(|| self.missing(MemberKind::Parameter, name))
	}

	/// First trigger with a matching name.
	pub(crate) fn trigger_entry(&self, name: &str) -> Result<&TriggerEntry<T>, AccessError> {
		self.triggers
			.iter()
			.find(|t| t.name == name)
			.ok_or_else(|| self.missing(MemberKind::Trigger, name))
	}

	/// First function with a matching name.
	pub(crate) fn function_entry(&self, name: &str) -> Result<&FunctionEntry<T>, AccessError> {
		self.functions
			.iter()
			.find(|f| f.name == name)
			.ok_or_else(|| self.missing(MemberKind::Function, name))
	}

	pub(crate) fn flow_entry(&self, name: &str) -> Result<&FlowEntry<T>, AccessError> {
		self.flows
			.iter()
			.find(|f| f.name == name)
			.ok_or_else(|| self.missing(MemberKind::Flow, name))
	}

	fn missing(&self, kind: MemberKind, name: &str) -> AccessError {
		AccessError::NoMember {
			kind,
			owner: self.owner,
			name: name.to_string(),
		}
	}
}

/// Tables built so far, one per Rust type.
#[derive(Default)]
pub(crate) struct TableCache {
	tables: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl TableCache {
	/// Returns the cached table for `T`, building it on first use.
	pub(crate) fn get_or_build<T: Inspect>(&self) -> Arc<TypeTable<T>> {
		let id = TypeId::of::<T>();
		if let Some(table) = self.tables.read().get(&id).cloned()
			&& let Ok(table) = table.downcast::<TypeTable<T>>()
		{
			return table;
		}
		let table = Arc::new(TypeTable::<T>::build());
		self.tables
			.write()
			.insert(id, Arc::clone(&table) as Arc<dyn Any + Send + Sync>);
		tracing::debug!(owner = table.owner, "built type table");
		table
	}

	#[cfg(test)]
	pub(crate) fn len(&self) -> usize {
		self.tables.read().len()
	}
}
