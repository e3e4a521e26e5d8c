//! Immutable records held by reactive containers, and rebuilding them with
//! field overrides applied by name.

use indexmap::IndexMap;

use crate::coerce::coerce_static;
use crate::error::{ReconstructError, RecordError};
use crate::model::{StaticType, Value};

/// Field name to override value for one container.
pub type Overrides = IndexMap<String, Value>;

/// Record shape exposed to override application.
///
/// Usually derived with `#[derive(Record)]`, which emits a `with_field` arm
/// per named field. Fields marked `#[record(skip)]` are absent from
/// [`Record::FIELDS`] and are carried over untouched.
pub trait Record: Clone + Send + Sync + 'static {
	/// Overridable fields in declaration order.
	const FIELDS: &'static [&'static str];

	/// Simple type name of the held record, `None` for an empty holder.
	fn record_name(&self) -> Option<&'static str>;

	/// Declared type of a field.
	fn field_type(name: &str) -> Option<StaticType>;

	/// Current value of a field.
	fn field(&self, name: &str) -> Option<Value>;

	/// Replaces one field with an already coerced value.
	fn with_field(&mut self, name: &str, value: Value) -> Result<(), RecordError>;
}

impl<R: Record> Record for Option<R> {
	const FIELDS: &'static [&'static str] = R::FIELDS;

	fn record_name(&self) -> Option<&'static str> {
		self.as_ref().and_then(R::record_name)
	}

	fn field_type(name: &str) -> Option<StaticType> {
		R::field_type(name)
	}

	fn field(&self, name: &str) -> Option<Value> {
		self.as_ref()?.field(name)
	}

	fn with_field(&mut self, name: &str, value: Value) -> Result<(), RecordError> {
		match self {
			Some(record) => record.with_field(name, value),
			None => Err(RecordError::Empty),
		}
	}
}

/// Builds a copy of `original` with `overrides` applied.
///
/// Each override is coerced to the declared type of its field. Every field
/// without an override keeps its value from `original`. Names that are not
/// declared fields are ignored.
pub fn reconstruct<R: Record>(original: &R, overrides: &Overrides) -> Result<R, ReconstructError> {
	let mut next = original.clone();
	for (name, raw) in overrides {
		let Some(ty) = R::field_type(name) else {
			tracing::debug!(field = %name, "override names no declared field, ignoring");
			continue;
		};
		let value = coerce_static(raw, ty).map_err(|source| ReconstructError::Coerce {
			field: name.clone(),
			source,
		})?;
		next.with_field(name, value)?;
	}
	Ok(next)
}
