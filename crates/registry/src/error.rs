use thiserror::Error;

use crate::model::{MemberKey, ValueType};

/// Input could not be converted to the requested kind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoerceError {
	/// Text did not parse as the numeric target.
	#[error("invalid {target:?} literal: '{input}'")]
	InvalidLiteral { input: String, target: ValueType },
	/// The input variant has no conversion to the target.
	#[error("cannot convert {got} to {target:?}")]
	Unsupported {
		got: &'static str,
		target: ValueType,
	},
}

/// Kind of member an operation addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
	Parameter,
	Trigger,
	Function,
	Flow,
}

impl core::fmt::Display for MemberKind {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(match self {
			MemberKind::Parameter => "parameter",
			MemberKind::Trigger => "trigger",
			MemberKind::Function => "function",
			MemberKind::Flow => "flow",
		})
	}
}

/// Failure while touching a live instance through its type table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccessError {
	/// The type table declares no such member.
	#[error("{kind} '{name}' not declared on {owner}")]
	NoMember {
		kind: MemberKind,
		owner: &'static str,
		name: String,
	},
	/// The host dropped the registered instance.
	#[error("instance of {0} was dropped")]
	Dropped(&'static str),
	/// A coerced value did not fit the member's Rust type.
	#[error("{member} expects {expected:?}, got {got}")]
	TypeMismatch {
		member: String,
		expected: ValueType,
		got: &'static str,
	},
	/// Argument count did not match the function's arity.
	#[error("expected {expected} arguments, got {got}")]
	ArityMismatch { expected: usize, got: usize },
	/// An argument was missing and has no seeded default.
	#[error("argument {index} has no value")]
	MissingArgument { index: usize },
	/// The host method panicked.
	#[error("host method panicked: {0}")]
	Panicked(String),
	#[error(transparent)]
	Coerce(#[from] CoerceError),
}

/// Failure applying a value to a record field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
	#[error("record has no field '{0}'")]
	UnknownField(String),
	#[error("field '{field}' cannot hold {got}")]
	TypeMismatch { field: String, got: &'static str },
	/// The container holds no record to rebuild.
	#[error("container is empty")]
	Empty,
}

/// Failure rebuilding a record with overrides.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReconstructError {
	#[error("override for '{field}' rejected: {source}")]
	Coerce {
		field: String,
		#[source]
		source: CoerceError,
	},
	#[error(transparent)]
	Record(#[from] RecordError),
}

/// Failure of a registry operation.
///
/// The boolean-returning operations log this and report `false`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
	#[error("unknown {kind}: {key}")]
	UnknownMember { kind: MemberKind, key: MemberKey },
	#[error("no live instance registered for {0}")]
	NoInstance(String),
	#[error("{key} has no parameter '{parameter}'")]
	UnknownArgument { key: MemberKey, parameter: String },
	#[error("unknown record field '{field}' on {key}")]
	UnknownRecordField { key: MemberKey, field: String },
	#[error("{key}: {source}")]
	Access {
		key: MemberKey,
		#[source]
		source: AccessError,
	},
	#[error("{key}: {source}")]
	Coerce {
		key: MemberKey,
		#[source]
		source: CoerceError,
	},
	#[error("{key}: {source}")]
	Reconstruct {
		key: MemberKey,
		#[source]
		source: ReconstructError,
	},
}
