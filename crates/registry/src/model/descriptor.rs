use serde::{Serialize, Serializer};

use super::{EnumMapping, Value, ValueType};

/// Identity of a member: owner type name plus member name.
///
/// Renders as `owner.member`, the key shape every registry map uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberKey {
	pub owner: String,
	pub member: String,
}

impl MemberKey {
	pub fn new(owner: impl Into<String>, member: impl Into<String>) -> Self {
		Self {
			owner: owner.into(),
			member: member.into(),
		}
	}
}

impl core::fmt::Display for MemberKey {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "{}.{}", self.owner, self.member)
	}
}

impl Serialize for MemberKey {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

/// Organizational grouping for one owner type.
///
/// `enabled` is carried for the presentation layer only; no registry path
/// consults it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupDescriptor {
	pub owner: String,
	pub name: String,
	pub display_name: String,
	pub description: String,
	pub enabled: bool,
}

/// An exposed field on a registered owner type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterDescriptor {
	pub owner: String,
	pub name: String,
	pub display_name: String,
	pub group: String,
	pub description: String,
	pub value_type: ValueType,
	pub min: Option<f64>,
	pub max: Option<f64>,
	pub step: Option<f64>,
	/// Labels of a named enumeration, in declaration order.
	pub enum_values: Vec<String>,
	/// Present only for integer-coded enumerations.
	pub enum_mapping: Option<EnumMapping>,
}

impl ParameterDescriptor {
	/// Creates a descriptor with the member name as display name and the
	/// default group.
	pub fn new(owner: impl Into<String>, name: impl Into<String>, value_type: ValueType) -> Self {
		let name = name.into();
		Self {
			owner: owner.into(),
			display_name: name.clone(),
			name,
			group: crate::DEFAULT_GROUP.to_string(),
			description: String::new(),
			value_type,
			min: None,
			max: None,
			step: None,
			enum_values: Vec::new(),
			enum_mapping: None,
		}
	}

	pub fn key(&self) -> MemberKey {
		MemberKey::new(&self.owner, &self.name)
	}

	/// Attaches an integer to label mapping.
	///
	/// A non-empty mapping forces the kind to [`ValueType::IntEnum`].
	pub fn with_mapping(mut self, mapping: EnumMapping) -> Self {
		if mapping.is_empty() {
			return self;
		}
		self.value_type = ValueType::IntEnum;
		self.enum_mapping = Some(mapping);
		self
	}
}

/// A zero-argument host method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggerDescriptor {
	pub owner: String,
	pub name: String,
	pub display_name: String,
	pub group: String,
	pub description: String,
}

impl TriggerDescriptor {
	pub fn key(&self) -> MemberKey {
		MemberKey::new(&self.owner, &self.name)
	}
}

/// One formal parameter of a debug function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionParameter {
	pub name: String,
	pub display_name: String,
	pub value_type: ValueType,
	/// Seeded zero value; `None` for enumerations.
	pub default_value: Option<Value>,
	pub enum_values: Vec<String>,
}

impl FunctionParameter {
	pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
		let name = name.into();
		Self {
			display_name: name.clone(),
			name,
			value_type,
			default_value: value_type.zero_value(),
			enum_values: Vec::new(),
		}
	}
}

/// A host method invoked with staged argument values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDescriptor {
	pub owner: String,
	pub name: String,
	pub display_name: String,
	pub group: String,
	pub description: String,
	pub expose_parameters: bool,
	/// Formal parameters in declaration order. Empty when exposure is off.
	pub parameters: Vec<FunctionParameter>,
}

impl FunctionDescriptor {
	pub fn key(&self) -> MemberKey {
		MemberKey::new(&self.owner, &self.name)
	}

	pub fn parameter(&self, name: &str) -> Option<&FunctionParameter> {
		self.parameters.iter().find(|p| p.name == name)
	}
}

/// One field of a reactive record, exposed for override.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManipulableField {
	pub name: String,
	pub display_name: String,
	pub value_type: ValueType,
	/// Textual form of the field's latest value, `None` while the container
	/// is empty.
	pub current_value: Option<String>,
	/// Textual form of the field's value at discovery time.
	pub original_value: Option<String>,
	pub enum_mapping: Option<EnumMapping>,
}

/// A reactive container whose record fields can be overridden.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowManipulationDescriptor {
	pub owner: String,
	/// Name of the container member on the owner.
	pub name: String,
	pub display_name: String,
	pub group: String,
	pub description: String,
	/// Runtime type name of the held record.
	pub record_name: String,
	pub fields: Vec<ManipulableField>,
}

impl FlowManipulationDescriptor {
	pub fn key(&self) -> MemberKey {
		MemberKey::new(&self.owner, &self.name)
	}

	pub fn field(&self, name: &str) -> Option<&ManipulableField> {
		self.fields.iter().find(|f| f.name == name)
	}
}
