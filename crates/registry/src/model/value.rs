use serde::Serialize;

/// A dynamically typed parameter value.
///
/// This is both the input accepted by mutation operations (raw user input,
/// usually a `String` or a number) and the typed result of coercion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
	/// Boolean value.
	Bool(bool),
	/// 32-bit integer value.
	Int(i32),
	/// 64-bit integer value.
	Long(i64),
	/// Single precision float.
	Float(f32),
	/// Double precision float.
	Double(f64),
	/// Text value.
	String(String),
	/// Named enumeration constant, stored by label.
	Enum(String),
}

impl Value {
	/// Returns the text of `String` and `Enum` variants.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(v) | Value::Enum(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the type name of this value.
	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Bool(_) => "bool",
			Value::Int(_) => "int",
			Value::Long(_) => "long",
			Value::Float(_) => "float",
			Value::Double(_) => "double",
			Value::String(_) => "string",
			Value::Enum(_) => "enum",
		}
	}
}

impl core::fmt::Display for Value {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			Value::Bool(v) => write!(f, "{v}"),
			Value::Int(v) => write!(f, "{v}"),
			Value::Long(v) => write!(f, "{v}"),
			Value::Float(v) => write!(f, "{v}"),
			Value::Double(v) => write!(f, "{v}"),
			Value::String(v) | Value::Enum(v) => f.write_str(v),
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Bool(v)
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Value::Int(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Long(v)
	}
}

impl From<f32> for Value {
	fn from(v: f32) -> Self {
		Value::Float(v)
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Double(v)
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::String(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::String(v.to_string())
	}
}

/// Kind of value a parameter, function argument or record field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
	Boolean,
	Int,
	Long,
	Float,
	Double,
	String,
	/// Enumeration matched by label.
	Enum,
	/// Integer field presented through an integer to label mapping.
	IntEnum,
}

impl ValueType {
	/// Kind-appropriate zero value used to seed function arguments.
	///
	/// Enumerations have no neutral member, so they start unset.
	pub fn zero_value(self) -> Option<Value> {
		match self {
			ValueType::Boolean => Some(Value::Bool(false)),
			ValueType::Int | ValueType::IntEnum => Some(Value::Int(0)),
			ValueType::Long => Some(Value::Long(0)),
			ValueType::Float => Some(Value::Float(0.0)),
			ValueType::Double => Some(Value::Double(0.0)),
			ValueType::String => Some(Value::String(String::new())),
			ValueType::Enum => None,
		}
	}
}

/// Declared Rust type of an exposed member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticType {
	Boolean,
	Int,
	Long,
	Float,
	Double,
	String,
	/// Enumeration with its member labels in declaration order.
	Enum(&'static [&'static str]),
}

impl StaticType {
	/// Inferred [`ValueType`] for a member of this static type.
	pub fn value_type(self) -> ValueType {
		match self {
			StaticType::Boolean => ValueType::Boolean,
			StaticType::Int => ValueType::Int,
			StaticType::Long => ValueType::Long,
			StaticType::Float => ValueType::Float,
			StaticType::Double => ValueType::Double,
			StaticType::String => ValueType::String,
			StaticType::Enum(_) => ValueType::Enum,
		}
	}

	/// Enumeration labels, empty for every other type.
	pub fn labels(self) -> &'static [&'static str] {
		match self {
			StaticType::Enum(labels) => labels,
			_ => &[],
		}
	}
}

/// Conversion between a Rust member type and [`Value`].
///
/// Implemented for the supported primitive types and, through
/// `#[derive(Labels)]`, for unit-only enums.
pub trait FieldValue: Sized {
	/// Declared type reported to discovery.
	fn static_type() -> StaticType;

	/// Reads the member as a [`Value`].
	fn to_value(&self) -> Value;

	/// Converts an already coerced value back into the member type.
	///
	/// Returns `None` when the value variant does not fit.
	fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_field_value {
	($ty:ty, $static:ident, $variant:ident) => {
		impl FieldValue for $ty {
			fn static_type() -> StaticType {
				StaticType::$static
			}

			fn to_value(&self) -> Value {
				Value::$variant(self.clone())
			}

			fn from_value(value: &Value) -> Option<Self> {
				match value {
					Value::$variant(v) => Some(v.clone()),
					_ => None,
				}
			}
		}
	};
}

impl_field_value!(bool, Boolean, Bool);
impl_field_value!(i32, Int, Int);
impl_field_value!(f32, Float, Float);
impl_field_value!(f64, Double, Double);
impl_field_value!(String, String, String);

impl FieldValue for i64 {
	fn static_type() -> StaticType {
		StaticType::Long
	}

	fn to_value(&self) -> Value {
		Value::Long(*self)
	}

	fn from_value(value: &Value) -> Option<Self> {
		match value {
			Value::Long(v) => Some(*v),
			Value::Int(v) => Some(i64::from(*v)),
			_ => None,
		}
	}
}
