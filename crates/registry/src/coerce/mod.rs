//! Conversion of raw user input into typed values, and back into text.
//!
//! Every mutation path funnels through [`coerce`]. Numeric input narrows or
//! widens with `as` semantics; text is parsed exactly (no trimming). Enum
//! kinds never fail: an unmatched label is handed back unchanged with a
//! warning so the caller can decide what to do with it.

use crate::error::CoerceError;
use crate::model::{EnumMapping, StaticType, Value, ValueType};

/// Converts `raw` to the kind `ty`.
///
/// `labels` lists the members of a named enumeration and is ignored for other
/// kinds. `mapping` is consulted only for [`ValueType::IntEnum`].
pub fn coerce<S: AsRef<str>>(
	raw: &Value,
	ty: ValueType,
	labels: &[S],
	mapping: Option<&EnumMapping>,
) -> Result<Value, CoerceError> {
	match ty {
		ValueType::Boolean => Ok(Value::Bool(coerce_bool(raw))),
		ValueType::Int => number(raw, ty, |n| Value::Int(n as i32), |s| s.parse().map(Value::Int).ok()),
		ValueType::Long => number(raw, ty, |n| Value::Long(n as i64), |s| s.parse().map(Value::Long).ok()),
		ValueType::Float => number(raw, ty, |n| Value::Float(n as f32), |s| s.parse().map(Value::Float).ok()),
		ValueType::Double => number(raw, ty, Value::Double, |s| s.parse().map(Value::Double).ok()),
		ValueType::String => Ok(Value::String(raw.to_string())),
		ValueType::Enum => Ok(coerce_enum(raw, labels)),
		ValueType::IntEnum => Ok(coerce_int_enum(raw, mapping)),
	}
}

/// Converts `raw` to the declared type of a member.
pub fn coerce_static(raw: &Value, ty: StaticType) -> Result<Value, CoerceError> {
	coerce(raw, ty.value_type(), ty.labels(), None)
}

/// Textual form of a value; [`coerce`] parses it back to the same value.
pub fn render(value: &Value) -> String {
	value.to_string()
}

/// Display form of a value, resolving integer-coded enum labels.
///
/// An integer with a known label renders as `"<int> (<label>)"`.
pub fn render_display(value: &Value, mapping: Option<&EnumMapping>) -> String {
	if let Value::Int(n) = value
		&& let Some(label) = mapping.and_then(|m| m.label_for(*n))
	{
		return format!("{n} ({label})");
	}
	render(value)
}

/// Parses a boolean the way the debug screen submits it.
///
/// Only `true` (any case) is truthy; everything else fails closed.
fn coerce_bool(raw: &Value) -> bool {
	match raw {
		Value::Bool(v) => *v,
		Value::String(s) | Value::Enum(s) => s.eq_ignore_ascii_case("true"),
		_ => false,
	}
}

fn number(
	raw: &Value,
	target: ValueType,
	from_f64: impl Fn(f64) -> Value,
	parse: impl Fn(&str) -> Option<Value>,
) -> Result<Value, CoerceError> {
	// Integer inputs are converted directly so wide values keep their precision.
	match (raw, target) {
		(Value::Int(n), ValueType::Int) => return Ok(Value::Int(*n)),
		(Value::Long(n), ValueType::Int) => return Ok(Value::Int(*n as i32)),
		(Value::Int(n), ValueType::Long) => return Ok(Value::Long(i64::from(*n))),
		(Value::Long(n), ValueType::Long) => return Ok(Value::Long(*n)),
		_ => {}
	}
	match raw {
		Value::Int(n) => Ok(from_f64(f64::from(*n))),
		Value::Long(n) => Ok(from_f64(*n as f64)),
		Value::Float(n) => Ok(from_f64(f64::from(*n))),
		Value::Double(n) => Ok(from_f64(*n)),
		Value::String(s) | Value::Enum(s) => parse(s).ok_or_else(|| CoerceError::InvalidLiteral {
			input: s.clone(),
			target,
		}),
		Value::Bool(_) => Err(CoerceError::Unsupported {
			got: raw.type_name(),
			target,
		}),
	}
}

fn coerce_enum<S: AsRef<str>>(raw: &Value, labels: &[S]) -> Value {
	let text = raw.to_string();
	if let Some(label) = labels.iter().find(|l| l.as_ref() == text) {
		return Value::Enum(label.as_ref().to_string());
	}
	tracing::warn!(input = %text, "no enum member matches input, keeping raw value");
	raw.clone()
}

fn coerce_int_enum(raw: &Value, mapping: Option<&EnumMapping>) -> Value {
	match raw {
		Value::Int(n) => return Value::Int(*n),
		Value::Long(n) => return Value::Int(*n as i32),
		Value::Float(n) => return Value::Int(*n as i32),
		Value::Double(n) => return Value::Int(*n as i32),
		_ => {}
	}
	if let Value::String(s) | Value::Enum(s) = raw {
		if let Ok(n) = s.parse::<i32>() {
			return Value::Int(n);
		}
		if let Some(n) = mapping.and_then(|m| m.value_for(s)) {
			return Value::Int(n);
		}
	}
	tracing::warn!(input = %raw, "input is neither an integer nor a mapped label, keeping raw value");
	raw.clone()
}

#[cfg(test)]
mod tests;
