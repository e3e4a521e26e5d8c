use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use super::*;

const NO_LABELS: &[&str] = &[];
const COLORS: &[&str] = &["Red", "Green", "Blue"];

fn plain(raw: impl Into<Value>, ty: ValueType) -> Result<Value, CoerceError> {
	coerce(&raw.into(), ty, NO_LABELS, None)
}

fn states() -> EnumMapping {
	[(0, "None"), (1, "Active")].into_iter().collect()
}

#[rstest]
#[case(Value::Bool(true), true)]
#[case(Value::from("true"), true)]
#[case(Value::from("TRUE"), true)]
#[case(Value::from("False"), false)]
#[case(Value::from("yes"), false)]
#[case(Value::Int(1), false)]
fn boolean_fails_closed(#[case] raw: Value, #[case] expected: bool) {
	assert_eq!(plain(raw, ValueType::Boolean), Ok(Value::Bool(expected)));
}

#[rstest]
#[case(Value::from("42"), ValueType::Int, Value::Int(42))]
#[case(Value::Long(7), ValueType::Int, Value::Int(7))]
#[case(Value::Double(3.9), ValueType::Int, Value::Int(3))]
#[case(Value::Int(5), ValueType::Long, Value::Long(5))]
#[case(Value::from("9000000000"), ValueType::Long, Value::Long(9_000_000_000))]
#[case(Value::Int(2), ValueType::Float, Value::Float(2.0))]
#[case(Value::from("0.5"), ValueType::Float, Value::Float(0.5))]
#[case(Value::Float(1.5), ValueType::Double, Value::Double(1.5))]
#[case(Value::from("-2.25"), ValueType::Double, Value::Double(-2.25))]
fn numeric_conversion(#[case] raw: Value, #[case] ty: ValueType, #[case] expected: Value) {
	assert_eq!(plain(raw, ty), Ok(expected));
}

#[test]
fn numeric_rejects_garbage() {
	assert_eq!(
		plain("abc", ValueType::Int),
		Err(CoerceError::InvalidLiteral {
			input: "abc".to_string(),
			target: ValueType::Int,
		})
	);
	assert!(plain(" 4", ValueType::Int).is_err());
	assert!(plain("1.5", ValueType::Long).is_err());
	assert!(matches!(
		plain(true, ValueType::Double),
		Err(CoerceError::Unsupported { got: "bool", .. })
	));
}

#[test]
fn string_always_succeeds() {
	assert_eq!(plain(12, ValueType::String), Ok(Value::from("12")));
	assert_eq!(plain(false, ValueType::String), Ok(Value::from("false")));
}

#[test]
fn enum_matches_case_sensitively() {
	let green = coerce(&Value::from("Green"), ValueType::Enum, COLORS, None);
	assert_eq!(green, Ok(Value::Enum("Green".to_string())));

	let lower = coerce(&Value::from("green"), ValueType::Enum, COLORS, None);
	assert_eq!(lower, Ok(Value::from("green")));
}

#[test]
fn int_enum_accepts_numbers_and_labels() {
	let mapping = states();
	let cases = [
		(Value::Int(1), Value::Int(1)),
		(Value::from("0"), Value::Int(0)),
		(Value::from("Active"), Value::Int(1)),
		(Value::Long(4), Value::Int(4)),
	];
	for (raw, expected) in cases {
		assert_eq!(
			coerce(&raw, ValueType::IntEnum, NO_LABELS, Some(&mapping)),
			Ok(expected)
		);
	}

	let unknown = coerce(&Value::from("Gone"), ValueType::IntEnum, NO_LABELS, Some(&mapping));
	assert_eq!(unknown, Ok(Value::from("Gone")));
}

#[test]
fn coerce_static_uses_declared_labels() {
	let ty = StaticType::Enum(COLORS);
	assert_eq!(
		coerce_static(&Value::from("Blue"), ty),
		Ok(Value::Enum("Blue".to_string()))
	);
	assert_eq!(coerce_static(&Value::from("7"), StaticType::Long), Ok(Value::Long(7)));
}

#[test]
fn display_resolves_mapped_labels() {
	let mapping = states();
	assert_eq!(render_display(&Value::Int(1), Some(&mapping)), "1 (Active)");
	assert_eq!(render_display(&Value::Int(9), Some(&mapping)), "9");
	assert_eq!(render_display(&Value::Int(1), None), "1");
	assert_eq!(render_display(&Value::Double(0.25), None), "0.25");
}

fn arb_value() -> impl Strategy<Value = (Value, ValueType)> {
	prop_oneof![
		any::<bool>().prop_map(|v| (Value::Bool(v), ValueType::Boolean)),
		any::<i32>().prop_map(|v| (Value::Int(v), ValueType::Int)),
		any::<i64>().prop_map(|v| (Value::Long(v), ValueType::Long)),
		(-1.0e30f32..1.0e30f32).prop_map(|v| (Value::Float(v), ValueType::Float)),
		(-1.0e300f64..1.0e300f64).prop_map(|v| (Value::Double(v), ValueType::Double)),
		".*".prop_map(|v| (Value::String(v), ValueType::String)),
		any::<i32>().prop_map(|v| (Value::Int(v), ValueType::IntEnum)),
	]
}

proptest! {
	/// Rendering a value and coercing the text back yields the same value.
	#[test]
	fn prop_render_roundtrip((value, ty) in arb_value()) {
		let text = Value::String(render(&value));
		prop_assert_eq!(coerce(&text, ty, NO_LABELS, None), Ok(value));
	}

	/// Declared enum labels survive the round trip.
	#[test]
	fn prop_enum_roundtrip(index in 0usize..3) {
		let value = Value::Enum(COLORS[index].to_string());
		let text = Value::String(render(&value));
		prop_assert_eq!(coerce(&text, ValueType::Enum, COLORS, None), Ok(value));
	}
}
