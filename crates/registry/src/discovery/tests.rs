use pretty_assertions::assert_eq;

use super::*;
use crate::test_support::{Counter, Panel, init_tracing};

fn scan_panel() -> Discovered {
	init_tracing();
	scan(&TypeTable::<Panel>::build(), &Panel::default())
}

#[test]
fn group_defaults_to_simple_type_name() {
	let found = scan_panel();
	assert_eq!(
		found.group,
		Some(GroupDescriptor {
			owner: "Panel".to_string(),
			name: "Panel".to_string(),
			display_name: "Panel".to_string(),
			description: "Test panel".to_string(),
			enabled: true,
		})
	);

	let bare = scan(&TypeTable::<Counter>::build(), &Counter::default());
	assert_eq!(bare.group, None);
	assert_eq!(bare.member_count(), 2);
}

#[test]
fn parameters_carry_metadata_and_kinds() {
	let found = scan_panel();
	let kinds: Vec<_> = found
		.parameters
		.iter()
		.map(|p| (p.name.as_str(), p.value_type))
		.collect();
	assert_eq!(
		kinds,
		[
			("speed", ValueType::Int),
			("ratio", ValueType::Double),
			("label", ValueType::String),
			("enabled", ValueType::Boolean),
			("mode", ValueType::Enum),
			("status", ValueType::IntEnum),
			("total", ValueType::Long),
		]
	);

	let speed = &found.parameters[0];
	assert_eq!(speed.display_name, "Speed");
	assert_eq!((speed.min, speed.max, speed.step), (Some(0.0), Some(10.0), Some(1.0)));
	assert_eq!(speed.group, crate::DEFAULT_GROUP);
	assert_eq!(found.parameters[2].group, "Text");
	assert_eq!(found.parameters[1].display_name, "ratio");
	assert_eq!(found.parameters[4].enum_values, ["Idle", "Running"]);
}

#[test]
fn integer_mapping_skips_malformed_tokens() {
	let found = scan_panel();
	let status = &found.parameters[5];
	let expected: EnumMapping = [(0, "None"), (1, "Active")].into_iter().collect();
	assert_eq!(status.enum_mapping, Some(expected));
}

#[test]
fn triggers_are_described_in_order() {
	let found = scan_panel();
	let reset = &found.triggers[0];
	assert_eq!(reset.name, "reset");
	assert_eq!(reset.description, "Zero the speed");
	assert_eq!(found.triggers[1].display_name, "explode");
}

#[test]
fn function_parameters_are_named_and_seeded() {
	let found = scan_panel();

	let configure = &found.functions[0];
	let params: Vec<_> = configure
		.parameters
		.iter()
		.map(|p| (p.name.as_str(), p.value_type, p.default_value.clone()))
		.collect();
	assert_eq!(
		params,
		[
			("speed", ValueType::Int, Some(Value::Int(0))),
			("label", ValueType::String, Some(Value::String(String::new()))),
			("param2", ValueType::Boolean, Some(Value::Bool(false))),
		]
	);

	let pick = function_named(&found, "pick");
	assert_eq!(pick.parameters[0].enum_values, ["Idle", "Running"]);
	assert_eq!(pick.parameters[0].default_value, None);
}

#[test]
fn unexposed_functions_have_no_parameters() {
	let found = scan_panel();
	for name in ["ping", "ping_args"] {
		let function = function_named(&found, name);
		assert!(!function.expose_parameters);
		assert!(function.parameters.is_empty());
	}
}

#[test]
fn flow_fields_follow_current_values() {
	let found = scan_panel();
	let (flow, holder) = &found.flows[0];

	assert_eq!(flow.display_name, "Profile state");
	assert_eq!(flow.record_name, "Profile");
	assert_eq!(holder.record_name(), "Profile");

	let fields: Vec<_> = flow
		.fields
		.iter()
		.map(|f| (f.display_name.as_str(), f.value_type, f.current_value.as_deref()))
		.collect();
	assert_eq!(
		fields,
		[
			("Active", ValueType::Boolean, Some("false")),
			("Level", ValueType::IntEnum, Some("1")),
			("City", ValueType::String, Some("X")),
		]
	);

	let level = flow.field("level").unwrap();
	assert_eq!(level.original_value, level.current_value);
	let mapping = level.enum_mapping.as_ref().unwrap();
	assert_eq!(mapping.label_for(5), Some("High"));
	assert_eq!(mapping.len(), 2);
	assert!(flow.field("missing").is_none());
}

#[test]
fn editor_kinds_fall_back_to_text() {
	assert_eq!(flow_field_type(Some(&Value::Long(4)), false), ValueType::String);
	assert_eq!(flow_field_type(Some(&Value::Double(0.5)), false), ValueType::String);
	assert_eq!(flow_field_type(None, false), ValueType::String);
	assert_eq!(flow_field_type(Some(&Value::from("a")), true), ValueType::IntEnum);
	assert_eq!(capitalize(""), "");
	assert_eq!(capitalize("élan"), "Élan");
}

fn function_named<'a>(found: &'a Discovered, name: &str) -> &'a FunctionDescriptor {
	found
		.functions
		.iter()
		.find(|f| f.name == name)
		.unwrap()
}
