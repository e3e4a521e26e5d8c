//! Turns a type table plus one live instance into descriptors.
//!
//! A member that cannot be described is logged and skipped; the rest of the
//! scan carries on.

use crate::coerce::render;
use crate::model::{
	EnumMapping, FlowManipulationDescriptor, FunctionDescriptor, FunctionParameter,
	GroupDescriptor, ManipulableField, ParameterDescriptor, StaticType, TriggerDescriptor, Value,
	ValueType,
};
use crate::state::StateHolder;
use crate::table::{Inspect, TypeTable};

/// Everything one scan produced.
#[derive(Default)]
pub(crate) struct Discovered {
	pub(crate) group: Option<GroupDescriptor>,
	pub(crate) parameters: Vec<ParameterDescriptor>,
	pub(crate) triggers: Vec<TriggerDescriptor>,
	pub(crate) functions: Vec<FunctionDescriptor>,
	pub(crate) flows: Vec<(FlowManipulationDescriptor, Box<dyn StateHolder>)>,
}

impl Discovered {
	pub(crate) fn member_count(&self) -> usize {
		self.parameters.len() + self.triggers.len() + self.functions.len() + self.flows.len()
	}
}

/// Describes every member declared on `table`, reading current values from
/// `instance`.
pub(crate) fn scan<T: Inspect>(table: &TypeTable<T>, instance: &T) -> Discovered {
	let owner = table.owner();
	let mut found = Discovered {
		group: table.group.as_ref().map(|group| {
			let name = group
				.name
				.clone()
				.filter(|n| !n.is_empty())
				.unwrap_or_else(|| table.simple_name().to_string());
			GroupDescriptor {
				owner: owner.to_string(),
				display_name: name.clone(),
				name,
				description: group.description.clone(),
				enabled: group.enabled,
			}
		}),
		..Discovered::default()
	};

	for entry in &table.fields {
		let meta = &entry.meta;
		let mut descriptor = ParameterDescriptor::new(owner, entry.name, entry.ty.value_type());
		descriptor.display_name = display_name(&meta.name, entry.name);
		descriptor.group = meta.group.clone();
		descriptor.description = meta.description.clone();
		descriptor.min = meta.min;
		descriptor.max = meta.max;
		descriptor.step = meta.step;
		descriptor.enum_values = labels(entry.ty);
		if !meta.enum_mapping.is_empty() {
			descriptor = descriptor.with_mapping(EnumMapping::parse(&meta.enum_mapping));
		}
		found.parameters.push(descriptor);
	}

	for entry in &table.triggers {
		found.triggers.push(TriggerDescriptor {
			owner: owner.to_string(),
			name: entry.name.to_string(),
			display_name: display_name(&entry.meta.name, entry.name),
			group: entry.meta.group.clone(),
			description: entry.meta.description.clone(),
		});
	}

	for entry in &table.functions {
		let meta = &entry.meta;
		let parameters = if meta.expose_parameters {
			entry
				.params
				.iter()
				.enumerate()
				.map(|(index, ty)| {
					let name = meta
						.params
						.get(index)
						.filter(|n| !n.is_empty())
						.cloned()
						.unwrap_or_else(|| format!("param{index}"));
					let mut param = FunctionParameter::new(name, ty.value_type());
					param.enum_values = labels(*ty);
					param
				})
				.collect()
		} else {
			Vec::new()
		};
		found.functions.push(FunctionDescriptor {
			owner: owner.to_string(),
			name: entry.name.to_string(),
			display_name: display_name(&meta.name, entry.name),
			group: meta.group.clone(),
			description: meta.description.clone(),
			expose_parameters: meta.expose_parameters,
			parameters,
		});
	}

	for entry in &table.flows {
		let meta = &entry.meta;
		let holder = (entry.holder)(instance);
		let mappings = EnumMapping::parse_fields(&meta.enum_mapping);
		let fields = meta
			.fields
			.iter()
			.filter_map(|field| {
				if !holder.declares(field) {
					tracing::warn!(owner, flow = entry.name, field = %field, "record declares no such field, skipping");
					return None;
				}
				let value = holder.read_field(field);
				let mapping = mappings.get(field).filter(|m| !m.is_empty()).cloned();
				let text = value.as_ref().map(render);
				Some(ManipulableField {
					name: field.clone(),
					display_name: capitalize(field),
					value_type: flow_field_type(value.as_ref(), mapping.is_some()),
					current_value: text.clone(),
					original_value: text,
					enum_mapping: mapping,
				})
			})
			.collect();
		let descriptor = FlowManipulationDescriptor {
			owner: owner.to_string(),
			name: entry.name.to_string(),
			display_name: display_name(&meta.name, entry.name),
			group: meta.group.clone(),
			description: meta.description.clone(),
			record_name: holder.record_name(),
			fields,
		};
		found.flows.push((descriptor, holder));
	}

	tracing::debug!(owner, members = found.member_count(), "scanned instance");
	found
}

/// Editor kind for a record field, judged from its current value.
///
/// Only booleans and 32-bit integers get dedicated editors; everything else
/// is edited as text and converted to the field's declared type on apply.
fn flow_field_type(value: Option<&Value>, mapped: bool) -> ValueType {
	match value {
		_ if mapped => ValueType::IntEnum,
		Some(Value::Bool(_)) => ValueType::Boolean,
		Some(Value::Int(_)) => ValueType::Int,
		_ => ValueType::String,
	}
}

fn display_name(name: &Option<String>, member: &str) -> String {
	name.clone()
		.filter(|n| !n.is_empty())
		.unwrap_or_else(|| member.to_string())
}

fn labels(ty: StaticType) -> Vec<String> {
	ty.labels().iter().map(|l| l.to_string()).collect()
}

fn capitalize(name: &str) -> String {
	let mut chars = name.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

#[cfg(test)]
mod tests;
