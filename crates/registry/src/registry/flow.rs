use std::sync::Arc;

use super::{FlowSnapshot, ParameterRegistry, access_error};
use crate::coerce::{coerce, render};
use crate::error::{MemberKind, RegistryError};
use crate::model::{MemberKey, Value};
use crate::state::OverrideMap;

impl ParameterRegistry {
	/// Every flow manipulation with `current_value` refreshed from the live
	/// container. `original_value` keeps the discovery-time snapshot.
	pub fn get_all_flow_manipulations(&self) -> FlowSnapshot {
		let mut flows = self.state.read().flows.clone();
		for flow in flows.values_mut() {
			let Some(handle) = self.directory.resolve_handle(&flow.owner) else {
				continue;
			};
			let Ok(holder) = handle.state_holder(&flow.name) else {
				continue;
			};
			flow.record_name = holder.record_name();
			for field in &mut flow.fields {
				field.current_value = holder.read_field(&field.name).as_ref().map(render);
			}
		}
		flows
	}

	/// Override currently recorded for one record field.
	pub fn get_flow_field_override(&self, owner: &str, flow: &str, field: &str) -> Option<Value> {
		self.state
			.read()
			.overrides
			.get(&MemberKey::new(owner, flow))?
			.lock()
			.get(field)
			.cloned()
	}

	/// Records an override for one record field and republishes the
	/// container with every recorded override applied.
	///
	/// The override stays recorded even when the republish fails, and is
	/// applied again on every later natural update of the container.
	pub fn set_flow_field_override(
		&self,
		owner: &str,
		flow: &str,
		field: &str,
		value: impl Into<Value>,
	) -> bool {
		self.try_set_flow_field_override(owner, flow, field, value)
			.inspect_err(|error| {
				tracing::warn!(owner, flow, field, %error, "set_flow_field_override failed")
			})
			.is_ok()
	}

	pub fn try_set_flow_field_override(
		&self,
		owner: &str,
		flow: &str,
		field: &str,
		value: impl Into<Value>,
	) -> Result<(), RegistryError> {
		let key = MemberKey::new(owner, flow);
		let raw = value.into();
		let (overrides, coerced) = {
			let state = self.state.read();
			let Some(descriptor) = state.flows.get(&key) else {
				drop(state);
				return Err(self.unknown(MemberKind::Flow, key));
			};
			let Some(target) = descriptor.field(field) else {
				return Err(RegistryError::UnknownRecordField {
					key,
					field: field.to_string(),
				});
			};
			let coerced = coerce(&raw, target.value_type, &[] as &[&str], target.enum_mapping.as_ref())
				.map_err(|source| RegistryError::Coerce {
					key: key.clone(),
					source,
				})?;
			let overrides = state.overrides.get(&key).cloned().unwrap_or_default();
			(overrides, coerced)
		};
		tracing::debug!(%key, field, value = %coerced, "flow override recorded");
		overrides.lock().insert(field.to_string(), coerced);
		self.ensure_overrides(&key, &overrides);
		self.republish_flow(&key, overrides)
	}

	/// Drops the override for one record field and republishes the
	/// container from its natural value.
	pub fn clear_flow_field_override(&self, owner: &str, flow: &str, field: &str) -> bool {
		let key = MemberKey::new(owner, flow);
		let Some(overrides) = self.overrides_for(&key) else {
			return false;
		};
		if overrides.lock().shift_remove(field).is_none() {
			return false;
		}
		self.republish_flow(&key, overrides)
			.inspect_err(|error| tracing::warn!(%key, field, %error, "clear_flow_field_override failed"))
			.is_ok()
	}

	/// Drops every override of one container and republishes its natural
	/// value.
	pub fn reset_flow_overrides(&self, owner: &str, flow: &str) -> bool {
		let key = MemberKey::new(owner, flow);
		let Some(overrides) = self.overrides_for(&key) else {
			return false;
		};
		overrides.lock().clear();
		self.republish_flow(&key, overrides)
			.inspect_err(|error| tracing::warn!(%key, %error, "reset_flow_overrides failed"))
			.is_ok()
	}

	fn overrides_for(&self, key: &MemberKey) -> Option<OverrideMap> {
		self.state.read().overrides.get(key).cloned()
	}

	/// Stores `overrides` for `key` when the flow was registered without one.
	fn ensure_overrides(&self, key: &MemberKey, overrides: &OverrideMap) {
		let mut state = self.state.write();
		if !state.overrides.contains_key(key) && state.flows.contains_key(key) {
			state.overrides.insert(key.clone(), Arc::clone(overrides));
		}
	}

	/// Attaches `overrides` to the live container and rebuilds its value.
	fn republish_flow(&self, key: &MemberKey, overrides: OverrideMap) -> Result<(), RegistryError> {
		let handle = self.handle(&key.owner)?;
		let holder = handle
			.state_holder(&key.member)
			.map_err(|source| access_error(&key.owner, &key.member, source))?;
		holder.attach(overrides);
		holder.reapply().map_err(|source| RegistryError::Reconstruct {
			key: key.clone(),
			source,
		})?;
		let snapshot = self.get_all_flow_manipulations();
		self.feeds.flows.publish(snapshot);
		Ok(())
	}
}
