//! Host types shared by the unit tests.
//!
//! Written out by hand so the crate's tests do not depend on the derive
//! feature.

use crate::error::RecordError;
use crate::model::{FieldValue, StaticType, Value};
use crate::record::Record;
use crate::state::StateCell;
use crate::table::{Expose, Flow, Function, Group, Inspect, Trigger, TypeTable};

pub(crate) fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Mode {
	#[default]
	Idle,
	Running,
}

const MODE_LABELS: &[&str] = &["Idle", "Running"];

impl FieldValue for Mode {
	fn static_type() -> StaticType {
		StaticType::Enum(MODE_LABELS)
	}

	fn to_value(&self) -> Value {
		Value::Enum(MODE_LABELS[*self as usize].to_string())
	}

	fn from_value(value: &Value) -> Option<Self> {
		match value.as_str()? {
			"Idle" => Some(Mode::Idle),
			"Running" => Some(Mode::Running),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Profile {
	pub(crate) active: bool,
	pub(crate) level: i32,
	pub(crate) city: String,
	/// Not overridable.
	pub(crate) revision: u64,
}

impl Profile {
	pub(crate) fn new(active: bool, level: i32, city: &str) -> Self {
		Self {
			active,
			level,
			city: city.to_string(),
			revision: 0,
		}
	}
}

fn field_from<F: FieldValue>(field: &str, value: &Value) -> Result<F, RecordError> {
	F::from_value(value).ok_or_else(|| RecordError::TypeMismatch {
		field: field.to_string(),
		got: value.type_name(),
	})
}

impl Record for Profile {
	const FIELDS: &'static [&'static str] = &["active", "level", "city"];

	fn record_name(&self) -> Option<&'static str> {
		Some("Profile")
	}

	fn field_type(name: &str) -> Option<StaticType> {
		match name {
			"active" => Some(bool::static_type()),
			"level" => Some(i32::static_type()),
			"city" => Some(String::static_type()),
			_ => None,
		}
	}

	fn field(&self, name: &str) -> Option<Value> {
		match name {
			"active" => Some(self.active.to_value()),
			"level" => Some(self.level.to_value()),
			"city" => Some(self.city.to_value()),
			_ => None,
		}
	}

	fn with_field(&mut self, name: &str, value: Value) -> Result<(), RecordError> {
		match name {
			"active" => self.active = field_from(name, &value)?,
			"level" => self.level = field_from(name, &value)?,
			"city" => self.city = field_from(name, &value)?,
			_ => return Err(RecordError::UnknownField(name.to_string())),
		}
		Ok(())
	}
}

/// Host type touching every member kind.
pub(crate) struct Panel {
	pub(crate) speed: i32,
	pub(crate) ratio: f64,
	pub(crate) label: String,
	pub(crate) enabled: bool,
	pub(crate) mode: Mode,
	pub(crate) status: i32,
	pub(crate) total: i64,
	pub(crate) profile: StateCell<Profile>,
	pub(crate) calls: Vec<String>,
}

impl Default for Panel {
	fn default() -> Self {
		Self {
			speed: 3,
			ratio: 0.5,
			label: "panel".to_string(),
			enabled: false,
			mode: Mode::Idle,
			status: 0,
			total: 10,
			profile: StateCell::new(Profile::new(false, 1, "X")),
			calls: Vec::new(),
		}
	}
}

impl Panel {
	pub(crate) const OWNER: &'static str = "Panel";

	fn reset(&mut self) {
		self.speed = 0;
		self.calls.push("reset".to_string());
	}

	fn configure(&mut self, speed: i32, label: String, enabled: bool) {
		self.calls.push(format!("configure({speed}, {label:?}, {enabled})"));
	}

	fn pick(&mut self, mode: Mode) {
		self.mode = mode;
		self.calls.push(format!("pick({mode:?})"));
	}

	fn ping(&mut self) {
		self.calls.push("ping".to_string());
	}
}

impl Inspect for Panel {
	fn type_name() -> &'static str {
		Self::OWNER
	}

	fn describe(table: &mut TypeTable<Self>) {
		table
			.group(Group::new().description("Test panel"))
			.expose(
				"speed",
				Expose::new().name("Speed").range(0.0, 10.0).step(1.0),
				|p| &p.speed,
				|p| &mut p.speed,
			)
			.expose("ratio", Expose::new(), |p| &p.ratio, |p| &mut p.ratio)
			.expose("label", Expose::new().group("Text"), |p| &p.label, |p| &mut p.label)
			.expose("enabled", Expose::new(), |p| &p.enabled, |p| &mut p.enabled)
			.expose("mode", Expose::new(), |p| &p.mode, |p| &mut p.mode)
			.expose(
				"status",
				Expose::new().enum_mapping(["0:None", "1:Active", "bogus"]),
				|p| &p.status,
				|p| &mut p.status,
			)
			.expose("total", Expose::new(), |p| &p.total, |p| &mut p.total)
			.trigger("reset", Trigger::new().description("Zero the speed"), Panel::reset)
			.trigger("explode", Trigger::new(), |_| panic!("boom"))
			.function(
				"configure",
				Function::new().params(["speed", "label"]),
				Panel::configure,
			)
			.function("pick", Function::new().params(["mode"]), Panel::pick)
			.function("ping", Function::new().expose_parameters(false), Panel::ping)
			.function("ping_args", Function::new().expose_parameters(false), Panel::pick)
			.flow(
				"profile",
				Flow::new()
					.name("Profile state")
					.fields(["active", "level", "city", "missing"])
					.enum_mapping(["level:1:Low", "level:5:High", "broken"]),
				|p| &p.profile,
			);
	}
}

/// Type without a group, used for replacement and isolation checks.
#[derive(Default)]
pub(crate) struct Counter {
	pub(crate) count: i32,
}

impl Inspect for Counter {
	fn describe(table: &mut TypeTable<Self>) {
		table
			.expose("count", Expose::new(), |c| &c.count, |c| &mut c.count)
			.trigger("bump", Trigger::new(), |c| c.count += 1);
	}
}
