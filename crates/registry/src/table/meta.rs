//! Metadata attached to each declared member.
//!
//! Builders default every field the way an unannotated member would be
//! presented: the member name as display name and the shared default group.

use crate::DEFAULT_GROUP;

/// Type-level grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
	pub(crate) name: Option<String>,
	pub(crate) description: String,
	pub(crate) enabled: bool,
}

impl Default for Group {
	fn default() -> Self {
		Self::new()
	}
}

impl Group {
	/// Group named after the owner type.
	pub fn new() -> Self {
		Self {
			name: None,
			description: String::new(),
			enabled: true,
		}
	}

	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = description.into();
		self
	}

	pub fn enabled(mut self, enabled: bool) -> Self {
		self.enabled = enabled;
		self
	}
}

macro_rules! common_setters {
	() => {
		/// Display name; the member name when unset or empty.
		pub fn name(mut self, name: impl Into<String>) -> Self {
			self.name = Some(name.into()).filter(|n: &String| !n.is_empty());
			self
		}

		pub fn group(mut self, group: impl Into<String>) -> Self {
			self.group = group.into();
			self
		}

		pub fn description(mut self, description: impl Into<String>) -> Self {
			self.description = description.into();
			self
		}
	};
}

/// Exposed field metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Expose {
	pub(crate) name: Option<String>,
	pub(crate) group: String,
	pub(crate) description: String,
	pub(crate) min: Option<f64>,
	pub(crate) max: Option<f64>,
	pub(crate) step: Option<f64>,
	pub(crate) enum_mapping: Vec<String>,
}

impl Default for Expose {
	fn default() -> Self {
		Self::new()
	}
}

impl Expose {
	pub fn new() -> Self {
		Self {
			name: None,
			group: DEFAULT_GROUP.to_string(),
			description: String::new(),
			min: None,
			max: None,
			step: None,
			enum_mapping: Vec::new(),
		}
	}

	common_setters!();

	/// Inclusive bounds shown by numeric editors.
	pub fn range(mut self, min: f64, max: f64) -> Self {
		self.min = Some(min);
		self.max = Some(max);
		self
	}

	pub fn step(mut self, step: f64) -> Self {
		self.step = Some(step);
		self
	}

	/// `"<int>:<label>"` tokens presenting an integer field as an enumeration.
	pub fn enum_mapping<S: AsRef<str>>(mut self, tokens: impl IntoIterator<Item = S>) -> Self {
		self.enum_mapping = tokens.into_iter().map(|t| t.as_ref().to_string()).collect();
		self
	}
}

/// Trigger method metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Trigger {
	pub(crate) name: Option<String>,
	pub(crate) group: String,
	pub(crate) description: String,
}

impl Default for Trigger {
	fn default() -> Self {
		Self::new()
	}
}

impl Trigger {
	pub fn new() -> Self {
		Self {
			name: None,
			group: DEFAULT_GROUP.to_string(),
			description: String::new(),
		}
	}

	common_setters!();
}

/// Debug function metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
	pub(crate) name: Option<String>,
	pub(crate) group: String,
	pub(crate) description: String,
	pub(crate) expose_parameters: bool,
	pub(crate) params: Vec<String>,
}

impl Default for Function {
	fn default() -> Self {
		Self::new()
	}
}

impl Function {
	pub fn new() -> Self {
		Self {
			name: None,
			group: DEFAULT_GROUP.to_string(),
			description: String::new(),
			expose_parameters: true,
			params: Vec::new(),
		}
	}

	common_setters!();

	/// When false the function is invoked without arguments.
	pub fn expose_parameters(mut self, expose: bool) -> Self {
		self.expose_parameters = expose;
		self
	}

	/// Formal parameter names in declaration order.
	///
	/// Parameters without a name are called `param<index>`.
	pub fn params<S: AsRef<str>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
		self.params = names.into_iter().map(|n| n.as_ref().to_string()).collect();
		self
	}
}

/// Reactive container metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Flow {
	pub(crate) name: Option<String>,
	pub(crate) group: String,
	pub(crate) description: String,
	pub(crate) fields: Vec<String>,
	pub(crate) enum_mapping: Vec<String>,
}

impl Default for Flow {
	fn default() -> Self {
		Self::new()
	}
}

impl Flow {
	pub fn new() -> Self {
		Self {
			name: None,
			group: DEFAULT_GROUP.to_string(),
			description: String::new(),
			fields: Vec::new(),
			enum_mapping: Vec::new(),
		}
	}

	common_setters!();

	/// Record fields exposed for override.
	pub fn fields<S: AsRef<str>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
		self.fields = fields.into_iter().map(|f| f.as_ref().to_string()).collect();
		self
	}

	/// `"<field>:<int>:<label>"` tokens.
	pub fn enum_mapping<S: AsRef<str>>(mut self, tokens: impl IntoIterator<Item = S>) -> Self {
		self.enum_mapping = tokens.into_iter().map(|t| t.as_ref().to_string()).collect();
		self
	}
}
