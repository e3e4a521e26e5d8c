use std::collections::BTreeMap;

use rustc_hash::FxHashMap as HashMap;
use serde::Serialize;

/// Ordered integer to label mapping for integer-coded enumerations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EnumMapping(BTreeMap<i32, String>);

impl EnumMapping {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses `"<int>:<label>"` tokens.
	///
	/// Tokens that do not split into exactly two parts, or whose first part is
	/// not an integer, are logged and skipped. Later duplicates replace earlier
	/// ones.
	pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Self {
		let mut map = BTreeMap::new();
		for token in tokens {
			let token = token.as_ref();
			let parts: Vec<&str> = token.split(':').collect();
			let [value, label] = parts.as_slice() else {
				tracing::warn!(token, "enum mapping token is not <int>:<label>");
				continue;
			};
			match value.trim().parse::<i32>() {
				Ok(value) => {
					map.insert(value, label.trim().to_string());
				}
				Err(error) => {
					tracing::warn!(token, %error, "enum mapping value is not an integer");
				}
			}
		}
		Self(map)
	}

	/// Parses `"<field>:<int>:<label>"` tokens grouped by field name.
	///
	/// Extra `:` separated parts after the label are ignored.
	pub fn parse_fields<S: AsRef<str>>(tokens: &[S]) -> HashMap<String, EnumMapping> {
		let mut fields: HashMap<String, EnumMapping> = HashMap::default();
		for token in tokens {
			let token = token.as_ref();
			let parts: Vec<&str> = token.split(':').collect();
			if parts.len() < 3 {
				tracing::warn!(token, "flow mapping token is not <field>:<int>:<label>");
				continue;
			}
			let Ok(value) = parts[1].trim().parse::<i32>() else {
				tracing::warn!(token, "flow mapping value is not an integer");
				continue;
			};
			fields
				.entry(parts[0].trim().to_string())
				.or_default()
				.0
				.insert(value, parts[2].trim().to_string());
		}
		fields
	}

	pub fn insert(&mut self, value: i32, label: impl Into<String>) {
		self.0.insert(value, label.into());
	}

	pub fn label_for(&self, value: i32) -> Option<&str> {
		self.0.get(&value).map(String::as_str)
	}

	/// Reverse lookup, first entry in ascending integer order wins.
	pub fn value_for(&self, label: &str) -> Option<i32> {
		self.0
			.iter()
			.find_map(|(value, l)| (l == label).then_some(*value))
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}
}

impl<L: Into<String>> FromIterator<(i32, L)> for EnumMapping {
	fn from_iter<I: IntoIterator<Item = (i32, L)>>(iter: I) -> Self {
		Self(iter.into_iter().map(|(k, v)| (k, v.into())).collect())
	}
}
