use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading a [`DynoConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("invalid dyno config: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Facade settings.
///
/// ```toml
/// enable_in_debug = true
/// auto_show_notification = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DynoConfig {
	/// Master switch. When false every facade operation is a no-op.
	pub enable_in_debug: bool,
	/// Show the status indicator as soon as the facade initializes.
	pub auto_show_notification: bool,
}

impl Default for DynoConfig {
	fn default() -> Self {
		Self {
			enable_in_debug: cfg!(debug_assertions),
			auto_show_notification: true,
		}
	}
}

impl DynoConfig {
	/// Settings that turn the facade off entirely.
	pub fn disabled() -> Self {
		Self {
			enable_in_debug: false,
			auto_show_notification: false,
		}
	}

	/// Parses settings from TOML text. Missing keys keep their defaults.
	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}

	/// Reads and parses a TOML settings file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&text)
	}
}

#[cfg(test)]
mod tests;
