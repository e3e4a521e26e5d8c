use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use dyno_registry::{Inspect, ParameterRegistry, Shared, Value};

use crate::config::DynoConfig;
use crate::generated;
use crate::launcher::{DebugLauncher, LaunchAction, StatusIndicator};

/// Host-facing entry point.
///
/// Owns one [`ParameterRegistry`] and forwards to it. While disabled every
/// operation returns `false` or `None` without touching the registry.
pub struct Dyno {
	this: Weak<Dyno>,
	config: DynoConfig,
	registry: Arc<ParameterRegistry>,
	indicator: Option<Arc<dyn StatusIndicator>>,
	launcher: Option<Arc<dyn DebugLauncher>>,
	indicator_shown: AtomicBool,
}

/// Configures a [`Dyno`] before it starts.
#[derive(Default)]
pub struct DynoBuilder {
	config: DynoConfig,
	indicator: Option<Arc<dyn StatusIndicator>>,
	launcher: Option<Arc<dyn DebugLauncher>>,
}

impl DynoBuilder {
	pub fn config(mut self, config: DynoConfig) -> Self {
		self.config = config;
		self
	}

	pub fn indicator(mut self, indicator: impl StatusIndicator + 'static) -> Self {
		self.indicator = Some(Arc::new(indicator));
		self
	}

	pub fn launcher(mut self, launcher: impl DebugLauncher + 'static) -> Self {
		self.launcher = Some(Arc::new(launcher));
		self
	}

	/// Starts the facade.
	///
	/// When enabled, applies every submitted generated registry and, if
	/// configured, shows the status indicator.
	pub fn initialize(self) -> Arc<Dyno> {
		let dyno = Arc::new_cyclic(|this| Dyno {
			this: this.clone(),
			config: self.config,
			registry: Arc::new(ParameterRegistry::new()),
			indicator: self.indicator,
			launcher: self.launcher,
			indicator_shown: AtomicBool::new(false),
		});
		if !dyno.is_enabled() {
			tracing::debug!("dyno disabled, facade is inert");
			return dyno;
		}
		let applied = generated::run_all(&dyno.registry);
		if dyno.config.auto_show_notification {
			dyno.show_debug_interface();
		}
		tracing::debug!(generated = applied, "dyno initialized");
		dyno
	}
}

impl Dyno {
	pub fn builder() -> DynoBuilder {
		DynoBuilder::default()
	}

	pub fn is_enabled(&self) -> bool {
		self.config.enable_in_debug
	}

	pub fn config(&self) -> &DynoConfig {
		&self.config
	}

	/// The registry behind this facade, for presentation layers.
	pub fn registry(&self) -> &Arc<ParameterRegistry> {
		&self.registry
	}

	/// Registers a live instance, replacing any earlier instance of its type.
	///
	/// Returns the replaced instance if it is still alive. Always `None`
	/// while disabled.
	pub fn register<T: Inspect>(&self, instance: &Shared<T>) -> Option<Shared<T>> {
		if !self.is_enabled() {
			return None;
		}
		self.registry.register_instance(instance)
	}

	/// Unregisters `instance` if it is the registered instance of its type.
	pub fn unregister<T: Inspect>(&self, instance: &Shared<T>) -> bool {
		self.is_enabled() && self.registry.unregister_instance(instance)
	}

	pub fn trigger_method(&self, owner: &str, method: &str) -> bool {
		self.is_enabled() && self.registry.trigger_method(owner, method)
	}

	pub fn trigger_function(&self, owner: &str, method: &str) -> bool {
		self.is_enabled() && self.registry.trigger_function(owner, method)
	}

	pub fn get_parameter_value(&self, owner: &str, field: &str) -> Option<Value> {
		if !self.is_enabled() {
			return None;
		}
		self.registry.get_parameter_value(owner, field)
	}

	pub fn set_parameter_value(&self, owner: &str, field: &str, value: impl Into<Value>) -> bool {
		self.is_enabled() && self.registry.set_parameter_value(owner, field, value)
	}

	/// Shows the status indicator. Returns false when disabled or when no
	/// indicator was configured.
	pub fn show_debug_interface(&self) -> bool {
		if !self.is_enabled() {
			return false;
		}
		let Some(indicator) = &self.indicator else {
			tracing::debug!("no status indicator configured");
			return false;
		};
		indicator.show(LaunchAction::new(self.this.clone()));
		self.indicator_shown.store(true, Ordering::Release);
		tracing::debug!("status indicator shown");
		true
	}

	pub fn hide_debug_interface(&self) -> bool {
		if !self.is_enabled() {
			return false;
		}
		let Some(indicator) = &self.indicator else {
			return false;
		};
		indicator.hide();
		self.indicator_shown.store(false, Ordering::Release);
		tracing::debug!("status indicator hidden");
		true
	}

	/// True between a successful show and the next hide.
	pub fn is_indicator_shown(&self) -> bool {
		self.indicator_shown.load(Ordering::Acquire)
	}

	/// Opens the debug screen directly.
	pub fn launch_debug_interface(&self) -> bool {
		if !self.is_enabled() {
			return false;
		}
		let Some(launcher) = &self.launcher else {
			tracing::warn!("launch requested but no debug launcher is configured");
			return false;
		};
		launcher.launch(&self.registry);
		true
	}

	/// Drops every descriptor, staged value, override and instance.
	pub fn clear_all(&self) {
		if self.is_enabled() {
			self.registry.clear();
		}
	}
}
