//! Boundary to the host's notification and debug screen facilities.
//!
//! Neither is implemented here. A host plugs in a [`StatusIndicator`] that
//! shows a persistent entry point, and a [`DebugLauncher`] that opens its
//! debug screen over the registry.

use std::sync::{Arc, Weak};

use dyno_registry::ParameterRegistry;

use crate::Dyno;

/// Persistent indicator offering the debug screen.
pub trait StatusIndicator: Send + Sync {
	/// Shows the indicator. Activating it should call [`LaunchAction::launch`].
	fn show(&self, action: LaunchAction);

	fn hide(&self);
}

/// Opens the debug screen.
pub trait DebugLauncher: Send + Sync {
	fn launch(&self, registry: &Arc<ParameterRegistry>);
}

/// Callback handed to a [`StatusIndicator`].
///
/// Holds the facade weakly; launching after the facade is gone does nothing.
#[derive(Clone)]
pub struct LaunchAction {
	dyno: Weak<Dyno>,
}

impl LaunchAction {
	pub(crate) fn new(dyno: Weak<Dyno>) -> Self {
		Self { dyno }
	}

	/// Launches the debug screen. Returns false if nothing was launched.
	pub fn launch(&self) -> bool {
		match self.dyno.upgrade() {
			Some(dyno) => dyno.launch_debug_interface(),
			None => {
				tracing::debug!("launch requested after facade was dropped");
				false
			}
		}
	}
}

impl core::fmt::Debug for LaunchAction {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("LaunchAction")
			.field("live", &(self.dyno.strong_count() > 0))
			.finish()
	}
}
