//! Registration routines emitted ahead of time.
//!
//! A routine pre-populates the registry through the explicit `register_*`
//! entry points. It is an optimization only: the facade runs whatever was
//! submitted and relies on runtime discovery for everything else.

use std::panic::{self, AssertUnwindSafe};

use dyno_registry::ParameterRegistry;

/// One submitted registration routine.
pub struct GeneratedRegistry {
	/// Name used in diagnostics.
	pub name: &'static str,
	pub register_all: fn(&ParameterRegistry),
}

inventory::collect!(GeneratedRegistry);

/// Submits a registration routine.
///
/// ```ignore
/// fn register_all(registry: &ParameterRegistry) {
///     registry.register_group(/* .. */);
/// }
///
/// dyno_runtime::submit_registry!("app", register_all);
/// ```
#[macro_export]
macro_rules! submit_registry {
	($name:expr, $register_all:path) => {
		$crate::inventory::submit! {
			$crate::GeneratedRegistry {
				name: $name,
				register_all: $register_all,
			}
		}
	};
}

/// Runs every submitted routine, returning how many completed.
///
/// A routine that panics is logged and skipped; what it registered before
/// panicking stays in place.
pub(crate) fn run_all(registry: &ParameterRegistry) -> usize {
	let mut found = 0usize;
	let mut completed = 0usize;
	for routine in inventory::iter::<GeneratedRegistry> {
		found += 1;
		match panic::catch_unwind(AssertUnwindSafe(|| (routine.register_all)(registry))) {
			Ok(()) => {
				tracing::debug!(routine = routine.name, "generated registry applied");
				completed += 1;
			}
			Err(_) => {
				tracing::error!(routine = routine.name, "generated registry panicked, falling back to runtime discovery");
			}
		}
	}
	if found == 0 {
		tracing::debug!("no generated registry, members are discovered at registration");
	}
	completed
}
