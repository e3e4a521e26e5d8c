//! Observable cell holding an immutable record.
//!
//! The host owns [`StateCell`]s and pushes natural values through
//! [`StateCell::set`]. Once the registry attaches an override map, every
//! natural value is rebuilt with the overrides before subscribers see it.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::error::ReconstructError;
use crate::model::Value;
use crate::record::{Overrides, Record, reconstruct};

/// Override map shared between the registry and an attached cell.
pub type OverrideMap = Arc<Mutex<Overrides>>;

struct CellState<R> {
	/// Last value pushed by the host, before overrides.
	natural: Arc<R>,
	overrides: Option<OverrideMap>,
}

struct Inner<R> {
	state: Mutex<CellState<R>>,
	tx: watch::Sender<Arc<R>>,
}

/// Cloneable handle to a reactive record container.
pub struct StateCell<R> {
	inner: Arc<Inner<R>>,
}

impl<R> Clone for StateCell<R> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<R: core::fmt::Debug> core::fmt::Debug for StateCell<R> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("StateCell")
			.field("value", &*self.inner.tx.borrow())
			.finish()
	}
}

impl<R: Record + Default> Default for StateCell<R> {
	fn default() -> Self {
		Self::new(R::default())
	}
}

impl<R: Record> StateCell<R> {
	pub fn new(value: R) -> Self {
		let value = Arc::new(value);
		let (tx, _) = watch::channel(Arc::clone(&value));
		Self {
			inner: Arc::new(Inner {
				state: Mutex::new(CellState {
					natural: value,
					overrides: None,
				}),
				tx,
			}),
		}
	}

	/// Value currently visible to subscribers.
	pub fn get(&self) -> Arc<R> {
		Arc::clone(&self.inner.tx.borrow())
	}

	/// Last value pushed by the host, without overrides.
	pub fn natural(&self) -> Arc<R> {
		Arc::clone(&self.inner.state.lock().natural)
	}

	/// Pushes a new natural value.
	///
	/// Attached overrides are applied on top. If that fails the natural
	/// value is published as is.
	pub fn set(&self, value: R) {
		let mut state = self.inner.state.lock();
		state.natural = Arc::new(value);
		let visible = match state.overrides.as_ref() {
			Some(overrides) => {
				let overrides = overrides.lock();
				if overrides.is_empty() {
					Arc::clone(&state.natural)
				} else {
					match reconstruct(&*state.natural, &overrides) {
						Ok(next) => Arc::new(next),
						Err(error) => {
							tracing::warn!(%error, "overrides not applied to new state");
							Arc::clone(&state.natural)
						}
					}
				}
			}
			None => Arc::clone(&state.natural),
		};
		self.inner.tx.send_replace(visible);
	}

	/// Derives the next natural value from the current one.
	pub fn update(&self, f: impl FnOnce(&R) -> R) {
		let next = f(&self.natural());
		self.set(next);
	}

	/// Receiver notified on every publish.
	pub fn subscribe(&self) -> watch::Receiver<Arc<R>> {
		self.inner.tx.subscribe()
	}

	pub(crate) fn attach(&self, overrides: OverrideMap) {
		self.inner.state.lock().overrides = Some(overrides);
	}

	pub(crate) fn detach(&self) {
		self.inner.state.lock().overrides = None;
	}

	/// Rebuilds the natural value with the attached overrides and publishes
	/// it. On failure the visible value is left unchanged.
	pub(crate) fn reapply(&self) -> Result<(), ReconstructError> {
		let state = self.inner.state.lock();
		let next = match state.overrides.as_ref() {
			Some(overrides) => reconstruct(&*state.natural, &overrides.lock())?,
			None => R::clone(&state.natural),
		};
		self.inner.tx.send_replace(Arc::new(next));
		Ok(())
	}
}

/// Type-erased view of a [`StateCell`] used by discovery and the registry.
pub(crate) trait StateHolder: Send + Sync {
	/// Simple name of the held record, `"Unknown"` when empty.
	fn record_name(&self) -> String;

	fn declares(&self, field: &str) -> bool;

	/// Field of the currently visible record.
	fn read_field(&self, field: &str) -> Option<Value>;

	fn attach(&self, overrides: OverrideMap);

	fn detach(&self);

	fn reapply(&self) -> Result<(), ReconstructError>;
}

impl<R: Record> StateHolder for StateCell<R> {
	fn record_name(&self) -> String {
		self.get().record_name().unwrap_or("Unknown").to_string()
	}

	fn declares(&self, field: &str) -> bool {
		R::FIELDS.contains(&field)
	}

	fn read_field(&self, field: &str) -> Option<Value> {
		self.get().field(field)
	}

	fn attach(&self, overrides: OverrideMap) {
		StateCell::attach(self, overrides);
	}

	fn detach(&self) {
		StateCell::detach(self);
	}

	fn reapply(&self) -> Result<(), ReconstructError> {
		StateCell::reapply(self)
	}
}

#[cfg(test)]
mod tests;
