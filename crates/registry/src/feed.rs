use std::sync::Arc;

use tokio::sync::watch;

/// Multi-subscriber broadcast of the latest snapshot.
///
/// Every [`Feed::publish`] is one new version for every receiver; a
/// receiver that falls behind sees only the newest snapshot.
pub struct Feed<T> {
	tx: watch::Sender<Arc<T>>,
}

impl<T: Default> Default for Feed<T> {
	fn default() -> Self {
		Self::new(T::default())
	}
}

impl<T> Feed<T> {
	pub fn new(initial: T) -> Self {
		let (tx, _) = watch::channel(Arc::new(initial));
		Self { tx }
	}

	pub fn publish(&self, snapshot: T) {
		self.tx.send_replace(Arc::new(snapshot));
	}

	pub fn subscribe(&self) -> watch::Receiver<Arc<T>> {
		self.tx.subscribe()
	}
}
