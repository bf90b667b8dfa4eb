//! Trailing-edge debouncing of change notifications.
//!
//! Every [`Debouncer::schedule`] call restarts the timer; only the last call in
//! a burst fires. The firing closure receives the generation it was scheduled
//! under so the receiver can discard a timer that lost a race with a newer
//! schedule or a cancel.

use std::time::Duration;

use tokio::task::JoinHandle;

/// Quiet period after the last change before a pass runs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(350);

#[derive(Debug)]
pub struct Debouncer {
	delay: Duration,
	pending: Option<JoinHandle<()>>,
	generation: u64,
}

impl Debouncer {
	pub fn new(delay: Duration) -> Self {
		Self {
			delay,
			pending: None,
			generation: 0,
		}
	}

	pub fn delay(&self) -> Duration {
		self.delay
	}

	/// (Re)starts the timer. Any earlier pending timer is dropped unfired.
	///
	/// Must be called from within a tokio runtime.
	pub fn schedule<F>(&mut self, fire: F) -> u64
	where
		F: FnOnce(u64) + Send + 'static,
	{
		self.cancel();
		let generation = self.generation;
		let delay = self.delay;
		self.pending = Some(tokio::spawn(async move {
			tokio::time::sleep(delay).await;
			fire(generation);
		}));
		generation
	}

	/// Drops the pending timer, if any.
	pub fn cancel(&mut self) {
		if let Some(handle) = self.pending.take() {
			handle.abort();
		}
		self.generation = self.generation.wrapping_add(1);
	}

	pub fn is_pending(&self) -> bool {
		self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
	}

	/// Accepts a fired timer. Returns `false` for a stale generation.
	pub fn complete(&mut self, generation: u64) -> bool {
		if self.pending.is_none() || generation != self.generation {
			return false;
		}
		self.pending = None;
		self.generation = self.generation.wrapping_add(1);
		true
	}
}

impl Default for Debouncer {
	fn default() -> Self {
		Self::new(DEFAULT_DEBOUNCE)
	}
}

impl Drop for Debouncer {
	fn drop(&mut self) {
		if let Some(handle) = self.pending.take() {
			handle.abort();
		}
	}
}
