//! Event loop wiring triggers to the reconciler.
//!
//! An [`Engine`] runs on one task and handles one [`EngineEvent`] at a time, so
//! passes never overlap: a pass in flight finishes before the next event is
//! looked at. Triggers arrive through [`EngineHandle`]s:
//!
//! - change notifications restart the debounce timer; the pass runs once the
//!   page has been quiet for [`EngineOptions::debounce`]
//! - [`ControlMessage::Enabled`] runs a pass immediately
//! - [`ControlMessage::Disabled`] restores the page immediately, without a
//!   store round-trip, and drops any pending timer
//!
//! The engine stops once every handle has been dropped.

use std::sync::Arc;
use std::time::Duration;

use focusflow_protocol::ControlMessage;
use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::config::{ConfigStore, Configuration, load_configuration};
use crate::debounce::{DEFAULT_DEBOUNCE, Debouncer};
use crate::document::Document;
use crate::error::{Error, Result};
use crate::reconcile::{PassReport, Reconciler};
use crate::selectors::SelectorSet;

/// Engine tunables.
#[derive(Debug, Clone)]
pub struct EngineOptions {
	/// Quiet period after the last change before a pass runs.
	pub debounce: Duration,
	pub selectors: SelectorSet,
}

impl Default for EngineOptions {
	fn default() -> Self {
		Self {
			debounce: DEFAULT_DEBOUNCE,
			selectors: SelectorSet::youtube(),
		}
	}
}

/// Token for one burst of subtree changes. Only its arrival matters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeBatch {
	/// Number of mutation records the host coalesced into this batch.
	pub records: usize,
}

impl ChangeBatch {
	pub fn new(records: usize) -> Self {
		Self { records }
	}
}

#[derive(Debug)]
enum EngineEvent {
	Changed(ChangeBatch),
	Control(ControlMessage),
	AllowOnce,
	DebounceElapsed(u64),
	Barrier(oneshot::Sender<()>),
}

/// Owns the reconciler and drives it from [`EngineEvent`]s.
pub struct Engine<D: Document> {
	store: Arc<dyn ConfigStore>,
	document: Arc<Mutex<D>>,
	reconciler: Reconciler<D::Node>,
	debouncer: Debouncer,
	events: mpsc::UnboundedReceiver<EngineEvent>,
	timer_events: mpsc::WeakUnboundedSender<EngineEvent>,
	reports: watch::Sender<Option<PassReport>>,
}

impl<D> Engine<D>
where
	D: Document + Send + 'static,
	D::Node: Send,
{
	/// Builds an engine over `document` and the handle used to feed it.
	///
	/// Nothing happens until [`Engine::run`] is awaited (or [`Engine::spawn`]ed).
	pub fn new(store: Arc<dyn ConfigStore>, document: Arc<Mutex<D>>, options: EngineOptions) -> (Self, EngineHandle) {
		let (sender, events) = mpsc::unbounded_channel();
		let (reports, report_rx) = watch::channel(None);
		let engine = Self {
			store,
			document,
			reconciler: Reconciler::new(options.selectors),
			debouncer: Debouncer::new(options.debounce),
			events,
			timer_events: sender.downgrade(),
			reports,
		};
		let handle = EngineHandle {
			sender,
			reports: report_rx,
		};
		(engine, handle)
	}

	pub fn spawn(self) -> JoinHandle<()> {
		tokio::spawn(self.run())
	}

	/// Runs the startup check, then handles events until every handle is gone.
	pub async fn run(mut self) {
		self.startup().await;

		while let Some(event) = self.events.recv().await {
			self.handle(event).await;
		}

		self.debouncer.cancel();
		debug!(target = "focusflow.engine", "engine stopped");
	}

	async fn startup(&mut self) {
		match load_configuration(self.store.as_ref()).await {
			Ok(config) if config.focus_mode_enabled => {
				info!(target = "focusflow.engine", block_shorts = config.block_shorts, "focus mode on at startup");
				self.apply(&config);
			}
			Ok(_) => debug!(target = "focusflow.engine", "focus mode off at startup"),
			Err(err) => warn!(target = "focusflow.engine", error = %err, "startup check skipped"),
		}
	}

	async fn handle(&mut self, event: EngineEvent) {
		match event {
			EngineEvent::Changed(batch) => {
				trace!(target = "focusflow.engine", records = batch.records, "subtree changed");
				let events = self.timer_events.clone();
				self.debouncer.schedule(move |generation| {
					if let Some(events) = events.upgrade() {
						let _ = events.send(EngineEvent::DebounceElapsed(generation));
					}
				});
			}
			EngineEvent::DebounceElapsed(generation) => {
				if self.debouncer.complete(generation) {
					self.run_pass().await;
				} else {
					trace!(target = "focusflow.engine", generation, "stale debounce timer ignored");
				}
			}
			EngineEvent::Control(ControlMessage::Enabled) => {
				debug!(target = "focusflow.engine", "focus mode enabled");
				self.run_pass().await;
			}
			EngineEvent::Control(ControlMessage::Disabled) => {
				debug!(target = "focusflow.engine", "focus mode disabled");
				self.debouncer.cancel();
				let report = self.reconciler.restore_all(&mut *self.document.lock());
				self.reports.send_replace(Some(report));
			}
			EngineEvent::AllowOnce => {
				let allowed = self.reconciler.allow_once(&mut *self.document.lock());
				debug!(target = "focusflow.engine", allowed, "allow once");
			}
			EngineEvent::Barrier(done) => {
				let _ = done.send(());
			}
		}
	}

	/// One full pass. Failures are logged and leave the page as it was.
	async fn run_pass(&mut self) {
		match load_configuration(self.store.as_ref()).await {
			Ok(config) => self.apply(&config),
			Err(err) => warn!(target = "focusflow.engine", error = %err, "pass aborted"),
		}
	}

	fn apply(&mut self, config: &Configuration) {
		let report = self.reconciler.apply(config, &mut *self.document.lock());
		self.reports.send_replace(Some(report));
	}
}

/// Cloneable entry point into a running [`Engine`].
#[derive(Debug, Clone)]
pub struct EngineHandle {
	sender: mpsc::UnboundedSender<EngineEvent>,
	reports: watch::Receiver<Option<PassReport>>,
}

impl EngineHandle {
	/// Reports a burst of subtree changes.
	pub fn notify_changed(&self, batch: ChangeBatch) -> Result<()> {
		self.post(EngineEvent::Changed(batch))
	}

	pub fn send(&self, message: ControlMessage) -> Result<()> {
		self.post(EngineEvent::Control(message))
	}

	/// Parses and delivers a raw control message as received from a host.
	pub fn send_raw(&self, raw: &str) -> Result<()> {
		let message = ControlMessage::from_json(raw)?;
		self.send(message)
	}

	/// The overlay's "allow once" action.
	pub fn allow_once(&self) -> Result<()> {
		self.post(EngineEvent::AllowOnce)
	}

	/// A subscription whose callback the host invokes on every change batch.
	pub fn subscribe(&self) -> ChangeSubscription {
		ChangeSubscription { handle: self.clone() }
	}

	/// Waits until every event sent before this call has been handled.
	pub async fn sync(&self) -> Result<()> {
		let (done, wait) = oneshot::channel();
		self.post(EngineEvent::Barrier(done))?;
		wait.await.map_err(|_| Error::ChannelClosed)
	}

	/// Summary of the most recent pass or restore.
	pub fn last_report(&self) -> Option<PassReport> {
		self.reports.borrow().clone()
	}

	fn post(&self, event: EngineEvent) -> Result<()> {
		self.sender.send(event).map_err(|_| Error::ChannelClosed)
	}
}

/// Change-notification subscription handed to the host's observer.
#[derive(Debug, Clone)]
pub struct ChangeSubscription {
	handle: EngineHandle,
}

impl ChangeSubscription {
	/// Observer callback. Errors only once the engine has stopped.
	pub fn notify(&self, batch: ChangeBatch) -> Result<()> {
		self.handle.notify_changed(batch)
	}

	/// Boxed form of [`ChangeSubscription::notify`] for callback-style hosts.
	pub fn callback(self) -> impl Fn(ChangeBatch) + Send + Sync + 'static {
		move |batch| {
			if let Err(err) = self.notify(batch) {
				trace!(target = "focusflow.engine", error = %err, "change dropped");
			}
		}
	}
}
