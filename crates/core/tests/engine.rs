//! End-to-end engine tests over the in-memory document and store.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use focusflow::config::ConfigStore;
use focusflow::overlay::{OVERLAY_ELEMENT_ID, SHORTS_BLOCK_REASON};
use focusflow::{
	ChangeBatch, Configuration, ControlMessage, DetailOutcome, Document, ElementSnapshot, Engine, EngineHandle, EngineOptions, MemoryDocument,
	MemoryStore, PassMode, Result,
};
use focusflow_protocol::{BLOCK_SHORTS_KEY, FOCUS_MODE_KEY};
use parking_lot::Mutex;
use serde_json::{Map, Value, json};

const DEBOUNCE: Duration = Duration::from_millis(200);

/// Counts configuration reads, i.e. passes that reached the store.
struct CountingStore {
	inner: MemoryStore,
	reads: AtomicUsize,
}

impl CountingStore {
	fn new(inner: MemoryStore) -> Self {
		Self {
			inner,
			reads: AtomicUsize::new(0),
		}
	}

	fn reads(&self) -> usize {
		self.reads.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl ConfigStore for CountingStore {
	async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
		self.reads.fetch_add(1, Ordering::SeqCst);
		self.inner.get(keys).await
	}

	async fn set(&self, entries: Map<String, Value>) -> Result<()> {
		self.inner.set(entries).await
	}

	async fn remove(&self, keys: &[&str]) -> Result<()> {
		self.inner.remove(keys).await
	}
}

fn listing(title: &str, channel: &str, href: &str) -> ElementSnapshot {
	ElementSnapshot::new("ytd-rich-item-renderer")
		.child(ElementSnapshot::new("a").attr("id", "thumbnail").attr("href", href))
		.child(ElementSnapshot::new("a").attr("id", "video-title").text(title))
		.child(ElementSnapshot::new("ytd-channel-name").text(channel))
}

fn start(store: Arc<dyn ConfigStore>, doc: MemoryDocument) -> (Arc<Mutex<MemoryDocument>>, EngineHandle) {
	let _ = tracing_subscriber::fmt().with_test_writer().with_env_filter("focusflow=debug").try_init();
	let document = Arc::new(Mutex::new(doc));
	let options = EngineOptions {
		debounce: DEBOUNCE,
		..Default::default()
	};
	let (engine, handle) = Engine::new(store, document.clone(), options);
	engine.spawn();
	(document, handle)
}

fn focused() -> Configuration {
	Configuration {
		focus_mode_enabled: true,
		..Default::default()
	}
}

#[tokio::test]
async fn change_bursts_collapse_into_one_pass() {
	let store = Arc::new(CountingStore::new(MemoryStore::with_configuration(&focused())));
	let (document, handle) = start(store.clone(), MemoryDocument::new("/"));
	handle.sync().await.unwrap();
	assert_eq!(store.reads(), 1, "startup check");

	let subscription = handle.subscribe();
	let root = document.lock().root();
	let mut added = Vec::new();
	for i in 0..5 {
		added.push(document.lock().append(root, listing(&format!("Funny clip number {i}"), "", &format!("/watch?v=f{i}"))));
		subscription.notify(ChangeBatch::new(1)).unwrap();
		tokio::time::sleep(DEBOUNCE / 20).await;
	}
	handle.sync().await.unwrap();
	assert_eq!(store.reads(), 1, "no pass before the page goes quiet");

	tokio::time::sleep(DEBOUNCE * 3).await;
	handle.sync().await.unwrap();
	assert_eq!(store.reads(), 2);

	let doc = document.lock();
	assert!(added.iter().all(|node| doc.is_hidden(node)));
}

#[tokio::test]
async fn callback_subscription_triggers_passes() {
	let store = Arc::new(MemoryStore::with_configuration(&focused()));
	let (document, handle) = start(store, MemoryDocument::new("/"));
	handle.sync().await.unwrap();

	let notify = handle.subscribe().callback();
	let root = document.lock().root();
	let node = document.lock().append(root, listing("Reaction to reaction videos", "", "/watch?v=r"));
	notify(ChangeBatch::new(3));

	tokio::time::sleep(DEBOUNCE * 3).await;
	handle.sync().await.unwrap();
	assert!(document.lock().is_hidden(&node));
}

#[tokio::test]
async fn disabling_cancels_pending_pass_and_restores() {
	let store = Arc::new(CountingStore::new(MemoryStore::with_configuration(&focused())));
	let mut doc = MemoryDocument::new("/");
	let root = doc.root();
	let prank = doc.append(root, listing("Prank on my roommate", "", "/watch?v=p"));
	let (document, handle) = start(store.clone(), doc);
	handle.sync().await.unwrap();
	assert!(document.lock().is_hidden(&prank));

	handle.notify_changed(ChangeBatch::default()).unwrap();
	store.inner.insert(FOCUS_MODE_KEY, json!(false));
	handle.send(ControlMessage::Disabled).unwrap();
	handle.sync().await.unwrap();

	assert!(!document.lock().is_hidden(&prank));
	assert_eq!(handle.last_report().map(|report| report.mode), Some(PassMode::Restore));

	tokio::time::sleep(DEBOUNCE * 3).await;
	handle.sync().await.unwrap();
	assert_eq!(store.reads(), 1, "cancelled timer never reached the store");
}

#[tokio::test]
async fn store_failure_leaves_page_untouched() {
	let store = Arc::new(MemoryStore::with_configuration(&focused()));
	let mut doc = MemoryDocument::new("/");
	let root = doc.root();
	let prank = doc.append(root, listing("Prank on my roommate", "", "/watch?v=p"));
	let (document, handle) = start(store.clone(), doc);
	handle.sync().await.unwrap();
	assert!(document.lock().is_hidden(&prank));

	let lecture = document.lock().append(root, listing("Organic chemistry lecture", "", "/watch?v=l"));
	let song = document.lock().append(root, listing("Top song of the summer", "", "/watch?v=s"));
	store.set_unavailable(true);
	handle.send(ControlMessage::Enabled).unwrap();
	handle.sync().await.unwrap();

	{
		let doc = document.lock();
		assert!(doc.is_hidden(&prank));
		assert!(!doc.is_hidden(&song), "aborted pass made no changes");
		assert!(!doc.is_hidden(&lecture));
	}

	store.set_unavailable(false);
	handle.send(ControlMessage::Enabled).unwrap();
	handle.sync().await.unwrap();
	assert!(document.lock().is_hidden(&song));
}

#[tokio::test]
async fn blocked_short_form_view_end_to_end() {
	let store = Arc::new(MemoryStore::with_configuration(&Configuration {
		focus_mode_enabled: true,
		block_shorts: true,
		..Default::default()
	}));
	let mut doc = MemoryDocument::new("/shorts/abc123");
	let root = doc.root();
	doc.append(root, ElementSnapshot::new("video"));
	doc.append(
		root,
		ElementSnapshot::new("h1")
			.attr("class", "title")
			.child(ElementSnapshot::new("yt-formatted-string").text("Dance challenge!!")),
	);
	let (document, handle) = start(store, doc);
	handle.sync().await.unwrap();

	{
		let doc = document.lock();
		assert_eq!(doc.media_paused(), Some(true));
		assert_eq!(doc.overlay_reason(OVERLAY_ELEMENT_ID).as_deref(), Some(SHORTS_BLOCK_REASON));
	}
	assert_eq!(handle.last_report().map(|report| report.detail), Some(DetailOutcome::ShortsBlocked));

	handle.allow_once().unwrap();
	handle.sync().await.unwrap();
	let doc = document.lock();
	assert_eq!(doc.media_paused(), Some(false));
	assert!(!doc.has_overlay(OVERLAY_ELEMENT_ID));
}

#[tokio::test]
async fn toggling_block_shorts_rechecks_feed() {
	let inner = MemoryStore::with_configuration(&focused());
	let store = Arc::new(inner);
	let mut doc = MemoryDocument::new("/");
	let root = doc.root();
	let short = doc.append(root, listing("Calculus in 60 seconds", "", "/shorts/c60"));
	let (document, handle) = start(store.clone(), doc);
	handle.sync().await.unwrap();
	assert!(!document.lock().is_hidden(&short));

	store.insert(BLOCK_SHORTS_KEY, json!(true));
	handle.send(ControlMessage::Enabled).unwrap();
	handle.sync().await.unwrap();
	assert!(document.lock().is_hidden(&short));

	store.insert(BLOCK_SHORTS_KEY, json!(false));
	handle.send(ControlMessage::Enabled).unwrap();
	handle.sync().await.unwrap();
	assert!(!document.lock().is_hidden(&short));
}
