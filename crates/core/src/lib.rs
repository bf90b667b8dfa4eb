//! FocusFlow filtering engine.
//!
//! Classifies video listings as educational or not, hides the rest, and blocks
//! playback of disallowed single-item views behind an overlay. The engine works
//! against any host tree implementing [`Document`]; [`MemoryDocument`] is the
//! in-process implementation used by the CLI and tests.

pub mod classify;
pub mod config;
pub mod debounce;
pub mod document;
pub mod dom;
pub mod engine;
pub mod error;
pub mod extract;
pub mod overlay;
pub mod reconcile;
pub mod selectors;

pub use classify::{Verdict, classify, explain};
pub use config::{ConfigStore, Configuration, EffectiveLists, MemoryStore, load_configuration, parse_list, save_configuration};
pub use document::{Document, NavigationContext};
pub use dom::{ElementSnapshot, MemoryDocument, NodeId, PageSnapshot};
pub use engine::{ChangeBatch, ChangeSubscription, Engine, EngineHandle, EngineOptions};
pub use error::{Error, Result};
pub use focusflow_protocol::ControlMessage;
pub use overlay::{Overlay, OverlayState};
pub use reconcile::{DetailOutcome, ItemOutcome, PassMode, PassReport, Reconciler};
pub use selectors::{ListingCategory, SelectorSet};
