//! Wire types shared between FocusFlow hosts and the filtering engine.
//!
//! This crate contains the serde-serializable shapes that cross the boundary
//! between the engine and its host: the keys and values kept in the
//! persistent settings store, and the control messages a settings surface
//! broadcasts to open pages.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond serialization/deserialization
//! * 1:1 with storage: Field names are the persisted key names
//! * Stable: Changes only when the stored or broadcast format changes
//!
//! Behavior built on these types lives in `focusflow-rs`.

pub mod keys;
pub mod message;
pub mod settings;

pub use keys::*;
pub use message::*;
pub use settings::*;
