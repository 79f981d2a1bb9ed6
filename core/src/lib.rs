//! Core library for ScrapBuddy's native key broker.
//!
//! The UI never holds API keys itself; it asks this crate for them over a
//! small request/response channel.
//! - [`keys`] enumerates the keys that can be requested.
//! - [`config`] loads configuration sources into immutable snapshots.
//! - [`broker`] answers lookups against those snapshots.
//! - [`api`] exposes the channel the UI invokes.
//! - [`db`] and [`credentials`] manage the local SQLite credential store.
//! - [`errors`] keeps the error catalogue with human friendly metadata.
//! - [`logging`] writes audit events and value fingerprints.

pub mod api;
pub mod broker;
pub mod config;
pub mod credentials;
pub mod db;
pub mod errors;
pub mod keys;
pub mod logging;

pub use broker::{KeyBroker, KeyStatus};
pub use config::{ConfigProvider, Layered, Sources, StaticConfig};
pub use errors::KeyError;
pub use keys::KeyName;
