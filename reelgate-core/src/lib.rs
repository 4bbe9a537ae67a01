//! Core library for reelgate.
//!
//! - [`registry`]: the immutable provider [`Registry`] value and its
//!   persisted layout.
//! - [`store`]: [`ProviderStore`], which owns the registry and writes every
//!   accepted change to a [`storage::KeyValueStore`] in the background.
//! - [`playback`]: placeholder substitution that turns a
//!   [`PlaybackRequest`](reelgate_model::PlaybackRequest) into a player URL.
//! - [`providers`]: metadata lookup behind [`MetadataProvider`], with a TMDB
//!   implementation.
//! - [`config`]: layered runtime configuration.
#![allow(missing_docs)]

pub mod config;
pub mod playback;
pub mod providers;
pub mod registry;
pub mod storage;
pub mod store;

pub use config::{AppConfig, ConfigError, ConfigLoader, MetadataConfig};
pub use playback::resolve;
pub use providers::{LookupError, MetadataProvider, TmdbProvider};
pub use registry::{Registry, RegistryError};
pub use store::ProviderStore;
