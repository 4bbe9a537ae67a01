//! Core data model definitions shared across reelgate crates.
//!
//! Everything here is plain data: streaming [`Provider`] templates, the
//! transient [`PlaybackRequest`] handed to the resolver, and the metadata
//! shapes returned by lookup backends. Serialization derives are gated
//! behind the `serde` feature.
#![allow(missing_docs)]

pub mod error;
pub mod image;
pub mod media_type;
pub mod metadata;
pub mod playback;
pub mod provider;

// Intentionally curated re-exports for downstream consumers.
pub use error::{ModelError, Result as ModelResult};
pub use image::ImageSize;
pub use media_type::MediaKind;
pub use metadata::{
    ContentDetails, Episode, Genre, MovieDetails, SearchResult, SeasonDetails,
    SeasonSummary, TvDetails,
};
pub use playback::PlaybackRequest;
pub use provider::Provider;
