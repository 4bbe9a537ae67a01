//! On-disk layout of the registry.
//!
//! ```json
//! {
//!   "providers": [ { "name": "...", "logo": "...", "url": "...", "tv_url": "..." } ],
//!   "activeProvider": { "name": "...", "logo": "...", "url": "...", "tv_url": "..." }
//! }
//! ```
//!
//! The active provider is stored as a full copy, but only its name is used
//! when loading.

use reelgate_model::Provider;
use serde::{Deserialize, Serialize};

/// Storage key the registry lives under.
pub const STORAGE_KEY: &str = "stream-storage";

/// Serialized form of a [`Registry`](super::Registry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedRegistry {
    pub providers: Vec<Provider>,
    pub active_provider: Provider,
}
