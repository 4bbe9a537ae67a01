use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

/// The two kinds of content the app can search for and play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MediaKind {
    /// A single feature, addressed by content id alone.
    Movie,
    /// Episodic content, addressed by content id, season and episode.
    Tv,
}

impl MediaKind {
    /// Wire name as used by TMDB (`movie` / `tv`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }

    /// Whether playback of this kind needs a season/episode pair.
    pub const fn is_episodic(&self) -> bool {
        matches!(self, MediaKind::Tv)
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Movie => f.pad("Movie"),
            MediaKind::Tv => f.pad("TV"),
        }
    }
}

/// Parses TMDB `media_type` values.
impl FromStr for MediaKind {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "movie" => Ok(MediaKind::Movie),
            "tv" => Ok(MediaKind::Tv),
            other => Err(ModelError::UnknownMediaKind(other.to_string())),
        }
    }
}
