use crate::media_type::MediaKind;
use crate::provider::Provider;

/// A transient request to play one piece of content through one provider.
///
/// The provider is captured by value when the request is built, so later
/// registry edits do not change where an in-flight request points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackRequest {
    /// Opaque external identifier (a TMDB id in practice).
    pub content_id: String,
    /// Movie or episodic content.
    pub kind: MediaKind,
    /// Season for episodic playback; resolves to `"1"` when absent.
    pub season: Option<String>,
    /// Episode for episodic playback; resolves to `"1"` when absent.
    pub episode: Option<String>,
    /// Snapshot of the provider to resolve against.
    pub provider: Provider,
}

impl PlaybackRequest {
    /// Request playback of a movie.
    pub fn movie(content_id: impl Into<String>, provider: &Provider) -> Self {
        Self {
            content_id: content_id.into(),
            kind: MediaKind::Movie,
            season: None,
            episode: None,
            provider: provider.clone(),
        }
    }

    /// Request playback of one episode of a show.
    pub fn episode(
        content_id: impl Into<String>,
        season: Option<String>,
        episode: Option<String>,
        provider: &Provider,
    ) -> Self {
        Self {
            content_id: content_id.into(),
            kind: MediaKind::Tv,
            season,
            episode,
            provider: provider.clone(),
        }
    }

    /// Whether this request targets episodic content.
    pub fn is_episodic(&self) -> bool {
        self.kind.is_episodic()
    }
}
