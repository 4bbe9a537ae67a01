use async_trait::async_trait;
use reelgate_model::{
    ContentDetails, ImageSize, MediaKind, MovieDetails, SearchResult,
    SeasonDetails, TvDetails,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error(
        "metadata API key is not configured; set TMDB_API_KEY or tmdb_api_key in the config file"
    )]
    ConfigurationMissing,

    #[error("metadata API rejected the configured key")]
    ConfigurationInvalid,

    #[error("metadata lookup failed: {0}")]
    LookupFailed(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key.
        LookupError::LookupFailed(err.without_url().to_string())
    }
}

#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Search movies and shows. Blank queries yield no results.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, LookupError>;

    async fn movie_details(&self, id: &str) -> Result<MovieDetails, LookupError>;

    async fn tv_details(&self, id: &str) -> Result<TvDetails, LookupError>;

    async fn season_details(
        &self,
        tv_id: &str,
        season_number: u32,
    ) -> Result<SeasonDetails, LookupError>;

    /// Details for either kind of content.
    async fn details(
        &self,
        id: &str,
        kind: MediaKind,
    ) -> Result<ContentDetails, LookupError> {
        match kind {
            MediaKind::Movie => self.movie_details(id).await.map(ContentDetails::Movie),
            MediaKind::Tv => self.tv_details(id).await.map(ContentDetails::Tv),
        }
    }

    /// Get the provider name
    fn name(&self) -> &'static str;

    /// Get the base URL for images
    fn image_base_url(&self) -> &str;

    /// Absolute URL for an image path at the given size.
    fn sized_image_url(&self, path: Option<&str>, size: ImageSize) -> Option<String> {
        let path = path.filter(|p| !p.is_empty())?;
        let base = self.image_base_url().trim_end_matches('/');
        let sep = if path.starts_with('/') { "" } else { "/" };
        Some(format!("{base}/{size}{sep}{path}"))
    }

    /// Backdrop and still images (w500).
    fn image_url(&self, path: Option<&str>) -> Option<String> {
        self.sized_image_url(path, ImageSize::W500)
    }

    /// Poster thumbnails (w300).
    fn poster_url(&self, path: Option<&str>) -> Option<String> {
        self.sized_image_url(path, ImageSize::W300)
    }
}
