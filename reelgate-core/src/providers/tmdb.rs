use async_trait::async_trait;
use reelgate_model::{
    MediaKind, MovieDetails, SearchResult, SeasonDetails, TvDetails,
};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::traits::{LookupError, MetadataProvider};
use crate::config::MetadataConfig;

/// TMDB v3 client.
#[derive(Debug, Clone)]
pub struct TmdbProvider {
    api_key: Option<String>,
    api_base: String,
    image_base: String,
    client: Client,
}

impl TmdbProvider {
    /// A missing key is not an error here; lookups report it instead.
    pub fn from_config(config: &MetadataConfig) -> Result<Self, LookupError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            api_key: config.api_key.clone(),
            api_base: config.api_base.as_str().trim_end_matches('/').to_string(),
            image_base: config
                .image_base
                .as_str()
                .trim_end_matches('/')
                .to_string(),
            client,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, LookupError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(LookupError::ConfigurationMissing)?;

        let url = format!("{}/{}", self.api_base, endpoint);
        tracing::debug!(endpoint, "TMDB request");

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", api_key)])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(LookupError::ConfigurationInvalid);
        }
        if !status.is_success() {
            return Err(LookupError::LookupFailed(format!(
                "TMDB returned {status} for {endpoint}"
            )));
        }

        Ok(response.json().await?)
    }
}

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse {
    #[serde(default)]
    results: Vec<TmdbSearchResult>,
}

#[derive(Debug, Deserialize)]
struct TmdbSearchResult {
    id: u64,
    media_type: Option<String>,
    title: Option<String>,
    name: Option<String>, // TV shows use "name" instead of "title"
    overview: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>, // TV shows
    vote_average: Option<f32>,
}

impl TmdbSearchResult {
    /// `None` for people and anything else that cannot be played.
    fn into_result(self) -> Option<SearchResult> {
        let media_kind: MediaKind = self.media_type.as_deref()?.parse().ok()?;
        let (title, release_date) = match media_kind {
            MediaKind::Movie => (self.title, self.release_date),
            MediaKind::Tv => (self.name, self.first_air_date),
        };

        Some(SearchResult {
            id: self.id,
            media_kind,
            title: title.unwrap_or_default(),
            overview: self.overview.filter(|o| !o.is_empty()),
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            release_date: release_date.filter(|d| !d.is_empty()),
            vote_average: self.vote_average.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl MetadataProvider for TmdbProvider {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, LookupError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let response: TmdbSearchResponse = self
            .get_json("search/multi", &[("query", query), ("include_adult", "false")])
            .await?;
        let total = response.results.len();

        let results: Vec<SearchResult> = response
            .results
            .into_iter()
            .filter_map(TmdbSearchResult::into_result)
            .collect();

        tracing::info!(query, total, kept = results.len(), "TMDB search");
        Ok(results)
    }

    async fn movie_details(&self, id: &str) -> Result<MovieDetails, LookupError> {
        self.get_json(&format!("movie/{id}"), &[]).await
    }

    async fn tv_details(&self, id: &str) -> Result<TvDetails, LookupError> {
        self.get_json(&format!("tv/{id}"), &[]).await
    }

    async fn season_details(
        &self,
        tv_id: &str,
        season_number: u32,
    ) -> Result<SeasonDetails, LookupError> {
        self.get_json(&format!("tv/{tv_id}/season/{season_number}"), &[])
            .await
    }

    fn name(&self) -> &'static str {
        "TMDB"
    }

    fn image_base_url(&self) -> &str {
        &self.image_base
    }
}
