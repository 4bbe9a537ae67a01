//! Metadata shapes returned by lookup backends.
//!
//! Field names follow TMDB's JSON so detail payloads deserialize directly.

use crate::media_type::MediaKind;

/// One hit from a multi search, already narrowed to movies and shows.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    pub id: u64,
    pub media_kind: MediaKind,
    pub title: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    /// Release date for movies, first air date for shows (`YYYY-MM-DD`).
    pub release_date: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub vote_average: f32,
}

impl SearchResult {
    /// Year portion of the release date, when it parses.
    pub fn year(&self) -> Option<u16> {
        release_year(self.release_date.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Full movie metadata.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: f32,
    pub runtime: Option<u32>,
    pub genres: Vec<Genre>,
}

/// Per-season summary carried on a show's detail payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SeasonSummary {
    pub id: u64,
    pub name: String,
    pub season_number: u32,
    pub episode_count: u32,
    pub poster_path: Option<String>,
    pub air_date: Option<String>,
}

/// Full show metadata, including the season to episode-count summary.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TvDetails {
    pub id: u64,
    pub name: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: f32,
    pub genres: Vec<Genre>,
    pub number_of_seasons: u32,
    pub seasons: Vec<SeasonSummary>,
}

impl TvDetails {
    /// Episode count for a season number, if the show lists it.
    pub fn episode_count(&self, season_number: u32) -> Option<u32> {
        self.seasons
            .iter()
            .find(|season| season.season_number == season_number)
            .map(|season| season.episode_count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Episode {
    pub id: u64,
    pub name: String,
    pub episode_number: u32,
    pub season_number: u32,
    pub overview: Option<String>,
    pub still_path: Option<String>,
    pub air_date: Option<String>,
    pub runtime: Option<u32>,
}

/// One season with its episode list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SeasonDetails {
    pub id: u64,
    pub name: String,
    pub season_number: u32,
    pub episodes: Vec<Episode>,
    pub poster_path: Option<String>,
    pub air_date: Option<String>,
}

/// Details for either kind of content.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "media_kind", rename_all = "lowercase"))]
pub enum ContentDetails {
    Movie(MovieDetails),
    Tv(TvDetails),
}

impl ContentDetails {
    pub fn kind(&self) -> MediaKind {
        match self {
            ContentDetails::Movie(_) => MediaKind::Movie,
            ContentDetails::Tv(_) => MediaKind::Tv,
        }
    }

    /// Display title (movie title or show name).
    pub fn title(&self) -> &str {
        match self {
            ContentDetails::Movie(movie) => &movie.title,
            ContentDetails::Tv(show) => &show.name,
        }
    }

    pub fn overview(&self) -> Option<&str> {
        match self {
            ContentDetails::Movie(movie) => movie.overview.as_deref(),
            ContentDetails::Tv(show) => show.overview.as_deref(),
        }
        .filter(|overview| !overview.is_empty())
    }

    pub fn poster_path(&self) -> Option<&str> {
        match self {
            ContentDetails::Movie(movie) => movie.poster_path.as_deref(),
            ContentDetails::Tv(show) => show.poster_path.as_deref(),
        }
    }

    pub fn backdrop_path(&self) -> Option<&str> {
        match self {
            ContentDetails::Movie(movie) => movie.backdrop_path.as_deref(),
            ContentDetails::Tv(show) => show.backdrop_path.as_deref(),
        }
    }

    pub fn vote_average(&self) -> f32 {
        match self {
            ContentDetails::Movie(movie) => movie.vote_average,
            ContentDetails::Tv(show) => show.vote_average,
        }
    }

    pub fn year(&self) -> Option<u16> {
        match self {
            ContentDetails::Movie(movie) => {
                release_year(movie.release_date.as_deref())
            }
            ContentDetails::Tv(show) => {
                release_year(show.first_air_date.as_deref())
            }
        }
    }
}

fn release_year(date: Option<&str>) -> Option<u16> {
    date.and_then(|d| d.split('-').next())
        .and_then(|y| y.parse().ok())
}
