//! Rendering helpers shared by the commands.

use std::io::Write;

use anyhow::Result;
use reelgate_model::{ContentDetails, Provider, SearchResult, SeasonDetails};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// `* name  template` with the active provider starred.
pub fn provider_rows(providers: &[Provider], active: &str) -> Vec<String> {
    let width = providers.iter().map(|p| p.name.len()).max().unwrap_or(0);
    providers
        .iter()
        .map(|p| {
            let marker = if p.name == active { '*' } else { ' ' };
            format!("{marker} {:<width$}  {}", p.name, p.url)
        })
        .collect()
}

pub fn provider_card(provider: &Provider, active: bool) -> Vec<String> {
    let mut lines = vec![if active {
        format!("name:  {} (active)", provider.name)
    } else {
        format!("name:  {}", provider.name)
    }];
    if let Some(logo) = &provider.logo {
        lines.push(format!("logo:  {logo}"));
    }
    lines.push(format!("movie: {}", provider.url));
    lines.push(format!("tv:    {}", provider.tv_url));
    lines
}

pub fn search_row(result: &SearchResult) -> String {
    let year = result
        .year()
        .map(|y| format!(" ({y})"))
        .unwrap_or_default();
    format!(
        "{:>8}  {:<5}  {}{}",
        result.id, result.media_kind, result.title, year
    )
}

pub fn details_card(
    details: &ContentDetails,
    poster: Option<String>,
    backdrop: Option<String>,
) -> Vec<String> {
    let mut lines = Vec::new();
    match details.year() {
        Some(year) => lines.push(format!("{} ({year})", details.title())),
        None => lines.push(details.title().to_string()),
    }
    lines.push(format!(
        "{}  rating {:.1}",
        details.kind(),
        details.vote_average()
    ));

    match details {
        ContentDetails::Movie(movie) => {
            if let Some(runtime) = movie.runtime.filter(|r| *r > 0) {
                lines.push(format!("runtime: {runtime}m"));
            }
            push_genres(&mut lines, movie.genres.iter().map(|g| g.name.as_str()));
        }
        ContentDetails::Tv(show) => {
            push_genres(&mut lines, show.genres.iter().map(|g| g.name.as_str()));
            lines.push(format!("seasons: {}", show.number_of_seasons));
            for season in &show.seasons {
                lines.push(format!(
                    "  {:>2}  {}  ({} episodes)",
                    season.season_number, season.name, season.episode_count
                ));
            }
        }
    }

    if let Some(poster) = poster {
        lines.push(format!("poster: {poster}"));
    }
    if let Some(backdrop) = backdrop {
        lines.push(format!("backdrop: {backdrop}"));
    }
    if let Some(overview) = details.overview() {
        lines.push(String::new());
        lines.push(overview.to_string());
    }
    lines
}

fn push_genres<'a>(lines: &mut Vec<String>, genres: impl Iterator<Item = &'a str>) {
    let genres: Vec<&str> = genres.collect();
    if !genres.is_empty() {
        lines.push(format!("genres: {}", genres.join(", ")));
    }
}

pub fn season_listing(season: &SeasonDetails) -> Vec<String> {
    let mut lines = vec![format!("Season {}: {}", season.season_number, season.name)];
    for episode in &season.episodes {
        let runtime = episode
            .runtime
            .map(|r| format!(" ({r}m)"))
            .unwrap_or_default();
        lines.push(format!(
            "  E{:02}  {}{}",
            episode.episode_number, episode.name, runtime
        ));
    }
    lines
}

pub fn write_lines(out: &mut dyn Write, lines: &[String]) -> Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
