use std::io::Write;

use anyhow::Result;
use reelgate_model::MediaKind;

use crate::app::App;
use crate::output::{
    OutputFormat, details_card, search_row, season_listing, write_json, write_lines,
};

pub async fn search(
    app: &App,
    query: &str,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let results = app.metadata.search(query).await?;
    match format {
        OutputFormat::Json => write_json(out, &results),
        OutputFormat::Text if results.is_empty() => {
            writeln!(out, "no results")?;
            Ok(())
        }
        OutputFormat::Text => {
            let rows: Vec<String> = results.iter().map(search_row).collect();
            write_lines(out, &rows)
        }
    }
}

pub async fn details(
    app: &App,
    kind: MediaKind,
    id: &str,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let details = app.metadata.details(id, kind).await?;
    match format {
        OutputFormat::Json => write_json(out, &details),
        OutputFormat::Text => {
            let poster = app.metadata.poster_url(details.poster_path());
            let backdrop = app.metadata.image_url(details.backdrop_path());
            write_lines(out, &details_card(&details, poster, backdrop))
        }
    }
}

pub async fn season(
    app: &App,
    tv_id: &str,
    number: u32,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let season = app.metadata.season_details(tv_id, number).await?;
    match format {
        OutputFormat::Json => write_json(out, &season),
        OutputFormat::Text => write_lines(out, &season_listing(&season)),
    }
}
