use std::io::Write;

use anyhow::Result;
use reelgate_core::RegistryError;
use reelgate_core::playback::{DEFAULT_EPISODE, DEFAULT_SEASON, resolve};
use reelgate_model::{MediaKind, PlaybackRequest};
use serde_json::json;

use crate::app::App;
use crate::output::OutputFormat;

#[derive(Debug, Clone, Default)]
pub struct PlayArgs {
    pub id: String,
    pub tv: bool,
    pub season: Option<String>,
    pub episode: Option<String>,
    /// Resolve against this provider instead of the active one.
    pub provider: Option<String>,
    /// Also look the title up.
    pub info: bool,
}

impl PlayArgs {
    /// A season or episode implies an episodic request.
    pub fn is_episodic(&self) -> bool {
        self.tv || self.season.is_some() || self.episode.is_some()
    }
}

/// Print the player URL for a title.
pub async fn play(
    app: &App,
    args: PlayArgs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let registry = app.store.registry();
    let provider = match args.provider.as_deref() {
        Some(name) => registry
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?,
        None => registry.active(),
    };

    let kind = if args.is_episodic() {
        MediaKind::Tv
    } else {
        MediaKind::Movie
    };
    let request = match kind {
        MediaKind::Movie => PlaybackRequest::movie(&args.id, provider),
        MediaKind::Tv => PlaybackRequest::episode(
            &args.id,
            args.season.clone(),
            args.episode.clone(),
            provider,
        ),
    };
    let url = resolve(&request);

    let title = if args.info {
        match app.metadata.details(&args.id, kind).await {
            Ok(details) => Some(details.title().to_string()),
            Err(err) => {
                eprintln!("warning: could not look up {kind} {}: {err}", args.id);
                None
            }
        }
    } else {
        None
    };

    match format {
        OutputFormat::Json => {
            let value = json!({
                "url": url,
                "provider": request.provider.name,
                "media_kind": kind,
                "title": title,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        }
        OutputFormat::Text => {
            if let Some(title) = title {
                match kind {
                    MediaKind::Movie => writeln!(out, "{title}")?,
                    MediaKind::Tv => writeln!(
                        out,
                        "{title} S{}E{}",
                        request.season.as_deref().unwrap_or(DEFAULT_SEASON),
                        request.episode.as_deref().unwrap_or(DEFAULT_EPISODE)
                    )?,
                }
            }
            writeln!(out, "{url}")?;
        }
    }
    Ok(())
}
