use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use reelgate_core::playback::missing_placeholders;
use reelgate_core::registry::{ImportOutcome, parse_import};
use reelgate_core::RegistryError;
use reelgate_model::{MediaKind, Provider};

use crate::app::App;
use crate::output::{OutputFormat, provider_card, provider_rows, write_json, write_lines};

/// Fields for a new provider as typed by the user.
#[derive(Debug, Clone)]
pub struct ProviderDraft {
    pub name: String,
    pub url: String,
    pub tv_url: String,
    pub logo: Option<String>,
}

pub fn list(app: &App, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let registry = app.store.registry();
    match format {
        OutputFormat::Json => write_json(out, registry),
        OutputFormat::Text => write_lines(
            out,
            &provider_rows(registry.providers(), &registry.active().name),
        ),
    }
}

/// Show one provider, the active one when no name is given.
pub fn show(
    app: &App,
    name: Option<&str>,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let registry = app.store.registry();
    let provider = match name {
        Some(name) => registry
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?,
        None => registry.active(),
    };
    match format {
        OutputFormat::Json => write_json(out, provider),
        OutputFormat::Text => write_lines(
            out,
            &provider_card(provider, registry.is_active(&provider.name)),
        ),
    }
}

pub fn add(app: &mut App, draft: ProviderDraft, out: &mut dyn Write) -> Result<()> {
    let mut provider = Provider::new(draft.name, draft.url, draft.tv_url)?;
    if let Some(logo) = draft.logo {
        provider = provider.with_logo(logo);
    }
    warn_missing_placeholders(&provider);

    let name = provider.name.clone();
    app.store.add(provider)?;
    writeln!(out, "added provider '{name}'")?;
    Ok(())
}

pub fn remove(app: &mut App, name: &str, out: &mut dyn Write) -> Result<()> {
    let registry = app.store.remove(name)?;
    writeln!(out, "removed provider '{name}'")?;
    writeln!(out, "active provider: {}", registry.active().name)?;
    Ok(())
}

pub fn use_provider(app: &mut App, name: &str, out: &mut dyn Write) -> Result<()> {
    app.store.set_active(name)?;
    writeln!(out, "active provider: {name}")?;
    Ok(())
}

/// Import providers from a JSON file holding one provider or an array.
pub async fn import(app: &mut App, path: &Path, out: &mut dyn Write) -> Result<()> {
    let document = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let providers = parse_import(&document)
        .with_context(|| format!("{} is not a provider document", path.display()))?;
    for provider in &providers {
        warn_missing_placeholders(provider);
    }

    let report = app.store.import(providers);
    for (name, outcome) in &report.entries {
        match outcome {
            ImportOutcome::Added => writeln!(out, "added    {name}")?,
            ImportOutcome::Rejected(err) => writeln!(out, "skipped  {name}: {err}")?,
            ImportOutcome::Invalid(err) => writeln!(out, "invalid  {name}: {err}")?,
        }
    }
    writeln!(
        out,
        "{} added, {} skipped",
        report.added(),
        report.skipped()
    )?;
    Ok(())
}

/// Write providers as JSON, to stdout when no path is given.
pub async fn export(app: &App, path: Option<&Path>, out: &mut dyn Write) -> Result<()> {
    let document = app.store.registry().export()?;
    match path {
        Some(path) => {
            tokio::fs::write(path, format!("{document}\n"))
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            writeln!(
                out,
                "exported {} providers to {}",
                app.store.registry().len(),
                path.display()
            )?;
        }
        None => writeln!(out, "{document}")?,
    }
    Ok(())
}

fn warn_missing_placeholders(provider: &Provider) {
    for kind in [MediaKind::Movie, MediaKind::Tv] {
        let missing = missing_placeholders(provider.template(kind), kind);
        if !missing.is_empty() {
            let tokens: Vec<String> = missing.iter().map(ToString::to_string).collect();
            eprintln!(
                "warning: {} template of '{}' has no {}",
                kind.as_str(),
                provider.name,
                tokens.join(", ")
            );
        }
    }
}
