use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use reelgate_model::MediaKind;
use reelgatectl::app::{App, AppOptions};
use reelgatectl::commands::play::PlayArgs;
use reelgatectl::commands::providers::ProviderDraft;
use reelgatectl::commands::{lookup, play, providers};
use reelgatectl::output::OutputFormat;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "reelgate",
    version,
    about = "Pick a streaming provider and resolve player URLs"
)]
struct Cli {
    /// Config file (default: $REELGATE_CONFIG or the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory holding persisted state
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage streaming providers
    Providers {
        #[command(subcommand)]
        action: ProvidersAction,
    },
    /// Search movies and TV shows
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Show details for a movie or show
    Details {
        #[arg(value_enum)]
        kind: KindArg,
        id: String,
    },
    /// List the episodes of one season
    Season { tv_id: String, number: u32 },
    /// Print the player URL for a title
    Play {
        id: String,
        /// Treat the id as a TV show
        #[arg(long)]
        tv: bool,
        #[arg(long)]
        season: Option<String>,
        #[arg(long)]
        episode: Option<String>,
        /// Resolve with this provider without changing the active one
        #[arg(long)]
        provider: Option<String>,
        /// Look the title up as well
        #[arg(long)]
        info: bool,
    },
}

#[derive(Subcommand)]
enum ProvidersAction {
    /// List providers; the active one is starred
    List,
    /// Show one provider (default: the active one)
    Show { name: Option<String> },
    /// Register a new provider
    Add {
        #[arg(long)]
        name: String,
        /// Movie template, e.g. https://host/embed/{id}
        #[arg(long)]
        url: String,
        /// TV template, e.g. https://host/tv/{id}/{season}/{episode}
        #[arg(long)]
        tv_url: String,
        #[arg(long)]
        logo: Option<String>,
    },
    /// Remove a provider
    Remove { name: String },
    /// Make a provider the active one
    Use { name: String },
    /// Add providers from a JSON file
    Import { file: PathBuf },
    /// Write providers as JSON (default: stdout)
    Export { file: Option<PathBuf> },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Movie,
    Tv,
}

impl From<KindArg> for MediaKind {
    fn from(val: KindArg) -> Self {
        match val {
            KindArg::Movie => MediaKind::Movie,
            KindArg::Tv => MediaKind::Tv,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let mut app = App::open(AppOptions {
        config_path: cli.config,
        data_dir: cli.data_dir,
    })
    .await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = run(&mut app, cli.command, format, &mut out).await;
    app.finish().await;
    result
}

async fn run(
    app: &mut App,
    command: Command,
    format: OutputFormat,
    out: &mut dyn std::io::Write,
) -> Result<()> {
    match command {
        Command::Providers { action } => match action {
            ProvidersAction::List => providers::list(app, format, out),
            ProvidersAction::Show { name } => {
                providers::show(app, name.as_deref(), format, out)
            }
            ProvidersAction::Add {
                name,
                url,
                tv_url,
                logo,
            } => providers::add(
                app,
                ProviderDraft {
                    name,
                    url,
                    tv_url,
                    logo,
                },
                out,
            ),
            ProvidersAction::Remove { name } => providers::remove(app, &name, out),
            ProvidersAction::Use { name } => providers::use_provider(app, &name, out),
            ProvidersAction::Import { file } => providers::import(app, &file, out).await,
            ProvidersAction::Export { file } => {
                providers::export(app, file.as_deref(), out).await
            }
        },
        Command::Search { query } => {
            lookup::search(app, &query.join(" "), format, out).await
        }
        Command::Details { kind, id } => {
            lookup::details(app, kind.into(), &id, format, out).await
        }
        Command::Season { tv_id, number } => {
            lookup::season(app, &tv_id, number, format, out).await
        }
        Command::Play {
            id,
            tv,
            season,
            episode,
            provider,
            info,
        } => {
            let args = PlayArgs {
                id,
                tv,
                season,
                episode,
                provider,
                info,
            };
            play::play(app, args, format, out).await
        }
    }
}
