use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "malsori")]
#[command(about = "Korean dictionary pronunciation audio fetcher")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long, global = true)]
    utc: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the dictionary and download pronunciation audio for each target word
    Fetch {
        /// Word list file, one target word per line
        #[arg(short, long, default_value = "targets.txt")]
        targets: PathBuf,

        /// Directory audio files are written to
        #[arg(short = 'O', long, default_value = ".")]
        output_dir: PathBuf,

        /// Dictionary search endpoint to query
        #[arg(long, default_value = malsori_fetch::client::NAVER_SEARCH_URL)]
        endpoint: String,
    },

    /// Keep one audio file per word: `<word>1.mp3` loses its suffix, higher variants are deleted
    Cleanup {
        /// Directory containing the downloaded `*.mp3` files
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Map log level, keeping the HTTP stack quiet at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug,hyper_util=info,reqwest=info",
        LogLevel::Trace => "trace,hyper_util=info,reqwest=info",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-08-24 19:44:09.123 +09:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }

    match cli.command {
        Commands::Fetch {
            targets,
            output_dir,
            endpoint,
        } => {
            tracing::info!(targets = %targets.display(), "Loading target words");
            let list = malsori_model::TargetList::load(&targets)?;
            tracing::info!(words = list.len(), "Loaded target words");

            let client = malsori_fetch::client::SearchClient::new(endpoint)?;
            let mut ctx = malsori_model::RunContext::new(list);
            let summary = malsori_fetch::search::run(&client, &mut ctx, &output_dir).await?;

            tracing::info!(
                words = summary.words,
                downloads = summary.downloads,
                unfound = summary.unfound.len(),
                "Fetch complete"
            );
        }
        Commands::Cleanup { dir } => {
            tracing::info!(dir = %dir.display(), "Pruning audio variants");
            let stats = malsori_cleanup::prune_variants(&dir)?;
            tracing::info!(
                renamed = stats.renamed,
                deleted = stats.deleted,
                kept = stats.kept,
                "Cleanup complete"
            );
        }
    }

    Ok(())
}
