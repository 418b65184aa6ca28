//! CLI entrypoint for tunebridge
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use tunebridge_application::TuneBridge;
use tunebridge_domain::MessageContext;
use tunebridge_infrastructure::{ConfigLoader, FileConfig, build_bridge, build_downloader};
use tunebridge_presentation::{ChatRepl, Cli, Command, ConsoleFormatter, OutputFormat, Spinner};

/// Initialize logging based on verbosity level, optionally mirrored to a file.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
            let dir = dir.unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("invalid log file path: {}", path.display()))?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("cannot create log directory {}", dir.display()))?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(EnvFilter::new(level));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::new(level)),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    if cli.no_config {
        return Ok(ConfigLoader::load_defaults());
    }
    ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!("{}", e))
}

fn emit(format: OutputFormat, text: String, json: String) {
    match format {
        OutputFormat::Text => print!("{}", text),
        OutputFormat::Json => println!("{}", json),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = load_config(&cli)?;
    let _guard = init_logging(cli.verbose, config.logging.log_file.as_deref())?;

    info!("Starting tunebridge");

    let issues = config.validate();
    if !issues.is_empty() {
        eprint!("{}", ConsoleFormatter::format_issues(&issues));
        if issues.iter().any(|issue| issue.is_error()) {
            bail!("configuration has errors");
        }
    }

    let Some(command) = cli.command.clone() else {
        bail!("A command is required. Run `tunebridge --help` for usage.");
    };
    let progress = !cli.quiet && cli.output == OutputFormat::Text;

    // === Dependency Injection ===
    let bridge = Arc::new(build_bridge(&config)?);

    run_command(&config, &bridge, command, cli.output, progress).await
}

async fn run_command(
    config: &FileConfig,
    bridge: &Arc<TuneBridge>,
    command: Command,
    output: OutputFormat,
    progress: bool,
) -> Result<()> {
    match command {
        Command::Init => {
            let spinner = Spinner::start("Warming up models...", progress);
            let report = bridge.initialize().await;
            spinner.finish();
            emit(
                output,
                ConsoleFormatter::format_init(&report),
                ConsoleFormatter::format_json(&report),
            );
        }
        Command::Process {
            message,
            user,
            guild,
            channel,
        } => {
            let ctx = MessageContext::new(message, user, guild, channel);
            let spinner = Spinner::start("Analysing...", progress);
            let response = bridge.process_message(&ctx).await;
            spinner.finish();
            emit(
                output,
                ConsoleFormatter::format_response(&response),
                ConsoleFormatter::format_json(&response),
            );
        }
        Command::Search { query } => {
            let spinner = Spinner::start(format!("Searching for {}...", query), progress);
            let result = bridge.search_music(&query).await;
            spinner.finish();
            emit(
                output,
                ConsoleFormatter::format_search(&query, result.as_ref()),
                ConsoleFormatter::format_json(&result),
            );
        }
        Command::Mood { text } => {
            let labels = bridge.detect_mood(&text).await?;
            emit(
                output,
                ConsoleFormatter::format_classifications("Mood", &labels),
                ConsoleFormatter::format_json(&labels),
            );
        }
        Command::Genre { file } => {
            let audio = tokio::fs::read(&file)
                .await
                .with_context(|| format!("cannot read {}", file.display()))?;
            let spinner = Spinner::start("Classifying...", progress);
            let labels = bridge.classify_genre(&audio).await;
            spinner.finish();
            let labels = labels?;
            emit(
                output,
                ConsoleFormatter::format_classifications("Genre", &labels),
                ConsoleFormatter::format_json(&labels),
            );
        }
        Command::Chat { user } => {
            ChatRepl::new(Arc::clone(bridge))
                .with_progress(progress)
                .with_user_id(user)
                .run()
                .await?;
        }
        Command::Download { url, dir } => {
            // yt-dlp is called directly; no model is involved.
            let dir = dir.unwrap_or_else(|| config.youtube.download_dir.clone());
            let spinner = Spinner::start(format!("Downloading {}...", url), progress);
            let result = build_downloader(config).download_audio(&url, &dir).await;
            spinner.finish();
            let path = result?;
            emit(
                output,
                ConsoleFormatter::format_download(&path),
                ConsoleFormatter::format_json(&path),
            );
        }
    }
    Ok(())
}
