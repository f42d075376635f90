//! CLI entrypoint for Trivia Rush
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use trivia_application::{
    FallbackCorpus, HighScoreBook, InMemoryStore, KeyValueStore, PreloadTopicsUseCase,
    QuestionSupplier, SessionController, SessionInput, SessionRuntime,
};
use trivia_domain::{Topic, config::has_errors};
use trivia_infrastructure::{
    ConfigLoader, FileConfig, JsonFileStore, JsonlSessionLogger, StaticCorpus, build_generator,
};
use trivia_presentation::{Cli, ConsoleFormatter, ConsolePresenter, spawn_input_reader};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref())?;

    info!("Starting Trivia Rush");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("failed to load configuration: {}", e))?
    };

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        println!();
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let issues = config.validate();
    for issue in &issues {
        if issue.is_error() {
            error!("{}", issue);
        } else {
            warn!("{}", issue);
        }
        eprintln!("{}", ConsoleFormatter::config_issue(issue));
    }
    if has_errors(&issues) {
        bail!("invalid configuration");
    }
    let supply_params = config.to_supply_params()?;
    let session_params = config.to_session_params()?;

    // === Dependency Injection ===
    let corpus = Arc::new(StaticCorpus::from_config(&config.corpus));
    if cli.list_topics {
        println!(
            "{}",
            ConsoleFormatter::topics(&corpus.topics(), &corpus.default_topic())
        );
        return Ok(());
    }

    let high_scores = HighScoreBook::new(open_store(&config, cli.no_config));
    if cli.high_score {
        println!("{}", ConsoleFormatter::high_score(&high_scores.current()));
        return Ok(());
    }

    let generator = build_generator(&config.generator, cli.offline);
    let supplier = QuestionSupplier::spawn(generator, corpus, supply_params)
        .context("failed to start question supplier")?;

    let preload = PreloadTopicsUseCase::new(supplier.clone());
    if let Err(e) = preload.execute(&session_params.preload_topics, session_params.preload_count) {
        warn!("Preloading skipped: {}", e);
    }

    let topic = cli
        .topic
        .map(Topic::new)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| session_params.default_topic.clone());

    let mut controller =
        SessionController::new(session_params)?.with_high_scores(high_scores.clone());
    controller.subscribe(Arc::new(ConsolePresenter::new(!cli.quiet)));
    if let Some(path) = &cli.event_log {
        match JsonlSessionLogger::new(path) {
            Some(logger) => {
                info!("Recording session events to {}", logger.path().display());
                controller.subscribe(Arc::new(logger));
            }
            None => eprintln!("Could not open event log {}", path.display()),
        }
    }

    let runtime = SessionRuntime::new(controller, supplier);
    let cancel = runtime.cancellation_token();

    spawn_ticker(
        runtime.sender(),
        cancel.clone(),
        Duration::from_millis(cli.tick_ms),
    );
    spawn_input_reader(runtime.sender()).context("failed to start input reader")?;
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    println!("Topic: {}  (answer with 1-4, q to quit)", topic);
    if let Some(stats) = runtime.run(topic).await {
        println!(
            "{}",
            ConsoleFormatter::final_stats(&stats, &high_scores.current())
        );
    }

    Ok(())
}

/// Route logs to stderr, or to a daily rolling file when `log_dir` is set.
///
/// The returned guard flushes the file writer on drop.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(dir) = log_dir else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::daily(dir, "trivia-rush.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

/// The JSON score file, or a volatile store when it cannot be used.
fn open_store(config: &FileConfig, no_config: bool) -> Arc<dyn KeyValueStore> {
    if no_config {
        return Arc::new(InMemoryStore::new());
    }
    let Some(path) = config.storage.resolve_high_score_path() else {
        warn!("No data directory; high scores will not be saved");
        return Arc::new(InMemoryStore::new());
    };
    match JsonFileStore::open(&path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!("Cannot use score file {}: {}", path.display(), e);
            Arc::new(InMemoryStore::new())
        }
    }
}

/// Send the elapsed wall time as `Tick`s until cancelled.
fn spawn_ticker(tx: UnboundedSender<SessionInput>, cancel: CancellationToken, period: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        let mut last = tokio::time::Instant::now();
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                now = interval.tick() => {
                    let elapsed = now.saturating_duration_since(last);
                    last = now;
                    if tx.send(SessionInput::Tick(elapsed)).is_err() {
                        break;
                    }
                }
            }
        }
    });
}
