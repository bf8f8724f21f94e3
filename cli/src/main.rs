//! CLI entrypoint for agenda-forge
//!
//! This is the main binary that wires together all layers using
//! dependency injection, then runs one subcommand against the
//! persisted workflow state.

use agenda_application::{
    AgendaRepository, CoordinatorError, GenerationCoordinator, GenerationProvider, NoProgress,
    NoSearch, ProgressNotifier, SearchProvider, WorkflowStore,
};
use agenda_domain::{AgendaAssembler, EventBrief, OutputFormat, Panel, PanelId, SpeakerId};
use agenda_infrastructure::{
    ConfigLoader, FileConfig, JsonFileAgendaRepository, JsonlGenerationLogger,
    OpenRouterProvider, SerpApiSearch, UnavailableProvider,
};
use agenda_presentation::cli::commands::SpeakerRef;
use agenda_presentation::{
    Cli, Command, ConsoleFormatter, CsvWriter, ProgressReporter, SimpleProgress,
    default_filename,
};
use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

type Coordinator = GenerationCoordinator<dyn GenerationProvider, dyn SearchProvider>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    // Held until exit so buffered file log lines are flushed
    let _guard = init_logging(cli.verbose, &config);

    for issue in ConfigLoader::check(&config)? {
        warn!("{}", issue.message);
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting agenda-forge");

    let state_path = cli
        .state
        .unwrap_or_else(|| PathBuf::from(&config.workflow.state_file));

    let token = CancellationToken::new();
    let on_interrupt = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted");
            on_interrupt.cancel();
        }
    });

    let coordinator = build_coordinator(&config, &state_path, generates(&command), token)?;

    let progress: Box<dyn ProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else if cli.plain {
        Box::new(SimpleProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let default_format = config.output.finalize_format();

    match run(command, &coordinator, progress.as_ref(), default_format).await {
        Err(e)
            if e
                .downcast_ref::<CoordinatorError>()
                .is_some_and(CoordinatorError::is_conflict) =>
        {
            // A rejected transition leaves the state untouched
            warn!("{}", e);
            eprintln!("{} {}", "Rejected:".yellow().bold(), e);
            Ok(())
        }
        other => other,
    }
}

/// Initialize logging based on verbosity level, plus a daily log file
/// when `[logging] dir` is set.
fn init_logging(verbose: u8, config: &FileConfig) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file, guard) = match &config.logging.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "agenda-forge.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .init();

    guard
}

/// Commands that call the generation provider.
fn generates(command: &Command) -> bool {
    matches!(
        command,
        Command::Topics { .. }
            | Command::Speakers { .. }
            | Command::RegenerateTopic { .. }
            | Command::RegenerateSpeaker(_)
    )
}

// === Dependency Injection ===
fn build_coordinator(
    config: &FileConfig,
    state_path: &Path,
    generates: bool,
    token: CancellationToken,
) -> Result<Coordinator> {
    let repository = Arc::new(JsonFileAgendaRepository::new(state_path));
    let store = match repository
        .load()
        .with_context(|| format!("Failed to read state file {}", state_path.display()))?
    {
        Some(snapshot) => WorkflowStore::from_snapshot(snapshot.into_recovered()),
        None => WorkflowStore::new(),
    };

    let provider: Arc<dyn GenerationProvider> =
        match OpenRouterProvider::from_config(&config.provider) {
            Ok(provider) => {
                info!("Using model {}", provider.model());
                Arc::new(provider)
            }
            Err(e) if !generates => Arc::new(UnavailableProvider::new(e)),
            Err(e) => return Err(e.into()),
        };

    let search: Arc<dyn SearchProvider> = if config.search.enabled && generates {
        match SerpApiSearch::from_config(&config.search) {
            Ok(search) => Arc::new(search),
            Err(e) => {
                warn!("Web search disabled: {}", e);
                Arc::new(NoSearch)
            }
        }
    } else {
        Arc::new(NoSearch)
    };

    let mut coordinator = GenerationCoordinator::new(provider, search, Arc::new(store))
        .with_repository(repository)
        .with_params(config.generation_params())
        .with_cancellation(token);

    if let Some(path) = &config.logging.generation_log {
        match JsonlGenerationLogger::new(path) {
            Some(logger) => {
                info!("Generation log: {}", logger.path().display());
                coordinator = coordinator.with_generation_logger(Arc::new(logger));
            }
            None => warn!("Could not open generation log {}", path),
        }
    }

    Ok(coordinator)
}

async fn run(
    command: Command,
    coordinator: &Coordinator,
    progress: &dyn ProgressNotifier,
    default_format: OutputFormat,
) -> Result<()> {
    let store = coordinator.store();

    match command {
        Command::Topics {
            event_name,
            main_topic,
            additional_info,
            panels,
        } => {
            let brief = EventBrief::new(event_name, main_topic, additional_info, panels)?;
            let created = coordinator.generate_topics(brief, progress).await?;
            if created.is_empty() {
                println!("{}", "The model response contained no usable topics.".yellow());
            }
            print_agenda(coordinator);
            if !created.is_empty() {
                println!("Confirm topics with `agenda-forge confirm-topic <panel>`.");
            }
        }

        Command::Speakers { panels } => {
            let panel_ids = if panels.is_empty() {
                confirmed_panel_ids(&store.panels())?
            } else {
                panels.into_iter().map(PanelId::new).collect()
            };
            let report = coordinator.generate_speakers(&panel_ids, progress).await?;
            print_agenda(coordinator);
            println!("{}", ConsoleFormatter::format_report(&report));
        }

        Command::ConfirmTopic { panel } => {
            let panel = coordinator.confirm_topic(&PanelId::new(panel))?;
            println!("{}", ConsoleFormatter::format_panel(&panel));
            print!(
                "{}",
                ConsoleFormatter::format_readiness("topics", &AgendaAssembler::topics_ready(&store.panels()))
            );
        }

        Command::UnconfirmTopic { panel } => {
            let panel = coordinator.unconfirm_topic(&PanelId::new(panel))?;
            println!("{}", ConsoleFormatter::format_panel(&panel));
        }

        Command::RegenerateTopic { panel } => {
            let panel = coordinator.regenerate_topic(&PanelId::new(panel), progress).await?;
            println!("{}", ConsoleFormatter::format_panel(&panel));
        }

        Command::ConfirmSpeaker(slot) => {
            let (panel_id, speaker_id) = ids(slot);
            let speaker = coordinator.set_speaker_confirmed(&panel_id, &speaker_id, true)?;
            print!("{}", ConsoleFormatter::format_speaker(&speaker));
            print!(
                "{}",
                ConsoleFormatter::format_readiness("speakers", &AgendaAssembler::speakers_ready(&store.panels()))
            );
        }

        Command::UnconfirmSpeaker(slot) => {
            let (panel_id, speaker_id) = ids(slot);
            let speaker = coordinator.set_speaker_confirmed(&panel_id, &speaker_id, false)?;
            print!("{}", ConsoleFormatter::format_speaker(&speaker));
        }

        Command::RegenerateSpeaker(slot) => {
            let (panel_id, speaker_id) = ids(slot);
            let speaker = coordinator
                .regenerate_speaker(&panel_id, &speaker_id, progress)
                .await?;
            print!("{}", ConsoleFormatter::format_speaker(&speaker));
        }

        Command::RemoveSpeaker(slot) => {
            let (panel_id, speaker_id) = ids(slot);
            let speaker = coordinator.remove_speaker(&panel_id, &speaker_id)?;
            println!("Removed {} ({}) from {}", speaker.name, speaker.id, panel_id);
        }

        Command::Show => {
            print_agenda(coordinator);
            let panels = store.panels();
            print!(
                "{}",
                ConsoleFormatter::format_readiness("topics", &AgendaAssembler::topics_ready(&panels))
            );
            print!(
                "{}",
                ConsoleFormatter::format_readiness("speakers", &AgendaAssembler::speakers_ready(&panels))
            );
        }

        Command::Finalize { format, out, force } => {
            let panels = store.panels();
            let readiness = AgendaAssembler::speakers_ready(&panels);
            if !readiness.is_ready() && !force {
                bail!(
                    "{}Use --force to export anyway.",
                    ConsoleFormatter::format_readiness("speakers", &readiness)
                );
            }

            let format = format.map(OutputFormat::from).unwrap_or(default_format);
            let brief = store.brief();
            let content = match format {
                OutputFormat::Table => {
                    ConsoleFormatter::format_final(brief.as_ref(), &AgendaAssembler::finalize(&panels))
                }
                OutputFormat::Json => ConsoleFormatter::format_json(
                    &AgendaAssembler::finalize(&panels),
                    &AgendaAssembler::rows(&panels),
                ),
                OutputFormat::Csv => CsvWriter::write(&AgendaAssembler::rows(&panels)),
            };

            let out = out.or_else(|| {
                (format == OutputFormat::Csv).then(|| PathBuf::from(default_filename(brief.as_ref())))
            });
            match out {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Wrote {}", path.display());
                }
                None => println!("{}", content),
            }
        }
    }

    Ok(())
}

/// Confirmed panels, once the topic stage gate is open.
fn confirmed_panel_ids(panels: &[Panel]) -> Result<Vec<PanelId>> {
    let readiness = AgendaAssembler::topics_ready(panels);
    if !readiness.is_ready() {
        bail!(
            "{}Confirm at least one topic or pass --panel.",
            ConsoleFormatter::format_readiness("topics", &readiness)
        );
    }
    Ok(panels
        .iter()
        .filter(|p| p.is_confirmed())
        .map(|p| p.id.clone())
        .collect())
}

fn ids(slot: SpeakerRef) -> (PanelId, SpeakerId) {
    (PanelId::new(slot.panel), SpeakerId::new(slot.speaker))
}

fn print_agenda(coordinator: &Coordinator) {
    let store = coordinator.store();
    println!(
        "{}",
        ConsoleFormatter::format_agenda(store.brief().as_ref(), &store.panels())
    );
}
