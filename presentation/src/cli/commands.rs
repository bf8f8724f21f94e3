//! CLI command definitions

use agenda_domain::OutputFormat;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for the final agenda
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Panels with their confirmed speakers
    Table,
    /// Panel exports and flat rows as JSON
    Json,
    /// Flat rows as CSV
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

/// CLI arguments for agenda-forge
#[derive(Parser, Debug)]
#[command(name = "agenda-forge")]
#[command(author, version, about = "Draft a conference agenda: panel topics, speakers, final export")]
#[command(long_about = r#"
Agenda Forge drafts a conference agenda with a generative model.

The workflow has three stages:
1. Topics: generate panel topics from an event brief, then confirm the ones to keep
2. Speakers: generate speakers for every confirmed panel in parallel, then confirm them
3. Finalize: export the confirmed panels and speakers as a table, JSON or CSV

State is kept in a JSON file between invocations ([workflow] state_file).

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./agenda.toml       Project-level config
3. ~/.config/agenda-forge/config.toml   Global config

Example:
  agenda-forge topics --event-name RustConf --main-topic "Systems programming" -n 4
  agenda-forge confirm-topic panel-1
  agenda-forge speakers
  agenda-forge confirm-speaker panel-1 panel-1-speaker-2
  agenda-forge finalize --format csv
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Plain text progress lines instead of progress bars
    #[arg(long, global = true)]
    pub plain: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// State file to operate on (overrides [workflow] state_file)
    #[arg(long, value_name = "PATH", global = true)]
    pub state: Option<PathBuf>,
}

/// Identifies one speaker slot
#[derive(Args, Debug, Clone)]
pub struct SpeakerRef {
    /// Panel id (e.g. panel-1)
    pub panel: String,

    /// Speaker id (e.g. panel-1-speaker-2)
    pub speaker: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate panel topics from an event brief (replaces the current agenda)
    Topics {
        /// Name of the event
        #[arg(long)]
        event_name: String,

        /// Main topic of the event
        #[arg(long)]
        main_topic: String,

        /// Extra context for the model
        #[arg(long, default_value = "")]
        additional_info: String,

        /// Number of panels to generate
        #[arg(short = 'n', long, default_value_t = 3)]
        panels: usize,
    },

    /// Generate speakers for panels in parallel (default: every confirmed panel)
    Speakers {
        /// Panel to generate for (can be specified multiple times)
        #[arg(long = "panel", value_name = "PANEL_ID")]
        panels: Vec<String>,
    },

    /// Confirm a panel topic
    ConfirmTopic {
        /// Panel id
        panel: String,
    },

    /// Return a confirmed panel topic to draft
    UnconfirmTopic {
        /// Panel id
        panel: String,
    },

    /// Replace a panel topic with a freshly generated one
    RegenerateTopic {
        /// Panel id
        panel: String,
    },

    /// Confirm a speaker
    ConfirmSpeaker(SpeakerRef),

    /// Withdraw a speaker confirmation
    UnconfirmSpeaker(SpeakerRef),

    /// Replace a speaker with a freshly generated one in the same slot
    RegenerateSpeaker(SpeakerRef),

    /// Remove a speaker from its panel
    RemoveSpeaker(SpeakerRef),

    /// Show the current agenda
    Show,

    /// Export the confirmed agenda
    Finalize {
        /// Output format (default: [output] format)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Write to a file instead of stdout (CSV defaults to <event>-agenda.csv)
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,

        /// Export even when some confirmed panels lack a confirmed speaker
        #[arg(long)]
        force: bool,
    },
}
