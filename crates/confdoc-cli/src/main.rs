//! # confdoc-cli
//!
//! Structured editing of JSON, TOML, YAML and Properties configuration files.
//!
//! This is the main entry point for the confdoc CLI tool. It handles command
//! parsing, sets up logging and error handling, and dispatches to the
//! appropriate command handlers.

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use confdoc_core::{ConfdocError, ConfdocResult, FormatTag};
use std::process::ExitCode;
use tracing::{error, info};

mod commands;
mod output;
mod settings;

use commands::CommandContext;
use output::errors::ErrorFormatter;
use settings::CliSettings;

/// Read and edit configuration files as structured trees
#[derive(Parser)]
#[command(name = "confdoc", version, about = "Structured config file editor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Flags shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Treat the file as this format instead of detecting it from the extension
    #[arg(long, global = true, value_name = "FORMAT")]
    pub format: Option<FormatTag>,

    /// Fail on lines the parser would otherwise skip
    #[arg(long, global = true)]
    pub strict: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the detected format of a file
    Detect { file: Utf8PathBuf },
    /// Print the parsed value tree as JSON
    Parse {
        file: Utf8PathBuf,
        /// Include the comment map
        #[arg(long)]
        comments: bool,
        /// Include skipped-line diagnostics
        #[arg(long)]
        diagnostics: bool,
    },
    /// Print the value at a key path
    Get { file: Utf8PathBuf, path: String },
    /// Replace the value at a key path
    Set {
        file: Utf8PathBuf,
        path: String,
        value: String,
        /// Parse VALUE as JSON instead of coercing it to the current type
        #[arg(long)]
        json: bool,
        /// Print the result instead of writing the file
        #[arg(long)]
        dry_run: bool,
    },
    /// Flip a boolean
    Toggle {
        file: Utf8PathBuf,
        path: String,
        #[arg(long)]
        dry_run: bool,
    },
    /// Append an element to an array
    Append {
        file: Utf8PathBuf,
        path: String,
        /// Element to append; defaults to an empty value shaped like the first element
        value: Option<String>,
        #[arg(long)]
        json: bool,
        #[arg(long)]
        dry_run: bool,
    },
    /// Delete an object key or array element
    Remove {
        file: Utf8PathBuf,
        path: String,
        #[arg(long)]
        dry_run: bool,
    },
    /// List every field with its editor kind and comment
    Fields {
        file: Utf8PathBuf,
        /// Emit JSON rows
        #[arg(long)]
        json: bool,
    },
    /// Rewrite a file through parse and serialize
    Fmt {
        file: Utf8PathBuf,
        /// Only report whether the file would change
        #[arg(long)]
        check: bool,
    },
    /// Convert a file to another format
    Convert {
        file: Utf8PathBuf,
        #[arg(long, value_name = "FORMAT")]
        to: FormatTag,
        /// Write here instead of stdout
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
        /// Write next to the input, named with the target format's extension
        #[arg(short, long, conflicts_with = "output")]
        write: bool,
    },
}

impl Commands {
    /// The file every command operates on
    pub fn file(&self) -> &Utf8Path {
        match self {
            Commands::Detect { file }
            | Commands::Parse { file, .. }
            | Commands::Get { file, .. }
            | Commands::Set { file, .. }
            | Commands::Toggle { file, .. }
            | Commands::Append { file, .. }
            | Commands::Remove { file, .. }
            | Commands::Fields { file, .. }
            | Commands::Fmt { file, .. }
            | Commands::Convert { file, .. } => file,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match CliSettings::from_layers(&CliSettings::collect_env_overrides(), &cli.global) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", ErrorFormatter::new().format_error(&e));
            return ExitCode::FAILURE;
        },
    };

    setup_logging(&settings.log_filter);
    setup_panic_handler();

    info!("Starting confdoc v{}", env!("CARGO_PKG_VERSION"));

    let file = cli.command.file().to_string();
    match run_cli(cli.command, settings) {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", ErrorFormatter::new().format_error_in(&e, Some(&file)));
            ExitCode::FAILURE
        },
    }
}

fn run_cli(command: Commands, settings: CliSettings) -> ConfdocResult<ExitCode> {
    // Create Tokio runtime for async file operations
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| ConfdocError::io("Failed to create async runtime".to_string(), e))?;

    rt.block_on(async {
        let ctx = CommandContext::new(settings).await?;
        commands::dispatch_command(command, &ctx).await
    })
}

fn setup_logging(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("confdoc encountered an unexpected error: {}", panic_info);
        eprintln!("confdoc crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/openjar/confdoc/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
