//! Command implementations and dispatch logic.
//!
//! Each command is an async function taking a [`CommandContext`]. File I/O
//! lives here; parsing, editing and serializing are delegated to the library
//! crates.

use camino::{Utf8Path, Utf8PathBuf};
use confdoc_core::{ConfdocError, ConfdocResult, FormatTag, KeyPath};
use confdoc_editor::EditSession;
use std::process::ExitCode;
use tracing::{debug, info};

pub mod convert;
pub mod detect;
pub mod edit;
pub mod fields;
pub mod fmt;
pub mod get;
pub mod parse;


use crate::output::OutputHandler;
use crate::settings::CliSettings;
use crate::Commands;

/// Message shown whenever a file cannot be opened for structured editing
pub const RAW_TEXT_FALLBACK: &str = "visual editing unavailable, falling back to raw text";

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: Utf8PathBuf,
    pub output: OutputHandler,
    pub settings: CliSettings,
}

/// A file opened for structured editing
pub struct OpenedFile {
    pub path: Utf8PathBuf,
    /// Text as read from disk
    pub text: String,
    pub session: EditSession,
}

impl CommandContext {
    /// Create a new command context
    pub async fn new(settings: CliSettings) -> ConfdocResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| ConfdocError::io("Failed to get current directory".to_string(), e))?;
        let cwd = Utf8PathBuf::from_path_buf(cwd).map_err(|path| {
            ConfdocError::io(
                format!("Current directory is not valid UTF-8: {}", path.display()),
                std::io::Error::new(std::io::ErrorKind::InvalidData, "non UTF-8 path"),
            )
        })?;

        Ok(Self {
            cwd,
            output: OutputHandler::new(),
            settings,
        })
    }

    /// Resolve a command-line path against the working directory
    pub fn resolve(&self, file: &Utf8Path) -> Utf8PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.cwd.join(file)
        }
    }

    pub fn format_for(&self, file: &Utf8Path) -> FormatTag {
        self.settings.format_for(file)
    }

    pub async fn read(&self, path: &Utf8Path) -> ConfdocResult<String> {
        debug!(%path, "reading file");
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConfdocError::io(format!("Failed to read {}", path), e))
    }

    pub async fn write(&self, path: &Utf8Path, content: &str) -> ConfdocResult<()> {
        debug!(%path, bytes = content.len(), "writing file");
        tokio::fs::write(path, content)
            .await
            .map_err(|e| ConfdocError::io(format!("Failed to write {}", path), e))
    }

    /// Read and parse a file, printing the raw-text fallback notice when the
    /// file cannot be edited structurally
    pub async fn open(&self, file: &Utf8Path) -> ConfdocResult<OpenedFile> {
        let path = self.resolve(file);
        let text = self.read(&path).await?;
        let format = self.format_for(&path);

        match EditSession::open_with(&text, format, self.settings.parse_options()) {
            Ok(session) => {
                for diagnostic in session.diagnostics() {
                    self.output.warn(&format!("{}: {}", file, diagnostic));
                }
                Ok(OpenedFile { path, text, session })
            },
            Err(e) => {
                if e.is_parse_failure() {
                    self.output.warn(RAW_TEXT_FALLBACK);
                }
                Err(e)
            },
        }
    }
}

/// Parse a key path argument
pub fn parse_path(raw: &str) -> ConfdocResult<KeyPath> {
    raw.parse()
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> ConfdocResult<ExitCode> {
    match command {
        Commands::Detect { file } => {
            info!("Detecting format of {}", file);
            detect::execute(&file, ctx).await?;
        },
        Commands::Parse {
            file,
            comments,
            diagnostics,
        } => {
            info!("Parsing {} (comments: {}, diagnostics: {})", file, comments, diagnostics);
            parse::execute(&file, comments, diagnostics, ctx).await?;
        },
        Commands::Get { file, path } => {
            info!("Reading {} from {}", path, file);
            get::execute(&file, &path, ctx).await?;
        },
        Commands::Set {
            file,
            path,
            value,
            json,
            dry_run,
        } => {
            info!("Setting {} in {} (json: {}, dry_run: {})", path, file, json, dry_run);
            edit::set(&file, &path, &value, json, dry_run, ctx).await?;
        },
        Commands::Toggle { file, path, dry_run } => {
            info!("Toggling {} in {} (dry_run: {})", path, file, dry_run);
            edit::toggle(&file, &path, dry_run, ctx).await?;
        },
        Commands::Append {
            file,
            path,
            value,
            json,
            dry_run,
        } => {
            info!("Appending to {} in {} (dry_run: {})", path, file, dry_run);
            edit::append(&file, &path, value.as_deref(), json, dry_run, ctx).await?;
        },
        Commands::Remove { file, path, dry_run } => {
            info!("Removing {} from {} (dry_run: {})", path, file, dry_run);
            edit::remove(&file, &path, dry_run, ctx).await?;
        },
        Commands::Fields { file, json } => {
            info!("Listing fields of {}", file);
            fields::execute(&file, json, ctx).await?;
        },
        Commands::Fmt { file, check } => {
            info!("Formatting {} (check: {})", file, check);
            if !fmt::execute(&file, check, ctx).await? {
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Convert { file, to, output, write } => {
            info!("Converting {} to {}", file, to);
            let output = if write { Some(convert::sibling_path(&file, to)?) } else { output };
            convert::execute(&file, to, output.as_deref(), ctx).await?;
        },
    }

    Ok(ExitCode::SUCCESS)
}
