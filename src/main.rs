//! Markblock - a terminal markdown block with preview and edit modes.
//!
//! # Usage
//!
//! ```bash
//! markblock
//! markblock --file NOTES.md
//! markblock --file NOTES.md --print
//! markblock --theme light --save
//! ```

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use markblock::DEFAULT_DOCUMENT;
use markblock::app::App;
use markblock::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use markblock::export::render_static;
use markblock::ui::style::Theme;

/// A terminal markdown block with preview and edit modes
#[derive(Parser, Debug)]
#[command(name = "markblock", version, about, long_about = None)]
struct Cli {
    /// Markdown file to start with instead of the built-in document
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Print the block as HTML to stdout instead of starting the UI
    #[arg(long)]
    print: bool,

    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<Theme>,

    /// Hide line numbers in the editor
    #[arg(long)]
    no_line_numbers: bool,

    /// Append log output to a file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// Route tracing output somewhere that does not fight the UI for the terminal.
fn init_logging(log_file: Option<&Path>, print: bool) -> Result<()> {
    let writer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None if print => BoxMakeWriter::new(std::io::stderr),
        None => BoxMakeWriter::new(std::io::sink),
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(writer)
        .with_ansi(log_file.is_none() && print)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref(), cli.print)?;
    tracing::debug!(?effective, "effective flags");

    let text = match &cli.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => DEFAULT_DOCUMENT.to_string(),
    };

    let app = App::new(text)
        .with_theme(cli.theme.or(effective.theme).unwrap_or_default())
        .with_line_numbers(!effective.no_line_numbers);

    if cli.print {
        let html = render_static(&app.model((80, 24)));
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(html.as_bytes())
            .context("Failed to write to stdout")?;
        return Ok(());
    }

    app.run().context("Application error")
}
