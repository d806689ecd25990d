//! htmlsmith - Command Line Entry Point
//!
//! Reads text from a file or standard input, converts it to formatted HTML
//! and writes the result to standard output or a file. The last mode and
//! input are remembered between runs.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use htmlsmith::clipboard::copy_text_to_clipboard;
use htmlsmith::config::{get_config_dir, load_config, load_session, save_state_silent};
use htmlsmith::{Converter, Error, Mode, Result};
use log::{error, info, warn};

/// Application name constant.
const APP_NAME: &str = "htmlsmith";

/// Convert plain text or Markdown into tidy HTML.
#[derive(Parser, Debug)]
#[command(name = APP_NAME, version, about)]
struct Cli {
    /// Input file; `-` or nothing reads standard input
    input: Option<PathBuf>,

    /// Write the HTML to this file instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Interpret the input as Markdown
    #[arg(short, long, conflicts_with = "plain")]
    markdown: bool,

    /// Treat the input as plain paragraphs separated by blank lines
    #[arg(short, long)]
    plain: bool,

    /// Convert the input remembered from the previous run
    #[arg(long, conflicts_with = "input")]
    last: bool,

    /// Also copy the HTML to the clipboard
    #[arg(short, long)]
    copy: bool,

    /// Do not remember this input and mode
    #[arg(long)]
    no_save: bool,
}

impl Cli {
    /// Mode requested on the command line, if any.
    fn mode(&self) -> Option<Mode> {
        if self.markdown {
            Some(Mode::Rich)
        } else if self.plain {
            Some(Mode::Plain)
        } else {
            None
        }
    }
}

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(&Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config_dir = match get_config_dir() {
        Ok(dir) => Some(dir),
        Err(e) => {
            warn!("{}; settings will not be remembered", e);
            None
        }
    };
    run_in(cli, config_dir.as_deref())
}

/// Convert once, reading and remembering state in `config_dir` if there is one.
fn run_in(cli: &Cli, config_dir: Option<&Path>) -> Result<()> {
    let mut settings = config_dir.map(load_config).unwrap_or_default();
    let mut session = config_dir.map(load_session).unwrap_or_default();

    let mode = cli.mode().unwrap_or_else(|| settings.mode());
    let input = if cli.last {
        std::mem::take(&mut session.input)
    } else {
        read_input(cli.input.as_deref())?
    };
    info!("Converting {} bytes as {}", input.len(), mode.label());

    let converter = Converter::with_options(&settings.markdown, settings.format.clone());
    let html = converter.convert(&input, mode);

    write_output(cli.output.as_deref(), &html)?;

    if let Some(dir) = config_dir.filter(|_| !cli.no_save) {
        settings.set_mode(mode);
        session.input = input;
        save_state_silent(dir, &settings, &session);
    }

    // Last, so a missing clipboard does not cost the saved state
    if cli.copy {
        copy_text_to_clipboard(&html)?;
        info!("Copied {} bytes to the clipboard", html.len());
    }

    Ok(())
}

/// Read the whole input; `None` and `-` mean standard input.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).map_err(|source| Error::FileRead {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Write the converted HTML; `None` means standard output.
fn write_output(path: Option<&Path>, html: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, html).map_err(|source| Error::FileWrite {
                path: path.to_path_buf(),
                source,
            })?;
            info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
