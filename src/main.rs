use anyhow::{Context, Result};
use clap::Parser;
use linepick::output::print_selection;
use linepick::store::read_lines;
use linepick::tui::{self, Layout, PickerOptions};
use linepick::utils::AppConfig;
use log::info;
use std::io;
use std::process::ExitCode;

/// Marker used by `-#` when no other marker is given.
const DEFAULT_MARKER: char = '#';

#[derive(Parser)]
#[command(name = "linepick", version)]
#[command(about = "Pick one line from standard input interactively")]
struct Cli {
    /// Show a vertical list of at most N lines (0 for a horizontal ribbon)
    #[arg(short, long, value_name = "N")]
    lines: Option<usize>,

    /// Text shown before the query
    #[arg(short, long)]
    prompt: Option<String>,

    /// Treat lines starting with '#' as unselectable headers
    #[arg(short = '#', long)]
    headers: bool,

    /// Treat lines starting with CHAR as unselectable headers
    #[arg(short, long, value_name = "CHAR")]
    marker: Option<char>,

    /// Prefix the output with the header above the selection and a tab
    #[arg(short = 'H', long)]
    print_header: bool,
}

impl Cli {
    /// Command-line flags take precedence over the config file.
    fn merge(self, config: AppConfig) -> (PickerOptions, Option<char>) {
        let marker = self
            .marker
            .or(self.headers.then_some(DEFAULT_MARKER))
            .or(config.header_marker);
        let options = PickerOptions {
            layout: Layout::from_lines(self.lines.unwrap_or(config.lines)),
            prompt: self.prompt.unwrap_or(config.prompt),
            print_header: self.print_header || config.print_header,
        };
        (options, marker)
    }
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("LINEPICK_LOG", "off")).init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    let (options, marker) = cli.merge(config);

    let store = read_lines(io::stdin().lock(), marker)?;
    info!("read {} lines", store.len());

    match tui::run(&store, options)? {
        Some(line) => {
            print_selection(&mut io::stdout().lock(), &line).context("Failed to write selection")?;
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::FAILURE),
    }
}
