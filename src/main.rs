//! docpad
//!
//! A small terminal text editor that keeps track of its current file with
//! the docstate controller. Drawn with raw ANSI escape sequences.

mod app;
mod host;
mod input;
mod screen;
mod terminal;
mod ui;

use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use docstate::ControllerConfig;
use log::LevelFilter;

use app::App;

const DEFAULT_FILTER: &str = "Text Files (*.txt)|*.txt|All Files (*.*)|*.*";

#[derive(Parser, Debug)]
#[command(name = "docpad")]
#[command(about = "Terminal text editor with New, Open, Save and Save As", long_about = None)]
#[command(version)]
struct Args {
    /// File to open on start
    file: Option<PathBuf>,

    /// Extension added to file names typed without one
    #[arg(long, default_value = "txt")]
    ext: String,

    /// File dialog filter, as "Description|*.ext|Description|*.ext"
    #[arg(long, default_value = DEFAULT_FILTER)]
    filter: String,

    /// Write logs to this file (logging is off without it)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Args {
    fn controller_config(&self) -> anyhow::Result<ControllerConfig> {
        let config = ControllerConfig::new()
            .with_default_ext(self.ext.trim_start_matches('.'))
            .with_filter(self.filter.clone());
        config.filters().context("invalid --filter")?;
        Ok(config)
    }
}

/// Log into a file so the terminal UI is left alone
fn init_logging(args: &Args) -> anyhow::Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::new()
        .filter_level(args.log_level)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;
    let config = args.controller_config()?;

    let mut app = App::new(config)?;
    app.run(args.file)
}
