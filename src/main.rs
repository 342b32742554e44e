//! refurb CLI: locate today's refurbished-offers snapshot, load it, and filter it as you type.

mod catalog;
mod config;
mod locator;
mod logging;
mod product;
mod render;
mod snapshots;
mod source;
mod view;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use locator::{Clock, DateFormat};
use render::TerminalSurface;
use source::AutoSource;
use view::CatalogView;

#[derive(Parser)]
#[command(
    name = "refurb",
    version = env!("REFURB_BUILD_VERSION"),
    about = "refurb: load today's refurbished-offers feed and filter it"
)]
struct Cli {
    #[arg(long, default_value = config::CONFIG_NAME)]
    config: PathBuf,

    /// Directory or URL prefix holding the dated feed files (include the trailing '/').
    #[arg(long)]
    base: Option<String>,

    #[arg(long)]
    prefix: Option<String>,

    #[arg(long, value_enum)]
    date_format: Option<DateFormat>,

    /// Which calendar decides "today".
    #[arg(long, value_enum)]
    clock: Option<Clock>,

    /// Use this snapshot date (YYYY-MM-DD) instead of today.
    #[arg(long)]
    date: Option<NaiveDate>,

    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resource id for the selected date
    Locate,
    /// Load the feed and print the (optionally filtered) listing once
    Show {
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Load the feed, then re-render after every query line read from stdin
    Browse,
    /// List dated feed files in the local base directory, newest first
    Snapshots,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut cfg = config::load(&cli.config)?;
    if let Some(base) = &cli.base {
        cfg.feed.base = Some(base.clone());
    }
    if let Some(prefix) = &cli.prefix {
        if prefix.is_empty() {
            anyhow::bail!("--prefix must not be empty");
        }
        cfg.feed.prefix = Some(prefix.clone());
    }
    if let Some(fmt) = cli.date_format {
        cfg.feed.date_format = Some(fmt);
    }
    if let Some(clock) = cli.clock {
        cfg.feed.clock = Some(clock);
    }

    match &cli.command {
        Commands::Locate => cmd_locate(&cfg, cli.date)?,
        Commands::Show { query } => cmd_show(&cfg, cli.date, query)?,
        Commands::Browse => cmd_browse(&cfg, cli.date)?,
        Commands::Snapshots => cmd_snapshots(&cfg)?,
    }
    Ok(())
}

fn resource(cfg: &config::Config, date: Option<NaiveDate>) -> String {
    let locator = cfg.locator();
    let date = date.unwrap_or_else(|| cfg.clock().today());
    let id = locator.resource_for(date);
    tracing::debug!(%date, format = %locator.format, resource = %id, "located feed");
    id
}

fn cmd_locate(cfg: &config::Config, date: Option<NaiveDate>) -> Result<()> {
    println!("{}", resource(cfg, date));
    Ok(())
}

/// Load into `view`. A load failure is already on screen when this returns `Err`.
fn load_view(
    cfg: &config::Config,
    date: Option<NaiveDate>,
    view: &mut CatalogView,
    surface: &mut TerminalSurface<std::io::Stdout>,
) -> Result<()> {
    let id = resource(cfg, date);
    view.load(&AutoSource::new(cfg.timeout()), &id, surface)
        .context("write results")??;
    Ok(())
}

fn cmd_show(cfg: &config::Config, date: Option<NaiveDate>, query: &str) -> Result<()> {
    let mut surface = TerminalSurface::stdout();
    let mut view = CatalogView::with_query(query);
    load_view(cfg, date, &mut view, &mut surface)
}

fn cmd_browse(cfg: &config::Config, date: Option<NaiveDate>) -> Result<()> {
    let mut surface = TerminalSurface::stdout();
    let mut view = CatalogView::new();
    load_view(cfg, date, &mut view, &mut surface)?;
    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            eprint!("search> ");
            std::io::stderr().flush().ok();
        }
        let line = match lines.next() {
            Some(line) => line.context("read query")?,
            None => break,
        };
        view.on_query_changed(line.trim_end_matches('\r'), &mut surface)
            .context("write results")?;
    }
    Ok(())
}

fn cmd_snapshots(cfg: &config::Config) -> Result<()> {
    let locator = cfg.locator();
    if source::is_http(&locator.base) {
        anyhow::bail!("snapshots needs a local base directory, got {}", locator.base);
    }
    let dir = if locator.base.is_empty() {
        Path::new(".")
    } else {
        Path::new(&locator.base)
    };
    for snap in snapshots::discover(dir, &locator)? {
        println!("{}\t{}", snap.date, snap.path.display());
    }
    Ok(())
}
