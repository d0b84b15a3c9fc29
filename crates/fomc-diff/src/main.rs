//! fomc-diff - compare Federal Reserve FOMC statements over time

mod cli;
mod config;
mod logging;
mod views;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, ColorChoice, Command, CompareArgs, OutputFormat};
use config::Config;
use fomc_diff_core::{DiffEngine, Statement, StatementStore, StatementType, ViewMode};
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use views::{Header, Painter, Report, Source};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        statements,
        config,
        verbose: _,
        command,
    } = cli;

    let config = Config::load(config.as_deref())?;
    let statements = config.statements_path(statements);
    debug!(statements = %statements.display(), "resolved statement location");

    match command {
        Command::List { kind, json } => list(&statements, kind.map(Into::into), json),
        Command::Show { id } => show(&statements, &id),
        Command::Compare(args) => compare(&statements, &config, args),
    }
}

fn load_store(path: &Path) -> Result<StatementStore> {
    StatementStore::load(path)
        .with_context(|| format!("Failed to load statements from {}", path.display()))
}

fn list(path: &Path, kind: Option<StatementType>, json: bool) -> Result<()> {
    let store = load_store(path)?;
    let statements: Vec<&Statement> = store.filter(kind).collect();

    let mut out = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &statements)?;
        writeln!(out)?;
        return Ok(());
    }
    if statements.is_empty() {
        warn!(path = %path.display(), "no statements found");
    }
    for statement in statements {
        writeln!(out, "{}  {}", statement.id, statement.label())?;
    }
    Ok(())
}

fn show(path: &Path, id: &str) -> Result<()> {
    let store = load_store(path)?;
    let Some(statement) = store.get(id) else {
        bail!("no statement with id {id:?}");
    };

    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", statement.title)?;
    writeln!(
        out,
        "{} | {} | {}",
        statement.date_label(),
        statement.kind.label(),
        statement.id
    )?;
    if let Some(url) = &statement.url {
        writeln!(out, "{url}")?;
    }
    writeln!(out)?;
    writeln!(out, "{}", statement.content)?;
    Ok(())
}

/// Two texts picked for comparison, with how to label them
struct Selection {
    old: Source,
    new: Source,
    old_text: String,
    new_text: String,
}

impl Selection {
    fn from_statements(old: &Statement, new: &Statement) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
            old_text: old.content.clone(),
            new_text: new.content.clone(),
        }
    }

    fn from_files(old: &str, new: &str) -> Result<Self> {
        let read = |path: &str| {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))
        };
        Ok(Self {
            old_text: read(old)?,
            new_text: read(new)?,
            old: Source::file(old),
            new: Source::file(new),
        })
    }
}

fn select(path: &Path, args: &CompareArgs) -> Result<Selection> {
    if args.latest {
        let store = load_store(path)?;
        let kind = args.kind.map(StatementType::from);
        let Some((old, new)) = store.latest_pair(kind) else {
            bail!("nothing to compare: fewer than two statements found");
        };
        return Ok(Selection::from_statements(old, new));
    }

    let (Some(old), Some(new)) = (args.old.as_deref(), args.new.as_deref()) else {
        bail!("nothing to compare: two statements are required");
    };
    if args.files {
        return Selection::from_files(old, new);
    }

    let store = load_store(path)?;
    let lookup = |id: &str| {
        store
            .get(id)
            .with_context(|| format!("nothing to compare: unknown statement id {id:?}"))
    };
    let (old, new) = (lookup(old)?, lookup(new)?);
    Ok(Selection::from_statements(old, new))
}

fn use_color(choice: ColorChoice, output: Option<&PathBuf>) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            output.is_none()
                && std::env::var_os("NO_COLOR").is_none()
                && std::io::stdout().is_terminal()
        }
    }
}

fn compare(path: &Path, config: &Config, args: CompareArgs) -> Result<()> {
    let selection = select(path, &args)?;

    let granularity = args
        .granularity
        .map(Into::into)
        .unwrap_or(config.compare.granularity);
    let view = args.view.map(Into::into).unwrap_or(config.compare.view);
    let engine = DiffEngine::new()
        .with_granularity(granularity)
        .with_normalization(config.compare.normalize && !args.no_normalize);

    let result = engine.compare(&selection.old_text, &selection.new_text);
    let header = Header {
        old: &selection.old,
        new: &selection.new,
    };

    let rendered = match args.format {
        OutputFormat::Text => {
            let painter = Painter::new(use_color(args.color, args.output.as_ref()));
            match view {
                ViewMode::SideBySide => {
                    views::render_side_by_side(&result, header, &painter)
                }
                ViewMode::Unified => {
                    views::render_single_pane(&result, header, &painter)
                }
            }
        }
        OutputFormat::Html => views::render_html_page(&result, header, view),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&Report::new(header, &result))?;
            json.push('\n');
            json
        }
    };

    match &args.output {
        Some(file) => std::fs::write(file, rendered)
            .with_context(|| format!("Failed to write {}", file.display()))?,
        None => std::io::stdout().lock().write_all(rendered.as_bytes())?,
    }
    Ok(())
}
