//! Command-line front end for the view engine.
//!
//! Loads a JSON array of records, wires command-line options into the engine's
//! input ports exactly as a list screen would wire its widgets, runs one refresh,
//! and prints the visible rows (one compact JSON document per line) followed by
//! the summary line.
//!
//! # Filters
//!
//! - `--filter status=open`: exact, case-insensitive match (enumerated column)
//! - `--filter name~ana`: substring match (free-text column)
//!
//! A filter value equal to a sentinel (`All`, `Todos`) disables that filter.
//!
//! # Settings
//!
//! `--set key=value` overrides one configuration key after the `--config` file is
//! read, e.g. `--set default_page_size=25 --set sentinels=all,any`.
//!
//! # Example
//!
//! ```text
//! $ tableview repairs.json --search ford --filter status=open --cap 2 --label repairs
//! {"id":1,"vehicle":"Ford Fiesta","status":"open"}
//! {"id":4,"vehicle":"Ford Focus","status":"open"}
//! Showing 2 of 3 repairs.
//! ```

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use tableview::engine::{StaticValue, ViewEngine};
use tableview::matching::{contains_folded, equals_folded, search_predicate};
use tableview::{Config, SearchMode, TableViewError};

#[derive(Debug, Parser)]
#[command(name = "tableview", version, about = "Filter, search and cap a JSON record list")]
struct Cli {
    /// JSON file containing an array of records.
    file: PathBuf,

    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Configuration override, `key=value`. Repeatable; applied after `--config`.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_setting)]
    settings: Vec<(String, String)>,

    /// Global search term.
    #[arg(short, long)]
    search: Option<String>,

    /// Fields the global search looks at (default: every scalar field).
    #[arg(long, value_delimiter = ',')]
    fields: Vec<String>,

    /// Column filter, `field=value` (exact) or `field~value` (contains). Repeatable.
    #[arg(short, long = "filter", value_parser = parse_filter)]
    filters: Vec<ColumnFilter>,

    /// Page size: a positive number, or `All`.
    #[arg(short, long)]
    cap: Option<String>,

    /// Plural noun for the summary line.
    #[arg(short, long)]
    label: Option<String>,

    /// Search mode override: `substring` or `fuzzy`.
    #[arg(long)]
    mode: Option<SearchMode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchKind {
    Exact,
    Contains,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnFilter {
    field: String,
    kind: MatchKind,
    value: String,
}

fn parse_filter(raw: &str) -> std::result::Result<ColumnFilter, String> {
    let (split_at, kind) = match (raw.find('='), raw.find('~')) {
        (Some(eq), Some(tilde)) if tilde < eq => (tilde, MatchKind::Contains),
        (Some(eq), _) => (eq, MatchKind::Exact),
        (None, Some(tilde)) => (tilde, MatchKind::Contains),
        (None, None) => return Err(format!("expected `field=value` or `field~value`, got `{raw}`")),
    };
    let field = raw[..split_at].trim();
    if field.is_empty() {
        return Err(format!("missing field name in `{raw}`"));
    }
    Ok(ColumnFilter {
        field: field.to_string(),
        kind,
        value: raw[split_at + 1..].to_string(),
    })
}

fn parse_setting(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected `key=value`, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in `{raw}`"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Renders a scalar JSON field as text. Objects, arrays and nulls have no text.
fn field_text(row: &Value, field: &str) -> Option<String> {
    match row.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn scalar_fields(row: &Value) -> Vec<String> {
    row.as_object()
        .map(|obj| obj.keys().filter_map(|k| field_text(row, k)).collect())
        .unwrap_or_default()
}

fn load_rows(path: &Path) -> tableview::Result<Vec<Value>> {
    let text = std::fs::read_to_string(path)?;
    let rows: Vec<Value> = serde_json::from_str(&text)?;
    tracing::debug!(rows = rows.len(), path = %path.display(), "records loaded");
    Ok(rows)
}

/// Builds the effective configuration: file (or defaults), then `--set`
/// overrides, then the dedicated `--label` and `--mode` flags.
fn resolve_config(cli: &Cli) -> tableview::Result<Config> {
    let base = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let overrides: BTreeMap<String, String> = cli.settings.iter().cloned().collect();
    let mut config = base.with_overrides(&overrides);

    if let Some(label) = &cli.label {
        config.entity_label.clone_from(label);
    }
    if let Some(mode) = cli.mode {
        config.search_mode = mode;
    }
    Ok(config)
}

fn run(cli: Cli, config: &Config) -> tableview::Result<()> {
    let rows = load_rows(&cli.file)?;

    let search_fields = cli.fields.clone();
    let predicate = search_predicate(config.search_mode, move |row: &Value| {
        if search_fields.is_empty() {
            scalar_fields(row)
        } else {
            search_fields.iter().filter_map(|f| field_text(row, f)).collect()
        }
    });

    let mut builder = ViewEngine::from_config(config, |rows: Arc<[Value]>| {
        for row in rows.iter() {
            println!("{row}");
        }
    })
    .master(rows)
    .summary_sink(|summary| println!("{summary}"));

    if let Some(cap) = &cli.cap {
        let page_size = config.page_size_selector();
        if !page_size.select(cap) {
            page_size.set_options([cap.as_str()]);
            page_size.select_index(0);
        }
        builder = builder.page_size(page_size);
    }

    if let Some(term) = cli.search {
        builder = builder.global_search(StaticValue::new(term), predicate);
    }

    let mut engine = builder.build();

    for filter in cli.filters {
        let ColumnFilter { field, kind, value } = filter;
        engine.add_column_filter(StaticValue::new(value), move |row: &Value, wanted: &str| {
            field_text(row, &field).is_some_and(|text| match kind {
                MatchKind::Exact => equals_folded(&text, wanted),
                MatchKind::Contains => contains_folded(&text, wanted),
            })
        });
    }

    let result = engine.refresh();
    tracing::info!(
        visible = result.visible_count(),
        total = result.total_count(),
        "done"
    );
    Ok(())
}

fn exit_code(error: &TableViewError) -> ExitCode {
    if matches!(error, TableViewError::Config(_) | TableViewError::ConfigParse(_)) {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Tracing is not up until the configuration is valid; report to stderr directly.
    let config = match resolve_config(&cli).and_then(|config| {
        tableview::initialize(&config)?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return exit_code(&e);
        }
    };

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "tableview failed");
            eprintln!("error: {e}");
            exit_code(&e)
        }
    }
}
