//! Argument parsing and the filter run.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::Parser;
use multisearch::{
    group_by, records_from_json, Engine, EngineOptions, FieldDescriptor, FieldKey, Fields,
    Searchable,
};
use multisearch_input::parse_shorthand;
use serde_json::{Map, Value as Json};
use tracing::{debug, info};

use crate::row::Row;

/// Multisearch - filter JSON records with search clauses
#[derive(Parser, Debug)]
#[command(name = "multisearch")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON file holding an array of objects ("-" reads stdin)
    pub input: PathBuf,

    /// Search clause: "Label:value", "field:value", or plain text for all fields
    #[arg(short = 'q', long = "query", value_name = "QUERY")]
    pub queries: Vec<String>,

    /// Declare a searchable field (defaults to the keys of the first record)
    #[arg(short = 'f', long = "field", value_name = "NAME[=LABEL]")]
    pub fields: Vec<FieldSpec>,

    /// Offer suggestions for a field
    #[arg(long = "suggest", value_name = "NAME")]
    pub suggest: Vec<String>,

    /// Offer exact-match suggestions for a field
    #[arg(long = "strict", value_name = "NAME")]
    pub strict: Vec<String>,

    /// Read a field's string values as dates
    #[arg(long = "date-field", value_name = "NAME")]
    pub date_fields: Vec<String>,

    /// Group results by the value of a field
    #[arg(short = 'g', long, value_name = "FIELD")]
    pub group_by: Option<String>,

    /// Engine options file (YAML, or JSON with a .json extension)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Match strings case-sensitively
    #[arg(long)]
    pub case_sensitive: bool,

    /// Keep groups that end up empty
    #[arg(long)]
    pub show_empty: bool,

    /// Search only this field for plain-text queries
    #[arg(long, value_name = "FIELD")]
    pub global: Option<String>,

    /// A query replaces earlier queries on the same field
    #[arg(long = "override")]
    pub override_same_field: bool,

    /// Print the suggestion list for a field instead of records
    #[arg(long, value_name = "FIELD")]
    pub suggestions: Option<String>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// A `--field` value: a field name and an optional label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
}

impl FromStr for FieldSpec {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (name, label) = match s.split_once('=') {
            Some((name, label)) => (name.trim(), label.trim()),
            None => (s.trim(), s.trim()),
        };
        if name.is_empty() {
            return Err(format!("Empty field name in '{}'", s));
        }
        Ok(FieldSpec {
            name: name.to_string(),
            label: if label.is_empty() { name } else { label }.to_string(),
        })
    }
}

/// Runs the filter and returns the JSON to print.
pub fn run(args: &Args) -> Result<String> {
    let rows = load_rows(&args.input, &args.date_fields)?;
    let options = engine_options(args)?;

    let specs = if args.fields.is_empty() {
        default_fields(&rows)
    } else {
        args.fields.clone()
    };
    let descriptors = specs.into_iter().map(|spec| describe(spec, args));

    let mut builder = Engine::<Row>::builder().fields(descriptors).options(options);
    if let Some(field) = args.group_by.clone() {
        builder = builder.categorizer(group_by(move |row: &Row| {
            row.field_value(&field).canonical_text().into_owned()
        }));
    }
    let mut engine = builder.source(rows).build()?;

    if let Some(field) = &args.suggestions {
        if engine.fields().get(field).is_none() {
            bail!("Unknown field '{}'", field);
        }
        engine.select_field(field.as_str());
        let list = engine.suggestions(field).unwrap_or_default();
        return Ok(serde_json::to_string_pretty(list)?);
    }

    for query in &args.queries {
        let (field, text) = resolve_query(engine.fields(), query);
        debug!(field = %field, query = text, "adding clause");
        engine.add_clause(field, text);
    }
    engine.sync();
    info!(
        matched = engine.records().len(),
        clauses = engine.clauses().len(),
        "filtered records"
    );

    let output = if args.group_by.is_some() {
        let mut groups = Map::new();
        for (key, rows) in engine.categories() {
            groups.insert(key.to_string(), serde_json::to_value(rows)?);
        }
        serde_json::to_string_pretty(&groups)?
    } else {
        serde_json::to_string_pretty(&engine.records())?
    };
    Ok(output)
}

/// Picks the target of a `--query` value.
///
/// A prefix before the first `:` that names a field by label, or failing
/// that by name, targets that field. Anything else searches all fields.
pub fn resolve_query<'q>(fields: &Fields, query: &'q str) -> (FieldKey, &'q str) {
    if let Some((field, value)) = parse_shorthand(fields, query) {
        return (FieldKey::named(field.name()), value);
    }
    if let Some((name, value)) = query.split_once(':') {
        if let Some(field) = fields.get(name) {
            return (FieldKey::named(field.name()), value);
        }
    }
    (FieldKey::All, query)
}

fn describe(spec: FieldSpec, args: &Args) -> FieldDescriptor {
    let field = FieldDescriptor::new(spec.name.as_str(), spec.label);
    if args.strict.contains(&spec.name) {
        field.with_suggestions().strict()
    } else if args.suggest.contains(&spec.name) {
        field.with_suggestions()
    } else {
        field
    }
}

fn default_fields(rows: &[Row]) -> Vec<FieldSpec> {
    rows.first()
        .map(|row| {
            row.keys()
                .map(|key| FieldSpec {
                    name: key.to_string(),
                    label: key.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn load_rows(path: &Path, date_fields: &[String]) -> Result<Vec<Row>> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    };
    let json: Json = serde_json::from_str(&text)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;
    let records = records_from_json(json)?;
    Ok(records
        .into_iter()
        .map(|record| Row::new(record, date_fields))
        .collect())
}

fn engine_options(args: &Args) -> Result<EngineOptions> {
    let mut options = match &args.config {
        Some(path) => load_options(path)?,
        None => EngineOptions::default(),
    };
    if args.case_sensitive {
        options.case_sensitive = true;
    }
    if args.show_empty {
        options.show_empty_categories = true;
    }
    if args.override_same_field {
        options.override_existing_queries_with_same_field = true;
    }
    if let Some(field) = &args.global {
        options.global_search_replacement = Some(field.clone());
    }
    Ok(options)
}

fn load_options(path: &Path) -> Result<EngineOptions> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    let options = if is_json {
        EngineOptions::from_json_str(&text)?
    } else {
        serde_yaml::from_str(&text)
            .with_context(|| format!("Invalid YAML in {}", path.display()))?
    };
    Ok(options)
}
