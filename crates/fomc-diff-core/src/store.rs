//! Loading statement records produced by ingestion

use crate::normalize::normalize;
use crate::statement::{statement_id, Statement, StatementType};
use chrono::NaiveDate;
use saphyr_parser::{Event, Parser, ScalarStyle};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const TOML_DELIMITER: &str = "+++";
const YAML_DELIMITER: &str = "---";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid statement catalog {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid front matter: {0}")]
    Frontmatter(#[from] toml::de::Error),
    #[error("Invalid YAML front matter: {0}")]
    Yaml(String),
    #[error("Invalid statement fields: {0}")]
    Fields(#[from] serde_json::Error),
    #[error("Missing +++ or --- front matter")]
    MissingFrontmatter,
    #[error("Invalid date {0:?}, expected yyyy-mm-dd")]
    InvalidDate(String),
    #[error("Statement {0:?} has no content")]
    EmptyContent(String),
    #[error("{path}: {source}")]
    Record {
        path: PathBuf,
        #[source]
        source: Box<StoreError>,
    },
}

impl StoreError {
    fn in_file(self, path: &Path) -> Self {
        StoreError::Record {
            path: path.to_path_buf(),
            source: Box::new(self),
        }
    }
}

/// A statement as written by ingestion: id and type may be left for us to derive
#[derive(Debug, Deserialize)]
struct StatementRecord {
    #[serde(default)]
    id: Option<String>,
    date: String,
    title: String,
    #[serde(rename = "type", default)]
    kind: Option<StatementType>,
    #[serde(default)]
    content: String,
    #[serde(default)]
    url: Option<String>,
}

impl StatementRecord {
    fn into_statement(self) -> Result<Statement, StoreError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| StoreError::InvalidDate(self.date.clone()))?;
        let content = normalize(&self.content);
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| statement_id(date, &self.title));
        if content.is_empty() {
            return Err(StoreError::EmptyContent(id));
        }
        let kind = self
            .kind
            .unwrap_or_else(|| StatementType::classify(&self.title, &content));

        Ok(Statement {
            id,
            date,
            title: self.title.trim().to_string(),
            kind,
            content,
            url: self.url.filter(|url| !url.is_empty()),
        })
    }
}

/// Front matter block of a Markdown statement
enum Frontmatter<'a> {
    Toml(&'a str),
    Yaml(&'a str),
}

/// Split a Markdown document into its front matter and body.
///
/// `+++` delimits TOML and `---` delimits YAML.
fn split_frontmatter(document: &str) -> Option<(Frontmatter<'_>, &str)> {
    let document = document.trim_start();
    for delimiter in [TOML_DELIMITER, YAML_DELIMITER] {
        let Some(rest) = document.strip_prefix(delimiter) else {
            continue;
        };
        let end = rest.find(&format!("\n{delimiter}"))?;
        let frontmatter = &rest[..end];
        let body = &rest[end + 1 + delimiter.len()..];
        return Some(match delimiter {
            TOML_DELIMITER => (Frontmatter::Toml(frontmatter), body),
            _ => (Frontmatter::Yaml(frontmatter), body),
        });
    }
    None
}

/// Read TOML front matter. A bare TOML date is accepted as well as a date string.
fn toml_record(frontmatter: &str) -> Result<StatementRecord, StoreError> {
    let mut table: toml::Table = frontmatter.parse()?;
    if let Some(toml::Value::Datetime(date)) = table.get("date") {
        let date = date.to_string();
        table.insert("date".to_string(), toml::Value::String(date));
    }
    Ok(toml::Value::Table(table).try_into()?)
}

fn is_yaml_null(value: &str) -> bool {
    matches!(value, "" | "~" | "null" | "Null" | "NULL")
}

/// Read YAML front matter: a flat mapping of scalar fields
fn yaml_record(frontmatter: &str) -> Result<StatementRecord, StoreError> {
    let mut fields = serde_json::Map::new();
    let mut key: Option<String> = None;
    let mut depth = 0usize;

    let mut parser = Parser::new_from_str(frontmatter);
    while let Some(event) = parser.next_event() {
        let (event, _span) = event.map_err(|e| StoreError::Yaml(e.to_string()))?;
        match event {
            Event::MappingStart(..) => {
                depth += 1;
                if depth > 1 {
                    return Err(StoreError::Yaml("nested mappings are not supported".into()));
                }
            }
            Event::SequenceStart(..) => {
                return Err(StoreError::Yaml("sequences are not supported".into()));
            }
            Event::Scalar(value, style, ..) => match key.take() {
                None => key = Some(value.into_owned()),
                Some(name) => {
                    if matches!(style, ScalarStyle::Plain) && is_yaml_null(&value) {
                        continue;
                    }
                    fields.insert(name, serde_json::Value::String(value.into_owned()));
                }
            },
            _ => {}
        }
    }

    Ok(serde_json::from_value(serde_json::Value::Object(fields))?)
}

/// Parse one Markdown statement with `+++` TOML or `---` YAML front matter
pub fn parse_markdown(document: &str) -> Result<Statement, StoreError> {
    let (frontmatter, body) = split_frontmatter(document).ok_or(StoreError::MissingFrontmatter)?;
    let mut record = match frontmatter {
        Frontmatter::Toml(text) => toml_record(text)?,
        Frontmatter::Yaml(text) => yaml_record(text)?,
    };
    record.content = body.to_string();
    record.into_statement()
}

/// Parse a JSON array of statements. Records that fail validation are skipped
/// with a warning; only a document that is not an array is an error.
pub fn parse_catalog(json: &str) -> Result<Vec<Statement>, serde_json::Error> {
    let records: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let statements = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match catalog_record(value) {
            Ok(statement) => Some(statement),
            Err(err) => {
                warn!(index, error = %err, "skipping invalid statement record");
                None
            }
        })
        .collect();
    Ok(statements)
}

fn catalog_record(value: serde_json::Value) -> Result<Statement, StoreError> {
    let record: StatementRecord = serde_json::from_value(value)?;
    record.into_statement()
}

fn read(path: &Path) -> Result<String, StoreError> {
    std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_catalog(path: &Path) -> Result<Vec<Statement>, StoreError> {
    parse_catalog(&read(path)?).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn is_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Read-only collection of statements, newest first
#[derive(Debug, Clone, Default)]
pub struct StatementStore {
    statements: Vec<Statement>,
}

impl StatementStore {
    /// Build a store; later records with an id already seen are dropped
    pub fn new(statements: Vec<Statement>) -> Self {
        let mut seen = HashSet::new();
        let mut statements: Vec<Statement> = statements
            .into_iter()
            .filter(|s| {
                let fresh = seen.insert(s.id.clone());
                if !fresh {
                    warn!(id = %s.id, "skipping duplicate statement id");
                }
                fresh
            })
            .collect();
        statements.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Self { statements }
    }

    /// Load statements from a directory, a JSON catalog or a single Markdown file.
    ///
    /// Directories are scanned (not recursively) for `.md` and `.json` files in
    /// name order. Records in a directory or catalog that fail validation are
    /// skipped with a warning; a single Markdown file that fails is an error.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let statements = if path.is_dir() {
            Self::load_dir(path)?
        } else if is_extension(path, "json") {
            load_catalog(path)?
        } else {
            let statement = parse_markdown(&read(path)?).map_err(|e| e.in_file(path))?;
            vec![statement]
        };

        let store = Self::new(statements);
        debug!(path = %path.display(), statements = store.len(), "loaded statements");
        Ok(store)
    }

    fn load_dir(dir: &Path) -> Result<Vec<Statement>, StoreError> {
        let entries = std::fs::read_dir(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.is_file() && (is_extension(&path, "md") || is_extension(&path, "json")) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut statements = Vec::new();
        for path in paths {
            if is_extension(&path, "json") {
                match load_catalog(&path) {
                    Ok(found) => statements.extend(found),
                    Err(err) => {
                        warn!(path = %path.display(), error = %err, "skipping invalid catalog")
                    }
                }
                continue;
            }
            match parse_markdown(&read(&path)?) {
                Ok(statement) => statements.push(statement),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping invalid statement")
                }
            }
        }
        Ok(statements)
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// All statements, newest first
    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    /// Statements of one type, or all of them for `None`; newest first
    pub fn filter(&self, kind: Option<StatementType>) -> impl Iterator<Item = &Statement> {
        self.statements
            .iter()
            .filter(move |s| kind.map_or(true, |k| s.kind == k))
    }

    pub fn get(&self, id: &str) -> Option<&Statement> {
        self.statements.iter().find(|s| s.id == id)
    }

    /// The most recent statement of a type and the one before it, as (older, newer)
    pub fn latest_pair(&self, kind: Option<StatementType>) -> Option<(&Statement, &Statement)> {
        let mut recent = self.filter(kind);
        let newer = recent.next()?;
        let older = recent.next()?;
        Some((older, newer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECEMBER: &str = r#"+++
date = "2024-12-18"
title = "Federal Reserve issues FOMC statement"
type = "meeting"
url = "https://www.federalreserve.gov/newsevents/pressreleases/monetary20241218a.htm"
+++

The Committee decided to lower the target range.

The Committee is strongly committed.
"#;

    const FOMC_TITLE: &str = "Federal Reserve issues FOMC statement";

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_markdown() {
        let statement = parse_markdown(DECEMBER).unwrap();
        assert_eq!(statement.id, "2024-12-18-fomc-statement");
        assert_eq!(statement.date, date("2024-12-18"));
        assert_eq!(statement.kind, StatementType::Meeting);
        assert_eq!(
            statement.content,
            "The Committee decided to lower the target range.\n\nThe Committee is strongly committed."
        );
        assert!(statement.url.is_some());
    }

    #[test]
    fn test_parse_markdown_classifies_missing_type() {
        let doc = concat!(
            "+++\n",
            "date = \"2024-01-24\"\n",
            "title = \"Statement on Longer-Run Goals and Monetary Policy Strategy\"\n",
            "+++\n",
            "The Committee seeks to explain.",
        );
        let statement = parse_markdown(doc).unwrap();
        assert_eq!(statement.kind, StatementType::LongerRunGoals);
        assert_eq!(statement.content, "The Committee seeks to explain.");
    }

    #[test]
    fn test_parse_markdown_errors() {
        assert!(matches!(
            parse_markdown("no front matter"),
            Err(StoreError::MissingFrontmatter)
        ));
        assert!(matches!(
            parse_markdown("+++\ndate = \"18/12/2024\"\ntitle = \"x\"\n+++\nbody"),
            Err(StoreError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_markdown("+++\ndate = \"2024-12-18\"\ntitle = \"x\"\n+++\n \n"),
            Err(StoreError::EmptyContent(_))
        ));
        assert!(matches!(
            parse_markdown("+++\ndate = \"2024-12-18\"\n+++\nbody"),
            Err(StoreError::Frontmatter(_))
        ));
    }

    #[test]
    fn test_parse_catalog_skips_invalid() {
        let json = r#"[
            {"date": "2024-11-07", "title": "Federal Reserve issues FOMC statement", "content": "Rates fell."},
            {"date": "not a date", "title": "Broken", "content": "x"},
            {"id": "custom", "date": "2024-09-18", "title": "Federal Reserve issues FOMC statement", "type": "other", "content": "Rates fell more."}
        ]"#;
        let statements = parse_catalog(json).unwrap();
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].id, "2024-11-07-fomc-statement");
        assert_eq!(statements[1].id, "custom");
        assert_eq!(statements[1].kind, StatementType::Other);
    }

    #[test]
    fn test_store_orders_and_filters() {
        let meeting = |day: &str, content: &str| {
            Statement::new(date(day), FOMC_TITLE, StatementType::Meeting, content)
        };
        let store = StatementStore::new(vec![
            meeting("2024-09-18", "a"),
            Statement::new(
                date("2024-01-24"),
                "Statement on Longer-Run Goals",
                StatementType::LongerRunGoals,
                "b",
            ),
            meeting("2024-12-18", "c"),
            meeting("2024-12-18", "dup"),
        ]);

        assert_eq!(store.len(), 3);
        let dates: Vec<_> = store.iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![date("2024-12-18"), date("2024-09-18"), date("2024-01-24")]);
        assert_eq!(
            store.get("2024-12-18-fomc-statement").map(|s| s.content.as_str()),
            Some("c")
        );
        assert_eq!(store.filter(Some(StatementType::LongerRunGoals)).count(), 1);
        assert_eq!(store.filter(None).count(), 3);

        let (older, newer) = store.latest_pair(Some(StatementType::Meeting)).unwrap();
        assert_eq!(older.date, date("2024-09-18"));
        assert_eq!(newer.date, date("2024-12-18"));
        assert!(store.latest_pair(Some(StatementType::Minutes)).is_none());
    }

    #[test]
    fn test_load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("2024-12-18.md"), DECEMBER).unwrap();
        std::fs::write(dir.path().join("broken.md"), "no front matter").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        std::fs::write(
            dir.path().join("catalog.json"),
            r#"[{"date": "2024-11-07", "title": "Federal Reserve issues FOMC statement", "content": "Earlier."}]"#,
        )
        .unwrap();

        let store = StatementStore::load(dir.path()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.iter().next().map(|s| s.id.as_str()),
            Some("2024-12-18-fomc-statement")
        );
    }

    #[test]
    fn test_parse_yaml_frontmatter() {
        let doc = r#"---
id: 2024-12-18
date: 2024-12-18
title: "Federal Reserve issues FOMC statement: December"
type: meeting
url: https://www.federalreserve.gov/newsevents/pressreleases/monetary20241218a.htm
---

The Committee decided to lower the target range.
"#;
        let statement = parse_markdown(doc).unwrap();
        assert_eq!(statement.id, "2024-12-18");
        assert_eq!(statement.date, date("2024-12-18"));
        assert_eq!(statement.title, "Federal Reserve issues FOMC statement: December");
        assert_eq!(statement.kind, StatementType::Meeting);
        assert_eq!(
            statement.url.as_deref(),
            Some("https://www.federalreserve.gov/newsevents/pressreleases/monetary20241218a.htm")
        );
        assert_eq!(statement.content, "The Committee decided to lower the target range.");
    }

    #[test]
    fn test_parse_yaml_frontmatter_errors() {
        assert!(matches!(
            parse_markdown("---\ndate: 2024-12-18\ntitle:\n  nested: x\n---\nbody"),
            Err(StoreError::Yaml(_))
        ));
        assert!(matches!(
            parse_markdown("---\ndate: 2024-12-18\n---\nbody"),
            Err(StoreError::Fields(_))
        ));
        assert!(matches!(
            parse_markdown("---\ntitle: x\ndate: tomorrow\n---\nbody"),
            Err(StoreError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_parse_toml_bare_date() {
        let doc = concat!(
            "+++\n",
            "date = 2024-12-18\n",
            "title = \"Federal Reserve issues FOMC statement\"\n",
            "+++\n",
            "Body.",
        );
        let statement = parse_markdown(doc).unwrap();
        assert_eq!(statement.date, date("2024-12-18"));
        assert_eq!(statement.id, "2024-12-18-fomc-statement");
    }

    #[test]
    fn test_parse_catalog_skips_records_that_do_not_deserialize() {
        let json = r#"[
            {"date": "2024-11-07", "title": "Federal Reserve issues FOMC statement", "content": "Rates fell."},
            {"date": "2024-10-01", "title": "Annual report", "type": "annual", "content": "x"},
            {"date": "2024-09-18", "content": "No title."}
        ]"#;
        let statements = parse_catalog(json).unwrap();
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].id, "2024-11-07-fomc-statement");

        assert!(parse_catalog(r#"{"date": "2024-11-07"}"#).is_err());
    }

    #[test]
    fn test_load_directory_skips_invalid_catalog() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("2024-12-18.md"), DECEMBER).unwrap();
        std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        std::fs::write(
            dir.path().join("catalog.json"),
            r#"[{"date": "2024-11-07", "title": "Federal Reserve issues FOMC statement",
                 "content": "Earlier."},
                {"date": "2024-11-08", "title": "Minutes", "type": "annual", "content": "x"}]"#,
        )
        .unwrap();

        let store = StatementStore::load(dir.path()).unwrap();
        let ids: Vec<_> = store.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["2024-12-18-fomc-statement", "2024-11-07-fomc-statement"]);
    }

    #[test]
    fn test_load_single_file_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.md");
        std::fs::write(&path, "no front matter").unwrap();

        let err = StatementStore::load(&path).unwrap_err();
        assert!(err.to_string().contains("bad.md"));
        assert!(err.to_string().contains("front matter"));
    }
}
