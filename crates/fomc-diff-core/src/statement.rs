//! FOMC statement records

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

static NON_ID_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9-]").unwrap());
static DASH_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());

/// Title phrases shortened when deriving an id
const TITLE_ABBREVIATIONS: &[(&str, &str)] = &[
    ("federal reserve issues fomc statement", "fomc-statement"),
    ("statement on longer-run goals", "longer-run-goals"),
    ("minutes of the federal open market committee", "fomc-minutes"),
];

/// Kind of statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatementType {
    /// Policy statement released after an FOMC meeting
    Meeting,
    /// Statement on Longer-Run Goals and Monetary Policy Strategy
    LongerRunGoals,
    /// Meeting minutes
    Minutes,
    Other,
}

impl StatementType {
    pub const ALL: [StatementType; 4] = [
        StatementType::Meeting,
        StatementType::LongerRunGoals,
        StatementType::Minutes,
        StatementType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatementType::Meeting => "meeting",
            StatementType::LongerRunGoals => "longer-run-goals",
            StatementType::Minutes => "minutes",
            StatementType::Other => "other",
        }
    }

    /// Human-readable name for listings
    pub fn label(&self) -> &'static str {
        match self {
            StatementType::Meeting => "Meeting Statements",
            StatementType::LongerRunGoals => "Longer-Run Goals",
            StatementType::Minutes => "Meeting Minutes",
            StatementType::Other => "Other Statements",
        }
    }

    /// Guess the type of a statement from its title and content
    pub fn classify(title: &str, content: &str) -> Self {
        let title = title.to_lowercase();
        let content = content.to_lowercase();

        if title.contains("economic projections") || content.contains("economic projections") {
            return StatementType::Other;
        }
        if title.contains("longer-run goals") || title.contains("longer run goals") {
            return StatementType::LongerRunGoals;
        }
        if title.contains("minutes") {
            return StatementType::Minutes;
        }
        if title.contains("fomc statement")
            || title.contains("federal reserve issues fomc")
            || title.contains("federal open market committee")
            || content.contains("committee decided")
            || content.contains("target range for the federal funds rate")
        {
            return StatementType::Meeting;
        }
        StatementType::Other
    }
}

impl fmt::Display for StatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown statement type: {0}")]
pub struct UnknownStatementType(pub String);

impl FromStr for StatementType {
    type Err = UnknownStatementType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatementType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownStatementType(s.to_string()))
    }
}

/// A published statement, as handed over by ingestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: StatementType,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Statement {
    /// Build a statement whose id is derived from its date and title
    pub fn new(
        date: NaiveDate,
        title: impl Into<String>,
        kind: StatementType,
        content: impl Into<String>,
    ) -> Self {
        let title = title.into();
        Self {
            id: statement_id(date, &title),
            date,
            title,
            kind,
            content: content.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Date in the `Dec 18, 2024` form
    pub fn date_label(&self) -> String {
        format_date(self.date)
    }

    /// `Dec 18, 2024 - Federal Reserve issues FOMC statement`
    pub fn label(&self) -> String {
        format!("{} - {}", self.date_label(), self.title)
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Derive a statement id from its date and title.
///
/// Common FOMC titles are shortened, anything outside `[a-z0-9-]` becomes a
/// dash, dash runs collapse, and the result is prefixed with the ISO date.
pub fn statement_id(date: NaiveDate, title: &str) -> String {
    let mut slug = title.to_lowercase();
    for (phrase, short) in TITLE_ABBREVIATIONS {
        slug = slug.replace(phrase, short);
    }
    let slug = NON_ID_CHARS.replace_all(&slug, "-");
    let slug = DASH_RUNS.replace_all(&slug, "-");
    let slug = slug.trim_matches('-');

    format!("{}-{}", date.format("%Y-%m-%d"), slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_statement_id() {
        assert_eq!(
            statement_id(date("2024-12-18"), "Federal Reserve issues FOMC statement"),
            "2024-12-18-fomc-statement"
        );
        assert_eq!(
            statement_id(
                date("2024-01-24"),
                "Statement on Longer-Run Goals and Monetary Policy Strategy"
            ),
            "2024-01-24-longer-run-goals-and-monetary-policy-strategy"
        );
        assert_eq!(
            statement_id(date("2008-12-16"), "  FOMC: Statement (Dec.)  "),
            "2008-12-16-fomc-statement-dec"
        );
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            StatementType::classify("Federal Reserve issues FOMC statement", ""),
            StatementType::Meeting
        );
        assert_eq!(
            StatementType::classify("Statement on Longer-Run Goals", ""),
            StatementType::LongerRunGoals
        );
        assert_eq!(
            StatementType::classify("Minutes of the Federal Open Market Committee", ""),
            StatementType::Minutes
        );
        assert_eq!(
            StatementType::classify("Press release", "The Committee decided to hold."),
            StatementType::Meeting
        );
        assert_eq!(
            StatementType::classify("FOMC statement", "See the Summary of Economic Projections."),
            StatementType::Other
        );
        assert_eq!(
            StatementType::classify("Board announces", "Nothing relevant."),
            StatementType::Other
        );
    }

    #[test]
    fn test_type_round_trips_through_str() {
        for kind in StatementType::ALL {
            assert_eq!(kind.as_str().parse::<StatementType>(), Ok(kind));
        }
        assert!("annual".parse::<StatementType>().is_err());
    }

    #[test]
    fn test_labels() {
        let statement = Statement::new(
            date("2024-09-18"),
            "Federal Reserve issues FOMC statement",
            StatementType::Meeting,
            "text",
        );
        assert_eq!(statement.date_label(), "Sep 18, 2024");
        assert_eq!(
            statement.label(),
            "Sep 18, 2024 - Federal Reserve issues FOMC statement"
        );
    }

    #[test]
    fn test_serialized_shape() {
        let statement = Statement::new(
            date("2024-11-07"),
            "Federal Reserve issues FOMC statement",
            StatementType::LongerRunGoals,
            "text",
        );
        let value = serde_json::to_value(&statement).unwrap();
        assert_eq!(value["id"], "2024-11-07-fomc-statement");
        assert_eq!(value["date"], "2024-11-07");
        assert_eq!(value["type"], "longer-run-goals");
        assert!(value.get("url").is_none());
    }
}
