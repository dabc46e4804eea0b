use crate::error::{QmsError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The value a facet selection uses to mean "no constraint".
pub const ALL_SENTINEL: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Task,
    Document,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Task => "Task",
            RecordKind::Document => "Document",
        }
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "task" => Ok(RecordKind::Task),
            "document" | "doc" => Ok(RecordKind::Document),
            _ => Err(format!("Invalid record kind: {}", s)),
        }
    }
}

/// A task or a document revision, as consumed by the view pipeline.
///
/// Records are immutable inputs: the pipeline selects and regroups
/// references to them but never edits a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub kind: RecordKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub module: String,
    pub priority: String,
    pub status: String,
    pub business_unit: String,
    /// Due date for tasks, created date for documents.
    #[serde(
        alias = "due",
        alias = "due_date",
        alias = "created",
        deserialize_with = "deserialize_iso_date"
    )]
    pub date: NaiveDate,
    #[serde(default)]
    pub progress: u8,
}

impl Record {
    pub fn new(id: impl Into<String>, kind: RecordKind, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            description: None,
            author: None,
            module: String::new(),
            priority: String::new(),
            status: String::new(),
            business_unit: String::new(),
            date: NaiveDate::default(),
            progress: 0,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Module => Some(&self.module),
            Facet::Priority => Some(&self.priority),
            Facet::Status => Some(&self.status),
            Facet::BusinessUnit => Some(&self.business_unit),
            Facet::Kind => Some(self.kind.as_str()),
        }
    }

    /// Fields the free-text search looks at. Missing optional fields read as "".
    pub fn searchable_fields(&self) -> [&str; 4] {
        [
            self.title.as_str(),
            self.description.as_deref().unwrap_or(""),
            self.id.as_str(),
            self.author.as_deref().unwrap_or(""),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(QmsError::InvalidRecord {
                id: self.id.clone(),
                reason: "id cannot be empty".into(),
            });
        }
        if self.progress > 100 {
            return Err(QmsError::InvalidRecord {
                id: self.id.clone(),
                reason: format!("progress {} is outside 0-100", self.progress),
            });
        }
        Ok(())
    }
}

/// Enum-valued record fields a filter can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Module,
    Priority,
    Status,
    BusinessUnit,
    Kind,
}

impl Facet {
    pub fn all() -> &'static [Facet] {
        &[
            Facet::Module,
            Facet::Priority,
            Facet::Status,
            Facet::BusinessUnit,
            Facet::Kind,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Facet::Module => "module",
            Facet::Priority => "priority",
            Facet::Status => "status",
            Facet::BusinessUnit => "unit",
            Facet::Kind => "kind",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Facet {
    type Err = QmsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "module" => Ok(Facet::Module),
            "priority" => Ok(Facet::Priority),
            "status" => Ok(Facet::Status),
            "unit" | "business_unit" | "business-unit" => Ok(Facet::BusinessUnit),
            "kind" | "type" => Ok(Facet::Kind),
            _ => Err(QmsError::InvalidFacet(s.to_string())),
        }
    }
}

fn deserialize_iso_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_iso_date(&raw).map_err(serde::de::Error::custom)
}

/// Parses a strict, zero-padded `YYYY-MM-DD` date.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    if trimmed.len() != 10 {
        return Err(QmsError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| QmsError::InvalidDate(s.to_string()))
}
