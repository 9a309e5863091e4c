//! Tabular (CSV) codec and legacy-record migration.
//!
//! One entry maps to one fully-quoted 13-field row. Import locates columns by
//! header name rather than position, so files exported by older or newer
//! versions with reordered columns still load. Every imported row is minted a
//! fresh id: an import always creates new entries, it never merges by id.

use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;
use uuid::Uuid;

use crate::models::{catalog, Day, Entry, MAX_SETS};

/// Export column order. Import tolerates any order via header lookup.
pub const HEADER: [&str; 13] = [
    "date",
    "week",
    "day",
    "exercise",
    "exerciseLabel",
    "weight",
    "set1",
    "set2",
    "set3",
    "set4",
    "set5",
    "rpe",
    "notes",
];

/// Unparseable CSV line. The row is skipped; imports never fail wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    MalformedRow(String),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::MalformedRow(reason) => write!(f, "malformed row: {}", reason),
        }
    }
}

impl std::error::Error for CodecError {}

/// Flattens an entry into the 13 raw field values, in [`HEADER`] order.
///
/// Sets are right-padded with empty strings to exactly 5 slots and internal
/// newlines in notes are collapsed to spaces so the row stays on one line.
pub fn to_row(entry: &Entry) -> Vec<String> {
    let mut row = vec![
        entry.date.to_string(),
        entry.week.clone(),
        entry.day.to_string(),
        entry.exercise.clone(),
        entry.exercise_label.clone(),
        entry.weight.clone(),
    ];
    for i in 0..MAX_SETS {
        row.push(entry.sets.get(i).cloned().unwrap_or_default());
    }
    row.push(entry.rpe.clone().unwrap_or_default());
    let notes = entry.notes.clone().unwrap_or_default();
    row.push(notes.replace("\r\n", " ").replace('\n', " "));
    row
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Renders the whole collection as a CSV document, header first, every field
/// quoted.
pub fn export_csv(entries: &[Entry]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(HEADER.iter().map(|h| quote(h)).collect::<Vec<_>>().join(","));
    for entry in entries {
        lines.push(
            to_row(entry)
                .iter()
                .map(|f| quote(f))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    lines.join("\n")
}

/// Default export filename, embedding the current date.
pub fn export_filename(today: NaiveDate) -> String {
    format!("strength_log_{}.csv", today)
}

/// Splits one line into unquoted field values.
///
/// Quoted fields may contain commas and doubled-quote escapes. An unbalanced
/// quote anywhere makes the whole line malformed.
fn tokenize(line: &str) -> Result<Vec<String>, CodecError> {
    let mut fields = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        let mut field = String::new();
        if chars.peek() == Some(&'"') {
            chars.next();
            let mut closed = false;
            while let Some(c) = chars.next() {
                if c == '"' {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        closed = true;
                        break;
                    }
                } else {
                    field.push(c);
                }
            }
            if !closed {
                return Err(CodecError::MalformedRow("unbalanced quote".to_string()));
            }
            fields.push(field);
            match chars.next() {
                None => break,
                Some(',') => continue,
                Some(c) => {
                    return Err(CodecError::MalformedRow(format!(
                        "unexpected '{}' after closing quote",
                        c
                    )))
                }
            }
        } else {
            let mut saw_comma = false;
            for c in chars.by_ref() {
                if c == ',' {
                    saw_comma = true;
                    break;
                }
                field.push(c);
            }
            if field.contains('"') {
                return Err(CodecError::MalformedRow(
                    "quote inside unquoted field".to_string(),
                ));
            }
            fields.push(field);
            if !saw_comma {
                break;
            }
        }
    }

    Ok(fields)
}

/// Parses the header line into column names. The header is parsed leniently
/// (split on commas, quotes stripped); only data rows go through the strict
/// tokenizer.
fn parse_header(line: &str) -> Vec<String> {
    line.split(',')
        .map(|h| h.replace('"', "").trim().to_string())
        .collect()
}

/// Parses one data line into an entry using the supplied header for column
/// positions. Missing columns take the same defaults as the form: today's
/// date, week "1", day A. The exercise is resolved through the catalog from
/// the `exercise` column, falling back to `exerciseLabel`.
pub fn from_row(header: &[String], line: &str, today: NaiveDate) -> Result<Entry, CodecError> {
    let fields = tokenize(line)?;

    let date =
        NaiveDate::parse_from_str(column(header, &fields, "date"), "%Y-%m-%d").unwrap_or(today);
    let week = match column(header, &fields, "week") {
        "" => "1".to_string(),
        w => w.to_string(),
    };
    let day = column(header, &fields, "day").parse::<Day>().unwrap_or(Day::A);

    let key = match column(header, &fields, "exercise") {
        "" => column(header, &fields, "exerciseLabel"),
        k => k,
    };
    let ex = catalog::lookup(key);

    let sets = (1..=MAX_SETS)
        .map(|i| column(header, &fields, &format!("set{}", i)).to_string())
        .collect();
    let opt = |s: &str| {
        if s.is_empty() {
            None
        } else {
            Some(s.to_string())
        }
    };

    Ok(Entry {
        id: Uuid::new_v4().to_string(),
        date,
        week,
        day,
        exercise: ex.id,
        exercise_label: ex.label,
        weight: column(header, &fields, "weight").to_string(),
        sets,
        rpe: opt(column(header, &fields, "rpe")),
        notes: opt(column(header, &fields, "notes")),
    })
}

/// Field value for a named column, or empty when the column or value is
/// missing.
fn column<'a>(header: &[String], fields: &'a [String], name: &str) -> &'a str {
    header
        .iter()
        .position(|h| h == name)
        .and_then(|i| fields.get(i))
        .map(String::as_str)
        .unwrap_or("")
}

/// Outcome of a CSV import: the parsed entries plus how many rows were
/// dropped as malformed.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub entries: Vec<Entry>,
    pub skipped: usize,
}

/// Parses a whole CSV document. Malformed rows are counted and skipped; one
/// bad row never aborts the rest of the file.
pub fn import_csv(text: &str, today: NaiveDate) -> ImportReport {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let header = match lines.next() {
        Some(line) => parse_header(line),
        None => return ImportReport::default(),
    };

    let mut report = ImportReport::default();
    for line in lines {
        match from_row(&header, line, today) {
            Ok(entry) => report.entries.push(entry),
            Err(e) => {
                tracing::warn!("Skipping CSV row: {}", e);
                report.skipped += 1;
            }
        }
    }
    report
}

/// The week tag in v1 records was sometimes stored as a bare number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LegacyWeek {
    Text(String),
    Number(f64),
}

impl LegacyWeek {
    fn into_tag(self) -> String {
        match self {
            LegacyWeek::Text(s) if s.is_empty() => "1".to_string(),
            LegacyWeek::Text(s) => s,
            LegacyWeek::Number(n) if n.fract() == 0.0 => format!("{}", n as i64),
            LegacyWeek::Number(n) => n.to_string(),
        }
    }
}

/// Pre-label cache record shape: no `exerciseLabel`, every field optional,
/// `exercise` may hold either an identifier or a display label.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub week: Option<LegacyWeek>,
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub exercise: Option<String>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub sets: Option<Vec<String>>,
    #[serde(default)]
    pub rpe: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Upgrades a v1 record to the current shape.
///
/// The exercise key is resolved through the catalog so that records which
/// stored a display label ("Hip Thrust") come out with the identifier ("HT")
/// and a proper label. Missing fields take the same defaults as `from_row`.
pub fn migrate_legacy(old: LegacyEntry, today: NaiveDate) -> Entry {
    let ex = catalog::lookup(old.exercise.as_deref().unwrap_or(""));
    let mut sets = old.sets.unwrap_or_default();
    sets.truncate(MAX_SETS);
    let opt = |v: Option<String>| v.filter(|s| !s.is_empty());

    Entry {
        id: old
            .id
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        date: old
            .date
            .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok())
            .unwrap_or(today),
        week: old.week.map(LegacyWeek::into_tag).unwrap_or_else(|| "1".to_string()),
        day: old
            .day
            .and_then(|d| d.parse::<Day>().ok())
            .unwrap_or(Day::A),
        exercise: ex.id,
        exercise_label: ex.label,
        weight: old.weight.unwrap_or_default(),
        sets,
        rpe: opt(old.rpe),
        notes: opt(old.notes),
    }
}
