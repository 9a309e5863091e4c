use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::catalog;

/// Maximum number of set slots per entry.
pub const MAX_SETS: usize = 5;

/// One of the two training-day templates in the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Day {
    #[serde(rename = "A")]
    #[value(name = "A", alias = "a")]
    A,
    #[serde(rename = "B")]
    #[value(name = "B", alias = "b")]
    B,
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Day::A => write!(f, "A"),
            Day::B => write!(f, "B"),
        }
    }
}

impl FromStr for Day {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "a" => Ok(Day::A),
            "B" | "b" => Ok(Day::B),
            _ => Err(()),
        }
    }
}

/// One logged set-group for one exercise on one day.
///
/// `id` is the sole identity key: upserts replace the entry with a matching id.
/// `week` stays a plain string because it is a grouping tag, never validated
/// against the date. `weight` and the set values are free-form strings (kg,
/// seconds or meters depending on the exercise unit) and may be blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub date: NaiveDate,
    pub week: String,
    pub day: Day,
    pub exercise: String,
    pub exercise_label: String,
    pub weight: String,
    pub sets: Vec<String>,
    #[serde(default)]
    pub rpe: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Entry {
    /// Creates an entry with a fresh id, resolving the display label through
    /// the exercise catalog.
    pub fn new(date: NaiveDate, week: impl Into<String>, day: Day, exercise: &str) -> Self {
        let ex = catalog::lookup(exercise);
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            week: week.into(),
            day,
            exercise: ex.id,
            exercise_label: ex.label,
            weight: String::new(),
            sets: Vec::new(),
            rpe: None,
            notes: None,
        }
    }

    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = weight.into();
        self
    }

    /// Sets the set values, truncating to the 5-slot maximum.
    pub fn with_sets(mut self, mut sets: Vec<String>) -> Self {
        sets.truncate(MAX_SETS);
        self.sets = sets;
        self
    }

    pub fn with_rpe(mut self, rpe: impl Into<String>) -> Self {
        self.rpe = Some(rpe.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Checks the entry shape required at the remote boundary.
    ///
    /// `day` is guaranteed by the type, `date` by chrono; what is left is the
    /// id, the week tag and the set-slot cap.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if self.week.trim().is_empty() {
            return Err(ValidationError::EmptyWeek);
        }
        if self.sets.len() > MAX_SETS {
            return Err(ValidationError::TooManySets(self.sets.len()));
        }
        Ok(())
    }
}

/// Malformed entry shape detected at the remote boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyId,
    EmptyWeek,
    TooManySets(usize),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyId => write!(f, "entry id must be a non-empty string"),
            ValidationError::EmptyWeek => write!(f, "entry week must be a non-empty string"),
            ValidationError::TooManySets(n) => {
                write!(f, "entry has {} sets, the maximum is {}", n, MAX_SETS)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn test_new_entry_resolves_label() {
        let entry = Entry::new(date(), "1", Day::A, "HT");
        assert_eq!(entry.exercise, "HT");
        assert_eq!(entry.exercise_label, "Hip Thrust");
        assert!(!entry.id.is_empty());
    }

    #[test]
    fn test_new_entry_ids_are_unique() {
        let a = Entry::new(date(), "1", Day::A, "HT");
        let b = Entry::new(date(), "1", Day::A, "HT");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_with_sets_truncates_to_five() {
        let sets: Vec<String> = (0..7).map(|i| i.to_string()).collect();
        let entry = Entry::new(date(), "1", Day::B, "POGO").with_sets(sets);
        assert_eq!(entry.sets.len(), 5);
    }

    #[test]
    fn test_validate_rejects_blank_id() {
        let mut entry = Entry::new(date(), "1", Day::A, "HT");
        entry.id = "  ".to_string();
        assert_eq!(entry.validate(), Err(ValidationError::EmptyId));
    }

    #[test]
    fn test_validate_rejects_blank_week() {
        let entry = Entry::new(date(), "", Day::A, "HT");
        assert_eq!(entry.validate(), Err(ValidationError::EmptyWeek));
    }

    #[test]
    fn test_json_uses_camel_case_label() {
        let entry = Entry::new(date(), "2", Day::B, "SB5X5");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"exerciseLabel\""));
        assert!(json.contains("\"day\":\"B\""));
        assert!(json.contains("\"date\":\"2025-03-10\""));

        let parsed: Entry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_day_parse() {
        assert_eq!("A".parse::<Day>(), Ok(Day::A));
        assert_eq!("b".parse::<Day>(), Ok(Day::B));
        assert!("C".parse::<Day>().is_err());
    }
}
