//! Derived views over the entry collection: filtering, approximate training
//! volume, completion percentage, and per-exercise progress against the best
//! recorded volume.
//!
//! Everything here is a pure function of the collection plus parameters.
//! Filtering changes what is displayed, never the underlying collection.

use crate::models::{catalog, Day, Entry};

/// View constraints: exact week/day match when present, case-insensitive
/// substring search over label and notes for the query.
#[derive(Debug, Clone, Default)]
pub struct ViewFilter {
    pub week: Option<String>,
    pub day: Option<Day>,
    pub query: Option<String>,
}

/// Order-preserving subsequence of `entries` matching the filter.
pub fn filter_entries<'a>(entries: &'a [Entry], filter: &ViewFilter) -> Vec<&'a Entry> {
    let query = filter.query.as_deref().unwrap_or("").to_lowercase();
    entries
        .iter()
        .filter(|e| {
            if let Some(week) = &filter.week {
                if &e.week != week {
                    return false;
                }
            }
            if let Some(day) = filter.day {
                if e.day != day {
                    return false;
                }
            }
            if !query.is_empty() {
                let haystack = format!(
                    "{} {}",
                    e.exercise_label,
                    e.notes.as_deref().unwrap_or("")
                )
                .to_lowercase();
                if !haystack.contains(&query) {
                    return false;
                }
            }
            true
        })
        .collect()
}

fn lenient(value: &str) -> f64 {
    value.trim().parse::<f64>().unwrap_or(0.0)
}

/// Approximate load volume of one entry: weight times the sum of its set
/// values. Blank or non-numeric values count as zero. Units are not
/// converted, so seconds/meters entries contribute like kg entries.
pub fn entry_volume(entry: &Entry) -> f64 {
    let reps: f64 = entry.sets.iter().map(|s| lenient(s)).sum();
    lenient(&entry.weight) * reps
}

/// Sum of per-entry volumes (kg·rep, approximately).
pub fn total_volume<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> f64 {
    entries.into_iter().map(entry_volume).sum()
}

/// Fraction of the exercise's expected set slots that hold a value, as a
/// percentage in [0, 100].
///
/// Expected slots come from the catalog template; a missing or empty template
/// means the default 5-slot form.
pub fn completion_percent(entry: &Entry) -> f64 {
    let template = catalog::lookup(&entry.exercise).template;
    let expected = if template.is_empty() { 5 } else { template.len() };
    let expected = expected.max(1);
    let filled = entry.sets.iter().filter(|s| !s.trim().is_empty()).count();
    (100.0 * filled as f64 / expected as f64).min(100.0)
}

/// Current-week volume versus the best single-entry volume ever recorded for
/// one exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseProgress {
    pub exercise: String,
    pub label: String,
    pub current_week_volume: f64,
    pub best_volume: f64,
}

impl ExerciseProgress {
    /// Display ratio, clamped to [0, 100]. Zero when nothing was ever
    /// recorded.
    pub fn progress_percent(&self) -> f64 {
        if self.best_volume == 0.0 {
            0.0
        } else {
            (100.0 * self.current_week_volume / self.best_volume).clamp(0.0, 100.0)
        }
    }
}

/// Groups the whole collection by exercise (first-seen order) and reports,
/// per exercise, the volume logged in `current_week` against the best
/// single-entry volume across all weeks.
///
/// Best is a max over individual entries, not over per-week sums; a week
/// split into partial entries therefore reads lower than its true total.
pub fn per_exercise_progress(entries: &[Entry], current_week: &str) -> Vec<ExerciseProgress> {
    let mut groups: Vec<ExerciseProgress> = Vec::new();
    for entry in entries {
        let volume = entry_volume(entry);
        let group = match groups.iter_mut().find(|g| g.exercise == entry.exercise) {
            Some(group) => group,
            None => {
                groups.push(ExerciseProgress {
                    exercise: entry.exercise.clone(),
                    label: entry.exercise_label.clone(),
                    current_week_volume: 0.0,
                    best_volume: 0.0,
                });
                groups.last_mut().unwrap()
            }
        };
        if volume > group.best_volume {
            group.best_volume = volume;
        }
        if entry.week == current_week {
            group.current_week_volume += volume;
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(exercise: &str, week: &str, day: Day, weight: &str, sets: &[&str]) -> Entry {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        Entry::new(date, week, day, exercise)
            .with_weight(weight)
            .with_sets(sets.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_filter_by_week_is_exact_and_order_preserving() {
        let entries = vec![
            entry("HT", "2", Day::A, "60", &["10"]),
            entry("POGO", "1", Day::A, "", &["20"]),
            entry("SB5X5", "2", Day::B, "40", &["5"]),
        ];
        let filter = ViewFilter {
            week: Some("2".to_string()),
            ..Default::default()
        };
        let filtered = filter_entries(&entries, &filter);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].exercise, "HT");
        assert_eq!(filtered[1].exercise, "SB5X5");
    }

    #[test]
    fn test_filter_by_day() {
        let entries = vec![
            entry("HT", "1", Day::A, "60", &["10"]),
            entry("SB5X5", "1", Day::B, "40", &["5"]),
        ];
        let filter = ViewFilter {
            day: Some(Day::B),
            ..Default::default()
        };
        let filtered = filter_entries(&entries, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].exercise, "SB5X5");
    }

    #[test]
    fn test_query_matches_label_and_notes_case_insensitively() {
        let mut with_notes = entry("HT", "1", Day::A, "60", &["10"]);
        with_notes.notes = Some("New PR today".to_string());
        let entries = vec![with_notes, entry("POGO", "1", Day::A, "", &["20"])];

        let by_label = filter_entries(
            &entries,
            &ViewFilter {
                query: Some("hip thrust".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(by_label.len(), 1);

        let by_notes = filter_entries(
            &entries,
            &ViewFilter {
                query: Some("pr".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(by_notes.len(), 1);
        assert_eq!(by_notes[0].exercise, "HT");
    }

    #[test]
    fn test_query_treats_missing_notes_as_empty() {
        let entries = vec![entry("HT", "1", Day::A, "60", &["10"])];
        let filtered = filter_entries(
            &entries,
            &ViewFilter {
                query: Some("none".to_string()),
                ..Default::default()
            },
        );
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_total_volume() {
        let entries = vec![entry("HT", "1", Day::A, "60", &["10", "10", "10"])];
        assert_eq!(total_volume(&entries), 1800.0);
    }

    #[test]
    fn test_total_volume_ignores_garbage() {
        let entries = vec![
            entry("HT", "1", Day::A, "", &["10", "10"]),
            entry("POGO", "1", Day::A, "abc", &["20"]),
            entry("SB5X5", "1", Day::B, "40", &["5", "x", ""]),
        ];
        assert_eq!(total_volume(&entries), 200.0);
    }

    #[test]
    fn test_completion_against_template_length() {
        // HT template has 3 slots; 3 filled of 5 displayed = complete.
        let e = entry("HT", "1", Day::A, "60", &["10", "10", "10", "", ""]);
        assert_eq!(completion_percent(&e), 100.0);
    }

    #[test]
    fn test_completion_partial() {
        // PMR1P template has 5 slots.
        let e = entry("PMR1P", "1", Day::A, "40", &["5", "5", "", "", ""]);
        assert_eq!(completion_percent(&e), 40.0);
    }

    #[test]
    fn test_completion_unknown_exercise_defaults_to_five_slots() {
        let e = entry("Weighted Carry", "1", Day::A, "30", &["20", "20"]);
        assert_eq!(completion_percent(&e), 40.0);
    }

    #[test]
    fn test_completion_is_capped_at_100() {
        // More filled sets than the 3-slot template.
        let e = entry("HT", "1", Day::A, "60", &["10", "10", "10", "10", "10"]);
        assert_eq!(completion_percent(&e), 100.0);
    }

    #[test]
    fn test_per_exercise_progress_best_is_single_entry_max() {
        let entries = vec![
            entry("HT", "1", Day::A, "40", &["10", "10", "10"]),
            entry("HT", "2", Day::A, "60", &["10", "10", "10"]),
        ];

        let progress = per_exercise_progress(&entries, "2");
        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].best_volume, 1800.0);
        assert_eq!(progress[0].current_week_volume, 1800.0);
        assert_eq!(progress[0].progress_percent(), 100.0);

        let progress = per_exercise_progress(&entries, "3");
        assert_eq!(progress[0].best_volume, 1800.0);
        assert_eq!(progress[0].current_week_volume, 0.0);
        assert_eq!(progress[0].progress_percent(), 0.0);
    }

    #[test]
    fn test_per_exercise_progress_sums_current_week() {
        let entries = vec![
            entry("HT", "2", Day::A, "60", &["10"]),
            entry("HT", "2", Day::A, "60", &["10"]),
        ];
        let progress = per_exercise_progress(&entries, "2");
        assert_eq!(progress[0].current_week_volume, 1200.0);
        // Best stays the max over single entries, not the week sum.
        assert_eq!(progress[0].best_volume, 600.0);
        assert_eq!(progress[0].progress_percent(), 100.0);
    }

    #[test]
    fn test_per_exercise_progress_zero_best() {
        let entries = vec![entry("HT", "1", Day::A, "", &[])];
        let progress = per_exercise_progress(&entries, "1");
        assert_eq!(progress[0].progress_percent(), 0.0);
    }

    #[test]
    fn test_per_exercise_progress_first_seen_order() {
        let entries = vec![
            entry("POGO", "1", Day::A, "1", &["20"]),
            entry("HT", "1", Day::A, "60", &["10"]),
            entry("POGO", "2", Day::A, "1", &["20"]),
        ];
        let progress = per_exercise_progress(&entries, "1");
        assert_eq!(progress[0].exercise, "POGO");
        assert_eq!(progress[1].exercise, "HT");
    }
}
