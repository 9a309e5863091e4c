use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use std::io::{self, Write};

use crate::aggregate::{self, ViewFilter};
use crate::models::{catalog, Day, Entry, MAX_SETS};
use crate::sync::{RemoteStore, SyncEngine, SyncMode};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn report_mode(mode: SyncMode) {
    if mode == SyncMode::Offline {
        println!("(offline: saved to local cache, not yet synced)");
    }
}

#[derive(Args)]
pub struct AddCommand {
    /// Exercise identifier or label (unknown names become custom exercises)
    pub exercise: String,

    /// Entry date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Plan week (1-4)
    #[arg(long, short, default_value = "1")]
    pub week: String,

    /// Training day
    #[arg(long, short, value_enum, default_value = "A")]
    pub day: Day,

    /// Load: kg, seconds or meters depending on the exercise
    #[arg(long)]
    pub weight: Option<String>,

    /// A set value (reps/seconds/meters); can be repeated up to 5 times
    #[arg(long = "set", value_name = "VALUE")]
    pub sets: Vec<String>,

    /// Prefill the sets from the exercise's catalog template
    #[arg(long)]
    pub template: bool,

    /// Perceived exertion
    #[arg(long)]
    pub rpe: Option<String>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
}

impl AddCommand {
    pub async fn run<R: RemoteStore>(
        &self,
        engine: &mut SyncEngine<R>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let date = self.date.unwrap_or_else(|| Local::now().date_naive());
        let mut entry = Entry::new(date, self.week.clone(), self.day, &self.exercise);

        let sets = if self.template && self.sets.is_empty() {
            // Same shape the form produces: template values padded to 5 slots.
            let mut sets = catalog::lookup(&self.exercise).template;
            sets.truncate(MAX_SETS);
            sets.resize(MAX_SETS, String::new());
            sets
        } else {
            self.sets.clone()
        };
        entry = entry.with_sets(sets);

        if let Some(weight) = &self.weight {
            entry = entry.with_weight(weight);
        }
        if let Some(rpe) = &self.rpe {
            entry = entry.with_rpe(rpe);
        }
        if let Some(notes) = &self.notes {
            entry = entry.with_notes(notes);
        }

        let id = entry.id.clone();
        let label = entry.exercise_label.clone();
        let mode = engine.upsert(entry).await;

        println!("Added {} ({})", label, id);
        report_mode(mode);
        Ok(())
    }
}

#[derive(Args)]
pub struct ListCommand {
    /// Filter by plan week
    #[arg(long, short)]
    pub week: Option<String>,

    /// Filter by training day
    #[arg(long, short, value_enum)]
    pub day: Option<Day>,

    /// Case-insensitive search over exercise label and notes
    #[arg(long, short)]
    pub query: Option<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ListCommand {
    pub fn run<R: RemoteStore>(
        &self,
        engine: &SyncEngine<R>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let filter = ViewFilter {
            week: self.week.clone(),
            day: self.day,
            query: self.query.clone(),
        };
        let entries = aggregate::filter_entries(engine.entries(), &filter);

        if entries.is_empty() {
            println!("No entries found");
            return Ok(());
        }

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            }
            OutputFormat::Text => {
                println!(
                    "{:<36}  {:<10}  {:<4}  {:<3}  {:<28}  {:<8}  {:<20}  {:<4}  {:>5}",
                    "ID", "DATE", "WEEK", "DAY", "EXERCISE", "WEIGHT", "SETS", "RPE", "COMPL"
                );
                println!("{}", "-".repeat(128));
                for entry in entries.iter().copied() {
                    // Display pads to 5 slots; storage is untouched.
                    let sets: Vec<&str> = (0..MAX_SETS)
                        .map(|i| entry.sets.get(i).map(String::as_str).unwrap_or(""))
                        .collect();
                    println!(
                        "{:<36}  {:<10}  {:<4}  {:<3}  {:<28}  {:<8}  {:<20}  {:<4}  {:>4.0}%",
                        entry.id,
                        entry.date,
                        entry.week,
                        entry.day,
                        entry.exercise_label,
                        entry.weight,
                        sets.join("/"),
                        entry.rpe.as_deref().unwrap_or(""),
                        aggregate::completion_percent(entry),
                    );
                }
                let volume = aggregate::total_volume(entries.iter().copied());
                println!("\nTotal: {} entry(ies)", entries.len());
                println!("Approx. volume: {} kg-rep", volume);
                if engine.mode() == SyncMode::Offline {
                    println!("(offline: showing locally cached data)");
                }
            }
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct EditCommand {
    /// Entry id
    pub id: String,

    /// New date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// New plan week
    #[arg(long, short)]
    pub week: Option<String>,

    /// New training day
    #[arg(long, short, value_enum)]
    pub day: Option<Day>,

    /// New exercise identifier or label (relabels the entry)
    #[arg(long)]
    pub exercise: Option<String>,

    /// New load value
    #[arg(long)]
    pub weight: Option<String>,

    /// Replacement set values (repeat up to 5 times; replaces all sets)
    #[arg(long = "set", value_name = "VALUE")]
    pub sets: Vec<String>,

    /// New perceived exertion
    #[arg(long)]
    pub rpe: Option<String>,

    /// New notes
    #[arg(long)]
    pub notes: Option<String>,
}

impl EditCommand {
    pub async fn run<R: RemoteStore>(
        &self,
        engine: &mut SyncEngine<R>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let Some(existing) = engine.get(&self.id) else {
            return Err(format!("No entry with id '{}'", self.id).into());
        };
        let mut entry = existing.clone();

        if let Some(date) = self.date {
            entry.date = date;
        }
        if let Some(week) = &self.week {
            entry.week = week.clone();
        }
        if let Some(day) = self.day {
            entry.day = day;
        }
        if let Some(exercise) = &self.exercise {
            // Keep the denormalized label in sync at write time.
            let ex = catalog::lookup(exercise);
            entry.exercise = ex.id;
            entry.exercise_label = ex.label;
        }
        if let Some(weight) = &self.weight {
            entry.weight = weight.clone();
        }
        if !self.sets.is_empty() {
            entry = entry.with_sets(self.sets.clone());
        }
        if let Some(rpe) = &self.rpe {
            entry.rpe = Some(rpe.clone());
        }
        if let Some(notes) = &self.notes {
            entry.notes = Some(notes.clone());
        }

        let mode = engine.upsert(entry).await;
        println!("Updated {}", self.id);
        report_mode(mode);
        Ok(())
    }
}

#[derive(Args)]
pub struct DeleteCommand {
    /// Entry id
    #[arg(required_unless_present = "all")]
    pub id: Option<String>,

    /// Delete every entry
    #[arg(long, conflicts_with = "id")]
    pub all: bool,

    /// Skip confirmation prompt
    #[arg(long, short)]
    pub force: bool,
}

impl DeleteCommand {
    pub async fn run<R: RemoteStore>(
        &self,
        engine: &mut SyncEngine<R>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if self.all {
            if !self.force && !confirm("Delete ALL entries?")? {
                println!("Cancelled");
                return Ok(());
            }
            let mode = engine.clear().await;
            println!("Deleted all entries");
            report_mode(mode);
            return Ok(());
        }

        let id = self.id.as_deref().unwrap_or("");
        if !self.force && !confirm(&format!("Delete entry {}?", id))? {
            println!("Cancelled");
            return Ok(());
        }

        let mode = engine.remove(id).await?;
        println!("Deleted {}", id);
        report_mode(mode);
        Ok(())
    }
}

fn confirm(prompt: &str) -> Result<bool, io::Error> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
