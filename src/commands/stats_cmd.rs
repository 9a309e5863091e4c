use clap::Args;

use crate::aggregate::{self, ViewFilter};
use crate::models::Day;
use crate::sync::{RemoteStore, SyncEngine, SyncMode};

#[derive(Args)]
pub struct StatsCommand {
    /// Week the volume summary is restricted to and the progress table
    /// treats as current (defaults to all weeks / week 1)
    #[arg(long, short)]
    pub week: Option<String>,

    /// Restrict the volume summary to one training day
    #[arg(long, short, value_enum)]
    pub day: Option<Day>,

    /// Restrict the volume summary by label/notes search
    #[arg(long, short)]
    pub query: Option<String>,
}

impl StatsCommand {
    pub fn run<R: RemoteStore>(
        &self,
        engine: &SyncEngine<R>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let filter = ViewFilter {
            week: self.week.clone(),
            day: self.day,
            query: self.query.clone(),
        };
        let filtered = aggregate::filter_entries(engine.entries(), &filter);
        let volume = aggregate::total_volume(filtered.iter().copied());

        println!("Entries: {}", filtered.len());
        println!("Approx. volume: {} kg-rep", volume);

        // Progress is always computed over the whole collection.
        let current_week = self.week.as_deref().unwrap_or("1");
        let progress = aggregate::per_exercise_progress(engine.entries(), current_week);

        if !progress.is_empty() {
            println!("\nProgress vs best (week {})", current_week);
            println!(
                "{:<28}  {:>12}  {:>12}  {:>8}",
                "EXERCISE", "WEEK VOLUME", "BEST VOLUME", "PROGRESS"
            );
            println!("{}", "-".repeat(68));
            for row in &progress {
                println!(
                    "{:<28}  {:>12}  {:>12}  {:>7.0}%",
                    row.label,
                    row.current_week_volume,
                    row.best_volume,
                    row.progress_percent(),
                );
            }
        }

        if engine.mode() == SyncMode::Offline {
            println!("\n(offline: showing locally cached data)");
        }
        Ok(())
    }
}
