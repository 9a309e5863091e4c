use chrono::Local;
use clap::Args;
use std::path::PathBuf;

use crate::codec;
use crate::sync::{RemoteStore, SyncEngine, SyncMode};

#[derive(Args)]
pub struct ExportCommand {
    /// Output file (defaults to strength_log_<today>.csv)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl ExportCommand {
    pub fn run<R: RemoteStore>(
        &self,
        engine: &SyncEngine<R>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let today = Local::now().date_naive();
        let path = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(codec::export_filename(today)));

        let csv = codec::export_csv(engine.entries());
        std::fs::write(&path, csv)?;

        println!(
            "Exported {} entry(ies) to {}",
            engine.entries().len(),
            path.display()
        );
        Ok(())
    }
}

#[derive(Args)]
pub struct ImportCommand {
    /// CSV file to import
    pub path: PathBuf,
}

impl ImportCommand {
    pub async fn run<R: RemoteStore>(
        &self,
        engine: &mut SyncEngine<R>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(&self.path)?;
        let today = Local::now().date_naive();
        let report = codec::import_csv(&text, today);

        // Each upsert prepends, so walk in reverse to keep file order on top.
        let imported = report.entries.len();
        let mut mode = engine.mode();
        for entry in report.entries.into_iter().rev() {
            mode = engine.upsert(entry).await;
        }

        println!("Imported {} entry(ies)", imported);
        if report.skipped > 0 {
            println!("Skipped {} malformed row(s)", report.skipped);
        }
        if mode == SyncMode::Offline {
            println!("(offline: saved to local cache, not yet synced)");
        }
        Ok(())
    }
}
