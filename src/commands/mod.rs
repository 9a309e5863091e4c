mod catalog_cmd;
mod config_cmd;
mod csv_cmd;
mod entry_cmd;
mod stats_cmd;

pub use catalog_cmd::{ExercisesCommand, PlanCommand};
pub use config_cmd::ConfigCommand;
pub use csv_cmd::{ExportCommand, ImportCommand};
pub use entry_cmd::{AddCommand, DeleteCommand, EditCommand, ListCommand, OutputFormat};
pub use stats_cmd::StatsCommand;
