use clap::Args;

use super::OutputFormat;
use crate::models::catalog;

#[derive(Args)]
pub struct ExercisesCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ExercisesCommand {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let groups = catalog::grouped_by_category();
        match self.format {
            OutputFormat::Json => {
                let value: Vec<serde_json::Value> = groups
                    .iter()
                    .map(|(category, items)| {
                        serde_json::json!({ "category": category, "exercises": items })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
            OutputFormat::Text => {
                for (category, items) in &groups {
                    println!("{}", category);
                    println!("{}", "=".repeat(category.len()));
                    for ex in items {
                        let template = ex.template.join("/");
                        println!(
                            "  {:<10}  {:<30}  {:<8}  {}",
                            ex.id,
                            ex.label,
                            ex.unit,
                            if template.is_empty() { "-" } else { template.as_str() }
                        );
                    }
                    println!();
                }
            }
        }
        Ok(())
    }
}

/// The fixed 4-week plan the log tracks. Static content, mirrored from the
/// plan sheet.
#[derive(Args)]
pub struct PlanCommand {}

impl PlanCommand {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        println!("Training Plan (4 weeks)");
        println!("=======================\n");

        println!("Day A (posterior chain: glutes/hamstrings)");
        println!("  Plyometrics (6-8 min):");
        println!("    Weeks 1-2: Pogo Jumps 3x20s + Vertical Jumps 3x6");
        println!("    Weeks 3-4: Drop Jumps (20-30 cm) 3x6 + Bounding 3x20m");
        println!("  Main lift:  Single-leg Romanian Deadlift 5x5");
        println!("  Secondary:  Hip Thrust (barbell) 3x8-10");
        println!("  Accessory:  Eccentric Nordic Curl 3x6-8");
        println!("              Pallof Press 3x12-15");
        println!("              Eccentric Calf Raise 3x12-15");
        println!();

        println!("Day B (anterior chain: quads/stability)");
        println!("  Plyometrics (6-8 min):");
        println!("    Weeks 1-2: Box Jumps 3x5 + Band Skipping 3x20m");
        println!("    Weeks 3-4: Split Jump 3x6 per leg + Lateral Hops 3x20s");
        println!("  Main lift:  Bulgarian Split Squat 5x5");
        println!("  Secondary:  High Step-up 3x8-10");
        println!("  Accessory:  Dragging Plank 3x30-40s");
        println!("              Single-leg Glute Bridge 3x12");
        println!("              Seated Soleus Raise 3x15-20");
        Ok(())
    }
}
