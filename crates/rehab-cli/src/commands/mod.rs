pub mod analyze;
pub mod config;
pub mod history;
pub mod replay;

use anyhow::{Context, Result};
use clap::Args;
use rehab_core::config::RehabConfig;
use rehab_core::exercise::ExerciseType;
use rehab_core::session::SessionPlan;
use rehab_infrastructure::ConfigService;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Exercise plan flags shared by session commands.
#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// Exercise to perform (open_close, pinch, abduction_adduction, thumb_opposition, finger_lifts)
    #[arg(long, short)]
    pub exercise: ExerciseType,

    /// Number of sets
    #[arg(long, default_value_t = 3)]
    pub sets: u32,

    /// Repetitions per set; 0 follows the classifier without a target
    #[arg(long, default_value_t = 10)]
    pub reps: u32,
}

impl PlanArgs {
    pub fn plan(&self) -> Result<SessionPlan> {
        let plan = SessionPlan::new(self.exercise, self.sets, self.reps);
        if plan.counts_repetitions() {
            plan.validate()?;
        }
        Ok(plan)
    }
}

pub fn load_config() -> Result<RehabConfig> {
    let config = ConfigService::new()?.load()?;
    Ok(config)
}

/// Reads one JSON value per line, skipping blank lines.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let mut items = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let item = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid record", path.display(), index + 1))?;
        items.push(item);
    }
    Ok(items)
}
