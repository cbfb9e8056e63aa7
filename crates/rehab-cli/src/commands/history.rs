use super::load_config;
use anyhow::Result;
use colored::Colorize;
use rehab_core::summary::{SessionSummary, SummaryRepository};
use rehab_interaction::{BackendClient, HttpProgressRepository};

pub async fn run() -> Result<()> {
    let config = load_config()?;
    let repository = HttpProgressRepository::new(BackendClient::from_config(&config)?);

    let summaries = repository.list_recent(config.history_limit).await?;
    if summaries.is_empty() {
        println!("{}", "No sessions saved yet.".dimmed());
        return Ok(());
    }

    for summary in &summaries {
        println!("{}", format_summary(summary));
    }
    Ok(())
}

fn format_summary(summary: &SessionSummary) -> String {
    let mut line = format!(
        "{}  {:<20} {} x {}  completed {}",
        summary.created_at.dimmed(),
        summary.exercise_type.display_name(),
        summary.sets_planned,
        summary.reps_planned,
        summary.reps_completed
    );
    if let Some(notes) = &summary.notes {
        line.push_str(&format!("  \"{}\"", notes));
    }
    line
}
