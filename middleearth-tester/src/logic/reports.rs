use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

use super::campaign::{CampaignAggregate, CampaignRecord};

#[derive(Serialize)]
struct JsonReport<'a> {
    aggregate: Option<&'a CampaignAggregate>,
    campaigns: &'a [CampaignRecord],
}

pub fn generate_console_report(
    out: &mut dyn Write,
    records: &[CampaignRecord],
    aggregate: Option<&CampaignAggregate>,
    verbose: bool,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Campaign Results".bright_cyan().bold())?;
    writeln!(out, "{}", "===================".cyan())?;

    for record in records {
        let rejected = record.actions.iter().filter(|a| !a.ok).count();
        let status = if rejected == 0 {
            "✅".green()
        } else {
            "⚠️".yellow()
        };
        writeln!(
            out,
            "{status} seed {} - {} days, ring {:?}, {} quests ({:.0}% won), {} gold in rewards",
            record.seed.to_string().bold(),
            record.days,
            record.snapshot.ring,
            record.snapshot.quests.total,
            record.quest_success_rate() * 100.0,
            record.snapshot.quests.total_rewards
        )?;
        if verbose || rejected > 0 {
            for action in &record.actions {
                let detail = if action.ok {
                    action.detail.normal()
                } else {
                    action.detail.red()
                };
                writeln!(out, "   day {:>3}: {} - {detail}", action.day, action.label)?;
            }
        }
    }

    if let Some(summary) = aggregate {
        writeln!(out)?;
        writeln!(out, "{}", "🧭 Plan Summary".bright_yellow().bold())?;
        writeln!(out, "{}", "===============".yellow())?;
        writeln!(out, "Plan: {} ({} runs)", summary.plan, summary.runs)?;
        writeln!(out, "Ring destroyed: {:.1}%", summary.ring_destroyed_pct)?;
        writeln!(out, "Quest success: {:.1}%", summary.quest_success_pct)?;
        writeln!(out, "Mean rewards: {:.1}", summary.mean_rewards)?;
        writeln!(out, "Mean inventory value: {:.1}", summary.mean_inventory_value)?;
        writeln!(out, "Mean war days: {:.1}", summary.mean_war_days)?;
        writeln!(out, "Rejected actions: {}", summary.rejected_actions)?;
    }
    Ok(())
}

pub fn generate_json_report(
    out: &mut dyn Write,
    records: &[CampaignRecord],
    aggregate: Option<&CampaignAggregate>,
) -> Result<()> {
    let report = JsonReport {
        aggregate,
        campaigns: records,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(
    out: &mut dyn Write,
    records: &[CampaignRecord],
    aggregate: Option<&CampaignAggregate>,
) -> Result<()> {
    writeln!(out, "# Middle-earth Campaign Results\n")?;
    if records.is_empty() {
        writeln!(out, "_No campaigns executed._")?;
        return Ok(());
    }

    if let Some(summary) = aggregate {
        writeln!(out, "## Summary\n")?;
        writeln!(out, "- **Plan**: {}", summary.plan)?;
        writeln!(out, "- **Runs**: {}", summary.runs)?;
        writeln!(out, "- **Ring destroyed**: {:.1}%", summary.ring_destroyed_pct)?;
        writeln!(out, "- **Quest success**: {:.1}%", summary.quest_success_pct)?;
        writeln!(out, "- **Rejected actions**: {}\n", summary.rejected_actions)?;
    }

    writeln!(out, "## Campaigns\n")?;
    writeln!(out, "| Seed | Days | Ring | Quests | Won | Rewards | Inventory |")?;
    writeln!(out, "|---|---|---|---|---|---|---|")?;
    for record in records {
        let quests = &record.snapshot.quests;
        writeln!(
            out,
            "| {} | {} | {:?} | {} | {} | {} | {} |",
            record.seed,
            record.days,
            record.snapshot.ring,
            quests.total,
            quests.successful,
            quests.total_rewards,
            record.snapshot.inventory_value
        )?;
    }
    Ok(())
}
