use log::debug;
use middleearth_game::numbers::i64_to_f64;
use middleearth_game::{RingStatus, World, WorldSnapshot};
use serde::{Deserialize, Serialize};

use super::plan::{CampaignPlan, PlanAction};

/// Outcome of one scheduled action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub day: u32,
    pub label: String,
    pub ok: bool,
    pub detail: String,
}

/// Everything recorded for one seeded campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub plan: String,
    pub seed: u64,
    pub days: u32,
    pub war_days: u32,
    pub actions: Vec<ActionOutcome>,
    pub snapshot: WorldSnapshot,
}

impl CampaignRecord {
    #[must_use]
    pub fn quest_success_rate(&self) -> f64 {
        let report = &self.snapshot.quests;
        if report.total == 0 {
            return 0.0;
        }
        ratio(report.successful, report.total)
    }
}

/// Averages across every seed of a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignAggregate {
    pub plan: String,
    pub runs: usize,
    pub ring_destroyed_pct: f64,
    pub quest_success_pct: f64,
    pub mean_rewards: f64,
    pub mean_inventory_value: f64,
    pub mean_war_days: f64,
    pub rejected_actions: usize,
}

/// Run `plan` for `days` days on a fresh world seeded with `seed`.
///
/// Each day starts with the world's daily tick, then the day's actions run
/// in file order. Rejected actions are recorded, never fatal.
#[must_use]
pub fn run_campaign(plan: &CampaignPlan, seed: u64, days: u32) -> CampaignRecord {
    let mut world = World::from_seed(seed);
    let mut actions = Vec::new();
    let mut war_days = 0;

    for day in 1..=days {
        let report = world.process_day();
        if report.wartime {
            war_days += 1;
        }
        for step in plan.steps_on(day) {
            let outcome = apply(&mut world, day, &step.action);
            debug!("day {day}: {} -> {}", outcome.label, outcome.detail);
            actions.push(outcome);
        }
    }

    CampaignRecord {
        plan: plan.name.clone(),
        seed,
        days,
        war_days,
        actions,
        snapshot: world.snapshot(),
    }
}

fn apply(world: &mut World, day: u32, action: &PlanAction) -> ActionOutcome {
    let label = action.label();
    let result = match action {
        PlanAction::Quest {
            leader,
            quest,
            companions,
            items,
        } => world
            .attempt_quest(leader, *quest, companions, items)
            .map(|result| {
                if result.success() {
                    format!("succeeded, reward {}", result.reward())
                } else {
                    "failed".to_string()
                }
            }),
        PlanAction::Buy {
            buyer,
            item,
            haggle,
        } => world
            .buy_item(buyer, item, *haggle)
            .map(|purchase| format!("paid {} on {}", purchase.price, purchase.day.key())),
        PlanAction::Trade {
            giver,
            receiver,
            item,
            gold,
        } => world
            .trade_item(giver, receiver, item, *gold)
            .map(|()| format!("{gold} gold changed hands")),
    };
    match result {
        Ok(detail) => ActionOutcome {
            day,
            label,
            ok: true,
            detail,
        },
        Err(err) => ActionOutcome {
            day,
            label,
            ok: false,
            detail: err.to_string(),
        },
    }
}

#[must_use]
pub fn aggregate(records: &[CampaignRecord]) -> Option<CampaignAggregate> {
    let first = records.first()?;
    let runs = records.len();
    let destroyed = records
        .iter()
        .filter(|r| r.snapshot.ring == RingStatus::Destroyed)
        .count();
    let attempts: usize = records.iter().map(|r| r.snapshot.quests.total).sum();
    let successes: usize = records.iter().map(|r| r.snapshot.quests.successful).sum();

    Some(CampaignAggregate {
        plan: first.plan.clone(),
        runs,
        ring_destroyed_pct: ratio(destroyed, runs) * 100.0,
        quest_success_pct: if attempts == 0 {
            0.0
        } else {
            ratio(successes, attempts) * 100.0
        },
        mean_rewards: mean(records, |r| i64_to_f64(r.snapshot.quests.total_rewards)),
        mean_inventory_value: mean(records, |r| i64_to_f64(r.snapshot.inventory_value)),
        mean_war_days: mean(records, |r| f64::from(r.war_days)),
        rejected_actions: records
            .iter()
            .flat_map(|r| &r.actions)
            .filter(|a| !a.ok)
            .count(),
    })
}

fn mean(records: &[CampaignRecord], value: impl Fn(&CampaignRecord) -> f64) -> f64 {
    records.iter().map(value).sum::<f64>() / usize_to_f64(records.len())
}

fn ratio(part: usize, whole: usize) -> f64 {
    usize_to_f64(part) / usize_to_f64(whole)
}

fn usize_to_f64(value: usize) -> f64 {
    i64_to_f64(i64::try_from(value).unwrap_or(i64::MAX))
}
