use anyhow::{Context, Result, bail};
use middleearth_game::{ItemRequest, QuestKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_PLAN: &str = include_str!("../../plans/fellowship.json");

/// One scheduled action in a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlanAction {
    Quest {
        leader: String,
        quest: QuestKind,
        #[serde(default)]
        companions: Vec<String>,
        #[serde(default)]
        items: Vec<ItemRequest>,
    },
    Buy {
        buyer: String,
        item: String,
        #[serde(default)]
        haggle: bool,
    },
    Trade {
        giver: String,
        receiver: String,
        item: String,
        gold: u32,
    },
}

impl PlanAction {
    /// Short human-readable label used in reports.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Quest { leader, quest, .. } => format!("{leader} leads {quest}"),
            Self::Buy { buyer, item, .. } => format!("{buyer} buys {item}"),
            Self::Trade {
                giver,
                receiver,
                item,
                ..
            } => format!("{giver} trades {item} to {receiver}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    pub day: u32,
    #[serde(flatten)]
    pub action: PlanAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignPlan {
    pub name: String,
    #[serde(default)]
    pub steps: Vec<PlanStep>,
}

impl CampaignPlan {
    /// Parse a plan, rejecting steps scheduled before day one.
    pub fn from_json(json: &str) -> Result<Self> {
        let plan: Self = serde_json::from_str(json).context("parsing campaign plan")?;
        if let Some(step) = plan.steps.iter().find(|step| step.day == 0) {
            bail!("step '{}' is scheduled on day 0", step.action.label());
        }
        Ok(plan)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("invalid plan {}", path.display()))
    }

    /// The embedded fellowship plan.
    pub fn default_plan() -> Result<Self> {
        Self::from_json(DEFAULT_PLAN)
    }

    /// Steps scheduled for `day`, in file order.
    pub fn steps_on(&self, day: u32) -> impl Iterator<Item = &PlanStep> {
        self.steps.iter().filter(move |step| step.day == day)
    }

    #[must_use]
    pub fn last_day(&self) -> u32 {
        self.steps.iter().map(|step| step.day).max().unwrap_or(0)
    }
}
