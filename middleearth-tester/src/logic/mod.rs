pub mod campaign;
pub mod plan;
pub mod reports;
pub mod seeds;

pub use campaign::{CampaignRecord, aggregate, run_campaign};
pub use plan::CampaignPlan;
pub use seeds::parse_seed_list;
