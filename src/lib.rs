pub mod auction;
pub mod config;
pub mod errors;
pub mod market;
pub mod math;
pub mod mining;

pub use errors::LaunchError;

pub use config::{LaunchPlan, MinerConfig};

pub use auction::{AuctionSchedule, solve_gamma};
pub use market::{PricingContext, TickRange, market_cap_range_to_ticks, tick_to_market_cap};
pub use mining::{
    HookFlags, HookMiningRequest, MinedSalt, mine_hook_and_token_salt, mine_token_order_salt,
};
