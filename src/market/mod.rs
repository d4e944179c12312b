pub mod market_cap;
pub mod multicurve;

pub use market_cap::{
    DEFAULT_DECIMALS, PricingContext, TickRange, market_cap_range_to_ticks, market_cap_to_tick,
    tick_to_market_cap,
};
pub use multicurve::{CurveTicks, MarketCapCeiling, market_cap_curve_to_ticks};
