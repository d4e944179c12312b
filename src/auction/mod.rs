pub mod gamma;

pub use gamma::{AuctionSchedule, MAX_GAMMA, solve_gamma};
