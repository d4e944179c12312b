pub mod constants;
pub mod tick_math;
