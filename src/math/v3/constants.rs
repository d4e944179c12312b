use alloy_primitives::U256;

pub const MIN_TICK: i32 = -887272;
pub const MAX_TICK: i32 = -MIN_TICK;

pub const Q96: U256 = U256::from_limbs([0, 1 << 32, 0, 0]);

/// Smallest tick that is a multiple of `tick_spacing` (ceiling toward zero).
pub fn min_usable_tick(tick_spacing: i32) -> i32 {
    -max_usable_tick(tick_spacing)
}

/// Largest tick that is a multiple of `tick_spacing`.
pub fn max_usable_tick(tick_spacing: i32) -> i32 {
    MAX_TICK.div_euclid(tick_spacing) * tick_spacing
}
