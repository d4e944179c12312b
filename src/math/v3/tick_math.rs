use super::constants::{MAX_TICK, MIN_TICK};
use crate::errors::LaunchError;
use alloy_primitives::{U256, uint};

// 1 / sqrt(1.0001)^(2^i) as Q128.128, for i = 1..=19.
const RATIO_MULTIPLIERS: [U256; 19] = uint!([
    0xfff97272373d413259a46990580e213a_U256,
    0xfff2e50f5f656932ef12357cf3c7fdcc_U256,
    0xffe5caca7e10e4e61c3624eaa0941cd0_U256,
    0xffcb9843d60f6159c9db58835c926644_U256,
    0xff973b41fa98c081472e6896dfb254c0_U256,
    0xff2ea16466c96a3843ec78b326b52861_U256,
    0xfe5dee046a99a2a811c461f1969c3053_U256,
    0xfcbe86c7900a88aedcffc83b479aa3a4_U256,
    0xf987a7253ac413176f2b074cf7815e54_U256,
    0xf3392b0822b70005940c7a398e4b70f3_U256,
    0xe7159475a2c29b7443b29c7fa6e889d9_U256,
    0xd097f3bdfd2022b8845ad8f792aa5825_U256,
    0xa9f746462d870fdf8a65dc1f90e061e5_U256,
    0x70d869a156d2a1b890bb3df62baf32f7_U256,
    0x31be135f97d08fd981231505542fcfa6_U256,
    0x9aa508b5b7a84e1c677de54f3e99bc9_U256,
    0x5d6af8dedb81196699c329225ee604_U256,
    0x2216e584f5fa1ea926041bedfe98_U256,
    0x48a170391f7dc42444e8fa2_U256,
]);

const ODD_TICK_RATIO: U256 = uint!(0xfffcb933bd6fad37aa2d162d1a594001_U256);
const ONE_X128: U256 = uint!(0x100000000000000000000000000000000_U256);

/// Calculates sqrt(1.0001^tick) * 2^96, the price a pool is initialized with.
/// Follows the fixed-point evaluation of Uniswap's TickMath library, so the
/// result matches what the pool contract derives for the same tick.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U256, LaunchError> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(LaunchError::TickOutOfBounds {
            tick: tick as i64,
            market_cap: None,
        });
    }

    let abs_tick = tick.unsigned_abs();

    let mut ratio = if abs_tick & 0x1 != 0 {
        ODD_TICK_RATIO
    } else {
        ONE_X128
    };

    for (i, multiplier) in RATIO_MULTIPLIERS.iter().enumerate() {
        if abs_tick & (0x2 << i) != 0 {
            ratio = (ratio * *multiplier) >> 128;
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q64.96, rounding up so the price never lands below the tick.
    let remainder = ratio & U256::from(u32::MAX);
    let round_up = if remainder.is_zero() { U256::ZERO } else { U256::from(1) };
    let sqrt_price_x96 = (ratio >> 32) + round_up;

    Ok(sqrt_price_x96)
}
