use alloy_primitives::U256;

/// Converts a U256 into a f64, manually combining its limbs.
/// This is an approximation and will lose precision for very large numbers,
/// but is suitable for supply and price calculations.
pub fn u256_to_f64(value: U256) -> f64 {
    let limbs = value.as_limbs();
    let mut result = 0.0;

    const TWO_POW_64: f64 = (1u64 << 63) as f64 * 2.0;

    result += limbs[3] as f64;
    result = result * TWO_POW_64 + (limbs[2] as f64);
    result = result * TWO_POW_64 + (limbs[1] as f64);
    result = result * TWO_POW_64 + (limbs[0] as f64);

    result
}

/// 10^exp as a float, for decimal scaling between tokens. `exp` may be negative.
pub fn pow10(exp: i32) -> f64 {
    10f64.powi(exp)
}

/// Whole-token amount of a raw on-chain balance.
pub fn to_whole_units(raw: U256, decimals: u8) -> f64 {
    u256_to_f64(raw) / pow10(decimals as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u256_to_f64_large_supply() {
        let supply = U256::from(10).pow(U256::from(27));
        let as_float = u256_to_f64(supply);
        assert!((as_float / 1e27 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_to_whole_units() {
        let raw = U256::from(1_500_000u64);
        assert_eq!(to_whole_units(raw, 6), 1.5);
        assert_eq!(to_whole_units(U256::ZERO, 18), 0.0);
    }

    #[test]
    fn test_pow10_negative() {
        assert!((pow10(-12) - 1e-12).abs() < 1e-24);
        assert_eq!(pow10(0), 1.0);
    }
}
