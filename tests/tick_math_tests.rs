use alloy_primitives::{Address, U256, address};
use launchrs::{
    LaunchError, PricingContext, market_cap_range_to_ticks, tick_to_market_cap,
    market::market_cap_to_tick,
    math::v3::constants::{MAX_TICK, MIN_TICK},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

const WETH_ADDRESS: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
const USDC_ADDRESS: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
const SPACINGS: [i32; 5] = [1, 10, 30, 60, 200];

fn one_billion_tokens() -> U256 {
    U256::from(10).pow(U256::from(27))
}

#[test]
fn test_hundred_thousand_market_cap_against_eth() {
    // price 0.0001 USD, ratio 3e7, raw tick ~172175.69
    let ctx = PricingContext::new(one_billion_tokens(), 3000.0);
    assert_eq!(market_cap_to_tick(100_000.0, &ctx, 60).unwrap(), 172140);
}

#[test]
fn test_alignment_and_ordering_for_random_ranges() {
    let mut rng = StdRng::seed_from_u64(0xdead);
    let ctx = PricingContext::new(one_billion_tokens(), 3000.0);

    for _ in 0..200 {
        let tick_spacing = SPACINGS[rng.random_range(0..SPACINGS.len())];
        let start = 10f64.powf(rng.random_range(4.0..8.0));
        let end = start * rng.random_range(2.0..100.0);
        let numeraire = if rng.random::<bool>() { WETH_ADDRESS } else { Address::ZERO };

        let range = market_cap_range_to_ticks(start, end, &ctx, numeraire, tick_spacing).unwrap();
        assert_eq!(range.start_tick % tick_spacing, 0);
        assert_eq!(range.end_tick % tick_spacing, 0);
        if numeraire == WETH_ADDRESS {
            assert!(range.start_tick > range.end_tick);
            assert!(range.start_tick <= 0);
        } else {
            assert!(range.start_tick < range.end_tick);
            assert!(range.start_tick >= 0);
        }
        assert!(range.end_tick >= MIN_TICK && range.end_tick <= MAX_TICK);
    }
}

#[test]
fn test_range_endpoint_order_does_not_matter() {
    let ctx = PricingContext::new(one_billion_tokens(), 3000.0);
    let forward = market_cap_range_to_ticks(50_000.0, 5_000_000.0, &ctx, USDC_ADDRESS, 10).unwrap();
    let reverse = market_cap_range_to_ticks(5_000_000.0, 50_000.0, &ctx, USDC_ADDRESS, 10).unwrap();
    assert_eq!(forward, reverse);
}

#[test]
fn test_round_trip_within_one_spacing() {
    let mut rng = StdRng::seed_from_u64(7);
    let ctx = PricingContext::new(one_billion_tokens(), 3000.0);

    for numeraire in [Address::ZERO, WETH_ADDRESS, USDC_ADDRESS] {
        for _ in 0..200 {
            let tick_spacing = SPACINGS[rng.random_range(0..SPACINGS.len())];
            let start = 10f64.powf(rng.random_range(4.0..7.0));
            let range =
                market_cap_range_to_ticks(start, start * 10.0, &ctx, numeraire, tick_spacing)
                    .unwrap();

            for tick in [range.start_tick, range.end_tick] {
                // Token0 ticks are negative; the forward chain yields their magnitude.
                let market_cap = tick_to_market_cap(tick, &ctx).unwrap();
                let back = market_cap_to_tick(market_cap, &ctx, tick_spacing).unwrap();
                assert!(
                    (back - tick.abs()).abs() <= tick_spacing,
                    "{numeraire}: {tick} -> {market_cap} -> {back}"
                );
            }
        }
    }
}

#[test]
fn test_token0_ticks_price_like_their_token1_mirror() {
    let ctx = PricingContext::new(one_billion_tokens(), 3000.0);
    let token0 =
        market_cap_range_to_ticks(100_000.0, 10_000_000.0, &ctx, WETH_ADDRESS, 60).unwrap();
    let token1 =
        market_cap_range_to_ticks(100_000.0, 10_000_000.0, &ctx, Address::ZERO, 60).unwrap();

    assert_eq!(token0.start_tick, -token1.start_tick);
    assert_eq!(token0.end_tick, -token1.end_tick);
    assert_eq!(
        tick_to_market_cap(token0.start_tick, &ctx).unwrap(),
        tick_to_market_cap(token1.start_tick, &ctx).unwrap()
    );

    let market_cap = tick_to_market_cap(token0.end_tick, &ctx).unwrap();
    // Floor alignment lands on or above the requested market cap, within one spacing.
    assert!(market_cap >= 100_000.0, "{market_cap}");
    assert!(market_cap < 100_000.0 * 1.0001f64.powi(60), "{market_cap}");
}

#[test]
fn test_usdc_decimals() {
    // 1B tokens at $1M against a 6-decimal dollar: ratio 1e3 * 1e12 = 1e15
    let ctx = PricingContext::new(one_billion_tokens(), 1.0).with_decimals(18, 6);
    let tick = market_cap_to_tick(1_000_000.0, &ctx, 1).unwrap();
    assert_eq!(tick, 345405);
}

#[test]
fn test_errors_carry_diagnostics() {
    let ctx = PricingContext::new(one_billion_tokens(), 1e12).with_decimals(18, 0);
    match market_cap_range_to_ticks(1.0, 10.0, &ctx, Address::ZERO, 60) {
        Err(LaunchError::TickOutOfBounds { tick, market_cap }) => {
            assert!(tick > MAX_TICK as i64);
            assert_eq!(market_cap, Some(1.0));
        }
        other => panic!("expected TickOutOfBounds, got {other:?}"),
    }

    let ctx = PricingContext::new(one_billion_tokens(), 3000.0);
    match market_cap_range_to_ticks(1_000_000.0, 1_000_050.0, &ctx, Address::ZERO, 200) {
        Err(LaunchError::DegenerateRange { start, end, .. }) => {
            assert_eq!(start, 1_000_000.0);
            assert_eq!(end, 1_000_050.0);
        }
        other => panic!("expected DegenerateRange, got {other:?}"),
    }
}
