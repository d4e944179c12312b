use crate::errors::LaunchError;
use crate::math::utils::{pow10, to_whole_units};
use crate::math::v3::constants::{MAX_TICK, MIN_TICK};
use crate::math::v3::tick_math::get_sqrt_ratio_at_tick;
use crate::mining::ordering::is_token0_expected;
use alloy_primitives::{Address, U256};
use tracing::debug;

pub const DEFAULT_DECIMALS: u8 = 18;

/// What a market cap is measured against: the new token's raw supply and the
/// numeraire's USD price, with both sides' decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingContext {
    pub token_supply: U256,
    pub numeraire_price_usd: f64,
    pub token_decimals: u8,
    pub numeraire_decimals: u8,
}

impl PricingContext {
    /// Context with 18 decimals on both sides.
    pub fn new(token_supply: U256, numeraire_price_usd: f64) -> Self {
        Self {
            token_supply,
            numeraire_price_usd,
            token_decimals: DEFAULT_DECIMALS,
            numeraire_decimals: DEFAULT_DECIMALS,
        }
    }

    pub fn with_decimals(mut self, token_decimals: u8, numeraire_decimals: u8) -> Self {
        self.token_decimals = token_decimals;
        self.numeraire_decimals = numeraire_decimals;
        self
    }

    fn decimal_scale(&self) -> f64 {
        pow10(self.token_decimals as i32 - self.numeraire_decimals as i32)
    }
}

/// Start and end tick of an auction curve, both multiples of the tick spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickRange {
    pub start_tick: i32,
    pub end_tick: i32,
}

impl TickRange {
    /// sqrt price (Q64.96) the pool is initialized at.
    pub fn start_sqrt_price_x96(&self) -> Result<U256, LaunchError> {
        get_sqrt_ratio_at_tick(self.start_tick)
    }

    pub fn width(&self) -> u32 {
        self.start_tick.abs_diff(self.end_tick)
    }
}

fn positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// USD price of one whole token at `market_cap_usd`.
pub fn market_cap_to_token_price(
    market_cap_usd: f64,
    ctx: &PricingContext,
) -> Result<f64, LaunchError> {
    if !positive_finite(market_cap_usd) {
        return Err(LaunchError::InvalidInput(format!(
            "market cap must be positive, got {market_cap_usd}"
        )));
    }
    if ctx.token_supply.is_zero() {
        return Err(LaunchError::InvalidInput(
            "token supply must be positive".to_string(),
        ));
    }
    Ok(market_cap_usd / to_whole_units(ctx.token_supply, ctx.token_decimals))
}

/// Numeraire-per-token price ratio in raw units, the quantity a tick encodes.
pub fn token_price_to_ratio(
    token_price_usd: f64,
    ctx: &PricingContext,
) -> Result<f64, LaunchError> {
    if !positive_finite(token_price_usd) {
        return Err(LaunchError::InvalidInput(format!(
            "token price must be positive, got {token_price_usd}"
        )));
    }
    if !positive_finite(ctx.numeraire_price_usd) {
        return Err(LaunchError::InvalidInput(format!(
            "numeraire price must be positive, got {}",
            ctx.numeraire_price_usd
        )));
    }
    Ok(ctx.numeraire_price_usd / token_price_usd * ctx.decimal_scale())
}

/// Unaligned tick for a price ratio: log base 1.0001.
pub fn ratio_to_raw_tick(ratio: f64) -> f64 {
    ratio.ln() / 1.0001f64.ln()
}

/// Floors `raw_tick` to a multiple of `tick_spacing`. Negative ticks round
/// away from zero.
pub fn align_tick_down(raw_tick: f64, tick_spacing: i32) -> i64 {
    (raw_tick / tick_spacing as f64).floor() as i64 * tick_spacing as i64
}

fn check_tick_spacing(tick_spacing: i32) -> Result<(), LaunchError> {
    if tick_spacing <= 0 {
        return Err(LaunchError::InvalidInput(format!(
            "tick spacing must be positive, got {tick_spacing}"
        )));
    }
    Ok(())
}

/// Spacing-aligned tick at which the token trades at `market_cap_usd`.
pub fn market_cap_to_tick(
    market_cap_usd: f64,
    ctx: &PricingContext,
    tick_spacing: i32,
) -> Result<i32, LaunchError> {
    check_tick_spacing(tick_spacing)?;
    let token_price = market_cap_to_token_price(market_cap_usd, ctx)?;
    let ratio = token_price_to_ratio(token_price, ctx)?;
    let raw_tick = ratio_to_raw_tick(ratio);
    if !raw_tick.is_finite() {
        return Err(LaunchError::InvalidInput(format!(
            "price ratio {ratio} for market cap {market_cap_usd} has no finite tick"
        )));
    }

    let aligned = align_tick_down(raw_tick, tick_spacing);
    debug!(market_cap_usd, token_price, ratio, raw_tick, aligned, "Converted market cap to tick");

    if aligned < MIN_TICK as i64 || aligned > MAX_TICK as i64 {
        return Err(LaunchError::TickOutOfBounds {
            tick: aligned,
            market_cap: Some(market_cap_usd),
        });
    }
    Ok(aligned as i32)
}

/// Converts a market cap range into auction start and end ticks.
///
/// Both endpoints are aligned independently and then ordered by magnitude.
/// When the token will be token0 both ticks are negative with
/// `start_tick > end_tick`; when it will be token1 both are positive with
/// `start_tick < end_tick`. A range that aligns to a single tick is an error.
pub fn market_cap_range_to_ticks(
    market_cap_start: f64,
    market_cap_end: f64,
    ctx: &PricingContext,
    numeraire: Address,
    tick_spacing: i32,
) -> Result<TickRange, LaunchError> {
    if market_cap_start == market_cap_end {
        return Err(LaunchError::InvalidInput(format!(
            "market cap range start and end are both {market_cap_start}"
        )));
    }

    let tick_at_start = market_cap_to_tick(market_cap_start, ctx, tick_spacing)?;
    let tick_at_end = market_cap_to_tick(market_cap_end, ctx, tick_spacing)?;

    let near = tick_at_start.unsigned_abs().min(tick_at_end.unsigned_abs()) as i32;
    let far = tick_at_start.unsigned_abs().max(tick_at_end.unsigned_abs()) as i32;

    if near == far {
        return Err(LaunchError::DegenerateRange {
            start: market_cap_start,
            end: market_cap_end,
            tick: tick_at_start,
        });
    }

    let range = if is_token0_expected(numeraire) {
        TickRange {
            start_tick: -near,
            end_tick: -far,
        }
    } else {
        TickRange {
            start_tick: near,
            end_tick: far,
        }
    };
    Ok(range)
}

/// Approximate market cap at `tick`. Alignment in the forward direction is
/// lossy, so this is for display and estimates only.
pub fn tick_to_market_cap(tick: i32, ctx: &PricingContext) -> Result<f64, LaunchError> {
    if !positive_finite(ctx.numeraire_price_usd) {
        return Err(LaunchError::InvalidInput(format!(
            "numeraire price must be positive, got {}",
            ctx.numeraire_price_usd
        )));
    }
    let ratio = 1.0001f64.powf(tick.unsigned_abs() as f64);
    let token_price = ctx.numeraire_price_usd / (ratio * ctx.decimal_scale());
    Ok(token_price * to_whole_units(ctx.token_supply, ctx.token_decimals))
}
