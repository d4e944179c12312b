use crate::errors::LaunchError;
use crate::market::market_cap::{PricingContext, market_cap_to_tick};
use crate::math::v3::constants::{max_usable_tick, min_usable_tick};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MAX_SENTINEL: &str = "max";

/// Upper end of a curve: a finite USD market cap, or `"max"` for the highest
/// tick the pool's spacing allows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CeilingRepr", into = "CeilingRepr")]
pub enum MarketCapCeiling {
    Usd(f64),
    Max,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum CeilingRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<CeilingRepr> for MarketCapCeiling {
    type Error = LaunchError;

    fn try_from(repr: CeilingRepr) -> Result<Self, Self::Error> {
        match repr {
            CeilingRepr::Number(value) => Ok(Self::Usd(value)),
            CeilingRepr::Text(text) => text.parse(),
        }
    }
}

impl From<MarketCapCeiling> for CeilingRepr {
    fn from(ceiling: MarketCapCeiling) -> Self {
        match ceiling {
            MarketCapCeiling::Usd(value) => CeilingRepr::Number(value),
            MarketCapCeiling::Max => CeilingRepr::Text(MAX_SENTINEL.to_string()),
        }
    }
}

impl FromStr for MarketCapCeiling {
    type Err = LaunchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(MAX_SENTINEL) {
            return Ok(Self::Max);
        }
        s.trim()
            .parse::<f64>()
            .map(Self::Usd)
            .map_err(|_| LaunchError::InvalidInput(format!("invalid market cap ceiling: {s:?}")))
    }
}

impl fmt::Display for MarketCapCeiling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usd(value) => write!(f, "${value}"),
            Self::Max => f.write_str(MAX_SENTINEL),
        }
    }
}

/// One concentrated-liquidity position range, `tick_lower < tick_upper`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveTicks {
    pub tick_lower: i32,
    pub tick_upper: i32,
}

/// Tick bounds for a curve spanning `market_cap_floor` up to `ceiling`.
///
/// Ticks are worked out in the token1 orientation (positive, ordered by
/// magnitude, `"max"` resolving to the largest usable tick) and mirrored into
/// negative ticks when the token is token0. The caller passes the side the
/// token actually lands on, which depends on how its salt was mined.
pub fn market_cap_curve_to_ticks(
    market_cap_floor: f64,
    ceiling: MarketCapCeiling,
    ctx: &PricingContext,
    is_token0: bool,
    tick_spacing: i32,
) -> Result<CurveTicks, LaunchError> {
    let floor_tick = market_cap_to_tick(market_cap_floor, ctx, tick_spacing)?;

    let (lower, upper, ceiling_usd) = match ceiling {
        MarketCapCeiling::Usd(value) => {
            if value == market_cap_floor {
                return Err(LaunchError::InvalidInput(format!(
                    "curve floor and ceiling are both {value}"
                )));
            }
            let ceiling_tick = market_cap_to_tick(value, ctx, tick_spacing)?;
            let a = floor_tick.unsigned_abs();
            let b = ceiling_tick.unsigned_abs();
            (a.min(b) as i32, a.max(b) as i32, value)
        }
        MarketCapCeiling::Max => (
            floor_tick.abs(),
            max_usable_tick(tick_spacing),
            f64::INFINITY,
        ),
    };

    if lower >= upper {
        return Err(LaunchError::DegenerateRange {
            start: market_cap_floor,
            end: ceiling_usd,
            tick: floor_tick,
        });
    }

    if !is_token0 {
        return Ok(CurveTicks {
            tick_lower: lower,
            tick_upper: upper,
        });
    }

    let tick_lower = match ceiling {
        MarketCapCeiling::Max => min_usable_tick(tick_spacing),
        MarketCapCeiling::Usd(_) => -upper,
    };
    Ok(CurveTicks {
        tick_lower,
        tick_upper: -lower,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mining::ordering::is_token0_expected;
    use alloy_primitives::{Address, U256, address};

    const WETH_ADDRESS: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");

    fn ctx() -> PricingContext {
        PricingContext::new(U256::from(10).pow(U256::from(27)), 3000.0)
    }

    #[test]
    fn test_finite_curve_token1() {
        let ceiling = MarketCapCeiling::Usd(10_000_000.0);
        let ticks = market_cap_curve_to_ticks(100_000.0, ceiling, &ctx(), false, 60).unwrap();
        assert_eq!(
            ticks,
            CurveTicks {
                tick_lower: 126120,
                tick_upper: 172140
            }
        );
    }

    #[test]
    fn test_finite_curve_token0_mirrors() {
        let ceiling = MarketCapCeiling::Usd(10_000_000.0);
        let ticks = market_cap_curve_to_ticks(100_000.0, ceiling, &ctx(), true, 60).unwrap();
        assert_eq!(
            ticks,
            CurveTicks {
                tick_lower: -172140,
                tick_upper: -126120
            }
        );
    }

    #[test]
    fn test_max_sentinel_uses_usable_tick_bounds() {
        let ticks = market_cap_curve_to_ticks(100_000.0, MarketCapCeiling::Max, &ctx(), false, 60)
            .unwrap();
        assert_eq!(ticks.tick_lower, 172140);
        assert_eq!(ticks.tick_upper, 887220);

        let ticks = market_cap_curve_to_ticks(100_000.0, MarketCapCeiling::Max, &ctx(), true, 200)
            .unwrap();
        assert_eq!(ticks.tick_lower, min_usable_tick(200));
        assert_eq!(ticks.tick_lower, -887200);
        assert_eq!(ticks.tick_upper, -172000);
    }

    #[test]
    fn test_orientation_follows_caller_not_numeraire() {
        // WETH alone would imply token0, but a token mined to sort above it is token1.
        let ceiling = MarketCapCeiling::Usd(1_000_000.0);
        let ticks = market_cap_curve_to_ticks(100_000.0, ceiling, &ctx(), false, 200).unwrap();
        assert!(is_token0_expected(WETH_ADDRESS));
        assert!(ticks.tick_lower > 0 && ticks.tick_upper > 0);
        assert_eq!(
            ticks,
            CurveTicks {
                tick_lower: 149000,
                tick_upper: 172000
            }
        );
    }

    #[test]
    fn test_degenerate_curve() {
        let ceiling = MarketCapCeiling::Usd(100_001.0);
        let err = market_cap_curve_to_ticks(100_000.0, ceiling, &ctx(), false, 60).unwrap_err();
        assert!(matches!(err, LaunchError::DegenerateRange { tick: 172140, .. }));
    }

    #[test]
    fn test_ceiling_parsing() {
        assert_eq!("max".parse::<MarketCapCeiling>().unwrap(), MarketCapCeiling::Max);
        assert_eq!(" MAX ".parse::<MarketCapCeiling>().unwrap(), MarketCapCeiling::Max);
        assert_eq!(
            "2500000".parse::<MarketCapCeiling>().unwrap(),
            MarketCapCeiling::Usd(2_500_000.0)
        );
        assert!("lots".parse::<MarketCapCeiling>().is_err());

        let parsed: Vec<MarketCapCeiling> = serde_json::from_str(r#"[1000000, "max"]"#).unwrap();
        assert_eq!(parsed, vec![MarketCapCeiling::Usd(1_000_000.0), MarketCapCeiling::Max]);
        assert_eq!(serde_json::to_string(&MarketCapCeiling::Max).unwrap(), r#""max""#);
    }
}
