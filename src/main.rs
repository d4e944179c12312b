use alloy_provider::{Provider, ProviderBuilder};
use launchrs::{
    AuctionSchedule, LaunchPlan, TickRange,
    config::PoolMarketCap,
    market::{market_cap_range_to_ticks, tick_to_market_cap},
    math::v3::tick_math::get_sqrt_ratio_at_tick,
    mining::{
        TokenOrderMiner, mine_hook_and_token_salt_blocking_task,
        simulator::AirlockCreateSimulator,
    },
};
use std::sync::Arc;

const DEFAULT_PLAN_PATH: &str = "demos/launch_plan.json";

type DynProvider = dyn Provider + Send + Sync;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let plan_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_PLAN_PATH.to_string());
    tracing::info!(path = %plan_path, "Loading launch plan");
    let plan = LaunchPlan::from_path(&plan_path)?;

    let ctx = plan.pricing_context();
    let numeraire = plan.numeraire.address;
    let tick_spacing = plan.pool.tick_spacing;
    println!(
        "Numeraire {} (token expected as token{})",
        numeraire,
        if plan.token_is_token0() { 0 } else { 1 }
    );

    match &plan.pool.market_cap {
        PoolMarketCap::Auction {
            market_cap_start,
            market_cap_end,
        } => {
            let range: TickRange = market_cap_range_to_ticks(
                *market_cap_start,
                *market_cap_end,
                &ctx,
                numeraire,
                tick_spacing,
            )?;
            println!(
                "Auction ticks: start {} -> end {} ({} ticks wide, spacing {})",
                range.start_tick,
                range.end_tick,
                range.width(),
                tick_spacing
            );
            println!("    => start sqrtPriceX96: {}", range.start_sqrt_price_x96()?);
            println!(
                "    => implied market caps: ${:.2} -> ${:.2}",
                tick_to_market_cap(range.start_tick, &ctx)?,
                tick_to_market_cap(range.end_tick, &ctx)?
            );

            if let Some(auction) = &plan.auction {
                let schedule = AuctionSchedule::new(
                    range,
                    auction.duration_seconds,
                    auction.epoch_length_seconds,
                    tick_spacing,
                );
                println!(
                    "Gamma: {} over {} epochs",
                    schedule.gamma()?,
                    schedule.total_epochs()?
                );
            }
        }
        PoolMarketCap::Multicurve { curves } => {
            let ticks = plan.curve_ticks()?;
            for (i, (curve, ticks)) in curves.iter().zip(&ticks).enumerate() {
                println!(
                    "Curve {}: ${} -> {}: ticks [{}, {}]",
                    i,
                    curve.market_cap_lower,
                    curve.market_cap_upper,
                    ticks.tick_lower,
                    ticks.tick_upper
                );
                println!(
                    "    => sqrtPriceX96 at lower tick: {}",
                    get_sqrt_ratio_at_tick(ticks.tick_lower)?
                );
            }
        }
    }

    if let Some(request) = plan.hook_mining_request()? {
        println!(
            "Mining salt for hook flags {} [{}] (searching up to {} salts)...",
            request.required_flags,
            request.required_flags.names().join(", "),
            plan.miner.search_limit
        );
        let mined = mine_hook_and_token_salt_blocking_task(request, plan.miner.clone()).await?;
        println!("    => salt: {}", mined.salt);
        println!("    => hook: {}", mined.hook);
        if let Some(token) = mined.token {
            println!("    => token: {}", token);
        }
    }

    if let Some(order) = plan.token_order.clone() {
        let provider = ProviderBuilder::new().connect_http(order.rpc_url.clone());
        let provider_arc: Arc<DynProvider> = Arc::new(provider);
        let simulator = AirlockCreateSimulator::new(
            provider_arc,
            order.airlock,
            order.sender,
            order.create_params.into_create_params(numeraire),
        );
        let miner = TokenOrderMiner::new(order.sender, plan.miner.max_token_order_attempts);
        println!(
            "Mining token order salt against {} ({} attempts)...",
            order.airlock, plan.miner.max_token_order_attempts
        );
        let mined = miner.mine(&simulator, numeraire).await?;
        println!(
            "    => salt: {} (token {}, {} attempts)",
            mined.salt, mined.token, mined.attempts
        );
    }

    Ok(())
}
