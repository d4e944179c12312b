use crate::errors::LaunchError;
use crate::market::market_cap::{DEFAULT_DECIMALS, PricingContext};
use crate::market::multicurve::{CurveTicks, MarketCapCeiling, market_cap_curve_to_ticks};
use crate::mining::hook_flags::HookFlags;
use crate::mining::ordering::is_token0_expected;
use crate::mining::salt_miner::{HookMiningRequest, TokenDeployment};
use crate::mining::simulator::CreateParams;
use alloy_primitives::{Address, B256, Bytes, U256};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

pub const DEFAULT_SEARCH_LIMIT: u64 = 1_000_000;
pub const DEFAULT_TOKEN_ORDER_ATTEMPTS: u32 = 256;
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 100_000;

/// Bounds for both salt searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinerConfig {
    /// Salts `0..search_limit` are tried by the sequential hook miner.
    pub search_limit: u64,
    pub max_token_order_attempts: u32,
    /// Salts between progress log lines; 0 disables them.
    pub progress_interval: u64,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            search_limit: DEFAULT_SEARCH_LIMIT,
            max_token_order_attempts: DEFAULT_TOKEN_ORDER_ATTEMPTS,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

fn default_decimals() -> u8 {
    DEFAULT_DECIMALS
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenSection {
    /// Raw supply including decimals.
    pub total_supply: U256,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NumeraireSection {
    pub address: Address,
    pub price_usd: f64,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurveSection {
    pub market_cap_lower: f64,
    pub market_cap_upper: MarketCapCeiling,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PoolMarketCap {
    Auction {
        market_cap_start: f64,
        market_cap_end: f64,
    },
    Multicurve {
        curves: Vec<CurveSection>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct PoolSection {
    pub tick_spacing: i32,
    pub market_cap: PoolMarketCap,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuctionSection {
    pub duration_seconds: u64,
    pub epoch_length_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HookMiningSection {
    pub hook_deployer: Address,
    pub hook_init_code_hash: B256,
    pub token_deployer: Option<Address>,
    pub token_init_code_hash: Option<B256>,
    #[serde(default = "doppler_flags")]
    pub required_flags: HookFlags,
}

fn doppler_flags() -> HookFlags {
    HookFlags::DOPPLER
}

/// Every Airlock `create` argument except the salt.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateParamsTemplate {
    pub initial_supply: U256,
    pub num_tokens_to_sell: U256,
    pub token_factory: Address,
    #[serde(default)]
    pub token_factory_data: Bytes,
    pub governance_factory: Address,
    #[serde(default)]
    pub governance_factory_data: Bytes,
    pub pool_initializer: Address,
    #[serde(default)]
    pub pool_initializer_data: Bytes,
    pub liquidity_migrator: Address,
    #[serde(default)]
    pub liquidity_migrator_data: Bytes,
    #[serde(default)]
    pub integrator: Address,
}

impl CreateParamsTemplate {
    pub fn into_create_params(self, numeraire: Address) -> CreateParams {
        CreateParams {
            initialSupply: self.initial_supply,
            numTokensToSell: self.num_tokens_to_sell,
            numeraire,
            tokenFactory: self.token_factory,
            tokenFactoryData: self.token_factory_data,
            governanceFactory: self.governance_factory,
            governanceFactoryData: self.governance_factory_data,
            poolInitializer: self.pool_initializer,
            poolInitializerData: self.pool_initializer_data,
            liquidityMigrator: self.liquidity_migrator,
            liquidityMigratorData: self.liquidity_migrator_data,
            integrator: self.integrator,
            salt: B256::ZERO,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenOrderSection {
    pub rpc_url: Url,
    pub airlock: Address,
    pub sender: Address,
    pub create_params: CreateParamsTemplate,
}

/// Inputs for one deployment, loaded from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct LaunchPlan {
    pub token: TokenSection,
    pub numeraire: NumeraireSection,
    pub pool: PoolSection,
    pub auction: Option<AuctionSection>,
    pub hook_mining: Option<HookMiningSection>,
    pub token_order: Option<TokenOrderSection>,
    #[serde(default)]
    pub miner: MinerConfig,
}

impl LaunchPlan {
    pub fn from_json_str(json: &str) -> Result<Self, LaunchError> {
        serde_json::from_str(json).map_err(|e| LaunchError::ConfigError(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LaunchError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| LaunchError::ConfigError(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&contents)
    }

    pub fn pricing_context(&self) -> PricingContext {
        PricingContext::new(self.token.total_supply, self.numeraire.price_usd)
            .with_decimals(self.token.decimals, self.numeraire.decimals)
    }

    /// Side the launched token ends up on. Token-order mining only accepts
    /// tokens above the numeraire, so a plan using it always yields token1;
    /// otherwise the side follows the numeraire.
    pub fn token_is_token0(&self) -> bool {
        self.token_order.is_none() && is_token0_expected(self.numeraire.address)
    }

    /// Tick bounds for every curve of a multicurve pool, oriented for the
    /// side the token ends up on. Empty for auction pools.
    pub fn curve_ticks(&self) -> Result<Vec<CurveTicks>, LaunchError> {
        let PoolMarketCap::Multicurve { curves } = &self.pool.market_cap else {
            return Ok(Vec::new());
        };
        let ctx = self.pricing_context();
        let is_token0 = self.token_is_token0();
        curves
            .iter()
            .map(|curve| {
                market_cap_curve_to_ticks(
                    curve.market_cap_lower,
                    curve.market_cap_upper,
                    &ctx,
                    is_token0,
                    self.pool.tick_spacing,
                )
            })
            .collect()
    }

    /// Hook mining inputs, if the plan has any. Token deployer and init code
    /// hash must be given together.
    pub fn hook_mining_request(&self) -> Result<Option<HookMiningRequest>, LaunchError> {
        let Some(section) = &self.hook_mining else {
            return Ok(None);
        };

        let token = match (section.token_deployer, section.token_init_code_hash) {
            (Some(deployer), Some(init_code_hash)) => Some(TokenDeployment {
                deployer,
                init_code_hash,
            }),
            (None, None) => None,
            _ => {
                return Err(LaunchError::ConfigError(
                    "token_deployer and token_init_code_hash must be set together".to_string(),
                ));
            }
        };

        Ok(Some(HookMiningRequest {
            hook_deployer: section.hook_deployer,
            hook_init_code_hash: section.hook_init_code_hash,
            token,
            required_flags: section.required_flags,
            numeraire: self.numeraire.address,
        }))
    }
}
