use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LaunchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Tick {tick} is outside the valid tick range (market cap: {market_cap:?})")]
    TickOutOfBounds { tick: i64, market_cap: Option<f64> },

    #[error("Market cap range ${start} -> ${end} collapses to a single tick ({tick})")]
    DegenerateRange { start: f64, end: f64, tick: i32 },

    #[error("Invalid auction schedule: {0}")]
    InvalidSchedule(String),

    #[error("Salt search exhausted after {attempts} attempts")]
    MiningExhausted { attempts: u64 },

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("ABI decoding error for contract call: {0}")]
    AbiDecodeError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Background task failed: {0}")]
    TaskError(String),
}
