use crate::errors::LaunchError;
use crate::mining::ordering::address_to_uint;
use alloy_primitives::{Address, B256, keccak256};
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Predicts the token address an on-chain creation would produce for a salt.
///
/// Implementations typically perform a read-only call against a node, since
/// the address can depend on chain state a caller cannot reproduce locally.
#[async_trait]
pub trait CreateSimulator: Send + Sync {
    async fn simulate_create(&self, salt: B256) -> Result<Address, LaunchError>;
}

/// A salt whose simulated token sorts above the numeraire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinedTokenOrder {
    pub salt: B256,
    pub token: Address,
    pub attempts: u32,
}

/// Salt for a given retry: `keccak256(seed ^ (attempt ++ 0x00 * 8 ++ sender))`.
pub fn derive_attempt_salt(seed: B256, sender: Address, attempt: u32) -> B256 {
    let counter = B256::right_padding_from(&attempt.to_be_bytes());
    let mix = counter | sender.into_word();
    keccak256(seed ^ mix)
}

/// Retry-based salt search for deployments without a hook.
#[derive(Debug, Clone)]
pub struct TokenOrderMiner {
    seed: B256,
    sender: Address,
    max_attempts: u32,
}

impl TokenOrderMiner {
    /// Creates a miner with a freshly drawn random seed.
    pub fn new(sender: Address, max_attempts: u32) -> Self {
        Self::with_seed(B256::from(rand::random::<[u8; 32]>()), sender, max_attempts)
    }

    pub fn with_seed(seed: B256, sender: Address, max_attempts: u32) -> Self {
        Self {
            seed,
            sender,
            max_attempts,
        }
    }

    pub fn seed(&self) -> B256 {
        self.seed
    }

    /// Simulates creation for successive salts until the token sorts strictly
    /// above `numeraire`. A failed simulation uses up its attempt.
    pub async fn mine<S: CreateSimulator + ?Sized>(
        &self,
        simulator: &S,
        numeraire: Address,
    ) -> Result<MinedTokenOrder, LaunchError> {
        let numeraire_value = address_to_uint(numeraire);

        for attempt in 0..self.max_attempts {
            let salt = derive_attempt_salt(self.seed, self.sender, attempt);
            let token = match simulator.simulate_create(salt).await {
                Ok(token) => token,
                Err(e) => {
                    warn!(attempt, %salt, error = %e, "Creation simulation failed");
                    continue;
                }
            };

            if address_to_uint(token) > numeraire_value {
                info!(%salt, %token, attempts = attempt + 1, "Found token order salt");
                return Ok(MinedTokenOrder {
                    salt,
                    token,
                    attempts: attempt + 1,
                });
            }
            debug!(attempt, %token, %numeraire, "Token sorts below numeraire, retrying");
        }

        Err(LaunchError::MiningExhausted {
            attempts: self.max_attempts as u64,
        })
    }
}

/// Finds a salt whose simulated token address sorts above `numeraire`,
/// trying at most `max_attempts` seeded salts.
pub async fn mine_token_order_salt<S: CreateSimulator + ?Sized>(
    simulator: &S,
    numeraire: Address,
    seed_address: Address,
    max_attempts: u32,
) -> Result<MinedTokenOrder, LaunchError> {
    TokenOrderMiner::new(seed_address, max_attempts)
        .mine(simulator, numeraire)
        .await
}
