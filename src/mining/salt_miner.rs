use crate::config::MinerConfig;
use crate::errors::LaunchError;
use crate::mining::create2::Create2Preimage;
use crate::mining::hook_flags::HookFlags;
use crate::mining::ordering::{is_token0_expected, sorts_on_required_side};
use alloy_primitives::{Address, B256};
use tracing::{debug, info};

/// Deployer and init code hash of the token that shares the hook's salt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenDeployment {
    pub deployer: Address,
    pub init_code_hash: B256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookMiningRequest {
    pub hook_deployer: Address,
    pub hook_init_code_hash: B256,
    /// `None` mines for the hook alone, without a token ordering constraint.
    pub token: Option<TokenDeployment>,
    pub required_flags: HookFlags,
    pub numeraire: Address,
}

/// A salt both CREATE2 deployments accept, with the addresses it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinedSalt {
    pub salt: B256,
    pub hook: Address,
    pub token: Option<Address>,
}

/// Salt `counter`, big-endian in the low bytes of the 32-byte word.
pub fn salt_from_counter(counter: u64) -> B256 {
    let mut salt = [0u8; 32];
    salt[24..].copy_from_slice(&counter.to_be_bytes());
    B256::from(salt)
}

/// Searches salts `0..config.search_limit` for the first one under which the
/// hook address carries exactly `required_flags` and, when a token deployment
/// is given, the token address sorts on the side of the numeraire that
/// `is_token0_expected` asks for.
pub fn mine_hook_and_token_salt(
    request: &HookMiningRequest,
    config: &MinerConfig,
) -> Result<MinedSalt, LaunchError> {
    let hook_preimage = Create2Preimage::new(request.hook_deployer, request.hook_init_code_hash);
    let token_preimage = request
        .token
        .map(|token| Create2Preimage::new(token.deployer, token.init_code_hash));
    let is_token0 = is_token0_expected(request.numeraire);

    debug!(
        required_flags = %request.required_flags,
        numeraire = %request.numeraire,
        is_token0,
        search_limit = config.search_limit,
        "Mining hook salt"
    );

    for counter in 0..config.search_limit {
        if config.progress_interval > 0 && counter > 0 && counter % config.progress_interval == 0 {
            debug!(counter, "Salt search in progress");
        }

        let salt = salt_from_counter(counter);
        let hook = hook_preimage.address_for_salt(&salt);
        // Most candidates fail here, so the token address is only hashed afterwards.
        if HookFlags::from_address(hook) != request.required_flags {
            continue;
        }

        let token = match &token_preimage {
            Some(preimage) => {
                let token = preimage.address_for_salt(&salt);
                if !sorts_on_required_side(token, request.numeraire, is_token0) {
                    continue;
                }
                Some(token)
            }
            None => None,
        };

        info!(%salt, %hook, token = ?token, attempts = counter + 1, "Found salt");
        return Ok(MinedSalt { salt, hook, token });
    }

    Err(LaunchError::MiningExhausted {
        attempts: config.search_limit,
    })
}

/// Runs the search on tokio's blocking pool so an async caller is not stalled.
pub async fn mine_hook_and_token_salt_blocking_task(
    request: HookMiningRequest,
    config: MinerConfig,
) -> Result<MinedSalt, LaunchError> {
    tokio::task::spawn_blocking(move || mine_hook_and_token_salt(&request, &config))
        .await
        .map_err(|e| LaunchError::TaskError(e.to_string()))?
}
