pub mod create2;
pub mod hook_flags;
pub mod ordering;
pub mod salt_miner;
pub mod simulator;
pub mod token_order;

pub use hook_flags::{FLAG_MASK, HookFlags};
pub use ordering::is_token0_expected;
pub use salt_miner::{
    HookMiningRequest, MinedSalt, TokenDeployment, mine_hook_and_token_salt,
    mine_hook_and_token_salt_blocking_task,
};
pub use token_order::{CreateSimulator, MinedTokenOrder, TokenOrderMiner, mine_token_order_salt};
