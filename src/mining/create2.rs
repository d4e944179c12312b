use alloy_primitives::{Address, B256, keccak256};

const PREIMAGE_LEN: usize = 85;
const SALT_OFFSET: usize = 21;

/// `0xff ++ deployer ++ salt ++ init_code_hash` with only the salt left to vary.
#[derive(Clone, Copy, Debug)]
pub struct Create2Preimage {
    bytes: [u8; PREIMAGE_LEN],
}

impl Create2Preimage {
    pub fn new(deployer: Address, init_code_hash: B256) -> Self {
        let mut bytes = [0u8; PREIMAGE_LEN];
        bytes[0] = 0xff;
        bytes[1..SALT_OFFSET].copy_from_slice(deployer.as_slice());
        bytes[SALT_OFFSET + 32..].copy_from_slice(init_code_hash.as_slice());
        Self { bytes }
    }

    /// Address the deployer produces for `salt`. Works on a stack copy of the
    /// preimage, so a shared preimage is never mutated.
    pub fn address_for_salt(&self, salt: &B256) -> Address {
        let mut buf = self.bytes;
        buf[SALT_OFFSET..SALT_OFFSET + 32].copy_from_slice(salt.as_slice());
        Address::from_slice(&keccak256(buf)[12..])
    }
}

/// Calculates the deterministic CREATE2 address for a deployer, salt and init code hash.
pub fn compute_create2_address(deployer: Address, salt: B256, init_code_hash: B256) -> Address {
    Create2Preimage::new(deployer, init_code_hash).address_for_salt(&salt)
}
