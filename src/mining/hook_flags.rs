use crate::errors::LaunchError;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;

/// All 14 permission bits a hook address can encode.
pub const FLAG_MASK: u16 = (1 << 14) - 1;

/// Lifecycle callbacks a pool hook is invoked for, read from the low 14 bits
/// of the hook's address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct HookFlags(u16);

impl HookFlags {
    pub const NONE: Self = Self(0);
    pub const BEFORE_INITIALIZE: Self = Self(1 << 13);
    pub const AFTER_INITIALIZE: Self = Self(1 << 12);
    pub const BEFORE_ADD_LIQUIDITY: Self = Self(1 << 11);
    pub const AFTER_ADD_LIQUIDITY: Self = Self(1 << 10);
    pub const BEFORE_REMOVE_LIQUIDITY: Self = Self(1 << 9);
    pub const AFTER_REMOVE_LIQUIDITY: Self = Self(1 << 8);
    pub const BEFORE_SWAP: Self = Self(1 << 7);
    pub const AFTER_SWAP: Self = Self(1 << 6);
    pub const BEFORE_DONATE: Self = Self(1 << 5);
    pub const AFTER_DONATE: Self = Self(1 << 4);
    pub const BEFORE_SWAP_RETURNS_DELTA: Self = Self(1 << 3);
    pub const AFTER_SWAP_RETURNS_DELTA: Self = Self(1 << 2);
    pub const AFTER_ADD_LIQUIDITY_RETURNS_DELTA: Self = Self(1 << 1);
    pub const AFTER_REMOVE_LIQUIDITY_RETURNS_DELTA: Self = Self(1);

    /// Permissions of the dynamic-auction hook.
    pub const DOPPLER: Self = Self(
        Self::BEFORE_INITIALIZE.0
            | Self::AFTER_INITIALIZE.0
            | Self::BEFORE_ADD_LIQUIDITY.0
            | Self::BEFORE_SWAP.0
            | Self::AFTER_SWAP.0
            | Self::BEFORE_DONATE.0,
    );

    pub fn new(bits: u16) -> Result<Self, LaunchError> {
        if bits & !FLAG_MASK != 0 {
            return Err(LaunchError::InvalidInput(format!(
                "hook flags {bits:#06x} exceed the 14-bit mask {FLAG_MASK:#06x}"
            )));
        }
        Ok(Self(bits))
    }

    /// Flags encoded in a deployed hook's address.
    pub fn from_address(address: Address) -> Self {
        let low = u16::from_be_bytes([address[18], address[19]]);
        Self(low & FLAG_MASK)
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Names of the set callbacks, highest bit first.
    pub fn names(self) -> Vec<&'static str> {
        NAMED_FLAGS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

const NAMED_FLAGS: [(HookFlags, &str); 14] = [
    (HookFlags::BEFORE_INITIALIZE, "beforeInitialize"),
    (HookFlags::AFTER_INITIALIZE, "afterInitialize"),
    (HookFlags::BEFORE_ADD_LIQUIDITY, "beforeAddLiquidity"),
    (HookFlags::AFTER_ADD_LIQUIDITY, "afterAddLiquidity"),
    (HookFlags::BEFORE_REMOVE_LIQUIDITY, "beforeRemoveLiquidity"),
    (HookFlags::AFTER_REMOVE_LIQUIDITY, "afterRemoveLiquidity"),
    (HookFlags::BEFORE_SWAP, "beforeSwap"),
    (HookFlags::AFTER_SWAP, "afterSwap"),
    (HookFlags::BEFORE_DONATE, "beforeDonate"),
    (HookFlags::AFTER_DONATE, "afterDonate"),
    (HookFlags::BEFORE_SWAP_RETURNS_DELTA, "beforeSwapReturnDelta"),
    (HookFlags::AFTER_SWAP_RETURNS_DELTA, "afterSwapReturnDelta"),
    (HookFlags::AFTER_ADD_LIQUIDITY_RETURNS_DELTA, "afterAddLiquidityReturnDelta"),
    (HookFlags::AFTER_REMOVE_LIQUIDITY_RETURNS_DELTA, "afterRemoveLiquidityReturnDelta"),
];

impl BitOr for HookFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl TryFrom<u16> for HookFlags {
    type Error = LaunchError;

    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}

impl From<HookFlags> for u16 {
    fn from(flags: HookFlags) -> u16 {
        flags.0
    }
}

impl fmt::Display for HookFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_doppler_flags() {
        assert_eq!(HookFlags::DOPPLER.bits(), 0x38e0);
        assert!(HookFlags::DOPPLER.contains(HookFlags::BEFORE_SWAP));
        assert!(!HookFlags::DOPPLER.contains(HookFlags::AFTER_DONATE));
    }

    #[test]
    fn test_names() {
        assert_eq!(
            HookFlags::DOPPLER.names(),
            vec![
                "beforeInitialize",
                "afterInitialize",
                "beforeAddLiquidity",
                "beforeSwap",
                "afterSwap",
                "beforeDonate"
            ]
        );
        assert!(HookFlags::NONE.names().is_empty());
        assert_eq!(HookFlags::new(FLAG_MASK).unwrap().names().len(), 14);
    }

    #[test]
    fn test_from_address_reads_low_bits() {
        let hook = address!("00000000000000000000000000000000000078e0");
        assert_eq!(HookFlags::from_address(hook), HookFlags::DOPPLER);
        let hook = address!("ffffffffffffffffffffffffffffffffffffc000");
        assert_eq!(HookFlags::from_address(hook), HookFlags::NONE);
    }

    #[test]
    fn test_new_rejects_out_of_mask_bits() {
        assert!(HookFlags::new(FLAG_MASK).is_ok());
        assert!(matches!(
            HookFlags::new(FLAG_MASK + 1),
            Err(LaunchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_bitor_and_serde() {
        let flags = HookFlags::BEFORE_SWAP | HookFlags::AFTER_SWAP;
        assert_eq!(flags.bits(), 0xc0);
        assert_eq!(serde_json::to_string(&flags).unwrap(), "192");
        let parsed: HookFlags = serde_json::from_str("14560").unwrap();
        assert_eq!(parsed, HookFlags::DOPPLER);
        assert!(serde_json::from_str::<HookFlags>("16384").is_err());
    }
}
