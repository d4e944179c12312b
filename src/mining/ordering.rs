use alloy_primitives::Address;
use ruint::aliases::U160;

/// 2^159 - 1, the midpoint of the 160-bit address space.
pub const HALF_ADDRESS_SPACE: U160 = U160::from_limbs([u64::MAX, u64::MAX, 0x7fff_ffff]);

/// Interprets an address as a big-endian unsigned integer.
pub fn address_to_uint(address: Address) -> U160 {
    U160::from_be_bytes(address.0.0)
}

/// Decides which side of `numeraire` the new token has to land on.
///
/// A native-currency pairing (zero numeraire) always puts the token above it.
/// Otherwise a numeraire in the upper half of the address space asks for the
/// token to sort below it (token0), and one in the lower half asks for the
/// token to sort above it (token1).
pub fn is_token0_expected(numeraire: Address) -> bool {
    if numeraire == Address::ZERO {
        return false;
    }
    address_to_uint(numeraire) >= HALF_ADDRESS_SPACE
}

/// Strict ordering check; a token equal to the numeraire is never accepted.
pub fn sorts_on_required_side(token: Address, numeraire: Address, is_token0: bool) -> bool {
    let token = address_to_uint(token);
    let numeraire = address_to_uint(numeraire);
    if is_token0 {
        token < numeraire
    } else {
        token > numeraire
    }
}
