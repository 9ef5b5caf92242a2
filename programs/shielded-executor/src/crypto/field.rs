//! Field element utilities
//!
//! Every value the pool binds into a hash or compares against verifier
//! output is a 32-byte big-endian word. Values that enter the Poseidon
//! action hash must additionally be canonical BN254 scalar field elements,
//! so this module provides the normalization rules:
//!
//! - arbitrary digests are reduced modulo `r`
//! - addresses are split into two 128-bit halves (lossless)
//! - integers are left-padded big-endian

use anchor_lang::prelude::*;
use num_bigint::BigUint;
use num_traits::Zero;

/// 32-byte big-endian word: commitments, nullifiers, roots, hashes.
pub type Field = [u8; 32];

/// The all-zero word. Used as the "none" value throughout the pool.
pub const ZERO_FIELD: Field = [0u8; 32];

/// BN254 scalar field modulus (r), big-endian.
/// r = 21888242871839275222246405745257275088548364400416034343698204186575808495617
pub const BN254_SCALAR_MODULUS_BE: Field = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29,
    0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91,
    0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00, 0x00, 0x01,
];

/// Check if a word is all zeros.
#[inline]
pub fn is_zero_field(value: &Field) -> bool {
    value.iter().all(|&b| b == 0)
}

/// Check if a word is a canonical scalar field element (`value < r`).
pub fn is_canonical(value: &Field) -> bool {
    BigUint::from_bytes_be(value) < BigUint::from_bytes_be(&BN254_SCALAR_MODULUS_BE)
}

/// Reduce an arbitrary 32-byte word modulo `r`.
pub fn reduce_to_field(value: &Field) -> Field {
    let modulus = BigUint::from_bytes_be(&BN254_SCALAR_MODULUS_BE);
    let reduced = BigUint::from_bytes_be(value) % modulus;
    biguint_to_field(&reduced)
}

/// Left-pad a big integer into a 32-byte big-endian word.
///
/// Callers only pass values already reduced below `r`, which always fit.
fn biguint_to_field(value: &BigUint) -> Field {
    let mut out = ZERO_FIELD;
    if value.is_zero() {
        return out;
    }
    let bytes = value.to_bytes_be();
    let start = 32usize.saturating_sub(bytes.len());
    out[start..].copy_from_slice(&bytes[bytes.len().saturating_sub(32)..]);
    out
}

/// Convert u64 to 32-byte field element (big-endian).
///
/// The value is placed in the last 8 bytes of a 32-byte array.
pub fn u64_to_field(value: u64) -> Field {
    let mut bytes = ZERO_FIELD;
    bytes[24..32].copy_from_slice(&value.to_be_bytes());
    bytes
}

/// Place up to 16 bytes at the tail of a zeroed word.
fn tail_field(bytes: &[u8]) -> Field {
    let mut out = ZERO_FIELD;
    let len = bytes.len().min(16);
    out[32 - len..].copy_from_slice(&bytes[..len]);
    out
}

/// Split an address into its high and low 128-bit halves.
pub fn pubkey_to_fields(key: &Pubkey) -> (Field, Field) {
    let bytes = key.to_bytes();
    (tail_field(&bytes[..16]), tail_field(&bytes[16..]))
}

/// Interpret a bound output word as an address.
#[inline]
pub fn field_to_pubkey(value: &Field) -> Pubkey {
    Pubkey::new_from_array(*value)
}

/// Interpret an address as a 32-byte word.
#[inline]
pub fn pubkey_to_field(key: &Pubkey) -> Field {
    key.to_bytes()
}

/// Short hex prefix used in logs; full values are never logged.
pub fn short_hex(value: &Field) -> String {
    value[..8].iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_zero_field() {
        assert!(is_zero_field(&ZERO_FIELD));

        let mut partial = ZERO_FIELD;
        partial[31] = 1;
        assert!(!is_zero_field(&partial));
    }

    #[test]
    fn test_u64_to_field_encoding() {
        let field = u64_to_field(0x0102030405060708);

        assert!(field[..24].iter().all(|&b| b == 0));
        assert_eq!(&field[24..], &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]);
    }

    #[test]
    fn test_modulus_is_not_canonical() {
        assert!(!is_canonical(&BN254_SCALAR_MODULUS_BE));
        assert!(is_canonical(&u64_to_field(u64::MAX)));
    }

    #[test]
    fn test_reduce_modulus_is_zero() {
        assert_eq!(reduce_to_field(&BN254_SCALAR_MODULUS_BE), ZERO_FIELD);
    }

    #[test]
    fn test_reduce_keeps_small_values() {
        let small = u64_to_field(12345);
        assert_eq!(reduce_to_field(&small), small);
    }

    #[test]
    fn test_reduce_max_word_is_canonical() {
        let reduced = reduce_to_field(&[0xffu8; 32]);
        assert!(is_canonical(&reduced));
        assert_ne!(reduced, [0xffu8; 32]);
    }

    #[test]
    fn test_pubkey_split_is_lossless() {
        let key = Pubkey::new_unique();
        let (hi, lo) = pubkey_to_fields(&key);

        assert!(is_canonical(&hi));
        assert!(is_canonical(&lo));
        assert_eq!(&hi[16..], &key.to_bytes()[..16]);
        assert_eq!(&lo[16..], &key.to_bytes()[16..]);
    }

    #[test]
    fn test_pubkey_field_roundtrip() {
        let key = Pubkey::new_unique();
        assert_eq!(field_to_pubkey(&pubkey_to_field(&key)), key);
    }
}
