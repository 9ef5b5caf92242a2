//! Hash Functions for the Shielded Execution Pool
//!
//! # Hash Function Architecture
//!
//! ## Circuit-facing (Poseidon)
//! The action hash is produced by the prover inside the circuit and
//! recomputed by the pool at execution time, so it uses circom-compatible
//! Poseidon over the BN254 scalar field:
//! - Field: BN254 scalar field (Fr)
//! - Rounds: RF=8, RP per circom table for the input width
//! - Inputs: canonical field elements, big-endian
//!
//! ## Pool-internal (Keccak256)
//! Commitment tree nodes, the batch audit digest and storage keys never
//! enter a circuit and use Keccak256 (available as a Solana syscall).

use anchor_lang::prelude::*;
use ark_bn254::Fr;
use light_poseidon::{Poseidon, PoseidonBytesHasher};
use solana_program::{hash, keccak};

use crate::crypto::field::{is_canonical, reduce_to_field, Field};
use crate::error::ExecutorError;

/// Maximum number of inputs supported by the circom Poseidon parameters.
pub const MAX_POSEIDON_INPUTS: usize = 12;

/// Entrypoint identifier on an action target.
pub type Selector = [u8; 8];

// ============================================================================
// POSEIDON (circuit-compatible)
// ============================================================================

/// Hash canonical field elements with circom Poseidon.
///
/// # Errors
/// * `HashingFailed` if the input count is unsupported or an input is not
///   a canonical field element.
pub fn poseidon_hash(inputs: &[Field]) -> Result<Field> {
    require!(
        !inputs.is_empty() && inputs.len() <= MAX_POSEIDON_INPUTS,
        ExecutorError::HashingFailed
    );
    require!(
        inputs.iter().all(is_canonical),
        ExecutorError::HashingFailed
    );

    let mut hasher =
        Poseidon::<Fr>::new_circom(inputs.len()).map_err(|_| error!(ExecutorError::HashingFailed))?;
    let slices: Vec<&[u8]> = inputs.iter().map(|input| input.as_slice()).collect();

    hasher
        .hash_bytes_be(&slices)
        .map_err(|_| error!(ExecutorError::HashingFailed))
}

// ============================================================================
// KECCAK (pool-internal)
// ============================================================================

/// Hash two 32-byte values: Keccak256(left || right).
///
/// Used for commitment tree nodes and the running batch digest.
pub fn hash_two_to_one(left: &Field, right: &Field) -> Field {
    keccak::hashv(&[&left[..], &right[..]]).to_bytes()
}

/// Hash calldata into a canonical field element: keccak256(calldata) mod r.
pub fn hash_calldata(calldata: &[u8]) -> Field {
    reduce_to_field(&keccak::hash(calldata).to_bytes())
}

/// Derive a storage key from a seed prefix and its parts.
pub fn storage_key(prefix: &[u8], parts: &[&[u8]]) -> Field {
    let mut seeds: Vec<&[u8]> = Vec::with_capacity(parts.len() + 1);
    seeds.push(prefix);
    seeds.extend_from_slice(parts);
    keccak::hashv(&seeds).to_bytes()
}

/// Derive an entrypoint selector from its name.
///
/// Same rule as Anchor instruction discriminators:
/// `sha256("global:<name>")[..8]`.
pub fn selector(name: &str) -> Selector {
    let digest = hash::hash(format!("global:{}", name).as_bytes()).to_bytes();
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[..8]);
    out
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::field::{u64_to_field, BN254_SCALAR_MODULUS_BE};

    #[test]
    fn test_hash_two_to_one_deterministic() {
        let left = [1u8; 32];
        let right = [2u8; 32];
        assert_eq!(hash_two_to_one(&left, &right), hash_two_to_one(&left, &right));
    }

    #[test]
    fn test_hash_two_to_one_non_commutative() {
        let a = [1u8; 32];
        let b = [2u8; 32];
        assert_ne!(hash_two_to_one(&a, &b), hash_two_to_one(&b, &a));
    }

    #[test]
    fn test_poseidon_deterministic() {
        let inputs = [u64_to_field(1), u64_to_field(2)];
        let h1 = poseidon_hash(&inputs).unwrap();
        let h2 = poseidon_hash(&inputs).unwrap();
        assert_eq!(h1, h2);
        assert!(is_canonical(&h1));
    }

    #[test]
    fn test_poseidon_input_order_matters() {
        let h1 = poseidon_hash(&[u64_to_field(1), u64_to_field(2)]).unwrap();
        let h2 = poseidon_hash(&[u64_to_field(2), u64_to_field(1)]).unwrap();
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_poseidon_rejects_empty_and_oversized() {
        assert!(poseidon_hash(&[]).is_err());
        let too_many = vec![u64_to_field(1); MAX_POSEIDON_INPUTS + 1];
        assert!(poseidon_hash(&too_many).is_err());
    }

    #[test]
    fn test_poseidon_rejects_non_canonical_input() {
        assert!(poseidon_hash(&[BN254_SCALAR_MODULUS_BE]).is_err());
    }

    #[test]
    fn test_calldata_hash_is_canonical() {
        let h = hash_calldata(b"swap 100 for at least 90");
        assert!(is_canonical(&h));
        assert_ne!(h, hash_calldata(b"swap 100 for at least 91"));
    }

    #[test]
    fn test_selector_distinct() {
        assert_eq!(selector("swap"), selector("swap"));
        assert_ne!(selector("swap"), selector("stake"));
    }

    #[test]
    fn test_storage_key_prefix_separates() {
        let part = [7u8; 32];
        assert_ne!(
            storage_key(b"asset_rule", &[&part]),
            storage_key(b"batch", &[&part])
        );
    }
}
