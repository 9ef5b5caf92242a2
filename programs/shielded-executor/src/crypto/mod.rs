//! Cryptographic primitives for the shielded execution pool
//!
//! Proof verification itself is delegated to the host (see `host`); this
//! module only normalizes values, computes the action hash, and interprets
//! verifier outputs.

pub mod action_hash;
pub mod field;
pub mod poseidon;
pub mod public_inputs;

pub use action_hash::{ActionCall, ActionType, PayoutTerms};
pub use field::{is_zero_field, Field, ZERO_FIELD};
pub use poseidon::{hash_calldata, hash_two_to_one, poseidon_hash, selector, storage_key, Selector};
pub use public_inputs::{FlatPublicInputs, FlatPublicInputsBuilder, RootedOutputs};
