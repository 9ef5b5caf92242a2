//! Host environment seam
//!
//! The pool never talks to tokens, verifiers or action targets directly.
//! It is handed a `Host` that supplies them together with the execution
//! environment's clock and all-or-nothing semantics (checkpoint/rollback).
//!
//! Token collaborators follow the usual balance-holding asset interface.
//! A `false` return from any token call is a hard failure for the pool.

pub mod memory;

use anchor_lang::prelude::*;

use crate::crypto::field::Field;
use crate::crypto::poseidon::Selector;

pub use memory::{ActionTarget, MemoryHost, MemoryLedger, TableVerifier};

/// Opaque proof verifier.
pub trait ProofVerifier {
    /// `None` means the proof is invalid.
    fn verify(&self, proof: &[u8]) -> Option<Vec<Field>>;
}

/// Balance-holding token collaborator.
///
/// Each call names the acting account explicitly (the account whose
/// authority the call is made under).
pub trait TokenLedger {
    fn approve(&mut self, token: &Pubkey, owner: &Pubkey, spender: &Pubkey, amount: u64) -> bool;

    fn transfer(&mut self, token: &Pubkey, from: &Pubkey, to: &Pubkey, amount: u64) -> bool;

    fn transfer_from(
        &mut self,
        token: &Pubkey,
        spender: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> bool;

    fn balance_of(&self, token: &Pubkey, account: &Pubkey) -> u64;
}

/// Execution environment of a pool instance.
pub trait Host: TokenLedger {
    type Checkpoint;

    /// Snapshot every host-side effect (token balances, allowances, target
    /// state) so that a failed operation can be undone.
    fn checkpoint(&self) -> Self::Checkpoint;

    fn rollback(&mut self, checkpoint: Self::Checkpoint);

    fn unix_timestamp(&self) -> i64;

    /// Verifier registered at `address`, if any.
    fn verifier(&self, address: &Pubkey) -> Option<&dyn ProofVerifier>;

    /// Invoke `entrypoint` on `target` with `caller` as the calling account.
    fn invoke(
        &mut self,
        target: &Pubkey,
        caller: &Pubkey,
        entrypoint: &Selector,
        calldata: &[u8],
    ) -> Result<()>;
}
