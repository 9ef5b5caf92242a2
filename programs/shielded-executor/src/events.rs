//! Events for the shielded execution pool
//!
//! Commitments and nullifiers appear in events exactly as they appear on
//! the public ledger; owner/note links are only emitted by the plaintext
//! withdrawal exit.

use anchor_lang::prelude::*;

use crate::crypto::action_hash::ActionType;

#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub admin: Pubkey,
    pub relayer: Pubkey,
    pub verifier: Pubkey,
    pub generation: u8,
    pub initial_root: [u8; 32],
    pub timestamp: i64,
}

#[event]
pub struct PoolPaused {
    pub pool: Pubkey,
    pub admin: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct PoolUnpaused {
    pub pool: Pubkey,
    pub admin: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct AuthorityTransferInitiated {
    pub pool: Pubkey,
    pub current_admin: Pubkey,
    pub pending_admin: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct AuthorityTransferCompleted {
    pub pool: Pubkey,
    pub old_admin: Pubkey,
    pub new_admin: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct AuthorityTransferCancelled {
    pub pool: Pubkey,
    pub admin: Pubkey,
    pub cancelled_pending: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct RelayerUpdated {
    pub pool: Pubkey,
    pub old_relayer: Pubkey,
    pub new_relayer: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct VerifierUpdated {
    pub pool: Pubkey,
    pub old_verifier: Pubkey,
    pub new_verifier: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct AssetRuleSet {
    pub pool: Pubkey,
    pub token: Pubkey,
    pub denomination_id: u64,
    pub fixed_amount: u64,
    pub previous_amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct RootPushed {
    pub pool: Pubkey,
    pub root: [u8; 32],
    pub index: u64,
    pub from_deposit: bool,
    pub timestamp: i64,
}

#[event]
pub struct NoteDeposited {
    pub pool: Pubkey,
    pub commitment: [u8; 32],
    pub token: Pubkey,
    pub amount: u64,
    pub leaf_index: Option<u32>,
    pub timestamp: i64,
}

#[event]
pub struct NoteWithdrawn {
    pub pool: Pubkey,
    pub commitment: [u8; 32],
    pub nullifier: [u8; 32],
    pub owner: Pubkey,
    pub token: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct PrivateActionSubmitted {
    pub pool: Pubkey,
    pub key: [u8; 32],
    pub nullifier: [u8; 32],
    pub action_type: ActionType,
    pub action_hash: [u8; 32],
    pub root: [u8; 32],
    /// Bound fields accepted without a matching verifier output
    pub trusted_fields: u8,
    pub timestamp: i64,
}

#[event]
pub struct PrivateActionExecuted {
    pub pool: Pubkey,
    pub key: [u8; 32],
    pub nullifier: [u8; 32],
    pub action_type: ActionType,
    pub action_hash: [u8; 32],
    pub target: Pubkey,
    pub payout_token: Pubkey,
    pub payout: u64,
    pub recipient: Pubkey,
    pub executor: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct BatchExecuted {
    pub pool: Pubkey,
    pub batch_id: [u8; 32],
    pub action_type: ActionType,
    pub digest: [u8; 32],
    pub item_count: u32,
    pub total_payout: u64,
    pub executor: Pubkey,
    pub timestamp: i64,
}
