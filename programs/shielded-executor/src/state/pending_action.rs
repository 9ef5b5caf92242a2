//! Pending action registry records
//!
//! A pending action binds one key (the commitment in generation-1, the
//! nullifier in generation-2) to a single committed action hash. It exists
//! from submission until successful execution.

use anchor_lang::prelude::*;

use crate::crypto::action_hash::ActionType;
use crate::crypto::field::Field;

#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct PendingAction {
    /// Registry key (commitment or nullifier, per generation)
    pub key: Field,
    pub nullifier: Field,
    /// Commitment of the linked note
    pub commitment: Field,
    pub action_type: ActionType,
    pub action_hash: Field,
    pub recipient: Pubkey,
    /// Account that submitted the intent
    pub submitter: Pubkey,
    /// Root the proof was bound to (zero in generation-1)
    pub root: Field,
    pub submitted_at: i64,
    /// Bound fields the verifier did not expose and that were accepted on
    /// verifier success alone
    pub trusted_fields: u8,
}

impl PendingAction {
    pub const LEN: usize = 8 // discriminator
        + 32 // key
        + 32 // nullifier
        + 32 // commitment
        + 1 // action_type
        + 32 // action_hash
        + 32 // recipient
        + 32 // submitter
        + 32 // root
        + 8 // submitted_at
        + 1; // trusted_fields

    pub const SEED_PREFIX: &'static [u8] = b"pending_action";
}
