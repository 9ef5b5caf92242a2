//! Batch replay protection

use anchor_lang::prelude::*;

use crate::crypto::field::Field;

/// Executed batch marker. Presence means the batch id can never run again.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct BatchRecord {
    pub batch_id: Field,
    /// Running keccak digest over the item action hashes
    pub digest: Field,
    pub item_count: u32,
    pub executor: Pubkey,
    pub executed_at: i64,
}

impl BatchRecord {
    pub const LEN: usize = 8 // discriminator
        + 32 // batch_id
        + 32 // digest
        + 4 // item_count
        + 32 // executor
        + 8; // executed_at

    pub const SEED_PREFIX: &'static [u8] = b"batch";
}
