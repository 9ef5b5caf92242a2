//! Note ledger records
//!
//! A note is created by a fixed-denomination deposit. Its commitment is
//! unique, its nullifier is fixed at creation, and `spent` flips exactly
//! once: on withdrawal or on execution of the action bound to it.

use anchor_lang::prelude::*;

use crate::crypto::field::{is_zero_field, Field};
use crate::error::ExecutorError;

/// A deposited note.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct Note {
    pub commitment: Field,
    pub owner: Pubkey,
    pub token: Pubkey,
    pub denomination_id: u64,
    pub amount: u64,
    pub nullifier: Field,
    pub deposited_at: i64,
    pub spent: bool,
    /// Leaf position in the commitment tree (generation-2 only)
    pub leaf_index: Option<u32>,
}

impl Note {
    pub const LEN: usize = 8 // discriminator
        + 32 // commitment
        + 32 // owner
        + 32 // token
        + 8 // denomination_id
        + 8 // amount
        + 32 // nullifier
        + 8 // deposited_at
        + 1 // spent
        + 1 + 4; // leaf_index

    pub const SEED_PREFIX: &'static [u8] = b"note";

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        commitment: Field,
        owner: Pubkey,
        token: Pubkey,
        denomination_id: u64,
        amount: u64,
        nullifier: Field,
        deposited_at: i64,
    ) -> Result<Self> {
        require!(!is_zero_field(&commitment), ExecutorError::InvalidCommitment);
        require!(!is_zero_field(&nullifier), ExecutorError::InvalidNullifier);
        require!(amount > 0, ExecutorError::InvalidAmount);

        Ok(Self {
            commitment,
            owner,
            token,
            denomination_id,
            amount,
            nullifier,
            deposited_at,
            spent: false,
            leaf_index: None,
        })
    }

    #[inline]
    pub fn require_unspent(&self) -> Result<()> {
        require!(!self.spent, ExecutorError::NoteAlreadySpent);
        Ok(())
    }

    pub fn mark_spent(&mut self) -> Result<()> {
        self.require_unspent()?;
        self.spent = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note() -> Note {
        Note::new(
            [1u8; 32],
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            1,
            100,
            [2u8; 32],
            0,
        )
        .unwrap()
    }

    #[test]
    fn test_note_rejects_zero_values() {
        let owner = Pubkey::new_unique();
        let token = Pubkey::new_unique();
        assert!(Note::new([0u8; 32], owner, token, 1, 100, [2u8; 32], 0).is_err());
        assert!(Note::new([1u8; 32], owner, token, 1, 100, [0u8; 32], 0).is_err());
        assert!(Note::new([1u8; 32], owner, token, 1, 0, [2u8; 32], 0).is_err());
    }

    #[test]
    fn test_spent_flips_once() {
        let mut note = note();
        assert!(note.require_unspent().is_ok());
        note.mark_spent().unwrap();
        assert!(note.spent);
        assert!(note.mark_spent().is_err());
    }
}
