//! Pool storage
//!
//! Every map is keyed by a single hash-sized value; lookups are point
//! lookups only. The pool instance owns all of it exclusively.

use std::collections::{BTreeMap, BTreeSet};

use anchor_lang::prelude::*;

use crate::crypto::field::Field;
use crate::error::ExecutorError;
use crate::state::{
    AssetRule, BatchRecord, CommitmentTree, Note, NullifierSet, PendingAction, RootAccumulator,
    TokenTotals,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolState {
    /// Keyed by `AssetRule::key_for(token, denomination_id)`
    pub asset_rules: BTreeMap<Field, AssetRule>,
    /// Keyed by commitment
    pub notes: BTreeMap<Field, Note>,
    /// nullifier → commitment
    pub note_by_nullifier: BTreeMap<Field, Field>,
    pub nullifiers: NullifierSet,
    pub roots: RootAccumulator,
    pub commitment_tree: Option<CommitmentTree>,
    /// Keyed by the generation's pending key
    pub pending: BTreeMap<Field, PendingAction>,
    /// Keys whose pending action has been executed
    pub executed: BTreeSet<Field>,
    pub batches: BTreeMap<Field, BatchRecord>,
    /// Value moved per token
    pub token_totals: BTreeMap<Pubkey, TokenTotals>,
}

impl PoolState {
    pub fn asset_rule(&self, token: &Pubkey, denomination_id: u64) -> Result<&AssetRule> {
        self.asset_rules
            .get(&AssetRule::key_for(token, denomination_id))
            .ok_or(error!(ExecutorError::AssetRuleNotFound))
    }

    pub fn note(&self, commitment: &Field) -> Result<&Note> {
        self.notes
            .get(commitment)
            .ok_or(error!(ExecutorError::NoteNotFound))
    }

    pub fn note_mut(&mut self, commitment: &Field) -> Result<&mut Note> {
        self.notes
            .get_mut(commitment)
            .ok_or(error!(ExecutorError::NoteNotFound))
    }

    pub fn note_by_nullifier(&self, nullifier: &Field) -> Result<&Note> {
        let commitment = self
            .note_by_nullifier
            .get(nullifier)
            .ok_or(error!(ExecutorError::NoteNotFound))?;
        self.note(commitment)
    }

    #[inline]
    pub fn is_pending(&self, key: &Field) -> bool {
        self.pending.contains_key(key)
    }

    pub fn pending_action(&self, key: &Field) -> Result<&PendingAction> {
        self.pending
            .get(key)
            .ok_or(error!(ExecutorError::NoPendingAction))
    }

    #[inline]
    pub fn is_executed(&self, key: &Field) -> bool {
        self.executed.contains(key)
    }

    #[inline]
    pub fn is_batch_executed(&self, batch_id: &Field) -> bool {
        self.batches.contains_key(batch_id)
    }

    /// Preconditions for recording a new note.
    ///
    /// # Errors
    /// * `DuplicateCommitment` if the commitment was seen before
    /// * `NullifierAlreadySpent` if the nullifier was already consumed
    /// * `NullifierAlreadyBound` if the nullifier belongs to another note
    pub fn check_new_note(&self, note: &Note) -> Result<()> {
        require!(
            !self.notes.contains_key(&note.commitment),
            ExecutorError::DuplicateCommitment
        );
        self.nullifiers.require_unspent(&note.nullifier)?;
        require!(
            !self.note_by_nullifier.contains_key(&note.nullifier),
            ExecutorError::NullifierAlreadyBound
        );
        Ok(())
    }

    /// Running totals for `token`, created on first use.
    pub fn totals_mut(&mut self, token: &Pubkey) -> &mut TokenTotals {
        self.token_totals
            .entry(*token)
            .or_insert_with(|| TokenTotals::new(*token))
    }

    pub fn insert_note(&mut self, note: Note) -> Result<()> {
        self.check_new_note(&note)?;

        self.note_by_nullifier.insert(note.nullifier, note.commitment);
        self.notes.insert(note.commitment, note);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(commitment: u8, nullifier: u8) -> Note {
        Note::new(
            [commitment; 32],
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            1,
            100,
            [nullifier; 32],
            0,
        )
        .unwrap()
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut state = PoolState::default();
        state.insert_note(note(1, 2)).unwrap();

        assert_eq!(state.note(&[1u8; 32]).unwrap().nullifier, [2u8; 32]);
        assert_eq!(state.note_by_nullifier(&[2u8; 32]).unwrap().commitment, [1u8; 32]);
        assert!(state.note(&[9u8; 32]).is_err());
    }

    #[test]
    fn test_duplicate_commitment_rejected() {
        let mut state = PoolState::default();
        state.insert_note(note(1, 2)).unwrap();
        assert!(state.insert_note(note(1, 3)).is_err());
    }

    #[test]
    fn test_totals_kept_per_token() {
        let mut state = PoolState::default();
        let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());

        state.totals_mut(&a).add_deposited(u64::MAX).unwrap();
        state.totals_mut(&b).add_deposited(u64::MAX).unwrap();
        state.totals_mut(&a).add_deposited(1).unwrap();

        assert_eq!(state.token_totals[&a].deposited, u128::from(u64::MAX) + 1);
        assert_eq!(state.token_totals[&b].deposited, u128::from(u64::MAX));
    }

    #[test]
    fn test_bound_nullifier_rejected() {
        let mut state = PoolState::default();
        state.insert_note(note(1, 2)).unwrap();
        assert!(state.insert_note(note(4, 2)).is_err());
        assert_eq!(state.notes.len(), 1);
    }
}
