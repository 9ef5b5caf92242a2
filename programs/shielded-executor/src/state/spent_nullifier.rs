//! Spent nullifier tracking
//!
//! # Anti-Double-Spend Mechanism
//! A nullifier is revealed when its note is withdrawn or when a private
//! action is submitted for it. Consuming inserts a record; a second
//! consumption of the same value is always rejected. Records are never
//! removed.

use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::crypto::field::{is_zero_field, Field};
use crate::error::ExecutorError;

/// How a nullifier was consumed.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NullifierUse {
    Withdrawal,
    PrivateAction,
}

/// Spent nullifier marker record.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct SpentNullifier {
    /// The nullifier hash that was spent
    pub nullifier_hash: Field,

    /// Unix timestamp when nullifier was spent
    pub spent_at: i64,

    pub spent_by: NullifierUse,
}

impl SpentNullifier {
    pub const LEN: usize = 8 // discriminator
        + 32 // nullifier_hash
        + 8 // spent_at
        + 1; // spent_by

    pub const SEED_PREFIX: &'static [u8] = b"nullifier";
}

/// Write-once set of consumed nullifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NullifierSet {
    spent: BTreeMap<Field, SpentNullifier>,
}

impl NullifierSet {
    #[inline]
    pub fn is_spent(&self, nullifier: &Field) -> bool {
        self.spent.contains_key(nullifier)
    }

    #[inline]
    pub fn require_unspent(&self, nullifier: &Field) -> Result<()> {
        require!(!self.is_spent(nullifier), ExecutorError::NullifierAlreadySpent);
        Ok(())
    }

    pub fn get(&self, nullifier: &Field) -> Option<&SpentNullifier> {
        self.spent.get(nullifier)
    }

    /// Consume a nullifier.
    ///
    /// # Errors
    /// * `InvalidNullifier` for the zero value
    /// * `NullifierAlreadySpent` if already consumed
    pub fn consume(&mut self, nullifier: Field, spent_at: i64, spent_by: NullifierUse) -> Result<()> {
        require!(!is_zero_field(&nullifier), ExecutorError::InvalidNullifier);
        self.require_unspent(&nullifier)?;

        self.spent.insert(
            nullifier,
            SpentNullifier {
                nullifier_hash: nullifier,
                spent_at,
                spent_by,
            },
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.spent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spent.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_once() {
        let mut set = NullifierSet::default();
        let nullifier = [7u8; 32];

        assert!(!set.is_spent(&nullifier));
        set.consume(nullifier, 10, NullifierUse::Withdrawal).unwrap();
        assert!(set.is_spent(&nullifier));
        assert_eq!(set.get(&nullifier).unwrap().spent_at, 10);

        assert!(set
            .consume(nullifier, 11, NullifierUse::PrivateAction)
            .is_err());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_zero_nullifier_rejected() {
        let mut set = NullifierSet::default();
        assert!(set
            .consume([0u8; 32], 0, NullifierUse::Withdrawal)
            .is_err());
        assert!(set.is_empty());
    }
}
