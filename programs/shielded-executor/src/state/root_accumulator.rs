//! Root accumulator (generation-2)
//!
//! Append-only, versioned list of accepted roots. Proofs may reference any
//! historical root, not only the latest, so a proof generated against a
//! slightly stale view stays valid.

use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::crypto::field::{is_zero_field, Field, ZERO_FIELD};
use crate::error::ExecutorError;

/// Origin of an accumulated root.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RootSource {
    /// Root of the commitment tree after a deposit (or at initialization)
    CommitmentTree,
    /// Root pushed by the admin
    Admin,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RootEntry {
    pub value: Field,
    pub index: u64,
    pub source: RootSource,
    pub pushed_at: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RootAccumulator {
    entries: Vec<RootEntry>,
    positions: BTreeMap<Field, u64>,
}

impl RootAccumulator {
    /// Append a root and return its index.
    ///
    /// # Errors
    /// * `InvalidRoot` for the zero value or a root already recorded
    pub fn push(&mut self, value: Field, source: RootSource, pushed_at: i64) -> Result<u64> {
        require!(!is_zero_field(&value), ExecutorError::InvalidRoot);
        require!(!self.contains(&value), ExecutorError::InvalidRoot);

        let index = self.entries.len() as u64;
        self.entries.push(RootEntry {
            value,
            index,
            source,
            pushed_at,
        });
        self.positions.insert(value, index);
        Ok(index)
    }

    #[inline]
    pub fn contains(&self, value: &Field) -> bool {
        self.positions.contains_key(value)
    }

    pub fn require_known(&self, value: &Field) -> Result<()> {
        require!(self.contains(value), ExecutorError::UnknownRoot);
        Ok(())
    }

    /// Latest root, or zero while empty.
    pub fn current_root(&self) -> Field {
        self.entries.last().map(|e| e.value).unwrap_or(ZERO_FIELD)
    }

    pub fn entry(&self, index: u64) -> Option<&RootEntry> {
        usize::try_from(index).ok().and_then(|i| self.entries.get(i))
    }

    pub fn index_of(&self, value: &Field) -> Option<u64> {
        self.positions.get(value).copied()
    }

    pub fn len(&self) -> u64 {
        self.entries.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_history() {
        let mut acc = RootAccumulator::default();
        assert_eq!(acc.current_root(), ZERO_FIELD);

        assert_eq!(acc.push([1u8; 32], RootSource::Admin, 0).unwrap(), 0);
        assert_eq!(acc.push([2u8; 32], RootSource::CommitmentTree, 1).unwrap(), 1);

        assert_eq!(acc.current_root(), [2u8; 32]);
        assert!(acc.contains(&[1u8; 32]));
        assert!(acc.require_known(&[1u8; 32]).is_ok());
        assert!(acc.require_known(&[3u8; 32]).is_err());
        assert_eq!(acc.index_of(&[2u8; 32]), Some(1));
        assert_eq!(acc.entry(0).unwrap().source, RootSource::Admin);
        assert_eq!(acc.len(), 2);
    }

    #[test]
    fn test_rejects_zero_and_duplicate() {
        let mut acc = RootAccumulator::default();
        assert!(acc.push(ZERO_FIELD, RootSource::Admin, 0).is_err());
        acc.push([1u8; 32], RootSource::Admin, 0).unwrap();
        assert!(acc.push([1u8; 32], RootSource::Admin, 0).is_err());
        assert_eq!(acc.len(), 1);
    }
}
