//! Asset rules: fixed deposit denominations
//!
//! Each `(token, denomination_id)` pair maps to one fixed deposit amount.
//! Rules are overwritten, never removed.

use anchor_lang::prelude::*;

use crate::crypto::field::Field;
use crate::crypto::poseidon::storage_key;
use crate::error::ExecutorError;

/// Fixed deposit amount for a token and denomination.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct AssetRule {
    pub token: Pubkey,
    pub denomination_id: u64,
    pub fixed_amount: u64,
    /// Unix timestamp of the last write
    pub updated_at: i64,
}

impl AssetRule {
    pub const LEN: usize = 8 // discriminator
        + 32 // token
        + 8 // denomination_id
        + 8 // fixed_amount
        + 8; // updated_at

    pub const SEED_PREFIX: &'static [u8] = b"asset_rule";

    pub fn new(token: Pubkey, denomination_id: u64, fixed_amount: u64, updated_at: i64) -> Result<Self> {
        require!(token != Pubkey::default(), ExecutorError::InvalidToken);
        require!(denomination_id > 0, ExecutorError::InvalidDenomination);
        require!(fixed_amount > 0, ExecutorError::InvalidAmount);

        Ok(Self {
            token,
            denomination_id,
            fixed_amount,
            updated_at,
        })
    }

    /// Composite storage key for `(token, denomination_id)`.
    pub fn key_for(token: &Pubkey, denomination_id: u64) -> Field {
        storage_key(
            Self::SEED_PREFIX,
            &[token.as_ref(), &denomination_id.to_be_bytes()],
        )
    }

    pub fn key(&self) -> Field {
        Self::key_for(&self.token, self.denomination_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_rejects_zero_values() {
        let token = Pubkey::new_unique();
        assert!(AssetRule::new(Pubkey::default(), 1, 100, 0).is_err());
        assert!(AssetRule::new(token, 0, 100, 0).is_err());
        assert!(AssetRule::new(token, 1, 0, 0).is_err());
        assert!(AssetRule::new(token, 1, 100, 0).is_ok());
    }

    #[test]
    fn test_key_separates_denominations() {
        let token = Pubkey::new_unique();
        assert_eq!(AssetRule::key_for(&token, 1), AssetRule::key_for(&token, 1));
        assert_ne!(AssetRule::key_for(&token, 1), AssetRule::key_for(&token, 2));
        assert_ne!(
            AssetRule::key_for(&token, 1),
            AssetRule::key_for(&Pubkey::new_unique(), 1)
        );
    }
}
