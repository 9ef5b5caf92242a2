//! Action Hash - binding between an authorized and an executed action
//!
//! The prover commits to the exact external call it authorizes. At
//! execution time the pool recomputes the hash from what the relayer
//! actually supplies and requires equality with the stored hash, so any
//! substitution of target, entrypoint, calldata, approval token or payout
//! terms is rejected.
//!
//! # Hash Layout
//! ```text
//! action_hash = Poseidon(
//!     action_type,
//!     target.hi, target.lo,
//!     entrypoint,
//!     keccak256(calldata) mod r,
//!     approval_token.hi, approval_token.lo,
//!     [payout_token.hi, payout_token.lo, min_payout]
//! )
//! ```
//! The bracketed payout suffix is present iff the call carries payout
//! terms. Every input is normalized to a canonical BN254 field element.

use anchor_lang::prelude::*;

use crate::crypto::field::{pubkey_to_fields, u64_to_field, Field};
use crate::crypto::poseidon::{hash_calldata, poseidon_hash, Selector};

/// Kind of external action a private intent authorizes.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionType {
    Swap,
    Limit,
    Stake,
}

impl ActionType {
    /// Stable numeric tag used inside the action hash.
    pub fn tag(self) -> u64 {
        match self {
            ActionType::Swap => 1,
            ActionType::Limit => 2,
            ActionType::Stake => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::Swap => "swap",
            ActionType::Limit => "limit",
            ActionType::Stake => "stake",
        }
    }
}

/// Payout accounting for an action.
///
/// `token == Pubkey::default()` disables payout measurement; in that case
/// `min_payout` must be zero.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PayoutTerms {
    pub token: Pubkey,
    pub min_payout: u64,
}

impl PayoutTerms {
    pub fn new(token: Pubkey, min_payout: u64) -> Self {
        Self { token, min_payout }
    }

    /// Whether the payout token is set.
    #[inline]
    pub fn is_measured(&self) -> bool {
        self.token != Pubkey::default()
    }
}

/// A fully specified external call.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ActionCall {
    pub action_type: ActionType,
    pub target: Pubkey,
    pub entrypoint: Selector,
    pub calldata: Vec<u8>,
    /// Token the pool approves to `target` before the call (zero = none)
    pub approval_token: Pubkey,
    pub payout: Option<PayoutTerms>,
}

impl ActionCall {
    pub fn new(action_type: ActionType, target: Pubkey, entrypoint: Selector, calldata: Vec<u8>) -> Self {
        Self {
            action_type,
            target,
            entrypoint,
            calldata,
            approval_token: Pubkey::default(),
            payout: None,
        }
    }

    pub fn swap(target: Pubkey, entrypoint: Selector, calldata: Vec<u8>) -> Self {
        Self::new(ActionType::Swap, target, entrypoint, calldata)
    }

    pub fn limit_order(target: Pubkey, entrypoint: Selector, calldata: Vec<u8>) -> Self {
        Self::new(ActionType::Limit, target, entrypoint, calldata)
    }

    pub fn stake(target: Pubkey, entrypoint: Selector, calldata: Vec<u8>) -> Self {
        Self::new(ActionType::Stake, target, entrypoint, calldata)
    }

    pub fn with_approval(mut self, token: Pubkey) -> Self {
        self.approval_token = token;
        self
    }

    pub fn with_payout(mut self, token: Pubkey, min_payout: u64) -> Self {
        self.payout = Some(PayoutTerms::new(token, min_payout));
        self
    }

    /// Normalized field elements in hash order.
    pub fn to_field_elements(&self) -> Vec<Field> {
        let (target_hi, target_lo) = pubkey_to_fields(&self.target);
        let (approval_hi, approval_lo) = pubkey_to_fields(&self.approval_token);

        let mut entrypoint = [0u8; 32];
        entrypoint[24..].copy_from_slice(&self.entrypoint);

        let mut fields = vec![
            u64_to_field(self.action_type.tag()),
            target_hi,
            target_lo,
            entrypoint,
            hash_calldata(&self.calldata),
            approval_hi,
            approval_lo,
        ];

        if let Some(payout) = &self.payout {
            let (payout_hi, payout_lo) = pubkey_to_fields(&payout.token);
            fields.push(payout_hi);
            fields.push(payout_lo);
            fields.push(u64_to_field(payout.min_payout));
        }

        fields
    }

    /// Compute the action hash for this call.
    pub fn action_hash(&self) -> Result<Field> {
        poseidon_hash(&self.to_field_elements())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::field::is_canonical;
    use crate::crypto::poseidon::selector;

    fn sample_call() -> ActionCall {
        ActionCall {
            action_type: ActionType::Swap,
            target: Pubkey::new_unique(),
            entrypoint: selector("swap"),
            calldata: vec![1, 2, 3, 4],
            approval_token: Pubkey::new_unique(),
            payout: Some(PayoutTerms::new(Pubkey::new_unique(), 90)),
        }
    }

    #[test]
    fn test_field_element_count() {
        let mut call = sample_call();
        assert_eq!(call.to_field_elements().len(), 10);

        call.payout = None;
        assert_eq!(call.to_field_elements().len(), 7);
    }

    #[test]
    fn test_action_hash_deterministic_and_canonical() {
        let call = sample_call();
        let h1 = call.action_hash().unwrap();
        let h2 = call.clone().action_hash().unwrap();
        assert_eq!(h1, h2);
        assert!(is_canonical(&h1));
    }

    #[test]
    fn test_action_type_changes_hash() {
        let call = sample_call();
        let mut limit = call.clone();
        limit.action_type = ActionType::Limit;
        assert_ne!(call.action_hash().unwrap(), limit.action_hash().unwrap());
    }

    #[test]
    fn test_payout_suffix_changes_hash() {
        let call = sample_call();
        let mut without = call.clone();
        without.payout = None;
        assert_ne!(call.action_hash().unwrap(), without.action_hash().unwrap());
    }

    #[test]
    fn test_payout_terms_measured() {
        assert!(!PayoutTerms::default().is_measured());
        assert!(PayoutTerms::new(Pubkey::new_unique(), 0).is_measured());
    }
}
