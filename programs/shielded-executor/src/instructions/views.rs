//! Read-only views
//!
//! Point lookups over pool storage. None of these mutate state.

use anchor_lang::prelude::*;

use crate::crypto::action_hash::ActionCall;
use crate::crypto::field::Field;
use crate::pool::ShieldedPool;
use crate::scheme::BindingScheme;
use crate::state::{AssetRule, BatchRecord, Note, PendingAction, TokenTotals};

impl<S: BindingScheme> ShieldedPool<S> {
    pub fn admin(&self) -> Pubkey {
        self.config().admin
    }

    pub fn relayer(&self) -> Pubkey {
        self.config().relayer
    }

    pub fn verifier(&self) -> Pubkey {
        self.config().verifier
    }

    pub fn is_paused(&self) -> bool {
        self.config().is_paused
    }

    pub fn generation(&self) -> u8 {
        S::GENERATION
    }

    pub fn asset_rule(&self, token: &Pubkey, denomination_id: u64) -> Option<&AssetRule> {
        self.state()
            .asset_rules
            .get(&AssetRule::key_for(token, denomination_id))
    }

    /// Fixed deposit amount for `(token, denomination_id)`; zero if unset.
    pub fn fixed_amount(&self, token: &Pubkey, denomination_id: u64) -> u64 {
        self.asset_rule(token, denomination_id)
            .map(|rule| rule.fixed_amount)
            .unwrap_or(0)
    }

    /// Value moved through the pool in `token`, if any.
    pub fn token_totals(&self, token: &Pubkey) -> Option<&TokenTotals> {
        self.state().token_totals.get(token)
    }

    pub fn note(&self, commitment: &Field) -> Option<&Note> {
        self.state().notes.get(commitment)
    }

    pub fn is_nullifier_used(&self, nullifier: &Field) -> bool {
        self.state().nullifiers.is_spent(nullifier)
    }

    pub fn pending_action(&self, key: &Field) -> Option<&PendingAction> {
        self.state().pending.get(key)
    }

    pub fn is_action_executed(&self, key: &Field) -> bool {
        self.state().is_executed(key)
    }

    pub fn batch(&self, batch_id: &Field) -> Option<&BatchRecord> {
        self.state().batches.get(batch_id)
    }

    pub fn is_batch_executed(&self, batch_id: &Field) -> bool {
        self.state().is_batch_executed(batch_id)
    }

    /// Latest accumulated root (zero for generation-1).
    pub fn current_root(&self) -> Field {
        self.state().roots.current_root()
    }

    pub fn is_known_root(&self, root: &Field) -> bool {
        self.state().roots.contains(root)
    }

    pub fn root_count(&self) -> u64 {
        self.state().roots.len()
    }

    /// The action hash a prover must bind to authorize `call`.
    pub fn preview_action_hash(&self, call: &ActionCall) -> Result<Field> {
        call.action_hash()
    }
}
