//! In-memory host
//!
//! Token balances and allowances live in a `MemoryLedger`; action targets
//! are stateless programs that act on that ledger, so a ledger snapshot is
//! a complete host checkpoint. Used by the test-suite and for off-chain
//! dry runs of relayer batches.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use anchor_lang::prelude::*;

use crate::crypto::field::Field;
use crate::crypto::poseidon::Selector;
use crate::error::ExecutorError;
use crate::host::{Host, ProofVerifier, TokenLedger};

// ============================================================================
// TOKEN LEDGER
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryLedger {
    /// (token, account) → balance
    balances: BTreeMap<(Pubkey, Pubkey), u64>,
    /// (token, owner, spender) → allowance
    allowances: BTreeMap<(Pubkey, Pubkey, Pubkey), u64>,
}

impl MemoryLedger {
    /// Credit `amount` of `token` to `account` out of thin air.
    pub fn mint(&mut self, token: &Pubkey, account: &Pubkey, amount: u64) -> bool {
        let balance = self.balances.entry((*token, *account)).or_insert(0);
        match balance.checked_add(amount) {
            Some(updated) => {
                *balance = updated;
                true
            }
            None => false,
        }
    }

    pub fn allowance(&self, token: &Pubkey, owner: &Pubkey, spender: &Pubkey) -> u64 {
        self.allowances
            .get(&(*token, *owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    fn move_balance(&mut self, token: &Pubkey, from: &Pubkey, to: &Pubkey, amount: u64) -> bool {
        let from_balance = self.balance_of(token, from);
        let Some(from_after) = from_balance.checked_sub(amount) else {
            return false;
        };
        if from == to {
            return true;
        }
        let Some(to_after) = self.balance_of(token, to).checked_add(amount) else {
            return false;
        };

        self.balances.insert((*token, *from), from_after);
        self.balances.insert((*token, *to), to_after);
        true
    }
}

impl TokenLedger for MemoryLedger {
    fn approve(&mut self, token: &Pubkey, owner: &Pubkey, spender: &Pubkey, amount: u64) -> bool {
        self.allowances.insert((*token, *owner, *spender), amount);
        true
    }

    fn transfer(&mut self, token: &Pubkey, from: &Pubkey, to: &Pubkey, amount: u64) -> bool {
        self.move_balance(token, from, to, amount)
    }

    fn transfer_from(
        &mut self,
        token: &Pubkey,
        spender: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> bool {
        let allowance = self.allowance(token, from, spender);
        let Some(remaining) = allowance.checked_sub(amount) else {
            return false;
        };
        if !self.move_balance(token, from, to, amount) {
            return false;
        }
        // Unlimited approvals are never drawn down.
        if allowance != u64::MAX {
            self.allowances.insert((*token, *from, *spender), remaining);
        }
        true
    }

    fn balance_of(&self, token: &Pubkey, account: &Pubkey) -> u64 {
        self.balances
            .get(&(*token, *account))
            .copied()
            .unwrap_or(0)
    }
}

// ============================================================================
// COLLABORATORS
// ============================================================================

/// An external program the pool can invoke.
///
/// `this` is the target's own address; token movements go through
/// `ledger` under the target's authority.
pub trait ActionTarget {
    fn call(
        &self,
        this: &Pubkey,
        ledger: &mut dyn TokenLedger,
        caller: &Pubkey,
        entrypoint: &Selector,
        calldata: &[u8],
    ) -> Result<()>;
}

/// Verifier backed by a lookup table of accepted proofs.
#[derive(Debug, Default)]
pub struct TableVerifier {
    accepted: RefCell<BTreeMap<Vec<u8>, Vec<Field>>>,
}

impl TableVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `proof` with the given public outputs.
    pub fn accept(&self, proof: &[u8], outputs: Vec<Field>) {
        self.accepted.borrow_mut().insert(proof.to_vec(), outputs);
    }

    pub fn revoke(&self, proof: &[u8]) {
        self.accepted.borrow_mut().remove(proof);
    }
}

impl ProofVerifier for TableVerifier {
    fn verify(&self, proof: &[u8]) -> Option<Vec<Field>> {
        self.accepted.borrow().get(proof).cloned()
    }
}

// ============================================================================
// HOST
// ============================================================================

#[derive(Default)]
pub struct MemoryHost {
    pub ledger: MemoryLedger,
    verifiers: BTreeMap<Pubkey, Rc<dyn ProofVerifier>>,
    targets: BTreeMap<Pubkey, Rc<dyn ActionTarget>>,
    now: i64,
}

impl MemoryHost {
    pub fn new(now: i64) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    pub fn register_verifier(&mut self, address: Pubkey, verifier: Rc<dyn ProofVerifier>) {
        self.verifiers.insert(address, verifier);
    }

    pub fn register_target(&mut self, address: Pubkey, target: Rc<dyn ActionTarget>) {
        self.targets.insert(address, target);
    }

    pub fn set_time(&mut self, now: i64) {
        self.now = now;
    }

    pub fn advance(&mut self, seconds: i64) {
        self.now = self.now.saturating_add(seconds);
    }

    pub fn mint(&mut self, token: &Pubkey, account: &Pubkey, amount: u64) -> bool {
        self.ledger.mint(token, account, amount)
    }
}

impl TokenLedger for MemoryHost {
    fn approve(&mut self, token: &Pubkey, owner: &Pubkey, spender: &Pubkey, amount: u64) -> bool {
        self.ledger.approve(token, owner, spender, amount)
    }

    fn transfer(&mut self, token: &Pubkey, from: &Pubkey, to: &Pubkey, amount: u64) -> bool {
        self.ledger.transfer(token, from, to, amount)
    }

    fn transfer_from(
        &mut self,
        token: &Pubkey,
        spender: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> bool {
        self.ledger.transfer_from(token, spender, from, to, amount)
    }

    fn balance_of(&self, token: &Pubkey, account: &Pubkey) -> u64 {
        self.ledger.balance_of(token, account)
    }
}

impl Host for MemoryHost {
    type Checkpoint = MemoryLedger;

    fn checkpoint(&self) -> MemoryLedger {
        self.ledger.clone()
    }

    fn rollback(&mut self, checkpoint: MemoryLedger) {
        self.ledger = checkpoint;
    }

    fn unix_timestamp(&self) -> i64 {
        self.now
    }

    fn verifier(&self, address: &Pubkey) -> Option<&dyn ProofVerifier> {
        self.verifiers.get(address).map(|v| &**v)
    }

    fn invoke(
        &mut self,
        target: &Pubkey,
        caller: &Pubkey,
        entrypoint: &Selector,
        calldata: &[u8],
    ) -> Result<()> {
        let program = self
            .targets
            .get(target)
            .cloned()
            .ok_or(error!(ExecutorError::ActionCallFailed))?;

        program
            .call(target, &mut self.ledger, caller, entrypoint, calldata)
            .map_err(|_| error!(ExecutorError::ActionCallFailed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_requires_balance() {
        let mut ledger = MemoryLedger::default();
        let token = Pubkey::new_unique();
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();

        assert!(ledger.mint(&token, &alice, 100));
        assert!(!ledger.transfer(&token, &alice, &bob, 101));
        assert!(ledger.transfer(&token, &alice, &bob, 40));
        assert_eq!(ledger.balance_of(&token, &alice), 60);
        assert_eq!(ledger.balance_of(&token, &bob), 40);
    }

    #[test]
    fn test_transfer_from_draws_allowance() {
        let mut ledger = MemoryLedger::default();
        let token = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let spender = Pubkey::new_unique();

        ledger.mint(&token, &owner, 100);
        assert!(!ledger.transfer_from(&token, &spender, &owner, &spender, 10));

        ledger.approve(&token, &owner, &spender, 30);
        assert!(ledger.transfer_from(&token, &spender, &owner, &spender, 10));
        assert_eq!(ledger.allowance(&token, &owner, &spender), 20);
        assert!(!ledger.transfer_from(&token, &spender, &owner, &spender, 21));
    }

    #[test]
    fn test_unlimited_allowance_not_drawn() {
        let mut ledger = MemoryLedger::default();
        let token = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let spender = Pubkey::new_unique();

        ledger.mint(&token, &owner, 100);
        ledger.approve(&token, &owner, &spender, u64::MAX);
        assert!(ledger.transfer_from(&token, &spender, &owner, &spender, 50));
        assert_eq!(ledger.allowance(&token, &owner, &spender), u64::MAX);
    }

    #[test]
    fn test_checkpoint_rollback() {
        let mut host = MemoryHost::new(0);
        let token = Pubkey::new_unique();
        let account = Pubkey::new_unique();

        host.mint(&token, &account, 10);
        let checkpoint = host.checkpoint();
        host.mint(&token, &account, 5);
        host.rollback(checkpoint);
        assert_eq!(host.balance_of(&token, &account), 10);
    }

    #[test]
    fn test_table_verifier() {
        let verifier = TableVerifier::new();
        assert!(verifier.verify(b"proof").is_none());
        verifier.accept(b"proof", vec![[1u8; 32]]);
        assert_eq!(verifier.verify(b"proof"), Some(vec![[1u8; 32]]));
        verifier.revoke(b"proof");
        assert!(verifier.verify(b"proof").is_none());
    }

    #[test]
    fn test_unknown_target_fails() {
        let mut host = MemoryHost::new(0);
        let result = host.invoke(&Pubkey::new_unique(), &Pubkey::new_unique(), &[0u8; 8], &[]);
        assert!(result.is_err());
    }
}
