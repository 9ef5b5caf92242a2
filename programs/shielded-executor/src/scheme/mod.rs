//! Protocol generations as binding schemes
//!
//! Both generations share deposits, the pending-action registry, the
//! execution engine and the batch coordinator. They differ only in how a
//! proof's outputs are bound to stored state:
//!
//! - `FlatBinding` (generation-1): pending actions keyed by commitment,
//!   caller-declared public inputs checked against however many outputs
//!   the verifier exposes.
//! - `RootedBinding` (generation-2): pending actions keyed by nullifier,
//!   exactly four verifier outputs, proofs scoped to accumulated roots.

pub mod flat;
pub mod rooted;

use anchor_lang::prelude::*;

use crate::access::AccessPolicy;
use crate::crypto::action_hash::ActionType;
use crate::crypto::field::Field;
use crate::error::ExecutorError;
use crate::host::ProofVerifier;
use crate::state::{Note, PendingAction, PoolConfig, PoolParams, PoolState};

pub use flat::{FlatBinding, FlatSubmission};
pub use rooted::{RootedBinding, RootedSubmission};

/// Read-only view handed to `BindingScheme::bind`.
pub struct BindContext<'a> {
    pub state: &'a PoolState,
    pub config: &'a PoolConfig,
    pub verifier: &'a dyn ProofVerifier,
    pub caller: Pubkey,
}

/// Validated result of the proof verification gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionBinding {
    /// Pending registry key
    pub key: Field,
    pub nullifier: Field,
    pub commitment: Field,
    pub action_type: ActionType,
    pub action_hash: Field,
    pub recipient: Pubkey,
    /// Zero for generation-1
    pub root: Field,
    pub trusted_fields: u8,
}

/// Root inserted by a deposit into the commitment tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeInsertion {
    pub leaf_index: u32,
    pub root: Field,
    pub root_index: u64,
    /// False when the root was already accumulated (e.g. pushed by the admin)
    pub root_pushed: bool,
}

pub trait BindingScheme {
    type Submission;

    const GENERATION: u8;

    /// Whether every execution must carry payout terms.
    const REQUIRES_PAYOUT_TERMS: bool;

    /// Whether the pool keeps a root accumulator.
    const HAS_ROOT_ACCUMULATOR: bool;

    /// Registry key of the pending action for `note`.
    fn pending_key(note: &Note) -> Field;

    /// Who may execute a single pending action.
    fn execute_policy(pending: &PendingAction) -> AccessPolicy;

    /// Set up generation-specific state.
    fn initialize(state: &mut PoolState, params: &PoolParams, now: i64) -> Result<Option<Field>>;

    /// Generation-specific effects of a recorded deposit.
    fn after_deposit(state: &mut PoolState, commitment: &Field, now: i64)
        -> Result<Option<TreeInsertion>>;

    /// Run the proof verification gate for a submission.
    ///
    /// Performs every read the submission needs and no writes.
    fn bind(ctx: &BindContext<'_>, submission: &Self::Submission) -> Result<ActionBinding>;
}

/// Registry preconditions shared by both generations.
pub(crate) fn require_fresh(state: &PoolState, key: &Field, nullifier: &Field) -> Result<()> {
    state.nullifiers.require_unspent(nullifier)?;
    require!(!state.is_pending(key), ExecutorError::ActionAlreadyPending);
    require!(!state.is_executed(key), ExecutorError::ActionAlreadyExecuted);
    Ok(())
}

/// Call the verifier; `None` is a hard failure.
pub(crate) fn verify_proof(verifier: &dyn ProofVerifier, proof: &[u8]) -> Result<Vec<Field>> {
    require!(!proof.is_empty(), ExecutorError::InvalidProof);
    verifier
        .verify(proof)
        .ok_or(error!(ExecutorError::InvalidProof))
}
