//! Generation-2: versioned-root note binding
//!
//! The verifier returns exactly `(root, nullifier, action_hash, recipient)`.
//! Root and nullifier must equal the caller's declared values, the root
//! must be present in the accumulator, and the note is located through its
//! nullifier.

use anchor_lang::prelude::*;

use crate::access::AccessPolicy;
use crate::crypto::action_hash::ActionType;
use crate::crypto::field::{is_zero_field, short_hex, Field};
use crate::crypto::public_inputs::RootedOutputs;
use crate::error::ExecutorError;
use crate::scheme::{
    require_fresh, verify_proof, ActionBinding, BindContext, BindingScheme, TreeInsertion,
};
use crate::state::{CommitmentTree, Note, PendingAction, PoolParams, PoolState, RootSource};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RootedSubmission {
    pub action_type: ActionType,
    pub root: Field,
    pub nullifier: Field,
    pub proof: Vec<u8>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RootedBinding;

impl BindingScheme for RootedBinding {
    type Submission = RootedSubmission;

    const GENERATION: u8 = 2;
    const REQUIRES_PAYOUT_TERMS: bool = true;
    const HAS_ROOT_ACCUMULATOR: bool = true;

    fn pending_key(note: &Note) -> Field {
        note.nullifier
    }

    fn execute_policy(_pending: &PendingAction) -> AccessPolicy {
        AccessPolicy::RelayerOrAdmin
    }

    /// Build the commitment tree and accumulate its empty root.
    fn initialize(state: &mut PoolState, params: &PoolParams, now: i64) -> Result<Option<Field>> {
        let tree = CommitmentTree::new(params.tree_depth)?;
        let empty_root = tree.current_root;

        state
            .roots
            .push(empty_root, RootSource::CommitmentTree, now)?;
        state.commitment_tree = Some(tree);

        Ok(Some(empty_root))
    }

    fn after_deposit(
        state: &mut PoolState,
        commitment: &Field,
        now: i64,
    ) -> Result<Option<TreeInsertion>> {
        let tree = state
            .commitment_tree
            .as_mut()
            .ok_or(error!(ExecutorError::UnsupportedOperation))?;
        let (leaf_index, root) = tree.insert_leaf(*commitment)?;

        let (root_index, root_pushed) = match state.roots.index_of(&root) {
            Some(index) => (index, false),
            None => (state.roots.push(root, RootSource::CommitmentTree, now)?, true),
        };

        Ok(Some(TreeInsertion {
            leaf_index,
            root,
            root_index,
            root_pushed,
        }))
    }

    fn bind(ctx: &BindContext<'_>, submission: &RootedSubmission) -> Result<ActionBinding> {
        require!(!is_zero_field(&submission.root), ExecutorError::InvalidRoot);
        require!(
            !is_zero_field(&submission.nullifier),
            ExecutorError::InvalidNullifier
        );

        require_fresh(ctx.state, &submission.nullifier, &submission.nullifier)?;

        let note = ctx.state.note_by_nullifier(&submission.nullifier)?;
        note.require_unspent()?;
        require!(
            note.nullifier == submission.nullifier,
            ExecutorError::NoteNullifierMismatch
        );

        ctx.state.roots.require_known(&submission.root)?;

        let raw = verify_proof(ctx.verifier, &submission.proof)?;
        let outputs = RootedOutputs::from_outputs(&raw)?;
        outputs.bind(&submission.root, &submission.nullifier)?;

        msg!(
            "Bound {} intent for nullifier {} at root {}",
            submission.action_type.as_str(),
            short_hex(&submission.nullifier),
            short_hex(&submission.root)
        );

        Ok(ActionBinding {
            key: submission.nullifier,
            nullifier: submission.nullifier,
            commitment: note.commitment,
            action_type: submission.action_type,
            action_hash: outputs.action_hash,
            recipient: outputs.recipient,
            root: submission.root,
            trusted_fields: 0,
        })
    }
}
