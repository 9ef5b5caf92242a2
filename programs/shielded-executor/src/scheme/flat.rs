//! Generation-1: flat commitment/nullifier binding
//!
//! The caller declares `(nullifier, commitment)` plus the raw public input
//! words `[nullifier, commitment, action_hash, recipient?]`. The verifier
//! outputs are compared word by word against the declared inputs for as
//! many words as it exposes; any remaining words are accepted on verifier
//! success alone and counted as trusted fields on the pending action.

use anchor_lang::prelude::*;

use crate::access::AccessPolicy;
use crate::crypto::action_hash::ActionType;
use crate::crypto::field::{is_zero_field, short_hex, Field, ZERO_FIELD};
use crate::crypto::public_inputs::FlatPublicInputs;
use crate::error::ExecutorError;
use crate::scheme::{
    require_fresh, verify_proof, ActionBinding, BindContext, BindingScheme, TreeInsertion,
};
use crate::state::{Note, PendingAction, PoolParams, PoolState};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct FlatSubmission {
    pub action_type: ActionType,
    pub nullifier: Field,
    pub commitment: Field,
    pub public_inputs: Vec<Field>,
    pub proof: Vec<u8>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlatBinding;

impl BindingScheme for FlatBinding {
    type Submission = FlatSubmission;

    const GENERATION: u8 = 1;
    const REQUIRES_PAYOUT_TERMS: bool = false;
    const HAS_ROOT_ACCUMULATOR: bool = false;

    fn pending_key(note: &Note) -> Field {
        note.commitment
    }

    fn execute_policy(pending: &PendingAction) -> AccessPolicy {
        AccessPolicy::SubmitterRelayerOrAdmin(pending.submitter)
    }

    fn initialize(_state: &mut PoolState, _params: &PoolParams, _now: i64) -> Result<Option<Field>> {
        Ok(None)
    }

    fn after_deposit(
        _state: &mut PoolState,
        _commitment: &Field,
        _now: i64,
    ) -> Result<Option<TreeInsertion>> {
        Ok(None)
    }

    fn bind(ctx: &BindContext<'_>, submission: &FlatSubmission) -> Result<ActionBinding> {
        require!(
            !is_zero_field(&submission.nullifier),
            ExecutorError::InvalidNullifier
        );
        require!(
            !is_zero_field(&submission.commitment),
            ExecutorError::InvalidCommitment
        );

        let inputs = FlatPublicInputs::from_words(&submission.public_inputs)?;
        require!(
            inputs.nullifier == submission.nullifier && inputs.commitment == submission.commitment,
            ExecutorError::PublicInputMismatch
        );
        inputs.validate()?;

        require_fresh(ctx.state, &submission.commitment, &submission.nullifier)?;
        ctx.state.note(&submission.commitment)?.require_unspent()?;

        let outputs = verify_proof(ctx.verifier, &submission.proof)?;
        let trusted_fields = inputs.check_outputs(&outputs)?;

        if trusted_fields > 0 {
            msg!(
                "Verifier exposed {} of {} bound fields; {} accepted on proof validity alone",
                outputs.len(),
                inputs.arity(),
                trusted_fields
            );
        }
        msg!(
            "Bound {} intent for commitment {}",
            submission.action_type.as_str(),
            short_hex(&submission.commitment)
        );

        Ok(ActionBinding {
            key: submission.commitment,
            nullifier: submission.nullifier,
            commitment: submission.commitment,
            action_type: submission.action_type,
            action_hash: inputs.action_hash,
            recipient: inputs.recipient.unwrap_or(ctx.caller),
            root: ZERO_FIELD,
            trusted_fields,
        })
    }
}
