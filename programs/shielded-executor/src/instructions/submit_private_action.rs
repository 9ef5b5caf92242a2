//! Submit Private Action Instruction
//!
//! Runs the proof verification gate and records the pending action. The
//! nullifier is consumed here: from this point the note cannot be
//! submitted again or withdrawn, while execution stays pending until a
//! relayer (or, in generation-1, the submitter) executes it.

use anchor_lang::prelude::*;

use crate::access::AccessPolicy;
use crate::crypto::field::{short_hex, Field};
use crate::error::ExecutorError;
use crate::events::PrivateActionSubmitted;
use crate::host::Host;
use crate::pool::PoolContext;
use crate::scheme::{BindContext, BindingScheme};
use crate::state::{NullifierUse, PendingAction};

/// Result of a successful submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// Key to execute under
    pub key: Field,
    pub nullifier: Field,
    pub action_hash: Field,
    pub recipient: Pubkey,
    /// Bound fields accepted on verifier success alone
    pub trusted_fields: u8,
}

pub fn handler<S: BindingScheme, H: Host>(
    ctx: &mut PoolContext<'_, H>,
    submission: &S::Submission,
) -> Result<SubmissionReceipt> {
    // ========== VALIDATION ==========

    ctx.config.require_not_paused()?;
    AccessPolicy::Anyone.authorize(ctx.config, &ctx.caller)?;
    ctx.config.require_verifier_configured()?;

    let now = ctx.host.unix_timestamp();

    // ========== PROOF VERIFICATION ==========

    let binding = {
        let verifier = ctx
            .host
            .verifier(&ctx.config.verifier)
            .ok_or(error!(ExecutorError::VerifierNotConfigured))?;

        S::bind(
            &BindContext {
                state: &*ctx.state,
                config: &*ctx.config,
                verifier,
                caller: ctx.caller,
            },
            submission,
        )?
    };

    // ========== STATE UPDATE ==========

    ctx.state
        .nullifiers
        .consume(binding.nullifier, now, NullifierUse::PrivateAction)?;

    ctx.state.pending.insert(
        binding.key,
        PendingAction {
            key: binding.key,
            nullifier: binding.nullifier,
            commitment: binding.commitment,
            action_type: binding.action_type,
            action_hash: binding.action_hash,
            recipient: binding.recipient,
            submitter: ctx.caller,
            root: binding.root,
            submitted_at: now,
            trusted_fields: binding.trusted_fields,
        },
    );

    ctx.config.record_submission()?;

    emit!(PrivateActionSubmitted {
        pool: ctx.pool(),
        key: binding.key,
        nullifier: binding.nullifier,
        action_type: binding.action_type,
        action_hash: binding.action_hash,
        root: binding.root,
        trusted_fields: binding.trusted_fields,
        timestamp: now,
    });

    msg!("Private {} action submitted", binding.action_type.as_str());
    msg!("Nullifier: {}", short_hex(&binding.nullifier));

    Ok(SubmissionReceipt {
        key: binding.key,
        nullifier: binding.nullifier,
        action_hash: binding.action_hash,
        recipient: binding.recipient,
        trusted_fields: binding.trusted_fields,
    })
}
