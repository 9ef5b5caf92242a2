//! Execute Private Action Instruction
//!
//! # Anti-Tampering
//! The action hash is recomputed from the call the executor actually
//! supplies and must equal the hash bound at submission. Whatever runs is
//! exactly what the prover authorized.
//!
//! # Payout Measurement
//! The realized payout is the increase of the pool's payout-token balance
//! across the external call. Only that measured delta is ever transferred
//! out, never a number declared by the target or the executor.
//!
//! # Flow
//! 1. Pending action exists, not executed, target non-zero
//! 2. Action type and recomputed action hash match
//! 3. Payout terms valid for this generation
//! 4. Unlimited approval of `approval_token` to the target (if set)
//! 5. Balance snapshot, external call, balance re-read
//! 6. delta >= min_payout, transfer delta to the bound recipient
//! 7. Clear pending action, mark executed, mark note spent

use anchor_lang::prelude::*;

use crate::crypto::action_hash::ActionCall;
use crate::crypto::field::{short_hex, Field};
use crate::error::ExecutorError;
use crate::events::PrivateActionExecuted;
use crate::host::Host;
use crate::pool::PoolContext;
use crate::scheme::BindingScheme;
use crate::state::PendingAction;

/// Result of a successful execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionReceipt {
    pub key: Field,
    pub action_hash: Field,
    pub payout_token: Pubkey,
    /// Measured balance increase transferred to `recipient`
    pub payout: u64,
    pub recipient: Pubkey,
}

pub fn handler<S: BindingScheme, H: Host>(
    ctx: &mut PoolContext<'_, H>,
    key: Field,
    call: &ActionCall,
) -> Result<ExecutionReceipt> {
    ctx.config.require_not_paused()?;

    let pending = load_pending(ctx, &key)?;
    S::execute_policy(&pending).authorize(ctx.config, &ctx.caller)?;

    let (receipt, event) = settle::<S, H>(ctx, &pending, call)?;
    announce(event);
    Ok(receipt)
}

/// Fetch the pending action for `key`, rejecting executed keys.
pub(crate) fn load_pending<H: Host>(ctx: &PoolContext<'_, H>, key: &Field) -> Result<PendingAction> {
    require!(
        !ctx.state.is_executed(key),
        ExecutorError::ActionAlreadyExecuted
    );
    Ok(ctx.state.pending_action(key)?.clone())
}

/// Execute one bound action and finalize its state.
///
/// Shared by single and batch execution; authorization is the caller's
/// responsibility. The returned event is emitted by the caller once the
/// whole operation has succeeded.
pub(crate) fn settle<S: BindingScheme, H: Host>(
    ctx: &mut PoolContext<'_, H>,
    pending: &PendingAction,
    call: &ActionCall,
) -> Result<(ExecutionReceipt, PrivateActionExecuted)> {
    // ========== BINDING CHECKS ==========

    require!(call.target != Pubkey::default(), ExecutorError::InvalidTarget);
    require!(
        call.action_type == pending.action_type,
        ExecutorError::ActionTypeMismatch
    );

    let action_hash = call.action_hash()?;
    require!(
        action_hash == pending.action_hash,
        ExecutorError::ActionHashMismatch
    );

    require!(
        !S::REQUIRES_PAYOUT_TERMS || call.payout.is_some(),
        ExecutorError::PayoutTermsRequired
    );
    let terms = call.payout.unwrap_or_default();
    require!(
        terms.is_measured() || terms.min_payout == 0,
        ExecutorError::InvalidPayoutTerms
    );

    // ========== EXTERNAL CALL ==========

    let custody = ctx.config.custody;

    if call.approval_token != Pubkey::default() {
        require!(
            ctx.host
                .approve(&call.approval_token, &custody, &call.target, u64::MAX),
            ExecutorError::TokenApprovalFailed
        );
    }

    let before = if terms.is_measured() {
        ctx.host.balance_of(&terms.token, &custody)
    } else {
        0
    };

    ctx.host
        .invoke(&call.target, &custody, &call.entrypoint, &call.calldata)?;

    let payout = if terms.is_measured() {
        ctx.host
            .balance_of(&terms.token, &custody)
            .saturating_sub(before)
    } else {
        0
    };

    // ========== SLIPPAGE GUARD ==========

    require!(payout >= terms.min_payout, ExecutorError::SlippageExceeded);

    if payout > 0 {
        require!(
            ctx.host
                .transfer(&terms.token, &custody, &pending.recipient, payout),
            ExecutorError::TokenTransferFailed
        );
    }

    // ========== FINALIZE ==========

    ctx.state.pending.remove(&pending.key);
    ctx.state.executed.insert(pending.key);
    if let Some(note) = ctx.state.notes.get_mut(&pending.commitment) {
        note.mark_spent()?;
    }
    ctx.config.record_execution()?;
    if payout > 0 {
        ctx.state.totals_mut(&terms.token).add_paid_out(payout)?;
    }

    let event = PrivateActionExecuted {
        pool: ctx.pool(),
        key: pending.key,
        nullifier: pending.nullifier,
        action_type: pending.action_type,
        action_hash,
        target: call.target,
        payout_token: terms.token,
        payout,
        recipient: pending.recipient,
        executor: ctx.caller,
        timestamp: ctx.host.unix_timestamp(),
    };

    Ok((
        ExecutionReceipt {
            key: pending.key,
            action_hash,
            payout_token: terms.token,
            payout,
            recipient: pending.recipient,
        },
        event,
    ))
}

/// Emit and log a completed execution.
pub(crate) fn announce(event: PrivateActionExecuted) {
    msg!("Private {} executed", event.action_type.as_str());
    msg!("Key: {}", short_hex(&event.key));
    msg!("Payout: {}", event.payout);

    emit!(event);
}
