//! Withdraw Instruction
//!
//! Plaintext exit: the recorded owner takes the note's exact amount back.
//! This reveals the owner/note link and is the escape hatch, not a private
//! action. It stays available while the pool is paused.

use anchor_lang::prelude::*;

use crate::access::AccessPolicy;
use crate::crypto::field::{short_hex, Field};
use crate::error::ExecutorError;
use crate::events::NoteWithdrawn;
use crate::host::Host;
use crate::pool::PoolContext;
use crate::scheme::BindingScheme;
use crate::state::NullifierUse;

pub fn handler<S: BindingScheme, H: Host>(
    ctx: &mut PoolContext<'_, H>,
    commitment: Field,
) -> Result<u64> {
    // ========== VALIDATION ==========

    let note = ctx.state.note(&commitment)?.clone();
    AccessPolicy::NoteOwner(note.owner).authorize(ctx.config, &ctx.caller)?;

    note.require_unspent()?;
    require!(
        !ctx.state.is_pending(&S::pending_key(&note)),
        ExecutorError::ActionAlreadyPending
    );
    ctx.state.nullifiers.require_unspent(&note.nullifier)?;

    // ========== TOKEN TRANSFER ==========

    let custody = ctx.config.custody;
    require!(
        ctx.host
            .transfer(&note.token, &custody, &ctx.caller, note.amount),
        ExecutorError::TokenTransferFailed
    );

    // ========== STATE UPDATE ==========

    let now = ctx.host.unix_timestamp();
    ctx.state.note_mut(&commitment)?.mark_spent()?;
    ctx.state
        .nullifiers
        .consume(note.nullifier, now, NullifierUse::Withdrawal)?;
    ctx.config.record_withdrawal()?;
    ctx.state.totals_mut(&note.token).add_withdrawn(note.amount)?;

    emit!(NoteWithdrawn {
        pool: ctx.pool(),
        commitment,
        nullifier: note.nullifier,
        owner: note.owner,
        token: note.token,
        amount: note.amount,
        timestamp: now,
    });

    msg!("Withdrawal successful");
    msg!("Amount: {}", note.amount);
    msg!("Nullifier: {}", short_hex(&note.nullifier));

    Ok(note.amount)
}
