//! Deposit Instruction
//!
//! Pulls the configured fixed amount of `token` from the caller into pool
//! custody and records the note. This is the only path that moves value
//! into the pool.
//!
//! # Commitment Model (Off-Chain)
//! The commitment and nullifier are computed off-chain by the depositor
//! from secrets that never reach the pool. The nullifier is fixed here and
//! is later revealed to spend the note.
//!
//! The caller must have approved the pool's custody address for at least
//! the fixed amount.

use anchor_lang::prelude::*;

use crate::crypto::field::{short_hex, Field};
use crate::error::ExecutorError;
use crate::events::{NoteDeposited, RootPushed};
use crate::host::Host;
use crate::pool::PoolContext;
use crate::scheme::BindingScheme;
use crate::state::Note;

/// Result of a successful deposit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepositReceipt {
    pub commitment: Field,
    pub amount: u64,
    /// Commitment tree position (generation-2)
    pub leaf_index: Option<u32>,
    /// Root accumulated by this deposit (generation-2)
    pub root: Option<Field>,
}

pub fn handler<S: BindingScheme, H: Host>(
    ctx: &mut PoolContext<'_, H>,
    token: Pubkey,
    denomination_id: u64,
    commitment: Field,
    nullifier: Field,
) -> Result<DepositReceipt> {
    // ========== VALIDATION ==========

    ctx.config.require_not_paused()?;
    require!(token != Pubkey::default(), ExecutorError::InvalidToken);

    let now = ctx.host.unix_timestamp();
    let amount = ctx.state.asset_rule(&token, denomination_id)?.fixed_amount;

    let note = Note::new(
        commitment,
        ctx.caller,
        token,
        denomination_id,
        amount,
        nullifier,
        now,
    )?;
    ctx.state.check_new_note(&note)?;

    // ========== TOKEN TRANSFER ==========

    let custody = ctx.config.custody;
    require!(
        ctx.host
            .transfer_from(&token, &custody, &ctx.caller, &custody, amount),
        ExecutorError::TokenTransferFailed
    );

    // ========== STATE UPDATE ==========

    ctx.state.insert_note(note)?;

    let insertion = S::after_deposit(ctx.state, &commitment, now)?;
    if let Some(inserted) = insertion {
        ctx.state.note_mut(&commitment)?.leaf_index = Some(inserted.leaf_index);
    }

    ctx.config.record_deposit()?;
    ctx.state.totals_mut(&token).add_deposited(amount)?;

    // ========== EVENT EMISSION ==========

    if let Some(inserted) = insertion.filter(|inserted| inserted.root_pushed) {
        emit!(RootPushed {
            pool: ctx.pool(),
            root: inserted.root,
            index: inserted.root_index,
            from_deposit: true,
            timestamp: now,
        });
    }

    let leaf_index = insertion.map(|inserted| inserted.leaf_index);

    emit!(NoteDeposited {
        pool: ctx.pool(),
        commitment,
        token,
        amount,
        leaf_index,
        timestamp: now,
    });

    msg!("Deposit successful");
    msg!("Amount: {}", amount);
    if let Some(index) = leaf_index {
        msg!("Leaf index: {}", index);
    }
    msg!("Commitment: {}", short_hex(&commitment));

    Ok(DepositReceipt {
        commitment,
        amount,
        leaf_index,
        root: insertion.map(|inserted| inserted.root),
    })
}
