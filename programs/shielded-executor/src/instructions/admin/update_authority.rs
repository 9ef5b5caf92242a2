//! Two-step admin transfer
//!
//! 1. Current admin initiates with the new admin's address
//! 2. New admin accepts
//!
//! The current admin may cancel a pending transfer at any time before it
//! is accepted.

use anchor_lang::prelude::*;

use crate::access::AccessPolicy;
use crate::events::{
    AuthorityTransferCancelled, AuthorityTransferCompleted, AuthorityTransferInitiated,
};
use crate::host::Host;
use crate::pool::PoolContext;

pub fn initiate_handler<H: Host>(ctx: &mut PoolContext<'_, H>, new_admin: Pubkey) -> Result<()> {
    AccessPolicy::Admin.authorize(ctx.config, &ctx.caller)?;

    ctx.config.initiate_authority_transfer(new_admin)?;

    emit!(AuthorityTransferInitiated {
        pool: ctx.pool(),
        current_admin: ctx.caller,
        pending_admin: new_admin,
        timestamp: ctx.host.unix_timestamp(),
    });

    msg!("Admin transfer initiated to {}", new_admin);

    Ok(())
}

pub fn accept_handler<H: Host>(ctx: &mut PoolContext<'_, H>) -> Result<()> {
    AccessPolicy::PendingAdmin.authorize(ctx.config, &ctx.caller)?;

    let old_admin = ctx.config.admin;
    ctx.config.accept_authority_transfer(ctx.caller)?;

    emit!(AuthorityTransferCompleted {
        pool: ctx.pool(),
        old_admin,
        new_admin: ctx.caller,
        timestamp: ctx.host.unix_timestamp(),
    });

    msg!("Admin transfer completed");

    Ok(())
}

pub fn cancel_handler<H: Host>(ctx: &mut PoolContext<'_, H>) -> Result<()> {
    AccessPolicy::Admin.authorize(ctx.config, &ctx.caller)?;

    let cancelled_pending = ctx.config.pending_admin;
    ctx.config.cancel_authority_transfer()?;

    emit!(AuthorityTransferCancelled {
        pool: ctx.pool(),
        admin: ctx.caller,
        cancelled_pending,
        timestamp: ctx.host.unix_timestamp(),
    });

    msg!("Admin transfer cancelled");

    Ok(())
}
