//! Pause Pool Instruction
//!
//! Emergency stop: blocks deposits, submissions and executions.
//! Withdrawals stay open. Only callable by the admin.

use anchor_lang::prelude::*;

use crate::access::AccessPolicy;
use crate::events::PoolPaused;
use crate::host::Host;
use crate::pool::PoolContext;

pub fn handler<H: Host>(ctx: &mut PoolContext<'_, H>) -> Result<()> {
    AccessPolicy::Admin.authorize(ctx.config, &ctx.caller)?;

    ctx.config.set_paused(true);

    emit!(PoolPaused {
        pool: ctx.pool(),
        admin: ctx.caller,
        timestamp: ctx.host.unix_timestamp(),
    });

    msg!("Pool paused by admin");

    Ok(())
}
