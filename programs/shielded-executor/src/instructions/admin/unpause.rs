//! Unpause Pool Instruction

use anchor_lang::prelude::*;

use crate::access::AccessPolicy;
use crate::events::PoolUnpaused;
use crate::host::Host;
use crate::pool::PoolContext;

pub fn handler<H: Host>(ctx: &mut PoolContext<'_, H>) -> Result<()> {
    AccessPolicy::Admin.authorize(ctx.config, &ctx.caller)?;

    ctx.config.set_paused(false);

    emit!(PoolUnpaused {
        pool: ctx.pool(),
        admin: ctx.caller,
        timestamp: ctx.host.unix_timestamp(),
    });

    msg!("Pool unpaused by admin");

    Ok(())
}
