//! Set Relayer Instruction
//!
//! The zero address disables the relayer role; only the admin (and, in
//! generation-1, the submitter) can then execute.

use anchor_lang::prelude::*;

use crate::access::AccessPolicy;
use crate::events::RelayerUpdated;
use crate::host::Host;
use crate::pool::PoolContext;

pub fn handler<H: Host>(ctx: &mut PoolContext<'_, H>, relayer: Pubkey) -> Result<()> {
    AccessPolicy::Admin.authorize(ctx.config, &ctx.caller)?;

    let old_relayer = ctx.config.relayer;
    ctx.config.relayer = relayer;

    emit!(RelayerUpdated {
        pool: ctx.pool(),
        old_relayer,
        new_relayer: relayer,
        timestamp: ctx.host.unix_timestamp(),
    });

    msg!("Relayer updated: {}", relayer);

    Ok(())
}
