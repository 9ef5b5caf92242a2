//! Set Verifier Instruction

use anchor_lang::prelude::*;

use crate::access::AccessPolicy;
use crate::error::ExecutorError;
use crate::events::VerifierUpdated;
use crate::host::Host;
use crate::pool::PoolContext;

pub fn handler<H: Host>(ctx: &mut PoolContext<'_, H>, verifier: Pubkey) -> Result<()> {
    AccessPolicy::Admin.authorize(ctx.config, &ctx.caller)?;
    require!(verifier != Pubkey::default(), ExecutorError::InvalidAddress);

    let old_verifier = ctx.config.verifier;
    ctx.config.verifier = verifier;

    emit!(VerifierUpdated {
        pool: ctx.pool(),
        old_verifier,
        new_verifier: verifier,
        timestamp: ctx.host.unix_timestamp(),
    });

    msg!("Verifier updated: {}", verifier);

    Ok(())
}
