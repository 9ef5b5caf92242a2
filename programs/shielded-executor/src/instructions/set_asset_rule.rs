//! Set Asset Rule Instruction
//!
//! Last write wins: an existing rule for the same `(token, denomination)`
//! is overwritten. Rules are never removed.

use anchor_lang::prelude::*;

use crate::access::AccessPolicy;
use crate::events::AssetRuleSet;
use crate::host::Host;
use crate::pool::PoolContext;
use crate::state::AssetRule;

pub fn handler<H: Host>(
    ctx: &mut PoolContext<'_, H>,
    token: Pubkey,
    denomination_id: u64,
    fixed_amount: u64,
) -> Result<()> {
    AccessPolicy::Admin.authorize(ctx.config, &ctx.caller)?;

    let now = ctx.host.unix_timestamp();
    let rule = AssetRule::new(token, denomination_id, fixed_amount, now)?;

    let previous_amount = ctx
        .state
        .asset_rules
        .insert(rule.key(), rule)
        .map(|previous| previous.fixed_amount)
        .unwrap_or(0);

    emit!(AssetRuleSet {
        pool: ctx.pool(),
        token,
        denomination_id,
        fixed_amount,
        previous_amount,
        timestamp: now,
    });

    msg!(
        "Asset rule set: denomination {} = {} (was {})",
        denomination_id,
        fixed_amount,
        previous_amount
    );

    Ok(())
}
