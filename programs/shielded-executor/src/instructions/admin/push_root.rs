//! Push Root Instruction (generation-2)
//!
//! Admin-supplied roots coexist with the roots produced by deposits into
//! the commitment tree. Accepted roots are never removed.

use anchor_lang::prelude::*;

use crate::access::AccessPolicy;
use crate::crypto::field::{short_hex, Field};
use crate::error::ExecutorError;
use crate::events::RootPushed;
use crate::host::Host;
use crate::pool::PoolContext;
use crate::scheme::BindingScheme;
use crate::state::RootSource;

pub fn handler<S: BindingScheme, H: Host>(ctx: &mut PoolContext<'_, H>, root: Field) -> Result<u64> {
    require!(S::HAS_ROOT_ACCUMULATOR, ExecutorError::UnsupportedOperation);
    AccessPolicy::Admin.authorize(ctx.config, &ctx.caller)?;

    let now = ctx.host.unix_timestamp();
    let index = ctx.state.roots.push(root, RootSource::Admin, now)?;

    emit!(RootPushed {
        pool: ctx.pool(),
        root,
        index,
        from_deposit: false,
        timestamp: now,
    });

    msg!("Root {} accepted at index {}", short_hex(&root), index);

    Ok(index)
}
