//! Initialize Pool Instruction
//!
//! Creates the configuration record and the generation's storage. For
//! generation-2 this builds an empty commitment tree and accumulates its
//! root, so proofs against the empty pool state are scoped from the start.

use anchor_lang::prelude::*;

use crate::crypto::field::ZERO_FIELD;
use crate::events::PoolInitialized;
use crate::host::Host;
use crate::pool::ShieldedPool;
use crate::scheme::BindingScheme;
use crate::state::{PoolConfig, PoolParams, PoolState};

pub fn handler<S: BindingScheme, H: Host>(
    host: &mut H,
    caller: Pubkey,
    params: PoolParams,
) -> Result<ShieldedPool<S>> {
    params.validate(S::HAS_ROOT_ACCUMULATOR)?;

    let now = host.unix_timestamp();
    let config = PoolConfig::initialize(&params, S::GENERATION, now);
    let mut state = PoolState::default();
    let initial_root = S::initialize(&mut state, &params, now)?;

    emit!(PoolInitialized {
        pool: config.custody,
        admin: config.admin,
        relayer: config.relayer,
        verifier: config.verifier,
        generation: S::GENERATION,
        initial_root: initial_root.unwrap_or(ZERO_FIELD),
        timestamp: now,
    });

    msg!("Pool initialized (generation {})", S::GENERATION);
    msg!("Admin: {}", config.admin);
    msg!("Initialized by: {}", caller);
    if S::HAS_ROOT_ACCUMULATOR {
        msg!("Tree depth: {}", params.tree_depth);
    }

    Ok(ShieldedPool::from_parts(config, state))
}
