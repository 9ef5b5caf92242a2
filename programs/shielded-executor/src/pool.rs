//! Shielded pool instance
//!
//! A pool owns its configuration and storage exclusively. Every mutating
//! operation runs as one transaction: pool state and host state are
//! snapshotted first and restored if the operation fails at any point, so
//! partial writes (including token movements) never become visible.
//! Handlers emit events only after their last fallible step.

use std::marker::PhantomData;

use anchor_lang::prelude::*;

use crate::crypto::action_hash::ActionCall;
use crate::crypto::field::Field;
use crate::host::Host;
use crate::instructions::{
    self, ActionBatch, BatchReceipt, DepositReceipt, ExecutionReceipt, SubmissionReceipt,
};
use crate::scheme::{BindingScheme, FlatBinding, RootedBinding};
use crate::state::{PoolConfig, PoolParams, PoolState};

/// Accounts visible to an instruction handler.
pub struct PoolContext<'a, H: Host> {
    pub config: &'a mut PoolConfig,
    pub state: &'a mut PoolState,
    pub host: &'a mut H,
    /// Account the operation is executed under
    pub caller: Pubkey,
}

impl<'a, H: Host> PoolContext<'a, H> {
    /// Event/log address of this pool.
    #[inline]
    pub fn pool(&self) -> Pubkey {
        self.config.custody
    }
}

#[derive(Debug)]
pub struct ShieldedPool<S: BindingScheme> {
    config: PoolConfig,
    state: PoolState,
    _scheme: PhantomData<S>,
}

/// Generation-1 pool
pub type PrivateActionExecutor = ShieldedPool<FlatBinding>;

/// Generation-2 pool
pub type ShieldedPoolV2 = ShieldedPool<RootedBinding>;

impl<S: BindingScheme> ShieldedPool<S> {
    pub(crate) fn from_parts(config: PoolConfig, state: PoolState) -> Self {
        Self {
            config,
            state,
            _scheme: PhantomData,
        }
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn state(&self) -> &PoolState {
        &self.state
    }

    /// Run `op` as a single all-or-nothing transaction.
    fn transact<H, T, F>(&mut self, host: &mut H, caller: Pubkey, op: F) -> Result<T>
    where
        H: Host,
        F: FnOnce(&mut PoolContext<'_, H>) -> Result<T>,
    {
        let checkpoint = host.checkpoint();
        let config = self.config.clone();
        let state = self.state.clone();

        let result = {
            let mut ctx = PoolContext {
                config: &mut self.config,
                state: &mut self.state,
                host: &mut *host,
                caller,
            };
            op(&mut ctx)
        };

        if result.is_err() {
            host.rollback(checkpoint);
            self.config = config;
            self.state = state;
        }
        result
    }

    // ========== LIFECYCLE ==========

    pub fn initialize_pool<H: Host>(host: &mut H, caller: Pubkey, params: PoolParams) -> Result<Self> {
        instructions::initialize_pool::handler::<S, H>(host, caller, params)
    }

    // ========== GOVERNANCE ==========

    pub fn pause<H: Host>(&mut self, host: &mut H, caller: Pubkey) -> Result<()> {
        self.transact(host, caller, instructions::admin::pause::handler::<H>)
    }

    pub fn unpause<H: Host>(&mut self, host: &mut H, caller: Pubkey) -> Result<()> {
        self.transact(host, caller, instructions::admin::unpause::handler::<H>)
    }

    pub fn initiate_authority_transfer<H: Host>(
        &mut self,
        host: &mut H,
        caller: Pubkey,
        new_admin: Pubkey,
    ) -> Result<()> {
        self.transact(host, caller, |ctx| {
            instructions::admin::update_authority::initiate_handler(ctx, new_admin)
        })
    }

    pub fn accept_authority_transfer<H: Host>(&mut self, host: &mut H, caller: Pubkey) -> Result<()> {
        self.transact(
            host,
            caller,
            instructions::admin::update_authority::accept_handler::<H>,
        )
    }

    pub fn cancel_authority_transfer<H: Host>(&mut self, host: &mut H, caller: Pubkey) -> Result<()> {
        self.transact(
            host,
            caller,
            instructions::admin::update_authority::cancel_handler::<H>,
        )
    }

    pub fn set_relayer<H: Host>(&mut self, host: &mut H, caller: Pubkey, relayer: Pubkey) -> Result<()> {
        self.transact(host, caller, |ctx| {
            instructions::admin::set_relayer::handler(ctx, relayer)
        })
    }

    pub fn set_verifier<H: Host>(&mut self, host: &mut H, caller: Pubkey, verifier: Pubkey) -> Result<()> {
        self.transact(host, caller, |ctx| {
            instructions::admin::set_verifier::handler(ctx, verifier)
        })
    }

    /// Accept a new root into the accumulator (generation-2).
    pub fn push_root<H: Host>(&mut self, host: &mut H, caller: Pubkey, root: Field) -> Result<u64> {
        self.transact(host, caller, |ctx| {
            instructions::admin::push_root::handler::<S, H>(ctx, root)
        })
    }

    pub fn set_asset_rule<H: Host>(
        &mut self,
        host: &mut H,
        caller: Pubkey,
        token: Pubkey,
        denomination_id: u64,
        fixed_amount: u64,
    ) -> Result<()> {
        self.transact(host, caller, |ctx| {
            instructions::set_asset_rule::handler(ctx, token, denomination_id, fixed_amount)
        })
    }

    // ========== NOTES ==========

    pub fn deposit_fixed<H: Host>(
        &mut self,
        host: &mut H,
        caller: Pubkey,
        token: Pubkey,
        denomination_id: u64,
        commitment: Field,
        nullifier: Field,
    ) -> Result<DepositReceipt> {
        self.transact(host, caller, |ctx| {
            instructions::deposit::handler::<S, H>(ctx, token, denomination_id, commitment, nullifier)
        })
    }

    /// Plaintext exit: returns the withdrawn amount.
    pub fn withdraw_note<H: Host>(&mut self, host: &mut H, caller: Pubkey, commitment: Field) -> Result<u64> {
        self.transact(host, caller, |ctx| {
            instructions::withdraw::handler::<S, H>(ctx, commitment)
        })
    }

    // ========== PRIVATE ACTIONS ==========

    pub fn submit_private_action<H: Host>(
        &mut self,
        host: &mut H,
        caller: Pubkey,
        submission: S::Submission,
    ) -> Result<SubmissionReceipt> {
        self.transact(host, caller, |ctx| {
            instructions::submit_private_action::handler::<S, H>(ctx, &submission)
        })
    }

    /// Execute the pending action stored under `key` (commitment in
    /// generation-1, nullifier in generation-2).
    pub fn execute_private_action<H: Host>(
        &mut self,
        host: &mut H,
        caller: Pubkey,
        key: Field,
        call: ActionCall,
    ) -> Result<ExecutionReceipt> {
        self.transact(host, caller, |ctx| {
            instructions::execute_private_action::handler::<S, H>(ctx, key, &call)
        })
    }

    pub fn execute_batch<H: Host>(
        &mut self,
        host: &mut H,
        caller: Pubkey,
        batch: ActionBatch,
    ) -> Result<BatchReceipt> {
        self.transact(host, caller, |ctx| {
            instructions::execute_batch::handler::<S, H>(ctx, &batch)
        })
    }
}
