//! Shielded Execution Pool
//!
//! Users deposit fixed-denomination notes, later prove control of one
//! without revealing which, and authorize a hash-committed external action
//! (swap, limit order or stake) that a relayer executes on their behalf.
//!
//! # Protocol Generations
//! - Generation-1 (`PrivateActionExecutor`): flat commitment/nullifier
//!   binding with caller-declared public inputs
//! - Generation-2 (`ShieldedPoolV2`): versioned-root note model with
//!   structured verifier outputs
//!
//! # Collaborators
//! The proof verifier, tokens and action targets are reached through the
//! `host::Host` trait. `host::MemoryHost` is an in-memory implementation.

use anchor_lang::prelude::*;

pub mod access;
pub mod crypto;
pub mod error;
pub mod events;
pub mod host;
pub mod instructions;
pub mod pool;
pub mod scheme;
pub mod state;


declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

pub use access::AccessPolicy;
pub use crypto::{ActionCall, ActionType, Field, PayoutTerms, Selector};
pub use error::ExecutorError;
pub use host::{Host, ProofVerifier, TokenLedger};
pub use instructions::{
    ActionBatch, BatchPayout, BatchReceipt, DepositReceipt, ExecutionReceipt, SubmissionReceipt,
};
pub use pool::{PoolContext, PrivateActionExecutor, ShieldedPool, ShieldedPoolV2};
pub use scheme::{BindingScheme, FlatBinding, FlatSubmission, RootedBinding, RootedSubmission};
pub use state::{PoolConfig, PoolParams};
