//! State definitions for the shielded execution pool

pub mod asset_rule;
pub mod batch_record;
pub mod merkle_tree;
pub mod note;
pub mod pending_action;
pub mod pool_config;
pub mod pool_state;
pub mod root_accumulator;
pub mod spent_nullifier;
pub mod token_totals;

pub use asset_rule::AssetRule;
pub use batch_record::BatchRecord;
pub use merkle_tree::CommitmentTree;
pub use note::Note;
pub use pending_action::PendingAction;
pub use pool_config::{PoolConfig, PoolParams};
pub use pool_state::PoolState;
pub use root_accumulator::{RootAccumulator, RootEntry, RootSource};
pub use spent_nullifier::{NullifierSet, NullifierUse, SpentNullifier};
pub use token_totals::TokenTotals;
