//! Instruction handlers for the shielded execution pool

pub mod admin;
pub mod deposit;
pub mod execute_batch;
pub mod execute_private_action;
pub mod initialize_pool;
pub mod set_asset_rule;
pub mod submit_private_action;
pub mod views;
pub mod withdraw;

pub use deposit::DepositReceipt;
pub use execute_batch::{ActionBatch, BatchPayout, BatchReceipt};
pub use execute_private_action::ExecutionReceipt;
pub use submit_private_action::SubmissionReceipt;
