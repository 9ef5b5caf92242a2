//! Execute Batch Instruction
//!
//! Drives the single-action engine over a list of independent pending
//! actions sharing one target and entrypoint. Per-item calldata is sliced
//! out of one flat buffer by the declared lengths, which must cover the
//! buffer exactly.
//!
//! The batch is one transaction: a failing item aborts every item and
//! leaves the batch id unexecuted. Executed batch ids are never reusable.
//!
//! # Audit Digest
//! ```text
//! d0 = 0
//! d(i+1) = keccak256(d(i) || action_hash(i))
//! ```

use anchor_lang::prelude::*;

use crate::access::AccessPolicy;
use crate::crypto::action_hash::{ActionCall, ActionType, PayoutTerms};
use crate::crypto::field::{short_hex, Field, ZERO_FIELD};
use crate::crypto::poseidon::{hash_two_to_one, Selector};
use crate::error::ExecutorError;
use crate::events::BatchExecuted;
use crate::host::Host;
use crate::instructions::execute_private_action::{announce, load_pending, settle};
use crate::pool::PoolContext;
use crate::scheme::BindingScheme;
use crate::state::BatchRecord;

/// Shared payout token with per-item recipients and minimums.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct BatchPayout {
    pub token: Pubkey,
    /// Must equal each item's proof-bound recipient
    pub recipients: Vec<Pubkey>,
    pub min_payouts: Vec<u64>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ActionBatch {
    pub batch_id: Field,
    pub action_type: ActionType,
    /// Pending keys (commitments or nullifiers, per generation)
    pub keys: Vec<Field>,
    pub target: Pubkey,
    pub entrypoint: Selector,
    pub calldata_lengths: Vec<u32>,
    pub calldata: Vec<u8>,
    pub approval_token: Pubkey,
    pub payout: Option<BatchPayout>,
}

impl ActionBatch {
    /// Validate shape and return the per-item calldata slices.
    pub fn calldata_slices(&self) -> Result<Vec<&[u8]>> {
        let count = self.keys.len();
        require!(count > 0, ExecutorError::EmptyBatch);
        require!(
            self.calldata_lengths.len() == count,
            ExecutorError::BatchLengthMismatch
        );
        if let Some(payout) = &self.payout {
            require!(
                payout.recipients.len() == count && payout.min_payouts.len() == count,
                ExecutorError::BatchLengthMismatch
            );
        }

        let mut total: usize = 0;
        for len in &self.calldata_lengths {
            total = total
                .checked_add(*len as usize)
                .ok_or(error!(ExecutorError::ArithmeticOverflow))?;
        }
        require!(
            total == self.calldata.len(),
            ExecutorError::CalldataLengthMismatch
        );

        let mut slices = Vec::with_capacity(count);
        let mut offset = 0usize;
        for len in &self.calldata_lengths {
            let end = offset + *len as usize;
            slices.push(&self.calldata[offset..end]);
            offset = end;
        }
        Ok(slices)
    }

    /// The call for item `index` with its calldata slice.
    fn item_call(&self, index: usize, calldata: &[u8]) -> ActionCall {
        ActionCall {
            action_type: self.action_type,
            target: self.target,
            entrypoint: self.entrypoint,
            calldata: calldata.to_vec(),
            approval_token: self.approval_token,
            payout: self
                .payout
                .as_ref()
                .map(|p| PayoutTerms::new(p.token, p.min_payouts[index])),
        }
    }
}

/// Result of a successful batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchReceipt {
    pub batch_id: Field,
    pub digest: Field,
    pub item_count: u32,
    pub total_payout: u64,
}

pub fn handler<S: BindingScheme, H: Host>(
    ctx: &mut PoolContext<'_, H>,
    batch: &ActionBatch,
) -> Result<BatchReceipt> {
    // ========== VALIDATION ==========

    ctx.config.require_not_paused()?;
    AccessPolicy::RelayerOrAdmin.authorize(ctx.config, &ctx.caller)?;

    require!(
        !ctx.state.is_batch_executed(&batch.batch_id),
        ExecutorError::BatchAlreadyExecuted
    );
    let slices = batch.calldata_slices()?;
    let item_count =
        u32::try_from(slices.len()).map_err(|_| error!(ExecutorError::ArithmeticOverflow))?;

    // ========== ITEMS ==========

    let mut digest = ZERO_FIELD;
    let mut total_payout: u64 = 0;
    let mut executed = Vec::with_capacity(slices.len());

    for (index, (key, calldata)) in batch.keys.iter().zip(slices).enumerate() {
        let pending = load_pending(ctx, key)?;

        if let Some(payout) = &batch.payout {
            require!(
                payout.recipients[index] == pending.recipient,
                ExecutorError::RecipientMismatch
            );
        }

        let call = batch.item_call(index, calldata);
        let (receipt, event) = settle::<S, H>(ctx, &pending, &call)?;
        executed.push(event);

        digest = hash_two_to_one(&digest, &receipt.action_hash);
        total_payout = total_payout
            .checked_add(receipt.payout)
            .ok_or(error!(ExecutorError::ArithmeticOverflow))?;
    }

    // ========== FINALIZE ==========

    let now = ctx.host.unix_timestamp();
    ctx.state.batches.insert(
        batch.batch_id,
        BatchRecord {
            batch_id: batch.batch_id,
            digest,
            item_count,
            executor: ctx.caller,
            executed_at: now,
        },
    );
    ctx.config.record_batch()?;

    for event in executed {
        announce(event);
    }
    emit!(BatchExecuted {
        pool: ctx.pool(),
        batch_id: batch.batch_id,
        action_type: batch.action_type,
        digest,
        item_count,
        total_payout,
        executor: ctx.caller,
        timestamp: now,
    });

    msg!("Batch {} executed", short_hex(&batch.batch_id));
    msg!("Items: {}", item_count);
    msg!("Digest: {}", short_hex(&digest));

    Ok(BatchReceipt {
        batch_id: batch.batch_id,
        digest,
        item_count,
        total_payout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(lengths: Vec<u32>, calldata: Vec<u8>) -> ActionBatch {
        ActionBatch {
            batch_id: [1u8; 32],
            action_type: ActionType::Swap,
            keys: vec![[2u8; 32]; lengths.len()],
            target: Pubkey::new_unique(),
            entrypoint: [0u8; 8],
            calldata_lengths: lengths,
            calldata,
            approval_token: Pubkey::default(),
            payout: None,
        }
    }

    #[test]
    fn test_slices_cover_buffer() {
        let batch = batch(vec![2, 0, 3], vec![1, 2, 3, 4, 5]);
        let slices = batch.calldata_slices().unwrap();
        assert_eq!(slices, vec![&[1u8, 2][..], &[0u8; 0][..], &[3u8, 4, 5][..]]);
    }

    #[test]
    fn test_slices_reject_short_and_long_buffers() {
        assert!(batch(vec![2, 3], vec![0u8; 4]).calldata_slices().is_err());
        assert!(batch(vec![2, 3], vec![0u8; 6]).calldata_slices().is_err());
    }

    #[test]
    fn test_empty_batch_rejected() {
        assert!(batch(vec![], vec![]).calldata_slices().is_err());
    }

    #[test]
    fn test_parallel_length_mismatch() {
        let mut b = batch(vec![1, 1], vec![0u8; 2]);
        b.calldata_lengths.pop();
        assert!(b.calldata_slices().is_err());

        let mut b = batch(vec![1, 1], vec![0u8; 2]);
        b.payout = Some(BatchPayout {
            token: Pubkey::new_unique(),
            recipients: vec![Pubkey::new_unique()],
            min_payouts: vec![0, 0],
        });
        assert!(b.calldata_slices().is_err());
    }
}
