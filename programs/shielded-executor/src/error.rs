//! Unified error types for the shielded execution pool
//!
//! Error codes are stable across versions for relayer and client
//! compatibility. Every error is fatal to the current operation: pool
//! state and host state are rolled back before it reaches the caller.

use anchor_lang::prelude::*;

#[error_code]
pub enum ExecutorError {
    // ========== Authorization Errors (6000-6002) ==========

    /// Caller does not hold the role required by the operation
    #[msg("Unauthorized: caller does not hold the required role")]
    Unauthorized, // 6000

    /// Caller is not the recorded owner of the note
    #[msg("Unauthorized: caller is not the note owner")]
    NotNoteOwner, // 6001

    /// No admin transfer is pending
    #[msg("No pending admin transfer")]
    NoPendingAuthority, // 6002

    // ========== Configuration Errors (6003-6007) ==========

    /// Pool is paused
    #[msg("Pool is paused")]
    PoolPaused, // 6003

    /// Verifier address is unset or unknown to the host
    #[msg("Proof verifier not configured for this pool")]
    VerifierNotConfigured, // 6004

    /// Address argument is zero or otherwise unusable
    #[msg("Invalid address: cannot be the zero address")]
    InvalidAddress, // 6005

    /// Operation is not offered by this protocol generation
    #[msg("Operation not supported by this protocol generation")]
    UnsupportedOperation, // 6006

    /// Invalid commitment tree depth parameter
    #[msg("Tree depth must be between 4 and 24")]
    InvalidTreeDepth, // 6007

    // ========== Precondition Errors (6008-6027) ==========

    /// Token address is zero
    #[msg("Invalid token: cannot be the zero address")]
    InvalidToken, // 6008

    /// Denomination id is zero
    #[msg("Invalid denomination id: must be greater than zero")]
    InvalidDenomination, // 6009

    /// Amount must be greater than zero
    #[msg("Invalid amount: must be greater than zero")]
    InvalidAmount, // 6010

    /// Commitment is all zeros
    #[msg("Invalid commitment: cannot be all zeros")]
    InvalidCommitment, // 6011

    /// Nullifier is all zeros
    #[msg("Invalid nullifier: cannot be all zeros")]
    InvalidNullifier, // 6012

    /// Commitment was already deposited
    #[msg("Commitment already deposited")]
    DuplicateCommitment, // 6013

    /// Nullifier has already been consumed (double-spend attempt)
    #[msg("Nullifier already spent")]
    NullifierAlreadySpent, // 6014

    /// Nullifier is already linked to another deposited commitment
    #[msg("Nullifier already bound to another commitment")]
    NullifierAlreadyBound, // 6015

    /// No fixed amount configured for (token, denomination)
    #[msg("No asset rule configured for token and denomination")]
    AssetRuleNotFound, // 6016

    /// Note does not exist
    #[msg("Note not found")]
    NoteNotFound, // 6017

    /// Note was already withdrawn or executed
    #[msg("Note already spent")]
    NoteAlreadySpent, // 6018

    /// A pending action already exists for this key
    #[msg("A private action is already pending for this note")]
    ActionAlreadyPending, // 6019

    /// No pending action exists for this key
    #[msg("No pending private action for this key")]
    NoPendingAction, // 6020

    /// Action for this key was already executed
    #[msg("Private action already executed")]
    ActionAlreadyExecuted, // 6021

    /// Action target is the zero address
    #[msg("Invalid action target: cannot be the zero address")]
    InvalidTarget, // 6022

    /// Batch contains no items
    #[msg("Batch is empty")]
    EmptyBatch, // 6023

    /// Parallel batch arrays have different lengths
    #[msg("Batch arrays have mismatched lengths")]
    BatchLengthMismatch, // 6024

    /// Declared calldata lengths do not sum to the calldata buffer size
    #[msg("Calldata lengths do not match calldata buffer size")]
    CalldataLengthMismatch, // 6025

    /// Batch identifier was already executed
    #[msg("Batch already executed")]
    BatchAlreadyExecuted, // 6026

    /// Commitment tree has reached maximum capacity
    #[msg("Commitment tree is full")]
    MerkleTreeFull, // 6027

    // ========== Proof Errors (6028-6039) ==========

    /// Verifier rejected the proof
    #[msg("Invalid proof: verification failed")]
    InvalidProof, // 6028

    /// Public inputs/outputs have the wrong shape
    #[msg("Invalid public inputs for proof verification")]
    InvalidPublicInputs, // 6029

    /// Verifier output differs from caller-declared public input
    #[msg("Public input does not match verifier output")]
    PublicInputMismatch, // 6030

    /// Root was never accepted by the root accumulator
    #[msg("Root not present in root accumulator")]
    UnknownRoot, // 6031

    /// Root is zero or already recorded
    #[msg("Invalid root: zero or already recorded")]
    InvalidRoot, // 6032

    /// Proof-bound root differs from declared root
    #[msg("Proof root does not match declared root")]
    RootMismatch, // 6033

    /// Proof-bound nullifier differs from declared nullifier
    #[msg("Proof nullifier does not match declared nullifier")]
    NullifierMismatch, // 6034

    /// Note's recorded nullifier differs from the submitted one
    #[msg("Note nullifier does not match submitted nullifier")]
    NoteNullifierMismatch, // 6035

    /// Bound action hash is zero
    #[msg("Invalid action hash: cannot be zero")]
    InvalidActionHash, // 6036

    /// Bound recipient is zero
    #[msg("Invalid recipient: cannot be zero")]
    InvalidRecipient, // 6037

    /// Supplied action does not hash to the authorized action hash
    #[msg("Action hash mismatch: executed action differs from authorized action")]
    ActionHashMismatch, // 6038

    /// Supplied action type differs from the submitted action type
    #[msg("Action type does not match pending action")]
    ActionTypeMismatch, // 6039

    // ========== Economic Errors (6040-6047) ==========

    /// Batch recipient differs from the proof-bound recipient
    #[msg("Recipient does not match proof-bound recipient")]
    RecipientMismatch, // 6040

    /// Realized payout below minimum
    #[msg("Slippage exceeded: realized payout below minimum")]
    SlippageExceeded, // 6041

    /// Payout terms are inconsistent (e.g. minimum set without payout token)
    #[msg("Invalid payout terms")]
    InvalidPayoutTerms, // 6042

    /// This generation requires payout terms on every execution
    #[msg("Payout terms required for this protocol generation")]
    PayoutTermsRequired, // 6043

    /// Token transfer returned false
    #[msg("Token transfer failed")]
    TokenTransferFailed, // 6044

    /// Token approval returned false
    #[msg("Token approval failed")]
    TokenApprovalFailed, // 6045

    /// Arithmetic overflow occurred
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow, // 6046

    /// Action target call failed or target is unknown
    #[msg("Action target call failed")]
    ActionCallFailed, // 6047

    // ========== Hashing (6048) ==========

    /// Poseidon hasher rejected its inputs
    #[msg("Action hash computation failed")]
    HashingFailed, // 6048
}
