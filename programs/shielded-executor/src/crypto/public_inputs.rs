//! Public Inputs and Outputs of the action circuits
//!
//! The proof system is opaque to the pool: a verifier accepts a proof blob
//! and either rejects it or returns an array of public outputs. This module
//! gives those raw words their meaning for each protocol generation.
//!
//! # Generation-2 outputs (exactly 4)
//! 1. root - accumulator root the proof was generated against
//! 2. nullifier - nullifier of the spent note
//! 3. action_hash - hash of the authorized external call
//! 4. recipient - address receiving the payout
//!
//! # Generation-1 public inputs (3 or 4)
//! 1. nullifier
//! 2. commitment
//! 3. action_hash
//! 4. recipient (optional)
//!
//! Generation-1 verifiers may expose fewer outputs than the fields being
//! bound. Outputs that are present must equal the declared inputs; fields
//! beyond the verifier's output length are accepted on verifier success
//! alone and reported as "trusted" fields.

use anchor_lang::prelude::*;

use crate::crypto::field::{field_to_pubkey, is_zero_field, Field};
use crate::error::ExecutorError;

// ============================================================================
// GENERATION-2: STRUCTURED OUTPUTS
// ============================================================================

/// Structured verifier outputs for a generation-2 action proof.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootedOutputs {
    pub root: Field,
    pub nullifier: Field,
    pub action_hash: Field,
    pub recipient: Pubkey,
}

impl RootedOutputs {
    /// Number of public outputs a generation-2 verifier returns
    pub const COUNT: usize = 4;

    /// Interpret raw verifier outputs.
    ///
    /// # Errors
    /// * `InvalidPublicInputs` unless exactly `COUNT` outputs are present
    pub fn from_outputs(outputs: &[Field]) -> Result<Self> {
        require!(
            outputs.len() == Self::COUNT,
            ExecutorError::InvalidPublicInputs
        );

        Ok(Self {
            root: outputs[0],
            nullifier: outputs[1],
            action_hash: outputs[2],
            recipient: field_to_pubkey(&outputs[3]),
        })
    }

    /// Cross-check against the caller's declared root and nullifier.
    pub fn bind(&self, declared_root: &Field, declared_nullifier: &Field) -> Result<()> {
        require!(self.root == *declared_root, ExecutorError::RootMismatch);
        require!(
            self.nullifier == *declared_nullifier,
            ExecutorError::NullifierMismatch
        );
        require!(
            !is_zero_field(&self.action_hash),
            ExecutorError::InvalidActionHash
        );
        require!(
            self.recipient != Pubkey::default(),
            ExecutorError::InvalidRecipient
        );
        Ok(())
    }
}

// ============================================================================
// GENERATION-1: DECLARED PUBLIC INPUTS
// ============================================================================

/// Caller-declared public inputs for a generation-1 intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatPublicInputs {
    pub nullifier: Field,
    pub commitment: Field,
    pub action_hash: Field,
    pub recipient: Option<Pubkey>,
}

impl FlatPublicInputs {
    /// Minimum number of public input words
    pub const MIN_COUNT: usize = 3;

    /// Maximum number of bound public input words
    pub const MAX_COUNT: usize = 4;

    /// Parse the raw public input words.
    pub fn from_words(words: &[Field]) -> Result<Self> {
        require!(
            words.len() >= Self::MIN_COUNT && words.len() <= Self::MAX_COUNT,
            ExecutorError::InvalidPublicInputs
        );

        Ok(Self {
            nullifier: words[0],
            commitment: words[1],
            action_hash: words[2],
            recipient: words.get(3).map(field_to_pubkey),
        })
    }

    /// Validate public inputs
    pub fn validate(&self) -> Result<()> {
        require!(
            !is_zero_field(&self.nullifier),
            ExecutorError::InvalidNullifier
        );
        require!(
            !is_zero_field(&self.commitment),
            ExecutorError::InvalidCommitment
        );
        require!(
            !is_zero_field(&self.action_hash),
            ExecutorError::InvalidActionHash
        );
        if let Some(recipient) = self.recipient {
            require!(
                recipient != Pubkey::default(),
                ExecutorError::InvalidRecipient
            );
        }
        Ok(())
    }

    /// Number of fields bound by this intent (3 or 4).
    pub fn arity(&self) -> usize {
        if self.recipient.is_some() {
            Self::MAX_COUNT
        } else {
            Self::MIN_COUNT
        }
    }

    /// Convert to words in circuit order.
    pub fn to_field_elements(&self) -> Vec<Field> {
        let mut words = vec![self.nullifier, self.commitment, self.action_hash];
        if let Some(recipient) = self.recipient {
            words.push(recipient.to_bytes());
        }
        words
    }

    /// Compare verifier outputs against the declared inputs.
    ///
    /// Returns the number of declared fields the verifier did not expose
    /// (accepted on verifier success alone).
    ///
    /// # Errors
    /// * `PublicInputMismatch` if any exposed output differs, or if the
    ///   verifier exposes more outputs than were declared
    pub fn check_outputs(&self, outputs: &[Field]) -> Result<u8> {
        let declared = self.to_field_elements();
        require!(
            outputs.len() <= declared.len(),
            ExecutorError::PublicInputMismatch
        );

        for (output, input) in outputs.iter().zip(declared.iter()) {
            require!(output == input, ExecutorError::PublicInputMismatch);
        }

        let trusted = declared.len() - outputs.len();
        u8::try_from(trusted).map_err(|_| error!(ExecutorError::ArithmeticOverflow))
    }
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Builder for generation-1 public input words (client side).
#[derive(Default)]
pub struct FlatPublicInputsBuilder {
    nullifier: Option<Field>,
    commitment: Option<Field>,
    action_hash: Option<Field>,
    recipient: Option<Pubkey>,
}

impl FlatPublicInputsBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nullifier(mut self, nullifier: Field) -> Self {
        self.nullifier = Some(nullifier);
        self
    }

    pub fn commitment(mut self, commitment: Field) -> Self {
        self.commitment = Some(commitment);
        self
    }

    pub fn action_hash(mut self, action_hash: Field) -> Self {
        self.action_hash = Some(action_hash);
        self
    }

    pub fn recipient(mut self, recipient: Pubkey) -> Self {
        self.recipient = Some(recipient);
        self
    }

    /// Build and validate the public inputs
    pub fn build(self) -> Result<FlatPublicInputs> {
        let inputs = FlatPublicInputs {
            nullifier: self.nullifier.ok_or(error!(ExecutorError::InvalidNullifier))?,
            commitment: self.commitment.ok_or(error!(ExecutorError::InvalidCommitment))?,
            action_hash: self.action_hash.ok_or(error!(ExecutorError::InvalidActionHash))?,
            recipient: self.recipient,
        };

        inputs.validate()?;
        Ok(inputs)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rooted_words(recipient: &Pubkey) -> Vec<Field> {
        vec![[1u8; 32], [2u8; 32], [3u8; 32], recipient.to_bytes()]
    }

    #[test]
    fn test_rooted_outputs_parse() {
        let recipient = Pubkey::new_unique();
        let outputs = RootedOutputs::from_outputs(&rooted_words(&recipient)).unwrap();
        assert_eq!(outputs.root, [1u8; 32]);
        assert_eq!(outputs.recipient, recipient);
        assert!(outputs.bind(&[1u8; 32], &[2u8; 32]).is_ok());
    }

    #[test]
    fn test_rooted_outputs_wrong_count() {
        let recipient = Pubkey::new_unique();
        let mut words = rooted_words(&recipient);
        words.pop();
        assert!(RootedOutputs::from_outputs(&words).is_err());
        words.push(recipient.to_bytes());
        words.push([9u8; 32]);
        assert!(RootedOutputs::from_outputs(&words).is_err());
    }

    #[test]
    fn test_rooted_outputs_mismatch() {
        let outputs = RootedOutputs::from_outputs(&rooted_words(&Pubkey::new_unique())).unwrap();
        assert!(outputs.bind(&[9u8; 32], &[2u8; 32]).is_err());
        assert!(outputs.bind(&[1u8; 32], &[9u8; 32]).is_err());
    }

    #[test]
    fn test_rooted_outputs_zero_recipient() {
        let outputs = RootedOutputs::from_outputs(&rooted_words(&Pubkey::default())).unwrap();
        assert!(outputs.bind(&[1u8; 32], &[2u8; 32]).is_err());
    }

    #[test]
    fn test_flat_inputs_parse_and_arity() {
        let inputs = FlatPublicInputs::from_words(&[[1u8; 32], [2u8; 32], [3u8; 32]]).unwrap();
        assert_eq!(inputs.arity(), 3);
        assert!(inputs.recipient.is_none());

        let recipient = Pubkey::new_unique();
        let inputs = FlatPublicInputs::from_words(&[
            [1u8; 32],
            [2u8; 32],
            [3u8; 32],
            recipient.to_bytes(),
        ])
        .unwrap();
        assert_eq!(inputs.arity(), 4);
        assert_eq!(inputs.recipient, Some(recipient));
    }

    #[test]
    fn test_flat_inputs_wrong_length() {
        assert!(FlatPublicInputs::from_words(&[[1u8; 32], [2u8; 32]]).is_err());
        assert!(FlatPublicInputs::from_words(&[[1u8; 32]; 5]).is_err());
    }

    #[test]
    fn test_check_outputs_full_match() {
        let inputs = FlatPublicInputs::from_words(&[[1u8; 32], [2u8; 32], [3u8; 32]]).unwrap();
        assert_eq!(inputs.check_outputs(&inputs.to_field_elements()).unwrap(), 0);
    }

    #[test]
    fn test_check_outputs_compat_mode() {
        let inputs = FlatPublicInputs::from_words(&[[1u8; 32], [2u8; 32], [3u8; 32]]).unwrap();
        assert_eq!(inputs.check_outputs(&[[1u8; 32]]).unwrap(), 2);
        assert_eq!(inputs.check_outputs(&[]).unwrap(), 3);
    }

    #[test]
    fn test_check_outputs_mismatch() {
        let inputs = FlatPublicInputs::from_words(&[[1u8; 32], [2u8; 32], [3u8; 32]]).unwrap();
        assert!(inputs.check_outputs(&[[1u8; 32], [7u8; 32]]).is_err());
    }

    #[test]
    fn test_check_outputs_rejects_undeclared_outputs() {
        let inputs = FlatPublicInputs::from_words(&[[1u8; 32], [2u8; 32], [3u8; 32]]).unwrap();
        let exposed = [[1u8; 32], [2u8; 32], [3u8; 32], [4u8; 32]];
        assert!(inputs.check_outputs(&exposed).is_err());
    }

    #[test]
    fn test_builder() {
        let inputs = FlatPublicInputsBuilder::new()
            .nullifier([1u8; 32])
            .commitment([2u8; 32])
            .action_hash([3u8; 32])
            .build()
            .unwrap();
        assert_eq!(inputs.arity(), 3);
    }

    #[test]
    fn test_builder_missing_field() {
        let result = FlatPublicInputsBuilder::new()
            .nullifier([1u8; 32])
            .action_hash([3u8; 32])
            .build();
        assert!(result.is_err());
    }
}
