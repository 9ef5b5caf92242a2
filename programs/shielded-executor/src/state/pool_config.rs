//! Pool configuration record
//!
//! Single-writer governance state: roles, the verifier address, the pause
//! flag and running counters. Only the governance setters mutate it after
//! initialization.
//!
//! # Security Properties
//! - Admin changes require a 2-step process (pending → accept)
//! - All counters use checked arithmetic

use anchor_lang::prelude::*;

use crate::error::ExecutorError;
use crate::state::merkle_tree::CommitmentTree;

/// Parameters supplied once at pool initialization.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PoolParams {
    /// The pool's own custody address (holds deposited and payout tokens)
    pub custody: Pubkey,
    pub admin: Pubkey,
    /// Relayer address; zero means only the admin may execute
    pub relayer: Pubkey,
    /// Verifier address; zero leaves the pool unable to accept proofs until set
    pub verifier: Pubkey,
    /// Commitment tree depth (generation-2 only)
    pub tree_depth: u8,
}

impl PoolParams {
    pub const DEFAULT_TREE_DEPTH: u8 = 20;

    pub fn new(custody: Pubkey, admin: Pubkey) -> Self {
        Self {
            custody,
            admin,
            relayer: Pubkey::default(),
            verifier: Pubkey::default(),
            tree_depth: Self::DEFAULT_TREE_DEPTH,
        }
    }

    pub fn with_relayer(mut self, relayer: Pubkey) -> Self {
        self.relayer = relayer;
        self
    }

    pub fn with_verifier(mut self, verifier: Pubkey) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn with_tree_depth(mut self, tree_depth: u8) -> Self {
        self.tree_depth = tree_depth;
        self
    }

    /// Validate initialization parameters
    pub fn validate(&self, needs_tree: bool) -> Result<()> {
        require!(
            self.custody != Pubkey::default(),
            ExecutorError::InvalidAddress
        );
        require!(self.admin != Pubkey::default(), ExecutorError::InvalidAddress);
        if needs_tree {
            require!(
                (CommitmentTree::MIN_DEPTH..=CommitmentTree::MAX_DEPTH)
                    .contains(&self.tree_depth),
                ExecutorError::InvalidTreeDepth
            );
        }
        Ok(())
    }
}

/// Main pool configuration record.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Current pool admin
    pub admin: Pubkey,

    /// Pending admin for 2-step transfer (zero if none pending)
    pub pending_admin: Pubkey,

    /// Relayer allowed to execute pending actions and batches
    pub relayer: Pubkey,

    /// Address of the proof verifier collaborator
    pub verifier: Pubkey,

    /// The pool's own custody address
    pub custody: Pubkey,

    /// Protocol generation (1 = flat binding, 2 = rooted binding)
    pub generation: u8,

    /// Pool paused flag
    pub is_paused: bool,

    /// Unix timestamp at initialization
    pub created_at: i64,

    pub total_deposits: u64,
    pub total_withdrawals: u64,
    pub total_submissions: u64,
    pub total_executions: u64,
    pub total_batches: u64,

    /// Schema version
    pub version: u8,
}

impl PoolConfig {
    pub const LEN: usize = 8 // discriminator
        + 32 * 5 // admin, pending_admin, relayer, verifier, custody
        + 1 // generation
        + 1 // is_paused
        + 8 // created_at
        + 8 * 5 // counters
        + 1; // version

    pub const VERSION: u8 = 1;

    pub const SEED_PREFIX: &'static [u8] = b"pool";

    pub fn initialize(params: &PoolParams, generation: u8, created_at: i64) -> Self {
        Self {
            admin: params.admin,
            pending_admin: Pubkey::default(),
            relayer: params.relayer,
            verifier: params.verifier,
            custody: params.custody,
            generation,
            is_paused: false,
            created_at,
            total_deposits: 0,
            total_withdrawals: 0,
            total_submissions: 0,
            total_executions: 0,
            total_batches: 0,
            version: Self::VERSION,
        }
    }

    #[inline]
    pub fn require_not_paused(&self) -> Result<()> {
        require!(!self.is_paused, ExecutorError::PoolPaused);
        Ok(())
    }

    #[inline]
    pub fn require_verifier_configured(&self) -> Result<()> {
        require!(
            self.verifier != Pubkey::default(),
            ExecutorError::VerifierNotConfigured
        );
        Ok(())
    }

    #[inline]
    pub fn has_relayer(&self) -> bool {
        self.relayer != Pubkey::default()
    }

    pub fn record_deposit(&mut self) -> Result<()> {
        self.total_deposits = self
            .total_deposits
            .checked_add(1)
            .ok_or(error!(ExecutorError::ArithmeticOverflow))?;
        Ok(())
    }

    pub fn record_withdrawal(&mut self) -> Result<()> {
        self.total_withdrawals = self
            .total_withdrawals
            .checked_add(1)
            .ok_or(error!(ExecutorError::ArithmeticOverflow))?;
        Ok(())
    }

    pub fn record_submission(&mut self) -> Result<()> {
        self.total_submissions = self
            .total_submissions
            .checked_add(1)
            .ok_or(error!(ExecutorError::ArithmeticOverflow))?;
        Ok(())
    }

    pub fn record_execution(&mut self) -> Result<()> {
        self.total_executions = self
            .total_executions
            .checked_add(1)
            .ok_or(error!(ExecutorError::ArithmeticOverflow))?;
        Ok(())
    }

    pub fn record_batch(&mut self) -> Result<()> {
        self.total_batches = self
            .total_batches
            .checked_add(1)
            .ok_or(error!(ExecutorError::ArithmeticOverflow))?;
        Ok(())
    }

    #[inline]
    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
    }

    pub fn initiate_authority_transfer(&mut self, new_admin: Pubkey) -> Result<()> {
        require!(new_admin != Pubkey::default(), ExecutorError::InvalidAddress);
        require!(new_admin != self.admin, ExecutorError::InvalidAddress);
        self.pending_admin = new_admin;
        Ok(())
    }

    pub fn accept_authority_transfer(&mut self, acceptor: Pubkey) -> Result<()> {
        require!(self.has_pending_transfer(), ExecutorError::NoPendingAuthority);
        require!(acceptor == self.pending_admin, ExecutorError::Unauthorized);
        self.admin = self.pending_admin;
        self.pending_admin = Pubkey::default();
        Ok(())
    }

    pub fn cancel_authority_transfer(&mut self) -> Result<()> {
        require!(self.has_pending_transfer(), ExecutorError::NoPendingAuthority);
        self.pending_admin = Pubkey::default();
        Ok(())
    }

    #[inline]
    pub fn has_pending_transfer(&self) -> bool {
        self.pending_admin != Pubkey::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PoolConfig {
        let params = PoolParams::new(Pubkey::new_unique(), Pubkey::new_unique());
        PoolConfig::initialize(&params, 2, 1_700_000_000)
    }

    #[test]
    fn test_params_validation() {
        let params = PoolParams::new(Pubkey::new_unique(), Pubkey::new_unique());
        assert!(params.validate(true).is_ok());
        assert!(params.clone().with_tree_depth(3).validate(true).is_err());
        assert!(params.clone().with_tree_depth(25).validate(true).is_err());
        assert!(params.clone().with_tree_depth(0).validate(false).is_ok());

        let no_admin = PoolParams::new(Pubkey::new_unique(), Pubkey::default());
        assert!(no_admin.validate(false).is_err());
    }

    #[test]
    fn test_counters() {
        let mut config = config();
        config.record_deposit().unwrap();
        config.record_deposit().unwrap();
        config.record_execution().unwrap();
        assert_eq!(config.total_deposits, 2);
        assert_eq!(config.total_executions, 1);

        config.total_deposits = u64::MAX;
        assert!(config.record_deposit().is_err());
    }

    #[test]
    fn test_two_step_transfer() {
        let mut config = config();
        let old_admin = config.admin;
        let new_admin = Pubkey::new_unique();

        assert!(config.accept_authority_transfer(new_admin).is_err());
        assert!(config.initiate_authority_transfer(old_admin).is_err());

        config.initiate_authority_transfer(new_admin).unwrap();
        assert!(config.has_pending_transfer());
        assert!(config.accept_authority_transfer(Pubkey::new_unique()).is_err());

        config.accept_authority_transfer(new_admin).unwrap();
        assert_eq!(config.admin, new_admin);
        assert!(!config.has_pending_transfer());
    }

    #[test]
    fn test_cancel_transfer() {
        let mut config = config();
        assert!(config.cancel_authority_transfer().is_err());
        config
            .initiate_authority_transfer(Pubkey::new_unique())
            .unwrap();
        config.cancel_authority_transfer().unwrap();
        assert!(!config.has_pending_transfer());
    }

    #[test]
    fn test_verifier_required() {
        let mut config = config();
        assert!(config.require_verifier_configured().is_err());
        config.verifier = Pubkey::new_unique();
        assert!(config.require_verifier_configured().is_ok());
    }
}
