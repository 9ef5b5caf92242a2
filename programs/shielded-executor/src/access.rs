//! Authorization matrix
//!
//! Every role check in the pool goes through `AccessPolicy::authorize`.
//!
//! | Operation                         | Policy                          |
//! |-----------------------------------|---------------------------------|
//! | pause / unpause / setters         | `Admin`                         |
//! | push_root                         | `Admin`                         |
//! | initiate / cancel admin transfer  | `Admin`                         |
//! | accept admin transfer             | `PendingAdmin`                  |
//! | deposit / submit                  | `Anyone`                        |
//! | withdraw                          | `NoteOwner(owner)`              |
//! | execute (generation-1)            | `SubmitterRelayerOrAdmin(..)`   |
//! | execute (generation-2) / batches  | `RelayerOrAdmin`                |

use anchor_lang::prelude::*;

use crate::error::ExecutorError;
use crate::state::PoolConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessPolicy {
    Admin,
    PendingAdmin,
    RelayerOrAdmin,
    SubmitterRelayerOrAdmin(Pubkey),
    NoteOwner(Pubkey),
    Anyone,
}

impl AccessPolicy {
    pub fn allows(&self, config: &PoolConfig, caller: &Pubkey) -> bool {
        let is_admin = *caller == config.admin;
        let is_relayer = config.has_relayer() && *caller == config.relayer;

        match self {
            AccessPolicy::Admin => is_admin,
            AccessPolicy::PendingAdmin => {
                config.has_pending_transfer() && *caller == config.pending_admin
            }
            AccessPolicy::RelayerOrAdmin => is_relayer || is_admin,
            AccessPolicy::SubmitterRelayerOrAdmin(submitter) => {
                *caller == *submitter || is_relayer || is_admin
            }
            AccessPolicy::NoteOwner(owner) => *caller == *owner,
            AccessPolicy::Anyone => true,
        }
    }

    /// Fail unless `caller` satisfies this policy.
    pub fn authorize(&self, config: &PoolConfig, caller: &Pubkey) -> Result<()> {
        if self.allows(config, caller) {
            return Ok(());
        }

        match self {
            AccessPolicy::NoteOwner(_) => err!(ExecutorError::NotNoteOwner),
            AccessPolicy::PendingAdmin if !config.has_pending_transfer() => {
                err!(ExecutorError::NoPendingAuthority)
            }
            _ => err!(ExecutorError::Unauthorized),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PoolParams;

    fn config(relayer: Pubkey) -> PoolConfig {
        let params =
            PoolParams::new(Pubkey::new_unique(), Pubkey::new_unique()).with_relayer(relayer);
        PoolConfig::initialize(&params, 1, 0)
    }

    #[test]
    fn test_admin_policy() {
        let config = config(Pubkey::new_unique());
        assert!(AccessPolicy::Admin.authorize(&config, &config.admin).is_ok());
        assert!(AccessPolicy::Admin.authorize(&config, &config.relayer).is_err());
    }

    #[test]
    fn test_relayer_or_admin() {
        let config = config(Pubkey::new_unique());
        let policy = AccessPolicy::RelayerOrAdmin;
        assert!(policy.allows(&config, &config.admin));
        assert!(policy.allows(&config, &config.relayer));
        assert!(!policy.allows(&config, &Pubkey::new_unique()));
    }

    #[test]
    fn test_unset_relayer_is_not_a_wildcard() {
        let config = config(Pubkey::default());
        assert!(!AccessPolicy::RelayerOrAdmin.allows(&config, &Pubkey::default()));
    }

    #[test]
    fn test_submitter_policy() {
        let config = config(Pubkey::new_unique());
        let submitter = Pubkey::new_unique();
        let policy = AccessPolicy::SubmitterRelayerOrAdmin(submitter);
        assert!(policy.allows(&config, &submitter));
        assert!(policy.allows(&config, &config.relayer));
        assert!(!policy.allows(&config, &Pubkey::new_unique()));
    }

    #[test]
    fn test_note_owner_policy() {
        let config = config(Pubkey::new_unique());
        let owner = Pubkey::new_unique();
        let policy = AccessPolicy::NoteOwner(owner);
        assert!(policy.authorize(&config, &owner).is_ok());
        assert!(policy.authorize(&config, &config.admin).is_err());
    }

    #[test]
    fn test_pending_admin_policy() {
        let mut config = config(Pubkey::new_unique());
        let candidate = Pubkey::new_unique();
        assert!(AccessPolicy::PendingAdmin
            .authorize(&config, &candidate)
            .is_err());
        config.initiate_authority_transfer(candidate).unwrap();
        assert!(AccessPolicy::PendingAdmin
            .authorize(&config, &candidate)
            .is_ok());
    }
}
