//! Admin instructions for the shielded execution pool

pub mod pause;
pub mod push_root;
pub mod set_relayer;
pub mod set_verifier;
pub mod unpause;
pub mod update_authority;
