//! Per-token value totals
//!
//! Value is only ever summed within one token. Totals are `u128` so a
//! single token's history cannot overflow them.

use anchor_lang::prelude::*;

use crate::error::ExecutorError;

#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TokenTotals {
    pub token: Pubkey,

    /// Base units received through deposits
    pub deposited: u128,

    /// Base units returned through the plaintext exit
    pub withdrawn: u128,

    /// Measured payout delivered to action recipients
    pub paid_out: u128,
}

impl TokenTotals {
    pub const LEN: usize = 8 // discriminator
        + 32 // token
        + 16 * 3; // totals

    pub const SEED_PREFIX: &'static [u8] = b"token_totals";

    pub fn new(token: Pubkey) -> Self {
        Self {
            token,
            ..Self::default()
        }
    }

    pub fn add_deposited(&mut self, amount: u64) -> Result<()> {
        self.deposited = checked_total(self.deposited, amount)?;
        Ok(())
    }

    pub fn add_withdrawn(&mut self, amount: u64) -> Result<()> {
        self.withdrawn = checked_total(self.withdrawn, amount)?;
        Ok(())
    }

    pub fn add_paid_out(&mut self, amount: u64) -> Result<()> {
        self.paid_out = checked_total(self.paid_out, amount)?;
        Ok(())
    }
}

fn checked_total(total: u128, amount: u64) -> Result<u128> {
    total
        .checked_add(u128::from(amount))
        .ok_or(error!(ExecutorError::ArithmeticOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_exceed_u64() {
        let mut totals = TokenTotals::new(Pubkey::new_unique());
        totals.add_deposited(u64::MAX).unwrap();
        totals.add_deposited(u64::MAX).unwrap();
        assert_eq!(totals.deposited, 2 * u128::from(u64::MAX));

        totals.add_withdrawn(7).unwrap();
        totals.add_paid_out(3).unwrap();
        assert_eq!((totals.withdrawn, totals.paid_out), (7, 3));
    }
}
