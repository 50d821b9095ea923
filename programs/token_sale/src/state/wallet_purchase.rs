use anchor_lang::prelude::*;

use crate::constants::WALLET_LIMIT_WINDOW_SECS;
use crate::error::{SaleError, SaleResult};

/// Per-buyer purchase ledger, created on the buyer's first purchase.
#[account]
#[derive(Default)]
pub struct WalletPurchase {
    pub buyer: Pubkey,
    /// Cumulative tokens bought by this wallet.
    pub total_purchased: u64,
    pub purchase_count: u32,
    /// Latest supplied timestamp among accepted purchases.
    pub last_purchase_ts: i64,
    /// Tokens bought in the current limit window. Unlike `total_purchased`
    /// this restarts once the window lapses.
    pub window_purchased: u64,
    pub bump: u8,
}

impl WalletPurchase {
    pub const SIZE: usize =
        32 + // buyer
        8 +  // total_purchased
        4 +  // purchase_count
        8 +  // last_purchase_ts
        8 +  // window_purchased
        1;   // bump

    pub fn is_initialized(&self) -> bool {
        self.buyer != Pubkey::default()
    }

    /// Validates that `amount` can be recorded for `buyer` and returns the
    /// resulting total. Does not mutate.
    pub fn ensure_can_record(&self, buyer: &Pubkey, amount: u64) -> SaleResult<u64> {
        if self.is_initialized() && self.buyer != *buyer {
            return Err(SaleError::Unauthorized);
        }
        self.total_purchased
            .checked_add(amount)
            .ok_or(SaleError::MathOverflow)
    }

    /// Window total a purchase of `amount` at `supplied_ts` would produce.
    /// The window restarts when more than `WALLET_LIMIT_WINDOW_SECS` have
    /// passed since the last purchase.
    pub fn window_total_after(&self, amount: u64, supplied_ts: i64) -> SaleResult<u64> {
        let carried = if self.window_lapsed(supplied_ts) {
            0
        } else {
            self.window_purchased
        };
        carried.checked_add(amount).ok_or(SaleError::MathOverflow)
    }

    fn window_lapsed(&self, supplied_ts: i64) -> bool {
        !self.is_initialized()
            || supplied_ts.saturating_sub(self.last_purchase_ts) > WALLET_LIMIT_WINDOW_SECS
    }

    /// `limit == 0` disables the check.
    pub fn ensure_within_limit(&self, amount: u64, supplied_ts: i64, limit: u64) -> SaleResult<()> {
        if limit == 0 {
            return Ok(());
        }
        if self.window_total_after(amount, supplied_ts)? > limit {
            return Err(SaleError::PurchaseLimitExceeded);
        }
        Ok(())
    }

    pub fn record(
        &mut self,
        buyer: &Pubkey,
        amount: u64,
        supplied_ts: i64,
    ) -> SaleResult<()> {
        let total = self.ensure_can_record(buyer, amount)?;
        let window = self.window_total_after(amount, supplied_ts)?;
        let count = self
            .purchase_count
            .checked_add(1)
            .ok_or(SaleError::MathOverflow)?;
        if self.is_initialized() {
            self.last_purchase_ts = self.last_purchase_ts.max(supplied_ts);
        } else {
            self.buyer = *buyer;
            self.last_purchase_ts = supplied_ts;
        }
        self.total_purchased = total;
        self.window_purchased = window;
        self.purchase_count = count;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_record_claims_the_wallet() {
        let buyer = Pubkey::new_unique();
        let mut w = WalletPurchase::default();
        assert!(!w.is_initialized());

        w.record(&buyer, 500, 1_700_000_000).unwrap();
        w.record(&buyer, 250, 1_700_000_100).unwrap();

        assert_eq!(w.buyer, buyer);
        assert_eq!(w.total_purchased, 750);
        assert_eq!(w.purchase_count, 2);
        assert_eq!(w.last_purchase_ts, 1_700_000_100);
    }

    #[test]
    fn record_rejects_foreign_buyer_and_overflow() {
        let buyer = Pubkey::new_unique();
        let mut w = WalletPurchase::default();
        w.record(&buyer, u64::MAX - 1, 1).unwrap();

        assert!(matches!(
            w.record(&Pubkey::new_unique(), 1, 2),
            Err(SaleError::Unauthorized)
        ));
        assert!(matches!(w.record(&buyer, 2, 2), Err(SaleError::MathOverflow)));
        assert_eq!(w.total_purchased, u64::MAX - 1);
        assert_eq!(w.purchase_count, 1);
    }

    #[test]
    fn window_restarts_after_a_quiet_day() {
        let buyer = Pubkey::new_unique();
        let t = 1_700_000_000;
        let mut w = WalletPurchase::default();

        w.record(&buyer, 600, t).unwrap();
        w.record(&buyer, 300, t + 3_600).unwrap();
        assert_eq!(w.window_purchased, 900);
        assert!(w.ensure_within_limit(100, t + 3_600, 1_000).is_ok());
        assert!(matches!(
            w.ensure_within_limit(101, t + 3_600, 1_000),
            Err(SaleError::PurchaseLimitExceeded)
        ));

        // Exactly one window after the last purchase still counts.
        let edge = t + 3_600 + WALLET_LIMIT_WINDOW_SECS;
        assert!(w.ensure_within_limit(101, edge, 1_000).is_err());
        assert!(w.ensure_within_limit(1_000, edge + 1, 1_000).is_ok());

        w.record(&buyer, 1_000, edge + 1).unwrap();
        assert_eq!(w.window_purchased, 1_000);
        assert_eq!(w.total_purchased, 1_900);
    }

    #[test]
    fn zero_limit_disables_the_check() {
        let buyer = Pubkey::new_unique();
        let mut w = WalletPurchase::default();
        w.record(&buyer, u64::MAX / 2, 1).unwrap();
        assert!(w.ensure_within_limit(u64::MAX / 2, 2, 0).is_ok());
    }

    #[test]
    fn earlier_timestamp_does_not_rewind_the_window() {
        let buyer = Pubkey::new_unique();
        let t = 1_700_000_000;
        let mut w = WalletPurchase::default();
        w.record(&buyer, 10, t).unwrap();
        w.record(&buyer, 10, t - 500).unwrap();
        assert_eq!(w.last_purchase_ts, t);
        assert_eq!(w.window_purchased, 20);
    }
}
