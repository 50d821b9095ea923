use anchor_lang::prelude::*;
use bytemuck::{Pod, Zeroable};

use crate::constants::MAX_PERIODS;
use crate::error::{SaleError, SaleResult};

/// One release period: from `start_ts` on, `cap` more tokens become purchasable.
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable,
)]
#[repr(C)]
pub struct ReleasePeriod {
    pub start_ts: i64,
    pub cap: u64,
}

impl ReleasePeriod {
    pub const SIZE: usize = core::mem::size_of::<ReleasePeriod>();
}

/// Cumulative release schedule (singleton PDA).
///
/// Caps accumulate and never reset: once a boundary is reached its cap stays
/// purchasable until sold.
#[account]
#[derive(Default)]
pub struct ReleaseSchedule {
    /// Strictly increasing `start_ts`; at most `MAX_PERIODS` entries.
    pub periods: Vec<ReleasePeriod>,
    /// Sum of caps for periods `0..=last_evaluated_index`.
    pub cumulative_unlocked_cap: u64,
    /// Tokens sold so far. Never exceeds `cumulative_unlocked_cap`.
    pub total_purchased: u64,
    /// Latest boundary confirmed by a supplied timestamp.
    pub last_evaluated_index: u16,
    /// blake3 over the period table as laid out in memory.
    pub schedule_hash: [u8; 32],
    pub bump: u8,
}

impl ReleaseSchedule {
    /// Account space (with discriminator) for a table of `periods` entries.
    pub const fn space(periods: usize) -> usize {
        8 +                                // discriminator
        4 + periods * ReleasePeriod::SIZE + // periods
        8 +                                // cumulative_unlocked_cap
        8 +                                // total_purchased
        2 +                                // last_evaluated_index
        32 +                               // schedule_hash
        1                                  // bump
    }

    /// Zips boundaries and caps into a period table.
    pub fn periods_from_parts(
        boundaries: &[i64],
        caps: &[u64],
    ) -> SaleResult<Vec<ReleasePeriod>> {
        if boundaries.len() != caps.len() {
            return Err(SaleError::InvalidConfig);
        }
        Ok(boundaries
            .iter()
            .zip(caps)
            .map(|(&start_ts, &cap)| ReleasePeriod { start_ts, cap })
            .collect())
    }

    pub fn is_initialized(&self) -> bool {
        !self.periods.is_empty()
    }

    /// One-time setup. The first period's cap is unlocked immediately.
    pub fn initialize(&mut self, periods: Vec<ReleasePeriod>) -> SaleResult<()> {
        if self.is_initialized() {
            return Err(SaleError::ScheduleAlreadyInitialized);
        }
        if periods.is_empty() || periods.len() > MAX_PERIODS {
            return Err(SaleError::InvalidConfig);
        }
        if periods.windows(2).any(|w| w[0].start_ts >= w[1].start_ts) {
            return Err(SaleError::InvalidConfig);
        }
        // The full table must stay summable, otherwise a late advance would overflow.
        periods.iter().try_fold(0u64, |acc, p| {
            acc.checked_add(p.cap).ok_or(SaleError::MathOverflow)
        })?;

        self.schedule_hash = Self::hash_periods(&periods);
        self.cumulative_unlocked_cap = periods[0].cap;
        self.total_purchased = 0;
        self.last_evaluated_index = 0;
        self.periods = periods;
        Ok(())
    }

    pub fn hash_periods(periods: &[ReleasePeriod]) -> [u8; 32] {
        blake3::hash(bytemuck::cast_slice(periods)).into()
    }

    /// The `(last_evaluated_index, cumulative_unlocked_cap)` pair that
    /// `advance(supplied_ts)` would produce. Does not mutate.
    pub fn preview(&self, supplied_ts: i64) -> SaleResult<(u16, u64)> {
        if !self.is_initialized() {
            return Err(SaleError::ScheduleNotInitialized);
        }
        let mut idx = self.last_evaluated_index as usize;
        let current = self
            .periods
            .get(idx)
            .ok_or(SaleError::InvalidConfig)?;
        if supplied_ts < current.start_ts {
            return Err(SaleError::BackwardClock);
        }

        let mut cap = self.cumulative_unlocked_cap;
        while let Some(next) = self.periods.get(idx + 1) {
            if supplied_ts < next.start_ts {
                break;
            }
            idx += 1;
            cap = cap.checked_add(next.cap).ok_or(SaleError::MathOverflow)?;
        }
        let idx = u16::try_from(idx).map_err(|_| SaleError::MathOverflow)?;
        Ok((idx, cap))
    }

    /// Moves the schedule forward to the period containing `supplied_ts`,
    /// unlocking every cap crossed on the way. Returns the number of
    /// boundaries crossed. Boundaries are inclusive.
    pub fn advance(&mut self, supplied_ts: i64) -> SaleResult<u16> {
        let (idx, cap) = self.preview(supplied_ts)?;
        let crossed = idx - self.last_evaluated_index;
        self.last_evaluated_index = idx;
        self.cumulative_unlocked_cap = cap;
        Ok(crossed)
    }

    /// Tokens that can still be sold under the current cap.
    pub fn remaining_unlocked(&self) -> u64 {
        self.cumulative_unlocked_cap
            .saturating_sub(self.total_purchased)
    }

    /// Checks that `amount` fits under the cap and returns the resulting total.
    pub fn ensure_capacity(&self, amount: u64) -> SaleResult<u64> {
        let next = self
            .total_purchased
            .checked_add(amount)
            .ok_or(SaleError::MathOverflow)?;
        if next > self.cumulative_unlocked_cap {
            return Err(SaleError::CapExceeded);
        }
        Ok(next)
    }

    pub fn reserve(&mut self, amount: u64) -> SaleResult<()> {
        self.total_purchased = self.ensure_capacity(amount)?;
        Ok(())
    }

    pub fn boundaries(&self) -> Vec<i64> {
        self.periods.iter().map(|p| p.start_ts).collect()
    }

    pub fn caps(&self) -> Vec<u64> {
        self.periods.iter().map(|p| p.cap).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: i64 = 1_700_000_000;
    const T1: i64 = T0 + 2_629_743;
    const T2: i64 = T1 + 2_629_743;

    fn schedule(boundaries: &[i64], caps: &[u64]) -> ReleaseSchedule {
        let mut s = ReleaseSchedule::default();
        s.initialize(ReleaseSchedule::periods_from_parts(boundaries, caps).unwrap())
            .unwrap();
        s
    }

    #[test]
    fn three_period_walkthrough() {
        let mut s = schedule(&[T0, T1, T2], &[100, 50, 200]);
        assert_eq!(s.cumulative_unlocked_cap, 100);
        assert_eq!(s.last_evaluated_index, 0);

        assert_eq!(s.advance(T1 - 1).unwrap(), 0);
        assert_eq!(s.cumulative_unlocked_cap, 100);

        assert_eq!(s.advance(T1).unwrap(), 1);
        assert_eq!(s.cumulative_unlocked_cap, 150);

        assert_eq!(s.advance(T2 + 10).unwrap(), 1);
        assert_eq!(s.cumulative_unlocked_cap, 350);
        assert_eq!(s.last_evaluated_index, 2);
    }

    #[test]
    fn single_call_crosses_multiple_boundaries() {
        let mut s = schedule(&[T0, T1, T2], &[100, 50, 200]);
        assert_eq!(s.advance(T2 + 10).unwrap(), 2);
        assert_eq!(s.cumulative_unlocked_cap, 350);
        assert_eq!(s.last_evaluated_index, 2);
    }

    #[test]
    fn advancing_to_each_boundary_accumulates_prefix_sums() {
        let boundaries: Vec<i64> = (0..12).map(|i| T0 + i * 86_400).collect();
        let caps: Vec<u64> = (1..=12).map(|i| i * 1_000).collect();
        let mut s = schedule(&boundaries, &caps);

        for (i, &b) in boundaries.iter().enumerate() {
            s.advance(b).unwrap();
            assert_eq!(s.last_evaluated_index as usize, i);
            assert_eq!(s.cumulative_unlocked_cap, caps[..=i].iter().sum::<u64>());
        }
    }

    #[test]
    fn backward_clock_is_rejected_without_side_effects() {
        let mut s = schedule(&[T0, T1, T2], &[100, 50, 200]);
        s.advance(T1).unwrap();
        let before = (s.last_evaluated_index, s.cumulative_unlocked_cap);

        assert!(matches!(s.advance(T1 - 1), Err(SaleError::BackwardClock)));
        assert!(matches!(s.advance(T0), Err(SaleError::BackwardClock)));
        assert_eq!((s.last_evaluated_index, s.cumulative_unlocked_cap), before);

        // Before the first boundary nothing has been confirmed yet.
        let mut fresh = schedule(&[T0, T1], &[1, 1]);
        assert!(matches!(fresh.advance(T0 - 1), Err(SaleError::BackwardClock)));
    }

    #[test]
    fn repeated_advance_is_idempotent() {
        let mut s = schedule(&[T0, T1, T2], &[100, 50, 200]);
        assert_eq!(s.advance(T1 + 5).unwrap(), 1);
        assert_eq!(s.advance(T1 + 5).unwrap(), 0);
        assert_eq!(s.cumulative_unlocked_cap, 150);
        assert_eq!(s.last_evaluated_index, 1);
    }

    #[test]
    fn reserve_respects_cumulative_cap() {
        let mut s = schedule(&[T0, T1], &[100, 50]);
        s.advance(T1).unwrap();
        s.reserve(140).unwrap();

        assert!(matches!(s.reserve(20), Err(SaleError::CapExceeded)));
        assert_eq!(s.total_purchased, 140);
        s.reserve(10).unwrap();
        assert_eq!(s.total_purchased, 150);
        assert_eq!(s.remaining_unlocked(), 0);
        assert!(matches!(s.reserve(1), Err(SaleError::CapExceeded)));
    }

    #[test]
    fn reserve_never_exceeds_cap_for_mixed_sequences() {
        let boundaries = [T0, T1, T2];
        let mut s = schedule(&boundaries, &[100, 50, 200]);
        let amounts = [30u64, 90, 1, 70, 0, 200, 49, 5, 3, 400, 17];
        let stamps = [T0, T0 + 1, T1 - 1, T1, T1, T1 + 9, T2, T2, T2 + 1, T2 + 2, T2 + 3];

        for (&amount, &ts) in amounts.iter().zip(stamps.iter()) {
            s.advance(ts).unwrap();
            let _ = s.reserve(amount);
            assert!(s.total_purchased <= s.cumulative_unlocked_cap);
        }
        assert_eq!(s.cumulative_unlocked_cap, 350);
    }

    #[test]
    fn malformed_tables_are_rejected() {
        assert!(matches!(
            ReleaseSchedule::periods_from_parts(&[T0, T1], &[1]),
            Err(SaleError::InvalidConfig)
        ));

        let mut s = ReleaseSchedule::default();
        assert!(matches!(s.initialize(vec![]), Err(SaleError::InvalidConfig)));

        let dup = ReleaseSchedule::periods_from_parts(&[T0, T0], &[1, 1]).unwrap();
        assert!(matches!(s.initialize(dup), Err(SaleError::InvalidConfig)));

        let desc = ReleaseSchedule::periods_from_parts(&[T1, T0], &[1, 1]).unwrap();
        assert!(matches!(s.initialize(desc), Err(SaleError::InvalidConfig)));

        let too_many = vec![ReleasePeriod::default(); MAX_PERIODS + 1];
        assert!(matches!(s.initialize(too_many), Err(SaleError::InvalidConfig)));

        let overflow = ReleaseSchedule::periods_from_parts(&[T0, T1], &[u64::MAX, 1]).unwrap();
        assert!(matches!(s.initialize(overflow), Err(SaleError::MathOverflow)));
        assert!(!s.is_initialized());
    }

    #[test]
    fn initialize_is_one_time() {
        let mut s = schedule(&[T0], &[10]);
        let again = ReleaseSchedule::periods_from_parts(&[T1], &[20]).unwrap();
        assert!(matches!(s.initialize(again), Err(SaleError::ScheduleAlreadyInitialized)));
        assert_eq!(s.cumulative_unlocked_cap, 10);
    }

    #[test]
    fn uninitialized_schedule_cannot_advance() {
        let mut s = ReleaseSchedule::default();
        assert!(matches!(s.advance(T0), Err(SaleError::ScheduleNotInitialized)));
    }

    #[test]
    fn hash_commits_to_the_period_table() {
        let a = schedule(&[T0, T1], &[100, 50]);
        let b = schedule(&[T0, T1], &[100, 51]);
        assert_ne!(a.schedule_hash, b.schedule_hash);
        assert_eq!(a.schedule_hash, ReleaseSchedule::hash_periods(&a.periods));
        assert_eq!(a.boundaries(), vec![T0, T1]);
        assert_eq!(a.caps(), vec![100, 50]);
    }

    #[test]
    fn space_accounts_for_every_period() {
        assert_eq!(ReleasePeriod::SIZE, 16);
        assert_eq!(ReleaseSchedule::space(3) - ReleaseSchedule::space(2), 16);
    }
}
