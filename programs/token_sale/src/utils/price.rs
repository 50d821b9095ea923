//! Oracle price adaptation and fixed-point purchase math.
//!
//! A Pyth update is reduced to a [`PriceRecord`], checked against the sale's
//! [`PricePolicy`] and turned into an [`OraclePrice`]. All conversions stay in
//! integers: `price × 10^exponent` is never materialised as a float, and every
//! division truncates toward zero.

use pyth_solana_receiver_sdk::price_update::{PriceUpdateV2, VerificationLevel};

use crate::constants::{BPS_DENOMINATOR, NATIVE_DECIMALS, USD_PRICE_DECIMALS};
use crate::error::{SaleError, SaleResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verification {
    Full,
    Partial { signatures: u8 },
}

/// Raw price record as delivered by the feed, before any validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceRecord {
    pub feed_id: [u8; 32],
    pub price: i64,
    pub exponent: i32,
    pub confidence: u64,
    pub publish_time: i64,
    pub verification: Verification,
}

impl From<&PriceUpdateV2> for PriceRecord {
    fn from(update: &PriceUpdateV2) -> Self {
        let msg = &update.price_message;
        let verification = match update.verification_level {
            VerificationLevel::Full => Verification::Full,
            VerificationLevel::Partial { num_signatures } => Verification::Partial {
                signatures: num_signatures,
            },
        };
        Self {
            feed_id: msg.feed_id,
            price: msg.price,
            exponent: msg.exponent,
            confidence: msg.conf,
            publish_time: msg.publish_time,
            verification,
        }
    }
}

/// What the sale accepts from the feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PricePolicy {
    pub feed_id: [u8; 32],
    pub max_age_secs: u64,
    pub min_partial_signatures: u8,
}

/// A validated, strictly positive price: USD per whole native unit is
/// `price × 10^exponent`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OraclePrice {
    pub price: u64,
    pub exponent: i32,
    pub confidence: u64,
    pub publish_time: i64,
}

/// Validates `record` against `policy` at time `now`.
pub fn quote(record: &PriceRecord, policy: &PricePolicy, now: i64) -> SaleResult<OraclePrice> {
    if record.feed_id != policy.feed_id {
        return Err(SaleError::WrongFeed);
    }
    match record.verification {
        Verification::Full => {}
        Verification::Partial { signatures } if signatures >= policy.min_partial_signatures => {}
        Verification::Partial { .. } => return Err(SaleError::InsufficientVerification),
    }
    let age = now.saturating_sub(record.publish_time);
    if age > 0 && age as u64 > policy.max_age_secs {
        return Err(SaleError::StalePrice);
    }
    let price = u64::try_from(record.price).map_err(|_| SaleError::InvalidPrice)?;
    if price == 0 {
        return Err(SaleError::InvalidPrice);
    }
    Ok(OraclePrice {
        price,
        exponent: record.exponent,
        confidence: record.confidence,
        publish_time: record.publish_time,
    })
}

impl OraclePrice {
    /// Confidence interval relative to the price, in basis points.
    pub fn confidence_bps(&self) -> u64 {
        let bps = (self.confidence as u128) * (BPS_DENOMINATOR as u128) / (self.price as u128);
        u64::try_from(bps).unwrap_or(u64::MAX)
    }

    pub fn confidence_within(&self, max_bps: u16) -> bool {
        self.confidence_bps() <= u64::from(max_bps)
    }

    /// USD value of `payment` lamports, in 10^-USD_PRICE_DECIMALS USD.
    pub fn usd_value(&self, payment: u64) -> SaleResult<u64> {
        let scale = i64::from(self.exponent) + i64::from(USD_PRICE_DECIMALS)
            - i64::from(NATIVE_DECIMALS);
        let v = scaled_ratio(payment as u128 * self.price as u128, 1, scale)?;
        u64::try_from(v).map_err(|_| SaleError::MathOverflow)
    }

    /// Token amount, in base units of a `mint_decimals` mint, that
    /// `payment` lamports buy at `token_price_usd` (10^-USD_PRICE_DECIMALS USD
    /// per token). Truncates toward zero.
    pub fn tokens_for_payment(
        &self,
        payment: u64,
        token_price_usd: u64,
        mint_decimals: u8,
    ) -> SaleResult<u64> {
        if token_price_usd == 0 {
            return Err(SaleError::InvalidConfig);
        }
        let scale = i64::from(self.exponent)
            + i64::from(mint_decimals)
            + i64::from(USD_PRICE_DECIMALS)
            - i64::from(NATIVE_DECIMALS);
        let v = scaled_ratio(
            payment as u128 * self.price as u128,
            token_price_usd as u128,
            scale,
        )?;
        u64::try_from(v).map_err(|_| SaleError::MathOverflow)
    }
}

/// `floor(num × 10^scale / den)` without leaving integer arithmetic.
fn scaled_ratio(num: u128, den: u128, scale: i64) -> SaleResult<u128> {
    if scale >= 0 {
        let num = num
            .checked_mul(pow10(scale)?)
            .ok_or(SaleError::MathOverflow)?;
        Ok(num / den)
    } else {
        // A divisor past u128::MAX exceeds any u128 numerator: the floor is 0.
        match pow10(-scale).ok().and_then(|p| den.checked_mul(p)) {
            Some(den) => Ok(num / den),
            None => Ok(0),
        }
    }
}

fn pow10(exp: i64) -> SaleResult<u128> {
    let exp = u32::try_from(exp).map_err(|_| SaleError::MathOverflow)?;
    10u128.checked_pow(exp).ok_or(SaleError::MathOverflow)
}
