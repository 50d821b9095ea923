use anchor_lang::prelude::*;

use crate::constants::BPS_DENOMINATOR;
use crate::error::{SaleError, SaleResult};
use crate::utils::price::PricePolicy;

/// Global sale parameters (singleton PDA).
#[account]
#[derive(Default)]
pub struct SaleConfig {
    /// Admin authority: pause/resume, schedule, withdrawals.
    pub authority: Pubkey,
    /// Receives buyer payments and native withdrawals.
    pub recipient: Pubkey,
    /// Reserve PDA that owns the token vault.
    pub sale_authority: Pubkey,
    /// The one token being sold.
    pub token_mint: Pubkey,
    /// Pyth feed id of the quote currency (SOL/USD).
    pub price_feed_id: [u8; 32],
    /// USD per whole token, scaled by 10^USD_PRICE_DECIMALS.
    pub token_price_usd: u64,
    pub max_price_age_secs: u64,
    /// 0 disables the confidence check.
    pub max_confidence_bps: u16,
    pub min_partial_signatures: u8,
    /// Tokens one wallet may buy per limit window; 0 disables the limit.
    pub wallet_purchase_limit: u64,
    /// Copied from the mint at init; never changes.
    pub mint_decimals: u8,
    pub paused: bool,
    pub sale_authority_bump: u8,
}

impl SaleConfig {
    pub const SIZE: usize =
        32 + // authority
        32 + // recipient
        32 + // sale_authority
        32 + // token_mint
        32 + // price_feed_id
        8 +  // token_price_usd
        8 +  // max_price_age_secs
        2 +  // max_confidence_bps
        1 +  // min_partial_signatures
        8 +  // wallet_purchase_limit
        1 +  // mint_decimals
        1 +  // paused
        1;   // sale_authority_bump

    pub fn assert_authority(&self, caller: &Pubkey) -> SaleResult<()> {
        if *caller != self.authority {
            return Err(SaleError::Unauthorized);
        }
        Ok(())
    }

    pub fn ensure_active(&self) -> SaleResult<()> {
        if self.paused {
            return Err(SaleError::SalePaused);
        }
        Ok(())
    }

    pub fn pause(&mut self, caller: &Pubkey) -> SaleResult<()> {
        self.assert_authority(caller)?;
        self.ensure_active()?;
        self.paused = true;
        Ok(())
    }

    pub fn resume(&mut self, caller: &Pubkey) -> SaleResult<()> {
        self.assert_authority(caller)?;
        if !self.paused {
            return Err(SaleError::SaleNotPaused);
        }
        self.paused = false;
        Ok(())
    }

    /// Replaces the authority and returns the previous one.
    pub fn change_authority(
        &mut self,
        caller: &Pubkey,
        new_authority: Pubkey,
    ) -> SaleResult<Pubkey> {
        self.assert_authority(caller)?;
        if new_authority == Pubkey::default() {
            return Err(SaleError::InvalidPubkey);
        }
        Ok(std::mem::replace(&mut self.authority, new_authority))
    }

    /// Replaces the payment recipient and returns the previous one.
    pub fn change_recipient(
        &mut self,
        caller: &Pubkey,
        new_recipient: Pubkey,
    ) -> SaleResult<Pubkey> {
        self.assert_authority(caller)?;
        if new_recipient == Pubkey::default() {
            return Err(SaleError::InvalidPubkey);
        }
        Ok(std::mem::replace(&mut self.recipient, new_recipient))
    }

    pub fn set_token_price(&mut self, caller: &Pubkey, new_price: u64) -> SaleResult<u64> {
        self.assert_authority(caller)?;
        if new_price == 0 {
            return Err(SaleError::InvalidConfig);
        }
        Ok(std::mem::replace(&mut self.token_price_usd, new_price))
    }

    /// Replaces the per-wallet limit and returns the previous one.
    pub fn set_wallet_purchase_limit(&mut self, caller: &Pubkey, limit: u64) -> SaleResult<u64> {
        self.assert_authority(caller)?;
        Ok(std::mem::replace(&mut self.wallet_purchase_limit, limit))
    }

    pub fn price_policy(&self) -> PricePolicy {
        PricePolicy {
            feed_id: self.price_feed_id,
            max_age_secs: self.max_price_age_secs,
            min_partial_signatures: self.min_partial_signatures,
        }
    }
}

/// Caller-supplied parameters for `initialize_sale`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaleParams {
    pub token_price_usd: u64,
    /// Defaults to the SOL/USD feed.
    pub price_feed_id: Option<[u8; 32]>,
    pub max_price_age_secs: Option<u64>,
    pub min_partial_signatures: Option<u8>,
    pub max_confidence_bps: u16,
    /// 0 disables the per-wallet limit.
    pub wallet_purchase_limit: u64,
}

impl SaleParams {
    pub fn validate(&self) -> SaleResult<()> {
        if self.token_price_usd == 0 {
            return Err(SaleError::InvalidConfig);
        }
        if self.max_price_age_secs == Some(0) {
            return Err(SaleError::InvalidConfig);
        }
        if u64::from(self.max_confidence_bps) > BPS_DENOMINATOR {
            return Err(SaleError::InvalidConfig);
        }
        Ok(())
    }
}
