//! Purchase orchestration and admin admission checks.
//!
//! Everything here works on explicit state handles so it can run without a
//! validator; the instruction handlers supply the accounts and a CPI-backed
//! [`SaleLedger`].

use anchor_lang::prelude::*;

use crate::error::{SaleError, SaleResult};
use crate::state::{ReleaseSchedule, SaleConfig, WalletPurchase};
use crate::utils::price::{self, PriceRecord};

/// External balances and transfers the sale depends on.
pub trait SaleLedger {
    /// Sale tokens currently held by the reserve.
    fn reserve_token_balance(&self) -> u64;

    /// Moves `payment` lamports buyer -> recipient and `tokens` reserve -> buyer.
    /// Either both transfers apply or the call fails.
    fn settle_purchase(&mut self, payment: u64, tokens: u64) -> Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PurchaseRequest {
    pub buyer: Pubkey,
    /// Lamports offered by the buyer.
    pub payment_amount: u64,
    /// Caller-supplied clock used to advance the release schedule.
    pub supplied_ts: i64,
    /// Reference time for the price staleness check.
    pub now: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub token_amount: u64,
    pub payment_amount: u64,
    /// 10^-USD_PRICE_DECIMALS USD.
    pub usd_value: u64,
    pub periods_crossed: u16,
    pub new_total_purchased: u64,
    pub new_cumulative_unlocked_cap: u64,
    pub wallet_total_purchased: u64,
}

/// Runs one purchase against the sale state.
///
/// A schedule advance implied by a valid `supplied_ts` is kept even when a
/// later check rejects the purchase. The cap reservation, wallet update and
/// settlement are applied together or not at all.
pub fn process_purchase<L: SaleLedger>(
    config: &SaleConfig,
    schedule: &mut ReleaseSchedule,
    wallet: &mut WalletPurchase,
    ledger: &mut L,
    record: &PriceRecord,
    request: &PurchaseRequest,
) -> Result<PurchaseReceipt> {
    config.ensure_active()?;
    if request.payment_amount == 0 {
        return Err(SaleError::InvalidAmount.into());
    }

    let periods_crossed = schedule.advance(request.supplied_ts)?;

    let oracle_price = price::quote(record, &config.price_policy(), request.now)?;
    if config.max_confidence_bps > 0 && !oracle_price.confidence_within(config.max_confidence_bps) {
        return Err(SaleError::PriceConfidenceTooWide.into());
    }

    let usd_value = oracle_price.usd_value(request.payment_amount)?;
    let token_amount = oracle_price.tokens_for_payment(
        request.payment_amount,
        config.token_price_usd,
        config.mint_decimals,
    )?;
    if token_amount == 0 {
        return Err(SaleError::ZeroAmount.into());
    }
    if token_amount > ledger.reserve_token_balance() {
        return Err(SaleError::InsufficientReserve.into());
    }

    schedule.ensure_capacity(token_amount)?;
    wallet.ensure_can_record(&request.buyer, token_amount)?;
    wallet.ensure_within_limit(token_amount, request.supplied_ts, config.wallet_purchase_limit)?;

    ledger.settle_purchase(request.payment_amount, token_amount)?;

    schedule.reserve(token_amount)?;
    wallet.record(&request.buyer, token_amount, request.supplied_ts)?;

    Ok(PurchaseReceipt {
        token_amount,
        payment_amount: request.payment_amount,
        usd_value,
        periods_crossed,
        new_total_purchased: schedule.total_purchased,
        new_cumulative_unlocked_cap: schedule.cumulative_unlocked_cap,
        wallet_total_purchased: wallet.total_purchased,
    })
}

/// Admits a native withdrawal that leaves the reserve PDA rent exempt.
pub fn check_native_withdrawal(
    config: &SaleConfig,
    caller: &Pubkey,
    destination: &Pubkey,
    amount: u64,
    reserve_lamports: u64,
    rent_exempt_minimum: u64,
) -> SaleResult<()> {
    config.assert_authority(caller)?;
    if *destination != config.recipient {
        return Err(SaleError::WrongRecipient);
    }
    if amount == 0 {
        return Err(SaleError::InvalidAmount);
    }
    if amount > reserve_lamports.saturating_sub(rent_exempt_minimum) {
        return Err(SaleError::InsufficientFunds);
    }
    Ok(())
}

pub fn check_token_withdrawal(
    config: &SaleConfig,
    caller: &Pubkey,
    amount: u64,
    vault_balance: u64,
) -> SaleResult<()> {
    config.assert_authority(caller)?;
    if amount == 0 {
        return Err(SaleError::InvalidAmount);
    }
    if amount > vault_balance {
        return Err(SaleError::InsufficientReserve);
    }
    Ok(())
}

/// Validates an airdrop batch and returns its total.
pub fn plan_airdrop(
    config: &SaleConfig,
    caller: &Pubkey,
    amounts: &[u64],
    recipient_count: usize,
    vault_balance: u64,
) -> SaleResult<u64> {
    config.assert_authority(caller)?;
    if amounts.is_empty() {
        return Err(SaleError::NoRecipients);
    }
    if amounts.len() != recipient_count {
        return Err(SaleError::AmountRecipientMismatch);
    }
    let total = amounts.iter().try_fold(0u64, |acc, &amount| {
        if amount == 0 {
            return Err(SaleError::ZeroAmount);
        }
        acc.checked_add(amount).ok_or(SaleError::MathOverflow)
    })?;
    if total > vault_balance {
        return Err(SaleError::InsufficientReserve);
    }
    Ok(total)
}
