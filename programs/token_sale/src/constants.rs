//! Program-wide constants.

use anchor_lang::prelude::*;

/// Pyth SOL/USD feed, used when `SaleParams::price_feed_id` is not supplied.
#[constant]
pub const SOL_USD_FEED_ID: &str =
    "0xef0d8b6fda2ceba41da15d4095d1da392a0d2f8ed0c6c7bc0f4cfac8c280b56d";

pub const SALE_CONFIG_SEED: &[u8] = b"sale_config";
pub const SALE_AUTHORITY_SEED: &[u8] = b"sale_authority";
pub const RELEASE_SCHEDULE_SEED: &[u8] = b"release_schedule";
pub const WALLET_PURCHASE_SEED: &[u8] = b"wallet_purchase";
pub const VAULT_SEED: &[u8] = b"vault";

/// Upper bound on release periods stored in the schedule PDA.
pub const MAX_PERIODS: usize = 48;

/// Native currency (SOL) decimals: 1 SOL = 10^9 lamports.
pub const NATIVE_DECIMALS: u32 = 9;

/// Fixed-point scale of `SaleConfig::token_price_usd` (nano-USD).
pub const USD_PRICE_DECIMALS: u32 = 9;

/// Price updates older than this (seconds) are rejected unless overridden.
pub const DEFAULT_MAX_PRICE_AGE_SECS: u64 = 100;

/// Minimum guardian signatures accepted on a partially verified update.
pub const DEFAULT_MIN_PARTIAL_SIGNATURES: u8 = 5;

pub const BPS_DENOMINATOR: u64 = 10_000;

/// Seconds per day (UTC).
pub const SECONDS_PER_DAY: i64 = 86_400;

/// A wallet's limit window restarts once this long has passed since its
/// last purchase.
pub const WALLET_LIMIT_WINDOW_SECS: i64 = SECONDS_PER_DAY;
