use anchor_lang::prelude::*;

/// Custom error codes for the token sale program.
#[error_code]
pub enum SaleError {
    #[msg("Invalid sale or schedule configuration")]
    InvalidConfig,

    #[msg("Unauthorized: sale authority signature required")]
    Unauthorized,

    #[msg("Invalid public key")]
    InvalidPubkey,

    #[msg("Token sale is currently paused")]
    SalePaused,

    #[msg("Token sale is not paused")]
    SaleNotPaused,

    #[msg("Release schedule is already initialized")]
    ScheduleAlreadyInitialized,

    #[msg("Release schedule is not initialized")]
    ScheduleNotInitialized,

    #[msg("Supplied timestamp is earlier than the current release period")]
    BackwardClock,

    #[msg("Payment amount must be greater than zero")]
    InvalidAmount,

    #[msg("Computed token amount is zero")]
    ZeroAmount,

    #[msg("Purchase exceeds the cumulative unlocked cap")]
    CapExceeded,

    #[msg("Insufficient tokens in the sale reserve")]
    InsufficientReserve,

    #[msg("Insufficient funds for withdrawal")]
    InsufficientFunds,

    #[msg("Wrong recipient address")]
    WrongRecipient,

    #[msg("Price update is too old")]
    StalePrice,

    #[msg("Price update belongs to a different feed")]
    WrongFeed,

    #[msg("Price update verification level is insufficient")]
    InsufficientVerification,

    #[msg("Oracle price must be positive")]
    InvalidPrice,

    #[msg("Oracle confidence interval is too wide")]
    PriceConfidenceTooWide,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("No recipients provided")]
    NoRecipients,

    #[msg("Number of amounts does not match number of recipient accounts")]
    AmountRecipientMismatch,

    #[msg("Purchase exceeds the per-wallet purchase limit")]
    PurchaseLimitExceeded,
}

/// Result of the pure state and pricing checks; lifted into
/// `anchor_lang::Result` with `?` at the instruction boundary.
pub type SaleResult<T> = std::result::Result<T, SaleError>;
