use anchor_lang::prelude::*;

use crate::constants::SALE_CONFIG_SEED;
use crate::state::SaleConfig;

/// `new_limit == 0` lifts the per-wallet limit.
pub fn handle_update_wallet_purchase_limit(
    ctx: Context<UpdateWalletPurchaseLimit>,
    new_limit: u64,
) -> Result<()> {
    let cfg = &mut ctx.accounts.sale_config;
    let old_limit = cfg.set_wallet_purchase_limit(&ctx.accounts.authority.key(), new_limit)?;

    msg!("wallet purchase limit {} -> {}", old_limit, new_limit);
    emit!(WalletPurchaseLimitUpdated {
        authority: cfg.authority,
        old_limit,
        new_limit,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct UpdateWalletPurchaseLimit<'info> {
    #[account(mut, seeds = [SALE_CONFIG_SEED], bump)]
    pub sale_config: Account<'info, SaleConfig>,

    pub authority: Signer<'info>,
}

#[event]
pub struct WalletPurchaseLimitUpdated {
    pub authority: Pubkey,
    pub old_limit: u64,
    pub new_limit: u64,
}
