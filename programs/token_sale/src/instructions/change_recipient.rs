use anchor_lang::prelude::*;

use crate::constants::SALE_CONFIG_SEED;
use crate::error::SaleError;
use crate::state::SaleConfig;

pub fn handle_change_recipient(ctx: Context<ChangeRecipient>, new_recipient: Pubkey) -> Result<()> {
    let cfg = &mut ctx.accounts.sale_config;
    // The reserve PDA is never a payment recipient.
    require!(new_recipient != cfg.sale_authority, SaleError::InvalidConfig);

    let old_recipient = cfg.change_recipient(&ctx.accounts.authority.key(), new_recipient)?;

    emit!(RecipientChanged {
        authority: cfg.authority,
        old_recipient,
        new_recipient,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct ChangeRecipient<'info> {
    #[account(mut, seeds = [SALE_CONFIG_SEED], bump)]
    pub sale_config: Account<'info, SaleConfig>,

    pub authority: Signer<'info>,
}

#[event]
pub struct RecipientChanged {
    pub authority: Pubkey,
    pub old_recipient: Pubkey,
    pub new_recipient: Pubkey,
}
