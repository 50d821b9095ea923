use anchor_lang::prelude::*;

use crate::constants::{SALE_CONFIG_SEED, VAULT_SEED};
use crate::error::SaleError;
use crate::state::SaleConfig;

pub fn handle_change_authority(ctx: Context<ChangeAuthority>, new_authority: Pubkey) -> Result<()> {
    let sale_config_key = ctx.accounts.sale_config.key();
    let cfg = &mut ctx.accounts.sale_config;

    // Program PDAs cannot sign; reject them as authority.
    require!(new_authority != sale_config_key, SaleError::InvalidConfig);
    require!(new_authority != cfg.sale_authority, SaleError::InvalidConfig);
    require!(new_authority != crate::ID, SaleError::InvalidConfig);
    let (vault_pda, _) = Pubkey::find_program_address(
        &[VAULT_SEED, sale_config_key.as_ref()],
        &crate::ID,
    );
    require!(new_authority != vault_pda, SaleError::InvalidConfig);

    let old_authority = cfg.change_authority(&ctx.accounts.authority.key(), new_authority)?;

    msg!("authority {} -> {}", old_authority, new_authority);
    emit!(AuthorityChanged {
        old_authority,
        new_authority,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct ChangeAuthority<'info> {
    #[account(mut, seeds = [SALE_CONFIG_SEED], bump)]
    pub sale_config: Account<'info, SaleConfig>,

    pub authority: Signer<'info>,
}

#[event]
pub struct AuthorityChanged {
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
}
