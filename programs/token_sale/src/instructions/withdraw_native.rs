use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::{SALE_AUTHORITY_SEED, SALE_CONFIG_SEED};
use crate::engine;
use crate::state::SaleConfig;

pub fn handle_withdraw_native(ctx: Context<WithdrawNative>, amount: u64) -> Result<()> {
    let cfg = &ctx.accounts.sale_config;
    let reserve_lamports = ctx.accounts.sale_authority.lamports();
    let rent_exempt_minimum = Rent::get()?.minimum_balance(0);

    engine::check_native_withdrawal(
        cfg,
        &ctx.accounts.authority.key(),
        &ctx.accounts.recipient.key(),
        amount,
        reserve_lamports,
        rent_exempt_minimum,
    )?;

    let signer_seeds: &[&[&[u8]]] = &[&[SALE_AUTHORITY_SEED, &[cfg.sale_authority_bump]]];
    system_program::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.sale_authority.to_account_info(),
                to: ctx.accounts.recipient.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(NativeWithdrawn {
        authority: cfg.authority,
        recipient: cfg.recipient,
        amount,
        remaining: ctx.accounts.sale_authority.lamports(),
    });

    Ok(())
}

#[derive(Accounts)]
pub struct WithdrawNative<'info> {
    #[account(seeds = [SALE_CONFIG_SEED], bump)]
    pub sale_config: Account<'info, SaleConfig>,

    #[account(mut, seeds = [SALE_AUTHORITY_SEED], bump = sale_config.sale_authority_bump)]
    pub sale_authority: SystemAccount<'info>,

    /// Checked against the stored recipient in-handler.
    #[account(mut)]
    pub recipient: SystemAccount<'info>,

    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct NativeWithdrawn {
    pub authority: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
    pub remaining: u64,
}
