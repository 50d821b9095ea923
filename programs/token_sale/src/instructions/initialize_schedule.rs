use anchor_lang::prelude::*;

use crate::constants::{RELEASE_SCHEDULE_SEED, SALE_CONFIG_SEED};
use crate::state::{ReleaseSchedule, SaleConfig};
use crate::utils::time;

pub fn handle_initialize_schedule(
    ctx: Context<InitializeSchedule>,
    boundaries: Vec<i64>,
    caps: Vec<u64>,
) -> Result<()> {
    ctx.accounts
        .sale_config
        .assert_authority(&ctx.accounts.authority.key())?;

    let periods = ReleaseSchedule::periods_from_parts(&boundaries, &caps)?;
    let schedule = &mut ctx.accounts.release_schedule;
    schedule.initialize(periods)?;
    schedule.bump = ctx.bumps.release_schedule;

    emit_initialized(schedule)
}

/// Same as `handle_initialize_schedule`, with boundaries one calendar month apart
/// starting at `start_ts`.
pub fn handle_initialize_monthly_schedule(
    ctx: Context<InitializeMonthlySchedule>,
    start_ts: i64,
    caps: Vec<u64>,
) -> Result<()> {
    ctx.accounts
        .sale_config
        .assert_authority(&ctx.accounts.authority.key())?;

    let boundaries = time::monthly_boundaries(start_ts, caps.len())?;
    let periods = ReleaseSchedule::periods_from_parts(&boundaries, &caps)?;
    let schedule = &mut ctx.accounts.release_schedule;
    schedule.initialize(periods)?;
    schedule.bump = ctx.bumps.release_schedule;

    emit_initialized(schedule)
}

fn emit_initialized(schedule: &ReleaseSchedule) -> Result<()> {
    msg!(
        "release schedule: {} periods, first cap {}",
        schedule.periods.len(),
        schedule.cumulative_unlocked_cap
    );
    emit!(ScheduleInitialized {
        boundaries: schedule.boundaries(),
        caps: schedule.caps(),
        schedule_hash: schedule.schedule_hash,
    });
    Ok(())
}

#[derive(Accounts)]
#[instruction(boundaries: Vec<i64>, caps: Vec<u64>)]
pub struct InitializeSchedule<'info> {
    #[account(seeds = [SALE_CONFIG_SEED], bump)]
    pub sale_config: Account<'info, SaleConfig>,

    #[account(
        init,
        payer = authority,
        space = ReleaseSchedule::space(boundaries.len()),
        seeds = [RELEASE_SCHEDULE_SEED],
        bump
    )]
    pub release_schedule: Account<'info, ReleaseSchedule>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(start_ts: i64, caps: Vec<u64>)]
pub struct InitializeMonthlySchedule<'info> {
    #[account(seeds = [SALE_CONFIG_SEED], bump)]
    pub sale_config: Account<'info, SaleConfig>,

    #[account(
        init,
        payer = authority,
        space = ReleaseSchedule::space(caps.len()),
        seeds = [RELEASE_SCHEDULE_SEED],
        bump
    )]
    pub release_schedule: Account<'info, ReleaseSchedule>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct ScheduleInitialized {
    pub boundaries: Vec<i64>,
    pub caps: Vec<u64>,
    pub schedule_hash: [u8; 32],
}
