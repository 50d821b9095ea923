//! UTC calendar-month boundaries for monthly release schedules.
//! - boundary_k = start date/time + k calendar months
//! - day-of-month is clamped to the last valid day of the target month
//! - each boundary is derived from `start`, never from the previous boundary,
//!   so clamping in a short month does not drift later boundaries

use crate::constants::{MAX_PERIODS, SECONDS_PER_DAY};
use crate::error::{SaleError, SaleResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CivilTime {
    year: i64,
    month: u32, // 1-12
    day: u32,   // 1-31
    secs: i64,  // [0, 86399]
}

/// `count` boundaries, one calendar month apart, starting at `start_ts`.
pub fn monthly_boundaries(start_ts: i64, count: usize) -> SaleResult<Vec<i64>> {
    if start_ts < 0 || count == 0 || count > MAX_PERIODS {
        return Err(SaleError::InvalidConfig);
    }
    let start = to_civil(start_ts);
    (0..count)
        .map(|k| {
            let k = u32::try_from(k).map_err(|_| SaleError::MathOverflow)?;
            add_months(start, k)
        })
        .collect()
}

fn add_months(start: CivilTime, months: u32) -> SaleResult<i64> {
    let zero_based = start
        .year
        .checked_mul(12)
        .and_then(|m| m.checked_add(i64::from(start.month) - 1 + i64::from(months)))
        .ok_or(SaleError::MathOverflow)?;
    let year = zero_based.div_euclid(12);
    let month = zero_based.rem_euclid(12) as u32 + 1;
    let day = start.day.min(days_in_month(year, month));
    from_civil(CivilTime {
        year,
        month,
        day,
        secs: start.secs,
    })
}

fn days_in_month(year: i64, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn to_civil(ts: i64) -> CivilTime {
    let (year, month, day) = civil_from_days(ts.div_euclid(SECONDS_PER_DAY));
    CivilTime {
        year,
        month,
        day,
        secs: ts.rem_euclid(SECONDS_PER_DAY),
    }
}

fn from_civil(t: CivilTime) -> SaleResult<i64> {
    days_from_civil(t.year, t.month, t.day)
        .checked_mul(SECONDS_PER_DAY)
        .and_then(|s| s.checked_add(t.secs))
        .ok_or(SaleError::MathOverflow)
}

// Proleptic Gregorian day counting over 400-year eras (146_097 days each),
// with the year shifted to start in March so the leap day falls last.

fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let year_of_era = y.rem_euclid(400);
    let shifted_month = i64::from((month + 9) % 12);
    let day_of_year = (153 * shifted_month + 2) / 5 + i64::from(day) - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let day_of_era = z.rem_euclid(146_097);
    let year_of_era =
        (day_of_era - day_of_era / 1_460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = (day_of_year - (153 * shifted_month + 2) / 5 + 1) as u32;
    let month = ((shifted_month + 2) % 12 + 1) as u32;
    let year = year_of_era + era * 400 + i64::from(month <= 2);
    (year, month, day)
}
