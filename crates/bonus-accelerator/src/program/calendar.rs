//! Calendar-approximate month arithmetic and money rounding shared by the
//! eligibility window and the payout schedule.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

/// Average days per month; month offsets are converted to whole days with it.
pub const AVERAGE_DAYS_PER_MONTH: f64 = 30.4375;

/// Whole days covered by `months` average months, rounded half to even
/// (18 months is 548 days, 24 months is 730).
pub fn months_to_days(months: u32) -> i64 {
    (f64::from(months) * AVERAGE_DAYS_PER_MONTH).round_ties_even() as i64
}

/// `date` advanced by `months` average months. `None` past the calendar range.
pub fn add_average_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::days(months_to_days(months)))
}

/// Last calendar day of the month containing `date`.
///
/// Jumps to the 28th, moves four days forward (always landing in the next
/// month) and walks back by that day-of-month.
pub fn end_of_month(date: NaiveDate) -> Option<NaiveDate> {
    let day_28 = date.checked_add_signed(Duration::days(28 - i64::from(date.day())))?;
    let next_month = day_28.checked_add_signed(Duration::days(4))?;
    next_month.checked_sub_signed(Duration::days(i64::from(next_month.day())))
}

/// Calendar quarter label used to index FX tables, e.g. `2025Q3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuarterKey {
    pub year: i32,
    pub quarter: u32,
}

impl QuarterKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            quarter: (date.month() - 1) / 3 + 1,
        }
    }
}

impl fmt::Display for QuarterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Q{}", self.year, self.quarter)
    }
}

/// Rounds a money amount to cents, half to even, on the exact decimal value
/// of the float. Amounts outside the decimal range come back unchanged.
pub fn round_cents(amount: f64) -> f64 {
    let Some(exact) = Decimal::from_f64_retain(amount) else {
        return amount;
    };
    let cents = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    cents.to_string().parse().unwrap_or(amount)
}

/// Whole-dollar amount with comma thousands separators, e.g. `100,000`.
pub fn format_whole_dollars(amount: f64) -> String {
    let whole = amount.abs().round_ties_even() as u64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0.0 && whole > 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
