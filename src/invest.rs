use chrono::{Datelike, NaiveDate};

use crate::error::{Result, SpendError};
use crate::models::{round2, Transaction};

pub const ALLOWED_LIMITS: [u32; 3] = [10, 50, 100];

/// Round `amount` up to the nearest multiple of `limit`.
pub fn round_up(amount: f64, limit: u32) -> f64 {
    let limit = f64::from(limit);
    (amount / limit).ceil() * limit
}

/// Parse a `YYYY-MM` month into (year, month).
pub fn parse_month(month: &str) -> Result<(i32, u32)> {
    NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
        .ok()
        .filter(|_| month.trim().len() == 7)
        .map(|d| (d.year(), d.month()))
        .ok_or_else(|| SpendError::InvalidMonth(month.to_string()))
}

/// Check the month and limit up front; returns the parsed (year, month).
pub fn validate_request(month: &str, limit: u32) -> Result<(i32, u32)> {
    let parsed = parse_month(month)?;
    if !ALLOWED_LIMITS.contains(&limit) {
        return Err(SpendError::InvalidLimit(limit));
    }
    Ok(parsed)
}

/// How much a round-up piggy bank would have collected over `month`:
/// each operation amount is rounded up to `limit` and the difference saved.
pub fn investment_bank(month: &str, transactions: &[Transaction], limit: u32) -> Result<f64> {
    let (year, month_num) = validate_request(month, limit)?;

    let saved: f64 = transactions
        .iter()
        .filter(|t| t.date.year() == year && t.date.month() == month_num)
        .map(|t| round_up(t.operation_amount, limit) - t.operation_amount)
        .sum();
    let saved = round2(saved);
    tracing::info!(month, limit, saved, "investment bank calculated");
    Ok(saved)
}
