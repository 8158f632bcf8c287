use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::error::{Result, SpendError};
use crate::market::CurrencyRate;
use crate::models::{round2, Transaction};

pub const LOOKBACK_DAYS: i64 = 90;

// ---------------------------------------------------------------------------
// Filter stages
// ---------------------------------------------------------------------------

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    /// The `days` days before `end`, inclusive of both edges. Negative or
    /// out-of-calendar spans are rejected.
    pub fn lookback(end: NaiveDate, days: i64) -> Result<Self> {
        let from = (days >= 0)
            .then_some(days)
            .and_then(Duration::try_days)
            .and_then(|span| end.checked_sub_signed(span))
            .ok_or(SpendError::InvalidWindow { end, days })?;
        Ok(Self { from, to: end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

pub fn in_window(window: DateWindow) -> impl Fn(&&Transaction) -> bool {
    move |t| window.contains(t.date)
}

/// Exact category match; `None` lets everything through.
pub fn in_category(category: Option<&str>) -> impl Fn(&&Transaction) -> bool + '_ {
    move |t| category.map_or(true, |c| t.category == c)
}

pub fn sum_payments<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> f64 {
    transactions.into_iter().map(|t| t.payment_amount).sum()
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

// ---------------------------------------------------------------------------
// Spend by category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    pub category: Option<String>,
    pub total_spent: f64,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

/// Sum of payments over the 90 days ending at `end` (today when `None`),
/// restricted to `category` when given.
pub fn spend_by_category(
    transactions: &[Transaction],
    category: Option<&str>,
    end: Option<NaiveDate>,
) -> Result<CategorySpend> {
    let window = DateWindow::lookback(end.unwrap_or_else(today), LOOKBACK_DAYS)?;
    let total = sum_payments(
        transactions
            .iter()
            .filter(in_window(window))
            .filter(in_category(category)),
    );
    let result = CategorySpend {
        category: category.map(str::to_string),
        total_spent: round2(total),
        date_from: window.from,
        date_to: window.to,
    };
    tracing::debug!(?result, "spend by category");
    Ok(result)
}

// ---------------------------------------------------------------------------
// Per-category breakdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub categories: Vec<CategoryTotal>,
    pub total: f64,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

/// Payment totals per category inside `window`, largest outflow first.
pub fn category_breakdown(transactions: &[Transaction], window: DateWindow) -> CategoryBreakdown {
    let mut categories: Vec<CategoryTotal> = Vec::new();
    for t in transactions.iter().filter(in_window(window)) {
        match categories.iter_mut().find(|c| c.category == t.category) {
            Some(c) => {
                c.total += t.payment_amount;
                c.count += 1;
            }
            None => categories.push(CategoryTotal {
                category: t.category.clone(),
                total: t.payment_amount,
                count: 1,
            }),
        }
    }
    let total = round2(categories.iter().map(|c| c.total).sum());
    for c in &mut categories {
        c.total = round2(c.total);
    }
    categories.sort_by(|a, b| a.total.total_cmp(&b.total));

    tracing::debug!(categories = categories.len(), total, "category breakdown");
    CategoryBreakdown {
        categories,
        total,
        date_from: window.from,
        date_to: window.to,
    }
}

// ---------------------------------------------------------------------------
// Currency conversion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertedSpend {
    #[serde(flatten)]
    pub spend: CategorySpend,
    pub currency: String,
    pub rate: f64,
    pub total_converted: f64,
}

/// Express a spend total in another currency. `rate` is the price of one
/// unit of that currency in the statement's currency.
pub fn convert_spend(spend: &CategorySpend, rate: &CurrencyRate) -> Result<ConvertedSpend> {
    if !(rate.rate > 0.0) {
        return Err(SpendError::InvalidRate {
            currency: rate.currency.clone(),
            rate: rate.rate,
        });
    }
    Ok(ConvertedSpend {
        spend: spend.clone(),
        currency: rate.currency.clone(),
        rate: rate.rate,
        total_converted: round2(spend.total_spent / rate.rate),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::txn;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn fixture() -> Vec<Transaction> {
        vec![
            txn("2023-09-16", -1.0, "Супермаркеты", "edge of window"),
            txn("2023-09-15", -1000.0, "Супермаркеты", "too old"),
            txn("2023-10-01", -160.89, "Супермаркеты", "Колхоз"),
            txn("2023-11-20", -250.11, "Супермаркеты", "Магнит"),
            txn("2023-11-21", -3000.0, "Переводы", "Иван И."),
            txn("2023-12-14", 500.0, "Пополнения", "Зарплата"),
            txn("2023-12-15", -99.99, "Супермаркеты", "end day"),
            txn("2023-12-16", -777.0, "Супермаркеты", "after end"),
        ]
    }

    #[test]
    fn test_spend_by_category_matches_direct_sum() {
        let txns = fixture();
        let end = date("2023-12-15");
        let report = spend_by_category(&txns, Some("Супермаркеты"), Some(end)).unwrap();

        let window = DateWindow::lookback(end, 90).unwrap();
        let expected: f64 = txns
            .iter()
            .filter(|t| t.category == "Супермаркеты" && t.date >= window.from && t.date <= window.to)
            .map(|t| t.payment_amount)
            .sum();
        assert_eq!(report.total_spent, round2(expected));
        assert_eq!(report.total_spent, -511.99);
        assert_eq!(report.date_from, date("2023-09-16"));
        assert_eq!(report.date_to, end);
        assert_eq!(report.category.as_deref(), Some("Супермаркеты"));
    }

    #[test]
    fn test_spend_without_category_counts_everything_in_window() {
        let txns = fixture();
        let report = spend_by_category(&txns, None, Some(date("2023-12-15"))).unwrap();
        assert_eq!(report.total_spent, round2(-1.0 - 160.89 - 250.11 - 3000.0 + 500.0 - 99.99));
        assert_eq!(report.category, None);
    }

    #[test]
    fn test_spend_empty_match_is_zero() {
        let txns = fixture();
        let report = spend_by_category(&txns, Some("Такси"), Some(date("2023-12-15"))).unwrap();
        assert_eq!(report.total_spent, 0.0);
    }

    #[test]
    fn test_spend_serializes_flat() {
        let report = spend_by_category(&[], Some("Такси"), Some(date("2023-12-15"))).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["category"], "Такси");
        assert_eq!(json["total_spent"], 0.0);
        assert_eq!(json["date_from"], "2023-09-16");
        assert_eq!(json["date_to"], "2023-12-15");
    }

    #[test]
    fn test_category_breakdown() {
        let txns = fixture();
        let breakdown = category_breakdown(&txns, DateWindow::lookback(date("2023-12-15"), 90).unwrap());
        let names: Vec<&str> = breakdown.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Переводы", "Супермаркеты", "Пополнения"]);
        assert_eq!(breakdown.categories[1].count, 4);
        assert_eq!(breakdown.categories[1].total, -511.99);
        assert_eq!(breakdown.total, round2(-511.99 - 3000.0 + 500.0));
    }

    #[test]
    fn test_convert_spend() {
        let spend = spend_by_category(&fixture(), Some("Переводы"), Some(date("2023-12-15"))).unwrap();
        let rate = CurrencyRate { currency: "USD".into(), rate: 90.0 };
        let converted = convert_spend(&spend, &rate).unwrap();
        assert_eq!(converted.total_converted, round2(-3000.0 / 90.0));
        let json = serde_json::to_value(&converted).unwrap();
        assert_eq!(json["category"], "Переводы");
        assert_eq!(json["currency"], "USD");
    }

    #[test]
    fn test_convert_spend_rejects_non_positive_rate() {
        let spend = spend_by_category(&[], None, Some(date("2023-12-15"))).unwrap();
        let rate = CurrencyRate { currency: "EUR".into(), rate: 0.0 };
        assert!(matches!(
            convert_spend(&spend, &rate).unwrap_err(),
            SpendError::InvalidRate { .. }
        ));
    }

    #[test]
    fn test_lookback_rejects_unrepresentable_windows() {
        let end = date("2023-12-15");
        for days in [-1, 100_000_000, i64::MAX] {
            assert!(matches!(
                DateWindow::lookback(end, days).unwrap_err(),
                SpendError::InvalidWindow { days: d, .. } if d == days
            ));
        }
        assert!(DateWindow::lookback(NaiveDate::MIN, 90).is_err());
        assert!(matches!(
            spend_by_category(&[], None, Some(NaiveDate::MIN)).unwrap_err(),
            SpendError::InvalidWindow { .. }
        ));
    }

    #[test]
    fn test_lookback_zero_days_is_single_day() {
        let end = date("2023-12-15");
        let window = DateWindow::lookback(end, 0).unwrap();
        assert_eq!(window.from, end);
        assert!(window.contains(end));
        assert!(!window.contains(date("2023-12-14")));
    }
}
