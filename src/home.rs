use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;

use crate::cards::{card_summaries, top_transactions, CardSummary, TopTransaction};
use crate::error::Result;
use crate::greeting::greeting;
use crate::market::{CurrencyRate, MarketData, StockPrice};
use crate::models::Transaction;
use crate::reports::{in_window, DateWindow};
use crate::settings::Settings;

pub const HOME_TOP_LIMIT: usize = 5;

/// Month-to-date overview shown by `spendlens home`.
#[derive(Debug, Serialize)]
pub struct HomePage {
    pub greeting: &'static str,
    pub cards: Vec<CardSummary>,
    pub top_transactions: Vec<TopTransaction>,
    pub currency_rates: Vec<CurrencyRate>,
    pub stock_prices: Vec<StockPrice>,
}

/// From the first of `at`'s month through `at`'s date, inclusive.
pub fn month_to_date(at: NaiveDateTime) -> DateWindow {
    let to = at.date();
    DateWindow {
        from: to.with_day(1).unwrap_or(to),
        to,
    }
}

pub fn home_page(
    at: NaiveDateTime,
    transactions: &[Transaction],
    settings: &Settings,
    market: &dyn MarketData,
) -> Result<HomePage> {
    let window = month_to_date(at);
    let current: Vec<Transaction> = transactions
        .iter()
        .filter(in_window(window))
        .cloned()
        .collect();
    tracing::debug!(from = %window.from, to = %window.to, rows = current.len(), "home page window");

    Ok(HomePage {
        greeting: greeting(at),
        cards: card_summaries(&current),
        top_transactions: top_transactions(&current, HOME_TOP_LIMIT),
        currency_rates: market.currency_rates(&settings.currencies)?,
        stock_prices: market.stock_prices(&settings.stocks)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::txn;

    struct FixedMarket;

    impl MarketData for FixedMarket {
        fn currency_rates(&self, currencies: &[String]) -> Result<Vec<CurrencyRate>> {
            Ok(currencies
                .iter()
                .map(|c| CurrencyRate { currency: c.clone(), rate: 90.0 })
                .collect())
        }

        fn stock_prices(&self, stocks: &[String]) -> Result<Vec<StockPrice>> {
            Ok(stocks
                .iter()
                .map(|s| StockPrice { stock: s.clone(), price: 100.0 })
                .collect())
        }
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_month_to_date() {
        let w = month_to_date(at("2023-12-15 15:30:00"));
        assert_eq!(w.from.to_string(), "2023-12-01");
        assert_eq!(w.to.to_string(), "2023-12-15");
    }

    #[test]
    fn test_home_page_uses_month_to_date_records() {
        let mut on_card = txn("2023-12-03", -300.0, "Еда", "in range");
        on_card.card_number = Some("*7197".into());
        on_card.cashback = 3.0;
        let txns = vec![
            txn("2023-11-30", -5000.0, "Еда", "last month"),
            on_card,
            txn("2023-12-15", -10.0, "Еда", "today"),
            txn("2023-12-16", -9000.0, "Еда", "tomorrow"),
        ];
        let settings = Settings::default();
        let page = home_page(at("2023-12-15 15:30:00"), &txns, &settings, &FixedMarket).unwrap();

        assert_eq!(page.greeting, "Добрый день");
        assert_eq!(page.cards.len(), 1);
        assert_eq!(page.cards[0].total_spent, -300.0);
        let top: Vec<&str> = page.top_transactions.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(top, vec!["in range", "today"]);
        assert_eq!(page.currency_rates.len(), settings.currencies.len());
        assert_eq!(page.stock_prices.len(), settings.stocks.len());
    }
}
