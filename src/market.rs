use rand::Rng;
use serde::Serialize;

use crate::error::Result;
use crate::models::round2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyRate {
    pub currency: String,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockPrice {
    pub stock: String,
    pub price: f64,
}

/// Source of exchange rates and share prices.
pub trait MarketData {
    fn currency_rates(&self, currencies: &[String]) -> Result<Vec<CurrencyRate>>;
    fn stock_prices(&self, stocks: &[String]) -> Result<Vec<StockPrice>>;
}

/// Offline stand-in that invents prices. Values are random and must not be
/// treated as real quotes.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubMarket;

const STUB_RANGE: std::ops::Range<f64> = 50.0..500.0;

fn dummy_price(rng: &mut impl Rng) -> f64 {
    round2(rng.gen_range(STUB_RANGE))
}

impl MarketData for StubMarket {
    fn currency_rates(&self, currencies: &[String]) -> Result<Vec<CurrencyRate>> {
        let mut rng = rand::thread_rng();
        let rates = currencies
            .iter()
            .map(|c| CurrencyRate {
                currency: c.clone(),
                rate: dummy_price(&mut rng),
            })
            .collect();
        tracing::info!(?currencies, "stub currency rates generated");
        Ok(rates)
    }

    fn stock_prices(&self, stocks: &[String]) -> Result<Vec<StockPrice>> {
        let mut rng = rand::thread_rng();
        let prices = stocks
            .iter()
            .map(|s| StockPrice {
                stock: s.clone(),
                price: dummy_price(&mut rng),
            })
            .collect();
        tracing::info!(?stocks, "stub stock prices generated");
        Ok(prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_stub_rates_follow_requested_order() {
        let rates = StubMarket.currency_rates(&symbols(&["USD", "EUR"])).unwrap();
        let names: Vec<&str> = rates.iter().map(|r| r.currency.as_str()).collect();
        assert_eq!(names, vec!["USD", "EUR"]);
        for r in &rates {
            assert!((50.0..=500.0).contains(&r.rate), "{}", r.rate);
        }
    }

    #[test]
    fn test_stub_prices_in_range() {
        let prices = StubMarket.stock_prices(&symbols(&["AAPL", "TSLA", "MSFT"])).unwrap();
        assert_eq!(prices.len(), 3);
        for p in &prices {
            assert!((50.0..=500.0).contains(&p.price), "{}", p.price);
            assert_eq!(round2(p.price), p.price);
        }
    }

    #[test]
    fn test_empty_request() {
        assert!(StubMarket.currency_rates(&[]).unwrap().is_empty());
    }
}
