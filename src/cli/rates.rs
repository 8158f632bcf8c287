use serde::Serialize;

use crate::cli::text::format_rates;
use crate::cli::{emit, Context};
use crate::error::Result;
use crate::market::{CurrencyRate, MarketData, StockPrice, StubMarket};

#[derive(Serialize)]
struct Quotes {
    currency_rates: Vec<CurrencyRate>,
    stock_prices: Vec<StockPrice>,
}

pub fn run(ctx: &Context) -> Result<()> {
    let quotes = Quotes {
        currency_rates: StubMarket.currency_rates(&ctx.settings.currencies)?,
        stock_prices: StubMarket.stock_prices(&ctx.settings.stocks)?,
    };
    emit(ctx, &quotes, || {
        format_rates(&quotes.currency_rates, &quotes.stock_prices)
    })
}
