use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cards::{CardSummary, TopTransaction};
use crate::fmt::format_money;
use crate::home::HomePage;
use crate::market::{CurrencyRate, StockPrice};
use crate::models::Transaction;
use crate::reports::{CategoryBreakdown, CategorySpend, ConvertedSpend};

/// Statements are denominated in rubles.
const STATEMENT_CURRENCY: &str = "RUB";

fn money(val: f64) -> String {
    format_money(val, STATEMENT_CURRENCY)
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

pub fn format_spend(data: &CategorySpend) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Category", "From", "To", "Total"]);
    table.add_row(vec![
        Cell::new(data.category.as_deref().unwrap_or("(all)")),
        Cell::new(data.date_from),
        Cell::new(data.date_to),
        Cell::new(money(data.total_spent)),
    ]);
    format!("{}\n{table}", "Spend by category".bold())
}

pub fn format_converted(data: &ConvertedSpend) -> String {
    format!(
        "{}\n{} at {} = {}",
        format_spend(&data.spend),
        money(data.spend.total_spent),
        data.rate,
        format_money(data.total_converted, &data.currency)
    )
}

pub fn format_breakdown(data: &CategoryBreakdown) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Category", "Count", "Total"]);
    for item in &data.categories {
        table.add_row(vec![
            Cell::new(&item.category),
            Cell::new(item.count),
            Cell::new(money(item.total)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(""),
        Cell::new(money(data.total)),
    ]);
    format!(
        "{} {} to {}\n{table}",
        "Category breakdown".bold(),
        data.date_from,
        data.date_to
    )
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

pub fn format_transactions(found: &[&Transaction]) -> String {
    if found.is_empty() {
        return "No matching transactions.".dimmed().to_string();
    }
    let mut table = Table::new();
    table.set_header(vec!["Date", "Card", "Amount", "Category", "Description"]);
    for t in found {
        table.add_row(vec![
            Cell::new(t.date),
            Cell::new(t.card_number.as_deref().unwrap_or("")),
            Cell::new(money(t.payment_amount)),
            Cell::new(&t.category),
            Cell::new(&t.description),
        ]);
    }
    table.to_string()
}

pub fn format_cards(cards: &[CardSummary]) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Card", "Total spent", "Cashback"]);
    for c in cards {
        table.add_row(vec![
            Cell::new(&c.last_digits),
            Cell::new(money(c.total_spent)),
            Cell::new(money(c.cashback)),
        ]);
    }
    table.to_string()
}

pub fn format_top(top: &[TopTransaction]) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Date", "Amount", "Category", "Description"]);
    for t in top {
        let amount = if t.payment_amount < 0.0 {
            money(t.payment_amount).red().to_string()
        } else {
            money(t.payment_amount).green().to_string()
        };
        table.add_row(vec![
            Cell::new(t.date),
            Cell::new(amount),
            Cell::new(&t.category),
            Cell::new(&t.description),
        ]);
    }
    table.to_string()
}

pub fn format_rates(rates: &[CurrencyRate], prices: &[StockPrice]) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Symbol", "Value"]);
    for r in rates {
        table.add_row(vec![Cell::new(&r.currency), Cell::new(money(r.rate))]);
    }
    for p in prices {
        table.add_row(vec![Cell::new(&p.stock), Cell::new(format_money(p.price, "USD"))]);
    }
    format!("{}\n{table}", "Stub quotes, not real market data".yellow())
}

pub fn format_home(page: &HomePage) -> String {
    [
        page.greeting.bold().to_string(),
        "Cards".bold().to_string(),
        format_cards(&page.cards),
        "Top transactions".bold().to_string(),
        format_top(&page.top_transactions),
        format_rates(&page.currency_rates, &page.stock_prices),
    ]
    .join("\n")
}
