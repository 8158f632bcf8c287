use std::path::PathBuf;

use crate::cli::text::{format_breakdown, format_converted, format_spend};
use crate::cli::{emit, parse_date_opt, Context};
use crate::error::{Result, SpendError};
use crate::market::{MarketData, StubMarket};
use crate::persist::with_report;
use crate::reports::{self, DateWindow};

pub fn spend(
    ctx: &Context,
    category: Option<String>,
    date: Option<String>,
    currency: Option<String>,
    output: Option<PathBuf>,
    no_save: bool,
) -> Result<()> {
    if !ctx.file.exists() {
        println!("Transactions file not found: {}", ctx.file.display());
        return Ok(());
    }
    let end = parse_date_opt(date.as_deref())?;
    let txns = ctx.load()?;
    let dir = ctx.report_dir(no_save)?;

    let report = with_report(dir.as_ref(), "spend_by_category", output.as_deref(), || {
        reports::spend_by_category(&txns, category.as_deref(), end)
    })?;

    match currency {
        Some(code) => {
            let rate = StubMarket
                .currency_rates(&[code.clone()])?
                .into_iter()
                .next()
                .ok_or_else(|| SpendError::Other(format!("No rate for {code}")))?;
            let converted = reports::convert_spend(&report, &rate)?;
            emit(ctx, &converted, || format_converted(&converted))
        }
        None => emit(ctx, &report, || format_spend(&report)),
    }
}

pub fn breakdown(
    ctx: &Context,
    date: Option<String>,
    days: i64,
    output: Option<PathBuf>,
    no_save: bool,
) -> Result<()> {
    let end = parse_date_opt(date.as_deref())?
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let window = DateWindow::lookback(end, days)?;
    let txns = ctx.load()?;
    let dir = ctx.report_dir(no_save)?;

    let report = with_report(dir.as_ref(), "category_breakdown", output.as_deref(), || {
        Ok(reports::category_breakdown(&txns, window))
    })?;
    emit(ctx, &report, || format_breakdown(&report))
}
