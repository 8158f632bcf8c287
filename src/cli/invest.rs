use serde::Serialize;

use crate::cli::{emit, Context};
use crate::error::Result;
use crate::fmt::format_money;
use crate::invest::{investment_bank, validate_request};

#[derive(Serialize)]
struct InvestmentResult<'a> {
    month: &'a str,
    limit: u32,
    saved: f64,
}

pub fn run(ctx: &Context, month: &str, limit: u32) -> Result<()> {
    validate_request(month, limit)?;
    let txns = ctx.load()?;
    let saved = investment_bank(month, &txns, limit)?;
    let result = InvestmentResult { month, limit, saved };
    emit(ctx, &result, || {
        format!(
            "Round-up to {limit} in {month} would have saved {}",
            format_money(saved, "RUB")
        )
    })
}
