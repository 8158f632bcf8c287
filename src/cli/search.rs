use crate::cli::text::format_transactions;
use crate::cli::{Context, OutputFormat};
use crate::error::Result;
use crate::models::Transaction;
use crate::search;

fn print_found(ctx: &Context, found: &[&Transaction]) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => println!("{}", search::to_json(found)?),
        OutputFormat::Table => println!("{}", format_transactions(found)),
    }
    Ok(())
}

pub fn simple(ctx: &Context, query: &str) -> Result<()> {
    let txns = ctx.load()?;
    print_found(ctx, &search::simple_search(query, &txns))
}

pub fn phones(ctx: &Context) -> Result<()> {
    let txns = ctx.load()?;
    print_found(ctx, &search::phone_search(&txns))
}

pub fn transfers(ctx: &Context) -> Result<()> {
    let txns = ctx.load()?;
    print_found(ctx, &search::person_transfer_search(&txns))
}
