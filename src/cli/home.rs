use colored::Colorize;

use crate::cli::text::format_home;
use crate::cli::{emit, Context, OutputFormat};
use crate::error::Result;
use crate::greeting::greeting;
use crate::home::home_page;
use crate::market::StubMarket;

/// Default command: greet according to `--datetime`.
pub fn greet(ctx: &Context) -> Result<()> {
    let phrase = greeting(ctx.at);
    match ctx.format {
        OutputFormat::Json => println!("{phrase}"),
        OutputFormat::Table => println!("{}", phrase.bold()),
    }
    Ok(())
}

pub fn run(ctx: &Context) -> Result<()> {
    let txns = ctx.load()?;
    let page = home_page(ctx.at, &txns, &ctx.settings, &StubMarket)?;
    emit(ctx, &page, || format_home(&page))
}
