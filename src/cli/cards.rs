use crate::cards::{card_summaries, top_transactions};
use crate::cli::text::{format_cards, format_top};
use crate::cli::{emit, Context};
use crate::error::Result;

pub fn summaries(ctx: &Context) -> Result<()> {
    let txns = ctx.load()?;
    let cards = card_summaries(&txns);
    emit(ctx, &cards, || format_cards(&cards))
}

pub fn top(ctx: &Context, limit: usize) -> Result<()> {
    let txns = ctx.load()?;
    let top = top_transactions(&txns, limit);
    emit(ctx, &top, || format_top(&top))
}
