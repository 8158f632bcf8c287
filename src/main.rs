mod cards;
mod cli;
mod error;
mod fmt;
mod greeting;
mod home;
mod importer;
mod invest;
mod logging;
mod market;
mod models;
mod persist;
mod reports;
mod search;
mod settings;

use clap::Parser;

use cli::{Cli, Commands, Context};

fn main() {
    logging::init();
    let cli = Cli::parse();

    let result = Context::from_cli(&cli).and_then(|ctx| match cli.command {
        None => cli::home::greet(&ctx),
        Some(Commands::Home) => cli::home::run(&ctx),
        Some(Commands::Spend {
            category,
            date,
            currency,
            output,
            no_save,
        }) => cli::report::spend(&ctx, category, date, currency, output, no_save),
        Some(Commands::Breakdown {
            date,
            days,
            output,
            no_save,
        }) => cli::report::breakdown(&ctx, date, days, output, no_save),
        Some(Commands::Invest { month, limit }) => cli::invest::run(&ctx, &month, limit),
        Some(Commands::Search { query }) => cli::search::simple(&ctx, &query),
        Some(Commands::Phones) => cli::search::phones(&ctx),
        Some(Commands::Transfers) => cli::search::transfers(&ctx),
        Some(Commands::Cards) => cli::cards::summaries(&ctx),
        Some(Commands::Top { limit }) => cli::cards::top(&ctx, limit),
        Some(Commands::Rates) => cli::rates::run(&ctx),
    });

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
