pub mod cards;
pub mod home;
pub mod invest;
pub mod rates;
pub mod report;
pub mod search;
pub mod text;

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::error::{Result, SpendError};
use crate::importer::load_transactions;
use crate::models::Transaction;
use crate::persist::ReportDir;
use crate::settings::{load_settings, Settings};

pub const DEFAULT_DATETIME: &str = "2023-12-15 15:30:00";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Parser)]
#[command(
    name = "spendlens",
    about = "Spend reports, savings round-ups and search over bank-statement spreadsheets."
)]
pub struct Cli {
    /// Moment to report for: 'YYYY-MM-DD HH:MM:SS'
    #[arg(long, global = true, default_value = DEFAULT_DATETIME)]
    pub datetime: String,
    /// Path to the statement spreadsheet (default: <data_dir>/operations.xlsx)
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,
    /// Settings file (default: ~/.config/spendlens/settings.json)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,
    /// Where persisted reports go (default: reports_dir from settings)
    #[arg(long = "reports-dir", global = true)]
    pub reports_dir: Option<PathBuf>,
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Month-to-date overview: greeting, cards, top transactions, rates.
    Home,
    /// Spending over the 90 days up to a date, optionally for one category.
    Spend {
        /// Category to total, e.g. 'Супермаркеты'
        #[arg(long)]
        category: Option<String>,
        /// End of the window: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Also express the total in this currency (stub rate)
        #[arg(long)]
        currency: Option<String>,
        /// Write the report here instead of a timestamped file
        #[arg(long)]
        output: Option<PathBuf>,
        /// Print only, do not persist
        #[arg(long = "no-save")]
        no_save: bool,
    },
    /// Per-category totals over a window.
    Breakdown {
        /// End of the window: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Window length in days
        #[arg(long, default_value = "90")]
        days: i64,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long = "no-save")]
        no_save: bool,
    },
    /// What a round-up piggy bank would have saved in a month.
    Invest {
        /// Month: YYYY-MM
        #[arg(long)]
        month: String,
        /// Round-up step: 10, 50 or 100
        #[arg(long)]
        limit: u32,
    },
    /// Case-insensitive search over descriptions and categories.
    Search {
        query: String,
    },
    /// Transactions mentioning a +7 phone number.
    Phones,
    /// Transfers to private persons.
    Transfers,
    /// Spending and cashback per card.
    Cards,
    /// Largest transactions by absolute amount.
    Top {
        #[arg(short = 'n', long, default_value = "5")]
        limit: usize,
    },
    /// Stub currency rates and stock prices for the configured symbols.
    Rates,
}

/// Everything a command needs, resolved once from global flags and settings.
pub struct Context {
    pub settings: Settings,
    pub file: PathBuf,
    pub at: NaiveDateTime,
    pub format: OutputFormat,
    pub reports_dir: PathBuf,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let settings = load_settings(cli.settings.as_deref())?;
        let at = NaiveDateTime::parse_from_str(cli.datetime.trim(), DATETIME_FORMAT)
            .map_err(|_| SpendError::InvalidDate(cli.datetime.clone()))?;
        let file = cli
            .file
            .clone()
            .unwrap_or_else(|| settings.default_input_file());
        let reports_dir = cli
            .reports_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&settings.reports_dir));
        Ok(Self {
            settings,
            file,
            at,
            format: cli.format,
            reports_dir,
        })
    }

    pub fn load(&self) -> Result<Vec<Transaction>> {
        Ok(load_transactions(&self.file)?.transactions)
    }

    /// The report directory, created on demand, or `None` when saving is off.
    pub fn report_dir(&self, no_save: bool) -> Result<Option<ReportDir>> {
        if no_save {
            return Ok(None);
        }
        ReportDir::ensure(&self.reports_dir).map(Some)
    }
}

pub(crate) fn parse_date_opt(date: Option<&str>) -> Result<Option<NaiveDate>> {
    date.map(|d| {
        NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d")
            .map_err(|_| SpendError::InvalidDate(d.to_string()))
    })
    .transpose()
}

/// Print `value` as JSON, or the table rendering when asked for one.
pub(crate) fn emit<T: Serialize + ?Sized>(
    ctx: &Context,
    value: &T,
    table: impl FnOnce() -> String,
) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Table => println!("{}", table()),
    }
    Ok(())
}
