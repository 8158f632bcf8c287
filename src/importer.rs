use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{Result, SpendError};
use crate::models::Transaction;

// ---------------------------------------------------------------------------
// Cell parsing helpers
// ---------------------------------------------------------------------------

/// Parse a statement amount. Accepts `-1 234,56` (comma decimal, as in
/// Russian bank exports), `-1,234.56`, `1,234`, `$1,234.56` and `(500.00)`.
/// Without a dot, commas followed by exactly three digits are thousands
/// separators. Non-finite values (`nan`, `inf`) are rejected.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let s: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '"' | '$' | '₽' | '\u{a0}'))
        .collect();
    if s.is_empty() {
        return None;
    }
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return parse_amount(inner).map(|v| -v);
    }
    let normalized = if s.contains('.') || is_thousands_grouped(&s) {
        s.replace(',', "")
    } else {
        s.replace(',', ".")
    };
    normalized.parse().ok().filter(|v: &f64| v.is_finite())
}

fn is_thousands_grouped(s: &str) -> bool {
    let mut groups = s.split(',');
    s.contains(',')
        && groups.next().is_some_and(|lead| !lead.trim_start_matches(['-', '+']).is_empty())
        && groups.all(|g| g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit()))
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y"];

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(d);
        }
    }
    None
}

pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug)
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_signed(chrono::Duration::days(serial.trunc() as i64))
}

/// Spreadsheet cell, reduced to what the column mapping needs.
#[derive(Debug, Clone, PartialEq)]
enum RawCell {
    Empty,
    Text(String),
    Number(f64),
}

impl RawCell {
    fn from_text(s: &str) -> Self {
        if s.trim().is_empty() {
            Self::Empty
        } else {
            Self::Text(s.to_string())
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Text(s) => parse_date(s),
            Self::Number(n) => excel_serial_to_date(*n),
            Self::Empty => None,
        }
    }

    fn as_amount(&self) -> Option<f64> {
        match self {
            Self::Text(s) => parse_amount(s),
            Self::Number(n) => Some(*n).filter(|v| v.is_finite()),
            Self::Empty => None,
        }
    }

    fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.trim().to_string(),
            // Card numbers and the like come back as floats from XLSX
            Self::Number(n) if n.fract() == 0.0 => format!("{}", *n as i64),
            Self::Number(n) => n.to_string(),
            Self::Empty => String::new(),
        }
    }
}

#[cfg(feature = "xlsx")]
impl From<&calamine::Data> for RawCell {
    fn from(cell: &calamine::Data) -> Self {
        use calamine::Data;
        match cell {
            Data::Empty | Data::Error(_) => Self::Empty,
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Self::from_text(s),
            Data::Float(f) => Self::Number(*f),
            Data::Int(i) => Self::Number(*i as f64),
            Data::Bool(b) => Self::Text(b.to_string()),
            Data::DateTime(dt) => Self::Number(dt.as_f64()),
        }
    }
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

const DATE_HEADERS: &[&str] = &["дата операции", "date"];
const CARD_HEADERS: &[&str] = &["номер карты", "card", "card_number"];
const PAYMENT_HEADERS: &[&str] = &["сумма платежа", "payment_amount"];
const OPERATION_HEADERS: &[&str] = &["сумма операции", "operation_amount"];
const CASHBACK_HEADERS: &[&str] = &["кешбэк", "кэшбэк", "cashback"];
const CATEGORY_HEADERS: &[&str] = &["категория", "category"];
const DESCRIPTION_HEADERS: &[&str] = &["описание", "description"];

#[derive(Debug)]
struct ColumnMap {
    date: usize,
    payment: usize,
    category: usize,
    description: usize,
    operation: Option<usize>,
    card: Option<usize>,
    cashback: Option<usize>,
}

fn find_column(headers: &[String], names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.contains(&h.trim().to_lowercase().as_str()))
}

impl ColumnMap {
    fn from_headers(headers: &[String]) -> Result<Self> {
        let require = |names: &[&str], label: &'static str| {
            find_column(headers, names).ok_or(SpendError::MissingColumn(label))
        };
        Ok(Self {
            date: require(DATE_HEADERS, "Дата операции")?,
            payment: require(PAYMENT_HEADERS, "Сумма платежа")?,
            category: require(CATEGORY_HEADERS, "Категория")?,
            description: require(DESCRIPTION_HEADERS, "Описание")?,
            operation: find_column(headers, OPERATION_HEADERS),
            card: find_column(headers, CARD_HEADERS),
            cashback: find_column(headers, CASHBACK_HEADERS),
        })
    }

    fn transaction(&self, row: &[RawCell]) -> std::result::Result<Transaction, &'static str> {
        let empty = RawCell::Empty;
        let cell = |idx: usize| row.get(idx).unwrap_or(&empty);

        let date = cell(self.date).as_date().ok_or("missing or malformed date")?;
        let payment_amount = cell(self.payment)
            .as_amount()
            .ok_or("missing or malformed payment amount")?;
        let operation_amount = match self.operation.map(cell) {
            Some(c) if !c.is_empty() => c.as_amount().ok_or("malformed operation amount")?,
            _ => payment_amount,
        };
        let cashback = match self.cashback.map(cell) {
            Some(c) if !c.is_empty() => c.as_amount().ok_or("malformed cashback")?,
            _ => 0.0,
        };
        let card_number = self
            .card
            .map(|idx| cell(idx).as_text())
            .filter(|s| !s.is_empty());

        Ok(Transaction {
            date,
            payment_amount,
            operation_amount,
            category: cell(self.category).as_text(),
            description: cell(self.description).as_text(),
            card_number,
            cashback,
        })
    }
}

// ---------------------------------------------------------------------------
// load_transactions
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct LoadResult {
    pub transactions: Vec<Transaction>,
    /// Rows dropped because of a missing or malformed date or amount.
    pub skipped: usize,
}

pub fn load_transactions(path: &Path) -> Result<LoadResult> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    let result = match ext.as_str() {
        "csv" => parse_csv(path)?,
        #[cfg(feature = "xlsx")]
        "xlsx" | "xlsm" | "xls" | "ods" => parse_workbook(path)?,
        _ => return Err(SpendError::UnknownFormat(path.display().to_string())),
    };
    tracing::info!(
        path = %path.display(),
        loaded = result.transactions.len(),
        skipped = result.skipped,
        "loaded transactions"
    );
    Ok(result)
}

fn build_transactions<I>(headers: &[String], rows: I) -> Result<LoadResult>
where
    I: IntoIterator<Item = Vec<RawCell>>,
{
    let columns = ColumnMap::from_headers(headers)?;
    let mut result = LoadResult::default();
    for (idx, row) in rows.into_iter().enumerate() {
        if row.iter().all(RawCell::is_empty) {
            continue;
        }
        match columns.transaction(&row) {
            Ok(t) => result.transactions.push(t),
            Err(reason) => {
                // +2: one for the header, one for 1-based spreadsheet rows
                tracing::warn!(row = idx + 2, reason, "skipping row");
                result.skipped += 1;
            }
        }
    }
    Ok(result)
}

fn parse_csv(path: &Path) -> Result<LoadResult> {
    let content = std::fs::read_to_string(path)?;
    let content = content.trim_start_matches('\u{feff}');
    let first_line = content.lines().next().unwrap_or("");
    let delimiter = if first_line.contains(';') { b';' } else { b',' };

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(RawCell::from_text).collect());
    }
    build_transactions(&headers, rows)
}

#[cfg(feature = "xlsx")]
fn parse_workbook(path: &Path) -> Result<LoadResult> {
    use calamine::Reader;

    let mut workbook = calamine::open_workbook_auto(path)?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| SpendError::Other(format!("{} has no sheets", path.display())))?;
    let range = workbook.worksheet_range(&sheet)?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(LoadResult::default());
    };
    let headers: Vec<String> = header_row.iter().map(|c| c.to_string()).collect();
    build_transactions(
        &headers,
        rows.map(|r| r.iter().map(RawCell::from).collect::<Vec<_>>()),
    )
}
