use chrono::NaiveDate;
use serde::Serialize;

/// One bank-statement row as loaded from the spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub date: NaiveDate,
    /// Signed; negative is an outflow.
    pub payment_amount: f64,
    /// Amount before cashback.
    pub operation_amount: f64,
    pub category: String,
    pub description: String,
    pub card_number: Option<String>,
    pub cashback: f64,
}

/// Round to cents the way the reports present totals.
pub fn round2(val: f64) -> f64 {
    (val * 100.0).round() / 100.0
}

#[cfg(test)]
pub(crate) fn txn(date: &str, payment: f64, category: &str, description: &str) -> Transaction {
    Transaction {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        payment_amount: payment,
        operation_amount: payment,
        category: category.to_string(),
        description: description.to_string(),
        card_number: None,
        cashback: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.005 + 0.0001), 1.01);
        assert_eq!(round2(-150.004), -150.0);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_transaction_serializes_with_iso_date() {
        let t = txn("2023-12-05", -101.0, "Супермаркеты", "Пятёрочка");
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["date"], "2023-12-05");
        assert_eq!(json["category"], "Супермаркеты");
        assert!(json["card_number"].is_null());
    }
}
