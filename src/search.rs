use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::models::Transaction;

pub const TRANSFERS_CATEGORY: &str = "Переводы";

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\+7\s?\d{3}\s?\d{3}[-\s]?\d{2}[-\s]?\d{2}").expect("phone pattern is valid")
});

// "Surname I." with an optional trailing dot
static PERSON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[А-ЯЁ][а-яё]+\s[А-ЯЁ]\.?$").expect("person pattern is valid"));

/// Case-insensitive substring match against description or category.
pub fn simple_search<'a>(query: &str, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
    let q = query.to_lowercase();
    let found: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| {
            t.description.to_lowercase().contains(&q) || t.category.to_lowercase().contains(&q)
        })
        .collect();
    tracing::info!(query, results = found.len(), "simple search");
    found
}

/// Transactions whose description carries a +7 phone number.
pub fn phone_search(transactions: &[Transaction]) -> Vec<&Transaction> {
    let found: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| PHONE_RE.is_match(&t.description))
        .collect();
    tracing::info!(matches = found.len(), "phone search");
    found
}

/// Transfers to private persons: category "Переводы" and a description like "Иван И.".
pub fn person_transfer_search(transactions: &[Transaction]) -> Vec<&Transaction> {
    let found: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.category == TRANSFERS_CATEGORY && PERSON_RE.is_match(t.description.trim()))
        .collect();
    tracing::info!(matches = found.len(), "person transfer search");
    found
}

/// Serialize search results as pretty JSON with non-ASCII text left as is.
pub fn to_json(found: &[&Transaction]) -> Result<String> {
    Ok(serde_json::to_string_pretty(found)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::txn;

    fn fixture() -> Vec<Transaction> {
        vec![
            txn("2023-12-01", -160.89, "Супермаркеты", "Колхоз"),
            txn("2023-12-02", -200.0, "Мобильная связь", "Звонок +7 912 345-67-89"),
            txn("2023-12-03", -200.0, "Мобильная связь", "Звонок 8 912 345 67 89"),
            txn("2023-12-04", -1000.0, "Переводы", "Валерий А."),
            txn("2023-12-05", -1000.0, "Переводы", "  Сергей З "),
            txn("2023-12-06", -1000.0, "Переводы", "Перевод на карту"),
            txn("2023-12-07", -500.0, "Каршеринг", "Валерий А."),
        ]
    }

    #[test]
    fn test_simple_search_is_case_insensitive() {
        let txns = fixture();
        let found = simple_search("супермарк", &txns);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category, "Супермаркеты");
    }

    #[test]
    fn test_simple_search_matches_description() {
        let txns = fixture();
        let found = simple_search("ЗВОНОК", &txns);
        assert_eq!(found.len(), 2);
        assert!(simple_search("нет такого", &txns).is_empty());
    }

    #[test]
    fn test_phone_search() {
        let txns = fixture();
        let found = phone_search(&txns);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].description, "Звонок +7 912 345-67-89");
    }

    #[test]
    fn test_phone_search_compact_number() {
        let txns = vec![txn("2023-12-02", -1.0, "Связь", "МТС +79123456789")];
        assert_eq!(phone_search(&txns).len(), 1);
    }

    #[test]
    fn test_person_transfer_search() {
        let txns = fixture();
        let found = person_transfer_search(&txns);
        let descriptions: Vec<&str> = found.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Валерий А.", "  Сергей З "]);
    }

    #[test]
    fn test_to_json_keeps_cyrillic() {
        let txns = fixture();
        let json = to_json(&simple_search("колхоз", &txns)).unwrap();
        assert!(json.contains("Колхоз"));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
    }
}
