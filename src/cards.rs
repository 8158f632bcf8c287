use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{round2, Transaction};

// ---------------------------------------------------------------------------
// Per-card totals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardSummary {
    pub last_digits: String,
    pub total_spent: f64,
    pub cashback: f64,
}

/// Sum payments and cashback per card, in order of first appearance.
/// Records without a card number are left out.
pub fn card_summaries(transactions: &[Transaction]) -> Vec<CardSummary> {
    let mut summaries: Vec<CardSummary> = Vec::new();
    for t in transactions {
        let Some(card) = t.card_number.as_deref() else {
            continue;
        };
        match summaries.iter_mut().find(|s| s.last_digits == card) {
            Some(s) => {
                s.total_spent += t.payment_amount;
                s.cashback += t.cashback;
            }
            None => summaries.push(CardSummary {
                last_digits: card.to_string(),
                total_spent: t.payment_amount,
                cashback: t.cashback,
            }),
        }
    }
    for s in &mut summaries {
        s.total_spent = round2(s.total_spent);
        s.cashback = round2(s.cashback);
    }
    tracing::debug!(cards = summaries.len(), "card info calculated");
    summaries
}

// ---------------------------------------------------------------------------
// Top-N
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopTransaction {
    pub date: NaiveDate,
    pub payment_amount: f64,
    pub category: String,
    pub description: String,
}

impl From<&Transaction> for TopTransaction {
    fn from(t: &Transaction) -> Self {
        Self {
            date: t.date,
            payment_amount: t.payment_amount,
            category: t.category.clone(),
            description: t.description.clone(),
        }
    }
}

/// The `limit` records with the largest absolute payment. Ties keep input order.
pub fn top_transactions(transactions: &[Transaction], limit: usize) -> Vec<TopTransaction> {
    let mut ranked: Vec<&Transaction> = transactions.iter().collect();
    ranked.sort_by(|a, b| b.payment_amount.abs().total_cmp(&a.payment_amount.abs()));
    let top: Vec<TopTransaction> = ranked.into_iter().take(limit).map(TopTransaction::from).collect();
    tracing::debug!(limit, found = top.len(), "top transactions selected");
    top
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::txn;

    fn on_card(mut t: Transaction, card: &str, cashback: f64) -> Transaction {
        t.card_number = Some(card.to_string());
        t.cashback = cashback;
        t
    }

    #[test]
    fn test_card_summaries_sum_per_card() {
        let txns = vec![
            on_card(txn("2023-12-01", -100.0, "Еда", "a"), "*7197", 1.0),
            on_card(txn("2023-12-02", -50.0, "Еда", "b"), "*7197", 0.5),
        ];
        let summaries = card_summaries(&txns);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].last_digits, "*7197");
        assert_eq!(summaries[0].total_spent, -150.0);
        assert_eq!(summaries[0].cashback, 1.5);
    }

    #[test]
    fn test_card_summaries_keep_encounter_order_and_skip_cardless() {
        let txns = vec![
            on_card(txn("2023-12-01", -10.0, "A", "a"), "*5091", 0.0),
            txn("2023-12-01", -999.0, "A", "no card"),
            on_card(txn("2023-12-02", -20.0, "A", "b"), "*1112", 0.0),
            on_card(txn("2023-12-03", -0.1, "A", "c"), "*5091", 0.0),
            on_card(txn("2023-12-03", -0.2, "A", "d"), "*5091", 0.0),
        ];
        let summaries = card_summaries(&txns);
        let cards: Vec<&str> = summaries.iter().map(|s| s.last_digits.as_str()).collect();
        assert_eq!(cards, vec!["*5091", "*1112"]);
        assert_eq!(summaries[0].total_spent, -10.3);
    }

    #[test]
    fn test_top_transactions_by_absolute_amount() {
        let txns = vec![
            txn("2023-12-01", -10.0, "A", "small"),
            txn("2023-12-02", 500.0, "B", "refund"),
            txn("2023-12-03", -700.0, "C", "rent"),
            txn("2023-12-04", -500.0, "D", "tie"),
        ];
        let top = top_transactions(&txns, 3);
        let descriptions: Vec<&str> = top.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, vec!["rent", "refund", "tie"]);
    }

    #[test]
    fn test_top_transactions_limit_larger_than_input() {
        let txns = vec![txn("2023-12-01", -10.0, "A", "only")];
        assert_eq!(top_transactions(&txns, 5).len(), 1);
        assert!(top_transactions(&[], 5).is_empty());
    }
}
