//! Receipt grouping: fold the flat exit ledger into printable lot documents

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::*;

/// Placeholder shown when an exit was recorded without a recipient
pub const UNINFORMED_RECIPIENT: &str = "NÃO INFORMADO";

/// A grouped exit document reconstructed from the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// The shared batch id, or the record's own id for legacy singletons
    pub group_key: String,
    pub date: String,
    pub recipient: String,
    pub user_id: String,
    /// The grouped records, in creation order
    pub items: Vec<MovementRecord>,
}

impl Receipt {
    /// Total handed-out quantity; always derived from the items so it can
    /// never drift from the constituent records
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

fn group_key(record: &MovementRecord) -> &str {
    record.batch_id.as_deref().unwrap_or(&record.id)
}

fn display_recipient(record: &MovementRecord) -> String {
    record
        .recipient
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .unwrap_or(UNINFORMED_RECIPIENT)
        .to_string()
}

/// Group `Saída` records into receipts, most recent lot first.
///
/// Records sharing a batch id land in one receipt; records without one become
/// singleton receipts keyed by their own id, so legacy single movements never
/// group with anything else. The representative date, recipient, and user
/// come from the first record seen for a key, which is safe because
/// co-batched records are written with identical values.
pub fn group_receipts(ledger: &[MovementRecord]) -> Vec<Receipt> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut receipts: Vec<Receipt> = Vec::new();

    // The ledger is kept newest-first, so walking it in storage order yields
    // the most recent lot first and keeps items in creation order within one.
    for record in ledger {
        if record.kind != MovementKind::Saida {
            continue;
        }
        let key = group_key(record).to_string();
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            receipts.push(Receipt {
                group_key: key.clone(),
                date: record.date.clone(),
                recipient: display_recipient(record),
                user_id: record.user_id.clone(),
                items: Vec::new(),
            });
            receipts.len() - 1
        });
        receipts[slot].items.push(record.clone());
    }

    receipts
}

/// Find one receipt by its group key
pub fn find_receipt(ledger: &[MovementRecord], key: &str) -> Option<Receipt> {
    group_receipts(ledger)
        .into_iter()
        .find(|receipt| receipt.group_key == key)
}

/// Delete every ledger record sharing `key`.
///
/// Group deletion is the only supported granularity; removing a single item
/// from a multi-item receipt is not possible through this path. Deleting
/// history never reverses stock balances. An unknown key is an explicit error
/// and leaves the ledger untouched.
pub fn delete_group(ledger: &mut Vec<MovementRecord>, key: &str) -> WarehouseResult<usize> {
    let before = ledger.len();
    ledger.retain(|record| group_key(record) != key);
    let removed = before - ledger.len();
    if removed == 0 {
        return Err(WarehouseError::ReceiptNotFound(key.to_string()));
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exit(batch_id: Option<&str>, material: &str, quantity: i64, recipient: Option<&str>) -> MovementRecord {
        MovementRecord::new(
            batch_id.map(str::to_string),
            "ADM",
            MovementKind::Saida,
            material,
            "S/N",
            quantity,
            recipient.map(str::to_string),
        )
    }

    fn entry(material: &str, quantity: i64) -> MovementRecord {
        MovementRecord::new(None, "ADM", MovementKind::Entrada, material, "S/N", quantity, None)
    }

    #[test]
    fn entries_are_excluded_from_receipts() {
        let ledger = vec![entry("CIMENTO", 50), exit(None, "AREIA", 5, Some("JOÃO"))];
        let receipts = group_receipts(&ledger);
        assert_eq!(receipts.len(), 1);
        assert_eq!(receipts[0].items[0].material, "AREIA");
    }

    #[test]
    fn batched_exits_collapse_into_one_receipt() {
        let ledger = vec![
            exit(Some("LOTE1"), "CIMENTO", 10, Some("EQUIPE A")),
            exit(Some("LOTE1"), "AREIA", 20, Some("EQUIPE A")),
            exit(Some("LOTE1"), "BRITA", 30, Some("EQUIPE A")),
        ];
        let receipts = group_receipts(&ledger);
        assert_eq!(receipts.len(), 1);
        assert_eq!(receipts[0].items.len(), 3);
        assert_eq!(receipts[0].total_quantity(), 60);
        assert_eq!(receipts[0].recipient, "EQUIPE A");
    }

    #[test]
    fn legacy_records_become_singleton_receipts() {
        let first = exit(None, "CIMENTO", 10, Some("JOÃO"));
        let second = exit(None, "AREIA", 5, None);
        let ledger = vec![first.clone(), second.clone()];

        let receipts = group_receipts(&ledger);
        assert_eq!(receipts.len(), 2);
        assert_eq!(receipts[0].group_key, first.id);
        assert_eq!(receipts[1].group_key, second.id);
        assert_eq!(receipts[1].recipient, UNINFORMED_RECIPIENT);
    }

    #[test]
    fn most_recent_lot_comes_first() {
        // newest-first storage order: LOTE2 was created after LOTE1
        let ledger = vec![
            exit(Some("LOTE2"), "BRITA", 1, Some("B")),
            exit(Some("LOTE1"), "CIMENTO", 1, Some("A")),
        ];
        let receipts = group_receipts(&ledger);
        assert_eq!(receipts[0].group_key, "LOTE2");
        assert_eq!(receipts[1].group_key, "LOTE1");
    }

    #[test]
    fn grouping_is_idempotent() {
        let ledger = vec![
            exit(Some("LOTE1"), "CIMENTO", 10, Some("EQUIPE A")),
            exit(Some("LOTE1"), "AREIA", 20, Some("EQUIPE A")),
            exit(None, "BRITA", 5, None),
        ];
        assert_eq!(group_receipts(&ledger), group_receipts(&ledger));
    }

    #[test]
    fn deleting_a_group_removes_all_its_records_and_nothing_else() {
        let mut ledger = vec![
            exit(Some("LOTE1"), "CIMENTO", 10, Some("A")),
            exit(Some("LOTE1"), "AREIA", 20, Some("A")),
            exit(Some("LOTE2"), "BRITA", 5, Some("B")),
            entry("CIMENTO", 50),
        ];

        let removed = delete_group(&mut ledger, "LOTE1").unwrap();
        assert_eq!(removed, 2);
        assert_eq!(ledger.len(), 2);
        assert!(ledger.iter().all(|r| r.batch_id.as_deref() != Some("LOTE1")));
    }

    #[test]
    fn deleting_an_unknown_group_is_an_error() {
        let mut ledger = vec![exit(Some("LOTE1"), "CIMENTO", 10, Some("A"))];
        let result = delete_group(&mut ledger, "NADA");
        assert!(matches!(result, Err(WarehouseError::ReceiptNotFound(_))));
        assert_eq!(ledger.len(), 1);
    }
}
