//! Derived operational summaries consumed by dashboard views.
//!
//! Everything here is computed on demand from the live collections and never
//! stored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::*;

/// Items with a balance below this are flagged as low stock
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// How many of the largest balances the stock overview carries
const TOP_ITEMS: usize = 5;

/// Entry/exit quantity totals for one operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorTotals {
    pub user_id: String,
    pub total_in: i64,
    pub total_out: i64,
}

/// Aggregate ledger quantities per operator, ordered by username
pub fn operator_summary(ledger: &[MovementRecord]) -> Vec<OperatorTotals> {
    let mut totals: BTreeMap<String, (i64, i64)> = BTreeMap::new();
    for record in ledger {
        let entry = totals.entry(record.user_id.clone()).or_default();
        match record.kind {
            MovementKind::Entrada => entry.0 += record.quantity,
            MovementKind::Saida => entry.1 += record.quantity,
        }
    }
    totals
        .into_iter()
        .map(|(user_id, (total_in, total_out))| OperatorTotals {
            user_id,
            total_in,
            total_out,
        })
        .collect()
}

/// Snapshot of the stock shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockOverview {
    pub item_count: usize,
    pub total_quantity: i64,
    /// Items below [`LOW_STOCK_THRESHOLD`]
    pub low_stock: usize,
    /// Largest balances first, material name and quantity
    pub top_items: Vec<(String, i64)>,
}

pub fn stock_overview(inventory: &[StockItem]) -> StockOverview {
    let mut by_quantity: Vec<&StockItem> = inventory.iter().collect();
    by_quantity.sort_by(|a, b| b.quantity.cmp(&a.quantity));

    StockOverview {
        item_count: inventory.len(),
        total_quantity: inventory.iter().map(|item| item.quantity).sum(),
        low_stock: inventory
            .iter()
            .filter(|item| item.quantity < LOW_STOCK_THRESHOLD)
            .count(),
        top_items: by_quantity
            .into_iter()
            .take(TOP_ITEMS)
            .map(|item| (item.material.clone(), item.quantity))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_summary_splits_directions() {
        let ledger = vec![
            MovementRecord::new(None, "ITALO", MovementKind::Entrada, "CIMENTO", "S/N", 50, None),
            MovementRecord::new(None, "ITALO", MovementKind::Saida, "CIMENTO", "S/N", 20, None),
            MovementRecord::new(None, "ADM", MovementKind::Entrada, "AREIA", "S/N", 5, None),
        ];

        let summary = operator_summary(&ledger);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].user_id, "ADM");
        assert_eq!(summary[1].user_id, "ITALO");
        assert_eq!(summary[1].total_in, 50);
        assert_eq!(summary[1].total_out, 20);
    }

    #[test]
    fn overview_counts_low_stock_and_ranks_items() {
        let inventory = vec![
            StockItem::new("S/N", "CIMENTO", 50, "SACO", Category::MaterialDeServico),
            StockItem::new("S/N", "AREIA", 3, "M3", Category::MaterialDeServico),
            StockItem::new("S/N", "BRITA", 9, "M3", Category::MaterialDeServico),
        ];

        let overview = stock_overview(&inventory);
        assert_eq!(overview.item_count, 3);
        assert_eq!(overview.total_quantity, 62);
        assert_eq!(overview.low_stock, 2);
        assert_eq!(overview.top_items[0], ("CIMENTO".to_string(), 50));
    }
}
