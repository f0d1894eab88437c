//! Bulk intake: semi-structured import text reconciled against live stock
//!
//! Each non-blank line runs through an ordered cascade of parse strategies:
//! delimited 4-field, delimited 3-field, trailing-number pattern, then
//! whole-line-as-name. The cascade order is load-bearing; changing it changes
//! which items merge.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::types::*;

/// Trailing-quantity fallback: a name, a separator run, then digits at the
/// end of the line
static TRAILING_QUANTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)[-:;,\s]+(\d+)$").expect("trailing quantity pattern"));

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedLine {
    pub sap: String,
    pub material: String,
    pub quantity: i64,
    pub und: String,
}

/// Leading digit run as a quantity; no digits maps to 0, oversized runs clamp
fn parse_quantity(field: &str) -> i64 {
    let end = field
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(field.len());
    let digits = &field[..end];
    if digits.is_empty() {
        0
    } else {
        digits.parse().unwrap_or(i64::MAX)
    }
}

/// Parse one import line, or `None` when no material name survives.
///
/// Splitting uses the combined delimiter set `;`, tab, `,` for every line;
/// there is no per-line delimiter detection.
pub(crate) fn parse_line(line: &str) -> Option<ParsedLine> {
    let line = line.trim();
    let parts: Vec<&str> = line.split([';', '\t', ',']).map(str::trim).collect();

    let (sap, material, quantity, und) = if parts.len() >= 4 {
        (
            parts[0].to_string(),
            parts[1].to_string(),
            parse_quantity(parts[2]),
            parts[3].to_string(),
        )
    } else if parts.len() == 3 {
        (
            parts[0].to_string(),
            parts[1].to_string(),
            parse_quantity(parts[2]),
            DEFAULT_UNIT.to_string(),
        )
    } else if let Some(caps) = TRAILING_QUANTITY.captures(line) {
        (
            String::new(),
            caps[1].trim().to_string(),
            parse_quantity(&caps[2]),
            DEFAULT_UNIT.to_string(),
        )
    } else {
        (String::new(), line.to_string(), 1, DEFAULT_UNIT.to_string())
    };

    let material = material.to_uppercase();
    if material.is_empty() {
        return None;
    }

    let sap = if sap.is_empty() {
        SAP_SENTINEL.to_string()
    } else {
        sap.to_uppercase()
    };

    Some(ParsedLine {
        sap,
        material,
        quantity,
        und: und.to_uppercase(),
    })
}

/// Outcome of one bulk import invocation
#[derive(Debug, Clone, PartialEq)]
pub struct BulkImportReport {
    /// Items created fresh under the chosen category
    pub created: usize,
    /// Lines merged into an existing item by SAP code or name
    pub merged: usize,
    /// One `Entrada` ledger entry per parsed line, in input order
    pub records: Vec<MovementRecord>,
}

/// Parse a block of import text and reconcile it against the stock collection.
///
/// A line matches an existing item when its non-sentinel SAP code equals the
/// item's, or when its uppercased name equals the item's name exactly; the
/// linear scan returns on the first hit. Matches add the parsed quantity to
/// the balance, misses create a new item under `category`. The scan runs
/// against the accumulating collection, so later lines see items created by
/// earlier ones. Lines that yield no material are silently skipped.
pub fn import_bulk(
    inventory: &mut Vec<StockItem>,
    text: &str,
    category: Category,
    actor: &Identity,
) -> WarehouseResult<BulkImportReport> {
    if text.trim().is_empty() {
        return Err(WarehouseError::Validation(
            "Import text cannot be empty".to_string(),
        ));
    }

    let mut report = BulkImportReport {
        created: 0,
        merged: 0,
        records: Vec::new(),
    };

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let Some(parsed) = parse_line(line) else {
            continue;
        };

        match find_existing(inventory, &parsed) {
            Some(idx) => {
                inventory[idx].receive(parsed.quantity);
                report.merged += 1;
            }
            None => {
                inventory.push(StockItem::new(
                    parsed.sap.clone(),
                    parsed.material.clone(),
                    parsed.quantity,
                    parsed.und.clone(),
                    category,
                ));
                report.created += 1;
            }
        }

        report.records.push(MovementRecord::new(
            None,
            &actor.username,
            MovementKind::Entrada,
            &parsed.material,
            &parsed.sap,
            parsed.quantity,
            None,
        ));
    }

    debug!(
        created = report.created,
        merged = report.merged,
        user = %actor.username,
        "bulk import reconciled"
    );
    Ok(report)
}

fn find_existing(inventory: &[StockItem], parsed: &ParsedLine) -> Option<usize> {
    inventory.iter().position(|item| {
        (parsed.sap != SAP_SENTINEL && item.sap == parsed.sap) || item.material == parsed.material
    })
}
