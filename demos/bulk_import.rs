//! Bulk import parse cascade example
//!
//! Shows how the same import form accepts spreadsheet pastes, loose notes,
//! and bare item names.

use almox_core::utils::MemoryStore;
use almox_core::{Category, Warehouse};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("📥 Almox Core - Bulk Import Example\n");

    let mut warehouse = Warehouse::new(MemoryStore::new());
    let actor = warehouse.login("ADM", "2000")?;

    let text = "\
102934;CIMENTO CP-II;50;SACO
88001\tLUVA NITRÍLICA\t24\tPAR
77002,CAPACETE ABA TOTAL,10
Parafuso sextavado - 200
Trena 5m: 3
Vassoura de aço";

    println!("Import text:\n---\n{text}\n---\n");

    let report = warehouse
        .import_bulk(text, Category::Epi, &actor)
        .await?;

    println!(
        "Processed: {} created, {} merged\n",
        report.created, report.merged
    );
    println!("Resulting stock:");
    for item in warehouse.inventory() {
        println!(
            "  [{}] {:<24} {:>6} {}",
            item.sap, item.material, item.quantity, item.und
        );
    }

    println!("\nLedger entries (newest first):");
    for record in warehouse.ledger() {
        println!(
            "  {} {} {:<24} {:>6}",
            record.date, record.kind, record.material, record.quantity
        );
    }

    // importing the same sheet again merges every line
    let report = warehouse.import_bulk(text, Category::Epi, &actor).await?;
    println!(
        "\nRe-import: {} created, {} merged",
        report.created, report.merged
    );

    Ok(())
}
