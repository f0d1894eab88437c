//! Basic warehouse workflow example

use almox_core::utils::MemoryStore;
use almox_core::{BasketPick, Category, Direction, Warehouse};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("📦 Almox Core - Basic Warehouse Example\n");

    // Create a warehouse session with in-memory storage
    let mut warehouse = Warehouse::new(MemoryStore::new());

    // 1. Log in as the root operator
    let actor = warehouse.login("ADM", "2000")?;
    println!("🔑 Logged in as {} ({:?})\n", actor.username, actor.role);

    // 2. Bulk import a delivery
    println!("📥 Importing delivery...");
    let report = warehouse
        .import_bulk(
            "102934;CIMENTO CP-II;50;SACO\n\
             88001;AREIA LAVADA;12;M3\n\
             Capacete aba total - 20",
            Category::MaterialDeServico,
            &actor,
        )
        .await?;
    println!(
        "  ✓ {} items created, {} merged, {} ledger entries\n",
        report.created,
        report.merged,
        report.records.len()
    );

    for item in warehouse.inventory() {
        println!(
            "  {} | {} | {} {}",
            item.sap, item.material, item.quantity, item.und
        );
    }
    println!();

    // 3. Hand material out as one lot
    println!("🚚 Applying exit batch...");
    let picks: Vec<BasketPick> = warehouse
        .inventory()
        .iter()
        .take(2)
        .map(|item| BasketPick::new(item.id.clone(), 5))
        .collect();

    let outcome = warehouse
        .move_materials(&picks, Direction::Exit, Some("EQUIPE NORTE"), &actor)
        .await?;
    println!("  ✓ Lot {} recorded\n", outcome.batch_id);

    // 4. Open the resulting receipt
    let receipt = warehouse
        .receipt(&outcome.batch_id)
        .expect("receipt for the lot just applied");
    println!("🧾 Receipt #{}", receipt.group_key);
    println!("  Recipient: {}", receipt.recipient);
    println!("  Issued by: {}", receipt.user_id);
    for item in &receipt.items {
        println!("  {} x {}", item.quantity, item.material);
    }
    println!("  Total: {} items\n", receipt.total_quantity());

    // 5. Operator summary
    println!("📊 Operator summary:");
    for totals in warehouse.operator_summary() {
        println!(
            "  {}: +{} / -{}",
            totals.user_id, totals.total_in, totals.total_out
        );
    }

    Ok(())
}
