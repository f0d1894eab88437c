//! Integration tests for almox-core

use almox_core::utils::MemoryStore;
use almox_core::{
    AccessPolicy, BasketPick, Category, Direction, Identity, MachineStatus, MovementKind,
    RequestStatus, Role, Warehouse, WarehouseError,
};

fn admin() -> Identity {
    Identity::new("ADM", Role::Admin)
}

#[tokio::test]
async fn test_bulk_import_creates_and_merges_stock() {
    let mut warehouse = Warehouse::new(MemoryStore::new());
    let actor = warehouse.login("ADM", "2000").unwrap();

    // four-field line creates a fresh item under the chosen category
    let report = warehouse
        .import_bulk(
            "102934;CIMENTO CP-II;50;SACO",
            Category::MaterialDeServico,
            &actor,
        )
        .await
        .unwrap();

    assert_eq!(report.created, 1);
    assert_eq!(report.merged, 0);
    let item = &warehouse.inventory()[0];
    assert_eq!(item.sap, "102934");
    assert_eq!(item.material, "CIMENTO CP-II");
    assert_eq!(item.quantity, 50);
    assert_eq!(item.und, "SACO");
    assert_eq!(item.category, Category::MaterialDeServico);

    let record = &warehouse.ledger()[0];
    assert_eq!(record.kind, MovementKind::Entrada);
    assert_eq!(record.quantity, 50);
    assert!(record.batch_id.is_none());

    // a later two-field line merges into the same item by exact name
    let report = warehouse
        .import_bulk("CIMENTO CP-II;30", Category::MaterialDeServico, &actor)
        .await
        .unwrap();

    assert_eq!(report.created, 0);
    assert_eq!(report.merged, 1);
    assert_eq!(warehouse.inventory().len(), 1);
    assert_eq!(warehouse.inventory()[0].quantity, 80);
    assert_eq!(warehouse.ledger().len(), 2);
    // new records are prepended, newest first
    assert_eq!(warehouse.ledger()[0].quantity, 30);
}

#[tokio::test]
async fn test_exit_clamps_stock_but_ledger_keeps_requested_quantity() {
    let mut warehouse = Warehouse::new(MemoryStore::new());
    let actor = admin();

    warehouse
        .import_bulk("CIMENTO CP-II - 50", Category::MaterialDeServico, &actor)
        .await
        .unwrap();
    let item_id = warehouse.inventory()[0].id.clone();

    let outcome = warehouse
        .move_materials(
            &[BasketPick::new(item_id, 1000)],
            Direction::Exit,
            Some("JOÃO"),
            &actor,
        )
        .await
        .unwrap();

    assert_eq!(warehouse.inventory()[0].quantity, 0);
    // the ledger is an action log, not a derived balance
    assert_eq!(outcome.records[0].quantity, 1000);

    let receipt = warehouse.receipt(&outcome.batch_id).unwrap();
    assert_eq!(receipt.recipient, "JOÃO");
    assert_eq!(receipt.total_quantity(), 1000);
}

#[tokio::test]
async fn test_three_pick_exit_yields_one_receipt() {
    let mut warehouse = Warehouse::new(MemoryStore::new());
    let actor = admin();

    warehouse
        .import_bulk(
            "1;CIMENTO;100;SACO\n2;AREIA;100;M3\n3;BRITA;100;M3",
            Category::MaterialDeServico,
            &actor,
        )
        .await
        .unwrap();

    let picks: Vec<BasketPick> = warehouse
        .inventory()
        .iter()
        .zip([10, 20, 30])
        .map(|(item, quantity)| BasketPick::new(item.id.clone(), quantity))
        .collect();

    let outcome = warehouse
        .move_materials(&picks, Direction::Exit, Some("EQUIPE B"), &actor)
        .await
        .unwrap();

    assert_eq!(outcome.records.len(), 3);

    let receipts = warehouse.receipts();
    assert_eq!(receipts.len(), 1);
    let receipt = &receipts[0];
    assert_eq!(receipt.group_key, outcome.batch_id);
    assert_eq!(receipt.items.len(), 3);
    assert_eq!(receipt.total_quantity(), 60);
    for item in &receipt.items {
        assert_eq!(item.date, receipt.date);
        assert_eq!(item.recipient.as_deref(), Some("EQUIPE B"));
        assert_eq!(item.user_id, receipt.user_id);
    }

    // grouping is idempotent
    assert_eq!(warehouse.receipts(), warehouse.receipts());
}

#[tokio::test]
async fn test_receipt_deletion_never_reverses_stock() {
    let mut warehouse = Warehouse::new(MemoryStore::new());
    let actor = admin();

    warehouse
        .import_bulk("1;CIMENTO;100;SACO\n2;AREIA;100;M3", Category::Outros, &actor)
        .await
        .unwrap();

    let first_pick = vec![BasketPick::new(warehouse.inventory()[0].id.clone(), 10)];
    let second_pick = vec![BasketPick::new(warehouse.inventory()[1].id.clone(), 5)];

    let first = warehouse
        .move_materials(&first_pick, Direction::Exit, Some("A"), &actor)
        .await
        .unwrap();
    let second = warehouse
        .move_materials(&second_pick, Direction::Exit, Some("B"), &actor)
        .await
        .unwrap();

    let removed = warehouse
        .delete_receipt(&first.batch_id, &actor, "2000")
        .await
        .unwrap();
    assert_eq!(removed, 1);

    // the other receipt and the import entries are untouched
    let receipts = warehouse.receipts();
    assert_eq!(receipts.len(), 1);
    assert_eq!(receipts[0].group_key, second.batch_id);
    assert_eq!(
        warehouse
            .ledger()
            .iter()
            .filter(|r| r.kind == MovementKind::Entrada)
            .count(),
        2
    );
    // deletion is history-only: balances keep the applied exits
    assert_eq!(warehouse.inventory()[0].quantity, 90);
    assert_eq!(warehouse.inventory()[1].quantity, 95);
}

#[tokio::test]
async fn test_exits_never_drive_stock_negative() {
    let mut warehouse = Warehouse::new(MemoryStore::new());
    let actor = admin();

    warehouse
        .import_bulk("FURADEIRA - 7", Category::Outros, &actor)
        .await
        .unwrap();
    let item_id = warehouse.inventory()[0].id.clone();

    for quantity in [3, 5, 200, 1] {
        warehouse
            .move_materials(
                &[BasketPick::new(item_id.clone(), quantity)],
                Direction::Exit,
                Some("EQUIPE A"),
                &actor,
            )
            .await
            .unwrap();
        assert!(warehouse.inventory()[0].quantity >= 0);
    }
    assert_eq!(warehouse.inventory()[0].quantity, 0);
}

#[tokio::test]
async fn test_destructive_operations_require_both_gates() {
    let mut warehouse = Warehouse::new(MemoryStore::new());
    let actor = admin();
    let operator = Identity::new("PEDRO", Role::User);

    warehouse
        .import_bulk("CIMENTO - 10", Category::Outros, &actor)
        .await
        .unwrap();
    let item_id = warehouse.inventory()[0].id.clone();
    let record_id = warehouse.ledger()[0].id.clone();

    // role gate
    assert!(matches!(
        warehouse.delete_item(&item_id, &operator, "2000").await,
        Err(WarehouseError::Denied(_))
    ));
    // passphrase gate, independent of the role gate
    assert!(matches!(
        warehouse.delete_movement(&record_id, &actor, "wrong").await,
        Err(WarehouseError::Denied(_))
    ));

    assert_eq!(warehouse.inventory().len(), 1);
    assert_eq!(warehouse.ledger().len(), 1);

    warehouse
        .delete_movement(&record_id, &actor, "2000")
        .await
        .unwrap();
    assert!(warehouse.ledger().is_empty());
    // deleting history never touches the balance
    assert_eq!(warehouse.inventory()[0].quantity, 10);
}

#[tokio::test]
async fn test_custom_passphrase_applies_uniformly() {
    let mut warehouse =
        Warehouse::with_policy(MemoryStore::new(), AccessPolicy::new("obra-piri"));
    let actor = admin();

    warehouse
        .import_bulk("CIMENTO - 10", Category::Outros, &actor)
        .await
        .unwrap();
    let item_id = warehouse.inventory()[0].id.clone();

    // the default passphrase no longer opens any gate
    assert!(warehouse.delete_item(&item_id, &actor, "2000").await.is_err());
    assert!(warehouse
        .add_account("PEDRO", "1234", Role::User, &actor, "2000")
        .await
        .is_err());

    warehouse.delete_item(&item_id, &actor, "obra-piri").await.unwrap();
    warehouse
        .add_account("PEDRO", "1234", Role::User, &actor, "obra-piri")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_account_management_and_root_survival() {
    let mut warehouse = Warehouse::new(MemoryStore::new());
    let actor = admin();

    warehouse
        .add_account("pedro", "1234", Role::User, &actor, "2000")
        .await
        .unwrap();
    let identity = warehouse.login("pedro", "1234").unwrap();
    assert_eq!(identity.username, "PEDRO");
    assert!(!identity.is_admin());

    warehouse
        .set_account_password("PEDRO", "abcd", &actor, "2000")
        .await
        .unwrap();
    assert!(warehouse.login("PEDRO", "1234").is_err());
    assert!(warehouse.login("PEDRO", "abcd").is_ok());

    assert!(matches!(
        warehouse.remove_account("ADM", &actor, "2000").await,
        Err(WarehouseError::Denied(_))
    ));
    warehouse.remove_account("PEDRO", &actor, "2000").await.unwrap();
    assert!(warehouse.login("PEDRO", "abcd").is_err());
}

#[tokio::test]
async fn test_field_request_flow() {
    let mut warehouse = Warehouse::new(MemoryStore::new());

    // intake needs no identity at all
    let request = warehouse
        .submit_request("Equipe Norte", "50 sacos de cimento")
        .await
        .unwrap();
    assert_eq!(request.requester_name, "EQUIPE NORTE");
    assert_eq!(request.status, RequestStatus::Pendente);

    warehouse
        .set_request_status(&request.id, RequestStatus::Atendido)
        .await
        .unwrap();
    assert_eq!(warehouse.requests()[0].status, RequestStatus::Atendido);

    warehouse.remove_request(&request.id).await.unwrap();
    assert!(warehouse.requests().is_empty());
}

#[tokio::test]
async fn test_machine_movements_flip_status() {
    let mut warehouse = Warehouse::new(MemoryStore::new());
    let actor = admin();

    let machine = warehouse
        .add_machine("maq-01", "Betoneira 400L", &actor)
        .await
        .unwrap();
    assert_eq!(machine.status, MachineStatus::Disponivel);

    warehouse
        .move_machines(
            &[BasketPick::new(machine.id.clone(), 1)],
            Direction::Exit,
            Some("EQUIPE A"),
            &actor,
        )
        .await
        .unwrap();
    assert_eq!(warehouse.machines()[0].status, MachineStatus::EmUso);
    assert_eq!(warehouse.ledger()[0].material, "BETONEIRA 400L");
    assert_eq!(warehouse.ledger()[0].sap, "MAQ-01");

    warehouse
        .move_machines(
            &[BasketPick::new(machine.id, 1)],
            Direction::Entry,
            None,
            &actor,
        )
        .await
        .unwrap();
    assert_eq!(warehouse.machines()[0].status, MachineStatus::Disponivel);
}

#[tokio::test]
async fn test_calendar_is_admin_only() {
    let mut warehouse = Warehouse::new(MemoryStore::new());
    let actor = admin();
    let operator = Identity::new("PEDRO", Role::User);

    assert!(matches!(
        warehouse.add_event("2026-03-01", "CONCRETAGEM", "", &operator).await,
        Err(WarehouseError::Denied(_))
    ));

    let event = warehouse
        .add_event("2026-03-01", "CONCRETAGEM", "Bloco B", &actor)
        .await
        .unwrap();
    assert_eq!(warehouse.events().len(), 1);
    warehouse.remove_event(&event.id, &actor).await.unwrap();
    assert!(warehouse.events().is_empty());
}

#[tokio::test]
async fn test_collections_round_trip_through_serde() {
    let mut warehouse = Warehouse::new(MemoryStore::new());
    let actor = admin();

    warehouse
        .import_bulk(
            "102934;CIMENTO CP-II;50;SACO\nAREIA LAVADA - 8",
            Category::MaterialDeServico,
            &actor,
        )
        .await
        .unwrap();
    warehouse
        .move_materials(
            &[BasketPick::new(warehouse.inventory()[0].id.clone(), 5)],
            Direction::Exit,
            Some("JOÃO"),
            &actor,
        )
        .await
        .unwrap();

    let inventory_json = serde_json::to_string(warehouse.inventory()).unwrap();
    let ledger_json = serde_json::to_string(warehouse.ledger()).unwrap();

    let inventory: Vec<almox_core::StockItem> = serde_json::from_str(&inventory_json).unwrap();
    let ledger: Vec<almox_core::MovementRecord> = serde_json::from_str(&ledger_json).unwrap();

    assert_eq!(inventory, warehouse.inventory());
    assert_eq!(ledger, warehouse.ledger());

    // the wire format keeps the Portuguese labels the blobs always carried
    assert!(inventory_json.contains("Material de Serviço"));
    assert!(ledger_json.contains("Saída"));
}

#[tokio::test]
async fn test_reopening_a_store_restores_the_session() {
    let store = MemoryStore::new();
    {
        let mut warehouse = Warehouse::new(store.clone());
        let actor = admin();
        warehouse
            .import_bulk("CIMENTO - 10", Category::Outros, &actor)
            .await
            .unwrap();
        warehouse
            .submit_request("EQUIPE SUL", "AREIA")
            .await
            .unwrap();
    }

    let reopened = Warehouse::open(store, AccessPolicy::default()).await.unwrap();
    assert_eq!(reopened.inventory().len(), 1);
    assert_eq!(reopened.inventory()[0].material, "CIMENTO");
    assert_eq!(reopened.requests().len(), 1);
    assert_eq!(reopened.ledger().len(), 1);
    // seed accounts exist even though the blob never stored them
    assert!(reopened.login("ITALO", "2026").is_ok());
}

#[tokio::test]
async fn test_operator_summary_reflects_the_ledger() {
    let mut warehouse = Warehouse::new(MemoryStore::new());
    let italo = Identity::new("ITALO", Role::Admin);
    let michael = Identity::new("MICHAEL", Role::Admin);

    warehouse
        .import_bulk("1;CIMENTO;40;SACO", Category::MaterialDeServico, &italo)
        .await
        .unwrap();
    warehouse
        .move_materials(
            &[BasketPick::new(warehouse.inventory()[0].id.clone(), 15)],
            Direction::Exit,
            Some("EQUIPE A"),
            &michael,
        )
        .await
        .unwrap();

    let summary = warehouse.operator_summary();
    assert_eq!(summary.len(), 2);
    let italo_totals = summary.iter().find(|s| s.user_id == "ITALO").unwrap();
    let michael_totals = summary.iter().find(|s| s.user_id == "MICHAEL").unwrap();
    assert_eq!(italo_totals.total_in, 40);
    assert_eq!(italo_totals.total_out, 0);
    assert_eq!(michael_totals.total_out, 15);

    let overview = warehouse.stock_overview();
    assert_eq!(overview.item_count, 1);
    assert_eq!(overview.total_quantity, 25);
}
