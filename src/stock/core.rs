//! Warehouse session orchestrator that coordinates the engines and the store

use tracing::info;

use crate::access::{self, AccessPolicy};
use crate::calendar;
use crate::receipts::{self, Receipt};
use crate::reports::{self, OperatorTotals, StockOverview};
use crate::requests;
use crate::stock::intake::{self, BulkImportReport};
use crate::stock::movement::{self, BasketPick, BatchOutcome, Direction};
use crate::traits::{DefaultItemValidator, ItemValidator, WarehouseStore};
use crate::types::*;
use crate::utils::validation::require_non_blank;

/// Top-level session context.
///
/// Owns the working collections, applies the pure engines to them, and
/// persists every touched collection through the store after a successful
/// mutation. A rejected operation leaves both the collections and the store
/// untouched. There is exactly one logical actor per session; the acting
/// identity is passed explicitly into every call that records history.
pub struct Warehouse<S: WarehouseStore> {
    store: S,
    state: WarehouseState,
    policy: AccessPolicy,
    item_validator: Box<dyn ItemValidator>,
}

impl<S: WarehouseStore> Warehouse<S> {
    /// Create an empty warehouse backed by `store`, with the seed accounts
    /// and the default access policy
    pub fn new(store: S) -> Self {
        Self::with_policy(store, AccessPolicy::default())
    }

    /// Create an empty warehouse with a custom access policy
    pub fn with_policy(store: S, policy: AccessPolicy) -> Self {
        let mut state = WarehouseState::default();
        access::merge_seed_accounts(&mut state.accounts);
        Self {
            store,
            state,
            policy,
            item_validator: Box::new(DefaultItemValidator),
        }
    }

    /// Replace the item validator used by manual stock entry
    pub fn with_item_validator(mut self, validator: Box<dyn ItemValidator>) -> Self {
        self.item_validator = validator;
        self
    }

    /// Load every collection from the store. The seed accounts are re-applied
    /// so they exist no matter what the stored blob contains.
    pub async fn open(store: S, policy: AccessPolicy) -> WarehouseResult<Self> {
        let mut state = WarehouseState {
            inventory: store.load_inventory().await?,
            machines: store.load_machines().await?,
            events: store.load_events().await?,
            requests: store.load_requests().await?,
            ledger: store.load_ledger().await?,
            accounts: store.load_accounts().await?,
        };
        access::merge_seed_accounts(&mut state.accounts);
        Ok(Self {
            store,
            state,
            policy,
            item_validator: Box::new(DefaultItemValidator),
        })
    }

    pub fn inventory(&self) -> &[StockItem] {
        &self.state.inventory
    }

    pub fn machines(&self) -> &[Machine] {
        &self.state.machines
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.state.events
    }

    pub fn requests(&self) -> &[RequestItem] {
        &self.state.requests
    }

    pub fn ledger(&self) -> &[MovementRecord] {
        &self.state.ledger
    }

    pub fn accounts(&self) -> &AccountMap {
        &self.state.accounts
    }

    /// Check caller credentials and produce the acting identity
    pub fn login(&self, username: &str, password: &str) -> WarehouseResult<Identity> {
        access::authenticate(&self.state.accounts, username, password)
    }

    // Stock operations

    /// Run the bulk intake engine over `text` and persist inventory and ledger
    pub async fn import_bulk(
        &mut self,
        text: &str,
        category: Category,
        actor: &Identity,
    ) -> WarehouseResult<BulkImportReport> {
        let report = intake::import_bulk(&mut self.state.inventory, text, category, actor)?;
        self.prepend_records(&report.records);
        self.store.save_inventory(&self.state.inventory).await?;
        self.store.save_ledger(&self.state.ledger).await?;
        info!(user = %actor.username, lines = report.records.len(), "bulk import persisted");
        Ok(report)
    }

    /// Manually add a single stock item; logged like a one-line import
    pub async fn add_item(
        &mut self,
        sap: &str,
        material: &str,
        quantity: i64,
        und: &str,
        category: Category,
        actor: &Identity,
    ) -> WarehouseResult<StockItem> {
        let sap = if sap.trim().is_empty() {
            SAP_SENTINEL.to_string()
        } else {
            sap.trim().to_uppercase()
        };
        let und = if und.trim().is_empty() {
            DEFAULT_UNIT.to_string()
        } else {
            und.trim().to_uppercase()
        };

        let item = StockItem::new(sap, material.trim().to_uppercase(), quantity.max(0), und, category);
        self.item_validator.validate_item(&item)?;

        let record = MovementRecord::new(
            None,
            &actor.username,
            MovementKind::Entrada,
            &item.material,
            &item.sap,
            item.quantity,
            None,
        );
        self.state.inventory.push(item.clone());
        self.state.ledger.insert(0, record);
        self.store.save_inventory(&self.state.inventory).await?;
        self.store.save_ledger(&self.state.ledger).await?;
        Ok(item)
    }

    /// Overwrite the on-hand quantity of one item
    pub async fn set_item_quantity(
        &mut self,
        item_id: &str,
        quantity: i64,
        actor: &Identity,
    ) -> WarehouseResult<()> {
        self.policy.require_admin(actor)?;
        {
            let item = self
                .state
                .inventory
                .iter_mut()
                .find(|item| item.id == item_id)
                .ok_or_else(|| WarehouseError::ItemNotFound(item_id.to_string()))?;
            item.set_quantity(quantity);
        }
        self.store.save_inventory(&self.state.inventory).await?;
        Ok(())
    }

    /// Delete a stock item; ledger history referencing it stays intact
    pub async fn delete_item(
        &mut self,
        item_id: &str,
        actor: &Identity,
        passphrase: &str,
    ) -> WarehouseResult<()> {
        self.policy.authorize(actor, passphrase)?;
        let before = self.state.inventory.len();
        self.state.inventory.retain(|item| item.id != item_id);
        if self.state.inventory.len() == before {
            return Err(WarehouseError::ItemNotFound(item_id.to_string()));
        }
        self.store.save_inventory(&self.state.inventory).await?;
        info!(user = %actor.username, item = item_id, "stock item deleted");
        Ok(())
    }

    /// Apply a material basket and persist inventory and ledger
    pub async fn move_materials(
        &mut self,
        picks: &[BasketPick],
        direction: Direction,
        recipient: Option<&str>,
        actor: &Identity,
    ) -> WarehouseResult<BatchOutcome> {
        let outcome = movement::apply_material_batch(
            &mut self.state.inventory,
            picks,
            direction,
            recipient,
            actor,
        )?;
        self.prepend_records(&outcome.records);
        self.store.save_inventory(&self.state.inventory).await?;
        self.store.save_ledger(&self.state.ledger).await?;
        Ok(outcome)
    }

    // Machine operations

    /// Register a machine in the fleet
    pub async fn add_machine(
        &mut self,
        code: &str,
        name: &str,
        actor: &Identity,
    ) -> WarehouseResult<Machine> {
        self.policy.require_admin(actor)?;
        require_non_blank(code, "machine code")?;
        require_non_blank(name, "machine name")?;

        let machine = Machine::new(code.trim().to_uppercase(), name.trim().to_uppercase());
        self.state.machines.push(machine.clone());
        self.store.save_machines(&self.state.machines).await?;
        Ok(machine)
    }

    /// Apply a machine basket and persist the fleet and ledger
    pub async fn move_machines(
        &mut self,
        picks: &[BasketPick],
        direction: Direction,
        recipient: Option<&str>,
        actor: &Identity,
    ) -> WarehouseResult<BatchOutcome> {
        let outcome = movement::apply_machine_batch(
            &mut self.state.machines,
            picks,
            direction,
            recipient,
            actor,
        )?;
        self.prepend_records(&outcome.records);
        self.store.save_machines(&self.state.machines).await?;
        self.store.save_ledger(&self.state.ledger).await?;
        Ok(outcome)
    }

    // Ledger and receipts

    /// Group the exit ledger into receipt documents, most recent lot first
    pub fn receipts(&self) -> Vec<Receipt> {
        receipts::group_receipts(&self.state.ledger)
    }

    /// Find one receipt by its group key
    pub fn receipt(&self, group_key: &str) -> Option<Receipt> {
        receipts::find_receipt(&self.state.ledger, group_key)
    }

    /// Delete a whole receipt group from history; stock balances stay as-is
    pub async fn delete_receipt(
        &mut self,
        group_key: &str,
        actor: &Identity,
        passphrase: &str,
    ) -> WarehouseResult<usize> {
        self.policy.authorize(actor, passphrase)?;
        let removed = receipts::delete_group(&mut self.state.ledger, group_key)?;
        self.store.save_ledger(&self.state.ledger).await?;
        info!(user = %actor.username, group = group_key, removed, "receipt group deleted");
        Ok(removed)
    }

    /// Delete a single ledger record from history
    pub async fn delete_movement(
        &mut self,
        record_id: &str,
        actor: &Identity,
        passphrase: &str,
    ) -> WarehouseResult<()> {
        self.policy.authorize(actor, passphrase)?;
        let before = self.state.ledger.len();
        self.state.ledger.retain(|record| record.id != record_id);
        if self.state.ledger.len() == before {
            return Err(WarehouseError::RecordNotFound(record_id.to_string()));
        }
        self.store.save_ledger(&self.state.ledger).await?;
        Ok(())
    }

    // Field requests

    /// Record a field request; no authentication required
    pub async fn submit_request(
        &mut self,
        requester_name: &str,
        item_description: &str,
    ) -> WarehouseResult<RequestItem> {
        let request = requests::submit(&mut self.state.requests, requester_name, item_description)?;
        self.store.save_requests(&self.state.requests).await?;
        Ok(request)
    }

    /// Resolve a pending request; triage is open to every logged operator
    pub async fn set_request_status(
        &mut self,
        id: &str,
        status: RequestStatus,
    ) -> WarehouseResult<()> {
        requests::set_status(&mut self.state.requests, id, status)?;
        self.store.save_requests(&self.state.requests).await?;
        Ok(())
    }

    /// Remove a request permanently
    pub async fn remove_request(&mut self, id: &str) -> WarehouseResult<()> {
        requests::remove(&mut self.state.requests, id)?;
        self.store.save_requests(&self.state.requests).await?;
        Ok(())
    }

    // Works schedule

    /// Add a calendar event on an ISO `YYYY-MM-DD` day
    pub async fn add_event(
        &mut self,
        date: &str,
        title: &str,
        description: &str,
        actor: &Identity,
    ) -> WarehouseResult<CalendarEvent> {
        self.policy.require_admin(actor)?;
        let event = calendar::add_event(&mut self.state.events, date, title, description)?;
        self.store.save_events(&self.state.events).await?;
        Ok(event)
    }

    /// Remove a calendar event
    pub async fn remove_event(&mut self, id: &str, actor: &Identity) -> WarehouseResult<()> {
        self.policy.require_admin(actor)?;
        calendar::remove_event(&mut self.state.events, id)?;
        self.store.save_events(&self.state.events).await?;
        Ok(())
    }

    // Account management

    /// Create or replace an account
    pub async fn add_account(
        &mut self,
        username: &str,
        password: &str,
        role: Role,
        actor: &Identity,
        passphrase: &str,
    ) -> WarehouseResult<()> {
        self.policy.authorize(actor, passphrase)?;
        access::add_account(&mut self.state.accounts, username, password, role)?;
        self.store.save_accounts(&self.state.accounts).await?;
        Ok(())
    }

    /// Change the password of an existing account
    pub async fn set_account_password(
        &mut self,
        username: &str,
        new_password: &str,
        actor: &Identity,
        passphrase: &str,
    ) -> WarehouseResult<()> {
        self.policy.authorize(actor, passphrase)?;
        access::set_password(&mut self.state.accounts, username, new_password)?;
        self.store.save_accounts(&self.state.accounts).await?;
        Ok(())
    }

    /// Remove an account; the root account always survives
    pub async fn remove_account(
        &mut self,
        username: &str,
        actor: &Identity,
        passphrase: &str,
    ) -> WarehouseResult<()> {
        self.policy.authorize(actor, passphrase)?;
        access::remove_account(&mut self.state.accounts, username)?;
        self.store.save_accounts(&self.state.accounts).await?;
        Ok(())
    }

    // Reporting

    /// Entry/exit totals per operator
    pub fn operator_summary(&self) -> Vec<OperatorTotals> {
        reports::operator_summary(&self.state.ledger)
    }

    /// Dashboard snapshot of the stock
    pub fn stock_overview(&self) -> StockOverview {
        reports::stock_overview(&self.state.inventory)
    }

    fn prepend_records(&mut self, records: &[MovementRecord]) {
        self.state.ledger.splice(0..0, records.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_store::MemoryStore;

    fn admin() -> Identity {
        Identity::new("ADM", Role::Admin)
    }

    #[tokio::test]
    async fn import_then_exit_round_trips_through_the_store() {
        let store = MemoryStore::new();
        let mut warehouse = Warehouse::new(store.clone());
        let actor = warehouse.login("ADM", "2000").unwrap();

        warehouse
            .import_bulk("102934;CIMENTO CP-II;50;SACO", Category::MaterialDeServico, &actor)
            .await
            .unwrap();
        let item_id = warehouse.inventory()[0].id.clone();

        let outcome = warehouse
            .move_materials(
                &[BasketPick::new(item_id, 20)],
                Direction::Exit,
                Some("JOÃO"),
                &actor,
            )
            .await
            .unwrap();

        assert_eq!(warehouse.inventory()[0].quantity, 30);
        assert_eq!(warehouse.ledger().len(), 2);
        assert_eq!(warehouse.ledger()[0].batch_id.as_deref(), Some(outcome.batch_id.as_str()));

        // the cloned store shares collections, so the saved state is visible
        let persisted = store.load_inventory().await.unwrap();
        assert_eq!(persisted, warehouse.inventory());
        let persisted_ledger = store.load_ledger().await.unwrap();
        assert_eq!(persisted_ledger, warehouse.ledger());
    }

    #[tokio::test]
    async fn rejected_operations_leave_state_and_store_untouched() {
        let store = MemoryStore::new();
        let mut warehouse = Warehouse::new(store.clone());
        let actor = admin();

        warehouse
            .import_bulk("CIMENTO - 10", Category::Outros, &actor)
            .await
            .unwrap();
        let item_id = warehouse.inventory()[0].id.clone();
        let operator = Identity::new("PEDRO", Role::User);

        let denied = warehouse.delete_item(&item_id, &operator, "2000").await;
        assert!(matches!(denied, Err(WarehouseError::Denied(_))));
        let denied = warehouse.delete_item(&item_id, &actor, "wrong").await;
        assert!(matches!(denied, Err(WarehouseError::Denied(_))));

        assert_eq!(warehouse.inventory().len(), 1);
        assert_eq!(store.load_inventory().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn open_reapplies_seed_accounts() {
        let mut store = MemoryStore::new();
        let mut tampered = AccountMap::new();
        tampered.insert(
            "ADM".to_string(),
            AccountRecord {
                password: "stolen".to_string(),
                role: Role::User,
            },
        );
        store.save_accounts(&tampered).await.unwrap();

        let warehouse = Warehouse::open(store, AccessPolicy::default()).await.unwrap();
        let identity = warehouse.login("ADM", "2000").unwrap();
        assert!(identity.is_admin());
    }
}
