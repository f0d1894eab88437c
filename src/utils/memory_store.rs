//! In-memory storage implementation for testing

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::traits::WarehouseStore;
use crate::types::*;

/// In-memory store for testing and development.
///
/// Clones share the same underlying collections, so a store handed to a
/// warehouse session can be observed from the outside in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inventory: Arc<RwLock<Vec<StockItem>>>,
    machines: Arc<RwLock<Vec<Machine>>>,
    events: Arc<RwLock<Vec<CalendarEvent>>>,
    requests: Arc<RwLock<Vec<RequestItem>>>,
    ledger: Arc<RwLock<Vec<MovementRecord>>>,
    accounts: Arc<RwLock<AccountMap>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.inventory.write().unwrap().clear();
        self.machines.write().unwrap().clear();
        self.events.write().unwrap().clear();
        self.requests.write().unwrap().clear();
        self.ledger.write().unwrap().clear();
        self.accounts.write().unwrap().clear();
    }
}

#[async_trait]
impl WarehouseStore for MemoryStore {
    async fn load_inventory(&self) -> WarehouseResult<Vec<StockItem>> {
        Ok(self.inventory.read().unwrap().clone())
    }

    async fn save_inventory(&mut self, inventory: &[StockItem]) -> WarehouseResult<()> {
        *self.inventory.write().unwrap() = inventory.to_vec();
        Ok(())
    }

    async fn load_machines(&self) -> WarehouseResult<Vec<Machine>> {
        Ok(self.machines.read().unwrap().clone())
    }

    async fn save_machines(&mut self, machines: &[Machine]) -> WarehouseResult<()> {
        *self.machines.write().unwrap() = machines.to_vec();
        Ok(())
    }

    async fn load_events(&self) -> WarehouseResult<Vec<CalendarEvent>> {
        Ok(self.events.read().unwrap().clone())
    }

    async fn save_events(&mut self, events: &[CalendarEvent]) -> WarehouseResult<()> {
        *self.events.write().unwrap() = events.to_vec();
        Ok(())
    }

    async fn load_requests(&self) -> WarehouseResult<Vec<RequestItem>> {
        Ok(self.requests.read().unwrap().clone())
    }

    async fn save_requests(&mut self, requests: &[RequestItem]) -> WarehouseResult<()> {
        *self.requests.write().unwrap() = requests.to_vec();
        Ok(())
    }

    async fn load_ledger(&self) -> WarehouseResult<Vec<MovementRecord>> {
        Ok(self.ledger.read().unwrap().clone())
    }

    async fn save_ledger(&mut self, ledger: &[MovementRecord]) -> WarehouseResult<()> {
        *self.ledger.write().unwrap() = ledger.to_vec();
        Ok(())
    }

    async fn load_accounts(&self) -> WarehouseResult<AccountMap> {
        Ok(self.accounts.read().unwrap().clone())
    }

    async fn save_accounts(&mut self, accounts: &AccountMap) -> WarehouseResult<()> {
        *self.accounts.write().unwrap() = accounts.clone();
        Ok(())
    }
}
