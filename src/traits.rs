//! Traits for storage abstraction and extensibility

use async_trait::async_trait;

use crate::receipts::Receipt;
use crate::types::*;

/// Storage abstraction for the warehouse collections
///
/// This trait allows the warehouse core to work with any storage backend
/// (browser-local blobs, files, a database, in-memory, etc.) by implementing
/// load/save per collection. The core engines never call it themselves; the
/// session orchestrator persists touched collections after each mutation.
#[async_trait]
pub trait WarehouseStore: Send + Sync {
    /// Load the stock collection
    async fn load_inventory(&self) -> WarehouseResult<Vec<StockItem>>;

    /// Persist the stock collection as a whole
    async fn save_inventory(&mut self, inventory: &[StockItem]) -> WarehouseResult<()>;

    /// Load the machine fleet
    async fn load_machines(&self) -> WarehouseResult<Vec<Machine>>;

    /// Persist the machine fleet
    async fn save_machines(&mut self, machines: &[Machine]) -> WarehouseResult<()>;

    /// Load the works-schedule events
    async fn load_events(&self) -> WarehouseResult<Vec<CalendarEvent>>;

    /// Persist the works-schedule events
    async fn save_events(&mut self, events: &[CalendarEvent]) -> WarehouseResult<()>;

    /// Load the field request list
    async fn load_requests(&self) -> WarehouseResult<Vec<RequestItem>>;

    /// Persist the field request list
    async fn save_requests(&mut self, requests: &[RequestItem]) -> WarehouseResult<()>;

    /// Load the movement ledger, newest record first
    async fn load_ledger(&self) -> WarehouseResult<Vec<MovementRecord>>;

    /// Persist the movement ledger
    async fn save_ledger(&mut self, ledger: &[MovementRecord]) -> WarehouseResult<()>;

    /// Load the account map
    async fn load_accounts(&self) -> WarehouseResult<AccountMap>;

    /// Persist the account map
    async fn save_accounts(&mut self, accounts: &AccountMap) -> WarehouseResult<()>;
}

/// Trait for implementing custom stock item validation rules
pub trait ItemValidator: Send + Sync {
    /// Validate an item before it enters the stock collection
    fn validate_item(&self, item: &StockItem) -> WarehouseResult<()>;
}

/// Default item validator with basic rules
pub struct DefaultItemValidator;

impl ItemValidator for DefaultItemValidator {
    fn validate_item(&self, item: &StockItem) -> WarehouseResult<()> {
        crate::utils::validation::validate_material_name(&item.material)?;

        if item.quantity < 0 {
            return Err(WarehouseError::Validation(
                "Stock quantity cannot be negative".to_string(),
            ));
        }

        Ok(())
    }
}

/// Print/export seam: renders one grouped receipt document.
///
/// The layout of the printed guide is outside the core; implementations get
/// the full document including computed totals via [`Receipt::total_quantity`].
pub trait ReceiptRenderer: Send + Sync {
    fn render(&self, receipt: &Receipt) -> WarehouseResult<Vec<u8>>;
}
