//! Core types and data structures for the warehouse system

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::utils::ids::short_id;

/// Placeholder SAP code used when no external code is supplied
pub const SAP_SENTINEL: &str = "S/N";

/// Default unit of measure for items imported without one
pub const DEFAULT_UNIT: &str = "UN";

pub(crate) fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

/// Format a timestamp the way ledger rows and receipts display it
pub fn display_stamp(ts: NaiveDateTime) -> String {
    ts.format("%d/%m/%Y %H:%M:%S").to_string()
}

/// Stock categories used across intake and movement flows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "EPI")]
    Epi,
    #[serde(rename = "Material de Serviço")]
    MaterialDeServico,
    #[serde(rename = "Máquinas")]
    Maquinas,
    #[serde(rename = "Outros")]
    Outros,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Epi => "EPI",
            Category::MaterialDeServico => "Material de Serviço",
            Category::Maquinas => "Máquinas",
            Category::Outros => "Outros",
        };
        f.write_str(label)
    }
}

/// A live stock line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    /// Opaque unique identifier, immutable after creation
    pub id: String,
    /// External SAP code, [`SAP_SENTINEL`] when absent; not required to be unique
    pub sap: String,
    /// Human-readable name, stored uppercase
    pub material: String,
    /// On-hand balance; never goes below zero
    pub quantity: i64,
    /// Unit of measure, uppercase
    pub und: String,
    pub category: Category,
    /// Display timestamp refreshed on every mutation
    pub last_updated: String,
    /// Sortable twin of `last_updated`
    pub updated_at: NaiveDateTime,
}

impl StockItem {
    /// Create a new stock item with a fresh identifier
    pub fn new(
        sap: impl Into<String>,
        material: impl Into<String>,
        quantity: i64,
        und: impl Into<String>,
        category: Category,
    ) -> Self {
        let ts = now();
        Self {
            id: short_id(),
            sap: sap.into(),
            material: material.into(),
            quantity,
            und: und.into(),
            category,
            last_updated: display_stamp(ts),
            updated_at: ts,
        }
    }

    /// Add a received quantity to the balance
    pub fn receive(&mut self, quantity: i64) {
        self.quantity = self.quantity.saturating_add(quantity);
        self.touch();
    }

    /// Withdraw a quantity, clamping the balance at zero
    pub fn withdraw(&mut self, quantity: i64) {
        self.quantity = self.quantity.saturating_sub(quantity).max(0);
        self.touch();
    }

    /// Overwrite the balance, clamping negatives at zero
    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity.max(0);
        self.touch();
    }

    fn touch(&mut self) {
        let ts = now();
        self.last_updated = display_stamp(ts);
        self.updated_at = ts;
    }
}

/// Direction of a ledger movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementKind {
    Entrada,
    #[serde(rename = "Saída")]
    Saida,
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovementKind::Entrada => f.write_str("Entrada"),
            MovementKind::Saida => f.write_str("Saída"),
        }
    }
}

/// One ledger entry: an append-style snapshot of a movement.
///
/// The material, SAP code, and quantity are captured at recording time and
/// stay valid even if the live item is later edited or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementRecord {
    pub id: String,
    /// Shared lot identifier when the record was created in a batch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
    /// Acting username at recording time
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    pub material: String,
    pub sap: String,
    /// Requested quantity, recorded verbatim even when an exit was clamped
    pub quantity: i64,
    /// Locale-formatted display timestamp
    pub date: String,
    /// Sortable twin of `date`
    pub recorded_at: NaiveDateTime,
    /// Who received the material; set only on exits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
}

impl MovementRecord {
    /// Create a record stamped with the current time
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        batch_id: Option<String>,
        user_id: &str,
        kind: MovementKind,
        material: &str,
        sap: &str,
        quantity: i64,
        recipient: Option<String>,
    ) -> Self {
        Self::stamped(now(), batch_id, user_id, kind, material, sap, quantity, recipient)
    }

    /// Create a record with an explicit timestamp, so co-batched records
    /// share the same date
    #[allow(clippy::too_many_arguments)]
    pub fn stamped(
        ts: NaiveDateTime,
        batch_id: Option<String>,
        user_id: &str,
        kind: MovementKind,
        material: &str,
        sap: &str,
        quantity: i64,
        recipient: Option<String>,
    ) -> Self {
        Self {
            id: short_id(),
            batch_id,
            user_id: user_id.to_string(),
            kind,
            material: material.to_string(),
            sap: sap.to_string(),
            quantity,
            date: display_stamp(ts),
            recorded_at: ts,
            recipient,
        }
    }
}

/// Availability of a machine in the fleet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineStatus {
    #[serde(rename = "Disponível")]
    Disponivel,
    #[serde(rename = "Em Uso")]
    EmUso,
    #[serde(rename = "Manutenção")]
    Manutencao,
}

impl fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineStatus::Disponivel => f.write_str("Disponível"),
            MachineStatus::EmUso => f.write_str("Em Uso"),
            MachineStatus::Manutencao => f.write_str("Manutenção"),
        }
    }
}

/// A machine in the fleet; movements flip its status instead of a balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    pub id: String,
    pub code: String,
    pub name: String,
    pub status: MachineStatus,
    pub last_updated: String,
    pub updated_at: NaiveDateTime,
}

impl Machine {
    /// Register a machine as available
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        let ts = now();
        Self {
            id: short_id(),
            code: code.into(),
            name: name.into(),
            status: MachineStatus::Disponivel,
            last_updated: display_stamp(ts),
            updated_at: ts,
        }
    }

    pub fn set_status(&mut self, status: MachineStatus) {
        self.status = status;
        let ts = now();
        self.last_updated = display_stamp(ts);
        self.updated_at = ts;
    }
}

/// A works-schedule entry on an ISO `YYYY-MM-DD` day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub date: String,
    pub title: String,
    pub description: String,
}

/// Triage state of a field request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    Pendente,
    Atendido,
    Recusado,
}

/// A material request submitted by field staff, independent of the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestItem {
    pub id: String,
    pub requester_name: String,
    pub item_description: String,
    pub date: String,
    pub status: RequestStatus,
}

/// Role attached to a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// Stored credentials for one account; passwords are plaintext by design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub password: String,
    pub role: Role,
}

/// Account map keyed by uppercase username
pub type AccountMap = BTreeMap<String, AccountRecord>;

/// The acting user supplied by the caller to every engine operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    pub role: Role,
}

impl Identity {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// The six persisted collections owned by a warehouse session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WarehouseState {
    pub inventory: Vec<StockItem>,
    pub machines: Vec<Machine>,
    pub events: Vec<CalendarEvent>,
    pub requests: Vec<RequestItem>,
    pub ledger: Vec<MovementRecord>,
    pub accounts: AccountMap,
}

/// Errors that can occur across warehouse operations
#[derive(Debug, thiserror::Error)]
pub enum WarehouseError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Access denied: {0}")]
    Denied(String),
    #[error("Stock item not found: {0}")]
    ItemNotFound(String),
    #[error("Machine not found: {0}")]
    MachineNotFound(String),
    #[error("Movement record not found: {0}")]
    RecordNotFound(String),
    #[error("Receipt not found: {0}")]
    ReceiptNotFound(String),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Request not found: {0}")]
    RequestNotFound(String),
    #[error("Event not found: {0}")]
    EventNotFound(String),
}

/// Result type for warehouse operations
pub type WarehouseResult<T> = Result<T, WarehouseError>;
