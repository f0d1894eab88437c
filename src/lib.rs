//! # Almox Core
//!
//! A warehouse inventory and logistics core for construction-site operations,
//! providing bulk intake reconciliation, batched entry/exit movements, and
//! receipt grouping over an append-style movement ledger.
//!
//! ## Features
//!
//! - **Bulk intake reconciliation**: free-text or delimited import lines
//!   parsed through an ordered cascade and merged into stock by SAP code or
//!   name
//! - **Batch movements**: a basket of picks applied as one lot, with a shared
//!   batch id linking the resulting ledger records
//! - **Receipt grouping**: printable exit documents reconstructed from the
//!   flat ledger, with computed totals and group-granularity deletion
//! - **Access control**: fixed seed accounts, role checks, and a uniform
//!   administrative passphrase gating every destructive operation
//! - **Field requests**: unauthenticated material request intake with triage
//! - **Storage abstraction**: persistence behind a trait, with an in-memory
//!   store for tests and development
//!
//! ## Quick Start
//!
//! ```rust
//! use almox_core::utils::MemoryStore;
//! use almox_core::{Category, Warehouse};
//!
//! // The warehouse session owns the collections and persists through the
//! // store after every mutation.
//! // let mut warehouse = Warehouse::new(MemoryStore::new());
//! // let actor = warehouse.login("ADM", "2000")?;
//! // warehouse.import_bulk("102934;CIMENTO CP-II;50;SACO", Category::MaterialDeServico, &actor).await?;
//! ```

pub mod access;
pub mod calendar;
pub mod receipts;
pub mod reports;
pub mod requests;
pub mod stock;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use access::*;
pub use receipts::*;
pub use reports::*;
pub use stock::*;
pub use traits::*;
pub use types::*;
