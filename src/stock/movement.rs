//! Batch movements: apply a basket of picks as one linked ledger lot

use tracing::debug;

use crate::types::*;
use crate::utils::ids::short_id;

/// Direction of a batch movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Entry,
    Exit,
}

/// One basket selection: a stock item or machine and the requested amount
#[derive(Debug, Clone, PartialEq)]
pub struct BasketPick {
    pub item_id: String,
    pub quantity: i64,
}

impl BasketPick {
    pub fn new(item_id: impl Into<String>, quantity: i64) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
        }
    }
}

/// Outcome of one applied batch
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    /// Shared lot identifier attached to every record; opens the receipt
    pub batch_id: String,
    /// One record per pick, in pick order
    pub records: Vec<MovementRecord>,
}

fn validate_batch(
    picks: &[BasketPick],
    direction: Direction,
    recipient: Option<&str>,
) -> WarehouseResult<()> {
    if picks.is_empty() {
        return Err(WarehouseError::Validation(
            "Basket cannot be empty".to_string(),
        ));
    }

    if picks.iter().any(|pick| pick.quantity < 1) {
        return Err(WarehouseError::Validation(
            "Pick quantities must be at least 1".to_string(),
        ));
    }

    if direction == Direction::Exit && recipient.is_none_or(|r| r.trim().is_empty()) {
        return Err(WarehouseError::Validation(
            "Exit movements require a recipient".to_string(),
        ));
    }

    Ok(())
}

fn batch_fields(direction: Direction, recipient: Option<&str>) -> (MovementKind, Option<String>) {
    match direction {
        Direction::Entry => (MovementKind::Entrada, None),
        Direction::Exit => (
            MovementKind::Saida,
            recipient.map(|r| r.trim().to_string()),
        ),
    }
}

/// Apply a basket of picks against the stock collection as one lot.
///
/// Entries add to the balance; exits clamp the balance at zero while the
/// ledger keeps the requested quantity verbatim, since the ledger is an
/// action log rather than a derived balance. All pick ids are resolved before
/// any item is touched, so an unknown id rejects the whole batch and nothing
/// mutates.
pub fn apply_material_batch(
    inventory: &mut [StockItem],
    picks: &[BasketPick],
    direction: Direction,
    recipient: Option<&str>,
    actor: &Identity,
) -> WarehouseResult<BatchOutcome> {
    validate_batch(picks, direction, recipient)?;

    let indices = picks
        .iter()
        .map(|pick| {
            inventory
                .iter()
                .position(|item| item.id == pick.item_id)
                .ok_or_else(|| WarehouseError::ItemNotFound(pick.item_id.clone()))
        })
        .collect::<WarehouseResult<Vec<_>>>()?;

    let batch_id = short_id();
    let ts = crate::types::now();
    let (kind, recipient) = batch_fields(direction, recipient);

    let mut records = Vec::with_capacity(picks.len());
    for (pick, idx) in picks.iter().zip(indices) {
        let item = &mut inventory[idx];
        match direction {
            Direction::Entry => item.receive(pick.quantity),
            Direction::Exit => item.withdraw(pick.quantity),
        }
        records.push(MovementRecord::stamped(
            ts,
            Some(batch_id.clone()),
            &actor.username,
            kind,
            &item.material,
            &item.sap,
            pick.quantity,
            recipient.clone(),
        ));
    }

    debug!(batch = %batch_id, picks = picks.len(), user = %actor.username, "material batch applied");
    Ok(BatchOutcome { batch_id, records })
}

/// Apply a basket of picks against the machine fleet as one lot.
///
/// Machines carry a status instead of a balance: entries mark them available
/// again, exits mark them in use. Ledger records snapshot name and code.
pub fn apply_machine_batch(
    machines: &mut [Machine],
    picks: &[BasketPick],
    direction: Direction,
    recipient: Option<&str>,
    actor: &Identity,
) -> WarehouseResult<BatchOutcome> {
    validate_batch(picks, direction, recipient)?;

    let indices = picks
        .iter()
        .map(|pick| {
            machines
                .iter()
                .position(|machine| machine.id == pick.item_id)
                .ok_or_else(|| WarehouseError::MachineNotFound(pick.item_id.clone()))
        })
        .collect::<WarehouseResult<Vec<_>>>()?;

    let batch_id = short_id();
    let ts = crate::types::now();
    let (kind, recipient) = batch_fields(direction, recipient);
    let status = match direction {
        Direction::Entry => MachineStatus::Disponivel,
        Direction::Exit => MachineStatus::EmUso,
    };

    let mut records = Vec::with_capacity(picks.len());
    for (pick, idx) in picks.iter().zip(indices) {
        let machine = &mut machines[idx];
        machine.set_status(status);
        records.push(MovementRecord::stamped(
            ts,
            Some(batch_id.clone()),
            &actor.username,
            kind,
            &machine.name,
            &machine.code,
            pick.quantity,
            recipient.clone(),
        ));
    }

    debug!(batch = %batch_id, picks = picks.len(), user = %actor.username, "machine batch applied");
    Ok(BatchOutcome { batch_id, records })
}
