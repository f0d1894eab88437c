//! Field material requests: public intake and triage
//!
//! Requests live outside the stock and ledger engines; intake needs no
//! authentication and triage is open to every logged operator.

use tracing::debug;

use crate::types::*;
use crate::utils::ids::request_id;
use crate::utils::validation::require_non_blank;

/// Record a field request, newest first
pub fn submit(
    requests: &mut Vec<RequestItem>,
    requester_name: &str,
    item_description: &str,
) -> WarehouseResult<RequestItem> {
    require_non_blank(requester_name, "requester name")?;
    require_non_blank(item_description, "item description")?;

    let request = RequestItem {
        id: request_id(),
        requester_name: requester_name.trim().to_uppercase(),
        item_description: item_description.trim().to_uppercase(),
        date: display_stamp(crate::types::now()),
        status: RequestStatus::Pendente,
    };
    requests.insert(0, request.clone());
    debug!(id = %request.id, "field request received");
    Ok(request)
}

/// Resolve a pending request as attended or refused
pub fn set_status(
    requests: &mut [RequestItem],
    id: &str,
    status: RequestStatus,
) -> WarehouseResult<()> {
    let request = requests
        .iter_mut()
        .find(|request| request.id == id)
        .ok_or_else(|| WarehouseError::RequestNotFound(id.to_string()))?;

    if status == RequestStatus::Pendente {
        return Err(WarehouseError::Validation(
            "A request cannot be re-marked as pending".to_string(),
        ));
    }
    if request.status != RequestStatus::Pendente {
        return Err(WarehouseError::Validation(format!(
            "Request {id} was already resolved"
        )));
    }

    request.status = status;
    Ok(())
}

/// Remove a request from the list permanently
pub fn remove(requests: &mut Vec<RequestItem>, id: &str) -> WarehouseResult<()> {
    let before = requests.len();
    requests.retain(|request| request.id != id);
    if requests.len() == before {
        Err(WarehouseError::RequestNotFound(id.to_string()))
    } else {
        Ok(())
    }
}
