//! Validation utilities

use crate::types::*;

/// Reject blank input with a field-specific message
pub fn require_non_blank(value: &str, field: &str) -> WarehouseResult<()> {
    if value.trim().is_empty() {
        Err(WarehouseError::Validation(format!(
            "{field} cannot be empty"
        )))
    } else {
        Ok(())
    }
}

/// Validate a material name for manual stock entry
pub fn validate_material_name(name: &str) -> WarehouseResult<()> {
    require_non_blank(name, "material name")?;

    if name.len() > 200 {
        return Err(WarehouseError::Validation(
            "material name cannot exceed 200 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate an ISO `YYYY-MM-DD` calendar day
pub fn validate_event_date(date: &str) -> WarehouseResult<()> {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| WarehouseError::Validation(format!("invalid event date: {date}")))
}
