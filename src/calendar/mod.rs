//! Works schedule: calendar events managed by administrators

use crate::types::*;
use crate::utils::ids::short_id;
use crate::utils::validation::{require_non_blank, validate_event_date};

/// Add an event on an ISO `YYYY-MM-DD` day
pub fn add_event(
    events: &mut Vec<CalendarEvent>,
    date: &str,
    title: &str,
    description: &str,
) -> WarehouseResult<CalendarEvent> {
    require_non_blank(title, "event title")?;
    validate_event_date(date)?;

    let event = CalendarEvent {
        id: short_id(),
        date: date.to_string(),
        title: title.trim().to_string(),
        description: description.trim().to_string(),
    };
    events.push(event.clone());
    Ok(event)
}

/// Remove an event by id
pub fn remove_event(events: &mut Vec<CalendarEvent>, id: &str) -> WarehouseResult<()> {
    let before = events.len();
    events.retain(|event| event.id != id);
    if events.len() == before {
        Err(WarehouseError::EventNotFound(id.to_string()))
    } else {
        Ok(())
    }
}

/// All events on a given ISO day
pub fn events_on<'a>(events: &'a [CalendarEvent], date: &str) -> Vec<&'a CalendarEvent> {
    events.iter().filter(|event| event.date == date).collect()
}
