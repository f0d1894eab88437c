//! Short identifier generation

use uuid::Uuid;

/// 9-character uppercase token used for stock items, ledger records, and lots
pub fn short_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    hex[..9].to_ascii_uppercase()
}

/// Request protocol id, shaped `REQ-XXXXXX`
pub fn request_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("REQ-{}", hex[..6].to_ascii_uppercase())
}
