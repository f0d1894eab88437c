//! User accounts, authentication, and the two-gate admin authorization policy

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::*;
use crate::utils::validation::require_non_blank;

/// The root account; always present and never removable
pub const ROOT_ACCOUNT: &str = "ADM";

/// Default administrative passphrase; override via [`AccessPolicy::new`]
pub const DEFAULT_ADMIN_PASSPHRASE: &str = "2000";

/// The fixed accounts that always exist
pub fn seed_accounts() -> AccountMap {
    let mut accounts = AccountMap::new();
    accounts.insert(
        "ADM".to_string(),
        AccountRecord {
            password: "2000".to_string(),
            role: Role::Admin,
        },
    );
    accounts.insert(
        "ITALO".to_string(),
        AccountRecord {
            password: "2026".to_string(),
            role: Role::Admin,
        },
    );
    accounts.insert(
        "MICHAEL".to_string(),
        AccountRecord {
            password: "2026".to_string(),
            role: Role::Admin,
        },
    );
    accounts
}

/// Re-apply the seed accounts over a loaded map; seeds win on conflict so a
/// tampered blob cannot lock the fixed operators out
pub fn merge_seed_accounts(accounts: &mut AccountMap) {
    for (name, record) in seed_accounts() {
        accounts.insert(name, record);
    }
}

/// Check caller credentials against the account map.
///
/// Usernames compare case-insensitively (stored uppercase); passwords are
/// plaintext equality, as the system carries no real authentication model.
pub fn authenticate(
    accounts: &AccountMap,
    username: &str,
    password: &str,
) -> WarehouseResult<Identity> {
    let username = username.trim().to_uppercase();
    match accounts.get(&username) {
        Some(record) if record.password == password.trim() => {
            Ok(Identity::new(username, record.role))
        }
        _ => {
            warn!(%username, "login rejected");
            Err(WarehouseError::Denied("invalid credentials".to_string()))
        }
    }
}

/// Two independent gates for destructive operations: the acting role must be
/// `admin`, and the caller must supply the administrative passphrase. One
/// configured passphrase applies uniformly to every destructive flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPolicy {
    admin_passphrase: String,
}

impl AccessPolicy {
    pub fn new(admin_passphrase: impl Into<String>) -> Self {
        Self {
            admin_passphrase: admin_passphrase.into(),
        }
    }

    /// First gate: the acting role must be admin
    pub fn require_admin(&self, actor: &Identity) -> WarehouseResult<()> {
        if actor.is_admin() {
            Ok(())
        } else {
            warn!(user = %actor.username, "admin operation refused");
            Err(WarehouseError::Denied(format!(
                "operation requires the admin role, {} is not admin",
                actor.username
            )))
        }
    }

    /// Both gates in order: admin role, then passphrase match
    pub fn authorize(&self, actor: &Identity, passphrase: &str) -> WarehouseResult<()> {
        self.require_admin(actor)?;
        if passphrase == self.admin_passphrase {
            Ok(())
        } else {
            warn!(user = %actor.username, "passphrase check failed");
            Err(WarehouseError::Denied(
                "administrative passphrase does not match".to_string(),
            ))
        }
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_PASSPHRASE)
    }
}

/// Create or replace an account; usernames are stored uppercase
pub fn add_account(
    accounts: &mut AccountMap,
    username: &str,
    password: &str,
    role: Role,
) -> WarehouseResult<()> {
    require_non_blank(username, "username")?;
    require_non_blank(password, "password")?;
    accounts.insert(
        username.trim().to_uppercase(),
        AccountRecord {
            password: password.trim().to_string(),
            role,
        },
    );
    Ok(())
}

/// Change the password of an existing account
pub fn set_password(
    accounts: &mut AccountMap,
    username: &str,
    new_password: &str,
) -> WarehouseResult<()> {
    require_non_blank(new_password, "password")?;
    let username = username.trim().to_uppercase();
    match accounts.get_mut(&username) {
        Some(record) => {
            record.password = new_password.trim().to_string();
            Ok(())
        }
        None => Err(WarehouseError::AccountNotFound(username)),
    }
}

/// Remove an account; the root account is undeletable
pub fn remove_account(accounts: &mut AccountMap, username: &str) -> WarehouseResult<()> {
    let username = username.trim().to_uppercase();
    if username == ROOT_ACCOUNT {
        return Err(WarehouseError::Denied(
            "the root account cannot be removed".to_string(),
        ));
    }
    if accounts.remove(&username).is_some() {
        Ok(())
    } else {
        Err(WarehouseError::AccountNotFound(username))
    }
}
