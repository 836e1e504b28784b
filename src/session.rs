//! Session management.
//!
//! Logging in with an unknown name registers it on the spot; there is no
//! separate sign-up flow. The persisted current user alone decides whether
//! someone is logged in on the next start. No expiry, no tokens.

use crate::error::{Result, ShelfError};
use crate::models::{Registry, User};
use crate::storage::{load_json, save_json, KeyValueStore, CURRENT_USER_KEY, USER_REGISTRY_KEY};
use subtle::ConstantTimeEq;

// ============================================================================
// Authentication Functions
// ============================================================================

/// Log in as `name`, registering it first if the name has never been seen.
///
/// Both inputs are trimmed. A wrong password for a known name fails with
/// [`ShelfError::Auth`] and leaves the registry and current user untouched.
pub fn login_or_register(store: &dyn KeyValueStore, name: &str, password: &str) -> Result<User> {
    let name = name.trim();
    let password = password.trim();

    if name.is_empty() || password.is_empty() {
        return Err(ShelfError::Validation);
    }

    let mut registry = load_registry(store)?;

    match registry.get(name) {
        Some(stored) => {
            if !passwords_match(stored, password) {
                tracing::warn!(user = name, "login rejected: wrong password");
                return Err(ShelfError::Auth);
            }
        }
        None => {
            registry.insert(name.to_string(), password.to_string());
            save_json(store, USER_REGISTRY_KEY, &registry)?;
            tracing::info!(user = name, "registered new user");
        }
    }

    let user = User::named(name);
    save_json(store, CURRENT_USER_KEY, &user)?;
    tracing::info!(user = name, "logged in");
    Ok(user)
}

/// Forget the current user. Registered credentials are kept.
pub fn logout(store: &dyn KeyValueStore) -> Result<()> {
    store.remove(CURRENT_USER_KEY)
}

pub fn current_user(store: &dyn KeyValueStore) -> Result<Option<User>> {
    load_json(store, CURRENT_USER_KEY)
}

pub fn load_registry(store: &dyn KeyValueStore) -> Result<Registry> {
    Ok(load_json(store, USER_REGISTRY_KEY)?.unwrap_or_default())
}

fn passwords_match(stored: &str, given: &str) -> bool {
    let stored = stored.as_bytes();
    let given = given.as_bytes();
    stored.len() == given.len() && stored.ct_eq(given).unwrap_u8() == 1
}
