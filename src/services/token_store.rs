// ============================================================================
// TOKEN STORE - Persistencia de credenciales de sesión
// ============================================================================
// Toda la persistencia de sesión (tokens + rol cacheado) pasa por aquí.
// El trait permite usar un store en memoria en los tests del gestor de sesión.
// ============================================================================

use crate::models::auth::{Role, TokenPair};
use crate::utils::constants::{KEY_ACCESS_TOKEN, KEY_REFRESH_TOKEN, KEY_USER_ROLE};
use crate::utils::storage;

/// Credenciales tal como están en storage (cualquier campo puede faltar)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoredCredentials {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub role: Option<String>,
}

pub trait TokenStore {
    fn load(&self) -> StoredCredentials;
    fn save_tokens(&self, tokens: &TokenPair);
    fn save_role(&self, role: Role);
    fn clear(&self);
}

/// Store de producción sobre localStorage
pub struct LocalTokenStore;

impl LocalTokenStore {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for LocalTokenStore {
    fn load(&self) -> StoredCredentials {
        StoredCredentials {
            access_token: storage::load_raw(KEY_ACCESS_TOKEN),
            refresh_token: storage::load_raw(KEY_REFRESH_TOKEN),
            role: storage::load_raw(KEY_USER_ROLE),
        }
    }

    fn save_tokens(&self, tokens: &TokenPair) {
        storage::save_raw(KEY_ACCESS_TOKEN, &tokens.access_token);
        storage::save_raw(KEY_REFRESH_TOKEN, &tokens.refresh_token);
    }

    fn save_role(&self, role: Role) {
        storage::save_raw(KEY_USER_ROLE, role.as_claim());
    }

    fn clear(&self) {
        let _ = storage::remove_from_storage(KEY_ACCESS_TOKEN);
        let _ = storage::remove_from_storage(KEY_REFRESH_TOKEN);
        let _ = storage::remove_from_storage(KEY_USER_ROLE);
    }
}

/// Store en memoria para tests (cargo test nativo, sin navegador)
#[cfg(test)]
#[derive(Default)]
pub struct MemoryTokenStore {
    inner: std::cell::RefCell<StoredCredentials>,
}

#[cfg(test)]
impl MemoryTokenStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_tokens(access: &str, refresh: &str) -> Self {
        let store = Self::default();
        store.inner.borrow_mut().access_token = Some(access.to_string());
        store.inner.borrow_mut().refresh_token = Some(refresh.to_string());
        store
    }

    pub fn with_refresh_only(refresh: &str) -> Self {
        let store = Self::default();
        store.inner.borrow_mut().refresh_token = Some(refresh.to_string());
        store
    }
}

#[cfg(test)]
impl TokenStore for MemoryTokenStore {
    fn load(&self) -> StoredCredentials {
        self.inner.borrow().clone()
    }

    fn save_tokens(&self, tokens: &TokenPair) {
        let mut inner = self.inner.borrow_mut();
        inner.access_token = Some(tokens.access_token.clone());
        inner.refresh_token = Some(tokens.refresh_token.clone());
    }

    fn save_role(&self, role: Role) {
        self.inner.borrow_mut().role = Some(role.as_claim().to_string());
    }

    fn clear(&self) {
        *self.inner.borrow_mut() = StoredCredentials::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryTokenStore::empty();
        assert_eq!(store.load(), StoredCredentials::default());

        store.save_tokens(&TokenPair {
            access_token: "acc".to_string(),
            refresh_token: "ref".to_string(),
        });
        store.save_role(Role::Distributor);

        let loaded = store.load();
        assert_eq!(loaded.access_token.as_deref(), Some("acc"));
        assert_eq!(loaded.refresh_token.as_deref(), Some("ref"));
        assert_eq!(loaded.role.as_deref(), Some("distributor"));

        store.clear();
        assert_eq!(store.load(), StoredCredentials::default());
    }
}
