// ============================================================================
// SESSION MANAGER - Máquina de estados de la sesión
// ============================================================================
// Fases: Uninitialized -> Checking -> Authenticated(rol) | Unauthenticated.
// El bootstrap se ejecuta UNA vez al arrancar (no por navegación); mientras
// está en Checking, las invocaciones repetidas se ignoran.
// ============================================================================

use std::rc::Rc;
use thiserror::Error;

use crate::auth::claims::{self, ClaimsError};
use crate::models::auth::Role;
use crate::services::api_client::{ApiError, AuthApi};
use crate::services::token_store::TokenStore;
use crate::state::session_state::SessionState;

/// Fase actual de la sesión. Autenticado lleva el rol dentro: no puede
/// existir una sesión autenticada sin rol.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionPhase {
    Uninitialized,
    Checking,
    Authenticated(Role),
    Unauthenticated,
}

impl SessionPhase {
    /// Mientras carga, las decisiones de ruta quedan en espera
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionPhase::Uninitialized | SessionPhase::Checking)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionPhase::Authenticated(_))
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            SessionPhase::Authenticated(role) => Some(*role),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("credenciales inválidas")]
    InvalidCredentials,

    #[error("no se pudo leer el rol del token: {0}")]
    TokenDecode(#[from] ClaimsError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Gestor de sesión. Orquesta API de auth + store de tokens + fase de sesión.
pub struct SessionManager {
    api: Rc<dyn AuthApi>,
    store: Rc<dyn TokenStore>,
    session: SessionState,
}

impl SessionManager {
    pub fn new(api: Rc<dyn AuthApi>, store: Rc<dyn TokenStore>, session: SessionState) -> Self {
        Self { api, store, session }
    }

    /// Restauración silenciosa de sesión al arrancar la app.
    /// - access token presente: decodificar rol y autenticar sin red
    /// - solo refresh token: renovar contra el backend
    /// - storage vacío: no autenticado, sin llamadas de red
    pub async fn bootstrap(&self) -> SessionPhase {
        if self.session.phase() == SessionPhase::Checking {
            log::info!("🔄 Bootstrap de sesión ya en progreso, saltando...");
            return SessionPhase::Checking;
        }
        self.session.set_phase(SessionPhase::Checking);

        let creds = self.store.load();
        let phase = match (creds.access_token, creds.refresh_token) {
            (Some(access), _) => self.restore_from_access(&access),
            (None, Some(refresh)) => self.restore_from_refresh(&refresh).await,
            (None, None) => {
                log::info!("ℹ️ Sin credenciales guardadas, sesión no iniciada");
                SessionPhase::Unauthenticated
            }
        };

        self.session.set_phase(phase);
        phase
    }

    fn restore_from_access(&self, access: &str) -> SessionPhase {
        match claims::role_from_token(access) {
            Ok(role) => {
                log::info!("💾 Sesión restaurada desde storage (rol: {:?})", role);
                self.store.save_role(role);
                SessionPhase::Authenticated(role)
            }
            Err(e) => {
                // Un token ilegible es irrecuperable: limpiar y pedir login
                log::error!("❌ Access token ilegible, limpiando credenciales: {}", e);
                self.store.clear();
                SessionPhase::Unauthenticated
            }
        }
    }

    async fn restore_from_refresh(&self, refresh: &str) -> SessionPhase {
        log::info!("🔄 Solo hay refresh token, renovando sesión...");

        let tokens = match self.api.refresh(refresh).await {
            Ok(tokens) => tokens,
            Err(e) => {
                log::warn!("⚠️ Refresh rechazado, limpiando credenciales: {}", e);
                self.store.clear();
                return SessionPhase::Unauthenticated;
            }
        };

        match claims::role_from_token(&tokens.access_token) {
            Ok(role) => {
                self.store.save_tokens(&tokens);
                self.store.save_role(role);
                log::info!("✅ Sesión renovada (rol: {:?})", role);
                SessionPhase::Authenticated(role)
            }
            Err(e) => {
                log::error!("❌ El token renovado no trae rol legible: {}", e);
                self.store.clear();
                SessionPhase::Unauthenticated
            }
        }
    }

    /// Login con credenciales. Si falla, la fase de sesión queda como estaba
    /// (la vista muestra el error y el usuario puede reintentar).
    pub async fn login(&self, username: &str, password: &str) -> Result<Role, SessionError> {
        let tokens = self.api.login(username, password).await.map_err(|e| match e {
            ApiError::InvalidCredentials => SessionError::InvalidCredentials,
            other => SessionError::Api(other),
        })?;

        let role = claims::role_from_token(&tokens.access_token)?;

        self.store.save_tokens(&tokens);
        self.store.save_role(role);
        self.session.set_phase(SessionPhase::Authenticated(role));

        log::info!("✅ Login correcto (rol: {:?})", role);
        Ok(role)
    }

    /// Logout: limpiar credenciales y volver a no autenticado. Síncrono, sin red.
    pub fn logout(&self) {
        log::info!("👋 Logout - limpiando credenciales");
        self.store.clear();
        self.session.set_phase(SessionPhase::Unauthenticated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::claims::token_with_role;
    use crate::models::auth::TokenPair;
    use crate::services::token_store::{MemoryTokenStore, StoredCredentials};
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::cell::Cell;

    /// API de auth simulada: respuestas fijas + contadores de llamadas
    #[derive(Default)]
    struct MockAuthApi {
        login_response: Option<TokenPair>,
        refresh_response: Option<TokenPair>,
        login_calls: Cell<u32>,
        refresh_calls: Cell<u32>,
    }

    #[async_trait(?Send)]
    impl AuthApi for MockAuthApi {
        async fn login(&self, _username: &str, _password: &str) -> Result<TokenPair, ApiError> {
            self.login_calls.set(self.login_calls.get() + 1);
            self.login_response
                .clone()
                .ok_or(ApiError::InvalidCredentials)
        }

        async fn refresh(&self, _refresh_token: &str) -> Result<TokenPair, ApiError> {
            self.refresh_calls.set(self.refresh_calls.get() + 1);
            self.refresh_response.clone().ok_or(ApiError::Http {
                status: 401,
                message: "Unauthorized".to_string(),
            })
        }
    }

    fn pair_with_role(role: &str) -> TokenPair {
        TokenPair {
            access_token: token_with_role(role),
            refresh_token: "refresh-nuevo".to_string(),
        }
    }

    fn manager(
        api: MockAuthApi,
        store: MemoryTokenStore,
    ) -> (SessionManager, Rc<MockAuthApi>, Rc<MemoryTokenStore>, SessionState) {
        let api = Rc::new(api);
        let store = Rc::new(store);
        let session = SessionState::new();
        let mgr = SessionManager::new(api.clone(), store.clone(), session.clone());
        (mgr, api, store, session)
    }

    #[test]
    fn test_bootstrap_empty_store_is_unauthenticated_without_network() {
        let (mgr, api, store, session) = manager(MockAuthApi::default(), MemoryTokenStore::empty());

        let phase = block_on(mgr.bootstrap());

        assert_eq!(phase, SessionPhase::Unauthenticated);
        assert_eq!(session.phase(), SessionPhase::Unauthenticated);
        assert_eq!(api.login_calls.get(), 0);
        assert_eq!(api.refresh_calls.get(), 0);
        assert_eq!(store.load(), StoredCredentials::default());
    }

    #[test]
    fn test_bootstrap_restores_role_from_access_token() {
        let store = MemoryTokenStore::with_tokens(&token_with_role("distributor"), "refresh-1");
        let (mgr, api, _store, session) = manager(MockAuthApi::default(), store);

        let phase = block_on(mgr.bootstrap());

        assert_eq!(phase, SessionPhase::Authenticated(Role::Distributor));
        assert_eq!(session.role(), Some(Role::Distributor));
        // Con access token legible no hace falta tocar la red
        assert_eq!(api.refresh_calls.get(), 0);
    }

    #[test]
    fn test_bootstrap_with_refresh_only_renews_and_persists() {
        let api = MockAuthApi {
            refresh_response: Some(pair_with_role("admin")),
            ..MockAuthApi::default()
        };
        let (mgr, api, store, session) = manager(api, MemoryTokenStore::with_refresh_only("refresh-1"));

        let phase = block_on(mgr.bootstrap());

        assert_eq!(phase, SessionPhase::Authenticated(Role::Admin));
        assert_eq!(session.role(), Some(Role::Admin));
        assert_eq!(api.refresh_calls.get(), 1);

        let creds = store.load();
        assert!(creds.access_token.is_some());
        assert_eq!(creds.role.as_deref(), Some("admin"));
    }

    #[test]
    fn test_bootstrap_rejected_refresh_clears_store() {
        let (mgr, api, store, session) =
            manager(MockAuthApi::default(), MemoryTokenStore::with_refresh_only("caducado"));

        let phase = block_on(mgr.bootstrap());

        assert_eq!(phase, SessionPhase::Unauthenticated);
        assert_eq!(session.phase(), SessionPhase::Unauthenticated);
        assert_eq!(api.refresh_calls.get(), 1);
        assert_eq!(store.load(), StoredCredentials::default());
    }

    #[test]
    fn test_bootstrap_malformed_access_token_clears_store() {
        let store = MemoryTokenStore::with_tokens("esto-no-es-un-jwt", "refresh-1");
        let (mgr, _api, store, session) = manager(MockAuthApi::default(), store);

        let phase = block_on(mgr.bootstrap());

        assert_eq!(phase, SessionPhase::Unauthenticated);
        assert_eq!(session.phase(), SessionPhase::Unauthenticated);
        assert_eq!(store.load(), StoredCredentials::default());
    }

    #[test]
    fn test_bootstrap_is_noop_while_checking() {
        let (mgr, api, _store, session) =
            manager(MockAuthApi::default(), MemoryTokenStore::with_refresh_only("refresh-1"));

        // Simular un bootstrap en curso
        session.set_phase(SessionPhase::Checking);

        let phase = block_on(mgr.bootstrap());

        assert_eq!(phase, SessionPhase::Checking);
        assert_eq!(api.refresh_calls.get(), 0);
    }

    #[test]
    fn test_login_success_persists_tokens_and_role() {
        let api = MockAuthApi {
            login_response: Some(pair_with_role("distributor")),
            ..MockAuthApi::default()
        };
        let (mgr, _api, store, session) = manager(api, MemoryTokenStore::empty());

        let role = block_on(mgr.login("dist1", "secreto")).unwrap();

        assert_eq!(role, Role::Distributor);
        assert_eq!(session.phase(), SessionPhase::Authenticated(Role::Distributor));
        // Autenticado implica rol presente
        assert!(session.role().is_some());

        let creds = store.load();
        assert!(creds.access_token.is_some());
        assert!(creds.refresh_token.is_some());
        assert_eq!(creds.role.as_deref(), Some("distributor"));
    }

    #[test]
    fn test_login_failure_leaves_session_untouched() {
        let (mgr, _api, store, session) = manager(MockAuthApi::default(), MemoryTokenStore::empty());
        session.set_phase(SessionPhase::Unauthenticated);

        let result = block_on(mgr.login("dist1", "mala"));

        assert!(matches!(result, Err(SessionError::InvalidCredentials)));
        assert_eq!(session.phase(), SessionPhase::Unauthenticated);
        assert_eq!(store.load(), StoredCredentials::default());
    }

    #[test]
    fn test_logout_clears_credentials_and_phase() {
        let api = MockAuthApi {
            login_response: Some(pair_with_role("admin")),
            ..MockAuthApi::default()
        };
        let (mgr, _api, store, session) = manager(api, MemoryTokenStore::empty());

        block_on(mgr.login("admin1", "secreto")).unwrap();
        mgr.logout();

        assert_eq!(session.phase(), SessionPhase::Unauthenticated);
        assert_eq!(store.load(), StoredCredentials::default());
    }
}
