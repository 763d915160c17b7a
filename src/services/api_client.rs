// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP.
// Los traits AuthApi / OrdersApi son la costura que permite inyectar mocks
// en los tests del núcleo (sesión y polling).
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use thiserror::Error;

use crate::config::CONFIG;
use crate::models::auth::{LoginRequest, RefreshRequest, TokenPair};
use crate::models::customer::Customer;
use crate::models::distributor::Distributor;
use crate::models::order::{NewOrder, Order};
use crate::models::page::{OrderFilter, Paged};
use crate::utils::constants::KEY_ACCESS_TOKEN;
use crate::utils::storage;

/// Errores de la capa de transporte
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("error de red: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("respuesta inválida del backend: {0}")]
    Decode(String),

    #[error("credenciales inválidas")]
    InvalidCredentials,
}

/// Endpoints de autenticación que consume el gestor de sesión
#[async_trait(?Send)]
pub trait AuthApi {
    async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ApiError>;
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError>;
}

/// Endpoints de pedidos del distribuidor que consume el polling
#[async_trait(?Send)]
pub trait OrdersApi {
    async fn fetch_orders(&self) -> Result<Vec<Order>, ApiError>;
    async fn fetch_order(&self, id: &str) -> Result<Order, ApiError>;
    async fn create_order(&self, draft: &NewOrder) -> Result<Order, ApiError>;
    async fn confirm_order(&self, id: &str) -> Result<Order, ApiError>;
    async fn deactivate_distributor(&self) -> Result<(), ApiError>;
}

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: CONFIG.backend_url().to_string(),
        }
    }

    /// Adjuntar el access token guardado a una petición autenticada
    fn with_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match storage::load_raw(KEY_ACCESS_TOKEN) {
            Some(token) => request.header("Authorization", &format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Listado paginado de pedidos del admin, con filtros
    pub async fn fetch_admin_orders(&self, filter: &OrderFilter) -> Result<Paged<Order>, ApiError> {
        let mut url = format!("{}/admin/orders?page={}", self.base_url, filter.page.max(1));
        if let Some(status) = filter.status {
            url.push_str(&format!("&status={}", status.as_str()));
        }
        if !filter.search.is_empty() {
            let encoded: String = js_sys::encode_uri_component(&filter.search).into();
            url.push_str(&format!("&search={}", encoded));
        }

        log::info!("📋 Listando pedidos admin: página {}", filter.page.max(1));

        let response = self.with_auth(Request::get(&url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(http_error(response.status(), response.status_text()));
        }

        response.json::<Paged<Order>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Listado paginado de clientes del admin
    pub async fn fetch_admin_customers(&self, search: &str, page: u32) -> Result<Paged<Customer>, ApiError> {
        let mut url = format!("{}/admin/customers?page={}", self.base_url, page.max(1));
        if !search.is_empty() {
            let encoded: String = js_sys::encode_uri_component(search).into();
            url.push_str(&format!("&search={}", encoded));
        }

        let response = self.with_auth(Request::get(&url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(http_error(response.status(), response.status_text()));
        }

        response.json::<Paged<Customer>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Eliminar un cliente (acción de fila del listado admin)
    pub async fn delete_customer(&self, id: &str) -> Result<(), ApiError> {
        let url = format!("{}/admin/customers/{}", self.base_url, id);

        log::info!("🗑️ Eliminando cliente: {}", id);

        let response = self.with_auth(Request::delete(&url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(http_error(response.status(), response.status_text()));
        }
        Ok(())
    }

    /// Listado paginado de distribuidores del admin
    pub async fn fetch_admin_distributors(&self, page: u32) -> Result<Paged<Distributor>, ApiError> {
        let url = format!("{}/admin/distributors?page={}", self.base_url, page.max(1));

        let response = self.with_auth(Request::get(&url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(http_error(response.status(), response.status_text()));
        }

        response.json::<Paged<Distributor>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl AuthApi for ApiClient {
    /// Login con usuario y contraseña
    async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ApiError> {
        let url = format!("{}/auth/login", self.base_url);
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        log::info!("🔐 Iniciando sesión para usuario: {}", username);

        let response = Request::post(&url)
            .json(&request)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.status() == 401 || response.status() == 403 {
            return Err(ApiError::InvalidCredentials);
        }
        if !response.ok() {
            return Err(http_error(response.status(), response.status_text()));
        }

        response.json::<TokenPair>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Renovar tokens con el refresh token
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        let url = format!("{}/auth/refresh", self.base_url);
        let request = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };

        log::info!("🔄 Renovando tokens de sesión...");

        let response = Request::post(&url)
            .json(&request)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(http_error(response.status(), response.status_text()));
        }

        response.json::<TokenPair>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl OrdersApi for ApiClient {
    /// Pedidos asignados al distribuidor autenticado
    async fn fetch_orders(&self) -> Result<Vec<Order>, ApiError> {
        let url = format!("{}/distributors/orders", self.base_url);

        let response = self.with_auth(Request::get(&url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(http_error(response.status(), response.status_text()));
        }

        let envelope = response.json::<OrdersEnvelope>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(envelope.data)
    }

    /// Detalle de un pedido
    async fn fetch_order(&self, id: &str) -> Result<Order, ApiError> {
        let url = format!("{}/distributors/orders/{}", self.base_url, id);

        log::info!("📦 Obteniendo pedido: {}", id);

        let response = self.with_auth(Request::get(&url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(http_error(response.status(), response.status_text()));
        }

        let envelope = response.json::<OrderEnvelope>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(envelope.data)
    }

    /// Crear un pedido nuevo
    async fn create_order(&self, draft: &NewOrder) -> Result<Order, ApiError> {
        let url = format!("{}/distributors/orders", self.base_url);

        log::info!("📦 Creando pedido para cliente: {}", draft.customer.name);

        let response = self.with_auth(Request::post(&url))
            .json(draft)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(http_error(response.status(), response.status_text()));
        }

        let envelope = response.json::<OrderEnvelope>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(envelope.data)
    }

    /// Confirmar un pedido (admin o distribuidor según backend)
    async fn confirm_order(&self, id: &str) -> Result<Order, ApiError> {
        let url = format!("{}/distributors/orders/{}/confirm", self.base_url, id);

        log::info!("✅ Confirmando pedido: {}", id);

        let response = self.with_auth(Request::post(&url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(http_error(response.status(), response.status_text()));
        }

        let envelope = response.json::<OrderEnvelope>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(envelope.data)
    }

    /// Cerrar el turno del distribuidor autenticado
    async fn deactivate_distributor(&self) -> Result<(), ApiError> {
        let url = format!("{}/distributors/deactivate", self.base_url);

        log::info!("👋 Cerrando turno del distribuidor...");

        let response = self.with_auth(Request::post(&url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(http_error(response.status(), response.status_text()));
        }
        Ok(())
    }
}

fn http_error(status: u16, status_text: String) -> ApiError {
    ApiError::Http {
        status,
        message: status_text,
    }
}

#[derive(serde::Deserialize)]
struct OrdersEnvelope {
    data: Vec<Order>,
}

#[derive(serde::Deserialize)]
struct OrderEnvelope {
    data: Order,
}
