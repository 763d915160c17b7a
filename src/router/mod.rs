// ============================================================================
// ROUTER - Rutas hash (#/...) y navegación
// ============================================================================
// El estado de navegación vive en la URL: así el botón atrás, los enlaces
// y la restauración de ruta funcionan sin un runtime de framework.

pub mod restore;

use crate::models::auth::Role;
use crate::utils::constants::KEY_LAST_ROUTE;
use crate::utils::storage;

pub use restore::RouteRestorer;

/// Ruta de login (pública, nunca se persiste como "última ruta")
pub const LOGIN_PATH: &str = "/login";

/// Rutas de la aplicación
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Route {
    Login,
    Orders,
    OrderNew,
    OrderDetail(String),
    AdminOrders,
    AdminCustomers,
    AdminDistributors,
}

impl Route {
    /// Parsear un path normalizado ("/orders/42"). None si no existe la ruta.
    pub fn parse(path: &str) -> Option<Route> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["login"] => Some(Route::Login),
            ["orders"] => Some(Route::Orders),
            ["orders", "new"] => Some(Route::OrderNew),
            ["orders", id] => Some(Route::OrderDetail((*id).to_string())),
            ["admin", "orders"] => Some(Route::AdminOrders),
            ["admin", "customers"] => Some(Route::AdminCustomers),
            ["admin", "distributors"] => Some(Route::AdminDistributors),
            _ => None,
        }
    }

    /// Path canónico de la ruta
    pub fn path(&self) -> String {
        match self {
            Route::Login => LOGIN_PATH.to_string(),
            Route::Orders => "/orders".to_string(),
            Route::OrderNew => "/orders/new".to_string(),
            Route::OrderDetail(id) => format!("/orders/{}", id),
            Route::AdminOrders => "/admin/orders".to_string(),
            Route::AdminCustomers => "/admin/customers".to_string(),
            Route::AdminDistributors => "/admin/distributors".to_string(),
        }
    }

    /// Roles que pueden ver la ruta (vacío = cualquier usuario autenticado)
    pub fn required_roles(&self) -> &'static [Role] {
        match self {
            Route::Login => &[],
            Route::Orders | Route::OrderNew | Route::OrderDetail(_) => &[Role::Distributor],
            Route::AdminOrders | Route::AdminCustomers | Route::AdminDistributors => {
                &[Role::Admin]
            }
        }
    }

    /// Ruta que no requiere sesión
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login)
    }

    /// Pantalla inicial según el rol
    pub fn home_for(role: Role) -> Route {
        match role {
            Role::Admin => Route::AdminOrders,
            Role::Distributor => Route::Orders,
        }
    }
}

/// Normalizar el hash del navegador ("#/orders" -> "/orders", "" -> "/")
pub fn normalize_hash(hash: &str) -> String {
    let path = hash.trim_start_matches('#');
    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Path actual según window.location.hash
pub fn current_path() -> String {
    let hash = web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default();
    normalize_hash(&hash)
}

/// Navegar a una ruta (dispara hashchange, que re-renderiza)
pub fn navigate(route: &Route) {
    navigate_to_path(&route.path());
}

/// Navegar a un path arbitrario (restauración de ruta)
pub fn navigate_to_path(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_hash(path) {
            log::error!("❌ Error navegando a {}: {:?}", path, e);
        }
    }
}

/// Persistir la ruta actual como "última visitada" (nunca el login)
pub fn remember_path(path: &str) {
    if path == LOGIN_PATH {
        return;
    }
    storage::save_raw(KEY_LAST_ROUTE, path);
}

/// Última ruta persistida
pub fn saved_path() -> Option<String> {
    storage::load_raw(KEY_LAST_ROUTE)
}

/// Olvidar la última ruta (logout explícito)
pub fn clear_saved_path() {
    let _ = storage::remove_from_storage(KEY_LAST_ROUTE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse("/login"), Some(Route::Login));
        assert_eq!(Route::parse("/orders"), Some(Route::Orders));
        assert_eq!(Route::parse("/orders/new"), Some(Route::OrderNew));
        assert_eq!(
            Route::parse("/orders/ord-42"),
            Some(Route::OrderDetail("ord-42".to_string()))
        );
        assert_eq!(Route::parse("/admin/orders"), Some(Route::AdminOrders));
        assert_eq!(Route::parse("/admin/customers"), Some(Route::AdminCustomers));
        assert_eq!(
            Route::parse("/admin/distributors"),
            Some(Route::AdminDistributors)
        );
    }

    #[test]
    fn test_parse_unknown_routes() {
        assert_eq!(Route::parse("/"), None);
        assert_eq!(Route::parse(""), None);
        assert_eq!(Route::parse("/bodega"), None);
        assert_eq!(Route::parse("/admin"), None);
        assert_eq!(Route::parse("/admin/orders/extra"), None);
    }

    #[test]
    fn test_path_round_trip() {
        let routes = [
            Route::Login,
            Route::Orders,
            Route::OrderNew,
            Route::OrderDetail("abc".to_string()),
            Route::AdminOrders,
            Route::AdminCustomers,
            Route::AdminDistributors,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn test_normalize_hash() {
        assert_eq!(normalize_hash("#/orders"), "/orders");
        assert_eq!(normalize_hash("#orders"), "/orders");
        assert_eq!(normalize_hash(""), "/");
        assert_eq!(normalize_hash("#"), "/");
        assert_eq!(normalize_hash("/ya/normalizado"), "/ya/normalizado");
    }

    #[test]
    fn test_required_roles_by_area() {
        assert_eq!(Route::Orders.required_roles(), &[Role::Distributor]);
        assert_eq!(Route::AdminCustomers.required_roles(), &[Role::Admin]);
        assert!(Route::Login.required_roles().is_empty());
        assert!(Route::Login.is_public());
        assert!(!Route::Orders.is_public());
    }

    #[test]
    fn test_home_for_role() {
        assert_eq!(Route::home_for(Role::Admin), Route::AdminOrders);
        assert_eq!(Route::home_for(Role::Distributor), Route::Orders);
    }
}
