// ============================================================================
// ROUTE RESTORER - Volver a la última ruta visitada tras autenticarse
// ============================================================================

use crate::router::LOGIN_PATH;
use std::cell::Cell;

/// Decide si hay que navegar a la ruta guardada. Lógica pura: quien llama
/// lee storage y ejecuta la navegación.
pub struct RouteRestorer {
    done: Cell<bool>,
}

impl RouteRestorer {
    pub fn new() -> Self {
        Self {
            done: Cell::new(false),
        }
    }

    /// Primera vez que la sesión queda autenticada. Devuelve la ruta destino
    /// como máximo una vez por sesión. Si hay recarga forzada pendiente no
    /// hace nada: la app completa se recargará y decidirá entonces.
    pub fn on_authenticated(
        &self,
        saved: Option<&str>,
        current: &str,
        force_reload: bool,
    ) -> Option<String> {
        if force_reload {
            return None;
        }
        if self.done.get() {
            return None;
        }
        self.done.set(true);
        Self::target(saved, current)
    }

    /// La pestaña vuelve a primer plano con sesión activa: repetir el chequeo
    /// sin consumir el candado de "ya restaurado".
    pub fn on_visibility_regain(&self, saved: Option<&str>, current: &str) -> Option<String> {
        Self::target(saved, current)
    }

    /// Re-armar al empezar un nuevo bootstrap/login (tras logout la sesión
    /// siguiente vuelve a restaurar)
    pub fn reset(&self) {
        self.done.set(false);
    }

    fn target(saved: Option<&str>, current: &str) -> Option<String> {
        let saved = saved?.trim();
        if saved.is_empty() || saved == LOGIN_PATH || saved == current {
            return None;
        }
        Some(saved.to_string())
    }
}

impl Default for RouteRestorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restores_saved_route_once() {
        let restorer = RouteRestorer::new();
        assert_eq!(
            restorer.on_authenticated(Some("/orders/42"), "/orders", false),
            Some("/orders/42".to_string())
        );
        // Segunda autenticación en la misma sesión: no repite
        assert_eq!(
            restorer.on_authenticated(Some("/orders/42"), "/orders", false),
            None
        );
    }

    #[test]
    fn test_skips_empty_login_and_same_path() {
        let restorer = RouteRestorer::new();
        assert_eq!(restorer.on_authenticated(None, "/orders", false), None);

        let restorer = RouteRestorer::new();
        assert_eq!(restorer.on_authenticated(Some(""), "/orders", false), None);

        let restorer = RouteRestorer::new();
        assert_eq!(
            restorer.on_authenticated(Some("/login"), "/orders", false),
            None
        );

        let restorer = RouteRestorer::new();
        assert_eq!(
            restorer.on_authenticated(Some("/orders"), "/orders", false),
            None
        );
    }

    #[test]
    fn test_force_reload_defers_without_consuming() {
        let restorer = RouteRestorer::new();
        assert_eq!(
            restorer.on_authenticated(Some("/admin/orders"), "/", true),
            None
        );
        // La oportunidad sigue disponible si la recarga no llegó a ocurrir
        assert_eq!(
            restorer.on_authenticated(Some("/admin/orders"), "/", false),
            Some("/admin/orders".to_string())
        );
    }

    #[test]
    fn test_visibility_recheck_ignores_done_flag() {
        let restorer = RouteRestorer::new();
        let _ = restorer.on_authenticated(Some("/orders/7"), "/orders/7", false);
        assert_eq!(
            restorer.on_visibility_regain(Some("/orders/7"), "/orders"),
            Some("/orders/7".to_string())
        );
        // Y sin diferencia de ruta no navega
        assert_eq!(restorer.on_visibility_regain(Some("/orders/7"), "/orders/7"), None);
    }

    #[test]
    fn test_reset_rearms_restoration() {
        let restorer = RouteRestorer::new();
        let _ = restorer.on_authenticated(Some("/orders/9"), "/orders", false);
        assert_eq!(
            restorer.on_authenticated(Some("/orders/9"), "/orders", false),
            None
        );
        restorer.reset();
        assert_eq!(
            restorer.on_authenticated(Some("/orders/9"), "/orders", false),
            Some("/orders/9".to_string())
        );
    }
}
