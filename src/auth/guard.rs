// ============================================================================
// ROUTE GUARD - Decisión pura de acceso a rutas
// ============================================================================

use crate::auth::session::SessionPhase;
use crate::models::auth::Role;

/// Resultado de evaluar una ruta protegida
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RouteDecision {
    /// La vista puede renderizarse
    Render,
    /// Redirigir (a login si no hay sesión, a la home del rol si el rol no encaja)
    Redirect,
    /// La sesión aún está cargando: no decidir todavía
    Pending,
}

/// Función pura y determinista: misma fase + mismos roles => misma decisión.
/// `required` vacío significa "cualquier usuario autenticado".
pub fn decide(phase: &SessionPhase, required: &[Role]) -> RouteDecision {
    if phase.is_loading() {
        return RouteDecision::Pending;
    }

    match phase.role() {
        None => RouteDecision::Redirect,
        Some(role) => {
            if required.is_empty() || required.contains(&role) {
                RouteDecision::Render
            } else {
                RouteDecision::Redirect
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_phases_are_pending() {
        assert_eq!(
            decide(&SessionPhase::Uninitialized, &[Role::Admin]),
            RouteDecision::Pending
        );
        assert_eq!(
            decide(&SessionPhase::Checking, &[Role::Distributor]),
            RouteDecision::Pending
        );
    }

    #[test]
    fn test_unauthenticated_redirects() {
        assert_eq!(
            decide(&SessionPhase::Unauthenticated, &[Role::Distributor]),
            RouteDecision::Redirect
        );
        assert_eq!(
            decide(&SessionPhase::Unauthenticated, &[]),
            RouteDecision::Redirect
        );
    }

    #[test]
    fn test_matching_role_renders() {
        assert_eq!(
            decide(&SessionPhase::Authenticated(Role::Admin), &[Role::Admin]),
            RouteDecision::Render
        );
        assert_eq!(
            decide(
                &SessionPhase::Authenticated(Role::Distributor),
                &[Role::Distributor]
            ),
            RouteDecision::Render
        );
    }

    #[test]
    fn test_distributor_cannot_enter_admin_routes() {
        assert_eq!(
            decide(&SessionPhase::Authenticated(Role::Distributor), &[Role::Admin]),
            RouteDecision::Redirect
        );
    }

    #[test]
    fn test_empty_required_allows_any_authenticated() {
        assert_eq!(
            decide(&SessionPhase::Authenticated(Role::Distributor), &[]),
            RouteDecision::Render
        );
        assert_eq!(
            decide(&SessionPhase::Authenticated(Role::Admin), &[]),
            RouteDecision::Render
        );
    }

    #[test]
    fn test_decision_is_deterministic() {
        // Sin estado interno: evaluar dos veces da lo mismo
        let phase = SessionPhase::Authenticated(Role::Distributor);
        let required = [Role::Admin];
        assert_eq!(decide(&phase, &required), decide(&phase, &required));
        assert_eq!(phase, SessionPhase::Authenticated(Role::Distributor));
    }
}
