// ============================================================================
// SESSION STATE - Fase de sesión compartida entre vistas
// ============================================================================

use crate::auth::session::SessionPhase;
use crate::models::auth::Role;
use std::cell::RefCell;
use std::rc::Rc;

/// Estado de sesión
#[derive(Clone)]
pub struct SessionState {
    pub phase: Rc<RefCell<SessionPhase>>,
}

impl SessionState {
    /// Crear nuevo estado de sesión
    pub fn new() -> Self {
        Self {
            phase: Rc::new(RefCell::new(SessionPhase::Uninitialized)),
        }
    }

    /// Obtener fase actual
    pub fn phase(&self) -> SessionPhase {
        *self.phase.borrow()
    }

    /// Establecer fase
    pub fn set_phase(&self, phase: SessionPhase) {
        *self.phase.borrow_mut() = phase;
    }

    /// Rol del usuario autenticado (None si no hay sesión)
    pub fn role(&self) -> Option<Role> {
        self.phase.borrow().role()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
