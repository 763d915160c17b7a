// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use crate::state::{AdminState, NotifyState, OrdersState, SessionState, UiState};
use std::cell::RefCell;
use std::rc::Rc;

/// Estado global. Clonarlo es barato: todos los campos comparten los mismos
/// Rc internos.
#[derive(Clone)]
pub struct AppState {
    pub session: SessionState,
    pub orders: OrdersState,
    pub admin: AdminState,
    pub notices: NotifyState,
    pub ui: UiState,

    // Reactivity: callbacks para notificar cambios críticos (login/logout)
    pub change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl AppState {
    /// Crear nuevo estado de aplicación
    pub fn new() -> Self {
        Self {
            session: SessionState::new(),
            orders: OrdersState::new(),
            admin: AdminState::new(),
            notices: NotifyState::new(),
            ui: UiState::new(),
            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Suscribirse a cambios de estado crítico
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a todos los subscribers de cambios
    pub fn notify_subscribers(&self) {
        for callback in self.change_subscribers.borrow().iter() {
            callback();
        }
    }

    /// Vaciar todo el estado dependiente de la sesión (logout)
    pub fn clear_session_data(&self) {
        self.orders.reset();
        self.admin.reset();
        self.notices.clear();
        self.ui.set_closing_shift(false);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
