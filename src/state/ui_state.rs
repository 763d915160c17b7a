// ============================================================================
// UI STATE - Flags de interfaz que no pertenecen a ninguna pantalla
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone)]
pub struct UiState {
    /// El navegador ofreció instalar la PWA y aún no se descartó
    pub install_available: Rc<RefCell<bool>>,
    /// Evento beforeinstallprompt retenido para dispararlo bajo demanda
    pub install_event: Rc<RefCell<Option<web_sys::Event>>>,
    /// Cierre de turno del repartidor en curso
    pub closing_shift: Rc<RefCell<bool>>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            install_available: Rc::new(RefCell::new(false)),
            install_event: Rc::new(RefCell::new(None)),
            closing_shift: Rc::new(RefCell::new(false)),
        }
    }

    pub fn set_install_available(&self, available: bool) {
        *self.install_available.borrow_mut() = available;
    }

    pub fn get_install_available(&self) -> bool {
        *self.install_available.borrow()
    }

    pub fn set_closing_shift(&self, closing: bool) {
        *self.closing_shift.borrow_mut() = closing;
    }

    pub fn get_closing_shift(&self) -> bool {
        *self.closing_shift.borrow()
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
