// ============================================================================
// NOTIFY STATE - Cola de toasts activos
// ============================================================================

use crate::services::notify::{Notice, NoticeLevel};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Toasts visibles. El auto-descarte lo programa el ToastNotifier.
#[derive(Clone)]
pub struct NotifyState {
    pub notices: Rc<RefCell<Vec<Notice>>>,
    next_id: Rc<Cell<u32>>,
}

impl NotifyState {
    pub fn new() -> Self {
        Self {
            notices: Rc::new(RefCell::new(Vec::new())),
            next_id: Rc::new(Cell::new(1)),
        }
    }

    /// Encolar un toast; devuelve su id para el descarte posterior
    pub fn push(&self, level: NoticeLevel, message: &str) -> u32 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.notices.borrow_mut().push(Notice {
            id,
            level,
            message: message.to_string(),
        });
        id
    }

    /// Quitar un toast por id (descarte automático o tap del usuario)
    pub fn dismiss(&self, id: u32) {
        self.notices.borrow_mut().retain(|n| n.id != id);
    }

    pub fn get_notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    pub fn clear(&self) {
        self.notices.borrow_mut().clear();
    }
}

impl Default for NotifyState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_increasing_ids() {
        let state = NotifyState::new();
        let a = state.push(NoticeLevel::Success, "uno");
        let b = state.push(NoticeLevel::Error, "dos");
        assert!(b > a);
        assert_eq!(state.get_notices().len(), 2);
    }

    #[test]
    fn test_dismiss_removes_only_that_notice() {
        let state = NotifyState::new();
        let a = state.push(NoticeLevel::Info, "uno");
        let b = state.push(NoticeLevel::Info, "dos");
        state.dismiss(a);
        let left = state.get_notices();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, b);
    }
}
