// ============================================================================
// NOTIFY - Notificaciones transitorias (toasts)
// ============================================================================

use gloo_timers::callback::Timeout;

use crate::config::CONFIG;
use crate::state::notify_state::NotifyState;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Notice {
    pub id: u32,
    pub level: NoticeLevel,
    pub message: String,
}

/// Costura de notificaciones: el polling emite avisos sin conocer la UI
pub trait Notifier {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Notifier de producción: encola un toast y programa su auto-descarte
pub struct ToastNotifier {
    notices: NotifyState,
}

impl ToastNotifier {
    pub fn new(notices: NotifyState) -> Self {
        Self { notices }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Success => log::info!("✅ {}", message),
            NoticeLevel::Info => log::info!("ℹ️ {}", message),
            NoticeLevel::Error => log::error!("❌ {}", message),
        }

        let id = self.notices.push(level, message);
        crate::rerender_app();

        // Auto-descartar el toast pasado el tiempo configurado
        let notices = self.notices.clone();
        Timeout::new(CONFIG.toast_duration_ms, move || {
            notices.dismiss(id);
            crate::rerender_app();
        })
        .forget();
    }
}

/// Notifier para tests: registra los avisos en memoria
#[cfg(test)]
#[derive(Default)]
pub struct RecordingNotifier {
    pub entries: std::cell::RefCell<Vec<(NoticeLevel, String)>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(NoticeLevel, String)> {
        self.entries.borrow().clone()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.entries.borrow_mut().push((level, message.to_string()));
    }
}
