// ============================================================================
// POLL SCHEDULER - Intervalo de sondeo con cancelación al soltar
// ============================================================================

use gloo_timers::callback::Interval;

/// Handle del intervalo de sondeo. Soltarlo (o `stop`) cancela el timer,
/// así desmontar la vista de pedidos detiene el polling sin pasos extra.
pub struct PollScheduler {
    interval: Option<Interval>,
}

impl PollScheduler {
    /// Arrancar un intervalo que ejecuta `tick` cada `period_ms`
    pub fn start<F>(period_ms: u32, tick: F) -> Self
    where
        F: FnMut() + 'static,
    {
        log::info!("⏰ Sondeo de pedidos cada {} ms", period_ms);
        Self {
            interval: Some(Interval::new(period_ms, tick)),
        }
    }

    /// Cancelar el intervalo
    pub fn stop(&mut self) {
        if self.interval.take().is_some() {
            log::info!("⏰ Sondeo de pedidos detenido");
        }
    }
}
