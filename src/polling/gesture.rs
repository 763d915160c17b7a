// ============================================================================
// PULL GESTURE - Arrastre "pull-to-refresh" sobre la lista de pedidos
// ============================================================================

use std::cell::Cell;

/// Factor de resistencia: el dedo recorre más px de los que baja el indicador
const RESISTANCE: f64 = 0.4;

/// Distancia (ya con resistencia aplicada) que dispara el refresco
const TRIGGER_DISTANCE: f64 = 100.0;

/// Fases del gesto
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PullPhase {
    Idle,
    Tracking { start_y: f64 },
    Armed { start_y: f64, distance: f64 },
}

/// Máquina de estados del gesto. Pura respecto al DOM: las vistas le pasan
/// las coordenadas de los eventos touch y consultan la distancia.
pub struct PullGesture {
    phase: Cell<PullPhase>,
}

impl PullGesture {
    pub fn new() -> Self {
        Self {
            phase: Cell::new(PullPhase::Idle),
        }
    }

    /// Empezar a trackear. Solo si la lista está scrolleada arriba del todo
    /// y no hay refresco/carga en curso.
    pub fn touch_start(&self, y: f64, at_top: bool, busy: bool) {
        if at_top && !busy {
            self.phase.set(PullPhase::Tracking { start_y: y });
        } else {
            self.phase.set(PullPhase::Idle);
        }
    }

    /// Avance del dedo. Devuelve la distancia acumulada para pintar el
    /// indicador, o None si el gesto no está activo.
    pub fn touch_move(&self, y: f64, busy: bool) -> Option<f64> {
        if busy {
            return None;
        }
        let start_y = match self.phase.get() {
            PullPhase::Tracking { start_y } => start_y,
            PullPhase::Armed { start_y, .. } => start_y,
            PullPhase::Idle => return None,
        };
        let distance = (y - start_y).max(0.0) * RESISTANCE;
        self.phase.set(PullPhase::Armed { start_y, distance });
        Some(distance)
    }

    /// Soltar el dedo: true si hay que disparar el refresco manual.
    /// El marcador de inicio se limpia siempre, se dispare o no.
    pub fn release(&self, busy: bool) -> bool {
        let distance = self.distance();
        self.phase.set(PullPhase::Idle);
        !busy && distance > TRIGGER_DISTANCE
    }

    /// Cancelar el gesto (p. ej. al terminar un refresco manual)
    pub fn reset(&self) {
        self.phase.set(PullPhase::Idle);
    }

    /// Distancia actual del arrastre (0 si no hay gesto)
    pub fn distance(&self) -> f64 {
        match self.phase.get() {
            PullPhase::Armed { distance, .. } => distance,
            _ => 0.0,
        }
    }
}

impl Default for PullGesture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_pull_triggers_refresh() {
        let gesture = PullGesture::new();
        gesture.touch_start(10.0, true, false);
        // 300 px de dedo * 0.4 = 120 de indicador
        assert_eq!(gesture.touch_move(310.0, false), Some(120.0));
        assert!(gesture.release(false));
        assert_eq!(gesture.distance(), 0.0);
    }

    #[test]
    fn test_short_pull_resets_without_firing() {
        let gesture = PullGesture::new();
        gesture.touch_start(10.0, true, false);
        // 50 px * 0.4 = 20, por debajo del umbral
        assert_eq!(gesture.touch_move(60.0, false), Some(20.0));
        assert!(!gesture.release(false));
        assert_eq!(gesture.distance(), 0.0);
    }

    #[test]
    fn test_ignored_when_not_scrolled_to_top() {
        let gesture = PullGesture::new();
        gesture.touch_start(10.0, false, false);
        assert_eq!(gesture.touch_move(400.0, false), None);
        assert!(!gesture.release(false));
    }

    #[test]
    fn test_inert_while_busy() {
        let gesture = PullGesture::new();
        gesture.touch_start(10.0, true, true);
        assert_eq!(gesture.touch_move(400.0, false), None);

        // Ocupado a mitad del gesto: no dispara al soltar
        let gesture = PullGesture::new();
        gesture.touch_start(10.0, true, false);
        let _ = gesture.touch_move(400.0, false);
        assert!(!gesture.release(true));
        assert_eq!(gesture.distance(), 0.0);
    }

    #[test]
    fn test_upward_drag_clamps_to_zero() {
        let gesture = PullGesture::new();
        gesture.touch_start(200.0, true, false);
        assert_eq!(gesture.touch_move(120.0, false), Some(0.0));
        assert!(!gesture.release(false));
    }

    #[test]
    fn test_distance_follows_the_finger() {
        let gesture = PullGesture::new();
        gesture.touch_start(0.0, true, false);
        assert_eq!(gesture.touch_move(100.0, false), Some(40.0));
        assert_eq!(gesture.touch_move(250.0, false), Some(100.0));
        assert_eq!(gesture.touch_move(260.0, false), Some(104.0));
        assert_eq!(gesture.distance(), 104.0);
        assert!(gesture.release(false));
    }
}
