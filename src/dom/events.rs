// ============================================================================
// EVENT HANDLING - Sistema de eventos
// ============================================================================
// GESTIÓN DE MEMORY LEAKS:
// - Para listeners en elementos del DOM: cuando el elemento se destruye
//   (p.ej. con set_inner_html("")), el navegador limpia los listeners
//   asociados, así que closure.forget() es seguro para listeners locales.
// - Para listeners globales (window/document): registrarlos UNA sola vez al
//   inicio de la app, con un flag de protección contra dobles registros
//   (ver InstallPromptService).
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent, TouchEvent};

/// Helper para crear click handler simple
pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Helper para el evento change de selects
pub fn on_change<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(web_sys::Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
    element.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Inicio de toque (gesto pull-to-refresh)
pub fn on_touch_start<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(TouchEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(TouchEvent)>);
    element.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Movimiento del dedo
pub fn on_touch_move<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(TouchEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(TouchEvent)>);
    element.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Fin del toque
pub fn on_touch_end<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(TouchEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(TouchEvent)>);
    element.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
