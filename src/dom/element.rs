// ============================================================================
// ELEMENT HELPERS - Funciones básicas para manipular DOM
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, Window};

/// Obtener window global
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Obtener document
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Obtener elemento por ID
pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Crear elemento
pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))
        .and_then(|doc| doc.create_element(tag))
}

/// Establecer class name (reemplaza todas las clases)
pub fn set_class_name(element: &Element, class: &str) {
    element.set_class_name(class);
}

/// Establecer text content
pub fn set_text_content(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

/// Agregar hijo
pub fn append_child(parent: &Element, child: &Element) -> Result<(), JsValue> {
    parent.append_child(child).map(|_| ())
}

/// Establecer atributo
pub fn set_attribute(element: &Element, name: &str, value: &str) -> Result<(), JsValue> {
    element.set_attribute(name, value)
}

/// Query selector (buscar elemento por selector CSS)
pub fn query_selector(selector: &str) -> Result<Option<Element>, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))?
        .query_selector(selector)
}

/// Valor actual de un <input> por ID (None si no existe o no es input)
pub fn input_value(id: &str) -> Option<String> {
    get_element_by_id(id)?
        .dyn_ref::<HtmlInputElement>()
        .map(|input| input.value())
}

/// Valor actual de un <select> por ID
pub fn select_value(id: &str) -> Option<String> {
    get_element_by_id(id)?
        .dyn_ref::<HtmlSelectElement>()
        .map(|select| select.value())
}

/// Scroll vertical de un contenedor (0.0 si no se encuentra).
/// Usado para saber si la lista de pedidos está arriba del todo.
pub fn scroll_top_of(selector: &str) -> f64 {
    match query_selector(selector) {
        Ok(Some(element)) => element
            .dyn_ref::<HtmlElement>()
            .map(|el| el.scroll_top() as f64)
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Fijar una propiedad de estilo inline (transform, height...)
pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}
