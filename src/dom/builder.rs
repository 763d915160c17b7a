// ============================================================================
// ELEMENT BUILDER - Builder pattern para crear elementos fácilmente
// ============================================================================

use crate::dom::{create_element, set_attribute, set_class_name, set_text_content};
use wasm_bindgen::prelude::*;
use web_sys::Element;

pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    /// Crear nuevo builder para un elemento
    pub fn new(tag: &str) -> Result<Self, JsValue> {
        Ok(Self {
            element: create_element(tag)?,
        })
    }

    /// Establecer class name (reemplaza todas las clases)
    pub fn class(self, class: &str) -> Self {
        set_class_name(&self.element, class);
        self
    }

    /// Establecer ID
    pub fn id(self, id: &str) -> Result<Self, JsValue> {
        set_attribute(&self.element, "id", id)?;
        Ok(self)
    }

    /// Establecer text content
    pub fn text(self, text: &str) -> Self {
        set_text_content(&self.element, text);
        self
    }

    /// Establecer inner HTML
    pub fn html(self, html: &str) -> Self {
        self.element.set_inner_html(html);
        self
    }

    /// Establecer atributo
    pub fn attr(self, name: &str, value: &str) -> Result<Self, JsValue> {
        set_attribute(&self.element, name, value)?;
        Ok(self)
    }

    /// Construir y retornar elemento
    pub fn build(self) -> Element {
        self.element
    }
}

// Smoke test de navegador (wasm-pack test --headless)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_builder_sets_class_text_and_attrs() {
        let element = ElementBuilder::new("button")
            .unwrap()
            .class("btn-refresh")
            .text("Actualizar")
            .attr("type", "button")
            .unwrap()
            .build();

        assert_eq!(element.tag_name().to_lowercase(), "button");
        assert_eq!(element.class_name(), "btn-refresh");
        assert_eq!(element.text_content().as_deref(), Some("Actualizar"));
        assert_eq!(element.get_attribute("type").as_deref(), Some("button"));
    }
}
