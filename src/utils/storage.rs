// ============================================================================
// STORAGE - Helpers tipados sobre localStorage
// ============================================================================

use web_sys::{window, Storage};

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

pub fn remove_from_storage(key: &str) -> Result<(), String> {
    let storage = get_local_storage().ok_or("No se pudo acceder a localStorage")?;
    storage.remove_item(key)
        .map_err(|_| "Error eliminando de localStorage".to_string())?;
    Ok(())
}

/// Guardar un string plano (tokens, rutas), sin envolverlo en JSON
pub fn save_raw(key: &str, value: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(key, value);
    }
}

/// Cargar un string plano
pub fn load_raw(key: &str) -> Option<String> {
    get_local_storage()?.get_item(key).ok()?
}

/// Guardar un flag booleano como "true"/"false"
pub fn save_flag(key: &str, value: bool) {
    save_raw(key, if value { "true" } else { "false" });
}

/// Cargar un flag booleano; false si no existe
pub fn load_flag(key: &str) -> bool {
    load_raw(key).as_deref() == Some("true")
}

/// Cargar un flag y eliminarlo en la misma operación (flags de un solo uso)
pub fn take_flag(key: &str) -> bool {
    let value = load_flag(key);
    if value {
        let _ = remove_from_storage(key);
    }
    value
}

// Smoke test de navegador (wasm-pack test --headless)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_flags_round_trip_and_take() {
        let key = "test_one_shot_flag";
        let _ = remove_from_storage(key);

        assert!(!load_flag(key));

        save_flag(key, true);
        assert!(load_flag(key));

        // take_flag consume el valor
        assert!(take_flag(key));
        assert!(!load_flag(key));
    }

    #[wasm_bindgen_test]
    fn test_raw_round_trip() {
        save_raw("test_last_route", "/orders/42");
        assert_eq!(load_raw("test_last_route").as_deref(), Some("/orders/42"));
        let _ = remove_from_storage("test_last_route");
        assert!(load_raw("test_last_route").is_none());
    }
}
