//! Frontend Configuration
//!
//! Reads an optional `window.__WEBOOK_CONFIG__` object; anything missing
//! falls back to `SyncConfig` defaults and the page origin.

use list_sync::SyncConfig;
use wasm_bindgen::JsValue;

const CONFIG_GLOBAL: &str = "__WEBOOK_CONFIG__";

pub fn load_config() -> SyncConfig {
    let Some(window) = web_sys::window() else {
        return SyncConfig::default();
    };
    let mut config = read_global(&window).unwrap_or_default();
    if config.base_url.is_empty() {
        if let Ok(origin) = window.location().origin() {
            config.base_url = origin;
        }
    }
    log::debug!("[Config] Using {:?}", config);
    config
}

fn read_global(window: &web_sys::Window) -> Option<SyncConfig> {
    let value = js_sys::Reflect::get(window, &JsValue::from_str(CONFIG_GLOBAL)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    match serde_wasm_bindgen::from_value(value) {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("[Config] Ignoring invalid {}: {}", CONFIG_GLOBAL, e);
            None
        }
    }
}
