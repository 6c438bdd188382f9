use web_sys::{Document, Window};

use sketchpad_shared::BoardConfig;

const CONFIG_ELEMENT_ID: &str = "board-config";

pub fn debug_enabled(window: &Window) -> bool {
    let search = window.location().search().ok().unwrap_or_default();
    search.contains("debug=1") || search.contains("debug=true")
}

pub fn init_logging(window: &Window) {
    let level = if debug_enabled(window) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
}

/// Reads the optional `<script id="board-config" type="application/json">`
/// block. Anything unreadable falls back to defaults.
pub fn read_config(document: &Document) -> BoardConfig {
    let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return BoardConfig::default();
    };
    let text = element.text_content().unwrap_or_default();
    if text.trim().is_empty() {
        return BoardConfig::default();
    }
    match BoardConfig::from_json(&text) {
        Ok(config) => {
            log::debug!("Loaded board config {config:?}");
            config
        }
        Err(err) => {
            log::warn!("Ignoring board config: {err}");
            BoardConfig::default()
        }
    }
}
