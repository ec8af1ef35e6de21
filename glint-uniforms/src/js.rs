//! Diagnostics sink: the devtools console in the browser, the `log` facade
//! everywhere else.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

pub(crate) fn info(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    log::info!("{message}");
}

pub(crate) fn warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    log::warn!("{message}");
}
