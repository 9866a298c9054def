#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the wizard and viewer runners.
//!
//! These wrap [`super::runner_core`] with JS-friendly types.
//! Only compiled on `wasm32` targets.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::runner_core::{Dispatch, ViewerRunnerCore, WizardRunnerCore};

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

fn set_js(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

fn dispatch_to_js(dispatch: Dispatch) -> JsValue {
    let obj = Object::new();
    set_js(&obj, "accepted", dispatch.accepted.into());
    set_js(&obj, "consumed", dispatch.consumed.into());
    obj.into()
}

fn logs_to_js(logs: Vec<String>) -> Array {
    let arr = Array::new();
    for line in logs {
        arr.push(&JsValue::from_str(&line));
    }
    arr
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

// ---------------------------------------------------------------------------
// Wizard
// ---------------------------------------------------------------------------

/// Step wizard bound to one `[data-wizard]` container.
#[wasm_bindgen]
pub struct WizardRunner {
    inner: WizardRunnerCore,
}

#[wasm_bindgen]
impl WizardRunner {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        install_panic_hook();
        Self {
            inner: WizardRunnerCore::new(),
        }
    }

    /// Mount from a JSON description. Returns `false` when the page lacks
    /// the wizard; the runner then ignores every input.
    pub fn mount(&mut self, json: &str) -> bool {
        self.inner.mount(json)
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.inner.is_mounted()
    }

    /// Forward one JSON-encoded DOM event. Returns `{accepted, consumed}`.
    #[wasm_bindgen(js_name = pushInput)]
    pub fn push_input(&mut self, json: &str) -> JsValue {
        dispatch_to_js(self.inner.push_input(json))
    }

    /// Drain pending effects as a JSON array string.
    #[wasm_bindgen(js_name = takeEffects)]
    pub fn take_effects(&mut self) -> String {
        self.inner.take_effects_json()
    }

    /// Drain runner log lines.
    #[wasm_bindgen(js_name = takeLogs)]
    pub fn take_logs(&mut self) -> Array {
        logs_to_js(self.inner.take_logs())
    }
}

impl Default for WizardRunner {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Viewer
// ---------------------------------------------------------------------------

/// Diagram viewer bound to one `[data-viewer]` region.
#[wasm_bindgen]
pub struct ViewerRunner {
    inner: ViewerRunnerCore,
}

#[wasm_bindgen]
impl ViewerRunner {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        install_panic_hook();
        Self {
            inner: ViewerRunnerCore::new(),
        }
    }

    /// Mount from a JSON description. Returns `false` when the canvas or
    /// viewport is missing or the configuration is rejected.
    pub fn mount(&mut self, json: &str) -> bool {
        self.inner.mount(json)
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.inner.is_mounted()
    }

    /// Forward one JSON-encoded DOM event. Returns `{accepted, consumed}`.
    #[wasm_bindgen(js_name = pushInput)]
    pub fn push_input(&mut self, json: &str) -> JsValue {
        dispatch_to_js(self.inner.push_input(json))
    }

    /// Advance the deterministic clock by `dt_ms` milliseconds.
    #[wasm_bindgen(js_name = advanceTime)]
    pub fn advance_time(&mut self, dt_ms: f64) {
        self.inner.advance_time_ms(dt_ms);
    }

    /// Drain pending effects as a JSON array string.
    #[wasm_bindgen(js_name = takeEffects)]
    pub fn take_effects(&mut self) -> String {
        self.inner.take_effects_json()
    }

    /// Drain runner log lines.
    #[wasm_bindgen(js_name = takeLogs)]
    pub fn take_logs(&mut self) -> Array {
        logs_to_js(self.inner.take_logs())
    }
}

impl Default for ViewerRunner {
    fn default() -> Self {
        Self::new()
    }
}
