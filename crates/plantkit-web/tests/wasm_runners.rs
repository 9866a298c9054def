#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

use js_sys::Reflect;
use plantkit_web::{ViewerRunner, WizardRunner};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::wasm_bindgen_test;

fn flag(value: &JsValue, key: &str) -> bool {
    Reflect::get(value, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

#[wasm_bindgen_test]
fn wizard_runner_mounts_and_navigates() {
    let mut runner = WizardRunner::new();
    assert!(runner.mount(
        r##"{"container":true,"steps":["A","B","C","D"],"hash":"#step-2"}"##,
    ));
    assert!(runner.is_mounted());
    let effects = runner.take_effects();
    assert!(effects.contains(r#""op":"show_step","index":1"#));

    let dispatch = runner.push_input(r#"{"kind":"action","action":"back"}"#);
    assert!(flag(&dispatch, "accepted"));
    assert!(runner.take_effects().contains("#step-1"));
}

#[wasm_bindgen_test]
fn viewer_runner_consumes_wheel_and_logs_bad_input() {
    let mut runner = ViewerRunner::new();
    assert!(runner.mount(r#"{"canvas":{"width":800,"height":600},"viewport":true}"#));
    let _ = runner.take_effects();

    let dispatch = runner.push_input(r#"{"kind":"wheel","dy":120,"x":400,"y":300}"#);
    assert!(flag(&dispatch, "consumed"));
    assert!(runner.take_effects().contains("scale(0.9090909090909091)"));

    let dispatch = runner.push_input("{");
    assert!(!flag(&dispatch, "accepted"));
    assert_eq!(runner.take_logs().length(), 1);
}

#[wasm_bindgen_test]
fn unmounted_viewer_is_inert() {
    let mut runner = ViewerRunner::new();
    assert!(!runner.mount(r#"{"viewport":true}"#));
    runner.advance_time(16.0);
    let dispatch = runner.push_input(r#"{"kind":"key","key":"0"}"#);
    assert!(flag(&dispatch, "accepted"));
    assert!(!flag(&dispatch, "consumed"));
    assert_eq!(runner.take_effects(), "[]");
}
