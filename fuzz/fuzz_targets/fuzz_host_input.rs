#![no_main]

use libfuzzer_sys::fuzz_target;
use plantkit_web::{ViewerRunnerCore, WizardRunnerCore};

const WIZARD: &str = r#"{"container":true,"steps":["Symptom","Suction","Fluid","Summary"]}"#;
const VIEWER: &str = r#"{"canvas":{"width":800,"height":600},"viewport":true,"tooltip":true,
    "live_region":true,"scale_display":true,"components":[{"label":"P-101"},{}]}"#;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Cap length to keep fuzzing fast.
    if text.len() > 4096 {
        return;
    }

    // Mount descriptions must never panic, whatever they contain.
    let _ = WizardRunnerCore::new().mount(text);
    let _ = ViewerRunnerCore::new().mount(text);

    let mut wizard = WizardRunnerCore::new();
    let mut viewer = ViewerRunnerCore::new();
    assert!(wizard.mount(WIZARD));
    assert!(viewer.mount(VIEWER));

    // One event per line, as a host would forward them.
    for line in text.lines() {
        let _ = wizard.push_input(line);
        let _ = viewer.push_input(line);
    }

    let index = wizard.controller().map(|w| w.index()).unwrap_or(0);
    assert!(index < 4, "wizard index out of range: {index}");
    let scale = viewer.viewport().map(|vp| vp.transform().scale).unwrap_or(1.0);
    assert!((0.5..=2.8).contains(&scale), "scale out of range: {scale}");

    // Effects must always encode.
    let _ = wizard.take_effects_json();
    let _ = viewer.take_effects_json();
});
