#![forbid(unsafe_code)]

//! Platform-independent runner cores.
//!
//! These hold the logic shared between the wasm-bindgen exports and the
//! native test harness. No JS/WASM types here.
//!
//! A runner starts unmounted. [`WizardRunnerCore::mount`] and
//! [`ViewerRunnerCore::mount`] build the controller from a mount
//! description; until one succeeds every input is accepted but ignored.

use core::time::Duration;

use plantkit_core::viewer::{ComponentId, DiagramViewport, ViewerEffect};
use plantkit_core::wizard::{WizardController, WizardEffect};
use serde::Serialize;
use tracing::{debug, warn};

use crate::input_parser::{
    ComponentEvent, PointerPhase, ViewerInput, WizardAction, WizardInput, parse_viewer_input,
    parse_wizard_input,
};
use crate::mount::{ViewerMount, WizardMount};

/// Host-facing outcome of one pushed input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// The input parsed and targeted this component.
    pub accepted: bool,
    /// The host should call `preventDefault()`.
    pub consumed: bool,
}

impl Dispatch {
    const REJECTED: Self = Self {
        accepted: false,
        consumed: false,
    };

    const fn accepted(consumed: bool) -> Self {
        Self {
            accepted: true,
            consumed,
        }
    }
}

fn effects_json<E: Serialize>(effects: &[E], logs: &mut Vec<String>) -> String {
    match serde_json::to_string(effects) {
        Ok(json) => json,
        Err(err) => {
            logs.push(format!("effect_encode_error: {err}"));
            "[]".to_owned()
        }
    }
}

// ---------------------------------------------------------------------------
// Wizard
// ---------------------------------------------------------------------------

/// Runner owning at most one [`WizardController`].
#[derive(Debug, Default)]
pub struct WizardRunnerCore {
    inner: Option<WizardController>,
    logs: Vec<String>,
}

impl WizardRunnerCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount from a JSON [`WizardMount`]. Returns whether a controller
    /// was built; a failure leaves the runner unmounted.
    pub fn mount(&mut self, json: &str) -> bool {
        let built = WizardMount::parse(json).and_then(|mount| mount.build());
        match built {
            Ok(controller) => {
                debug!(steps = controller.total(), "wizard runner mounted");
                self.inner = Some(controller);
                true
            }
            Err(err) => {
                warn!(%err, "wizard not mounted");
                self.logs.push(format!("wizard_mount_error: {err}"));
                self.inner = None;
                false
            }
        }
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.inner.is_some()
    }

    #[must_use]
    pub const fn controller(&self) -> Option<&WizardController> {
        self.inner.as_ref()
    }

    /// Parse and apply one JSON-encoded wizard event.
    pub fn push_input(&mut self, json: &str) -> Dispatch {
        let input = match parse_wizard_input(json) {
            Ok(Some(input)) => input,
            Ok(None) => return Dispatch::REJECTED,
            Err(err) => {
                warn!(%err, "wizard input rejected");
                self.logs.push(format!("wizard_input_error: {err}"));
                return Dispatch::REJECTED;
            }
        };
        let Some(wizard) = self.inner.as_mut() else {
            return Dispatch::accepted(false);
        };
        match input {
            WizardInput::Action(WizardAction::Next) => {
                wizard.advance();
            }
            WizardInput::Action(WizardAction::Back) => wizard.retreat(),
            WizardInput::Action(WizardAction::Reset) => wizard.reset(),
            WizardInput::Change { question, value } => {
                if let Err(err) = wizard.select(question, &value) {
                    self.logs.push(format!("wizard_option_error: {err}"));
                    return Dispatch::REJECTED;
                }
            }
            WizardInput::HashChange { hash } => wizard.hash_changed(&hash),
        }
        Dispatch::accepted(false)
    }

    /// Drain effects produced since the last call.
    pub fn take_effects(&mut self) -> Vec<WizardEffect> {
        self.inner
            .as_mut()
            .map(WizardController::drain_effects)
            .unwrap_or_default()
    }

    /// Drain effects as a JSON array.
    pub fn take_effects_json(&mut self) -> String {
        let effects = self.take_effects();
        effects_json(&effects, &mut self.logs)
    }

    /// Drain runner log lines.
    pub fn take_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.logs)
    }
}

// ---------------------------------------------------------------------------
// Viewer
// ---------------------------------------------------------------------------

/// Runner owning at most one [`DiagramViewport`].
#[derive(Debug, Default)]
pub struct ViewerRunnerCore {
    inner: Option<DiagramViewport>,
    logs: Vec<String>,
}

impl ViewerRunnerCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount from a JSON [`ViewerMount`]. Returns whether a viewport was
    /// built; a failure leaves the runner unmounted.
    pub fn mount(&mut self, json: &str) -> bool {
        let built = ViewerMount::parse(json).and_then(|mount| mount.build());
        match built {
            Ok(viewport) => {
                debug!(
                    components = viewport.components().len(),
                    "viewer runner mounted"
                );
                self.inner = Some(viewport);
                true
            }
            Err(err) => {
                warn!(%err, "viewer not mounted");
                self.logs.push(format!("viewer_mount_error: {err}"));
                self.inner = None;
                false
            }
        }
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.inner.is_some()
    }

    #[must_use]
    pub const fn viewport(&self) -> Option<&DiagramViewport> {
        self.inner.as_ref()
    }

    /// Parse and apply one JSON-encoded viewer event.
    pub fn push_input(&mut self, json: &str) -> Dispatch {
        let input = match parse_viewer_input(json) {
            Ok(Some(input)) => input,
            Ok(None) => return Dispatch::REJECTED,
            Err(err) => {
                warn!(%err, "viewer input rejected");
                self.logs.push(format!("viewer_input_error: {err}"));
                return Dispatch::REJECTED;
            }
        };
        let Some(vp) = self.inner.as_mut() else {
            return Dispatch::accepted(false);
        };
        let consumed = match input {
            ViewerInput::Pointer {
                phase,
                pointer_id,
                button,
                client,
                on_component,
            } => match phase {
                PointerPhase::Down => vp.pointer_down(pointer_id, button, client, on_component),
                PointerPhase::Move => {
                    vp.pointer_move(client);
                    false
                }
                PointerPhase::Up => {
                    vp.pointer_up();
                    false
                }
                PointerPhase::Cancel => {
                    vp.pointer_cancel();
                    false
                }
                PointerPhase::Leave => {
                    vp.pointer_leave();
                    false
                }
            },
            ViewerInput::Wheel { delta_y, client } => vp.wheel(delta_y, client),
            ViewerInput::Key(key) => vp.key(&key),
            ViewerInput::Action(action) => {
                vp.control(action);
                false
            }
            ViewerInput::Resize(canvas) => {
                vp.resize(canvas);
                false
            }
            ViewerInput::Component { component, event } => {
                Self::component_event(vp, component, event)
            }
        };
        Dispatch::accepted(consumed)
    }

    fn component_event(vp: &mut DiagramViewport, component: ComponentId, event: ComponentEvent) -> bool {
        match event {
            ComponentEvent::Focus { rect } => vp.component_focus(component, rect),
            ComponentEvent::Blur => vp.component_blur(),
            ComponentEvent::Enter { rect } => vp.component_hover(component, rect),
            ComponentEvent::Leave { focus_within } => vp.component_hover_out(focus_within),
            ComponentEvent::Key { rect, key } => return vp.component_key(component, rect, &key),
        }
        false
    }

    /// Advance the deterministic clock by `dt_ms` milliseconds.
    pub fn advance_time_ms(&mut self, dt_ms: f64) {
        // Host input can be noisy (NaN/inf/negative spikes). Ignore anything
        // that is not a finite positive duration.
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return;
        }
        let Some(vp) = self.inner.as_mut() else {
            return;
        };
        let max_secs = Duration::MAX.as_secs_f64();
        let secs = (dt_ms / 1000.0).min(max_secs);
        let duration = Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX);
        vp.advance_time(duration);
    }

    /// Drain effects produced since the last call.
    pub fn take_effects(&mut self) -> Vec<ViewerEffect> {
        self.inner
            .as_mut()
            .map(DiagramViewport::drain_effects)
            .unwrap_or_default()
    }

    /// Drain effects as a JSON array.
    pub fn take_effects_json(&mut self) -> String {
        let effects = self.take_effects();
        effects_json(&effects, &mut self.logs)
    }

    /// Drain runner log lines.
    pub fn take_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WIZARD: &str = r#"{"container":true,"steps":["Symptom","Suction","Fluid","Summary"]}"#;
    const VIEWER: &str = r#"{
        "canvas": {"left": 0, "top": 0, "width": 800, "height": 600},
        "viewport": true,
        "diagram_width": "1200",
        "diagram_height": "600",
        "tooltip": true,
        "live_region": true,
        "scale_display": true,
        "components": [{"label": "P-101", "detail": "Feed pump"}]
    }"#;

    #[test]
    fn unmounted_wizard_ignores_input() {
        let mut core = WizardRunnerCore::new();
        assert!(!core.mount(r#"{"container":false}"#));
        assert!(!core.is_mounted());
        let dispatch = core.push_input(r#"{"kind":"action","action":"next"}"#);
        assert!(dispatch.accepted);
        assert!(core.take_effects().is_empty());
        assert_eq!(core.take_effects_json(), "[]");
        let logs = core.take_logs();
        assert!(logs.iter().any(|l| l.starts_with("wizard_mount_error")));
    }

    #[test]
    fn wizard_round_trip_through_json() {
        let mut core = WizardRunnerCore::new();
        assert!(core.mount(WIZARD));
        core.take_effects();

        core.push_input(r#"{"kind":"change","name":"symptom","value":"noise"}"#);
        core.push_input(r#"{"kind":"action","action":"next"}"#);
        let json = core.take_effects_json();
        let value: serde_json::Value = serde_json::from_str(&json).expect("effects json");
        let ops: Vec<&str> = value
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|e| e.get("op").and_then(serde_json::Value::as_str))
            .collect();
        assert!(ops.contains(&"show_step"));
        assert!(ops.contains(&"replace_fragment"));
        assert_eq!(ops.last(), Some(&"announce"));
        assert_eq!(core.controller().map(WizardController::index), Some(1));
    }

    #[test]
    fn wizard_bad_option_is_logged() {
        let mut core = WizardRunnerCore::new();
        core.mount(WIZARD);
        let dispatch = core.push_input(r#"{"kind":"change","name":"symptom","value":"gas"}"#);
        assert_eq!(dispatch, Dispatch::REJECTED);
        assert!(core
            .take_logs()
            .iter()
            .any(|l| l.starts_with("wizard_option_error")));
    }

    #[test]
    fn malformed_input_returns_rejected() {
        let mut core = ViewerRunnerCore::new();
        core.mount(VIEWER);
        assert_eq!(core.push_input("not json"), Dispatch::REJECTED);
        assert_eq!(
            core.push_input(r#"{"kind":"accessibility"}"#),
            Dispatch::REJECTED
        );
    }

    #[test]
    fn incomplete_pointer_and_wheel_events_change_nothing() {
        let mut core = ViewerRunnerCore::new();
        assert!(core.mount(VIEWER));
        core.take_effects();
        core.take_logs();

        assert_eq!(core.push_input(r#"{"kind":"wheel"}"#), Dispatch::REJECTED);
        assert_eq!(
            core.push_input(r#"{"kind":"pointer","phase":"down","id":1,"x":5,"y":5}"#),
            Dispatch::REJECTED
        );
        assert_eq!(
            core.push_input(r#"{"kind":"pointer","x":5,"y":5}"#),
            Dispatch::REJECTED
        );
        assert!(core.take_effects().is_empty());
        assert!(core.viewport().is_some_and(|vp| !vp.is_panning()));
        assert_eq!(core.take_logs().len(), 3);
    }

    #[test]
    fn viewer_reports_consumed_keys_and_wheel() {
        let mut core = ViewerRunnerCore::new();
        assert!(core.mount(VIEWER));
        core.take_effects();

        let d = core.push_input(r#"{"kind":"key","key":"ArrowUp"}"#);
        assert_eq!(d, Dispatch::accepted(true));
        let d = core.push_input(r#"{"kind":"key","key":"ArrowUp","mods":4}"#);
        assert_eq!(d, Dispatch::accepted(false));
        let d = core.push_input(r#"{"kind":"wheel","dy":-1,"x":400,"y":300}"#);
        assert_eq!(d, Dispatch::accepted(true));
        let scale = core.viewport().map(|vp| vp.transform().scale);
        assert!(scale.is_some_and(|s| (s - 1.1).abs() < 1e-9));
    }

    #[test]
    fn viewer_pan_and_capture_commands() {
        let mut core = ViewerRunnerCore::new();
        core.mount(VIEWER);
        core.take_effects();

        let d = core.push_input(r#"{"kind":"pointer","phase":"down","id":5,"button":0,"x":10,"y":10}"#);
        assert!(d.consumed);
        core.push_input(r#"{"kind":"pointer","phase":"move","x":40,"y":10}"#);
        core.push_input(r#"{"kind":"pointer","phase":"up","id":5}"#);
        let effects = core.take_effects();
        assert!(effects.contains(&ViewerEffect::AcquirePointer { pointer_id: 5 }));
        assert!(effects.contains(&ViewerEffect::ReleasePointer { pointer_id: 5 }));
        assert!(effects.contains(&ViewerEffect::Transform {
            css: "translate(-170px, 0px) scale(1)".to_owned(),
            scale_label: Some("100%".to_owned()),
        }));
    }

    #[test]
    fn tooltip_hide_waits_for_host_clock() {
        let mut core = ViewerRunnerCore::new();
        core.mount(VIEWER);
        core.push_input(
            r#"{"kind":"component","phase":"enter","id":0,"rect":{"left":300,"top":300,"width":40,"height":20}}"#,
        );
        core.push_input(r#"{"kind":"component","phase":"leave","id":0}"#);
        core.take_effects();

        core.advance_time_ms(f64::NAN);
        core.advance_time_ms(-5.0);
        core.advance_time_ms(150.0);
        assert!(core.take_effects().is_empty());
        core.advance_time_ms(50.0);
        assert_eq!(core.take_effects(), vec![ViewerEffect::HideTooltip]);
    }

    #[test]
    fn enter_on_component_is_consumed() {
        let mut core = ViewerRunnerCore::new();
        core.mount(VIEWER);
        core.take_effects();
        let d = core.push_input(
            r#"{"kind":"component","phase":"key","id":0,"key":"Enter","rect":{"left":300,"top":300,"width":40,"height":20}}"#,
        );
        assert!(d.consumed);
        assert_eq!(
            core.take_effects().last(),
            Some(&ViewerEffect::Announce {
                text: "P-101. Feed pump".to_owned()
            })
        );
    }

    #[test]
    fn viewer_effects_serialize_with_op_tag() {
        let mut core = ViewerRunnerCore::new();
        core.mount(VIEWER);
        let json = core.take_effects_json();
        assert!(json.contains(r#""op":"transform""#));
        assert!(json.contains(r#""scale_label":"100%""#));
    }
}
