#![forbid(unsafe_code)]

//! Pan/zoom engine over a fixed-size virtual diagram.
//!
//! # Invariants
//!
//! 1. `config.min_scale <= scale <= config.max_scale` after every commit.
//! 2. Every committed transform except a reset satisfies the edge clamp
//!    rule of [`ViewTransform::clamped`].
//! 3. At most one pan session is open, and each session that acquired
//!    pointer capture releases it exactly once.
//! 4. At most one component is highlighted.

use core::time::Duration;

#[cfg(feature = "tracing")]
use crate::logging::{debug, trace};
#[cfg(not(feature = "tracing"))]
use crate::{debug, trace};

use super::config::{ViewerConfig, ViewerConfigError};
use super::effect::ViewerEffect;
use super::keyboard::{key_command, ControlAction, ViewerCommand};
use super::pan::{CaptureCommand, PanDispatch, PanPhase, PanTracker};
use super::tooltip::{place_tooltip, ComponentId, DiagramComponent, TooltipState};
use super::transform::ViewTransform;
use crate::clock::DeterministicClock;
use crate::event::{KeyCode, KeyEvent, PointerButton};
use crate::geometry::{Point, Rect, Size};

/// Live-region text after a reset.
pub const RESET_ANNOUNCEMENT: &str = "View reset to 100 percent scale.";

/// Optional page regions the viewer writes to.
///
/// The canvas and viewport are required and checked by the host before a
/// viewport is built; these may be absent without disabling the viewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewerAnchors {
    /// Tooltip with its label and detail slots.
    pub tooltip: bool,
    /// Live region for announcements.
    pub live_region: bool,
    /// Scale percentage readout.
    pub scale_display: bool,
}

impl ViewerAnchors {
    /// Every optional region present.
    pub const ALL: Self = Self {
        tooltip: true,
        live_region: true,
        scale_display: true,
    };
}

impl From<CaptureCommand> for ViewerEffect {
    fn from(command: CaptureCommand) -> Self {
        match command {
            CaptureCommand::Acquire { pointer_id } => Self::AcquirePointer { pointer_id },
            CaptureCommand::Release { pointer_id } => Self::ReleasePointer { pointer_id },
        }
    }
}

/// Page-lifetime pan/zoom state for one mounted diagram.
#[derive(Debug, Clone)]
pub struct DiagramViewport {
    config: ViewerConfig,
    diagram: Size,
    canvas: Rect,
    view: ViewTransform,
    pan: PanTracker,
    tooltip: TooltipState,
    components: Vec<DiagramComponent>,
    anchors: ViewerAnchors,
    clock: DeterministicClock,
    effects: Vec<ViewerEffect>,
}

impl DiagramViewport {
    /// Build a viewport for a `diagram`-sized virtual canvas shown in
    /// `canvas` (client rectangle).
    ///
    /// Nothing is rendered until [`mount`](Self::mount).
    pub fn new(
        config: ViewerConfig,
        diagram: Size,
        canvas: Rect,
        anchors: ViewerAnchors,
        components: Vec<DiagramComponent>,
    ) -> Result<Self, ViewerConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            diagram,
            canvas,
            view: ViewTransform::IDENTITY,
            pan: PanTracker::new(),
            tooltip: TooltipState::default(),
            components,
            anchors,
            clock: DeterministicClock::new(),
            effects: Vec::new(),
        })
    }

    /// Initial render: a silent reset.
    pub fn mount(&mut self) {
        debug!(
            width = self.diagram.width,
            height = self.diagram.height,
            components = self.components.len(),
            "viewer mounted"
        );
        self.reset_view(false);
    }

    // --- accessors ---

    #[must_use]
    pub const fn config(&self) -> &ViewerConfig {
        &self.config
    }

    #[must_use]
    pub const fn transform(&self) -> ViewTransform {
        self.view
    }

    #[must_use]
    pub const fn diagram_size(&self) -> Size {
        self.diagram
    }

    #[must_use]
    pub const fn canvas(&self) -> Rect {
        self.canvas
    }

    #[must_use]
    pub fn components(&self) -> &[DiagramComponent] {
        &self.components
    }

    #[must_use]
    pub const fn is_panning(&self) -> bool {
        self.pan.is_panning()
    }

    /// Highlighted component, if any.
    #[must_use]
    pub const fn active_component(&self) -> Option<ComponentId> {
        self.tooltip.active()
    }

    /// Current deterministic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Take every effect queued since the last drain.
    pub fn drain_effects(&mut self) -> Vec<ViewerEffect> {
        std::mem::take(&mut self.effects)
    }

    // --- transform ---

    /// Pull the translation back inside the edge clamp rule.
    pub fn clamp_translation(&mut self) {
        self.view = self
            .view
            .clamped(self.diagram, self.canvas.size(), self.config.edge_margin);
    }

    fn apply_transform(&mut self, clamp: bool) {
        if clamp {
            self.clamp_translation();
        }
        let scale_label = self
            .anchors
            .scale_display
            .then(|| format!("{}%", self.view.scale_percent()));
        self.effects.push(ViewerEffect::Transform {
            css: self.view.css(),
            scale_label,
        });
    }

    fn announce(&mut self, text: String) {
        if self.anchors.live_region {
            self.effects.push(ViewerEffect::Announce { text });
        }
    }

    /// Multiply the scale by `factor` around the client point `client`.
    ///
    /// Returns `false` when the clamped scale would change by less than the
    /// zoom epsilon; nothing is emitted in that case.
    ///
    /// A non-finite or non-positive `factor`, or a non-finite `client`, is
    /// ignored.
    pub fn zoom_at_point(&mut self, factor: f64, client: Point) -> bool {
        if !factor.is_finite() || factor <= 0.0 || !client.is_finite() {
            trace!(factor, "zoom factor rejected");
            return false;
        }
        let target = self.config.clamp_scale(self.view.scale * factor);
        if (target - self.view.scale).abs() < self.config.zoom_epsilon {
            trace!(scale = self.view.scale, factor, "zoom below epsilon");
            return false;
        }
        let focal = self.canvas.to_local(client);
        self.view = self.view.zoomed_at(target, focal);
        self.apply_transform(true);
        let percent = self.view.scale_percent();
        debug!(scale = self.view.scale, percent, "zoom");
        self.announce(format!("Zoom {percent} percent."));
        true
    }

    /// Move the open pan session to `(dx, dy)` from its start.
    ///
    /// Does nothing unless a session is open, or when either delta is not
    /// finite.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        let Some(session) = self.pan.session() else {
            return;
        };
        self.view = session.view_by(dx, dy);
        self.apply_transform(true);
    }

    /// Scale 100%, centered, committed without clamping.
    pub fn reset_view(&mut self, announce: bool) {
        self.hide_tooltip();
        self.view = ViewTransform::centered(1.0, self.diagram, self.canvas.size());
        debug!(
            translate_x = self.view.translate_x,
            translate_y = self.view.translate_y,
            "view reset"
        );
        self.apply_transform(false);
        if announce {
            self.announce(RESET_ANNOUNCEMENT.to_owned());
        }
    }

    /// The canvas moved or changed size. A rectangle with a non-finite
    /// edge is ignored.
    pub fn resize(&mut self, canvas: Rect) {
        if !canvas.is_finite() {
            return;
        }
        trace!(width = canvas.width, height = canvas.height, "canvas resized");
        self.canvas = canvas;
        self.apply_transform(true);
    }

    fn run(&mut self, command: ViewerCommand) {
        match command {
            ViewerCommand::PanBy { dx, dy } => {
                self.view = self.view.translated(dx, dy);
                self.apply_transform(true);
            }
            ViewerCommand::ZoomAtCenter { factor } => {
                self.zoom_at_point(factor, self.canvas.center());
            }
            ViewerCommand::Reset => self.reset_view(true),
        }
    }

    // --- pointer ---

    /// Pointer pressed inside the canvas. `on_component` is whether the
    /// press landed on a hotspot.
    ///
    /// Returns `true` when a pan started (the host should prevent default).
    pub fn pointer_down(
        &mut self,
        pointer_id: u32,
        button: PointerButton,
        client: Point,
        on_component: bool,
    ) -> bool {
        if !client.is_finite() {
            return false;
        }
        if !on_component {
            self.hide_tooltip();
        }
        let dispatch = self
            .pan
            .pointer_down(pointer_id, button, client, on_component, self.view);
        let PanDispatch::Started {
            capture,
            superseded,
        } = dispatch
        else {
            trace!(pointer_id, ?dispatch, "pointer down ignored");
            return false;
        };
        debug!(pointer_id, "pan started");
        if let Some(release) = superseded {
            self.effects.push(release.into());
        }
        self.effects.push(ViewerEffect::Panning { active: true });
        self.effects.push(capture.into());
        true
    }

    /// Pointer moved; the view follows an open session.
    pub fn pointer_move(&mut self, client: Point) {
        if !client.is_finite() {
            return;
        }
        if let PanDispatch::Moved { view } = self.pan.pointer_move(client) {
            self.view = view;
            self.apply_transform(true);
        }
    }

    pub fn pointer_up(&mut self) {
        self.end_pan(PanPhase::PointerUp);
    }

    pub fn pointer_cancel(&mut self) {
        self.end_pan(PanPhase::PointerCancel);
    }

    /// Pointer left the canvas; ends the session only while panning.
    pub fn pointer_leave(&mut self) {
        self.end_pan(PanPhase::PointerLeave);
    }

    fn end_pan(&mut self, phase: PanPhase) {
        if let PanDispatch::Ended { capture } = self.pan.end(phase) {
            debug!(?phase, "pan ended");
            self.effects.push(ViewerEffect::Panning { active: false });
            self.effects.push(capture.into());
        }
    }

    /// Wheel over the canvas: `delta_y > 0` zooms out, anything else in.
    ///
    /// Always consumed.
    pub fn wheel(&mut self, delta_y: f64, client: Point) -> bool {
        let factor = if delta_y > 0.0 {
            1.0 / self.config.zoom_step
        } else {
            self.config.zoom_step
        };
        self.zoom_at_point(factor, client);
        true
    }

    // --- keyboard and controls ---

    /// Key pressed anywhere in the viewer. Returns whether it was handled.
    pub fn key(&mut self, key: &KeyEvent) -> bool {
        match key_command(key, &self.config) {
            Some(command) => {
                trace!(?command, "viewer key");
                self.run(command);
                true
            }
            None => false,
        }
    }

    /// A control button was activated.
    pub fn control(&mut self, action: ControlAction) {
        trace!(action = action.name(), "viewer control");
        self.run(action.command(&self.config));
    }

    // --- tooltip ---

    /// Highlight `component` (client rect `rect`) and show its tooltip.
    ///
    /// No-op without a tooltip region or for an unknown component.
    pub fn show_tooltip(&mut self, component: ComponentId, rect: Rect, announce: bool) {
        if !self.anchors.tooltip {
            return;
        }
        let Some(content) = self.components.get(component.0) else {
            trace!(component = component.0, "unknown component");
            return;
        };
        let placement = place_tooltip(
            rect,
            self.canvas,
            self.config.tooltip_flip_threshold,
            self.config.tooltip_flip_offset,
        );
        let effect = ViewerEffect::ShowTooltip {
            component: component.0,
            label: content.label().to_owned(),
            detail: content.detail().to_owned(),
            left: placement.left,
            top: placement.top,
            flip: placement.flip,
        };
        let text = content.announcement();

        self.tooltip.show(component);
        self.effects.push(ViewerEffect::Highlight {
            component: Some(component.0),
        });
        self.effects.push(effect);
        if announce {
            self.announce(text);
        }
    }

    /// Clear the highlight, fade the tooltip, and schedule the final hide.
    pub fn hide_tooltip(&mut self) {
        if !self.anchors.tooltip {
            return;
        }
        self.tooltip
            .hide(self.clock.now(), self.config.tooltip_hide_delay());
        self.effects.push(ViewerEffect::FadeTooltip);
        self.effects.push(ViewerEffect::Highlight { component: None });
    }

    pub fn component_focus(&mut self, component: ComponentId, rect: Rect) {
        self.show_tooltip(component, rect, true);
    }

    /// Pointer entered a hotspot; shows the tooltip silently.
    pub fn component_hover(&mut self, component: ComponentId, rect: Rect) {
        self.show_tooltip(component, rect, false);
    }

    pub fn component_blur(&mut self) {
        self.hide_tooltip();
    }

    /// Pointer left a hotspot. Kept visible while focus is inside it.
    pub fn component_hover_out(&mut self, focus_within: bool) {
        if !focus_within {
            self.hide_tooltip();
        }
    }

    /// Key pressed on a focused hotspot. Enter and Space show and announce
    /// its tooltip; returns whether the key was handled.
    pub fn component_key(&mut self, component: ComponentId, rect: Rect, key: &KeyEvent) -> bool {
        if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
            self.show_tooltip(component, rect, true);
            true
        } else {
            false
        }
    }

    /// Advance the deterministic clock; fires a due tooltip hide.
    pub fn advance_time(&mut self, dt: Duration) {
        self.clock.advance(dt);
        if self.tooltip.poll(self.clock.now()) {
            trace!("tooltip hidden");
            self.effects.push(ViewerEffect::HideTooltip);
        }
    }
}
