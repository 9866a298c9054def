#![forbid(unsafe_code)]

//! Pointer-drag pan sessions with explicit pointer-capture commands.
//!
//! [`PanTracker`] turns the browser pointer lifecycle into pan updates
//! while enforcing:
//! - only a primary-button press on the canvas background opens a session,
//! - a new press supersedes any stale session (last write wins), and
//! - every session that acquired capture releases it exactly once.

use crate::event::PointerButton;
use crate::geometry::Point;

use super::transform::ViewTransform;

/// Host command for DOM `setPointerCapture()` / `releasePointerCapture()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureCommand {
    Acquire { pointer_id: u32 },
    Release { pointer_id: u32 },
}

/// Lifecycle phase of one pointer dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanPhase {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    PointerLeave,
}

/// Why a pointer signal did not affect panning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanIgnoredReason {
    /// Only the primary button pans.
    ButtonNotAllowed,
    /// Presses on a component hotspot belong to the tooltip.
    OnComponent,
    /// Move/up/leave with no open session.
    NoActiveSession,
}

/// An open drag: where it started and what the view looked like then.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanSession {
    pub pointer_id: u32,
    pub origin: Point,
    pub start: ViewTransform,
}

impl PanSession {
    /// View for the pointer now at `client`: the starting translation plus
    /// the pointer's total travel.
    #[must_use]
    pub fn view_at(&self, client: Point) -> ViewTransform {
        self.view_by(client.x - self.origin.x, client.y - self.origin.y)
    }

    /// View after a total travel of `(dx, dy)` since the press.
    #[must_use]
    pub fn view_by(&self, dx: f64, dy: f64) -> ViewTransform {
        self.start.translated(dx, dy)
    }
}

/// Result of one pointer lifecycle dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanDispatch {
    /// A session opened; the host should acquire capture, after releasing
    /// the capture of any session it superseded.
    Started {
        capture: CaptureCommand,
        superseded: Option<CaptureCommand>,
    },
    /// The view should follow the pointer.
    Moved { view: ViewTransform },
    /// The session closed; the host should release capture.
    Ended { capture: CaptureCommand },
    /// Nothing changed.
    Ignored {
        phase: PanPhase,
        reason: PanIgnoredReason,
    },
}

/// Tracks at most one pan session.
#[derive(Debug, Clone, Default)]
pub struct PanTracker {
    active: Option<PanSession>,
}

impl PanTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Whether a session is open.
    #[must_use]
    pub const fn is_panning(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub const fn session(&self) -> Option<&PanSession> {
        self.active.as_ref()
    }

    /// Pointer pressed on the canvas.
    pub fn pointer_down(
        &mut self,
        pointer_id: u32,
        button: PointerButton,
        client: Point,
        on_component: bool,
        view: ViewTransform,
    ) -> PanDispatch {
        let phase = PanPhase::PointerDown;
        if button != PointerButton::Primary {
            return PanDispatch::Ignored {
                phase,
                reason: PanIgnoredReason::ButtonNotAllowed,
            };
        }
        if on_component {
            return PanDispatch::Ignored {
                phase,
                reason: PanIgnoredReason::OnComponent,
            };
        }
        let superseded = self
            .active
            .replace(PanSession {
                pointer_id,
                origin: client,
                start: view,
            })
            .map(|stale| CaptureCommand::Release {
                pointer_id: stale.pointer_id,
            });
        PanDispatch::Started {
            capture: CaptureCommand::Acquire { pointer_id },
            superseded,
        }
    }

    /// Pointer moved over (or, with capture, away from) the canvas.
    pub fn pointer_move(&self, client: Point) -> PanDispatch {
        match &self.active {
            Some(session) => PanDispatch::Moved {
                view: session.view_at(client),
            },
            None => PanDispatch::Ignored {
                phase: PanPhase::PointerMove,
                reason: PanIgnoredReason::NoActiveSession,
            },
        }
    }

    /// Close the session on pointer-up, pointer-cancel, or pointer-leave.
    pub fn end(&mut self, phase: PanPhase) -> PanDispatch {
        match self.active.take() {
            Some(session) => PanDispatch::Ended {
                capture: CaptureCommand::Release {
                    pointer_id: session.pointer_id,
                },
            },
            None => PanDispatch::Ignored {
                phase,
                reason: PanIgnoredReason::NoActiveSession,
            },
        }
    }
}
