#![forbid(unsafe_code)]

//! DOM mutations requested by the viewer.

#[cfg(feature = "serde")]
use serde::Serialize;

/// One host-side DOM mutation, in application order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "op", rename_all = "snake_case"))]
pub enum ViewerEffect {
    /// Set the viewport's CSS `transform`; update the scale display with
    /// `scale_label` when present.
    Transform {
        css: String,
        scale_label: Option<String>,
    },
    /// Text for the live region.
    Announce { text: String },
    /// Toggle the canvas `is-panning` class.
    Panning { active: bool },
    /// `canvas.setPointerCapture(pointer_id)`.
    AcquirePointer { pointer_id: u32 },
    /// `canvas.releasePointerCapture(pointer_id)` if still held.
    ReleasePointer { pointer_id: u32 },
    /// Mark `component` `is-active` and clear every other hotspot.
    Highlight { component: Option<usize> },
    /// Fill, position, and reveal the tooltip.
    ShowTooltip {
        component: usize,
        label: String,
        detail: String,
        left: f64,
        top: f64,
        flip: bool,
    },
    /// Drop `is-visible` and `is-flip`; the tooltip stays in layout.
    FadeTooltip,
    /// Set `hidden` on the tooltip.
    HideTooltip,
}
