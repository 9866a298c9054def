#![forbid(unsafe_code)]

//! Pannable, zoomable diagram viewer.
//!
//! [`DiagramViewport`] maps a fixed-size virtual diagram onto the canvas
//! through a [`ViewTransform`]. Pointer drags pan, the wheel and keyboard
//! zoom around a focal point, and component hotspots show a tooltip on
//! hover or focus.

pub mod config;
pub mod effect;
pub mod keyboard;
pub mod pan;
pub mod tooltip;
pub mod transform;
pub mod viewport;

pub use config::{
    declared_diagram_size, declared_dimension, ViewerConfig, ViewerConfigError,
    DEFAULT_DIAGRAM_HEIGHT, DEFAULT_DIAGRAM_WIDTH,
};
pub use effect::ViewerEffect;
pub use keyboard::{key_command, ControlAction, ViewerCommand};
pub use pan::{CaptureCommand, PanDispatch, PanIgnoredReason, PanPhase, PanSession, PanTracker};
pub use tooltip::{
    place_tooltip, ComponentId, DiagramComponent, TooltipPlacement, TooltipState,
    DEFAULT_COMPONENT_LABEL,
};
pub use transform::ViewTransform;
pub use viewport::{DiagramViewport, ViewerAnchors, RESET_ANNOUNCEMENT};
