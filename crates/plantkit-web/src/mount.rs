#![forbid(unsafe_code)]

//! Mount descriptions.
//!
//! On page load the script inspects the markup once and sends a JSON
//! description of what it found: which anchors exist, step titles, the
//! declared diagram size, hotspot labels. The runners build their
//! controller from it; a description that lacks a required anchor leaves
//! the runner unmounted.

use plantkit_core::MountError;
use plantkit_core::viewer::{
    declared_diagram_size, DiagramComponent, DiagramViewport, ViewerAnchors, ViewerConfig,
    ViewerConfigError,
};
use plantkit_core::wizard::WizardController;
use serde::Deserialize;

use crate::input_parser::RawRect;

/// Why a mount description produced no controller.
#[derive(Debug, Clone, PartialEq)]
pub enum MountFailure {
    /// Malformed JSON.
    Json(String),
    /// A required anchor is absent (or the wizard has no steps).
    Mount(MountError),
    /// The configuration overrides are unusable.
    Config(ViewerConfigError),
}

impl core::fmt::Display for MountFailure {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "mount description parse error: {msg}"),
            Self::Mount(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "invalid viewer config: {err}"),
        }
    }
}

impl std::error::Error for MountFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(_) => None,
            Self::Mount(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<MountError> for MountFailure {
    fn from(err: MountError) -> Self {
        Self::Mount(err)
    }
}

impl From<ViewerConfigError> for MountFailure {
    fn from(err: ViewerConfigError) -> Self {
        Self::Config(err)
    }
}

/// What the page script found under `[data-wizard]`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WizardMount {
    /// Whether the `[data-wizard]` container exists.
    pub container: bool,
    /// Title text of each `.wizard-step`, in document order.
    pub steps: Vec<Option<String>>,
    /// `location.hash` at load time.
    pub hash: String,
}

impl WizardMount {
    pub fn parse(json: &str) -> Result<Self, MountFailure> {
        serde_json::from_str(json).map_err(|e| MountFailure::Json(e.to_string()))
    }

    /// Build and mount a controller.
    pub fn build(&self) -> Result<WizardController, MountFailure> {
        if !self.container {
            return Err(MountError::MissingAnchor("container").into());
        }
        let mut controller = WizardController::new(self.steps.iter().map(Option::as_deref))?;
        controller.mount(&self.hash);
        Ok(controller)
    }
}

/// One `[data-component]` hotspot.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ComponentMount {
    pub label: Option<String>,
    pub detail: Option<String>,
}

/// What the page script found under `[data-viewer]`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ViewerMount {
    /// Client rectangle of `[data-canvas]`, absent when missing.
    pub canvas: Option<RawRect>,
    /// Whether `[data-viewport]` exists.
    pub viewport: bool,
    /// `data-diagram-width` as written in the markup.
    pub diagram_width: Option<String>,
    /// `data-diagram-height` as written in the markup.
    pub diagram_height: Option<String>,
    /// Tooltip with label and detail slots.
    pub tooltip: bool,
    pub live_region: bool,
    pub scale_display: bool,
    pub components: Vec<ComponentMount>,
    /// Overrides for individual [`ViewerConfig`] fields.
    pub config: ViewerConfig,
}

impl ViewerMount {
    pub fn parse(json: &str) -> Result<Self, MountFailure> {
        serde_json::from_str(json).map_err(|e| MountFailure::Json(e.to_string()))
    }

    /// Build and mount a viewport.
    pub fn build(&self) -> Result<DiagramViewport, MountFailure> {
        let Some(canvas) = self.canvas else {
            return Err(MountError::MissingAnchor("canvas").into());
        };
        if !self.viewport {
            return Err(MountError::MissingAnchor("viewport").into());
        }
        let diagram = declared_diagram_size(
            self.diagram_width.as_deref(),
            self.diagram_height.as_deref(),
        );
        let anchors = ViewerAnchors {
            tooltip: self.tooltip,
            live_region: self.live_region,
            scale_display: self.scale_display,
        };
        let components = self
            .components
            .iter()
            .map(|c| DiagramComponent::new(c.label.as_deref(), c.detail.as_deref()))
            .collect();
        let mut viewport =
            DiagramViewport::new(self.config.clone(), diagram, canvas.into(), anchors, components)?;
        viewport.mount();
        Ok(viewport)
    }
}
