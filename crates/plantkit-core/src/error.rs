#![forbid(unsafe_code)]

//! Mount-time errors shared by both components.

/// Why a component could not attach to its page region.
///
/// A component that fails to mount is treated as absent from the page:
/// hosts keep no controller and every later input becomes a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountError {
    /// A required DOM anchor was not present in the mount description.
    MissingAnchor(&'static str),
    /// The wizard container declared no steps.
    NoSteps,
}

impl core::fmt::Display for MountError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingAnchor(anchor) => write!(f, "missing required anchor: {anchor}"),
            Self::NoSteps => write!(f, "wizard declares no steps"),
        }
    }
}

impl std::error::Error for MountError {}
