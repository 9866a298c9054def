#![forbid(unsafe_code)]

//! Core: step wizard and diagram viewport state machines.
//!
//! # Role in plantkit
//! `plantkit-core` owns every rule the exercise pages enforce. It has no
//! DOM or JS types: a host (see `plantkit-web`) forwards user input as
//! method calls and applies the returned effects to the page.
//!
//! # Primary responsibilities
//! - **WizardController**: linear step navigation gated by per-step
//!   validation, derived recommendations, and `#step-<n>` fragment sync.
//! - **DiagramViewport**: pan/zoom transform over a fixed virtual canvas,
//!   focal-point zoom, edge clamping, and tooltip placement.
//! - **Event**: normalized key and pointer inputs shared by both.
//!
//! # How it fits in the system
//! Every operation runs synchronously and returns a `Vec` of effects. Time
//! only enters through [`clock::DeterministicClock`], which the host
//! advances explicitly, so a recorded input sequence always replays to the
//! same effects.

pub mod clock;
pub mod error;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod viewer;
pub mod wizard;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace, warn};

pub use error::MountError;
