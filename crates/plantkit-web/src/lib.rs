#![forbid(unsafe_code)]

//! WASM runners for the plantkit exercise pages.
//!
//! This crate provides [`WizardRunner`] and [`ViewerRunner`],
//! `wasm-bindgen`-exported structs that wrap the `plantkit-core` state
//! machines and expose them to JavaScript for host-driven execution.
//!
//! The page script owns the DOM. It sends one mount description at load
//! time, forwards each relevant DOM event as JSON, and applies the JSON
//! effect list it drains after every dispatch. Everything except the
//! `wasm` module also builds natively, which is how the runners are tested.

pub mod input_parser;
pub mod mount;
pub mod runner_core;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{ViewerRunner, WizardRunner};

pub use input_parser::{InputParseError, ViewerInput, WizardInput};
pub use mount::{MountFailure, ViewerMount, WizardMount};
pub use runner_core::{Dispatch, ViewerRunnerCore, WizardRunnerCore};
