#![forbid(unsafe_code)]

//! Troubleshooting wizard.
//!
//! [`WizardController`] walks a fixed list of steps. The first three steps
//! each ask one exclusive-choice [`Question`]; leaving such a step requires
//! a selection. The final step shows a summary and an action plan built by
//! [`recommendations_for`]. The active step is mirrored in the location
//! fragment (`#step-<n>`) for deep links and back-button support.

pub mod answers;
pub mod controller;
pub mod effect;
pub mod fragment;
pub mod recommend;

pub use answers::{Answers, Choice, Fluid, OptionParseError, Question, Suction, Symptom};
pub use controller::{Step, StepCheck, WizardController};
pub use effect::{ProgressView, SummaryField, SummaryView, WizardEffect};
pub use fragment::{parse_step_fragment, step_fragment};
pub use recommend::recommendations_for;
