#![forbid(unsafe_code)]

//! DOM mutations requested by the wizard.

#[cfg(feature = "serde")]
use serde::Serialize;

use super::answers::{Answers, Question};
use super::recommend::recommendations_for;

/// Shown in a summary field whose question is unanswered.
pub const UNANSWERED_MARK: &str = "—";

/// One host-side DOM mutation.
///
/// Effects are emitted in the order the host should apply them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "op", rename_all = "snake_case"))]
pub enum WizardEffect {
    /// Show step `index` and set `hidden`/`aria-hidden` on every other step.
    ShowStep { index: usize },
    /// Focus step `index` on the next animation frame.
    FocusStep { index: usize },
    /// `disabled` state of the `back` and `next` command buttons.
    NavButtons {
        back_disabled: bool,
        next_disabled: bool,
    },
    /// Progress bar attributes and marker classes.
    Progress(ProgressView),
    /// Replace the location fragment without adding a history entry.
    ReplaceFragment { fragment: String },
    /// Summary field texts and the action list.
    Summary(SummaryView),
    /// Text for the live region.
    Announce { text: String },
    /// Visibility of the error marker for `question`.
    StepError { question: Question, visible: bool },
    /// Uncheck every choice input.
    ClearSelections,
}

/// Progress indicator state for the active step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ProgressView {
    /// `aria-valuenow` (1-based step number).
    pub value: usize,
    /// Total number of steps.
    pub total: usize,
    /// Fill percentage, `round(value / total * 100)`.
    pub percent: u32,
    /// `aria-valuetext`.
    pub text: String,
    /// Marker at this index is `is-active`; markers before it are `is-complete`.
    pub active: usize,
}

impl ProgressView {
    /// Progress for the 0-based step `index` out of `total`.
    #[must_use]
    pub fn at(index: usize, total: usize) -> Self {
        let value = index + 1;
        let percent = if total == 0 {
            100
        } else {
            (value as f64 / total as f64 * 100.0).round() as u32
        };
        Self {
            value,
            total,
            percent,
            text: format!("Step {value} of {total}"),
            active: index,
        }
    }
}

/// One row of the answer summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SummaryField {
    pub question: Question,
    pub text: &'static str,
}

/// Rendered summary: one field per question plus the action plan.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SummaryView {
    pub fields: Vec<SummaryField>,
    pub actions: Vec<&'static str>,
}

impl SummaryView {
    #[must_use]
    pub fn from_answers(answers: &Answers) -> Self {
        let fields = Question::ALL
            .into_iter()
            .map(|question| SummaryField {
                question,
                text: answers
                    .get(question)
                    .map_or(UNANSWERED_MARK, |choice| choice.label()),
            })
            .collect();
        Self {
            fields,
            actions: recommendations_for(answers),
        }
    }
}
