#![forbid(unsafe_code)]

//! Linear step state machine.
//!
//! # Invariants
//!
//! 1. `0 <= index < total` at all times.
//! 2. Answers change only through a passing [`WizardController::validate`]
//!    or [`WizardController::reset`].
//! 3. A `ReplaceFragment` effect is emitted only when the fragment actually
//!    changes, so repeated navigation to the same step is silent.
//! 4. Moving backwards never validates.

#[cfg(feature = "tracing")]
use crate::logging::{debug, trace};
#[cfg(not(feature = "tracing"))]
use crate::{debug, trace};

use super::answers::{Answers, Choice, OptionParseError, Question};
use super::effect::{ProgressView, SummaryView, WizardEffect};
use super::fragment::{parse_step_fragment, step_fragment};
use crate::error::MountError;

/// One page of the wizard. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    index: usize,
    label: String,
    question: Option<Question>,
}

impl Step {
    /// Step at `index` with an optional title; the first three steps are
    /// bound to the symptom, suction, and fluid questions in order.
    #[must_use]
    pub fn new(index: usize, title: Option<&str>) -> Self {
        let label = match title.map(str::trim) {
            Some(t) if !t.is_empty() => t.to_owned(),
            _ => format!("Step {}", index + 1),
        };
        Self {
            index,
            label,
            question: Question::for_step(index),
        }
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Question whose answer gates leaving this step, if any.
    #[must_use]
    pub const fn question(&self) -> Option<Question> {
        self.question
    }
}

/// Outcome of validating one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepCheck {
    /// The step may be left.
    Passed,
    /// No option is selected for the step's question.
    Missing(Question),
}

impl StepCheck {
    #[must_use]
    pub const fn passed(self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Page-lifetime controller for one mounted wizard.
///
/// Every operation appends [`WizardEffect`]s to an internal queue; the
/// host drains them with [`drain_effects`](Self::drain_effects).
#[derive(Debug, Clone)]
pub struct WizardController {
    steps: Vec<Step>,
    index: usize,
    answers: Answers,
    checked: Answers,
    location_fragment: String,
    effects: Vec<WizardEffect>,
}

impl WizardController {
    /// Build a controller from the step titles found in the container.
    ///
    /// Fails with [`MountError::NoSteps`] when the container has no steps.
    pub fn new<I, S>(titles: I) -> Result<Self, MountError>
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let steps: Vec<Step> = titles
            .into_iter()
            .enumerate()
            .map(|(index, title)| {
                let title: Option<&str> = title.as_ref().map(|t| t.as_ref());
                Step::new(index, title)
            })
            .collect();
        if steps.is_empty() {
            return Err(MountError::NoSteps);
        }
        Ok(Self {
            steps,
            index: 0,
            answers: Answers::new(),
            checked: Answers::new(),
            location_fragment: String::new(),
            effects: Vec::new(),
        })
    }

    /// Initial render: jump to the step named by `location_fragment`
    /// (or the first step) and bring every indicator in sync.
    pub fn mount(&mut self, location_fragment: &str) {
        self.location_fragment = location_fragment.to_owned();
        self.index = parse_step_fragment(location_fragment, self.total());
        debug!(index = self.index, total = self.total(), "wizard mounted");

        self.effects.push(WizardEffect::ShowStep { index: self.index });
        self.push_chrome();
        self.push_summary();
        self.sync_fragment();
        self.announce();
        self.effects
            .push(WizardEffect::FocusStep { index: self.index });
    }

    /// Current 0-based step index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of steps.
    #[must_use]
    pub fn total(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Recorded answers.
    #[must_use]
    pub const fn answers(&self) -> &Answers {
        &self.answers
    }

    /// Fragment the controller believes the location currently has.
    #[must_use]
    pub fn location_fragment(&self) -> &str {
        &self.location_fragment
    }

    /// Current summary view.
    #[must_use]
    pub fn summary(&self) -> SummaryView {
        SummaryView::from_answers(&self.answers)
    }

    /// Take every effect produced since the last drain.
    pub fn drain_effects(&mut self) -> Vec<WizardEffect> {
        std::mem::take(&mut self.effects)
    }

    fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    fn clamp_index(&self, target: isize) -> usize {
        usize::try_from(target).map_or(0, |t| t.min(self.last_index()))
    }

    /// Navigate to `target`, clamped to the valid step range.
    ///
    /// Navigating to the current step only re-renders the summary (and
    /// announces when asked).
    pub fn go_to(&mut self, target: isize, announce: bool) {
        let next = self.clamp_index(target);
        if next == self.index {
            trace!(index = next, "go_to current step");
            self.push_summary();
            if announce {
                self.announce();
            }
            return;
        }

        debug!(from = self.index, to = next, "wizard step change");
        self.index = next;
        self.effects.push(WizardEffect::ShowStep { index: next });
        self.effects.push(WizardEffect::FocusStep { index: next });
        self.push_chrome();
        self.sync_fragment();
        if next == self.last_index() {
            self.push_summary();
        }
        if announce {
            self.announce();
        }
    }

    /// Check the selection gating step `index` and record it on success.
    ///
    /// Steps without a question always pass.
    pub fn validate(&mut self, index: usize) -> StepCheck {
        let question = self.steps.get(index).and_then(Step::question);
        if let Some(question) = question {
            let Some(choice) = self.checked.get(question) else {
                debug!(index, question = question.key(), "step validation failed");
                self.effects.push(WizardEffect::StepError {
                    question,
                    visible: true,
                });
                return StepCheck::Missing(question);
            };
            self.effects.push(WizardEffect::StepError {
                question,
                visible: false,
            });
            self.answers.record(choice);
        }
        self.push_summary();
        StepCheck::Passed
    }

    /// Validate the current step, then move forward. Returns whether the
    /// step passed validation.
    pub fn advance(&mut self) -> bool {
        if !self.validate(self.index).passed() {
            return false;
        }
        self.go_to(self.index as isize + 1, true);
        true
    }

    /// Move back one step without validation.
    pub fn retreat(&mut self) {
        self.go_to(self.index as isize - 1, true);
    }

    /// Clear every answer and selection and return to the first step.
    pub fn reset(&mut self) {
        debug!("wizard reset");
        self.answers.clear();
        self.checked.clear();
        self.effects.push(WizardEffect::ClearSelections);
        for question in Question::ALL {
            self.effects.push(WizardEffect::StepError {
                question,
                visible: false,
            });
        }
        self.push_summary();
        self.go_to(0, true);
    }

    /// Mirror a `change` on a choice input: remember the checked option
    /// and hide that question's error marker.
    pub fn select(&mut self, question: Question, value: &str) -> Result<(), OptionParseError> {
        let choice = Choice::parse(question, value)?;
        trace!(question = question.key(), value, "choice selected");
        self.checked.record(choice);
        self.effects.push(WizardEffect::StepError {
            question,
            visible: false,
        });
        Ok(())
    }

    /// React to a `hashchange`: follow the fragment if it names another step.
    pub fn hash_changed(&mut self, fragment: &str) {
        self.location_fragment = fragment.to_owned();
        let target = parse_step_fragment(fragment, self.total());
        if target != self.index {
            self.go_to(target as isize, true);
        }
    }

    fn push_chrome(&mut self) {
        self.effects.push(WizardEffect::NavButtons {
            back_disabled: self.index == 0,
            next_disabled: self.index >= self.last_index(),
        });
        self.effects
            .push(WizardEffect::Progress(ProgressView::at(self.index, self.total())));
    }

    fn push_summary(&mut self) {
        self.effects.push(WizardEffect::Summary(self.summary()));
    }

    fn sync_fragment(&mut self) {
        let target = step_fragment(self.index);
        if self.location_fragment == target {
            return;
        }
        self.location_fragment.clone_from(&target);
        self.effects
            .push(WizardEffect::ReplaceFragment { fragment: target });
    }

    fn announce(&mut self) {
        let step = &self.steps[self.index];
        let text = format!(
            "Now on step {} of {}: {}.",
            self.index + 1,
            self.total(),
            step.label()
        );
        self.effects.push(WizardEffect::Announce { text });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::answers::{Fluid, Suction, Symptom};
    use pretty_assertions::assert_eq;

    fn wizard() -> WizardController {
        let titles = [
            Some("Describe the symptom"),
            Some("Check suction"),
            Some("Inspect the fluid"),
            Some("Action plan"),
        ];
        let mut w = WizardController::new(titles).expect("four steps");
        w.mount("");
        w.drain_effects();
        w
    }

    #[test]
    fn empty_container_is_not_mounted() {
        let titles: [Option<&str>; 0] = [];
        assert_eq!(
            WizardController::new(titles).unwrap_err(),
            MountError::NoSteps
        );
    }

    #[test]
    fn untitled_steps_get_numbered_labels() {
        let w = WizardController::new([None, Some("  "), Some(" Fluid ")]).unwrap();
        let labels: Vec<&str> = w.steps().iter().map(Step::label).collect();
        assert_eq!(labels, vec!["Step 1", "Step 2", "Fluid"]);
    }

    #[test]
    fn mount_renders_initial_state_and_syncs_fragment() {
        let mut w = WizardController::new([Some("A"), Some("B"), Some("C")]).unwrap();
        w.mount("#step-2");
        let effects = w.drain_effects();
        assert_eq!(w.index(), 1);
        assert_eq!(effects[0], WizardEffect::ShowStep { index: 1 });
        assert_eq!(
            effects[1],
            WizardEffect::NavButtons {
                back_disabled: false,
                next_disabled: false
            }
        );
        assert!(
            !effects
                .iter()
                .any(|e| matches!(e, WizardEffect::ReplaceFragment { .. })),
            "fragment already matches"
        );
        assert_eq!(
            effects.last(),
            Some(&WizardEffect::FocusStep { index: 1 })
        );
    }

    #[test]
    fn mount_with_garbage_fragment_replaces_it() {
        let mut w = WizardController::new([Some("A"), Some("B")]).unwrap();
        w.mount("#overview");
        let effects = w.drain_effects();
        assert_eq!(w.index(), 0);
        assert!(effects.contains(&WizardEffect::ReplaceFragment {
            fragment: "#step-1".into()
        }));
    }

    #[test]
    fn advance_blocked_without_selection() {
        let mut w = wizard();
        assert!(!w.advance());
        assert_eq!(w.index(), 0);
        assert_eq!(
            w.drain_effects(),
            vec![WizardEffect::StepError {
                question: Question::Symptom,
                visible: true
            }]
        );
        assert_eq!(w.answers(), &Answers::new());
    }

    #[test]
    fn advance_records_answer_and_moves() {
        let mut w = wizard();
        w.select(Question::Symptom, "noise").unwrap();
        assert!(w.advance());
        assert_eq!(w.index(), 1);
        assert_eq!(w.answers().symptom, Some(Symptom::Noise));
        let effects = w.drain_effects();
        assert!(effects.contains(&WizardEffect::ReplaceFragment {
            fragment: "#step-2".into()
        }));
        assert!(effects.contains(&WizardEffect::Announce {
            text: "Now on step 2 of 4: Check suction.".into()
        }));
        assert!(effects.contains(&WizardEffect::NavButtons {
            back_disabled: false,
            next_disabled: false
        }));
    }

    #[test]
    fn selection_alone_does_not_record_answer() {
        let mut w = wizard();
        w.select(Question::Symptom, "vibration").unwrap();
        assert_eq!(w.answers().symptom, None);
        assert_eq!(
            w.drain_effects(),
            vec![WizardEffect::StepError {
                question: Question::Symptom,
                visible: false
            }]
        );
    }

    #[test]
    fn unknown_option_is_rejected() {
        let mut w = wizard();
        assert!(w.select(Question::Fluid, "lava").is_err());
        assert!(w.drain_effects().is_empty());
    }

    #[test]
    fn retreat_at_first_step_stays_put() {
        let mut w = wizard();
        w.retreat();
        assert_eq!(w.index(), 0);
        let effects = w.drain_effects();
        assert!(matches!(effects[0], WizardEffect::Summary(_)));
        assert!(matches!(effects[1], WizardEffect::Announce { .. }));
        assert_eq!(effects.len(), 2);
    }

    #[test]
    fn go_to_same_step_is_idempotent() {
        let mut w = wizard();
        w.go_to(2, false);
        w.drain_effects();
        w.go_to(2, false);
        let first = w.drain_effects();
        w.go_to(2, false);
        let second = w.drain_effects();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
        assert_eq!(w.location_fragment(), "#step-3");
    }

    #[test]
    fn last_step_renders_summary_and_disables_next() {
        let mut w = wizard();
        w.go_to(99, true);
        assert_eq!(w.index(), 3);
        let effects = w.drain_effects();
        assert!(effects.contains(&WizardEffect::NavButtons {
            back_disabled: false,
            next_disabled: true
        }));
        assert!(effects.iter().any(|e| matches!(e, WizardEffect::Summary(_))));
    }

    #[test]
    fn full_walkthrough_builds_plan() {
        let mut w = wizard();
        for (q, v) in [
            (Question::Symptom, "noise"),
            (Question::Suction, "below-limit"),
            (Question::Fluid, "clear"),
        ] {
            w.select(q, v).unwrap();
            assert!(w.advance());
        }
        assert_eq!(w.index(), 3);
        assert!(w.answers().is_complete());
        assert_eq!(w.answers().fluid, Some(Fluid::Clear));
        let summary = w.summary();
        assert_eq!(summary.fields[1].text, Suction::BelowLimit.label());
        assert_eq!(summary.actions.len(), 5);
        // Last step: advancing again validates nothing and stays put.
        assert!(w.advance());
        assert_eq!(w.index(), 3);
    }

    #[test]
    fn reset_clears_everything() {
        let mut w = wizard();
        w.select(Question::Symptom, "low-flow").unwrap();
        w.advance();
        w.drain_effects();

        w.reset();
        assert_eq!(w.index(), 0);
        assert_eq!(w.answers(), &Answers::new());
        let effects = w.drain_effects();
        assert_eq!(effects[0], WizardEffect::ClearSelections);
        assert!(effects.contains(&WizardEffect::ReplaceFragment {
            fragment: "#step-1".into()
        }));
        // Selections are gone too: the first step blocks again.
        assert!(!w.advance());
    }

    #[test]
    fn hash_change_navigates_without_replacing() {
        let mut w = wizard();
        w.hash_changed("#step-3");
        assert_eq!(w.index(), 2);
        let effects = w.drain_effects();
        assert!(
            !effects
                .iter()
                .any(|e| matches!(e, WizardEffect::ReplaceFragment { .. }))
        );
        w.hash_changed("#step-3");
        assert!(w.drain_effects().is_empty());
    }

    #[test]
    fn hash_change_to_garbage_returns_home() {
        let mut w = wizard();
        w.go_to(2, false);
        w.drain_effects();
        w.hash_changed("#contact");
        assert_eq!(w.index(), 0);
        assert!(w.drain_effects().contains(&WizardEffect::ReplaceFragment {
            fragment: "#step-1".into()
        }));
    }

    #[test]
    fn validate_beyond_questions_passes() {
        let mut w = wizard();
        assert_eq!(w.validate(3), StepCheck::Passed);
        assert_eq!(w.validate(40), StepCheck::Passed);
    }
}
