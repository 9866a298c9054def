#![forbid(unsafe_code)]

//! Action plan derived from the wizard answers.
//!
//! Each answered field contributes its own advice, then two combination
//! rules and one unconditional follow-up are appended. The list keeps
//! insertion order and drops exact duplicates.

use super::answers::{Answers, Fluid, Suction, Symptom};

/// Shown instead of a plan while any question is unanswered.
pub const INCOMPLETE_PLACEHOLDER: &str =
    "Complete all prior steps to generate a targeted action plan.";

/// Urgent action when inlet noise coincides with suction below NPSH.
pub const CAVITATION_URGENT: &str =
    "Reduce pump speed or raise supply level to immediately restore NPSH margin and halt cavitation.";

/// Follow-up when the fluid carries gas or solids.
pub const IMPELLER_INSPECTION: &str =
    "Schedule an impeller inspection for pitting or erosion caused by cavitation or contamination.";

/// Always the last item of a complete plan.
pub const TREND_FOLLOW_UP: &str =
    "Trend vibration, noise, and suction readings over the next 24 hours to confirm resolution.";

/// A fully answered questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Complete {
    symptom: Symptom,
    suction: Suction,
    fluid: Fluid,
}

impl Complete {
    fn from_answers(answers: &Answers) -> Option<Self> {
        Some(Self {
            symptom: answers.symptom?,
            suction: answers.suction?,
            fluid: answers.fluid?,
        })
    }
}

fn is_cavitating(c: &Complete) -> bool {
    c.symptom == Symptom::Noise && c.suction == Suction::BelowLimit
}

fn is_contaminated(c: &Complete) -> bool {
    c.fluid.is_contaminated()
}

/// Cross-field rules, evaluated in order after the per-field advice.
const COMBINATION_RULES: [(fn(&Complete) -> bool, &str); 2] = [
    (is_cavitating, CAVITATION_URGENT),
    (is_contaminated, IMPELLER_INSPECTION),
];

fn push_unique(plan: &mut Vec<&'static str>, item: &'static str) {
    if !plan.contains(&item) {
        plan.push(item);
    }
}

/// Build the ordered, de-duplicated action plan for `answers`.
#[must_use]
pub fn recommendations_for(answers: &Answers) -> Vec<&'static str> {
    let Some(complete) = Complete::from_answers(answers) else {
        return vec![INCOMPLETE_PLACEHOLDER];
    };

    let mut plan = Vec::with_capacity(6);
    push_unique(&mut plan, complete.symptom.advice());
    push_unique(&mut plan, complete.suction.advice());
    push_unique(&mut plan, complete.fluid.advice());
    for (applies, action) in COMBINATION_RULES {
        if applies(&complete) {
            push_unique(&mut plan, action);
        }
    }
    push_unique(&mut plan, TREND_FOLLOW_UP);
    plan
}
