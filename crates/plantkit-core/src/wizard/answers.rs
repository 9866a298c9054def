#![forbid(unsafe_code)]

//! Questions, their closed option sets, and the answer record.

#[cfg(feature = "serde")]
use serde::Serialize;

/// One exclusive-choice question asked by the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Question {
    /// What the operator observes at the pump.
    Symptom,
    /// Suction pressure relative to the NPSH requirement.
    Suction,
    /// Condition of the pumped fluid.
    Fluid,
}

impl Question {
    /// All questions in step order.
    pub const ALL: [Self; 3] = [Self::Symptom, Self::Suction, Self::Fluid];

    /// Input group name used in the page markup.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Symptom => "symptom",
            Self::Suction => "suction",
            Self::Fluid => "fluid",
        }
    }

    /// Look up a question by its input group name.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.key() == key)
    }

    /// The question gating the step at `index`, if any.
    #[must_use]
    pub fn for_step(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Observed symptom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symptom {
    Noise,
    LowFlow,
    Vibration,
}

/// Suction condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suction {
    BelowLimit,
    Unstable,
    Normal,
}

/// Fluid condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fluid {
    Gas,
    Debris,
    Clear,
}

impl Symptom {
    pub const ALL: [Self; 3] = [Self::Noise, Self::LowFlow, Self::Vibration];

    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Noise => "noise",
            Self::LowFlow => "low-flow",
            Self::Vibration => "vibration",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Noise => "Severe inlet noise",
            Self::LowFlow => "Abrupt flow collapse",
            Self::Vibration => "High vibration at casing",
        }
    }

    /// First-line action for this symptom.
    #[must_use]
    pub const fn advice(self) -> &'static str {
        match self {
            Self::Noise => {
                "Throttle the discharge slightly to raise system pressure and monitor noise response."
            }
            Self::LowFlow => {
                "Inspect discharge piping for restrictions or valves that may be choking flow."
            }
            Self::Vibration => {
                "Check pump mounting hardware, coupling alignment, and bearing condition."
            }
        }
    }
}

impl Suction {
    pub const ALL: [Self; 3] = [Self::BelowLimit, Self::Unstable, Self::Normal];

    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::BelowLimit => "below-limit",
            Self::Unstable => "unstable",
            Self::Normal => "normal",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BelowLimit => "Below NPSH limit",
            Self::Unstable => "Unstable / oscillating",
            Self::Normal => "Within expected range",
        }
    }

    #[must_use]
    pub const fn advice(self) -> &'static str {
        match self {
            Self::BelowLimit => {
                "Increase suction head: open upstream valves, boost supply pressure, or raise tank level."
            }
            Self::Unstable => {
                "Eliminate upstream turbulence by smoothing suction piping and removing sharp elbows near the pump."
            }
            Self::Normal => {
                "Suction looks acceptable; focus on impeller condition and NPSH margin checks."
            }
        }
    }
}

impl Fluid {
    pub const ALL: [Self; 3] = [Self::Gas, Self::Debris, Self::Clear];

    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Gas => "gas",
            Self::Debris => "debris",
            Self::Clear => "clear",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gas => "Foaming / entrained gas",
            Self::Debris => "Suspended solids present",
            Self::Clear => "Clear, no visible issues",
        }
    }

    #[must_use]
    pub const fn advice(self) -> &'static str {
        match self {
            Self::Gas => {
                "Install deaeration or a gas separation drum to strip entrained air before the pump."
            }
            Self::Debris => {
                "Flush the suction line and add a finer strainer to keep particulates out of the impeller."
            }
            Self::Clear => {
                "Fluid quality looks good; continue monitoring for entrainment during load changes."
            }
        }
    }

    /// Whether the fluid carries something that erodes the impeller.
    #[must_use]
    pub const fn is_contaminated(self) -> bool {
        matches!(self, Self::Gas | Self::Debris)
    }
}

/// A selected option, tagged with the question it answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    Symptom(Symptom),
    Suction(Suction),
    Fluid(Fluid),
}

impl Choice {
    /// Parse the `value` attribute of a radio input in `question`'s group.
    pub fn parse(question: Question, value: &str) -> Result<Self, OptionParseError> {
        let found = match question {
            Question::Symptom => Symptom::ALL
                .into_iter()
                .find(|o| o.value() == value)
                .map(Self::Symptom),
            Question::Suction => Suction::ALL
                .into_iter()
                .find(|o| o.value() == value)
                .map(Self::Suction),
            Question::Fluid => Fluid::ALL
                .into_iter()
                .find(|o| o.value() == value)
                .map(Self::Fluid),
        };
        found.ok_or_else(|| OptionParseError {
            question,
            value: value.to_owned(),
        })
    }

    /// Human-readable label shown in the summary.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Symptom(o) => o.label(),
            Self::Suction(o) => o.label(),
            Self::Fluid(o) => o.label(),
        }
    }
}

/// An option value that does not belong to the question's group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionParseError {
    pub question: Question,
    pub value: String,
}

impl core::fmt::Display for OptionParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "unknown option {:?} for question {}",
            self.value,
            self.question.key()
        )
    }
}

impl std::error::Error for OptionParseError {}

/// One optional choice per question.
///
/// Used both for the recorded answers and for the live state of the
/// choice inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Answers {
    pub symptom: Option<Symptom>,
    pub suction: Option<Suction>,
    pub fluid: Option<Fluid>,
}

impl Answers {
    /// Nothing answered.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            symptom: None,
            suction: None,
            fluid: None,
        }
    }

    /// The choice recorded for `question`.
    #[must_use]
    pub fn get(&self, question: Question) -> Option<Choice> {
        match question {
            Question::Symptom => self.symptom.map(Choice::Symptom),
            Question::Suction => self.suction.map(Choice::Suction),
            Question::Fluid => self.fluid.map(Choice::Fluid),
        }
    }

    /// Record `choice` under its question, replacing any previous one.
    pub fn record(&mut self, choice: Choice) {
        match choice {
            Choice::Symptom(o) => self.symptom = Some(o),
            Choice::Suction(o) => self.suction = Some(o),
            Choice::Fluid(o) => self.fluid = Some(o),
        }
    }

    /// Forget every choice.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Whether every question has a choice.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.symptom.is_some() && self.suction.is_some() && self.fluid.is_some()
    }
}
