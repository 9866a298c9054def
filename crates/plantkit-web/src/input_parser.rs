#![forbid(unsafe_code)]

//! JSON host-input parser.
//!
//! The page script serializes each DOM event it forwards as a small JSON
//! object tagged by `kind`. This module turns those objects into typed
//! [`WizardInput`] and [`ViewerInput`] values. Kinds a component does not
//! react to parse as `Ok(None)`; malformed JSON and missing fields are
//! errors. Pointer `up`/`cancel`/`leave` carry no required coordinates.
//!
//! # Schema
//!
//! ```text
//! wizard: {"kind":"action","action":"next"|"back"|"reset"}
//!         {"kind":"change","name":"symptom","value":"noise"}
//!         {"kind":"hashchange","hash":"#step-2"}
//! viewer: {"kind":"pointer","phase":"down","id":1,"button":0,"x":..,"y":..,"on_component":false}
//!         {"kind":"wheel","dy":-3,"x":..,"y":..}
//!         {"kind":"key","key":"ArrowUp","mods":1}
//!         {"kind":"action","action":"zoom-in"}
//!         {"kind":"resize","rect":{"left":..,"top":..,"width":..,"height":..}}
//!         {"kind":"component","phase":"focus","id":0,"rect":{..}}
//! ```
//!
//! `mods` uses the bit layout of [`Modifiers`]: Shift=1, Alt=2, Ctrl=4,
//! Meta=8.

use plantkit_core::event::{KeyCode, KeyEvent, Modifiers, PointerButton};
use plantkit_core::geometry::{Point, Rect};
use plantkit_core::viewer::{ComponentId, ControlAction};
use plantkit_core::wizard::Question;
use serde::Deserialize;

/// Errors from parsing host input JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputParseError {
    /// Malformed JSON.
    Json(String),
    /// Missing required field.
    MissingField(&'static str),
    /// Unknown pointer or component phase.
    UnknownPhase(String),
    /// Unknown `data-action` or choice-group name.
    UnknownName(String),
}

impl core::fmt::Display for InputParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "JSON parse error: {msg}"),
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::UnknownPhase(phase) => write!(f, "unknown phase: {phase}"),
            Self::UnknownName(name) => write!(f, "unknown name: {name}"),
        }
    }
}

impl std::error::Error for InputParseError {}

/// Client rectangle as produced by `getBoundingClientRect()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl From<RawRect> for Rect {
    fn from(raw: RawRect) -> Self {
        Rect::new(raw.left, raw.top, raw.width, raw.height)
    }
}

/// Internal deserialization target for every input kind.
#[derive(Debug, Deserialize)]
struct RawInput {
    kind: String,
    #[serde(default)]
    phase: Option<String>,
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    hash: Option<String>,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    mods: Option<i32>,
    #[serde(default)]
    id: Option<u32>,
    #[serde(default)]
    button: Option<i32>,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    dy: Option<f64>,
    #[serde(default)]
    on_component: Option<bool>,
    #[serde(default)]
    focus_within: Option<bool>,
    #[serde(default)]
    rect: Option<RawRect>,
}

// ---------------------------------------------------------------------------
// Wizard
// ---------------------------------------------------------------------------

/// A command button inside the wizard container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    Next,
    Back,
    Reset,
}

/// One host event for the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardInput {
    Action(WizardAction),
    /// A choice input changed.
    Change { question: Question, value: String },
    /// The location fragment changed.
    HashChange { hash: String },
}

/// Parse one JSON-encoded wizard event.
pub fn parse_wizard_input(json: &str) -> Result<Option<WizardInput>, InputParseError> {
    let raw = parse_raw(json)?;
    match raw.kind.as_str() {
        "action" => {
            let action = required(raw.action, "action")?;
            let action = match action.as_str() {
                "next" => WizardAction::Next,
                "back" => WizardAction::Back,
                "reset" => WizardAction::Reset,
                _ => return Err(InputParseError::UnknownName(action)),
            };
            Ok(Some(WizardInput::Action(action)))
        }
        "change" => {
            let name = required(raw.name, "name")?;
            let Some(question) = Question::from_key(&name) else {
                // Inputs outside the three choice groups are not ours.
                return Ok(None);
            };
            let value = required(raw.value, "value")?;
            Ok(Some(WizardInput::Change { question, value }))
        }
        "hashchange" => Ok(Some(WizardInput::HashChange {
            hash: raw.hash.unwrap_or_default(),
        })),
        _ => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// Viewer
// ---------------------------------------------------------------------------

/// Pointer lifecycle phase on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
    Leave,
}

/// Hotspot event phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComponentEvent {
    Focus { rect: Rect },
    Blur,
    /// `mouseenter`.
    Enter { rect: Rect },
    /// `mouseleave`; `focus_within` is whether the hotspot contains focus.
    Leave { focus_within: bool },
    Key { rect: Rect, key: KeyEvent },
}

/// One host event for the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerInput {
    Pointer {
        phase: PointerPhase,
        pointer_id: u32,
        button: PointerButton,
        client: Point,
        on_component: bool,
    },
    Wheel { delta_y: f64, client: Point },
    Key(KeyEvent),
    Action(ControlAction),
    Resize(Rect),
    Component {
        component: ComponentId,
        event: ComponentEvent,
    },
}

/// Parse one JSON-encoded viewer event.
pub fn parse_viewer_input(json: &str) -> Result<Option<ViewerInput>, InputParseError> {
    let raw = parse_raw(json)?;
    match raw.kind.as_str() {
        "pointer" => parse_pointer(&raw).map(Some),
        "wheel" => Ok(Some(ViewerInput::Wheel {
            delta_y: required(raw.dy, "dy")?,
            client: client_point(&raw)?,
        })),
        "key" => Ok(Some(ViewerInput::Key(parse_key(&raw)?))),
        "action" => {
            let action = required(raw.action, "action")?;
            match ControlAction::from_name(&action) {
                Some(action) => Ok(Some(ViewerInput::Action(action))),
                None => Err(InputParseError::UnknownName(action)),
            }
        }
        "resize" => Ok(Some(ViewerInput::Resize(
            required(raw.rect, "rect")?.into(),
        ))),
        "component" => parse_component(&raw).map(Some),
        _ => Ok(None),
    }
}

fn parse_raw(json: &str) -> Result<RawInput, InputParseError> {
    serde_json::from_str(json).map_err(|e| InputParseError::Json(e.to_string()))
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, InputParseError> {
    value.ok_or(InputParseError::MissingField(field))
}

fn client_point(raw: &RawInput) -> Result<Point, InputParseError> {
    Ok(Point::new(required(raw.x, "x")?, required(raw.y, "y")?))
}

fn parse_modifiers(mods: Option<i32>) -> Modifiers {
    let bits = mods.unwrap_or(0).clamp(0, i32::from(u8::MAX)) as u8;
    Modifiers::from_bits_truncate(bits)
}

/// Map a DOM `KeyboardEvent.key` value.
fn parse_key_code(key: &str) -> KeyCode {
    match key {
        "Enter" => KeyCode::Enter,
        "ArrowUp" | "Up" => KeyCode::Up,
        "ArrowDown" | "Down" => KeyCode::Down,
        "ArrowLeft" | "Left" => KeyCode::Left,
        "ArrowRight" | "Right" => KeyCode::Right,
        "Spacebar" => KeyCode::Char(' '),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => KeyCode::Unidentified,
            }
        }
    }
}

fn parse_key(raw: &RawInput) -> Result<KeyEvent, InputParseError> {
    let key = raw
        .key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or(InputParseError::MissingField("key"))?;
    Ok(KeyEvent::new(parse_key_code(key)).with_modifiers(parse_modifiers(raw.mods)))
}

fn parse_pointer(raw: &RawInput) -> Result<ViewerInput, InputParseError> {
    let phase = match required(raw.phase.as_deref(), "phase")? {
        "down" => PointerPhase::Down,
        "move" => PointerPhase::Move,
        "up" => PointerPhase::Up,
        "cancel" => PointerPhase::Cancel,
        "leave" => PointerPhase::Leave,
        other => return Err(InputParseError::UnknownPhase(other.to_owned())),
    };
    let (pointer_id, button) = if phase == PointerPhase::Down {
        let button = required(raw.button, "button")?;
        (
            required(raw.id, "id")?,
            PointerButton::from_dom(button.clamp(0, i32::from(u8::MAX)) as u8),
        )
    } else {
        (raw.id.unwrap_or(0), PointerButton::Primary)
    };
    let client = match phase {
        PointerPhase::Down | PointerPhase::Move => client_point(raw)?,
        PointerPhase::Up | PointerPhase::Cancel | PointerPhase::Leave => Point::default(),
    };
    Ok(ViewerInput::Pointer {
        phase,
        pointer_id,
        button,
        client,
        on_component: raw.on_component.unwrap_or(false),
    })
}

fn parse_component(raw: &RawInput) -> Result<ViewerInput, InputParseError> {
    let component = ComponentId(required(raw.id, "id")? as usize);
    let rect = || required(raw.rect, "rect").map(Rect::from);
    let event = match required(raw.phase.as_deref(), "phase")? {
        "focus" => ComponentEvent::Focus { rect: rect()? },
        "blur" => ComponentEvent::Blur,
        "enter" => ComponentEvent::Enter { rect: rect()? },
        "leave" => ComponentEvent::Leave {
            focus_within: raw.focus_within.unwrap_or(false),
        },
        "key" => ComponentEvent::Key {
            rect: rect()?,
            key: parse_key(raw)?,
        },
        other => return Err(InputParseError::UnknownPhase(other.to_owned())),
    };
    Ok(ViewerInput::Component { component, event })
}
