#![forbid(unsafe_code)]

//! Canonical input types.
//!
//! Hosts translate DOM `KeyboardEvent` and `PointerEvent` values into these
//! types before handing them to a component.
//!
//! # Design Notes
//!
//! - Pointer coordinates are client-space CSS pixels (`clientX`/`clientY`)
//! - `Modifiers` use bitflags for easy combination
//! - Pointer buttons follow the DOM `button` numbering

use bitflags::bitflags;

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Check if any platform modifier (Alt, Ctrl, Meta) is held.
    ///
    /// Such chords belong to the browser and are never interpreted.
    #[must_use]
    pub const fn has_platform_modifier(&self) -> bool {
        self.modifiers.intersects(Modifiers::PLATFORM)
    }
}

/// Key codes the components react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character key (`+`, `-`, `0`, space, ...).
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,

    /// Any key without a dedicated variant.
    Unidentified,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Meta/Command key.
        const META  = 0b1000;
        /// Modifiers reserved for browser and OS shortcuts.
        const PLATFORM = Self::ALT.bits() | Self::CTRL.bits() | Self::META.bits();
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// Pointer button identifiers (DOM `PointerEvent.button`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Main button, usually the left mouse button or a touch contact.
    Primary,

    /// Auxiliary button, usually the wheel button.
    Auxiliary,

    /// Secondary button, usually the right mouse button.
    Secondary,

    /// Back/forward or vendor-specific buttons.
    Other(u8),
}

impl PointerButton {
    /// Map a DOM `button` number.
    #[must_use]
    pub const fn from_dom(button: u8) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}
