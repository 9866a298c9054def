#![forbid(unsafe_code)]

//! Keyboard and control-button bindings.

use crate::event::{KeyCode, KeyEvent};

use super::config::ViewerConfig;

/// A viewer action decoded from a key or a control button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerCommand {
    /// Shift the translation, then clamp.
    PanBy { dx: f64, dy: f64 },
    /// Multiply the scale around the canvas center.
    ZoomAtCenter { factor: f64 },
    /// Scale 100%, centered.
    Reset,
}

/// Decode a key press on the viewer root.
///
/// Returns `None` for keys the viewer does not handle and for any chord
/// involving Alt, Ctrl, or Meta.
#[must_use]
pub fn key_command(key: &KeyEvent, config: &ViewerConfig) -> Option<ViewerCommand> {
    if key.has_platform_modifier() {
        return None;
    }
    let (step, zoom) = if key.shift() {
        (config.pan_step_fast, config.key_zoom_step_fast)
    } else {
        (config.pan_step, config.key_zoom_step)
    };
    let command = match key.code {
        KeyCode::Up => ViewerCommand::PanBy { dx: 0.0, dy: step },
        KeyCode::Down => ViewerCommand::PanBy { dx: 0.0, dy: -step },
        KeyCode::Left => ViewerCommand::PanBy { dx: step, dy: 0.0 },
        KeyCode::Right => ViewerCommand::PanBy { dx: -step, dy: 0.0 },
        KeyCode::Char('+' | '=') => ViewerCommand::ZoomAtCenter { factor: zoom },
        KeyCode::Char('-' | '_') => ViewerCommand::ZoomAtCenter { factor: 1.0 / zoom },
        KeyCode::Char('0') => ViewerCommand::Reset,
        _ => return None,
    };
    Some(command)
}

/// A `data-action` control under the viewer root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    ZoomIn,
    ZoomOut,
    ResetView,
}

impl ControlAction {
    /// Parse a `data-action` value.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "zoom-in" => Some(Self::ZoomIn),
            "zoom-out" => Some(Self::ZoomOut),
            "reset-view" => Some(Self::ResetView),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ZoomIn => "zoom-in",
            Self::ZoomOut => "zoom-out",
            Self::ResetView => "reset-view",
        }
    }

    /// Command this control triggers.
    #[must_use]
    pub fn command(self, config: &ViewerConfig) -> ViewerCommand {
        match self {
            Self::ZoomIn => ViewerCommand::ZoomAtCenter {
                factor: config.zoom_step,
            },
            Self::ZoomOut => ViewerCommand::ZoomAtCenter {
                factor: 1.0 / config.zoom_step,
            },
            Self::ResetView => ViewerCommand::Reset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Modifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code)
    }

    #[test]
    fn arrows_pan_content_toward_the_key() {
        let config = ViewerConfig::default();
        assert_eq!(
            key_command(&key(KeyCode::Up), &config),
            Some(ViewerCommand::PanBy { dx: 0.0, dy: 70.0 })
        );
        assert_eq!(
            key_command(&key(KeyCode::Left), &config),
            Some(ViewerCommand::PanBy { dx: 70.0, dy: 0.0 })
        );
        assert_eq!(
            key_command(&key(KeyCode::Right).with_modifiers(Modifiers::SHIFT), &config),
            Some(ViewerCommand::PanBy { dx: -120.0, dy: 0.0 })
        );
    }

    #[test]
    fn zoom_keys_and_shift_step() {
        let config = ViewerConfig::default();
        assert_eq!(
            key_command(&key(KeyCode::Char('=')), &config),
            Some(ViewerCommand::ZoomAtCenter { factor: 1.1 })
        );
        assert_eq!(
            key_command(&key(KeyCode::Char('+')).with_modifiers(Modifiers::SHIFT), &config),
            Some(ViewerCommand::ZoomAtCenter { factor: 1.2 })
        );
        assert_eq!(
            key_command(&key(KeyCode::Char('_')).with_modifiers(Modifiers::SHIFT), &config),
            Some(ViewerCommand::ZoomAtCenter { factor: 1.0 / 1.2 })
        );
        assert_eq!(
            key_command(&key(KeyCode::Char('0')), &config),
            Some(ViewerCommand::Reset)
        );
    }

    #[test]
    fn platform_chords_and_other_keys_pass_through() {
        let config = ViewerConfig::default();
        for modifier in [Modifiers::ALT, Modifiers::CTRL, Modifiers::META] {
            assert_eq!(
                key_command(&key(KeyCode::Char('0')).with_modifiers(modifier), &config),
                None
            );
        }
        assert_eq!(key_command(&key(KeyCode::Char('a')), &config), None);
        assert_eq!(key_command(&key(KeyCode::Enter), &config), None);
    }

    #[test]
    fn control_names() {
        for action in [ControlAction::ZoomIn, ControlAction::ZoomOut, ControlAction::ResetView] {
            assert_eq!(ControlAction::from_name(action.name()), Some(action));
        }
        assert_eq!(ControlAction::from_name("pan"), None);
        assert_eq!(
            ControlAction::ZoomOut.command(&ViewerConfig::default()),
            ViewerCommand::ZoomAtCenter { factor: 1.0 / 1.1 }
        );
    }
}
