#![forbid(unsafe_code)]

//! Component hotspots and tooltip placement/debounce.

use core::time::Duration;

use crate::geometry::Rect;

/// Label used for a hotspot that declares none.
pub const DEFAULT_COMPONENT_LABEL: &str = "Component";

/// Index of a hotspot in the order the page lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub usize);

/// A diagram hotspot's tooltip content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramComponent {
    label: String,
    detail: String,
}

impl DiagramComponent {
    /// Hotspot with optional label and detail; blanks fall back to defaults.
    #[must_use]
    pub fn new(label: Option<&str>, detail: Option<&str>) -> Self {
        let label = match label {
            Some(l) if !l.is_empty() => l.to_owned(),
            _ => DEFAULT_COMPONENT_LABEL.to_owned(),
        };
        Self {
            label,
            detail: detail.unwrap_or_default().to_owned(),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Live-region text announced for this component.
    #[must_use]
    pub fn announcement(&self) -> String {
        format!("{}. {}", self.label, self.detail)
    }
}

/// Tooltip anchor relative to the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipPlacement {
    /// Horizontal center of the component, canvas-local px.
    pub left: f64,
    /// Tooltip anchor line, canvas-local px.
    pub top: f64,
    /// Whether the tooltip sits below the component.
    pub flip: bool,
}

/// Place a tooltip above `component`, or below it when the top edge is
/// within `flip_threshold` of the canvas top.
#[must_use]
pub fn place_tooltip(
    component: Rect,
    canvas: Rect,
    flip_threshold: f64,
    flip_offset: f64,
) -> TooltipPlacement {
    let left = component.left + component.width / 2.0 - canvas.left;
    let top = component.top - canvas.top;
    if top < flip_threshold {
        TooltipPlacement {
            left,
            top: component.bottom() - canvas.top + flip_offset,
            flip: true,
        }
    } else {
        TooltipPlacement {
            left,
            top,
            flip: false,
        }
    }
}

/// Which component is highlighted and when a faded tooltip disappears.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TooltipState {
    active: Option<ComponentId>,
    hide_at: Option<Duration>,
}

impl TooltipState {
    #[must_use]
    pub const fn active(&self) -> Option<ComponentId> {
        self.active
    }

    /// Highlight `component`, cancelling any pending hide.
    pub fn show(&mut self, component: ComponentId) {
        self.hide_at = None;
        self.active = Some(component);
    }

    /// Clear the highlight and (re)schedule the hide for `now + delay`.
    ///
    /// Returns the component that was highlighted.
    pub fn hide(&mut self, now: Duration, delay: Duration) -> Option<ComponentId> {
        self.hide_at = Some(now.saturating_add(delay));
        self.active.take()
    }

    /// Fire the scheduled hide if its deadline has passed.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.hide_at {
            Some(deadline) if now >= deadline => {
                self.hide_at = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Rect = Rect::new(100.0, 50.0, 800.0, 600.0);

    #[test]
    fn tooltip_sits_above_low_components() {
        let component = Rect::new(300.0, 400.0, 40.0, 20.0);
        let p = place_tooltip(component, CANVAS, 120.0, 28.0);
        assert_eq!(
            p,
            TooltipPlacement {
                left: 220.0,
                top: 350.0,
                flip: false
            }
        );
    }

    #[test]
    fn tooltip_flips_below_high_components() {
        let component = Rect::new(300.0, 100.0, 40.0, 20.0);
        let p = place_tooltip(component, CANVAS, 120.0, 28.0);
        assert!(p.flip);
        assert_eq!(p.top, 120.0 - 50.0 + 28.0);
    }

    #[test]
    fn hide_debounces_until_deadline() {
        let mut state = TooltipState::default();
        state.show(ComponentId(2));
        let delay = Duration::from_millis(200);
        assert_eq!(state.hide(Duration::from_millis(1000), delay), Some(ComponentId(2)));
        assert!(!state.poll(Duration::from_millis(1199)));
        assert!(state.poll(Duration::from_millis(1200)));
        assert!(!state.poll(Duration::from_millis(5000)));
    }

    #[test]
    fn show_cancels_pending_hide() {
        let mut state = TooltipState::default();
        state.show(ComponentId(0));
        state.hide(Duration::ZERO, Duration::from_millis(200));
        state.show(ComponentId(1));
        assert!(!state.poll(Duration::from_secs(10)));
        assert_eq!(state.active(), Some(ComponentId(1)));
    }

    #[test]
    fn component_defaults() {
        let c = DiagramComponent::new(None, None);
        assert_eq!(c.label(), DEFAULT_COMPONENT_LABEL);
        assert_eq!(c.detail(), "");
        let c = DiagramComponent::new(Some("P-101"), Some("Feed pump"));
        assert_eq!(c.announcement(), "P-101. Feed pump");
    }
}
