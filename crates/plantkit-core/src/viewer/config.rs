#![forbid(unsafe_code)]

//! Viewer tuning and declared diagram dimensions.
//!
//! Every field of [`ViewerConfig`] has a default that matches the stock
//! viewer page, so `ViewerConfig::default()` needs no host input. Hosts
//! may override fields through the mount description (feature `serde`).

use core::time::Duration;

#[cfg(feature = "serde")]
use serde::Deserialize;

#[cfg(feature = "tracing")]
use crate::logging::warn;
#[cfg(not(feature = "tracing"))]
use crate::warn;

use crate::geometry::Size;

/// Virtual width used when the page declares none or an unusable one.
pub const DEFAULT_DIAGRAM_WIDTH: f64 = 1200.0;
/// Virtual height used when the page declares none or an unusable one.
pub const DEFAULT_DIAGRAM_HEIGHT: f64 = 600.0;

/// Tunable viewer parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewerConfig {
    /// Smallest allowed scale (default: 0.5).
    pub min_scale: f64,
    /// Largest allowed scale (default: 2.8).
    pub max_scale: f64,
    /// How far content may be dragged past a viewport edge, in px (default: 90).
    pub edge_margin: f64,
    /// Scale changes smaller than this are ignored (default: 0.001).
    pub zoom_epsilon: f64,
    /// Zoom factor for one wheel notch or zoom button press (default: 1.1).
    pub zoom_step: f64,
    /// Zoom factor for `+`/`-` (default: 1.1).
    pub key_zoom_step: f64,
    /// Zoom factor for `+`/`-` with Shift held (default: 1.2).
    pub key_zoom_step_fast: f64,
    /// Arrow-key pan distance in px (default: 70).
    pub pan_step: f64,
    /// Arrow-key pan distance with Shift held, in px (default: 120).
    pub pan_step_fast: f64,
    /// Tooltips whose top would sit closer than this to the canvas top flip
    /// below the component, in px (default: 120).
    pub tooltip_flip_threshold: f64,
    /// Gap between a component's bottom edge and a flipped tooltip, in px
    /// (default: 28).
    pub tooltip_flip_offset: f64,
    /// Delay before a faded tooltip is fully hidden, in ms (default: 200).
    pub tooltip_hide_delay_ms: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            max_scale: 2.8,
            edge_margin: 90.0,
            zoom_epsilon: 0.001,
            zoom_step: 1.1,
            key_zoom_step: 1.1,
            key_zoom_step_fast: 1.2,
            pan_step: 70.0,
            pan_step_fast: 120.0,
            tooltip_flip_threshold: 120.0,
            tooltip_flip_offset: 28.0,
            tooltip_hide_delay_ms: 200,
        }
    }
}

impl ViewerConfig {
    /// Tooltip hide delay as a [`Duration`].
    #[must_use]
    pub const fn tooltip_hide_delay(&self) -> Duration {
        Duration::from_millis(self.tooltip_hide_delay_ms)
    }

    /// Clamp `scale` into `[min_scale, max_scale]`.
    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<(), ViewerConfigError> {
        let fields = [
            ("min_scale", self.min_scale),
            ("max_scale", self.max_scale),
            ("edge_margin", self.edge_margin),
            ("zoom_epsilon", self.zoom_epsilon),
            ("zoom_step", self.zoom_step),
            ("key_zoom_step", self.key_zoom_step),
            ("key_zoom_step_fast", self.key_zoom_step_fast),
            ("pan_step", self.pan_step),
            ("pan_step_fast", self.pan_step_fast),
            ("tooltip_flip_threshold", self.tooltip_flip_threshold),
            ("tooltip_flip_offset", self.tooltip_flip_offset),
        ];
        if let Some(&(name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ViewerConfigError::NonFinite(name));
        }
        if self.min_scale <= 0.0 {
            return Err(ViewerConfigError::NonPositiveScale(self.min_scale));
        }
        if self.min_scale > self.max_scale {
            return Err(ViewerConfigError::InvertedScaleRange {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        for (name, step) in [
            ("zoom_step", self.zoom_step),
            ("key_zoom_step", self.key_zoom_step),
            ("key_zoom_step_fast", self.key_zoom_step_fast),
        ] {
            if step <= 1.0 {
                return Err(ViewerConfigError::ZoomStepTooSmall(name));
            }
        }
        for (name, distance) in [
            ("edge_margin", self.edge_margin),
            ("zoom_epsilon", self.zoom_epsilon),
            ("pan_step", self.pan_step),
            ("pan_step_fast", self.pan_step_fast),
            ("tooltip_flip_threshold", self.tooltip_flip_threshold),
            ("tooltip_flip_offset", self.tooltip_flip_offset),
        ] {
            if distance < 0.0 {
                return Err(ViewerConfigError::Negative(name));
            }
        }
        Ok(())
    }
}

/// Rejected [`ViewerConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerConfigError {
    /// A parameter is NaN or infinite.
    NonFinite(&'static str),
    /// `min_scale` must be greater than zero.
    NonPositiveScale(f64),
    /// `min_scale` exceeds `max_scale`.
    InvertedScaleRange { min: f64, max: f64 },
    /// A zoom step must be greater than 1.
    ZoomStepTooSmall(&'static str),
    /// A distance or tolerance is negative.
    Negative(&'static str),
}

impl core::fmt::Display for ViewerConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NonFinite(field) => write!(f, "{field} must be finite"),
            Self::NonPositiveScale(min) => write!(f, "min_scale must be > 0 (got {min})"),
            Self::InvertedScaleRange { min, max } => {
                write!(f, "min_scale {min} exceeds max_scale {max}")
            }
            Self::ZoomStepTooSmall(field) => write!(f, "{field} must be > 1"),
            Self::Negative(field) => write!(f, "{field} must not be negative"),
        }
    }
}

impl std::error::Error for ViewerConfigError {}

/// Leading decimal number of `raw`, the way `parseFloat` reads it
/// (`"1200px"` → 1200, `" 6e2 "` → 600, `"wide"` → none).
fn leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse().ok()
}

/// Resolve one declared dimension, substituting `default` when it is
/// missing, unparsable, or not a positive finite number.
#[must_use]
pub fn declared_dimension(raw: Option<&str>, default: f64, name: &'static str) -> f64 {
    let Some(raw) = raw else {
        return default;
    };
    match leading_number(raw) {
        Some(value) if value.is_finite() && value > 0.0 => value,
        _ => {
            warn!(dimension = name, raw, default, "unusable diagram dimension, using default");
            default
        }
    }
}

/// Virtual diagram size from the viewport's declared width and height.
#[must_use]
pub fn declared_diagram_size(width: Option<&str>, height: Option<&str>) -> Size {
    Size::new(
        declared_dimension(width, DEFAULT_DIAGRAM_WIDTH, "width"),
        declared_dimension(height, DEFAULT_DIAGRAM_HEIGHT, "height"),
    )
}
