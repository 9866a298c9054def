#![forbid(unsafe_code)]

//! Scale + translate view transform.
//!
//! A virtual point `(x, y)` lands at canvas-local `(tx + x*s, ty + y*s)`.
//!
//! # Invariants
//!
//! After [`ViewTransform::clamped`], on each axis either
//! - the scaled content fits the viewport and is centered, or
//! - the content overhangs the viewport and no edge is pulled more than
//!   `margin` pixels inside the viewport.

use crate::geometry::{Point, Size};

/// Affine view transform (uniform scale, then translate).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Resolve one axis of the clamp rule.
fn clamp_axis(translate: f64, content: f64, viewport: f64, margin: f64) -> f64 {
    if content <= viewport {
        (viewport - content) / 2.0
    } else {
        // `max`/`min` rather than `clamp`: a NaN bound must not panic.
        translate.max(viewport - content - margin).min(margin)
    }
}

impl ViewTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    #[must_use]
    pub const fn new(scale: f64, translate_x: f64, translate_y: f64) -> Self {
        Self {
            scale,
            translate_x,
            translate_y,
        }
    }

    /// Transform at `scale` with `content` centered in `viewport`.
    #[must_use]
    pub fn centered(scale: f64, content: Size, viewport: Size) -> Self {
        let scaled = content.scaled(scale);
        Self::new(
            scale,
            (viewport.width - scaled.width) / 2.0,
            (viewport.height - scaled.height) / 2.0,
        )
    }

    /// Map a virtual point to canvas-local screen space.
    #[must_use]
    pub fn to_screen(&self, virt: Point) -> Point {
        Point::new(
            self.translate_x + virt.x * self.scale,
            self.translate_y + virt.y * self.scale,
        )
    }

    /// Map a canvas-local screen point back to virtual space.
    #[must_use]
    pub fn to_virtual(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.translate_x) / self.scale,
            (screen.y - self.translate_y) / self.scale,
        )
    }

    /// Same scale, translation shifted by `(dx, dy)`.
    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self::new(self.scale, self.translate_x + dx, self.translate_y + dy)
    }

    /// Apply the edge clamp rule for `content` (unscaled virtual size)
    /// shown in `viewport`.
    #[must_use]
    pub fn clamped(self, content: Size, viewport: Size, margin: f64) -> Self {
        let scaled = content.scaled(self.scale);
        Self::new(
            self.scale,
            clamp_axis(self.translate_x, scaled.width, viewport.width, margin),
            clamp_axis(self.translate_y, scaled.height, viewport.height, margin),
        )
    }

    /// Rescale to `scale` keeping the virtual point under the canvas-local
    /// `focal` point fixed on screen.
    #[must_use]
    pub fn zoomed_at(self, scale: f64, focal: Point) -> Self {
        let origin = self.to_virtual(focal);
        Self::new(
            scale,
            focal.x - origin.x * scale,
            focal.y - origin.y * scale,
        )
    }

    /// Scale as a whole percentage (`1.25` → `125`).
    #[must_use]
    pub fn scale_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }

    /// CSS `transform` value, e.g. `translate(200px, 0px) scale(1)`.
    #[must_use]
    pub fn css(&self) -> String {
        // `+ 0.0` folds negative zero so it prints as `0`.
        format!(
            "translate({}px, {}px) scale({})",
            self.translate_x + 0.0,
            self.translate_y + 0.0,
            self.scale
        )
    }
}
