//! Hotspot to CSS `object-position`.

use core::fmt;

use num_traits::Float;

use crate::image::GalleryImage;

/// Relative position of the subject inside a cropped box, in percent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ObjectPosition {
    pub x: f64,
    pub y: f64,
}

impl ObjectPosition {
    /// `50% 50%`.
    pub const CENTER: Self = Self { x: 50.0, y: 50.0 };

    /// From a focal point in `0.0..=1.0`. Values are clamped and rounded to
    /// two decimals.
    pub fn from_focal(x: f64, y: f64) -> Self {
        Self {
            x: percent(x),
            y: percent(y),
        }
    }
}

impl Default for ObjectPosition {
    fn default() -> Self {
        Self::CENTER
    }
}

impl fmt::Display for ObjectPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}% {}%", self.x, self.y)
    }
}

fn percent(v: f64) -> f64 {
    // Adding 0.0 turns -0.0 into 0.0 so it never prints as "-0".
    Float::round(v.clamp(0.0, 1.0) * 10_000.0) / 100.0 + 0.0
}

/// The `object-position` for an image: its hotspot center, or centered.
pub fn position_for(image: &GalleryImage) -> ObjectPosition {
    match &image.hotspot {
        Some(h) if h.has_finite_center() => ObjectPosition::from_focal(h.x, h.y),
        _ => ObjectPosition::CENTER,
    }
}
