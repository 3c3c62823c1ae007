//! Image orientation classes and their canonical aspect.

use crate::aspect::AspectClass;
use crate::image::GalleryImage;

/// Declared or measured orientation of a photograph.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Taller than wide.
    Portrait,
    /// Wider than tall.
    Landscape,
    /// Roughly equal sides.
    Square,
    /// At least twice as wide as tall.
    Panorama,
}

/// Width/height ratio at or above which an asset counts as a panorama.
const PANORAMA_MIN_RATIO: f64 = 2.0;
/// Relative distance from 1:1 still treated as square.
const SQUARE_TOLERANCE: f64 = 0.05;

impl Orientation {
    /// Parse an editorial orientation value. Case-insensitive; unknown
    /// values return `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let v = value.trim();
        if v.eq_ignore_ascii_case("portrait") {
            Some(Self::Portrait)
        } else if v.eq_ignore_ascii_case("landscape") {
            Some(Self::Landscape)
        } else if v.eq_ignore_ascii_case("square") {
            Some(Self::Square)
        } else if v.eq_ignore_ascii_case("panorama") || v.eq_ignore_ascii_case("panoramic") {
            Some(Self::Panorama)
        } else {
            None
        }
    }

    /// Classify an asset from its pixel dimensions. Zero dimensions are
    /// unclassifiable.
    pub fn from_dimensions(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let ratio = width as f64 / height as f64;
        let near_square = ratio >= 1.0 - SQUARE_TOLERANCE && ratio <= 1.0 + SQUARE_TOLERANCE;
        Some(if ratio >= PANORAMA_MIN_RATIO {
            Self::Panorama
        } else if near_square {
            Self::Square
        } else if ratio > 1.0 {
            Self::Landscape
        } else {
            Self::Portrait
        })
    }

    /// Lowercase name, as used by the CMS.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
            Self::Square => "square",
            Self::Panorama => "panorama",
        }
    }
}

/// The orientation the layout should trust: the asset-derived value wins
/// over the editorial one.
pub fn base_orientation(image: &GalleryImage) -> Option<Orientation> {
    image.asset_orientation.or(image.orientation)
}

/// Ground-truth aspect for an orientation, used whenever remixing is off.
/// Unknown orientation falls back to 16:9.
pub fn canonical_aspect(orientation: Option<Orientation>) -> AspectClass {
    match orientation {
        Some(Orientation::Portrait) => AspectClass::Portrait3x4,
        Some(Orientation::Square) => AspectClass::Square,
        Some(Orientation::Panorama) => AspectClass::Panorama21x9,
        Some(Orientation::Landscape) | None => AspectClass::Wide16x9,
    }
}
