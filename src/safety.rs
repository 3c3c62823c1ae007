//! Focal-point safety analysis.
//!
//! Classifies an image as *fragile* when its hotspot or crop metadata leaves
//! little room for reframing, and hands back the aspect classes the mobile
//! packer may assign to it. Fragile images get a small conservative set;
//! safe images a wider one. Both sets are keyed by base orientation.
//!
//! The sets are weighted bags: pickers index them modulo their length, so a
//! class listed twice is picked twice as often.

use crate::aspect::AspectClass;
use crate::aspect::AspectClass::{Panorama21x9, Portrait3x4, Portrait4x5, Square, Wide16x9};
use crate::image::{Crop, GalleryImage, Hotspot};
use crate::orientation::{Orientation, base_orientation};

/// A focal center closer than this to any edge is at risk of being cut.
pub const EDGE_MARGIN: f64 = 0.12;
/// A focal extent above this fills most of the frame.
pub const MAX_SUBJECT_EXTENT: f64 = 0.72;
/// Combined trim on one axis above this means the asset is already tight.
pub const MAX_COMBINED_CROP: f64 = 0.35;

const FRAGILE_PANORAMA: &[AspectClass] = &[Wide16x9, Wide16x9, Panorama21x9];
const FRAGILE_PORTRAIT: &[AspectClass] = &[Portrait4x5, Portrait4x5, Portrait3x4, Square];
const FRAGILE_SQUARE: &[AspectClass] = &[Square, Square, Portrait3x4];
const FRAGILE_LANDSCAPE: &[AspectClass] = &[Wide16x9, Wide16x9, Square, Portrait3x4];

const SAFE_PANORAMA: &[AspectClass] = &[Wide16x9, Panorama21x9, Square, Portrait3x4];
const SAFE_PORTRAIT: &[AspectClass] = &[Portrait3x4, Portrait4x5, Square, Portrait3x4];
const SAFE_SQUARE: &[AspectClass] = &[Square, Portrait3x4, Portrait4x5, Wide16x9];
const SAFE_LANDSCAPE: &[AspectClass] = &[Wide16x9, Square, Portrait3x4, Portrait4x5];

/// Result of analyzing one image.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SafetyProfile {
    /// The image tolerates little reframing.
    pub fragile: bool,
    /// Weighted bag of permitted aspect classes. Never empty.
    pub allowed: &'static [AspectClass],
}

impl SafetyProfile {
    /// Whether `aspect` may be assigned.
    pub fn allows(&self, aspect: AspectClass) -> bool {
        self.allowed.contains(&aspect)
    }

    /// Deterministic pick from the bag.
    pub fn pick(&self, seed: u32) -> AspectClass {
        self.allowed[seed as usize % self.allowed.len()]
    }
}

/// Classify an image and return its permitted aspect classes.
pub fn analyze(image: &GalleryImage) -> SafetyProfile {
    let fragile = is_fragile(image);
    let base = base_orientation(image);
    SafetyProfile {
        fragile,
        allowed: allowed_aspects(base, fragile),
    }
}

/// Whether any fragility rule fires for the image.
pub fn is_fragile(image: &GalleryImage) -> bool {
    image.hotspot.as_ref().is_some_and(hotspot_is_fragile)
        || image.crop.as_ref().is_some_and(crop_is_fragile)
}

fn hotspot_is_fragile(h: &Hotspot) -> bool {
    near_edge(h.x)
        || near_edge(h.y)
        || exceeds(h.width, MAX_SUBJECT_EXTENT)
        || exceeds(h.height, MAX_SUBJECT_EXTENT)
}

// Non-finite values (NaN and both infinities) never trip a rule.
fn near_edge(v: f64) -> bool {
    v.is_finite() && (v < EDGE_MARGIN || v > 1.0 - EDGE_MARGIN)
}

fn exceeds(v: f64, limit: f64) -> bool {
    v.is_finite() && v > limit
}

fn crop_is_fragile(c: &Crop) -> bool {
    exceeds(c.horizontal(), MAX_COMBINED_CROP) || exceeds(c.vertical(), MAX_COMBINED_CROP)
}

/// The aspect bag for a base orientation and fragility.
pub fn allowed_aspects(base: Option<Orientation>, fragile: bool) -> &'static [AspectClass] {
    match (base, fragile) {
        (Some(Orientation::Panorama), true) => FRAGILE_PANORAMA,
        (Some(Orientation::Portrait), true) => FRAGILE_PORTRAIT,
        (Some(Orientation::Square), true) => FRAGILE_SQUARE,
        (Some(Orientation::Landscape) | None, true) => FRAGILE_LANDSCAPE,
        (Some(Orientation::Panorama), false) => SAFE_PANORAMA,
        (Some(Orientation::Portrait), false) => SAFE_PORTRAIT,
        (Some(Orientation::Square), false) => SAFE_SQUARE,
        (Some(Orientation::Landscape) | None, false) => SAFE_LANDSCAPE,
    }
}
