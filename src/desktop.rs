//! Aspect remixing for the wide-viewport column-flow layout.
//!
//! Each image draws an aspect class from a fixed table indexed by
//! `hash(src) mod 100`, then orientation-specific corrections pull the draw
//! back toward something that suits the photograph.
//!
//! This path does not consult [`safety`](crate::safety): the multi-column
//! flow is allowed to crop more boldly than the mobile grid. Fragile images
//! can therefore receive classes outside their conservative set here.

use crate::aspect::AspectClass;
use crate::hash::stable_hash;
use crate::image::GalleryImage;
use crate::orientation::{Orientation, base_orientation, canonical_aspect};

/// Upper bounds (exclusive) of the draw bands over `0..100`.
const SQUARE_BAND: u32 = 30;
const PORTRAIT_3X4_BAND: u32 = 55;
const PORTRAIT_4X5_BAND: u32 = 70;
/// Panorama draws at or above this in the 16:9 band keep their full width.
const PANORAMA_KEEP_WIDE: u32 = 85;
/// One square image in this many becomes 3:4.
const SQUARE_VARIATION_EVERY: u32 = 5;

/// Pick the displayed aspect class for an image in the desktop layout.
///
/// Locked images always render at their canonical aspect.
pub fn pick_aspect(image: &GalleryImage) -> AspectClass {
    let base = base_orientation(image);
    if image.lock_orientation {
        return canonical_aspect(base);
    }
    remix(stable_hash(&image.src), base)
}

/// The remix rule for a given seed and base orientation.
pub fn remix(seed: u32, base: Option<Orientation>) -> AspectClass {
    let r = seed % 100;
    let drawn = draw(r);
    match base {
        Some(Orientation::Panorama) => match drawn {
            AspectClass::Portrait4x5 => AspectClass::Wide16x9,
            AspectClass::Portrait3x4 => AspectClass::Square,
            AspectClass::Wide16x9 if r >= PANORAMA_KEEP_WIDE => AspectClass::Panorama21x9,
            other => other,
        },
        Some(Orientation::Portrait) => match drawn {
            AspectClass::Wide16x9 if r % 2 == 0 => AspectClass::Square,
            AspectClass::Wide16x9 => AspectClass::Portrait3x4,
            other => other,
        },
        Some(Orientation::Square) => {
            if (seed / 100) % SQUARE_VARIATION_EVERY == 0 {
                AspectClass::Portrait3x4
            } else {
                AspectClass::Square
            }
        }
        Some(Orientation::Landscape) | None => drawn,
    }
}

fn draw(r: u32) -> AspectClass {
    if r < SQUARE_BAND {
        AspectClass::Square
    } else if r < PORTRAIT_3X4_BAND {
        AspectClass::Portrait3x4
    } else if r < PORTRAIT_4X5_BAND {
        AspectClass::Portrait4x5
    } else {
        AspectClass::Wide16x9
    }
}
