//! Greedy column packing for narrow viewports.
//!
//! Images are taken in order and each one goes onto the column whose running
//! height is currently smallest (lowest index on ties). The running height
//! grows by `1 / ratio + gap` per image, measured in column widths. There is
//! no backtracking: the result is balanced to within one image's
//! contribution, not globally optimal.
//!
//! ```text
//!   col 0      col 1      col 2
//!  ┌─────┐    ┌─────┐    ┌─────┐
//!  │  0  │    │  1  │    │  2  │
//!  │     │    └─────┘    │     │
//!  └─────┘    ┌─────┐    └─────┘
//!  ┌─────┐    │  3  │    ┌─────┐
//!  │  4  │    │     │    │  5  │ ...
//! ```
//!
//! The aspect of each image comes from a repeating pattern (one for the
//! middle column, one for the sides), perturbed by a bounded jitter, and is
//! finally clamped into the image's [`SafetyProfile`](crate::safety::SafetyProfile).

use alloc::vec;
use alloc::vec::Vec;

use crate::aspect::AspectClass;
use crate::aspect::AspectClass::{Portrait3x4, Portrait4x5, Square, Wide16x9};
use crate::hash::stable_hash;
use crate::image::GalleryImage;
use crate::orientation::{base_orientation, canonical_aspect};
use crate::safety::analyze;

const MIDDLE_PATTERN: [AspectClass; 6] =
    [Portrait3x4, Square, Portrait4x5, Portrait3x4, Wide16x9, Square];
const SIDE_PATTERN: [AspectClass; 6] =
    [Square, Portrait4x5, Wide16x9, Square, Portrait3x4, Portrait4x5];

/// Pattern offset per column.
const PATTERN_COLUMN_STRIDE: u32 = 11;
/// Jitter offsets per image and per column.
const JITTER_INDEX_STRIDE: u32 = 18;
const JITTER_COLUMN_STRIDE: u32 = 36;
/// Seed offset per column for the safety fallback pick.
const FALLBACK_COLUMN_STRIDE: u32 = 17;

/// Upper bounds (exclusive) of the jitter bands over `0..100`. Draws above
/// the last band keep the pattern choice.
const JITTER_SQUARE: u32 = 12;
const JITTER_3X4: u32 = 22;
const JITTER_4X5: u32 = 30;

/// Where one image landed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MobilePlacement {
    /// Position in the input list.
    pub index: usize,
    /// Column the image was pushed onto.
    pub column: usize,
    /// Assigned aspect class.
    pub aspect: AspectClass,
    /// Whether the safety analysis flagged the image.
    pub fragile: bool,
    /// Height this image added to its column, in column widths.
    pub contribution: f64,
}

/// Output of [`pack_columns`].
#[derive(Clone, Debug, PartialEq)]
pub struct MobileLayout {
    /// One entry per input image, in input order.
    pub placements: Vec<MobilePlacement>,
    /// Input indices per column, top to bottom.
    pub columns: Vec<Vec<usize>>,
    /// Running height estimate per column.
    pub heights: Vec<f64>,
}

impl MobileLayout {
    /// Tallest minus shortest running height.
    pub fn imbalance(&self) -> f64 {
        if self.heights.is_empty() {
            return 0.0;
        }
        let max = self.heights.iter().copied().fold(f64::MIN, f64::max);
        let min = self.heights.iter().copied().fold(f64::MAX, f64::min);
        max - min
    }
}

/// Pack `images` into `columns` columns. `columns` of zero is treated as one.
pub fn pack_columns(images: &[GalleryImage], columns: usize, gap: f64) -> MobileLayout {
    let columns = columns.max(1);
    let mut heights = vec![0.0f64; columns];
    let mut members = vec![Vec::new(); columns];
    let mut placements = Vec::with_capacity(images.len());

    for (index, image) in images.iter().enumerate() {
        let column = shortest(&heights);
        let (aspect, fragile) = choose_aspect(image, index, column, columns);
        let contribution = aspect.height_per_width() + gap;
        heights[column] += contribution;
        members[column].push(index);
        tracing::trace!(
            index,
            column,
            aspect = aspect.label(),
            fragile,
            "mobile placement"
        );
        placements.push(MobilePlacement {
            index,
            column,
            aspect,
            fragile,
            contribution,
        });
    }

    MobileLayout {
        placements,
        columns: members,
        heights,
    }
}

/// First column with the smallest running height.
fn shortest(heights: &[f64]) -> usize {
    let mut best = 0;
    for (i, &h) in heights.iter().enumerate().skip(1) {
        if h < heights[best] {
            best = i;
        }
    }
    best
}

/// Aspect for the image at `index` landing on `column`, plus its fragility.
fn choose_aspect(
    image: &GalleryImage,
    index: usize,
    column: usize,
    columns: usize,
) -> (AspectClass, bool) {
    let profile = analyze(image);
    if image.lock_orientation {
        return (canonical_aspect(base_orientation(image)), profile.fragile);
    }

    let seed = stable_hash(&image.src);
    let col = column as u32;
    let idx = index as u32;

    let pattern = if column == columns / 2 {
        &MIDDLE_PATTERN
    } else {
        &SIDE_PATTERN
    };
    let offset =
        seed.wrapping_add(col.wrapping_mul(PATTERN_COLUMN_STRIDE)) as usize % pattern.len();
    let patterned = pattern[offset];

    let jitter = seed
        .wrapping_add(idx.wrapping_mul(JITTER_INDEX_STRIDE))
        .wrapping_add(col.wrapping_mul(JITTER_COLUMN_STRIDE))
        % 100;
    let jittered = if jitter < JITTER_SQUARE {
        Square
    } else if jitter < JITTER_3X4 {
        Portrait3x4
    } else if jitter < JITTER_4X5 {
        Portrait4x5
    } else {
        patterned
    };

    if profile.allows(jittered) {
        return (jittered, profile.fragile);
    }
    let fallback_seed = seed
        .wrapping_add(idx)
        .wrapping_add(col.wrapping_mul(FALLBACK_COLUMN_STRIDE));
    (profile.pick(fallback_seed), profile.fragile)
}
