//! The layout engine: per-image aspect class and object position for the
//! current viewport class.
//!
//! Desktop layouts remix every image independently (see [`desktop`]); mobile
//! layouts pack images into columns (see [`mobile`]). Both are pure and
//! deterministic, so the output can be memoized ([`LayoutCache`]) and only
//! recomputed when the viewport crosses the breakpoint or the image list
//! changes.
//!
//! [`desktop`]: crate::desktop
//! [`mobile`]: crate::mobile

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

use crate::aspect::AspectClass;
use crate::config::{ConfigError, GalleryConfig};
use crate::desktop::pick_aspect;
use crate::image::{Crop, GalleryImage, Hotspot};
use crate::mobile::pack_columns;
use crate::orientation::Orientation;
use crate::position::{ObjectPosition, position_for};
use crate::request::{Gravity, ImageRequest, ImageUrlBuilder};
use crate::safety::is_fragile;

/// Which layout path applies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ViewportClass {
    /// Column-flow layout with remixed aspects.
    Desktop,
    /// Fixed-column grid with packed, safety-clamped aspects.
    Mobile,
}

impl ViewportClass {
    /// Classify a viewport width in CSS px.
    pub fn for_width(width: u32, config: &GalleryConfig) -> Self {
        if width >= config.breakpoint {
            Self::Desktop
        } else {
            Self::Mobile
        }
    }
}

/// Layout of one image, handed to the rendering layer.
#[derive(Clone, Debug, PartialEq)]
pub struct ImagePlacement {
    pub src: String,
    /// Position in the input list.
    pub index: usize,
    pub aspect: AspectClass,
    pub object_position: ObjectPosition,
    /// Grid column; `None` on desktop.
    pub column: Option<usize>,
    pub fragile: bool,
}

impl ImagePlacement {
    /// The bitmap request for this placement.
    pub fn request(
        &self,
        image: &GalleryImage,
        viewport: ViewportClass,
        config: &GalleryConfig,
    ) -> ImageRequest {
        ImageRequest::for_aspect(self.aspect, viewport, Gravity::for_image(image), config)
    }

    /// The URL to render: built from the raw source when the image has one,
    /// otherwise the image's `src` as-is.
    pub fn resolve_url<B: ImageUrlBuilder + ?Sized>(
        &self,
        image: &GalleryImage,
        viewport: ViewportClass,
        config: &GalleryConfig,
        builder: &B,
    ) -> String {
        match &image.raw_source {
            Some(source) => builder.build(source, &self.request(image, viewport, config)),
            None => image.src.clone(),
        }
    }
}

/// One mobile column.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnSummary {
    /// Input indices, top to bottom.
    pub members: Vec<usize>,
    /// Running height estimate, in column widths.
    pub height: f64,
}

/// Output of [`LayoutEngine::compute`].
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryLayout {
    pub viewport: ViewportClass,
    /// One placement per input image, in input order.
    pub items: Vec<ImagePlacement>,
    /// Mobile columns; empty on desktop.
    pub columns: Vec<ColumnSummary>,
}

impl GalleryLayout {
    /// No images: the grid should render its "no images" state.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Placement for a `src`.
    pub fn get(&self, src: &str) -> Option<&ImagePlacement> {
        self.items.iter().find(|p| p.src == src)
    }
}

/// Validated layout engine.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutEngine {
    config: GalleryConfig,
}

impl LayoutEngine {
    /// Validate `config` and build an engine.
    pub fn new(config: GalleryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The engine's configuration.
    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Lay out `images` for `viewport`. Total: malformed metadata falls back
    /// to defaults and an empty list gives an empty layout.
    pub fn compute(&self, images: &[GalleryImage], viewport: ViewportClass) -> GalleryLayout {
        let layout = match viewport {
            ViewportClass::Desktop => self.desktop(images),
            ViewportClass::Mobile => self.mobile(images),
        };
        tracing::debug!(
            viewport = ?viewport,
            images = images.len(),
            fragile = layout.items.iter().filter(|p| p.fragile).count(),
            "gallery layout computed"
        );
        layout
    }

    fn desktop(&self, images: &[GalleryImage]) -> GalleryLayout {
        let items = images
            .iter()
            .enumerate()
            .map(|(index, image)| ImagePlacement {
                src: image.src.clone(),
                index,
                aspect: pick_aspect(image),
                object_position: position_for(image),
                column: None,
                fragile: is_fragile(image),
            })
            .collect();
        GalleryLayout {
            viewport: ViewportClass::Desktop,
            items,
            columns: Vec::new(),
        }
    }

    fn mobile(&self, images: &[GalleryImage]) -> GalleryLayout {
        let packed = pack_columns(images, self.config.mobile_columns, self.config.column_gap);
        let items = packed
            .placements
            .iter()
            .map(|p| {
                let image = &images[p.index];
                ImagePlacement {
                    src: image.src.clone(),
                    index: p.index,
                    aspect: p.aspect,
                    object_position: position_for(image),
                    column: Some(p.column),
                    fragile: p.fragile,
                }
            })
            .collect();
        let columns = packed
            .columns
            .into_iter()
            .zip(packed.heights)
            .map(|(members, height)| ColumnSummary { members, height })
            .collect();
        GalleryLayout {
            viewport: ViewportClass::Mobile,
            items,
            columns,
        }
    }
}

/// Everything about an image that can change its layout. Floats are compared
/// by bit pattern so the key is `Eq`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ImageKey {
    src: String,
    lock: bool,
    orientation: Option<Orientation>,
    asset_orientation: Option<Orientation>,
    hotspot: Option<[u64; 4]>,
    crop: Option<[u64; 4]>,
}

impl ImageKey {
    fn of(image: &GalleryImage) -> Self {
        Self {
            src: image.src.clone(),
            lock: image.lock_orientation,
            orientation: image.orientation,
            asset_orientation: image.asset_orientation,
            hotspot: image.hotspot.as_ref().map(hotspot_bits),
            crop: image.crop.as_ref().map(crop_bits),
        }
    }

    fn matches(&self, image: &GalleryImage) -> bool {
        *self == Self::of(image)
    }
}

fn hotspot_bits(h: &Hotspot) -> [u64; 4] {
    [h.x.to_bits(), h.y.to_bits(), h.width.to_bits(), h.height.to_bits()]
}

fn crop_bits(c: &Crop) -> [u64; 4] {
    [c.top.to_bits(), c.bottom.to_bits(), c.left.to_bits(), c.right.to_bits()]
}

/// Memo of the most recent layout.
///
/// Returns the stored layout while the viewport class and every image's
/// layout-relevant fields are unchanged; recomputes otherwise.
#[derive(Clone, Debug)]
pub struct LayoutCache {
    engine: LayoutEngine,
    last: Option<(ViewportClass, Vec<ImageKey>, GalleryLayout)>,
    computations: usize,
}

impl LayoutCache {
    /// Cache over `engine`.
    pub fn new(engine: LayoutEngine) -> Self {
        Self {
            engine,
            last: None,
            computations: 0,
        }
    }

    /// The layout for `images` on `viewport`, computing it only on change.
    pub fn get(&mut self, images: &[GalleryImage], viewport: ViewportClass) -> &GalleryLayout {
        let fresh = match &self.last {
            Some((v, keys, _)) => {
                *v == viewport
                    && keys.len() == images.len()
                    && keys.iter().zip(images).all(|(k, image)| k.matches(image))
            }
            None => false,
        };
        if !fresh {
            self.last = None;
        }
        let engine = &self.engine;
        let computations = &mut self.computations;
        let (_, _, layout) = self.last.get_or_insert_with(|| {
            *computations += 1;
            let keys = images.iter().map(ImageKey::of).collect();
            (viewport, keys, engine.compute(images, viewport))
        });
        layout
    }

    /// How many times the layout has actually been computed.
    pub fn computations(&self) -> usize {
        self.computations
    }

    /// Forget the stored layout.
    pub fn clear(&mut self) {
        self.last = None;
    }
}

/// Per-image "ready" flags, set from the renderer's load-completion signal.
///
/// Independent of layout: a layout is valid whether or not its bitmaps have
/// arrived.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadySet {
    ready: BTreeSet<String>,
}

impl ReadySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `src` finished loading. Returns `true` the first time.
    pub fn mark_ready(&mut self, src: &str) -> bool {
        self.ready.insert(String::from(src))
    }

    pub fn is_ready(&self, src: &str) -> bool {
        self.ready.contains(src)
    }

    /// Whether every image of `images` is ready.
    pub fn all_ready(&self, images: &[GalleryImage]) -> bool {
        images.iter().all(|i| self.is_ready(&i.src))
    }

    /// Drop flags for images no longer in the gallery.
    pub fn retain_gallery(&mut self, images: &[GalleryImage]) {
        self.ready.retain(|src| images.iter().any(|i| i.src == *src));
    }

    pub fn len(&self) -> usize {
        self.ready.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ready.is_empty()
    }
}
