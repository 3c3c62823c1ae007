//! Deterministic gallery layout: aspect remixing, focal-point safety, column
//! packing, and a URL-addressable viewer.
//!
//! Pure computation without I/O or randomness, `no_std` + `alloc` compatible.
//! Every "random-looking" choice is derived from a stable hash of the image's
//! `src`, so a gallery lays out identically on every render and every host.
//!
//! # Modules
//!
//! - [`hash`]: Stable string hash used as the only source of variation
//! - [`orientation`]: Declared/asset orientation and canonical aspect classes
//! - [`aspect`]: The aspect classes applied to image boxes
//! - [`image`]: Gallery image records handed over by the CMS layer
//! - [`safety`]: Focal-point fragility and the allowed aspect sets
//! - [`desktop`]: Column-flow aspect remixing for wide viewports
//! - [`mobile`]: Greedy shortest-column packing for narrow viewports
//! - [`position`]: Hotspot to CSS `object-position`
//! - [`layout`]: The layout engine façade, memoization, ready flags
//! - [`request`]: Requested bitmap sizes and the image URL builder seam
//! - [`query`]: Query string read/write for the viewer parameter
//! - [`viewer`]: Open/close/prev/next state machine synchronized with the URL
//!
//! # Example
//!
//! ```
//! use zengallery::{GalleryConfig, GalleryImage, LayoutEngine, Orientation, ViewportClass};
//!
//! let images = vec![
//!     GalleryImage::new("a").orientation(Orientation::Panorama),
//!     GalleryImage::new("b").orientation(Orientation::Portrait).lock_orientation(true),
//! ];
//!
//! let engine = LayoutEngine::new(GalleryConfig::default()).unwrap();
//! let layout = engine.compute(&images, ViewportClass::Mobile);
//!
//! assert_eq!(layout.items[1].aspect, zengallery::AspectClass::Portrait3x4);
//! assert_eq!(layout.items[0].object_position.to_string(), "50% 50%");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod aspect;
pub mod config;
pub mod desktop;
pub mod hash;
pub mod image;
pub mod layout;
#[cfg(feature = "serde")]
mod lenient;
pub mod mobile;
pub mod orientation;
pub mod position;
pub mod query;
pub mod request;
pub mod safety;
#[cfg(feature = "svg")]
pub mod svg;
pub mod viewer;

// Re-exports: core types
pub use aspect::AspectClass;
pub use config::{ConfigError, GalleryConfig};
pub use desktop::pick_aspect;
pub use hash::stable_hash;
pub use image::{Crop, GalleryImage, Hotspot, Lang, RawSource, Text};
pub use layout::{
    ColumnSummary, GalleryLayout, ImagePlacement, LayoutCache, LayoutEngine, ReadySet,
    ViewportClass,
};
pub use mobile::{MobileLayout, MobilePlacement, pack_columns};
pub use orientation::{Orientation, base_orientation, canonical_aspect};
pub use position::{ObjectPosition, position_for};
pub use request::{Gravity, ImageRequest, ImageUrlBuilder};
pub use safety::{SafetyProfile, analyze};
pub use viewer::{
    History, Key, MemoryHistory, ScrollLock, ScrollLockGuard, ScrollSurface, ViewerController,
    ViewerState,
};
