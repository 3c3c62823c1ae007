//! Gallery image records as handed over by the CMS layer.
//!
//! Records are immutable for the duration of a render. Every optional field
//! may be missing or malformed; consumers fall back to defaults instead of
//! failing. With the `serde` feature, records deserialize leniently from the
//! CMS's camelCase JSON: a wrong-typed optional field becomes `None`.

use alloc::string::String;

use crate::orientation::Orientation;

/// Opaque asset descriptor understood by the image URL builder.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RawSource(pub String);

impl RawSource {
    /// Wrap an asset reference.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// The asset reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Focal rectangle of the subject. All values are fractions of the image,
/// `(x, y)` being the focal center.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hotspot {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Hotspot {
    /// Create a focal rectangle.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Focal point without extent.
    pub const fn point(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0, 0.0)
    }

    /// Whether the focal center is usable for positioning.
    pub fn has_finite_center(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Fractions pre-trimmed from each edge of the asset.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Crop {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Crop {
    /// Create a crop (CSS order: top, right, bottom, left).
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Combined left + right trim.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Combined top + bottom trim.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Display language for bilingual text.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Lang {
    #[default]
    En,
    Fr,
}

/// Display-only text: either plain, or a bilingual record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Text {
    Plain(String),
    Localized {
        en: Option<String>,
        fr: Option<String>,
    },
}

impl Text {
    /// Text for `lang`, falling back to the other language.
    pub fn get(&self, lang: Lang) -> Option<&str> {
        match self {
            Self::Plain(s) => Some(s.as_str()),
            Self::Localized { en, fr } => {
                let (first, second) = match lang {
                    Lang::En => (en, fr),
                    Lang::Fr => (fr, en),
                };
                first.as_deref().or(second.as_deref())
            }
        }
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Self::Plain(String::from(s))
    }
}

/// One photograph of a gallery. `src` is unique within a gallery and doubles
/// as the cache key and the viewer's URL identifier.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GalleryImage {
    pub src: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::lenient::raw_source")
    )]
    pub raw_source: Option<RawSource>,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::lenient::orientation")
    )]
    pub orientation: Option<Orientation>,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::lenient::orientation")
    )]
    pub asset_orientation: Option<Orientation>,
    /// Render at the original aspect ratio; never remix.
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "crate::lenient::flag"))]
    pub lock_orientation: bool,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::lenient::hotspot")
    )]
    pub hotspot: Option<Hotspot>,
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "crate::lenient::crop"))]
    pub crop: Option<Crop>,
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "crate::lenient::text"))]
    pub alt: Option<Text>,
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "crate::lenient::text"))]
    pub caption: Option<Text>,
}

impl GalleryImage {
    /// An image with only its identifier; every other field defaulted.
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            raw_source: None,
            orientation: None,
            asset_orientation: None,
            lock_orientation: false,
            hotspot: None,
            crop: None,
            alt: None,
            caption: None,
        }
    }

    /// Set the editorial orientation.
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// Set the orientation measured from the original asset.
    pub fn asset_orientation(mut self, orientation: Orientation) -> Self {
        self.asset_orientation = Some(orientation);
        self
    }

    /// Derive the asset orientation from original pixel dimensions.
    /// Zero dimensions leave it unset.
    pub fn asset_dimensions(mut self, width: u32, height: u32) -> Self {
        self.asset_orientation = Orientation::from_dimensions(width, height);
        self
    }

    /// Pin the image to its canonical aspect.
    pub fn lock_orientation(mut self, lock: bool) -> Self {
        self.lock_orientation = lock;
        self
    }

    /// Set the focal rectangle.
    pub fn hotspot(mut self, hotspot: Hotspot) -> Self {
        self.hotspot = Some(hotspot);
        self
    }

    /// Set the pre-trim.
    pub fn crop(mut self, crop: Crop) -> Self {
        self.crop = Some(crop);
        self
    }

    /// Set the URL builder descriptor.
    pub fn raw_source(mut self, source: RawSource) -> Self {
        self.raw_source = Some(source);
        self
    }

    /// Set the alt text.
    pub fn alt(mut self, alt: impl Into<Text>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    /// Set the caption.
    pub fn caption(mut self, caption: impl Into<Text>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}
