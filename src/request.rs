//! Requested bitmap sizes and the seam to the image URL builder.
//!
//! The layout engine never builds URLs itself. The rendering layer turns a
//! placement into an [`ImageRequest`] and hands it, with the image's
//! [`RawSource`], to an [`ImageUrlBuilder`] supplied by the CDN integration.

use alloc::string::String;

use num_traits::Float;

use crate::aspect::AspectClass;
use crate::config::GalleryConfig;
use crate::image::{GalleryImage, RawSource};
use crate::layout::ViewportClass;

/// Where the URL builder should anchor its crop.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Gravity {
    /// Center on both axes.
    #[default]
    Center,
    /// Focal point as fractions. `(0.0, 0.0)` = top-left, `(1.0, 1.0)` = bottom-right.
    Percentage(f64, f64),
}

impl Gravity {
    /// Gravity from the image's hotspot center, clamped to `0.0..=1.0`.
    pub fn for_image(image: &GalleryImage) -> Self {
        match &image.hotspot {
            Some(h) if h.has_finite_center() => {
                Self::Percentage(h.x.clamp(0.0, 1.0), h.y.clamp(0.0, 1.0))
            }
            _ => Self::Center,
        }
    }
}

/// A bitmap the rendering layer wants for one image box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ImageRequest {
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels, matching the aspect class.
    pub height: u32,
    /// Encoder quality (1-100).
    pub quality: u8,
    /// Crop anchor.
    pub gravity: Gravity,
}

impl ImageRequest {
    /// Size a request for an aspect class on a viewport.
    ///
    /// Boxes wider than 1:1 scale the base width by their ratio so that the
    /// bitmap height stays comparable across classes; the result never
    /// exceeds `max_request_width`.
    pub fn for_aspect(
        aspect: AspectClass,
        viewport: ViewportClass,
        gravity: Gravity,
        config: &GalleryConfig,
    ) -> Self {
        let base = match viewport {
            ViewportClass::Desktop => config.desktop_request_width,
            ViewportClass::Mobile => config.mobile_request_width,
        };
        let scale = aspect.ratio().max(1.0);
        let width = Float::round(base as f64 * scale).min(config.max_request_width as f64) as u32;
        let width = width.max(1);
        let height = (Float::round(width as f64 * aspect.height_per_width()) as u32).max(1);
        Self {
            width,
            height,
            quality: config.quality,
            gravity,
        }
    }
}

/// Builds final bitmap URLs. Implemented by the CDN integration.
pub trait ImageUrlBuilder {
    /// URL for `source` transformed per `request`.
    fn build(&self, source: &RawSource, request: &ImageRequest) -> String;
}

impl<F> ImageUrlBuilder for F
where
    F: Fn(&RawSource, &ImageRequest) -> String,
{
    fn build(&self, source: &RawSource, request: &ImageRequest) -> String {
        self(source, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Hotspot;

    fn sized(aspect: AspectClass, viewport: ViewportClass) -> ImageRequest {
        ImageRequest::for_aspect(aspect, viewport, Gravity::Center, &GalleryConfig::default())
    }

    #[test]
    fn square_uses_base_width() {
        let r = sized(AspectClass::Square, ViewportClass::Desktop);
        assert_eq!((r.width, r.height), (1200, 1200));
        let r = sized(AspectClass::Square, ViewportClass::Mobile);
        assert_eq!((r.width, r.height), (800, 800));
        assert_eq!(r.quality, 80);
    }

    #[test]
    fn portrait_keeps_base_width() {
        let r = sized(AspectClass::Portrait3x4, ViewportClass::Mobile);
        assert_eq!((r.width, r.height), (800, 1067));
    }

    #[test]
    fn wide_scales_and_caps() {
        let r = sized(AspectClass::Wide16x9, ViewportClass::Mobile);
        assert_eq!((r.width, r.height), (1422, 800));
        let r = sized(AspectClass::Panorama21x9, ViewportClass::Desktop);
        assert_eq!((r.width, r.height), (2400, 1029));
    }

    #[test]
    fn gravity_from_hotspot() {
        let image = GalleryImage::new("x").hotspot(Hotspot::point(0.25, 1.4));
        assert_eq!(Gravity::for_image(&image), Gravity::Percentage(0.25, 1.0));
        assert_eq!(Gravity::for_image(&GalleryImage::new("x")), Gravity::Center);
        let image = GalleryImage::new("x").hotspot(Hotspot::point(f64::NAN, 0.5));
        assert_eq!(Gravity::for_image(&image), Gravity::Center);
    }

    #[test]
    fn closures_are_builders() {
        let builder =
            |s: &RawSource, r: &ImageRequest| alloc::format!("{}?w={}", s.as_str(), r.width);
        let r = sized(AspectClass::Square, ViewportClass::Mobile);
        assert_eq!(builder.build(&RawSource::new("cdn/a"), &r), "cdn/a?w=800");
    }
}
