//! Gallery configuration.
//!
//! Builder-style, with defaults that match the production site. Validation
//! happens once, when a [`LayoutEngine`](crate::LayoutEngine) or
//! [`ViewerController`](crate::ViewerController) is built; after that every
//! operation is total.
//!
//! # Example
//!
//! ```
//! use zengallery::GalleryConfig;
//!
//! let config = GalleryConfig::default().mobile_columns(2).breakpoint(640);
//! assert!(config.validate().is_ok());
//! assert!(GalleryConfig::default().mobile_columns(0).validate().is_err());
//! ```

use alloc::string::String;

/// Layout and viewer settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct GalleryConfig {
    /// Column count of the narrow-viewport grid.
    pub mobile_columns: usize,
    /// Vertical gap between images, in column widths.
    pub column_gap: f64,
    /// Viewport width (CSS px) at and above which the desktop layout applies.
    pub breakpoint: u32,
    /// Query parameter carrying the open image's `src`.
    pub viewer_param: String,
    /// Requested bitmap width for a 1:1 box on desktop.
    pub desktop_request_width: u32,
    /// Requested bitmap width for a 1:1 box on mobile.
    pub mobile_request_width: u32,
    /// Cap on any requested bitmap width.
    pub max_request_width: u32,
    /// Encoder quality passed to the URL builder (1-100).
    pub quality: u8,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            mobile_columns: 3,
            column_gap: 0.05,
            breakpoint: 768,
            viewer_param: String::from("img"),
            desktop_request_width: 1200,
            mobile_request_width: 800,
            max_request_width: 2400,
            quality: 80,
        }
    }
}

impl GalleryConfig {
    /// Set the mobile column count.
    pub fn mobile_columns(mut self, columns: usize) -> Self {
        self.mobile_columns = columns;
        self
    }

    /// Set the vertical gap, in column widths.
    pub fn column_gap(mut self, gap: f64) -> Self {
        self.column_gap = gap;
        self
    }

    /// Set the desktop breakpoint in CSS px.
    pub fn breakpoint(mut self, px: u32) -> Self {
        self.breakpoint = px;
        self
    }

    /// Set the viewer's query parameter name.
    pub fn viewer_param(mut self, name: impl Into<String>) -> Self {
        self.viewer_param = name.into();
        self
    }

    /// Set requested bitmap widths for desktop and mobile.
    pub fn request_widths(mut self, desktop: u32, mobile: u32) -> Self {
        self.desktop_request_width = desktop;
        self.mobile_request_width = mobile;
        self
    }

    /// Set the cap on requested bitmap widths.
    pub fn max_request_width(mut self, px: u32) -> Self {
        self.max_request_width = px;
        self
    }

    /// Set the encoder quality.
    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mobile_columns == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if !self.column_gap.is_finite() || self.column_gap < 0.0 {
            return Err(ConfigError::InvalidGap);
        }
        if self.viewer_param.is_empty() || self.viewer_param.contains(['&', '=', '?', '#']) {
            return Err(ConfigError::InvalidViewerParam);
        }
        if self.desktop_request_width == 0
            || self.mobile_request_width == 0
            || self.max_request_width == 0
        {
            return Err(ConfigError::ZeroRequestWidth);
        }
        if self.quality == 0 || self.quality > 100 {
            return Err(ConfigError::QualityOutOfRange(self.quality));
        }
        Ok(())
    }
}

/// Configuration validation error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The mobile grid needs at least one column.
    #[error("mobile column count must be at least 1")]
    ZeroColumns,
    /// The gap is negative or not finite.
    #[error("column gap must be a finite, non-negative number")]
    InvalidGap,
    /// The parameter name is empty or contains query delimiters.
    #[error("viewer parameter name must be non-empty and free of '&', '=', '?', '#'")]
    InvalidViewerParam,
    /// A requested width is zero.
    #[error("requested image widths must be non-zero")]
    ZeroRequestWidth,
    /// Quality outside `1..=100`.
    #[error("quality {0} is outside 1..=100")]
    QualityOutOfRange(u8),
}
