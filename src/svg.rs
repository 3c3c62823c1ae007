//! SVG visualization of a computed gallery layout.
//!
//! Draws one panel per column: the packed columns of a mobile layout, or a
//! round-robin preview of the desktop flow. Each image is a box sized by its
//! aspect class, labelled with the class, and marked with its focal point.
//! Fragile images are outlined.
//!
//! # Example
//!
//! ```
//! use zengallery::svg::render_layout_svg;
//! use zengallery::{GalleryConfig, GalleryImage, LayoutEngine, ViewportClass};
//!
//! let images: Vec<_> = (0..9).map(|i| GalleryImage::new(format!("{i}.jpg"))).collect();
//! let engine = LayoutEngine::new(GalleryConfig::default()).unwrap();
//! let layout = engine.compute(&images, ViewportClass::Mobile);
//!
//! let svg = render_layout_svg(&layout);
//! // svg is a complete SVG document string
//! assert!(svg.starts_with("<svg"));
//! ```

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::aspect::AspectClass;
use crate::layout::{GalleryLayout, ImagePlacement, ViewportClass};

/// Pixel width of one column panel.
const COLUMN_W: f64 = 140.0;
/// Vertical gap between image boxes.
const TILE_GAP: f64 = 7.0;
/// Horizontal gap between column panels.
const PANEL_GAP: f64 = 24.0;
/// Outer margin.
const MARGIN: f64 = 30.0;
/// Height of the title line.
const TITLE_H: f64 = 26.0;
/// Height of the label above each column.
const LABEL_H: f64 = 20.0;
/// Columns used to preview the desktop flow.
const DESKTOP_PREVIEW_COLUMNS: usize = 3;

/// One column of boxes.
struct Panel<'a> {
    label: String,
    tiles: Vec<&'a ImagePlacement>,
}

/// Render a complete SVG document for `layout`.
pub fn render_layout_svg(layout: &GalleryLayout) -> String {
    let panels = build_panels(layout);
    render_panels(layout, &panels)
}

fn build_panels(layout: &GalleryLayout) -> Vec<Panel<'_>> {
    match layout.viewport {
        ViewportClass::Mobile => layout
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| Panel {
                label: format!("Column {i}  h={:.2}", column.height),
                tiles: column
                    .members
                    .iter()
                    .filter_map(|&index| layout.items.iter().find(|p| p.index == index))
                    .collect(),
            })
            .collect(),
        ViewportClass::Desktop => {
            let count = DESKTOP_PREVIEW_COLUMNS.min(layout.items.len());
            (0..count)
                .map(|i| Panel {
                    label: format!("Flow {i}"),
                    tiles: layout.items.iter().skip(i).step_by(count).collect(),
                })
                .collect()
        }
    }
}

fn tile_height(aspect: AspectClass) -> f64 {
    COLUMN_W * aspect.height_per_width()
}

fn panel_height(panel: &Panel<'_>) -> f64 {
    let boxes: f64 = panel.tiles.iter().map(|p| tile_height(p.aspect)).sum();
    let gaps = panel.tiles.len().saturating_sub(1) as f64 * TILE_GAP;
    boxes + gaps
}

fn render_panels(layout: &GalleryLayout, panels: &[Panel<'_>]) -> String {
    if layout.is_empty() || panels.is_empty() {
        return String::from(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#);
    }

    let tallest = panels.iter().map(panel_height).fold(0.0, f64::max);
    let n = panels.len() as f64;
    let total_w = 2.0 * MARGIN + n * COLUMN_W + (n - 1.0) * PANEL_GAP;
    let total_h = 2.0 * MARGIN + TITLE_H + LABEL_H + tallest;

    let mut svg = String::with_capacity(4096);

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');

    // Light/dark mode via prefers-color-scheme
    svg.push_str(r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .title { font-size: 14px; font-weight: bold; fill: #333; }
  .label { font-size: 11px; fill: #666; }
  .tile { fill: #6ba3d6; stroke: #2c6faa; stroke-width: 1; }
  .fragile { stroke: #d9534f; stroke-width: 3; }
  .aspect { font-size: 12px; font-weight: bold; fill: #fff; }
  .focal { fill: #fff; stroke: #333; stroke-width: 1; }
  @media (prefers-color-scheme: dark) {
    .title { fill: #e0e0e0; }
    .label { fill: #aaa; }
    .tile { fill: #3a72a4; stroke: #5a9fd4; }
    .fragile { stroke: #ff7b72; }
    .focal { stroke: #111; }
  }
</style>
"##);

    let title = match layout.viewport {
        ViewportClass::Mobile => format!(
            "Mobile  {} images, {} columns",
            layout.items.len(),
            panels.len()
        ),
        ViewportClass::Desktop => format!("Desktop  {} images", layout.items.len()),
    };
    svg.push_str(&format!(
        r#"<text x="{MARGIN}" y="{}" class="title">{}</text>"#,
        MARGIN + 14.0,
        escape_xml(&title)
    ));
    svg.push('\n');

    for (i, panel) in panels.iter().enumerate() {
        let x = MARGIN + i as f64 * (COLUMN_W + PANEL_GAP);
        let mut y = MARGIN + TITLE_H;

        svg.push_str(&format!(
            r#"<text x="{x}" y="{:.1}" class="label">{}</text>"#,
            y + 12.0,
            escape_xml(&panel.label)
        ));
        svg.push('\n');
        y += LABEL_H;

        for tile in &panel.tiles {
            let h = tile_height(tile.aspect);
            let class = if tile.fragile { "tile fragile" } else { "tile" };
            svg.push_str(&format!(
                r#"<rect x="{x:.1}" y="{y:.1}" width="{COLUMN_W:.1}" height="{h:.1}" class="{class}" rx="2">"#
            ));
            svg.push_str(&format!("<title>{}</title></rect>", escape_xml(&tile.src)));
            svg.push('\n');

            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" class="aspect" text-anchor="middle">{}</text>"#,
                x + COLUMN_W / 2.0,
                y + h / 2.0 + 4.0,
                tile.aspect.label()
            ));
            svg.push('\n');

            let fx = x + COLUMN_W * tile.object_position.x / 100.0;
            let fy = y + h * tile.object_position.y / 100.0;
            svg.push_str(&format!(
                r#"<circle cx="{fx:.1}" cy="{fy:.1}" r="3" class="focal"/>"#
            ));
            svg.push('\n');

            y += h + TILE_GAP;
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GalleryConfig;
    use crate::image::{GalleryImage, Hotspot};
    use crate::layout::LayoutEngine;
    use crate::orientation::Orientation;

    fn layout(images: &[GalleryImage], viewport: ViewportClass) -> GalleryLayout {
        LayoutEngine::new(GalleryConfig::default())
            .unwrap()
            .compute(images, viewport)
    }

    fn numbered(count: usize) -> Vec<GalleryImage> {
        (0..count).map(|i| GalleryImage::new(format!("{i}.jpg"))).collect()
    }

    #[test]
    fn empty_layout_is_minimal_document() {
        let svg = render_layout_svg(&layout(&[], ViewportClass::Mobile));
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("/>"));
    }

    #[test]
    fn mobile_draws_one_panel_per_column() {
        let svg = render_layout_svg(&layout(&numbered(8), ViewportClass::Mobile));
        assert!(svg.contains("Column 0"));
        assert!(svg.contains("Column 2"));
        assert!(!svg.contains("Column 3"));
        assert_eq!(svg.matches("<rect").count(), 8);
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn desktop_previews_in_three_flows() {
        let svg = render_layout_svg(&layout(&numbered(7), ViewportClass::Desktop));
        assert!(svg.contains("Desktop  7 images"));
        assert!(svg.contains("Flow 2"));
        assert_eq!(svg.matches("<rect").count(), 7);

        let svg = render_layout_svg(&layout(&numbered(2), ViewportClass::Desktop));
        assert!(svg.contains("Flow 1"));
        assert!(!svg.contains("Flow 2"));
    }

    #[test]
    fn fragile_images_are_outlined() {
        let images = [
            GalleryImage::new("edge").hotspot(Hotspot::point(0.02, 0.5)),
            GalleryImage::new("calm").orientation(Orientation::Square),
        ];
        let svg = render_layout_svg(&layout(&images, ViewportClass::Mobile));
        assert_eq!(svg.matches(r#"class="tile fragile""#).count(), 1);
    }

    #[test]
    fn labels_are_escaped() {
        let images = [GalleryImage::new(r#"a<b>&"c".jpg"#)];
        let svg = render_layout_svg(&layout(&images, ViewportClass::Desktop));
        assert!(svg.contains("a&lt;b&gt;&amp;&quot;c&quot;.jpg"));
        assert!(!svg.contains("<b>"));
    }

    #[test]
    fn has_dark_style() {
        let svg = render_layout_svg(&layout(&numbered(1), ViewportClass::Mobile));
        assert!(svg.contains("prefers-color-scheme: dark"));
    }
}
