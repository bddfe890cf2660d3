//! Figure composition: margins, tick frame, and colorbar.

use image::{imageops, Rgba, RgbaImage};

use crate::colormap::Colormap;
use crate::pseudocolor::PseudocolorOptions;

/// Margin around the image area when a frame or colorbar is drawn.
const MARGIN: u32 = 10;
/// Gap between the image area and the colorbar.
const COLORBAR_GAP: u32 = 8;
/// Width of the colorbar gradient strip.
const COLORBAR_WIDTH: u32 = 14;
/// Length of tick marks.
const TICK_LEN: u32 = 3;

const FRAME_COLOR: Rgba<u8> = Rgba([64, 64, 64, 255]);
const CANVAS_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// A composed pseudocolor figure.
///
/// Holds the rendered raster along with the metadata a caller needs to
/// interpret or annotate it. Export lives in `phenopix-io`.
#[derive(Debug, Clone)]
pub struct Figure {
    raster: RgbaImage,
    title: Option<String>,
    value_range: (f32, f32),
    colormap: Colormap,
}

impl Figure {
    /// The composed RGBA raster.
    #[must_use]
    pub fn raster(&self) -> &RgbaImage {
        &self.raster
    }

    /// Consume the figure, returning the raster.
    #[must_use]
    pub fn into_raster(self) -> RgbaImage {
        self.raster
    }

    /// Figure title, if one was set.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The (min, max) value range the colormap was stretched over.
    #[must_use]
    pub fn value_range(&self) -> (f32, f32) {
        self.value_range
    }

    /// The colormap used for rendering.
    #[must_use]
    pub fn colormap(&self) -> Colormap {
        self.colormap
    }
}

/// Render a vertical colorbar gradient strip.
///
/// The top row maps to 1.0 and the bottom row to 0.0.
#[must_use]
pub fn colorbar(colormap: Colormap, width: u32, height: u32) -> RgbaImage {
    let mut strip = RgbaImage::new(width, height);
    #[allow(clippy::cast_precision_loss)]
    let denom = height.saturating_sub(1).max(1) as f32;
    for y in 0..height {
        #[allow(clippy::cast_precision_loss)]
        let t = 1.0 - y as f32 / denom;
        let rgba = Rgba(colormap.apply(t));
        for x in 0..width {
            strip.put_pixel(x, y, rgba);
        }
    }
    strip
}

/// Compose the colorized raster into a figure per the rendering options.
pub(crate) fn compose(
    raster: RgbaImage,
    value_range: (f32, f32),
    opts: &PseudocolorOptions,
) -> Figure {
    let raster = if opts.scale > 1 {
        let (w, h) = raster.dimensions();
        imageops::resize(
            &raster,
            w * opts.scale,
            h * opts.scale,
            imageops::FilterType::Nearest,
        )
    } else {
        raster
    };

    let raster = if opts.axes || opts.colorbar {
        compose_canvas(&raster, opts)
    } else {
        raster
    };

    Figure {
        raster,
        title: opts.title.clone(),
        value_range,
        colormap: opts.colormap,
    }
}

fn compose_canvas(img: &RgbaImage, opts: &PseudocolorOptions) -> RgbaImage {
    let (img_w, img_h) = img.dimensions();
    let bar_extent = if opts.colorbar {
        COLORBAR_GAP + COLORBAR_WIDTH + 2 + TICK_LEN
    } else {
        0
    };
    let canvas_w = MARGIN * 2 + img_w + bar_extent;
    let canvas_h = MARGIN * 2 + img_h;

    let mut canvas = RgbaImage::from_pixel(canvas_w, canvas_h, CANVAS_COLOR);
    imageops::overlay(&mut canvas, img, i64::from(MARGIN), i64::from(MARGIN));

    if opts.axes {
        draw_frame(&mut canvas, MARGIN, MARGIN, img_w, img_h);
    }

    if opts.colorbar {
        let bar_x = MARGIN + img_w + COLORBAR_GAP;
        let strip = colorbar(opts.colormap, COLORBAR_WIDTH, img_h);
        imageops::overlay(&mut canvas, &strip, i64::from(bar_x), i64::from(MARGIN));
        draw_rect(&mut canvas, bar_x, MARGIN, COLORBAR_WIDTH, img_h);
        // quarter ticks on the right side of the bar
        for i in 0..=4u32 {
            let ty = MARGIN + (img_h.saturating_sub(1)) * i / 4;
            for dx in 0..TICK_LEN {
                put(&mut canvas, bar_x + COLORBAR_WIDTH + dx, ty);
            }
        }
    }

    canvas
}

/// 1px frame with quarter tick marks on the left and bottom edges.
fn draw_frame(canvas: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32) {
    draw_rect(canvas, x, y, w, h);
    for i in 0..=4u32 {
        let tx = x + (w.saturating_sub(1)) * i / 4;
        let ty = y + (h.saturating_sub(1)) * i / 4;
        for d in 1..=TICK_LEN {
            // bottom ticks point down, left ticks point left
            put(canvas, tx, y + h.saturating_sub(1) + d);
            put(canvas, x.saturating_sub(d), ty);
        }
    }
}

fn draw_rect(canvas: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32) {
    if w == 0 || h == 0 {
        return;
    }
    for dx in 0..w {
        put(canvas, x + dx, y);
        put(canvas, x + dx, y + h - 1);
    }
    for dy in 0..h {
        put(canvas, x, y + dy);
        put(canvas, x + w - 1, y + dy);
    }
}

#[inline]
fn put(canvas: &mut RgbaImage, x: u32, y: u32) {
    if x < canvas.width() && y < canvas.height() {
        canvas.put_pixel(x, y, FRAME_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorbar_orientation() {
        let strip = colorbar(Colormap::Gray, 4, 16);
        // top is the high end of the range
        assert_eq!(strip.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(strip.get_pixel(0, 15).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_compose_without_decoration_keeps_size() {
        let raster = RgbaImage::new(5, 4);
        let opts = PseudocolorOptions {
            colorbar: false,
            axes: false,
            ..PseudocolorOptions::default()
        };
        let figure = compose(raster, (0.0, 1.0), &opts);
        assert_eq!(figure.raster().dimensions(), (5, 4));
    }

    #[test]
    fn test_compose_with_colorbar_grows_canvas() {
        let raster = RgbaImage::new(5, 4);
        let opts = PseudocolorOptions {
            colorbar: true,
            axes: false,
            ..PseudocolorOptions::default()
        };
        let figure = compose(raster, (0.0, 1.0), &opts);
        let (w, h) = figure.raster().dimensions();
        assert_eq!(h, 4 + 2 * MARGIN);
        assert!(w > 5 + 2 * MARGIN);
    }

    #[test]
    fn test_title_carried_through() {
        let raster = RgbaImage::new(2, 2);
        let opts = PseudocolorOptions {
            title: Some("leaf temperature".into()),
            colorbar: false,
            axes: false,
            ..PseudocolorOptions::default()
        };
        let figure = compose(raster, (0.0, 1.0), &opts);
        assert_eq!(figure.title(), Some("leaf temperature"));
    }
}
