//! Figure rendering.
//!
//! Images are displayed transposed with the origin at the lower left: data
//! row `i` runs along the horizontal axis and data column `j` runs upward.
//! Track points `(x, y)` are drawn at horizontal `y`, vertical `x`, which
//! puts them on top of the pixels they were detected on.

use crate::colormap::Colormap;
use crate::util::{f64_to_f32, usize_to_f64, usize_to_u32};
use crate::{Error, Result};
use edgetrack_core::{Track, TrackCollection};
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use ndarray::Array2;
use std::path::Path;

/// An RGB figure ready to be encoded.
pub type Canvas = RgbImage;

/// Appearance settings shared by all figures.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Colormap for image intensities.
    pub colormap: Colormap,
    /// Images are upscaled by an integer factor until their short side
    /// reaches this many pixels.
    pub min_short_side: usize,
    /// Upper bound on the long side after upscaling.
    pub max_long_side: usize,
    /// Track color on top of the image.
    pub overlay_color: Rgb<u8>,
    /// Track color on the blank canvas.
    pub track_color: Rgb<u8>,
    /// Background of the track-only figure.
    pub background: Rgb<u8>,
    /// Size of the track-only figure in pixels.
    pub tracks_canvas: (u32, u32),
    /// Fraction of the track-only figure left empty on each side.
    pub margin: f64,
    /// Stroke width in pixels.
    pub line_width: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            colormap: Colormap::Viridis,
            min_short_side: 512,
            max_long_side: 4096,
            overlay_color: Rgb([255, 0, 0]),
            track_color: Rgb([0, 0, 0]),
            background: Rgb([255, 255, 255]),
            tracks_canvas: (640, 480),
            margin: 0.05,
            line_width: 2,
        }
    }
}

impl RenderOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the colormap.
    #[must_use]
    pub fn with_colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = colormap;
        self
    }

    /// Sets the minimum short side used to pick the upscaling factor.
    #[must_use]
    pub fn with_min_short_side(mut self, pixels: usize) -> Self {
        self.min_short_side = pixels;
        self
    }

    /// Sets the size of the track-only figure.
    #[must_use]
    pub fn with_tracks_canvas(mut self, width: u32, height: u32) -> Self {
        self.tracks_canvas = (width, height);
        self
    }

    /// Sets the stroke width.
    #[must_use]
    pub fn with_line_width(mut self, width: u32) -> Self {
        self.line_width = width.max(1);
        self
    }
}

/// Placement of an image on the canvas.
struct ImageFrame {
    cols: usize,
    scale: usize,
}

impl ImageFrame {
    fn new(rows: usize, cols: usize, opts: &RenderOptions) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyImage { rows, cols });
        }
        let short = rows.min(cols);
        let long = rows.max(cols);
        let wanted = opts.min_short_side.div_ceil(short).max(1);
        let cap = (opts.max_long_side / long).max(1);
        Ok(Self {
            cols,
            scale: wanted.min(cap),
        })
    }

    /// Maps plot coordinates to canvas pixels. Pixel centres sit on integers.
    fn to_canvas(&self, horizontal: f64, vertical: f64) -> (f32, f32) {
        let s = usize_to_f64(self.scale);
        let u = (horizontal + 0.5) * s;
        let v = (usize_to_f64(self.cols) - 0.5 - vertical) * s;
        (f64_to_f32(u), f64_to_f32(v))
    }
}

fn intensity_range(data: &Array2<f32>) -> (f32, f32) {
    let (lo, hi) = data
        .iter()
        .filter(|v| v.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if lo.is_finite() {
        (lo, hi)
    } else {
        (0.0, 0.0)
    }
}

fn draw_polyline<I>(canvas: &mut Canvas, points: I, color: Rgb<u8>, width: u32)
where
    I: IntoIterator<Item = (f32, f32)>,
{
    let width = width.max(1);
    let offsets: Vec<f32> = (0..width)
        .map(|k| f64_to_f32(f64::from(k) - f64::from(width - 1) / 2.0))
        .collect();
    let mut prev: Option<(f32, f32)> = None;
    for point in points {
        if let Some(start) = prev {
            for &dx in &offsets {
                for &dy in &offsets {
                    draw_line_segment_mut(
                        canvas,
                        (start.0 + dx, start.1 + dy),
                        (point.0 + dx, point.1 + dy),
                        color,
                    );
                }
            }
        }
        prev = Some(point);
    }
}

fn draw_track_on_image(
    canvas: &mut Canvas,
    frame: &ImageFrame,
    track: &Track,
    opts: &RenderOptions,
) {
    let points = track.points().map(|(x, y)| frame.to_canvas(y, x));
    draw_polyline(canvas, points, opts.overlay_color, opts.line_width);
}

fn render_with_frame(data: &Array2<f32>, opts: &RenderOptions) -> Result<(Canvas, ImageFrame)> {
    let (rows, cols) = data.dim();
    let frame = ImageFrame::new(rows, cols, opts)?;
    let (lo, hi) = intensity_range(data);
    let span = hi - lo;
    let scale = frame.scale;

    let canvas = RgbImage::from_fn(
        usize_to_u32(rows * scale),
        usize_to_u32(cols * scale),
        |u, v| {
            let i = u as usize / scale;
            let j = cols - 1 - v as usize / scale;
            let value = data[[i, j]];
            let normalized = if span > 0.0 { (value - lo) / span } else { 0.0 };
            Rgb(opts.colormap.apply(normalized))
        },
    );
    Ok((canvas, frame))
}

/// Renders the image alone.
///
/// # Errors
/// Returns [`Error::EmptyImage`] if the image has no pixels.
pub fn render_image(data: &Array2<f32>, opts: &RenderOptions) -> Result<Canvas> {
    render_with_frame(data, opts).map(|(canvas, _)| canvas)
}

/// Renders the image with every track drawn on top, in ID order.
///
/// Tracks must already be expressed on the image's pixel grid.
///
/// # Errors
/// Returns [`Error::EmptyImage`] if the image has no pixels.
pub fn render_overlay(
    data: &Array2<f32>,
    tracks: &TrackCollection,
    opts: &RenderOptions,
) -> Result<Canvas> {
    let (mut canvas, frame) = render_with_frame(data, opts)?;
    for track in tracks {
        draw_track_on_image(&mut canvas, &frame, track, opts);
    }
    Ok(canvas)
}

/// Renders the tracks alone on a blank canvas, fitted to their extent.
///
/// Both axes share one scale so track shapes are not distorted.
#[must_use]
pub fn render_tracks(tracks: &TrackCollection, opts: &RenderOptions) -> Canvas {
    let (width, height) = opts.tracks_canvas;
    let mut canvas = RgbImage::from_pixel(width, height, opts.background);
    let Some((min_x, max_x, min_y, max_y)) = tracks.bounds() else {
        return canvas;
    };

    let w = f64::from(width);
    let h = f64::from(height);
    let usable_w = w * (1.0 - 2.0 * opts.margin);
    let usable_h = h * (1.0 - 2.0 * opts.margin);
    // Horizontal axis carries y, vertical axis carries x.
    let span_h = (max_y - min_y).max(1.0);
    let span_v = (max_x - min_x).max(1.0);
    let scale = (usable_w / span_h).min(usable_h / span_v);
    let centre_h = (min_y + max_y) / 2.0;
    let centre_v = (min_x + max_x) / 2.0;

    for track in tracks {
        let points = track.points().map(|(x, y)| {
            let u = w / 2.0 + (y - centre_h) * scale;
            let v = h / 2.0 - (x - centre_v) * scale;
            (f64_to_f32(u), f64_to_f32(v))
        });
        draw_polyline(&mut canvas, points, opts.track_color, opts.line_width);
    }
    canvas
}

/// Encodes a canvas as PNG.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn save_png(canvas: &Canvas, path: &Path) -> Result<()> {
    canvas.save_with_format(path, ImageFormat::Png)?;
    log::debug!(
        "saved {}x{} figure to {}",
        canvas.width(),
        canvas.height(),
        path.display()
    );
    Ok(())
}
