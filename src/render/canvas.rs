//! Software rasterizer for the clock face
//!
//! Provides a simple, safe API over a pixel buffer instead of direct buffer
//! indexing scattered throughout rendering code. Shapes are anti-aliased by
//! pixel coverage estimated from the distance to the shape edge.

use crate::geometry::{Ellipse, Point};

/// Blend a foreground color onto a background color using alpha compositing.
///
/// Both colors are in ARGB format (0xAARRGGBB). `alpha` is the blend ratio.
///
/// Returns the blended color with full opacity (alpha = 0xFF).
#[inline]
pub fn blend_colors(bg: u32, fg: u32, alpha: f32) -> u32 {
    let bg_r = ((bg >> 16) & 0xFF) as f32;
    let bg_g = ((bg >> 8) & 0xFF) as f32;
    let bg_b = (bg & 0xFF) as f32;

    let fg_r = ((fg >> 16) & 0xFF) as f32;
    let fg_g = ((fg >> 8) & 0xFF) as f32;
    let fg_b = (fg & 0xFF) as f32;

    let final_r = (bg_r * (1.0 - alpha) + fg_r * alpha) as u32;
    let final_g = (bg_g * (1.0 - alpha) + fg_g * alpha) as u32;
    let final_b = (bg_b * (1.0 - alpha) + fg_b * alpha) as u32;

    0xFF000000 | (final_r << 16) | (final_g << 8) | final_b
}

/// Distance from `p` to the segment `a`-`b`
fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * abx, a.y + t * aby))
}

/// A pixel buffer wrapper providing drawing primitives.
///
/// All coordinates are in pixels. Out-of-bounds drawing is clipped.
pub struct Canvas<'a> {
    buffer: &'a mut [u32],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    /// Wrap a mutable pixel buffer
    ///
    /// If the buffer is smaller than width*height, the height is reduced to
    /// what the buffer can hold.
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        let expected_size = width * height;
        let actual_size = buffer.len();

        let (width, height) = if actual_size < expected_size && width > 0 {
            (width, actual_size / width)
        } else {
            (width, height)
        };

        Self {
            buffer,
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read a pixel, `None` when out of bounds
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.buffer[y * self.width + x])
        } else {
            None
        }
    }

    /// Clear the entire buffer with a solid color
    #[inline]
    pub fn clear(&mut self, color: u32) {
        self.buffer.fill(color);
    }

    /// Composite `color` onto one pixel, scaled by `coverage` in `[0, 1]`
    #[inline]
    fn blend_pixel(&mut self, x: usize, y: usize, color: u32, coverage: f32) {
        let alpha = ((color >> 24) & 0xFF) as f32 / 255.0 * coverage;
        if alpha <= 0.0 {
            return;
        }
        let idx = y * self.width + x;
        self.buffer[idx] = if alpha >= 1.0 {
            color | 0xFF000000
        } else {
            blend_colors(self.buffer[idx], color, alpha)
        };
    }

    /// Clip a floating point bounding box to pixel index ranges
    fn clip_bounds(&self, min: Point, max: Point) -> Option<(usize, usize, usize, usize)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(self.width as f32);
        let y1 = max.y.ceil().min(self.height as f32);
        if !(x0 < x1 && y0 < y1) {
            return None;
        }
        Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }

    /// Fill an ellipse with an anti-aliased edge
    pub fn fill_ellipse(&mut self, ellipse: Ellipse, color: u32) {
        let Ellipse {
            center,
            radius_x,
            radius_y,
        } = ellipse;
        if !(radius_x > 0.0 && radius_y > 0.0) {
            return;
        }

        let min = Point::new(center.x - radius_x - 1.0, center.y - radius_y - 1.0);
        let max = Point::new(center.x + radius_x + 1.0, center.y + radius_y + 1.0);
        let Some((x0, y0, x1, y1)) = self.clip_bounds(min, max) else {
            return;
        };

        // Scale the normalized distance back to pixels along the tighter axis
        let edge_scale = radius_x.min(radius_y);
        for py in y0..y1 {
            let dy = (py as f32 + 0.5 - center.y) / radius_y;
            for px in x0..x1 {
                let dx = (px as f32 + 0.5 - center.x) / radius_x;
                let signed = ((dx * dx + dy * dy).sqrt() - 1.0) * edge_scale;
                let coverage = (0.5 - signed).clamp(0.0, 1.0);
                self.blend_pixel(px, py, color, coverage);
            }
        }
    }

    /// Stroke a line with round caps and an anti-aliased edge
    pub fn draw_line(&mut self, from: Point, to: Point, color: u32, stroke_width: f32) {
        if !(stroke_width > 0.0) {
            return;
        }
        let half = stroke_width / 2.0;
        let pad = half + 1.0;

        let min = Point::new(from.x.min(to.x) - pad, from.y.min(to.y) - pad);
        let max = Point::new(from.x.max(to.x) + pad, from.y.max(to.y) + pad);
        let Some((x0, y0, x1, y1)) = self.clip_bounds(min, max) else {
            return;
        };

        for py in y0..y1 {
            for px in x0..x1 {
                let p = Point::new(px as f32 + 0.5, py as f32 + 0.5);
                let dist = distance_to_segment(p, from, to);
                let coverage = (half + 0.5 - dist).clamp(0.0, 1.0);
                self.blend_pixel(px, py, color, coverage);
            }
        }
    }
}
