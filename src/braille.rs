use crate::surface::{ArcPath, Rgba, Surface, Transform};
use ratatui::style::Color;
use std::f64::consts::TAU;

/// Braille character rendering for high-resolution terminal graphics.
/// Each Braille character represents a 2x4 grid of dots (8 dots total).
///
/// Dot positions and their bit values:
/// ```text
/// (0,0)=0x01  (1,0)=0x08
/// (0,1)=0x02  (1,1)=0x10
/// (0,2)=0x04  (1,2)=0x20
/// (0,3)=0x40  (1,3)=0x80
/// ```
///
/// Unicode Braille patterns: U+2800 to U+28FF (256 patterns)
const BRAILLE_BASE: u32 = 0x2800;

/// Dot position to bit mapping for Braille characters
const BRAILLE_DOTS: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40], // Left column (x=0): rows 0,1,2,3
    [0x08, 0x10, 0x20, 0x80], // Right column (x=1): rows 0,1,2,3
];

/// Coverage below this is not worth lighting a dot for
const DOT_THRESHOLD: f32 = 0.04;

/// Braille dots per terminal cell, horizontally and vertically
pub const DOTS_PER_CELL_X: u16 = 2;
pub const DOTS_PER_CELL_Y: u16 = 4;

/// A single rendered Braille cell with position and color
#[derive(Clone, Copy)]
pub struct BrailleCell {
    pub x: u16,
    pub y: u16,
    pub char: char,
    pub color: Color,
}

/// Raster surface backed by a per-pixel coverage buffer.
///
/// Fills composite white "source-over" onto a black background, so each
/// pixel only needs to remember its accumulated alpha.
pub struct BrailleSurface {
    width: usize,
    height: usize,
    pixels: Vec<f32>,
    transform: Transform,
    path: Vec<ArcPath>,
    fill_style: Rgba,
}

impl Default for BrailleSurface {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl BrailleSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0.0; width * height],
            transform: Transform::IDENTITY,
            path: Vec::new(),
            fill_style: Rgba::white(1.0),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Accumulated coverage at backing-store pixel (x, y)
    pub fn alpha_at(&self, x: usize, y: usize) -> f32 {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            0.0
        }
    }

    fn composite(&mut self, x: usize, y: usize, alpha: f32) {
        let idx = y * self.width + x;
        let dst = self.pixels[idx];
        self.pixels[idx] = alpha + dst * (1.0 - alpha);
    }

    fn rasterize(&mut self, arc: ArcPath, alpha: f32) {
        let (cx, cy) = arc.transform.apply(arc.x, arc.y);
        let radius = arc.radius * arc.transform.length_scale();
        if radius <= 0.0 || self.width == 0 || self.height == 0 {
            return;
        }

        let min_x = (cx - radius).floor().max(0.0) as usize;
        let min_y = (cy - radius).floor().max(0.0) as usize;
        let max_x = ((cx + radius).ceil().max(0.0) as usize).min(self.width);
        let max_y = ((cy + radius).ceil().max(0.0) as usize).min(self.height);

        let full = arc.is_full_circle();
        let start = arc.start_angle.rem_euclid(TAU);
        let sweep = (arc.end_angle - arc.start_angle).rem_euclid(TAU);

        let mut covered = false;
        for py in min_y..max_y {
            for px in min_x..max_x {
                let dx = px as f64 + 0.5 - cx;
                let dy = py as f64 + 0.5 - cy;
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
                if !full && (dy.atan2(dx) - start).rem_euclid(TAU) > sweep {
                    continue;
                }
                self.composite(px, py, alpha);
                covered = true;
            }
        }

        // Sub-pixel discs still mark the pixel holding their centre
        if !covered && full && cx >= 0.0 && cy >= 0.0 {
            let (px, py) = (cx as usize, cy as usize);
            if px < self.width && py < self.height {
                self.composite(px, py, alpha);
            }
        }
    }

    /// Render the backing store to Braille characters sized to the canvas
    pub fn render_to_braille(&self, canvas_width: u16, canvas_height: u16) -> Vec<BrailleCell> {
        // Braille effective resolution
        let braille_width = canvas_width as usize * DOTS_PER_CELL_X as usize;
        let braille_height = canvas_height as usize * DOTS_PER_CELL_Y as usize;
        if braille_width == 0 || braille_height == 0 {
            return Vec::new();
        }

        // Scale factors (pre-calculated once)
        let scale_x = self.width as f32 / braille_width as f32;
        let scale_y = self.height as f32 / braille_height as f32;

        let mut cells = Vec::new();

        for cy in 0..canvas_height {
            for cx in 0..canvas_width {
                let mut pattern: u8 = 0;
                let mut total_alpha: f32 = 0.0;
                let mut dot_count: usize = 0;

                let base_bx = cx as usize * DOTS_PER_CELL_X as usize;
                let base_by = cy as usize * DOTS_PER_CELL_Y as usize;

                for dx in 0..DOTS_PER_CELL_X as usize {
                    for dy in 0..DOTS_PER_CELL_Y as usize {
                        let px = ((base_bx + dx) as f32 * scale_x) as usize;
                        let py = ((base_by + dy) as f32 * scale_y) as usize;

                        let alpha = self.alpha_at(px, py);
                        if alpha >= DOT_THRESHOLD {
                            pattern |= BRAILLE_DOTS[dx][dy];
                            total_alpha += alpha;
                            dot_count += 1;
                        }
                    }
                }

                // Only emit cells that have at least one dot
                if pattern != 0 {
                    let braille_char =
                        char::from_u32(BRAILLE_BASE + pattern as u32).unwrap_or(' ');
                    cells.push(BrailleCell {
                        x: cx,
                        y: cy,
                        char: braille_char,
                        color: grey(total_alpha / dot_count as f32),
                    });
                }
            }
        }

        cells
    }
}

/// White at `alpha` over black
fn grey(alpha: f32) -> Color {
    let v = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb(v, v, v)
}

impl Surface for BrailleSurface {
    fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels = vec![0.0; width * height];
        self.transform = Transform::IDENTITY;
        self.path.clear();
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let (x0, y0) = self.transform.apply(x, y);
        let (x1, y1) = self.transform.apply(x + width, y + height);
        let left = x0.min(x1).floor().max(0.0) as usize;
        let top = y0.min(y1).floor().max(0.0) as usize;
        let right = (x0.max(x1).ceil().max(0.0) as usize).min(self.width);
        let bottom = (y0.max(y1).ceil().max(0.0) as usize).min(self.height);

        for py in top..bottom {
            let row = py * self.width;
            self.pixels[row + left.min(right)..row + right].fill(0.0);
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.path.push(ArcPath {
            x,
            y,
            radius,
            start_angle,
            end_angle,
            transform: self.transform,
        });
    }

    fn set_fill_style(&mut self, color: Rgba) {
        self.fill_style = color;
    }

    fn fill(&mut self) {
        let alpha = self.fill_style.a.clamp(0.0, 1.0) as f32;
        if alpha <= 0.0 {
            return;
        }
        let path = std::mem::take(&mut self.path);
        for arc in &path {
            self.rasterize(*arc, alpha);
        }
        self.path = path;
    }

    fn translate(&mut self, tx: f64, ty: f64) {
        self.transform = self.transform.translated(tx, ty);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.transform = self.transform.scaled(sx, sy);
    }

    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.transform = Transform::new(a, b, c, d, e, f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disc(surface: &mut BrailleSurface, x: f64, y: f64, r: f64, alpha: f64) {
        surface.begin_path();
        surface.arc(x, y, r, 0.0, TAU);
        surface.set_fill_style(Rgba::white(alpha));
        surface.fill();
    }

    #[test]
    fn test_braille_pattern() {
        // Test that single dot patterns work correctly
        assert_eq!(BRAILLE_DOTS[0][0], 0x01); // Top-left
        assert_eq!(BRAILLE_DOTS[1][0], 0x08); // Top-right
        assert_eq!(BRAILLE_DOTS[0][3], 0x40); // Bottom-left
        assert_eq!(BRAILLE_DOTS[1][3], 0x80); // Bottom-right

        // All dots should give 0xFF
        let all_dots: u8 = BRAILLE_DOTS[0].iter().sum::<u8>() + BRAILLE_DOTS[1].iter().sum::<u8>();
        assert_eq!(all_dots, 0xFF);
    }

    #[test]
    fn test_disc_coverage() {
        let mut surface = BrailleSurface::new(10, 10);
        disc(&mut surface, 5.0, 5.0, 2.0, 0.5);
        assert_eq!(surface.alpha_at(5, 5), 0.5);
        assert_eq!(surface.alpha_at(4, 4), 0.5);
        assert_eq!(surface.alpha_at(0, 0), 0.0);
        assert_eq!(surface.alpha_at(8, 5), 0.0);
    }

    #[test]
    fn test_source_over_accumulates() {
        let mut surface = BrailleSurface::new(4, 4);
        disc(&mut surface, 2.0, 2.0, 1.0, 0.5);
        disc(&mut surface, 2.0, 2.0, 1.0, 0.5);
        assert_eq!(surface.alpha_at(1, 1), 0.75);
    }

    #[test]
    fn test_transparent_fill_draws_nothing() {
        let mut surface = BrailleSurface::new(4, 4);
        disc(&mut surface, 2.0, 2.0, 1.0, 0.0);
        assert!(surface.render_to_braille(2, 1).is_empty());
    }

    #[test]
    fn test_scale_and_translate_apply_to_discs() {
        let mut surface = BrailleSurface::new(20, 20);
        surface.scale(2.0, 2.0);
        surface.translate(1.0, 0.0);
        disc(&mut surface, 3.0, 3.0, 1.0, 1.0);
        // centre lands on (8, 6) with radius 2
        assert_eq!(surface.alpha_at(8, 6), 1.0);
        assert_eq!(surface.alpha_at(5, 6), 0.0);
    }

    #[test]
    fn test_clear_rect_respects_scale() {
        let mut surface = BrailleSurface::new(8, 8);
        surface.scale(2.0, 2.0);
        disc(&mut surface, 2.0, 2.0, 2.0, 1.0);
        surface.clear_rect(0.0, 0.0, 4.0, 4.0);
        assert!((0..8).all(|y| (0..8).all(|x| surface.alpha_at(x, y) == 0.0)));
    }

    #[test]
    fn test_resize_resets_transform_and_pixels() {
        let mut surface = BrailleSurface::new(4, 4);
        surface.scale(3.0, 3.0);
        disc(&mut surface, 1.0, 1.0, 1.0, 1.0);
        surface.resize(6, 2);
        assert_eq!((surface.width(), surface.height()), (6, 2));
        disc(&mut surface, 1.5, 1.5, 0.5, 1.0);
        assert_eq!(surface.alpha_at(1, 1), 1.0);
        assert_eq!(surface.alpha_at(3, 1), 0.0);
    }

    #[test]
    fn test_tiny_disc_marks_centre_pixel() {
        let mut surface = BrailleSurface::new(4, 4);
        surface.begin_path();
        surface.arc(1.9, 2.1, 0.2, 0.0, TAU);
        surface.fill();
        assert_eq!(surface.alpha_at(1, 2), 1.0);
    }

    #[test]
    fn test_render_single_dot_to_braille() {
        let mut surface = BrailleSurface::new(4, 8);
        // pixel (1, 3) -> right column, bottom row of cell (0, 0)
        surface.begin_path();
        surface.arc(1.5, 3.5, 0.5, 0.0, TAU);
        surface.fill();
        let cells = surface.render_to_braille(2, 2);
        assert_eq!(cells.len(), 1);
        assert_eq!((cells[0].x, cells[0].y), (0, 0));
        assert_eq!(cells[0].char, char::from_u32(BRAILLE_BASE + 0x80).unwrap());
        assert_eq!(cells[0].color, Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_half_alpha_renders_grey() {
        let mut surface = BrailleSurface::new(2, 4);
        disc(&mut surface, 1.0, 2.0, 4.0, 0.5);
        let cells = surface.render_to_braille(1, 1);
        assert_eq!(cells[0].char, '\u{28FF}');
        assert_eq!(cells[0].color, Color::Rgb(128, 128, 128));
    }

    #[test]
    fn test_half_arc_only_fills_its_sweep() {
        let mut surface = BrailleSurface::new(10, 10);
        surface.begin_path();
        // lower half in screen space (y grows downwards)
        surface.arc(5.0, 5.0, 3.0, 0.0, std::f64::consts::PI);
        surface.fill();
        assert_eq!(surface.alpha_at(5, 6), 1.0);
        assert_eq!(surface.alpha_at(5, 3), 0.0);
    }
}
