use crate::particle::{remap_value, round_to, CanvasSize, Circle};
use crate::settings::ParticleSettings;
use crate::surface::{Rgba, Surface};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f64::consts::TAU;

/// Distance from an edge (in logical pixels) over which particles fade
const EDGE_FADE_DISTANCE: f64 = 20.0;

/// Per-frame opacity increment while a particle is away from the edges
const FADE_IN_STEP: f64 = 0.02;

/// Pointer position relative to the canvas centre
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MousePosition {
    pub x: f64,
    pub y: f64,
}

/// Viewport dimensions in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Whether a drawn circle joins the live collection
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawMode {
    /// Append after drawing (initial population and replacements)
    Insert,
    /// Draw only; membership is managed by the caller
    Update,
}

/// Particle field state: the context every step function operates on
pub struct ParticleField {
    pub settings: ParticleSettings,
    pub canvas_size: CanvasSize,
    pub dpr: f64,
    pub circles: Vec<Circle>,
    pub mouse: MousePosition,
    /// Top-left corner of the canvas in pointer coordinates
    pub canvas_origin: (f64, f64),
    rng: StdRng,
}

impl ParticleField {
    pub fn new(settings: ParticleSettings, dpr: f64) -> Self {
        Self::with_rng(settings, dpr, StdRng::from_entropy())
    }

    /// Build a field whose particle generation is reproducible
    pub fn with_seed(settings: ParticleSettings, dpr: f64, seed: u64) -> Self {
        Self::with_rng(settings, dpr, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: ParticleSettings, dpr: f64, rng: StdRng) -> Self {
        Self {
            settings,
            canvas_size: CanvasSize::default(),
            dpr,
            circles: Vec::with_capacity(settings.quantity),
            mouse: MousePosition::default(),
            canvas_origin: (0.0, 0.0),
            rng,
        }
    }

    /// Move the canvas within pointer space (e.g. when the layout changes)
    pub fn set_canvas_origin(&mut self, left: f64, top: f64) {
        self.canvas_origin = (left, top);
    }

    /// Reset and repopulate the field for the given viewport
    pub fn init_canvas(&mut self, surface: &mut dyn Surface, viewport: Viewport) {
        self.resize_canvas(surface, viewport);
        self.draw_particles(surface);
        debug!(
            "Field initialised at {}x{} (dpr {}) with {} particles",
            self.canvas_size.w,
            self.canvas_size.h,
            self.dpr,
            self.circles.len()
        );
    }

    fn resize_canvas(&mut self, surface: &mut dyn Surface, viewport: Viewport) {
        self.circles.clear();
        self.canvas_size = CanvasSize {
            w: viewport.width,
            h: viewport.height,
        };
        let backing_w = (self.canvas_size.w * self.dpr).round().max(0.0) as usize;
        let backing_h = (self.canvas_size.h * self.dpr).round().max(0.0) as usize;
        surface.resize(backing_w, backing_h);
        surface.scale(self.dpr, self.dpr);
    }

    fn draw_particles(&mut self, surface: &mut dyn Surface) {
        self.clear_context(surface);
        for _ in 0..self.settings.quantity {
            let circle = Circle::random(&mut self.rng, self.canvas_size);
            self.draw_circle(surface, circle, DrawMode::Insert);
        }
    }

    fn clear_context(&self, surface: &mut dyn Surface) {
        surface.clear_rect(0.0, 0.0, self.canvas_size.w, self.canvas_size.h);
    }

    /// Draw one particle as a white disc at its translated position
    pub fn draw_circle(&mut self, surface: &mut dyn Surface, circle: Circle, mode: DrawMode) {
        surface.translate(circle.translate_x, circle.translate_y);
        surface.begin_path();
        surface.arc(circle.x, circle.y, circle.radius(), 0.0, TAU);
        surface.set_fill_style(Rgba::white(circle.alpha));
        surface.fill();
        surface.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0);

        if mode == DrawMode::Insert {
            self.circles.push(circle);
        }
    }

    /// Advance every particle by one frame and redraw.
    ///
    /// Every particle alive at the start of the frame is evaluated once.
    /// Replacements for culled particles are appended and first move on
    /// the following frame.
    pub fn animate(&mut self, surface: &mut dyn Surface) {
        self.clear_context(surface);

        let canvas = self.canvas_size;
        let mouse = self.mouse;
        let ParticleSettings { staticity, ease, .. } = self.settings;

        let mut i = 0;
        let mut remaining = self.circles.len();
        while remaining > 0 {
            remaining -= 1;

            let circle = &mut self.circles[i];
            let closest_edge = circle.closest_edge(canvas);
            let remap_closest_edge =
                round_to(remap_value(closest_edge, 0.0, EDGE_FADE_DISTANCE, 0.0, 1.0), 2);

            circle.alpha = if remap_closest_edge > 1.0 {
                (circle.alpha + FADE_IN_STEP).min(circle.target_alpha)
            } else {
                circle.target_alpha * remap_closest_edge
            };

            circle.x += circle.dx;
            circle.y += circle.dy;
            circle.translate_x +=
                (mouse.x / (staticity / circle.magnetism) - circle.translate_x) / ease;
            circle.translate_y +=
                (mouse.y / (staticity / circle.magnetism) - circle.translate_y) / ease;

            if circle.is_out_of_bounds(canvas) {
                self.circles.remove(i);
                let replacement = Circle::random(&mut self.rng, canvas);
                self.draw_circle(surface, replacement, DrawMode::Insert);
            } else {
                let snapshot = *circle;
                self.draw_circle(surface, snapshot, DrawMode::Update);
                i += 1;
            }
        }
    }

    /// Track a pointer sample given in pointer coordinates.
    ///
    /// Samples outside the canvas leave the previous position in place.
    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64) {
        let (left, top) = self.canvas_origin;
        let half_w = self.canvas_size.w / 2.0;
        let half_h = self.canvas_size.h / 2.0;
        let x = client_x - left - half_w;
        let y = client_y - top - half_h;

        let inside = x < half_w && x > -half_w && y < half_h && y > -half_h;
        if inside {
            self.mouse = MousePosition { x, y };
        }
    }

    pub fn particle_count(&self) -> usize {
        self.circles.len()
    }
}
