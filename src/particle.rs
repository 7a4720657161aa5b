use rand::Rng;

/// Logical canvas size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasSize {
    pub w: f64,
    pub h: f64,
}

/// One drifting dot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    /// Smoothed offset caused by pointer attraction
    pub translate_x: f64,
    pub translate_y: f64,
    /// Radius in logical pixels, always >= 1
    pub size: u32,
    pub alpha: f64,
    /// Opacity ceiling, fixed at creation
    pub target_alpha: f64,
    pub dx: f64,
    pub dy: f64,
    pub magnetism: f64,
}

impl Circle {
    /// Generate a fresh particle somewhere on the canvas, fully transparent
    pub fn random<R: Rng + ?Sized>(rng: &mut R, canvas: CanvasSize) -> Self {
        let x = (rng.gen::<f64>() * canvas.w).floor();
        let y = (rng.gen::<f64>() * canvas.h).floor();
        let size = rng.gen_range(1..=2);
        let target_alpha = round_to(rng.gen::<f64>() * 0.6 + 0.1, 1);

        Self {
            x,
            y,
            translate_x: 0.0,
            translate_y: 0.0,
            size,
            alpha: 0.0,
            target_alpha,
            dx: (rng.gen::<f64>() - 0.5) * 0.2,
            dy: (rng.gen::<f64>() - 0.5) * 0.2,
            magnetism: 0.1 + rng.gen::<f64>() * 4.0,
        }
    }

    pub fn radius(&self) -> f64 {
        self.size as f64
    }

    /// Signed distance from the visible extent to the nearest canvas edge
    pub fn closest_edge(&self, canvas: CanvasSize) -> f64 {
        let r = self.radius();
        let left = self.x + self.translate_x - r;
        let right = canvas.w - self.x - self.translate_x - r;
        let top = self.y + self.translate_y - r;
        let bottom = canvas.h - self.y - self.translate_y - r;
        left.min(right).min(top).min(bottom)
    }

    /// True once the origin has drifted more than one radius past an edge
    pub fn is_out_of_bounds(&self, canvas: CanvasSize) -> bool {
        let r = self.radius();
        self.x < -r || self.x > canvas.w + r || self.y < -r || self.y > canvas.h + r
    }
}

/// Linearly map `value` from `[start1, end1]` onto `[start2, end2]`.
///
/// Negative results clamp to 0; there is no upper clamp. A collapsed
/// input range yields 0.
pub fn remap_value(value: f64, start1: f64, end1: f64, start2: f64, end2: f64) -> f64 {
    let span = end1 - start1;
    if span == 0.0 {
        return 0.0;
    }
    let remapped = (value - start1) * (end2 - start2) / span + start2;
    if remapped > 0.0 {
        remapped
    } else {
        0.0
    }
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const CANVAS: CanvasSize = CanvasSize { w: 200.0, h: 100.0 };

    #[test]
    fn test_remap_examples() {
        assert_eq!(remap_value(10.0, 0.0, 20.0, 0.0, 1.0), 0.5);
        assert_eq!(remap_value(-5.0, 0.0, 20.0, 0.0, 1.0), 0.0);
        assert_eq!(remap_value(25.0, 0.0, 20.0, 0.0, 1.0), 1.25);
    }

    #[test]
    fn test_remap_collapsed_range() {
        assert_eq!(remap_value(5.0, 20.0, 20.0, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.46, 1), 0.5);
        assert_eq!(round_to(0.123, 2), 0.12);
        assert_eq!(round_to(0.7, 1), 0.7);
    }

    #[test]
    fn test_factory_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2000 {
            let c = Circle::random(&mut rng, CANVAS);
            assert!(c.size == 1 || c.size == 2);
            assert!((0.1..=0.7).contains(&c.target_alpha));
            assert_eq!(round_to(c.target_alpha, 1), c.target_alpha);
            assert_eq!(c.alpha, 0.0);
            assert_eq!(c.translate_x, 0.0);
            assert_eq!(c.translate_y, 0.0);
            assert!((-0.1..0.1).contains(&c.dx));
            assert!((-0.1..0.1).contains(&c.dy));
            assert!((0.1..4.1).contains(&c.magnetism));
            assert!((0.0..CANVAS.w).contains(&c.x) && c.x.fract() == 0.0);
            assert!((0.0..CANVAS.h).contains(&c.y) && c.y.fract() == 0.0);
        }
    }

    #[test]
    fn test_factory_covers_both_sizes() {
        let mut rng = StdRng::seed_from_u64(11);
        let sizes: Vec<u32> = (0..200).map(|_| Circle::random(&mut rng, CANVAS).size).collect();
        assert!(sizes.contains(&1));
        assert!(sizes.contains(&2));
    }

    #[test]
    fn test_closest_edge_includes_translate_and_size() {
        let mut rng = StdRng::seed_from_u64(1);
        let c = Circle {
            x: 10.0,
            y: 50.0,
            translate_x: -3.0,
            size: 2,
            ..Circle::random(&mut rng, CANVAS)
        };
        // left edge: 10 - 3 - 2
        assert_eq!(c.closest_edge(CANVAS), 5.0);

        let past = Circle { x: 0.0, translate_x: 0.0, ..c };
        assert_eq!(past.closest_edge(CANVAS), -2.0);
    }

    #[test]
    fn test_out_of_bounds_accounts_for_radius() {
        let mut rng = StdRng::seed_from_u64(2);
        let base = Circle {
            size: 2,
            ..Circle::random(&mut rng, CANVAS)
        };
        assert!(!Circle { x: -2.0, ..base }.is_out_of_bounds(CANVAS));
        assert!(Circle { x: -2.01, ..base }.is_out_of_bounds(CANVAS));
        assert!(!Circle { y: 102.0, ..base }.is_out_of_bounds(CANVAS));
        assert!(Circle { y: 102.5, ..base }.is_out_of_bounds(CANVAS));
    }
}
