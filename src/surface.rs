use std::f64::consts::TAU;

/// 2D affine transform in canvas order `[a, b, c, d, e, f]`:
///
/// ```text
/// | a c e |
/// | b d f |
/// | 0 0 1 |
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Pure scale with no skew and no offset
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Post-multiply by a translation (same as `ctx.translate`)
    pub fn translated(self, tx: f64, ty: f64) -> Self {
        Self {
            e: self.a * tx + self.c * ty + self.e,
            f: self.b * tx + self.d * ty + self.f,
            ..self
        }
    }

    /// Post-multiply by a scale (same as `ctx.scale`)
    pub fn scaled(self, sx: f64, sy: f64) -> Self {
        Self {
            a: self.a * sx,
            b: self.b * sx,
            c: self.c * sy,
            d: self.d * sy,
            ..self
        }
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Uniform length scale factor (sqrt of the determinant)
    pub fn length_scale(&self) -> f64 {
        (self.a * self.d - self.b * self.c).abs().sqrt()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// RGBA fill colour, channel values 0-255 and alpha 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    /// Pure white scaled only in alpha
    pub fn white(alpha: f64) -> Self {
        Self {
            r: 255,
            g: 255,
            b: 255,
            a: alpha,
        }
    }
}

/// A circular arc sub-path, stored in user space together with the
/// transform that was current when it was added.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub transform: Transform,
}

impl ArcPath {
    pub fn is_full_circle(&self) -> bool {
        (self.end_angle - self.start_angle).abs() >= TAU
    }
}

/// Immediate-mode 2D drawing surface.
///
/// Mirrors the subset of a canvas 2D context the particle field needs.
/// Coordinates passed to drawing calls are transformed by the current
/// transform; `resize` changes the backing store and resets the
/// transform to identity.
pub trait Surface {
    fn resize(&mut self, width: usize, height: usize);
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn begin_path(&mut self);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn set_fill_style(&mut self, color: Rgba);
    fn fill(&mut self);
    fn translate(&mut self, tx: f64, ty: f64);
    fn scale(&mut self, sx: f64, sy: f64);
    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64);
}

/// A single recorded drawing call
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Resize(usize, usize),
    ClearRect(f64, f64, f64, f64),
    BeginPath,
    Arc(ArcPath),
    FillStyle(Rgba),
    Fill,
    Translate(f64, f64),
    Scale(f64, f64),
    SetTransform(Transform),
}

/// Surface that records every call and tracks the current transform,
/// used to check drawing semantics without rasterising.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
    pub transform: Transform,
}

#[cfg(test)]
impl RecordingSurface {
    pub fn fills(&self) -> usize {
        self.calls.iter().filter(|c| **c == DrawCall::Fill).count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn resize(&mut self, width: usize, height: usize) {
        self.transform = Transform::IDENTITY;
        self.calls.push(DrawCall::Resize(width, height));
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(DrawCall::ClearRect(x, y, width, height));
    }

    fn begin_path(&mut self) {
        self.calls.push(DrawCall::BeginPath);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.calls.push(DrawCall::Arc(ArcPath {
            x,
            y,
            radius,
            start_angle,
            end_angle,
            transform: self.transform,
        }));
    }

    fn set_fill_style(&mut self, color: Rgba) {
        self.calls.push(DrawCall::FillStyle(color));
    }

    fn fill(&mut self) {
        self.calls.push(DrawCall::Fill);
    }

    fn translate(&mut self, tx: f64, ty: f64) {
        self.transform = self.transform.translated(tx, ty);
        self.calls.push(DrawCall::Translate(tx, ty));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.transform = self.transform.scaled(sx, sy);
        self.calls.push(DrawCall::Scale(sx, sy));
    }

    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.transform = Transform::new(a, b, c, d, e, f);
        self.calls.push(DrawCall::SetTransform(self.transform));
    }
}
