//! 2D vector math
//!
//! `Vector2` is glam's `Vec2`, which already provides add/sub/scale, length,
//! distance and dot. The extension trait adds the guarded operations the
//! simulation relies on.

pub use glam::Vec2 as Vector2;

/// Guarded vector operations
pub trait Vector2Ext {
    /// Normalize in place. Zero-length (or non-finite) vectors are left unchanged.
    fn normalize_in_place(&mut self);

    /// Divide by a scalar. A zero or non-finite divisor leaves the vector unchanged.
    fn divide(self, scalar: f32) -> Self;

    /// Non-mutating normalize with the same zero-length guard
    fn normalized(self) -> Self;
}

impl Vector2Ext for Vector2 {
    #[inline]
    fn normalize_in_place(&mut self) {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            *self /= len;
        }
    }

    #[inline]
    fn divide(self, scalar: f32) -> Self {
        if scalar == 0.0 || !scalar.is_finite() {
            return self;
        }
        self / scalar
    }

    #[inline]
    fn normalized(self) -> Self {
        let mut v = self;
        v.normalize_in_place();
        v
    }
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vector2, b: Vector2) -> f32 {
    a.distance(b)
}

/// Dot product
#[inline]
pub fn dot(a: Vector2, b: Vector2) -> f32 {
    a.dot(b)
}
