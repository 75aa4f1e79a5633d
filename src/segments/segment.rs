use crate::angle::direction_deg;
use nalgebra::{Matrix2, Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Straight segment between two pixel positions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub p0: [f32; 2],
    pub p1: [f32; 2],
}

impl LineSegment {
    pub fn new(p0: [f32; 2], p1: [f32; 2]) -> Self {
        Self { p0, p1 }
    }

    /// Same segment with endpoints ordered left-to-right (top-to-bottom for
    /// vertical segments). Direction angles of canonical segments lie in
    /// [-90°, 90°].
    pub fn canonical(self) -> Self {
        let swap = self.p1[0] < self.p0[0] || (self.p1[0] == self.p0[0] && self.p1[1] < self.p0[1]);
        if swap {
            Self::new(self.p1, self.p0)
        } else {
            self
        }
    }

    pub fn start(&self) -> Point2<f32> {
        Point2::new(self.p0[0], self.p0[1])
    }

    pub fn end(&self) -> Point2<f32> {
        Point2::new(self.p1[0], self.p1[1])
    }

    pub fn delta(&self) -> Vector2<f32> {
        self.end() - self.start()
    }

    pub fn length(&self) -> f32 {
        self.delta().norm()
    }

    /// Direction `atan2(dy, dx)` in degrees.
    pub fn direction_deg(&self) -> f32 {
        let d = self.delta();
        direction_deg(d.x, d.y)
    }

    pub fn midpoint(&self) -> [f32; 2] {
        [
            (self.p0[0] + self.p1[0]) * 0.5,
            (self.p0[1] + self.p1[1]) * 0.5,
        ]
    }

    /// Intersection of the infinite lines through `self` and `other`.
    /// `None` when the lines are (nearly) parallel or a segment is degenerate.
    pub fn line_intersection(&self, other: &LineSegment) -> Option<[f32; 2]> {
        let d1 = self.delta();
        let d2 = other.delta();
        let norms = d1.norm() * d2.norm();
        if norms <= f32::EPSILON || (d1.perp(&d2) / norms).abs() < 1e-4 {
            return None;
        }
        let m = Matrix2::new(d1.x, -d2.x, d1.y, -d2.y);
        let t = m.try_inverse()? * (other.start() - self.start());
        let p = self.start() + d1 * t.x;
        Some([p.x, p.y])
    }
}
