use serde::{Deserialize, Serialize};

/// Axis-aligned pixel rectangle. Returned boxes always have non-zero size;
/// "not found" is expressed as `Option::None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Full-frame box for an image of the given size.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Clamp the box to an image of `width × height`; `None` if nothing is left.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<Self> {
        if self.x >= width || self.y >= height {
            return None;
        }
        let w = self.width.min(width - self.x);
        let h = self.height.min(height - self.y);
        (w > 0 && h > 0).then_some(Self::new(self.x, self.y, w, h))
    }
}

/// A detected change of direction along the seam. `id` is 1-based and
/// follows acceptance order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BendPoint {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

impl BendPoint {
    /// Display label, e.g. `Bend 2`.
    pub fn label(&self) -> String {
        format!("Bend {}", self.id)
    }

    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.x as f64 - x).hypot(self.y as f64 - y)
    }
}

/// Turn-angle recorded for one bend, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BendAngle {
    pub bend_id: u32,
    pub angle_deg: f64,
}

/// Ordered bend points plus their turn-angles.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BendDetection {
    pub points: Vec<BendPoint>,
    pub angles: Vec<BendAngle>,
}

impl BendDetection {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Turn-angle recorded for `bend_id`, if any.
    pub fn angle_of(&self, bend_id: u32) -> Option<f64> {
        self.angles
            .iter()
            .find(|a| a.bend_id == bend_id)
            .map(|a| a.angle_deg)
    }
}
