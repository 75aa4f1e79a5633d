//! Angle utilities shared by the bend detector and the matcher.
//!
//! Segment directions are measured with `atan2(dy, dx)` in image coordinates
//! (y grows downwards). Bend angles are reported in degrees.

/// Direction of the vector `(dx, dy)` in degrees, range (-180, 180].
#[inline]
pub fn direction_deg(dx: f32, dy: f32) -> f32 {
    dy.atan2(dx).to_degrees()
}

/// Absolute difference between two direction angles, in degrees.
///
/// No wrapping is applied: directions of canonicalised (left-to-right)
/// segments live in [-90, 90], so the difference is already the turn.
#[inline]
pub fn turn_angle_deg(a: f32, b: f32) -> f32 {
    (a - b).abs()
}

/// Reduce an angle into [0, 180) and fold the obtuse half onto its acute
/// complement, giving a value in [0, 90]. The sign of a bend is not
/// physically meaningful, so 100° and 80° describe the same bend.
#[inline]
pub fn fold_to_acute(angle_deg: f64) -> f64 {
    let norm = angle_deg.rem_euclid(180.0).abs();
    if norm > 90.0 {
        180.0 - norm
    } else {
        norm
    }
}

/// Round to two decimals, the precision bend angles are reported with.
#[inline]
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
