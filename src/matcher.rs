//! Nearest-bend matching and angle validation.
//!
//! The bend closest to the laser tool is the one the operator is working on.
//! Its turn-angle is folded onto `[0°, 90°]` (the sign and the obtuse/acute
//! reading of a bend are not distinguishable from a side view) and compared
//! with the expected angle.
use crate::angle::fold_to_acute;
use crate::error::{Error, Result};
use crate::types::{BendDetection, BendPoint};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest accepted difference between folded detected and expected angle.
pub const ANGLE_TOLERANCE_DEG: f64 = 1.0;

/// Laser tool position in the same pixel frame as the bend points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolCoordinate {
    pub x: f64,
    pub y: f64,
}

impl ToolCoordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Non-fatal validation outcome attached to a match.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AngleWarning {
    Deviation { detected: f64, expected: f64 },
    NoExpectedAngle,
}

impl fmt::Display for AngleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AngleWarning::Deviation { detected, expected } => write!(
                f,
                "Angle deviation too high: detected {detected:.2}° vs expected {expected:.2}°"
            ),
            AngleWarning::NoExpectedAngle => f.write_str("No expected angle provided"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BendMatch {
    /// Position of the matched bend in the detection (0-based).
    pub bend_index: usize,
    pub bend: BendPoint,
    /// Raw turn-angle recorded for the bend, 0 when none was recorded.
    pub detected_angle: f64,
    /// Folded angle, present when an expected angle was supplied.
    pub normalized_angle: Option<f64>,
    pub warning: Option<AngleWarning>,
}

impl BendMatch {
    pub fn is_valid(&self) -> bool {
        self.warning.is_none()
    }

    /// Human-readable warning text, if any.
    pub fn warning_message(&self) -> Option<String> {
        self.warning.map(|w| w.to_string())
    }
}

/// Pick the bend nearest to `tool` (first on ties) and validate its angle.
pub fn match_and_validate(
    detection: &BendDetection,
    tool: ToolCoordinate,
    expected: Option<f64>,
) -> Result<BendMatch> {
    let mut nearest: Option<(usize, f64)> = None;
    for (i, p) in detection.points.iter().enumerate() {
        let d = p.distance_to(tool.x, tool.y);
        if nearest.map_or(true, |(_, best)| d < best) {
            nearest = Some((i, d));
        }
    }
    let (bend_index, distance) = nearest.ok_or(Error::NoBendPoints)?;
    let bend = detection.points[bend_index];
    let detected_angle = detection.angle_of(bend.id).unwrap_or(0.0);
    debug!(
        "matcher: tool ({:.1}, {:.1}) -> {} at {distance:.1} px, angle {detected_angle:.2}",
        tool.x,
        tool.y,
        bend.label()
    );

    let (normalized_angle, warning) = match expected {
        Some(expected) => {
            let folded = fold_to_acute(detected_angle);
            let warning = ((folded - expected).abs() > ANGLE_TOLERANCE_DEG).then_some(
                AngleWarning::Deviation {
                    detected: folded,
                    expected,
                },
            );
            (Some(folded), warning)
        }
        None => (None, Some(AngleWarning::NoExpectedAngle)),
    };
    if let Some(w) = &warning {
        warn!("matcher: {}: {w}", bend.label());
    }

    Ok(BendMatch {
        bend_index,
        bend,
        detected_angle,
        normalized_angle,
        warning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BendAngle;

    fn detection(entries: &[(f32, f32, f64)]) -> BendDetection {
        let mut det = BendDetection::default();
        for (i, &(x, y, a)) in entries.iter().enumerate() {
            let id = i as u32 + 1;
            det.points.push(BendPoint { id, x, y });
            det.angles.push(BendAngle {
                bend_id: id,
                angle_deg: a,
            });
        }
        det
    }

    #[test]
    fn empty_detection_is_an_error() {
        let res = match_and_validate(&BendDetection::default(), ToolCoordinate::new(0.0, 0.0), None);
        assert!(matches!(res, Err(Error::NoBendPoints)));
    }

    #[test]
    fn picks_the_nearest_bend() {
        let det = detection(&[(10.0, 10.0, 30.0), (100.0, 40.0, 45.0), (200.0, 10.0, 60.0)]);
        let m = match_and_validate(&det, ToolCoordinate::new(110.0, 35.0), Some(45.0)).unwrap();
        assert_eq!(m.bend_index, 1);
        assert_eq!(m.bend.label(), "Bend 2");
        assert_eq!(m.detected_angle, 45.0);
        assert_eq!(m.normalized_angle, Some(45.0));
        assert!(m.is_valid());
    }

    #[test]
    fn ties_keep_the_first_bend() {
        let det = detection(&[(0.0, 0.0, 10.0), (20.0, 0.0, 20.0)]);
        let m = match_and_validate(&det, ToolCoordinate::new(10.0, 0.0), Some(10.0)).unwrap();
        assert_eq!(m.bend_index, 0);
    }

    #[test]
    fn obtuse_reading_folds_to_acute() {
        let det = detection(&[(5.0, 5.0, 100.0)]);
        let m = match_and_validate(&det, ToolCoordinate::new(0.0, 0.0), Some(80.0)).unwrap();
        assert_eq!(m.normalized_angle, Some(80.0));
        assert!(m.warning.is_none());
    }

    #[test]
    fn wrapped_angle_folds_to_remainder() {
        let det = detection(&[(5.0, 5.0, 200.0)]);
        let m = match_and_validate(&det, ToolCoordinate::new(0.0, 0.0), Some(20.0)).unwrap();
        assert!((m.normalized_angle.unwrap() - 20.0).abs() < 1e-9);
        assert!(m.is_valid());
    }

    #[test]
    fn deviation_beyond_tolerance_warns() {
        let det = detection(&[(5.0, 5.0, 47.5)]);
        let m = match_and_validate(&det, ToolCoordinate::new(0.0, 0.0), Some(45.0)).unwrap();
        assert_eq!(
            m.warning,
            Some(AngleWarning::Deviation {
                detected: 47.5,
                expected: 45.0
            })
        );
        assert_eq!(
            m.warning_message().unwrap(),
            "Angle deviation too high: detected 47.50° vs expected 45.00°"
        );
    }

    #[test]
    fn deviation_at_tolerance_is_accepted() {
        let det = detection(&[(5.0, 5.0, 46.0)]);
        let m = match_and_validate(&det, ToolCoordinate::new(0.0, 0.0), Some(45.0)).unwrap();
        assert!(m.is_valid());
    }

    #[test]
    fn missing_expected_angle_warns() {
        let det = detection(&[(5.0, 5.0, 33.0)]);
        let m = match_and_validate(&det, ToolCoordinate::new(0.0, 0.0), None).unwrap();
        assert_eq!(m.normalized_angle, None);
        assert_eq!(m.warning, Some(AngleWarning::NoExpectedAngle));
        assert_eq!(m.warning_message().unwrap(), "No expected angle provided");
    }

    #[test]
    fn missing_angle_record_reads_as_zero() {
        let mut det = detection(&[(5.0, 5.0, 33.0)]);
        det.angles.clear();
        let m = match_and_validate(&det, ToolCoordinate::new(0.0, 0.0), Some(0.5)).unwrap();
        assert_eq!(m.detected_angle, 0.0);
        assert!(m.is_valid());
    }
}
