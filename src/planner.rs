//! Target angles to motion program.
//!
//! Target angles come either from the request directly or from a drawn arc
//! ([`arc_target_angles`]). Each one is resolved to process parameters through
//! a [`ScanParamLookup`] (the process model lives outside this crate).
//! Resolved entries become scan blocks in request order; unresolved ones are
//! reported back as predictions carrying the reason.
use crate::error::{Error, Result};
use crate::gcode::{synthesize, MachineState, ScanParams, Synthesis};
use crate::request::{AngleEntry, TargetAngles};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Source of process parameters for a target bend angle.
pub trait ScanParamLookup {
    fn lookup(&self, target_angle: f64) -> Option<ScanParams>;
}

impl<F> ScanParamLookup for F
where
    F: Fn(f64) -> Option<ScanParams>,
{
    fn lookup(&self, target_angle: f64) -> Option<ScanParams> {
        self(target_angle)
    }
}

/// Outcome of resolving one requested angle.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Prediction {
    Resolved { angle: f64, params: ScanParams },
    NoParameters { angle: f64 },
    InvalidAngle { raw: String },
}

impl Prediction {
    pub fn params(&self) -> Option<&ScanParams> {
        match self {
            Prediction::Resolved { params, .. } => Some(params),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&'static str> {
        match self {
            Prediction::Resolved { .. } => None,
            Prediction::NoParameters { .. } => Some("No parameters found for this angle"),
            Prediction::InvalidAngle { .. } => Some("Invalid angle value"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PlannedProgram {
    pub predictions: Vec<Prediction>,
    pub synthesis: Synthesis,
}

/// Circular arc of a drawn part; angles in degrees, counter-clockwise from +x.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArcProfile {
    pub center: [f64; 2],
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl ArcProfile {
    pub fn target_angles(&self, num_points: usize) -> Result<Vec<f64>> {
        arc_target_angles(
            self.center,
            self.radius,
            self.start_angle,
            self.end_angle,
            num_points,
        )
    }
}

/// Bend targets for an arc split into `num_points` evenly spaced points.
///
/// Points run from `start_deg` to `end_deg` inclusive; every chord between
/// consecutive points yields `180 − atan2(dy, dx)` in degrees, so the result
/// has `num_points − 1` entries in arc order.
pub fn arc_target_angles(
    center: [f64; 2],
    radius: f64,
    start_deg: f64,
    end_deg: f64,
    num_points: usize,
) -> Result<Vec<f64>> {
    if num_points < 2 {
        return Err(Error::InvalidInput(format!(
            "an arc needs at least 2 points, got {num_points}"
        )));
    }
    if [center[0], center[1], radius, start_deg, end_deg]
        .iter()
        .any(|v| !v.is_finite())
    {
        return Err(Error::InvalidInput(format!(
            "arc values must be finite: center {center:?}, radius {radius}, angles {start_deg}..{end_deg}"
        )));
    }
    if radius <= 0.0 {
        return Err(Error::InvalidInput(format!("arc radius must be positive, got {radius}")));
    }

    let step = (end_deg - start_deg) / (num_points - 1) as f64;
    let points: Vec<[f64; 2]> = (0..num_points)
        .map(|i| {
            let a = if i + 1 == num_points {
                end_deg
            } else {
                start_deg + step * i as f64
            }
            .to_radians();
            [center[0] + radius * a.cos(), center[1] + radius * a.sin()]
        })
        .collect();
    let angles: Vec<f64> = points
        .windows(2)
        .map(|w| 180.0 - (w[1][1] - w[0][1]).atan2(w[1][0] - w[0][0]).to_degrees())
        .collect();
    debug!(
        "planner: arc r={radius} {start_deg}°..{end_deg}° in {num_points} points -> {angles:?}"
    );
    Ok(angles)
}

/// Resolve every requested angle, in order.
pub fn predict(targets: &TargetAngles, lookup: &dyn ScanParamLookup) -> Vec<Prediction> {
    targets
        .entries
        .iter()
        .map(|entry| match entry {
            AngleEntry::Target(angle) => match lookup.lookup(*angle) {
                Some(params) => {
                    debug!("planner: {angle}° -> {params:?}");
                    Prediction::Resolved {
                        angle: *angle,
                        params,
                    }
                }
                None => {
                    warn!("planner: no parameters found for {angle}°");
                    Prediction::NoParameters { angle: *angle }
                }
            },
            AngleEntry::Invalid(raw) => {
                warn!("planner: invalid angle value {raw:?}");
                Prediction::InvalidAngle { raw: raw.clone() }
            }
        })
        .collect()
}

/// Resolve the targets and synthesise the program for those that resolved.
pub fn plan_program(
    targets: &TargetAngles,
    lookup: &dyn ScanParamLookup,
    origin: MachineState,
    rapid_feed: f64,
) -> Result<PlannedProgram> {
    let predictions = predict(targets, lookup);
    let scans: Vec<ScanParams> = predictions.iter().filter_map(|p| p.params().copied()).collect();
    if scans.is_empty() {
        return Err(Error::NoParameters);
    }
    let synthesis = synthesize(&scans, origin, rapid_feed)?;
    info!(
        "planner: {} of {} targets resolved, program has {} lines",
        scans.len(),
        predictions.len(),
        synthesis.program.len()
    );
    Ok(PlannedProgram {
        predictions,
        synthesis,
    })
}
