//! End-to-end inspection of a single snapshot.
//!
//! Stages, each timed into the report:
//!
//! - `sheet`: locate the sheet; when none is found the whole frame is the
//!   region of interest,
//! - `seam`: dominant contour inside the region, rasterised as a filled mask,
//! - `bends`: bend points and turn-angles on that mask,
//! - `match`: bend nearest to the tool, validated against the expected angle.
//!
//! Bend points and the tool coordinate are expressed in region-of-interest
//! pixels. "Nothing found" outcomes end the run early with a report, not an
//! error.
use crate::bends::{self, BendOptions};
use crate::diagnostics::{InputDescriptor, TimingBreakdown};
use crate::edges::EdgeOptions;
use crate::segments::HoughOptions;
use crate::error::{Error, Result};
use crate::image::{crop_gray, ImageU8};
use crate::matcher::{match_and_validate, BendMatch, ToolCoordinate};
use crate::seam;
use crate::sheet::{self, SheetOptions};
use crate::types::{BendDetection, BoundingBox};
use image::GrayImage;
use log::{debug, info, warn};
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Instant;

/// Parameters for all inspection stages.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct InspectionParams {
    pub sheet: SheetOptions,
    /// Edge settings of the seam extraction.
    pub seam: EdgeOptions,
    /// Keys given here override [`BendOptions::snapshot`] one by one.
    #[serde(deserialize_with = "snapshot_bends")]
    pub bends: BendOptions,
}

impl Default for InspectionParams {
    fn default() -> Self {
        Self {
            sheet: SheetOptions::default(),
            seam: EdgeOptions::default(),
            bends: BendOptions::snapshot(),
        }
    }
}

#[derive(Deserialize)]
struct BendOverrides {
    horizontal_only: Option<bool>,
    right_roi_fraction: Option<f32>,
    min_segment_length: Option<f32>,
    min_bend_spacing: Option<f32>,
    min_turn_deg: Option<f32>,
    edges: Option<EdgeOptions>,
    hough: Option<HoughOptions>,
}

fn snapshot_bends<'de, D>(deserializer: D) -> std::result::Result<BendOptions, D::Error>
where
    D: Deserializer<'de>,
{
    let o = BendOverrides::deserialize(deserializer)?;
    let base = BendOptions::snapshot();
    Ok(BendOptions {
        horizontal_only: o.horizontal_only.unwrap_or(base.horizontal_only),
        right_roi_fraction: o.right_roi_fraction.unwrap_or(base.right_roi_fraction),
        min_segment_length: o.min_segment_length.unwrap_or(base.min_segment_length),
        min_bend_spacing: o.min_bend_spacing.unwrap_or(base.min_bend_spacing),
        min_turn_deg: o.min_turn_deg.unwrap_or(base.min_turn_deg),
        edges: o.edges.unwrap_or(base.edges),
        hough: o.hough.unwrap_or(base.hough),
    })
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InspectionOutcome {
    Matched(BendMatch),
    NoContour,
    NoBendPoints,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionReport {
    pub input: InputDescriptor,
    /// Detected sheet, `None` when the full frame was used.
    pub sheet: Option<BoundingBox>,
    /// Region the seam was searched in.
    pub roi: BoundingBox,
    pub bends: BendDetection,
    pub outcome: InspectionOutcome,
    pub timing: TimingBreakdown,
    /// Filled seam mask, kept for debugging output.
    #[serde(skip)]
    pub mask: Option<GrayImage>,
}

impl InspectionReport {
    pub fn matched(&self) -> Option<&BendMatch> {
        match &self.outcome {
            InspectionOutcome::Matched(m) => Some(m),
            _ => None,
        }
    }
}

/// Run the full pipeline on a grayscale frame.
pub fn inspect(
    gray: &GrayImage,
    tool: ToolCoordinate,
    expected_angle: Option<f64>,
    params: &InspectionParams,
) -> Result<InspectionReport> {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::InvalidImage(format!("empty frame {width}x{height}")));
    }
    let run = Instant::now();
    let mut timing = TimingBreakdown::default();

    let t = Instant::now();
    let sheet = sheet::locate(gray, &params.sheet);
    timing.record("sheet", t);
    let roi = match sheet {
        Some(bbox) => bbox,
        None => {
            warn!("inspect: no sheet found, using the full {width}x{height} frame");
            BoundingBox::full(width, height)
        }
    };
    let region = crop_gray(gray, roi)
        .ok_or_else(|| Error::InvalidImage(format!("sheet box {roi:?} outside frame")))?;

    let mut report = InspectionReport {
        input: InputDescriptor { width, height },
        sheet,
        roi,
        bends: BendDetection::default(),
        outcome: InspectionOutcome::NoContour,
        timing: TimingBreakdown::default(),
        mask: None,
    };

    let t = Instant::now();
    let contour = seam::extract_dominant(&region, &params.seam);
    let mask = contour.map(|c| seam::fill_mask(&c, region.width(), region.height()));
    timing.record("seam", t);
    let Some(mask) = mask else {
        warn!("inspect: no seam contour detected");
        timing.finish(run);
        report.timing = timing;
        return Ok(report);
    };

    let t = Instant::now();
    report.bends = bends::detect(&mask, region.width(), &params.bends);
    timing.record("bends", t);
    report.mask = Some(mask);

    let t = Instant::now();
    report.outcome = match match_and_validate(&report.bends, tool, expected_angle) {
        Ok(m) => InspectionOutcome::Matched(m),
        Err(Error::NoBendPoints) => {
            warn!("inspect: no bend points detected");
            InspectionOutcome::NoBendPoints
        }
        Err(e) => return Err(e),
    };
    timing.record("match", t);
    timing.finish(run);
    report.timing = timing;

    match &report.outcome {
        InspectionOutcome::Matched(m) => info!(
            "inspect: {} bends, nearest {} angle {:.2} in {:.1} ms",
            report.bends.len(),
            m.bend.label(),
            m.detected_angle,
            report.timing.total_ms
        ),
        other => debug!("inspect: finished with {other:?}"),
    }
    Ok(report)
}

/// Convenience wrapper for borrowed raw frames.
pub fn inspect_frame(
    frame: ImageU8<'_>,
    tool: ToolCoordinate,
    expected_angle: Option<f64>,
    params: &InspectionParams,
) -> Result<InspectionReport> {
    let gray = frame.to_gray()?;
    inspect(&gray, tool, expected_angle, params)
}
