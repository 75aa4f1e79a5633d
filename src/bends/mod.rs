//! Bend detection on a rasterised seam mask.
//!
//! The mask boundary is converted into straight segments (Canny followed by
//! the probabilistic Hough transform in [`crate::segments`]). Segments are
//! ordered left-to-right and every adjacent pair is a bend candidate:
//!
//! 1. segments not longer than `min_segment_length` are dropped,
//! 2. pairs are skipped when `horizontal_only` is set and the first segment
//!    starts left of `right_roi_fraction × image_width`,
//! 3. pairs turning by less than `min_turn_deg` are collinear fragments,
//! 4. the bend sits at the joint of the pair (see [`joint_point`]),
//! 5. a bend closer than `min_bend_spacing` to the previously accepted one is
//!    a duplicate.
//!
//! The seam is assumed to run left-to-right across the frame; vertical or
//! reversed seams mis-order the pairs.
use crate::angle::{round2, turn_angle_deg};
use crate::edges::{edge_map, edge_pixel_count, EdgeOptions};
use crate::segments::{hough_segments, HoughOptions, LineSegment};
use crate::types::{BendAngle, BendDetection, BendPoint};
use image::GrayImage;
use log::debug;
use serde::Deserialize;

/// Extra reach (pixels) around the gap between two segments within which
/// their line intersection is trusted as the joint.
pub const JOINT_RADIUS_PX: f32 = 15.0;

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct BendOptions {
    /// Only consider pairs starting right of `right_roi_fraction × width`.
    pub horizontal_only: bool,
    pub right_roi_fraction: f32,
    /// Segments must be strictly longer than this (pixels).
    pub min_segment_length: f32,
    /// Minimum distance between consecutive accepted bends (pixels).
    pub min_bend_spacing: f32,
    /// Smallest turn (degrees) that counts as a bend.
    pub min_turn_deg: f32,
    pub edges: EdgeOptions,
    pub hough: HoughOptions,
}

impl Default for BendOptions {
    fn default() -> Self {
        Self {
            horizontal_only: false,
            right_roi_fraction: 0.0,
            min_segment_length: 30.0,
            min_bend_spacing: 20.0,
            min_turn_deg: 3.0,
            edges: EdgeOptions::unsmoothed(),
            hough: HoughOptions::default(),
        }
    }
}

impl BendOptions {
    /// Profile for full snapshots: pairs filtered by region, longer segments
    /// and wider spacing than the generic defaults.
    pub fn snapshot() -> Self {
        Self {
            horizontal_only: true,
            right_roi_fraction: 0.0,
            min_segment_length: 40.0,
            min_bend_spacing: 50.0,
            ..Self::default()
        }
    }
}

/// Detect bends on a binary seam mask. `image_width` is the width the
/// region filter is relative to (normally the mask width).
///
/// Setting `min_turn_deg = 0` disables the collinear filter and reproduces
/// the plain pair-walk, where every adjacent pair of kept segments is a
/// candidate. Thick masks then report near-zero bends between the parallel
/// fragments of one edge.
pub fn detect(mask: &GrayImage, image_width: u32, options: &BendOptions) -> BendDetection {
    let edges = edge_map(mask, &options.edges);
    let segments = hough_segments(&edges, &options.hough);
    debug!(
        "bends: {} edge pixels, {} hough segments",
        edge_pixel_count(&edges),
        segments.len()
    );
    bends_from_segments(&segments, image_width, options)
}

/// Joint of two consecutive segments.
///
/// The intersection of their supporting lines is used when it lies in the
/// disk spanning the gap from `first.p1` to `second.p0`, widened by
/// [`JOINT_RADIUS_PX`]. Otherwise (parallel lines, or an intersection far
/// away) the midpoint of the gap is used.
pub fn joint_point(first: &LineSegment, second: &LineSegment) -> [f32; 2] {
    let gap = LineSegment::new(first.p1, second.p0);
    let mid = gap.midpoint();
    let half_gap = 0.5 * gap.length();
    match first.line_intersection(second) {
        Some(p) if (p[0] - mid[0]).hypot(p[1] - mid[1]) <= half_gap + JOINT_RADIUS_PX => p,
        _ => mid,
    }
}

/// Pair-walk over already detected segments.
pub fn bends_from_segments(
    segments: &[LineSegment],
    image_width: u32,
    options: &BendOptions,
) -> BendDetection {
    let mut segs: Vec<LineSegment> = segments
        .iter()
        .filter(|s| s.length() > options.min_segment_length)
        .map(|s| s.canonical())
        .collect();
    // stable: equal x keeps detection order
    segs.sort_by(|a, b| a.p0[0].total_cmp(&b.p0[0]));

    let roi_x = options.right_roi_fraction * image_width as f32;
    let mut out = BendDetection::default();
    let mut last: Option<[f32; 2]> = None;

    for pair in segs.windows(2) {
        let (first, second) = (&pair[0], &pair[1]);
        if options.horizontal_only && first.p0[0] < roi_x {
            continue;
        }
        let turn = turn_angle_deg(first.direction_deg(), second.direction_deg());
        if turn < options.min_turn_deg {
            continue;
        }
        let joint = joint_point(first, second);
        if let Some(prev) = last {
            let d = (joint[0] - prev[0]).hypot(joint[1] - prev[1]);
            if d < options.min_bend_spacing {
                debug!("bends: drop candidate at {joint:?}, {d:.1} px from previous bend");
                continue;
            }
        }
        let id = out.points.len() as u32 + 1;
        out.points.push(BendPoint {
            id,
            x: joint[0],
            y: joint[1],
        });
        out.angles.push(BendAngle {
            bend_id: id,
            angle_deg: round2(turn as f64),
        });
        last = Some(joint);
    }

    debug!(
        "bends: {} segments kept, {} bends accepted",
        segs.len(),
        out.len()
    );
    out
}
