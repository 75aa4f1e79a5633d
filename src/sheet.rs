//! Sheet localisation: find the rectangular metal sheet in a snapshot.
//!
//! Pipeline: smoothing + Canny (`edges`), external contours (`contours`),
//! then per-contour gates in this order:
//!
//! 1. enclosed area at least `min_area`,
//! 2. bounding-box aspect ratio `width / height` within
//!    `[min_aspect_ratio, max_aspect_ratio]`,
//! 3. closed polygon approximation with tolerance 2% of the perimeter has
//!    exactly four vertices.
//!
//! The surviving contour with the largest area wins; ties keep the one traced
//! first. Not finding a sheet is a normal outcome, callers then use the whole
//! frame as the region of interest.
use crate::contours::{external_contours, Contour};
use crate::edges::{edge_map, EdgeOptions};
use crate::types::BoundingBox;
use image::GrayImage;
use log::debug;
use rayon::prelude::*;
use serde::Deserialize;

/// Polygon tolerance as a fraction of the contour perimeter.
const APPROX_EPSILON_FRACTION: f64 = 0.02;

/// Gates applied to candidate sheet contours.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct SheetOptions {
    /// Minimum enclosed area in square pixels.
    pub min_area: f64,
    /// Lowest accepted `width / height` of the bounding box.
    pub min_aspect_ratio: f64,
    /// Highest accepted `width / height` of the bounding box.
    pub max_aspect_ratio: f64,
    pub edges: EdgeOptions,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            min_area: 5000.0,
            min_aspect_ratio: 0.5,
            max_aspect_ratio: 3.0,
            edges: EdgeOptions::default(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    area: f64,
    bbox: BoundingBox,
}

fn evaluate(contour: &Contour, options: &SheetOptions) -> Option<Candidate> {
    let area = contour.area();
    if area < options.min_area {
        return None;
    }
    let bbox = contour.bounding_box()?;
    let aspect = bbox.aspect_ratio();
    if aspect < options.min_aspect_ratio || aspect > options.max_aspect_ratio {
        debug!(
            "sheet: reject contour area={area:.0} bbox={bbox:?} aspect={aspect:.2} outside [{:.2}, {:.2}]",
            options.min_aspect_ratio, options.max_aspect_ratio
        );
        return None;
    }
    let eps = APPROX_EPSILON_FRACTION * contour.arc_length();
    let vertices = contour.approx_polygon(eps).len();
    if vertices != 4 {
        debug!("sheet: reject contour area={area:.0} with {vertices} polygon vertices");
        return None;
    }
    Some(Candidate { area, bbox })
}

/// Locate the sheet in a grayscale frame.
pub fn locate(gray: &GrayImage, options: &SheetOptions) -> Option<BoundingBox> {
    let edges = edge_map(gray, &options.edges);
    let contours = external_contours(&edges);
    let candidates: Vec<Candidate> = contours
        .par_iter()
        .filter_map(|c| evaluate(c, options))
        .collect();
    debug!(
        "sheet: {} contours, {} quadrilateral candidates",
        contours.len(),
        candidates.len()
    );

    let mut best: Option<Candidate> = None;
    for cand in candidates {
        // strict comparison keeps the earliest contour on equal areas
        if best.map_or(true, |b| cand.area > b.area) {
            best = Some(cand);
        }
    }
    best.map(|b| b.bbox)
}
