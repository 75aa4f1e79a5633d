#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod drawing;
pub mod error;
pub mod gcode;
pub mod image;
pub mod inspect;
pub mod matcher;
pub mod planner;
pub mod request;
pub mod staging;
pub mod types;

// Stage-level modules, usable on their own.
pub mod angle;
pub mod bends;
pub mod contours;
pub mod edges;
pub mod seam;
pub mod segments;
pub mod sheet;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{Error, Result};
pub use crate::inspect::{inspect, InspectionOutcome, InspectionParams, InspectionReport};
pub use crate::matcher::{match_and_validate, AngleWarning, BendMatch, ToolCoordinate};
pub use crate::planner::{
    arc_target_angles, plan_program, ArcProfile, PlannedProgram, Prediction, ScanParamLookup,
};
pub use crate::staging::{ProgramStore, StagingEntry, StagingId};
pub use crate::types::{BendAngle, BendDetection, BendPoint, BoundingBox};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use laserbend::prelude::*;
///
/// # fn main() -> laserbend::Result<()> {
/// let (w, h) = (640usize, 480usize);
/// let pixels = vec![0u8; w * h];
/// let frame = ImageU8::gray(w, h, &pixels);
///
/// let report = inspect_frame(
///     frame,
///     ToolCoordinate::new(320.0, 240.0),
///     Some(45.0),
///     &InspectionParams::default(),
/// )?;
/// println!("bends={} total_ms={:.3}", report.bends.len(), report.timing.total_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::gcode::{synthesize, MachineState, ScanParams};
    pub use crate::image::ImageU8;
    pub use crate::inspect::{inspect, inspect_frame, InspectionParams};
    pub use crate::{ProgramStore, ToolCoordinate};
}
