use crate::drawing::load_dxf_arc;
use crate::error::{Error, Result};
use crate::gcode::{MachineState, ScanParams, DEFAULT_RAPID_FEED};
use crate::planner::{ArcProfile, ScanParamLookup};
use crate::request::TargetAngles;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct ProgramToolConfig {
    /// Target angles in request form: numbers or numeric strings.
    #[serde(default)]
    pub angles: Vec<serde_json::Value>,
    /// Drawn arc to derive the target angles from, instead of `angles`.
    #[serde(default)]
    pub arc: Option<ArcConfig>,
    /// JSON file holding a [`ParameterTable`].
    pub parameter_table: PathBuf,
    #[serde(default)]
    pub origin: MachineState,
    #[serde(default = "default_rapid_feed")]
    pub rapid_feed: f64,
    pub output: ProgramOutputConfig,
}

fn default_rapid_feed() -> f64 {
    DEFAULT_RAPID_FEED
}

/// Arc source: a DXF drawing or the arc values themselves (exactly one).
#[derive(Debug, Deserialize)]
pub struct ArcConfig {
    #[serde(default)]
    pub dxf: Option<PathBuf>,
    #[serde(default)]
    pub profile: Option<ArcProfile>,
    pub num_points: usize,
}

impl ArcConfig {
    pub fn resolve(&self) -> Result<ArcProfile> {
        match (&self.dxf, &self.profile) {
            (Some(path), None) => load_dxf_arc(path),
            (None, Some(profile)) => Ok(*profile),
            _ => Err(Error::InvalidInput(
                "arc needs exactly one of `dxf` or `profile`".to_string(),
            )),
        }
    }
}

impl ProgramToolConfig {
    /// Target angles of the run, from `arc` when given, else from `angles`.
    pub fn targets(&self) -> Result<TargetAngles> {
        match &self.arc {
            Some(_) if !self.angles.is_empty() => Err(Error::InvalidInput(
                "give either `angles` or `arc`, not both".to_string(),
            )),
            Some(arc) => {
                let angles = arc.resolve()?.target_angles(arc.num_points)?;
                Ok(TargetAngles::from_angles(&angles))
            }
            None => Ok(TargetAngles::from_list(&self.angles)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProgramOutputConfig {
    pub program_path: PathBuf,
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<ProgramToolConfig> {
    super::read_json(path)
}

/// One row of a process-model table: parameters and the bend they produce.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterRow {
    pub laser_power_w: f64,
    pub scan_speed: f64,
    pub perp_dist_mm: f64,
    pub ref_dist_mm: f64,
    /// Stroke pairs; rounded to the nearest integer when used.
    pub iterations: f64,
    pub predicted_bend: f64,
    pub confidence: f64,
}

impl ParameterRow {
    pub fn to_scan(&self) -> ScanParams {
        ScanParams {
            x_offset: self.ref_dist_mm,
            scan_speed: self.scan_speed,
            num_scans: self.iterations.round().max(0.0) as u32,
            y_shift: 0.0,
            z_absolute: self.perp_dist_mm,
            laser_power: self.laser_power_w,
        }
    }
}

/// Nearest-neighbour lookup over predicted bends: smallest
/// `|predicted − target|`, then highest confidence, then table order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterTable {
    pub rows: Vec<ParameterRow>,
}

impl ParameterTable {
    pub fn load(path: &Path) -> Result<Self> {
        let table: ParameterTable = super::read_json(path)?;
        if let Some(i) = table
            .rows
            .iter()
            .position(|r| !r.predicted_bend.is_finite() || !r.confidence.is_finite())
        {
            return Err(Error::InvalidInput(format!(
                "parameter table {}: row {i} has a non-finite bend or confidence",
                path.display()
            )));
        }
        Ok(table)
    }

    pub fn nearest(&self, target_angle: f64) -> Option<&ParameterRow> {
        let mut best: Option<&ParameterRow> = None;
        for row in &self.rows {
            let better = match best {
                None => true,
                Some(b) => {
                    let (d, db) = (
                        (row.predicted_bend - target_angle).abs(),
                        (b.predicted_bend - target_angle).abs(),
                    );
                    d < db || (d == db && row.confidence > b.confidence)
                }
            };
            if better {
                best = Some(row);
            }
        }
        best
    }
}

impl ScanParamLookup for ParameterTable {
    fn lookup(&self, target_angle: f64) -> Option<ScanParams> {
        self.nearest(target_angle).map(ParameterRow::to_scan)
    }
}
