use serde::{Deserialize, Serialize};

/// Process parameters for one target bend: a sequence of back-and-forth laser
/// strokes along X at a fixed Z, followed by an optional Y shift.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanParams {
    /// Stroke length along X (mm, relative).
    pub x_offset: f64,
    /// Feed during strokes (mm/min).
    pub scan_speed: f64,
    /// Number of forward/backward stroke pairs.
    pub num_scans: u32,
    /// Relative Y move after the strokes (mm), 0 for none.
    pub y_shift: f64,
    /// Absolute Z (perpendicular distance, mm).
    pub z_absolute: f64,
    /// Laser power (W), informational.
    pub laser_power: f64,
}

impl ScanParams {
    /// Reason this entry cannot be executed, if any.
    pub(crate) fn defect(&self) -> Option<String> {
        let fields = [
            ("x_offset", self.x_offset),
            ("scan_speed", self.scan_speed),
            ("y_shift", self.y_shift),
            ("z_absolute", self.z_absolute),
            ("laser_power", self.laser_power),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Some(format!("{name} is not finite ({value})"));
        }
        if self.scan_speed <= 0.0 {
            return Some(format!("scan_speed must be positive, got {}", self.scan_speed));
        }
        None
    }
}
