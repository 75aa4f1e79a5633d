//! Fixed instruction lines and formatters of the controller dialect.
//!
//! Positions and Z are written with 3 decimals, feeds, speeds and laser power
//! with 1 decimal. Controllers parse these as fixed-width fields.

pub const PREAMBLE: [&str; 7] = [
    "NC/MPF/WELD_1",
    "N10 R10-011",
    "N11 M50 ; AIR VALVE ON",
    "N12 M54 ; ARGON SHIELDING GAS ON",
    "N13 STOPRET",
    "N14 $A_DBB[2]=1 ; PROGRAM START",
    "N15 STOPRET",
];

pub const LASER_ON: [&str; 2] = ["N20 $A_DBB[19]=1 ; LASER ON", "N21 STOPRET"];

pub const LASER_OFF: [&str; 2] = ["N40 $A_DBB[19]=0 ; LASER OFF", "N41 STOPRET"];

pub const POSTAMBLE: [&str; 5] = [
    "N60 $A_DBB[2]=0 ; PROGRAM OFF",
    "N61 STOPRET",
    "N62 M51 ; AIR VALVE OFF",
    "N63 M55 ; ARGON SHIELDING GAS OFF",
    "N64 M30",
];

/// Fixed dwells after each stroke.
pub const DWELL_FORWARD: &str = "N31 G04 X10 ; WAIT FOR 5 SEC";
pub const DWELL_BACKWARD: &str = "N33 G04 X10 ; WAIT FOR 5 SEC";

pub fn scan_comment(index: usize, laser_power: f64, z: f64) -> String {
    format!("; Scan {index} for Laser Power: {laser_power:.1} W, Z (Perp Dist): {z:.3} mm")
}

pub fn set_z(z: f64, rapid_feed: f64) -> String {
    format!("N16 G01 G90 G54 Z{z:.3} F{rapid_feed:.1} ; Set Z (Perpendicular Distance)")
}

pub fn scan_forward(x: f64, speed: f64) -> String {
    format!("N30 G01 G91 G54 X{x:.3} F{speed:.1} ; Scan forward")
}

pub fn scan_backward(x: f64, speed: f64) -> String {
    format!("N32 G01 G91 G54 X{:.3} F{speed:.1} ; Scan backward", -x)
}

pub fn move_y(dy: f64, rapid_feed: f64) -> String {
    format!("N50 G01 G91 G54 Y{dy:.3} F{rapid_feed:.1} ; Move Y")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_precision_fields() {
        assert_eq!(
            set_z(12.5, 5000.0),
            "N16 G01 G90 G54 Z12.500 F5000.0 ; Set Z (Perpendicular Distance)"
        );
        assert_eq!(scan_forward(40.0, 300.0), "N30 G01 G91 G54 X40.000 F300.0 ; Scan forward");
        assert_eq!(
            scan_backward(40.0, 300.0),
            "N32 G01 G91 G54 X-40.000 F300.0 ; Scan backward"
        );
        assert_eq!(move_y(-2.25, 5000.0), "N50 G01 G91 G54 Y-2.250 F5000.0 ; Move Y");
    }

    #[test]
    fn comment_carries_index_power_and_z() {
        assert_eq!(
            scan_comment(2, 850.0, 3.0),
            "; Scan 2 for Laser Power: 850.0 W, Z (Perp Dist): 3.000 mm"
        );
    }
}
