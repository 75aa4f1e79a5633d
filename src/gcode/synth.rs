use super::dialect;
use super::scan::ScanParams;
use crate::error::{Error, Result};
use chrono::{DateTime, Local};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Feed used for non-cutting moves when the caller has no preference.
pub const DEFAULT_RAPID_FEED: f64 = 5000.0;

/// Running machine position while a program is synthesised.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl MachineState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Generated instruction lines. Immutable once built; every synthesis gets
/// its own id and generation time, even for identical lines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionProgram {
    id: Uuid,
    generated_at: DateTime<Local>,
    lines: Vec<String>,
}

impl MotionProgram {
    fn new(lines: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            generated_at: Local::now(),
            lines,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn generated_at(&self) -> DateTime<Local> {
        self.generated_at
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Program text, lines joined by `\n` without a trailing newline.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for MotionProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Synthesis {
    pub program: MotionProgram,
    /// Machine position after the last block.
    pub end_state: MachineState,
}

/// Build the motion program for `scans`, in order, starting from `start`.
///
/// The whole list is validated before any line is produced, so a malformed
/// entry never yields a partial program.
pub fn synthesize(scans: &[ScanParams], start: MachineState, rapid_feed: f64) -> Result<Synthesis> {
    if scans.is_empty() {
        return Err(Error::EmptyScanList);
    }
    if !rapid_feed.is_finite() || rapid_feed <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "rapid feed must be positive, got {rapid_feed}"
        )));
    }
    for (index, scan) in scans.iter().enumerate() {
        if let Some(reason) = scan.defect() {
            return Err(Error::MalformedScan { index, reason });
        }
    }
    if ![start.x, start.y, start.z].iter().all(|v| v.is_finite()) {
        return Err(Error::InvalidInput(format!("start position is not finite: {start:?}")));
    }

    let strokes: usize = scans.iter().map(|s| s.num_scans as usize).sum();
    let mut lines = Vec::with_capacity(
        dialect::PREAMBLE.len() + dialect::POSTAMBLE.len() + scans.len() * 8 + strokes * 4,
    );
    lines.extend(dialect::PREAMBLE.iter().map(|s| s.to_string()));

    let mut state = start;
    for (i, scan) in scans.iter().enumerate() {
        lines.push(dialect::scan_comment(i + 1, scan.laser_power, scan.z_absolute));
        if scan.z_absolute != state.z {
            lines.push(dialect::set_z(scan.z_absolute, rapid_feed));
            state.z = scan.z_absolute;
        }
        lines.extend(dialect::LASER_ON.iter().map(|s| s.to_string()));
        for _ in 0..scan.num_scans {
            lines.push(dialect::scan_forward(scan.x_offset, scan.scan_speed));
            lines.push(dialect::DWELL_FORWARD.to_string());
            lines.push(dialect::scan_backward(scan.x_offset, scan.scan_speed));
            lines.push(dialect::DWELL_BACKWARD.to_string());
        }
        lines.extend(dialect::LASER_OFF.iter().map(|s| s.to_string()));
        if scan.y_shift != 0.0 {
            lines.push(dialect::move_y(scan.y_shift, rapid_feed));
            state.y += scan.y_shift;
        }
    }

    lines.extend(dialect::POSTAMBLE.iter().map(|s| s.to_string()));
    let program = MotionProgram::new(lines);
    debug!(
        "gcode: program {} with {} scan blocks, {strokes} stroke pairs, {} lines",
        program.id,
        scans.len(),
        program.len()
    );
    Ok(Synthesis {
        program,
        end_state: state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(num_scans: u32, y_shift: f64, z: f64) -> ScanParams {
        ScanParams {
            x_offset: 40.0,
            scan_speed: 300.0,
            num_scans,
            y_shift,
            z_absolute: z,
            laser_power: 850.0,
        }
    }

    fn count(program: &MotionProgram, prefix: &str) -> usize {
        program.lines().iter().filter(|l| l.starts_with(prefix)).count()
    }

    #[test]
    fn empty_scan_list_is_rejected() {
        let err = synthesize(&[], MachineState::default(), DEFAULT_RAPID_FEED).unwrap_err();
        assert!(matches!(err, Error::EmptyScanList));
    }

    #[test]
    fn block_structure_matches_scan_list() {
        let scans = [scan(2, 5.0, 10.0), scan(3, 0.0, 12.0)];
        let out = synthesize(&scans, MachineState::default(), DEFAULT_RAPID_FEED).unwrap();
        let p = &out.program;
        assert_eq!(p.lines()[0], "NC/MPF/WELD_1");
        assert_eq!(count(p, "N10 "), 1);
        assert_eq!(count(p, "N64 M30"), 1);
        assert_eq!(p.lines().last().map(String::as_str), Some("N64 M30"));
        assert_eq!(count(p, "N20 "), 2);
        assert_eq!(count(p, "N40 "), 2);
        // 2 + 3 forward strokes
        assert_eq!(count(p, "N30 "), 5);
        assert_eq!(count(p, "N32 "), 5);
        assert_eq!(count(p, "N50 "), 1);
        assert_eq!(count(p, "; Scan "), 2);
        assert_eq!(
            p.len(),
            dialect::PREAMBLE.len() + dialect::POSTAMBLE.len() + 2 + 2 + 2 * 4 + 5 * 4 + 1
        );
        assert_eq!(out.end_state, MachineState::new(0.0, 5.0, 12.0));
    }

    #[test]
    fn repeated_z_is_emitted_once() {
        let scans = [scan(1, 0.0, 7.5), scan(1, 0.0, 7.5), scan(1, 0.0, 7.5)];
        let out = synthesize(&scans, MachineState::default(), DEFAULT_RAPID_FEED).unwrap();
        assert_eq!(count(&out.program, "N16 "), 1);
        assert!(out
            .program
            .lines()
            .contains(&"N16 G01 G90 G54 Z7.500 F5000.0 ; Set Z (Perpendicular Distance)".to_string()));
    }

    #[test]
    fn z_equal_to_start_needs_no_move() {
        let scans = [scan(1, 0.0, 3.0)];
        let out = synthesize(&scans, MachineState::new(0.0, 0.0, 3.0), DEFAULT_RAPID_FEED).unwrap();
        assert_eq!(count(&out.program, "N16 "), 0);
    }

    #[test]
    fn y_state_accumulates_across_blocks() {
        let scans = [scan(1, 2.5, 1.0), scan(1, -1.0, 1.0), scan(1, 0.0, 1.0)];
        let out = synthesize(&scans, MachineState::new(1.0, 10.0, 0.0), DEFAULT_RAPID_FEED).unwrap();
        assert_eq!(out.end_state, MachineState::new(1.0, 11.5, 1.0));
        assert_eq!(count(&out.program, "N50 "), 2);
    }

    #[test]
    fn zero_stroke_block_still_toggles_laser() {
        let out = synthesize(&[scan(0, 0.0, 1.0)], MachineState::default(), DEFAULT_RAPID_FEED).unwrap();
        assert_eq!(count(&out.program, "N30 "), 0);
        assert_eq!(count(&out.program, "N20 "), 1);
        assert_eq!(count(&out.program, "N40 "), 1);
    }

    #[test]
    fn malformed_entry_reports_its_index() {
        let mut bad = scan(1, 0.0, 1.0);
        bad.scan_speed = 0.0;
        let err = synthesize(&[scan(1, 0.0, 1.0), bad], MachineState::default(), DEFAULT_RAPID_FEED)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedScan { index: 1, .. }), "{err}");

        let mut nan = scan(1, 0.0, 1.0);
        nan.z_absolute = f64::NAN;
        let err = synthesize(&[nan], MachineState::default(), DEFAULT_RAPID_FEED).unwrap_err();
        assert!(matches!(err, Error::MalformedScan { index: 0, .. }), "{err}");
    }

    #[test]
    fn non_positive_rapid_feed_is_rejected() {
        let err = synthesize(&[scan(1, 0.0, 1.0)], MachineState::default(), 0.0).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn each_synthesis_is_a_distinct_program() {
        let before = Local::now();
        let scans = [scan(1, 0.0, 1.0)];
        let a = synthesize(&scans, MachineState::default(), DEFAULT_RAPID_FEED).unwrap();
        let b = synthesize(&scans, MachineState::default(), DEFAULT_RAPID_FEED).unwrap();
        assert_eq!(a.program.lines(), b.program.lines());
        assert_ne!(a.program.id(), b.program.id());
        assert_ne!(a.program, b.program);
        assert!(a.program.generated_at() >= before);
    }

    #[test]
    fn render_joins_without_trailing_newline() {
        let out = synthesize(&[scan(1, 0.0, 1.0)], MachineState::default(), DEFAULT_RAPID_FEED).unwrap();
        let text = out.program.render();
        assert!(text.starts_with("NC/MPF/WELD_1\nN10 R10-011\n"));
        assert!(text.ends_with("N63 M55 ; ARGON SHIELDING GAS OFF\nN64 M30"));
        assert_eq!(text, out.program.to_string());
        assert_eq!(text.lines().count(), out.program.len());
    }
}
