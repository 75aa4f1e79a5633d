use laserbend::prelude::*;

fn main() {
    env_logger::init();

    // Demo stub: inspects a blank frame, then stages a two-block program
    let w = 640usize;
    let h = 480usize;
    let gray = vec![0u8; w * h];
    let frame = ImageU8::gray(w, h, &gray);
    match inspect_frame(
        frame,
        ToolCoordinate::new(320.0, 240.0),
        None,
        &InspectionParams::default(),
    ) {
        Ok(report) => println!(
            "bends={} total_ms={:.3}",
            report.bends.len(),
            report.timing.total_ms
        ),
        Err(err) => eprintln!("inspection failed: {err}"),
    }

    let scans = [
        ScanParams {
            x_offset: 40.0,
            scan_speed: 300.0,
            num_scans: 2,
            y_shift: 5.0,
            z_absolute: 10.0,
            laser_power: 850.0,
        },
        ScanParams {
            x_offset: 40.0,
            scan_speed: 280.0,
            num_scans: 3,
            y_shift: 0.0,
            z_absolute: 10.0,
            laser_power: 900.0,
        },
    ];
    let store = ProgramStore::new();
    match synthesize(&scans, MachineState::default(), 5000.0) {
        Ok(out) => {
            let lines = out.program.len();
            let id = store.stage(out.program, Vec::new());
            println!("staged={id} lines={lines} end_y={:.3}", out.end_state.y);
        }
        Err(err) => eprintln!("synthesis failed: {err}"),
    }
}
