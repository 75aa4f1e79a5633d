use laserbend::config::inspect::{self, InspectToolConfig};
use laserbend::image::io::{load_grayscale_image, save_gray_png, write_json_file};
use laserbend::request::parse_expected_angle;
use laserbend::{Error, InspectionOutcome, Result, ToolCoordinate};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config: InspectToolConfig = inspect::load_config(Path::new(&config_path))?;

    let tool = ToolCoordinate::parse(&config.coordinates)?;
    let expected = parse_expected_angle(&config.expected_angle)?;
    let gray = load_grayscale_image(&config.input)?;

    let report = laserbend::inspect(&gray, tool, expected, &config.inspection)?;
    write_json_file(&config.output.report_json, &report)?;
    if let (Some(path), Some(mask)) = (&config.output.mask_image, &report.mask) {
        save_gray_png(mask, path)?;
    }

    match &report.outcome {
        InspectionOutcome::Matched(m) => {
            println!(
                "{} at ({:.0}, {:.0}) angle {:.2}",
                m.bend.label(),
                m.bend.x,
                m.bend.y,
                m.detected_angle
            );
            if let Some(warning) = m.warning_message() {
                println!("warning: {warning}");
            }
        }
        InspectionOutcome::NoContour => println!("No wire contour detected"),
        InspectionOutcome::NoBendPoints => println!("No bend points detected"),
    }
    println!(
        "Report written to {} ({:.1} ms)",
        config.output.report_json.display(),
        report.timing.total_ms
    );
    Ok(())
}

fn usage() -> Error {
    Error::InvalidInput("Usage: inspect_snapshot <config.json>".to_string())
}
