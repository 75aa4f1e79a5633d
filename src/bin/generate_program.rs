use laserbend::config::program::{self, ParameterTable, ProgramToolConfig};
use laserbend::image::io::{write_json_file, write_text_file};
use laserbend::{plan_program, Error, Prediction, Result};
use serde::Serialize;
use std::env;
use std::path::Path;

#[derive(Serialize)]
struct ProgramReport<'a> {
    program_id: uuid::Uuid,
    predictions: &'a [Prediction],
    program_path: &'a Path,
    lines: usize,
    end_state: laserbend::gcode::MachineState,
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config: ProgramToolConfig = program::load_config(Path::new(&config_path))?;
    let table = ParameterTable::load(&config.parameter_table)?;
    let targets = config.targets()?;

    let plan = plan_program(&targets, &table, config.origin, config.rapid_feed)?;
    for p in &plan.predictions {
        if let Some(error) = p.error() {
            println!("skipped {p:?}: {error}");
        }
    }

    let program = &plan.synthesis.program;
    write_text_file(&config.output.program_path, &program.render())?;
    if let Some(path) = &config.output.report_json {
        let report = ProgramReport {
            program_id: program.id(),
            predictions: &plan.predictions,
            program_path: &config.output.program_path,
            lines: program.len(),
            end_state: plan.synthesis.end_state,
        };
        write_json_file(path, &report)?;
    }
    println!(
        "Program with {} lines written to {}",
        program.len(),
        config.output.program_path.display()
    );
    Ok(())
}

fn usage() -> Error {
    Error::InvalidInput("Usage: generate_program <config.json>".to_string())
}
