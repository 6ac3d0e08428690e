//! The `fwjs run` command.

use std::fs;

use super::{Settings, parse_or_report, run_program};

pub fn run(file: &str, show_result: bool, settings: &Settings) -> Result<(), String> {
    let source =
        fs::read_to_string(file).map_err(|e| format!("cannot read file '{}': {}", file, e))?;

    let program = parse_or_report(&source, file).map_err(|_| "parse error".to_string())?;

    let mut interp = settings.interpreter();
    let value = run_program(&mut interp, &program, &source, file)?;

    if show_result {
        println!("{value}");
    }

    Ok(())
}
