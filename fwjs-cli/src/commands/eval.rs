//! The `fwjs eval` command.

use crate::output;

use super::{Settings, parse_or_report, run_program};

pub fn run(source: &str, settings: &Settings) -> Result<(), String> {
    let program = parse_or_report(source, "<eval>").map_err(|_| "parse error".to_string())?;

    if settings.verbose {
        output::note(&format!("parsed {} bytes", source.len()));
    }

    let mut interp = settings.interpreter();
    let value = run_program(&mut interp, &program, source, "<eval>")?;
    output::value(&value);
    Ok(())
}
