//! The `fwjs check` command.
//! `fwjs check` 命令。

use std::fs;

use crate::output;

use super::{Settings, parse_or_report};

/// Parse a file and report syntax errors without running it.
/// 解析文件并报告语法错误，不执行。
pub fn run(file: &str, dump_ast: bool, settings: &Settings) -> Result<(), String> {
    let source =
        fs::read_to_string(file).map_err(|e| format!("cannot read file '{}': {}", file, e))?;

    // Parse
    // 解析
    let program = match parse_or_report(&source, file) {
        Ok(program) => program,
        Err(count) => {
            output::syntax_errors(file, count);
            return Err("parse error".to_string());
        }
    };

    if settings.verbose {
        output::note(&format!("parsed {} bytes", source.len()));
    }

    if dump_ast {
        println!("{program:#?}");
    }

    output::clean(file);
    Ok(())
}
