//! The `fwjs repl` command.

use fwjs_diagnostic::emit;
use fwjs_eval::{Interpreter, Value};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use super::{Settings, report_all};

pub fn run(settings: &Settings) -> Result<(), String> {
    println!("FWJS REPL v{}", env!("CARGO_PKG_VERSION"));
    println!("Type :help for help, :quit to exit");
    println!();

    let mut rl = DefaultEditor::new().map_err(|e| e.to_string())?;

    // One interpreter for the whole session so declarations persist.
    let mut interp = settings.interpreter();

    loop {
        let readline = rl.readline("fwjs> ");
        match readline {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                if line.starts_with(':') {
                    match line {
                        ":quit" | ":q" => break,
                        ":help" | ":h" => {
                            println!("Commands:");
                            println!("  :help, :h    Show this help");
                            println!("  :quit, :q    Exit the REPL");
                            println!("  :env         Show global bindings");
                        }
                        ":env" => print_env(&interp),
                        _ => println!("Unknown command: {}", line),
                    }
                    continue;
                }

                let source = complete_statement(line);

                let (program, diagnostics) = fwjs_parser::parse(&source);
                if !diagnostics.is_empty() {
                    report_all(&source, "<repl>", &diagnostics);
                    continue;
                }

                match interp.run(&program) {
                    Ok(Value::Null) => {}
                    Ok(value) => println!("{value}"),
                    Err(e) => emit(&source, "<repl>", &e.to_diagnostic()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Terminate the line so `1 + 2` works without a trailing `;`. A line
/// that already ends in `;` gains an empty statement, which parses to
/// nothing.
fn complete_statement(line: &str) -> String {
    format!("{line};")
}

fn print_env(interp: &Interpreter) {
    let global = interp.global();
    let names = global.local_names();
    if names.is_empty() {
        println!("(no bindings)");
        return;
    }
    for name in names {
        println!("  {name} = {}", global.resolve_var(&name));
    }
}
