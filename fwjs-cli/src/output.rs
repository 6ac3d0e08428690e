//! Terminal output for command results.
//! 命令结果的终端输出。
//!
//! Colors are only used when the stream is a terminal, so piped output
//! from `fwjs eval` is just the value.

use std::io::{IsTerminal, stderr, stdout};

use fwjs_eval::Value;

#[derive(Clone, Copy)]
enum Tone {
    Green,
    Red,
    Blue,
}

fn paint(text: &str, tone: Tone, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }
    let code = match tone {
        Tone::Green => "32",
        Tone::Red => "31",
        Tone::Blue => "34",
    };
    format!("\x1b[{code}m{text}\x1b[0m")
}

/// The value a program evaluated to.
/// 程序的求值结果。
pub fn value(value: &Value) {
    println!("{}", paint(&value.to_string(), Tone::Green, stdout().is_terminal()));
}

/// `check` found nothing to report.
pub fn clean(file: &str) {
    println!("{file}: {}", paint("no syntax errors", Tone::Green, stdout().is_terminal()));
}

/// Summary after the individual syntax errors were rendered.
pub fn syntax_errors(file: &str, count: usize) {
    let noun = if count == 1 { "error" } else { "errors" };
    eprintln!(
        "{} {file}: {count} syntax {noun}",
        paint("error:", Tone::Red, stderr().is_terminal())
    );
}

/// Detail shown with `--verbose`.
pub fn note(msg: &str) {
    eprintln!("{} {msg}", paint("note:", Tone::Blue, stderr().is_terminal()));
}
