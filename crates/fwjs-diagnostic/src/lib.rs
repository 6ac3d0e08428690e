//! Diagnostic and error reporting for FWJS.
//! FWJS 的诊断和错误报告。
//!
//! Lexer, parser and evaluator errors are all lowered to [`Diagnostic`]
//! and rendered with ariadne.
//! 词法、语法和求值错误都会转换为 [`Diagnostic`]，并通过 ariadne 渲染。

mod codes;
mod diagnostic;

pub use codes::ErrorCode;
pub use diagnostic::{Diagnostic, DiagnosticKind, Label};

use std::io;

use ariadne::{Color, ColorGenerator, Config, Label as AriadneLabel, Report, ReportKind, Source};

/// Render a diagnostic to stderr.
/// 将诊断信息渲染到标准错误输出。
pub fn emit(source: &str, filename: &str, diagnostic: &Diagnostic) {
    let report = build_report(filename, diagnostic, true);
    if let Err(e) = report.eprint((filename, Source::from(source))) {
        eprintln!("{filename}: {diagnostic} (failed to render report: {e})");
    }
}

/// Render a diagnostic without colors into a string.
/// 将诊断信息渲染为不带颜色的字符串。
pub fn render(source: &str, filename: &str, diagnostic: &Diagnostic) -> io::Result<String> {
    let report = build_report(filename, diagnostic, false);
    let mut out = Vec::new();
    report.write((filename, Source::from(source)), &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn build_report<'a>(
    filename: &'a str,
    diagnostic: &Diagnostic,
    color: bool,
) -> Report<'a, (&'a str, std::ops::Range<usize>)> {
    let kind = ReportKind::Custom(diagnostic.kind.heading(), Color::Red);

    let mut colors = ColorGenerator::new();
    let mut report = Report::build(kind, filename, diagnostic.span.start.0 as usize)
        .with_config(Config::default().with_color(color))
        .with_message(&diagnostic.message)
        .with_code(diagnostic.code.as_str());

    for label in &diagnostic.labels {
        let mut ariadne_label =
            AriadneLabel::new((filename, label.span.range())).with_message(&label.message);
        if color {
            ariadne_label = ariadne_label.with_color(colors.next());
        }
        report = report.with_label(ariadne_label);
    }

    for note in &diagnostic.notes {
        report = report.with_note(note);
    }

    if let Some(help) = diagnostic.help() {
        report = report.with_help(help);
    }

    report.finish()
}
