//! FWJS CLI - The FWJS language command line interface.
//! FWJS CLI - FWJS 语言的命令行界面。

mod commands;
mod output;

use clap::{Parser, Subcommand};
use fwjs_eval::DEFAULT_MAX_CALL_DEPTH;

/// Main CLI structure.
/// 主 CLI 结构体。
#[derive(Parser)]
#[command(name = "fwjs")]
#[command(author, version, about = "FWJS - A tiny expression language with closures", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output. / 启用详细输出。
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress output. / 抑制输出。
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Maximum nesting of function calls. / 函数调用的最大嵌套深度。
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,
}

/// Available CLI commands.
/// 可用的 CLI 命令。
#[derive(Subcommand)]
enum Commands {
    /// Run an FWJS file. / 运行 FWJS 文件。
    Run {
        /// The file to run. / 要运行的文件。
        file: String,

        /// Print the program's final value. / 打印程序的最终值。
        #[arg(long)]
        show_result: bool,
    },

    /// Evaluate source text. / 求值源代码。
    Eval {
        /// The source to evaluate. / 要求值的源代码。
        source: String,
    },

    /// Parse a file and report syntax errors. / 解析文件并报告语法错误。
    Check {
        /// The file to check. / 要检查的文件。
        file: String,

        /// Dump the expression tree. / 输出表达式树。
        #[arg(long)]
        ast: bool,
    },

    /// Start an interactive REPL. / 启动交互式 REPL。
    Repl,
}

/// Install the stderr log subscriber. `FWJS_LOG` takes precedence over
/// the level implied by `--verbose`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("FWJS_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

/// Main entry point.
/// 主入口点。
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = commands::Settings {
        verbose: cli.verbose,
        max_call_depth: cli.max_call_depth,
    };

    let result = match cli.command {
        Commands::Run { file, show_result } => commands::run::run(&file, show_result, &settings),
        Commands::Eval { source } => commands::eval::run(&source, &settings),
        Commands::Check { file, ast } => commands::check::run(&file, ast, &settings),
        Commands::Repl => commands::repl::run(&settings),
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("error: {e}");
        }
        std::process::exit(1);
    }
}
