#![allow(clippy::print_stderr, clippy::print_stdout)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;

use tpa::common::DiagnosticCategory;
use tpa_cli::args::{CliArgs, OutputFormat};
use tpa_cli::driver::{self, EXIT_FATAL, RunResult};
use tpa_cli::reporter::Reporter;

fn main() -> ExitCode {
    // Initialize tracing if TPA_LOG or RUST_LOG is set (zero cost otherwise).
    tpa::tracing_config::init_tracing();

    let args = CliArgs::parse();
    match run(&args) {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_FATAL as u8)
        }
    }
}

fn run(args: &CliArgs) -> Result<i32> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let mut result = driver::run(args, &cwd)?;
    let sources = std::mem::take(&mut result.sources);

    match args.format {
        OutputFormat::Json => {
            let mut reporter = Reporter::new(false).with_sources(sources);
            let json = reporter
                .render_json(&result.diagnostics)
                .context("failed to serialize diagnostics")?;
            println!("{json}");
        }
        OutputFormat::Text => {
            let color = !args.no_color && std::io::stdout().is_terminal();
            let mut reporter = Reporter::new(color).with_sources(sources);
            let output = reporter.render(&result.diagnostics);
            if !output.is_empty() {
                print!("{output}");
            }
            if !args.quiet {
                eprintln!("{}", summary(&result));
            }
        }
    }

    Ok(result.exit_code())
}

fn summary(result: &RunResult) -> String {
    let mut line = format!(
        "Analyzed {} file{}: {} error(s), {} warning(s), {} info",
        result.files_read,
        if result.files_read == 1 { "" } else { "s" },
        result.count(DiagnosticCategory::Error),
        result.count(DiagnosticCategory::Warning),
        result.count(DiagnosticCategory::Info),
    );
    if result.fixes_applied > 0 {
        line.push_str(&format!(
            "; applied {} fix(es) in {} file(s)",
            result.fixes_applied, result.files_fixed
        ));
    }
    if !result.targets_resolved && result.files_read > 0 {
        line.push_str("; TimeProvider unavailable, time checks skipped");
    }
    line
}
