//! html-preflight CLI entry point
//!
//! Structural validation for static HTML user-table pages.

use clap::Parser;
use html_preflight::cli::args::{Args, Command};
use html_preflight::cli::output::get_formatter;
use html_preflight::engine::orchestrator::create_all_checks;
use html_preflight::engine::result::{compare_reports, load_baseline, save_as_baseline};
use html_preflight::{run_preflight, CheckCategory, PreflightConfig};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => {
            // --help and --version
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(3);
        }
    };

    init_tracing(args.verbose);

    match args.command() {
        Command::List => {
            print_check_list();
            ExitCode::SUCCESS
        }
        Command::Check => run_checks(&args),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_check_list() {
    let checks = create_all_checks();
    println!("Available checks:");

    for category in CheckCategory::ALL {
        println!();
        println!("{} CHECKS:", category.to_string().to_uppercase());
        for check in checks.iter().filter(|c| c.category == category) {
            println!("  {:<8} {}", check.id, check.name);
        }
    }
}

fn run_checks(args: &Args) -> ExitCode {
    let config = match PreflightConfig::resolve(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(3);
        }
    };

    let report = match run_preflight(config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error running checks: {}", e);
            return ExitCode::from(3);
        }
    };

    let color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
    let formatter = get_formatter(args.format, color, args.verbose, args.quiet);
    println!("{}", formatter.format(&report));

    if let Some(path) = &args.baseline {
        match load_baseline(path) {
            Ok(baseline) => {
                let cmp = compare_reports(&report, &baseline);
                eprintln!(
                    "BASELINE: {} regressions, {} new failures, {} resolved, {} unchanged",
                    cmp.regressions.len(),
                    cmp.new_failures.len(),
                    cmp.resolved.len(),
                    cmp.unchanged.len()
                );
                if cmp.has_regressions() {
                    for id in cmp.regressions.iter().chain(&cmp.new_failures) {
                        eprintln!("  regressed: {}", id);
                    }
                } else {
                    eprintln!("  no regressions against {}", path.display());
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(3);
            }
        }
    }

    if let Some(path) = &args.save_baseline {
        if let Err(e) = save_as_baseline(&report, path) {
            eprintln!("Error: {}", e);
            return ExitCode::from(3);
        }
    }

    if report.summary().is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
