//! pwmigrate - Cypress to Playwright migration CLI
//!
//! Thin wrapper over the library: argument parsing, logging setup, file
//! output and reporting. All rewriting happens in `pwmigrate::core`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, EnvFilter};

use pwmigrate::core::{
    collect_targets, FileReport, FileStatus, MigrateConfig, MigrationEngine, MigrationOutcome,
    RunReport, SpecFinder, WalkConfig,
};
use pwmigrate::{inventory_custom_commands, migrate_config, LanguageId};

#[derive(Parser, Debug)]
#[command(name = "pwmigrate")]
#[command(version = pwmigrate::version())]
#[command(about = "Migrate Cypress test suites to Playwright Test")]
#[command(after_help = "EXAMPLES:
  # Preview what would change in a project
  pwmigrate tests .

  # Rewrite every spec under cypress/e2e in place
  pwmigrate tests cypress/e2e --write

  # Print one migrated spec
  pwmigrate tests cypress/e2e/login.cy.ts --stdout

  # Machine-readable report
  pwmigrate tests . --json > report.json

  # Convert the Cypress config
  pwmigrate config cypress.config.ts --output playwright.config.ts

  # Inventory custom commands before porting them to fixtures
  pwmigrate commands cypress/support/commands.js

Unconvertible constructs are left as TODO comments for manual review.
")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Project config file (default: .pwmigrate.json in the current directory)
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Migrate Cypress spec files
    Tests {
        /// Spec files or directories to search
        #[arg(value_name = "PATH", default_value = ".")]
        paths: Vec<PathBuf>,

        /// Rewrite migrated files in place
        #[arg(long, help_heading = "Output")]
        write: bool,

        /// Print migrated source instead of a summary
        #[arg(long, conflicts_with = "json", help_heading = "Output")]
        stdout: bool,

        /// Print a JSON report instead of a summary
        #[arg(long, help_heading = "Output")]
        json: bool,

        /// Do not prefix the Playwright import line
        #[arg(long)]
        no_import: bool,
    },

    /// Migrate a cypress.config.* file to a Playwright config
    Config {
        /// Cypress config file
        file: PathBuf,

        /// Write the result here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List custom commands with a migration guide
    Commands {
        /// Cypress support file declaring custom commands
        file: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(explicit: Option<&Path>) -> Result<MigrateConfig> {
    let config = match explicit {
        Some(path) => MigrateConfig::load(path)?,
        None => {
            let cwd = std::env::current_dir().context("reading current directory")?;
            MigrateConfig::discover(&cwd)?
        }
    };
    debug!(?config, "effective config");
    Ok(config)
}

fn read_source(path: &Path) -> Result<(String, LanguageId)> {
    let language = LanguageId::from_path(path);
    if !language.is_supported() {
        bail!("{}: not a JavaScript or TypeScript file", path.display());
    }
    let source =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok((source, language))
}

/// Options of the `tests` subcommand
struct TestsArgs {
    paths: Vec<PathBuf>,
    write: bool,
    stdout: bool,
    json: bool,
    no_import: bool,
}

fn run_tests(mut config: MigrateConfig, args: TestsArgs) -> Result<bool> {
    if args.no_import {
        config.inject_import = false;
    }
    let finder = SpecFinder::new(WalkConfig::from(&config))?;
    let targets = collect_targets(&finder, &args.paths)?;
    info!(count = targets.len(), "migrating spec files");

    let engine = MigrationEngine::with_options(config.engine_options());
    let mut report = RunReport::default();
    let show_headers = targets.len() > 1;

    for path in &targets {
        let shown = path.display().to_string();
        let entry = match engine.migrate_file(path, config.max_file_size) {
            Ok(MigrationOutcome::Migrated { source, stats }) => {
                if args.write {
                    fs::write(path, &source).with_context(|| format!("writing {shown}"))?;
                    info!(path = %shown, "rewrote file");
                }
                if args.stdout {
                    if show_headers {
                        println!("// ==> {shown} <==");
                    }
                    print!("{source}");
                }
                FileReport {
                    path: shown,
                    status: FileStatus::Migrated,
                    stats: Some(stats),
                    error: None,
                }
            }
            Ok(MigrationOutcome::Unchanged) => FileReport {
                path: shown,
                status: FileStatus::Unchanged,
                stats: None,
                error: None,
            },
            Err(e) => {
                error!(path = %shown, "{}", e);
                FileReport {
                    path: shown,
                    status: FileStatus::Failed,
                    stats: None,
                    error: Some(e.to_string()),
                }
            }
        };
        report.push(entry);
    }

    if args.json {
        println!("{}", report.to_json()?);
    } else if !args.stdout {
        print_summary(&report, args.write);
    }
    Ok(report.failed == 0)
}

fn print_summary(report: &RunReport, written: bool) {
    for file in &report.files {
        match (&file.status, &file.stats) {
            (FileStatus::Migrated, Some(stats)) => println!(
                "migrated   {} ({} chains, {} blocks, {} TODO)",
                file.path, stats.chains_rewritten, stats.test_blocks_rewritten, stats.todo_markers
            ),
            (FileStatus::Failed, _) => println!(
                "failed     {}: {}",
                file.path,
                file.error.as_deref().unwrap_or("unknown error")
            ),
            _ => println!("unchanged  {}", file.path),
        }
    }
    println!();
    println!(
        "{} migrated, {} unchanged, {} failed; {} TODO markers to review",
        report.migrated, report.unchanged, report.failed, report.totals.todo_markers
    );
    if !written && report.migrated > 0 {
        println!("Dry run: re-run with --write to apply.");
    }
}

fn run_config(file: &Path, output: Option<&Path>) -> Result<()> {
    let (source, language) = read_source(file)?;
    let Some(migrated) = migrate_config(&source, language)? else {
        bail!("{}: not a Cypress config file", file.display());
    };
    match output {
        Some(out) => {
            fs::write(out, format!("{migrated}\n"))
                .with_context(|| format!("writing {}", out.display()))?;
            info!(path = %out.display(), "wrote Playwright config");
        }
        None => println!("{migrated}"),
    }
    Ok(())
}

fn run_commands(file: &Path) -> Result<()> {
    let (source, language) = read_source(file)?;
    let Some(inventory) = inventory_custom_commands(&source, language)? else {
        bail!("{}: no Cypress.Commands declarations found", file.display());
    };
    print!("{inventory}");
    Ok(())
}

fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Command::Tests {
            paths,
            write,
            stdout,
            json,
            no_import,
        } => {
            let config = load_config(cli.config.as_deref())?;
            run_tests(
                config,
                TestsArgs {
                    paths,
                    write,
                    stdout,
                    json,
                    no_import,
                },
            )
        }
        Command::Config { file, output } => run_config(&file, output.as_deref()).map(|_| true),
        Command::Commands { file } => run_commands(&file).map(|_| true),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
