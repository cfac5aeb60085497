// SPDX-License-Identifier: AGPL-3.0-or-later
//! xreadme - generate a README from a project description

mod commands;
mod project;
mod sink;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "xreadme")]
#[command(version, about = "Generate a README from a project description", long_about = None)]
#[command(after_help = "EXAMPLES:
    xreadme generate project.toml          Write ./README.md
    xreadme generate project.toml -o docs  Write docs/README.md
    xreadme preview project.toml           Print the body as HTML
    xreadme tree project.toml > body.json  Dump the body for body_tree")]
struct Cli {
    /// Session config (TOML); defaults apply when omitted
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log more (repeat for trace output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the README
    Generate {
        /// Project file (TOML)
        project: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// Suppress the success message
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print the body as HTML
    Preview {
        /// Project file (TOML)
        project: PathBuf,
    },

    /// Print the body as a JSON block tree
    Tree {
        /// Project file (TOML)
        project: PathBuf,
    },

    /// List available licenses
    Licenses {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List recommended sections
    Sections {
        /// Project file to mark selected sections against
        project: Option<PathBuf>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Generate {
            project,
            out,
            quiet,
        } => match commands::generate(config, &project, &out, quiet)? {
            Some(summary) => {
                tracing::info!(
                    "{} sections, {} body words",
                    summary.sections,
                    summary.body_words
                );
                if !quiet {
                    println!("Wrote {} ({} bytes)", summary.path.display(), summary.bytes);
                }
                Ok(ExitCode::SUCCESS)
            }
            None => Ok(ExitCode::from(2)),
        },

        Command::Preview { project } => {
            println!("{}", commands::preview(config, &project)?);
            Ok(ExitCode::SUCCESS)
        }

        Command::Tree { project } => {
            println!("{}", commands::tree(config, &project)?);
            Ok(ExitCode::SUCCESS)
        }

        Command::Licenses { json } => {
            let entries = commands::licenses();
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for entry in entries {
                    println!("{:<14} {}", entry.id, entry.label);
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Sections { project, json } => {
            let entries = commands::sections(config, project.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for entry in entries {
                    let mark = if entry.selected { "x" } else { " " };
                    println!("[{mark}] {}", entry.name);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
