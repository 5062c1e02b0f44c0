//! tocme: keep Markdown tables of contents up to date.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tocme::config::Config;
use tocme::tasks::{self, Status};
use tocme::{Levels, Mode, OptionLayer, Style, Variant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tocme")]
#[command(about = "Insert and check tables of contents in Markdown files", long_about = None)]
struct Args {
    /// Documents to update in place; defaults to the docs listed in the configuration
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Configuration file (default: tocme.toml if present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Report out-of-date outputs instead of writing them
    #[arg(long, conflicts_with = "stdout")]
    check: bool,

    /// Print the updated documents instead of writing them
    #[arg(long)]
    stdout: bool,

    /// Print a JSON report of the run
    #[arg(long, conflicts_with = "stdout")]
    json: bool,

    /// Marker tag name
    #[arg(long)]
    tag: Option<String>,

    /// List style: hierarchy, flat, reversed, increasing or decreasing
    #[arg(long)]
    style: Option<Style>,

    /// Heading scope: normal, full or local
    #[arg(long)]
    mode: Option<Mode>,

    /// Heading levels to include, e.g. 1-3,5
    #[arg(long)]
    levels: Option<Levels>,

    /// Markdown dialect
    #[arg(long)]
    variant: Option<Variant>,

    /// Number the items
    #[arg(long, value_name = "BOOL")]
    numbered: Option<bool>,

    /// Plain text instead of links
    #[arg(long, value_name = "BOOL")]
    plain: Option<bool>,

    /// Bold items
    #[arg(long, value_name = "BOOL")]
    bold: Option<bool>,

    /// Strip emoji shortcodes from items
    #[arg(long, value_name = "BOOL")]
    remove_emojis: Option<bool>,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn overrides(&self) -> OptionLayer {
        OptionLayer {
            tag: self.tag.clone(),
            variant: self.variant,
            style: self.style,
            mode: self.mode,
            levels: self.levels.clone(),
            bold: self.bold,
            numbered: self.numbered,
            plain: self.plain,
            remove_emojis: self.remove_emojis,
            ..OptionLayer::default()
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> tocme::Result<ExitCode> {
    let config = Config::discover(args.config.as_deref())?;
    let overrides = args.overrides();
    let jobs = if args.paths.is_empty() {
        tasks::jobs_from_config(&config, &overrides)?
    } else {
        tasks::jobs_for_paths(&args.paths, &config, &overrides)?
    };

    if jobs.is_empty() {
        eprintln!("No documents to process");
        return Ok(ExitCode::SUCCESS);
    }

    if args.stdout {
        for job in &jobs {
            let outcome = tasks::preview(job)?;
            print!("{}", outcome.text);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let report = tasks::run(&jobs, args.check);

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| tocme::Error::Io(std::io::Error::other(e)))?;
        println!("{json}");
    } else {
        for file in &report.files {
            if file.status == Status::OutOfDate {
                eprintln!("{}", tasks::out_of_date_message(&file.output));
            }
        }
    }

    Ok(if report.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
