// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result, anyhow};
use claimdesk_app::{ClaimsController, Endpoints, RenderedRow};
use claimdesk_client::Client;
use claimdesk_testkit::DemoSource;
use claimdesk_tui::{RunOptions, SessionEnd};
use config::Config;
use runtime::{DemoRuntime, HttpRuntime};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEMO_SEED: u64 = 20_240_101;
const DEMO_CLAIMS: usize = 24;
const DEMO_PRESELECTED: usize = 2;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `claimdesk --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let client = Client::new(config.base_url(), config.timeout()?)
        .with_context(|| {
            format!(
                "invalid [server] config in {}; fix base_url/timeout values",
                options.config_path.display()
            )
        })?
        .with_session_cookie(config.session_cookie().as_deref());
    if options.check_only {
        return Ok(());
    }

    init_logging(&config.log_file()?, config.log_level())?;
    info!(
        base_url = client.base_url(),
        demo = options.demo,
        signed_in = client.has_session(),
        "starting claimdesk"
    );

    let run_options = RunOptions {
        load_on_start: config.load_on_start(),
    };
    let end = if options.demo {
        let source = DemoSource::seeded(DEMO_SEED, DEMO_CLAIMS);
        let mut controller = ClaimsController::with_initial_rows(
            client.endpoints().clone(),
            demo_rows(&source),
        );
        let mut runtime = DemoRuntime::new(source);
        claimdesk_tui::run_app(&mut controller, &mut runtime, run_options)?
    } else {
        let mut controller = ClaimsController::new(client.endpoints().clone());
        let mut runtime = HttpRuntime::new(client);
        claimdesk_tui::run_app(&mut controller, &mut runtime, run_options)?
    };

    if let SessionEnd::Navigate(url) = end {
        info!(%url, "session ended with navigation");
        println!("open {url}");
    }
    Ok(())
}

fn demo_rows(source: &DemoSource) -> Vec<RenderedRow> {
    source
        .claims()
        .iter()
        .enumerate()
        .map(|(index, claim)| RenderedRow {
            claim: claim.clone(),
            checked: index < DEMO_PRESELECTED,
        })
        .collect()
}

/// Sends `tracing` output to a file; the terminal belongs to the UI.
fn init_logging(path: &Path, level: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| {
            format!(
                "open log file {}; set [log].file to a writable path",
                path.display()
            )
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|error| anyhow!("initialize logging: {error}"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    demo: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        demo: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("claimdesk");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --demo                   Launch against built-in sample claims (no server)");
    println!("  --check                  Validate config and server settings, then exit");
    println!("  --help                   Show this help");
}
