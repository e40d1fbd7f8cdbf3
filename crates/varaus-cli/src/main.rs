// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use runtime::{ApiRuntime, DemoRuntime};
use std::env;
use std::path::PathBuf;
use varaus_app::ApplicationRoundId;
use varaus_tui::BrowserOptions;

const DEMO_SEED: u64 = 2026;

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
            "load config {}; run `varaus --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;
    let status_filter = config.status_filter().to_owned();

    if options.demo {
        let mut runtime = DemoRuntime::new(DEMO_SEED);
        let round_id = options
            .round
            .map(ApplicationRoundId::new)
            .unwrap_or_else(|| runtime.round_id());
        if options.check_only {
            return Ok(());
        }
        let browser_options = BrowserOptions {
            round_id,
            status_filter,
        };
        return varaus_tui::run_app(&browser_options, &mut runtime);
    }

    let round = options.round.or(config.default_round()).ok_or_else(|| {
        anyhow!(
            "no application round selected; pass --round <id> or set [view].default_round in {}",
            options.config_path.display()
        )
    })?;

    let client = varaus_api::Client::new(config.api_base_url(), config.api_timeout()?)
        .with_context(|| {
            format!(
                "invalid [api] config in {}; fix base_url/timeout values",
                options.config_path.display()
            )
        })?;
    if options.check_only {
        return Ok(());
    }

    let browser_options = BrowserOptions {
        round_id: ApplicationRoundId::new(round),
        status_filter,
    };
    let mut runtime = ApiRuntime::new(client);
    varaus_tui::run_app(&browser_options, &mut runtime)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    round: Option<i64>,
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
        round: None,
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
            "--round" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--round requires an application round id"))?;
                let round = value.as_ref().parse::<i64>().map_err(|_| {
                    anyhow!(
                        "invalid --round value {:?}; expected a numeric id",
                        value.as_ref()
                    )
                })?;
                options.round = Some(round);
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
    println!("varaus");
    println!("  --config <path>          Use a specific config path");
    println!("  --round <id>             Open this application round");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --demo                   Browse seeded demo data (no server needed)");
    println!("  --check                  Validate config and API client setup");
    println!("  --help                   Show this help");
}
