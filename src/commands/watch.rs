use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::CommandFactory;

use wampa::config::{load_layered, ConfigOverrides};
use wampa::{WampaError, WatchEvent, WatchOptions, WatchUseCase, WatcherMode};

use crate::cli::Cli;
use crate::ui::output::print_config_warnings;
use crate::ui::terminal::detect_capabilities;
use crate::ui::views::watch::{render_watch_event, render_watch_header};

const MISSING_CONFIG_HINT: &str = "Configuration file wampa.json not found. \
Please specify -i and -o options or create a configuration file.";

pub fn cmd_watch(cli: &Cli) -> Result<()> {
    let overrides = ConfigOverrides {
        input_files: cli.inputs.clone(),
        output_file: cli.output.clone(),
        mode: cli.native.then_some(WatcherMode::Native),
        poll_interval_ms: cli.poll_interval,
    };

    let config_missing = !cli.config.exists();
    let no_cli_sources = overrides.input_files.is_empty() && overrides.output_file.is_none();

    if cli.uses_default_config() && config_missing && no_cli_sources {
        eprintln!("{}\n", MISSING_CONFIG_HINT);
        print_help();
        bail!("config file not found");
    }

    let (config, warnings) = match load_layered(&cli.config, !cli.uses_default_config(), &overrides)
    {
        Ok(loaded) => loaded,
        Err(e @ WampaError::InvalidConfig(_)) if config_missing => {
            eprintln!("{}\n", e);
            print_help();
            return Err(e).context("invalid configuration");
        }
        Err(e) => return Err(e).context("invalid configuration"),
    };

    if !cli.json {
        print_config_warnings(&cli.config, &warnings);
    }

    let options = WatchOptions::from_config(&config).with_json(cli.json);
    let caps = detect_capabilities();

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to install Ctrl+C handler")?;

    if !cli.json {
        print!(
            "{}",
            render_watch_header(
                &options.sources,
                &options.output.display().to_string(),
                &options.mode.to_string(),
                caps.supports_color,
                caps.supports_unicode,
            )
        );
    }

    let json = options.json;
    let mut use_case = WatchUseCase::new(options).context("failed to create watcher")?;
    use_case
        .start(running, |event| emit(&event, json, caps.supports_color, caps.supports_unicode))
        .context("failed to start watching")?;

    Ok(())
}

fn emit(event: &WatchEvent, json: bool, supports_color: bool, supports_unicode: bool) {
    if json {
        println!("{}", event.to_json());
        return;
    }

    let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
    let rendered = render_watch_event(&timestamp, event, supports_color, supports_unicode);
    match event {
        WatchEvent::Error { .. } | WatchEvent::SourceError { .. } => eprint!("{rendered}"),
        _ => print!("{rendered}"),
    }
}

fn print_help() {
    let mut cmd = Cli::command();
    if cmd.print_help().is_err() {
        eprintln!("Run 'wampa --help' for usage.");
    }
    println!();
}
