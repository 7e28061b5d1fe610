use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use gateway::ApiConfig;
use gateway::config::parse_timeout_secs;
use services::{Clock, TutorServices};
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

#[derive(Debug, Error)]
enum ArgsError {
    #[error("{flag} requires a value")]
    MissingValue { flag: &'static str },
    #[error("unknown argument: {0}")]
    UnknownArg(String),
    #[error("invalid --api-url value: {raw}")]
    InvalidApiUrl { raw: String },
    #[error("invalid --timeout value: {raw}")]
    InvalidTimeout { raw: String },
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-url <url>] [--timeout <secs>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url {}", gateway::config::DEFAULT_BASE_URL);
    eprintln!("  --timeout {}", gateway::config::DEFAULT_TIMEOUT_SECS);
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TUTOR_API_URL, TUTOR_API_TIMEOUT_SECS, RUST_LOG");
}

#[derive(Debug, PartialEq, Eq)]
enum Parsed {
    Run(ApiConfig),
    Help,
}

/// Apply command-line overrides on top of `config`.
fn parse_args(
    args: &mut impl Iterator<Item = String>,
    mut config: ApiConfig,
) -> Result<Parsed, ArgsError> {
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--api-url" => {
                let value = require_value(args, "--api-url")?;
                config = ApiConfig::new(&value, config.timeout)
                    .map_err(|_| ArgsError::InvalidApiUrl { raw: value.clone() })?;
            }
            "--timeout" => {
                let value = require_value(args, "--timeout")?;
                let timeout = parse_timeout_secs(&value)
                    .map_err(|_| ArgsError::InvalidTimeout { raw: value.clone() })?;
                config = config.with_timeout(timeout);
            }
            "--help" | "-h" => return Ok(Parsed::Help),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    Ok(Parsed::Run(config))
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "app=info,services=info,gateway=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let defaults = ApiConfig::from_env()?;
    let mut argv = std::env::args().skip(1);
    let config = match parse_args(&mut argv, defaults).inspect_err(|_| print_usage())? {
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
        Parsed::Run(config) => config,
    };

    tracing::info!(api = %config.base_url, timeout_secs = config.timeout.as_secs(), "starting tutor client");
    let services: Arc<dyn UiApp> = Arc::new(TutorServices::http(config, Clock::default_clock())?);
    let context = build_app_context(&services);

    // tao may open always-on-top in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("DSA Tutor")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
