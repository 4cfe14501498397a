#![forbid(unsafe_code)]

mod collector;
mod config;
mod constants;
mod export;
mod gui;
mod markdown;
mod net;
mod platform;
mod report;

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use tracing::{Level as TraceLevel, info, warn};
use tracing_subscriber::FmtSubscriber;

use config::Settings;
use platform::HostProbe;

/// Collects diagnostic information about the execution environment and
/// exports it as a Spanish-labelled report
#[derive(Debug, Parser)]
#[command(name = "info-usuario", version)]
struct Cli {
    /// Print the plain-text report to stdout instead of opening the window
    #[arg(long)]
    text: bool,

    /// Write the HTML page to the download directory and exit
    #[arg(long)]
    html: bool,

    /// Skip the network lookup stage
    #[arg(long)]
    no_net: bool,

    /// User-agent string to identify (defaults to $HTTP_USER_AGENT)
    #[arg(long)]
    user_agent: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let settings = Settings::load();
    info!(theme = settings.theme.attribute(), "Settings loaded");

    // The geolocation lookup is the only async stage; everything else is
    // synchronous platform reads
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let probe = HostProbe::new(cli.user_agent.clone());
    let client = if cli.no_net {
        None
    } else {
        Some(reqwest::Client::new())
    };
    let info = runtime.block_on(collector::collect(&probe, client.as_ref()));

    if cli.text {
        print!("{}", report::text_report(&info, Local::now()));
        return Ok(());
    }

    if cli.html {
        let now = Local::now();
        let fragment = markdown::to_html(&load_readme());
        let page = report::html_page(&info, settings.theme, now, Some(&fragment));
        let path = export::save_to_dir(
            &export::default_export_dir(),
            &report::page_filename(now),
            &page,
        )?;
        println!("{}", path.display());
        return Ok(());
    }

    gui::run(info, settings, load_readme())?;
    Ok(())
}

/// The info document: next to the binary, then the working directory, then
/// the embedded copy
fn load_readme() -> String {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            candidates.push(dir.join(constants::app::README_FILENAME));
        }
    }
    candidates.push(PathBuf::from(constants::app::README_FILENAME));

    for candidate in candidates {
        match fs::read_to_string(&candidate) {
            Ok(contents) => return contents,
            Err(e) => {
                warn!(path = %candidate.display(), error = %e, "Info document not readable");
            }
        }
    }
    include_str!("../README.md").to_string()
}
