//! joy2key: joystick to X11 key events
//!
//! Main entry point.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::stdout;
use std::path::PathBuf;
use tracing::{info, warn};

use joy2key::engine::Engine;
use joy2key::keysym::KEYSYM_NAMES;
use joy2key::mapping::{MappingTables, ResolvedDirectives};
use joy2key::raw::dump_raw_events;
use joy2key::{ConfigFile, X11Emitter};
use joy2key_joydev::codes::{self, AXIS_NAMES, BUTTON_NAMES};
use joy2key_joydev::{DeviceDescriptor, Joystick, DEFAULT_DEVICE};

use cli::Cli;

fn setup_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn names<T>(table: &[(&str, T)]) -> String {
    table.iter().map(|(name, _)| *name).collect::<Vec<_>>().join(" ")
}

fn print_names() {
    println!("axes:    {}", names(AXIS_NAMES));
    println!("buttons: {}", names(BUTTON_NAMES));
    println!("keys:    {} none set2", names(KEYSYM_NAMES));
    println!("         or any single character, or a raw 0x keysym");
}

fn log_capabilities(joystick: &Joystick, desc: &DeviceDescriptor) {
    match joystick.name() {
        Ok(name) => info!("Device: {name} ({})", joystick.path().display()),
        Err(e) => warn!("Could not read device name: {e}"),
    }
    if let Ok((major, minor, patch)) = joystick.driver_version() {
        info!("Driver version: {major}.{minor}.{patch}");
    }

    info!("{} axes", desc.axis_count());
    for (i, &code) in desc.axis_codes().iter().enumerate() {
        let name = codes::axis_name(code).unwrap_or("???");
        info!("  axis {i}: {name} (0x{code:02x})");
    }
    info!("{} buttons", desc.button_count());
    for (i, &code) in desc.button_codes().iter().enumerate() {
        let name = codes::button_name(code).unwrap_or("???");
        info!("  button {i}: {name} (0x{code:03x})");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_names {
        print_names();
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::load_or_default(&ConfigFile::default_path())?,
    };

    setup_logging(cli.verbose.or(config.verbose).unwrap_or(1));

    // Resolve everything before touching the device
    let directives = config
        .directives()
        .merge(cli.directives()?)
        .context("Conflicting directives between config file and command line")?;
    let resolved = ResolvedDirectives::resolve(&directives)?;

    let device = cli
        .device
        .clone()
        .or_else(|| config.device.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DEVICE));
    let mut joystick = Joystick::open(&device)?;
    let desc = joystick
        .probe()
        .with_context(|| format!("Failed to query capabilities of {}", device.display()))?;
    log_capabilities(&joystick, &desc);

    if cli.test {
        return dump_raw_events(&mut joystick, stdout().lock())
            .map(|never| match never {})
            .with_context(|| format!("Reading {}", device.display()));
    }

    let tables = MappingTables::build(&desc, &resolved);
    let display = cli.display.as_deref().or(config.display.as_deref());
    let mut emitter = X11Emitter::open(display)?;

    info!("Translating events from {}", device.display());
    let mut engine = Engine::new(tables);
    engine
        .run(&mut joystick, &mut emitter)
        .map(|never| match never {})
        .with_context(|| format!("Stopped translating events from {}", device.display()))
}
