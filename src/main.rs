//! joystick-arbiter - xpad / hid-generic joystick arbitration
//!
//! Meant to be triggered once per input device (dis)connect event.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use joystick_arbiter::{
    Arbiter, ArbiterConfig, DriverAction, DriverControl, DryRunControl, SysfsDriverControl,
    SystemState, UdevRegistry,
};
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();

    let matches = cli().get_matches();
    let config = build_config(&matches)?;
    log::debug!("configuration: {:?}", config);

    let registry = UdevRegistry::new().context("Could not acquire udev context")?;

    let actions = if matches.get_flag("dry-run") {
        execute(&registry, &DryRunControl::new(), &config)?
    } else {
        let control = SysfsDriverControl::new(config.driver_paths());
        execute(&registry, &control, &config)?
    };

    for action in &actions {
        println!("  {}", action);
    }

    Ok(())
}

fn cli() -> Command {
    let command = Command::new("joystick-arbiter")
        .version(joystick_arbiter::VERSION)
        .about("Disables hid-generic joysticks while an xpad gamepad is active")
        .long_about(
            "joystick-arbiter unbinds hid-generic from the devices behind every joystick \
             node when a gamepad driven by xpad is present, and binds hid-generic to every \
             driverless HID device otherwise. Run it once per device hotplug event.",
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Report the bind/unbind writes without performing them")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("specialized-driver")
                .long("specialized-driver")
                .value_name("NAME")
                .help("Driver whose joysticks take precedence [default: xpad]"),
        )
        .arg(
            Arg::new("generic-driver")
                .long("generic-driver")
                .value_name("NAME")
                .help("Driver to unbind/bind [default: hid-generic]"),
        )
        .arg(
            Arg::new("sysfs-root")
                .long("sysfs-root")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Mount point of sysfs [default: /sys]"),
        );

    #[cfg(feature = "config")]
    let command = command.arg(
        Arg::new("config")
            .long("config")
            .value_name("FILE")
            .value_parser(clap::value_parser!(PathBuf))
            .help("Configuration file [default: <config dir>/joystick-arbiter/config.toml]"),
    );

    command
}

fn build_config(matches: &ArgMatches) -> Result<ArbiterConfig> {
    #[cfg(feature = "config")]
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ArbiterConfig::load(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => ArbiterConfig::load_default().context("Failed to load default configuration")?,
    };

    #[cfg(not(feature = "config"))]
    let mut config = ArbiterConfig::default();

    if let Some(name) = matches.get_one::<String>("specialized-driver") {
        config.specialized_driver = name.clone();
    }
    if let Some(name) = matches.get_one::<String>("generic-driver") {
        config.generic_driver = name.clone();
    }
    if let Some(root) = matches.get_one::<PathBuf>("sysfs-root") {
        config.sysfs_root = root.clone();
    }

    Ok(config)
}

/// Classify, announce the pass, then perform it
fn execute<C: DriverControl>(
    registry: &UdevRegistry,
    control: &C,
    config: &ArbiterConfig,
) -> Result<Vec<DriverAction>> {
    let arbiter = Arbiter::new(registry, control, config);

    let state = arbiter.classify();
    println!("{}", status_line(state, config));

    arbiter
        .correct(state)
        .context("Driver control write failed")
}

fn status_line(state: SystemState, config: &ArbiterConfig) -> String {
    match state {
        SystemState::SpecializedActive => format!(
            "{} device active - deactivating {} joystick devices",
            config.specialized_driver, config.generic_driver
        ),
        SystemState::SpecializedAbsent => format!(
            "No {} device active - activating all joystick devices",
            config.specialized_driver
        ),
    }
}
