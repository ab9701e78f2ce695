// CLI definitions using clap

use clap::{ArgAction, Parser};
use joy2key::config::{AxisBinding, BindingSet, ButtonBinding, Directives, ThresholdOverride};
use joy2key::ConfigError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "joy2key")]
#[command(version, about = "Translate joystick input into X11 key events")]
pub struct Cli {
    /// Joystick device (default: /dev/input/js0)
    #[arg(long = "dev", value_name = "DEVICE")]
    pub device: Option<PathBuf>,

    /// X display to send keys to (default: $DISPLAY)
    #[arg(long, value_name = "NAME")]
    pub display: Option<String>,

    /// 0 = warnings only, 1 = device info (default), 2 = transitions, 3 = everything
    #[arg(long, value_name = "N")]
    pub verbose: Option<u8>,

    /// Print raw joystick events instead of sending keys
    #[arg(long)]
    pub test: bool,

    /// Config file (default: ~/.config/joy2key/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Primary button bindings: BUTTON KEY pairs
    #[arg(long, num_args = 1.., value_name = "TOKEN", action = ArgAction::Set)]
    pub buttons: Option<Vec<String>>,

    /// Primary axis bindings: AXIS LOW_KEY HIGH_KEY triples
    #[arg(long, num_args = 1.., value_name = "TOKEN", action = ArgAction::Set)]
    pub axes: Option<Vec<String>>,

    /// Secondary button bindings, active while set2 is held
    #[arg(long, num_args = 1.., value_name = "TOKEN", action = ArgAction::Set)]
    pub buttons2: Option<Vec<String>>,

    /// Secondary axis bindings, active while set2 is held
    #[arg(long, num_args = 1.., value_name = "TOKEN", action = ArgAction::Set)]
    pub axes2: Option<Vec<String>>,

    /// Axis thresholds: AXIS LOW HIGH triples (fractions or raw values)
    #[arg(
        long = "axes_thr",
        visible_alias = "axes-thr",
        num_args = 1..,
        value_name = "TOKEN",
        action = ArgAction::Set,
        allow_negative_numbers = true
    )]
    pub axes_thr: Option<Vec<String>>,

    /// List known axis, button and key names and exit
    #[arg(long)]
    pub list_names: bool,
}

impl Cli {
    /// Group the flat token lists into directive records
    pub fn directives(&self) -> Result<Directives, ConfigError> {
        Ok(Directives {
            primary: BindingSet {
                buttons: group(&self.buttons, "--buttons", ButtonBinding::from_tokens)?,
                axes: group(&self.axes, "--axes", AxisBinding::from_tokens)?,
            },
            secondary: BindingSet {
                buttons: group(&self.buttons2, "--buttons2", ButtonBinding::from_tokens)?,
                axes: group(&self.axes2, "--axes2", AxisBinding::from_tokens)?,
            },
            thresholds: group(&self.axes_thr, "--axes_thr", ThresholdOverride::from_tokens)?,
        })
    }
}

fn group<T>(
    tokens: &Option<Vec<String>>,
    list: &'static str,
    parse: fn(&'static str, &[String]) -> Result<Vec<T>, ConfigError>,
) -> Result<Option<Vec<T>>, ConfigError> {
    tokens.as_deref().map(|t| parse(list, t)).transpose()
}
