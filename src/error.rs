//! Error types

use joy2key_joydev::DeviceError;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors. All of these are fatal and are raised before any
/// device or display is opened.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown axis ({0})")]
    UnknownAxis(String),

    #[error("unknown button ({0})")]
    UnknownButton(String),

    #[error("unknown key ({0})")]
    UnknownKey(String),

    #[error("invalid number ({0})")]
    InvalidNumber(String),

    #[error("invalid threshold ({0}): expected -1.0..1.0 or a 16-bit raw value")]
    InvalidThreshold(String),

    #[error("{list} expects groups of {group} tokens, got {count}")]
    IncompleteDirective {
        list: &'static str,
        group: usize,
        count: usize,
    },

    #[error("{0} specified more than once")]
    DuplicateDirective(&'static str),

    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors from the key emitter
#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Failed to open display {display}: {reason}")]
    Open { display: String, reason: String },

    #[error("Display {0} does not support the XTEST extension")]
    MissingXTest(String),

    #[error("Display connection failed: {0}")]
    Connection(String),
}

/// Conditions that end the event loop
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error(transparent)]
    Emit(#[from] EmitError),
}
