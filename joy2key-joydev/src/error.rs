//! Joystick device error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors from joystick device operations
#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("open(\"{}\") failed: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ioctl({request}) failed: {source}")]
    Query {
        request: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Device disconnected")]
    Disconnected,

    #[error("unexpected joystick event: short read of {0} bytes")]
    ShortRead(usize),

    #[error("Read failed: {0}")]
    Read(#[source] std::io::Error),
}

impl DeviceError {
    /// Classify an I/O error from `read(2)` on the device node.
    ///
    /// Unplugging the device makes pending and subsequent reads fail with
    /// `ENODEV`.
    pub fn from_read(err: std::io::Error) -> Self {
        if err.raw_os_error() == Some(libc::ENODEV) {
            DeviceError::Disconnected
        } else {
            DeviceError::Read(err)
        }
    }
}
