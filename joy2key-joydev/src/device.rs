//! Joystick device node access

use crate::codes::ABS_CNT;
use crate::descriptor::DeviceDescriptor;
use crate::error::DeviceError;
use crate::event::{EventSource, JsEvent, EVENT_SIZE};
use crate::ioctl;
use std::fs::File;
use std::io::Read;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default joystick device node
pub const DEFAULT_DEVICE: &str = "/dev/input/js0";

/// An open joydev device node.
///
/// Reads block until the next event. The file descriptor is closed on drop.
pub struct Joystick {
    file: File,
    path: PathBuf,
}

impl Joystick {
    /// Open a device node read-only
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DeviceError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| DeviceError::Open {
            path: path.clone(),
            source,
        })?;
        debug!("Opened {}", path.display());
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Query axis/button counts and their hardware code maps
    pub fn probe(&self) -> Result<DeviceDescriptor, DeviceError> {
        let fd = self.file.as_raw_fd();

        let axes = ioctl::axes(fd)? as usize;
        let axis_map = ioctl::axis_map(fd)?;
        let buttons = ioctl::buttons(fd)? as usize;
        let button_map = ioctl::button_map(fd)?;

        let axis_codes = axis_map[..axes.min(ABS_CNT)]
            .iter()
            .map(|&code| code as u16)
            .collect();
        let button_codes = button_map[..buttons.min(button_map.len())].to_vec();

        Ok(DeviceDescriptor::new(axis_codes, button_codes))
    }

    /// Device name as reported by the driver (`JSIOCGNAME`)
    pub fn name(&self) -> Result<String, DeviceError> {
        ioctl::name(self.file.as_raw_fd())
    }

    /// Driver version as `(major, minor, patch)` (`JSIOCGVERSION`)
    pub fn driver_version(&self) -> Result<(u8, u8, u8), DeviceError> {
        let v = ioctl::version(self.file.as_raw_fd())?;
        Ok(((v >> 16) as u8, (v >> 8) as u8, v as u8))
    }

    /// Block until the next event record arrives
    pub fn read_event(&mut self) -> Result<JsEvent, DeviceError> {
        let mut buf = [0u8; EVENT_SIZE];
        let n = self.file.read(&mut buf).map_err(DeviceError::from_read)?;
        match n {
            0 => Err(DeviceError::Disconnected),
            EVENT_SIZE => JsEvent::from_bytes(&buf),
            short => Err(DeviceError::ShortRead(short)),
        }
    }
}

impl EventSource for Joystick {
    fn next_event(&mut self) -> Result<JsEvent, DeviceError> {
        self.read_event()
    }
}
