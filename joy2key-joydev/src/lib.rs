//! Linux joystick device access
//!
//! Wraps the kernel's joydev interface (`/dev/input/jsN`):
//!
//! - capability probing via the `JSIOCG*` ioctls ([`Joystick::probe`])
//! - decoding of the fixed-size `js_event` records ([`JsEvent`])
//! - hardware code name tables for axes and buttons ([`codes`])
//!
//! Nothing here knows about key mappings; the translation engine lives in
//! the `joy2key` crate.

pub mod codes;
pub mod descriptor;
pub mod device;
pub mod error;
pub mod event;

mod ioctl;

pub use descriptor::DeviceDescriptor;
pub use device::{Joystick, DEFAULT_DEVICE};
pub use error::DeviceError;
pub use event::{EventKind, EventSource, JsEvent, RawJsEvent, EVENT_SIZE};
