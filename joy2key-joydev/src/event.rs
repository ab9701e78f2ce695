//! Joystick event records
//!
//! The kernel delivers `struct js_event` records of exactly [`EVENT_SIZE`]
//! bytes per `read(2)`:
//!
//! ```text
//! u32 time    event timestamp in milliseconds
//! i16 value   button: 0/1, axis: -32767..32767
//! u8  type    JS_EVENT_BUTTON (0x01) | JS_EVENT_AXIS (0x02), optionally | JS_EVENT_INIT (0x80)
//! u8  number  ordinal axis/button number
//! ```

use crate::error::DeviceError;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Size of one `js_event` record in bytes
pub const EVENT_SIZE: usize = 8;

/// Event type bits
pub mod js_type {
    pub const BUTTON: u8 = 0x01;
    pub const AXIS: u8 = 0x02;
    pub const INIT: u8 = 0x80;
}

/// Wire layout of `struct js_event` (native endianness)
#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct RawJsEvent {
    pub time: u32,
    pub value: i16,
    pub kind: u8,
    pub number: u8,
}

/// What produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Button,
    Axis,
    /// Any other type bits (preserved for raw dumps)
    Other(u8),
}

/// Decoded joystick event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsEvent {
    /// Timestamp in milliseconds (driver clock)
    pub time: u32,
    pub value: i16,
    pub kind: EventKind,
    /// Part of the synthetic initial-state burst sent on open
    pub init: bool,
    pub number: u8,
}

impl JsEvent {
    /// Button event helper, mostly useful for tests and replay
    pub fn button(number: u8, value: i16) -> Self {
        Self {
            time: 0,
            value,
            kind: EventKind::Button,
            init: false,
            number,
        }
    }

    /// Axis event helper, mostly useful for tests and replay
    pub fn axis(number: u8, value: i16) -> Self {
        Self {
            time: 0,
            value,
            kind: EventKind::Axis,
            init: false,
            number,
        }
    }

    /// Decode one record. Returns `ShortRead` unless exactly one record is given.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DeviceError> {
        let raw = RawJsEvent::read_from_bytes(bytes).map_err(|_| DeviceError::ShortRead(bytes.len()))?;
        Ok(Self::from(raw))
    }

    /// The raw `type` byte as the kernel sent it
    pub fn type_byte(&self) -> u8 {
        let kind = match self.kind {
            EventKind::Button => js_type::BUTTON,
            EventKind::Axis => js_type::AXIS,
            EventKind::Other(bits) => bits,
        };
        if self.init {
            kind | js_type::INIT
        } else {
            kind
        }
    }
}

impl From<RawJsEvent> for JsEvent {
    fn from(raw: RawJsEvent) -> Self {
        let init = raw.kind & js_type::INIT != 0;
        let kind = match raw.kind & !js_type::INIT {
            js_type::BUTTON => EventKind::Button,
            js_type::AXIS => EventKind::Axis,
            bits => EventKind::Other(bits),
        };
        Self {
            time: raw.time,
            value: raw.value,
            kind,
            init,
            number: raw.number,
        }
    }
}

impl From<JsEvent> for RawJsEvent {
    fn from(event: JsEvent) -> Self {
        Self {
            time: event.time,
            value: event.value,
            kind: event.type_byte(),
            number: event.number,
        }
    }
}

/// A blocking source of joystick events.
///
/// `next_event` blocks until the next event arrives. Any error is terminal:
/// callers stop reading and shut down.
pub trait EventSource {
    fn next_event(&mut self) -> Result<JsEvent, DeviceError>;
}
