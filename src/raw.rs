//! Raw event dump (test mode)

use joy2key_joydev::{EventSource, JsEvent};
use std::convert::Infallible;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DumpError {
    #[error(transparent)]
    Device(#[from] joy2key_joydev::DeviceError),

    #[error("Failed to write event: {0}")]
    Write(#[from] io::Error),
}

/// One event as `0x<time> 0x<value> 0x<type> 0x<number>`, fixed-width hex
pub fn format_raw_event(event: &JsEvent) -> String {
    format!(
        "0x{:08x} 0x{:04x} 0x{:02x} 0x{:02x}",
        event.time,
        event.value as u16,
        event.type_byte(),
        event.number
    )
}

/// Print every event from `source` to `out`, one per line, until the
/// source fails. Init events are included as delivered.
pub fn dump_raw_events<S, W>(source: &mut S, mut out: W) -> Result<Infallible, DumpError>
where
    S: EventSource + ?Sized,
    W: Write,
{
    loop {
        let event = source.next_event()?;
        writeln!(out, "{}", format_raw_event(&event))?;
        out.flush()?;
    }
}
