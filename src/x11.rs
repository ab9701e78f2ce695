//! X11 key emitter using the XTEST extension

use crate::emitter::KeyEmitter;
use crate::error::EmitError;
use crate::keysym::Keysym;
use std::collections::HashMap;
use tracing::{debug, trace};
use x11rb::connection::{Connection, RequestConnection};
use x11rb::protocol::xproto::{ConnectionExt as _, Keycode, Window, KEY_PRESS_EVENT, KEY_RELEASE_EVENT};
use x11rb::protocol::xtest::{self, ConnectionExt as _};
use x11rb::rust_connection::RustConnection;

fn conn_err(e: impl std::fmt::Display) -> EmitError {
    EmitError::Connection(e.to_string())
}

/// Synthesizes key events on an X display through XTEST
pub struct X11Emitter {
    conn: RustConnection,
    root: Window,
    keycodes: HashMap<u32, Keycode>,
}

impl X11Emitter {
    /// Connect to `display`, or to `$DISPLAY` when `None`.
    ///
    /// Fails if the display cannot be opened or lacks XTEST.
    pub fn open(display: Option<&str>) -> Result<Self, EmitError> {
        let label = display
            .map(str::to_owned)
            .or_else(|| std::env::var("DISPLAY").ok())
            .unwrap_or_default();

        let (conn, screen) = x11rb::connect(display).map_err(|e| EmitError::Open {
            display: label.clone(),
            reason: e.to_string(),
        })?;

        if conn
            .extension_information(xtest::X11_EXTENSION_NAME)
            .map_err(conn_err)?
            .is_none()
        {
            return Err(EmitError::MissingXTest(label));
        }

        let root = conn
            .setup()
            .roots
            .get(screen)
            .map(|s| s.root)
            .ok_or_else(|| EmitError::Open {
                display: label.clone(),
                reason: format!("no screen {screen}"),
            })?;

        let mut emitter = Self {
            conn,
            root,
            keycodes: HashMap::new(),
        };
        emitter.refresh_keymap()?;
        debug!(
            "Opened display {label}: {} keysyms mapped",
            emitter.keycodes.len()
        );
        Ok(emitter)
    }

    /// Rebuild the keysym → keycode index from the server's keyboard mapping
    pub fn refresh_keymap(&mut self) -> Result<(), EmitError> {
        let setup = self.conn.setup();
        let (min, max) = (setup.min_keycode, setup.max_keycode);
        let reply = self
            .conn
            .get_keyboard_mapping(min, (max - min).saturating_add(1))
            .map_err(conn_err)?
            .reply()
            .map_err(conn_err)?;

        self.keycodes = keycode_index(
            min,
            usize::from(reply.keysyms_per_keycode),
            &reply.keysyms,
        );
        Ok(())
    }

    pub fn keycode(&self, keysym: Keysym) -> Option<Keycode> {
        self.keycodes.get(&keysym.raw()).copied()
    }
}

/// Index a keyboard mapping (`per` keysyms for each keycode from `min` up).
///
/// Unshifted columns win over shifted ones, then the lowest keycode wins.
/// `NoSymbol` (0) entries are skipped.
fn keycode_index(min: Keycode, per: usize, keysyms: &[u32]) -> HashMap<u32, Keycode> {
    let mut index = HashMap::new();
    if per == 0 {
        return index;
    }
    for col in 0..per {
        for (row, chunk) in keysyms.chunks(per).enumerate() {
            let Some(&sym) = chunk.get(col).filter(|&&sym| sym != 0) else {
                continue;
            };
            let Some(keycode) = u8::try_from(row).ok().and_then(|r| min.checked_add(r)) else {
                break;
            };
            index.entry(sym).or_insert(keycode);
        }
    }
    index
}

impl KeyEmitter for X11Emitter {
    fn emit(&mut self, keysym: Keysym, pressed: bool) -> Result<(), EmitError> {
        let Some(keycode) = self.keycode(keysym) else {
            trace!("No keycode for {keysym} on this display");
            return Ok(());
        };
        let kind = if pressed { KEY_PRESS_EVENT } else { KEY_RELEASE_EVENT };
        self.conn
            .xtest_fake_input(kind, keycode, x11rb::CURRENT_TIME, self.root, 0, 0, 0)
            .map_err(conn_err)?;
        // Round-trip so the event is processed before the next one is read
        self.conn
            .get_input_focus()
            .map_err(conn_err)?
            .reply()
            .map_err(conn_err)?;
        Ok(())
    }
}
