//! Key emission seam
//!
//! The dispatcher hands `(keysym, pressed)` pairs to a [`KeyEmitter`]. The
//! X11 implementation lives in [`crate::x11`]; tests plug in recorders.

use crate::error::EmitError;
use crate::keysym::Keysym;

/// Synthesizes key presses and releases on a display
pub trait KeyEmitter {
    /// Press (`pressed == true`) or release the key producing `keysym`.
    ///
    /// A keysym with no keycode on the display is skipped silently and is
    /// not an error. Returns only after the display has processed the event.
    fn emit(&mut self, keysym: Keysym, pressed: bool) -> Result<(), EmitError>;
}
