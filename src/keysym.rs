//! X11 keysym values and names
//!
//! Keysyms are the display-independent key identifiers from
//! `X11/keysymdef.h`; the emitter turns them into display keycodes.

use std::fmt;

/// An X11 keysym
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Keysym(u32);

impl Keysym {
    pub const BACKSPACE: Keysym = Keysym(0xff08);
    pub const TAB: Keysym = Keysym(0xff09);
    pub const RETURN: Keysym = Keysym(0xff0d);
    pub const ESCAPE: Keysym = Keysym(0xff1b);
    pub const HOME: Keysym = Keysym(0xff50);
    pub const LEFT: Keysym = Keysym(0xff51);
    pub const UP: Keysym = Keysym(0xff52);
    pub const RIGHT: Keysym = Keysym(0xff53);
    pub const DOWN: Keysym = Keysym(0xff54);
    pub const PAGE_UP: Keysym = Keysym(0xff55);
    pub const PAGE_DOWN: Keysym = Keysym(0xff56);
    pub const END: Keysym = Keysym(0xff57);
    pub const INSERT: Keysym = Keysym(0xff63);
    pub const F1: Keysym = Keysym(0xffbe);
    pub const SHIFT_L: Keysym = Keysym(0xffe1);
    pub const SHIFT_R: Keysym = Keysym(0xffe2);
    pub const CONTROL_L: Keysym = Keysym(0xffe3);
    pub const CONTROL_R: Keysym = Keysym(0xffe4);
    pub const CAPS_LOCK: Keysym = Keysym(0xffe5);
    pub const ALT_L: Keysym = Keysym(0xffe9);
    pub const ALT_R: Keysym = Keysym(0xffea);
    pub const DELETE: Keysym = Keysym(0xffff);
    pub const SPACE: Keysym = Keysym(0x0020);

    /// Offset of the Unicode keysym range (`0x01000000 + codepoint`)
    const UNICODE_OFFSET: u32 = 0x0100_0000;

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Keysym for a single character.
    ///
    /// Latin-1 characters are their own keysym; everything else uses the
    /// Unicode keysym range. Control characters have no keysym.
    pub fn from_char(ch: char) -> Option<Self> {
        let cp = ch as u32;
        match cp {
            0x20..=0x7e | 0xa0..=0xff => Some(Self(cp)),
            _ if ch.is_control() => None,
            _ => Some(Self(Self::UNICODE_OFFSET + cp)),
        }
    }

    /// Look up a named keysym or alias (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        KEYSYM_NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, sym)| sym)
    }

    /// Canonical name of this keysym, if it is one of the named ones
    pub fn name(self) -> Option<&'static str> {
        KEYSYM_NAMES
            .iter()
            .find(|&&(_, sym)| sym == self)
            .map(|&(n, _)| n)
    }
}

impl fmt::Display for Keysym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            return write!(f, "{name}");
        }
        match char::from_u32(self.0) {
            Some(ch) if (0x21..=0x7e).contains(&self.0) => write!(f, "{ch}"),
            _ => write!(f, "0x{:x}", self.0),
        }
    }
}

const fn f_key(n: u32) -> Keysym {
    Keysym(Keysym::F1.0 + n - 1)
}

/// Named keysyms. Canonical names first, then aliases.
pub const KEYSYM_NAMES: &[(&str, Keysym)] = &[
    ("Left", Keysym::LEFT),
    ("Up", Keysym::UP),
    ("Right", Keysym::RIGHT),
    ("Down", Keysym::DOWN),
    ("Home", Keysym::HOME),
    ("Page_Up", Keysym::PAGE_UP),
    ("Page_Down", Keysym::PAGE_DOWN),
    ("End", Keysym::END),
    ("Insert", Keysym::INSERT),
    ("Delete", Keysym::DELETE),
    ("BackSpace", Keysym::BACKSPACE),
    ("Return", Keysym::RETURN),
    ("Escape", Keysym::ESCAPE),
    ("Tab", Keysym::TAB),
    ("space", Keysym::SPACE),
    ("Shift_L", Keysym::SHIFT_L),
    ("Shift_R", Keysym::SHIFT_R),
    ("Control_L", Keysym::CONTROL_L),
    ("Control_R", Keysym::CONTROL_R),
    ("Alt_L", Keysym::ALT_L),
    ("Alt_R", Keysym::ALT_R),
    ("Caps_Lock", Keysym::CAPS_LOCK),
    ("F1", f_key(1)),
    ("F2", f_key(2)),
    ("F3", f_key(3)),
    ("F4", f_key(4)),
    ("F5", f_key(5)),
    ("F6", f_key(6)),
    ("F7", f_key(7)),
    ("F8", f_key(8)),
    ("F9", f_key(9)),
    ("F10", f_key(10)),
    ("F11", f_key(11)),
    ("F12", f_key(12)),
    // aliases
    ("Enter", Keysym::RETURN),
    ("Esc", Keysym::ESCAPE),
    ("Shift", Keysym::SHIFT_L),
    ("Control", Keysym::CONTROL_L),
    ("Ctrl", Keysym::CONTROL_L),
    ("Alt", Keysym::ALT_L),
    ("PgUp", Keysym::PAGE_UP),
    ("PgDown", Keysym::PAGE_DOWN),
];
