//! Hardware axis and button codes
//!
//! Values come from `linux/input-event-codes.h`. The joydev driver reports
//! these codes through `JSIOCGAXMAP` / `JSIOCGBTNMAP`, one per ordinal axis
//! or button.

/// Number of absolute axis codes (`ABS_CNT`)
pub const ABS_CNT: usize = 0x40;
/// Highest key/button code (`KEY_MAX`)
pub const KEY_MAX: u16 = 0x2ff;
/// First button code (`BTN_MISC`)
pub const BTN_MISC: u16 = 0x100;

pub mod abs {
    pub const X: u16 = 0x00;
    pub const Y: u16 = 0x01;
    pub const Z: u16 = 0x02;
    pub const RX: u16 = 0x03;
    pub const RY: u16 = 0x04;
    pub const RZ: u16 = 0x05;
    pub const THROTTLE: u16 = 0x06;
    pub const RUDDER: u16 = 0x07;
    pub const WHEEL: u16 = 0x08;
    pub const GAS: u16 = 0x09;
    pub const BRAKE: u16 = 0x0a;
    pub const HAT0X: u16 = 0x10;
    pub const HAT0Y: u16 = 0x11;
    pub const HAT1X: u16 = 0x12;
    pub const HAT1Y: u16 = 0x13;
    pub const HAT2X: u16 = 0x14;
    pub const HAT2Y: u16 = 0x15;
    pub const HAT3X: u16 = 0x16;
    pub const HAT3Y: u16 = 0x17;
}

pub mod btn {
    pub const TRIGGER: u16 = 0x120;
    pub const THUMB: u16 = 0x121;
    pub const THUMB2: u16 = 0x122;
    pub const TOP: u16 = 0x123;
    pub const TOP2: u16 = 0x124;
    pub const PINKIE: u16 = 0x125;
    pub const BASE: u16 = 0x126;
    pub const BASE2: u16 = 0x127;
    pub const BASE3: u16 = 0x128;
    pub const BASE4: u16 = 0x129;
    pub const BASE5: u16 = 0x12a;
    pub const BASE6: u16 = 0x12b;
    pub const DEAD: u16 = 0x12f;

    pub const A: u16 = 0x130;
    pub const B: u16 = 0x131;
    pub const C: u16 = 0x132;
    pub const X: u16 = 0x133;
    pub const Y: u16 = 0x134;
    pub const Z: u16 = 0x135;
    pub const TL: u16 = 0x136;
    pub const TR: u16 = 0x137;
    pub const TL2: u16 = 0x138;
    pub const TR2: u16 = 0x139;
    pub const SELECT: u16 = 0x13a;
    pub const START: u16 = 0x13b;
    pub const MODE: u16 = 0x13c;
    pub const THUMBL: u16 = 0x13d;
    pub const THUMBR: u16 = 0x13e;

    pub const DPAD_UP: u16 = 0x220;
    pub const DPAD_DOWN: u16 = 0x221;
    pub const DPAD_LEFT: u16 = 0x222;
    pub const DPAD_RIGHT: u16 = 0x223;
}

/// Axis names accepted in configuration, in reverse-lookup priority order
pub const AXIS_NAMES: &[(&str, u16)] = &[
    ("X", abs::X),
    ("Y", abs::Y),
    ("Z", abs::Z),
    ("RX", abs::RX),
    ("RY", abs::RY),
    ("RZ", abs::RZ),
    ("THROTTLE", abs::THROTTLE),
    ("RUDDER", abs::RUDDER),
    ("WHEEL", abs::WHEEL),
    ("GAS", abs::GAS),
    ("BRAKE", abs::BRAKE),
    ("HAT0X", abs::HAT0X),
    ("HAT0Y", abs::HAT0Y),
    ("HAT1X", abs::HAT1X),
    ("HAT1Y", abs::HAT1Y),
    ("HAT2X", abs::HAT2X),
    ("HAT2Y", abs::HAT2Y),
    ("HAT3X", abs::HAT3X),
    ("HAT3Y", abs::HAT3Y),
];

/// Button names accepted in configuration.
///
/// Canonical names come before aliases so reverse lookup reports the
/// canonical one (`A`, not `SOUTH`).
pub const BUTTON_NAMES: &[(&str, u16)] = &[
    ("A", btn::A),
    ("B", btn::B),
    ("C", btn::C),
    ("X", btn::X),
    ("Y", btn::Y),
    ("Z", btn::Z),
    ("TL", btn::TL),
    ("TR", btn::TR),
    ("TL2", btn::TL2),
    ("TR2", btn::TR2),
    ("SELECT", btn::SELECT),
    ("START", btn::START),
    ("MODE", btn::MODE),
    ("THUMBL", btn::THUMBL),
    ("THUMBR", btn::THUMBR),
    ("TRIGGER", btn::TRIGGER),
    ("THUMB", btn::THUMB),
    ("THUMB2", btn::THUMB2),
    ("TOP", btn::TOP),
    ("TOP2", btn::TOP2),
    ("PINKIE", btn::PINKIE),
    ("BASE", btn::BASE),
    ("BASE2", btn::BASE2),
    ("BASE3", btn::BASE3),
    ("BASE4", btn::BASE4),
    ("BASE5", btn::BASE5),
    ("BASE6", btn::BASE6),
    ("DEAD", btn::DEAD),
    ("DPAD_UP", btn::DPAD_UP),
    ("DPAD_DOWN", btn::DPAD_DOWN),
    ("DPAD_LEFT", btn::DPAD_LEFT),
    ("DPAD_RIGHT", btn::DPAD_RIGHT),
    // aliases
    ("SOUTH", btn::A),
    ("EAST", btn::B),
    ("NORTH", btn::X),
    ("WEST", btn::Y),
];

/// Look up an axis code by name (case-insensitive)
pub fn axis_code_from_name(name: &str) -> Option<u16> {
    lookup(AXIS_NAMES, name)
}

/// Look up a button code by name (case-insensitive)
pub fn button_code_from_name(name: &str) -> Option<u16> {
    lookup(BUTTON_NAMES, name)
}

/// Name of an axis code, or `None` if it has no symbolic name
pub fn axis_name(code: u16) -> Option<&'static str> {
    reverse(AXIS_NAMES, code)
}

/// Name of a button code, or `None` if it has no symbolic name
pub fn button_name(code: u16) -> Option<&'static str> {
    reverse(BUTTON_NAMES, code)
}

fn lookup(table: &[(&str, u16)], name: &str) -> Option<u16> {
    table
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, code)| code)
}

fn reverse(table: &[(&'static str, u16)], code: u16) -> Option<&'static str> {
    table.iter().find(|&&(_, c)| c == code).map(|&(n, _)| n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(axis_code_from_name("hat0x"), Some(abs::HAT0X));
        assert_eq!(axis_code_from_name("Rz"), Some(abs::RZ));
        assert_eq!(button_code_from_name("start"), Some(btn::START));
        assert_eq!(button_code_from_name("ThumbL"), Some(btn::THUMBL));
    }

    #[test]
    fn unknown_names() {
        assert_eq!(axis_code_from_name("HAT4X"), None);
        assert_eq!(button_code_from_name(""), None);
    }

    #[test]
    fn reverse_lookup_prefers_canonical_name() {
        assert_eq!(button_name(btn::A), Some("A"));
        assert_eq!(button_code_from_name("south"), Some(btn::A));
        assert_eq!(axis_name(abs::Y), Some("Y"));
        assert_eq!(axis_name(0x3f), None);
    }

    #[test]
    fn button_codes_fit_btnmap() {
        for &(name, code) in BUTTON_NAMES {
            assert!(
                (BTN_MISC..=KEY_MAX).contains(&code),
                "{name} outside the joydev button range"
            );
        }
        for &(name, code) in AXIS_NAMES {
            assert!((code as usize) < ABS_CNT, "{name} outside ABS_CNT");
        }
    }
}
