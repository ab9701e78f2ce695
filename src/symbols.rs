//! Configuration token resolution
//!
//! Turns the human-readable tokens of binding directives into hardware
//! codes, keysyms and raw thresholds.
//!
//! # Token syntax
//!
//! ```text
//! axis:       X, hat0y, 0x10, 16      → ABS_* code
//! button:     A, start, 0x13b, 315    → BTN_* code
//! key:        a, -, é                 → the character's keysym
//!             0xff0d                  → raw keysym
//!             Return, Enter, ctrl     → named keysym / alias
//!             none                    → no emission
//!             set2                    → secondary set selector
//! threshold:  0.5, -0.25              → fraction of 0x7fff
//!             0x4000, -0x4000         → raw axis value
//! ```

use crate::error::ConfigError;
use crate::keysym::Keysym;
use joy2key_joydev::codes;
use std::fmt;

/// Full-scale axis magnitude used to scale fractional thresholds
const AXIS_SCALE: f64 = 0x7fff as f64;

/// What a logical key is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeySymbol {
    /// Update state but emit nothing
    #[default]
    NoOp,
    /// Emit this keysym
    Key(Keysym),
    /// This logical key selects the secondary mapping set while held
    Toggle,
}

impl fmt::Display for KeySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySymbol::NoOp => write!(f, "none"),
            KeySymbol::Key(sym) => write!(f, "{sym}"),
            KeySymbol::Toggle => write!(f, "set2"),
        }
    }
}

/// Resolve an axis token to its `ABS_*` hardware code
pub fn resolve_axis(token: &str) -> Result<u16, ConfigError> {
    if starts_with_digit(token) {
        return parse_code(token);
    }
    codes::axis_code_from_name(token).ok_or_else(|| ConfigError::UnknownAxis(token.to_string()))
}

/// Resolve a button token to its `BTN_*` hardware code
pub fn resolve_button(token: &str) -> Result<u16, ConfigError> {
    if starts_with_digit(token) {
        return parse_code(token);
    }
    codes::button_code_from_name(token)
        .ok_or_else(|| ConfigError::UnknownButton(token.to_string()))
}

/// Resolve a key token
pub fn resolve_key(token: &str) -> Result<KeySymbol, ConfigError> {
    let mut chars = token.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return Keysym::from_char(ch)
            .map(KeySymbol::Key)
            .ok_or_else(|| ConfigError::UnknownKey(token.to_string()));
    }

    if let Some(hex) = strip_hex_prefix(token) {
        return digits(hex, 16)
            .and_then(|raw| u32::try_from(raw).ok())
            .map(|raw| KeySymbol::Key(Keysym::from_raw(raw)))
            .ok_or_else(|| ConfigError::InvalidNumber(token.to_string()));
    }

    if token.eq_ignore_ascii_case("none") {
        return Ok(KeySymbol::NoOp);
    }
    if token.eq_ignore_ascii_case("set2") {
        return Ok(KeySymbol::Toggle);
    }

    Keysym::from_name(token)
        .map(KeySymbol::Key)
        .ok_or_else(|| ConfigError::UnknownKey(token.to_string()))
}

/// Resolve a threshold token to a raw axis value.
///
/// Hex literals (optionally negative) are raw values. Anything else is a
/// fraction in `[-1.0, 1.0]` of full scale, rounded half away from zero.
pub fn resolve_threshold(token: &str) -> Result<i16, ConfigError> {
    let invalid = || ConfigError::InvalidThreshold(token.to_string());

    let (negative, magnitude) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };

    if let Some(hex) = strip_hex_prefix(magnitude) {
        let value = digits(hex, 16)
            .and_then(|v| i64::try_from(v).ok())
            .ok_or_else(invalid)?;
        let value = if negative { -value } else { value };
        return i16::try_from(value).map_err(|_| invalid());
    }

    let fraction: f64 = token.trim().parse().map_err(|_| invalid())?;
    if !(-1.0..=1.0).contains(&fraction) {
        return Err(invalid());
    }
    // f64::round rounds half away from zero
    Ok((fraction * AXIS_SCALE).round() as i16)
}

/// Parse an integer literal the way C's `strtoul(s, NULL, 0)` reads it:
/// `0x` hex, leading `0` octal, decimal otherwise. The whole token must be
/// consumed.
pub fn parse_int_literal(token: &str) -> Option<u64> {
    if let Some(hex) = strip_hex_prefix(token) {
        return digits(hex, 16);
    }
    if let Some(octal) = token.strip_prefix('0').filter(|rest| !rest.is_empty()) {
        return digits(octal, 8);
    }
    digits(token, 10)
}

/// Unsigned digits only; `from_str_radix` alone would take a sign
fn digits(text: &str, radix: u32) -> Option<u64> {
    if text.is_empty() || !text.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(text, radix).ok()
}

fn parse_code(token: &str) -> Result<u16, ConfigError> {
    parse_int_literal(token)
        .and_then(|v| u16::try_from(v).ok())
        .ok_or_else(|| ConfigError::InvalidNumber(token.to_string()))
}

fn starts_with_digit(token: &str) -> bool {
    token.as_bytes().first().is_some_and(u8::is_ascii_digit)
}

fn strip_hex_prefix(token: &str) -> Option<&str> {
    token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use joy2key_joydev::codes::{abs, btn};

    #[test]
    fn axis_names_and_literals() {
        assert_eq!(resolve_axis("X").unwrap(), abs::X);
        assert_eq!(resolve_axis("hat0y").unwrap(), abs::HAT0Y);
        assert_eq!(resolve_axis("0x10").unwrap(), abs::HAT0X);
        assert_eq!(resolve_axis("16").unwrap(), abs::HAT0X);
        assert_eq!(resolve_axis("020").unwrap(), abs::HAT0X);
    }

    #[test]
    fn unknown_axis_names_token() {
        let err = resolve_axis("JOG").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownAxis(ref t) if t == "JOG"));
        assert_eq!(err.to_string(), "unknown axis (JOG)");
    }

    #[test]
    fn malformed_axis_literal() {
        assert!(matches!(
            resolve_axis("0xZZ"),
            Err(ConfigError::InvalidNumber(_))
        ));
        assert!(matches!(
            resolve_axis("70000"),
            Err(ConfigError::InvalidNumber(_))
        ));
        for token in ["0x+1", "0x-1", "0x", "0+7"] {
            assert!(
                matches!(resolve_axis(token), Err(ConfigError::InvalidNumber(_))),
                "{token}"
            );
        }
    }

    #[test]
    fn signed_key_literal_rejected() {
        assert!(matches!(
            resolve_key("0x+ff0d"),
            Err(ConfigError::InvalidNumber(_))
        ));
        assert!(matches!(
            resolve_key("0x100000000"),
            Err(ConfigError::InvalidNumber(_))
        ));
    }

    #[test]
    fn button_names_and_literals() {
        assert_eq!(resolve_button("a").unwrap(), btn::A);
        assert_eq!(resolve_button("Select").unwrap(), btn::SELECT);
        assert_eq!(resolve_button("0x13b").unwrap(), btn::START);
        assert_eq!(resolve_button("304").unwrap(), btn::A);
        assert!(matches!(
            resolve_button("Fire"),
            Err(ConfigError::UnknownButton(_))
        ));
    }

    #[test]
    fn single_character_keys() {
        assert_eq!(
            resolve_key("a").unwrap(),
            KeySymbol::Key(Keysym::from_raw(b'a' as u32))
        );
        assert_eq!(
            resolve_key("1").unwrap(),
            KeySymbol::Key(Keysym::from_raw(b'1' as u32))
        );
        assert_eq!(
            resolve_key("-").unwrap(),
            KeySymbol::Key(Keysym::from_raw(b'-' as u32))
        );
    }

    #[test]
    fn named_keys_and_aliases() {
        assert_eq!(resolve_key("Return").unwrap(), KeySymbol::Key(Keysym::RETURN));
        assert_eq!(resolve_key("enter").unwrap(), KeySymbol::Key(Keysym::RETURN));
        assert_eq!(resolve_key("Esc").unwrap(), KeySymbol::Key(Keysym::ESCAPE));
        assert_eq!(resolve_key("Ctrl").unwrap(), KeySymbol::Key(Keysym::CONTROL_L));
        assert_eq!(resolve_key("0xff51").unwrap(), KeySymbol::Key(Keysym::LEFT));
    }

    #[test]
    fn special_key_tokens() {
        assert_eq!(resolve_key("none").unwrap(), KeySymbol::NoOp);
        assert_eq!(resolve_key("NONE").unwrap(), KeySymbol::NoOp);
        assert_eq!(resolve_key("set2").unwrap(), KeySymbol::Toggle);
    }

    #[test]
    fn unknown_key() {
        let err = resolve_key("Hyper").unwrap_err();
        assert_eq!(err.to_string(), "unknown key (Hyper)");
        // multi-digit decimal is not a key literal
        assert!(matches!(resolve_key("10"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn threshold_fractions() {
        assert_eq!(resolve_threshold("0.5").unwrap(), 16384);
        assert_eq!(resolve_threshold("-0.5").unwrap(), -16384);
        assert_eq!(resolve_threshold("1").unwrap(), 0x7fff);
        assert_eq!(resolve_threshold("-1.0").unwrap(), -0x7fff);
        assert_eq!(resolve_threshold("0").unwrap(), 0);
    }

    #[test]
    fn threshold_hex() {
        assert_eq!(resolve_threshold("0x1000").unwrap(), 4096);
        assert_eq!(resolve_threshold("-0x4000").unwrap(), -0x4000);
        assert_eq!(resolve_threshold("0X7fff").unwrap(), 0x7fff);
    }

    #[test]
    fn threshold_out_of_range() {
        assert!(matches!(
            resolve_threshold("1.5"),
            Err(ConfigError::InvalidThreshold(_))
        ));
        assert!(matches!(
            resolve_threshold("0x8000"),
            Err(ConfigError::InvalidThreshold(_))
        ));
        assert!(matches!(
            resolve_threshold("half"),
            Err(ConfigError::InvalidThreshold(_))
        ));
        for token in ["0x-10", "-0x-10", "0x+10", "-0x", "--0x10"] {
            assert!(
                matches!(resolve_threshold(token), Err(ConfigError::InvalidThreshold(_))),
                "{token}"
            );
        }
    }

    #[test]
    fn int_literal_bases() {
        assert_eq!(parse_int_literal("0"), Some(0));
        assert_eq!(parse_int_literal("42"), Some(42));
        assert_eq!(parse_int_literal("0x2a"), Some(42));
        assert_eq!(parse_int_literal("052"), Some(42));
        assert_eq!(parse_int_literal("09"), None);
        assert_eq!(parse_int_literal("4x"), None);
        assert_eq!(parse_int_literal("0+7"), None);
        assert_eq!(parse_int_literal("0x+10"), None);
        assert_eq!(parse_int_literal("0x-10"), None);
        assert_eq!(parse_int_literal("+7"), None);
        assert_eq!(parse_int_literal("0x"), None);
    }
}
