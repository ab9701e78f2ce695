//! Mapping table construction
//!
//! Directives are resolved in two steps:
//!
//! 1. [`ResolvedDirectives::resolve`] turns every token into a hardware code,
//!    key symbol or threshold. This needs no device, so configuration errors
//!    surface before anything is opened.
//! 2. [`MappingTables::build`] matches resolved hardware codes against the
//!    probed [`DeviceDescriptor`] and fills the primary/secondary tables and
//!    the threshold table. Directives for codes the device does not have are
//!    skipped.
//!
//! When several directives in one list name the same code, the first wins.

use crate::config::{AxisBinding, ButtonBinding, Directives, ThresholdOverride};
use crate::error::ConfigError;
use crate::keysym::Keysym;
use crate::layout::{KeyLayout, LogicalKey};
use crate::symbols::{self, KeySymbol};
use joy2key_joydev::{codes, DeviceDescriptor};
use std::fmt;
use tracing::{debug, warn};

/// Default axis thresholds (half deflection)
pub const DEFAULT_LOW_THRESHOLD: i16 = -0x4000;
pub const DEFAULT_HIGH_THRESHOLD: i16 = 0x4000;

/// Which mapping table governs a press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MappingSet {
    #[default]
    Primary,
    Secondary,
}

impl fmt::Display for MappingSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingSet::Primary => write!(f, "primary"),
            MappingSet::Secondary => write!(f, "secondary"),
        }
    }
}

/// Logical key → keysym. Unbound keys emit nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTable {
    symbols: Vec<Option<Keysym>>,
}

impl MappingTable {
    fn unbound(len: usize) -> Self {
        Self {
            symbols: vec![None; len],
        }
    }

    pub fn get(&self, key: LogicalKey) -> Option<Keysym> {
        self.symbols.get(key.index()).copied().flatten()
    }

    fn set(&mut self, key: LogicalKey, sym: Keysym) {
        if let Some(slot) = self.symbols.get_mut(key.index()) {
            *slot = Some(sym);
        }
    }
}

/// Low/high boundary pair for one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdPair {
    pub low: i16,
    pub high: i16,
}

impl Default for ThresholdPair {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW_THRESHOLD,
            high: DEFAULT_HIGH_THRESHOLD,
        }
    }
}

/// Per-axis thresholds, indexed by ordinal axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdTable {
    pairs: Vec<ThresholdPair>,
}

impl ThresholdTable {
    pub fn get(&self, axis: usize) -> Option<ThresholdPair> {
        self.pairs.get(axis).copied()
    }
}

/// Resolved bindings for one mapping set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSet {
    /// `(button code, symbol)`
    pub buttons: Vec<(u16, KeySymbol)>,
    /// `(axis code, low symbol, high symbol)`
    pub axes: Vec<(u16, KeySymbol, KeySymbol)>,
}

/// All directives with their tokens resolved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedDirectives {
    pub primary: ResolvedSet,
    pub secondary: ResolvedSet,
    /// `(axis code, thresholds)`
    pub thresholds: Vec<(u16, ThresholdPair)>,
}

impl ResolvedDirectives {
    /// Resolve every token. The first failing token aborts with its error.
    pub fn resolve(directives: &Directives) -> Result<Self, ConfigError> {
        let thresholds = directives
            .thresholds
            .iter()
            .flatten()
            .map(resolve_threshold_override)
            .collect::<Result<_, _>>()?;

        Ok(Self {
            primary: resolve_set(
                directives.primary.buttons.as_deref(),
                directives.primary.axes.as_deref(),
            )?,
            secondary: resolve_set(
                directives.secondary.buttons.as_deref(),
                directives.secondary.axes.as_deref(),
            )?,
            thresholds,
        })
    }
}

fn resolve_set(
    buttons: Option<&[ButtonBinding]>,
    axes: Option<&[AxisBinding]>,
) -> Result<ResolvedSet, ConfigError> {
    let buttons = buttons
        .unwrap_or_default()
        .iter()
        .map(|b| -> Result<_, ConfigError> {
            Ok((symbols::resolve_button(&b.button)?, symbols::resolve_key(&b.key)?))
        })
        .collect::<Result<_, _>>()?;
    let axes = axes
        .unwrap_or_default()
        .iter()
        .map(|a| -> Result<_, ConfigError> {
            Ok((
                symbols::resolve_axis(&a.axis)?,
                symbols::resolve_key(&a.low)?,
                symbols::resolve_key(&a.high)?,
            ))
        })
        .collect::<Result<_, _>>()?;
    Ok(ResolvedSet { buttons, axes })
}

fn resolve_threshold_override(t: &ThresholdOverride) -> Result<(u16, ThresholdPair), ConfigError> {
    Ok((
        symbols::resolve_axis(&t.axis)?,
        ThresholdPair {
            low: symbols::resolve_threshold(&t.low)?,
            high: symbols::resolve_threshold(&t.high)?,
        },
    ))
}

/// Immutable lookup tables handed to the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTables {
    layout: KeyLayout,
    primary: MappingTable,
    secondary: MappingTable,
    thresholds: ThresholdTable,
    toggle: Option<LogicalKey>,
}

impl MappingTables {
    /// Build the tables for a probed device
    pub fn build(desc: &DeviceDescriptor, resolved: &ResolvedDirectives) -> Self {
        let layout = KeyLayout::from_descriptor(desc);
        let mut builder = Builder {
            layout,
            toggle: None,
        };

        let primary = builder.table(desc, &resolved.primary, MappingSet::Primary);
        let secondary = builder.table(desc, &resolved.secondary, MappingSet::Secondary);

        let pairs = desc
            .axis_codes()
            .iter()
            .map(|&code| {
                resolved
                    .thresholds
                    .iter()
                    .find(|(c, _)| *c == code)
                    .map(|&(_, pair)| pair)
                    .unwrap_or_default()
            })
            .collect();
        for &(code, _) in &resolved.thresholds {
            if desc.axis_index(code).is_none() {
                debug!("Threshold for axis {} ignored: not on this device", axis_label(code));
            }
        }

        Self {
            layout,
            primary,
            secondary,
            thresholds: ThresholdTable { pairs },
            toggle: builder.toggle,
        }
    }

    pub fn layout(&self) -> KeyLayout {
        self.layout
    }

    pub fn table(&self, set: MappingSet) -> &MappingTable {
        match set {
            MappingSet::Primary => &self.primary,
            MappingSet::Secondary => &self.secondary,
        }
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    /// Logical key whose held state selects the secondary set
    pub fn toggle(&self) -> Option<LogicalKey> {
        self.toggle
    }
}

struct Builder {
    layout: KeyLayout,
    toggle: Option<LogicalKey>,
}

impl Builder {
    fn table(&mut self, desc: &DeviceDescriptor, set: &ResolvedSet, which: MappingSet) -> MappingTable {
        let mut table = MappingTable::unbound(self.layout.len());

        for (i, &code) in desc.axis_codes().iter().enumerate() {
            let Some(&(_, low, high)) = set.axes.iter().find(|(c, _, _)| *c == code) else {
                continue;
            };
            if let Some(key) = self.layout.axis_low(i) {
                self.bind(&mut table, key, low, which);
            }
            if let Some(key) = self.layout.axis_high(i) {
                self.bind(&mut table, key, high, which);
            }
        }

        for (i, &code) in desc.button_codes().iter().enumerate() {
            let Some(&(_, sym)) = set.buttons.iter().find(|(c, _)| *c == code) else {
                continue;
            };
            if let Some(key) = self.layout.button(i) {
                self.bind(&mut table, key, sym, which);
            }
        }

        for &(code, ..) in &set.axes {
            if desc.axis_index(code).is_none() {
                debug!("{which} binding for axis {} ignored: not on this device", axis_label(code));
            }
        }
        for &(code, _) in &set.buttons {
            if desc.button_index(code).is_none() {
                debug!(
                    "{which} binding for button {} ignored: not on this device",
                    button_label(code)
                );
            }
        }

        table
    }

    fn bind(&mut self, table: &mut MappingTable, key: LogicalKey, sym: KeySymbol, which: MappingSet) {
        match sym {
            KeySymbol::NoOp => {}
            KeySymbol::Key(keysym) => table.set(key, keysym),
            KeySymbol::Toggle => match self.toggle {
                None => self.toggle = Some(key),
                Some(existing) if existing == key => {}
                Some(existing) => warn!(
                    "Ignoring extra set2 binding on {:?} in {which} set; {:?} already selects the secondary set",
                    self.layout.kind(key),
                    self.layout.kind(existing)
                ),
            },
        }
    }
}

fn axis_label(code: u16) -> String {
    match codes::axis_name(code) {
        Some(name) => name.to_string(),
        None => format!("0x{code:02x}"),
    }
}

fn button_label(code: u16) -> String {
    match codes::button_name(code) {
        Some(name) => name.to_string(),
        None => format!("0x{code:03x}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BindingSet;
    use joy2key_joydev::codes::{abs, btn};

    fn pad() -> DeviceDescriptor {
        // 2 axes (X, Y) and 3 buttons (A, B, START)
        DeviceDescriptor::new(vec![abs::X, abs::Y], vec![btn::A, btn::B, btn::START])
    }

    fn build(directives: Directives) -> MappingTables {
        let resolved = ResolvedDirectives::resolve(&directives).unwrap();
        MappingTables::build(&pad(), &resolved)
    }

    #[test]
    fn unconfigured_keys_are_unbound() {
        let tables = build(Directives::default());
        for k in tables.layout().keys() {
            assert_eq!(tables.table(MappingSet::Primary).get(k), None);
            assert_eq!(tables.table(MappingSet::Secondary).get(k), None);
        }
        assert_eq!(tables.toggle(), None);
    }

    #[test]
    fn buttons_and_axes_land_at_flattened_indices() {
        let tables = build(Directives {
            primary: BindingSet {
                buttons: Some(vec![ButtonBinding::new("START", "Escape")]),
                axes: Some(vec![AxisBinding::new("Y", "Up", "Down")]),
            },
            ..Default::default()
        });
        let layout = tables.layout();
        let primary = tables.table(MappingSet::Primary);
        assert_eq!(primary.get(layout.button(2).unwrap()), Some(Keysym::ESCAPE));
        assert_eq!(primary.get(layout.button(0).unwrap()), None);
        // Y is ordinal axis 1: logical keys 3 + 2 and 3 + 3
        assert_eq!(layout.axis_low(1).unwrap().index(), 5);
        assert_eq!(primary.get(layout.axis_low(1).unwrap()), Some(Keysym::UP));
        assert_eq!(primary.get(layout.axis_high(1).unwrap()), Some(Keysym::DOWN));
        assert_eq!(primary.get(layout.axis_low(0).unwrap()), None);
    }

    #[test]
    fn sets_are_independent() {
        let tables = build(Directives {
            primary: BindingSet {
                buttons: Some(vec![ButtonBinding::new("A", "a")]),
                axes: None,
            },
            secondary: BindingSet {
                buttons: Some(vec![ButtonBinding::new("A", "b")]),
                axes: None,
            },
            ..Default::default()
        });
        let a = tables.layout().button(0).unwrap();
        assert_eq!(
            tables.table(MappingSet::Primary).get(a),
            Some(Keysym::from_raw(b'a' as u32))
        );
        assert_eq!(
            tables.table(MappingSet::Secondary).get(a),
            Some(Keysym::from_raw(b'b' as u32))
        );
    }

    #[test]
    fn absent_hardware_codes_are_ignored() {
        let tables = build(Directives {
            primary: BindingSet {
                buttons: Some(vec![ButtonBinding::new("MODE", "Return")]),
                axes: Some(vec![AxisBinding::new("HAT0X", "Left", "Right")]),
            },
            ..Default::default()
        });
        let primary = tables.table(MappingSet::Primary);
        assert!(tables.layout().keys().all(|k| primary.get(k).is_none()));
    }

    #[test]
    fn first_matching_directive_wins() {
        let tables = build(Directives {
            primary: BindingSet {
                buttons: Some(vec![
                    ButtonBinding::new("B", "Return"),
                    ButtonBinding::new("B", "Escape"),
                ]),
                axes: None,
            },
            ..Default::default()
        });
        let b = tables.layout().button(1).unwrap();
        assert_eq!(tables.table(MappingSet::Primary).get(b), Some(Keysym::RETURN));
    }

    #[test]
    fn set2_records_toggle_not_mapping() {
        let tables = build(Directives {
            primary: BindingSet {
                buttons: Some(vec![ButtonBinding::new("B", "set2")]),
                axes: None,
            },
            ..Default::default()
        });
        let b = tables.layout().button(1).unwrap();
        assert_eq!(tables.toggle(), Some(b));
        assert_eq!(tables.table(MappingSet::Primary).get(b), None);
    }

    #[test]
    fn first_toggle_wins() {
        let tables = build(Directives {
            primary: BindingSet {
                buttons: Some(vec![ButtonBinding::new("B", "set2")]),
                axes: Some(vec![AxisBinding::new("X", "set2", "none")]),
            },
            ..Default::default()
        });
        // axes are visited before buttons
        assert_eq!(tables.toggle(), tables.layout().axis_low(0));
    }

    #[test]
    fn thresholds_default_and_override() {
        let tables = build(Directives {
            thresholds: Some(vec![ThresholdOverride::new("Y", "-0.5", "0x1000")]),
            ..Default::default()
        });
        assert_eq!(tables.thresholds().get(0), Some(ThresholdPair::default()));
        assert_eq!(
            tables.thresholds().get(1),
            Some(ThresholdPair {
                low: -16384,
                high: 4096
            })
        );
        assert_eq!(tables.thresholds().get(2), None);
    }

    #[test]
    fn resolve_reports_first_bad_token() {
        let directives = Directives {
            secondary: BindingSet {
                buttons: None,
                axes: Some(vec![AxisBinding::new("X", "Left", "Sideways")]),
            },
            ..Default::default()
        };
        let err = ResolvedDirectives::resolve(&directives).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(ref t) if t == "Sideways"));
    }

    #[test]
    fn resolve_checks_lists_for_absent_axes_too() {
        // Tokens are validated even if they would never match this device
        let directives = Directives {
            thresholds: Some(vec![ThresholdOverride::new("HAT3Y", "bogus", "0.5")]),
            ..Default::default()
        };
        assert!(matches!(
            ResolvedDirectives::resolve(&directives),
            Err(ConfigError::InvalidThreshold(_))
        ));
    }
}
