//! Raw event → logical key transitions

use crate::layout::{KeyLayout, LogicalKey};
use crate::mapping::ThresholdTable;
use joy2key_joydev::{EventKind, JsEvent};

/// The `(logical key, pressed)` results of one raw event: zero, one or two.
#[derive(Debug, Clone)]
pub struct Transitions {
    items: [Option<(LogicalKey, bool)>; 2],
    next: usize,
}

impl Transitions {
    fn none() -> Self {
        Self {
            items: [None, None],
            next: 0,
        }
    }

    fn one(key: LogicalKey, pressed: bool) -> Self {
        Self {
            items: [Some((key, pressed)), None],
            next: 0,
        }
    }

    fn two(first: (LogicalKey, bool), second: (LogicalKey, bool)) -> Self {
        Self {
            items: [Some(first), Some(second)],
            next: 0,
        }
    }
}

impl Iterator for Transitions {
    type Item = (LogicalKey, bool);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.items.get_mut(self.next)?.take();
        self.next += 1;
        item
    }
}

/// Convert one raw event into digital transitions.
///
/// Buttons map to their own logical key; values other than 0/1 are
/// dropped. An axis event always yields both of its digital keys:
/// low is active at or below the low threshold, high at or above the high
/// threshold, so a value inside the deadzone releases both. Out-of-range
/// ordinals, unknown event types and the kernel's initial-state burst
/// yield nothing.
pub fn normalize(layout: &KeyLayout, thresholds: &ThresholdTable, event: &JsEvent) -> Transitions {
    if event.init {
        return Transitions::none();
    }

    let number = event.number as usize;
    match event.kind {
        EventKind::Button => match layout.button(number) {
            Some(key) if event.value & !1 == 0 => Transitions::one(key, event.value != 0),
            _ => Transitions::none(),
        },
        EventKind::Axis => {
            let (Some(low_key), Some(high_key), Some(thr)) = (
                layout.axis_low(number),
                layout.axis_high(number),
                thresholds.get(number),
            ) else {
                return Transitions::none();
            };
            Transitions::two(
                (low_key, event.value <= thr.low),
                (high_key, event.value >= thr.high),
            )
        }
        EventKind::Other(_) => Transitions::none(),
    }
}
