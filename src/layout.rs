//! Logical key index space
//!
//! Buttons and axis directions are flattened into one dense index range so
//! the dispatcher can treat them uniformly:
//!
//! ```text
//! [0, buttons)                          physical buttons
//! buttons + 2*i                         axis i, low side  (value <= low threshold)
//! buttons + 2*i + 1                     axis i, high side (value >= high threshold)
//! ```

use joy2key_joydev::DeviceDescriptor;
use std::fmt;

/// Index into the logical key space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogicalKey(usize);

impl LogicalKey {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// What a logical key stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Button(usize),
    AxisLow(usize),
    AxisHigh(usize),
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Button(n) => write!(f, "button = {n}"),
            KeyKind::AxisLow(n) => write!(f, "axis_min = {n}"),
            KeyKind::AxisHigh(n) => write!(f, "axis_max = {n}"),
        }
    }
}

/// Shape of the logical key space for one device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyLayout {
    buttons: usize,
    axes: usize,
}

impl KeyLayout {
    pub fn new(buttons: usize, axes: usize) -> Self {
        Self { buttons, axes }
    }

    pub fn from_descriptor(desc: &DeviceDescriptor) -> Self {
        Self::new(desc.button_count(), desc.axis_count())
    }

    pub fn buttons(&self) -> usize {
        self.buttons
    }

    pub fn axes(&self) -> usize {
        self.axes
    }

    /// Total number of logical keys
    pub fn len(&self) -> usize {
        self.buttons + 2 * self.axes
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn button(&self, n: usize) -> Option<LogicalKey> {
        (n < self.buttons).then_some(LogicalKey(n))
    }

    pub fn axis_low(&self, axis: usize) -> Option<LogicalKey> {
        (axis < self.axes).then_some(LogicalKey(self.buttons + 2 * axis))
    }

    pub fn axis_high(&self, axis: usize) -> Option<LogicalKey> {
        (axis < self.axes).then_some(LogicalKey(self.buttons + 2 * axis + 1))
    }

    pub fn kind(&self, key: LogicalKey) -> KeyKind {
        match key.0.checked_sub(self.buttons) {
            None => KeyKind::Button(key.0),
            Some(offset) if offset & 1 == 0 => KeyKind::AxisLow(offset >> 1),
            Some(offset) => KeyKind::AxisHigh(offset >> 1),
        }
    }

    /// Iterate every logical key in index order
    pub fn keys(&self) -> impl Iterator<Item = LogicalKey> {
        (0..self.len()).map(LogicalKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattening() {
        let layout = KeyLayout::new(3, 2);
        assert_eq!(layout.len(), 7);
        assert_eq!(layout.button(2).map(LogicalKey::index), Some(2));
        assert_eq!(layout.button(3), None);
        assert_eq!(layout.axis_low(0).map(LogicalKey::index), Some(3));
        assert_eq!(layout.axis_high(0).map(LogicalKey::index), Some(4));
        assert_eq!(layout.axis_low(1).map(LogicalKey::index), Some(5));
        assert_eq!(layout.axis_high(1).map(LogicalKey::index), Some(6));
        assert_eq!(layout.axis_high(2), None);
    }

    #[test]
    fn kind_inverts_flattening() {
        let layout = KeyLayout::new(3, 2);
        for key in layout.keys() {
            let back = match layout.kind(key) {
                KeyKind::Button(n) => layout.button(n),
                KeyKind::AxisLow(a) => layout.axis_low(a),
                KeyKind::AxisHigh(a) => layout.axis_high(a),
            };
            assert_eq!(back, Some(key));
        }
    }

    #[test]
    fn kind_display() {
        let layout = KeyLayout::new(1, 1);
        assert_eq!(layout.kind(LogicalKey(0)).to_string(), "button = 0");
        assert_eq!(layout.kind(LogicalKey(1)).to_string(), "axis_min = 0");
        assert_eq!(layout.kind(LogicalKey(2)).to_string(), "axis_max = 0");
    }
}
