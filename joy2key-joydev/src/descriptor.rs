//! Probed device capabilities

/// Axis and button layout of an opened joystick.
///
/// `axis_codes[i]` is the hardware code (`ABS_*`) of ordinal axis `i`,
/// `button_codes[i]` the code (`BTN_*`) of ordinal button `i`. Ordinals are
/// what event records carry in their `number` field. Built once at probe
/// time and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceDescriptor {
    axis_codes: Vec<u16>,
    button_codes: Vec<u16>,
}

impl DeviceDescriptor {
    pub fn new(axis_codes: Vec<u16>, button_codes: Vec<u16>) -> Self {
        Self {
            axis_codes,
            button_codes,
        }
    }

    pub fn axis_count(&self) -> usize {
        self.axis_codes.len()
    }

    pub fn button_count(&self) -> usize {
        self.button_codes.len()
    }

    pub fn axis_codes(&self) -> &[u16] {
        &self.axis_codes
    }

    pub fn button_codes(&self) -> &[u16] {
        &self.button_codes
    }

    /// Ordinal index of the first axis with this hardware code
    pub fn axis_index(&self, code: u16) -> Option<usize> {
        self.axis_codes.iter().position(|&c| c == code)
    }

    /// Ordinal index of the first button with this hardware code
    pub fn button_index(&self, code: u16) -> Option<usize> {
        self.button_codes.iter().position(|&c| c == code)
    }
}
