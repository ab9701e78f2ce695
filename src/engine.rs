//! Debounce and dispatch state machine
//!
//! Every logical key carries its current pressed state and the mapping set
//! that was active when it was last pressed. Only transitions are
//! dispatched. A release is always looked up in the set recorded at the
//! matching press, so flipping the set selector while a key is held cannot
//! leave a synthetic key stuck down.

use crate::emitter::KeyEmitter;
use crate::error::{EmitError, RunError};
use crate::keysym::Keysym;
use crate::layout::LogicalKey;
use crate::mapping::{MappingSet, MappingTables};
use crate::normalize::{normalize, Transitions};
use joy2key_joydev::{EventSource, JsEvent};
use std::convert::Infallible;
use tracing::{debug, trace};

/// Per-logical-key state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyState {
    pub pressed: bool,
    /// Set used for the current press. Meaningful only while `pressed`.
    pub set_at_press: MappingSet,
}

/// A key event to synthesize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub keysym: Keysym,
    pub pressed: bool,
}

/// Translation engine context: immutable tables plus mutable key state.
///
/// Single-threaded; events must be fed in arrival order.
pub struct Engine {
    tables: MappingTables,
    states: Vec<KeyState>,
}

impl Engine {
    pub fn new(tables: MappingTables) -> Self {
        let states = vec![KeyState::default(); tables.layout().len()];
        Self { tables, states }
    }

    pub fn tables(&self) -> &MappingTables {
        &self.tables
    }

    /// Current state of a logical key (released if out of range)
    pub fn state(&self, key: LogicalKey) -> KeyState {
        self.states.get(key.index()).copied().unwrap_or_default()
    }

    /// Set that a press occurring now would use
    pub fn active_set(&self) -> MappingSet {
        match self.tables.toggle() {
            Some(toggle) if self.state(toggle).pressed => MappingSet::Secondary,
            _ => MappingSet::Primary,
        }
    }

    /// Digital transitions for one raw event (see [`normalize`])
    pub fn normalize(&self, event: &JsEvent) -> Transitions {
        normalize(&self.tables.layout(), self.tables.thresholds(), event)
    }

    /// Apply one transition and return the key event to emit, if any.
    ///
    /// Repeating the current state is a no-op. The state is updated even when
    /// the key is unbound, which is how bindings that only move the set
    /// selector work.
    pub fn apply(&mut self, key: LogicalKey, pressed: bool) -> Option<KeyEvent> {
        let index = key.index();
        let current = self.states.get(index)?;
        if current.pressed == pressed {
            return None;
        }
        self.states[index].pressed = pressed;

        let set = if pressed {
            let set = self.active_set();
            self.states[index].set_at_press = set;
            set
        } else {
            self.states[index].set_at_press
        };

        let keysym = self.tables.table(set).get(key);
        let kind = self.tables.layout().kind(key);
        let state = if pressed { "down" } else { "up" };
        match keysym {
            Some(sym) => debug!("{kind}, {state}, key = {sym} (0x{:x}), {set}", sym.raw()),
            None => debug!("{kind}, {state}"),
        }

        keysym.map(|keysym| KeyEvent { keysym, pressed })
    }

    /// Normalize one raw event and emit whatever it dispatches
    pub fn handle_event<E: KeyEmitter + ?Sized>(
        &mut self,
        event: &JsEvent,
        emitter: &mut E,
    ) -> Result<(), EmitError> {
        let mut mapped = false;
        for (key, pressed) in self.normalize(event) {
            mapped = true;
            if let Some(ev) = self.apply(key, pressed) {
                emitter.emit(ev.keysym, ev.pressed)?;
            }
        }
        if !mapped {
            trace!("Ignored {event:?}");
        }
        Ok(())
    }

    /// Process events until the source or the emitter fails.
    ///
    /// There is no clean exit; a disconnect surfaces as
    /// `RunError::Device(DeviceError::Disconnected)`.
    pub fn run<S, E>(&mut self, source: &mut S, emitter: &mut E) -> Result<Infallible, RunError>
    where
        S: EventSource + ?Sized,
        E: KeyEmitter + ?Sized,
    {
        loop {
            let event = source.next_event()?;
            self.handle_event(&event, emitter)?;
        }
    }
}
