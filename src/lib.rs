//! Joystick to keyboard translation
//!
//! Reads Linux joystick events, turns buttons and axis directions into
//! edge-triggered logical keys, and synthesizes the mapped key presses on
//! an X display. Two mapping sets are supported; the secondary one is
//! active for new presses while the `set2` key is held.

pub mod config;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod keysym;
pub mod layout;
pub mod mapping;
pub mod normalize;
pub mod raw;
pub mod symbols;
#[cfg(feature = "x11")]
pub mod x11;

pub use config::{AxisBinding, BindingSet, ButtonBinding, ConfigFile, Directives, ThresholdOverride};
pub use emitter::KeyEmitter;
pub use engine::{Engine, KeyEvent, KeyState};
pub use error::{ConfigError, EmitError, RunError};
pub use keysym::Keysym;
pub use layout::{KeyKind, KeyLayout, LogicalKey};
pub use mapping::{MappingSet, MappingTables, ResolvedDirectives, ThresholdPair};
pub use symbols::KeySymbol;
#[cfg(feature = "x11")]
pub use x11::X11Emitter;
