//! Binding directives and the config file
//!
//! Directives are unresolved token records; [`crate::mapping`] resolves and
//! applies them. They come from the command line (flat token lists grouped
//! into records) and/or a TOML file:
//!
//! ```toml
//! device = "/dev/input/js0"
//! verbose = 1
//!
//! [[primary.buttons]]
//! button = "A"
//! key = "Return"
//!
//! [[primary.axes]]
//! axis = "X"
//! low = "Left"
//! high = "Right"
//!
//! [[thresholds]]
//! axis = "X"
//! low = -0.3
//! high = 0.3
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

/// `button → key`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonBinding {
    #[serde(deserialize_with = "deserialize_token")]
    pub button: String,
    #[serde(deserialize_with = "deserialize_token")]
    pub key: String,
}

/// `axis → (low key, high key)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisBinding {
    #[serde(deserialize_with = "deserialize_token")]
    pub axis: String,
    #[serde(deserialize_with = "deserialize_token")]
    pub low: String,
    #[serde(deserialize_with = "deserialize_token")]
    pub high: String,
}

/// `axis → (low threshold, high threshold)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdOverride {
    #[serde(deserialize_with = "deserialize_token")]
    pub axis: String,
    #[serde(deserialize_with = "deserialize_token")]
    pub low: String,
    #[serde(deserialize_with = "deserialize_token")]
    pub high: String,
}

impl ButtonBinding {
    pub fn new(button: &str, key: &str) -> Self {
        Self {
            button: button.to_string(),
            key: key.to_string(),
        }
    }

    /// Group `BTN KEY BTN KEY ...`
    pub fn from_tokens(list: &'static str, tokens: &[String]) -> Result<Vec<Self>, ConfigError> {
        Ok(groups::<2>(list, tokens)?
            .map(|[button, key]| Self::new(button, key))
            .collect())
    }
}

impl AxisBinding {
    pub fn new(axis: &str, low: &str, high: &str) -> Self {
        Self {
            axis: axis.to_string(),
            low: low.to_string(),
            high: high.to_string(),
        }
    }

    /// Group `AXIS KEY KEY AXIS KEY KEY ...`
    pub fn from_tokens(list: &'static str, tokens: &[String]) -> Result<Vec<Self>, ConfigError> {
        Ok(groups::<3>(list, tokens)?
            .map(|[axis, low, high]| Self::new(axis, low, high))
            .collect())
    }
}

impl ThresholdOverride {
    pub fn new(axis: &str, low: &str, high: &str) -> Self {
        Self {
            axis: axis.to_string(),
            low: low.to_string(),
            high: high.to_string(),
        }
    }

    /// Group `AXIS THR THR AXIS THR THR ...`
    pub fn from_tokens(list: &'static str, tokens: &[String]) -> Result<Vec<Self>, ConfigError> {
        Ok(groups::<3>(list, tokens)?
            .map(|[axis, low, high]| Self::new(axis, low, high))
            .collect())
    }
}

fn groups<'a, const N: usize>(
    list: &'static str,
    tokens: &'a [String],
) -> Result<impl Iterator<Item = [&'a str; N]> + 'a, ConfigError> {
    if tokens.len() % N != 0 {
        return Err(ConfigError::IncompleteDirective {
            list,
            group: N,
            count: tokens.len(),
        });
    }
    Ok(tokens
        .chunks_exact(N)
        .map(|chunk| std::array::from_fn(|i| chunk[i].as_str())))
}

/// Bindings for one mapping set. `None` means the list was not given at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<ButtonBinding>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axes: Option<Vec<AxisBinding>>,
}

/// Every directive list the engine consumes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    pub primary: BindingSet,
    pub secondary: BindingSet,
    pub thresholds: Option<Vec<ThresholdOverride>>,
}

impl Directives {
    /// Combine two sources. Each list may come from at most one of them.
    pub fn merge(self, other: Directives) -> Result<Directives, ConfigError> {
        Ok(Directives {
            primary: BindingSet {
                buttons: exclusive("--buttons", self.primary.buttons, other.primary.buttons)?,
                axes: exclusive("--axes", self.primary.axes, other.primary.axes)?,
            },
            secondary: BindingSet {
                buttons: exclusive("--buttons2", self.secondary.buttons, other.secondary.buttons)?,
                axes: exclusive("--axes2", self.secondary.axes, other.secondary.axes)?,
            },
            thresholds: exclusive("--axes_thr", self.thresholds, other.thresholds)?,
        })
    }
}

fn exclusive<T>(list: &'static str, a: Option<T>, b: Option<T>) -> Result<Option<T>, ConfigError> {
    match (a, b) {
        (Some(_), Some(_)) => Err(ConfigError::DuplicateDirective(list)),
        (a, b) => Ok(a.or(b)),
    }
}

/// On-disk configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Joystick device node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<PathBuf>,
    /// X11 display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    /// Verbosity level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbose: Option<u8>,
    #[serde(default)]
    pub primary: BindingSet,
    #[serde(default)]
    pub secondary: BindingSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<Vec<ThresholdOverride>>,
}

impl ConfigFile {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("joy2key")
            .join("config.toml")
    }

    /// Load a config file. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a config file, or return an empty config if it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn directives(&self) -> Directives {
        Directives {
            primary: self.primary.clone(),
            secondary: self.secondary.clone(),
            thresholds: self.thresholds.clone(),
        }
    }
}

/// Deserialize a token from a string, integer or float.
///
/// Integers become hex literals (`0x61`, `-0x4000`) so that the resolvers
/// read them as raw codes; floats keep their decimal form (threshold
/// fractions).
fn deserialize_token<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TokenRepr {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match TokenRepr::deserialize(d)? {
        TokenRepr::Text(s) => s,
        TokenRepr::Int(n) if n < 0 => format!("-{:#x}", n.unsigned_abs()),
        TokenRepr::Int(n) => format!("{n:#x}"),
        TokenRepr::Float(f) => f.to_string(),
    })
}
