//! Config file loading and merging with command-line directives.

use joy2key::config::{BindingSet, ButtonBinding, ConfigFile, Directives};
use joy2key::engine::Engine;
use joy2key::mapping::{MappingTables, ResolvedDirectives};
use joy2key::{ConfigError, Keysym, ThresholdPair};
use joy2key_joydev::codes::{abs, btn};
use joy2key_joydev::DeviceDescriptor;
use std::path::PathBuf;

const SAMPLE: &str = r#"
device = "/dev/input/js1"
display = ":0"
verbose = 2

[[primary.buttons]]
button = "START"
key = "Escape"

[[primary.buttons]]
button = 0x130
key = 0x61

[[primary.axes]]
axis = "HAT0X"
low = "Left"
high = "Right"

[[secondary.buttons]]
button = "SOUTH"
key = "b"

[[thresholds]]
axis = "HAT0X"
low = -0.3
high = 0x2000
"#;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("joy2key-{}-{name}.toml", std::process::id()))
}

#[test]
fn sample_resolves() {
    let config: ConfigFile = toml::from_str(SAMPLE).unwrap();
    assert_eq!(config.device, Some(PathBuf::from("/dev/input/js1")));
    assert_eq!(config.display.as_deref(), Some(":0"));
    assert_eq!(config.verbose, Some(2));

    let resolved = ResolvedDirectives::resolve(&config.directives()).unwrap();
    assert_eq!(
        resolved.thresholds,
        vec![(abs::HAT0X, ThresholdPair { low: -9830, high: 0x2000 })]
    );

    let desc = DeviceDescriptor::new(vec![abs::HAT0X], vec![btn::A, btn::START]);
    let tables = MappingTables::build(&desc, &resolved);
    let engine = Engine::new(tables);
    let layout = engine.tables().layout();
    let primary = engine.tables().table(joy2key::MappingSet::Primary);
    let secondary = engine.tables().table(joy2key::MappingSet::Secondary);

    assert_eq!(primary.get(layout.button(0).unwrap()), Keysym::from_char('a'));
    assert_eq!(primary.get(layout.button(1).unwrap()), Some(Keysym::ESCAPE));
    assert_eq!(primary.get(layout.axis_low(0).unwrap()), Some(Keysym::LEFT));
    assert_eq!(secondary.get(layout.button(0).unwrap()), Keysym::from_char('b'));
    assert_eq!(engine.tables().thresholds().get(0).map(|t| t.low), Some(-9830));
}

#[test]
fn load_from_disk() {
    let path = temp_path("load");
    std::fs::write(&path, SAMPLE).unwrap();
    let config = ConfigFile::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.primary.buttons.map(|b| b.len()), Some(2));
}

#[test]
fn missing_explicit_file_is_an_error() {
    let path = temp_path("missing");
    assert!(matches!(ConfigFile::load(&path), Err(ConfigError::Read { .. })));
    assert_eq!(ConfigFile::load_or_default(&path).unwrap(), ConfigFile::default());
}

#[test]
fn malformed_file_is_a_parse_error() {
    let path = temp_path("malformed");
    std::fs::write(&path, "devcie = \"/dev/input/js0\"\n").unwrap();
    let res = ConfigFile::load(&path);
    std::fs::remove_file(&path).unwrap();
    assert!(matches!(res, Err(ConfigError::Parse { .. })));
}

#[test]
fn file_and_cli_lists_combine() {
    let config: ConfigFile = toml::from_str(SAMPLE).unwrap();
    let cli = Directives {
        secondary: BindingSet {
            buttons: None,
            axes: Some(vec![]),
        },
        ..Default::default()
    };
    let merged = config.directives().merge(cli).unwrap();
    assert_eq!(merged.primary.buttons.map(|b| b.len()), Some(2));
    assert_eq!(merged.secondary.axes, Some(vec![]));
}

#[test]
fn same_list_in_file_and_cli_conflicts() {
    let config: ConfigFile = toml::from_str(SAMPLE).unwrap();
    let cli = Directives {
        primary: BindingSet {
            buttons: Some(vec![ButtonBinding::new("A", "x")]),
            axes: None,
        },
        ..Default::default()
    };
    let err = config.directives().merge(cli).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateDirective("--buttons")));
}
