//! Tests for TOML configuration parsing and validation.

use shade_control::config::{parse_config, validate_config, SystemConfig};
use shade_control::error::{ConfigError, Error};
use shade_control::{ActiveLevel, Millis, PinId, ShadeState};

const FULL_CONFIG: &str = r#"
[shades.bedroom]
name = "bedroom"
open_switch_pin = 4
closed_switch_pin = 5
open_time_limit_ms = 10000
close_time_limit_ms = 14000
switch_active_level = "high"
pull = "down"
motor_open_pin = 8
motor_close_pin = 9
motor_speed_pin = 10
speed_percent = 60
invert_output = true
start_state = "open"

[shades.kitchen]
name = "kitchen"
open_time_limit_ms = 7000
close_time_limit_ms = 7000
switch_active_level = "low"
pull = "none"
motor_open_pin = 11
motor_close_pin = 12
motor_speed_pin = 13
speed_percent = 100
invert_output = false
start_state = "unknown"
"#;

#[test]
fn parse_full_config() {
    let config = parse_config(FULL_CONFIG).expect("Should parse full config");

    let bedroom = config.shade("bedroom").expect("Bedroom should exist");
    assert_eq!(bedroom.name.as_str(), "bedroom");
    assert_eq!(bedroom.switch_active_level, ActiveLevel::High);
    assert_eq!(bedroom.close_time_limit, Millis(14_000));
    assert!(bedroom.invert_output);
    assert_eq!(bedroom.start_state, ShadeState::Open);

    let kitchen = config.shade("kitchen").expect("Kitchen should exist");
    assert_eq!(kitchen.open_switch_pin, PinId::NONE);
    assert_eq!(kitchen.closed_switch_pin, PinId::NONE);

    let names: Vec<_> = config.shade_names().collect();
    assert_eq!(names, vec!["bedroom", "kitchen"]);
    assert!(config.shade("garage").is_none());
}

#[test]
fn reject_speed_out_of_range() {
    let toml = FULL_CONFIG.replace("speed_percent = 60", "speed_percent = 0");
    let result = parse_config(&toml);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidSpeed(0)))
    ));
}

#[test]
fn reject_shared_pin() {
    let toml = FULL_CONFIG.replace("motor_close_pin = 9", "motor_close_pin = 8");
    let result = parse_config(&toml);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::PinConflict { pin: 8, .. }))
    ));
}

#[test]
fn reject_unknown_level() {
    let toml = FULL_CONFIG.replace("switch_active_level = \"high\"", "switch_active_level = \"sideways\"");
    assert!(matches!(
        parse_config(&toml),
        Err(Error::Config(ConfigError::ParseError(_)))
    ));
}

#[test]
fn validate_pre_parsed_config() {
    let mut config: SystemConfig = toml::from_str(FULL_CONFIG).unwrap();
    assert!(validate_config(&config).is_ok());

    for (_, shade) in config.shades.iter_mut() {
        shade.open_time_limit = Millis::ZERO;
    }
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::ZeroTimeLimit { .. }))
    ));
}
