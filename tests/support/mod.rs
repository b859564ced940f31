//! Shared test hardware: pins, PWM, switches and a clock whose state the test
//! can read and change while the shade owns them.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType as DigitalErrorType, OutputPin};
use embedded_hal::pwm::{ErrorType as PwmErrorType, SetDutyCycle};

use shade_control::config::parse_config;
use shade_control::{
    Clock, Level, Millis, MotorOutput, PendingTimers, PinId, Shade, ShadeBuilder, ShadeConfig,
    SwitchInput,
};

/// Output pin whose level the test can observe.
#[derive(Clone, Default)]
pub struct FakePin(pub Rc<Cell<bool>>);

impl DigitalErrorType for FakePin {
    type Error = Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set(true);
        Ok(())
    }
}

/// PWM output whose duty the test can observe.
#[derive(Clone, Default)]
pub struct FakePwm(pub Rc<Cell<u16>>);

impl PwmErrorType for FakePwm {
    type Error = Infallible;
}

impl SetDutyCycle for FakePwm {
    fn max_duty_cycle(&self) -> u16 {
        255
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.0.set(duty);
        Ok(())
    }
}

/// Switch levels keyed by pin id.
#[derive(Clone, Default)]
pub struct FakeSwitches(pub Rc<RefCell<HashMap<u8, Level>>>);

impl FakeSwitches {
    pub fn set(&self, pin: PinId, level: Level) {
        self.0.borrow_mut().insert(pin.value(), level);
    }
}

impl SwitchInput for FakeSwitches {
    fn level(&mut self, pin: PinId) -> Option<Level> {
        self.0.borrow().get(&pin.value()).copied()
    }
}

/// Clock advanced by hand.
#[derive(Clone, Default)]
pub struct ManualClock(pub Rc<Cell<u64>>);

impl ManualClock {
    pub fn advance(&self, ms: u64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        Millis(self.0.get())
    }
}

pub type TestShade<'t> = Shade<'t, MotorOutput<FakePin, FakePin, FakePwm>, FakeSwitches, ManualClock>;

/// Handles onto the hardware a [`TestShade`] owns.
#[derive(Clone, Default)]
pub struct Rig {
    pub open: FakePin,
    pub close: FakePin,
    pub speed: FakePwm,
    pub switches: FakeSwitches,
    pub clock: ManualClock,
    pub invert: bool,
}

impl Rig {
    pub fn open_asserted(&self) -> bool {
        self.open.0.get() != self.invert
    }

    pub fn close_asserted(&self) -> bool {
        self.close.0.get() != self.invert
    }

    pub fn duty(&self) -> u16 {
        self.speed.0.get()
    }

    pub fn energized(&self) -> bool {
        self.duty() > 0 || self.open_asserted() || self.close_asserted()
    }

    pub fn stopped(&self) -> bool {
        !self.energized()
    }
}

/// A den shade: open switch on pin 4, closed switch on pin 5, 10 s / 14 s limits.
pub const DEN: &str = r#"
[shades.den]
name = "den"
open_switch_pin = 4
closed_switch_pin = 5
open_time_limit_ms = 10000
close_time_limit_ms = 14000
switch_active_level = "low"
pull = "up"
motor_open_pin = 8
motor_close_pin = 9
motor_speed_pin = 10
speed_percent = 100
invert_output = false
start_state = "unknown"
"#;

pub fn den_config() -> ShadeConfig {
    parse_config(DEN).unwrap().shade("den").unwrap().clone()
}

pub fn build<'t>(config: ShadeConfig, timers: &'t PendingTimers) -> (TestShade<'t>, Rig) {
    let rig = Rig {
        invert: config.invert_output,
        ..Rig::default()
    };
    // Outputs start de-asserted.
    rig.open.0.set(config.invert_output);
    rig.close.0.set(config.invert_output);
    // Idle level for the switches: not in contact.
    let idle = match config.switch_active_level {
        shade_control::ActiveLevel::Low => Level::High,
        shade_control::ActiveLevel::High => Level::Low,
    };
    for pin in [config.open_switch_pin, config.closed_switch_pin] {
        if pin.is_installed() {
            rig.switches.set(pin, idle);
        }
    }

    let shade = ShadeBuilder::new()
        .motor(MotorOutput::from_config(
            rig.open.clone(),
            rig.close.clone(),
            rig.speed.clone(),
            &config,
        ))
        .config(config)
        .switches(rig.switches.clone())
        .clock(rig.clock.clone())
        .timers(timers)
        .build()
        .unwrap();

    (shade, rig)
}
