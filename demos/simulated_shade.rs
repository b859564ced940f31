//! Simulated shade example.
//!
//! Drives a shade from a short text command script against mock pins and a
//! virtual clock, printing every status line the gateway produces. The open
//! switch is simulated: it trips a few seconds into each opening run. No
//! closed switch is installed, so closing relies on the time limit.

use std::cell::Cell;

use shade_control::config::parse_config;
use shade_control::gateway::Status;
use shade_control::switch::PinSwitches;
use shade_control::{Clock, Gateway, Millis, MotorOutput, PendingTimers, Projection, ShadeBuilder};

const CONFIG: &str = r#"
[shades.patio]
name = "patio"
open_switch_pin = 4
open_time_limit_ms = 10000
close_time_limit_ms = 6000
switch_active_level = "low"
pull = "up"
motor_open_pin = 8
motor_close_pin = 9
motor_speed_pin = 10
speed_percent = 75
invert_output = false
start_state = "closed"
"#;

/// Milliseconds between poll ticks.
const TICK_MS: u64 = 50;

/// Virtual clock shared by the shade and the simulation.
struct SimClock {
    now: Cell<u64>,
}

impl Clock for SimClock {
    fn now(&self) -> Millis {
        Millis(self.now.get())
    }
}

/// Mock output pin for demonstration.
struct MockPin {
    label: &'static str,
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        println!("    [{}] high", self.label);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        println!("    [{}] low", self.label);
        Ok(())
    }
}

/// Mock PWM output for demonstration.
struct MockPwm;

impl embedded_hal::pwm::ErrorType for MockPwm {
    type Error = core::convert::Infallible;
}

impl embedded_hal::pwm::SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        255
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        println!("    [speed] duty {}", duty);
        Ok(())
    }
}

/// Open switch that reads "contact" once the clock passes `trips_at`.
struct SimSwitch<'a> {
    clock: &'a SimClock,
    trips_at: &'a Cell<Option<u64>>,
}

impl embedded_hal::digital::ErrorType for SimSwitch<'_> {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::InputPin for SimSwitch<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        let now = self.clock.now.get();
        Ok(self.trips_at.get().is_some_and(|t| now >= t))
    }
}

fn print_status(status: &Status) {
    println!("  -> {:?}: {}", status.delivery, status.as_str());
}

fn main() {
    println!("=== Simulated Shade Example ===\n");

    let config = parse_config(CONFIG).expect("Failed to parse configuration");
    let shade_config = config.shade("patio").expect("patio not configured").clone();

    let timers = PendingTimers::new();
    let clock = SimClock { now: Cell::new(0) };
    let trips_at = Cell::new(None);

    let motor = MotorOutput::from_config(
        MockPin { label: "open" },
        MockPin { label: "close" },
        MockPwm,
        &shade_config,
    );
    let switches = PinSwitches::<SimSwitch<'_>, SimSwitch<'_>>::new(
        &shade_config,
        Some(SimSwitch {
            clock: &clock,
            trips_at: &trips_at,
        }),
        None,
    );

    println!("Building shade (start state: closed)");
    let mut shade = ShadeBuilder::new()
        .config(shade_config)
        .motor(motor)
        .switches(switches)
        .clock(&clock)
        .timers(&timers)
        .build()
        .expect("Failed to build shade");

    let gateway = Gateway::new(Projection::Full);
    let script = [
        (7_000, "patio hello"),
        (8_000, "patio open"),
        (2_000, "patio open"),
        (9_000, "patio close"),
    ];

    for (run_ms, line) in script {
        println!("\n[{:>6} ms] <- {}", clock.now.get(), line);
        if line.ends_with("open") {
            trips_at.set(Some(clock.now.get() + 4_000));
        } else {
            trips_at.set(None);
        }

        match gateway.handle(&mut shade, line) {
            Ok(Some(status)) => print_status(&status),
            Ok(None) => println!("  (ignored, shade is {})", shade.state().as_str()),
            Err(e) => println!("  error: {}", e),
        }

        let until = clock.now.get() + run_ms;
        while clock.now.get() < until {
            clock.now.set(clock.now.get() + TICK_MS);
            match shade.poll() {
                Ok(resolved) => {
                    if let Some(status) = gateway.settled(&shade, resolved) {
                        println!("[{:>6} ms] settled", clock.now.get());
                        print_status(&status);
                    }
                }
                Err(e) => println!("  error: {}", e),
            }
        }

        print_status(&gateway.refresh(&shade));
        println!("  timers pending: {}", timers.count());
    }

    println!("\n=== Example Complete ===");
}
