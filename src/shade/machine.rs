//! Shade actuator state machine.

use crate::clock::Clock;
use crate::config::units::Millis;
use crate::config::ShadeConfig;
use crate::error::Result;
use crate::motor::{Command, MotorDrive};
use crate::switch::{Edge, Level, Switch, SwitchCache, SwitchInput};
use crate::timer::{PendingTimers, TimerTracker};

use super::state::ShadeState;

/// One motorized shade.
///
/// Generic over:
/// - `M`: motor outputs (must implement [`MotorDrive`])
/// - `S`: switch levels (must implement [`SwitchInput`])
/// - `C`: monotonic time source (must implement [`Clock`])
///
/// All methods take `&mut self` and return immediately. Call
/// [`poll`](Self::poll) regularly, well inside the shortest time limit.
pub struct Shade<'t, M, S, C>
where
    M: MotorDrive,
    S: SwitchInput,
    C: Clock,
{
    /// Fixed at construction.
    config: ShadeConfig,

    /// Direction and speed outputs.
    motor: M,

    /// Where switch levels are sampled from on each tick.
    switches: S,

    /// Time source for deadlines.
    clock: C,

    /// Deadline of the motion in flight.
    timer: TimerTracker<'t>,

    /// Last known switch levels, fed by sampling and by edge events.
    cache: SwitchCache,

    /// Current state.
    state: ShadeState,
}

impl<'t, M, S, C> Shade<'t, M, S, C>
where
    M: MotorDrive,
    S: SwitchInput,
    C: Clock,
{
    /// Create a shade and, unless the configured start state is `Unknown`,
    /// immediately start moving toward it.
    ///
    /// The configuration is assumed valid; [`ShadeBuilder`](super::ShadeBuilder)
    /// validates before calling this.
    pub(crate) fn new(
        config: ShadeConfig,
        motor: M,
        switches: S,
        clock: C,
        timers: &'t PendingTimers,
    ) -> Result<Self> {
        let mut shade = Self {
            config,
            motor,
            switches,
            clock,
            timer: TimerTracker::new(timers),
            cache: SwitchCache::new(),
            state: ShadeState::Unknown,
        };

        let start = shade.config.start_state;
        if start != shade.state {
            if let Some(command) = start.approach() {
                debug!("{=str}: moving to start position", shade.name());
                shade.issue(command)?;
            }
        }

        Ok(shade)
    }

    /// Get the shade name.
    #[inline]
    pub fn name(&self) -> &str {
        self.config.name.as_str()
    }

    /// Get the current state.
    #[inline]
    pub fn state(&self) -> ShadeState {
        self.state
    }

    /// Get the configuration.
    #[inline]
    pub fn config(&self) -> &ShadeConfig {
        &self.config
    }

    /// Whether a timed motion is outstanding.
    #[inline]
    pub fn is_timer_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Deadline of the motion in flight.
    #[inline]
    pub fn deadline(&self) -> Option<Millis> {
        self.timer.deadline()
    }

    /// Time left before the motion in flight hits its time limit.
    pub fn remaining(&self) -> Option<Millis> {
        self.timer.remaining(self.clock.now())
    }

    /// Last known level of a switch.
    #[inline]
    pub fn switch_level(&self, switch: Switch) -> Option<Level> {
        self.cache.level(switch)
    }

    /// Whether an installed switch last reported contact.
    pub fn is_switch_asserted(&self, switch: Switch) -> bool {
        self.config.has_switch(switch)
            && self
                .cache
                .level(switch)
                .is_some_and(|level| self.config.switch_active_level.is_asserted(level))
    }

    /// Get the motor outputs.
    #[inline]
    pub fn motor(&self) -> &M {
        &self.motor
    }

    /// Get the switch input.
    #[inline]
    pub fn switches_mut(&mut self) -> &mut S {
        &mut self.switches
    }

    /// Get the clock.
    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Issue a command.
    ///
    /// Returns `Ok(false)` when the command is rejected: opening an open
    /// shade, closing a closed one, starting a motion while one is in flight,
    /// or stopping a shade that is not moving. A rejected command changes
    /// neither the state nor the outputs.
    pub fn issue(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::Open => self.begin(Command::Open, Switch::Opened, ShadeState::Opening),
            Command::Close => self.begin(Command::Close, Switch::Closed, ShadeState::Closing),
            Command::Stop => self.stop(),
        }
    }

    /// Start opening.
    pub fn open(&mut self) -> Result<bool> {
        self.issue(Command::Open)
    }

    /// Start closing.
    pub fn close(&mut self) -> Result<bool> {
        self.issue(Command::Close)
    }

    /// Abandon the motion in flight. The shade ends up `Unknown`.
    pub fn stop(&mut self) -> Result<bool> {
        if self.state.is_terminal() {
            debug!("{=str}: stop ignored, not moving", self.name());
            return Ok(false);
        }

        self.settle(ShadeState::Unknown)?;
        Ok(true)
    }

    /// Record an edge from the interrupt layer.
    ///
    /// Only the switch cache changes; the next [`poll`](Self::poll) acts on it.
    /// An edge into contact is held for that tick even if the sampled level
    /// has bounced back by then.
    pub fn on_edge(&mut self, switch: Switch, edge: Edge) {
        if !self.config.has_switch(switch) {
            return;
        }
        let level = edge.level();
        self.cache.record(switch, level);
        if self.config.switch_active_level.is_asserted(level) {
            self.cache.latch(switch);
        }
    }

    /// Run one tick.
    ///
    /// Samples both installed switches, then, if moving, finishes the motion
    /// when the switch it is heading for reports contact or when its time
    /// limit has passed. Returns the state the shade settled in, if it did.
    ///
    /// A time limit reached with no switch installed in that direction is
    /// taken as success. With a switch installed that never tripped, the
    /// shade settles in `Unknown`.
    pub fn poll(&mut self) -> Result<Option<ShadeState>> {
        self.sample_switches();
        let opened_latched = self.cache.take_latched(Switch::Opened);
        let closed_latched = self.cache.take_latched(Switch::Closed);

        let Some(completed) = self.state.completed() else {
            return Ok(None);
        };
        let (switch, latched) = match completed {
            ShadeState::Open => (Switch::Opened, opened_latched),
            _ => (Switch::Closed, closed_latched),
        };

        if latched || self.is_switch_asserted(switch) {
            self.settle(completed)?;
            return Ok(Some(completed));
        }

        if self.timer.is_expired(self.clock.now()) {
            let resolved = if self.config.has_switch(switch) {
                warn!("{=str}: time limit reached before switch tripped", self.name());
                ShadeState::Unknown
            } else {
                completed
            };
            self.settle(resolved)?;
            return Ok(Some(resolved));
        }

        Ok(None)
    }

    /// Give the hardware back. Any outstanding timer count is released.
    pub fn release(self) -> (M, S, C) {
        (self.motor, self.switches, self.clock)
    }

    fn begin(&mut self, command: Command, toward: Switch, moving: ShadeState) -> Result<bool> {
        if self.state.is_transient()
            || Some(self.state) == moving.completed()
            || self.timer.is_pending()
        {
            debug!("{=str}: {=str} rejected", self.name(), command.as_str());
            return Ok(false);
        }

        if let Err(e) = self.motor.drive(command) {
            // Best effort: leave the outputs off rather than half-set.
            let _ = self.motor.drive(Command::Stop);
            return Err(e);
        }

        self.timer.arm(self.clock.now(), self.config.time_limit(toward));
        self.state = moving;
        info!("{=str}: {=str}", self.name(), moving.as_str());
        Ok(true)
    }

    /// Stop the motor and end the motion in `state`.
    ///
    /// If the stop write fails the motion stays in flight so the next tick
    /// tries again.
    fn settle(&mut self, state: ShadeState) -> Result<()> {
        self.motor.drive(Command::Stop)?;
        self.timer.disarm();
        self.state = state;
        info!("{=str}: {=str}", self.name(), state.as_str());
        Ok(())
    }

    fn sample_switches(&mut self) {
        for switch in [Switch::Opened, Switch::Closed] {
            let pin = self.config.switch_pin(switch);
            if !pin.is_installed() {
                continue;
            }
            if let Some(level) = self.switches.level(pin) {
                self.cache.record(switch, level);
            }
        }
    }
}
