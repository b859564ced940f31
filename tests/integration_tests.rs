//! Integration tests for shade-control.
//!
//! These drive a shade end to end through fake pins, switches and a manual
//! clock, from configuration to settled state.

mod support;

use shade_control::config::units::PinId;
use shade_control::gateway::Delivery;
use shade_control::{
    Clock, Command, Edge, Gateway, Level, Millis, PendingTimers, Projection, ShadeState,
    ShadeSystem, Switch,
};

use support::{build, den_config, DEN};

// =============================================================================
// Start-up
// =============================================================================

#[test]
fn start_closed_energizes_toward_close() {
    let timers = PendingTimers::new();
    let mut config = den_config();
    config.start_state = ShadeState::Closed;

    let (shade, rig) = build(config, &timers);

    assert_eq!(shade.state(), ShadeState::Closing);
    assert!(rig.close_asserted());
    assert!(!rig.open_asserted());
    assert_eq!(rig.duty(), 255);
    assert_eq!(timers.count(), 1);
}

#[test]
fn start_unknown_stays_put() {
    let timers = PendingTimers::new();
    let (shade, rig) = build(den_config(), &timers);

    assert_eq!(shade.state(), ShadeState::Unknown);
    assert!(rig.stopped());
    assert_eq!(timers.count(), 0);
}

// =============================================================================
// Switch completion
// =============================================================================

#[test]
fn open_switch_completes_before_deadline() {
    let timers = PendingTimers::new();
    let (mut shade, rig) = build(den_config(), &timers);

    assert!(shade.open().unwrap());
    assert_eq!(shade.state(), ShadeState::Opening);

    rig.clock.advance(1_000);
    assert_eq!(shade.poll().unwrap(), None);

    rig.switches.set(PinId(4), Level::Low);
    rig.clock.advance(1);
    assert_eq!(shade.poll().unwrap(), Some(ShadeState::Open));

    assert_eq!(shade.state(), ShadeState::Open);
    assert!(rig.stopped());
    assert!(!shade.is_timer_pending());
    assert_eq!(timers.count(), 0);
}

#[test]
fn edge_event_is_consumed_by_next_tick() {
    let timers = PendingTimers::new();
    let mut config = den_config();
    // An interrupt-only board: the sampled input never answers.
    config.switch_active_level = shade_control::ActiveLevel::High;
    let (mut shade, rig) = build(config, &timers);
    rig.switches.0.borrow_mut().clear();

    shade.close().unwrap();
    shade.on_edge(Switch::Closed, Edge::Rising);

    // Recording the edge alone does not settle anything.
    assert_eq!(shade.state(), ShadeState::Closing);
    assert!(rig.energized());

    assert_eq!(shade.poll().unwrap(), Some(ShadeState::Closed));
    assert!(rig.stopped());
}

#[test]
fn contact_edge_completes_even_if_switch_bounced_back() {
    let timers = PendingTimers::new();
    let (mut shade, rig) = build(den_config(), &timers);

    shade.open().unwrap();
    // The input is sampled idle on the tick; only the edge saw contact.
    shade.on_edge(Switch::Opened, Edge::Falling);
    assert_eq!(shade.poll().unwrap(), Some(ShadeState::Open));

    assert!(rig.stopped());
    assert_eq!(timers.count(), 0);
}

#[test]
fn wrong_switch_does_not_complete_motion() {
    let timers = PendingTimers::new();
    let (mut shade, rig) = build(den_config(), &timers);

    shade.close().unwrap();
    rig.switches.set(PinId(4), Level::Low);
    assert_eq!(shade.poll().unwrap(), None);
    assert_eq!(shade.state(), ShadeState::Closing);
    assert!(shade.is_switch_asserted(Switch::Opened));
}

// =============================================================================
// Timer completion
// =============================================================================

#[test]
fn no_switch_trusts_the_timer() {
    let timers = PendingTimers::new();
    let mut config = den_config();
    config.open_switch_pin = PinId::NONE;
    config.closed_switch_pin = PinId::NONE;
    let (mut shade, rig) = build(config, &timers);

    shade.close().unwrap();
    let before = timers.count();

    rig.clock.advance(14_000);
    assert_eq!(shade.poll().unwrap(), Some(ShadeState::Closed));

    assert_eq!(shade.state(), ShadeState::Closed);
    assert!(rig.stopped());
    assert_eq!(timers.count(), before - 1);
}

#[test]
fn installed_switch_that_never_trips_gives_unknown() {
    let timers = PendingTimers::new();
    let (mut shade, rig) = build(den_config(), &timers);

    shade.open().unwrap();
    rig.clock.advance(10_000);
    assert_eq!(shade.poll().unwrap(), Some(ShadeState::Unknown));

    assert!(rig.stopped());
    assert!(!shade.is_timer_pending());
}

#[test]
fn timer_only_in_the_direction_without_switch() {
    let timers = PendingTimers::new();
    let mut config = den_config();
    config.open_switch_pin = PinId::NONE;
    let (mut shade, rig) = build(config, &timers);

    shade.open().unwrap();
    rig.clock.advance(10_000);
    assert_eq!(shade.poll().unwrap(), Some(ShadeState::Open));

    shade.close().unwrap();
    rig.clock.advance(14_000);
    assert_eq!(shade.poll().unwrap(), Some(ShadeState::Unknown));
}

#[test]
fn switch_wins_over_expired_timer() {
    let timers = PendingTimers::new();
    let (mut shade, rig) = build(den_config(), &timers);

    shade.close().unwrap();
    rig.clock.advance(20_000);
    rig.switches.set(PinId(5), Level::Low);

    assert_eq!(shade.poll().unwrap(), Some(ShadeState::Closed));
}

// =============================================================================
// Rejected commands and stop
// =============================================================================

#[test]
fn open_when_open_changes_nothing() {
    let timers = PendingTimers::new();
    let (mut shade, rig) = build(den_config(), &timers);

    shade.open().unwrap();
    rig.switches.set(PinId(4), Level::Low);
    shade.poll().unwrap();
    assert_eq!(shade.state(), ShadeState::Open);

    let outputs = (rig.open_asserted(), rig.close_asserted(), rig.duty());
    assert!(!shade.issue(Command::Open).unwrap());
    assert_eq!(shade.state(), ShadeState::Open);
    assert_eq!(outputs, (rig.open_asserted(), rig.close_asserted(), rig.duty()));
    assert_eq!(timers.count(), 0);
}

#[test]
fn stop_while_opening_gives_unknown() {
    let timers = PendingTimers::new();
    let (mut shade, rig) = build(den_config(), &timers);

    shade.open().unwrap();
    rig.clock.advance(3_000);
    assert!(shade.stop().unwrap());

    assert_eq!(shade.state(), ShadeState::Unknown);
    assert!(rig.stopped());
    assert!(!shade.is_timer_pending());
    assert_eq!(timers.count(), 0);

    // A later tick past the old deadline does nothing.
    rig.clock.advance(60_000);
    assert_eq!(shade.poll().unwrap(), None);
}

#[test]
fn can_reverse_after_settling() {
    let timers = PendingTimers::new();
    let (mut shade, rig) = build(den_config(), &timers);

    shade.open().unwrap();
    rig.switches.set(PinId(4), Level::Low);
    shade.poll().unwrap();

    assert!(shade.close().unwrap());
    assert!(rig.close_asserted());
    assert!(!rig.open_asserted());
    assert_eq!(shade.deadline(), Some(rig.clock.now() + Millis(14_000)));
}

// =============================================================================
// Output inversion
// =============================================================================

#[test]
fn inverted_outputs_drive_low() {
    let timers = PendingTimers::new();
    let mut config = den_config();
    config.invert_output = true;
    let (mut shade, rig) = build(config, &timers);

    shade.open().unwrap();
    assert!(!rig.open.0.get());
    assert!(rig.close.0.get());
    assert_eq!(rig.duty(), 255);

    shade.stop().unwrap();
    assert!(rig.open.0.get());
    assert!(rig.close.0.get());
    assert_eq!(rig.duty(), 0);
}

// =============================================================================
// Gateway
// =============================================================================

#[test]
fn gateway_round_trip() {
    let timers = PendingTimers::new();
    let (mut shade, rig) = build(den_config(), &timers);
    let gateway = Gateway::new(Projection::Full);

    let status = gateway.handle(&mut shade, "den open").unwrap().unwrap();
    assert_eq!(status.as_str(), "den opening");
    assert_eq!(status.delivery, Delivery::Immediate);

    // Second open while moving is rejected silently.
    assert!(gateway.handle(&mut shade, "den open").unwrap().is_none());
    assert!(gateway.handle(&mut shade, "den dance").unwrap().is_none());

    assert_eq!(gateway.refresh(&shade).as_str(), "den opening");

    rig.switches.set(PinId(4), Level::Low);
    let resolved = shade.poll().unwrap();
    let status = gateway.settled(&shade, resolved).unwrap();
    assert_eq!(status.as_str(), "den open");
    assert_eq!(status.delivery, Delivery::Queued);
    let resolved = shade.poll().unwrap();
    assert!(gateway.settled(&shade, resolved).is_none());
}

#[test]
fn coarse_projection_reports_unknown_as_closed() {
    let timers = PendingTimers::new();
    let (shade, _rig) = build(den_config(), &timers);

    assert_eq!(Gateway::new(Projection::Coarse).refresh(&shade).as_str(), "den closed");
    assert_eq!(Gateway::new(Projection::Full).refresh(&shade).as_str(), "den unknown");
}

// =============================================================================
// Shared counter across shades
// =============================================================================

#[test]
fn system_counts_every_pending_shade() {
    let toml = DEN.to_string()
        + &DEN
            .replace("shades.den", "shades.hall")
            .replace("name = \"den\"", "name = \"hall\"");
    let config = shade_control::config::parse_config(&toml).unwrap();
    let system = ShadeSystem::from_config(config);

    let timers = system.timers();
    let (mut den, den_rig) = build(system.shade_config("den").unwrap().clone(), timers);
    let (mut hall, _hall_rig) = build(system.shade_config("hall").unwrap().clone(), timers);

    den.open().unwrap();
    hall.close().unwrap();
    assert_eq!(timers.count(), 2);

    den_rig.switches.set(PinId(4), Level::Low);
    den.poll().unwrap();
    assert_eq!(timers.count(), 1);
    assert!(system.any_timers_pending());

    hall.stop().unwrap();
    assert!(!system.any_timers_pending());
}
