// Host-side tests for the drag / idle state machine.

use showcase_core::{Interaction, InteractionPhase};
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn starts_idle_and_uncontrolled() {
    let m = Interaction::default();
    assert_eq!(m.phase(), InteractionPhase::Idle);
    assert!(!m.is_controlled(ms(0)));
    assert!(!m.narration_played());
}

#[test]
fn drag_start_always_enters_dragging() {
    let mut m = Interaction::default();
    m.drag_start(ms(10), false);
    assert_eq!(m.phase(), InteractionPhase::Dragging);
    assert!(m.is_controlled(ms(10)));
    // Dragging has no deadline; it stays controlled indefinitely.
    assert!(m.is_controlled(ms(60_000)));
}

#[test]
fn drag_end_holds_control_for_the_idle_delay() {
    let mut m = Interaction::default();
    m.drag_start(ms(0), true);
    assert!(m.drag_end(ms(1000)).is_some());
    assert!(m.is_controlled(ms(1000)));
    assert!(m.is_controlled(ms(2999)));
    assert!(!m.is_controlled(ms(3000)));
    assert!(m.poll(ms(3000)));
    assert_eq!(m.phase(), InteractionPhase::Idle);
}

#[test]
fn drag_end_without_drag_is_ignored() {
    let mut m = Interaction::default();
    assert!(m.drag_end(ms(500)).is_none());
    assert_eq!(m.phase(), InteractionPhase::Idle);
}

#[test]
fn restarting_during_cooldown_cancels_it() {
    let mut m = Interaction::default();
    m.drag_start(ms(0), true);
    m.drag_end(ms(1000));
    let effect = m.drag_start(ms(2000), true);
    assert!(effect.cancelled_cooldown);
    assert_eq!(m.phase(), InteractionPhase::Dragging);
    // The old deadline (3000ms) must not release control.
    assert!(!m.poll(ms(3500)));
    assert!(m.is_controlled(ms(3500)));
}

#[test]
fn quick_second_drag_extends_suppression() {
    // Drag 0..1s, drag again 2..2.5s: idle only at 4.5s.
    let mut m = Interaction::default();
    m.drag_start(ms(0), true);
    m.drag_end(ms(1000));
    m.drag_start(ms(2000), true);
    m.drag_end(ms(2500));
    for t in [2500, 3000, 3500, 4000, 4499] {
        m.poll(ms(t));
        assert!(m.is_controlled(ms(t)), "controlled at {t}ms");
    }
    assert!(m.poll(ms(4500)));
    assert!(!m.is_controlled(ms(4500)));
}

#[test]
fn each_cooldown_gets_a_new_timer() {
    let mut m = Interaction::default();
    m.drag_start(ms(0), true);
    let a = m.drag_end(ms(100)).unwrap();
    m.drag_start(ms(200), true);
    let b = m.drag_end(ms(300)).unwrap();
    assert_ne!(a, b);
    match m.phase() {
        InteractionPhase::Cooldown { deadline, timer } => {
            assert_eq!(timer, b);
            assert_eq!(deadline, ms(2300));
        }
        other => panic!("expected cooldown, got {other:?}"),
    }
}

#[test]
fn narration_plays_once_after_assets_are_ready() {
    let mut m = Interaction::default();
    // Before load: no narration and the flag is not consumed.
    assert!(!m.drag_start(ms(0), false).play_narration);
    m.drag_end(ms(100));
    assert!(!m.narration_played());

    assert!(m.drag_start(ms(5000), true).play_narration);
    m.drag_end(ms(5100));
    assert!(m.narration_played());

    assert!(!m.drag_start(ms(9000), true).play_narration);
}

#[test]
fn custom_idle_delay_is_respected() {
    let mut m = Interaction::new(ms(250));
    m.drag_start(ms(0), false);
    m.drag_end(ms(100));
    assert!(m.is_controlled(ms(349)));
    assert!(!m.is_controlled(ms(350)));
}
