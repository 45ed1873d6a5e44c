//! End-to-end poller behavior: scripted sources, scripted clocks, counted
//! reactions.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tickup::{
    EventKind, Pipeline, PressState, Poller, ReactionError, Sample, VirtualPad,
};

fn counter() -> (Arc<AtomicUsize>, impl FnMut(Sample) -> Result<(), ReactionError>) {
    let count = Arc::new(AtomicUsize::new(0));
    let reaction = {
        let count = count.clone();
        move |_v: Sample| {
            count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    };
    (count, reaction)
}

fn recorder() -> (Arc<Mutex<Vec<Sample>>>, impl FnMut(Sample) -> Result<(), ReactionError>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let reaction = {
        let seen = seen.clone();
        move |v: Sample| {
            seen.lock().unwrap().push(v);
            Ok(())
        }
    };
    (seen, reaction)
}

#[test]
fn always_fires_every_tick() {
    let pad = VirtualPad::new();
    pad.set_axis("x", 0.7);
    let mut poller = Poller::new();
    let (count, reaction) = counter();

    poller.add_binding(pad.axis("x"), EventKind::Always, Pipeline::empty(), reaction);

    for t in 0..10 {
        poller.tick_at(t * 20);
    }
    assert_eq!(count.load(Ordering::SeqCst), 10);
}

#[test]
fn changed_fires_only_on_differences() {
    let pad = VirtualPad::new();
    let mut poller = Poller::new();
    let (seen, reaction) = recorder();

    poller.add_binding(pad.axis("x"), EventKind::Changed, Pipeline::empty(), reaction);

    // Sample sequence 3, 3, 5, 5, 5, 2: fires on the 1st (no history yet),
    // 3rd and 6th ticks.
    for (t, v) in [3.0, 3.0, 5.0, 5.0, 5.0, 2.0].into_iter().enumerate() {
        pad.set_axis("x", v);
        poller.tick_at(t as u64 * 20);
    }

    assert_eq!(
        *seen.lock().unwrap(),
        vec![Sample::Analog(3.0), Sample::Analog(5.0), Sample::Analog(2.0)]
    );
}

#[test]
fn pressed_fires_once_at_the_inclusive_threshold() {
    let pad = VirtualPad::new();
    pad.set_button("a", false);
    let mut poller = Poller::new();
    let (count, reaction) = counter();

    let id = poller.add_binding(pad.button("a"), EventKind::Pressed, Pipeline::empty(), reaction);

    pad.set_button("a", true);
    poller.tick_at(0);
    poller.tick_at(50);
    poller.tick_at(100);
    assert_eq!(count.load(Ordering::SeqCst), 0, "window still open");
    assert_eq!(poller.press_state(id), Some(PressState::PressedUnconfirmed));

    // A hold of exactly the window length is a press.
    poller.tick_at(150);
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(poller.press_state(id), Some(PressState::PressedConfirmed));

    poller.tick_at(200);
    poller.tick_at(400);
    assert_eq!(count.load(Ordering::SeqCst), 1, "a held press fires once");
}

#[test]
fn short_hold_never_fires_pressed() {
    let pad = VirtualPad::new();
    let mut poller = Poller::new();
    let (count, reaction) = counter();

    poller.add_binding(pad.button("a"), EventKind::Pressed, Pipeline::empty(), reaction);

    pad.set_button("a", true);
    poller.tick_at(0);
    poller.tick_at(100);
    pad.set_button("a", false);
    poller.tick_at(120);
    poller.tick_at(300);

    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn pressed_fires_again_on_the_next_activation_cycle() {
    let pad = VirtualPad::new();
    let mut poller = Poller::new();
    let (count, reaction) = counter();

    poller.add_binding(pad.button("a"), EventKind::Pressed, Pipeline::empty(), reaction);

    for cycle in 0..3_u64 {
        let base = cycle * 1000;
        pad.set_button("a", true);
        poller.tick_at(base);
        poller.tick_at(base + 150);
        pad.set_button("a", false);
        poller.tick_at(base + 200);
    }

    assert_eq!(count.load(Ordering::SeqCst), 3);
}

#[test]
fn tapped_fires_on_release_inside_the_window() {
    let pad = VirtualPad::new();
    let mut poller = Poller::new();
    let (count, reaction) = counter();

    poller.add_binding(pad.button("a"), EventKind::Tapped, Pipeline::empty(), reaction);

    pad.set_button("a", true);
    poller.tick_at(0);
    poller.tick_at(40);
    poller.tick_at(80);
    assert_eq!(count.load(Ordering::SeqCst), 0);

    pad.set_button("a", false);
    poller.tick_at(120);
    assert_eq!(count.load(Ordering::SeqCst), 1, "fires on the tick detecting inactivity");

    poller.tick_at(160);
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn a_hold_past_the_window_is_not_a_tap() {
    let pad = VirtualPad::new();
    let mut poller = Poller::new();
    let (count, reaction) = counter();

    poller.add_binding(pad.button("a"), EventKind::Tapped, Pipeline::empty(), reaction);

    pad.set_button("a", true);
    poller.tick_at(0);
    poller.tick_at(200);
    pad.set_button("a", false);
    poller.tick_at(240);

    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn released_fires_once_after_a_confirmed_press() {
    let pad = VirtualPad::new();
    let mut poller = Poller::new();
    let (seen, reaction) = recorder();

    poller.add_binding(pad.button("a"), EventKind::Released, Pipeline::empty(), reaction);

    pad.set_button("a", true);
    poller.tick_at(0);
    poller.tick_at(150);
    poller.tick_at(200);
    assert!(seen.lock().unwrap().is_empty(), "nothing fires while held");

    pad.set_button("a", false);
    poller.tick_at(250);
    assert_eq!(*seen.lock().unwrap(), vec![Sample::Bool(false)]);

    poller.tick_at(300);
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn released_needs_a_confirmed_press_first() {
    let pad = VirtualPad::new();
    let mut poller = Poller::new();
    let (count, reaction) = counter();

    poller.add_binding(pad.button("a"), EventKind::Released, Pipeline::empty(), reaction);

    // A short tap never confirms, so the release passes silently.
    pad.set_button("a", true);
    poller.tick_at(0);
    poller.tick_at(80);
    pad.set_button("a", false);
    poller.tick_at(120);
    poller.tick_at(500);

    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn one_cycle_fires_pressed_or_tapped_never_both() {
    let pad = VirtualPad::new();
    let mut poller = Poller::new();
    let (pressed, pressed_reaction) = counter();
    let (tapped, tapped_reaction) = counter();

    poller.add_binding(pad.button("a"), EventKind::Pressed, Pipeline::empty(), pressed_reaction);
    poller.add_binding(pad.button("a"), EventKind::Tapped, Pipeline::empty(), tapped_reaction);

    // Cycle one: quick tap.
    pad.set_button("a", true);
    poller.tick_at(0);
    pad.set_button("a", false);
    poller.tick_at(60);
    assert_eq!(pressed.load(Ordering::SeqCst), 0);
    assert_eq!(tapped.load(Ordering::SeqCst), 1);

    // Cycle two: long hold.
    pad.set_button("a", true);
    poller.tick_at(1000);
    poller.tick_at(1200);
    pad.set_button("a", false);
    poller.tick_at(1240);
    assert_eq!(pressed.load(Ordering::SeqCst), 1);
    assert_eq!(tapped.load(Ordering::SeqCst), 1);
}

#[test]
fn zero_window_pressed_fires_immediately() {
    let pad = VirtualPad::new();
    let mut poller = Poller::new();
    let (count, reaction) = counter();

    let id = poller.add_binding_with_tap(
        pad.button("a"),
        EventKind::Pressed,
        Pipeline::empty(),
        reaction,
        0,
    );

    pad.set_button("a", true);
    poller.tick_at(0);
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(poller.press_state(id), Some(PressState::PressedConfirmed));

    poller.tick_at(20);
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn a_faulty_reaction_does_not_starve_later_bindings() {
    let pad = VirtualPad::new();
    pad.set_button("a", true);
    let mut poller = Poller::new();
    let (count, reaction) = counter();

    let bad = poller.add_binding(
        pad.button("a"),
        EventKind::Always,
        Pipeline::empty(),
        |_v: Sample| Err(ReactionError::new("actuator offline")),
    );
    poller.add_binding(pad.button("a"), EventKind::Always, Pipeline::empty(), reaction);

    let faults = poller.tick_at(0);
    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0].binding, bad);
    assert_eq!(count.load(Ordering::SeqCst), 1, "second binding still ran");

    // Next tick keeps reporting, keeps isolating.
    let faults = poller.tick_at(20);
    assert_eq!(faults.len(), 1);
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn pipeline_output_reaches_the_reaction() {
    use tickup::steps::{Invert, Scale};
    use tickup::PipelineSpec;

    let pad = VirtualPad::new();
    let mut poller = Poller::new();
    let (seen, reaction) = recorder();

    poller.add_binding(
        pad.axis("y"),
        EventKind::Changed,
        Pipeline::new([PipelineSpec::step(Invert), PipelineSpec::step(Scale(2.0))]),
        reaction,
    );

    pad.set_axis("y", -0.25);
    poller.tick_at(0);
    assert_eq!(*seen.lock().unwrap(), vec![Sample::Analog(0.5)]);
}
