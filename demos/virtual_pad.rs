use std::time::Duration;

use tickup::steps::{Deadband, Invert};
use tickup::{EventKind, LogReaction, Pipeline, PipelineSpec, Poller, Sample};

fn main() {
    env_logger::init();

    let pad = tickup::pad::f310::pad();
    let mut poller = Poller::new();

    // Stick drives a value through a shaping pipeline whenever it moves.
    poller.add_binding(
        pad.axis("left_joystick_y"),
        EventKind::Changed,
        Pipeline::new([PipelineSpec::step(Invert), PipelineSpec::step(Deadband(0.1))]),
        LogReaction::new("forward"),
    );

    // Button distinguishes taps from holds.
    poller.add_binding(
        pad.button("a"),
        EventKind::Tapped,
        Pipeline::empty(),
        |_v: Sample| {
            println!("a tapped");
            Ok(())
        },
    );
    poller.add_binding(
        pad.button("a"),
        EventKind::Pressed,
        Pipeline::empty(),
        |_v: Sample| {
            println!("a held");
            Ok(())
        },
    );

    // Host control loop: one tick per cycle, 20 ms cadence. Scripted input
    // nudges the stick, taps the button, then holds it.
    for cycle in 0..30_u64 {
        match cycle {
            2 => pad.set_axis("left_joystick_y", -0.6),
            6 => pad.set_button("a", true),
            8 => pad.set_button("a", false),
            12 => pad.set_button("a", true),
            24 => pad.set_button("a", false),
            _ => {}
        }
        for fault in poller.tick() {
            eprintln!("binding {} faulted: {}", fault.binding, fault.error);
        }
        std::thread::sleep(Duration::from_millis(20));
    }
}
