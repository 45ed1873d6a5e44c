use std::time::Duration;

use tickup::reaction::Reaction;
use tickup::{Poller, Profile, Sample};

const TELEOP: &str = r#"
name = "teleop"
description = "Demo drive bindings"

[[bindings]]
input = "left_joystick_x"
event = "changed"
steps = ["invert", { deadband = { width = 0.15 } }, { scale = { factor = 0.5 } }]
action = "strafe"

[[bindings]]
input = "a"
event = "tapped"
action = "shift_gear"
"#;

fn action(name: &str) -> Option<Box<dyn Reaction>> {
    let name = name.to_string();
    Some(Box::new(move |v: Sample| {
        println!("{name} <- {v}");
        Ok(())
    }))
}

fn main() {
    env_logger::init();

    let profile = Profile::from_toml_str(TELEOP).expect("parse profile");
    println!(
        "loaded `{}` with {} binding(s)",
        profile.name,
        profile.bindings.len()
    );

    let pad = tickup::pad::f310::pad();
    let mut poller = Poller::new();
    profile
        .instantiate(&mut poller, |name| pad.source(name), action)
        .expect("instantiate profile");

    for cycle in 0..20_u64 {
        // Wiggle the stick and tap the button partway through.
        pad.set_axis("left_joystick_x", (cycle as f64 / 10.0).sin());
        pad.set_button("a", (4..8).contains(&cycle));

        poller.tick();
        std::thread::sleep(Duration::from_millis(20));
    }
}
