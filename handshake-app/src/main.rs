use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use glam::Vec2;
use handshake::{
    render_sequence, ArmRig, DebugView, FixedStepRunner, GestureToken, Handshake,
    HandshakeConfig, InputEvent, ManualClock, ReferenceWorld, RigConfig, RunnerConfig,
    WorldConfig,
};

const FRAME_DELTA: f64 = 1.0 / 60.0;

/// Logs debug-view toggles in place of a renderer.
struct ConsoleView;

impl DebugView for ConsoleView {
    fn set_debug_view(&mut self, enabled: bool) {
        log::info!("debug view {}", if enabled { "on" } else { "off" });
    }
}

/// Headless handshake demo: replays a scripted pointer path against the
/// reference world and checks the recorded gestures against a password.
#[derive(Parser, Debug)]
#[command(name = "handshake-app")]
#[command(about = "Gesture password demo on the reference world", long_about = None)]
#[command(version)]
struct Cli {
    /// Password tokens (top, bottom, front)
    #[arg(default_value = "front")]
    password: Vec<GestureToken>,

    /// Turn the debug view on
    #[arg(long)]
    debug: bool,
}

/// Pointer waypoints and how many frames to hold each one.
fn pointer_script(center: Vec2) -> Vec<(Vec2, u32)> {
    vec![
        // Pull the hands together
        (center + Vec2::new(180.0, 0.0), 90),
        (center + Vec2::new(-180.0, 0.0), 60),
        // Left hand drops while the right rises
        (center + Vec2::new(120.0, 120.0), 90),
        (center + Vec2::new(120.0, -120.0), 90),
        (center, 60),
    ]
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let clock = ManualClock::new();
    let config = HandshakeConfig::default();
    let center = config.container.center();
    let mut handshake = Handshake::with_clock(config, clock.clone())?;
    handshake.set_password(cli.password.iter().copied());
    handshake.add_debug_view(Box::new(ConsoleView));
    handshake.set_debug_view(cli.debug);

    let changes = Rc::new(RefCell::new(0usize));
    let counter = changes.clone();
    let subscription = handshake.on_password_changed(move |sequence, token| {
        *counter.borrow_mut() += 1;
        match token {
            Some(token) => println!("+{token}  {}", render_sequence(sequence)),
            None => println!("(reset)"),
        }
    });

    let mut world = ReferenceWorld::new(WorldConfig::default());
    ArmRig::spawn(&mut world, &RigConfig::default())?;
    let mut runner = FixedStepRunner::new(RunnerConfig::default());

    println!("password: {}", render_sequence(&cli.password));
    handshake.handle_input(&InputEvent::PointerEnter)?;
    for (position, frames) in pointer_script(center) {
        handshake.handle_input(&InputEvent::PointerMove { position })?;
        for _ in 0..frames {
            clock.advance(Duration::from_secs_f64(FRAME_DELTA));
            runner.run_frame(&mut world, &mut handshake, FRAME_DELTA)?;
        }
    }

    let confirmed = handshake.confirm()?;
    println!(
        "recorded: {} ({} changes, {} steps)",
        render_sequence(handshake.sequence()),
        changes.borrow(),
        world.steps()
    );
    println!("{}", if confirmed { "access granted" } else { "access denied" });

    subscription.unsubscribe();
    handshake.dispose();
    Ok(())
}
