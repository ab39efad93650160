//! Tank Clash entry point
//!
//! Headless driver: loads settings and an optional map, then plays a short
//! scripted match and logs what happened. Windowing backends plug in through
//! `platform::InputSource` and `renderer::Surface`.
//!
//! Usage: `tank-clash [settings.json] [map.csv]`

use tank_clash::platform::{InputSnapshot, Key};
use tank_clash::renderer::Mask;
use tank_clash::sim::{TankClash, tick};
use tank_clash::{GameError, GameSettings};

/// Seconds of scripted play
const SCRIPT_SECONDS: u32 = 5;

fn main() {
    env_logger::init();
    log::info!("Tank Clash (headless) starting...");

    let mut args = std::env::args().skip(1);
    let mut settings = match args.next() {
        Some(path) => GameSettings::load_or_default(path),
        None => GameSettings::default(),
    };
    if let Some(map_path) = args.next() {
        settings.map_path = Some(map_path);
    }

    if let Err(err) = run(settings) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

fn run(settings: GameSettings) -> Result<(), GameError> {
    let ticks = settings.ticks_per_second * SCRIPT_SECONDS;
    let mut game = TankClash::setup(settings)?;
    for player in game.players() {
        log::info!(
            "{} (id {}) at {}",
            player.name,
            player.id,
            player.tank.position()
        );
    }

    let mut input = InputSnapshot::new();
    let (mut fired, mut bounces, mut forced) = (0, 0, 0);
    for t in 0..ticks {
        script_input(&mut input, t);
        let report = tick(&mut game, &input);
        fired += report.fired;
        bounces += report.bounces;
        forced += report.forced();
        input.next_tick();
    }

    for player in game.players() {
        log::info!(
            "{} ends at {} facing {:.2} rad, {} shots live",
            player.name,
            player.tank.position(),
            player.tank.rotation(),
            player.tank.ammo().shots().len()
        );
    }
    log::info!(
        "{} ticks: {} shots fired, {} bounces, {} forced moves",
        game.tick_count(),
        fired,
        bounces,
        forced
    );

    let (width, height) = game.map().size();
    let mut frame = Mask::new(width, height);
    game.draw(&mut frame);
    log::info!("Final frame covers {} pixels", frame.count());
    Ok(())
}

/// Player one drives a loop while firing, player two backs up and turns
fn script_input(input: &mut InputSnapshot, t: u32) {
    let phase = t % 120;
    if phase == 0 {
        input.press(Key::W).hold(Key::Down);
    }
    if phase == 40 {
        input.hold(Key::D).hold(Key::Left);
    }
    if phase == 70 {
        input.release(Key::D).release(Key::Left).press(Key::Space);
    }
    if phase == 90 {
        input.release(Key::Space);
    }
}
