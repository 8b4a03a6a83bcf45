//! Simple Survivor headless runner
//!
//! Plays one match with a scripted pilot at a fixed 60 Hz frame rate and prints
//! the result. Rendering and real input belong to the host application.
//!
//! Usage: `simple-survivor [seed] [ship]`

use glam::Vec2;

use simple_survivor::persistence::Slot;
use simple_survivor::sim::{GameEvent, GameState, TickInput};
use simple_survivor::{HighScores, Session, Settings, ShipClass, Tuning, platform};

const FRAME_DT: f32 = 1.0 / 60.0;

fn main() {
    platform::init_logging();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5EED);
    let mut settings = Settings::load(&Settings::slot());
    if let Some(ship) = args.next().as_deref().and_then(ShipClass::from_str) {
        settings.ship = ship;
    }

    let tuning = match std::fs::read_to_string("tuning.json") {
        Ok(json) => Tuning::from_json(&json).unwrap_or_else(|err| {
            log::warn!("tuning.json ignored: {}", err);
            Tuning::default()
        }),
        Err(_) => Tuning::default(),
    };

    let mut session = Session::new(&settings, tuning, seed);
    let summary = loop {
        let input = pilot(session.state());
        if let Some(summary) = session.frame(&input, FRAME_DT) {
            break summary;
        }
        for event in session.take_events() {
            if let GameEvent::EnemyKilled { id, kind } = event {
                log::debug!("Killed {} enemy {}", kind.as_str(), id);
            }
        }
    };

    println!(
        "{}! score {}, {} enemies defeated, {}s played",
        if summary.won { "Survived" } else { "Destroyed" },
        summary.score,
        summary.enemies_defeated,
        summary.seconds_played()
    );

    let slot = HighScores::slot();
    let mut scores = HighScores::load(&slot);
    if let Some(rank) = summary.submit(&mut scores, "pilot") {
        println!("New high score, rank #{}", rank);
        if let Err(err) = scores.save(&slot) {
            log::error!("Could not save high scores: {}", err);
        }
    }
    print_scores(&scores, &slot);
}

/// Aim at the nearest enemy and strafe away from it
fn pilot(state: &GameState) -> TickInput {
    let player = state.player.pos;
    let nearest = state.enemies.iter().min_by(|a, b| {
        a.pos
            .distance_squared(player)
            .total_cmp(&b.pos.distance_squared(player))
    });

    match nearest {
        Some(enemy) => {
            let to_enemy = (enemy.pos - player).normalize_or_zero();
            TickInput {
                move_dir: (-to_enemy + to_enemy.perp() * 0.5).normalize_or_zero(),
                aim_dir: to_enemy,
                aiming: true,
                pause: false,
            }
        }
        None => TickInput {
            move_dir: Vec2::ZERO,
            ..Default::default()
        },
    }
}

fn print_scores(scores: &HighScores, slot: &Slot) {
    println!("High scores ({}):", slot.key());
    for (i, entry) in scores.entries().iter().enumerate() {
        println!("{:>2}. {:<12} {}", i + 1, entry.name, entry.score);
    }
}
