//! Brick Out headless demo
//!
//! Drives the simulation with a simple autopilot and logs the outcome.
//! Usage: `brick-out [config.json]` (set `RUST_LOG=info` to see progress).

use brick_out::sim::{BrickOutModel, GameEvent, GamePhase, NoiseSource};
use brick_out::{Config, ConfigError};

/// Safety cap on simulated ticks (about five minutes at 60 Hz)
const DEMO_MAX_TICKS: u64 = 18_000;

fn main() {
    env_logger::init();
    log::info!("Brick Out (headless demo) starting...");

    let config = match load_config(std::env::args().nth(1)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut game = BrickOutModel::from_config(config);
    log::info!("Game initialized with seed: {}", game.seed());

    let ticks = run_autopilot(&mut game, DEMO_MAX_TICKS);

    let outcome = match game.phase() {
        GamePhase::Won => "won",
        GamePhase::Over => "lost",
        GamePhase::Idle | GamePhase::Playing => "unfinished",
    };
    log::info!(
        "Demo {} after {} ticks: score {}, lives {}, {} bricks left",
        outcome,
        ticks,
        game.score(),
        game.lives(),
        game.bricks().len()
    );
}

fn load_config(path: Option<String>) -> Result<Config, ConfigError> {
    let config = match path {
        Some(path) => {
            log::info!("Loading config from {}", path);
            Config::from_file(path)?
        }
        None => Config::default(),
    };
    config.validate()?;
    Ok(config)
}

/// Track the ball with a wandering offset so rebounds vary, relaunching
/// after each lost life. Returns the number of ticks simulated.
fn run_autopilot<N: NoiseSource>(game: &mut BrickOutModel<N>, max_ticks: u64) -> u64 {
    game.start_game();

    for tick in 0..max_ticks {
        if game.phase().is_terminal() {
            return tick;
        }

        // Oscillating offset so the paddle imparts some spin
        let time_factor = tick as f32 * 0.01;
        let offset = time_factor.sin() * 30.0 + (time_factor * 0.7).sin() * 15.0;
        let target = game.ball().pos.x + offset;
        game.move_paddle(target);
        game.update();

        for event in game.take_events() {
            match event {
                GameEvent::LifeLost { lives_left } => {
                    log::info!("Life lost at tick {} ({} left)", tick, lives_left);
                }
                GameEvent::GameWon { score } | GameEvent::GameOver { score } => {
                    log::info!("Final score {}", score);
                }
                _ => {}
            }
        }

        if game.phase() == GamePhase::Idle {
            game.start_game();
        }
    }

    max_ticks
}
