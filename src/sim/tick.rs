//! Per-tick simulation step
//!
//! One call to [`BrickOutModel::update`] is exactly one simulated step. There
//! is no delta-time scaling; the driver owns the frame cadence.

use super::noise::NoiseSource;
use super::state::{Brick, BrickOutModel, GameEvent, GamePhase};
use crate::config::Config;

impl<N: NoiseSource> BrickOutModel<N> {
    /// Advance the game by one tick
    pub fn update(&mut self) {
        match self.phase() {
            GamePhase::Over | GamePhase::Won => return,
            GamePhase::Idle => {
                self.ball.follow_paddle(&self.paddle);
                return;
            }
            GamePhase::Playing => {}
        }

        let bounce = self.ball.update(&mut self.noise);
        if let Some(wall) = bounce.wall {
            log::trace!("Wall bounce ({:?}), speed_x now {}", wall, self.ball.vel.x);
            self.push_event(GameEvent::WallBounce(wall));
        }
        if bounce.ceiling {
            self.push_event(GameEvent::CeilingBounce);
        }

        if self.ball.check_paddle(&self.paddle) {
            self.push_event(GameEvent::PaddleHit {
                paddle_velocity: self.paddle.velocity,
            });
        }

        self.resolve_brick_hits();

        if self.bricks.is_empty() {
            self.game_won = true;
            log::info!("All bricks cleared, game won with score {}", self.score);
            self.push_event(GameEvent::GameWon { score: self.score });
        }

        if self.ball.is_off_bottom() {
            self.lose_life();
        }
    }

    /// Destroy every brick the ball overlaps and bounce vertically.
    ///
    /// The bounce direction comes from the travel direction before the scan,
    /// so hitting several bricks in one tick bounces exactly once.
    fn resolve_brick_hits(&mut self) {
        let hits: Vec<usize> = self
            .bricks
            .iter()
            .enumerate()
            .filter(|(_, brick)| self.ball.hits(brick))
            .map(|(i, _)| i)
            .collect();
        if hits.is_empty() {
            return;
        }

        let vy = self.ball.vel.y;
        self.ball.vel.y = if vy > 0.0 { -vy.abs() } else { vy.abs() };

        let points = u64::from(self.config.points_per_brick);
        for &index in hits.iter().rev() {
            let brick = self.bricks.remove(index);
            self.score += points;
            log::debug!(
                "Brick destroyed at ({}, {}), score {}, {} left",
                brick.x,
                brick.y,
                self.score,
                self.bricks.len()
            );
            self.push_event(GameEvent::BrickDestroyed { brick });
        }
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.push_event(GameEvent::LifeLost {
            lives_left: self.lives,
        });

        if self.lives == 0 {
            self.game_over = true;
            log::info!("Game over with score {}", self.score);
            self.push_event(GameEvent::GameOver { score: self.score });
        } else {
            log::debug!("Life lost, {} remaining", self.lives);
            self.ball.reset();
            self.game_started = false;
        }
    }

    /// Move the paddle toward `x` (clamped). Allowed in every phase.
    pub fn move_paddle(&mut self, x: f32) {
        self.paddle.move_to(x);
    }

    /// Launch from idle; from a terminal phase, start a fresh game instead
    pub fn start_game(&mut self) {
        match self.phase() {
            GamePhase::Idle => {
                self.game_started = true;
                log::info!("Game started ({} lives, score {})", self.lives, self.score);
            }
            GamePhase::Playing => {}
            GamePhase::Over | GamePhase::Won => self.reset(),
        }
    }

    /// Full reinitialization: score, lives, flags, bricks and ball.
    /// The paddle keeps its position.
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.config.starting_lives;
        self.game_started = false;
        self.game_over = false;
        self.game_won = false;
        self.bricks = generate_bricks(&self.config);
        self.ball.reset();
        self.events.clear();
        log::info!("Game reset");
    }
}

/// Lay out the brick grid row by row, top to bottom
pub fn generate_bricks(config: &Config) -> Vec<Brick> {
    let grid = &config.bricks;
    let mut bricks = Vec::with_capacity((grid.rows as usize).saturating_mul(grid.cols as usize));

    for row in 0..grid.rows {
        let Some(color) = grid.colors.get(row as usize % grid.colors.len().max(1)).copied() else {
            log::warn!("No brick colors configured, skipping row {}", row);
            continue;
        };
        let y = grid.offset_top + row as f32 * (grid.height + grid.padding);
        for col in 0..grid.cols {
            let x = grid.offset_left + col as f32 * (grid.width + grid.padding);
            bricks.push(Brick::with_size(x, y, grid.width, grid.height, color));
        }
    }

    bricks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Wall;
    use crate::sim::noise::FixedNoise;
    use crate::sim::state::BrickColor;
    use glam::Vec2;
    use proptest::prelude::*;

    fn game() -> BrickOutModel<FixedNoise> {
        BrickOutModel::with_noise(Config::default(), FixedNoise(0.0))
    }

    #[test]
    fn test_generate_bricks_layout() {
        let bricks = generate_bricks(&Config::default());
        assert_eq!(bricks.len(), 50);

        let first = bricks[0];
        assert_eq!((first.x, first.y), (30.0, 60.0));
        assert_eq!((first.width, first.height), (60.0, 20.0));
        assert_eq!(first.color, BrickColor::RED);

        let last = bricks[49];
        assert_eq!((last.x, last.y), (30.0 + 9.0 * 65.0, 60.0 + 4.0 * 25.0));
        assert_eq!(last.color, BrickColor::BLUE);

        assert_eq!(bricks[10].color, BrickColor::ORANGE);
    }

    #[test]
    fn test_generate_bricks_cycles_colors() {
        let mut config = Config::default();
        config.bricks.rows = 7;
        config.bricks.colors = vec![BrickColor::RED, BrickColor::GREEN];
        let bricks = generate_bricks(&config);
        assert_eq!(bricks.len(), 70);
        assert_eq!(bricks[60].color, BrickColor::RED);
        assert_eq!(bricks[50].color, BrickColor::GREEN);
    }

    #[test]
    fn test_generate_bricks_without_colors_is_empty() {
        let mut config = Config::default();
        config.bricks.colors.clear();
        assert!(generate_bricks(&config).is_empty());
    }

    #[test]
    fn test_start_game() {
        let mut game = game();
        game.start_game();
        assert!(game.game_started());
        assert_eq!(game.phase(), GamePhase::Playing);
        // Starting again while playing changes nothing
        game.start_game();
        assert_eq!(game.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_paddle_moves_in_game() {
        let mut game = game();
        game.move_paddle(200.0);
        assert_eq!(game.paddle().x, 200.0);
    }

    #[test]
    fn test_ball_follows_paddle_before_start() {
        let mut game = game();
        game.move_paddle(200.0);
        game.update();
        assert_eq!(game.ball().pos, Vec2::new(200.0, 440.0));
        assert!(game.events().is_empty());
    }

    #[test]
    fn test_score_increases_when_brick_hit() {
        let mut game = game();
        game.start_game();
        let target = game.bricks()[0];
        let ball = game.ball_mut();
        ball.pos = Vec2::new(target.x + 30.0, target.y + 10.0);
        ball.vel = Vec2::new(0.0, 1.0);

        game.update();

        assert_eq!(game.score(), 10);
        assert_eq!(game.bricks().len(), 49);
        assert!(!game.bricks().contains(&target));
        assert_eq!(game.ball().vel.y, -1.0);
        assert!(game.events().contains(&GameEvent::BrickDestroyed { brick: target }));
    }

    #[test]
    fn test_multi_brick_hit_bounces_once() {
        let mut game = game();
        game.start_game();
        // Straddle the gap between the first two bricks of the top row
        let ball = game.ball_mut();
        ball.pos = Vec2::new(92.5, 70.0);
        ball.vel = Vec2::new(0.0, -2.0);

        game.update();

        assert_eq!(game.bricks().len(), 48);
        assert_eq!(game.score(), 20);
        assert_eq!(game.ball().vel.y, 2.0);
    }

    #[test]
    fn test_game_won_when_bricks_cleared() {
        let mut game = game();
        game.start_game();
        game.bricks_mut().clear();
        game.update();
        assert!(game.game_won());
        assert_eq!(game.phase(), GamePhase::Won);
        assert!(game.events().contains(&GameEvent::GameWon { score: 0 }));
    }

    #[test]
    fn test_idle_with_no_bricks_is_not_won() {
        let mut game = game();
        game.bricks_mut().clear();
        game.update();
        assert!(!game.game_won());
    }

    #[test]
    fn test_life_lost_when_ball_off_bottom() {
        let mut game = game();
        game.start_game();
        game.ball_mut().pos.y = 600.0;
        game.update();
        assert_eq!(game.lives(), 2);
        assert!(!game.game_started());
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.ball().vel, Vec2::new(0.0, -5.0));
        assert!(game.events().contains(&GameEvent::LifeLost { lives_left: 2 }));

        // Next tick the ball snaps back onto the paddle
        game.move_paddle(100.0);
        game.update();
        assert_eq!(game.ball().pos, Vec2::new(100.0, 440.0));
    }

    #[test]
    fn test_game_over_when_lives_exhausted() {
        let mut game = game();
        game.start_game();
        game.set_lives(1);
        game.ball_mut().pos.y = 600.0;
        game.update();
        assert!(game.game_over());
        assert_eq!(game.lives(), 0);
        assert_eq!(game.phase(), GamePhase::Over);
    }

    #[test]
    fn test_terminal_state_freezes_simulation() {
        let mut game = game();
        game.start_game();
        game.set_lives(1);
        game.ball_mut().pos.y = 600.0;
        game.update();
        let ball = game.ball().pos;
        let events = game.events().len();

        for _ in 0..10 {
            game.update();
        }
        assert_eq!(game.ball().pos, ball);
        assert_eq!(game.events().len(), events);
        assert_eq!(game.lives(), 0);

        // Paddle still moves while frozen
        game.move_paddle(123.0);
        assert_eq!(game.paddle().x, 123.0);
    }

    #[test]
    fn test_win_and_loss_on_same_tick() {
        let mut game = game();
        game.start_game();
        game.set_lives(1);
        game.bricks_mut().clear();
        game.ball_mut().pos.y = 600.0;
        game.update();
        assert!(game.game_won());
        assert!(game.game_over());
        assert_eq!(game.phase(), GamePhase::Over);
    }

    #[test]
    fn test_reset() {
        let mut game = game();
        game.set_score(100);
        game.set_lives(1);
        game.start_game();
        game.bricks_mut().clear();
        game.move_paddle(200.0);

        game.reset();

        assert_eq!(game.score(), 0);
        assert_eq!(game.lives(), 3);
        assert!(!game.game_started());
        assert_eq!(game.bricks().len(), 50);
        assert_eq!(game.ball().pos, Vec2::new(350.0, 440.0));
        assert_eq!(game.paddle().x, 200.0);
    }

    #[test]
    fn test_start_game_from_terminal_resets() {
        let mut game = game();
        game.start_game();
        game.set_score(40);
        game.bricks_mut().clear();
        game.update();
        assert!(game.game_won());

        game.start_game();
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.score(), 0);
        assert_eq!(game.bricks().len(), 50);
        assert!(game.events().is_empty());
    }

    #[test]
    fn test_paddle_hit_event() {
        let mut game = game();
        game.start_game();
        game.move_paddle(360.0);
        let ball = game.ball_mut();
        ball.pos = Vec2::new(355.0, 450.0);
        ball.vel = Vec2::new(0.0, 4.0);
        game.update();
        assert!(game.ball().vel.y < 0.0);
        assert_eq!(game.ball().vel.x, 5.0);
        assert!(game.events().contains(&GameEvent::PaddleHit { paddle_velocity: 10.0 }));
    }

    #[test]
    fn test_wall_bounce_event() {
        let mut game = game();
        game.start_game();
        let ball = game.ball_mut();
        ball.pos = Vec2::new(8.0, 300.0);
        ball.vel = Vec2::new(-3.0, 2.0);
        game.update();
        assert_eq!(game.take_events(), vec![GameEvent::WallBounce(Wall::Left)]);
    }

    #[test]
    fn test_determinism() {
        let mut game1 = BrickOutModel::with_seed(700.0, 500.0, 99999);
        let mut game2 = BrickOutModel::with_seed(700.0, 500.0, 99999);

        for g in [&mut game1, &mut game2] {
            g.move_paddle(300.0);
            g.start_game();
            let ball = g.ball_mut();
            ball.vel = Vec2::new(4.0, -5.0);
            for i in 0..2000 {
                let target = g.ball().pos.x + (i as f32 * 0.05).sin() * 30.0;
                g.move_paddle(target);
                g.update();
                if g.phase() == GamePhase::Idle {
                    g.start_game();
                }
            }
        }

        assert_eq!(game1.ball().pos, game2.ball().pos);
        assert_eq!(game1.ball().vel, game2.ball().vel);
        assert_eq!(game1.score(), game2.score());
        assert_eq!(game1.lives(), game2.lives());
        assert_eq!(game1.bricks(), game2.bricks());
    }

    proptest! {
        #[test]
        fn prop_score_and_lives_are_monotonic(
            targets in proptest::collection::vec(0.0f32..700.0, 1..400),
            vx in -6.0f32..6.0,
        ) {
            let mut game = game();
            game.start_game();
            game.ball_mut().vel.x = vx;

            for x in targets {
                let (score, lives, bricks) = (game.score(), game.lives(), game.bricks().len());
                game.move_paddle(x);
                game.update();
                if game.phase() == GamePhase::Idle {
                    game.start_game();
                }

                let destroyed = bricks - game.bricks().len();
                prop_assert_eq!(game.score(), score + 10 * destroyed as u64);
                prop_assert!(game.lives() == lives || game.lives() + 1 == lives);
                if game.lives() < lives {
                    let life_lost = game
                        .events()
                        .iter()
                        .any(|e| matches!(e, GameEvent::LifeLost { .. }));
                    prop_assert!(life_lost, "life lost without a LifeLost event");
                }
                prop_assert_eq!(game.game_won(), game.bricks().is_empty());
            }
        }

        #[test]
        fn prop_terminal_states_freeze(ticks in 1usize..50, won in any::<bool>()) {
            let mut game = game();
            game.start_game();
            if won {
                game.bricks_mut().clear();
            } else {
                game.set_lives(1);
                game.ball_mut().pos.y = 600.0;
            }
            game.update();
            prop_assert!(game.phase().is_terminal());

            let (pos, vel, score, lives, events) =
                (game.ball().pos, game.ball().vel, game.score(), game.lives(), game.events().len());
            for _ in 0..ticks {
                game.update();
            }
            prop_assert_eq!(game.ball().pos, pos);
            prop_assert_eq!(game.ball().vel, vel);
            prop_assert_eq!(game.score(), score);
            prop_assert_eq!(game.lives(), lives);
            prop_assert_eq!(game.events().len(), events);
        }
    }
}
