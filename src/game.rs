//! One game session: the player cannon, the alien block, the missile
//! pools, and the HUD trackers, advanced a frame at a time.

use crossterm::event::{KeyCode, KeyEvent};

use crate::formation::AlienFormation;
use crate::hud::{HudPanel, LivesTracker, ScoreTracker, LIVES_MAX};
use crate::missiles::Missiles;
use crate::ticker::{AlienBlockTicker, RandTickRng};

pub const FIELD_WIDTH: f32 = 80.0;
pub const FIELD_HEIGHT: f32 = 35.0;
const PLAYER_SPEED: f32 = 1.5;
const PLAYER_MARGIN: f32 = 3.0;
// The alien block state machine runs at a fraction of the frame rate.
const BLOCK_TICK_FRAMES: u64 = 6;
// Aliens descending past this line overrun the player.
const INVASION_Y: f32 = FIELD_HEIGHT - 4.0;

pub struct Game {
    pub player_x: f32,
    pub formation: AlienFormation,
    pub missiles: Missiles,
    pub score: ScoreTracker,
    pub lives: LivesTracker,
    pub hud: HudPanel,
    ticker: AlienBlockTicker,
    pub wave: u32,
    pub game_over: bool,
    pub paused: bool,
    pub frame: u64,
}

impl Game {
    pub fn new() -> Self {
        let mut hud = HudPanel::new();
        let mut score = ScoreTracker::new();
        let mut lives = LivesTracker::new();

        // Initial screen state: a '0' in the score readout, a full row
        // of life indicators.
        score.redraw(&mut hud);
        lives.increase(LIVES_MAX as i8, &mut hud);

        Game {
            player_x: FIELD_WIDTH / 2.0,
            formation: AlienFormation::new(FIELD_WIDTH),
            missiles: Missiles::new(FIELD_HEIGHT),
            score,
            lives,
            hud,
            ticker: AlienBlockTicker::new(),
            wave: 1,
            game_over: false,
            paused: false,
            frame: 0,
        }
    }

    pub fn player_y(&self) -> f32 {
        FIELD_HEIGHT - 2.5
    }

    pub fn update(&mut self) {
        if self.game_over || self.paused {
            return;
        }
        self.frame += 1;

        self.missiles.update();
        if self.frame % BLOCK_TICK_FRAMES == 0 {
            self.ticker.tick(
                &mut self.formation,
                &mut self.missiles,
                &mut RandTickRng(rand::thread_rng()),
            );
        }
        self.check_collisions();
    }

    fn check_collisions(&mut self) {
        // Player shots vs aliens
        let mut spent = Vec::new();
        for (i, shot) in self.missiles.player_shots.iter().enumerate() {
            if let Some(kind) = self.formation.hit_test(shot.x, shot.y) {
                self.score.increase(kind.points() as i32, &mut self.hud);
                spent.push(i);
            }
        }
        for &i in spent.iter().rev() {
            self.missiles.player_shots.remove(i);
        }

        // Alien missiles vs player
        let py = self.player_y();
        let mut hits = Vec::new();
        for (i, missile) in self.missiles.alien_missiles.iter().enumerate() {
            let dx = (missile.x - self.player_x).abs();
            let dy = (missile.y - py).abs();
            if dx < 2.5 && dy < 1.2 {
                hits.push(i);
            }
        }
        for &i in hits.iter().rev() {
            self.missiles.alien_missiles.remove(i);
            if self.lives.increase(-1, &mut self.hud) == 0 {
                self.game_over = true;
            }
        }

        // Aliens overrunning the player
        if self.formation.reaches(INVASION_Y) {
            self.game_over = true;
        }

        // Cleared wave
        if self.formation.is_cleared() {
            self.wave += 1;
            self.formation = AlienFormation::new(FIELD_WIDTH);
            self.missiles.clear();
        }
    }

    pub fn handle_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => self.reset(),
            KeyCode::Char('p') | KeyCode::Char('P') => {
                if !self.game_over {
                    self.paused = !self.paused;
                }
            }
            _ => {
                if self.game_over {
                    if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                        self.reset();
                    }
                    return;
                }
                if self.paused {
                    return;
                }
                match key.code {
                    KeyCode::Left => {
                        self.player_x = (self.player_x - PLAYER_SPEED).max(PLAYER_MARGIN);
                    }
                    KeyCode::Right => {
                        self.player_x =
                            (self.player_x + PLAYER_SPEED).min(FIELD_WIDTH - PLAYER_MARGIN);
                    }
                    KeyCode::Char(' ') | KeyCode::Up => {
                        self.missiles
                            .fire_player_shot(self.player_x, self.player_y() - 2.0);
                    }
                    _ => {}
                }
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Game::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hud::HudCell;
    use crate::ticker::{Formation, MissileSink};

    #[test]
    fn new_game_draws_zero_score_and_full_lives() {
        let game = Game::new();
        assert_eq!(game.score.score(), 0);
        assert_eq!(game.lives.lives(), LIVES_MAX);
        assert_eq!(game.hud.score_cells[0], HudCell::Digit(0));
        assert!(game.hud.score_cells[1..]
            .iter()
            .all(|&c| c == HudCell::Blank));
        assert!(game.hud.life_slots.iter().all(|&slot| slot));
    }

    #[test]
    fn shooting_an_alien_scores_and_updates_the_hud() {
        let mut game = Game::new();
        let bottoms = game.formation.lowest_alive();
        game.missiles.fire_player_shot(bottoms[0].x, bottoms[0].y);

        let before = game.formation.alive_count();
        game.check_collisions();

        assert_eq!(game.formation.alive_count(), before - 1);
        // Bottom-row aliens are worth 10.
        assert_eq!(game.score.score(), 10);
        assert_eq!(game.hud.score_cells[0], HudCell::Digit(1));
        assert_eq!(game.hud.score_cells[1], HudCell::Digit(0));
        assert!(game.missiles.player_shots.is_empty());
    }

    #[test]
    fn missile_hits_cost_lives_and_end_the_game_at_zero() {
        let mut game = Game::new();
        for expected in (0..LIVES_MAX).rev() {
            game.missiles
                .spawn_alien_missile(game.player_x, game.player_y() - 1.0);
            game.check_collisions();
            assert_eq!(game.lives.lives(), expected);
        }
        assert!(game.game_over);
        assert!(game.hud.life_slots.iter().all(|&slot| !slot));
    }

    #[test]
    fn clearing_the_formation_starts_the_next_wave() {
        let mut game = Game::new();
        for (_, x, y) in game.formation.alive_aliens() {
            game.formation.hit_test(x, y);
        }
        assert!(game.formation.is_cleared());

        game.check_collisions();
        assert_eq!(game.wave, 2);
        assert!(!game.formation.is_cleared());
        assert!(!game.game_over);
    }

    #[test]
    fn update_is_inert_while_paused_or_over() {
        let mut game = Game::new();
        game.paused = true;
        game.update();
        assert_eq!(game.frame, 0);

        game.paused = false;
        game.game_over = true;
        game.update();
        assert_eq!(game.frame, 0);
    }
}
