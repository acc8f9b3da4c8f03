//! Projectiles for both sides: a capped pool of player shots moving up
//! and a capped pool of alien missiles moving down.

use crate::ticker::MissileSink;

pub const MAX_PLAYER_SHOTS: usize = 3;
pub const MAX_ALIEN_MISSILES: usize = 5;
const PLAYER_SHOT_SPEED: f32 = 0.8;
const ALIEN_MISSILE_SPEED: f32 = 0.4;

#[derive(Clone, Copy)]
pub struct Missile {
    pub x: f32,
    pub y: f32,
    dy: f32,
}

pub struct Missiles {
    pub player_shots: Vec<Missile>,
    pub alien_missiles: Vec<Missile>,
    field_height: f32,
}

impl Missiles {
    pub fn new(field_height: f32) -> Self {
        Missiles {
            player_shots: Vec::new(),
            alien_missiles: Vec::new(),
            field_height,
        }
    }

    /// Fires a shot from the player cannon, if the pool has room.
    pub fn fire_player_shot(&mut self, x: f32, y: f32) -> bool {
        if self.player_shots.len() >= MAX_PLAYER_SHOTS {
            return false;
        }
        self.player_shots.push(Missile {
            x,
            y,
            dy: -PLAYER_SHOT_SPEED,
        });
        true
    }

    /// Integrates every projectile one frame and culls whatever left
    /// the field. Missiles fired from an empty column's offscreen
    /// sentinel have a negative x and are discarded here before they
    /// can interact with anything.
    pub fn update(&mut self) {
        for shot in &mut self.player_shots {
            shot.y += shot.dy;
        }
        self.player_shots.retain(|s| s.y > -1.0);

        let field_height = self.field_height;
        for missile in &mut self.alien_missiles {
            missile.y += missile.dy;
        }
        self.alien_missiles
            .retain(|m| m.x >= 0.0 && m.y < field_height + 1.0);
    }

    pub fn clear(&mut self) {
        self.player_shots.clear();
        self.alien_missiles.clear();
    }
}

impl MissileSink for Missiles {
    fn spawn_alien_missile(&mut self, x: f32, y: f32) {
        if self.alien_missiles.len() >= MAX_ALIEN_MISSILES {
            return;
        }
        // Missiles leave from just below the firing alien.
        self.alien_missiles.push(Missile {
            x,
            y: y + 1.0,
            dy: ALIEN_MISSILE_SPEED,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticker::OFFSCREEN;

    #[test]
    fn player_shot_pool_is_capped() {
        let mut missiles = Missiles::new(35.0);
        for _ in 0..MAX_PLAYER_SHOTS {
            assert!(missiles.fire_player_shot(40.0, 32.0));
        }
        assert!(!missiles.fire_player_shot(40.0, 32.0));
        assert_eq!(missiles.player_shots.len(), MAX_PLAYER_SHOTS);
    }

    #[test]
    fn alien_missile_pool_is_capped() {
        let mut missiles = Missiles::new(35.0);
        for _ in 0..10 {
            missiles.spawn_alien_missile(12.0, 17.0);
        }
        assert_eq!(missiles.alien_missiles.len(), MAX_ALIEN_MISSILES);
    }

    #[test]
    fn projectiles_move_and_leave_the_field() {
        let mut missiles = Missiles::new(10.0);
        missiles.fire_player_shot(5.0, 1.0);
        missiles.spawn_alien_missile(5.0, 8.5);

        for _ in 0..10 {
            missiles.update();
        }
        assert!(missiles.player_shots.is_empty());
        assert!(missiles.alien_missiles.is_empty());
    }

    #[test]
    fn sentinel_spawn_is_discarded_on_the_next_update() {
        let mut missiles = Missiles::new(35.0);
        missiles.spawn_alien_missile(OFFSCREEN.x, OFFSCREEN.y);
        assert_eq!(missiles.alien_missiles.len(), 1);

        missiles.update();
        assert!(missiles.alien_missiles.is_empty());
    }

    #[test]
    fn clear_empties_both_pools() {
        let mut missiles = Missiles::new(35.0);
        missiles.fire_player_shot(5.0, 30.0);
        missiles.spawn_alien_missile(5.0, 17.0);
        missiles.clear();
        assert!(missiles.player_shots.is_empty());
        assert!(missiles.alien_missiles.is_empty());
    }
}
