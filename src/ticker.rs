//! Per-tick alien block decisions: march the formation, roll the fire
//! gate, and pick which column shoots.
//!
//! The ticker holds no mutable state of its own; each tick borrows the
//! formation and missile pool exclusively, so only one tick can be in
//! flight at a time.

/// Formation columns, matching the classic 11-wide block.
pub const ALIEN_COLS: usize = 11;
/// Default chance, in percent, that the block fires on a given tick.
pub const FIRE_PROBABILITY_PERCENT: u16 = 15;

/// Bottom-most survivor of one formation column, in field coordinates.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ColumnBottom {
    pub x: f32,
    pub y: f32,
}

/// Snapshot value for a column with no survivors. A missile spawned
/// here sits outside the field and is culled before it can interact
/// with anything.
pub const OFFSCREEN: ColumnBottom = ColumnBottom { x: -1.0, y: -1.0 };

/// Random source for tick decisions. Production code wraps a
/// `rand::Rng` in [`RandTickRng`]; tests script the exact sequence.
pub trait TickRng {
    /// Uniform draw in `[1, 100]`.
    fn fire_roll(&mut self) -> u16;
    /// Uniform draw in `[0, count)`.
    fn column_roll(&mut self, count: u16) -> u16;
}

/// Adapts any `rand::Rng` to the tick's two draws.
pub struct RandTickRng<R>(pub R);

impl<R: rand::Rng> TickRng for RandTickRng<R> {
    fn fire_roll(&mut self) -> u16 {
        self.0.gen_range(1..=100)
    }

    fn column_roll(&mut self, count: u16) -> u16 {
        self.0.gen_range(0..count)
    }
}

/// The alien formation as seen by the ticker.
pub trait Formation {
    /// Advance movement state by one tick.
    fn advance(&mut self);
    /// Current lowest surviving alien per column.
    fn lowest_alive(&self) -> [ColumnBottom; ALIEN_COLS];
}

/// Missile spawning seam.
pub trait MissileSink {
    fn spawn_alien_missile(&mut self, x: f32, y: f32);
}

/// Picks the column the next alien missile comes from: uniform over all
/// `count` columns, with no regard for whether a column still has a
/// survivor. Empty columns fire from their offscreen sentinel.
pub fn pick_column(rng: &mut impl TickRng, count: u16) -> u16 {
    rng.column_roll(count)
}

pub struct AlienBlockTicker {
    fire_probability: u16,
}

impl AlienBlockTicker {
    pub fn new() -> Self {
        AlienBlockTicker {
            fire_probability: FIRE_PROBABILITY_PERCENT,
        }
    }

    pub fn with_probability(percent: u16) -> Self {
        AlienBlockTicker {
            fire_probability: percent,
        }
    }

    /// One simulation tick. The formation always marches; a roll `r` in
    /// `[1, 100]` fires iff `r <= fire_probability`.
    pub fn tick(
        &self,
        formation: &mut impl Formation,
        missiles: &mut impl MissileSink,
        rng: &mut impl TickRng,
    ) {
        formation.advance();

        let r = rng.fire_roll();
        if r <= self.fire_probability {
            let bottoms = formation.lowest_alive();
            let col = pick_column(rng, ALIEN_COLS as u16) as usize;
            missiles.spawn_alien_missile(bottoms[col].x, bottoms[col].y);
        }
    }
}
