//! The marching alien grid.
//!
//! Aliens live in a fixed rows-by-columns grid of alive flags hanging
//! off a drifting origin; positions are derived, never stored per
//! alien. The whole block steps sideways on a thinning-dependent
//! interval and descends when it reaches a field edge.

use crate::ticker::{ColumnBottom, Formation, ALIEN_COLS, OFFSCREEN};

pub const ALIEN_ROWS: usize = 5;
const H_SPACING: f32 = 4.5;
const V_SPACING: f32 = 3.5;
const STEP: f32 = 0.8;
const DESCEND: f32 = 1.2;
const EDGE_MARGIN: f32 = 2.0;
const START_Y: f32 = 3.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AlienKind {
    Top,
    Mid,
    Bot,
}

impl AlienKind {
    pub fn points(self) -> u32 {
        match self {
            AlienKind::Top => 30,
            AlienKind::Mid => 20,
            AlienKind::Bot => 10,
        }
    }

    fn for_row(row: usize) -> Self {
        match row {
            0 => AlienKind::Top,
            1 | 2 => AlienKind::Mid,
            _ => AlienKind::Bot,
        }
    }
}

pub struct AlienFormation {
    alive: [[bool; ALIEN_COLS]; ALIEN_ROWS],
    origin_x: f32,
    origin_y: f32,
    dir: f32,
    move_timer: u64,
    field_width: f32,
}

impl AlienFormation {
    pub fn new(field_width: f32) -> Self {
        let start_x = (field_width - (ALIEN_COLS as f32 - 1.0) * H_SPACING) / 2.0;
        AlienFormation {
            alive: [[true; ALIEN_COLS]; ALIEN_ROWS],
            origin_x: start_x,
            origin_y: START_Y,
            dir: 1.0,
            move_timer: 0,
            field_width,
        }
    }

    fn pos(&self, row: usize, col: usize) -> (f32, f32) {
        (
            self.origin_x + col as f32 * H_SPACING,
            self.origin_y + row as f32 * V_SPACING,
        )
    }

    pub fn alive_count(&self) -> usize {
        self.alive
            .iter()
            .map(|row| row.iter().filter(|&&a| a).count())
            .sum()
    }

    pub fn is_cleared(&self) -> bool {
        self.alive_count() == 0
    }

    /// True if any survivor has descended to or past `y`.
    pub fn reaches(&self, y: f32) -> bool {
        for row in (0..ALIEN_ROWS).rev() {
            for col in 0..ALIEN_COLS {
                if self.alive[row][col] && self.pos(row, col).1 >= y {
                    return true;
                }
            }
        }
        false
    }

    /// Kind and position of every survivor, for rendering.
    pub fn alive_aliens(&self) -> Vec<(AlienKind, f32, f32)> {
        let mut out = Vec::with_capacity(self.alive_count());
        for row in 0..ALIEN_ROWS {
            for col in 0..ALIEN_COLS {
                if self.alive[row][col] {
                    let (x, y) = self.pos(row, col);
                    out.push((AlienKind::for_row(row), x, y));
                }
            }
        }
        out
    }

    /// Kills the first survivor whose hitbox contains `(x, y)` and
    /// returns its kind, or `None` on a miss.
    pub fn hit_test(&mut self, x: f32, y: f32) -> Option<AlienKind> {
        for row in 0..ALIEN_ROWS {
            for col in 0..ALIEN_COLS {
                if !self.alive[row][col] {
                    continue;
                }
                let (ax, ay) = self.pos(row, col);
                if (x - ax).abs() < 2.0 && (y - ay).abs() < 1.5 {
                    self.alive[row][col] = false;
                    return Some(AlienKind::for_row(row));
                }
            }
        }
        None
    }

    /// Block ticks between sideways steps; the block speeds up as it
    /// thins out.
    fn step_interval(&self) -> u64 {
        let alive = self.alive_count();
        let total = ALIEN_ROWS * ALIEN_COLS;
        if alive <= 1 {
            1
        } else if alive <= total / 4 {
            2
        } else if alive <= total / 2 {
            3
        } else {
            4
        }
    }

    fn would_hit_edge(&self) -> bool {
        for col in 0..ALIEN_COLS {
            if !(0..ALIEN_ROWS).any(|row| self.alive[row][col]) {
                continue;
            }
            let next_x = self.origin_x + col as f32 * H_SPACING + self.dir * STEP;
            if next_x < EDGE_MARGIN || next_x > self.field_width - EDGE_MARGIN {
                return true;
            }
        }
        false
    }

    #[cfg(test)]
    fn kill(&mut self, row: usize, col: usize) {
        self.alive[row][col] = false;
    }
}

impl Formation for AlienFormation {
    fn advance(&mut self) {
        self.move_timer += 1;
        if self.move_timer < self.step_interval() {
            return;
        }
        self.move_timer = 0;

        if self.would_hit_edge() {
            self.origin_y += DESCEND;
            self.dir = -self.dir;
        } else {
            self.origin_x += self.dir * STEP;
        }
    }

    fn lowest_alive(&self) -> [ColumnBottom; ALIEN_COLS] {
        let mut bottoms = [OFFSCREEN; ALIEN_COLS];
        for col in 0..ALIEN_COLS {
            for row in (0..ALIEN_ROWS).rev() {
                if self.alive[row][col] {
                    let (x, y) = self.pos(row, col);
                    bottoms[col] = ColumnBottom { x, y };
                    break;
                }
            }
        }
        bottoms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELD_WIDTH: f32 = 80.0;

    #[test]
    fn lowest_alive_is_the_bottom_row_when_full() {
        let formation = AlienFormation::new(FIELD_WIDTH);
        let bottoms = formation.lowest_alive();
        let expect_y = START_Y + (ALIEN_ROWS as f32 - 1.0) * V_SPACING;

        for (col, bottom) in bottoms.iter().enumerate() {
            assert_ne!(*bottom, OFFSCREEN);
            assert_eq!(bottom.y, expect_y);
            assert_eq!(bottom.x, formation.origin_x + col as f32 * H_SPACING);
        }
    }

    #[test]
    fn killing_the_bottom_alien_promotes_the_one_above() {
        let mut formation = AlienFormation::new(FIELD_WIDTH);
        formation.kill(ALIEN_ROWS - 1, 4);

        let bottoms = formation.lowest_alive();
        assert_eq!(bottoms[4].y, START_Y + (ALIEN_ROWS as f32 - 2.0) * V_SPACING);
    }

    #[test]
    fn cleared_column_reports_the_offscreen_sentinel() {
        let mut formation = AlienFormation::new(FIELD_WIDTH);
        for row in 0..ALIEN_ROWS {
            formation.kill(row, 0);
        }

        let bottoms = formation.lowest_alive();
        assert_eq!(bottoms[0], OFFSCREEN);
        assert_ne!(bottoms[1], OFFSCREEN);
    }

    #[test]
    fn block_descends_and_reverses_at_the_edge() {
        let mut formation = AlienFormation::new(FIELD_WIDTH);
        let start_y = formation.origin_y;

        // March long enough to hit the right edge at least once.
        for _ in 0..400 {
            formation.advance();
        }

        assert!(formation.origin_y > start_y);
        // Every survivor stayed inside the field.
        for (_, x, _) in formation.alive_aliens() {
            assert!(x >= EDGE_MARGIN - STEP && x <= FIELD_WIDTH - EDGE_MARGIN + STEP);
        }
    }

    #[test]
    fn hit_test_kills_exactly_one_alien_and_reports_its_kind() {
        let mut formation = AlienFormation::new(FIELD_WIDTH);
        let before = formation.alive_count();
        let (x, y) = formation.pos(0, 2);

        assert_eq!(formation.hit_test(x, y), Some(AlienKind::Top));
        assert_eq!(formation.alive_count(), before - 1);
        // Same spot again misses.
        assert_eq!(formation.hit_test(x, y), None);
    }

    #[test]
    fn row_kinds_follow_the_classic_point_table() {
        assert_eq!(AlienKind::for_row(0).points(), 30);
        assert_eq!(AlienKind::for_row(1).points(), 20);
        assert_eq!(AlienKind::for_row(2).points(), 20);
        assert_eq!(AlienKind::for_row(3).points(), 10);
        assert_eq!(AlienKind::for_row(4).points(), 10);
    }

    #[test]
    fn thinned_block_steps_more_often() {
        let mut full = AlienFormation::new(FIELD_WIDTH);
        let mut thin = AlienFormation::new(FIELD_WIDTH);
        for row in 0..ALIEN_ROWS {
            for col in 0..ALIEN_COLS {
                if !(row == 0 && col == 0) {
                    thin.kill(row, col);
                }
            }
        }

        let full_x0 = full.origin_x;
        let thin_x0 = thin.origin_x;
        for _ in 0..4 {
            full.advance();
            thin.advance();
        }

        // The lone survivor steps every tick, the full block every 4th.
        assert!((thin.origin_x - thin_x0).abs() > (full.origin_x - full_x0).abs());
    }

    #[test]
    fn hit_test_row1_promotes_mid_kind() {
        let mut formation = AlienFormation::new(FIELD_WIDTH);
        let (x, y) = formation.pos(1, 0);
        // Row 0 is 3.5 units above row 1; the hitbox is tight enough
        // not to bleed across rows.
        assert_eq!(formation.hit_test(x, y), Some(AlienKind::Mid));
    }
}
