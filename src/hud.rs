//! Score and lives HUD state.
//!
//! The trackers own the numeric value and its on-screen representation.
//! All drawing goes through the [`HudDraw`] seam as cell/slot state
//! descriptors, so the logic runs without a terminal and the renderer
//! only has to repaint what a tracker reported.

/// Largest displayable score. Must fit in `SCORE_DIGITS` digits.
pub const SCORE_MAX: u32 = 99_999;
/// Fixed capacity of the score readout, in digit cells.
pub const SCORE_DIGITS: usize = 5;
/// Number of life indicator slots.
pub const LIVES_MAX: u8 = 3;

/// What a single score cell shows on screen.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HudCell {
    Digit(u8),
    Blank,
}

/// Render seam for the HUD. Cells and slots are indexed left to right.
pub trait HudDraw {
    fn draw_score_cell(&mut self, cell: usize, state: HudCell);
    fn draw_life_slot(&mut self, slot: usize, active: bool);
}

/// A score exploded into decimal digits, most significant first,
/// left-justified in a fixed-capacity buffer with an explicit length.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ScoreDigits {
    digits: [u8; SCORE_DIGITS],
    len: u8,
}

impl ScoreDigits {
    pub fn encode(mut score: u32) -> Self {
        let mut digits = [0u8; SCORE_DIGITS];
        if score == 0 {
            return ScoreDigits { digits, len: 1 };
        }

        // Peel digits least-significant-first into the tail of a scratch
        // buffer, then shift them to the front so blanks trail.
        let mut tmp = [0u8; SCORE_DIGITS];
        let mut count = 0usize;
        while score > 0 {
            tmp[SCORE_DIGITS - 1 - count] = (score % 10) as u8;
            score /= 10;
            count += 1;
        }
        digits[..count].copy_from_slice(&tmp[SCORE_DIGITS - count..]);

        ScoreDigits {
            digits,
            len: count as u8,
        }
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// The significant digits, most significant first.
    pub fn as_slice(&self) -> &[u8] {
        &self.digits[..self.len as usize]
    }

    /// Cell `i` shows its digit iff `i < len`; everything past the
    /// length is background.
    fn cell(&self, i: usize) -> HudCell {
        if i < self.len as usize {
            HudCell::Digit(self.digits[i])
        } else {
            HudCell::Blank
        }
    }
}

/// Owns the current score and its digit representation.
pub struct ScoreTracker {
    score: u32,
    digits: ScoreDigits,
}

impl ScoreTracker {
    pub fn new() -> Self {
        ScoreTracker {
            score: 0,
            digits: ScoreDigits::encode(0),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn digits(&self) -> &ScoreDigits {
        &self.digits
    }

    /// Apply a signed delta, clamping the sum to `[0, SCORE_MAX]`, and
    /// request redraws for the cells whose contents changed. Returns the
    /// new score.
    pub fn increase(&mut self, delta: i32, hud: &mut impl HudDraw) -> u32 {
        let sum = i64::from(self.score) + i64::from(delta);
        let new_score = sum.clamp(0, i64::from(SCORE_MAX)) as u32;
        self.set_score(new_score, hud)
    }

    fn set_score(&mut self, score: u32, hud: &mut impl HudDraw) -> u32 {
        let next = ScoreDigits::encode(score);
        for i in 0..SCORE_DIGITS {
            if next.cell(i) != self.digits.cell(i) {
                hud.draw_score_cell(i, next.cell(i));
            }
        }
        // Stored state updates even when nothing was drawn.
        self.digits = next;
        self.score = score;
        self.score
    }

    /// Draw every cell regardless of previous contents. Used when the
    /// screen is (re)initialized.
    pub fn redraw(&self, hud: &mut impl HudDraw) {
        for i in 0..SCORE_DIGITS {
            hud.draw_score_cell(i, self.digits.cell(i));
        }
    }
}

/// Owns the current life count.
pub struct LivesTracker {
    lives: u8,
}

impl LivesTracker {
    pub fn new() -> Self {
        LivesTracker { lives: 0 }
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    /// Apply a signed delta, clamping to `[0, LIVES_MAX]`, and redraw
    /// every indicator slot. Returns the new count.
    pub fn increase(&mut self, delta: i8, hud: &mut impl HudDraw) -> u8 {
        let sum = i16::from(self.lives) + i16::from(delta);
        let new_lives = sum.clamp(0, i16::from(LIVES_MAX)) as u8;
        self.set_lives(new_lives, hud)
    }

    fn set_lives(&mut self, lives: u8, hud: &mut impl HudDraw) -> u8 {
        // Unlike the score cells, every slot repaints on every update.
        for slot in 0..LIVES_MAX as usize {
            hud.draw_life_slot(slot, slot < lives as usize);
        }
        self.lives = lives;
        self.lives
    }
}

/// Retained cell states backing the terminal HUD. The trackers push
/// updates through [`HudDraw`]; the renderer reads the stored states
/// each frame.
pub struct HudPanel {
    pub score_cells: [HudCell; SCORE_DIGITS],
    pub life_slots: [bool; LIVES_MAX as usize],
}

impl HudPanel {
    pub fn new() -> Self {
        HudPanel {
            score_cells: [HudCell::Blank; SCORE_DIGITS],
            life_slots: [false; LIVES_MAX as usize],
        }
    }
}

impl HudDraw for HudPanel {
    fn draw_score_cell(&mut self, cell: usize, state: HudCell) {
        if cell < SCORE_DIGITS {
            self.score_cells[cell] = state;
        }
    }

    fn draw_life_slot(&mut self, slot: usize, active: bool) {
        if slot < LIVES_MAX as usize {
            self.life_slots[slot] = active;
        }
    }
}
