use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Game;

pub struct App {
    pub should_quit: bool,
    pub game: Game,
}

impl App {
    pub fn new() -> Self {
        App {
            should_quit: false,
            game: Game::new(),
        }
    }

    pub fn on_tick(&mut self) {
        self.game.update();
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => self.game.handle_input(key),
        }
    }
}
