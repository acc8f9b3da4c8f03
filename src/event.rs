use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind};

pub enum Event {
    Key(KeyEvent),
    Tick,
}

/// Pumps key presses and fixed-rate ticks from a background thread.
/// When no key arrives within one tick period a `Tick` is sent instead,
/// so the game advances at the tick rate regardless of input.
pub struct EventHandler {
    events: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || loop {
            let sent = if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    Ok(crossterm::event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        tx.send(Event::Key(key))
                    }
                    // Releases, resizes, mouse events: nothing to do.
                    _ => Ok(()),
                }
            } else {
                tx.send(Event::Tick)
            };
            if sent.is_err() {
                return;
            }
        });

        EventHandler { events: rx }
    }

    pub fn next(&self) -> io::Result<Event> {
        self.events
            .recv()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}
