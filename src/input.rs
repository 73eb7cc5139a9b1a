use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal;
use log::{debug, warn};
use std::collections::HashMap;
use std::io;
use std::time::Duration;

use crate::watch::Button;

/// map of characters read from the keyboard to the watch's buttons. arrows,
/// enter and escape are handled separately in `map_key`
const WATCH_KEYMAP: [(char, Button); 6] = [
    ('m', Button::Mode),      // m
    ('s', Button::Set),       // s
    (',', Button::Prev),      // ,  (also ←)
    ('.', Button::Next),      // .  (also →)
    (' ', Button::StartStop), // space (also enter)
    ('l', Button::Light),     // l
];

/// something the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Press(Button),
    /// the terminal changed size; paint everything again
    Redraw,
    Quit,
}

/// one line describing the keys, for the bottom of the screen
pub fn key_help() -> String {
    "[m] MODE  [s] SET  [←/,] ◀  [→/.] ▶  [space] START/STOP  [l] LIGHT  [q] quit".to_string()
}

/// reads keypresses
pub trait Input {
    /// everything the user has asked for since the last call, oldest first.
    /// never waits for a key
    fn read_commands(&mut self) -> Result<Vec<Command>, io::Error>;
}

/// simple implementation of Input, using the terminal in raw mode
pub struct KeyboardInput {
    keymap: HashMap<char, Button>,
}

impl KeyboardInput {
    /// puts the terminal in raw mode until dropped
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(KeyboardInput {
            keymap: HashMap::from(WATCH_KEYMAP),
        })
    }
}

impl Drop for KeyboardInput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Input for KeyboardInput {
    fn read_commands(&mut self) -> Result<Vec<Command>, io::Error> {
        let mut commands = Vec::new();
        while poll(Duration::from_millis(0))? {
            match read()? {
                Event::Key(evt) => match map_key(&self.keymap, evt) {
                    Some(command) => commands.push(command),
                    None => warn!("can't map {:?} to a watch button", evt.code),
                },
                Event::Resize(w, h) => {
                    debug!("terminal resized to {}x{}", w, h);
                    commands.push(Command::Redraw);
                }
                other => debug!("ignoring terminal event {:?}", other),
            }
        }
        Ok(commands)
    }
}

fn map_key(keymap: &HashMap<char, Button>, evt: KeyEvent) -> Option<Command> {
    match evt.code {
        KeyCode::Char('c') if evt.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Left => Some(Command::Press(Button::Prev)),
        KeyCode::Right => Some(Command::Press(Button::Next)),
        KeyCode::Enter => Some(Command::Press(Button::StartStop)),
        KeyCode::Char(key) => keymap
            .get(&key.to_ascii_lowercase())
            .map(|button| Command::Press(*button)),
        _ => None,
    }
}

/// dummy Input implementation for testing. hands out its commands in
/// batches, one batch per call, then nothing
pub struct DummyInput {
    batches: Vec<Vec<Command>>,
}

impl DummyInput {
    pub fn new(batches: Vec<Vec<Command>>) -> Self {
        let mut batches = batches;
        batches.reverse();
        DummyInput { batches }
    }
}

impl Input for DummyInput {
    fn read_commands(&mut self) -> Result<Vec<Command>, io::Error> {
        Ok(self.batches.pop().unwrap_or_default())
    }
}
