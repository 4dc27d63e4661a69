use crate::machine::CHIP8_KEY_COUNT;
use crossterm::event::{poll, read, Event, KeyCode};
use crossterm::terminal;
use log::debug;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::time::Duration;

/// the hex keypad on the left-hand side of a qwerty keyboard
///   1 2 3 C     1 2 3 4
///   4 5 6 D  => q w e r
///   7 8 9 E     a s d f
///   A 0 B F     z x c v
const CHIP8_CONVENTIONAL_KEYMAP: [(char, u8); 16] = [
    ('x', 0x00),
    ('1', 0x01),
    ('2', 0x02),
    ('3', 0x03),
    ('q', 0x04),
    ('w', 0x05),
    ('e', 0x06),
    ('a', 0x07),
    ('s', 0x08),
    ('d', 0x09),
    ('z', 0x0a),
    ('c', 0x0b),
    ('4', 0x0c),
    ('r', 0x0d),
    ('f', 0x0e),
    ('v', 0x0f),
];

/// terminals only report presses (and autorepeat), so a key counts as held
/// for this many frames after its last press
const KEY_HOLD_FRAMES: u8 = 6;

/// what the host learned from the input device this frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub keys: [bool; CHIP8_KEY_COUNT],
    pub quit: bool,
}

impl InputState {
    /// a state with only `down` pressed
    pub fn with_keys(down: &[u8]) -> Self {
        let mut state = InputState::default();
        for &k in down {
            if let Some(key) = state.keys.get_mut(k as usize) {
                *key = true;
            }
        }
        state
    }

    pub fn quit() -> Self {
        InputState {
            quit: true,
            ..InputState::default()
        }
    }
}

/// reads keypresses
pub trait Input {
    /// gather whatever happened since the last poll
    fn poll(&mut self) -> Result<InputState, io::Error>;
}

/// turns a stream of press events into held keys that time out
#[derive(Clone, Debug, Default)]
struct KeyHold {
    frames_left: [u8; CHIP8_KEY_COUNT],
}

impl KeyHold {
    fn press(&mut self, key: u8) {
        self.frames_left[key as usize & 0x0f] = KEY_HOLD_FRAMES;
    }

    /// age every key by one frame
    fn advance(&mut self) {
        for f in self.frames_left.iter_mut() {
            *f = f.saturating_sub(1);
        }
    }

    fn keys(&self) -> [bool; CHIP8_KEY_COUNT] {
        self.frames_left.map(|f| f > 0)
    }
}

/// implementation of Input for the terminal, using crossterm events
pub struct TermInput {
    keymap: HashMap<char, u8>,
    held: KeyHold,
}

impl TermInput {
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(TermInput {
            keymap: HashMap::from(CHIP8_CONVENTIONAL_KEYMAP),
            held: KeyHold::default(),
        })
    }
}

impl Drop for TermInput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Input for TermInput {
    fn poll(&mut self) -> Result<InputState, io::Error> {
        self.held.advance();
        let mut quit = false;
        while poll(Duration::from_millis(0))? {
            match read()? {
                Event::Key(evt) => match evt.code {
                    KeyCode::Char(c) => match self.keymap.get(&c.to_ascii_lowercase()) {
                        Some(&key) => self.held.press(key),
                        None => debug!("can't map {:?} to a COSMAC key", c),
                    },
                    KeyCode::Esc => quit = true,
                    other => debug!("ignoring key {:?}", other),
                },
                other => debug!("ignoring event {:?}", other),
            }
        }
        Ok(InputState {
            keys: self.held.keys(),
            quit,
        })
    }
}

/// dummy Input implementation for testing; replays one state per poll, then
/// reports nothing pressed
pub struct DummyInput {
    script: VecDeque<InputState>,
}

impl DummyInput {
    pub fn new(script: &[InputState]) -> Self {
        DummyInput {
            script: script.iter().copied().collect(),
        }
    }
}

impl Input for DummyInput {
    fn poll(&mut self) -> Result<InputState, io::Error> {
        Ok(self.script.pop_front().unwrap_or_default())
    }
}
