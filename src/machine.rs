use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::memory::{Chip8MemoryMap, MemoryMap};
use crate::stack::CallStack;

/// number of general registers, V0-VF
pub const CHIP8_REGISTER_COUNT: usize = 16;
/// number of keys on the hex keypad
pub const CHIP8_KEY_COUNT: usize = 16;
/// VF doubles as carry / borrow / collision output
pub const FLAG_REGISTER: usize = 0xf;

/// Everything the interpreter reads and writes. Only the interpreter mutates
/// it, apart from the key map (input adapter) and the redraw flag (renderer).
#[derive(Clone, Debug)]
pub struct Machine {
    pub(crate) memory: Chip8MemoryMap,
    pub(crate) registers: [u8; CHIP8_REGISTER_COUNT],
    pub(crate) index: u16,
    pub(crate) program_counter: u16,
    pub(crate) stack: CallStack,
    pub(crate) delay_timer: u8,
    pub(crate) sound_timer: u8,
    pub(crate) framebuffer: Framebuffer,
    pub(crate) redraw: bool,
    pub(crate) keys: [bool; CHIP8_KEY_COUNT],
    sound_stopped: bool,
}

impl Machine {
    /// zeroed machine with the font in low memory and the program at 0x200.
    /// an oversized program fails before any machine exists
    pub fn initialize(rom: &[u8]) -> Result<Self> {
        let mut memory = Chip8MemoryMap::new();
        memory.load_program(rom)?;
        let program_counter = memory.program_addr;
        Ok(Machine {
            memory,
            registers: [0; CHIP8_REGISTER_COUNT],
            index: 0,
            program_counter,
            stack: CallStack::new(),
            delay_timer: 0,
            sound_timer: 0,
            framebuffer: Framebuffer::default(),
            redraw: false,
            keys: [false; CHIP8_KEY_COUNT],
            sound_stopped: false,
        })
    }

    /// read the instruction word at the program counter
    pub fn fetch(&self) -> Result<u16> {
        self.memory.get_word(self.program_counter)
    }

    /// one 60Hz timer decrement. both timers stop at zero; the sound
    /// timer's 1 -> 0 edge is latched until the next tick
    pub fn tick(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_stopped = self.sound_timer == 1;
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    /// input adapter entry point; indexes past 0xF are ignored
    pub fn set_key(&mut self, key: usize, down: bool) {
        if let Some(k) = self.keys.get_mut(key) {
            *k = down;
        }
    }

    pub fn keys(&self) -> &[bool; CHIP8_KEY_COUNT] {
        &self.keys
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// true when a drawing instruction has changed the framebuffer since the
    /// renderer last called `clear_redraw`
    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }

    pub fn clear_redraw(&mut self) {
        self.redraw = false;
    }

    /// true if the most recent tick took the sound timer from 1 to 0
    pub fn sound_just_stopped(&self) -> bool {
        self.sound_stopped
    }

    /// the tone should be playing
    pub fn is_sound_active(&self) -> bool {
        self.sound_timer > 0
    }

    pub fn registers(&self) -> &[u8; CHIP8_REGISTER_COUNT] {
        &self.registers
    }

    pub fn index(&self) -> u16 {
        self.index
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn stack(&self) -> &CallStack {
        &self.stack
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub fn memory(&self) -> &Chip8MemoryMap {
        &self.memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Chip8Error;

    #[test]
    fn test_initialize() -> Result<()> {
        let m = Machine::initialize(&[0x00, 0xe0, 0x12, 0x00])?;
        assert_eq!(m.program_counter(), 0x200);
        assert_eq!(m.index(), 0);
        assert_eq!(m.registers(), &[0; 16]);
        assert!(m.stack().is_empty());
        assert_eq!(m.memory().get_ro_slice(0x200, 4)?, &[0x00, 0xe0, 0x12, 0x00]);
        assert_eq!(m.memory().get_ro_slice(0, 5)?, &[0xf0, 0x90, 0x90, 0x90, 0xf0]);
        assert!(!m.needs_redraw());
        Ok(())
    }

    #[test]
    fn test_initialize_rejects_oversized_rom() {
        let rom = vec![0u8; 4096 - 0x200 + 1];
        assert!(matches!(
            Machine::initialize(&rom),
            Err(Chip8Error::RomTooLarge { .. })
        ));
    }

    #[test]
    fn test_fetch_big_endian() -> Result<()> {
        let m = Machine::initialize(&[0xa2, 0x2a])?;
        assert_eq!(m.fetch()?, 0xa22a);
        Ok(())
    }

    #[test]
    fn test_fetch_past_end_fails() -> Result<()> {
        let mut m = Machine::initialize(&[])?;
        m.program_counter = 0x0fff;
        assert!(matches!(m.fetch(), Err(Chip8Error::OutOfBounds { .. })));
        Ok(())
    }

    #[test]
    fn test_tick_saturates() -> Result<()> {
        let mut m = Machine::initialize(&[])?;
        m.delay_timer = 30;
        for _ in 0..60 {
            m.tick();
        }
        assert_eq!(m.delay_timer(), 0);
        Ok(())
    }

    #[test]
    fn test_sound_stop_edge() -> Result<()> {
        let mut m = Machine::initialize(&[])?;
        m.sound_timer = 2;
        m.tick();
        assert!(m.is_sound_active());
        assert!(!m.sound_just_stopped());
        m.tick();
        assert!(!m.is_sound_active());
        assert!(m.sound_just_stopped());
        m.tick();
        assert!(!m.sound_just_stopped());
        Ok(())
    }

    #[test]
    fn test_set_key() -> Result<()> {
        let mut m = Machine::initialize(&[])?;
        m.set_key(0xa, true);
        m.set_key(0x10, true);
        assert!(m.keys()[0xa]);
        assert_eq!(m.keys().iter().filter(|&&k| k).count(), 1);
        m.set_key(0xa, false);
        assert!(!m.keys()[0xa]);
        Ok(())
    }
}
