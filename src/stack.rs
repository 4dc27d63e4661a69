/// how many nested subroutine calls the machine supports
pub const CHIP8_STACK_DEPTH: usize = 16;

/// Fixed-depth stack of return addresses. Push and pop refuse rather than
/// wrap, and leave the stack untouched when they do.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallStack {
    frames: [u16; CHIP8_STACK_DEPTH],
    len: usize,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// number of occupied frames, 0..=16
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == CHIP8_STACK_DEPTH
    }

    /// push a return address; None if already full
    pub fn push(&mut self, addr: u16) -> Option<()> {
        let slot = self.frames.get_mut(self.len)?;
        *slot = addr;
        self.len += 1;
        Some(())
    }

    /// pop the most recent return address; None if empty
    pub fn pop(&mut self) -> Option<u16> {
        let top = self.len.checked_sub(1)?;
        self.len = top;
        Some(self.frames[top])
    }

    /// the occupied frames, oldest first
    pub fn frames(&self) -> &[u16] {
        &self.frames[..self.len]
    }
}
