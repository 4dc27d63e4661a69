//! # interpreter
//!
//! One `step` is one fetch / decode / execute of a CHIP-8 instruction
//! against a `Machine`. Timers are not touched by `step`; the host calls
//! `tick` at 60Hz independently of how fast it steps.
//!
//! Handlers report how the program counter should move instead of writing
//! it themselves:
//!  * `Next`    -- +2, the usual case
//!  * `Skip`    -- +4, a skip instruction whose condition held
//!  * `Goto(a)` -- jumps, calls and returns
//!  * `Wait`    -- Fx0A with no key down; run the same instruction again
//!    on the next step
//!
//! Fatal conditions are detected before anything is written, so a failed
//! step leaves the machine exactly as it was.

use crate::config::{Config, Quirks};
use crate::error::{Chip8Error, Result};
use crate::instruction::{Instruction, Reg};
use crate::machine::{Machine, FLAG_REGISTER};
use crate::memory::{Chip8MemoryMap, MemoryMap};
use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Advance {
    Next,
    Skip,
    Goto(u16),
    Wait,
}

fn skip_if(condition: bool) -> Advance {
    if condition {
        Advance::Skip
    } else {
        Advance::Next
    }
}

pub struct Chip8Interpreter {
    machine: Machine,
    rng: StdRng,
    quirks: Quirks,
}

impl Chip8Interpreter {
    /// set up a machine with `rom` loaded at 0x200
    pub fn new(rom: &[u8], config: &Config) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Chip8Interpreter {
            machine: Machine::initialize(rom)?,
            rng,
            quirks: config.quirks,
        })
    }

    /// load a chip8 program of unknown length
    pub fn from_reader(reader: &mut impl io::Read, config: &Config) -> Result<Self> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;
        Self::new(&rom, config)
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    /// for the host adapters: key map writes and redraw acknowledgement
    pub fn machine_mut(&mut self) -> &mut Machine {
        &mut self.machine
    }

    /// fetch, decode and execute one instruction
    pub fn step(&mut self) -> Result<()> {
        let pc = self.machine.program_counter;
        let word = self.machine.fetch()?;
        match Instruction::decode(word) {
            Some(instruction) => {
                trace!("{:#05x}: {:04x}  {}", pc, word, instruction);
                self.execute(instruction)
            }
            None => {
                warn!("unknown opcode {:04x} at {:#05x}; skipping", word, pc);
                self.machine.program_counter = pc.wrapping_add(2);
                Ok(())
            }
        }
    }

    /// run one already-decoded instruction
    pub fn execute(&mut self, instruction: Instruction) -> Result<()> {
        execute(&mut self.machine, instruction, &mut self.rng, &self.quirks)
    }

    /// 60Hz timer decrement
    pub fn tick(&mut self) {
        self.machine.tick()
    }

    pub fn set_key(&mut self, key: usize, down: bool) {
        self.machine.set_key(key, down)
    }
}

/// run `instruction` against `m`, then move the program counter
pub fn execute(
    m: &mut Machine,
    instruction: Instruction,
    rng: &mut impl Rng,
    quirks: &Quirks,
) -> Result<()> {
    use Instruction::*;
    let pc = m.program_counter;
    let advance = match instruction {
        ClearScreen => {
            m.framebuffer.clear();
            m.redraw = true;
            Advance::Next
        }
        Return => {
            let ret = m.stack.pop().ok_or(Chip8Error::StackUnderflow { pc })?;
            Advance::Goto(ret.wrapping_add(2))
        }
        MachineRoutine(addr) => {
            debug!("ignoring machine code routine {:#05x} at {:#05x}", addr, pc);
            Advance::Next
        }
        Jump(addr) => Advance::Goto(addr),
        Call(addr) => {
            m.stack.push(pc).ok_or(Chip8Error::StackOverflow { pc })?;
            Advance::Goto(addr)
        }
        SkipEqImm { x, nn } => skip_if(m.registers[x] == nn),
        SkipNeImm { x, nn } => skip_if(m.registers[x] != nn),
        SkipEqReg { x, y } => skip_if(m.registers[x] == m.registers[y]),
        SkipNeReg { x, y } => skip_if(m.registers[x] != m.registers[y]),
        LoadImm { x, nn } => {
            m.registers[x] = nn;
            Advance::Next
        }
        AddImm { x, nn } => {
            m.registers[x] = m.registers[x].wrapping_add(nn);
            Advance::Next
        }
        CopyReg { x, y } => {
            m.registers[x] = m.registers[y];
            Advance::Next
        }
        Or { x, y } => logic(m, x, y, quirks, |a, b| a | b),
        And { x, y } => logic(m, x, y, quirks, |a, b| a & b),
        Xor { x, y } => logic(m, x, y, quirks, |a, b| a ^ b),
        AddCarry { x, y } => {
            let (sum, carry) = m.registers[x].overflowing_add(m.registers[y]);
            m.registers[x] = sum;
            m.registers[FLAG_REGISTER] = carry as u8;
            Advance::Next
        }
        Sub { x, y } => {
            let (diff, borrow) = m.registers[x].overflowing_sub(m.registers[y]);
            m.registers[x] = diff;
            m.registers[FLAG_REGISTER] = !borrow as u8;
            Advance::Next
        }
        SubReverse { x, y } => {
            let (diff, borrow) = m.registers[y].overflowing_sub(m.registers[x]);
            m.registers[x] = diff;
            m.registers[FLAG_REGISTER] = !borrow as u8;
            Advance::Next
        }
        ShiftRight { x, y } => {
            let src = shift_source(m, x, y, quirks);
            m.registers[x] = src >> 1;
            m.registers[FLAG_REGISTER] = src & 0x01;
            Advance::Next
        }
        ShiftLeft { x, y } => {
            let src = shift_source(m, x, y, quirks);
            m.registers[x] = src << 1;
            m.registers[FLAG_REGISTER] = src >> 7;
            Advance::Next
        }
        LoadIndex(addr) => {
            m.index = addr;
            Advance::Next
        }
        JumpOffset(addr) => {
            let base = if quirks.jump_uses_vx {
                m.registers[(addr >> 8) as Reg]
            } else {
                m.registers[0]
            };
            Advance::Goto(addr + base as u16)
        }
        Random { x, mask } => {
            m.registers[x] = rng.gen::<u8>() & mask;
            Advance::Next
        }
        Draw { x, y, rows } => {
            let sprite = m.memory.get_ro_slice(m.index, rows as usize)?;
            let (px, py) = (m.registers[x] as usize, m.registers[y] as usize);
            let collision = m.framebuffer.draw_sprite(px, py, sprite);
            m.registers[FLAG_REGISTER] = collision as u8;
            m.redraw = true;
            Advance::Next
        }
        SkipKeyDown { x } => skip_if(m.keys[key_index(m, x)]),
        SkipKeyUp { x } => skip_if(!m.keys[key_index(m, x)]),
        ReadDelay { x } => {
            m.registers[x] = m.delay_timer;
            Advance::Next
        }
        AwaitKey { x } => match m.keys.iter().position(|&down| down) {
            Some(key) => {
                m.registers[x] = key as u8;
                Advance::Next
            }
            None => Advance::Wait,
        },
        WriteDelay { x } => {
            m.delay_timer = m.registers[x];
            Advance::Next
        }
        WriteSound { x } => {
            m.sound_timer = m.registers[x];
            Advance::Next
        }
        AddIndex { x } => {
            m.index = m.index.wrapping_add(m.registers[x] as u16);
            Advance::Next
        }
        FontGlyph { x } => {
            m.index = Chip8MemoryMap::font_addr(m.registers[x]);
            Advance::Next
        }
        Bcd { x } => {
            let v = m.registers[x];
            m.memory
                .get_rw_slice(m.index, 3)?
                .copy_from_slice(&[v / 100, v / 10 % 10, v % 10]);
            Advance::Next
        }
        DumpRegisters { x } => {
            m.memory
                .get_rw_slice(m.index, x + 1)?
                .copy_from_slice(&m.registers[..=x]);
            bump_index(m, x, quirks);
            Advance::Next
        }
        LoadRegisters { x } => {
            let src = m.memory.get_ro_slice(m.index, x + 1)?;
            m.registers[..=x].copy_from_slice(src);
            bump_index(m, x, quirks);
            Advance::Next
        }
    };

    m.program_counter = match advance {
        Advance::Next => pc.wrapping_add(2),
        Advance::Skip => pc.wrapping_add(4),
        Advance::Goto(addr) => addr,
        Advance::Wait => pc,
    };
    Ok(())
}

/// 8xy1 / 8xy2 / 8xy3
fn logic(m: &mut Machine, x: Reg, y: Reg, quirks: &Quirks, op: fn(u8, u8) -> u8) -> Advance {
    m.registers[x] = op(m.registers[x], m.registers[y]);
    if quirks.logic_resets_vf {
        m.registers[FLAG_REGISTER] = 0;
    }
    Advance::Next
}

fn shift_source(m: &Machine, x: Reg, y: Reg, quirks: &Quirks) -> u8 {
    if quirks.shift_uses_vy {
        m.registers[y]
    } else {
        m.registers[x]
    }
}

// only the low nibble of Vx names a key
fn key_index(m: &Machine, x: Reg) -> usize {
    (m.registers[x] & 0x0f) as usize
}

fn bump_index(m: &mut Machine, x: Reg, quirks: &Quirks) {
    if quirks.load_store_bumps_index {
        m.index = m.index.wrapping_add(x as u16 + 1);
    }
}
