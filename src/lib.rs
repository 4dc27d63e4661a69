//! ## Design
//!
//! * the machine state is one owned value; the interpreter mutates it
//!   through `&mut`, nothing is global
//! * decode once into an `Instruction` enum; execute with a single match
//! * step and tick are separate so the host can run instructions as fast as
//!   it likes and still count timers down at 60Hz
//! * abstract display, input and audio behind traits so the core never knows
//!   about terminals; starting with TUI in-console
//! * fatal errors (bad memory access, stack over/underflow) come back as
//!   `Chip8Error` with the machine untouched; unknown opcodes are logged and
//!   skipped
//!
//! Model
//!
//! ```text
//! Environment
//!  |-- display, input, sound, config
//!  |-- interpreter(config)
//!  |    |-- machine: memory, registers, stack, timers, framebuffer, keys
//!  |    `-- instruction set
//!  `-- main loop, per frame
//!       |-- keys = input.poll()
//!       |-- cycles_per_frame x interpreter.step()
//!       |-- interpreter.tick()
//!       |-- if redraw { display.draw() }
//!       `-- sleep(rest of frame)
//! ```

pub mod config;
pub mod display;
pub mod environment;
pub mod error;
pub mod framebuffer;
pub mod input;
pub mod instruction;
pub mod interpreter;
pub mod machine;
pub mod memory;
pub mod sound;
pub mod stack;

pub use config::{Config, Quirks};
pub use error::{Chip8Error, Result};
pub use framebuffer::Framebuffer;
pub use instruction::{decode, Instruction, Opcode};
pub use interpreter::Chip8Interpreter;
pub use machine::Machine;
