//! The host side: wires an interpreter to a display, an input device and a
//! speaker, and paces it to wallclock time.
//!
//! Each frame (1/60s by default):
//!  1. poll input and copy all 16 key states into the machine
//!  2. run `cycles_per_frame` instructions as fast as they go
//!  3. start the tone if the sound timer is running
//!  4. tick the timers once
//!  5. redraw if anything was drawn, then acknowledge the redraw flag
//!  6. stop the tone once the sound timer has run out
//!  7. sleep off whatever is left of the frame
use crate::config::Config;
use crate::display::Display;
use crate::error::{Chip8Error, Result};
use crate::input::Input;
use crate::interpreter::Chip8Interpreter;
use crate::sound::Sound;
use log::{error, info, warn};
use std::time::Instant;

/// why and when the main loop stopped
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub cycles: u64,
    pub quit: bool,
}

pub struct Environment<'a> {
    interpreter: Chip8Interpreter,
    display: &'a mut dyn Display,
    input: &'a mut dyn Input,
    sound: &'a mut dyn Sound,
    config: Config,
}

impl<'a> Environment<'a> {
    pub fn new(
        interpreter: Chip8Interpreter,
        display: &'a mut dyn Display,
        input: &'a mut dyn Input,
        sound: &'a mut dyn Sound,
        config: Config,
    ) -> Self {
        Environment {
            interpreter,
            display,
            input,
            sound,
            config,
        }
    }

    pub fn interpreter(&self) -> &Chip8Interpreter {
        &self.interpreter
    }

    /// run one frame; Ok(false) if the user asked to quit
    pub fn run_frame(&mut self) -> Result<bool> {
        let state = self.input.poll()?;
        if state.quit {
            return Ok(false);
        }
        for (key, &down) in state.keys.iter().enumerate() {
            self.interpreter.set_key(key, down);
        }

        for _ in 0..self.config.cycles_per_frame {
            self.interpreter.step()?;
        }
        // a timer set this frame sounds even if it runs out on this tick
        if self.interpreter.machine().is_sound_active() && !self.sound.is_beeping() {
            self.sound.beep().map_err(audio)?;
        }
        self.interpreter.tick();

        if self.interpreter.machine().needs_redraw() {
            self.display.draw(self.interpreter.machine().framebuffer())?;
            self.interpreter.machine_mut().clear_redraw();
        }

        let machine = self.interpreter.machine();
        let ran_out = !machine.is_sound_active() && self.sound.is_beeping();
        if machine.sound_just_stopped() || ran_out {
            self.sound.stop().map_err(audio)?;
        }
        Ok(true)
    }

    /// run frames until quit, `max_frames`, or a fatal error
    pub fn main_loop(&mut self) -> Result<RunSummary> {
        let frame_duration = self.config.frame_duration();
        let mut summary = RunSummary::default();
        let result = loop {
            if self.config.max_frames.map_or(false, |max| summary.frames >= max) {
                break Ok(());
            }
            let start = Instant::now();
            match self.run_frame() {
                Ok(true) => {}
                Ok(false) => {
                    summary.quit = true;
                    break Ok(());
                }
                Err(e) => break Err(e),
            }
            summary.frames += 1;
            summary.cycles += self.config.cycles_per_frame as u64;
            if let Some(left) = frame_duration.checked_sub(start.elapsed()) {
                spin_sleep::sleep(left);
            }
        };

        if self.sound.is_beeping() {
            if let Err(e) = self.sound.stop() {
                warn!("could not stop tone: {}", e);
            }
        }
        match result {
            Ok(()) => {
                info!(
                    "stopped after {} frames ({} cycles)",
                    summary.frames, summary.cycles
                );
                Ok(summary)
            }
            Err(e) => {
                error!(
                    "halted at {:#05x} after {} frames: {}",
                    self.interpreter.machine().program_counter(),
                    summary.frames,
                    e
                );
                Err(e)
            }
        }
    }
}

fn audio(e: Box<dyn std::error::Error>) -> Chip8Error {
    Chip8Error::Audio(e.to_string())
}
