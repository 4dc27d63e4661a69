use clap::Parser;
use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

use chip8::config::{Config, Quirks, DEFAULT_CYCLES_PER_FRAME};
use chip8::display::MonoTermDisplay;
use chip8::environment::Environment;
use chip8::framebuffer::{CHIP8_DISPLAY_HEIGHT, CHIP8_DISPLAY_WIDTH};
use chip8::input::TermInput;
use chip8::interpreter::Chip8Interpreter;
use chip8::sound::{Mute, SimpleBeep, Sound};

#[derive(Parser, Debug)]
#[command(name = "chip8", about = "Run a CHIP-8 program in the terminal. Esc quits.")]
struct Args {
    /// program image to load at 0x200
    rom: PathBuf,

    /// instructions per 60Hz frame
    #[arg(long, default_value_t = DEFAULT_CYCLES_PER_FRAME)]
    speed: u32,

    /// stop after this many frames (default: run until Esc)
    #[arg(long)]
    frames: Option<u64>,

    /// seed for the random number instruction
    #[arg(long)]
    seed: Option<u64>,

    /// don't use the PC speaker
    #[arg(long)]
    mute: bool,

    /// 8xy6/8xyE shift VY into VX
    #[arg(long)]
    shift_uses_vy: bool,

    /// Fx55/Fx65 advance I
    #[arg(long)]
    load_store_bumps_index: bool,

    /// 8xy1/8xy2/8xy3 reset VF
    #[arg(long)]
    logic_resets_vf: bool,

    /// Bxnn jumps to xnn + VX
    #[arg(long)]
    jump_uses_vx: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            cycles_per_frame: self.speed,
            max_frames: self.frames,
            seed: self.seed,
            quirks: Quirks {
                shift_uses_vy: self.shift_uses_vy,
                load_store_bumps_index: self.load_store_bumps_index,
                logic_resets_vf: self.logic_resets_vf,
                jump_uses_vx: self.jump_uses_vx,
            },
            ..Config::default()
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();
    let config = args.config();

    // load a program
    let mut f = File::open(&args.rom)?;
    let interpreter = Chip8Interpreter::from_reader(&mut f, &config)?;

    // initialise
    let mut display = MonoTermDisplay::new(CHIP8_DISPLAY_WIDTH, CHIP8_DISPLAY_HEIGHT)?;
    let mut input = TermInput::new()?;
    let mut sound: Box<dyn Sound> = if args.mute {
        Box::new(Mute::new())
    } else {
        Box::new(SimpleBeep::new())
    };

    let summary = Environment::new(
        interpreter,
        &mut display,
        &mut input,
        sound.as_mut(),
        config,
    )
    .main_loop();

    // restore the terminal before reporting anything
    drop(input);
    drop(display);
    let summary = summary?;
    eprintln!(
        "{} frames, {} cycles{}",
        summary.frames,
        summary.cycles,
        if summary.quit { " (quit)" } else { "" }
    );
    Ok(())
}
