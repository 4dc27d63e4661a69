use chip8::display::DummyDisplay;
use chip8::environment::Environment;
use chip8::input::{DummyInput, InputState};
use chip8::memory::MemoryMap;
use chip8::sound::Mute;
use chip8::{Chip8Error, Chip8Interpreter, Config, Framebuffer, Result};

fn config() -> Config {
    Config {
        seed: Some(0xc8),
        ..Config::default()
    }
}

fn run(prog: &[u8], steps: usize) -> Result<Chip8Interpreter> {
    let mut i = Chip8Interpreter::new(prog, &config())?;
    for _ in 0..steps {
        i.step()?;
    }
    Ok(i)
}

#[test]
fn test_countdown_loop() -> Result<()> {
    #[rustfmt::skip]
    let prog = [
        0x60, 0x05, // 200: V0 = 5
        0x70, 0xff, // 202: V0 += 0xff (-1)
        0x30, 0x00, // 204: skip if V0 == 0
        0x12, 0x02, // 206: jump 202
        0x12, 0x08, // 208: spin
    ];
    let i = run(&prog, 1 + 5 * 3)?;
    assert_eq!(i.machine().registers()[0], 0);
    assert_eq!(i.machine().program_counter(), 0x208);
    assert_eq!(i.machine().registers()[0xf], 0);
    Ok(())
}

#[test]
fn test_bcd_then_draw_digit() -> Result<()> {
    #[rustfmt::skip]
    let prog = [
        0x60, 0x89, // V0 = 137
        0xa3, 0x00, // I = 0x300
        0xf0, 0x33, // BCD V0 -> [I]
        0xf2, 0x65, // V0..V2 = [I]
        0xf0, 0x29, // I = glyph V0
        0x63, 0x08, // V3 = 8
        0xd3, 0x35, // draw 5 rows at (V3, V3)
    ];
    let i = run(&prog, 7)?;
    let m = i.machine();
    assert_eq!(m.memory().get_ro_slice(0x300, 3)?, &[1, 3, 7]);
    assert_eq!(&m.registers()[..3], &[1, 3, 7]);
    assert_eq!(m.index(), 5);
    // glyph "1" is 0x20 0x60 0x20 0x20 0x70
    assert_eq!(m.framebuffer().lit_count(), 8);
    assert!(m.framebuffer().get(10, 8));
    assert!(m.framebuffer().get(9, 9));
    assert!(m.needs_redraw());
    Ok(())
}

#[test]
fn test_sixteen_nested_calls_then_overflow() -> Result<()> {
    // each word calls the next one
    let mut prog = Vec::new();
    for n in 1..=17u16 {
        let target = 0x200 + 2 * n;
        prog.extend_from_slice(&(0x2000 | target).to_be_bytes());
    }
    let mut i = run(&prog, 16)?;
    assert_eq!(i.machine().stack().len(), 16);
    assert_eq!(i.machine().stack().frames()[15], 0x21e);
    match i.step() {
        Err(Chip8Error::StackOverflow { pc }) => assert_eq!(pc, 0x220),
        other => panic!("expected stack overflow, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_return_unwinds_to_each_caller() -> Result<()> {
    #[rustfmt::skip]
    let prog = [
        0x22, 0x06, // 200: call a
        0x12, 0x02, // 202: spin
        0x00, 0x00, // 204
        0x22, 0x0a, // 206: a: call b
        0x00, 0xee, // 208: return
        0x71, 0x01, // 20a: b: V1 += 1
        0x00, 0xee, // 20c: return
    ];
    let i = run(&prog, 6)?;
    assert_eq!(i.machine().program_counter(), 0x202);
    assert_eq!(i.machine().registers()[1], 1);
    assert!(i.machine().stack().is_empty());
    Ok(())
}

#[test]
fn test_unknown_opcode_does_not_stop_execution() -> Result<()> {
    let prog = [0xff, 0xff, 0x80, 0x0f, 0x65, 0x2a];
    let i = run(&prog, 3)?;
    assert_eq!(i.machine().registers()[5], 0x2a);
    assert_eq!(i.machine().program_counter(), 0x206);
    Ok(())
}

#[test]
fn test_oversized_rom_rejected() {
    let rom = vec![0x12; 4096 - 0x200 + 1];
    match Chip8Interpreter::new(&rom, &config()) {
        Err(Chip8Error::RomTooLarge { len, capacity }) => {
            assert_eq!(len, 0xe01);
            assert_eq!(capacity, 0xe00);
        }
        Err(e) => panic!("unexpected error {}", e),
        Ok(_) => panic!("oversized rom accepted"),
    }
}

#[test]
fn test_jump_past_memory_is_out_of_bounds() -> Result<()> {
    // V0 = 0xff; jump 0xf01 + V0 = 0x1000
    let mut i = run(&[0x60, 0xff, 0xbf, 0x01], 2)?;
    assert_eq!(i.machine().program_counter(), 0x1000);
    assert!(matches!(i.step(), Err(Chip8Error::OutOfBounds { .. })));
    Ok(())
}

#[test]
fn test_environment_runs_interactive_program() -> Result<()> {
    #[rustfmt::skip]
    let prog = [
        0xf1, 0x0a, // 200: V1 = await key
        0xf1, 0x29, // 202: I = glyph V1
        0xd0, 0x05, // 204: draw at (V0, V0)
        0x62, 0x05, // 206: V2 = 5
        0xf2, 0x15, // 208: DT = V2
        0xf3, 0x07, // 20a: V3 = DT
        0x33, 0x00, // 20c: skip if V3 == 0
        0x12, 0x0a, // 20e: jump 20a
        0x12, 0x10, // 210: spin
    ];
    let c = Config {
        cycles_per_frame: 8,
        max_frames: Some(12),
        ..config()
    };
    let i = Chip8Interpreter::new(&prog, &c)?;
    let idle = InputState::default();
    let script = [idle, idle, InputState::with_keys(&[0x8])];
    let (mut d, mut inp, mut s) = (DummyDisplay::new(), DummyInput::new(&script), Mute::new());
    let mut env = Environment::new(i, &mut d, &mut inp, &mut s, c);
    let summary = env.main_loop()?;
    assert_eq!(summary.frames, 12);
    assert!(!summary.quit);
    let m = env.interpreter().machine();
    assert_eq!(m.registers()[1], 0x8);
    assert_eq!(m.delay_timer(), 0);
    assert_eq!(m.program_counter(), 0x210);
    drop(env);

    // glyph "8" is 0xf0 0x90 0xf0 0x90 0xf0
    let mut expected = Framebuffer::default();
    expected.draw_sprite(0, 0, &[0xf0, 0x90, 0xf0, 0x90, 0xf0]);
    assert_eq!(d.frames_drawn, 1);
    assert_eq!(d.last_frame, Some(expected));
    Ok(())
}
