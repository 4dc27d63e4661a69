use chip8::{Chip8Interpreter, Config, Framebuffer, Instruction};
use proptest::prelude::*;

fn interpreter(prog: &[u8]) -> Chip8Interpreter {
    let c = Config {
        seed: Some(0),
        ..Config::default()
    };
    Chip8Interpreter::new(prog, &c).unwrap()
}

proptest! {
    #[test]
    fn add_immediate_wraps(x in 0u8..16, nn in any::<u8>(), nn2 in any::<u8>()) {
        let mut i = interpreter(&[0x60 | x, nn, 0x70 | x, nn2]);
        i.step().unwrap();
        i.step().unwrap();
        prop_assert_eq!(i.machine().registers()[x as usize], nn.wrapping_add(nn2));
        if x != 0xf {
            prop_assert_eq!(i.machine().registers()[0xf], 0);
        }
    }

    #[test]
    fn call_then_return_is_a_no_op(slot in 2u16..0x700) {
        let target = 0x200 + 2 * slot;
        let mut rom = vec![0u8; (target - 0x200) as usize + 2];
        rom[..2].copy_from_slice(&(0x2000 | target).to_be_bytes());
        rom[(target - 0x200) as usize..].copy_from_slice(&[0x00, 0xee]);
        let mut i = interpreter(&rom);
        i.step().unwrap();
        prop_assert_eq!(i.machine().program_counter(), target);
        prop_assert_eq!(i.machine().stack().len(), 1);
        i.step().unwrap();
        prop_assert_eq!(i.machine().program_counter(), 0x202);
        prop_assert!(i.machine().stack().is_empty());
    }

    #[test]
    fn subtract_wraps_and_flags_no_borrow(vx in any::<u8>(), vy in any::<u8>()) {
        let mut i = interpreter(&[0x61, vx, 0x62, vy, 0x81, 0x25]);
        for _ in 0..3 {
            i.step().unwrap();
        }
        prop_assert_eq!(i.machine().registers()[1], vx.wrapping_sub(vy));
        prop_assert_eq!(i.machine().registers()[0xf], (vx >= vy) as u8);
    }

    #[test]
    fn drawing_twice_restores_the_screen(
        x in any::<u8>(),
        y in any::<u8>(),
        sprite in proptest::collection::vec(any::<u8>(), 1..16),
    ) {
        let rows = sprite.len() as u8;
        let mut rom = vec![0xa3, 0x00, 0x60, x, 0x61, y, 0xd0, 0x10 | rows, 0xd0, 0x10 | rows];
        rom.resize(0x100, 0);
        rom.extend_from_slice(&sprite);
        let mut i = interpreter(&rom);
        for _ in 0..4 {
            i.step().unwrap();
        }
        prop_assert_eq!(i.machine().registers()[0xf], 0);
        let lit: u32 = sprite.iter().map(|b| b.count_ones()).sum();
        prop_assert_eq!(i.machine().framebuffer().lit_count() as u32, lit);

        i.step().unwrap();
        prop_assert_eq!(i.machine().framebuffer(), &Framebuffer::default());
        prop_assert_eq!(i.machine().registers()[0xf], (lit > 0) as u8);
    }

    #[test]
    fn delay_timer_never_goes_below_zero(start in any::<u8>(), ticks in 0usize..600) {
        let mut i = interpreter(&[0x60, start, 0xf0, 0x15]);
        i.step().unwrap();
        i.step().unwrap();
        for _ in 0..ticks {
            i.tick();
        }
        let expected = start.saturating_sub(ticks.min(255) as u8);
        prop_assert_eq!(i.machine().delay_timer(), expected);
    }

    #[test]
    fn every_word_either_decodes_or_is_skipped(word in any::<u16>()) {
        let mut i = interpreter(&word.to_be_bytes());
        let before = i.machine().program_counter();
        if Instruction::decode(word).is_none() {
            i.step().unwrap();
            prop_assert_eq!(i.machine().program_counter(), before + 2);
        }
    }
}
