use std::fmt;

/// index of a general register, 0x0-0xF
pub type Reg = usize;

/// The four nibbles of an instruction word, most significant first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Opcode {
    pub op: u8,
    pub x: u8,
    pub y: u8,
    pub n: u8,
}

impl Opcode {
    /// low 12 bits; an address
    pub fn nnn(&self) -> u16 {
        (self.x as u16) << 8 | (self.y as u16) << 4 | self.n as u16
    }

    /// low byte; an immediate
    pub fn nn(&self) -> u8 {
        self.y << 4 | self.n
    }
}

/// split a big-endian instruction word into nibbles. never fails; whether
/// the nibbles mean anything is decided by `Instruction::from_opcode`
pub fn decode(word: u16) -> Opcode {
    Opcode {
        op: (word >> 12) as u8,
        x: (word >> 8 & 0xf) as u8,
        y: (word >> 4 & 0xf) as u8,
        n: (word & 0xf) as u8,
    }
}

/// The CHIP-8 instruction set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    ClearScreen,
    /// 00EE
    Return,
    /// 0nnn, machine code routine on the COSMAC VIP; ignored
    MachineRoutine(u16),
    /// 1nnn
    Jump(u16),
    /// 2nnn
    Call(u16),
    /// 3xnn
    SkipEqImm { x: Reg, nn: u8 },
    /// 4xnn
    SkipNeImm { x: Reg, nn: u8 },
    /// 5xy0
    SkipEqReg { x: Reg, y: Reg },
    /// 6xnn
    LoadImm { x: Reg, nn: u8 },
    /// 7xnn, no carry flag
    AddImm { x: Reg, nn: u8 },
    /// 8xy0
    CopyReg { x: Reg, y: Reg },
    /// 8xy1
    Or { x: Reg, y: Reg },
    /// 8xy2
    And { x: Reg, y: Reg },
    /// 8xy3
    Xor { x: Reg, y: Reg },
    /// 8xy4, VF = carry
    AddCarry { x: Reg, y: Reg },
    /// 8xy5, Vx = Vx - Vy, VF = not borrow
    Sub { x: Reg, y: Reg },
    /// 8xy6, VF = bit shifted out
    ShiftRight { x: Reg, y: Reg },
    /// 8xy7, Vx = Vy - Vx, VF = not borrow
    SubReverse { x: Reg, y: Reg },
    /// 8xyE, VF = bit shifted out
    ShiftLeft { x: Reg, y: Reg },
    /// 9xy0
    SkipNeReg { x: Reg, y: Reg },
    /// Annn
    LoadIndex(u16),
    /// Bnnn
    JumpOffset(u16),
    /// Cxnn
    Random { x: Reg, mask: u8 },
    /// Dxyn
    Draw { x: Reg, y: Reg, rows: u8 },
    /// Ex9E
    SkipKeyDown { x: Reg },
    /// ExA1
    SkipKeyUp { x: Reg },
    /// Fx07
    ReadDelay { x: Reg },
    /// Fx0A
    AwaitKey { x: Reg },
    /// Fx15
    WriteDelay { x: Reg },
    /// Fx18
    WriteSound { x: Reg },
    /// Fx1E
    AddIndex { x: Reg },
    /// Fx29
    FontGlyph { x: Reg },
    /// Fx33
    Bcd { x: Reg },
    /// Fx55
    DumpRegisters { x: Reg },
    /// Fx65
    LoadRegisters { x: Reg },
}

impl Instruction {
    /// match the nibbles against the instruction set; None for combinations
    /// the machine doesn't define
    pub fn from_opcode(o: Opcode) -> Option<Self> {
        use Instruction::*;
        let (x, y) = (o.x as Reg, o.y as Reg);
        let i = match (o.op, o.x, o.y, o.n) {
            (0x0, 0x0, 0xe, 0x0) => ClearScreen,
            (0x0, 0x0, 0xe, 0xe) => Return,
            (0x0, _, _, _) => MachineRoutine(o.nnn()),
            (0x1, _, _, _) => Jump(o.nnn()),
            (0x2, _, _, _) => Call(o.nnn()),
            (0x3, _, _, _) => SkipEqImm { x, nn: o.nn() },
            (0x4, _, _, _) => SkipNeImm { x, nn: o.nn() },
            (0x5, _, _, 0x0) => SkipEqReg { x, y },
            (0x6, _, _, _) => LoadImm { x, nn: o.nn() },
            (0x7, _, _, _) => AddImm { x, nn: o.nn() },
            (0x8, _, _, 0x0) => CopyReg { x, y },
            (0x8, _, _, 0x1) => Or { x, y },
            (0x8, _, _, 0x2) => And { x, y },
            (0x8, _, _, 0x3) => Xor { x, y },
            (0x8, _, _, 0x4) => AddCarry { x, y },
            (0x8, _, _, 0x5) => Sub { x, y },
            (0x8, _, _, 0x6) => ShiftRight { x, y },
            (0x8, _, _, 0x7) => SubReverse { x, y },
            (0x8, _, _, 0xe) => ShiftLeft { x, y },
            (0x9, _, _, 0x0) => SkipNeReg { x, y },
            (0xa, _, _, _) => LoadIndex(o.nnn()),
            (0xb, _, _, _) => JumpOffset(o.nnn()),
            (0xc, _, _, _) => Random { x, mask: o.nn() },
            (0xd, _, _, _) => Draw { x, y, rows: o.n },
            (0xe, _, 0x9, 0xe) => SkipKeyDown { x },
            (0xe, _, 0xa, 0x1) => SkipKeyUp { x },
            (0xf, _, 0x0, 0x7) => ReadDelay { x },
            (0xf, _, 0x0, 0xa) => AwaitKey { x },
            (0xf, _, 0x1, 0x5) => WriteDelay { x },
            (0xf, _, 0x1, 0x8) => WriteSound { x },
            (0xf, _, 0x1, 0xe) => AddIndex { x },
            (0xf, _, 0x2, 0x9) => FontGlyph { x },
            (0xf, _, 0x3, 0x3) => Bcd { x },
            (0xf, _, 0x5, 0x5) => DumpRegisters { x },
            (0xf, _, 0x6, 0x5) => LoadRegisters { x },
            _ => return None,
        };
        Some(i)
    }

    /// decode straight from an instruction word
    pub fn decode(word: u16) -> Option<Self> {
        Self::from_opcode(decode(word))
    }
}

/// conventional (Cowgod-style) mnemonics
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match *self {
            ClearScreen => write!(f, "CLS"),
            Return => write!(f, "RET"),
            MachineRoutine(a) => write!(f, "SYS {:#05x}", a),
            Jump(a) => write!(f, "JP {:#05x}", a),
            Call(a) => write!(f, "CALL {:#05x}", a),
            SkipEqImm { x, nn } => write!(f, "SE V{:X}, {:#04x}", x, nn),
            SkipNeImm { x, nn } => write!(f, "SNE V{:X}, {:#04x}", x, nn),
            SkipEqReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            LoadImm { x, nn } => write!(f, "LD V{:X}, {:#04x}", x, nn),
            AddImm { x, nn } => write!(f, "ADD V{:X}, {:#04x}", x, nn),
            CopyReg { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddCarry { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight { x, y } => write!(f, "SHR V{:X}, V{:X}", x, y),
            SubReverse { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft { x, y } => write!(f, "SHL V{:X}, V{:X}", x, y),
            SkipNeReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex(a) => write!(f, "LD I, {:#05x}", a),
            JumpOffset(a) => write!(f, "JP V0, {:#05x}", a),
            Random { x, mask } => write!(f, "RND V{:X}, {:#04x}", x, mask),
            Draw { x, y, rows } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, rows),
            SkipKeyDown { x } => write!(f, "SKP V{:X}", x),
            SkipKeyUp { x } => write!(f, "SKNP V{:X}", x),
            ReadDelay { x } => write!(f, "LD V{:X}, DT", x),
            AwaitKey { x } => write!(f, "LD V{:X}, K", x),
            WriteDelay { x } => write!(f, "LD DT, V{:X}", x),
            WriteSound { x } => write!(f, "LD ST, V{:X}", x),
            AddIndex { x } => write!(f, "ADD I, V{:X}", x),
            FontGlyph { x } => write!(f, "LD F, V{:X}", x),
            Bcd { x } => write!(f, "LD B, V{:X}", x),
            DumpRegisters { x } => write!(f, "LD [I], V{:X}", x),
            LoadRegisters { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
