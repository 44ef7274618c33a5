use crate::util::bit_splitter::BitSplitter;

/// A wrapper for addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A wrapper for registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// A wrapper for constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the CHIP-8 instruction set.
/// Two bytes written in hexadecimal, with the following special characters:
/// - NNN: address
/// - NN: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
/// - PC: Program counter
/// - I: 16 bit register for memory address
/// - VN: One of the 16 available variables (register identifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen, // 00E0
    Return, // 00EE
    Goto(Addr), // 1NNN
    Call(Addr), // 2NNN
    IfRegEqConst(Reg, Const), // 3XNN
    IfRegNeqConst(Reg, Const), // 4XNN
    IfRegEqReg(Reg, Reg), // 5XY0
    SetRegToConst(Reg, Const), // 6XNN
    IncRegByConst(Reg, Const), // 7XNN
    SetRegToReg(Reg, Reg), // 8XY0
    BitwiseOr(Reg, Reg), // 8XY1
    BitwiseAnd(Reg, Reg), // 8XY2
    BitwiseXor(Reg, Reg), // 8XY3
    IncRegByReg(Reg, Reg), // 8XY4
    DecRegByReg(Reg, Reg), // 8XY5
    BitshiftRight(Reg), // 8XY6
    SetVxVyMinusVx(Reg, Reg), // 8XY7
    BitshiftLeft(Reg), // 8XYE
    IfRegNeqReg(Reg, Reg), // 9XY0
    SetI(Addr), // ANNN
    SetPcToV0PlusAddr(Addr), // BNNN
    SetVxRand(Reg, Const), // CXNN
    Draw(Reg, Reg, Const), // DXYN
    IfKeyEqVx(Reg), // EX9E
    IfKeyNeqVx(Reg), // EXA1
    SetRegToDelayTimer(Reg), // FX07
    SetRegToGetKey(Reg), // FX0A
    SetDelayTimerToReg(Reg), // FX15
    SetSoundTimerToReg(Reg), // FX18
    AddRegToI(Reg), // FX1E
    SetIToSpriteAddrVx(Reg), // FX29
    SetIToBcdOfReg(Reg), // FX33
    RegDump(Reg), // FX55
    RegLoad(Reg) // FX65
}

impl Instruction {

    /// Decode an opcode word, or `None` if no instruction has this encoding.
    ///
    /// The top nibble selects the family. Family 8 is further split on the low nibble,
    /// families 0, E and F on the low byte.
    pub fn from_u16(value: u16) -> Option<Instruction> {
        let opcode = BitSplitter::from_u16(value);
        let x = Reg(opcode.x());
        let y = Reg(opcode.y());
        let nn = Const(opcode.nn());
        let nnn = Addr(opcode.nnn());

        let instruction = match opcode.as_four_u8() {
            (0x0, _, _, _) => match value {
                0x00E0 => Instruction::ClearScreen,
                0x00EE => Instruction::Return,
                _ => return None,
            },
            (0x1, _, _, _) => Instruction::Goto(nnn),
            (0x2, _, _, _) => Instruction::Call(nnn),
            (0x3, _, _, _) => Instruction::IfRegEqConst(x, nn),
            (0x4, _, _, _) => Instruction::IfRegNeqConst(x, nn),
            (0x5, _, _, _) => Instruction::IfRegEqReg(x, y),
            (0x6, _, _, _) => Instruction::SetRegToConst(x, nn),
            (0x7, _, _, _) => Instruction::IncRegByConst(x, nn),
            (0x8, _, _, _) => match opcode.n() {
                0x0 => Instruction::SetRegToReg(x, y),
                0x1 => Instruction::BitwiseOr(x, y),
                0x2 => Instruction::BitwiseAnd(x, y),
                0x3 => Instruction::BitwiseXor(x, y),
                0x4 => Instruction::IncRegByReg(x, y),
                0x5 => Instruction::DecRegByReg(x, y),
                0x6 => Instruction::BitshiftRight(x),
                0x7 => Instruction::SetVxVyMinusVx(x, y),
                0xE => Instruction::BitshiftLeft(x),
                _ => return None,
            },
            (0x9, _, _, _) => Instruction::IfRegNeqReg(x, y),
            (0xA, _, _, _) => Instruction::SetI(nnn),
            (0xB, _, _, _) => Instruction::SetPcToV0PlusAddr(nnn),
            (0xC, _, _, _) => Instruction::SetVxRand(x, nn),
            (0xD, _, _, _) => Instruction::Draw(x, y, Const(opcode.n())),
            (0xE, _, _, _) => match nn.0 {
                0x9E => Instruction::IfKeyEqVx(x),
                0xA1 => Instruction::IfKeyNeqVx(x),
                _ => return None,
            },
            (0xF, _, _, _) => match nn.0 {
                0x07 => Instruction::SetRegToDelayTimer(x),
                0x0A => Instruction::SetRegToGetKey(x),
                0x15 => Instruction::SetDelayTimerToReg(x),
                0x18 => Instruction::SetSoundTimerToReg(x),
                0x1E => Instruction::AddRegToI(x),
                0x29 => Instruction::SetIToSpriteAddrVx(x),
                0x33 => Instruction::SetIToBcdOfReg(x),
                0x55 => Instruction::RegDump(x),
                0x65 => Instruction::RegLoad(x),
                _ => return None,
            },
            _ => return None,
        };

        Some(instruction)
    }

}
