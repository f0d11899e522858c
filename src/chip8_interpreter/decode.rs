//! Instruction decoding.
//!
//! Turns a 16-bit opcode into a structured [`Instruction`] without touching machine state.

pub fn x_register_index(opcode: u16) -> usize {
    ((opcode & 0x0F00) >> 8) as usize
}

pub fn y_register_index(opcode: u16) -> usize {
    ((opcode & 0x00F0) >> 4) as usize
}

pub fn address_nnn(opcode: u16) -> u16 {
    opcode & 0x0FFF
}

pub fn byte_nn(opcode: u16) -> u8 {
    (opcode & 0x00FF) as u8
}

pub fn nibble_n(opcode: u16) -> u8 {
    (opcode & 0x000F) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0 (CLS)
    ClearScreen,
    /// 00EE (RET)
    Return,
    /// 1nnn (JP addr)
    Jump { address: u16 },
    /// 2nnn (CALL addr)
    Call { address: u16 },
    /// 3xnn (SE Vx, byte)
    SkipEqualByte { x: usize, nn: u8 },
    /// 4xnn (SNE Vx, byte)
    SkipNotEqualByte { x: usize, nn: u8 },
    /// 5xy0 (SE Vx, Vy)
    SkipEqualRegister { x: usize, y: usize },
    /// 6xnn (LD Vx, byte)
    LoadByte { x: usize, nn: u8 },
    /// 7xnn (ADD Vx, byte), VF untouched.
    AddByte { x: usize, nn: u8 },
    /// 8xy0 (LD Vx, Vy)
    LoadRegister { x: usize, y: usize },
    /// 8xy1 (OR Vx, Vy)
    Or { x: usize, y: usize },
    /// 8xy2 (AND Vx, Vy)
    And { x: usize, y: usize },
    /// 8xy3 (XOR Vx, Vy)
    Xor { x: usize, y: usize },
    /// 8xy4 (ADD Vx, Vy), VF = carry.
    AddRegister { x: usize, y: usize },
    /// 8xy5 (SUB Vx, Vy), VF = not borrow.
    SubRegister { x: usize, y: usize },
    /// 8xy6 (SHR Vx), VF = bit shifted out.
    ShiftRight { x: usize, y: usize },
    /// 8xy7 (SUBN Vx, Vy), VF = not borrow.
    SubNegated { x: usize, y: usize },
    /// 8xyE (SHL Vx), VF = bit shifted out.
    ShiftLeft { x: usize, y: usize },
    /// 9xy0 (SNE Vx, Vy)
    SkipNotEqualRegister { x: usize, y: usize },
    /// Annn (LD I, addr)
    LoadIndex { address: u16 },
    /// Bnnn (JP V0, addr). `x` is only consulted by the `jump_with_vx` quirk.
    JumpOffset { address: u16, x: usize },
    /// Cxnn (RND Vx, byte)
    Random { x: usize, nn: u8 },
    /// Dxyn (DRW Vx, Vy, nibble)
    Draw { x: usize, y: usize, n: u8 },
    /// Ex9E (SKP Vx)
    SkipKeyPressed { x: usize },
    /// ExA1 (SKNP Vx)
    SkipKeyNotPressed { x: usize },
    /// Fx07 (LD Vx, DT)
    LoadDelayTimer { x: usize },
    /// Fx0A (LD Vx, K)
    WaitForKey { x: usize },
    /// Fx15 (LD DT, Vx)
    SetDelayTimer { x: usize },
    /// Fx18 (LD ST, Vx)
    SetSoundTimer { x: usize },
    /// Fx1E (ADD I, Vx)
    AddIndex { x: usize },
    /// Fx29 (LD F, Vx)
    LoadGlyph { x: usize },
    /// Fx33 (LD B, Vx)
    StoreBcd { x: usize },
    /// Fx55 (LD [I], Vx)
    StoreRegisters { x: usize },
    /// Fx65 (LD Vx, [I])
    LoadRegisters { x: usize },
}

/// Decode an opcode. `None` means the bit pattern is not a CHIP-8 instruction.
pub fn decode(opcode: u16) -> Option<Instruction> {
    let x = x_register_index(opcode);
    let y = y_register_index(opcode);
    let n = nibble_n(opcode);
    let nn = byte_nn(opcode);
    let address = address_nnn(opcode);

    let instruction = match opcode & 0xF000 {
        0x0000 => match opcode {
            0x00E0 => Instruction::ClearScreen,
            0x00EE => Instruction::Return,
            _ => return None,
        },
        0x1000 => Instruction::Jump { address },
        0x2000 => Instruction::Call { address },
        0x3000 => Instruction::SkipEqualByte { x, nn },
        0x4000 => Instruction::SkipNotEqualByte { x, nn },
        0x5000 if n == 0 => Instruction::SkipEqualRegister { x, y },
        0x6000 => Instruction::LoadByte { x, nn },
        0x7000 => Instruction::AddByte { x, nn },
        0x8000 => match n {
            0x0 => Instruction::LoadRegister { x, y },
            0x1 => Instruction::Or { x, y },
            0x2 => Instruction::And { x, y },
            0x3 => Instruction::Xor { x, y },
            0x4 => Instruction::AddRegister { x, y },
            0x5 => Instruction::SubRegister { x, y },
            0x6 => Instruction::ShiftRight { x, y },
            0x7 => Instruction::SubNegated { x, y },
            0xE => Instruction::ShiftLeft { x, y },
            _ => return None,
        },
        0x9000 if n == 0 => Instruction::SkipNotEqualRegister { x, y },
        0xA000 => Instruction::LoadIndex { address },
        0xB000 => Instruction::JumpOffset { address, x },
        0xC000 => Instruction::Random { x, nn },
        0xD000 => Instruction::Draw { x, y, n },
        0xE000 => match nn {
            0x9E => Instruction::SkipKeyPressed { x },
            0xA1 => Instruction::SkipKeyNotPressed { x },
            _ => return None,
        },
        0xF000 => match nn {
            0x07 => Instruction::LoadDelayTimer { x },
            0x0A => Instruction::WaitForKey { x },
            0x15 => Instruction::SetDelayTimer { x },
            0x18 => Instruction::SetSoundTimer { x },
            0x1E => Instruction::AddIndex { x },
            0x29 => Instruction::LoadGlyph { x },
            0x33 => Instruction::StoreBcd { x },
            0x55 => Instruction::StoreRegisters { x },
            0x65 => Instruction::LoadRegisters { x },
            _ => return None,
        },
        _ => return None,
    };

    Some(instruction)
}
