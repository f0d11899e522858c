use log::{log_enabled, trace, Level};
use rand::random;

use crate::chip8_interpreter::config::{
    FLAG_REGISTER, FONT_GLYPH_HEIGHT, FONT_START, MEMORY_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH,
    STACK_SIZE,
};
use crate::chip8_interpreter::decode::{decode, Instruction};
use crate::chip8_interpreter::error::Chip8Error;
use crate::chip8_interpreter::quirks::Chip8Quirks;
use crate::chip8_interpreter::state::{clear_display, MachineState};

/// Outcome of a single executor step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Executed,
    /// Suspended on `Fx0A` until the input backend reports a key-down event.
    WaitingForKey,
}

pub fn fetch_opcode(state: &MachineState) -> Result<u16, Chip8Error> {
    let pc = state.pc as usize;
    if pc > MEMORY_SIZE - 2 {
        return Err(Chip8Error::ProgramCounterOutOfBounds(state.pc));
    }

    Ok(u16::from_be_bytes([state.memory[pc], state.memory[pc + 1]]))
}

/// Fetch, decode and execute one instruction.
///
/// On error the machine is left as it was before the step, apart from `opcode`
/// which records the instruction that faulted.
pub fn step(state: &mut MachineState, quirks: Chip8Quirks) -> Result<StepStatus, Chip8Error> {
    if state.is_waiting_for_key() {
        return Ok(StepStatus::WaitingForKey);
    }

    let pc = state.pc;
    let opcode = fetch_opcode(state)?;
    state.opcode = opcode;

    let instruction = decode(opcode).ok_or(Chip8Error::InvalidOpcode { opcode, pc })?;

    if log_enabled!(Level::Trace) {
        trace!("0x{pc:03x}: {opcode:04x} {instruction:?}");
    }

    state.pc = pc + 2;

    let result = execute_instruction(state, instruction, quirks);
    if result.is_err() {
        state.pc = pc;
    }
    result
}

/// Execute `opcode` as if it had just been fetched, i.e. with `pc` already past it.
pub fn execute_opcode(
    state: &mut MachineState,
    opcode: u16,
    quirks: Chip8Quirks,
) -> Result<StepStatus, Chip8Error> {
    state.opcode = opcode;

    let instruction = decode(opcode).ok_or(Chip8Error::InvalidOpcode {
        opcode,
        pc: instruction_address(state),
    })?;

    execute_instruction(state, instruction, quirks)
}

pub fn execute_instruction(
    state: &mut MachineState,
    instruction: Instruction,
    quirks: Chip8Quirks,
) -> Result<StepStatus, Chip8Error> {
    match instruction {
        Instruction::ClearScreen => clear_display(state),
        Instruction::Return => {
            if state.stack_pointer == 0 {
                return Err(Chip8Error::StackUnderflow {
                    pc: instruction_address(state),
                });
            }
            state.stack_pointer -= 1;
            state.pc = state.stack[state.stack_pointer];
        }
        Instruction::Jump { address } => state.pc = address,
        Instruction::Call { address } => {
            if state.stack_pointer >= STACK_SIZE {
                return Err(Chip8Error::StackOverflow {
                    pc: instruction_address(state),
                });
            }
            state.stack[state.stack_pointer] = state.pc;
            state.stack_pointer += 1;
            state.pc = address;
        }
        Instruction::SkipEqualByte { x, nn } => {
            let condition = state.registers[x] == nn;
            skip_if(state, condition);
        }
        Instruction::SkipNotEqualByte { x, nn } => {
            let condition = state.registers[x] != nn;
            skip_if(state, condition);
        }
        Instruction::SkipEqualRegister { x, y } => {
            let condition = state.registers[x] == state.registers[y];
            skip_if(state, condition);
        }
        Instruction::LoadByte { x, nn } => state.registers[x] = nn,
        Instruction::AddByte { x, nn } => {
            state.registers[x] = state.registers[x].wrapping_add(nn);
        }
        Instruction::LoadRegister { x, y } => state.registers[x] = state.registers[y],
        Instruction::Or { x, y } => state.registers[x] |= state.registers[y],
        Instruction::And { x, y } => state.registers[x] &= state.registers[y],
        Instruction::Xor { x, y } => state.registers[x] ^= state.registers[y],
        Instruction::AddRegister { x, y } => {
            let (result, carry) = state.registers[x].overflowing_add(state.registers[y]);
            set_with_flag(state, x, result, u8::from(carry));
        }
        Instruction::SubRegister { x, y } => {
            let (vx, vy) = (state.registers[x], state.registers[y]);
            set_with_flag(state, x, vx.wrapping_sub(vy), u8::from(vx >= vy));
        }
        Instruction::ShiftRight { x, y } => {
            let value = shift_source(state, x, y, quirks);
            set_with_flag(state, x, value >> 1, value & 0x1);
        }
        Instruction::SubNegated { x, y } => {
            let (vx, vy) = (state.registers[x], state.registers[y]);
            set_with_flag(state, x, vy.wrapping_sub(vx), u8::from(vy >= vx));
        }
        Instruction::ShiftLeft { x, y } => {
            let value = shift_source(state, x, y, quirks);
            set_with_flag(state, x, value << 1, (value & 0x80) >> 7);
        }
        Instruction::SkipNotEqualRegister { x, y } => {
            let condition = state.registers[x] != state.registers[y];
            skip_if(state, condition);
        }
        Instruction::LoadIndex { address } => state.index = address,
        Instruction::JumpOffset { address, x } => {
            let offset_register = if quirks.jump_with_vx { x } else { 0 };
            // Targets past the end of memory fault on the next fetch.
            state.pc = address + u16::from(state.registers[offset_register]);
        }
        Instruction::Random { x, nn } => state.registers[x] = random::<u8>() & nn,
        Instruction::Draw { x, y, n } => draw_sprite(state, x, y, n, quirks)?,
        Instruction::SkipKeyPressed { x } => {
            let pressed = state.keys[(state.registers[x] & 0x0F) as usize];
            skip_if(state, pressed);
        }
        Instruction::SkipKeyNotPressed { x } => {
            let pressed = state.keys[(state.registers[x] & 0x0F) as usize];
            skip_if(state, !pressed);
        }
        Instruction::LoadDelayTimer { x } => state.registers[x] = state.delay_timer,
        Instruction::WaitForKey { x } => {
            state.waiting_for_key = Some(x);
            return Ok(StepStatus::WaitingForKey);
        }
        Instruction::SetDelayTimer { x } => state.delay_timer = state.registers[x],
        Instruction::SetSoundTimer { x } => state.sound_timer = state.registers[x],
        Instruction::AddIndex { x } => {
            // I is a plain 16-bit register; range checks happen where it is dereferenced.
            state.index = state.index.wrapping_add(u16::from(state.registers[x]));
        }
        Instruction::LoadGlyph { x } => {
            // Values above 0xF point past the font; the range is checked when I is used.
            let glyph_offset = state.registers[x] as usize * FONT_GLYPH_HEIGHT;
            state.index = (FONT_START + glyph_offset) as u16;
        }
        Instruction::StoreBcd { x } => {
            let start = memory_range(state, 3)?;
            let value = state.registers[x];
            state.memory[start] = value / 100;
            state.memory[start + 1] = (value % 100) / 10;
            state.memory[start + 2] = value % 10;
        }
        Instruction::StoreRegisters { x } => {
            let start = memory_range(state, x + 1)?;
            state.memory[start..=start + x].copy_from_slice(&state.registers[..=x]);
            advance_index(state, x, quirks);
        }
        Instruction::LoadRegisters { x } => {
            let start = memory_range(state, x + 1)?;
            state.registers[..=x].copy_from_slice(&state.memory[start..=start + x]);
            advance_index(state, x, quirks);
        }
    }

    Ok(StepStatus::Executed)
}

/// Address of the instruction being executed; `pc` has already moved past it.
fn instruction_address(state: &MachineState) -> u16 {
    state.pc.wrapping_sub(2)
}

fn skip_if(state: &mut MachineState, condition: bool) {
    if condition {
        state.pc = state.pc.wrapping_add(2);
    }
}

/// Write the result before the flag so VF holds the flag even when it is also the destination.
fn set_with_flag(state: &mut MachineState, x: usize, result: u8, flag: u8) {
    state.registers[x] = result;
    state.registers[FLAG_REGISTER] = flag;
}

fn shift_source(state: &MachineState, x: usize, y: usize, quirks: Chip8Quirks) -> u8 {
    if quirks.shift_uses_vy {
        state.registers[y]
    } else {
        state.registers[x]
    }
}

fn advance_index(state: &mut MachineState, x: usize, quirks: Chip8Quirks) {
    if quirks.load_store_increment_index {
        state.index += (x + 1) as u16;
    }
}

/// Check that `len` bytes starting at I lie inside memory and return the start offset.
fn memory_range(state: &MachineState, len: usize) -> Result<usize, Chip8Error> {
    let start = state.index as usize;
    if start + len > MEMORY_SIZE {
        return Err(Chip8Error::MemoryOutOfBounds {
            address: start.max(MEMORY_SIZE),
            pc: instruction_address(state),
        });
    }
    Ok(start)
}

fn draw_sprite(
    state: &mut MachineState,
    x: usize,
    y: usize,
    height: u8,
    quirks: Chip8Quirks,
) -> Result<(), Chip8Error> {
    let sprite_start = memory_range(state, height as usize)?;
    let x_start = (state.registers[x] as usize) % SCREEN_WIDTH;
    let y_start = (state.registers[y] as usize) % SCREEN_HEIGHT;

    let mut collision = false;

    for row in 0..height as usize {
        let mut y_pos = y_start + row;
        if quirks.draw_wrap {
            y_pos %= SCREEN_HEIGHT;
        } else if y_pos >= SCREEN_HEIGHT {
            break;
        }

        let sprite_row = state.memory[sprite_start + row];

        for bit in 0..8 {
            let mut x_pos = x_start + bit;
            if quirks.draw_wrap {
                x_pos %= SCREEN_WIDTH;
            } else if x_pos >= SCREEN_WIDTH {
                break;
            }

            if (sprite_row >> (7 - bit)) & 0x1 == 0 {
                continue;
            }

            let location = x_pos + (y_pos * SCREEN_WIDTH);
            collision |= state.graphics[location] == 1;
            state.graphics[location] ^= 1;
        }
    }

    state.registers[FLAG_REGISTER] = u8::from(collision);
    state.draw_flag = true;

    Ok(())
}
