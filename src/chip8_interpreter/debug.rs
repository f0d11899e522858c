use std::fmt::{Display, Formatter};

use crate::chip8_interpreter::config::REGISTER_COUNT;
use crate::chip8_interpreter::state::MachineState;

/// Read-only copy of the registers that matter when diagnosing a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugSnapshot {
    pub registers: [u8; REGISTER_COUNT],
    pub pc: u16,
    pub index: u16,
    pub opcode: u16,
    pub stack_pointer: usize,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub waiting_for_key: bool,
}

pub fn debug_snapshot(state: &MachineState) -> DebugSnapshot {
    DebugSnapshot {
        registers: state.registers,
        pc: state.pc,
        index: state.index,
        opcode: state.opcode,
        stack_pointer: state.stack_pointer,
        delay_timer: state.delay_timer,
        sound_timer: state.sound_timer,
        waiting_for_key: state.is_waiting_for_key(),
    }
}

impl Display for DebugSnapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "opcode: {:04X}  pc: {:04X}  index: {:04X}  sp: {}",
            self.opcode, self.pc, self.index, self.stack_pointer
        )?;
        for (row, registers) in self.registers.chunks(8).enumerate() {
            let line: Vec<String> = registers
                .iter()
                .enumerate()
                .map(|(column, value)| format!("V{:X}={value:02X}", row * 8 + column))
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        write!(
            f,
            "dt: {}  st: {}{}",
            self.delay_timer,
            self.sound_timer,
            if self.waiting_for_key { "  (waiting for key)" } else { "" }
        )
    }
}
