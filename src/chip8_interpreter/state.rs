use crate::chip8_interpreter::config::{
    FONT_BYTES, FONT_START, GRAPHICS_SIZE, KEY_COUNT, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT,
    STACK_SIZE, TIMER_RELOAD_VALUE,
};

/// Complete state of one CHIP-8 machine.
///
/// Owned by the driving loop and threaded by reference through the executor,
/// the timer driver and the frontends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineState {
    pub memory: [u8; MEMORY_SIZE],
    /// V0..VF. VF is only ever written as a flag, see `FLAG_REGISTER`.
    pub registers: [u8; REGISTER_COUNT],
    pub index: u16,
    pub pc: u16,
    pub stack: [u16; STACK_SIZE],
    /// Next free slot in `stack`.
    pub stack_pointer: usize,
    /// Row-major 64x32 framebuffer, one byte per pixel holding 0 or 1.
    pub graphics: [u8; GRAPHICS_SIZE],
    pub draw_flag: bool,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub keys: [bool; KEY_COUNT],
    /// Last fetched instruction, kept for diagnostics.
    pub opcode: u16,
    /// Destination register of a pending `Fx0A` key wait.
    pub waiting_for_key: Option<usize>,
}

impl Default for MachineState {
    fn default() -> Self {
        Self {
            memory: [0; MEMORY_SIZE],
            registers: [0; REGISTER_COUNT],
            index: 0,
            pc: 0,
            stack: [0; STACK_SIZE],
            stack_pointer: 0,
            graphics: [0; GRAPHICS_SIZE],
            draw_flag: false,
            delay_timer: 0,
            sound_timer: 0,
            keys: [false; KEY_COUNT],
            opcode: 0,
            waiting_for_key: None,
        }
    }
}

impl MachineState {
    pub fn is_waiting_for_key(&self) -> bool {
        self.waiting_for_key.is_some()
    }
}

pub fn create_state() -> MachineState {
    let mut state = MachineState::default();
    reset_state(&mut state);
    state
}

/// Cold boot: zero everything, install the font and point the program counter at the program.
pub fn reset_state(state: &mut MachineState) {
    *state = MachineState::default();

    state.pc = PROGRAM_START as u16;
    state.delay_timer = TIMER_RELOAD_VALUE;

    load_font(state);
}

pub fn clear_display(state: &mut MachineState) {
    state.graphics = [0; GRAPHICS_SIZE];
    state.draw_flag = true;
}

pub fn load_font(state: &mut MachineState) {
    state.memory[FONT_START..FONT_START + FONT_BYTES.len()].copy_from_slice(&FONT_BYTES);
}

pub fn set_key_state(state: &mut MachineState, key_index: usize, is_pressed: bool) {
    if key_index >= KEY_COUNT {
        return;
    }

    state.keys[key_index] = is_pressed;
}

/// Key-down event from the input backend. Completes a pending `Fx0A` wait.
pub fn key_down(state: &mut MachineState, key_index: usize) {
    if key_index >= KEY_COUNT {
        return;
    }

    state.keys[key_index] = true;

    if let Some(register) = state.waiting_for_key.take() {
        state.registers[register] = key_index as u8;
    }
}

pub fn key_up(state: &mut MachineState, key_index: usize) {
    set_key_state(state, key_index, false);
}

/// Apply a polled key level, turning a change into a `key_down` or `key_up` event.
pub fn sync_key(state: &mut MachineState, key_index: usize, is_down: bool) {
    if key_index >= KEY_COUNT || state.keys[key_index] == is_down {
        return;
    }

    if is_down {
        key_down(state, key_index);
    } else {
        key_up(state, key_index);
    }
}
