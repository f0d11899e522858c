pub mod chip8_interpreter;

pub use chip8_interpreter::app::{
    run_emulator_app, run_emulator_headless, run_emulator_text, run_emulator_with, RunOptions,
};
pub use chip8_interpreter::cpu::{
    execute_instruction, execute_opcode, fetch_opcode, step, StepStatus,
};
pub use chip8_interpreter::debug::{debug_snapshot, DebugSnapshot};
pub use chip8_interpreter::decode::{decode, Instruction};
pub use chip8_interpreter::error::Chip8Error;
pub use chip8_interpreter::input::{parse_key, InputBackend, LineInput};
pub use chip8_interpreter::quirks::{
    load_quirks_profile, load_quirks_profile_from_env, Chip8Quirks, MODERN_QUIRKS, ORIGINAL_QUIRKS,
    STANDARD_QUIRKS,
};
pub use chip8_interpreter::render::{render_text, Renderer, TextRenderer};
pub use chip8_interpreter::rom::{load_rom, load_rom_bytes, parse_hex_rom, read_rom, RomFormat};
pub use chip8_interpreter::state::{
    clear_display, create_state, key_down, key_up, reset_state, set_key_state, sync_key,
    MachineState,
};
pub use chip8_interpreter::timers::{tick_timers, TimerPacer};
