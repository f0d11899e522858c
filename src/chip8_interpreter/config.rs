//! Constant values of the CHIP-8 architecture.

pub const MEMORY_SIZE: usize = 0x1000;

/// Programs are loaded above the area historically reserved for the interpreter.
pub const PROGRAM_START: usize = 0x200;
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START;

pub const REGISTER_COUNT: usize = 16;

/// VF doubles as the carry, borrow and collision flag. Instructions never use it as scratch.
pub const FLAG_REGISTER: usize = 0xF;

/// Levels of subroutine nesting.
pub const STACK_SIZE: usize = 16;

pub const KEY_COUNT: usize = 16;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;
pub const GRAPHICS_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// Rate at which the delay and sound timers count down.
pub const TIMER_FREQUENCY: u32 = 60;

/// Value the legacy timer behaviour reloads a timer with once it reaches zero.
pub const TIMER_RELOAD_VALUE: u8 = 60;

pub const FONT_START: usize = 0x000;
pub const FONT_GLYPH_HEIGHT: usize = 5;

pub const FONT_BYTES: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
