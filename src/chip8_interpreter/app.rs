use std::io;
use std::path::Path;
use std::time::Instant;

use log::{debug, error, info};

use crate::chip8_interpreter::config::{SCREEN_HEIGHT, SCREEN_WIDTH, TIMER_FREQUENCY};
use crate::chip8_interpreter::cpu::{step, StepStatus};
use crate::chip8_interpreter::debug::debug_snapshot;
use crate::chip8_interpreter::error::Chip8Error;
use crate::chip8_interpreter::input::{InputBackend, LineInput};
use crate::chip8_interpreter::quirks::Chip8Quirks;
use crate::chip8_interpreter::render::{Renderer, TextRenderer};
use crate::chip8_interpreter::rom::{load_rom, RomFormat};
use crate::chip8_interpreter::state::{create_state, key_down, key_up, sync_key, MachineState};
use crate::chip8_interpreter::timers::{tick_timers, TimerPacer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Instruction budget of the headless and text frontends.
    pub max_cycles: usize,
    pub cpu_hz: usize,
    /// Window pixels per CHIP-8 pixel.
    pub scale: usize,
    pub fps: usize,
    /// Log a register dump after every instruction.
    pub debug: bool,
    /// Pause for a line of input after every instruction.
    pub step: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            max_cycles: 2000,
            cpu_hz: 700,
            scale: 16,
            fps: 60,
            debug: false,
            step: false,
        }
    }
}

pub fn run_emulator_headless(
    quirks: Chip8Quirks,
    rom_path: &Path,
    format: RomFormat,
    options: RunOptions,
) -> Result<MachineState, Chip8Error> {
    if options.step {
        let mut input = LineInput::step_only(io::stdin().lock(), io::stdout());
        return run_emulator_with(quirks, rom_path, format, options, None, Some(&mut input));
    }
    run_emulator_with(quirks, rom_path, format, options, None, None)
}

/// Prints every frame to stdout as a character grid and reads keys from stdin.
pub fn run_emulator_text(
    quirks: Chip8Quirks,
    rom_path: &Path,
    format: RomFormat,
    options: RunOptions,
) -> Result<MachineState, Chip8Error> {
    let mut renderer = TextRenderer::new(io::stdout());
    let mut input = LineInput::new(io::stdin().lock(), io::stdout());
    run_emulator_with(
        quirks,
        rom_path,
        format,
        options,
        Some(&mut renderer),
        Some(&mut input),
    )
}

/// Run at most `options.max_cycles` instructions against the given frontend pieces.
///
/// A pending key wait is handed to `input`; without one, or once it runs dry, the run stops.
pub fn run_emulator_with(
    quirks: Chip8Quirks,
    rom_path: &Path,
    format: RomFormat,
    options: RunOptions,
    mut renderer: Option<&mut dyn Renderer>,
    mut input: Option<&mut dyn InputBackend>,
) -> Result<MachineState, Chip8Error> {
    if options.max_cycles == 0 {
        return Err(Chip8Error::InvalidArgument("max_cycles must be > 0"));
    }
    if options.cpu_hz == 0 {
        return Err(Chip8Error::InvalidArgument("cpu_hz must be > 0"));
    }

    let mut state = create_state();
    load_rom(&mut state, rom_path, format)?;
    let cycles_per_timer_tick = usize::max(1, options.cpu_hz / TIMER_FREQUENCY as usize);
    // Terminal keys have no release event; a key stays held until the next one is entered.
    let mut held_key = None;

    for i in 0..options.max_cycles {
        let status = run_step(&mut state, quirks, options.debug)?;
        if status == StepStatus::WaitingForKey {
            let key = match input.as_deref_mut() {
                Some(input) => input.wait_for_key()?,
                None => None,
            };
            let Some(key) = key else {
                info!("waiting for a key at pc=0x{:03x}, stopping", state.pc);
                break;
            };
            if let Some(previous) = held_key.replace(key) {
                key_up(&mut state, previous);
            }
            key_down(&mut state, key);
        }

        if state.draw_flag {
            if let Some(renderer) = renderer.as_deref_mut() {
                renderer.present(&state.graphics)?;
            }
            state.draw_flag = false;
        }

        if ((i + 1) % cycles_per_timer_tick) == 0 {
            tick_timers(&mut state, quirks, Some(&mut beep));
        }

        if options.step {
            if let Some(input) = input.as_deref_mut() {
                if !input.pause(&debug_snapshot(&state))? {
                    info!("stopped at pc=0x{:03x}", state.pc);
                    break;
                }
            }
        }
    }

    Ok(state)
}

fn run_step(
    state: &mut MachineState,
    quirks: Chip8Quirks,
    debug_enabled: bool,
) -> Result<StepStatus, Chip8Error> {
    match step(state, quirks) {
        Ok(status) => {
            if debug_enabled {
                debug!("{}", debug_snapshot(state));
            }
            Ok(status)
        }
        Err(err) => {
            error!("{err}\n{}", debug_snapshot(state));
            Err(err)
        }
    }
}

fn beep() {
    info!("beep");
}

pub fn run_emulator_app(
    quirks: Chip8Quirks,
    rom_path: &Path,
    format: RomFormat,
    options: RunOptions,
) -> Result<MachineState, Chip8Error> {
    use raylib::prelude::{Color, KeyboardKey, RaylibDraw};

    if options.scale == 0 {
        return Err(Chip8Error::InvalidArgument("scale must be > 0"));
    }
    if options.cpu_hz == 0 {
        return Err(Chip8Error::InvalidArgument("cpu_hz must be > 0"));
    }
    if options.fps == 0 {
        return Err(Chip8Error::InvalidArgument("fps must be > 0"));
    }

    let mut state = create_state();
    load_rom(&mut state, rom_path, format)?;

    let scale = options.scale as i32;
    let (mut rl, thread) = raylib::init()
        .size(SCREEN_WIDTH as i32 * scale, SCREEN_HEIGHT as i32 * scale)
        .title("chip8-interpreter-rs")
        .build();
    rl.set_target_fps(options.fps as u32);

    // 1234 / QWER / ASDF / ZXCV over the hex keypad.
    let keypad = [
        (KeyboardKey::KEY_ONE, 0x1usize),
        (KeyboardKey::KEY_TWO, 0x2),
        (KeyboardKey::KEY_THREE, 0x3),
        (KeyboardKey::KEY_FOUR, 0xC),
        (KeyboardKey::KEY_Q, 0x4),
        (KeyboardKey::KEY_W, 0x5),
        (KeyboardKey::KEY_E, 0x6),
        (KeyboardKey::KEY_R, 0xD),
        (KeyboardKey::KEY_A, 0x7),
        (KeyboardKey::KEY_S, 0x8),
        (KeyboardKey::KEY_D, 0x9),
        (KeyboardKey::KEY_F, 0xE),
        (KeyboardKey::KEY_Z, 0xA),
        (KeyboardKey::KEY_X, 0x0),
        (KeyboardKey::KEY_C, 0xB),
        (KeyboardKey::KEY_V, 0xF),
    ];

    let cycle_interval = 1.0f32 / options.cpu_hz as f32;
    let batch_limit = usize::max(1, (options.cpu_hz / options.fps) * 3);
    let mut owed_time = 0.0f32;
    let mut visible_frame = state.graphics;
    let mut last_frame = Instant::now();
    let mut timer_pacer = TimerPacer::new();

    while !rl.window_should_close() {
        if rl.is_key_pressed(KeyboardKey::KEY_ESCAPE) {
            break;
        }

        for (key, keypad_index) in keypad {
            sync_key(&mut state, keypad_index, rl.is_key_down(key));
        }

        let now = Instant::now();
        owed_time += (now - last_frame).as_secs_f32().min(0.1);
        last_frame = now;

        let mut batch = 0;
        while owed_time >= cycle_interval && batch < batch_limit {
            let status = run_step(&mut state, quirks, options.debug)?;
            if status == StepStatus::WaitingForKey {
                // No instruction ran; time spent suspended is not owed back later.
                owed_time = 0.0;
                break;
            }
            owed_time -= cycle_interval;
            batch += 1;
        }

        for _ in 0..timer_pacer.due_ticks() {
            tick_timers(&mut state, quirks, Some(&mut beep));
        }

        if state.draw_flag {
            visible_frame = state.graphics;
            state.draw_flag = false;
        }

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        for (pixel_index, _) in visible_frame.iter().enumerate().filter(|(_, lit)| **lit == 1) {
            let x = (pixel_index % SCREEN_WIDTH) as i32;
            let y = (pixel_index / SCREEN_WIDTH) as i32;
            d.draw_rectangle(x * scale, y * scale, scale, scale, Color::WHITE);
        }
    }

    Ok(state)
}
