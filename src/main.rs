use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

use chip8_interpreter_rs::{
    load_quirks_profile, load_quirks_profile_from_env, run_emulator_app, run_emulator_headless,
    run_emulator_text, Chip8Error, RomFormat, RunOptions,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Frontend {
    Window,
    Text,
    Headless,
}

#[derive(Debug, Parser)]
#[command(name = "chip8-interpreter-rs")]
#[command(about = "Run a CHIP-8 program")]
struct Args {
    #[arg(long)]
    rom: PathBuf,

    /// Treat the ROM as a hex text listing regardless of its extension
    #[arg(long)]
    hex: bool,

    #[arg(long, value_enum, default_value_t = Frontend::Window)]
    frontend: Frontend,

    /// Overrides CHIP8_QUIRKS
    #[arg(long, value_parser = ["standard", "original", "modern"])]
    quirks: Option<String>,

    /// Timers reload to 60 when they reach zero instead of stopping
    #[arg(long)]
    timer_reload: bool,

    #[arg(long, default_value_t = 16)]
    scale: usize,

    #[arg(long, default_value_t = 700)]
    hz: usize,

    #[arg(long, default_value_t = 60)]
    fps: usize,

    #[arg(long, default_value_t = 2000)]
    max_cycles: usize,

    /// Log a register dump after every instruction
    #[arg(long)]
    debug: bool,

    /// Print the registers and wait for enter after every instruction (text and headless)
    #[arg(long)]
    step: bool,
}

fn main() -> Result<(), Chip8Error> {
    let args = Args::parse();

    let level = if args.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new()
        .with_level(level)
        .env()
        .init()
        .map_err(|_| Chip8Error::InvalidArgument("logger already initialised"))?;

    let (profile, quirks) = match &args.quirks {
        Some(profile) => load_quirks_profile(profile).map(|quirks| (profile.clone(), quirks)),
        None => load_quirks_profile_from_env(),
    }
    .map_err(|_| Chip8Error::InvalidArgument("quirks must be standard, original or modern"))?;
    let quirks = quirks.with_timer_reload(args.timer_reload);
    info!("quirks profile: {profile} {quirks:?}");

    let format = if args.hex {
        RomFormat::HexText
    } else {
        RomFormat::from_path(&args.rom)
    };
    let options = RunOptions {
        max_cycles: args.max_cycles,
        cpu_hz: args.hz,
        scale: args.scale,
        fps: args.fps,
        debug: args.debug,
        step: args.step,
    };

    match args.frontend {
        Frontend::Headless => {
            let state = run_emulator_headless(quirks, &args.rom, format, options)?;
            println!(
                "headless finished: pc=0x{:03x} waiting_for_key={}",
                state.pc,
                state.is_waiting_for_key()
            );
        }
        Frontend::Text => {
            run_emulator_text(quirks, &args.rom, format, options)?;
        }
        Frontend::Window => {
            run_emulator_app(quirks, &args.rom, format, options)?;
        }
    }

    Ok(())
}
