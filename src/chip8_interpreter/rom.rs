//! ROM loading from raw binary images and hex text listings.
use std::fs;
use std::path::Path;

use log::{info, log_enabled, Level};

use crate::chip8_interpreter::config::{MAX_ROM_SIZE, PROGRAM_START};
use crate::chip8_interpreter::error::Chip8Error;
use crate::chip8_interpreter::state::MachineState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RomFormat {
    /// Opcodes stored as bytes.
    Binary,
    /// Two hex digits per byte, whitespace ignored, optional `0x` prefixes.
    HexText,
}

impl RomFormat {
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("hex") | Some("txt") => Self::HexText,
            _ => Self::Binary,
        }
    }
}

/// Decode a hex listing such as `"6005 6107\n0x80 0x14"` into bytes.
pub fn parse_hex_rom(text: &str) -> Result<Vec<u8>, Chip8Error> {
    let digits: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();

    let mut cleaned = String::with_capacity(digits.len());
    for pair in digits.chunks(2) {
        if matches!(pair, ['0', 'x'] | ['0', 'X']) {
            continue;
        }
        cleaned.extend(pair);
    }

    Ok(hex::decode(cleaned)?)
}

pub fn read_rom(path: &Path, format: RomFormat) -> Result<Vec<u8>, Chip8Error> {
    match format {
        RomFormat::Binary => Ok(fs::read(path)?),
        RomFormat::HexText => parse_hex_rom(&fs::read_to_string(path)?),
    }
}

/// Copy a program into memory at the program start address.
///
/// Oversized programs are rejected before memory is touched.
pub fn load_rom_bytes(state: &mut MachineState, rom_bytes: &[u8]) -> Result<(), Chip8Error> {
    if rom_bytes.len() > MAX_ROM_SIZE {
        return Err(Chip8Error::RomTooLarge {
            size: rom_bytes.len(),
            max: MAX_ROM_SIZE,
        });
    }

    let start = PROGRAM_START;
    let end = PROGRAM_START + rom_bytes.len();
    state.memory[start..end].copy_from_slice(rom_bytes);

    if log_enabled!(Level::Info) {
        log_rom_content(rom_bytes);
    }
    info!("loaded rom into memory 0x{start:03x} - 0x{end:03x}");

    Ok(())
}

pub fn load_rom(state: &mut MachineState, path: &Path, format: RomFormat) -> Result<(), Chip8Error> {
    let rom_bytes = read_rom(path, format)?;
    load_rom_bytes(state, &rom_bytes)
}

fn log_rom_content(rom: &[u8]) {
    let rows: Vec<String> = rom
        .chunks(16)
        .map(|row| {
            row.iter()
                .map(|byte| format!("{byte:02x}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    info!("rom content:\n{}", rows.join("\n"));
}
