use std::env;

/// Switches for the instruction behaviours that differ between CHIP-8 interpreters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chip8Quirks {
    /// 8xy6/8xyE shift Vy into Vx instead of shifting Vx in place.
    pub shift_uses_vy: bool,
    /// Fx55/Fx65 leave I pointing past the last register transferred.
    pub load_store_increment_index: bool,
    /// Bnnn adds Vx (x = high nibble of nnn) instead of V0.
    pub jump_with_vx: bool,
    /// Sprites wrap around the screen edges instead of being clipped.
    pub draw_wrap: bool,
    /// A timer reaching zero reloads to 60 instead of stopping.
    pub timer_reload: bool,
}

pub const STANDARD_QUIRKS: Chip8Quirks = Chip8Quirks {
    shift_uses_vy: false,
    load_store_increment_index: true,
    jump_with_vx: false,
    draw_wrap: false,
    timer_reload: false,
};

pub const ORIGINAL_QUIRKS: Chip8Quirks = Chip8Quirks {
    shift_uses_vy: true,
    load_store_increment_index: true,
    jump_with_vx: false,
    draw_wrap: false,
    timer_reload: false,
};

pub const MODERN_QUIRKS: Chip8Quirks = Chip8Quirks {
    shift_uses_vy: false,
    load_store_increment_index: false,
    jump_with_vx: true,
    draw_wrap: true,
    timer_reload: false,
};

impl Default for Chip8Quirks {
    fn default() -> Self {
        STANDARD_QUIRKS
    }
}

impl Chip8Quirks {
    pub fn with_timer_reload(self, timer_reload: bool) -> Self {
        Self {
            timer_reload,
            ..self
        }
    }
}

pub fn load_quirks_profile(profile: &str) -> Result<Chip8Quirks, String> {
    match profile.trim().to_ascii_lowercase().as_str() {
        "standard" => Ok(STANDARD_QUIRKS),
        "original" => Ok(ORIGINAL_QUIRKS),
        "modern" => Ok(MODERN_QUIRKS),
        other => Err(format!(
            "invalid CHIP8_QUIRKS '{other}', expected one of: modern, original, standard"
        )),
    }
}

pub fn load_quirks_profile_from_env() -> Result<(String, Chip8Quirks), String> {
    let profile = env::var("CHIP8_QUIRKS").unwrap_or_else(|_| "standard".to_owned());
    let normalized = profile.trim().to_ascii_lowercase();
    let quirks = load_quirks_profile(&normalized)?;
    Ok((normalized, quirks))
}
