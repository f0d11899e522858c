//! Line-based keypad input for the terminal frontends.
use std::io::{BufRead, Write};

use crate::chip8_interpreter::config::KEY_COUNT;
use crate::chip8_interpreter::debug::DebugSnapshot;
use crate::chip8_interpreter::error::Chip8Error;

/// Blocking input consulted by the fixed-cycle driving loop.
pub trait InputBackend {
    /// Block until a keypad key is entered. `None` when no key will ever arrive.
    fn wait_for_key(&mut self) -> Result<Option<usize>, Chip8Error>;

    /// Show `snapshot` and block until the next instruction is requested.
    /// Returns `false` to end the run.
    fn pause(&mut self, snapshot: &DebugSnapshot) -> Result<bool, Chip8Error>;
}

/// Reads one line per request from `input` and writes prompts to `prompt`.
pub struct LineInput<R: BufRead, W: Write> {
    input: R,
    prompt: W,
    answers_key_waits: bool,
}

impl<R: BufRead, W: Write> LineInput<R, W> {
    pub fn new(input: R, prompt: W) -> Self {
        Self {
            input,
            prompt,
            answers_key_waits: true,
        }
    }

    /// Pauses between instructions but never supplies keys.
    pub fn step_only(input: R, prompt: W) -> Self {
        Self {
            answers_key_waits: false,
            ..Self::new(input, prompt)
        }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.prompt)
    }

    /// `None` on end of input.
    fn read_line(&mut self) -> Result<Option<String>, Chip8Error> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }
}

/// A single hex digit names a keypad key.
pub fn parse_key(text: &str) -> Option<usize> {
    let key = usize::from_str_radix(text.trim(), 16).ok()?;
    (key < KEY_COUNT).then_some(key)
}

impl<R: BufRead, W: Write> InputBackend for LineInput<R, W> {
    fn wait_for_key(&mut self) -> Result<Option<usize>, Chip8Error> {
        if !self.answers_key_waits {
            return Ok(None);
        }

        loop {
            write!(self.prompt, "waiting for key press (0-F): ")?;
            self.prompt.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match parse_key(&line) {
                Some(key) => return Ok(Some(key)),
                None => writeln!(self.prompt, "not a keypad key: {line:?}")?,
            }
        }
    }

    fn pause(&mut self, snapshot: &DebugSnapshot) -> Result<bool, Chip8Error> {
        writeln!(self.prompt, "{snapshot}")?;
        write!(self.prompt, "press enter to continue, q to quit: ")?;
        self.prompt.flush()?;

        Ok(match self.read_line()? {
            Some(line) => !line.eq_ignore_ascii_case("q"),
            None => false,
        })
    }
}
