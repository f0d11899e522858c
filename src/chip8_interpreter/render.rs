use std::io::Write;

use crate::chip8_interpreter::config::{GRAPHICS_SIZE, SCREEN_WIDTH};
use crate::chip8_interpreter::error::Chip8Error;

/// Presents the framebuffer somewhere a person can see it.
pub trait Renderer {
    fn present(&mut self, graphics: &[u8; GRAPHICS_SIZE]) -> Result<(), Chip8Error>;
}

/// Character-grid renderer: `*` for a lit pixel, a space otherwise.
pub struct TextRenderer<W: Write> {
    output: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}

pub fn render_text(graphics: &[u8; GRAPHICS_SIZE]) -> String {
    let mut text = String::with_capacity(GRAPHICS_SIZE + GRAPHICS_SIZE / SCREEN_WIDTH);
    for row in graphics.chunks(SCREEN_WIDTH) {
        text.extend(row.iter().map(|pixel| if *pixel == 1 { '*' } else { ' ' }));
        text.push('\n');
    }
    text
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn present(&mut self, graphics: &[u8; GRAPHICS_SIZE]) -> Result<(), Chip8Error> {
        self.output.write_all(render_text(graphics).as_bytes())?;
        writeln!(self.output, "{}", "=".repeat(SCREEN_WIDTH))?;
        self.output.flush()?;
        Ok(())
    }
}
