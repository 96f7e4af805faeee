use crate::render::raster::{Raster, Rgba};
use crate::render::Viewport;
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, execute, queue, terminal};
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

/// Width of one character cell in virtual device pixels.
pub(crate) const CELL_WIDTH_PX: i32 = 8;

/// Height of one character cell in virtual device pixels.
pub(crate) const CELL_HEIGHT_PX: i32 = 16;

/// Map a terminal size in cells to the viewport it stands for.
///
/// The raster keeps one pixel per cell column and two per cell row (the
/// upper and lower half blocks); the viewport is the same area expressed
/// in virtual device pixels so pixel-denominated constants keep their
/// proportions.
pub(crate) fn viewport_for(cols: u16, rows: u16) -> Viewport {
    Viewport::new(cols as i32 * CELL_WIDTH_PX, rows as i32 * CELL_HEIGHT_PX)
}

/// The raster size backing a terminal of the given dimensions.
pub(crate) fn raster_size(cols: u16, rows: u16) -> (u32, u32) {
    (cols as u32, rows as u32 * 2)
}

/// A line of styled text drawn over the raster at cell coordinates.
#[derive(Debug, Clone)]
pub(crate) struct TextOverlay {
    pub(crate) col: i32,
    pub(crate) row: i32,
    pub(crate) text: String,
    pub(crate) color: Rgba,
    pub(crate) bold: bool,
}

/// Puts the terminal into raw mode on an alternate screen and restores
/// it on drop, so a panic or early return cannot leave the shell broken.
pub(crate) struct TerminalGuard;

impl TerminalGuard {
    pub(crate) fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Presents rasters and text overlays to a terminal using half blocks.
///
/// Every cell shows two vertically stacked pixels: the upper one as the
/// foreground of a `▀` and the lower one as its background.
pub(crate) struct Presenter<W: Write> {
    out: W,
}

impl<W: Write> Presenter<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }

    pub(crate) fn present(&mut self, raster: &Raster, overlays: &[TextOverlay]) -> io::Result<()> {
        let cols = raster.width();
        let rows = raster.height() / 2;
        for row in 0..rows {
            queue!(self.out, cursor::MoveTo(0, row as u16))?;
            let mut last: Option<(Color, Color)> = None;
            for col in 0..cols {
                let fg = to_terminal_color(raster.get(col, row * 2));
                let bg = to_terminal_color(raster.get(col, row * 2 + 1));
                if last != Some((fg, bg)) {
                    queue!(self.out, SetForegroundColor(fg), SetBackgroundColor(bg))?;
                    last = Some((fg, bg));
                }
                queue!(self.out, Print('▀'))?;
            }
        }
        for overlay in overlays {
            self.present_overlay(raster, overlay, cols as i32, rows as i32)?;
        }
        queue!(self.out, SetAttribute(Attribute::Reset))?;
        self.out.flush()
    }

    fn present_overlay(
        &mut self,
        raster: &Raster,
        overlay: &TextOverlay,
        cols: i32,
        rows: i32,
    ) -> io::Result<()> {
        if overlay.row < 0 || overlay.row >= rows {
            return Ok(());
        }
        if overlay.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        queue!(self.out, SetForegroundColor(to_terminal_color(overlay.color)))?;
        let mut col = overlay.col;
        for ch in overlay.text.chars() {
            let width = ch.to_string().width() as i32;
            if col >= 0 && col + width <= cols && width > 0 {
                // Keep the pixel underneath as the cell background so the
                // text appears lit by the scene behind it.
                let under = raster.get(col as u32, (overlay.row * 2 + 1) as u32);
                queue!(
                    self.out,
                    cursor::MoveTo(col as u16, overlay.row as u16),
                    SetBackgroundColor(to_terminal_color(under)),
                    Print(ch)
                )?;
            }
            col += width;
        }
        if overlay.bold {
            queue!(self.out, SetAttribute(Attribute::NormalIntensity))?;
        }
        Ok(())
    }
}

/// Flatten an RGBA pixel onto black, the terminal's effective backdrop.
fn to_terminal_color(pixel: Rgba) -> Color {
    let flattened = pixel.over(Rgba::opaque(0, 0, 0));
    Color::Rgb { r: flattened.r, g: flattened.g, b: flattened.b }
}
