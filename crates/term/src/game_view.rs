//! GameView: maps a composite grid and the HUD into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::Grid;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::ColorCode;

/// Key help shown in the middle of the info bar when there is nothing else to say.
pub const HELP_TEXT: &str = "[Space] to pause, [C] to clear";

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything the info bar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hud<'a> {
    pub lines: u32,
    pub speed: i32,
    pub paused: bool,
    /// One-line message (save failure, blocked spawn). `PAUSED` wins over it.
    pub notice: Option<&'a str>,
}

impl Hud<'_> {
    fn center_text(&self) -> &str {
        if self.paused {
            "PAUSED"
        } else {
            self.notice.unwrap_or(HELP_TEXT)
        }
    }
}

const BAR_STYLE: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(80, 80, 80)).bold();

/// Display color of a grid color code. Unknown codes render as empty.
pub fn color_for(code: ColorCode) -> Rgb {
    match code {
        1 => Rgb::new(255, 255, 0),   // yellow
        2 => Rgb::new(65, 105, 225),  // royal blue
        3 => Rgb::new(255, 0, 0),     // red
        4 => Rgb::new(255, 165, 0),   // orange
        5 => Rgb::new(124, 252, 0),   // lawn green
        6 => Rgb::new(199, 21, 133),  // medium violet red
        7 => Rgb::new(255, 228, 225), // misty rose
        _ => Rgb::new(50, 50, 50),
    }
}

/// Draws the info bar on row 0 and the grid below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps cells roughly square in most fonts.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Callers keep one framebuffer across frames so the hot path does not
    /// allocate.
    pub fn render_into(&self, grid: &Grid, hud: &Hud<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        if viewport.height == 0 {
            return;
        }
        self.draw_info_bar(fb, hud, viewport.width);

        let rows = grid.height().min(viewport.height as usize - 1);
        for y in 0..rows {
            for (x, &code) in grid.row(y).iter().enumerate() {
                let Some(px) = u16::try_from(x)
                    .ok()
                    .and_then(|x| x.checked_mul(self.cell_w))
                    .filter(|&px| px < viewport.width)
                else {
                    break;
                };
                let style = CellStyle::new(color_for(code), color_for(code));
                fb.fill_rect(px, y as u16 + 1, self.cell_w, 1, style.cell(' '));
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, grid: &Grid, hud: &Hud<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(grid, hud, viewport, &mut fb);
        fb
    }

    fn draw_info_bar(&self, fb: &mut FrameBuffer, hud: &Hud<'_>, width: u16) {
        fb.fill_rect(0, 0, width, 1, BAR_STYLE.cell(' '));

        fb.put_str(0, 0, &format!("Speed: {}", hud.speed), BAR_STYLE);

        let center = hud.center_text();
        let center_w = center.chars().count() as u16;
        fb.put_str(width.saturating_sub(center_w) / 2, 0, center, BAR_STYLE);

        let right = format!("Lines: {} ", hud.lines);
        let right_w = right.chars().count() as u16;
        fb.put_str(width.saturating_sub(right_w), 0, &right, BAR_STYLE);
    }
}
