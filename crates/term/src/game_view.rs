//! GameView: maps an engine [`Snapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). The top [`HIDDEN_ROWS`] of the well are the
//! spawn buffer and are not drawn; row 0 of the well is the bottom line of the
//! play area.

use crate::core::Snapshot;
use crate::fb::{CellStyle, FrameBuffer};
use crate::types::{Rgb, HIDDEN_ROWS};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the well frame lands in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    /// Top-left corner of the border.
    pub x: u16,
    pub y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    pub visible_rows: usize,
    pub cols: usize,
}

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const LOCKED: Rgb = Rgb::new(150, 150, 150);
const BLOCK: char = '█';

/// A lightweight terminal renderer for the well.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Well cell width in terminal columns.
    cell_w: u16,
    /// Well cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    hidden_rows: usize,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
            hidden_rows: HIDDEN_ROWS,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_hidden_rows(mut self, hidden_rows: usize) -> Self {
        self.hidden_rows = hidden_rows;
        self
    }

    pub fn layout(&self, snap: &Snapshot, viewport: Viewport) -> BoardLayout {
        let visible_rows = snap.height.saturating_sub(self.hidden_rows);
        let frame_w = (snap.width as u16).saturating_mul(self.cell_w) + 2;
        let frame_h = (visible_rows as u16).saturating_mul(self.cell_h) + 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        BoardLayout {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y,
            frame_w,
            frame_h,
            visible_rows,
            cols: snap.width,
        }
    }

    /// Terminal position of the top-left character of well cell (row, col),
    /// or `None` if the cell is hidden or outside the well.
    pub fn cell_origin(&self, layout: &BoardLayout, row: i32, col: i32) -> Option<(u16, u16)> {
        if row < 0 || col < 0 || row as usize >= layout.visible_rows || col as usize >= layout.cols
        {
            return None;
        }
        let screen_row = (layout.visible_rows - 1 - row as usize) as u16;
        let x = layout.x + 1 + col as u16 * self.cell_w;
        let y = layout.y + 1 + screen_row * self.cell_h;
        Some((x, y))
    }

    /// Render a snapshot into an existing framebuffer, resizing it to the
    /// viewport.
    pub fn render_into(&self, snap: &Snapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(snap, viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        draw_border(fb, &layout, border);

        let empty = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        let locked = CellStyle::new(LOCKED, PLAY_BG);
        for row in 0..layout.visible_rows {
            for col in 0..layout.cols {
                let (ch, style) = if snap.is_filled(row, col) {
                    (BLOCK, locked)
                } else {
                    ('·', empty)
                };
                self.fill_cell(fb, &layout, row as i32, col as i32, ch, style);
            }
        }

        if let Some(active) = snap.active {
            let style = CellStyle::new(active.kind.color(), PLAY_BG).bold();
            for (row, col) in active.occupied_cells() {
                self.fill_cell(fb, &layout, row, col, BLOCK, style);
            }
        }

        self.draw_side_panel(fb, snap, viewport, &layout);

        if snap.game_over {
            draw_overlay_text(fb, &layout, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &Snapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        row: i32,
        col: i32,
        ch: char,
        style: CellStyle,
    ) {
        if let Some((x, y)) = self.cell_origin(layout, row, col) {
            fb.fill_rect(x, y, self.cell_w, self.cell_h, ch, style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &Snapshot,
        viewport: Viewport,
        layout: &BoardLayout,
    ) {
        let panel_x = layout.x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 8 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = layout.y;
        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_u64(panel_x, y, snap.lines_cleared, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "FRAME", label);
        y = y.saturating_add(1);
        fb.put_u64(panel_x, y, snap.frame, value);
        y = y.saturating_add(2);

        if let Some(active) = snap.active {
            fb.put_str(panel_x, y, "PIECE", label);
            y = y.saturating_add(1);
            let style = CellStyle::new(active.kind.color(), Rgb::new(0, 0, 0)).bold();
            fb.put_str(panel_x, y, active.kind.as_str(), style);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, layout: &BoardLayout, style: CellStyle) {
    let (x, y, w, h) = (layout.x, layout.y, layout.frame_w, layout.frame_h);
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, layout: &BoardLayout, text: &str) {
    let mid_y = layout.y.saturating_add(layout.frame_h / 2);
    let text_w = text.chars().count() as u16;
    let x = layout
        .x
        .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
    fb.put_str(x, mid_y, text, style);
}
