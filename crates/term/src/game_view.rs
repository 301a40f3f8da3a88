//! GameView: maps an `EngineSnapshot` plus front-end state into a framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::EngineSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::palette::{AdjustKnob, ColorAdjust, BACKGROUND, SYMBOL_GLYPHS};
use crate::types::{Coord, MatchCue, Move, Symbol, GRID_SIZE};

const N: u16 = GRID_SIZE as u16;

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

/// Side panel content below the stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    None,
    Help,
    Scores,
    Graphics,
}

/// Modal prompt drawn over the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    ExitPrompt,
    RoundOver,
}

impl Overlay {
    pub fn text(self) -> &'static str {
        match self {
            Overlay::None => "",
            Overlay::ExitPrompt => "Exit game? (y/n)",
            Overlay::RoundOver => "No more moves possible! Another try? (y/n)",
        }
    }
}

/// Front-end state the engine does not know about.
#[derive(Debug, Clone, Copy)]
pub struct HudView<'a> {
    pub cursor: Coord,
    pub hint: Option<Move>,
    /// Board positions cleared by any pass of the latest accepted swap,
    /// highlighted briefly. After gravity they mark where the chain happened,
    /// not the tiles now sitting there.
    pub flash: &'a [Coord],
    /// Cleared count and cue of the latest accepted swap
    pub last_chain: Option<(usize, MatchCue)>,
    /// One-line note about the last engine event
    pub status: &'a str,
    pub panel: Panel,
    /// Text for the help and scores panels
    pub panel_lines: &'a [String],
    pub overlay: Overlay,
    pub adjust: ColorAdjust,
    pub knob: AdjustKnob,
    pub player: &'a str,
}

impl Default for HudView<'_> {
    fn default() -> Self {
        Self {
            cursor: Coord::new(0, 0),
            hint: None,
            flash: &[],
            last_chain: None,
            status: "",
            panel: Panel::None,
            panel_lines: &[],
            overlay: Overlay::None,
            adjust: ColorAdjust::default(),
            knob: AdjustKnob::Saturation,
            player: "",
        }
    }
}

/// Where the board frame sits inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub x: u16,
    pub y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Terminal renderer for the board and its side panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    show_grid: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 3x1: glyph in the middle, room for selection marks on both sides.
        Self {
            cell_w: 3,
            cell_h: 1,
            anchor_y: AnchorY::Center,
            show_grid: false,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            ..Self::default()
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    pub fn layout(&self, viewport: Viewport) -> BoardLayout {
        let frame_w = N * self.cell_w + 2;
        let frame_h = N * self.cell_h + 2;
        let x = viewport.width.saturating_sub(frame_w + SIDE_PANEL_W) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        BoardLayout {
            x,
            y,
            frame_w,
            frame_h,
        }
    }

    /// Board coordinate under a terminal cell, `None` outside the board.
    pub fn hit_test(&self, viewport: Viewport, x: u16, y: u16) -> Option<Coord> {
        let layout = self.layout(viewport);
        let bx = x.checked_sub(layout.x + 1)?;
        let by = y.checked_sub(layout.y + 1)?;
        let col = bx / self.cell_w;
        let row = by / self.cell_h;
        if col >= N || row >= N {
            return None;
        }
        Some(Coord::new(row as i8, col as i8))
    }

    /// Render into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        snap: &EngineSnapshot,
        hud: &HudView<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let layout = self.layout(viewport);
        let board_bg = hud.adjust.background(BACKGROUND);
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.fill_rect(
            layout.x + 1,
            layout.y + 1,
            N * self.cell_w,
            N * self.cell_h,
            ' ',
            CellStyle::new(board_bg, board_bg),
        );
        draw_border(fb, layout.x, layout.y, layout.frame_w, layout.frame_h, border);

        for c in Coord::all() {
            self.draw_board_cell(fb, layout, snap, hud, c, board_bg);
        }

        self.draw_side_panel(fb, snap, hud, viewport, layout);

        if hud.overlay != Overlay::None {
            draw_overlay_text(fb, viewport, layout, hud.overlay.text());
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &EngineSnapshot, hud: &HudView<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: BoardLayout,
        snap: &EngineSnapshot,
        hud: &HudView<'_>,
        c: Coord,
        board_bg: Rgb,
    ) {
        let px = layout.x + 1 + c.col as u16 * self.cell_w;
        let py = layout.y + 1 + c.row as u16 * self.cell_h;

        let Some(symbol) = snap.symbol_at(c).and_then(Symbol::new) else {
            let dot = CellStyle::new(Rgb::new(90, 90, 100), board_bg).dim();
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '·', dot);
            return;
        };

        let flashing = hud.flash.contains(&c);
        let selected = snap.selected == Some(c);
        let tile = hud.adjust.symbol_color(symbol);

        let mut style = if flashing {
            CellStyle::new(Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)).bold()
        } else {
            CellStyle::new(tile, hud.adjust.tile_backing(board_bg))
        };
        if selected {
            style = CellStyle::new(Rgb::new(0, 0, 0), tile).bold();
        }

        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        let mid_y = py + self.cell_h / 2;
        fb.put_char(px + self.cell_w / 2, mid_y, SYMBOL_GLYPHS[symbol.index() as usize], style);

        if self.cell_w < 3 {
            return;
        }
        let marks = if hud.cursor == c {
            Some(('[', ']'))
        } else if hud.hint.is_some_and(|m| m.contains(c)) {
            Some(('(', ')'))
        } else if self.show_grid {
            Some(('│', ' '))
        } else {
            None
        };
        if let Some((l, r)) = marks {
            let mark = CellStyle {
                fg: Rgb::new(255, 255, 255),
                bold: true,
                ..style
            };
            fb.put_char(px, mid_y, l, mark);
            fb.put_char(px + self.cell_w - 1, mid_y, r, mark);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &EngineSnapshot,
        hud: &HudView<'_>,
        viewport: Viewport,
        layout: BoardLayout,
    ) {
        let panel_x = layout.x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let dim = value.dim();

        let mut y = layout.y;
        fb.put_str(panel_x, y, "BLOXX", label);
        y += 2;

        fb.put_str(panel_x, y, "CLEARED", label);
        fb.put_u32(panel_x + 9, y, snap.total_cleared, value);
        y += 1;
        fb.put_str(panel_x, y, "MOVES", label);
        fb.put_u32(panel_x + 9, y, snap.moves_made, value);
        y += 1;
        fb.put_str(panel_x, y, "TIME", label);
        let secs = (snap.elapsed_ms / 1000) as u32;
        let w = fb.put_u32(panel_x + 9, y, secs / 60, value);
        fb.put_char(panel_x + 9 + w, y, ':', value);
        let ss = secs % 60;
        if ss < 10 {
            fb.put_char(panel_x + 10 + w, y, '0', value);
            fb.put_u32(panel_x + 11 + w, y, ss, value);
        } else {
            fb.put_u32(panel_x + 10 + w, y, ss, value);
        }
        y += 1;
        fb.put_str(panel_x, y, "ROUND", label);
        fb.put_u32(panel_x + 9, y, snap.round_id, value);
        y += 1;
        fb.put_str(panel_x, y, "LAST", label);
        match hud.last_chain {
            Some((cleared, cue)) => {
                let w = fb.put_u32(panel_x + 9, y, cleared as u32, value);
                fb.put_str(panel_x + 10 + w, y, cue.as_str(), value);
            }
            None => {
                fb.put_char(panel_x + 9, y, '-', value);
            }
        }
        y += 1;
        if !hud.status.is_empty() {
            fb.put_str(panel_x + 9, y, hud.status, dim);
            y += 1;
        }
        if !hud.player.is_empty() {
            fb.put_str(panel_x, y, "PLAYER", label);
            fb.put_str(panel_x + 9, y, hud.player, value);
            y += 1;
        }
        if snap.fallback {
            fb.put_str(panel_x, y, "(fallback board)", dim);
            y += 1;
        }

        y += 1;
        fb.put_str(panel_x, y, "t tip  g gfx  ? help", dim);
        y += 1;
        fb.put_str(panel_x, y, "bksp drop selection", dim);
        y += 1;
        fb.put_str(panel_x, y, "o top5  r new  q quit", dim);
        y += 2;

        match hud.panel {
            Panel::None => {}
            Panel::Help | Panel::Scores => {
                let title = if hud.panel == Panel::Help {
                    "HELP"
                } else {
                    "TOP 5 GAMES"
                };
                fb.put_str(panel_x, y, title, label);
                y += 1;
                for line in hud.panel_lines {
                    if y >= viewport.height {
                        break;
                    }
                    fb.put_str(panel_x, y, line, value);
                    y += 1;
                }
            }
            Panel::Graphics => {
                fb.put_str(panel_x, y, "GRAPHICS", label);
                y += 1;
                for knob in AdjustKnob::ALL {
                    if y >= viewport.height {
                        break;
                    }
                    let style = if knob == hud.knob { label } else { value };
                    fb.put_char(panel_x, y, if knob == hud.knob { '>' } else { ' ' }, style);
                    fb.put_str(panel_x + 2, y, knob.label(), style);
                    draw_gauge(fb, panel_x + 16, y, hud.adjust.get(knob), style);
                    y += 1;
                }
            }
        }
    }
}

const SIDE_PANEL_W: u16 = 26;
const GAUGE_W: u16 = 10;

fn draw_gauge(fb: &mut FrameBuffer, x: u16, y: u16, value: f32, style: CellStyle) {
    let filled = (value.clamp(0.0, 1.0) * GAUGE_W as f32).round() as u16;
    fb.put_char(x, y, '[', style);
    for i in 0..GAUGE_W {
        fb.put_char(x + 1 + i, y, if i < filled { '#' } else { '-' }, style);
    }
    fb.put_char(x + 1 + GAUGE_W, y, ']', style);
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

/// Centered on the board row in the middle, widened to the viewport when the
/// text does not fit inside the frame.
fn draw_overlay_text(fb: &mut FrameBuffer, viewport: Viewport, layout: BoardLayout, text: &str) {
    let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
    let text_w = text.chars().count() as u16 + 2;
    let mid_y = layout.y.saturating_add(layout.frame_h / 2);
    let x = if text_w <= layout.frame_w {
        layout.x + (layout.frame_w - text_w) / 2
    } else {
        viewport.width.saturating_sub(text_w) / 2
    };

    fb.fill_rect(x, mid_y.saturating_sub(1), text_w, 3, ' ', style);
    fb.put_str(x + 1, mid_y, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap() -> EngineSnapshot {
        let mut s = EngineSnapshot::default();
        for (r, row) in s.board.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = ((r * 3 + c) % 8) as u8 + 1;
            }
        }
        s
    }

    #[test]
    fn hit_test_maps_cells_and_rejects_border() {
        let view = GameView::default();
        let vp = Viewport::new(80, 24);
        let layout = view.layout(vp);

        assert_eq!(view.hit_test(vp, layout.x, layout.y), None);
        assert_eq!(
            view.hit_test(vp, layout.x + 1, layout.y + 1),
            Some(Coord::new(0, 0))
        );
        assert_eq!(
            view.hit_test(vp, layout.x + 1 + 3 * 4 + 2, layout.y + 1 + 7),
            Some(Coord::new(7, 4))
        );
        assert_eq!(
            view.hit_test(vp, layout.x + layout.frame_w - 1, layout.y + 1),
            None
        );
    }

    #[test]
    fn cursor_and_hint_marks() {
        let view = GameView::default();
        let vp = Viewport::new(80, 24);
        let layout = view.layout(vp);
        let hud = HudView {
            cursor: Coord::new(0, 0),
            hint: Some(Move::new(Coord::new(0, 1), Coord::new(0, 2))),
            ..HudView::default()
        };

        let fb = view.render(&snap(), &hud, vp);
        let row = fb.row_text(layout.y + 1);
        let board: String = row
            .chars()
            .skip(layout.x as usize + 1)
            .take(9)
            .collect();
        assert_eq!(board, "[@](#)(%)");
    }
}
