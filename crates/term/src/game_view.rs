//! GameView: paints a `GameSnapshot` into a framebuffer.
//!
//! Pure (no I/O), so everything here is unit-tested against the framebuffer.

use crate::core::{GameSnapshot, Matrix, Piece};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, SessionState};

/// Terminal size in cells
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

/// Vertical placement of the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const BLOCK: char = '█';
const GHOST: char = '░';
const DOT: char = '·';

const PANEL_W: u16 = 12;

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

pub struct GameView {
    /// Terminal columns per board cell
    cell_w: u16,
    /// Terminal rows per board cell
    cell_h: u16,
    anchor_y: AnchorY,
    /// Key list drawn over the well
    help: bool,
}

/// Lines of the help overlay
const HELP_LINES: [&str; 10] = [
    "KEYS",
    "",
    "←→ AD HL move",
    "↑ W K rotate",
    "↓ S J drop",
    "SPACE hard drop",
    "P ESC pause",
    "ENTER N start",
    "Q quit",
    "F1 ? close",
];

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps blocks roughly square.
        Self::new(2, 1)
    }
}

/// Where the well landed in the framebuffer
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
            help: false,
        }
    }

    pub fn help_visible(&self) -> bool {
        self.help
    }

    pub fn set_help(&mut self, visible: bool) {
        self.help = visible;
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Repaint `fb` from scratch, resizing it to `viewport` first.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let cols = snap.grid.width().max(0) as u16;
        let rows = snap.grid.height().max(0) as u16;
        let inner_w = cols.saturating_mul(self.cell_w);
        let inner_h = rows.saturating_mul(self.cell_h);
        let w = inner_w.saturating_add(2);
        let h = inner_h.saturating_add(2);
        let with_panel = w.saturating_add(2).saturating_add(PANEL_W);

        let frame = Frame {
            x: viewport.width.saturating_sub(with_panel) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            inner_w,
            inner_h,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), WELL_BG),
        );
        draw_border(fb, frame, CellStyle::default());

        let empty = CellStyle::new(Rgb::new(90, 90, 100), WELL_BG).dim();
        for (y, row) in snap.grid.rows().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                let (x, y) = (x as i16, y as i16);
                match PieceKind::from_id(cell) {
                    Some(kind) => self.draw_block(fb, frame, x, y, kind),
                    None => self.fill_cell(fb, frame, x, y, DOT, empty),
                }
            }
        }

        if let Some(active) = &snap.active {
            if let Some(ghost_y) = snap.ghost_y.filter(|&gy| gy != active.y) {
                let style = CellStyle::new(kind_rgb(active.kind).scaled(1, 2), WELL_BG).dim();
                for (mx, my, _) in active.matrix.occupied() {
                    self.fill_cell(fb, frame, active.x + mx, ghost_y + my, GHOST, style);
                }
            }
            for (x, y, _) in active.cells() {
                self.draw_block(fb, frame, x, y, active.kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if self.help {
            draw_overlay(fb, frame, &HELP_LINES);
            return;
        }

        match snap.state {
            SessionState::Idle => draw_overlay(fb, frame, &["TETRIS", "", "ENTER TO START"]),
            SessionState::Paused => draw_overlay(fb, frame, &["PAUSED", "", "P TO RESUME"]),
            SessionState::GameOver => {
                draw_overlay(fb, frame, &["GAME OVER", "", "ENTER TO RESTART"])
            }
            SessionState::Playing => {}
        }
    }

    /// Render into a freshly allocated framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Terminal position of board cell (x, y); `None` for cells off the board
    fn cell_origin(&self, frame: Frame, x: i16, y: i16) -> Option<(u16, u16)> {
        let cols = (frame.w - 2) / self.cell_w;
        let rows = (frame.h - 2) / self.cell_h;
        if x < 0 || y < 0 || x as u16 >= cols || y as u16 >= rows {
            return None;
        }
        Some((
            (frame.x + 1).saturating_add((x as u16).saturating_mul(self.cell_w)),
            (frame.y + 1).saturating_add((y as u16).saturating_mul(self.cell_h)),
        ))
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i16, y: i16, ch: char, style: CellStyle) {
        if let Some((px, py)) = self.cell_origin(frame, x, y) {
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: i16, y: i16, kind: PieceKind) {
        let style = CellStyle::new(kind_rgb(kind), WELL_BG).bold();
        self.fill_cell(fb, frame, x, y, BLOCK, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let x = frame.x.saturating_add(frame.w).saturating_add(2);
        if x.saturating_add(PANEL_W) > viewport.width {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = frame.y;
        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(x, y, name, label);
            fb.put_u32(x, y + 1, n, value);
            y += 3;
        }

        fb.put_str(x, y, "NEXT", label);
        y += 1;
        if let Some(kind) = snap.next {
            self.draw_preview(fb, x, y, Piece::new(kind).matrix(), kind);
        }
        y += 5;

        let hint = value.dim();
        for line in ["←→ move", "↑ rotate", "↓ drop", "SPC hard", "P pause", "Q quit", "F1 keys"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(x, y, line, hint);
            y += 1;
        }
    }

    /// Next piece in spawn orientation, one terminal row per matrix row.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, matrix: &Matrix, kind: PieceKind) {
        let style = CellStyle::new(kind_rgb(kind), SCREEN_BG).bold();
        for (mx, my, _) in matrix.occupied() {
            fb.fill_rect(
                x.saturating_add((mx as u16).saturating_mul(self.cell_w)),
                y.saturating_add(my as u16),
                self.cell_w,
                1,
                BLOCK,
                style,
            );
        }
    }
}

fn kind_rgb(kind: PieceKind) -> Rgb {
    Rgb::from(kind.color())
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
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

/// Centered lines over the well
fn draw_overlay(fb: &mut FrameBuffer, frame: Frame, lines: &[&str]) {
    let style = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
    let top = (frame.y + frame.h / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let text_w = line.chars().count() as u16;
        let x = frame.x + frame.w.saturating_sub(text_w) / 2;
        fb.put_str(x, top + i as u16, line, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActiveSnapshot, Board};

    fn text(fb: &FrameBuffer) -> String {
        let mut s = String::new();
        for y in 0..fb.height() {
            for x in 0..fb.width() {
                s.push(fb.get(x, y).map_or(' ', |c| c.ch));
            }
            s.push('\n');
        }
        s
    }

    fn count(fb: &FrameBuffer, ch: char) -> usize {
        fb.cells().iter().filter(|c| c.ch == ch).count()
    }

    fn playing(board: &Board) -> GameSnapshot {
        GameSnapshot {
            grid: board.grid(),
            state: SessionState::Playing,
            ..GameSnapshot::default()
        }
    }

    #[test]
    fn test_empty_board_draws_dots_and_border() {
        let snap = playing(&Board::default());
        let fb = GameView::default().render(&snap, Viewport::new(80, 30));
        assert_eq!(count(&fb, DOT), 12 * 24 * 2);
        assert_eq!(count(&fb, '┌'), 1);
        assert_eq!(count(&fb, '┘'), 1);
    }

    #[test]
    fn test_locked_cells_use_kind_color() {
        let mut board = Board::default();
        board.set(0, 23, PieceKind::T.id());
        let snap = playing(&board);
        let fb = GameView::new(1, 1)
            .with_anchor_y(AnchorY::Top)
            .render(&snap, Viewport::new(40, 30));

        let blocks: Vec<_> = fb.cells().iter().filter(|c| c.ch == BLOCK).collect();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].style.fg, Rgb::from(PieceKind::T.color()));
        // Well plus panel is 28 wide, centered in 40: border at column 6.
        // Top anchor puts the border on row 0, so board row 23 is terminal row 24.
        assert_eq!(fb.get(7, 24).map(|c| c.ch), Some(BLOCK));
    }

    #[test]
    fn test_active_piece_and_ghost() {
        let board = Board::default();
        let mut snap = playing(&board);
        let piece = Piece::new(PieceKind::O);
        snap.active = Some(ActiveSnapshot::new(&piece, (5, 0)));
        snap.ghost_y = Some(22);

        let fb = GameView::new(1, 1).render(&snap, Viewport::new(40, 30));
        assert_eq!(count(&fb, BLOCK), 4);
        assert_eq!(count(&fb, GHOST), 4);
    }

    #[test]
    fn test_ghost_hidden_when_resting() {
        let mut snap = playing(&Board::default());
        snap.active = Some(ActiveSnapshot::new(&Piece::new(PieceKind::O), (5, 22)));
        snap.ghost_y = Some(22);
        let fb = GameView::new(1, 1).render(&snap, Viewport::new(40, 30));
        assert_eq!(count(&fb, GHOST), 0);
        assert_eq!(count(&fb, BLOCK), 4);
    }

    #[test]
    fn test_cells_above_grid_are_clipped() {
        let mut snap = playing(&Board::default());
        snap.active = Some(ActiveSnapshot::new(&Piece::new(PieceKind::I), (4, -2)));
        let fb = GameView::new(1, 1).render(&snap, Viewport::new(40, 30));
        assert_eq!(count(&fb, BLOCK), 2);
    }

    #[test]
    fn test_side_panel_shows_counters_and_next() {
        let mut snap = playing(&Board::default());
        snap.score = 1234;
        snap.level = 3;
        snap.lines = 25;
        snap.next = Some(PieceKind::I);

        let fb = GameView::default().render(&snap, Viewport::new(80, 30));
        let out = text(&fb);
        for needle in ["SCORE", "1234", "LEVEL", "LINES", "25", "NEXT"] {
            assert!(out.contains(needle), "missing {needle}");
        }
        // Vertical I preview: four rows of two-column blocks.
        assert_eq!(count(&fb, BLOCK), 8);
    }

    #[test]
    fn test_overlays_follow_state() {
        let board = Board::default();
        let view = GameView::default();
        let vp = Viewport::new(80, 30);

        let mut snap = playing(&board);
        assert!(!text(&view.render(&snap, vp)).contains("PAUSED"));

        snap.state = SessionState::Paused;
        assert!(text(&view.render(&snap, vp)).contains("PAUSED"));

        snap.state = SessionState::GameOver;
        assert!(text(&view.render(&snap, vp)).contains("GAME OVER"));

        snap.state = SessionState::Idle;
        assert!(text(&view.render(&snap, vp)).contains("ENTER TO START"));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let mut snap = playing(&Board::default());
        snap.active = Some(ActiveSnapshot::new(&Piece::new(PieceKind::T), (5, 0)));
        snap.next = Some(PieceKind::L);
        snap.state = SessionState::GameOver;
        for (w, h) in [(0, 0), (1, 1), (10, 5), (30, 10)] {
            let fb = GameView::default().render(&snap, Viewport::new(w, h));
            assert_eq!(fb.cells().len(), w as usize * h as usize);
        }
    }

    #[test]
    fn test_help_overlay_replaces_state_overlay() {
        let mut snap = playing(&Board::default());
        snap.state = SessionState::Paused;
        let mut view = GameView::default();
        let vp = Viewport::new(80, 30);

        view.set_help(true);
        assert!(view.help_visible());
        let out = text(&view.render(&snap, vp));
        for needle in ["KEYS", "SPACE hard drop", "ENTER N start", "F1 ? close"] {
            assert!(out.contains(needle), "missing {needle}");
        }
        assert!(!out.contains("PAUSED"));

        view.set_help(false);
        let out = text(&view.render(&snap, vp));
        assert!(out.contains("PAUSED"));
        assert!(!out.contains("KEYS"));
    }

    #[test]
    fn test_huge_cell_size_saturates() {
        let mut snap = playing(&Board::default());
        snap.active = Some(ActiveSnapshot::new(&Piece::new(PieceKind::T), (5, 0)));
        snap.next = Some(PieceKind::I);
        for (cw, ch) in [(u16::MAX, 1), (1, u16::MAX), (6000, 3000)] {
            let fb = GameView::new(cw, ch).render(&snap, Viewport::new(40, 20));
            assert_eq!(fb.cells().len(), 40 * 20);
        }
    }

    #[test]
    fn test_render_into_reuses_buffer() {
        let snap = playing(&Board::default());
        let view = GameView::default();
        let mut fb = FrameBuffer::new(1, 1);
        view.render_into(&snap, Viewport::new(60, 28), &mut fb);
        assert_eq!((fb.width(), fb.height()), (60, 28));
        assert_eq!(fb, view.render(&snap, Viewport::new(60, 28)));
    }
}
