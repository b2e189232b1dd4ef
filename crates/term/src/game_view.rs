//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O) and is unit-tested through the framebuffer.
//! Blinking elements (pending rows, the attack warning) and the grid shake
//! are derived from the snapshot's animation clock, so a given snapshot always
//! renders the same frame.

use crate::core::pieces::{color, mask_offsets, rotation_states, shadow_color, tint_color, CORRUPTION_COLOR};
use crate::core::{ActivePiece, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Tint, BOARD_HEIGHT, BOARD_WIDTH};

pub const BACKGROUND: Rgb = Rgb::new(15, 15, 23);
pub const GRID_BG: Rgb = Rgb::new(25, 25, 35);
pub const GRID_LINE: Rgb = Rgb::new(45, 45, 60);
pub const UI_BORDER: Rgb = Rgb::new(60, 60, 80);
pub const TEXT_PRIMARY: Rgb = Rgb::new(220, 220, 230);
pub const TEXT_SECONDARY: Rgb = Rgb::new(160, 160, 180);
pub const ACCENT: Rgb = Rgb::new(100, 200, 255);
pub const SUCCESS: Rgb = Rgb::new(80, 200, 120);
pub const WARNING: Rgb = Rgb::new(255, 180, 80);
pub const DANGER: Rgb = Rgb::new(255, 100, 100);
pub const BOSS_COLOR: Rgb = Rgb::new(150, 50, 200);
pub const CLEAR_FLASH: Rgb = Rgb::new(255, 255, 255);

/// Width of the boss health bar in glyphs.
const HEALTH_BAR_W: u16 = 20;
/// Minimum panel width worth drawing.
const PANEL_MIN_W: u16 = 12;

const BLOCK: char = '█';
const CORRUPT_BLOCK: char = '▓';
const GHOST: char = '░';
const EMPTY: char = '·';

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

/// Board frame position inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares the cells in common terminal fonts
        Self { cell_w: 2, cell_h: 1 }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Frame width and height including the border.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Render the session into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(TEXT_PRIMARY, BACKGROUND).glyph(' '));

        let (w, h) = self.frame_size();
        let centered_x = viewport.width.saturating_sub(w) / 2;
        let frame = Frame {
            x: shake_x(snap, centered_x),
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        };

        fb.draw_box(frame.x, frame.y, w, h, CellStyle::new(UI_BORDER, BACKGROUND));
        self.draw_board(fb, frame, snap);
        if snap.playable() {
            self.draw_ghost(fb, frame, snap);
            self.draw_active(fb, frame, snap);
        }

        // The panel is laid out from the unshaken frame so text does not jitter
        let panel_x = centered_x.saturating_add(w).saturating_add(2);
        if viewport.width.saturating_sub(panel_x) >= PANEL_MIN_W {
            self.draw_panel(fb, snap, panel_x, frame.y, viewport);
        }

        if snap.won {
            draw_victory(fb, frame, snap);
        } else if snap.game_over {
            draw_game_over(fb, frame, snap);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_board(&self, fb: &mut FrameBuffer, frame: Frame, snap: &GameSnapshot) {
        let flash = (snap.animation_ms / 100) % 2 == 0;
        for y in 0..BOARD_HEIGHT as usize {
            let pending = snap.is_pending_row(y);
            for x in 0..BOARD_WIDTH as usize {
                let code = snap.board[y][x];
                let corrupted = snap.corrupted[y][x] != 0;
                let (ch, style) = match Tint::from_code(code) {
                    None => (EMPTY, CellStyle::new(GRID_LINE, GRID_BG).dim()),
                    Some(_) if pending && flash => (BLOCK, CellStyle::new(CLEAR_FLASH, GRID_BG).bold()),
                    Some(_) if corrupted => (CORRUPT_BLOCK, CellStyle::new(CORRUPTION_COLOR, GRID_BG)),
                    Some(tint) => (BLOCK, CellStyle::new(tint_color(tint), GRID_BG)),
                };
                self.fill_cell(fb, frame, x as i8, y as i8, ch, style);
            }
        }
    }

    fn draw_ghost(&self, fb: &mut FrameBuffer, frame: Frame, snap: &GameSnapshot) {
        let piece = ActivePiece::from(snap.active);
        let dy = snap.ghost_y - piece.y;
        if dy <= 0 {
            return;
        }
        let style = CellStyle::new(shadow_color(piece.kind), GRID_BG).dim();
        for (x, y) in piece.cells_at(piece.rotation, 0, dy) {
            self.fill_cell(fb, frame, x, y, GHOST, style);
        }
    }

    fn draw_active(&self, fb: &mut FrameBuffer, frame: Frame, snap: &GameSnapshot) {
        let piece = ActivePiece::from(snap.active);
        let (ch, fg) = if piece.corrupted {
            (CORRUPT_BLOCK, CORRUPTION_COLOR)
        } else {
            (BLOCK, color(piece.kind))
        };
        let style = CellStyle::new(fg, GRID_BG).bold();
        for (x, y) in piece.cells() {
            self.fill_cell(fb, frame, x, y, ch, style);
        }
    }

    /// Paint one board cell; cells outside the board are skipped.
    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, ch: char, style: CellStyle) {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = frame.x + 1 + x as u16 * self.cell_w;
        let py = frame.y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, top: u16, viewport: Viewport) {
        let label = CellStyle::new(TEXT_SECONDARY, BACKGROUND).bold();
        let value = CellStyle::new(TEXT_PRIMARY, BACKGROUND);
        let mut y = top;

        for (name, v) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(x, y, name, label);
            fb.put_str(x, y + 1, &format_thousands(v), value);
            y += 3;
        }

        fb.put_str(x, y, "NEXT", label);
        y += 1;
        self.draw_preview(fb, x, y, ActivePiece::from(snap.next));
        y += 5;

        match snap.boss.as_ref() {
            Some(_) => draw_boss_panel(fb, snap, x, y),
            None => draw_controls(fb, x, y, viewport),
        }
    }

    /// Next piece in its spawn rotation, trimmed to its occupied rows.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: ActivePiece) {
        let offsets = mask_offsets(&rotation_states(piece.kind)[0]);
        let top = offsets.iter().map(|&(_, r)| r).min().unwrap_or(0);
        let left = offsets.iter().map(|&(c, _)| c).min().unwrap_or(0);
        let (ch, fg) = if piece.corrupted {
            (CORRUPT_BLOCK, CORRUPTION_COLOR)
        } else {
            (BLOCK, color(piece.kind))
        };
        let style = CellStyle::new(fg, BACKGROUND);
        for (c, r) in offsets {
            let px = x + (c - left) as u16 * self.cell_w;
            let py = y + (r - top) as u16;
            fb.fill_rect(px, py, self.cell_w, 1, ch, style);
        }
    }

    /// Title screen with the mode choice.
    pub fn render_title(&self, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(TEXT_PRIMARY, BACKGROUND).glyph(' '));
        let cx = viewport.width / 2;
        let cy = viewport.height / 2;
        let bg = BACKGROUND;
        fb.put_str_centered(cx, cy.saturating_sub(4), "TETRIS OVERLORD", CellStyle::new(ACCENT, bg).bold());
        fb.put_str_centered(cx, cy.saturating_sub(1), "1 - Classic Mode", CellStyle::new(TEXT_PRIMARY, bg));
        fb.put_str_centered(cx, cy, "2 - Boss Fight Mode", CellStyle::new(BOSS_COLOR, bg).bold());
        fb.put_str_centered(cx, cy + 3, "Press 1 or 2 to select mode", CellStyle::new(TEXT_SECONDARY, bg));
        fb.put_str_centered(cx, cy + 4, "ESC to quit", CellStyle::new(TEXT_SECONDARY, bg).dim());
    }
}

/// Horizontal jitter while the boss grid shake is active.
fn shake_x(snap: &GameSnapshot, x: u16) -> u16 {
    let Some(boss) = snap.boss.as_ref() else {
        return x;
    };
    if boss.shake_remaining_ms == 0 {
        return x;
    }
    let amp = boss.shake_intensity.round() as i32;
    if amp <= 0 {
        return x;
    }
    let span = 2 * amp + 1;
    let offset = (snap.animation_ms / 40) as i32 % span - amp;
    (i32::from(x) + offset).clamp(0, i32::from(u16::MAX)) as u16
}

fn draw_boss_panel(fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, mut y: u16) {
    let Some(boss) = snap.boss.as_ref() else {
        return;
    };
    let bg = BACKGROUND;

    fb.put_str(x, y, "TETRIS OVERLORD", CellStyle::new(BOSS_COLOR, bg).bold());
    y += 1;
    fb.put_str(x, y, &format!("Phase {}", boss.phase), CellStyle::new(BOSS_COLOR, bg));
    y += 1;

    let health_color = if boss.health < 30 {
        DANGER
    } else if boss.health < 60 {
        WARNING
    } else {
        SUCCESS
    };
    let filled = if boss.max_health == 0 {
        0
    } else {
        (boss.health * u32::from(HEALTH_BAR_W) / boss.max_health) as u16
    };
    fb.fill_rect(x, y, filled, 1, BLOCK, CellStyle::new(health_color, bg));
    fb.fill_rect(x + filled, y, HEALTH_BAR_W - filled, 1, '░', CellStyle::new(GRID_LINE, bg));
    y += 1;
    fb.put_str(
        x,
        y,
        &format!("{}/{}", boss.health, boss.max_health),
        CellStyle::new(TEXT_PRIMARY, bg),
    );
    y += 2;

    let mut status = |text: &str, fg: Rgb| {
        fb.put_str(x, y, text, CellStyle::new(fg, bg).bold());
        y += 1;
    };
    if snap.speed_boost_ms > 0 {
        status("SPEED BOOST!", WARNING);
    }
    if snap.time_pressure_ms > 0 {
        status("TIME PRESSURE!", DANGER);
    }
    if snap.corruption_active {
        status("CORRUPTION!", CORRUPTION_COLOR);
    }
    if boss.stunned {
        status("BOSS STUNNED", SUCCESS);
    }
    if boss.attack_imminent && (snap.animation_ms / 100) % 2 == 1 {
        status("INCOMING ATTACK!", DANGER);
    }
}

fn draw_controls(fb: &mut FrameBuffer, x: u16, mut y: u16, viewport: Viewport) {
    let style = CellStyle::new(TEXT_SECONDARY, BACKGROUND);
    let lines = [
        "A/D  Move",
        "S    Soft drop",
        "W    Rotate",
        "SPC  Hard drop",
        "",
        "R    Restart",
        "ESC  Quit",
    ];
    fb.put_str(x, y, "CONTROLS", style.bold());
    y += 1;
    for line in lines {
        if y >= viewport.height {
            break;
        }
        fb.put_str(x, y, line, style);
        y += 1;
    }
}

fn draw_victory(fb: &mut FrameBuffer, frame: Frame, snap: &GameSnapshot) {
    let lines = [
        ("VICTORY!".to_string(), CellStyle::new(SUCCESS, BACKGROUND).bold()),
        (
            format!("Score {}", format_thousands(snap.score)),
            CellStyle::new(TEXT_PRIMARY, BACKGROUND),
        ),
        ("R restart  ESC quit".to_string(), CellStyle::new(TEXT_SECONDARY, BACKGROUND)),
    ];
    draw_overlay(fb, frame, &lines);
}

fn draw_game_over(fb: &mut FrameBuffer, frame: Frame, snap: &GameSnapshot) {
    let mut lines = vec![("GAME OVER".to_string(), CellStyle::new(DANGER, BACKGROUND).bold())];
    if let Some(boss) = snap.boss.as_ref().filter(|b| b.health > 0) {
        lines.push((
            format!("Boss {}/{}", boss.health, boss.max_health),
            CellStyle::new(BOSS_COLOR, BACKGROUND),
        ));
    }
    lines.push((
        format!("Score {}", format_thousands(snap.score)),
        CellStyle::new(TEXT_PRIMARY, BACKGROUND),
    ));
    lines.push(("R restart  ESC quit".to_string(), CellStyle::new(TEXT_SECONDARY, BACKGROUND)));
    draw_overlay(fb, frame, &lines);
}

/// Centered text block over the board with a blank band behind it.
fn draw_overlay(fb: &mut FrameBuffer, frame: Frame, lines: &[(String, CellStyle)]) {
    let n = lines.len() as u16;
    let top = frame.y + frame.h.saturating_sub(n) / 2;
    let cx = frame.x + frame.w / 2;
    fb.fill_rect(
        frame.x + 1,
        top.saturating_sub(1),
        frame.w.saturating_sub(2),
        n + 2,
        ' ',
        CellStyle::new(TEXT_PRIMARY, BACKGROUND),
    );
    for (i, (text, style)) in lines.iter().enumerate() {
        fb.put_str_centered(cx, top + i as u16, text, *style);
    }
}

/// `1234567` -> `1,234,567`
pub fn format_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separator() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }
}
