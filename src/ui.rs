//! Layout and drawing: board, next preview, stats, pause and game-over overlays.

use crate::game::{BOARD_HEIGHT, BOARD_WIDTH, Cell, GameState, Piece};
use crate::theme::Theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use std::time::{Duration, Instant};
use tachyonfx::{Duration as TfxDuration, Effect, EffectRenderer, Interpolation, fx};

/// Each board cell is two terminal columns wide so cells come out square-ish.
const CELL_WIDTH: u16 = 2;

const SIDEBAR_WIDTH: u16 = 22;

/// Duration of the board fade when the game ends (TachyonFX).
const GAME_OVER_FADE_MS: u32 = 600;

/// Board size in terminal cells, border included.
fn board_pixel_size() -> (u16, u16) {
    (
        BOARD_WIDTH as u16 * CELL_WIDTH + 2,
        BOARD_HEIGHT as u16 + 2,
    )
}

/// Draw the game: centered board + sidebar, with pause/game-over overlays.
/// While game over, the board is faded via TachyonFX; the effect is created
/// on the first draw after the transition and processed every frame.
pub fn draw(
    frame: &mut Frame,
    state: &GameState,
    theme: &Theme,
    area: Rect,
    game_over_fx: &mut Option<Effect>,
    fx_process_time: &mut Option<Instant>,
    now: Instant,
) {
    let (bw, bh) = board_pixel_size();
    let total_w = bw + SIDEBAR_WIDTH;

    // Center horizontally
    let horiz_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(total_w),
            Constraint::Fill(1),
        ])
        .split(area);

    // Center vertically
    let vert_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(bh),
            Constraint::Fill(1),
        ])
        .split(horiz_chunks[1]);

    let active_area = vert_chunks[1];

    let (board_area, sidebar_area) = {
        let inner = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(bw), Constraint::Length(SIDEBAR_WIDTH)])
            .split(active_area);
        (inner[0], inner[1])
    };

    let board_rect = draw_board(frame, state, theme, board_area);
    draw_sidebar(frame, state, theme, sidebar_area);

    if state.game_over {
        apply_game_over_effect(frame, theme, board_rect, game_over_fx, fx_process_time, now);
        draw_game_over_overlay(frame, state, theme, area);
    } else if state.paused {
        draw_pause_overlay(frame, theme, area);
    }
}

/// Draw the bordered board with the active piece overlaid. Returns the inner
/// rect so the game-over fade can target just the cells.
fn draw_board(frame: &mut Frame, state: &GameState, theme: &Theme, area: Rect) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
        .title(Span::styled(" Stackertui ", Style::default().fg(theme.title)));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let buf = frame.buffer_mut();
    for y in 0..BOARD_HEIGHT {
        for x in 0..BOARD_WIDTH {
            let color = match state.board.get(x, y) {
                Some(Cell::Filled) => theme.locked,
                _ => theme.bg,
            };
            let color = active_piece_color(state, theme, x, y).unwrap_or(color);

            let rx = inner.x + x as u16 * CELL_WIDTH;
            let ry = inner.y + y as u16;
            if rx + CELL_WIDTH <= inner.x + inner.width && ry < inner.y + inner.height {
                buf.set_string(rx, ry, "  ", Style::default().bg(color));
            }
        }
    }
    inner
}

/// Colour of the active piece at board cell (x, y), if it covers it. Bitmap
/// cells above the top edge are simply not drawn.
fn active_piece_color(state: &GameState, theme: &Theme, x: usize, y: usize) -> Option<Color> {
    let piece = state.piece.as_ref()?;
    for (sx, sy) in piece.shape.occupied() {
        let bx = piece.x + sx as i32;
        let by = piece.y + sy as i32;
        if by >= 0 && (bx as usize, by as usize) == (x, y) {
            return Some(theme.piece_color(piece.kind.color_index()));
        }
    }
    None
}

fn draw_sidebar(frame: &mut Frame, state: &GameState, theme: &Theme, area: Rect) {
    let title_style = Style::default().fg(theme.title);
    let fg_style = Style::default().fg(theme.main_fg);
    let help_style = Style::default().fg(theme.inactive_fg);
    let border_style = Style::default().fg(theme.div_line).bg(theme.bg);

    // Free-floating sections with their own borders; vertical layout with gaps
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Next (border + title + preview)
            Constraint::Length(1), // gap
            Constraint::Length(6), // Stats (border + score, level, lines, status)
            Constraint::Length(1), // gap
            Constraint::Length(7), // Controls (border + key list)
        ])
        .split(area);

    // --- Next (own border) ---
    let next_block = Block::default().borders(Borders::ALL).border_style(border_style);
    let next_inner = next_block.inner(chunks[0]);
    next_block.render(chunks[0], frame.buffer_mut());
    let next_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(4)])
        .split(next_inner);
    Paragraph::new(Line::from(Span::styled("Next", title_style)))
        .render(next_layout[0], frame.buffer_mut());
    if let Some(next) = &state.next_piece {
        draw_piece_preview(frame, theme, next_layout[1], next);
    }

    // --- Stats (own border): Score, Level, Lines, status ---
    let stats_block = Block::default().borders(Borders::ALL).border_style(border_style);
    let stats_inner = stats_block.inner(chunks[2]);
    stats_block.render(chunks[2], frame.buffer_mut());
    let status = if state.game_over {
        Span::styled("Game over!", Style::default().fg(Color::Red).bold())
    } else if state.paused {
        Span::styled("Paused", Style::default().fg(Color::Yellow).bold())
    } else {
        Span::styled("Playing", fg_style)
    };
    let stats_lines = vec![
        Line::from(vec![
            Span::styled("Score: ", title_style),
            Span::styled(state.score.to_string(), fg_style),
        ]),
        Line::from(vec![
            Span::styled("Level: ", title_style),
            Span::styled(state.level.to_string(), fg_style),
        ]),
        Line::from(vec![
            Span::styled("Lines: ", title_style),
            Span::styled(state.lines_cleared.to_string(), fg_style),
        ]),
        Line::from(status),
    ];
    Paragraph::new(ratatui::text::Text::from(stats_lines))
        .render(stats_inner, frame.buffer_mut());

    // --- Controls (own border) ---
    let help_block = Block::default().borders(Borders::ALL).border_style(border_style);
    let help_inner = help_block.inner(chunks[4]);
    help_block.render(chunks[4], frame.buffer_mut());
    let help_lines = vec![
        Line::from(Span::styled("←/→ h/l  move", help_style)),
        Line::from(Span::styled("↑ k      rotate", help_style)),
        Line::from(Span::styled("↓ j      soft drop", help_style)),
        Line::from(Span::styled("space/p  pause", help_style)),
        Line::from(Span::styled("r restart  q quit", help_style)),
    ];
    Paragraph::new(ratatui::text::Text::from(help_lines))
        .render(help_inner, frame.buffer_mut());
}

/// Draw the queued piece's bitmap, centered in the preview area.
fn draw_piece_preview(frame: &mut Frame, theme: &Theme, area: Rect, piece: &Piece) {
    let color = theme.piece_color(piece.kind.color_index());
    let n = piece.shape.size() as u16;
    let off_x = area.width.saturating_sub(n * CELL_WIDTH) / 2;
    let off_y = area.height.saturating_sub(n) / 2;

    let buf = frame.buffer_mut();
    for (sx, sy) in piece.shape.occupied() {
        let rx = area.x + off_x + sx as u16 * CELL_WIDTH;
        let ry = area.y + off_y + sy as u16;
        if rx + CELL_WIDTH <= area.x + area.width && ry < area.y + area.height {
            buf.set_string(rx, ry, "██", Style::default().fg(color).bg(color));
        }
    }
}

/// Create or update the game-over fade and process it (fade the board cells
/// to the background colour over ~0.6 s).
fn apply_game_over_effect(
    frame: &mut Frame,
    theme: &Theme,
    board_rect: Rect,
    game_over_fx: &mut Option<Effect>,
    fx_process_time: &mut Option<Instant>,
    now: Instant,
) {
    let delta = fx_process_time
        .map(|t| now.saturating_duration_since(t))
        .unwrap_or(Duration::ZERO);
    let delta_ms = delta.as_millis().min(u32::MAX as u128) as u32;
    let tfx_delta = TfxDuration::from_millis(delta_ms);
    *fx_process_time = Some(now);

    if game_over_fx.is_none() {
        let bg = theme.bg;
        let effect = fx::fade_to(bg, bg, (GAME_OVER_FADE_MS, Interpolation::Linear))
            .with_area(board_rect);
        *game_over_fx = Some(effect);
    }

    if let Some(effect) = game_over_fx {
        frame.render_effect(effect, board_rect, tfx_delta);
    }
}

fn draw_pause_overlay(frame: &mut Frame, theme: &Theme, area: Rect) {
    let popup_w = 30u16;
    let popup_h = 5u16;
    let popup = Rect {
        x: area.x + area.width.saturating_sub(popup_w) / 2,
        y: area.y + area.height.saturating_sub(popup_h) / 2,
        width: popup_w.min(area.width),
        height: popup_h.min(area.height),
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Paused ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Space — Resume    Q — Quit ",
            Style::default().fg(theme.main_fg),
        )),
    ];
    let p = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.div_line).bg(theme.bg)),
    );
    p.render(popup, frame.buffer_mut());
}

fn draw_game_over_overlay(frame: &mut Frame, state: &GameState, theme: &Theme, area: Rect) {
    let popup_w = 32u16;
    let popup_h = 9u16;
    let popup = Rect {
        x: area.x + area.width.saturating_sub(popup_w) / 2,
        y: area.y + area.height.saturating_sub(popup_h) / 2,
        width: popup_w.min(area.width),
        height: popup_h.min(area.height),
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Game Over ",
            Style::default().fg(Color::White).bg(Color::Red),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(" Score: {} ", state.score),
            Style::default().fg(theme.main_fg),
        )),
        Line::from(Span::styled(
            format!(" Lines: {} ", state.lines_cleared),
            Style::default().fg(theme.main_fg),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " R — Restart    Q — Quit ",
            Style::default().fg(theme.main_fg),
        )),
    ];
    let p = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
            .title(Span::styled(" Stackertui ", Style::default().fg(theme.title))),
    );
    p.render(popup, frame.buffer_mut());
}
