use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::config::Glyphs;
use crate::game::{GameState, GameStatus};
use crate::snake::Position;
use crate::ui::hud::{render_hud, HudInfo};
use crate::ui::menu::{render_game_over_menu, render_pause_menu};

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, glyphs: &Glyphs, hud_info: &HudInfo) {
    let area = frame.area();
    let lines = grid_lines(state, glyphs);

    let grid_width = u16::try_from(cell_width(glyphs) * usize::from(state.bounds().width))
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let grid_height = state.bounds().height.saturating_add(2);
    let play_area = Rect::new(
        area.x,
        area.y,
        grid_width.min(area.width),
        grid_height.min(area.height),
    );

    let block = Block::bordered()
        .title(" snake ")
        .border_style(Style::new().fg(Color::DarkGray));
    frame.render_widget(
        Paragraph::new(lines.into_iter().map(Line::from).collect::<Vec<_>>()).block(block),
        play_area,
    );

    let hud_area = Rect::new(
        area.x,
        play_area.bottom(),
        area.width,
        u16::from(play_area.bottom() < area.bottom()),
    );
    render_hud(frame, hud_area, state, hud_info);

    match state.status {
        GameStatus::Paused => render_pause_menu(frame, play_area, area),
        GameStatus::GameOver => render_game_over_menu(
            frame,
            play_area,
            area,
            state.score(),
            hud_info.high_score,
            state.death_reason,
        ),
        GameStatus::Running => {}
    }
}

/// Draws the grid as text, one string per row, every cell padded to the
/// widest glyph.
#[must_use]
pub fn grid_lines(state: &GameState, glyphs: &Glyphs) -> Vec<String> {
    let width = cell_width(glyphs);
    let head = state.snake.head();
    let bounds = state.bounds();

    (0..i32::from(bounds.height))
        .map(|y| {
            let mut row = String::new();
            for x in 0..i32::from(bounds.width) {
                let cell = Position { x, y };
                let glyph = if cell == head {
                    &glyphs.snake_head
                } else if state.snake.occupies(cell) {
                    &glyphs.snake_body
                } else if state.food.contains(cell) {
                    &glyphs.food
                } else {
                    &glyphs.empty
                };
                push_padded(&mut row, glyph, width);
            }
            row
        })
        .collect()
}

/// Display width of one grid cell in terminal columns.
#[must_use]
pub fn cell_width(glyphs: &Glyphs) -> usize {
    [
        &glyphs.empty,
        &glyphs.snake_head,
        &glyphs.snake_body,
        &glyphs.food,
    ]
    .into_iter()
    .map(|glyph| glyph.width())
    .max()
    .unwrap_or(1)
    .max(1)
}

fn push_padded(row: &mut String, glyph: &str, width: usize) {
    row.push_str(glyph);
    for _ in glyph.width()..width {
        row.push(' ');
    }
}
