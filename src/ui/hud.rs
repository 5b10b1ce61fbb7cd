use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::game::GameState;

/// Supplemental values displayed by the HUD row.
#[derive(Debug, Clone, Copy, Default)]
pub struct HudInfo {
    pub high_score: usize,
}

/// Renders the one-line HUD: length, best score and food on the board.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, info: &HudInfo) {
    if area.height == 0 {
        return;
    }

    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::styled("Length ", label),
        Span::styled(state.score().to_string(), value),
        Span::styled("  Best ", label),
        Span::styled(info.high_score.max(state.score()).to_string(), value),
        Span::styled("  Food ", label),
        Span::styled(
            format!("{}/{}", state.food.active_count(), state.food.capacity()),
            value,
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}
