use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::game::DeathReason;

const PAUSE_POPUP_SIZE: (u16, u16) = (24, 6);
const GAME_OVER_POPUP_SIZE: (u16, u16) = (28, 9);

/// Draws the pause screen centered over `anchor`, kept inside `bounds`.
pub fn render_pause_menu(frame: &mut Frame<'_>, anchor: Rect, bounds: Rect) {
    let popup = popup_over(anchor, bounds, PAUSE_POPUP_SIZE);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from("[P]/[Space] Resume"),
        Line::from("[Q]/[Esc] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the game-over screen centered over `anchor`, kept inside `bounds`.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    anchor: Rect,
    bounds: Rect,
    score: usize,
    high_score: usize,
    death_reason: Option<DeathReason>,
) {
    let popup = popup_over(anchor, bounds, GAME_OVER_POPUP_SIZE);
    frame.render_widget(Clear, popup);

    let is_new_high = score > high_score;
    let lines = vec![
        Line::from("GAME OVER").style(
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(format!("Best: {}", score.max(high_score))),
        Line::from(match death_reason {
            Some(DeathReason::WallCollision) => "Cause: hit wall",
            Some(DeathReason::SelfCollision) => "Cause: hit yourself",
            None => "",
        }),
        Line::from(if is_new_high { "New high score!" } else { "" }),
        Line::from("Any key to exit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn popup_over(anchor: Rect, bounds: Rect, (width, height): (u16, u16)) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);

    let center_x = anchor.x.saturating_add(anchor.width / 2);
    let center_y = anchor.y.saturating_add(anchor.height / 2);

    let x = center_x
        .saturating_sub(width / 2)
        .clamp(bounds.x, bounds.right() - width);
    let y = center_y
        .saturating_sub(height / 2)
        .clamp(bounds.y, bounds.bottom() - height);

    Rect::new(x, y, width, height)
}
