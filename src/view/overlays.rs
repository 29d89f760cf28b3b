//! Overlay rendering (status notification, help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::UiState;

/// Small notice in the bottom-right corner. It does not take focus and
/// disappears on its own.
pub fn render_status_notification(frame: &mut Frame, ui_state: &UiState) {
    if let Some(ref message) = ui_state.status_message {
        let area = frame.area();

        let popup_width = 52.min(area.width.saturating_sub(4));
        let inner_width = popup_width.saturating_sub(4).max(1) as usize;

        let line_count = ((message.chars().count() as f32) / (inner_width as f32)).ceil() as u16;

        // Height: top border (1) + message lines + bottom border (1)
        let popup_height = (2 + line_count.max(1)).min(area.height.saturating_sub(4));

        // Sits just above the now playing bar
        let popup_area = Rect {
            x: area.width.saturating_sub(popup_width + 2),
            y: area.height.saturating_sub(popup_height + 3),
            width: popup_width,
            height: popup_height,
        };

        frame.render_widget(Clear, popup_area);

        let notice = Paragraph::new(message.to_string())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Error ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                    .style(Style::default().bg(Color::Black)),
            );

        frame.render_widget(notice, popup_area);
    }
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    let keybindings = vec![
        ("", "── Fields ──"),
        ("Tab / Shift+Tab", "Cycle artist / filter / songs"),
        ("Enter", "Fetch (artist) / go to songs (filter)"),
        ("Esc", "Clear the field"),
        ("Filter", "No match shows an empty list"),
        ("", ""),
        ("", "── Songs ──"),
        ("↑ / ↓ or k / j", "Move selection"),
        ("PgUp / PgDn", "Move by a page"),
        ("Enter / Space", "Play / Pause preview"),
        ("S", "Stop preview"),
        ("F", "Fetch again"),
        ("/", "Focus filter"),
        ("A", "Focus artist"),
        ("", ""),
        ("", "── General ──"),
        ("F5", "Fetch again"),
        ("H", "Toggle this help"),
        ("Q / Ctrl+Q", "Quit"),
    ];

    let popup_width = 62.min(area.width);
    let popup_height = (keybindings.len() as u16 + 2).min(area.height.saturating_sub(4));

    let popup_area = Rect {
        x: area.width.saturating_sub(popup_width) / 2,
        y: area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
