use crate::config::ProfileConfig;
use crate::theme::Palette;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// The sidebar panel: static profile content from configuration.
pub fn render(frame: &mut Frame, area: Rect, profile: &ProfileConfig, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            profile.name.clone(),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            profile.subtitle.clone(),
            Style::default().fg(palette.muted),
        )),
        Line::from(""),
    ];

    if !profile.networks.is_empty() {
        lines.push(Line::from(Span::styled(
            "Networks",
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        )));
        for network in &profile.networks {
            lines.push(Line::from(Span::styled(
                network.clone(),
                Style::default().fg(palette.muted),
            )));
        }
        lines.push(Line::from(""));
    }

    if let Some(city) = &profile.city {
        lines.push(Line::from(Span::styled(
            "Current City",
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            city.clone(),
            Style::default().fg(palette.muted),
        )));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
