pub mod time;
pub mod widgets;

use crate::app::{App, Mode};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

/// Render the whole page: header, sidebar profile, composer, feed.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let palette = app.theme.palette();
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background)),
        area,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(frame, rows[0], app);
    draw_body(frame, rows[1], app);
    draw_key_hints(frame, rows[2], app);
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.theme.palette();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.accent)),
        area,
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(12)])
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        app.config.ui.title.clone(),
        Style::default()
            .fg(palette.header_text)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, centered_row(columns[0]));

    let theme_label = Paragraph::new(Line::from(Span::styled(
        format!("◐ {}", app.theme.as_str()),
        Style::default().fg(palette.header_text),
    )))
    .alignment(Alignment::Right);
    frame.render_widget(theme_label, centered_row(columns[1]));
}

fn draw_body(frame: &mut Frame, area: Rect, app: &mut App) {
    let palette = app.theme.palette();

    // The sidebar collapses on narrow terminals rather than squeezing
    // the feed below a readable width.
    let show_sidebar = area.width >= 72;
    let constraints = if show_sidebar {
        vec![Constraint::Length(30), Constraint::Min(40)]
    } else {
        vec![Constraint::Min(20)]
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let main = if show_sidebar {
        widgets::profile::render(frame, columns[0], &app.config.profile, &palette);
        columns[1]
    } else {
        columns[0]
    };

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(4)])
        .split(main);

    app.composer.render(
        frame,
        sections[0],
        &app.store,
        &palette,
        app.mode == Mode::Compose,
    );
    app.feed.render(frame, sections[1], &app.store, &palette);
}

fn draw_key_hints(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.theme.palette();
    let hints = match app.mode {
        Mode::Normal => "i compose · j/k scroll · t theme · R reload · q quit",
        Mode::Compose => "Enter share · Esc done · Backspace delete",
    };
    let bar = Paragraph::new(Line::from(Span::styled(
        hints,
        Style::default().fg(palette.muted),
    )));
    frame.render_widget(bar, area);
}

/// Middle row of a 3-row area, used to vertically center one-line text
/// inside the header band.
fn centered_row(area: Rect) -> Rect {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);
    rows[1]
}
