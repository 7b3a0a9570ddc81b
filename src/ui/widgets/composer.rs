use crate::store::FeedStore;
use crate::theme::Palette;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Maximum post length, enforced at input time so the counter can never
/// go negative.
pub const MAX_POST_LEN: usize = 280;

/// The compose box: a bounded text buffer plus its rendering. The text
/// survives a failed submission so the user can retry; it is cleared only
/// when the service acknowledges the post.
pub struct Composer {
    text: String,
}

impl Composer {
    pub fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn add_char(&mut self, c: char) {
        if self.text.chars().count() < MAX_POST_LEN {
            self.text.push(c);
        }
    }

    pub fn delete_char(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn remaining(&self) -> usize {
        MAX_POST_LEN - self.text.chars().count()
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        store: &FeedStore,
        palette: &Palette,
        composing: bool,
    ) {
        let border_style = if composing {
            Style::default().fg(palette.accent)
        } else {
            Style::default().fg(palette.border)
        };

        let block = Block::default()
            .title(" What's on your mind? ")
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let mut body = self.text.clone();
        if composing && !store.posting() {
            body.push('▏');
        }
        let text_style = if store.posting() {
            Style::default().fg(palette.muted)
        } else {
            Style::default().fg(palette.text)
        };
        let input = Paragraph::new(body)
            .style(text_style)
            .wrap(Wrap { trim: false });
        frame.render_widget(input, chunks[0]);

        frame.render_widget(self.status_line(store, palette), chunks[1]);
    }

    fn status_line(&self, store: &FeedStore, palette: &Palette) -> Paragraph<'_> {
        let counter = Span::styled(
            format!("{} characters remaining", self.remaining()),
            Style::default().fg(palette.muted),
        );

        let status = if store.posting() {
            Span::styled("Posting…", Style::default().fg(palette.accent))
        } else if let Some(err) = store.post_error() {
            Span::styled(err.to_string(), Style::default().fg(palette.error))
        } else {
            Span::styled(
                "Enter to share",
                Style::default()
                    .fg(palette.muted)
                    .add_modifier(Modifier::DIM),
            )
        };

        Paragraph::new(Line::from(vec![counter, Span::raw("  "), status]))
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}
