use crate::store::{FeedStatus, FeedStore};
use crate::theme::Palette;
use crate::ui::time::relative_time;
use crate::wall::Post;
use chrono::{Local, Utc};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Scroll position over the feed list. The post data itself lives in the
/// store; this widget only reads it.
pub struct FeedView {
    scroll_state: ListState,
}

impl FeedView {
    pub fn new() -> Self {
        let mut scroll_state = ListState::default();
        scroll_state.select(Some(0));
        Self { scroll_state }
    }

    pub fn scroll_up(&mut self) {
        if let Some(selected) = self.scroll_state.selected() {
            if selected > 0 {
                self.scroll_state.select(Some(selected - 1));
            }
        }
    }

    pub fn scroll_down(&mut self, len: usize) {
        if let Some(selected) = self.scroll_state.selected() {
            if selected < len.saturating_sub(1) {
                self.scroll_state.select(Some(selected + 1));
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, store: &FeedStore, palette: &Palette) {
        let block = Block::default()
            .title(" Wall ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border));

        if store.status() == FeedStatus::Loading && store.posts().is_empty() {
            frame.render_widget(skeleton(palette).block(block), area);
            return;
        }

        if let Some(err) = store.load_error() {
            let error_line = ListItem::new(Line::from(Span::styled(
                err.to_string(),
                Style::default().fg(palette.error),
            )));
            frame.render_widget(List::new(vec![error_line]).block(block), area);
            return;
        }

        if store.posts().is_empty() {
            let empty_line = ListItem::new(Line::from(Span::styled(
                "No posts yet. Be the first to share something.",
                Style::default().fg(palette.muted),
            )));
            frame.render_widget(List::new(vec![empty_line]).block(block), area);
            return;
        }

        let body_width = area.width.saturating_sub(4).max(10) as usize;
        let items: Vec<ListItem> = store
            .posts()
            .iter()
            .map(|post| post_item(post, body_width, palette))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD));

        frame.render_stateful_widget(list, area, &mut self.scroll_state);
    }
}

impl Default for FeedView {
    fn default() -> Self {
        Self::new()
    }
}

/// One feed entry: author line, wrapped body, absolute timestamp.
/// Every post renders as "Anonymous" regardless of the author field.
fn post_item<'a>(post: &'a Post, width: usize, palette: &Palette) -> ListItem<'a> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            "Anonymous",
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" · {}", relative_time(post.created_at, Utc::now())),
            Style::default().fg(palette.muted),
        ),
    ])];

    for wrapped in textwrap::wrap(&post.body, width) {
        lines.push(Line::from(Span::styled(
            wrapped.into_owned(),
            Style::default().fg(palette.text),
        )));
    }

    lines.push(Line::from(Span::styled(
        post.created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        Style::default().fg(palette.muted),
    )));
    lines.push(Line::from(""));

    ListItem::new(lines)
}

/// Placeholder rows shown while the first load is in flight.
fn skeleton(palette: &Palette) -> List<'static> {
    let style = Style::default().fg(palette.skeleton);
    let mut items = Vec::new();
    for _ in 0..3 {
        items.push(ListItem::new(vec![
            Line::from(Span::styled("░░░░░░░░░  ░░░", style)),
            Line::from(Span::styled("░░░░░░░░░░░░░░░░░░░░░░░░░░░░", style)),
            Line::from(Span::styled("░░░░░░░░░░░░░░░░░░", style)),
            Line::from(""),
        ]));
    }
    List::new(items)
}
