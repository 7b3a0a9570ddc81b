use crate::config::Config;
use crate::storage::LocalStore;
use crate::store::{FeedStore, StoreEvent, StoreMessage};
use crate::theme::Theme;
use crate::ui;
use crate::ui::widgets::{Composer, FeedView};
use crate::wall::WallService;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{backend::Backend, Terminal};
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Everything the event loop reacts to: key presses from the input
/// thread, periodic redraw ticks, and async outcomes headed for the
/// store.
#[derive(Debug)]
pub enum AppEvent {
    Input(Event),
    Tick,
    Store(StoreMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Compose,
}

pub struct App {
    pub(crate) config: Config,
    pub(crate) theme: Theme,
    pub(crate) store: FeedStore,
    pub(crate) composer: Composer,
    pub(crate) feed: FeedView,
    pub(crate) mode: Mode,
    storage: LocalStore,
    service: Arc<dyn WallService>,
    tx: UnboundedSender<AppEvent>,
    sub_handle: Option<JoinHandle<()>>,
    should_quit: bool,
}

impl App {
    pub fn new(
        config: Config,
        theme: Theme,
        storage: LocalStore,
        service: Arc<dyn WallService>,
        tx: UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            config,
            theme,
            store: FeedStore::new(),
            composer: Composer::new(),
            feed: FeedView::new(),
            mode: Mode::Normal,
            storage,
            service,
            tx,
            sub_handle: None,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Start an activation: spawn the one-shot history fetch and,
    /// independently, the live subscription. Neither waits for the other;
    /// the store reconciles whatever order their results arrive in.
    pub fn initialize(&mut self) {
        let activation = self.store.begin_initialize();

        let service = self.service.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let event = match service.fetch_all_posts().await {
                Ok(posts) => StoreEvent::Loaded(posts),
                Err(err) => {
                    tracing::warn!(error = %err, "initial fetch failed");
                    StoreEvent::LoadFailed
                }
            };
            let _ = tx.send(AppEvent::Store(StoreMessage { activation, event }));
        });

        let service = self.service.clone();
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            match service.subscribe_to_creations().await {
                Ok(mut stream) => {
                    while let Some(post) = stream.next().await {
                        let message = StoreMessage {
                            activation,
                            event: StoreEvent::Created(post),
                        };
                        if tx.send(AppEvent::Store(message)).is_err() {
                            break;
                        }
                    }
                    tracing::debug!("live stream closed");
                }
                Err(err) => tracing::warn!(error = %err, "live subscription failed"),
            }
        });
        if let Some(old) = self.sub_handle.replace(handle) {
            old.abort();
        }
    }

    /// End the activation. The subscription task is aborted; a fetch or
    /// create still in flight resolves into a stale message that the
    /// store discards.
    pub fn teardown(&mut self) {
        self.store.teardown();
        if let Some(handle) = self.sub_handle.take() {
            handle.abort();
        }
    }

    pub fn reload(&mut self) {
        self.teardown();
        self.initialize();
    }

    /// Submit the composer text. A blank body or an in-flight submission
    /// means no request at all. The feed is never touched here: the new
    /// post arrives back through the live stream.
    pub fn submit(&mut self) {
        let Some(activation) = self.store.begin_posting(self.composer.text()) else {
            return;
        };
        let body = self.composer.text().to_string();
        let service = self.service.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let event = match service.create_post(&body).await {
                Ok(post) => {
                    tracing::debug!(id = %post.id, "create acknowledged");
                    StoreEvent::PostAccepted
                }
                Err(err) => {
                    tracing::warn!(error = %err, "create failed");
                    StoreEvent::PostRejected
                }
            };
            let _ = tx.send(AppEvent::Store(StoreMessage { activation, event }));
        });
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        self.theme.persist(&self.storage);
    }

    pub fn handle_store_message(&mut self, msg: StoreMessage) {
        let accepted = matches!(msg.event, StoreEvent::PostAccepted);
        if self.store.apply(msg) && accepted {
            // Clear only on acknowledged success; a failed submission
            // keeps the text so the user can retry. Focus stays on the
            // composer.
            self.composer.clear();
        }
    }

    pub fn handle_input(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                self.handle_key(key);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.mode {
            Mode::Normal => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Char('i') => self.mode = Mode::Compose,
                KeyCode::Char('t') => self.toggle_theme(),
                KeyCode::Char('R') => self.reload(),
                KeyCode::Char('j') | KeyCode::Down => {
                    self.feed.scroll_down(self.store.posts().len())
                }
                KeyCode::Char('k') | KeyCode::Up => self.feed.scroll_up(),
                _ => {}
            },
            Mode::Compose => match key.code {
                KeyCode::Esc => self.mode = Mode::Normal,
                KeyCode::Enter => self.submit(),
                KeyCode::Backspace => {
                    if !self.store.posting() {
                        self.composer.delete_char();
                    }
                }
                KeyCode::Char(c) => {
                    if !self.store.posting() {
                        self.composer.add_char(c);
                    }
                }
                _ => {}
            },
        }
    }
}

/// The main loop: draw once, then redraw after every event until quit.
/// Ticks arrive a few times a second so relative timestamps stay fresh.
pub async fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    mut rx: UnboundedReceiver<AppEvent>,
) -> Result<()> {
    app.initialize();
    terminal.draw(|frame| ui::draw(frame, &mut app))?;

    while let Some(event) = rx.recv().await {
        match event {
            AppEvent::Input(ev) => app.handle_input(ev),
            AppEvent::Tick => {}
            AppEvent::Store(msg) => app.handle_store_message(msg),
        }
        if app.should_quit() {
            break;
        }
        terminal.draw(|frame| ui::draw(frame, &mut app))?;
    }

    app.teardown();
    Ok(())
}
