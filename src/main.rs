use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};
use walltui::app::{self, App, AppEvent};
use walltui::config::Config;
use walltui::storage::LocalStore;
use walltui::theme::Theme;
use walltui::wall::client::WallClient;

#[derive(Parser)]
#[command(name = "walltui", version, about = "Terminal client for an anonymous freedom wall")]
struct Cli {
    /// Path to the config file (default: the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the wall service base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Write debug logs to this file (the terminal itself is busy)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.wall.base_url = base_url;
    }

    let storage = LocalStore::new(
        LocalStore::default_dir().context("no platform data directory available")?,
    );
    let theme = Theme::resolve(&storage, &config.ui.default_theme);
    let service = Arc::new(WallClient::new(&config.wall));

    let (tx, rx) = mpsc::unbounded_channel();
    spawn_input_thread(tx.clone());
    let app = App::new(config, theme, storage, service, tx);

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = app::run(&mut terminal, app, rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Blocking reader for terminal events on a plain thread; quiet polls
/// become redraw ticks. Ends when the receiving side hangs up.
fn spawn_input_thread(tx: UnboundedSender<AppEvent>) {
    std::thread::spawn(move || loop {
        match event::poll(Duration::from_millis(250)) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.send(AppEvent::Input(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if tx.send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}
