//! glide - terminal slide presenter with animated code diffs

mod app;
mod config;
mod views;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{event, execute, terminal};
use glide_core::Deck;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::Stdout;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "glide",
    about = "Terminal slide presenter with animated code diffs",
    version
)]
struct Cli {
    /// Path to the deck file (JSON)
    deck: PathBuf,
    /// Alternative config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write logs here instead of the terminal (which is busy drawing slides)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let deck = Deck::load(&cli.deck).with_context(|| format!("loading {}", cli.deck.display()))?;
    tracing::info!(slides = deck.len(), deck = %cli.deck.display(), "deck loaded");
    let app_config = config::load(cli.config.as_deref())?;

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, App::new(deck, app_config)).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, mut app: App) -> Result<()> {
    app.on_resize(terminal.size()?.width);
    let mut ticker = tokio::time::interval(app.config.frame_duration());
    loop {
        app.tick();
        terminal.draw(|frame| views::render(frame, &app))?;

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                event::Event::Key(key) if key.kind != event::KeyEventKind::Release => {
                    app.on_key(key)
                }
                event::Event::Resize(width, _) => app.on_resize(width),
                _ => {}
            }
        }
        if app.should_quit {
            return Ok(());
        }
        ticker.tick().await;
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
