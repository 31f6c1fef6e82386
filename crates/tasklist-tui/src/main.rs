use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tasklist_client::ClientConfig;
use tasklist_tui::app::App;

const TICK: Duration = Duration::from_millis(250);

/// Terminal client for the todo list API.
#[derive(Debug, Parser)]
#[command(name = "tasklist")]
struct Cli {
    #[command(flatten)]
    client: ClientConfig,

    /// Print the rendered page as HTML and exit
    #[arg(long)]
    html: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.html {
        // Logs go to stderr so stdout stays a clean document.
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
        let app = App::new(&cli.client)?;
        print!("{}", app.html());
        return Ok(());
    }

    let app = App::new(&cli.client)?;
    run_tui(app)
}

fn run_tui(app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e}");
    }

    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        // Wake up periodically so notices expire without a keypress.
        while !event::poll(TICK)? {
            if app.tick(Instant::now()) {
                terminal.draw(|frame| app.render(frame))?;
            }
        }

        if let Event::Key(key) = event::read()? {
            if app.should_quit(key) {
                break;
            }
            app.handle_key(key);
        }
    }

    Ok(())
}
